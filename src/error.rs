//! Connector-level error types shared across flows, the API client, and resource syncers.

// self
use crate::{_prelude::*, obs::OperationKind};

/// Connector-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical connector error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem detected before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Xero answered with a non-success status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Xero answered with a body that could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Client credentials login failed.
	#[error("Failed to login.")]
	Login {
		/// Underlying exchange failure.
		#[source]
		source: Box<Error>,
	},
	/// Refresh token exchange failed.
	#[error("Failed to refresh token.")]
	RefreshToken {
		/// Underlying exchange failure.
		#[source]
		source: Box<Error>,
	},
	/// Tenant lookup failed.
	#[error("Failed to get tenant id.")]
	Tenant {
		/// Underlying lookup failure.
		#[source]
		source: Box<Error>,
	},
	/// The token is not bound to any Xero organisation.
	#[error("No connections found.")]
	NoConnections,
	/// Credential validation against the API failed.
	#[error("Provided credentials are invalid.")]
	Unauthenticated {
		/// Failure observed while validating.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	pub(crate) fn login(source: Error) -> Self {
		Self::Login { source: Box::new(source) }
	}

	pub(crate) fn refresh_token(source: Error) -> Self {
		Self::RefreshToken { source: Box::new(source) }
	}

	pub(crate) fn tenant(source: Error) -> Self {
		Self::Tenant { source: Box::new(source) }
	}

	pub(crate) fn unauthenticated(source: Error) -> Self {
		Self::Unauthenticated { source: Box::new(source) }
	}

	/// Returns the HTTP status attached to this error or the innermost wrapped error.
	pub fn http_status(&self) -> Option<u16> {
		match self {
			Self::Api(err) => err.status(),
			Self::Decode(DecodeError::Json { status, .. }) => *status,
			Self::Login { source }
			| Self::RefreshToken { source }
			| Self::Tenant { source }
			| Self::Unauthenticated { source } => source.http_status(),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before talking to Xero.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Neither an access token nor a client id/secret pair was configured.
	#[error("Either client id and secret or an access token must be set.")]
	MissingCredentials,
	/// A refresh token was configured without the client pair required to redeem it.
	#[error("Refresh token requires client id and secret to be set.")]
	RefreshTokenWithoutClient,
	/// A token exchange was requested without a client id/secret pair.
	#[error("Token exchange requires both a client id and a client secret.")]
	MissingClientCredentials,
	/// Endpoint descriptor failed validation.
	#[error(transparent)]
	InvalidEndpoints(#[from] crate::provider::EndpointError),
	/// Token endpoint URL was rejected by the OAuth client.
	#[error("Token endpoint URL is invalid.")]
	InvalidTokenEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Requested scopes cannot be used.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Non-success answers from the identity or API hosts.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// Identity endpoint rejected a token exchange.
	#[error("Token endpoint rejected the request: {body}.")]
	TokenEndpoint {
		/// HTTP status code, when the transport reported one.
		status: Option<u16>,
		/// Response body text returned by the identity endpoint.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Connections or resource endpoint answered with a non-success status.
	#[error("Request failed with HTTP {status} during {operation}.")]
	Status {
		/// Operation that issued the request.
		operation: OperationKind,
		/// HTTP status code.
		status: u16,
		/// Xero correlation identifier, if supplied.
		correlation_id: Option<String>,
	},
	/// Identity endpoint answered in a shape the OAuth client could not interpret.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Description of the unexpected response.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Refresh exchange succeeded without rotating the single-use refresh token.
	#[error("Token endpoint did not return a rotated refresh token.")]
	MissingRefreshToken,
}
impl ApiError {
	/// Returns the HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::TokenEndpoint { status, .. } | Self::UnexpectedResponse { status, .. } => *status,
			Self::Status { status, .. } => Some(*status),
			Self::MissingRefreshToken => None,
		}
	}
}

/// Malformed payloads returned by Xero.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// JSON body could not be mapped into the expected shape.
	#[error("Response to {operation} contained malformed JSON.")]
	Json {
		/// Operation that received the payload.
		operation: OperationKind,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling Xero.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling Xero.")]
	Io(#[from] std::io::Error),
	/// Transport failed without a typed error.
	#[error("HTTP client error occurred while calling Xero: {message}.")]
	Other {
		/// Transport-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn http_status_reaches_through_context_wrappers() {
		let inner = ApiError::TokenEndpoint {
			status: Some(401),
			body: "{\"error\":\"invalid_client\"}".into(),
			retry_after: None,
		};
		let err = Error::login(inner.into());

		assert_eq!(err.http_status(), Some(401));
		assert_eq!(err.to_string(), "Failed to login.");
		assert!(Error::NoConnections.http_status().is_none());
	}

	#[test]
	fn status_error_names_the_operation() {
		let err = ApiError::Status {
			operation: OperationKind::ListUsers,
			status: 429,
			correlation_id: None,
		};

		assert_eq!(err.to_string(), "Request failed with HTTP 429 during list_users.");
	}
}
