// self
use crate::{
	_prelude::*,
	provider::{XERO_API_BASE, XERO_CONNECTIONS_ENDPOINT, XERO_TOKEN_ENDPOINT, XeroEndpoints},
};

/// Errors raised while constructing or validating endpoint descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum EndpointError {
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A built-in endpoint constant failed to parse.
	#[error("The default {endpoint} endpoint is malformed.")]
	MalformedDefault {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Builder for [`XeroEndpoints`]; unset endpoints fall back to production Xero.
///
/// The builder doubles as the `endpoints` section of the connector configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct XeroEndpointsBuilder {
	/// Token endpoint override.
	pub token: Option<Url>,
	/// Connections endpoint override.
	pub connections: Option<Url>,
	/// API base override.
	pub api_base: Option<Url>,
}
impl XeroEndpointsBuilder {
	/// Overrides the token endpoint.
	pub fn token(mut self, url: Url) -> Self {
		self.token = Some(url);

		self
	}

	/// Overrides the connections endpoint.
	pub fn connections(mut self, url: Url) -> Self {
		self.connections = Some(url);

		self
	}

	/// Overrides the API base URL.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<XeroEndpoints, EndpointError> {
		let endpoints = XeroEndpoints {
			token: or_default("token", self.token, XERO_TOKEN_ENDPOINT)?,
			connections: or_default("connections", self.connections, XERO_CONNECTIONS_ENDPOINT)?,
			api_base: or_default("api", self.api_base, XERO_API_BASE)?,
		};

		endpoints.validate()?;

		Ok(endpoints)
	}
}

impl XeroEndpoints {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), EndpointError> {
		validate_endpoint("token", &self.token)?;
		validate_endpoint("connections", &self.connections)?;
		validate_endpoint("api", &self.api_base)?;

		Ok(())
	}
}

fn or_default(
	endpoint: &'static str,
	value: Option<Url>,
	default: &str,
) -> Result<Url, EndpointError> {
	match value {
		Some(url) => Ok(url),
		None => Url::parse(default).map_err(|source| EndpointError::MalformedDefault { endpoint, source }),
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), EndpointError> {
	if url.scheme() != "https" {
		Err(EndpointError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}
