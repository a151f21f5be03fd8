//! Internal OAuth client facade over the `oauth2` crate's basic client.

// std
use std::time::Duration as StdDuration;
// crates.io
use oauth2::{
	AccessToken, AuthType, Client, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RefreshToken, RequestTokenError, Scope, StandardRevocableToken,
	TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRequestTokenError, BasicRevocationErrorResponse,
		BasicTokenIntrospectionResponse, BasicTokenType,
	},
};
use serde::Deserializer;
// self
use crate::{
	_prelude::*,
	auth::{ScopeList, TokenGrant, TokenSecret},
	error::{ApiError, ConfigError, DecodeError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot, TransportErrorMapper},
	obs::OperationKind,
	provider::XeroEndpoints,
};

type XeroOAuthClient<HasTokenUrl = EndpointNotSet> = Client<
	BasicErrorResponse,
	XeroTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	HasTokenUrl,
>;

/// Token endpoint success body.
///
/// Xero documents only `access_token` and `refresh_token`; `token_type` defaults to bearer
/// when omitted and is matched case-insensitively.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct XeroTokenResponse {
	access_token: AccessToken,
	#[serde(default = "bearer", deserialize_with = "deserialize_token_type")]
	token_type: BasicTokenType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	expires_in: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	refresh_token: Option<RefreshToken>,
	#[serde(skip)]
	scopes: Option<Vec<Scope>>,
}
impl TokenResponse for XeroTokenResponse {
	type TokenType = BasicTokenType;

	fn access_token(&self) -> &AccessToken {
		&self.access_token
	}

	fn token_type(&self) -> &BasicTokenType {
		&self.token_type
	}

	fn expires_in(&self) -> Option<StdDuration> {
		self.expires_in.map(StdDuration::from_secs)
	}

	fn refresh_token(&self) -> Option<&RefreshToken> {
		self.refresh_token.as_ref()
	}

	fn scopes(&self) -> Option<&Vec<Scope>> {
		self.scopes.as_ref()
	}
}

fn bearer() -> BasicTokenType {
	BasicTokenType::Bearer
}

fn deserialize_token_type<'de, D>(
	deserializer: D,
) -> std::result::Result<BasicTokenType, D::Error>
where
	D: Deserializer<'de>,
{
	let value = String::deserialize(deserializer)?;

	Ok(match value.to_ascii_lowercase().as_str() {
		"bearer" => BasicTokenType::Bearer,
		"mac" => BasicTokenType::Mac,
		_ => BasicTokenType::Extension(value),
	})
}

/// Token endpoint client bound to one client id/secret pair.
///
/// Xero authenticates the client with HTTP Basic and also accepts the pair in the form
/// body; both are sent so custom connections and web apps share one request shape.
pub(crate) struct TokenFacade<'a, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: XeroOAuthClient<EndpointSet>,
	client_id: &'a str,
	client_secret: &'a TokenSecret,
	http_client: &'a C,
	error_mapper: &'a M,
}
impl<'a, C, M> TokenFacade<'a, C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn new(
		endpoints: &XeroEndpoints,
		client_id: &'a str,
		client_secret: &'a TokenSecret,
		http_client: &'a C,
		error_mapper: &'a M,
	) -> Result<Self> {
		let token_url = TokenUrl::new(endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidTokenEndpoint { source })?;
		let oauth_client = XeroOAuthClient::new(ClientId::new(client_id.to_owned()))
			.set_client_secret(ClientSecret::new(client_secret.expose().to_owned()))
			.set_auth_type(AuthType::BasicAuth)
			.set_token_uri(token_url);

		Ok(Self { oauth_client, client_id, client_secret, http_client, error_mapper })
	}

	pub(crate) async fn exchange_client_credentials(&self, scopes: &ScopeList) -> Result<TokenGrant> {
		const OPERATION: OperationKind = OperationKind::ClientCredentials;

		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let mut request = self
			.oauth_client
			.exchange_client_credentials()
			.add_extra_param("client_id", self.client_id)
			.add_extra_param("client_secret", self.client_secret.expose());

		for scope in scopes.iter() {
			request = request.add_scope(Scope::new(scope.to_owned()));
		}

		let response = request.request_async(&instrumented).await.map_err(|err| {
			map_request_error(OPERATION, meta.take(), err, self.error_mapper)
		})?;

		Ok(map_token_response(&response))
	}

	pub(crate) async fn exchange_refresh_token(
		&self,
		refresh_token: &TokenSecret,
		scopes: &ScopeList,
	) -> Result<TokenGrant> {
		const OPERATION: OperationKind = OperationKind::RefreshToken;

		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let refresh_secret = RefreshToken::new(refresh_token.expose().to_owned());
		let mut request = self
			.oauth_client
			.exchange_refresh_token(&refresh_secret)
			.add_extra_param("client_id", self.client_id)
			.add_extra_param("client_secret", self.client_secret.expose());

		for scope in scopes.iter() {
			request = request.add_scope(Scope::new(scope.to_owned()));
		}

		let response = request.request_async(&instrumented).await.map_err(|err| {
			map_request_error(OPERATION, meta.take(), err, self.error_mapper)
		})?;

		Ok(map_token_response(&response))
	}
}

fn map_token_response(response: &XeroTokenResponse) -> TokenGrant {
	let expires_at = response
		.expires_in()
		.and_then(|ttl| i64::try_from(ttl.as_secs()).ok())
		.filter(|secs| *secs > 0)
		.map(|secs| OffsetDateTime::now_utc() + Duration::seconds(secs));

	TokenGrant {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		refresh_token: response
			.refresh_token()
			.map(|token| TokenSecret::new(token.secret().to_owned())),
		expires_at,
	}
}

fn map_request_error<E, M>(
	operation: OperationKind,
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let status = meta.as_ref().and_then(|value| value.status);
	let retry_after = meta.as_ref().and_then(|value| value.retry_after);
	let error_body = meta.as_ref().and_then(|value| value.error_body.clone());

	match err {
		RequestTokenError::Request(error) =>
			mapper.map_transport_error(operation, meta.as_ref(), error),
		RequestTokenError::ServerResponse(response) => ApiError::TokenEndpoint {
			status,
			body: error_body.unwrap_or_else(|| {
				serde_json::to_string(&response)
					.unwrap_or_else(|_| response.error().as_ref().to_owned())
			}),
			retry_after,
		}
		.into(),
		// Non-2xx bodies that are not OAuth error documents surface as parse failures.
		RequestTokenError::Parse(_, body) if status.is_some_and(|code| !(200..300).contains(&code)) =>
			ApiError::TokenEndpoint {
				status,
				body: error_body.unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned()),
				retry_after,
			}
			.into(),
		RequestTokenError::Parse(source, _) => DecodeError::Json { operation, source, status }.into(),
		RequestTokenError::Other(message) => match error_body {
			Some(body) => ApiError::TokenEndpoint { status, body, retry_after }.into(),
			None => ApiError::UnexpectedResponse { message, status }.into(),
		},
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_response_accepts_bare_token_pair() {
		let response: XeroTokenResponse =
			serde_json::from_str(r#"{"access_token":"a1","refresh_token":"r2"}"#)
				.expect("Token pair without token_type should deserialize.");

		assert_eq!(response.token_type(), &BasicTokenType::Bearer);
		assert!(response.expires_in().is_none());

		let grant = map_token_response(&response);

		assert_eq!(grant.access_token.expose(), "a1");
		assert_eq!(grant.refresh_token.as_ref().map(|token| token.expose()), Some("r2"));
		assert!(grant.expires_at.is_none());
	}

	#[test]
	fn token_type_matches_case_insensitively() {
		let response: XeroTokenResponse = serde_json::from_str(
			r#"{"access_token":"a1","token_type":"Bearer","expires_in":1800}"#,
		)
		.expect("Full token response should deserialize.");

		assert_eq!(response.token_type(), &BasicTokenType::Bearer);
		assert_eq!(response.expires_in(), Some(StdDuration::from_secs(1800)));
		assert!(map_token_response(&response).expires_at.is_some());
	}
}
