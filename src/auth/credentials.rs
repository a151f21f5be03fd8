//! Operator-supplied credentials and their validation rules.

// crates.io
use serde::Deserializer;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Credentials accepted by the connector.
///
/// Either a pre-issued access token, or a client id/secret pair (custom connection),
/// must be present. A refresh token selects the web-app flow and therefore also needs
/// the client pair. Values are never mutated: logging in produces a new [`Credentials`]
/// carrying the freshly issued tokens.
///
/// Field names follow the connector's configuration keys, and empty strings are treated
/// as unset so values forwarded verbatim from flags or environment variables behave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Pre-issued access token; skips login entirely when set.
	#[serde(rename = "token", default, deserialize_with = "non_empty_secret")]
	pub access_token: Option<TokenSecret>,
	/// Refresh token used by the web-app flow.
	#[serde(rename = "refresh-token", default, deserialize_with = "non_empty_secret")]
	pub refresh_token: Option<TokenSecret>,
	/// OAuth 2.0 client identifier.
	#[serde(rename = "xero-client-id", default, deserialize_with = "non_empty_string")]
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret.
	#[serde(rename = "xero-client-secret", default, deserialize_with = "non_empty_secret")]
	pub client_secret: Option<TokenSecret>,
}
impl Credentials {
	/// Credentials for a machine-to-machine custom connection.
	pub fn client(client_id: impl Into<String>, client_secret: impl Into<TokenSecret>) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(client_secret.into()),
			..Default::default()
		}
	}

	/// Credentials carrying a pre-issued access token.
	pub fn access_token(token: impl Into<TokenSecret>) -> Self {
		Self { access_token: Some(token.into()), ..Default::default() }
	}

	/// Attaches a refresh token, selecting the web-app flow on login.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<TokenSecret>) -> Self {
		self.refresh_token = Some(refresh_token.into()).filter(|secret| !secret.is_empty());

		self
	}

	/// Checks the configuration rules before any network call is made.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let client_set = self.client_pair().is_some();

		if !client_set && self.access_token.is_none() {
			return Err(ConfigError::MissingCredentials);
		}
		if self.refresh_token.is_some() && !client_set {
			return Err(ConfigError::RefreshTokenWithoutClient);
		}

		Ok(())
	}

	/// Returns the client id/secret pair when both halves are configured.
	pub fn client_pair(&self) -> Option<(&str, &TokenSecret)> {
		match (self.client_id.as_deref(), self.client_secret.as_ref()) {
			(Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Some((id, secret)),
			_ => None,
		}
	}

	pub(crate) fn require_client_pair(&self) -> Result<(&str, &TokenSecret), ConfigError> {
		self.client_pair().ok_or(ConfigError::MissingClientCredentials)
	}
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}

fn non_empty_secret<'de, D>(deserializer: D) -> Result<Option<TokenSecret>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(non_empty_string(deserializer)?.map(TokenSecret::new))
}
