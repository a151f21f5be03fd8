//! Connector configuration.
//!
//! Keys mirror the connector's flags (`token`, `refresh-token`, `xero-client-id`,
//! `xero-client-secret`) so a host can deserialize flags, environment, or a file straight
//! into [`ConnectorConfig`]. Empty values count as unset.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, ScopeList},
	connector::RoleModel,
	error::ConfigError,
	provider::{XeroEndpoints, XeroEndpointsBuilder},
};

/// Everything needed to construct a [`crate::connector::Connector`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectorConfig {
	/// Access token or client credentials, plus an optional refresh token.
	#[serde(flatten)]
	pub credentials: Credentials,
	/// How roles are exposed to the sync engine.
	#[serde(default)]
	pub role_model: RoleModel,
	/// Endpoint overrides; production endpoints are used when unset.
	#[serde(default)]
	pub endpoints: XeroEndpointsBuilder,
	/// Scopes requested during token exchanges.
	#[serde(default)]
	pub scopes: ScopeList,
}
impl ConnectorConfig {
	/// Creates a configuration around `credentials` with every other setting defaulted.
	pub fn new(credentials: Credentials) -> Self {
		Self { credentials, ..Default::default() }
	}

	/// Selects the role model.
	pub fn with_role_model(mut self, role_model: RoleModel) -> Self {
		self.role_model = role_model;

		self
	}

	/// Replaces the endpoint overrides.
	pub fn with_endpoints(mut self, endpoints: XeroEndpointsBuilder) -> Self {
		self.endpoints = endpoints;

		self
	}

	/// Replaces the requested scopes.
	pub fn with_scopes(mut self, scopes: ScopeList) -> Self {
		self.scopes = scopes;

		self
	}

	/// Checks credentials and endpoints without touching the network.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.credentials.validate()?;
		self.endpoints()?;

		Ok(())
	}

	/// Resolves the endpoint overrides against the production defaults.
	pub fn endpoints(&self) -> Result<XeroEndpoints, ConfigError> {
		Ok(self.endpoints.clone().build()?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::provider::XERO_TOKEN_ENDPOINT;

	#[test]
	fn deserializes_flag_keys_and_defaults() {
		let config: ConnectorConfig = serde_json::from_str(
			r#"{"xero-client-id":"id","xero-client-secret":"secret","refresh-token":"r1"}"#,
		)
		.expect("Configuration should deserialize.");

		assert!(config.validate().is_ok());
		assert_eq!(config.role_model, RoleModel::OrganizationEntitlements);
		assert_eq!(config.scopes, ScopeList::xero_default());
		assert_eq!(
			config.endpoints().expect("Default endpoints should build.").token.as_str(),
			XERO_TOKEN_ENDPOINT,
		);
		assert_eq!(config.credentials.refresh_token.as_ref().map(|t| t.expose()), Some("r1"));
	}

	#[test]
	fn rejects_insecure_endpoint_overrides() {
		let config = ConnectorConfig::new(Credentials::access_token("token")).with_endpoints(
			XeroEndpointsBuilder::default().api_base(
				Url::parse("http://localhost/api.xro/2.0").expect("Fixture URL should parse."),
			),
		);

		assert!(matches!(config.validate(), Err(ConfigError::InvalidEndpoints(_))));
	}

	#[test]
	fn rejects_missing_credentials() {
		let config: ConnectorConfig =
			serde_json::from_str(r#"{"token":""}"#).expect("Configuration should deserialize.");

		assert!(matches!(config.validate(), Err(ConfigError::MissingCredentials)));
	}
}
