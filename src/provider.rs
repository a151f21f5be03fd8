//! Validated Xero endpoint descriptor.
//!
//! [`XeroEndpoints`] holds the identity token endpoint, the connections endpoint used for
//! tenant resolution, and the Accounting API base every resource path is joined onto.
//! Production values are the default; overrides exist for regional proxies and tests and
//! must still use HTTPS.

/// Builder API for assembling endpoint descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Xero identity host token endpoint.
pub const XERO_TOKEN_ENDPOINT: &str = "https://identity.xero.com/connect/token";
/// Xero connections endpoint listing the tenants a token may act on.
pub const XERO_CONNECTIONS_ENDPOINT: &str = "https://api.xero.com/connections";
/// Xero Accounting API base URL.
pub const XERO_API_BASE: &str = "https://api.xero.com/api.xro/2.0";

/// Resource paths under the Accounting API base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiPath {
	/// `/Users`
	Users,
	/// `/Organisations`
	Organisations,
}
impl ApiPath {
	/// Returns the path segment appended to the API base.
	pub const fn as_str(self) -> &'static str {
		match self {
			ApiPath::Users => "Users",
			ApiPath::Organisations => "Organisations",
		}
	}
}

/// Immutable endpoint set consumed by the authenticator and the API client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XeroEndpoints {
	/// OAuth 2.0 token endpoint used by both grant flows.
	pub token: Url,
	/// Connections endpoint used for tenant resolution.
	pub connections: Url,
	/// Accounting API base URL.
	pub api_base: Url,
}
impl XeroEndpoints {
	/// Creates a new builder seeded with no overrides.
	pub fn builder() -> XeroEndpointsBuilder {
		XeroEndpointsBuilder::default()
	}

	/// Production Xero endpoints.
	pub fn production() -> Result<Self, EndpointError> {
		Self::builder().build()
	}

	/// Joins a resource path onto the API base, keeping the base's version prefix.
	pub fn api_url(&self, path: ApiPath) -> Url {
		let mut url = self.api_base.clone();
		let joined = format!("{}/{}", self.api_base.path().trim_end_matches('/'), path.as_str());

		url.set_path(&joined);

		url
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn api_urls_keep_version_prefix() {
		let endpoints = XeroEndpoints::production().expect("Production endpoints should be valid.");

		assert_eq!(endpoints.api_url(ApiPath::Users).as_str(), "https://api.xero.com/api.xro/2.0/Users");
		assert_eq!(
			endpoints.api_url(ApiPath::Organisations).as_str(),
			"https://api.xero.com/api.xro/2.0/Organisations",
		);
		assert_eq!(endpoints.token.as_str(), XERO_TOKEN_ENDPOINT);
	}

	#[test]
	fn trailing_slash_on_base_is_ignored() {
		let endpoints = XeroEndpoints::builder()
			.api_base(Url::parse("https://proxy.example.com/xero/").expect("URL should parse."))
			.build()
			.expect("Override should be accepted.");

		assert_eq!(
			endpoints.api_url(ApiPath::Users).as_str(),
			"https://proxy.example.com/xero/Users",
		);
	}
}
