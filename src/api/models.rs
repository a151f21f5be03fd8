//! Xero payloads consumed by the connector.

// self
use crate::{_prelude::*, auth::TenantId};

/// Entry returned by the connections endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
	/// Connection identifier.
	pub id: String,
	/// Tenant the connection grants access to.
	#[serde(rename = "tenantId")]
	pub tenant_id: TenantId,
	/// Human-readable tenant name.
	#[serde(rename = "tenantName", default)]
	pub tenant_name: Option<String>,
}

/// Xero organisation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
	/// Organisation identifier.
	#[serde(rename = "OrganisationID")]
	pub id: String,
	/// Display name.
	#[serde(rename = "Name", default)]
	pub name: String,
	/// ISO country code.
	#[serde(rename = "CountryCode", default)]
	pub country_code: String,
}

/// Xero user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// User identifier.
	#[serde(rename = "UserID")]
	pub id: String,
	/// Email address, also used as login.
	#[serde(rename = "EmailAddress", default)]
	pub email: String,
	/// Given name.
	#[serde(rename = "FirstName", default)]
	pub first_name: String,
	/// Family name.
	#[serde(rename = "LastName", default)]
	pub last_name: String,
	/// Organisation role as stored by Xero (upper-case, e.g. `STANDARD`).
	#[serde(rename = "OrganisationRole", default)]
	pub organisation_role: String,
}

/// `GET /Users` response envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UsersEnvelope {
	/// Users in the tenant.
	#[serde(rename = "Users", alias = "users", default)]
	pub users: Vec<User>,
}

/// `GET /Organisations` response envelope.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OrganisationsEnvelope {
	/// Organisations in the tenant.
	#[serde(rename = "Organisations", alias = "organisations", default)]
	pub organisations: Vec<Organization>,
}
