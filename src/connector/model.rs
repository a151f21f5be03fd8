//! Generic resource / entitlement / grant model handed to the sync engine.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Organisation resource type.
pub const ORG: ResourceType = ResourceType {
	id: "org",
	display_name: "Organization",
	trait_: None,
	skip_entitlements_and_grants: false,
};
/// User resource type; users hold grants but expose none of their own.
pub const USER: ResourceType = ResourceType {
	id: "user",
	display_name: "User",
	trait_: Some(ResourceTrait::User),
	skip_entitlements_and_grants: true,
};
/// Role resource type.
pub const ROLE: ResourceType = ResourceType {
	id: "role",
	display_name: "Role",
	trait_: Some(ResourceTrait::Role),
	skip_entitlements_and_grants: false,
};

/// Trait a resource type advertises to the sync engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTrait {
	/// Resources are identities with emails and a login.
	User,
	/// Resources are roles that can be assigned to users.
	Role,
}

/// Static description of a kind of resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceType {
	/// Stable identifier (`org`, `user`, `role`).
	pub id: &'static str,
	/// Human-readable name.
	pub display_name: &'static str,
	/// Optional trait annotation.
	#[serde(rename = "trait", skip_serializing_if = "Option::is_none")]
	pub trait_: Option<ResourceTrait>,
	/// Tells the sync engine not to ask this type for entitlements or grants.
	pub skip_entitlements_and_grants: bool,
}

/// Reference to one resource of a given type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceId {
	/// Resource type identifier.
	pub resource_type: String,
	/// Identifier of the resource within its type.
	pub resource: String,
}
impl ResourceId {
	/// Builds a reference to `resource` of `resource_type`.
	pub fn new(resource_type: &ResourceType, resource: impl Into<String>) -> Self {
		Self { resource_type: resource_type.id.to_owned(), resource: resource.into() }
	}
}
impl Display for ResourceId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}:{}", self.resource_type, self.resource)
	}
}

/// A user's email entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Email {
	/// Address as reported by Xero.
	pub address: String,
	/// Whether this is the primary address.
	pub is_primary: bool,
}

/// Account status attached to user resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
	/// The account can sign in.
	Enabled,
}

/// Identity details carried by `user` resources.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserTrait {
	/// Known email addresses.
	pub emails: Vec<Email>,
	/// Account status.
	pub status: UserStatus,
	/// Login name.
	pub login: String,
	/// Free-form profile attributes.
	pub profile: Map<String, Value>,
}

/// Details carried by `role` resources.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoleTrait {
	/// Free-form profile attributes.
	pub profile: Map<String, Value>,
}

/// Trait payload of a resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceTraits {
	/// Identity payload.
	User(UserTrait),
	/// Role payload.
	Role(RoleTrait),
}

/// A synced resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Resource {
	/// Resource reference.
	pub id: ResourceId,
	/// Human-readable name.
	pub display_name: String,
	/// Optional trait payload.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub traits: Option<ResourceTraits>,
}
impl Resource {
	/// Creates a resource without trait data.
	pub fn new(
		resource_type: &ResourceType,
		id: impl Into<String>,
		display_name: impl Into<String>,
	) -> Self {
		Self {
			id: ResourceId::new(resource_type, id),
			display_name: display_name.into(),
			traits: None,
		}
	}

	/// Attaches a trait payload.
	pub fn with_traits(mut self, traits: ResourceTraits) -> Self {
		self.traits = Some(traits);

		self
	}
}

/// What holding an entitlement means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementPurpose {
	/// The principal is assigned to the resource.
	Assignment,
}

/// A grantable permission on a resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entitlement {
	/// `"{resource_type}:{resource}:{slug}"`.
	pub id: String,
	/// Resource the entitlement belongs to.
	pub resource: ResourceId,
	/// Short machine name.
	pub slug: String,
	/// Human-readable name.
	pub display_name: String,
	/// Longer description.
	pub description: String,
	/// Entitlement purpose.
	pub purpose: EntitlementPurpose,
	/// Resource types that may receive this entitlement.
	pub grantable_to: Vec<&'static str>,
}
impl Entitlement {
	/// Builds an assignment entitlement on `resource`.
	pub fn assignment(resource: &Resource, slug: impl Into<String>) -> Self {
		let slug = slug.into();

		Self {
			id: format!("{}:{slug}", resource.id),
			resource: resource.id.clone(),
			display_name: slug.clone(),
			description: String::new(),
			slug,
			purpose: EntitlementPurpose::Assignment,
			grantable_to: Vec::new(),
		}
	}

	/// Sets the display name.
	pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
		self.display_name = display_name.into();

		self
	}

	/// Sets the description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();

		self
	}

	/// Adds a resource type allowed to receive the entitlement.
	pub fn grantable_to(mut self, resource_type: &ResourceType) -> Self {
		self.grantable_to.push(resource_type.id);

		self
	}
}

/// Reference to the entitlement a grant points at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntitlementRef {
	/// Entitlement identifier.
	pub id: String,
	/// Resource the entitlement belongs to.
	pub resource: ResourceId,
}

/// A principal holding an entitlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grant {
	/// `"{entitlement_id}:{principal_type}:{principal}"`.
	pub id: String,
	/// Granted entitlement.
	pub entitlement: EntitlementRef,
	/// Principal receiving it.
	pub principal: ResourceId,
}
impl Grant {
	/// Grants the entitlement `slug` on `resource` to `principal`.
	pub fn new(resource: &Resource, slug: &str, principal: ResourceId) -> Self {
		let entitlement_id = format!("{}:{slug}", resource.id);

		Self {
			id: format!("{entitlement_id}:{principal}"),
			entitlement: EntitlementRef { id: entitlement_id, resource: resource.id.clone() },
			principal,
		}
	}
}

/// One page of syncer output. Xero reads are unpaginated, so every page is the last.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
	/// Items on this page.
	pub items: Vec<T>,
	/// Token for the next page; always `None`.
	pub next_page_token: Option<String>,
}
impl<T> Page<T> {
	/// Wraps `items` as the final page.
	pub fn last(items: Vec<T>) -> Self {
		Self { items, next_page_token: None }
	}

	/// An empty final page.
	pub fn empty() -> Self {
		Self::last(Vec::new())
	}
}
