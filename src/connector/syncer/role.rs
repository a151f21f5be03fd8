//! Role syncer for the role-resource model.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	client::XeroClient,
	connector::{
		model::{
			Entitlement, Grant, Page, ROLE, Resource, ResourceId, ResourceTraits, ResourceType,
			RoleTrait, USER,
		},
		role::Role,
		syncer::{ResourceSyncer, SyncFuture},
	},
	http::{HttpTransport, TransportErrorMapper},
	obs::{self, OperationKind},
};

/// Syncs the fixed Xero role set as `role` resources.
pub struct RoleSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: Arc<XeroClient<C, M>>,
}
impl<C, M> RoleSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a role syncer.
	pub fn new(client: Arc<XeroClient<C, M>>) -> Self {
		Self { client }
	}
}
impl<C, M> ResourceSyncer for RoleSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn resource_type(&self) -> ResourceType {
		ROLE
	}

	fn list(&self) -> SyncFuture<'_, Resource> {
		Box::pin(obs::observe(OperationKind::ListResources, "role", async {
			Ok(Page::last(Role::ALL.into_iter().map(role_resource).collect()))
		}))
	}

	fn entitlements<'a>(&'a self, resource: &'a Resource) -> SyncFuture<'a, Entitlement> {
		Box::pin(obs::observe(OperationKind::ListEntitlements, "role", async move {
			Ok(Page::last(vec![role_entitlement(resource)]))
		}))
	}

	fn grants<'a>(&'a self, resource: &'a Resource) -> SyncFuture<'a, Grant> {
		Box::pin(obs::observe(OperationKind::ListGrants, "role", async move {
			let Some(role) = Role::from_api_value(&resource.id.resource) else {
				return Ok(Page::empty());
			};
			let users = self.client.get_users(Some(&role.filter_value())).await?;
			let grants = users
				.iter()
				.filter(|user| {
					let matches = Role::from_api_value(&user.organisation_role) == Some(role);

					if !matches {
						obs::record_skipped_role(&user.id, &user.organisation_role);
					}

					matches
				})
				.map(|user| Grant::new(resource, role.id(), ResourceId::new(&USER, user.id.clone())))
				.collect();

			Ok(Page::last(grants))
		}))
	}
}

fn role_entitlement(resource: &Resource) -> Entitlement {
	let name = &resource.display_name;

	Entitlement::assignment(resource, resource.id.resource.clone())
		.with_display_name(format!("{name} Role"))
		.with_description(format!("{name} role in Xero organization"))
		.grantable_to(&USER)
}

fn role_resource(role: Role) -> Resource {
	let mut profile = Map::new();

	profile.insert("role_name".into(), Value::String(role.id().into()));

	Resource::new(&ROLE, role.id(), role.display_name())
		.with_traits(ResourceTraits::Role(RoleTrait { profile }))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn role_resources_use_display_table() {
		let resource = role_resource(Role::ManagedClient);

		assert_eq!(resource.id.to_string(), "role:managedclient");
		assert_eq!(resource.display_name, "Managed Client");
		assert!(matches!(
			resource.traits,
			Some(ResourceTraits::Role(RoleTrait { ref profile }))
				if profile.get("role_name") == Some(&Value::String("managedclient".into()))
		));
	}

	#[test]
	fn role_entitlement_is_assignable_to_users() {
		let entitlement = role_entitlement(&role_resource(Role::CashbookClient));

		assert_eq!(entitlement.id, "role:cashbookclient:cashbookclient");
		assert_eq!(entitlement.display_name, "Cashbook Client Role");
		assert_eq!(entitlement.description, "Cashbook Client role in Xero organization");
		assert_eq!(entitlement.grantable_to, ["user"]);
	}
}
