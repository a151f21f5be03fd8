//! Organisation syncer.

// self
use crate::{
	_prelude::*,
	api::User,
	client::XeroClient,
	connector::{
		model::{Entitlement, Grant, ORG, Page, Resource, ResourceId, ResourceType, USER},
		role::{Role, RoleModel},
		syncer::{ResourceSyncer, SyncFuture},
	},
	http::{HttpTransport, TransportErrorMapper},
	obs::{self, OperationKind},
};

/// Syncs organisations and, in the organisation-entitlement model, role assignments.
pub struct OrgSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: Arc<XeroClient<C, M>>,
	role_model: RoleModel,
}
impl<C, M> OrgSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an organisation syncer for `role_model`.
	pub fn new(client: Arc<XeroClient<C, M>>, role_model: RoleModel) -> Self {
		Self { client, role_model }
	}

	fn exposes_roles(&self) -> bool {
		self.role_model == RoleModel::OrganizationEntitlements
	}
}
impl<C, M> ResourceSyncer for OrgSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn resource_type(&self) -> ResourceType {
		ORG
	}

	fn list(&self) -> SyncFuture<'_, Resource> {
		Box::pin(obs::observe(OperationKind::ListResources, "org", async move {
			let organisations = self.client.get_organizations().await?;

			Ok(Page::last(
				organisations.into_iter().map(|org| Resource::new(&ORG, org.id, org.name)).collect(),
			))
		}))
	}

	fn entitlements<'a>(&'a self, resource: &'a Resource) -> SyncFuture<'a, Entitlement> {
		Box::pin(obs::observe(OperationKind::ListEntitlements, "org", async move {
			if !self.exposes_roles() {
				return Ok(Page::empty());
			}

			Ok(Page::last(Role::ALL.iter().map(|role| role_entitlement(resource, *role)).collect()))
		}))
	}

	fn grants<'a>(&'a self, resource: &'a Resource) -> SyncFuture<'a, Grant> {
		Box::pin(obs::observe(OperationKind::ListGrants, "org", async move {
			if !self.exposes_roles() {
				return Ok(Page::empty());
			}

			let users = self.client.get_users(None).await?;

			Ok(Page::last(users.iter().filter_map(|user| role_grant(resource, user)).collect()))
		}))
	}
}

fn role_entitlement(org: &Resource, role: Role) -> Entitlement {
	let name = role.display_name();

	Entitlement::assignment(org, role.id())
		.with_display_name(format!("{name} Role"))
		.with_description(format!("{name} role in {} Xero organization", org.display_name))
		.grantable_to(&USER)
}

fn role_grant(org: &Resource, user: &User) -> Option<Grant> {
	let Some(role) = Role::from_api_value(&user.organisation_role) else {
		obs::record_skipped_role(&user.id, &user.organisation_role);

		return None;
	};

	Some(Grant::new(org, role.id(), ResourceId::new(&USER, user.id.clone())))
}
