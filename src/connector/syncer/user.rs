//! User syncer.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	api::User,
	client::XeroClient,
	connector::{
		model::{
			Email, Entitlement, Grant, Page, Resource, ResourceTraits, ResourceType, USER,
			UserStatus, UserTrait,
		},
		syncer::{ResourceSyncer, SyncFuture},
	},
	http::{HttpTransport, TransportErrorMapper},
	obs::{self, OperationKind},
};

/// Syncs organisation users as `user` resources.
pub struct UserSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: Arc<XeroClient<C, M>>,
}
impl<C, M> UserSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a user syncer.
	pub fn new(client: Arc<XeroClient<C, M>>) -> Self {
		Self { client }
	}
}
impl<C, M> ResourceSyncer for UserSyncer<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn resource_type(&self) -> ResourceType {
		USER
	}

	fn list(&self) -> SyncFuture<'_, Resource> {
		Box::pin(obs::observe(OperationKind::ListResources, "user", async move {
			let users = self.client.get_users(None).await?;

			Ok(Page::last(users.into_iter().map(user_resource).collect()))
		}))
	}

	fn entitlements<'a>(&'a self, _resource: &'a Resource) -> SyncFuture<'a, Entitlement> {
		Box::pin(async { Ok(Page::empty()) })
	}

	fn grants<'a>(&'a self, _resource: &'a Resource) -> SyncFuture<'a, Grant> {
		Box::pin(async { Ok(Page::empty()) })
	}
}

fn user_resource(user: User) -> Resource {
	let mut profile = Map::new();

	profile.insert("user_id".into(), Value::String(user.id.clone()));

	let traits = UserTrait {
		emails: vec![Email { address: user.email.clone(), is_primary: true }],
		status: UserStatus::Enabled,
		login: user.email.clone(),
		profile,
	};

	Resource::new(&USER, user.id, user.email).with_traits(ResourceTraits::User(traits))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn users_map_to_enabled_identities_keyed_by_email() {
		let resource = user_resource(User {
			id: "u1".into(),
			email: "ada@example.com".into(),
			first_name: "Ada".into(),
			last_name: "Lovelace".into(),
			organisation_role: "STANDARD".into(),
		});

		assert_eq!(resource.id.to_string(), "user:u1");
		assert_eq!(resource.display_name, "ada@example.com");

		let Some(ResourceTraits::User(traits)) = resource.traits else {
			panic!("User resources should carry a user trait.");
		};

		assert_eq!(traits.login, "ada@example.com");
		assert_eq!(traits.status, UserStatus::Enabled);
		assert!(traits.emails[0].is_primary);
		assert_eq!(traits.profile.get("user_id"), Some(&Value::String("u1".into())));
	}
}
