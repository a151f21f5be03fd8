//! Resource syncer contract and the Xero syncers implementing it.

pub mod org;
pub mod role;
pub mod user;

pub use org::OrgSyncer;
pub use role::RoleSyncer;
pub use user::UserSyncer;

// self
use crate::{
	_prelude::*,
	connector::model::{Entitlement, Grant, Page, Resource, ResourceType},
};

/// Future returned by [`ResourceSyncer`] operations.
pub type SyncFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Page<T>>> + 'a + Send>>;

/// Capability exposed to the sync engine for one resource type.
///
/// Implementations are read-only and share an immutable client, so the engine may drive
/// several syncers concurrently.
pub trait ResourceSyncer
where
	Self: Send + Sync,
{
	/// Resource type this syncer produces.
	fn resource_type(&self) -> ResourceType;

	/// Lists every resource of [`ResourceSyncer::resource_type`].
	fn list(&self) -> SyncFuture<'_, Resource>;

	/// Lists the entitlements offered by `resource`.
	fn entitlements<'a>(&'a self, resource: &'a Resource) -> SyncFuture<'a, Entitlement>;

	/// Lists the grants of the entitlements offered by `resource`.
	fn grants<'a>(&'a self, resource: &'a Resource) -> SyncFuture<'a, Grant>;
}
