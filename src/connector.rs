//! Connector surface consumed by the access-governance sync engine.
//!
//! [`Connector::connect`] validates the configuration, logs in once, resolves the tenant,
//! and hands a shared [`XeroClient`] to the resource syncers selected by the configured
//! [`RoleModel`]:
//!
//! | Role model                   | Syncers              | Role grants come from          |
//! |------------------------------|----------------------|--------------------------------|
//! | `OrganizationEntitlements`   | `org`, `user`        | all users, per organisation    |
//! | `RoleResources`              | `org`, `user`, `role`| users filtered by each role    |

pub mod model;
pub mod role;
pub mod syncer;

pub use model::*;
pub use role::*;
pub use syncer::*;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	client::XeroClient,
	config::ConnectorConfig,
	flows::Authenticator,
	http::{HttpTransport, TransportErrorMapper},
	obs::{self, OperationKind},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Connector specialized for the crate's default reqwest transport stack.
pub type ReqwestConnector = Connector<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Display metadata reported to the sync engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectorMetadata {
	/// Connector display name.
	pub display_name: &'static str,
	/// One-line description.
	pub description: &'static str,
}

/// Read-only Xero connector bound to one tenant.
pub struct Connector<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	client: Arc<XeroClient<C, M>>,
	credentials: Credentials,
	role_model: RoleModel,
}
impl<C, M> Connector<C, M>
where
	C: 'static + ?Sized + HttpTransport,
	M: 'static + ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Validates `config`, logs in, and resolves the tenant using the given transport.
	pub async fn connect(
		config: ConnectorConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		config.validate()?;

		let authenticator = Authenticator::with_http_client(config.endpoints()?, http_client, mapper)
			.with_scopes(config.scopes.clone());
		let (client, credentials) = XeroClient::connect(&authenticator, &config.credentials).await?;

		Ok(Self { client: Arc::new(client), credentials, role_model: config.role_model })
	}

	/// Connector display metadata.
	pub fn metadata(&self) -> ConnectorMetadata {
		ConnectorMetadata {
			display_name: "Xero",
			description: "Connector syncing Xero organizations and their members",
		}
	}

	/// Confirms the session can read users; any failure means the credentials are unusable.
	pub async fn validate(&self) -> Result<()> {
		obs::observe(OperationKind::Validate, "validate", async {
			self.client.get_users(None).await.map(|_| ()).map_err(Error::unauthenticated)
		})
		.await
	}

	/// Syncers for the configured role model.
	pub fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
		let mut syncers: Vec<Box<dyn ResourceSyncer>> = vec![
			Box::new(OrgSyncer::new(Arc::clone(&self.client), self.role_model)),
			Box::new(UserSyncer::new(Arc::clone(&self.client))),
		];

		if self.role_model == RoleModel::RoleResources {
			syncers.push(Box::new(RoleSyncer::new(Arc::clone(&self.client))));
		}

		syncers
	}

	/// Resource types exposed by [`Connector::resource_syncers`].
	pub fn resource_types(&self) -> Vec<ResourceType> {
		match self.role_model {
			RoleModel::OrganizationEntitlements => vec![ORG, USER],
			RoleModel::RoleResources => vec![ORG, USER, ROLE],
		}
	}

	/// Credentials produced by the login, including a rotated refresh token.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Shared API client.
	pub fn client(&self) -> &XeroClient<C, M> {
		&self.client
	}

	/// Role model in effect.
	pub fn role_model(&self) -> RoleModel {
		self.role_model
	}
}
#[cfg(feature = "reqwest")]
impl Connector<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Connects using a default reqwest client.
	pub async fn new(config: ConnectorConfig) -> Result<Self> {
		Self::connect(config, ReqwestHttpClient::default(), Arc::new(ReqwestTransportErrorMapper))
			.await
	}
}
impl<C, M> Debug for Connector<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Connector")
			.field("client", &self.client)
			.field("role_model", &self.role_model)
			.finish()
	}
}
