//! Authenticated, read-only client for the Xero Accounting API.

// self
use crate::{
	_prelude::*,
	api::{self, Organization, OrganisationsEnvelope, User, UsersEnvelope},
	auth::{Credentials, Session},
	flows::Authenticator,
	http::{HttpTransport, TransportErrorMapper},
	obs::{self, OperationKind},
	provider::{ApiPath, XeroEndpoints},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// API client specialized for the crate's default reqwest transport stack.
pub type ReqwestXeroClient = XeroClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Issues tenant-scoped GET requests with the session's bearer token.
///
/// The client never re-authenticates: a `401` surfaces as an [`crate::error::ApiError`]
/// and the host starts a new run with fresh credentials.
pub struct XeroClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	endpoints: XeroEndpoints,
	session: Session,
}
impl<C, M> XeroClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Logs in, resolves the tenant, and returns a client bound to the new session.
	///
	/// The returned [`Credentials`] carry any tokens issued during login.
	pub async fn connect(
		authenticator: &Authenticator<C, M>,
		credentials: &Credentials,
	) -> Result<(Self, Credentials)> {
		let (session, credentials) = authenticator.establish_session(credentials).await?;
		let client = Self::from_session(
			authenticator.endpoints.clone(),
			Arc::clone(&authenticator.http_client),
			Arc::clone(&authenticator.transport_mapper),
			session,
		);

		Ok((client, credentials))
	}

	/// Builds a client around an already established session.
	pub fn from_session(
		endpoints: XeroEndpoints,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
		session: Session,
	) -> Self {
		Self { http_client: http_client.into(), transport_mapper: mapper.into(), endpoints, session }
	}

	/// Session attached to every request.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// Lists the organisation's users, optionally filtered server-side by role.
	///
	/// `role_filter` is compared exactly against `OrganisationRole`, which Xero reports in
	/// upper case (for example `STANDARD`).
	pub async fn get_users(&self, role_filter: Option<&str>) -> Result<Vec<User>> {
		const OPERATION: OperationKind = OperationKind::ListUsers;

		obs::observe(OPERATION, "get_users", async {
			let mut url = self.endpoints.api_url(ApiPath::Users);

			if let Some(role) = role_filter {
				url.query_pairs_mut().append_pair("where", &format!("OrganisationRole==\"{role}\""));
			}

			let envelope: UsersEnvelope = self.get(OPERATION, &url).await?;

			Ok(envelope.users)
		})
		.await
	}

	/// Lists the organisations visible to the tenant.
	pub async fn get_organizations(&self) -> Result<Vec<Organization>> {
		const OPERATION: OperationKind = OperationKind::ListOrganizations;

		obs::observe(OPERATION, "get_organizations", async {
			let url = self.endpoints.api_url(ApiPath::Organisations);
			let envelope: OrganisationsEnvelope = self.get(OPERATION, &url).await?;

			Ok(envelope.organisations)
		})
		.await
	}

	async fn get<T>(&self, operation: OperationKind, url: &Url) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let request =
			api::get_request(url, self.session.access_token(), Some(self.session.tenant_id()))?;

		api::get_json(self.http_client.as_ref(), self.transport_mapper.as_ref(), operation, request)
			.await
	}
}
impl<C, M> Clone for XeroClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			endpoints: self.endpoints.clone(),
			session: self.session.clone(),
		}
	}
}
impl<C, M> Debug for XeroClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("XeroClient")
			.field("endpoints", &self.endpoints)
			.field("session", &self.session)
			.finish()
	}
}
