//! Login orchestration: grant selection, token exchanges, and tenant resolution.
//!
//! [`Authenticator::login`] picks the grant from the configured [`Credentials`]:
//!
//! - a pre-issued access token is used as-is and no request is made;
//! - without a refresh token the custom-connection `client_credentials` grant runs once;
//! - with a refresh token the web-app `refresh_token` grant runs once and must rotate it.
//!
//! Credentials are never mutated. Each login returns a new [`Credentials`] value with the
//! issued tokens so the host decides where the rotated refresh token is persisted.

mod client_credentials;
mod refresh;
mod tenant;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, ScopeList, Session},
	error::ConfigError,
	http::{HttpTransport, TransportErrorMapper},
	provider::XeroEndpoints,
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Authenticator specialized for the crate's default reqwest transport stack.
pub type ReqwestAuthenticator = Authenticator<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs the identity and connections requests needed to open a [`Session`].
///
/// The authenticator only holds immutable, shared state, so it can be cloned into tasks
/// and used concurrently; every operation awaits its requests sequentially.
#[derive(Clone)]
pub struct Authenticator<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Identity, connections, and API endpoints.
	pub endpoints: XeroEndpoints,
	/// Scopes requested by both grant flows.
	pub scopes: ScopeList,
}
impl<C, M> Authenticator<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates an authenticator that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		endpoints: XeroEndpoints,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			endpoints,
			scopes: ScopeList::xero_default(),
		}
	}

	/// Replaces the scopes requested by the grant flows.
	pub fn with_scopes(mut self, scopes: ScopeList) -> Self {
		self.scopes = scopes;

		self
	}

	/// Obtains usable credentials, exchanging tokens only when no access token is present.
	///
	/// Failures of the `client_credentials` grant are wrapped in [`Error::Login`] and
	/// failures of the `refresh_token` grant in [`Error::RefreshToken`].
	pub async fn login(&self, credentials: &Credentials) -> Result<Credentials> {
		self.login_with_expiry(credentials).await.map(|(credentials, _)| credentials)
	}

	/// Logs in and resolves the tenant the token is bound to.
	///
	/// Returns the session for API calls together with the credentials produced by the
	/// login, which carry the rotated refresh token for web-app connections.
	pub async fn establish_session(
		&self,
		credentials: &Credentials,
	) -> Result<(Session, Credentials)> {
		let (credentials, expires_at) = self.login_with_expiry(credentials).await?;
		let access_token = credentials
			.access_token
			.clone()
			.ok_or(ConfigError::MissingCredentials)?;
		let tenant_id = self.resolve_tenant(&access_token).await.map_err(Error::tenant)?;
		let session = Session::new(access_token, tenant_id).with_expires_at(expires_at);

		Ok((session, credentials))
	}

	async fn login_with_expiry(
		&self,
		credentials: &Credentials,
	) -> Result<(Credentials, Option<OffsetDateTime>)> {
		if credentials.access_token.is_some() {
			return Ok((credentials.clone(), None));
		}

		let (client_id, client_secret) = credentials.require_client_pair()?;

		match &credentials.refresh_token {
			None => {
				let grant = self
					.client_credentials(client_id, client_secret)
					.await
					.map_err(Error::login)?;
				let next = Credentials {
					access_token: Some(grant.access_token),
					refresh_token: grant.refresh_token,
					..credentials.clone()
				};

				Ok((next, grant.expires_at))
			},
			Some(refresh_token) => {
				let grant = self
					.refresh_token(refresh_token, client_id, client_secret)
					.await
					.map_err(Error::refresh_token)?;
				let next = Credentials {
					access_token: Some(grant.access_token),
					refresh_token: grant.refresh_token,
					..credentials.clone()
				};

				Ok((next, grant.expires_at))
			},
		}
	}
}
#[cfg(feature = "reqwest")]
impl Authenticator<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates an authenticator backed by a default reqwest client.
	pub fn new(endpoints: XeroEndpoints) -> Self {
		Self::with_http_client(
			endpoints,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for Authenticator<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("endpoints", &self.endpoints)
			.field("scopes", &self.scopes)
			.finish()
	}
}
