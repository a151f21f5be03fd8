//! Token grants returned by the identity endpoint and the sessions derived from them.

// self
use crate::{
	_prelude::*,
	auth::{TenantId, TokenSecret},
};

/// Tokens issued by a single exchange against the identity endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenGrant {
	/// Newly issued access token.
	pub access_token: TokenSecret,
	/// Refresh token, present for web-app flows and absent for custom connections.
	pub refresh_token: Option<TokenSecret>,
	/// Expiry derived from `expires_in`, when the endpoint reports it.
	pub expires_at: Option<OffsetDateTime>,
}

/// Authenticated context for one sync run: the bearer token and the tenant it acts on.
///
/// Sessions are immutable once built; the API client owns one and reads it concurrently
/// from every resource syncer without locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
	access_token: TokenSecret,
	tenant_id: TenantId,
	expires_at: Option<OffsetDateTime>,
}
impl Session {
	/// Builds a session from a token and the tenant it was resolved against.
	pub fn new(access_token: TokenSecret, tenant_id: TenantId) -> Self {
		Self { access_token, tenant_id, expires_at: None }
	}

	/// Records the access token expiry reported by the identity endpoint.
	pub fn with_expires_at(mut self, expires_at: Option<OffsetDateTime>) -> Self {
		self.expires_at = expires_at;

		self
	}

	/// Bearer token attached to every API request.
	pub fn access_token(&self) -> &TokenSecret {
		&self.access_token
	}

	/// Tenant attached to every API request.
	pub fn tenant_id(&self) -> &TenantId {
		&self.tenant_id
	}

	/// Access token expiry, when known.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// Returns true if the access token is known to be expired at `now`.
	///
	/// The client never re-authenticates; hosts can use this to decide whether a new
	/// sync run (and therefore a new session) is needed.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| now >= expires_at)
	}
}
