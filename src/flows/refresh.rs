//! Web-app login via the `refresh_token` grant.
//!
//! Xero refresh tokens are single-use: a successful exchange invalidates the presented
//! token and issues a new one. A response without a rotated refresh token is therefore
//! treated as a failure, since the next login would otherwise be impossible.

// self
use crate::{
	_prelude::*,
	auth::{TokenGrant, TokenSecret},
	error::ApiError,
	flows::Authenticator,
	http::{HttpTransport, TransportErrorMapper},
	oauth::TokenFacade,
	obs::{self, OperationKind},
};

impl<C, M> Authenticator<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Redeems `refresh_token` and returns the grant with its rotated refresh token.
	pub async fn refresh_token(
		&self,
		refresh_token: &TokenSecret,
		client_id: &str,
		client_secret: &TokenSecret,
	) -> Result<TokenGrant> {
		obs::observe(OperationKind::RefreshToken, "refresh_token", async {
			let facade = TokenFacade::new(
				&self.endpoints,
				client_id,
				client_secret,
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
			)?;
			let grant = facade.exchange_refresh_token(refresh_token, &self.scopes).await?;

			if grant.refresh_token.as_ref().is_none_or(TokenSecret::is_empty) {
				return Err(ApiError::MissingRefreshToken.into());
			}

			obs::record_refresh_rotation();

			Ok(grant)
		})
		.await
	}
}
