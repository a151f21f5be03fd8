//! Custom-connection login via the `client_credentials` grant.

// self
use crate::{
	_prelude::*,
	auth::{TokenGrant, TokenSecret},
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
	/// Exchanges the client id/secret pair for an access token.
	///
	/// Custom connections are bound to a single organisation and never receive a refresh
	/// token, so the returned grant usually has none.
	pub async fn client_credentials(
		&self,
		client_id: &str,
		client_secret: &TokenSecret,
	) -> Result<TokenGrant> {
		obs::observe(OperationKind::ClientCredentials, "client_credentials", async {
			let facade = TokenFacade::new(
				&self.endpoints,
				client_id,
				client_secret,
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
			)?;

			facade.exchange_client_credentials(&self.scopes).await
		})
		.await
	}
}
