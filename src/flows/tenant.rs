//! Tenant resolution through the connections endpoint.

// self
use crate::{
	_prelude::*,
	api::{self, Connection},
	auth::{TenantId, TokenSecret},
	flows::Authenticator,
	http::{HttpTransport, TransportErrorMapper},
	obs::{self, OperationKind},
};

impl<C, M> Authenticator<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns the tenant of the first connection authorised for `access_token`.
	///
	/// Tokens authorised for several organisations are not disambiguated; the first
	/// connection reported by Xero wins.
	pub async fn resolve_tenant(&self, access_token: &TokenSecret) -> Result<TenantId> {
		const OPERATION: OperationKind = OperationKind::TenantLookup;

		obs::observe(OPERATION, "resolve_tenant", async {
			let request = api::get_request(&self.endpoints.connections, access_token, None)?;
			let connections: Vec<Connection> = api::get_json(
				self.http_client.as_ref(),
				self.transport_mapper.as_ref(),
				OPERATION,
				request,
			)
			.await?;
			let total = connections.len();
			let first = connections.into_iter().next().ok_or(Error::NoConnections)?;

			obs::record_tenant_selected(&first.tenant_id, total);

			Ok(first.tenant_id)
		})
		.await
	}
}
