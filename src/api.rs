//! Xero wire models and the shared GET/JSON request path.
//!
//! Tenant lookup and the Accounting API reads both go through [`get_json`]: build a GET
//! with bearer auth (plus the tenant header when one is known), dispatch it through the
//! configured [`HttpTransport`], reject non-success statuses, and decode the body with
//! path-aware JSON errors.

pub mod models;

pub use models::*;

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{TenantId, TokenSecret},
	error::{ApiError, ConfigError, DecodeError},
	http::{HttpTransport, ResponseMetadataSlot, TransportErrorMapper},
	obs::OperationKind,
};

/// Header selecting the organisation every Accounting API call acts on.
pub const TENANT_HEADER: &str = "xero-tenant-id";

/// Builds an authenticated JSON GET request.
pub fn get_request(
	url: &Url,
	access_token: &TokenSecret,
	tenant: Option<&TenantId>,
) -> Result<HttpRequest> {
	let mut builder = Request::builder()
		.method(Method::GET)
		.uri(url.as_str())
		.header(AUTHORIZATION, format!("Bearer {}", access_token.expose()))
		.header(ACCEPT, "application/json")
		.header(CONTENT_TYPE, "application/json");

	if let Some(tenant) = tenant {
		builder = builder.header(TENANT_HEADER, tenant.as_ref());
	}

	builder.body(Vec::new()).map_err(|err| ConfigError::from(err).into())
}

/// Dispatches `request` and decodes a successful JSON response into `T`.
pub(crate) async fn get_json<C, M, T>(
	http_client: &C,
	mapper: &M,
	operation: OperationKind,
	request: HttpRequest,
) -> Result<T>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
	T: DeserializeOwned,
{
	let slot = ResponseMetadataSlot::default();
	let handle = http_client.with_metadata(slot.clone());
	let response = handle
		.call(request)
		.await
		.map_err(|err| mapper.map_transport_error(operation, slot.take().as_ref(), err))?;
	let status = response.status();

	if !status.is_success() {
		let correlation_id = slot.take().and_then(|meta| meta.correlation_id);

		return Err(ApiError::Status { operation, status: status.as_u16(), correlation_id }.into());
	}

	decode_json(operation, Some(status.as_u16()), response.body())
}

/// Decodes a JSON body, keeping the failing path in the error.
pub(crate) fn decode_json<T>(operation: OperationKind, status: Option<u16>, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError::Json { operation, source, status }.into())
}
