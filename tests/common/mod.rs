//! Helpers shared by the integration suites.

#![allow(dead_code)]

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use httpmock::MockServer;
use parking_lot::Mutex;
// self
use xero_connector::{
	error::{Error, TransportError},
	flows::Authenticator,
	http::{
		HttpTransport, ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot,
		TransportErrorMapper,
	},
	obs::OperationKind,
	provider::XeroEndpoints,
	reqwest::Client as ReqwestClient,
	url::Url,
};
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};

pub const CLIENT_ID: &str = "client-xero";
pub const CLIENT_SECRET: &str = "secret-xero";
pub const TOKEN_PATH: &str = "/connect/token";
pub const CONNECTIONS_PATH: &str = "/connections";
pub const USERS_PATH: &str = "/api.xro/2.0/Users";
pub const ORGANISATIONS_PATH: &str = "/api.xro/2.0/Organisations";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn url(value: &str) -> Url {
	Url::parse(value).expect("Mock endpoint should parse successfully.")
}

/// Points every endpoint at the mock server.
pub fn mock_endpoints(server: &MockServer) -> XeroEndpoints {
	XeroEndpoints::builder()
		.token(url(&server.url(TOKEN_PATH)))
		.connections(url(&server.url(CONNECTIONS_PATH)))
		.api_base(url(&server.url("/api.xro/2.0")))
		.build()
		.expect("Mock endpoints should build successfully.")
}

/// `Authorization` header value oauth2 sends for the test client pair.
pub fn basic_auth_header() -> String {
	format!("Basic {}", STANDARD.encode(format!("{CLIENT_ID}:{CLIENT_SECRET}")))
}

pub fn token_body(access_token: &str, refresh_token: Option<&str>) -> String {
	match refresh_token {
		Some(refresh) => format!(
			"{{\"access_token\":\"{access_token}\",\"refresh_token\":\"{refresh}\",\"token_type\":\"Bearer\",\"expires_in\":1800}}"
		),
		None => format!(
			"{{\"access_token\":\"{access_token}\",\"token_type\":\"Bearer\",\"expires_in\":1800}}"
		),
	}
}

#[derive(Debug)]
pub struct OfflineError;
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Transport offline.")
	}
}
impl StdError for OfflineError {}

/// Transport that records request URIs and fails every call without touching the network.
#[derive(Clone, Default)]
pub struct RecordingHttpClient {
	requests: Arc<Mutex<Vec<String>>>,
}
impl RecordingHttpClient {
	pub fn requests(&self) -> Vec<String> {
		self.requests.lock().clone()
	}
}
impl HttpTransport for RecordingHttpClient {
	type Handle = RecordingHandle;
	type TransportError = OfflineError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		RecordingHandle { slot, requests: Arc::clone(&self.requests) }
	}
}

pub struct RecordingHandle {
	slot: ResponseMetadataSlot,
	requests: Arc<Mutex<Vec<String>>>,
}
impl<'a> AsyncHttpClient<'a> for RecordingHandle {
	type Error = HttpClientError<OfflineError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		self.requests.lock().push(request.uri().to_string());

		Box::pin(async move {
			assert!(self.slot.take().is_none(), "Metadata slot must be clear before dispatch.");

			Err(HttpClientError::Other("offline".into()))
		})
	}
}

#[derive(Clone, Debug, Default)]
pub struct RecordingMapper;

pub type RecordingAuthenticator = Authenticator<RecordingHttpClient, RecordingMapper>;

/// Authenticator over production endpoints whose transport never leaves the process.
pub fn recording_authenticator(transport: &RecordingHttpClient) -> RecordingAuthenticator {
	Authenticator::with_http_client(
		XeroEndpoints::production().expect("Production endpoints should build."),
		transport.clone(),
		RecordingMapper,
	)
}
impl TransportErrorMapper<OfflineError> for RecordingMapper {
	fn map_transport_error(
		&self,
		_operation: OperationKind,
		_metadata: Option<&ResponseMetadata>,
		err: HttpClientError<OfflineError>,
	) -> Error {
		TransportError::Other { message: err.to_string() }.into()
	}
}
