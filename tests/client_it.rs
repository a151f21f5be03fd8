#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::*;
use xero_connector::{
	auth::{Session, TenantId, TokenSecret},
	client::{ReqwestXeroClient, XeroClient},
	error::{ApiError, Error},
	http::ReqwestTransportErrorMapper,
	obs::OperationKind,
};

const USERS_BODY: &str = r#"{"Users":[
	{"UserID":"u1","EmailAddress":"ada@example.com","FirstName":"Ada","LastName":"Lovelace","OrganisationRole":"STANDARD"},
	{"UserID":"u2","EmailAddress":"bob@example.com","FirstName":"Bob","LastName":"Builder","OrganisationRole":"READONLY"}
]}"#;

fn build_client(server: &MockServer) -> ReqwestXeroClient {
	let tenant = TenantId::new("T1").expect("Tenant fixture should be valid.");

	XeroClient::from_session(
		mock_endpoints(server),
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
		Session::new(TokenSecret::new("access-1"), tenant),
	)
}

#[tokio::test]
async fn requests_carry_bearer_tenant_and_json_headers() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(USERS_PATH)
				.header("authorization", "Bearer access-1")
				.header("xero-tenant-id", "T1")
				.header("accept", "application/json")
				.header("content-type", "application/json");
			then.status(200).header("content-type", "application/json").body(USERS_BODY);
		})
		.await;
	let users = client.get_users(None).await.expect("Users fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(users.len(), 2);
	assert_eq!(users[0].email, "ada@example.com");
	assert_eq!(users[1].organisation_role, "READONLY");
}

#[tokio::test]
async fn role_filter_becomes_where_clause() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(USERS_PATH).query_param("where", "OrganisationRole==\"STANDARD\"");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"users":[{"UserID":"u1","OrganisationRole":"STANDARD"}]}"#);
		})
		.await;
	let users = client.get_users(Some("STANDARD")).await.expect("Filtered fetch should succeed.");

	mock.assert_async().await;

	assert_eq!(users.len(), 1);
	assert_eq!(users[0].id, "u1");
}

#[tokio::test]
async fn organisations_decode_and_repeat_identically() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(ORGANISATIONS_PATH);
			then.status(200).header("content-type", "application/json").body(
				r#"{"Organisations":[{"OrganisationID":"o1","Name":"Demo Company","CountryCode":"NZ"}]}"#,
			);
		})
		.await;
	let first = client.get_organizations().await.expect("First fetch should succeed.");
	let second = client.get_organizations().await.expect("Second fetch should succeed.");

	mock.assert_calls_async(2).await;

	assert_eq!(first, second);
	assert_eq!(first[0].name, "Demo Company");
	assert_eq!(first[0].country_code, "NZ");
}

#[tokio::test]
async fn non_success_statuses_are_not_retried() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(USERS_PATH);
			then.status(429).header("xero-correlation-id", "corr-1").body("rate limited");
		})
		.await;
	let err = client.get_users(None).await.expect_err("Throttled fetch should fail.");

	mock.assert_calls_async(1).await;

	let Error::Api(ApiError::Status { operation, status, correlation_id }) = err else {
		panic!("Non-success statuses should surface as API errors.");
	};

	assert_eq!(operation, OperationKind::ListUsers);
	assert_eq!(status, 429);
	assert_eq!(correlation_id.as_deref(), Some("corr-1"));
}

#[tokio::test]
async fn malformed_bodies_report_decode_errors() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path(ORGANISATIONS_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"Organisations":[{"Name":"Missing id"}]}"#);
		})
		.await;
	let err = client.get_organizations().await.expect_err("Malformed body should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Decode(_)));
	assert_eq!(err.http_status(), Some(200));
}
