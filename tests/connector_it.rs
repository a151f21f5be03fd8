#![cfg(feature = "reqwest")]

mod common;

// crates.io
use httpmock::prelude::*;
// self
use common::*;
use xero_connector::{
	auth::Credentials,
	config::ConnectorConfig,
	connector::{ORG, ROLE, ReqwestConnector, Resource, RoleModel, USER},
	error::{ConfigError, Error},
	http::ReqwestTransportErrorMapper,
	provider::XeroEndpointsBuilder,
};

const USERS_BODY: &str = r#"{"Users":[
	{"UserID":"u1","EmailAddress":"ada@example.com","OrganisationRole":"Standard"},
	{"UserID":"u2","EmailAddress":"bob@example.com","OrganisationRole":"Unknown"}
]}"#;

fn config(server: &MockServer, role_model: RoleModel) -> ConnectorConfig {
	ConnectorConfig::new(Credentials::client(CLIENT_ID, CLIENT_SECRET))
		.with_role_model(role_model)
		.with_endpoints(
			XeroEndpointsBuilder::default()
				.token(url(&server.url(TOKEN_PATH)))
				.connections(url(&server.url(CONNECTIONS_PATH)))
				.api_base(url(&server.url("/api.xro/2.0"))),
		)
}

async fn mock_login(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH).form_urlencoded_tuple("grant_type", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body(token_body("access-cc", None));
		})
		.await;
	let connections = server
		.mock_async(|when, then| {
			when.method(GET).path(CONNECTIONS_PATH).header("authorization", "Bearer access-cc");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"[{"id":"c1","tenantId":"T1"},{"id":"c2","tenantId":"T2"}]"#);
		})
		.await;

	(token, connections)
}

async fn connect(server: &MockServer, role_model: RoleModel) -> ReqwestConnector {
	ReqwestConnector::connect(
		config(server, role_model),
		test_reqwest_http_client(),
		ReqwestTransportErrorMapper,
	)
	.await
	.expect("Connector should connect against the mock server.")
}

#[tokio::test]
async fn organisation_roles_sync_end_to_end() {
	let server = MockServer::start_async().await;
	let (token_mock, connections_mock) = mock_login(&server).await;
	let orgs_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(ORGANISATIONS_PATH)
				.header("authorization", "Bearer access-cc")
				.header("xero-tenant-id", "T1");
			then.status(200).header("content-type", "application/json").body(
				r#"{"Organisations":[{"OrganisationID":"o1","Name":"Demo Company","CountryCode":"NZ"}]}"#,
			);
		})
		.await;
	let users_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(USERS_PATH)
				.header("authorization", "Bearer access-cc")
				.header("xero-tenant-id", "T1");
			then.status(200).header("content-type", "application/json").body(USERS_BODY);
		})
		.await;
	let connector = connect(&server, RoleModel::OrganizationEntitlements).await;
	let syncers = connector.resource_syncers();

	let types = syncers.iter().map(|syncer| syncer.resource_type().id).collect::<Vec<_>>();

	assert_eq!(types, ["org", "user"]);

	let orgs = syncers[0].list().await.expect("Organisations should list.");

	assert_eq!(orgs.items.len(), 1);
	assert!(orgs.next_page_token.is_none());

	let org = &orgs.items[0];

	assert_eq!(org.id.to_string(), "org:o1");
	assert_eq!(org.display_name, "Demo Company");

	let entitlements = syncers[0].entitlements(org).await.expect("Entitlements should list.");

	assert_eq!(entitlements.items.len(), 6);
	assert_eq!(entitlements.items[2].slug, "standard");
	assert_eq!(entitlements.items[2].display_name, "Standard Role");
	assert_eq!(
		entitlements.items[2].description,
		"Standard role in Demo Company Xero organization"
	);

	let grants = syncers[0].grants(org).await.expect("Grants should list.");

	assert_eq!(grants.items.len(), 1);
	assert_eq!(grants.items[0].id, "org:o1:standard:user:u1");

	let users = syncers[1].list().await.expect("Users should list.");

	assert_eq!(users.items.len(), 2);
	assert_eq!(users.items[0].display_name, "ada@example.com");
	assert!(syncers[1].grants(&users.items[0]).await.expect("User grants.").items.is_empty());

	token_mock.assert_calls_async(1).await;
	connections_mock.assert_calls_async(1).await;
	orgs_mock.assert_calls_async(1).await;
	users_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn role_resources_sync_with_filtered_users() {
	let server = MockServer::start_async().await;
	let (token_mock, _connections_mock) = mock_login(&server).await;
	let standard_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path(USERS_PATH)
				.query_param("where", "OrganisationRole==\"STANDARD\"");
			then.status(200).header("content-type", "application/json").body(
				r#"{"Users":[
					{"UserID":"u1","OrganisationRole":"STANDARD"},
					{"UserID":"u3","OrganisationRole":"READONLY"}
				]}"#,
			);
		})
		.await;
	let connector = connect(&server, RoleModel::RoleResources).await;

	assert_eq!(connector.resource_types(), [ORG, USER, ROLE]);

	let syncers = connector.resource_syncers();
	let role_syncer = &syncers[2];
	let roles = role_syncer.list().await.expect("Roles should list.");

	assert_eq!(
		roles.items.iter().map(|role| role.display_name.as_str()).collect::<Vec<_>>(),
		[
			"Read Only",
			"Invoice Only",
			"Standard",
			"Financial Advisor",
			"Managed Client",
			"Cashbook Client",
		],
	);

	let standard = &roles.items[2];
	let entitlements = role_syncer.entitlements(standard).await.expect("Entitlements should list.");

	assert_eq!(entitlements.items.len(), 1);
	assert_eq!(entitlements.items[0].id, "role:standard:standard");
	assert_eq!(entitlements.items[0].description, "Standard role in Xero organization");

	let grants = role_syncer.grants(standard).await.expect("Grants should list.");

	assert_eq!(grants.items.len(), 1);
	assert_eq!(grants.items[0].id, "role:standard:standard:user:u1");

	let org_syncer = &syncers[0];
	let org = Resource::new(&ORG, "o1", "Demo Company");

	assert!(org_syncer.entitlements(&org).await.expect("Entitlements.").items.is_empty());

	token_mock.assert_calls_async(1).await;
	standard_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn validate_maps_failures_to_unauthenticated() {
	let server = MockServer::start_async().await;
	let _login = mock_login(&server).await;
	let users_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(USERS_PATH);
			then.status(401).body("unauthorized");
		})
		.await;
	let connector = connect(&server, RoleModel::OrganizationEntitlements).await;
	let err = connector.validate().await.expect_err("Unauthorized users fetch should fail.");

	users_mock.assert_async().await;

	assert!(matches!(err, Error::Unauthenticated { .. }));
	assert_eq!(err.to_string(), "Provided credentials are invalid.");
	assert_eq!(err.http_status(), Some(401));
	assert_eq!(connector.metadata().display_name, "Xero");
	assert_eq!(
		connector.metadata().description,
		"Connector syncing Xero organizations and their members"
	);
}

#[tokio::test]
async fn invalid_configuration_fails_before_network() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200);
		})
		.await;
	let config = ConnectorConfig::new(Credentials::access_token("token").with_refresh_token("r1"));
	let err =
		ReqwestConnector::connect(config, test_reqwest_http_client(), ReqwestTransportErrorMapper)
			.await
			.expect_err("Refresh token without client pair should be rejected.");

	assert!(matches!(err, Error::Config(ConfigError::RefreshTokenWithoutClient)));

	token_mock.assert_calls_async(0).await;
}
