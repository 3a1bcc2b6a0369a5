#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use oauth1_handshake::{
	_preludet::*,
	auth::Consumer,
	error::ProtocolParseError,
	flows::Handshake,
	provider::ProviderDescriptor,
	request::{HandshakeStep, HttpMethod},
};

const TEMP_PAIR: &str = "oauth_token=abc&oauth_token_secret=xyz&oauth_callback_confirmed=true";
const FINAL_PAIR: &str = "oauth_token=final1&oauth_token_secret=finalsecret";

#[tokio::test]
async fn request_token_issues_session_with_authorize_url() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/request_token")
				.header("content-length", "0")
				.header_missing("content-type")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(TEMP_PAIR);
		})
		.await;
	let handshake = build_reqwest_test_handshake(&server.base_url());
	let session = handshake
		.request_temporary_credential()
		.await
		.expect("Request-token transition should succeed.");

	assert_eq!(session.temporary.token, "abc");
	assert_eq!(session.temporary.secret.expose(), "xyz");
	assert!(session.callback_confirmed());
	assert_eq!(
		session.authorize_url.as_str(),
		format!("{}/oauth/authorize?oauth_token=abc", server.base_url())
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn request_token_rejection_surfaces_authorization_error() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token").header_exists("authorization");
			then.status(401)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_problem=signature_invalid");
		})
		.await;
	let handshake = build_reqwest_test_handshake(&server.base_url());
	let err = handshake
		.request_temporary_credential()
		.await
		.expect_err("Rejected request-token transition should fail.");

	assert_eq!(err.step(), Some(HandshakeStep::RequestToken));
	assert!(matches!(
		&err,
		Error::Authorization { step: HandshakeStep::RequestToken, status: 401, body }
			if body == "oauth_problem=signature_invalid"
	));

	mock.assert_async().await;
}

#[tokio::test]
async fn full_handshake_exchanges_verifier_for_access_credential() {
	let server = MockServer::start_async().await;
	let request_token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/request_token")
				.header_missing("content-type")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(TEMP_PAIR);
		})
		.await;
	let access_token_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/access_token")
				.header("content-length", "0")
				.header_missing("content-type")
				.header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(FINAL_PAIR);
		})
		.await;
	let handshake = build_reqwest_test_handshake(&server.base_url());
	let session = handshake
		.request_temporary_credential()
		.await
		.expect("Request-token transition should succeed.");
	let credential = handshake
		.exchange_access_credential(session, "123456")
		.await
		.expect("Access-token exchange should succeed.");

	assert_eq!(credential.token, "final1");
	assert_eq!(credential.secret.expose(), "finalsecret");
	assert!(credential.extra.is_empty());

	request_token_mock.assert_async().await;
	access_token_mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_secret_fails_parsing() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/request_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body("oauth_token=onlytoken");
		})
		.await;
	let handshake = build_reqwest_test_handshake(&server.base_url());
	let err = handshake
		.request_temporary_credential()
		.await
		.expect_err("Incomplete pair should fail parsing.");

	assert_eq!(err.step(), Some(HandshakeStep::RequestToken));
	assert!(matches!(
		err,
		Error::Parse(ProtocolParseError::MissingField { field: "oauth_token_secret", .. })
	));

	mock.assert_async().await;
}

#[tokio::test]
async fn descriptor_method_override_switches_to_get() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth/request_token").header_exists("authorization");
			then.status(200)
				.header("content-type", "application/x-www-form-urlencoded")
				.body(TEMP_PAIR);
		})
		.await;
	let descriptor = ProviderDescriptor::builder(server.base_url())
		.http_method(HttpMethod::Get)
		.build()
		.expect("Provider descriptor should build successfully.");
	let consumer = Consumer::new(TEST_CONSUMER_KEY, TEST_CONSUMER_SECRET)
		.expect("Consumer fixture should validate successfully.");
	let handshake =
		Handshake::with_http_client(descriptor, consumer, test_reqwest_http_client());
	let session = handshake
		.request_temporary_credential()
		.await
		.expect("GET request-token transition should succeed.");

	assert_eq!(session.temporary.token, "abc");

	mock.assert_async().await;
}
