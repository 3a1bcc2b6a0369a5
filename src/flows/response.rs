//! Form-encoded token response decoding shared by both transitions.

// self
use crate::{
	_prelude::*,
	auth::{AccessCredential, SharedSecret, TemporaryCredential},
	error::ProtocolParseError,
	http::EndpointResponse,
	request::{HandshakeStep, OAUTH_TOKEN, OAUTH_TOKEN_SECRET},
};

/// Credential fields decoded from a successful token response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenResponse {
	/// `oauth_token` value.
	pub token: String,
	/// `oauth_token_secret` value.
	pub token_secret: String,
	/// Remaining response parameters, already decoded.
	pub extra: BTreeMap<String, String>,
}
impl From<TokenResponse> for TemporaryCredential {
	fn from(response: TokenResponse) -> Self {
		Self {
			token: response.token,
			secret: SharedSecret::new(response.token_secret),
			extra: response.extra,
		}
	}
}
impl From<TokenResponse> for AccessCredential {
	fn from(response: TokenResponse) -> Self {
		Self {
			token: response.token,
			secret: SharedSecret::new(response.token_secret),
			extra: response.extra,
		}
	}
}

/// Decodes a token endpoint response observed during `step`.
///
/// Any non-success status is an authorization failure carrying the raw body.
/// Success bodies must decode as `application/x-www-form-urlencoded` pairs
/// with both `oauth_token` and `oauth_token_secret` present; everything else
/// the provider sent is preserved in [`TokenResponse::extra`].
pub fn parse_token_response(
	step: HandshakeStep,
	response: &EndpointResponse,
) -> Result<TokenResponse> {
	if !response.is_success() {
		return Err(Error::Authorization {
			step,
			status: response.status,
			body: response.body.clone(),
		});
	}
	// Form decoding is lenient enough to accept an HTML error page as a single
	// key, so a chunk without `=` is treated as a non-form body outright.
	if response.body.split('&').any(|chunk| !chunk.is_empty() && !chunk.contains('=')) {
		return Err(ProtocolParseError::MalformedBody { step, body: response.body.clone() }.into());
	}

	let mut pairs: BTreeMap<String, String> = serde_urlencoded::from_str(&response.body)
		.map_err(|_| ProtocolParseError::MalformedBody { step, body: response.body.clone() })?;
	let token = pairs.remove(OAUTH_TOKEN).ok_or_else(|| ProtocolParseError::MissingField {
		step,
		field: OAUTH_TOKEN,
		body: response.body.clone(),
	})?;
	let token_secret =
		pairs.remove(OAUTH_TOKEN_SECRET).ok_or_else(|| ProtocolParseError::MissingField {
			step,
			field: OAUTH_TOKEN_SECRET,
			body: response.body.clone(),
		})?;

	Ok(TokenResponse { token, token_secret, extra: pairs })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn success(body: &str) -> EndpointResponse {
		EndpointResponse { status: 200, body: body.into() }
	}

	#[test]
	fn parses_minimal_credential_pair() {
		let parsed = parse_token_response(
			HandshakeStep::RequestToken,
			&success("oauth_token=abc&oauth_token_secret=xyz"),
		)
		.expect("Minimal pair should parse successfully.");

		assert_eq!(parsed.token, "abc");
		assert_eq!(parsed.token_secret, "xyz");
		assert!(parsed.extra.is_empty());
	}

	#[test]
	fn preserves_extra_parameters_decoded() {
		let body =
			"oauth_token=abc&oauth_token_secret=xyz&oauth_callback_confirmed=true&note=a+b%21";
		let parsed = parse_token_response(HandshakeStep::RequestToken, &success(body))
			.expect("Pair with extras should parse successfully.");

		assert_eq!(
			parsed.extra.get("oauth_callback_confirmed").map(String::as_str),
			Some("true")
		);
		assert_eq!(parsed.extra.get("note").map(String::as_str), Some("a b!"));
	}

	#[test]
	fn decodes_percent_escapes_in_the_pair() {
		let parsed = parse_token_response(
			HandshakeStep::AccessToken,
			&success("oauth_token=a%2Fb&oauth_token_secret=x%20y"),
		)
		.expect("Escaped pair should parse successfully.");

		assert_eq!(parsed.token, "a/b");
		assert_eq!(parsed.token_secret, "x y");
	}

	#[test]
	fn non_form_body_is_malformed() {
		let err = parse_token_response(
			HandshakeStep::RequestToken,
			&success("<html><body>maintenance window</body></html>"),
		)
		.expect_err("HTML body should fail.");

		assert!(matches!(err, Error::Parse(ProtocolParseError::MalformedBody { .. })));
	}

	#[test]
	fn empty_body_lacks_the_token() {
		let err = parse_token_response(HandshakeStep::RequestToken, &success(""))
			.expect_err("Empty body should fail.");

		assert!(matches!(
			err,
			Error::Parse(ProtocolParseError::MissingField { field: "oauth_token", .. })
		));
	}

	#[test]
	fn missing_token_secret_is_a_parse_error() {
		let err = parse_token_response(HandshakeStep::RequestToken, &success("oauth_token=abc"))
			.expect_err("Missing secret should fail.");

		assert!(matches!(
			err,
			Error::Parse(ProtocolParseError::MissingField { field: "oauth_token_secret", .. })
		));
	}

	#[test]
	fn missing_token_is_a_parse_error() {
		let err =
			parse_token_response(HandshakeStep::AccessToken, &success("oauth_token_secret=xyz"))
				.expect_err("Missing token should fail.");

		assert!(matches!(
			err,
			Error::Parse(ProtocolParseError::MissingField { field: "oauth_token", .. })
		));
	}

	#[test]
	fn non_success_status_is_an_authorization_error() {
		let response =
			EndpointResponse { status: 401, body: "oauth_problem=signature_invalid".into() };
		let err = parse_token_response(HandshakeStep::RequestToken, &response)
			.expect_err("Rejection should fail.");

		assert!(matches!(
			&err,
			Error::Authorization { step: HandshakeStep::RequestToken, status: 401, body }
				if body == "oauth_problem=signature_invalid"
		));
	}

	#[test]
	fn conversions_move_the_pair_into_credentials() {
		let parsed = parse_token_response(
			HandshakeStep::AccessToken,
			&success("oauth_token=final1&oauth_token_secret=finalsecret"),
		)
		.expect("Pair should parse successfully.");
		let credential: AccessCredential = parsed.into();

		assert_eq!(credential.token, "final1");
		assert_eq!(credential.secret.expose(), "finalsecret");
	}
}
