//! Signed-request assembly for handshake transitions.
//!
//! [`SignedRequestBuilder`] gathers the protocol parameter set for one step,
//! generates the per-request material (numeric nonce, epoch timestamp), signs
//! the whole thing via [`signer`], and renders the `Authorization: OAuth …`
//! header. The output [`SignedRequest`] is all a transport needs; it carries
//! no body and transports must not attach a `Content-Type` header, since some
//! providers reject token requests that declare one.

// crates.io
use rand::Rng;
// self
use crate::{
	_prelude::*,
	auth::{Consumer, TemporaryCredential},
	signer::{self, SignatureError, SignatureMethod},
};

pub(crate) const OAUTH_CALLBACK: &str = "oauth_callback";
pub(crate) const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub(crate) const OAUTH_NONCE: &str = "oauth_nonce";
pub(crate) const OAUTH_SIGNATURE: &str = "oauth_signature";
pub(crate) const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub(crate) const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub(crate) const OAUTH_TOKEN: &str = "oauth_token";
pub(crate) const OAUTH_TOKEN_SECRET: &str = "oauth_token_secret";
pub(crate) const OAUTH_VERIFIER: &str = "oauth_verifier";
pub(crate) const OAUTH_VERSION: &str = "oauth_version";

const OAUTH_VERSION_VALUE: &str = "1.0";
const NONCE_LEN: usize = 16;

/// Handshake transitions that perform a signed HTTP exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeStep {
	/// Temporary-credential request against the request-token endpoint.
	RequestToken,
	/// Access-credential exchange against the access-token endpoint.
	AccessToken,
}
impl HandshakeStep {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeStep::RequestToken => "request_token",
			HandshakeStep::AccessToken => "access_token",
		}
	}
}
impl Display for HandshakeStep {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// HTTP methods a provider may require for its token endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// Token request via GET; parameters still travel in the header.
	Get,
	/// Token request via POST, the widespread default.
	#[default]
	Post,
}
impl HttpMethod {
	/// Returns the method name as it appears in the signature base string.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Fully signed request ready for a transport to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
	/// HTTP method the request was signed for.
	pub method: HttpMethod,
	/// Target endpoint as configured, query preserved.
	pub url: Url,
	/// Rendered `OAuth` scheme value for the `Authorization` header.
	pub authorization: String,
}

/// Builder assembling one signed request for a handshake step.
///
/// Each build consumes the builder and stamps a fresh nonce/timestamp pair
/// unless overridden, so a signed request is never reissued by accident.
#[derive(Clone, Debug)]
pub struct SignedRequestBuilder<'a> {
	step: HandshakeStep,
	method: HttpMethod,
	url: &'a Url,
	consumer: &'a Consumer,
	token: Option<&'a str>,
	token_secret: Option<&'a str>,
	callback: Option<&'a str>,
	verifier: Option<&'a str>,
	nonce: Option<String>,
	timestamp: Option<i64>,
}
impl<'a> SignedRequestBuilder<'a> {
	/// Starts a request-token request carrying `oauth_callback`.
	pub fn request_token(consumer: &'a Consumer, url: &'a Url, callback: &'a str) -> Self {
		Self {
			step: HandshakeStep::RequestToken,
			method: HttpMethod::default(),
			url,
			consumer,
			token: None,
			token_secret: None,
			callback: Some(callback),
			verifier: None,
			nonce: None,
			timestamp: None,
		}
	}

	/// Starts an access-token request signed with the temporary credential
	/// and carrying `oauth_verifier`.
	pub fn access_token(
		consumer: &'a Consumer,
		url: &'a Url,
		credential: &'a TemporaryCredential,
		verifier: &'a str,
	) -> Self {
		Self {
			step: HandshakeStep::AccessToken,
			method: HttpMethod::default(),
			url,
			consumer,
			token: Some(&credential.token),
			token_secret: Some(credential.secret.expose()),
			callback: None,
			verifier: Some(verifier),
			nonce: None,
			timestamp: None,
		}
	}

	/// Returns the step this builder signs for.
	pub const fn step(&self) -> HandshakeStep {
		self.step
	}

	/// Overrides the HTTP method; defaults to POST.
	pub fn method(mut self, method: HttpMethod) -> Self {
		self.method = method;

		self
	}

	/// Overrides the generated nonce, for deterministic request assembly.
	pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
		self.nonce = Some(nonce.into());

		self
	}

	/// Overrides the generated timestamp, for deterministic request assembly.
	pub fn timestamp(mut self, timestamp: i64) -> Self {
		self.timestamp = Some(timestamp);

		self
	}

	/// Signs the parameter set and renders the final request.
	pub fn build(self) -> Result<SignedRequest, SignatureError> {
		let nonce = self.nonce.unwrap_or_else(numeric_nonce);
		let timestamp = self
			.timestamp
			.unwrap_or_else(|| OffsetDateTime::now_utc().unix_timestamp())
			.to_string();
		let mut protocol: Vec<(&str, &str)> = vec![
			(OAUTH_CONSUMER_KEY, self.consumer.key.as_str()),
			(OAUTH_NONCE, nonce.as_str()),
			(OAUTH_SIGNATURE_METHOD, SignatureMethod::HmacSha1.as_str()),
			(OAUTH_TIMESTAMP, timestamp.as_str()),
			(OAUTH_VERSION, OAUTH_VERSION_VALUE),
		];

		if let Some(token) = self.token {
			protocol.push((OAUTH_TOKEN, token));
		}
		if let Some(callback) = self.callback {
			protocol.push((OAUTH_CALLBACK, callback));
		}
		if let Some(verifier) = self.verifier {
			protocol.push((OAUTH_VERIFIER, verifier));
		}

		// Query pairs participate in signing against the queryless base URL,
		// but never enter the Authorization header. Decoding is percent-only;
		// a literal `+` in the configured query stays a plus, not a space.
		let query = query_parameters(self.url);
		let signed: Vec<(&str, &str)> = protocol
			.iter()
			.copied()
			.chain(query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
			.collect();
		let signature = signer::sign(
			self.method.as_str(),
			&base_url_of(self.url),
			signed,
			self.consumer.secret.expose(),
			self.token_secret,
		)?;

		Ok(SignedRequest {
			method: self.method,
			url: self.url.clone(),
			authorization: render_authorization(&protocol, &signature),
		})
	}
}

/// Renders the `OAuth` header value from protocol parameters plus signature,
/// percent-encoded and sorted for stable output.
fn render_authorization(protocol: &[(&str, &str)], signature: &str) -> String {
	let mut entries: Vec<(String, String)> = protocol
		.iter()
		.map(|(k, v)| (signer::percent_encode(k), signer::percent_encode(v)))
		.collect();

	entries.push((OAUTH_SIGNATURE.to_owned(), signer::percent_encode(signature)));
	entries.sort();

	let joined =
		entries.into_iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect::<Vec<_>>().join(", ");

	format!("OAuth {joined}")
}

fn base_url_of(url: &Url) -> String {
	let mut stripped = url.clone();

	stripped.set_query(None);
	stripped.set_fragment(None);

	stripped.to_string()
}

// Not `Url::query_pairs`: that applies form-urlencoded decoding and would turn
// a literal `+` into a space before signing.
fn query_parameters(url: &Url) -> Vec<(String, String)> {
	url.query()
		.map(|query| {
			query
				.split('&')
				.filter(|chunk| !chunk.is_empty())
				.map(|chunk| {
					let (key, value) = chunk.split_once('=').unwrap_or((chunk, ""));

					(signer::percent_decode(key), signer::percent_decode(value))
				})
				.collect()
		})
		.unwrap_or_default()
}

fn numeric_nonce() -> String {
	let mut rng = rand::rng();

	(0..NONCE_LEN).map(|_| char::from(b'0' + rng.random_range(0..10u8))).collect()
}
