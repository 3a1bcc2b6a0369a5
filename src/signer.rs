//! HMAC-SHA1 signing primitives for protocol requests.
//!
//! Every function here is a pure function of its inputs: percent-encoding with
//! the protocol's unreserved set, parameter normalization, signature base
//! string and signing key assembly, and the final base64-encoded HMAC-SHA1
//! digest. No I/O, no clock, no randomness; callers supply nonce and timestamp
//! as ordinary parameters.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac, digest::InvalidLength};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use sha1::Sha1;
// self
use crate::_prelude::*;

/// Characters escaped during encoding: everything outside ALPHA / DIGIT /
/// `-` / `.` / `_` / `~`. Non-ASCII bytes are always escaped, with uppercase
/// hex digits.
const ESCAPED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Errors raised while computing a signature.
#[derive(Debug, ThisError)]
pub enum SignatureError {
	/// HMAC key setup was rejected by the underlying implementation.
	#[error("HMAC-SHA1 key setup failed.")]
	KeySetup(#[from] InvalidLength),
}

/// Signature methods understood by the signer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureMethod {
	/// HMAC-SHA1 over the signature base string; the only supported method.
	#[default]
	#[serde(rename = "HMAC-SHA1")]
	HmacSha1,
}
impl SignatureMethod {
	/// Returns the protocol label carried in `oauth_signature_method`.
	pub const fn as_str(self) -> &'static str {
		match self {
			SignatureMethod::HmacSha1 => "HMAC-SHA1",
		}
	}
}
impl Display for SignatureMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Percent-encodes a string with the protocol's unreserved-set rules.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, ESCAPED).to_string()
}

/// Reverses [`percent_encode`]; invalid UTF-8 sequences are replaced.
pub fn percent_decode(value: &str) -> String {
	percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Normalizes a parameter collection into the protocol's parameter string.
///
/// Both halves of every pair are encoded first, then the pairs are sorted by
/// encoded key with encoded value as the tie breaker, and finally joined as
/// `key=value` pairs with `&`. The result is independent of input order.
pub fn normalize_parameters<'a, I>(params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut encoded: Vec<(String, String)> =
		params.into_iter().map(|(k, v)| (percent_encode(k), percent_encode(v))).collect();

	encoded.sort();

	encoded.into_iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
}

/// Assembles the signature base string `METHOD&enc(base_url)&enc(params)`.
///
/// The base URL must carry no query or fragment; query parameters belong in
/// `params` instead.
pub fn signature_base_string<'a, I>(method: &str, base_url: &str, params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		percent_encode(base_url),
		percent_encode(&normalize_parameters(params))
	)
}

/// Assembles the signing key `enc(consumer_secret)&enc(token_secret)`.
///
/// The token half is the empty string until the handshake has produced a
/// credential.
pub fn signing_key(consumer_secret: &str, token_secret: Option<&str>) -> String {
	format!(
		"{}&{}",
		percent_encode(consumer_secret),
		percent_encode(token_secret.unwrap_or_default())
	)
}

/// Signs a request: base64-encoded HMAC-SHA1 of the signature base string,
/// keyed by [`signing_key`]. Deterministic for fixed inputs.
pub fn sign<'a, I>(
	method: &str,
	base_url: &str,
	params: I,
	consumer_secret: &str,
	token_secret: Option<&str>,
) -> Result<String, SignatureError>
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let base = signature_base_string(method, base_url, params);
	let key = signing_key(consumer_secret, token_secret);
	let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())?;

	mac.update(base.as_bytes());

	Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
