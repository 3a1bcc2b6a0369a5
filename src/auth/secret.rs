//! Redacting wrapper for the shared-secrets exchanged during the handshake.

// self
use crate::_prelude::*;

/// Shared-secret half of a credential pair, kept out of logs.
///
/// Both the consumer secret and the token secrets issued by the provider are
/// carried in this wrapper. The raw value only leaves through [`expose`],
/// which the signer calls when it assembles a signing key.
///
/// [`expose`]: SharedSecret::expose
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSecret(String);
impl SharedSecret {
	/// Wraps a raw secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Checks whether the wrapped secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl AsRef<str> for SharedSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl From<&str> for SharedSecret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}
impl Debug for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SharedSecret").field(&"<redacted>").finish()
	}
}
impl Display for SharedSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
