//! Consumer credentials identifying the client application.

// self
use crate::{_prelude::*, auth::SharedSecret};

/// Errors raised while validating consumer credentials.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ConsumerError {
	/// Consumer key must not be empty.
	#[error("Consumer key must not be empty.")]
	EmptyKey,
	/// Consumer secret must not be empty.
	#[error("Consumer secret must not be empty.")]
	EmptySecret,
}

/// Immutable consumer key/secret pair registered with the provider.
///
/// The key travels in the clear as `oauth_consumer_key`; the secret only ever
/// contributes to signing keys. Every construction path runs the same
/// non-emptiness validation: the fields stay private so neither a struct
/// literal nor deserialization can bypass [`Consumer::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawConsumer")]
pub struct Consumer {
	pub(crate) key: String,
	pub(crate) secret: SharedSecret,
}
impl Consumer {
	/// Validates and wraps a consumer key/secret pair.
	pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Result<Self, ConsumerError> {
		let key = key.into();
		let secret = secret.into();

		if key.is_empty() {
			return Err(ConsumerError::EmptyKey);
		}
		if secret.is_empty() {
			return Err(ConsumerError::EmptySecret);
		}

		Ok(Self { key, secret: SharedSecret::new(secret) })
	}

	/// Public consumer key sent with every signed request.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Consumer secret forming the first half of every signing key.
	pub fn secret(&self) -> &SharedSecret {
		&self.secret
	}
}

// Unvalidated wire shape; serde input funnels through `Consumer::new`.
#[derive(Deserialize)]
struct RawConsumer {
	key: String,
	secret: String,
}
impl TryFrom<RawConsumer> for Consumer {
	type Error = ConsumerError;

	fn try_from(raw: RawConsumer) -> Result<Self, Self::Error> {
		Self::new(raw.key, raw.secret)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn consumer_accepts_non_empty_pair() {
		let consumer =
			Consumer::new("ClientKeyMustBeLongEnough00001", "ClientSecretMustBeLongEnough01")
				.expect("Consumer fixture should validate successfully.");

		assert_eq!(consumer.key(), "ClientKeyMustBeLongEnough00001");
		assert_eq!(consumer.secret().expose(), "ClientSecretMustBeLongEnough01");
	}

	#[test]
	fn consumer_rejects_empty_halves() {
		assert_eq!(
			Consumer::new("", "secret").expect_err("Empty key should be rejected."),
			ConsumerError::EmptyKey
		);
		assert_eq!(
			Consumer::new("key", "").expect_err("Empty secret should be rejected."),
			ConsumerError::EmptySecret
		);
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let consumer: Consumer = serde_json::from_str(r#"{"key":"app-key","secret":"app-secret"}"#)
			.expect("Valid pair should deserialize successfully.");

		assert_eq!(consumer.key(), "app-key");
		assert_eq!(consumer.secret().expose(), "app-secret");
		assert!(serde_json::from_str::<Consumer>(r#"{"key":"","secret":"app-secret"}"#).is_err());
		assert!(serde_json::from_str::<Consumer>(r#"{"key":"app-key","secret":""}"#).is_err());
	}
}
