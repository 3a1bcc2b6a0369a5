//! Credential pairs issued by the provider during the handshake.

// self
use crate::{_prelude::*, auth::SharedSecret};

/// Short-lived credential issued by the request-token endpoint.
///
/// The pair identifies one authorization attempt: its token rides in the
/// authorization URL and the access-token exchange, its secret signs that
/// exchange. It is distinct from [`AccessCredential`] on purpose so an
/// unauthorized pair can never be handed to a protected-resource client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryCredential {
	/// Token identifier echoed back to the provider as `oauth_token`.
	pub token: String,
	/// Token shared-secret forming the second half of the signing key.
	pub secret: SharedSecret,
	/// Response parameters beyond the pair itself, e.g. `oauth_callback_confirmed`.
	pub extra: BTreeMap<String, String>,
}

/// Long-lived credential issued by the access-token endpoint.
///
/// Terminal output of the handshake, meant to be stored by the caller and
/// reused for signing protected-resource requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCredential {
	/// Token identifier presented to protected resources as `oauth_token`.
	pub token: String,
	/// Token shared-secret forming the second half of the signing key.
	pub secret: SharedSecret,
	/// Response parameters beyond the pair itself, provider-specific.
	pub extra: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn credentials_keep_pair_and_extras_together() {
		let credential = TemporaryCredential {
			token: "abc".into(),
			secret: SharedSecret::new("xyz"),
			extra: [("oauth_callback_confirmed".to_owned(), "true".to_owned())].into(),
		};

		assert_eq!(credential.token, "abc");
		assert_eq!(credential.secret.expose(), "xyz");
		assert_eq!(
			credential.extra.get("oauth_callback_confirmed").map(String::as_str),
			Some("true")
		);
	}

	#[test]
	fn credential_debug_redacts_secret() {
		let credential = AccessCredential {
			token: "final1".into(),
			secret: SharedSecret::new("finalsecret"),
			extra: BTreeMap::new(),
		};
		let rendered = format!("{credential:?}");

		assert!(rendered.contains("final1"));
		assert!(!rendered.contains("finalsecret"));
	}
}
