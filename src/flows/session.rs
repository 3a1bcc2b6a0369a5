//! Pending authorization state between the two signed transitions.

// self
use crate::{
	_prelude::*, auth::TemporaryCredential, provider::ProviderDescriptor, request::OAUTH_TOKEN,
};

const CALLBACK_CONFIRMED: &str = "oauth_callback_confirmed";

/// Handshake state between the request-token and access-token transitions.
///
/// Holds the temporary credential plus the ready-made URL the resource owner
/// must visit. The session is consumed by the access-token exchange, so a
/// temporary credential signs exactly one exchange attempt.
#[derive(Clone, Debug)]
pub struct AuthorizationSession {
	/// Temporary credential issued by the request-token endpoint.
	pub temporary: TemporaryCredential,
	/// Fully-formed authorize URL to hand to the resource owner.
	pub authorize_url: Url,
}
impl AuthorizationSession {
	pub(super) fn new(descriptor: &ProviderDescriptor, temporary: TemporaryCredential) -> Self {
		let authorize_url = build_authorize_url(descriptor, &temporary);

		Self { temporary, authorize_url }
	}

	/// Checks whether the provider confirmed the announced callback.
	///
	/// Revision 1.0a providers answer `oauth_callback_confirmed=true`; the
	/// flag is informational and never validated by the handshake.
	pub fn callback_confirmed(&self) -> bool {
		self.temporary.extra.get(CALLBACK_CONFIRMED).is_some_and(|value| value == "true")
	}

	pub(super) fn into_temporary(self) -> TemporaryCredential {
		self.temporary
	}
}

fn build_authorize_url(descriptor: &ProviderDescriptor, temporary: &TemporaryCredential) -> Url {
	let mut url = descriptor.endpoints.authorize.clone();

	url.query_pairs_mut().append_pair(OAUTH_TOKEN, &temporary.token);

	url
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::SharedSecret;

	fn descriptor() -> ProviderDescriptor {
		ProviderDescriptor::builder("https://provider.example")
			.build()
			.expect("Descriptor fixture should build successfully.")
	}

	fn temporary(extra: BTreeMap<String, String>) -> TemporaryCredential {
		TemporaryCredential { token: "abc".into(), secret: SharedSecret::new("xyz"), extra }
	}

	#[test]
	fn authorize_url_carries_the_temporary_token() {
		let session = AuthorizationSession::new(&descriptor(), temporary(BTreeMap::new()));

		assert_eq!(
			session.authorize_url.as_str(),
			"https://provider.example/oauth/authorize?oauth_token=abc"
		);
	}

	#[test]
	fn authorize_url_preserves_existing_query_pairs() {
		let descriptor = ProviderDescriptor::builder("https://provider.example")
			.authorize_path("/oauth/authorize?lang=en")
			.build()
			.expect("Descriptor fixture should build successfully.");
		let session = AuthorizationSession::new(&descriptor, temporary(BTreeMap::new()));

		assert_eq!(
			session.authorize_url.as_str(),
			"https://provider.example/oauth/authorize?lang=en&oauth_token=abc"
		);
	}

	#[test]
	fn callback_confirmation_reads_the_extra_flag() {
		let unconfirmed = AuthorizationSession::new(&descriptor(), temporary(BTreeMap::new()));
		let confirmed = AuthorizationSession::new(
			&descriptor(),
			temporary([("oauth_callback_confirmed".to_owned(), "true".to_owned())].into()),
		);

		assert!(!unconfirmed.callback_confirmed());
		assert!(confirmed.callback_confirmed());
	}
}
