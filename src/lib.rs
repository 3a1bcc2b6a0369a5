//! Explicit OAuth 1.0a handshake client - HMAC-SHA1 signing, typed credential exchange, and a
//! pluggable token transport in one crate built for interop.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;
pub mod request;
pub mod signer;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Consumer,
		flows::{Handshake, ReqwestHandshake},
		http::{ReqwestHttpClient, TlsTrust},
		provider::ProviderDescriptor,
	};

	/// Consumer key fixture shared across integration tests.
	pub const TEST_CONSUMER_KEY: &str = "ClientKeyMustBeLongEnough00001";
	/// Consumer secret fixture shared across integration tests.
	pub const TEST_CONSUMER_SECRET: &str = "ClientSecretMustBeLongEnough01";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::with_tls_trust(TlsTrust::AcceptInvalid)
			.expect("Failed to build insecure Reqwest client for tests.")
	}

	/// Constructs a [`Handshake`] against `site` from the fixture consumer pair and the insecure
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_handshake(site: &str) -> ReqwestHandshake {
		let descriptor = ProviderDescriptor::builder(site)
			.build()
			.expect("Provider descriptor should build successfully.");
		let consumer = Consumer::new(TEST_CONSUMER_KEY, TEST_CONSUMER_SECRET)
			.expect("Consumer fixture should validate successfully.");

		Handshake::with_http_client(descriptor, consumer, test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
