//! Handshake orchestration: the driver plus its two signed transitions.
//!
//! A [`Handshake`] walks the three-legged sequence in order: the
//! request-token transition yields an [`AuthorizationSession`], the caller
//! sends the resource owner to its authorize URL and collects the verifier
//! out of band, and the access-token transition consumes the session to
//! produce the final credential. Every failure is terminal; the driver never
//! retries a transition on its own.

pub mod response;
pub mod session;

mod access_token;
mod request_token;

pub use response::*;
pub use session::*;

// self
use crate::{_prelude::*, auth::Consumer, http::TokenHttpClient, provider::ProviderDescriptor};
#[cfg(feature = "reqwest")]
use crate::{
	error::ConfigError,
	http::{ReqwestHttpClient, TlsTrust},
};

/// Default callback value announcing the out-of-band PIN flow.
pub const OOB_CALLBACK: &str = "oob";

/// Handshake specialized for the crate's default reqwest transport stack.
#[cfg(feature = "reqwest")]
pub type ReqwestHandshake = Handshake<ReqwestHttpClient>;

/// Drives the three-legged handshake against a single provider descriptor.
///
/// The handshake owns the HTTP client, consumer pair, descriptor, and the
/// callback to announce, so the transition methods can focus on assembling
/// and classifying one signed exchange each. The struct is cheap to clone and
/// stateless between calls: all per-attempt state travels in the
/// [`AuthorizationSession`] value.
#[derive(Clone)]
pub struct Handshake<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// HTTP client wrapper used for every outbound provider request.
	pub http_client: Arc<C>,
	/// Provider descriptor that defines the handshake endpoints.
	pub descriptor: ProviderDescriptor,
	/// Consumer pair identifying this client application.
	pub consumer: Consumer,
	/// Callback announced in the request-token step.
	pub callback: String,
}
impl<C> Handshake<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Creates a handshake that reuses the caller-provided transport.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		consumer: Consumer,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			descriptor,
			consumer,
			callback: OOB_CALLBACK.into(),
		}
	}

	/// Sets or replaces the callback announced during the request-token step.
	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = callback.into();

		self
	}
}
#[cfg(feature = "reqwest")]
impl Handshake<ReqwestHttpClient> {
	/// Creates a new handshake for the provided descriptor and consumer.
	///
	/// The handshake provisions its own reqwest-backed transport trusting the
	/// system root store. Use [`Handshake::with_tls_trust`] when the provider
	/// presents a certificate outside that store.
	pub fn new(descriptor: ProviderDescriptor, consumer: Consumer) -> Result<Self, ConfigError> {
		Self::with_tls_trust(descriptor, consumer, TlsTrust::default())
	}

	/// Creates a new handshake with an explicit TLS trust configuration.
	pub fn with_tls_trust(
		descriptor: ProviderDescriptor,
		consumer: Consumer,
		trust: TlsTrust,
	) -> Result<Self, ConfigError> {
		Ok(Self::with_http_client(descriptor, consumer, ReqwestHttpClient::with_tls_trust(trust)?))
	}
}
impl<C> Debug for Handshake<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Handshake")
			.field("descriptor", &self.descriptor)
			.field("consumer_key", &self.consumer.key)
			.field("callback", &self.callback)
			.finish()
	}
}
