//! Transport primitives for executing signed token requests.
//!
//! The module exposes [`TokenHttpClient`] so downstream crates can integrate
//! custom HTTP stacks, plus the crate's default reqwest-backed implementation.
//! Transports receive a fully assembled [`SignedRequest`] and hand back the
//! raw [`EndpointResponse`]; classification of the status code stays with the
//! flows.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::{
	header::{AUTHORIZATION, CONTENT_LENGTH},
	redirect::Policy,
};
// self
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, request::HttpMethod};
use crate::{_prelude::*, error::TransportError, request::SignedRequest};

/// Boxed future returned by [`TokenHttpClient::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<EndpointResponse, TransportError>> + Send + 'a>>;

/// Raw response captured from a token endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl EndpointResponse {
	/// Checks whether the status lies in the success range.
	pub const fn is_success(&self) -> bool {
		matches!(self.status, 200..300)
	}
}

/// Abstraction over HTTP transports capable of executing signed requests.
///
/// The trait is the crate's only dependency on an HTTP stack. Implementations
/// must be `Send + Sync + 'static` so a handshake can be shared across tasks,
/// and the returned future must be `Send` for the same reason.
///
/// # Request Contract
///
/// - Attach the `Authorization` header value verbatim.
/// - Send no body, and do not attach a `Content-Type` header; the signature
///   covers a body-less request and strict providers reject a stray media
///   type.
/// - Do not follow redirects; token endpoints answer directly.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes one signed request and captures status plus body text.
	fn execute(&self, request: SignedRequest) -> TransportFuture<'_>;
}

/// TLS trust configuration for the built-in reqwest transport.
#[cfg(feature = "reqwest")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TlsTrust {
	/// Validate certificates against the trusted root store.
	#[default]
	SystemRoots,
	/// Accept any certificate and hostname, including self-signed ones.
	///
	/// Only meant for locally hosted providers during development and
	/// testing; never ship this to production.
	AcceptInvalid,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Token requests should not follow redirects, so
/// [`ReqwestHttpClient::with_tls_trust`] builds its client with redirects
/// disabled; configure any custom [`ReqwestClient`] passed to
/// [`ReqwestHttpClient::with_client`] the same way.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a transport with the given TLS trust configuration and redirect
	/// following disabled.
	pub fn with_tls_trust(trust: TlsTrust) -> Result<Self, ConfigError> {
		let builder = ReqwestClient::builder().redirect(Policy::none());
		let builder = match trust {
			TlsTrust::SystemRoots => builder,
			TlsTrust::AcceptInvalid =>
				builder.danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true),
		};

		Ok(Self(builder.build()?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	fn execute(&self, request: SignedRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let builder = match request.method {
				HttpMethod::Get => client.get(request.url.clone()),
				// Body-less POST: Content-Length is pinned to zero and no
				// Content-Type is attached.
				HttpMethod::Post => client.post(request.url.clone()).header(CONTENT_LENGTH, "0"),
			};
			let response = builder
				.header(AUTHORIZATION, request.authorization.as_str())
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(EndpointResponse { status, body })
		})
	}
}
