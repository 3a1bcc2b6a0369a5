//! Handshake-level error types shared across signing, transport, and flows.
//!
//! Every error is terminal for the current handshake run: the library never
//! retries on its own, and a failed transition discards whatever credential
//! material the run had produced.

// self
use crate::{_prelude::*, request::HandshakeStep};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical handshake error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS) before any response arrived.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint answered but the body could not be understood.
	#[error(transparent)]
	Parse(#[from] ProtocolParseError),

	/// Signed request was rejected by the provider.
	///
	/// Anything other than a success status lands here; the raw body is kept
	/// verbatim so callers can surface provider diagnostics such as
	/// `oauth_problem=signature_invalid`.
	#[error("Provider rejected the {step} request with HTTP {status}: {body}")]
	Authorization {
		/// Handshake step whose request was rejected.
		step: HandshakeStep,
		/// HTTP status code of the rejection.
		status: u16,
		/// Raw response body, unparsed.
		body: String,
	},
}
impl Error {
	/// Returns the handshake step attached to the error, when one exists.
	pub fn step(&self) -> Option<HandshakeStep> {
		match self {
			Error::Authorization { step, .. } => Some(*step),
			Error::Parse(e) => Some(e.step()),
			Error::Config(_) | Error::Transport(_) => None,
		}
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Consumer credentials failed validation.
	#[error("Consumer credentials are invalid.")]
	Consumer(#[from] crate::auth::ConsumerError),
	/// Provider descriptor failed validation.
	#[error("Provider descriptor is invalid.")]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Signature could not be computed.
	#[error("Signature could not be computed.")]
	Signature(#[from] crate::signer::SignatureError),
	/// Verifier handed back by the user must not be empty.
	#[error("Verifier must not be empty.")]
	EmptyVerifier,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures decoding a token endpoint's successful response.
#[derive(Debug, ThisError)]
pub enum ProtocolParseError {
	/// Body was not decodable as `application/x-www-form-urlencoded` pairs.
	#[error("The {step} response body is not form-encoded: {body}")]
	MalformedBody {
		/// Handshake step whose response failed to decode.
		step: HandshakeStep,
		/// Raw response body, unparsed.
		body: String,
	},
	/// Body decoded but a required credential field is missing.
	#[error("The {step} response is missing `{field}`: {body}")]
	MissingField {
		/// Handshake step whose response was incomplete.
		step: HandshakeStep,
		/// Required field that was absent.
		field: &'static str,
		/// Raw response body, unparsed.
		body: String,
	},
}
impl ProtocolParseError {
	/// Returns the handshake step the response belonged to.
	pub const fn step(&self) -> HandshakeStep {
		match self {
			ProtocolParseError::MalformedBody { step, .. }
			| ProtocolParseError::MissingField { step, .. } => *step,
		}
	}
}
