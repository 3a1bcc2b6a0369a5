//! Consumer, credential, and shared-secret types for the handshake domain.

pub mod consumer;
pub mod credential;
pub mod secret;

pub use consumer::*;
pub use credential::*;
pub use secret::*;
