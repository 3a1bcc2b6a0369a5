//! Demonstrates driving the handshake through a custom HTTP transport.
//!
//! 1. Implement [`TokenHttpClient`] for a scripted transport that answers both token endpoints
//!    offline.
//! 2. Pass the transport to [`Handshake::with_http_client`]; the default reqwest stack is never
//!    touched, so the example also builds with `--no-default-features`.
//! 3. Map transport failures into [`TransportError`] so the handshake surfaces them as
//!    transport errors rather than protocol ones.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
};
// crates.io
use color_eyre::Result;
// self
use oauth1_handshake::{
	auth::Consumer,
	error::TransportError,
	flows::Handshake,
	http::{EndpointResponse, TokenHttpClient, TransportFuture},
	provider::ProviderDescriptor,
	request::SignedRequest,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ProviderDescriptor::builder("https://provider.example.com").build()?;
	let consumer = Consumer::new("demo-consumer-key", "demo-consumer-secret")?;
	let handshake = Handshake::with_http_client(
		descriptor.clone(),
		consumer.clone(),
		ScriptedHttpClient::succeeding(),
	);
	let session = handshake.request_temporary_credential().await?;

	println!("Authorize URL rendered offline: {}", &session.authorize_url);

	let credential = handshake.exchange_access_credential(session, "123456").await?;

	println!("Access token issued by the scripted transport: {}.", credential.token);

	let failing = Handshake::with_http_client(
		descriptor,
		consumer,
		ScriptedHttpClient::failing("connection reset by the scripted upstream"),
	);

	match failing.request_temporary_credential().await {
		Ok(_) => println!("Scripted transport unexpectedly succeeded."),
		Err(e) => println!("Transport error surfaced by the handshake: {e}"),
	}

	Ok(())
}

#[derive(Clone)]
enum ScriptedBehavior {
	Success,
	TransportFailure(&'static str),
}

struct ScriptedHttpClient {
	behavior: ScriptedBehavior,
}
impl ScriptedHttpClient {
	fn succeeding() -> Self {
		Self { behavior: ScriptedBehavior::Success }
	}

	fn failing(message: &'static str) -> Self {
		Self { behavior: ScriptedBehavior::TransportFailure(message) }
	}
}
impl TokenHttpClient for ScriptedHttpClient {
	fn execute(&self, request: SignedRequest) -> TransportFuture<'_> {
		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				ScriptedBehavior::Success => {
					println!("Scripted transport saw: {} {}", request.method, request.url);
					println!("  {}", request.authorization);

					let body = if request.url.path().ends_with("/request_token") {
						"oauth_token=temp-token&oauth_token_secret=temp-secret\
						 &oauth_callback_confirmed=true"
					} else {
						"oauth_token=final-token&oauth_token_secret=final-secret"
					};

					Ok(EndpointResponse { status: 200, body: body.to_owned() })
				},
				ScriptedBehavior::TransportFailure(message) =>
					Err(TransportError::network(ScriptedTransportError { message })),
			}
		})
	}
}

#[derive(Clone, Debug)]
struct ScriptedTransportError {
	message: &'static str,
}
impl Display for ScriptedTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.message)
	}
}
impl StdError for ScriptedTransportError {}
