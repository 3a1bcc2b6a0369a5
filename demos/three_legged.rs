//! Interactive three-legged OAuth 1.0a walkthrough.
//!
//! The example requests a temporary credential, prints the authorize URL, waits for the verifier
//! collected out of band via stdin, and exchanges it for the final access credential so the whole
//! handshake is exercised end-to-end.

// std
use std::io::{self, Write};
// crates.io
use color_eyre::Result;
// self
use oauth1_handshake::{
	auth::Consumer, flows::Handshake, http::TlsTrust, provider::ProviderDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let site = prompt_with_default(
		"Enter the provider site base URL",
		Some("https://api.twitter.com"),
	)?;
	let consumer_key = prompt_with_default("Enter your consumer key", Some("demo-consumer-key"))?;
	let consumer_secret =
		prompt_with_default("Enter your consumer secret", Some("demo-consumer-secret"))?;
	let accept_invalid =
		prompt_with_default("Accept self-signed certificates (yes/no)", Some("no"))?;
	let trust = if accept_invalid.eq_ignore_ascii_case("yes") {
		TlsTrust::AcceptInvalid
	} else {
		TlsTrust::SystemRoots
	};
	let descriptor = ProviderDescriptor::builder(site).build()?;
	let consumer = Consumer::new(consumer_key, consumer_secret)?;
	let handshake = Handshake::with_tls_trust(descriptor, consumer, trust)?;
	let session = handshake.request_temporary_credential().await?;

	println!("Authorize URL: {}", &session.authorize_url);

	if !session.callback_confirmed() {
		println!("Provider did not confirm the callback; it may predate revision 1.0a.");
	}

	println!("Visit the URL, approve the request, and copy the verifier (PIN) shown afterwards.");

	let verifier = prompt_optional("Verifier (leave blank to stop before the exchange)")?;

	if let Some(verifier) = verifier {
		let credential = handshake.exchange_access_credential(session, &verifier).await?;

		println!("Access token: {}", credential.token);
		println!("Access token secret: {}", credential.secret.expose());

		for (key, value) in &credential.extra {
			println!("Extra parameter {key}: {value}");
		}

		return Ok(());
	}

	println!("Verifier not provided; skipping the access-token exchange.");
	println!("Re-run the walkthrough once the provider shows a verifier for this consumer.");

	Ok(())
}

fn prompt_with_default(message: &str, default: Option<&str>) -> Result<String> {
	loop {
		if let Some(value) = default {
			print!("{message} [{value}]: ");
		} else {
			print!("{message}: ");
		}

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if trimmed.is_empty() {
			if let Some(value) = default {
				return Ok(value.to_owned());
			}
		} else {
			return Ok(trimmed.to_owned());
		}
	}
}

fn prompt_optional(message: &str) -> Result<Option<String>> {
	print!("{message}: ");

	io::stdout().flush()?;

	let mut input = String::new();

	io::stdin().read_line(&mut input)?;

	let trimmed = input.trim();

	if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_owned())) }
}
