//! Access-token transition, the exchange that finishes the handshake.

// self
use crate::{
	_prelude::*,
	auth::AccessCredential,
	error::ConfigError,
	flows::{Handshake, response, session::AuthorizationSession},
	http::TokenHttpClient,
	obs::{self, StepOutcome, StepSpan},
	request::{HandshakeStep, SignedRequestBuilder},
};

impl<C> Handshake<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Exchanges an authorized session plus its verifier for the access
	/// credential.
	///
	/// The session is consumed either way; a rejected exchange means starting
	/// over from [`Handshake::request_temporary_credential`]. The request is
	/// signed with both the consumer secret and the temporary secret and
	/// carries `oauth_verifier` exactly as collected from the resource owner.
	pub async fn exchange_access_credential(
		&self,
		session: AuthorizationSession,
		verifier: &str,
	) -> Result<AccessCredential> {
		const STEP: HandshakeStep = HandshakeStep::AccessToken;

		let span = StepSpan::new(STEP, "exchange_access_credential");

		obs::record_step_outcome(STEP, StepOutcome::Attempt);

		let result = span
			.instrument(async move {
				if verifier.is_empty() {
					return Err(ConfigError::EmptyVerifier.into());
				}

				let temporary = session.into_temporary();
				let request = SignedRequestBuilder::access_token(
					&self.consumer,
					&self.descriptor.endpoints.access_token,
					&temporary,
					verifier,
				)
				.method(self.descriptor.http_method)
				.build()
				.map_err(ConfigError::from)?;
				let response = self.http_client.execute(request).await?;
				let parsed = response::parse_token_response(STEP, &response)?;

				Ok(parsed.into())
			})
			.await;

		match &result {
			Ok(_) => obs::record_step_outcome(STEP, StepOutcome::Success),
			Err(_) => obs::record_step_outcome(STEP, StepOutcome::Failure),
		}

		result
	}
}
