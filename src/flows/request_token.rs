//! Request-token transition, the first signed exchange of the handshake.

// self
use crate::{
	_prelude::*,
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
	/// Requests a temporary credential and prepares the authorization hand-off.
	///
	/// Signs a request carrying `oauth_callback` with the consumer secret
	/// alone, then decodes the returned pair into an [`AuthorizationSession`]
	/// whose authorize URL is ready to hand to the resource owner.
	pub async fn request_temporary_credential(&self) -> Result<AuthorizationSession> {
		const STEP: HandshakeStep = HandshakeStep::RequestToken;

		let span = StepSpan::new(STEP, "request_temporary_credential");

		obs::record_step_outcome(STEP, StepOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = SignedRequestBuilder::request_token(
					&self.consumer,
					&self.descriptor.endpoints.request_token,
					&self.callback,
				)
				.method(self.descriptor.http_method)
				.build()
				.map_err(ConfigError::from)?;
				let response = self.http_client.execute(request).await?;
				let parsed = response::parse_token_response(STEP, &response)?;

				Ok(AuthorizationSession::new(&self.descriptor, parsed.into()))
			})
			.await;

		match &result {
			Ok(_) => obs::record_step_outcome(STEP, StepOutcome::Success),
			Err(_) => obs::record_step_outcome(STEP, StepOutcome::Failure),
		}

		result
	}
}
