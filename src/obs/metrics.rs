// self
use crate::{obs::StepOutcome, request::HandshakeStep};

/// Records a step outcome via the global metrics recorder (when enabled).
pub fn record_step_outcome(step: HandshakeStep, outcome: StepOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth1_handshake_step_total",
			"step" => step.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (step, outcome);
	}
}
