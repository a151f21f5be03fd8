// std
use std::time::Duration as StdDuration;
// self
use crate::obs::{OperationKind, OperationOutcome};

/// Counts one attempt, success, or failure of `kind` within `stage`.
pub fn record_operation_outcome(
	kind: OperationKind,
	stage: &'static str,
	outcome: OperationOutcome,
) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"xero_connector_operation_total",
			"op" => kind.as_str(),
			"stage" => stage,
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, stage, outcome);
	}
}

/// Records how long a finished operation took, including every request it awaited.
pub fn record_operation_duration(
	kind: OperationKind,
	stage: &'static str,
	outcome: OperationOutcome,
	elapsed: StdDuration,
) {
	#[cfg(feature = "metrics")]
	{
		metrics::histogram!(
			"xero_connector_operation_duration_seconds",
			"op" => kind.as_str(),
			"stage" => stage,
			"outcome" => outcome.as_str()
		)
		.record(elapsed.as_secs_f64());
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, stage, outcome, elapsed);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_noop_without_global_recorder() {
		record_operation_outcome(OperationKind::ListGrants, "org", OperationOutcome::Failure);
		record_operation_duration(
			OperationKind::ListUsers,
			"get_users",
			OperationOutcome::Success,
			StdDuration::from_millis(12),
		);
	}
}
