// self
use crate::{_prelude::*, auth::TenantId, obs::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by connector operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("xero_connector.operation", op = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Announces that a refresh token was rotated; the new secret itself is never logged.
pub fn record_refresh_rotation() {
	#[cfg(feature = "tracing")]
	tracing::info!("Refresh token rotated; persist the new refresh token before the next run.");
}

/// Records which tenant was chosen and how many connections the token can reach.
pub fn record_tenant_selected(tenant_id: &TenantId, connections: usize) {
	#[cfg(feature = "tracing")]
	{
		if connections > 1 {
			tracing::warn!(
				tenant_id = %tenant_id,
				connections,
				"Token is connected to several organisations; using the first one."
			);
		} else {
			tracing::debug!(tenant_id = %tenant_id, "Resolved tenant.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (tenant_id, connections);
	}
}

/// Notes a user skipped during grant emission because of an unrecognized role string.
pub fn record_skipped_role(user_id: &str, role: &str) {
	#[cfg(feature = "tracing")]
	tracing::debug!(user_id, role, "Skipping user with unrecognized organisation role.");
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (user_id, role);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(OperationKind::TenantLookup, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn events_tolerate_missing_subscriber() {
		record_refresh_rotation();
		record_skipped_role("user-1", "PAYROLLADMIN");
		record_tenant_selected(
			&TenantId::new("tenant-1").expect("Tenant fixture should be valid."),
			2,
		);
	}
}
