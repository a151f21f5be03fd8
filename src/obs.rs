//! Optional observability helpers for connector operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named
//!   `xero_connector.operation` with the `op` and `stage` fields, plus events for refresh-token
//!   rotation and skipped role assignments.
//! - Enable `metrics` to increment the `xero_connector_operation_total` counter for every
//!   attempt, success, and failure, and to record `xero_connector_operation_duration_seconds`
//!   once each operation finishes. Both carry `op`, `stage`, and `outcome` labels.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// std
use std::time::Instant;
// self
use crate::_prelude::*;

/// Operations observed by the connector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Client credentials token exchange.
	ClientCredentials,
	/// Refresh token exchange.
	RefreshToken,
	/// Connections lookup resolving the tenant.
	TenantLookup,
	/// Users fetch.
	ListUsers,
	/// Organisations fetch.
	ListOrganizations,
	/// Resource listing performed by a syncer.
	ListResources,
	/// Entitlement enumeration performed by a syncer.
	ListEntitlements,
	/// Grant enumeration performed by a syncer.
	ListGrants,
	/// Connector credential validation.
	Validate,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::ClientCredentials => "client_credentials",
			OperationKind::RefreshToken => "refresh_token",
			OperationKind::TenantLookup => "tenant_lookup",
			OperationKind::ListUsers => "list_users",
			OperationKind::ListOrganizations => "list_organizations",
			OperationKind::ListResources => "list_resources",
			OperationKind::ListEntitlements => "list_entitlements",
			OperationKind::ListGrants => "list_grants",
			OperationKind::Validate => "validate",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a connector operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span, recording attempt, outcome, and duration.
pub(crate) async fn observe<T, Fut>(kind: OperationKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(kind, stage);
	let started = Instant::now();

	record_operation_outcome(kind, stage, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;
	let outcome = match &result {
		Ok(_) => OperationOutcome::Success,
		Err(_) => OperationOutcome::Failure,
	};

	record_operation_outcome(kind, stage, outcome);
	record_operation_duration(kind, stage, outcome, started.elapsed());

	result
}
