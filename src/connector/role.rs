//! Xero organisation roles and the role model choice.

// self
use crate::_prelude::*;

/// Closed set of Xero organisation roles the connector maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
	/// `READONLY`
	ReadOnly,
	/// `INVOICEONLY`
	InvoiceOnly,
	/// `STANDARD`
	Standard,
	/// `FINANCIALADVISOR`
	FinancialAdvisor,
	/// `MANAGEDCLIENT`
	ManagedClient,
	/// `CASHBOOKCLIENT`
	CashbookClient,
}
impl Role {
	/// Every role, in display order.
	pub const ALL: [Role; 6] = [
		Role::ReadOnly,
		Role::InvoiceOnly,
		Role::Standard,
		Role::FinancialAdvisor,
		Role::ManagedClient,
		Role::CashbookClient,
	];

	/// Internal identifier used as resource id and entitlement slug.
	pub const fn id(self) -> &'static str {
		match self {
			Role::ReadOnly => "readonly",
			Role::InvoiceOnly => "invoiceonly",
			Role::Standard => "standard",
			Role::FinancialAdvisor => "financialadvisor",
			Role::ManagedClient => "managedclient",
			Role::CashbookClient => "cashbookclient",
		}
	}

	/// Human-readable name.
	pub const fn display_name(self) -> &'static str {
		match self {
			Role::ReadOnly => "Read Only",
			Role::InvoiceOnly => "Invoice Only",
			Role::Standard => "Standard",
			Role::FinancialAdvisor => "Financial Advisor",
			Role::ManagedClient => "Managed Client",
			Role::CashbookClient => "Cashbook Client",
		}
	}

	/// Value matched against `OrganisationRole` by the users endpoint filter.
	pub fn filter_value(self) -> String {
		self.id().to_ascii_uppercase()
	}

	/// Parses an `OrganisationRole` value; matching ignores case.
	pub fn from_api_value(value: &str) -> Option<Self> {
		let value = value.to_lowercase();

		Self::ALL.into_iter().find(|role| role.id() == value)
	}
}
impl Display for Role {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.id())
	}
}

/// How roles are exposed to the sync engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoleModel {
	/// One entitlement per role on every organisation; grants come from the users list.
	#[default]
	OrganizationEntitlements,
	/// Roles are standalone `role` resources; grants come from role-filtered user lists.
	RoleResources,
}
