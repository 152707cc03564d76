//! Enumeration types for constrained record values.

use serde::{Deserialize, Serialize};

/// Category of an income record.
///
/// The backend stores categories as free strings, so anything outside the
/// known set is kept verbatim in [`IncomeCategory::Other`] instead of
/// failing the whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeCategory {
    /// Regular employment income.
    Salary,
    /// Contract or gig work.
    Freelance,
    /// Dividends, interest and similar returns.
    Investment,
    /// A category this client does not know about.
    #[serde(untagged)]
    Other(String),
}

impl IncomeCategory {
    /// Returns the category name as sent to the backend.
    #[inline]
    #[must_use]
    #[allow(
        clippy::pattern_type_mismatch,
        reason = "borrows the unknown category name through default binding"
    )]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Other(name) => name,
        }
    }
}

impl core::fmt::Display for IncomeCategory {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an expense record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Bills and utilities.
    #[serde(rename = "Bill & Utility")]
    BillAndUtility,
    /// Grocery shopping.
    Groceries,
    /// Public transport, fuel, fares.
    Transport,
    /// A category this client does not know about.
    #[serde(untagged)]
    Other(String),
}

impl ExpenseCategory {
    /// Returns the category name as sent to the backend.
    #[inline]
    #[must_use]
    #[allow(
        clippy::pattern_type_mismatch,
        reason = "borrows the unknown category name through default binding"
    )]
    pub fn as_str(&self) -> &str {
        match self {
            Self::BillAndUtility => "Bill & Utility",
            Self::Groceries => "Groceries",
            Self::Transport => "Transport",
            Self::Other(name) => name,
        }
    }
}

impl core::fmt::Display for ExpenseCategory {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a [`super::TransactionRecord`] came from the income or the
/// expense list. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received.
    Income,
    /// Money spent.
    Expense,
}
