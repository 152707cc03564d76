//! Income and expense records, their creation payloads, and the merged
//! [`TransactionRecord`] the dashboard works on.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{
    ExpenseCategory, ExpenseId, IncomeCategory, IncomeId, NewReceipt, Receipt, TransactionKind,
};
use crate::error::{FinanceError, Result};

/// An income record as returned by `GET /income/get_incomes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Backend-assigned identifier.
    pub id: IncomeId,
    /// Calendar date (`yyyy-MM-dd`), kept as sent by the backend.
    pub date: String,
    /// Income category.
    pub income_category: IncomeCategory,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount received.
    pub total: f64,
    /// Tax withheld, when the backend reports it.
    #[serde(default)]
    pub tax: Option<f64>,
}

/// An expense record as returned by `GET /expense/get_expenses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Backend-assigned identifier.
    pub id: ExpenseId,
    /// Calendar date (`yyyy-MM-dd`), kept as sent by the backend.
    pub date: String,
    /// Expense category.
    pub expense_category: ExpenseCategory,
    /// Optional free text.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount spent. May be null for receipt-only expenses.
    #[serde(default)]
    pub total: Option<f64>,
    /// Tax paid.
    #[serde(default)]
    pub tax: Option<f64>,
    /// Attached receipt, if the backend embeds it.
    #[serde(default)]
    pub receipt: Option<Receipt>,
}

/// Flat income-or-expense record consumed by the aggregator and the
/// ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Backend identifier of the underlying income or expense.
    pub id: i64,
    /// Which list the record came from.
    pub kind: TransactionKind,
    /// Date string exactly as stored by the backend.
    pub date: String,
    /// Category display name.
    pub category: String,
    /// Optional free text.
    pub description: Option<String>,
    /// Amount, `0` when the backend sent none.
    pub total: f64,
    /// Tax, `0` when the backend sent none.
    pub tax: f64,
}

impl TransactionRecord {
    /// Parses [`Self::date`] into a calendar date.
    ///
    /// Returns `None` if the string is not a recognizable date.
    #[inline]
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

impl From<Income> for TransactionRecord {
    #[inline]
    fn from(income: Income) -> Self {
        Self {
            id: income.id.get(),
            kind: TransactionKind::Income,
            date: income.date,
            category: income.income_category.as_str().to_owned(),
            description: income.description,
            total: income.total,
            tax: income.tax.unwrap_or_default(),
        }
    }
}

impl From<Expense> for TransactionRecord {
    #[inline]
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.get(),
            kind: TransactionKind::Expense,
            date: expense.date,
            category: expense.expense_category.as_str().to_owned(),
            description: expense.description,
            total: expense.total.unwrap_or_default(),
            tax: expense.tax.unwrap_or_default(),
        }
    }
}

/// Parses a record date using the date's own calendar fields.
///
/// Accepts `yyyy-MM-dd`, naive `yyyy-MM-ddTHH:MM:SS[.f]` and RFC 3339
/// timestamps. For an RFC 3339 value the date is taken in the value's
/// own offset, never converted to the viewer's time zone.
#[inline]
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local().date())
        })
}

/// Payload for `POST /income/add_income`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncome {
    /// Date the income was received.
    pub date: NaiveDate,
    /// Income category.
    pub income_category: IncomeCategory,
    /// Optional free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Amount received; must be positive.
    pub total: f64,
    /// Tax withheld.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
}

impl NewIncome {
    /// Creates a payload with no description and no tax.
    #[inline]
    #[must_use]
    pub const fn new(date: NaiveDate, income_category: IncomeCategory, total: f64) -> Self {
        Self {
            date,
            income_category,
            description: None,
            total,
            tax: None,
        }
    }

    /// Checks the amounts before the payload is sent.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::Validation`] if `total` is not a positive
    /// finite number or `tax` is negative or not finite.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        if !(self.total.is_finite() && self.total > 0.0_f64) {
            return Err(FinanceError::Validation(
                "income total must be greater than zero".to_owned(),
            ));
        }
        validate_tax(self.tax)
    }
}

/// Payload for `POST /expense/add_expense`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Date of the purchase.
    pub date: NaiveDate,
    /// Expense category.
    pub expense_category: ExpenseCategory,
    /// Optional free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Amount spent.
    pub total: f64,
    /// Tax paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    /// Receipt created together with the expense.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<NewReceipt>,
}

impl NewExpense {
    /// Creates a payload with no description, tax or receipt.
    #[inline]
    #[must_use]
    pub const fn new(date: NaiveDate, expense_category: ExpenseCategory, total: f64) -> Self {
        Self {
            date,
            expense_category,
            description: None,
            total,
            tax: None,
            receipt: None,
        }
    }

    /// Checks the amounts before the payload is sent.
    ///
    /// A zero total is accepted only when a receipt image is attached.
    ///
    /// # Errors
    ///
    /// Returns [`FinanceError::Validation`] if `total` is negative, not
    /// finite, or zero without a receipt image, or if `tax` is invalid.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        let has_image = self
            .receipt
            .as_ref()
            .is_some_and(|receipt| receipt.receipt_image.is_some());
        if !self.total.is_finite() || self.total < 0.0_f64 {
            return Err(FinanceError::Validation(
                "expense total must be a non-negative number".to_owned(),
            ));
        }
        if self.total <= 0.0_f64 && !has_image {
            return Err(FinanceError::Validation(
                "expense total must be greater than zero unless a receipt image is attached"
                    .to_owned(),
            ));
        }
        validate_tax(self.tax)
    }
}

/// Rejects negative or non-finite tax amounts.
fn validate_tax(tax: Option<f64>) -> Result<()> {
    match tax {
        Some(value) if !value.is_finite() || value < 0.0_f64 => Err(FinanceError::Validation(
            "tax must be a non-negative number".to_owned(),
        )),
        Some(_) | None => Ok(()),
    }
}
