//! Receipt metadata stored alongside expenses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{ExpenseId, ReceiptId};

/// A stored receipt as returned by `GET /receipt/get_receipts`.
///
/// Image text extraction happens on the backend; the client only sees the
/// resulting vendor and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier.
    pub id: ReceiptId,
    /// Expense the receipt belongs to.
    #[serde(default)]
    pub expense_id: Option<ExpenseId>,
    /// Encoded image or image reference.
    #[serde(default)]
    pub receipt_image: Option<String>,
    /// Upload date.
    #[serde(default)]
    pub date_uploaded: Option<NaiveDate>,
    /// Vendor name extracted from the image.
    #[serde(default)]
    pub vendor_name: Option<String>,
    /// Amount extracted from the image.
    #[serde(default)]
    pub total_amount: Option<f64>,
}

/// Payload for `POST /receipt/add_receipt`, also embedded in a
/// [`super::NewExpense`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewReceipt {
    /// Expense to attach the receipt to. Left empty when the receipt is
    /// created together with its expense.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_id: Option<ExpenseId>,
    /// Encoded image or image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_image: Option<String>,
    /// Upload date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_uploaded: Option<NaiveDate>,
    /// Vendor name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    /// Receipt total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}
