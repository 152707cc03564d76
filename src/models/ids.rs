//! Newtype wrappers for backend record identifiers.
//!
//! Income, expense and receipt IDs are all plain integers on the wire;
//! wrapping them keeps a `delete_income` call from being handed an
//! expense ID.

use serde::{Deserialize, Serialize};

/// Defines an integer-backed identifier newtype.
macro_rules! define_record_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from the given value.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw integer value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_record_id! {
    /// Identifier of an income record.
    IncomeId
}

define_record_id! {
    /// Identifier of an expense record.
    ExpenseId
}

define_record_id! {
    /// Identifier of a stored receipt.
    ReceiptId
}

define_record_id! {
    /// Identifier of a registered user.
    UserId
}
