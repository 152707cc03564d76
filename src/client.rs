//! HTTP client for the finance backend.
//!
//! Provides both async and blocking client variants behind feature flags.
//! Every authenticated call takes the caller's [`crate::session::Session`];
//! a session without a token fails with
//! [`crate::error::FinanceError::MissingToken`] before any request is sent.

/// Default backend address.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Login endpoint path.
const LOGIN_PATH: &str = "/auth/login";
/// Sign-up endpoint path.
const SIGNUP_PATH: &str = "/auth/signup";
/// Current-user endpoint path.
const FETCH_USER_PATH: &str = "/auth/fetch_user";
/// Password change endpoint path.
const CHANGE_PASSWORD_PATH: &str = "/auth/change_password";
/// Email change endpoint path.
const CHANGE_EMAIL_PATH: &str = "/auth/change_email";
/// Display-name change endpoint path.
const CHANGE_NAME_PATH: &str = "/auth/change_name";
/// Income list endpoint path.
const INCOMES_PATH: &str = "/income/get_incomes";
/// Income creation endpoint path.
const ADD_INCOME_PATH: &str = "/income/add_income";
/// Income deletion endpoint prefix; the ID is appended.
const DELETE_INCOME_PATH: &str = "/income/delete_income";
/// Expense list endpoint path.
const EXPENSES_PATH: &str = "/expense/get_expenses";
/// Expense creation endpoint path.
const ADD_EXPENSE_PATH: &str = "/expense/add_expense";
/// Expense deletion endpoint prefix; the ID is appended.
const DELETE_EXPENSE_PATH: &str = "/expense/delete_expense";
/// Receipt list endpoint path.
const RECEIPTS_PATH: &str = "/receipt/get_receipts";
/// Receipt creation endpoint path.
const ADD_RECEIPT_PATH: &str = "/receipt/add_receipt";
/// Receipt deletion endpoint prefix; the ID is appended.
const DELETE_RECEIPT_PATH: &str = "/receipt/delete_receipt";
/// Tax form PDF endpoint path.
const TAX_FORMS_PATH: &str = "/form/generate_tax_forms";

/// Validates a base URL and strips trailing slashes so paths can be
/// appended verbatim.
#[cfg(any(feature = "async", feature = "blocking"))]
fn normalize_base_url(raw: &str) -> crate::error::Result<String> {
    let parsed = url::Url::parse(raw)?;
    Ok(parsed.as_str().trim_end_matches('/').to_owned())
}

/// Generates a finance client (async or blocking) with builder, methods,
/// and tests.
macro_rules! define_client {
    (
        client_name: $client:ident,
        builder_name: $builder:ident,
        http_type: $http_type:ty,
        request_type: $req_type:ty,
        response_type: $resp_type:ty,
        client_doc: $client_doc:expr,
        builder_doc: $builder_doc:expr,
        $(async_kw: $async_kw:tt,)?
        $(await_kw: $await_ext:tt,)?
        $(send_bound: $send_bound:tt,)?
    ) => {
        #[doc = $builder_doc]
        #[derive(Debug, Default)]
        pub struct $builder {
            /// Base URL override.
            base_url: Option<String>,
        }

        impl $builder {
            /// Overrides the backend base URL.
            #[inline]
            #[must_use]
            pub fn base_url<T: Into<String>>(mut self, url: T) -> Self {
                self.base_url = Some(url.into());
                self
            }

            /// Builds the client.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::InvalidUrl`] if the base URL does not parse.
            /// Returns [`FinanceError::Http`] if the HTTP client fails to build.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub fn build(self) -> Result<$client> {
                let base_url = normalize_base_url(
                    self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
                )?;
                tracing::debug!(base_url = %base_url, "building client");
                let http = <$http_type>::builder().build()?;

                Ok($client { http, base_url })
            }
        }

        #[doc = $client_doc]
        #[derive(Debug, Clone)]
        pub struct $client {
            /// Underlying HTTP client.
            http: $http_type,
            /// API base URL without a trailing slash.
            base_url: String,
        }

        impl $client {
            /// Creates a new builder for configuring the client.
            #[inline]
            #[must_use]
            pub const fn builder() -> $builder {
                $builder { base_url: None }
            }

            /// Returns the base URL requests are sent to.
            #[inline]
            #[must_use]
            pub fn base_url(&self) -> &str {
                &self.base_url
            }

            /// Exchanges credentials for a bearer token via `/auth/login`.
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails, the backend rejects
            /// the credentials, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn login(&self, credentials: &Credentials) -> Result<AccessToken> {
                tracing::debug!("calling login endpoint");
                let request = self.http.post(self.url(LOGIN_PATH)).json(credentials);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Registers a new user via `/auth/signup`.
            ///
            /// # Errors
            ///
            /// Returns an error if the request fails, the email is already
            /// registered, or the response cannot be deserialized.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn signup(&self, request: &SignUp) -> Result<User> {
                tracing::debug!("calling signup endpoint");
                let request = self.http.post(self.url(SIGNUP_PATH)).json(request);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Fetches the profile of the session's user.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP, status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn fetch_user(&self, session: &Session) -> Result<User> {
                let request = self
                    .http
                    .get(self.url(FETCH_USER_PATH))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Replaces the password of the session's user.
            ///
            /// The current token stays valid.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP, status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn change_password(
                &self,
                session: &Session,
                change: &ChangePassword,
            ) -> Result<User> {
                let request = self
                    .http
                    .post(self.url(CHANGE_PASSWORD_PATH))
                    .header(AUTHORIZATION, session.bearer()?)
                    .json(change);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Replaces the login email of the session's user.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP, status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn change_email(
                &self,
                session: &Session,
                change: &ChangeEmail,
            ) -> Result<User> {
                let request = self
                    .http
                    .post(self.url(CHANGE_EMAIL_PATH))
                    .header(AUTHORIZATION, session.bearer()?)
                    .json(change);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Replaces the display name of the session's user.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP, status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn change_name(
                &self,
                session: &Session,
                change: &ChangeName,
            ) -> Result<User> {
                let request = self
                    .http
                    .post(self.url(CHANGE_NAME_PATH))
                    .header(AUTHORIZATION, session.bearer()?)
                    .json(change);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Fetches the complete income list of the session's user.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without contacting the
            /// backend if the session has no token; otherwise any HTTP,
            /// status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn incomes(&self, session: &Session) -> Result<Vec<Income>> {
                let request = self
                    .http
                    .get(self.url(INCOMES_PATH))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Fetches the complete expense list of the session's user.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without contacting the
            /// backend if the session has no token; otherwise any HTTP,
            /// status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn expenses(&self, session: &Session) -> Result<Vec<Expense>> {
                let request = self
                    .http
                    .get(self.url(EXPENSES_PATH))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Validates and creates an income record.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::Validation`] for invalid amounts,
            /// [`FinanceError::MissingToken`] without a token, or any HTTP,
            /// status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn add_income(
                &self,
                session: &Session,
                income: &NewIncome,
            ) -> Result<Income> {
                income.validate()?;
                let request = self
                    .http
                    .post(self.url(ADD_INCOME_PATH))
                    .header(AUTHORIZATION, session.bearer()?)
                    .json(income);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Validates and creates an expense record, with its receipt if
            /// one is attached.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::Validation`] for invalid amounts,
            /// [`FinanceError::MissingToken`] without a token, or any HTTP,
            /// status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn add_expense(
                &self,
                session: &Session,
                expense: &NewExpense,
            ) -> Result<Expense> {
                expense.validate()?;
                let request = self
                    .http
                    .post(self.url(ADD_EXPENSE_PATH))
                    .header(AUTHORIZATION, session.bearer()?)
                    .json(expense);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Deletes an income record.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::Api`] with status 404 if the record
            /// does not exist, [`FinanceError::MissingToken`] without a
            /// token, or any HTTP or decoding error.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_income(
                &self,
                session: &Session,
                id: IncomeId,
            ) -> Result<Detail> {
                let request = self
                    .http
                    .delete(self.url(&format!("{DELETE_INCOME_PATH}/{id}")))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Deletes an expense record and its receipt.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::Api`] with status 404 if the record
            /// does not exist, [`FinanceError::MissingToken`] without a
            /// token, or any HTTP or decoding error.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_expense(
                &self,
                session: &Session,
                id: ExpenseId,
            ) -> Result<Detail> {
                let request = self
                    .http
                    .delete(self.url(&format!("{DELETE_EXPENSE_PATH}/{id}")))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Fetches all stored receipts of the session's user.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP, status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn receipts(&self, session: &Session) -> Result<Vec<Receipt>> {
                let request = self
                    .http
                    .get(self.url(RECEIPTS_PATH))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Stores a receipt, usually for an existing expense.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP, status or decoding error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn add_receipt(
                &self,
                session: &Session,
                receipt: &NewReceipt,
            ) -> Result<Receipt> {
                let request = self
                    .http
                    .post(self.url(ADD_RECEIPT_PATH))
                    .header(AUTHORIZATION, session.bearer()?)
                    .json(receipt);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Deletes a receipt.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::Api`] with status 404 if the receipt
            /// does not exist, [`FinanceError::MissingToken`] without a
            /// token, or any HTTP or decoding error.
            #[inline]
            #[tracing::instrument(skip_all, fields(id = %id))]
            pub $($async_kw)? fn delete_receipt(
                &self,
                session: &Session,
                id: ReceiptId,
            ) -> Result<Detail> {
                let request = self
                    .http
                    .delete(self.url(&format!("{DELETE_RECEIPT_PATH}/{id}")))
                    .header(AUTHORIZATION, session.bearer()?);
                Self::send_json(request) $( .$await_ext )?
            }

            /// Asks the backend to fill in the tax forms and returns the
            /// rendered PDF.
            ///
            /// # Errors
            ///
            /// Returns [`FinanceError::MissingToken`] without a token, or any
            /// HTTP or status error.
            #[inline]
            #[tracing::instrument(skip_all)]
            pub $($async_kw)? fn tax_forms(&self, session: &Session) -> Result<Vec<u8>> {
                let request = self
                    .http
                    .get(self.url(TAX_FORMS_PATH))
                    .header(AUTHORIZATION, session.bearer()?);
                let response = request.send() $( .$await_ext )? ?;
                let checked = Self::check_status(response) $( .$await_ext )? ?;
                let bytes = checked.bytes() $( .$await_ext )? ?;
                tracing::debug!(len = bytes.len(), "received tax form PDF");
                Ok(bytes.to_vec())
            }

            /// Joins a path onto the base URL.
            fn url(&self, path: &str) -> String {
                format!("{}{path}", self.base_url)
            }

            /// Sends a request and deserializes a successful JSON body.
            $($async_kw)? fn send_json<Resp: serde::de::DeserializeOwned $(+ $send_bound)?>(
                request: $req_type,
            ) -> Result<Resp> {
                let response = request.send() $( .$await_ext )? ?;
                let checked = Self::check_status(response) $( .$await_ext )? ?;
                let body = checked.text() $( .$await_ext )? ?;
                tracing::trace!(body_len = body.len(), "parsing response body");
                serde_json::from_str(&body).map_err(FinanceError::from)
            }

            /// Passes a success response through; converts anything else
            /// into [`FinanceError::Api`], unwrapping a `{"detail": ...}`
            /// body when present.
            $($async_kw)? fn check_status(response: $resp_type) -> Result<$resp_type> {
                let status = response.status();
                tracing::debug!(status = %status, "received response");
                if status.is_success() {
                    return Ok(response);
                }
                let body = response
                    .text()
                    $( .$await_ext )?
                    .unwrap_or_else(|_| "unknown error".to_owned());
                let message = serde_json::from_str::<Detail>(&body)
                    .map_or(body, |detail| detail.detail);
                tracing::debug!(status = status.as_u16(), message = %message, "API error");
                Err(FinanceError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }

    };
}

#[cfg(feature = "async")]
mod async_client {
    //! Async HTTP client for the finance backend.

    use reqwest::header::AUTHORIZATION;

    use super::{
        ADD_EXPENSE_PATH, ADD_INCOME_PATH, ADD_RECEIPT_PATH, CHANGE_EMAIL_PATH, CHANGE_NAME_PATH,
        CHANGE_PASSWORD_PATH, DEFAULT_BASE_URL, DELETE_EXPENSE_PATH, DELETE_INCOME_PATH,
        DELETE_RECEIPT_PATH, EXPENSES_PATH, FETCH_USER_PATH, INCOMES_PATH, LOGIN_PATH,
        RECEIPTS_PATH, SIGNUP_PATH, TAX_FORMS_PATH, normalize_base_url,
    };
    use crate::error::{FinanceError, Result};
    use crate::models::{
        AccessToken, ChangeEmail, ChangeName, ChangePassword, Credentials, Detail, Expense,
        ExpenseId, Income, IncomeId, NewExpense, NewIncome, NewReceipt, Receipt, ReceiptId, SignUp,
        User,
    };
    use crate::session::Session;

    define_client! {
        client_name: FinanceClient,
        builder_name: FinanceClientBuilder,
        http_type: reqwest::Client,
        request_type: reqwest::RequestBuilder,
        response_type: reqwest::Response,
        client_doc: "Async client for the finance backend.\n\n\
            Use [`FinanceClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FinanceClient`].",
        async_kw: async,
        await_kw: await,
        send_bound: Send,
    }
}

#[cfg(feature = "blocking")]
mod blocking_client {
    //! Blocking (synchronous) HTTP client for the finance backend.

    use reqwest::header::AUTHORIZATION;

    use super::{
        ADD_EXPENSE_PATH, ADD_INCOME_PATH, ADD_RECEIPT_PATH, CHANGE_EMAIL_PATH, CHANGE_NAME_PATH,
        CHANGE_PASSWORD_PATH, DEFAULT_BASE_URL, DELETE_EXPENSE_PATH, DELETE_INCOME_PATH,
        DELETE_RECEIPT_PATH, EXPENSES_PATH, FETCH_USER_PATH, INCOMES_PATH, LOGIN_PATH,
        RECEIPTS_PATH, SIGNUP_PATH, TAX_FORMS_PATH, normalize_base_url,
    };
    use crate::error::{FinanceError, Result};
    use crate::models::{
        AccessToken, ChangeEmail, ChangeName, ChangePassword, Credentials, Detail, Expense,
        ExpenseId, Income, IncomeId, NewExpense, NewIncome, NewReceipt, Receipt, ReceiptId, SignUp,
        User,
    };
    use crate::session::Session;

    define_client! {
        client_name: FinanceBlockingClient,
        builder_name: FinanceBlockingClientBuilder,
        http_type: reqwest::blocking::Client,
        request_type: reqwest::blocking::RequestBuilder,
        response_type: reqwest::blocking::Response,
        client_doc: "Blocking (synchronous) client for the finance backend.\n\n\
            Use [`FinanceBlockingClient::builder()`] to construct an instance.",
        builder_doc: "Builder for constructing a [`FinanceBlockingClient`].",
    }
}

#[cfg(feature = "async")]
pub use async_client::{FinanceClient, FinanceClientBuilder};
#[cfg(feature = "blocking")]
pub use blocking_client::{FinanceBlockingClient, FinanceBlockingClientBuilder};
