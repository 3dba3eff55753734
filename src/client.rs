//! Hyperwallet Client
//!
//! The main entry point of the crate. One method per API operation:
//! each validates its required arguments, assembles the resource path,
//! delegates to the HTTP transport, and wraps the response in the
//! matching resource type.
//!
//! Listing endpoints come in pairs: `list_*` issues a single request with
//! the caller's query parameters passed straight through, while `get_*`
//! drives [`get_collection`] over the `list_*` operation to return a
//! bounded slice of the whole collection.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{HttpClient, QueryParams};
use crate::pagination::{get_collection, CollectionSlice};
use crate::resource::{
    kind, BankAccount, PaperCheck, Payment, PrepaidCard, Resource, User, Webhook,
};

/// Listing responses carry their items in a `data` array. An absent
/// `data` field is an empty listing, never an error.
#[derive(Debug, Deserialize)]
struct ListBody {
    #[serde(default)]
    data: Vec<Value>,
}

/// Main Hyperwallet API client.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
    program_token: String,
}

impl Client {
    /// Create a new client from a validated configuration.
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::new(&config)?;

        Ok(Self {
            http,
            program_token: config.program_token().to_string(),
        })
    }

    // =========================================================================
    // Generic dispatch helpers
    // =========================================================================

    /// GET a single resource and wrap it.
    async fn retrieve<K: kind::Kind>(&self, segments: &[&str]) -> Result<Resource<K>> {
        let response = self.http.do_get(&join_path(segments), None).await?;
        Ok(Resource::new(response))
    }

    /// GET a listing and wrap each element of its `data` array.
    async fn list<K: kind::Kind>(
        &self,
        segments: &[&str],
        params: Option<&QueryParams>,
    ) -> Result<Vec<Resource<K>>> {
        let response = self.http.do_get(&join_path(segments), params).await?;
        Ok(unwrap_data(response)?.into_iter().map(Resource::new).collect())
    }

    /// POST a payload and wrap the created resource.
    async fn create<K: kind::Kind>(&self, segments: &[&str], data: &Value) -> Result<Resource<K>> {
        let response = self.http.do_post(&join_path(segments), data, None).await?;
        Ok(Resource::new(response))
    }

    /// PUT a payload and wrap the updated resource.
    async fn update<K: kind::Kind>(&self, segments: &[&str], data: &Value) -> Result<Resource<K>> {
        let response = self.http.do_put(&join_path(segments), data).await?;
        Ok(Resource::new(response))
    }

    /// GET a response that has no dedicated resource type.
    async fn raw_get(&self, segments: &[&str], params: Option<&QueryParams>) -> Result<Value> {
        self.http.do_get(&join_path(segments), params).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Get a slice of all Users between the given offset and maximum.
    pub async fn get_users(&self, slice: CollectionSlice) -> Result<Vec<User>> {
        get_collection(slice, |offset, limit| {
            let params = page_params(offset, limit);
            async move { self.list_users(Some(&params)).await }
        })
        .await
    }

    /// List Users.
    pub async fn list_users(&self, params: Option<&QueryParams>) -> Result<Vec<User>> {
        self.list(&["users"], params).await
    }

    /// Create a User. The configured program token is injected into the
    /// payload unless the caller already set one.
    pub async fn create_user(&self, mut data: Value) -> Result<User> {
        payload_object(&data)?;
        inject_program_token(&mut data, &self.program_token);

        self.create(&["users"], &data).await
    }

    /// Retrieve a User.
    pub async fn retrieve_user(&self, user_token: &str) -> Result<User> {
        required("userToken", user_token)?;

        self.retrieve(&["users", user_token]).await
    }

    /// Update a User.
    pub async fn update_user(&self, user_token: &str, data: Value) -> Result<User> {
        required("userToken", user_token)?;
        payload_object(&data)?;

        self.update(&["users", user_token], &data).await
    }

    /// List User Balances. Returned unwrapped.
    pub async fn list_user_balances(
        &self,
        user_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        required("userToken", user_token)?;

        self.raw_get(&["users", user_token, "balances"], params).await
    }

    /// List User Receipts. Returned unwrapped.
    pub async fn list_user_receipts(
        &self,
        user_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        required("userToken", user_token)?;

        self.raw_get(&["users", user_token, "receipts"], params).await
    }

    // =========================================================================
    // Bank Accounts
    // =========================================================================

    /// Get a slice of a User's Bank Accounts between the given offset and
    /// maximum.
    pub async fn get_bank_accounts(
        &self,
        user_token: &str,
        slice: CollectionSlice,
    ) -> Result<Vec<BankAccount>> {
        required("userToken", user_token)?;

        get_collection(slice, |offset, limit| {
            let params = page_params(offset, limit);
            async move { self.list_bank_accounts(user_token, Some(&params)).await }
        })
        .await
    }

    /// List a User's Bank Accounts.
    pub async fn list_bank_accounts(
        &self,
        user_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<BankAccount>> {
        required("userToken", user_token)?;

        self.list(&["users", user_token, "bank-accounts"], params).await
    }

    /// Create a Bank Account for a User.
    pub async fn create_bank_account(&self, user_token: &str, data: Value) -> Result<BankAccount> {
        required("userToken", user_token)?;
        payload_object(&data)?;

        self.create(&["users", user_token, "bank-accounts"], &data).await
    }

    /// Retrieve a Bank Account.
    pub async fn retrieve_bank_account(
        &self,
        user_token: &str,
        bank_account_token: &str,
    ) -> Result<BankAccount> {
        required("userToken", user_token)?;
        required("bankAccountToken", bank_account_token)?;

        self.retrieve(&["users", user_token, "bank-accounts", bank_account_token])
            .await
    }

    /// Update a Bank Account.
    pub async fn update_bank_account(
        &self,
        user_token: &str,
        bank_account_token: &str,
        data: Value,
    ) -> Result<BankAccount> {
        required("userToken", user_token)?;
        required("bankAccountToken", bank_account_token)?;
        payload_object(&data)?;

        self.update(
            &["users", user_token, "bank-accounts", bank_account_token],
            &data,
        )
        .await
    }

    /// Create a Bank Account Status Transition. Returned unwrapped.
    pub async fn create_bank_account_status_transition(
        &self,
        user_token: &str,
        bank_account_token: &str,
        data: Value,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("bankAccountToken", bank_account_token)?;
        payload_object(&data)?;

        self.http
            .do_post(
                &join_path(&[
                    "users",
                    user_token,
                    "bank-accounts",
                    bank_account_token,
                    "status-transitions",
                ]),
                &data,
                None,
            )
            .await
    }

    /// Retrieve a Bank Account Status Transition. Returned unwrapped.
    pub async fn retrieve_bank_account_status_transition(
        &self,
        user_token: &str,
        bank_account_token: &str,
        status_transition_token: &str,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("bankAccountToken", bank_account_token)?;
        required("statusTransitionToken", status_transition_token)?;

        self.raw_get(
            &[
                "users",
                user_token,
                "bank-accounts",
                bank_account_token,
                "status-transitions",
                status_transition_token,
            ],
            None,
        )
        .await
    }

    // =========================================================================
    // Prepaid Cards
    // =========================================================================

    /// Get a slice of a User's Prepaid Cards between the given offset and
    /// maximum.
    pub async fn get_prepaid_cards(
        &self,
        user_token: &str,
        slice: CollectionSlice,
    ) -> Result<Vec<PrepaidCard>> {
        required("userToken", user_token)?;

        get_collection(slice, |offset, limit| {
            let params = page_params(offset, limit);
            async move { self.list_prepaid_cards(user_token, Some(&params)).await }
        })
        .await
    }

    /// List a User's Prepaid Cards.
    pub async fn list_prepaid_cards(
        &self,
        user_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<PrepaidCard>> {
        required("userToken", user_token)?;

        self.list(&["users", user_token, "prepaid-cards"], params).await
    }

    /// Create a Prepaid Card for a User.
    pub async fn create_prepaid_card(&self, user_token: &str, data: Value) -> Result<PrepaidCard> {
        required("userToken", user_token)?;
        payload_object(&data)?;

        self.create(&["users", user_token, "prepaid-cards"], &data).await
    }

    /// Retrieve a Prepaid Card.
    pub async fn retrieve_prepaid_card(
        &self,
        user_token: &str,
        prepaid_card_token: &str,
    ) -> Result<PrepaidCard> {
        required("userToken", user_token)?;
        required("prepaidCardToken", prepaid_card_token)?;

        self.retrieve(&["users", user_token, "prepaid-cards", prepaid_card_token])
            .await
    }

    /// List Status Transitions for a Prepaid Card. Returned unwrapped.
    pub async fn list_prepaid_card_status_transitions(
        &self,
        user_token: &str,
        prepaid_card_token: &str,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("prepaidCardToken", prepaid_card_token)?;

        self.raw_get(
            &[
                "users",
                user_token,
                "prepaid-cards",
                prepaid_card_token,
                "status-transitions",
            ],
            None,
        )
        .await
    }

    /// Create a Prepaid Card Status Transition. Returned unwrapped.
    pub async fn create_prepaid_card_status_transition(
        &self,
        user_token: &str,
        prepaid_card_token: &str,
        data: Value,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("prepaidCardToken", prepaid_card_token)?;
        payload_object(&data)?;

        self.http
            .do_post(
                &join_path(&[
                    "users",
                    user_token,
                    "prepaid-cards",
                    prepaid_card_token,
                    "status-transitions",
                ]),
                &data,
                None,
            )
            .await
    }

    /// Retrieve a Prepaid Card Status Transition. Returned unwrapped.
    pub async fn retrieve_prepaid_card_status_transition(
        &self,
        user_token: &str,
        prepaid_card_token: &str,
        status_transition_token: &str,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("prepaidCardToken", prepaid_card_token)?;
        required("statusTransitionToken", status_transition_token)?;

        self.raw_get(
            &[
                "users",
                user_token,
                "prepaid-cards",
                prepaid_card_token,
                "status-transitions",
                status_transition_token,
            ],
            None,
        )
        .await
    }

    /// List Prepaid Card Balances. Returned unwrapped.
    pub async fn list_prepaid_card_balances(
        &self,
        user_token: &str,
        prepaid_card_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("prepaidCardToken", prepaid_card_token)?;

        self.raw_get(
            &["users", user_token, "prepaid-cards", prepaid_card_token, "balances"],
            params,
        )
        .await
    }

    /// List Prepaid Card Receipts. Returned unwrapped.
    pub async fn list_prepaid_card_receipts(
        &self,
        user_token: &str,
        prepaid_card_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("prepaidCardToken", prepaid_card_token)?;

        self.raw_get(
            &["users", user_token, "prepaid-cards", prepaid_card_token, "receipts"],
            params,
        )
        .await
    }

    // =========================================================================
    // Paper Checks
    // =========================================================================

    /// Get a slice of a User's Paper Checks between the given offset and
    /// maximum.
    pub async fn get_paper_checks(
        &self,
        user_token: &str,
        slice: CollectionSlice,
    ) -> Result<Vec<PaperCheck>> {
        required("userToken", user_token)?;

        get_collection(slice, |offset, limit| {
            let params = page_params(offset, limit);
            async move { self.list_paper_checks(user_token, Some(&params)).await }
        })
        .await
    }

    /// List a User's Paper Checks.
    pub async fn list_paper_checks(
        &self,
        user_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Vec<PaperCheck>> {
        required("userToken", user_token)?;

        self.list(&["users", user_token, "paper-checks"], params).await
    }

    /// Create a Paper Check for a User.
    pub async fn create_paper_check(&self, user_token: &str, data: Value) -> Result<PaperCheck> {
        required("userToken", user_token)?;
        payload_object(&data)?;

        self.create(&["users", user_token, "paper-checks"], &data).await
    }

    /// Retrieve a Paper Check.
    pub async fn retrieve_paper_check(
        &self,
        user_token: &str,
        paper_check_token: &str,
    ) -> Result<PaperCheck> {
        required("userToken", user_token)?;
        required("paperCheckToken", paper_check_token)?;

        self.retrieve(&["users", user_token, "paper-checks", paper_check_token])
            .await
    }

    /// Update a Paper Check.
    pub async fn update_paper_check(
        &self,
        user_token: &str,
        paper_check_token: &str,
        data: Value,
    ) -> Result<PaperCheck> {
        required("userToken", user_token)?;
        required("paperCheckToken", paper_check_token)?;
        payload_object(&data)?;

        self.update(
            &["users", user_token, "paper-checks", paper_check_token],
            &data,
        )
        .await
    }

    /// Create a Paper Check Status Transition. Returned unwrapped.
    pub async fn create_paper_check_status_transition(
        &self,
        user_token: &str,
        paper_check_token: &str,
        data: Value,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("paperCheckToken", paper_check_token)?;
        payload_object(&data)?;

        self.http
            .do_post(
                &join_path(&[
                    "users",
                    user_token,
                    "paper-checks",
                    paper_check_token,
                    "status-transitions",
                ]),
                &data,
                None,
            )
            .await
    }

    /// Retrieve a Paper Check Status Transition. Returned unwrapped.
    pub async fn retrieve_paper_check_status_transition(
        &self,
        user_token: &str,
        paper_check_token: &str,
        status_transition_token: &str,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("paperCheckToken", paper_check_token)?;
        required("statusTransitionToken", status_transition_token)?;

        self.raw_get(
            &[
                "users",
                user_token,
                "paper-checks",
                paper_check_token,
                "status-transitions",
                status_transition_token,
            ],
            None,
        )
        .await
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Get a slice of all Payments between the given offset and maximum.
    pub async fn get_payments(&self, slice: CollectionSlice) -> Result<Vec<Payment>> {
        get_collection(slice, |offset, limit| {
            let params = page_params(offset, limit);
            async move { self.list_payments(Some(&params)).await }
        })
        .await
    }

    /// List Payments.
    pub async fn list_payments(&self, params: Option<&QueryParams>) -> Result<Vec<Payment>> {
        self.list(&["payments"], params).await
    }

    /// Create a Payment. The configured program token is injected into
    /// the payload unless the caller already set one.
    pub async fn create_payment(&self, mut data: Value) -> Result<Payment> {
        payload_object(&data)?;
        inject_program_token(&mut data, &self.program_token);

        self.create(&["payments"], &data).await
    }

    /// Retrieve a Payment.
    pub async fn retrieve_payment(&self, payment_token: &str) -> Result<Payment> {
        required("paymentToken", payment_token)?;

        self.retrieve(&["payments", payment_token]).await
    }

    // =========================================================================
    // Programs and Accounts
    // =========================================================================

    /// Retrieve a Program. Returned unwrapped.
    pub async fn retrieve_program(&self, program_token: &str) -> Result<Value> {
        required("programToken", program_token)?;

        self.raw_get(&["programs", program_token], None).await
    }

    /// Retrieve an Account. Returned unwrapped.
    pub async fn retrieve_account(
        &self,
        program_token: &str,
        account_token: &str,
    ) -> Result<Value> {
        required("programToken", program_token)?;
        required("accountToken", account_token)?;

        self.raw_get(&["programs", program_token, "accounts", account_token], None)
            .await
    }

    /// List Account Balances. Returned unwrapped.
    pub async fn list_account_balances(
        &self,
        program_token: &str,
        account_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        required("programToken", program_token)?;
        required("accountToken", account_token)?;

        self.raw_get(
            &["programs", program_token, "accounts", account_token, "balances"],
            params,
        )
        .await
    }

    /// List Account Receipts. Returned unwrapped.
    pub async fn list_account_receipts(
        &self,
        program_token: &str,
        account_token: &str,
        params: Option<&QueryParams>,
    ) -> Result<Value> {
        required("programToken", program_token)?;
        required("accountToken", account_token)?;

        self.raw_get(
            &["programs", program_token, "accounts", account_token, "receipts"],
            params,
        )
        .await
    }

    // =========================================================================
    // Transfer Methods
    // =========================================================================

    /// List Transfer Method Configurations. Returned unwrapped.
    ///
    /// `userToken` must be present in the params.
    pub async fn list_transfer_method_configurations(
        &self,
        params: &QueryParams,
    ) -> Result<Value> {
        required_param(params, "userToken")?;

        self.raw_get(&["transfer-method-configurations"], Some(params)).await
    }

    /// Retrieve a Transfer Method Configuration. Returned unwrapped.
    ///
    /// `userToken`, `country`, `currency`, `type`, and `profileType` must
    /// all be present in the params.
    pub async fn retrieve_transfer_method_configuration(
        &self,
        params: &QueryParams,
    ) -> Result<Value> {
        for key in ["userToken", "country", "currency", "type", "profileType"] {
            required_param(params, key)?;
        }

        self.raw_get(&["transfer-method-configurations"], Some(params)).await
    }

    /// Create a Transfer Method from a previously staged field set. The
    /// cache token travels as the `Json-Cache-Token` request header.
    /// Returned unwrapped.
    pub async fn create_transfer_method(
        &self,
        user_token: &str,
        cache_token: &str,
        data: &Value,
    ) -> Result<Value> {
        required("userToken", user_token)?;
        required("cacheToken", cache_token)?;

        let cache_header = HeaderValue::from_str(cache_token).map_err(|e| {
            Error::InvalidArgument {
                name: "cacheToken",
                reason: e.to_string(),
            }
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("json-cache-token"), cache_header);

        self.http
            .do_post(
                &join_path(&["users", user_token, "transfer-methods"]),
                data,
                Some(headers),
            )
            .await
    }

    // =========================================================================
    // Webhooks
    // =========================================================================

    /// Get a slice of all Webhook Notifications between the given offset
    /// and maximum.
    pub async fn get_webhooks(&self, slice: CollectionSlice) -> Result<Vec<Webhook>> {
        get_collection(slice, |offset, limit| {
            let params = page_params(offset, limit);
            async move { self.list_webhooks(Some(&params)).await }
        })
        .await
    }

    /// List Webhook Notifications.
    pub async fn list_webhooks(&self, params: Option<&QueryParams>) -> Result<Vec<Webhook>> {
        self.list(&["webhook-notifications"], params).await
    }

    /// Retrieve a Webhook Notification.
    pub async fn retrieve_webhook(&self, webhook_token: &str) -> Result<Webhook> {
        required("webhookToken", webhook_token)?;

        self.retrieve(&["webhook-notifications", webhook_token]).await
    }
}

/// Join path segments with `/`. Segments are inserted verbatim; escaping
/// is the caller's responsibility.
fn join_path(segments: &[&str]) -> String {
    segments.join("/")
}

/// Offset/limit query parameters for one page fetch.
fn page_params(offset: u64, limit: usize) -> QueryParams {
    QueryParams::from([
        ("offset".to_string(), offset.to_string()),
        ("limit".to_string(), limit.to_string()),
    ])
}

/// Check a required identifier is non-empty.
fn required(name: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::MissingArgument(name));
    }
    Ok(())
}

/// Check a required key is present in the query parameters.
fn required_param(params: &QueryParams, name: &'static str) -> Result<()> {
    if !params.contains_key(name) {
        return Err(Error::MissingArgument(name));
    }
    Ok(())
}

/// Check a request payload is a non-empty JSON object.
fn payload_object(data: &Value) -> Result<()> {
    match data {
        Value::Object(map) if !map.is_empty() => Ok(()),
        Value::Object(_) | Value::Null => Err(Error::MissingArgument("data")),
        _ => Err(Error::InvalidArgument {
            name: "data",
            reason: "must be a JSON object".to_string(),
        }),
    }
}

/// Add the program token to a payload that does not already carry one.
/// Keyed on presence, so a caller-supplied token is never overwritten.
fn inject_program_token(data: &mut Value, program_token: &str) {
    if let Value::Object(map) = data {
        map.entry("programToken")
            .or_insert_with(|| Value::String(program_token.to_string()));
    }
}

/// Extract the `data` array from a listing response.
fn unwrap_data(response: Value) -> Result<Vec<Value>> {
    if response.is_null() {
        return Ok(Vec::new());
    }

    let body: ListBody = serde_json::from_value(response)?;
    Ok(body.data)
}
