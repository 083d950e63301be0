//! REST endpoint catalogue.
//!
//! Thin wrappers that map each gateway operation to its method and path.

use serde::Serialize;

use crate::client::{MakeCommerceClient, path_segment};
use crate::error::ClientResult;
use crate::filter::TransactionFilter;
use crate::response::ApiResponse;

impl MakeCommerceClient {
    /// Get shop data.
    pub async fn get_shop(&self) -> ClientResult<ApiResponse> {
        self.get("/v1/shop", &[]).await
    }

    /// Get the shop configuration for an e-shop integration.
    ///
    /// `environment` describes the integrating platform (e.g. `platform`, `module`).
    pub async fn get_shop_config(
        &self,
        environment: &[(&str, &str)],
    ) -> ClientResult<ApiResponse> {
        self.get("/v1/shop/configuration", environment).await
    }

    /// Update shop data.
    pub async fn update_shop<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<ApiResponse> {
        self.put("/v1/shop", &[], body).await
    }

    /// Create a transaction.
    pub async fn create_transaction<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        self.post("/v1/transactions", body).await
    }

    /// Append to a transaction's `merchant_data`.
    pub async fn add_transaction_meta<B: Serialize + ?Sized>(
        &self,
        transaction_id: &str,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        let path = format!("/v1/transactions/{}/addMeta", path_segment(transaction_id));
        self.post(&path, body).await
    }

    /// Get transaction details.
    pub async fn get_transaction(&self, transaction_id: &str) -> ClientResult<ApiResponse> {
        let path = format!("/v1/transactions/{}", path_segment(transaction_id));
        self.get(&path, &[]).await
    }

    /// Get a transaction's statement.
    pub async fn get_transaction_statement(
        &self,
        transaction_id: &str,
    ) -> ClientResult<ApiResponse> {
        let path = format!("/v1/transactions/{}/statement", path_segment(transaction_id));
        self.get(&path, &[]).await
    }

    /// List transactions matching `filter`.
    pub async fn get_transactions(&self, filter: &TransactionFilter) -> ClientResult<ApiResponse> {
        let query = filter.to_query();
        let params: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.get("/v1/transactions", &params).await
    }

    /// Create a payment token.
    pub async fn create_token<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<ApiResponse> {
        self.post("/v1/tokens", body).await
    }

    /// Create a payment for a transaction.
    pub async fn create_payment<B: Serialize + ?Sized>(
        &self,
        transaction_id: &str,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        let path = format!("/v1/transactions/{}/payments", path_segment(transaction_id));
        self.post(&path, body).await
    }

    /// Refund a transaction.
    pub async fn create_refund<B: Serialize + ?Sized>(
        &self,
        transaction_id: &str,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        let path = format!("/v1/transactions/{}/refunds", path_segment(transaction_id));
        self.post(&path, body).await
    }

    /// Get refund details.
    pub async fn get_refund(&self, refund_id: &str) -> ClientResult<ApiResponse> {
        let path = format!("/v1/refunds/{}", path_segment(refund_id));
        self.get(&path, &[]).await
    }

    /// List the refunds of one transaction.
    pub async fn get_transaction_refunds(&self, transaction_id: &str) -> ClientResult<ApiResponse> {
        let path = format!("/v1/transactions/{}/refunds", path_segment(transaction_id));
        self.get(&path, &[]).await
    }

    /// List all refunds.
    pub async fn get_refunds(&self) -> ClientResult<ApiResponse> {
        self.get("/v1/refunds", &[]).await
    }

    /// Get the payment methods available for the given parameters.
    pub async fn get_payment_methods(&self, params: &[(&str, &str)]) -> ClientResult<ApiResponse> {
        self.get("/v1/methods", params).await
    }

    /// List carrier destinations (parcel machines) for shipments.
    pub async fn get_destinations<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        self.post("/v1/shipments/destinations", body).await
    }

    /// Register shipments with carriers.
    pub async fn create_shipments<B: Serialize + ?Sized>(
        &self,
        body: &B,
    ) -> ClientResult<ApiResponse> {
        self.post("/v1/shipments", body).await
    }

    /// List parcel label formats.
    pub async fn get_label_formats(&self) -> ClientResult<ApiResponse> {
        self.get("/v1/shipments/labels/formats", &[]).await
    }

    /// Generate parcel labels for registered shipments.
    pub async fn create_labels<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<ApiResponse> {
        self.post("/v1/shipments/createlabels", body).await
    }

    /// Create a shopping cart for simple checkout.
    pub async fn create_cart<B: Serialize + ?Sized>(&self, body: &B) -> ClientResult<ApiResponse> {
        self.post("/v1/carts", body).await
    }
}
