//! Ordering endpoints: catalogue, pricing and order submission.

use crate::clients::{ApiResponse, Arguments, ClientError, ThgHostingClient};

impl ThgHostingClient {
    /// Returns current platform status updates.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_status_updates(&self) -> Result<ApiResponse, ClientError> {
        self.get("status-updates", Arguments::new()).await
    }

    /// Lists the datacenters products can be ordered in.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_datacenters(&self) -> Result<ApiResponse, ClientError> {
        self.get("orders/locations", Arguments::new()).await
    }

    /// Lists product categories.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_product_categories(&self) -> Result<ApiResponse, ClientError> {
        self.get("orders/categories", Arguments::new()).await
    }

    /// Lists the products of a category in a location.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_products_in_category(
        &self,
        location_id: u64,
        category_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("orders/locations/{location_id}/categories/{category_id}/products"),
            Arguments::new(),
        )
        .await
    }

    /// Returns one product of a category in a location.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_product_details(
        &self,
        location_id: u64,
        category_id: u64,
        product_id: u64,
    ) -> Result<ApiResponse, ClientError> {
        self.get(
            &format!("orders/locations/{location_id}/categories/{category_id}/products/{product_id}"),
            Arguments::new(),
        )
        .await
    }

    /// Prices an order including tax. `body` is sent as is.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_calculated_price_with_tax(&self, body: Arguments) -> Result<ApiResponse, ClientError> {
        self.post("orders/tax", body).await
    }

    /// Lists the payment methods available for orders.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn get_payment_methods(&self) -> Result<ApiResponse, ClientError> {
        self.get("orders/payment-methods", Arguments::new()).await
    }

    /// Places an order. `body` is sent as is.
    ///
    /// # Errors
    ///
    /// See [`ThgHostingClient::request`].
    pub async fn submit_order_for_processing(&self, body: Arguments) -> Result<ApiResponse, ClientError> {
        self.post("orders", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{last, mock_client, url};
    use crate::clients::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_catalogue_paths() {
        let (client, handle) = mock_client();

        client.get_products_in_category(2, 7).await.unwrap();
        assert_eq!(
            last(&handle).url(),
            Some(url("orders/locations/2/categories/7/products/").as_str())
        );

        client.get_product_details(2, 7, 31).await.unwrap();
        assert_eq!(
            last(&handle).url(),
            Some(url("orders/locations/2/categories/7/products/31/").as_str())
        );
    }

    #[tokio::test]
    async fn test_submit_order_posts_body() {
        let (client, handle) = mock_client();
        let mut body = Arguments::new();
        body.insert("products".to_string(), json!([{"id": 31, "quantity": 1}]));
        body.insert("payment_method".to_string(), json!("card"));

        client.submit_order_for_processing(body).await.unwrap();

        let exchange = last(&handle);
        assert_eq!(exchange.method(), Some(HttpMethod::Post));
        assert_eq!(exchange.url(), Some(url("orders/").as_str()));
        assert_eq!(
            exchange.json_body(),
            Some(json!({"products": [{"id": 31, "quantity": 1}], "payment_method": "card"}))
        );
    }

    #[tokio::test]
    async fn test_tax_calculation_path() {
        let (client, handle) = mock_client();
        client.get_calculated_price_with_tax(Arguments::new()).await.unwrap();
        assert_eq!(last(&handle).url(), Some(url("orders/tax/").as_str()));
    }
}
