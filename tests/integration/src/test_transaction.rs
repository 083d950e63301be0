//! Transaction, refund and cart integration tests.

#[cfg(test)]
mod tests {
    use makecommerce_client::TransactionFilter;
    use serde_json::json;

    use crate::{client, create_test_transaction, test_reference};

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_create_and_get_transaction() {
        let client = client();
        let id = create_test_transaction(&client, "get").await;

        let response = client.get_transaction(&id).await.expect("get_transaction");
        let body = response.parsed_body.expect("transaction body should be JSON");
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["status"], "CREATED");
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_add_meta_and_get_statement() {
        let client = client();
        let id = create_test_transaction(&client, "meta").await;

        client
            .add_transaction_meta(&id, &json!({"merchant_data": "integration"}))
            .await
            .expect("add_transaction_meta");
        let statement = client
            .get_transaction_statement(&id)
            .await
            .expect("get_transaction_statement");
        assert!(statement.is_success());
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_list_transactions_with_filter() {
        let client = client();
        create_test_transaction(&client, "list").await;

        let filter = TransactionFilter::builder()
            .status(vec!["CREATED".into()])
            .per_page(Some(5))
            .build();
        let response = client.get_transactions(&filter).await.expect("get_transactions");
        let body = response.parsed_body.expect("list body should be JSON");
        assert!(body.is_array());
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_list_refunds_of_new_transaction() {
        let client = client();
        let id = create_test_transaction(&client, "refunds").await;

        let response = client
            .get_transaction_refunds(&id)
            .await
            .expect("get_transaction_refunds");
        assert!(response.is_success());
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_create_cart() {
        let client = client();
        let reference = test_reference("cart");
        let response = client
            .create_cart(&json!({
                "transaction": {"amount": "2.50", "currency": "EUR", "reference": reference},
                "customer": {"email": "integration@example.com", "ip": "127.0.0.1", "country": "ee", "locale": "et"},
                "products": [{"name": "Sample", "price": "2.50", "quantity": 1}],
            }))
            .await
            .expect("create_cart");
        assert!(response.is_success());
    }
}
