//! Shipment integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client;

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_list_label_formats() {
        let client = client();
        let response = client.get_label_formats().await.expect("get_label_formats");
        assert!(response.is_success());
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_list_destinations() {
        let client = client();
        let response = client
            .get_destinations(&json!({"carriers": ["OMNIVA"], "countries": ["ee"]}))
            .await
            .expect("get_destinations");
        let body = response.parsed_body.expect("destinations body should be JSON");
        assert!(body.is_array());
    }
}
