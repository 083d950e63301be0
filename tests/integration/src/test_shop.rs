//! Shop and payment-method integration tests.

#[cfg(test)]
mod tests {
    use crate::{client, test_config};

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_get_shop() {
        let client = client();
        let response = client.get_shop().await.expect("get_shop");

        assert_eq!(response.status_code, 200);
        let body = response.parsed_body.expect("shop body should be JSON");
        assert_eq!(body["id"], test_config().shop_id.as_str());
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_get_shop_config() {
        let client = client();
        let response = client
            .get_shop_config(&[("platform", "rust"), ("module", "makecommerce-rs")])
            .await
            .expect("get_shop_config");

        assert!(response.is_success());
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_list_payment_methods() {
        let client = client();
        let response = client
            .get_payment_methods(&[("currency", "EUR"), ("country", "ee")])
            .await
            .expect("get_payment_methods");

        let body = response.parsed_body.expect("methods body should be JSON");
        assert!(body.is_object(), "methods should be grouped by channel");
    }

    #[tokio::test]
    #[ignore = "requires gateway test credentials"]
    async fn test_should_reject_wrong_secret() {
        let mut config = test_config();
        config.secret_key = "not-the-secret".to_owned();
        let client = makecommerce_client::MakeCommerceClient::from_config(&config)
            .expect("client with wrong secret");

        let err = client.get_shop().await.expect_err("wrong secret should fail");
        assert!(matches!(
            err,
            makecommerce_client::ClientError::Api { status: 401, .. }
        ));
    }
}
