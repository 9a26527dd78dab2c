#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::error::{validation, AppError, OptionExt};

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::validation("price", "bad"), StatusCode::BAD_REQUEST),
            (AppError::DuplicateUsername, StatusCode::BAD_REQUEST),
            (AppError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (AppError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AppError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AppError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AppError::NotFound("Product".into()), StatusCode::NOT_FOUND),
            (AppError::PayloadTooLarge { max_bytes: 10 }, StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::Database("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(error.status(), status, "{error:?}");
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(AppError::NotFound("Service".into()).to_string(), "Service not found");
        assert_eq!(AppError::Unauthenticated.to_string(), "No token provided");
        assert_eq!(AppError::InvalidToken.to_string(), "Invalid token");
    }

    #[tokio::test]
    async fn test_client_error_body() {
        let (status, body) = body_of(AppError::DuplicateUsername).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Username is already taken");
        assert_eq!(body["code"], "DUPLICATE_USERNAME");
        assert_eq!(body["status"], 400);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_of(AppError::Database("no such table: secrets".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "DATABASE_ERROR");
        assert!(!body["error"].as_str().unwrap().contains("secrets"));
        assert!(body["error_id"].is_string());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_option_ext() {
        let found: Option<i32> = Some(1);
        assert_eq!(found.ok_or_not_found("Product").unwrap(), 1);
        let missing: Option<i32> = None;
        assert!(matches!(missing.ok_or_not_found("Product"), Err(AppError::NotFound(ref e)) if e == "Product"));
    }

    #[test]
    fn test_validation_helpers() {
        assert!(validation::require_non_empty("Widget", "name").is_ok());
        assert!(validation::require_non_empty("   ", "name").is_err());

        assert!(validation::validate_price(0.0).is_ok());
        assert!(validation::validate_price(9.99).is_ok());
        assert!(validation::validate_price(-1.0).is_err());
        assert!(validation::validate_price(f64::NAN).is_err());

        assert!(validation::validate_range(None, -90.0, 90.0, "latitude").is_ok());
        assert!(validation::validate_range(Some(52.5), -90.0, 90.0, "latitude").is_ok());
        assert!(validation::validate_range(Some(91.0), -90.0, 90.0, "latitude").is_err());

        assert!(validation::max_len("abc", 3, "name").is_ok());
        assert!(validation::max_len("  abc  ", 3, "name").is_ok());
        assert!(validation::max_len("abcd", 3, "name").is_err());
        assert!(validation::max_len(&"ä".repeat(255), validation::MAX_TEXT_LEN, "name").is_ok());

        assert!(validation::validate_email("a@b.de").is_ok());
        assert!(validation::validate_email("ab.de").is_err());
        assert!(validation::validate_email("a@b@c").is_err());
    }
}
