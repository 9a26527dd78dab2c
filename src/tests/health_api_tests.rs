#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::tests::common::{empty_request, test_app};

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app().await;
        let response = app.router.clone().oneshot(empty_request(Method::GET, "/healthz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_readyz_with_database() {
        let app = test_app().await;
        let response = app.router.clone().oneshot(empty_request(Method::GET, "/readyz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readyz_after_pool_closed() {
        let app = test_app().await;
        app.state.db.close().await;
        let response = app.router.clone().oneshot(empty_request(Method::GET, "/readyz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_version() {
        let app = test_app().await;
        let (status, body) = app.send(empty_request(Method::GET, "/version", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "vitrine");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let app = test_app().await;
        let response = app.router.clone().oneshot(empty_request(Method::GET, "/healthz", None)).await.unwrap();
        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert!(headers.get("x-frame-options").is_some());
    }
}
