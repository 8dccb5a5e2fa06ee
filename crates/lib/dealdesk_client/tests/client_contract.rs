//! Request pipeline and unauthorized-teardown behavior against a live
//! in-process server.

mod common;

use common::{MockApi, client, log_in, stores};
use dealdesk_client::{
    ApiError, ApiRequest, FilePart, MultipartForm, ProductList, SessionEvent, Storage,
};
use dealdesk_client::api::ProductBody;
use serde_json::{Value, json};

fn empty_page() -> Value {
    json!({"count": 0, "next": null, "previous": null, "results": []})
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let api = MockApi::start().await;
    api.on("GET", "/admin/products-pending/list/", 200, empty_page());
    let stores = stores();
    let client = client(&api, &stores);

    client
        .products()
        .list(ProductList::Pending, 1)
        .await
        .unwrap();

    let req = api.last();
    assert!(req.header("authorization").is_none());
    assert_eq!(req.query.as_deref(), Some("page=1"));
}

#[tokio::test]
async fn token_is_sent_as_bearer() {
    let api = MockApi::start().await;
    api.on("GET", "/admin/dashboard/stats/", 200, json!({"total_users": 3}));
    let stores = stores();
    log_in(&stores, "tok-123");
    let client = client(&api, &stores);

    let stats = client.dashboard().stats().await.unwrap();

    assert_eq!(stats["total_users"], 3);
    let req = api.last();
    assert_eq!(req.header("authorization"), Some("Bearer tok-123"));
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn unauthorized_clears_session_and_publishes_expiry() {
    let api = MockApi::start().await;
    api.on("GET", "/admin/users/list/", 401, json!({"detail": "Token expired"}));
    let stores = stores();
    log_in(&stores, "stale");
    let client = client(&api, &stores);
    let mut events = client.events().subscribe();

    let err = client.users().list(1, None).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(err.is_unauthorized());
    assert!(stores.durable.get("access_token").is_none());
    assert!(stores.durable.get("refresh_token").is_none());
    assert!(stores.durable.get("user").is_none());
    assert!(!stores.session.has_session_cookie());
    assert!(client.get_access_token().is_none());
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Expired {
            redirect_to: "/auth/login"
        }
    );
}

#[tokio::test]
async fn unauthorized_with_html_body_still_clears_session() {
    let api = MockApi::start().await;
    api.on_raw(
        "GET",
        "/admin/dashboard/stats/",
        401,
        "<html><body>401 Authorization Required</body></html>",
    );
    let stores = stores();
    log_in(&stores, "stale");
    let client = client(&api, &stores);
    let mut events = client.events().subscribe();

    let err = client.dashboard().stats().await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(stores.durable.is_empty());
    assert!(!stores.session.has_session_cookie());
    assert!(client.get_access_token().is_none());
    assert_eq!(events.recv().await.unwrap(), SessionEvent::expired());
}

#[tokio::test]
async fn concurrent_unauthorized_replies_are_harmless() {
    let api = MockApi::start().await;
    api.on("GET", "/admin/dashboard/stats/", 401, json!({}));
    api.on("GET", "/admin/recent-activity/", 401, json!({}));
    let stores = stores();
    log_in(&stores, "stale");
    let client = client(&api, &stores);

    let dashboard = client.dashboard();
    let (a, b) = tokio::join!(dashboard.stats(), dashboard.recent_activity());

    assert!(matches!(a, Err(ApiError::Unauthorized)));
    assert!(matches!(b, Err(ApiError::Unauthorized)));
    assert!(stores.durable.is_empty());
}

#[tokio::test]
async fn validation_errors_keep_the_body() {
    let api = MockApi::start().await;
    let body = json!({
        "name": ["This field is required."],
        "discount_price": ["Must be less than the original price.", "Must be positive."]
    });
    api.on("PATCH", "/admin/product/9/update/", 400, body.clone());
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    let err = client
        .products()
        .update(9, ProductBody::Json(json!({"name": ""})))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.body(), Some(&body));
    match &err {
        ApiError::ValidationFailed { errors, .. } => {
            assert_eq!(errors.len(), 2);
            assert_eq!(
                errors.get("discount_price").unwrap(),
                ["Must be less than the original price.", "Must be positive."]
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    // A 400 is not an expired session.
    assert_eq!(stores.session.access_token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn server_error_carries_message() {
    let api = MockApi::start().await;
    api.on(
        "POST",
        "/admin/user/suspend/",
        500,
        json!({"message": "database unavailable"}),
    );
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    let err = client.users().suspend(4).await.unwrap_err();

    match err {
        ApiError::RequestFailed {
            status, message, ..
        } => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected request failure, got {other:?}"),
    }
    assert_eq!(api.last().json(), json!({"user_id": 4}));
}

#[tokio::test]
async fn multipart_body_gets_boundary_content_type() {
    let api = MockApi::start().await;
    api.on("POST", "/admin/product/online-create/", 201, json!({"id": 12}));
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    let form = MultipartForm::new()
        .text("name", "Bath Soap")
        .file(FilePart {
            field: "product_image".into(),
            file_name: "soap.png".into(),
            mime: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        });
    let created = client
        .products()
        .create_online(ProductBody::Multipart(form))
        .await
        .unwrap();

    assert_eq!(created["id"], 12);
    let req = api.last();
    let content_type = req.header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(content_type.contains("boundary="));
    assert_eq!(req.header("authorization"), Some("Bearer tok"));
    let body = String::from_utf8_lossy(&req.body);
    assert!(body.contains("Bath Soap"));
    assert!(body.contains("filename=\"soap.png\""));
}

#[tokio::test]
async fn multipart_update_uses_patch_with_boundary() {
    let api = MockApi::start().await;
    api.on("PATCH", "/admin/product/9/update/", 200, json!({"id": 9}));
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    let form = MultipartForm::new()
        .text("name", "Bath Soap")
        .text("discount_price", "7")
        .file(FilePart {
            field: "product_image".into(),
            file_name: "soap.jpg".into(),
            mime: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8, 0xff],
        });
    client
        .products()
        .update(9, ProductBody::Multipart(form))
        .await
        .unwrap();

    let req = api.last();
    assert_eq!(req.method, "PATCH");
    assert_eq!(req.path, "/api/admin/product/9/update/");
    let content_type = req.header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    assert!(content_type.contains("boundary="));
    assert!(!content_type.contains("application/json"));
    assert_eq!(req.headers.get_all("content-type").iter().count(), 1);
    assert_eq!(req.header("authorization"), Some("Bearer tok"));
}

#[tokio::test]
async fn empty_success_body_reads_as_null() {
    let api = MockApi::start().await;
    api.on_raw("DELETE", "/admin/product/3/update/", 204, "");
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    let reply = client.products().delete(3).await.unwrap();

    assert_eq!(reply, Value::Null);
    assert_eq!(api.last().method, "DELETE");
}

#[tokio::test]
async fn user_search_adds_email_only_when_given() {
    let api = MockApi::start().await;
    api.on("GET", "/admin/users/list/", 200, empty_page());
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    client.users().list(2, Some("a@b.com")).await.unwrap();
    client.users().list(1, Some("")).await.unwrap();

    let requests = api.requests();
    assert_eq!(requests[0].query.as_deref(), Some("page=2&email=a%40b.com"));
    assert_eq!(requests[1].query.as_deref(), Some("page=1"));
}

#[tokio::test]
async fn approve_and_reject_use_patch() {
    let api = MockApi::start().await;
    api.on("PATCH", "/admin/product/5/approve/", 200, json!({"ok": true}));
    api.on("PATCH", "/admin/product/5/reject/", 200, json!({"ok": true}));
    let stores = stores();
    log_in(&stores, "tok");
    let client = client(&api, &stores);

    client.products().approve(5).await.unwrap();
    client.products().reject(5).await.unwrap();

    let paths: Vec<_> = api
        .requests()
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        [
            "PATCH /api/admin/product/5/approve/",
            "PATCH /api/admin/product/5/reject/"
        ]
    );
}

#[tokio::test]
async fn category_list_accepts_page_or_array() {
    let api = MockApi::start().await;
    api.on(
        "GET",
        "/category/list/",
        200,
        json!({"count": 1, "results": [{"id": 1, "name": "Home"}]}),
    );
    let stores = stores();
    let client = client(&api, &stores);

    let categories = client.catalog().categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Home");

    api.on("GET", "/category/list/", 200, json!([{"id": 2, "name": "Garden"}]));
    let categories = client.catalog().categories().await.unwrap();
    assert_eq!(categories[0].id, 2);
}

#[tokio::test]
async fn raw_request_builder_hits_the_api_prefix() {
    let api = MockApi::start().await;
    api.on("GET", "/admin/dashboard/quick-stats/", 200, json!({"pending": 4}));
    let stores = stores();
    let client = client(&api, &stores);

    let value: Value = client
        .request(ApiRequest::get("/admin/dashboard/quick-stats/"))
        .await
        .unwrap();

    assert_eq!(value["pending"], 4);
    assert_eq!(api.last().path, "/api/admin/dashboard/quick-stats/");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let stores = stores();
    let config = dealdesk_client::ClientConfig::parse("http://127.0.0.1:1/api").unwrap();
    let client = dealdesk_client::ApiClient::new(config, stores.session.clone()).unwrap();
    log_in(&stores, "tok");

    let err = client.dashboard().stats().await.unwrap_err();

    assert!(matches!(err, ApiError::RequestFailed { status: None, .. }));
    assert_eq!(stores.session.access_token().as_deref(), Some("tok"));
}
