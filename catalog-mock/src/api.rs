use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use shared::{ProductPayload, routes};
use std::sync::Arc;

/// Injected failure, if one is armed
fn injected(state: &AppState) -> Option<Response> {
    state.product_store.take_failure().map(|status| {
        tracing::warn!("Injected failure: {}", status);
        (
            status,
            Json(serde_json::json!({ "success": false, "error": "injected failure" })),
        )
            .into_response()
    })
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": format!("Product {} not found", id)
        })),
    )
        .into_response()
}

async fn list_products(State(state): State<Arc<AppState>>) -> Response {
    state.product_store.record("GET", routes::LIST_PRODUCTS);
    if let Some(resp) = injected(&state) {
        return resp;
    }
    Json(state.product_store.list().await).into_response()
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProductPayload>,
) -> Response {
    state.product_store.record("POST", routes::CREATE_PRODUCT);
    if let Some(resp) = injected(&state) {
        return resp;
    }
    Json(state.product_store.insert(payload).await).into_response()
}

async fn edit_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Response {
    state.product_store.record("PUT", &routes::edit_product(&id));
    if let Some(resp) = injected(&state) {
        return resp;
    }
    match state.product_store.replace(&id, payload).await {
        Some(product) => Json(product).into_response(),
        None => not_found(&id),
    }
}

async fn delete_product(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    state.product_store.record("DELETE", &routes::delete_product(&id));
    if let Some(resp) = injected(&state) {
        return resp;
    }
    match state.product_store.remove(&id).await {
        Some(_) => Json(serde_json::json!({ "success": true, "deleted": id })).into_response(),
        None => not_found(&id),
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    use tower::limit::ConcurrencyLimitLayer;

    let concurrency_limit = ConcurrencyLimitLayer::new(100);

    Router::new()
        .route(routes::LIST_PRODUCTS, get(list_products))
        .route(routes::CREATE_PRODUCT, post(create_product))
        .route(routes::EDIT_PRODUCT, put(edit_product))
        .route(routes::DELETE_PRODUCT, delete(delete_product))
        .layer(concurrency_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProductStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::new(ProductStore::new()));
        (state.clone(), router(state))
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_list_edit_delete() {
        let (state, app) = app();

        let resp = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/post-product",
                serde_json::json!({"name": "Pen", "price": "10", "description": "Blue pen"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let created = body_json(resp).await;
        let id = created["id"].as_str().unwrap().to_string();

        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/edit-product/{id}"),
                serde_json::json!({"name": "Pen", "price": "12", "description": "Red pen"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let list = state.product_store.list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].description, "Red pen");
        assert_eq!(list[0].id.as_str(), id);

        let delete_req = Request::builder()
            .method("DELETE")
            .uri(format!("/product-delete/{id}"))
            .body(Body::empty())
            .unwrap();
        let resp = app.clone().oneshot(delete_req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.product_store.list().await.is_empty());

        let delete_again = Request::builder()
            .method("DELETE")
            .uri(format!("/product-delete/{id}"))
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(delete_again).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let (state, app) = app();
        state.product_store.fail_next(StatusCode::INTERNAL_SERVER_ERROR);

        let get = || {
            Request::builder()
                .uri("/get-product")
                .body(Body::empty())
                .unwrap()
        };
        let resp = app.clone().oneshot(get()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = app.oneshot(get()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.product_store.count("GET /get-product"), 2);
    }
}
