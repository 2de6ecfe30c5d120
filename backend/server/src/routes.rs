use std::sync::Arc;

use axum::{
    Json,
    extract::{self, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sheet::{Ledger, RequestItemLine};
use tracing::warn;

use crate::{
    error::AppError,
    state::State,
    submission::{LineInput, SubmissionRequest, submit},
    utils::STORES,
};

type AppState = extract::State<Arc<State>>;

pub async fn master_data_handler(extract::State(state): AppState) -> Json<Ledger> {
    Json(state.snapshot().await.ledger.clone())
}

pub async fn items_handler(extract::State(state): AppState) -> Json<Vec<String>> {
    Json(state.snapshot().await.ledger.item_names.clone())
}

pub async fn stores_handler() -> Json<[&'static str; 6]> {
    Json(STORES)
}

pub async fn next_indent_handler(extract::State(state): AppState) -> String {
    state.next_indent().await
}

pub async fn refresh_handler(extract::State(state): AppState) -> impl IntoResponse {
    let snapshot = state.refresh().await;

    Json(json!({
        "items": snapshot.ledger.len(),
        "loadedAt": snapshot.loaded_at.to_rfc3339(),
    }))
}

pub async fn line_handler(
    extract::State(state): AppState,
    payload: Result<Json<LineInput>, JsonRejection>,
) -> Result<Json<RequestItemLine>, AppError> {
    let Json(line) = payload.map_err(|_| AppError::MalformedPayload)?;

    Ok(Json(
        state
            .line(&line.item_name, &line.quantity, &line.au, &line.remarks)
            .await,
    ))
}

pub async fn submit_handler(
    extract::State(state): AppState,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected submission payload: {e}");
        AppError::MalformedPayload
    })?;

    submit(&state, request).await?;

    Ok((StatusCode::OK, "Success"))
}

pub async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, header::CONTENT_TYPE},
    };
    use serde_json::Value;
    use sheet::LocalSheet;
    use tower::ServiceExt;

    use super::*;
    use crate::{app, config::Config};

    async fn router() -> (Router, Arc<LocalSheet>) {
        let sheet = Arc::new(LocalSheet::with_master([("Pipe 25mm", 50)]));
        let state = State::with_sheet(Config::default(), sheet.clone()).await;

        (app(state), sheet)
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_master_data() {
        let (router, _) = router().await;
        let (status, body) = send(&router, get("/master-data")).await;
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["itemNames"], json!(["Pipe 25mm"]));
        assert_eq!(json["stockData"]["Pipe 25mm"], json!(50));

        let (_, body) = send(&router, get("/items")).await;
        assert_eq!(body, r#"["Pipe 25mm"]"#);
    }

    #[tokio::test]
    async fn test_line_preview() {
        let (router, _) = router().await;
        let (status, body) = send(
            &router,
            post("/lines", r#"{"itemName": "Pipe 25mm", "quantity": 12, "au": "feet"}"#),
        )
        .await;
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["currentStock"], json!(50));
        assert_eq!(json["stockAfterPurchase"], json!(38));
    }

    #[tokio::test]
    async fn test_submit() {
        let (router, sheet) = router().await;
        assert_eq!(send(&router, get("/next-indent")).await.1, "I-001");

        let body = r#"{
            "metadata": { "storeName": "Palm Walk", "storeRequiredByDate": "2025-09-01" },
            "lines": [{ "itemName": "Pipe 25mm", "quantity": "12", "au": "feet" }]
        }"#;
        let (status, text) = send(&router, post("/submit", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "Success");
        assert_eq!(sheet.row_count().await, 1);
        assert_eq!(send(&router, get("/next-indent")).await.1, "I-002");
    }

    #[tokio::test]
    async fn test_submit_rejections() {
        let (router, sheet) = router().await;

        let (status, text) = send(&router, post("/submit", r#"{"lines": []}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.starts_with("Please fill in all required fields"));

        let (status, text) = send(&router, post("/submit", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(text, "Malformed payload");

        assert_eq!(sheet.row_count().await, 0);
    }

    #[tokio::test]
    async fn test_stores_and_health() {
        let (router, _) = router().await;

        let (_, body) = send(&router, get("/stores")).await;
        assert!(body.contains("Maurya Green"));
        assert_eq!(send(&router, get("/health")).await.1, "OK");

        let (status, body) = send(&router, post("/refresh", "")).await;
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["items"], json!(1));
    }
}
