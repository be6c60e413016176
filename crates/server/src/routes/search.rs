use actix_web::{post, web, HttpResponse};
use tracing::error;

use crate::state::AppState;
use crate::types::{ErrorResponse, SearchRequest, SearchResponse};

#[post("/search")]
pub async fn search(
    body: web::Json<SearchRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    let Some(query) = body.query_str() else {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Invalid or missing 'query' field."));
    };

    match state.products.retrieve(query).await {
        Ok(results) => HttpResponse::Ok().json(SearchResponse { results }),
        Err(e) => {
            error!("Semantic search failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to perform semantic search."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use shopsearch_common::AppConfig;
    use std::sync::Arc;

    fn test_state() -> Arc<AppState> {
        // Points at nothing: catalogs are absent (empty) and the provider
        // is unreachable. Validation paths must not need either.
        let config = AppConfig {
            data_dir: std::env::temp_dir().join("shopsearch-server-test"),
            embedding_base_url: "http://127.0.0.1:1".to_string(),
            ..AppConfig::default()
        };
        Arc::new(AppState::new(config).unwrap())
    }

    #[actix_web::test]
    async fn test_missing_query_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(search),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid or missing 'query' field.");
    }

    #[actix_web::test]
    async fn test_non_string_query_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(search),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({"query": 42}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_blank_query_returns_empty_results() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .service(search),
        )
        .await;

        // Whitespace-only queries short-circuit before any provider call,
        // so this succeeds even with an unreachable provider
        let req = test::TestRequest::post()
            .uri("/search")
            .set_json(serde_json::json!({"query": "   "}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["results"], serde_json::json!([]));
    }
}
