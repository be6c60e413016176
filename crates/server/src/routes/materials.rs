use actix_web::{post, web, HttpResponse};
use tracing::error;

use crate::state::AppState;
use crate::types::{ErrorResponse, SearchRequest, SearchResponse};

#[post("/materials/search")]
pub async fn material_search(
    body: web::Json<SearchRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    let Some(query) = body.query_str() else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Invalid query"));
    };

    match state.materials.retrieve(query).await {
        Ok(results) => HttpResponse::Ok().json(SearchResponse { results }),
        Err(e) => {
            error!("Material search failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to match materials."))
        }
    }
}
