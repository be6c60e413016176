use actix_web::http::StatusCode;
use actix_web::{post, web, HttpResponse};
use shopsearch_llm::{shopping_system_prompt, ChatMessage};
use shopsearch_retrieval::product_context;
use tracing::{error, warn};

use crate::state::AppState;
use crate::types::{ChatTurnRequest, ErrorResponse};

#[post("/chat")]
pub async fn chat(
    body: web::Json<ChatTurnRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    let Some(last_message) = body.messages.last() else {
        return HttpResponse::BadRequest()
            .json(ErrorResponse::new("Invalid or missing 'messages' field."));
    };
    let user_query = last_message.text();

    // Retrieval failure must not abort the conversational turn; the
    // assistant proceeds with empty product context instead.
    let matches = match state.products.retrieve(&user_query).await {
        Ok(matches) => matches,
        Err(e) => {
            warn!("Product retrieval failed, continuing with empty context: {}", e);
            Vec::new()
        }
    };

    let system = shopping_system_prompt(&product_context(&matches));
    let history: Vec<ChatMessage> = body.messages.iter().map(|m| m.to_chat_message()).collect();

    // The provider's token stream is relayed verbatim
    match state.chat.stream(&system, history).await {
        Ok(stream) => HttpResponse::Ok()
            .content_type("text/event-stream")
            .streaming(stream),
        Err(e) => {
            error!("Chat completion failed: {}", e);
            let status = StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(ErrorResponse::new("Failed to generate response."))
        }
    }
}
