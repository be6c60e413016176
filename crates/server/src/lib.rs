//! Shopsearch HTTP server
//!
//! actix-web REST API over the retrieval core: product search, material
//! search and the streamed chat endpoint.

mod routes;
mod state;
mod types;

pub use state::AppState;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use shopsearch_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// Start the HTTP server and block until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_address = config.server_bind_address();
    let state = Arc::new(AppState::new(config)?);

    info!("Server listening on http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .service(
                web::scope("/api")
                    .service(routes::search::search)
                    .service(routes::materials::material_search)
                    .service(routes::chat::chat),
            )
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
