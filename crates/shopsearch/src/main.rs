use anyhow::Result;
use clap::{Parser, Subcommand};
use shopsearch_common::{logger, AppConfig};
use shopsearch_llm::{Embedder, HttpEmbedder};
use shopsearch_retrieval::Ingestor;
use std::path::PathBuf;
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "shopsearch")]
#[command(about = "Shopsearch - semantic catalog search and shopping assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Data directory holding the catalog files
        #[arg(long)]
        data_dir: Option<String>,
    },

    /// Build catalog files from raw source documents
    Seed {
        /// Product source JSON file
        #[arg(long)]
        products: Option<PathBuf>,

        /// Material source JSON file
        #[arg(long)]
        materials: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env at project root early so CLI
    // argument overrides work correctly
    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port, data_dir }) => {
            // Override with CLI arguments
            std::env::set_var("SERVER_HOST", &host);
            std::env::set_var("SERVER_PORT", port.to_string());
            if let Some(dir) = &data_dir {
                std::env::set_var("DATA_DIR", dir);
            }

            serve().await?;
        }
        Some(Commands::Seed { products, materials }) => {
            if products.is_none() && materials.is_none() {
                anyhow::bail!("Nothing to seed: pass --products and/or --materials");
            }

            let config = AppConfig::from_env()?;
            config.validate()?;
            logger::setup_console_logging(&config.log_level)?;

            let embedder: Arc<dyn Embedder> = Arc::new(HttpEmbedder::new(&config)?);
            let ingestor = Ingestor::new(embedder, &config);

            if let Some(source) = products {
                let count = ingestor
                    .seed_products(&source, &config.product_catalog_path())
                    .await?;
                tracing::info!("Seeded {} products", count);
            }

            if let Some(source) = materials {
                let count = ingestor
                    .seed_materials(&source, &config.material_catalog_path())
                    .await?;
                tracing::info!("Seeded {} materials", count);
            }
        }
        None => {
            serve().await?;
        }
    }

    Ok(())
}

async fn serve() -> Result<()> {
    let config = AppConfig::from_env()?;
    config.validate()?;
    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("Shopsearch starting...");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Data: {}", config.data_dir.display());
    tracing::info!(
        "  Embedding model: {} ({} dims)",
        config.embedding_model,
        config.embedding_dimension
    );

    shopsearch_server::start_server(config).await?;
    Ok(())
}
