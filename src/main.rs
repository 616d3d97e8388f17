use std::sync::Arc;

use tracing::{error, info};

use custodia::notify::create_mailer;
use custodia::web::WebServer;
use custodia::{Config, Database};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = custodia::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        custodia::logging::init_console_only(&config.logging.level);
    }

    info!("custodia - Evidence Management backend");

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let mailer = match create_mailer(&config.smtp).await {
        Ok(mailer) => mailer,
        Err(e) => {
            error!("Failed to initialize mail transport: {}", e);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(
        &config.server,
        &config.auth,
        &config.smtp,
        db,
        mailer,
    ) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to initialize web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
