//! Web server for custodia.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::auth::TokenIssuer;
use crate::config::{AuthConfig, ServerConfig, SmtpConfig};
use crate::db::Database;
use crate::notify::{ApprovalNotifier, Mailer};
use crate::{CustodiaError, Result};

use super::handlers::AppState;
use super::router::{create_health_router, create_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(
        server_config: &ServerConfig,
        auth_config: &AuthConfig,
        smtp_config: &SmtpConfig,
        db: Arc<Database>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", server_config.host, server_config.port)
            .parse()
            .map_err(|e| CustodiaError::Config(format!("invalid server address: {e}")))?;

        let tokens = TokenIssuer::with_ttl(
            &auth_config.jwt_secret,
            Duration::from_secs(auth_config.token_expiry_hours * 60 * 60),
        );

        let notifier = Arc::new(ApprovalNotifier::new(
            mailer,
            tokens.clone(),
            auth_config.frontend_url.clone(),
            smtp_config.fallback_mailbox.clone(),
        ));

        let app_state = Arc::new(AppState::new(db, tokens, notifier));

        Ok(Self {
            addr,
            app_state,
            cors_origins: server_config.cors_origins.clone(),
        })
    }

    /// Get the configured server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> axum::Router {
        create_router(self.app_state.clone(), &self.cors_origins).merge(create_health_router())
    }

    /// Run the web server until shutdown.
    pub async fn run(self) -> std::io::Result<()> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
