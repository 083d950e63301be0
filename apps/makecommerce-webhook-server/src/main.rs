//! MakeCommerce webhook server - verifies inbound payment notifications.
//!
//! The gateway calls the merchant's return, cancel and notification URLs with a
//! `json` payload and its `mac`. This binary accepts those calls on any path,
//! checks the authentication code with the shop's secret key and answers with
//! the outcome.
//!
//! # Usage
//!
//! ```text
//! MAKECOMMERCE_SECRET_KEY=... WEBHOOK_LISTEN=0.0.0.0:8080 makecommerce-webhook-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `WEBHOOK_LISTEN` | `0.0.0.0:8080` | Bind address |
//! | `MAKECOMMERCE_SECRET_KEY` | *(required)* | Key notifications are verified with |
//! | `MAKECOMMERCE_SHOP_ID` | *(unset)* | Shop ID, logged at startup |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod service;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use makecommerce_core::MakeCommerceConfig;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::service::WebhookService;

/// Server version logged at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the service from configuration.
fn build_service(config: &MakeCommerceConfig) -> Result<WebhookService> {
    anyhow::ensure!(
        !config.secret_key.is_empty(),
        "MAKECOMMERCE_SECRET_KEY must be set to verify notifications"
    );
    Ok(WebhookService::new(config.secret_key.as_str()))
}

/// Run the accept loop until `shutdown` completes, then drain open connections.
async fn serve(
    listener: TcpListener,
    service: WebhookService,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Resolve on Ctrl-C.
async fn ctrl_c() {
    tokio::signal::ctrl_c().await.ok();
    info!("received shutdown signal, draining connections");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = MakeCommerceConfig::from_env();

    init_tracing(&config.log_level)?;

    info!(
        webhook_listen = %config.webhook_listen,
        shop_id = %config.shop_id,
        environment = %config.environment(),
        version = VERSION,
        "starting MakeCommerce webhook server",
    );

    let service = build_service(&config)?;

    let addr: SocketAddr = config
        .webhook_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.webhook_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for notifications");

    serve(listener, service, ctrl_c()).await
}
