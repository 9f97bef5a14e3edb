use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use axum::{middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use validator::Validate;

use crate::{
    catalog::{CatalogClient, CatalogConfig},
    error::ErrorVerbosity,
    middleware::{method_not_allowed::method_not_allowed, not_found::not_found},
    route,
    state::{ApiState, CatalogStore},
    view::Renderer,
};

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    #[serde(default)]
    catalog: CatalogConfig,
}

impl ServerConfig {
    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let yaml = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file `{}`", path.display()))?;

        Self::from_yaml(&yaml)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: ServerConfig = serde_yaml::from_str(yaml).context("Failed to parse config")?;

        config
            .catalog
            .validate()
            .context("Invalid catalog config")?;

        Ok(config)
    }

    pub fn with_socket_address(self, socket_address: SocketAddr) -> Self {
        Self {
            socket_address,
            ..self
        }
    }

    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Builds the application router around an existing state.
    pub fn router(state: ApiState) -> Router {
        Router::new()
            .merge(route::catalog::app::app())
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                method_not_allowed::<ApiState>,
            ))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                            .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                            .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                    )
                    .layer(CompressionLayer::new())
                    .layer(CorsLayer::permissive()),
            )
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let client = CatalogClient::new(self.config.catalog.clone())
            .context("Failed to create catalog client")?;
        let renderer = Renderer::new().context("Failed to load templates")?;

        let state = ApiState::new(
            self.config.error_verbosity,
            CatalogStore::new(client),
            renderer,
        );

        let initial = state.clone();
        tokio::spawn(async move {
            if let Ok(catalog) = initial.catalog().refresh().await {
                tracing::info!(books = catalog.len(), "Catalog ready");
            }
        });

        let app = Self::router(state);

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "Failed to install CTRL+C signal handler");

            std::future::pending::<()>().await;
        }

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;

                tracing::info!("SIGTERM received");
            }
            Err(err) => {
                tracing::error!(%err, "Failed to install SIGTERM signal handler");

                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
