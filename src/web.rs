use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::advisory::AdvisoryService;
use crate::api;
use crate::geocoding::Geocoder;
use crate::weather::WeatherProvider;

/// Application router: the JSON API under `/api` with permissive CORS
pub fn app<W, G>(service: Arc<AdvisoryService<W, G>>) -> Router
where
    W: WeatherProvider + 'static,
    G: Geocoder + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().nest("/api", api::router(service)).layer(cors)
}

pub async fn run<W, G>(service: Arc<AdvisoryService<W, G>>, port: u16) -> Result<()>
where
    W: WeatherProvider + 'static,
    G: Geocoder + 'static,
{
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app(service))
        .await
        .with_context(|| "Web server stopped unexpectedly")?;
    Ok(())
}
