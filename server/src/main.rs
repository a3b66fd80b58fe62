use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::{
    http::StatusCode,
    routing::{get_service, MethodRouter},
    Router,
};
use thiserror::Error as ThisError;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cookbook_backend::app_config::AppConfig;
use cookbook_backend::auth_service::{AuthAccess, AuthService};

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

#[derive(Debug, ThisError)]
enum Error {
    #[error("cookbook failed to load config from {DEFAULT_CONFIG_PATH}, Config Error {0}")]
    Config(#[from] config::ConfigError),
    #[error("cookbook failed to parse bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
    #[error("cookbook server error: {0}")]
    Serve(#[from] hyper::Error),
}
type Result<T> = std::result::Result<T, Error>;

async fn handle_asset_error(err: std::io::Error) -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("asset error: {err}"),
    )
}

fn index_service(dist_dir: &Path) -> MethodRouter {
    get_service(ServeFile::new(dist_dir.join("index.html"))).handle_error(handle_asset_error)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let conf = AppConfig::load(DEFAULT_CONFIG_PATH)?;
    let auth_access = Arc::new(AuthAccess::new(conf.auth_config));

    let dist_dir = Path::new(&conf.site_config.dist_dir);
    let index = index_service(dist_dir);

    let app = Router::new()
        .bind_auth_routes(auth_access)
        .nest(
            "/static",
            get_service(ServeDir::new(&conf.site_config.static_dir))
                .handle_error(handle_asset_error),
        )
        // The four user-facing routes all load the app shell; the router in
        // the frontend takes it from there.
        .route("/", index.clone())
        .route("/recipes", index.clone())
        .route("/about", index.clone())
        .route("/login", index)
        .fallback(get_service(ServeDir::new(dist_dir)).handle_error(handle_asset_error))
        .layer(TraceLayer::new_for_http());

    let addr = conf.http_config.connection_string().parse::<SocketAddr>()?;
    tracing::info!("binding server to {addr}");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
