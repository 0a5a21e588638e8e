use axum::{
    routing::{get, post, IntoMakeService},
    Router,
};
use hyper::server::conn::AddrIncoming;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::configuration::{DatabaseSettings, Settings};
use crate::middleware::RequestIdLayer;
use crate::{routes::*, telemetry::TowerMakeSpanWithConstantId};

type Server = axum::Server<AddrIncoming, IntoMakeService<Router>>;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
}

pub struct Application {
    pub port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let db_pool = get_connection_pool(&config.database);
        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, db_pool)?;
        Ok(Self { port, server })
    }

    pub async fn run_until_stopped(self) -> hyper::Result<()> {
        self.server.await
    }
}

// Connections are opened on first use, so the app starts even while the
// database is still coming up.
pub fn get_connection_pool(config: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy_with(config.with_db())
}

pub fn run(listener: TcpListener, db_pool: PgPool) -> hyper::Result<Server> {
    let address = listener.local_addr().ok();
    let app = app_router(db_pool);
    tracing::info!("listening on {:?}", address);
    Ok(axum::Server::from_tcp(listener)?.serve(app.into_make_service()))
}

pub fn app_router(db_pool: PgPool) -> Router {
    let app_state = AppState { db_pool };
    Router::new()
        .route("/", get(home).post(submit_form))
        .route("/health_check", get(health_check))
        .route("/subscriptions", post(subscribe))
        .with_state(app_state)
        // A span is created for each request and ends with the response is sent
        .layer(TraceLayer::new_for_http().make_span_with(TowerMakeSpanWithConstantId))
        .layer(RequestIdLayer)
}
