use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use surveyflow_api::config::AppConfig;
use surveyflow_api::database::store::{SurveyStore, UserStore};
use surveyflow_api::database::surveys::PgSurveyStore;
use surveyflow_api::database::users::PgUserStore;
use surveyflow_api::routes;
use surveyflow_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and secrets
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting surveyflow API in {:?} mode", config.environment);

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_secs))
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
    let surveys: Arc<dyn SurveyStore> = Arc::new(PgSurveyStore::new(pool));

    let port = config.server.port;
    let state = AppState::new(config, users, surveys);
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("surveyflow API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
