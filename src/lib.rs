pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::{
    config::config_loader,
    infrastructure::{axum_http::http_serve, postgres::postgres_connection},
};

pub async fn run() -> Result<()> {
    observability::init_observability("qrcode-registry")?;

    let dotenvy_env = config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    http_serve::start(Arc::new(dotenvy_env), Arc::new(postgres_pool)).await?;

    Ok(())
}
