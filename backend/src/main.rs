//! Backend entry-point: loads settings, wires adapters and serves HTTP.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use tidytext::domain::ports::SpellingOracle;
use tidytext::inbound::http::health::HealthState;
use tidytext::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tidytext::outbound::security::TokenConfig;
use tidytext::outbound::spelling::FrequencyDictionary;
use tidytext::server::token_secret::{BuildMode, load_token_secret, secret_fingerprint};
use tidytext::server::{ServerConfig, create_server};
use tidytext::settings::AppSettings;

fn load_dictionary(settings: &AppSettings) -> Result<FrequencyDictionary> {
    match &settings.dictionary_path {
        Some(path) => FrequencyDictionary::from_path(path)
            .wrap_err_with(|| format!("loading dictionary from {}", path.display())),
        None => FrequencyDictionary::bundled().wrap_err("loading bundled dictionary"),
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("loading configuration: {err}"))?;

    let secret_path = settings.jwt_secret_file();
    let secret = load_token_secret(
        &secret_path,
        BuildMode::from_debug_assertions(),
        settings.allow_ephemeral_secret,
    )?;
    info!(fingerprint = %secret_fingerprint(&secret), "token secret loaded");
    let token = TokenConfig {
        secret,
        ttl: settings.token_ttl(),
    };

    let dictionary = load_dictionary(&settings)?;
    info!(words = dictionary.len(), "spelling dictionary loaded");
    let oracle: Arc<dyn SpellingOracle> = Arc::new(dictionary);

    let mut config = ServerConfig::new(token, oracle, settings.bind_addr());
    if let Some(url) = settings.database_url.as_deref() {
        run_pending_migrations(url)
            .await
            .wrap_err("applying database migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("building database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state, config)?;
    server.await?;
    Ok(())
}
