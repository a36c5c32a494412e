use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quote_server::advisory::{Advisor, AdvisoryClient, CacheConfig, CachedAdvisor, StaticAdvisor};
use quote_server::catalog::{CatalogStore, RateCatalog};
use quote_server::config::ServerConfig;
use quote_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Load the catalog (fail fast if a configured file is unusable)
    let catalog = match &config.catalog_path {
        Some(path) => {
            let catalog = RateCatalog::from_json_file(path)?;
            let summary = catalog.summary();
            info!(
                path = %path.display(),
                sea_coc = summary.sea_coc,
                sea_soc = summary.sea_soc,
                rail = summary.rail,
                carrier_drop_offs = summary.carrier_drop_offs,
                shipper_drop_offs = summary.shipper_drop_offs,
                through_rail_offers = summary.through_rail_offers,
                "Loaded rate catalog"
            );
            CatalogStore::new(catalog)
        }
        None => {
            warn!("QUOTE_CATALOG_PATH not set; starting with an empty catalog");
            CatalogStore::empty()
        }
    };

    let advisor = match config.advisory.clone() {
        Some(advisory) => {
            info!(url = %advisory.base_url, "Using advisory service");
            Advisor::Http(AdvisoryClient::new(advisory)?)
        }
        None => Advisor::Static(StaticAdvisor),
    };
    let advisor = CachedAdvisor::new(advisor, &CacheConfig::default());

    let state = AppState::new(catalog, advisor, config.quote.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Freight quotation server listening");
    info!("Endpoints: GET /health, GET|PUT /catalog, POST /quote, POST /best-price");

    axum::serve(listener, app).await?;
    Ok(())
}
