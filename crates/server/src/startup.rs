use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::pagination::PageLimits;
use common::utils::logging::init_logging_default;
use configs::ServiceBackend;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::beer::{
    BeerRepository, BeerService, InMemoryBeerRepository, SeaOrmBeerRepository,
};
use service::customer::{
    CustomerRepository, CustomerService, InMemoryCustomerRepository, SeaOrmCustomerRepository,
};

use crate::routes::{self, ServerState};

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: &configs::AppConfig) -> anyhow::Result<SocketAddr> {
    let host = if cfg.server.host.trim().is_empty() {
        env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    } else {
        cfg.server.host.clone()
    };
    let port = if cfg.server.port == 0 {
        env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(8080)
    } else {
        cfg.server.port
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Build repositories for the configured backend. The database backend also
/// brings the schema up to date; the memory backend starts empty.
async fn build_repositories(
    cfg: &mut configs::AppConfig,
) -> anyhow::Result<(Arc<dyn BeerRepository>, Arc<dyn CustomerRepository>)> {
    match cfg.bootstrap.backend {
        ServiceBackend::Database => {
            cfg.database.normalize_from_env();
            cfg.database.validate()?;
            let db = models::db::connect_with(&cfg.database).await?;
            migration::Migrator::up(&db, None).await?;
            info!("database schema up to date");
            Ok((
                Arc::new(SeaOrmBeerRepository { db: db.clone() }),
                Arc::new(SeaOrmCustomerRepository { db }),
            ))
        }
        ServiceBackend::Memory => {
            info!("using in-memory backend; state will not survive a restart");
            Ok((
                Arc::new(InMemoryBeerRepository::new()),
                Arc::new(InMemoryCustomerRepository::new()),
            ))
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let mut cfg = configs::load_default().unwrap_or_default();

    let (beer_repo, customer_repo) = build_repositories(&mut cfg).await?;

    service::bootstrap::run(
        beer_repo.as_ref(),
        customer_repo.as_ref(),
        cfg.bootstrap.csv_path.as_deref(),
    )
    .await?;

    let limits = PageLimits {
        default_page_size: cfg.pagination.default_page_size,
        max_page_size: cfg.pagination.max_page_size,
    };
    let state = ServerState {
        beers: Arc::new(BeerService::new(beer_repo, limits)),
        customers: Arc::new(CustomerService::new(customer_repo, limits)),
    };

    let app: Router = routes::build_router(state, build_cors());

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
