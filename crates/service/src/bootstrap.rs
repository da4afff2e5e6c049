//! Startup data loading: seed customers on an empty store and run the CSV
//! beer import. Safe to run on every start.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::beer::repository::BeerRepository;
use crate::csv::{self, ImportSummary};
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

const SEED_CUSTOMERS: [&str; 3] = ["John Doe", "Jane Doe", "Robin Doe"];

pub async fn run(
    beers: &dyn BeerRepository,
    customers: &dyn CustomerRepository,
    csv_path: Option<&str>,
) -> Result<(), ServiceError> {
    seed_customers(customers).await?;
    if let Some(path) = csv_path {
        import_csv(beers, path).await?;
    }
    Ok(())
}

async fn seed_customers(repo: &dyn CustomerRepository) -> Result<(), ServiceError> {
    if repo.count().await? > 0 {
        return Ok(());
    }
    let now = Utc::now().into();
    for name in SEED_CUSTOMERS {
        repo.insert(models::customer::Model {
            id: Uuid::new_v4(),
            version: 1,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
        .await?;
    }
    info!(count = SEED_CUSTOMERS.len(), "seeded customers");
    Ok(())
}

async fn import_csv(repo: &dyn BeerRepository, path: &str) -> Result<ImportSummary, ServiceError> {
    if !Path::new(path).exists() {
        warn!(%path, "bootstrap csv not found; skipping beer import");
        return Ok(ImportSummary::default());
    }
    let (records, skipped_parse) = csv::read_records(Path::new(path))?;
    let mut summary = csv::import_beers(repo, records).await?;
    summary.skipped += skipped_parse;
    info!(
        %path,
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        "bootstrap beer import complete"
    );
    Ok(summary)
}
