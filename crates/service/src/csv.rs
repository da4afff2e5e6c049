//! Bulk CSV import, idempotent with respect to re-running.
//!
//! Expected columns: `name,style,upc,price,quantity` with a header row.
//! Records are deduplicated by UPC: an existing row is updated in place, a
//! new UPC becomes a new beer. Malformed records are logged and skipped so
//! one bad line cannot abort the whole import.

use std::path::Path;

use chrono::Utc;
use models::beer::{self, BeerStyle};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::beer::repository::BeerRepository;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct BeerCsvRecord {
    pub name: String,
    pub style: String,
    pub upc: String,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Parse the file, skipping records that fail to deserialize.
/// Only an unreadable file is an error.
pub fn read_records(path: &Path) -> Result<(Vec<BeerCsvRecord>, usize), ServiceError> {
    let mut reader = ::csv::Reader::from_path(path)
        .map_err(|e| ServiceError::Csv(format!("cannot open {}: {e}", path.display())))?;
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<BeerCsvRecord>() {
        match row {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed csv record");
                skipped += 1;
            }
        }
    }
    Ok((records, skipped))
}

/// Upsert each record by UPC. Names longer than the column limit are
/// truncated rather than rejected; unknown styles skip the record.
pub async fn import_beers(
    repo: &dyn BeerRepository,
    records: Vec<BeerCsvRecord>,
) -> Result<ImportSummary, ServiceError> {
    let mut summary = ImportSummary::default();
    for record in records {
        let style: BeerStyle = match record.style.parse() {
            Ok(style) => style,
            Err(e) => {
                warn!(upc = %record.upc, error = %e, "skipping csv record with unknown style");
                summary.skipped += 1;
                continue;
            }
        };
        if record.upc.trim().is_empty() || record.name.trim().is_empty() {
            warn!(upc = %record.upc, "skipping csv record with blank name or upc");
            summary.skipped += 1;
            continue;
        }
        if record.price.is_sign_negative() || record.quantity < 0 {
            warn!(upc = %record.upc, "skipping csv record with negative price or quantity");
            summary.skipped += 1;
            continue;
        }
        let name = truncate(&record.name, beer::BEER_NAME_MAX_LEN);

        match repo.find_by_upc(&record.upc).await? {
            Some(mut existing) => {
                existing.beer_name = name;
                existing.beer_style = style;
                existing.quantity_on_hand = record.quantity;
                existing.price = record.price;
                existing.version += 1;
                existing.updated_at = Utc::now().into();
                repo.save(existing).await?;
                summary.updated += 1;
            }
            None => {
                let now = Utc::now().into();
                repo.insert(beer::Model {
                    id: Uuid::new_v4(),
                    version: 1,
                    beer_name: name,
                    beer_style: style,
                    upc: record.upc,
                    quantity_on_hand: record.quantity,
                    price: record.price,
                    created_at: now,
                    updated_at: now,
                })
                .await?;
                summary.created += 1;
            }
        }
    }
    info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        "csv import finished"
    );
    Ok(summary)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    // cut on a char boundary
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beer::repository::InMemoryBeerRepository;
    use crate::db::beer_service::BeerListFilter;
    use std::io::Write;

    const SAMPLE: &str = "\
name,style,upc,price,quantity
Galaxy Cat,PALE_ALE,0631234200036,12.99,122
Crank,IPA,0631234300019,11.99,392
Sunshine City,IPA,0083783375213,13.99,144
";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_well_formed_records() {
        let file = write_csv(SAMPLE);
        let (records, skipped) = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(skipped, 0);
        assert_eq!(records[0].name, "Galaxy Cat");
        assert_eq!(records[1].price, Decimal::new(1199, 2));
    }

    #[test]
    fn skips_malformed_records_without_aborting() {
        let bad = "\
name,style,upc,price,quantity
Galaxy Cat,PALE_ALE,0631234200036,12.99,122
Broken,IPA,0631234300019,not-a-price,392
Short Row,IPA,123
Sunshine City,IPA,0083783375213,13.99,144
";
        let file = write_csv(bad);
        let (records, skipped) = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_records(Path::new("/definitely/not/there.csv")).is_err());
    }

    #[tokio::test]
    async fn import_creates_then_updates_by_upc() {
        let repo = InMemoryBeerRepository::new();
        let file = write_csv(SAMPLE);
        let (records, _) = read_records(file.path()).unwrap();

        let first = import_beers(&repo, records.clone()).await.unwrap();
        assert_eq!(first, ImportSummary { created: 3, updated: 0, skipped: 0 });

        // second run touches the same rows instead of duplicating
        let second = import_beers(&repo, records).await.unwrap();
        assert_eq!(second, ImportSummary { created: 0, updated: 3, skipped: 0 });

        let (rows, total) = repo.list(&BeerListFilter::default(), 0, 100).await.unwrap();
        assert_eq!(total, 3);
        let mut upcs: Vec<&str> = rows.iter().map(|m| m.upc.as_str()).collect();
        upcs.sort();
        upcs.dedup();
        assert_eq!(upcs.len(), 3);
        // version reflects the second pass
        assert!(rows.iter().all(|m| m.version == 2));
    }

    #[tokio::test]
    async fn import_skips_unknown_style_and_truncates_long_names() {
        let repo = InMemoryBeerRepository::new();
        let long_name = "x".repeat(80);
        let content = format!(
            "name,style,upc,price,quantity\n\
             {long_name},IPA,upc-long,9.99,10\n\
             Mystery Brew,KOMBUCHA,upc-mystery,9.99,10\n"
        );
        let file = write_csv(&content);
        let (records, _) = read_records(file.path()).unwrap();

        let summary = import_beers(&repo, records).await.unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.skipped, 1);

        let stored = repo.find_by_upc("upc-long").await.unwrap().unwrap();
        assert_eq!(stored.beer_name.len(), beer::BEER_NAME_MAX_LEN);
    }
}
