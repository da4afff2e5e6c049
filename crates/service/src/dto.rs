//! Request/response representations, decoupled from the persisted entities.
//!
//! Outbound DTOs mirror the entity plus its assigned fields; inbound upsert
//! payloads carry every mutable field as an `Option` so one shape serves
//! create (all required fields must be present), update (same) and patch
//! (only present fields are applied).

use chrono::{DateTime, FixedOffset};
use models::beer::{self, BeerStyle};
use models::customer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Violation;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    pub id: Uuid,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    pub upc: String,
    /// `None` when the caller asked to hide inventory
    pub quantity_on_hand: Option<i32>,
    pub price: Decimal,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl BeerDto {
    pub fn from_model(m: beer::Model, show_inventory: bool) -> Self {
        Self {
            id: m.id,
            version: m.version,
            beer_name: m.beer_name,
            beer_style: m.beer_style,
            upc: m.upc,
            quantity_on_hand: show_inventory.then_some(m.quantity_on_hand),
            price: m.price,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeerUpsert {
    /// Caller's known version; when present, stale writes are rejected
    pub version: Option<i32>,
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
    pub upc: Option<String>,
    pub quantity_on_hand: Option<i32>,
    pub price: Option<Decimal>,
}

impl BeerUpsert {
    /// Full-write validation (create and update): required fields must be
    /// present and well-formed. Returns every violation, not just the first.
    pub fn validate_full(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        match self.beer_name.as_deref() {
            None => violations.push(Violation::new("beerName", "must not be null")),
            Some(name) => {
                if let Err(e) = beer::validate_beer_name(name) {
                    violations.push(Violation::new("beerName", e.to_string()));
                }
            }
        }
        if self.beer_style.is_none() {
            violations.push(Violation::new("beerStyle", "must not be null"));
        }
        match self.upc.as_deref() {
            None => violations.push(Violation::new("upc", "must not be null")),
            Some(upc) => {
                if let Err(e) = beer::validate_upc(upc) {
                    violations.push(Violation::new("upc", e.to_string()));
                }
            }
        }
        match self.price {
            None => violations.push(Violation::new("price", "must not be null")),
            Some(price) => {
                if let Err(e) = beer::validate_price(price) {
                    violations.push(Violation::new("price", e.to_string()));
                }
            }
        }
        if let Some(qty) = self.quantity_on_hand {
            if let Err(e) = beer::validate_quantity_on_hand(qty) {
                violations.push(Violation::new("quantityOnHand", e.to_string()));
            }
        }
        violations
    }

    /// Patch validation: only fields that are actually present (non-blank for
    /// strings) are checked.
    pub fn validate_partial(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if let Some(name) = self.beer_name.as_deref() {
            if !name.trim().is_empty() {
                if let Err(e) = beer::validate_beer_name(name) {
                    violations.push(Violation::new("beerName", e.to_string()));
                }
            }
        }
        if let Some(upc) = self.upc.as_deref() {
            if !upc.trim().is_empty() {
                if let Err(e) = beer::validate_upc(upc) {
                    violations.push(Violation::new("upc", e.to_string()));
                }
            }
        }
        if let Some(price) = self.price {
            if let Err(e) = beer::validate_price(price) {
                violations.push(Violation::new("price", e.to_string()));
            }
        }
        if let Some(qty) = self.quantity_on_hand {
            if let Err(e) = beer::validate_quantity_on_hand(qty) {
                violations.push(Violation::new("quantityOnHand", e.to_string()));
            }
        }
        violations
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Uuid,
    pub version: i32,
    pub name: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl CustomerDto {
    pub fn from_model(m: customer::Model) -> Self {
        Self {
            id: m.id,
            version: m.version,
            name: m.name,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerUpsert {
    pub version: Option<i32>,
    pub name: Option<String>,
}

impl CustomerUpsert {
    pub fn validate_full(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        match self.name.as_deref() {
            None => violations.push(Violation::new("name", "must not be null")),
            Some(name) => {
                if let Err(e) = customer::validate_name(name) {
                    violations.push(Violation::new("name", e.to_string()));
                }
            }
        }
        violations
    }

    pub fn validate_partial(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if let Some(name) = self.name.as_deref() {
            if !name.trim().is_empty() {
                if let Err(e) = customer::validate_name(name) {
                    violations.push(Violation::new("name", e.to_string()));
                }
            }
        }
        violations
    }
}
