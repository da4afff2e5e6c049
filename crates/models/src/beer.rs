use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors;

pub const BEER_NAME_MAX_LEN: usize = 50;
pub const UPC_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "beer")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub version: i32,
    pub beer_name: String,
    pub beer_style: BeerStyle,
    #[sea_orm(unique)]
    pub upc: String,
    pub quantity_on_hand: i32,
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

/// Beer style category, stored as its wire name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    #[sea_orm(string_value = "LAGER")]
    Lager,
    #[sea_orm(string_value = "PILSNER")]
    Pilsner,
    #[sea_orm(string_value = "STOUT")]
    Stout,
    #[sea_orm(string_value = "GOSE")]
    Gose,
    #[sea_orm(string_value = "PORTER")]
    Porter,
    #[sea_orm(string_value = "ALE")]
    Ale,
    #[sea_orm(string_value = "WHEAT")]
    Wheat,
    #[sea_orm(string_value = "IPA")]
    Ipa,
    #[sea_orm(string_value = "PALE_ALE")]
    PaleAle,
    #[sea_orm(string_value = "SAISON")]
    Saison,
}

impl FromStr for BeerStyle {
    type Err = errors::ModelError;

    /// Accepts wire names case-insensitively ("IPA", "pale_ale", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LAGER" => Ok(Self::Lager),
            "PILSNER" => Ok(Self::Pilsner),
            "STOUT" => Ok(Self::Stout),
            "GOSE" => Ok(Self::Gose),
            "PORTER" => Ok(Self::Porter),
            "ALE" => Ok(Self::Ale),
            "WHEAT" => Ok(Self::Wheat),
            "IPA" => Ok(Self::Ipa),
            "PALE_ALE" | "PALE ALE" => Ok(Self::PaleAle),
            "SAISON" => Ok(Self::Saison),
            other => Err(errors::ModelError::Validation(format!("unknown beer style: {other}"))),
        }
    }
}

pub fn validate_beer_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("beerName must not be blank".into()));
    }
    if name.len() > BEER_NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!(
            "beerName must be at most {BEER_NAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_upc(upc: &str) -> Result<(), errors::ModelError> {
    if upc.trim().is_empty() {
        return Err(errors::ModelError::Validation("upc must not be blank".into()));
    }
    if upc.len() > UPC_MAX_LEN {
        return Err(errors::ModelError::Validation(format!(
            "upc must be at most {UPC_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_price(price: Decimal) -> Result<(), errors::ModelError> {
    if price.is_sign_negative() {
        return Err(errors::ModelError::Validation("price must not be negative".into()));
    }
    Ok(())
}

pub fn validate_quantity_on_hand(qty: i32) -> Result<(), errors::ModelError> {
    if qty < 0 {
        return Err(errors::ModelError::Validation("quantityOnHand must not be negative".into()));
    }
    Ok(())
}
