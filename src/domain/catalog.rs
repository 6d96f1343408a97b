use crate::domain::money::Money;
use serde::{Deserialize, Serialize};

/// The slice of the catalog's car record the engine reads.
///
/// The full record (transmission, mileage, shop, images, ...) lives with
/// the persistence collaborator; only cost-relevant fields cross the port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    pub brand_id: u32,
    pub year: i32,
    pub engine_power: u32,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceOption {
    pub id: u32,
    pub name: String,
    /// Annual interest rate in percent.
    pub interest_rate: rust_decimal::Decimal,
}

/// Service-cost classification derived from the brand identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrandTier {
    LowIndex,
    Standard,
}

impl BrandTier {
    /// Brands with `brand_id <= cutoff` fall into the low-index tier.
    pub fn from_brand_id(brand_id: u32, cutoff: u32) -> Self {
        if brand_id <= cutoff {
            BrandTier::LowIndex
        } else {
            BrandTier::Standard
        }
    }
}
