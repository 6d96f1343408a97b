use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Origin of an imported vehicle for customs purposes.
///
/// Values outside the tariff's named set decode to `Other`, which resolves
/// to the flat default customs rate regardless of vehicle age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "ЕС")]
    Eu,
    #[serde(rename = "США")]
    Us,
    #[serde(other, rename = "other")]
    Other,
}

/// An ordered band table mapping a scalar key to a rate or flat amount.
///
/// Bands are `(upper_bound, value)` pairs sorted by ascending bound;
/// `resolve` returns the value of the first band whose upper bound is
/// greater than or equal to the key, else the fallback. Every key maps to
/// exactly one value: keys below the first bound hit the first band, keys
/// above the last bound hit the fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable<K> {
    bands: Vec<(K, Decimal)>,
    fallback: Decimal,
}

impl<K: PartialOrd + Copy> RateTable<K> {
    pub fn new(bands: Vec<(K, Decimal)>, fallback: Decimal) -> Self {
        debug_assert!(
            bands.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "band upper bounds must be strictly ascending"
        );
        Self { bands, fallback }
    }

    pub fn resolve(&self, key: K) -> Decimal {
        self.bands
            .iter()
            .find(|(upper, _)| key <= *upper)
            .map(|(_, value)| *value)
            .unwrap_or(self.fallback)
    }
}

/// Tariff tables for the import cost calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRates {
    pub customs_eu: RateTable<u32>,
    pub customs_us: RateTable<u32>,
    /// Flat customs rate for countries outside the named set.
    pub customs_fallback: Decimal,
    /// Excise base amount keyed by engine volume in liters.
    pub excise_base: RateTable<Decimal>,
    /// Excise multiplier keyed by vehicle age.
    pub excise_age: RateTable<u32>,
    /// Utilization fee keyed by vehicle age.
    pub utilization: RateTable<u32>,
    /// Registration fee keyed by engine power.
    pub registration: RateTable<u32>,
    pub vat_rate: Decimal,
}

impl ImportRates {
    pub fn customs_rate(&self, country: Country, age: u32) -> Decimal {
        match country {
            Country::Eu => self.customs_eu.resolve(age),
            Country::Us => self.customs_us.resolve(age),
            Country::Other => self.customs_fallback,
        }
    }
}

impl Default for ImportRates {
    fn default() -> Self {
        Self {
            customs_eu: RateTable::new(
                vec![(3, dec!(0.15)), (5, dec!(0.20)), (7, dec!(0.25))],
                dec!(0.30),
            ),
            customs_us: RateTable::new(
                vec![(3, dec!(0.18)), (5, dec!(0.23)), (7, dec!(0.28))],
                dec!(0.33),
            ),
            customs_fallback: dec!(0.25),
            excise_base: RateTable::new(
                vec![
                    (dec!(1.0), dec!(3000)),
                    (dec!(1.5), dec!(5000)),
                    (dec!(2.0), dec!(7000)),
                    (dec!(3.0), dec!(9000)),
                ],
                dec!(12000),
            ),
            excise_age: RateTable::new(vec![(5, dec!(1.0)), (10, dec!(1.5))], dec!(2.0)),
            utilization: RateTable::new(vec![(3, dec!(3000)), (7, dec!(5000))], dec!(8000)),
            registration: RateTable::new(
                vec![
                    (100, dec!(2000)),
                    (150, dec!(3000)),
                    (200, dec!(5000)),
                    (250, dec!(7500)),
                ],
                dec!(10000),
            ),
            vat_rate: dec!(0.20),
        }
    }
}

/// Rates for the loan calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRates {
    /// Yearly insurance premium as a fraction of the vehicle price.
    pub insurance_yearly_fraction: Decimal,
}

impl Default for LoanRates {
    fn default() -> Self {
        Self {
            insurance_yearly_fraction: dec!(0.05),
        }
    }
}

/// Run-rate constants for the ownership projection.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnershipRates {
    /// Fuel consumption in liters per 100 km.
    pub fuel_consumption_per_100km: Decimal,
    pub fuel_price_per_liter: Decimal,
    /// Yearly road tax per engine power unit.
    pub tax_per_power_unit: Decimal,
    pub insurance_yearly_fraction: Decimal,
    /// Brands with id up to and including this cutoff use the low-index
    /// service fraction. The cutoff is a stable catalog id range, not a
    /// semantic brand classification.
    pub brand_id_cutoff: u32,
    pub service_fraction_low_index: Decimal,
    pub service_fraction_standard: Decimal,
}

impl Default for OwnershipRates {
    fn default() -> Self {
        Self {
            fuel_consumption_per_100km: dec!(8.0),
            fuel_price_per_liter: dec!(50.0),
            tax_per_power_unit: dec!(10),
            insurance_yearly_fraction: dec!(0.05),
            brand_id_cutoff: 5,
            service_fraction_low_index: dec!(0.05),
            service_fraction_standard: dec!(0.03),
        }
    }
}

/// The complete immutable rate configuration consumed by the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateBook {
    pub import: ImportRates,
    pub loan: LoanRates,
    pub ownership: OwnershipRates,
}
