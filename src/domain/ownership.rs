use crate::domain::catalog::BrandTier;
use crate::domain::money::Money;
use crate::domain::rates::OwnershipRates;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Inputs for an ownership cost projection. The brand tier is derived by
/// the caller from the vehicle's brand identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipInputs {
    pub vehicle_price: Money,
    pub engine_power: u32,
    pub brand_tier: BrandTier,
    pub term_months: u32,
    pub yearly_mileage: u32,
}

/// Projected cost of ownership over the holding period.
///
/// The fuel, service, tax and insurance components are already scaled by
/// `years_of_ownership`; `total_cost` adds the purchase price once,
/// undiscounted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipProjection {
    pub initial_price: Money,
    pub fuel_cost: Money,
    pub service_cost: Money,
    pub tax_cost: Money,
    pub insurance_cost: Money,
    pub total_cost: Money,
    pub years_of_ownership: Decimal,
}

/// Projects multi-year total cost of ownership from per-year run rates.
pub struct OwnershipCalculator {
    pub rates: OwnershipRates,
}

impl OwnershipCalculator {
    pub fn new(rates: OwnershipRates) -> Self {
        Self { rates }
    }

    pub fn project(&self, inputs: &OwnershipInputs) -> OwnershipProjection {
        let years = Decimal::from(inputs.term_months) / dec!(12);
        let price = inputs.vehicle_price.value();

        let yearly_fuel = self.rates.fuel_consumption_per_100km / dec!(100)
            * Decimal::from(inputs.yearly_mileage)
            * self.rates.fuel_price_per_liter;
        let service_fraction = match inputs.brand_tier {
            BrandTier::LowIndex => self.rates.service_fraction_low_index,
            BrandTier::Standard => self.rates.service_fraction_standard,
        };
        let yearly_service = price * service_fraction;
        let yearly_tax = Decimal::from(inputs.engine_power) * self.rates.tax_per_power_unit;
        let yearly_insurance = price * self.rates.insurance_yearly_fraction;

        let fuel_cost = Money::new(yearly_fuel * years);
        let service_cost = Money::new(yearly_service * years);
        let tax_cost = Money::new(yearly_tax * years);
        let insurance_cost = Money::new(yearly_insurance * years);
        let total_cost =
            inputs.vehicle_price + fuel_cost + service_cost + tax_cost + insurance_cost;

        OwnershipProjection {
            initial_price: inputs.vehicle_price,
            fuel_cost,
            service_cost,
            tax_cost,
            insurance_cost,
            total_cost,
            years_of_ownership: years,
        }
    }
}
