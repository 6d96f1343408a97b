use crate::domain::money::Money;
use crate::domain::rates::{Country, ImportRates};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for an import cost calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInputs {
    pub car_price: Money,
    pub car_year: i32,
    /// Engine displacement in liters.
    pub engine_volume: Decimal,
    pub engine_power: u32,
    pub country: Country,
}

/// Landed cost breakdown for an imported vehicle.
///
/// `total_cost` is the exact sum of the car price and the five components.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportQuote {
    pub customs_fee: Money,
    pub excise_tax: Money,
    pub vat: Money,
    pub utilization_fee: Money,
    pub registration_fee: Money,
    pub total_cost: Money,
}

/// Vehicle age in whole years, clamped at zero for future model years.
pub fn vehicle_age(reference_year: i32, car_year: i32) -> u32 {
    (reference_year - car_year).max(0) as u32
}

/// Computes the landed cost of importing a vehicle.
pub struct ImportCalculator {
    pub rates: ImportRates,
    pub reference_year: i32,
}

impl ImportCalculator {
    pub fn new(rates: ImportRates, reference_year: i32) -> Self {
        Self {
            rates,
            reference_year,
        }
    }

    pub fn quote(&self, inputs: &ImportInputs) -> ImportQuote {
        let age = vehicle_age(self.reference_year, inputs.car_year);

        let customs_fee = inputs.car_price * self.rates.customs_rate(inputs.country, age);
        let excise_tax = Money::new(
            self.rates.excise_base.resolve(inputs.engine_volume) * self.rates.excise_age.resolve(age),
        );
        // VAT is levied on price plus duty plus excise, not on price alone.
        let vat = (inputs.car_price + customs_fee + excise_tax) * self.rates.vat_rate;
        let utilization_fee = Money::new(self.rates.utilization.resolve(age));
        let registration_fee = Money::new(self.rates.registration.resolve(inputs.engine_power));

        let total_cost =
            inputs.car_price + customs_fee + excise_tax + vat + utilization_fee + registration_fee;

        ImportQuote {
            customs_fee,
            excise_tax,
            vat,
            utilization_fee,
            registration_fee,
            total_cost,
        }
    }
}
