use crate::application::engine::{EngineRequest, MonthlyPaymentRequest, TotalCostRequest};
use crate::domain::import::ImportInputs;
use crate::domain::money::Money;
use crate::domain::rates::Country;
use crate::error::{CalculatorError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads records from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record
/// lengths, and yields an iterator of `Result<T>` so large files stream
/// without loading everything into memory. The same reader serves the
/// request stream and the vehicle / finance-option catalogs.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecordReader<R> {
    /// Creates a new `RecordReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CalculatorError::from))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OpKind {
    #[serde(rename = "import")]
    Import,
    #[serde(rename = "monthly-payment")]
    MonthlyPayment,
    #[serde(rename = "total-cost")]
    TotalCost,
}

/// A flat calculation request row.
///
/// One CSV schema covers all three operations; columns not used by a row's
/// `op` stay empty. Conversion into a typed request rejects rows missing
/// the fields their operation needs.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRecord {
    pub op: OpKind,
    pub car_price: Option<Money>,
    pub car_year: Option<i32>,
    pub engine_volume: Option<Decimal>,
    pub engine_power: Option<u32>,
    pub country: Option<Country>,
    pub car_id: Option<u32>,
    pub customer_id: Option<u32>,
    pub finance_option_id: Option<u32>,
    pub down_payment: Option<Money>,
    pub trade_in_value: Option<Money>,
    pub term_months: Option<u32>,
    pub has_insurance: Option<bool>,
    pub yearly_mileage: Option<u32>,
}

fn require<T>(field: Option<T>, name: &str) -> Result<T> {
    field.ok_or_else(|| CalculatorError::ValidationError(format!("missing field: {name}")))
}

impl TryFrom<RequestRecord> for EngineRequest {
    type Error = CalculatorError;

    fn try_from(record: RequestRecord) -> Result<Self> {
        match record.op {
            OpKind::Import => Ok(EngineRequest::Import(ImportInputs {
                car_price: require(record.car_price, "car_price")?,
                car_year: require(record.car_year, "car_year")?,
                engine_volume: require(record.engine_volume, "engine_volume")?,
                engine_power: require(record.engine_power, "engine_power")?,
                country: record.country.unwrap_or(Country::Other),
            })),
            OpKind::MonthlyPayment => Ok(EngineRequest::MonthlyPayment(MonthlyPaymentRequest {
                car_id: require(record.car_id, "car_id")?,
                customer_id: record.customer_id.unwrap_or_default(),
                finance_option_id: require(record.finance_option_id, "finance_option_id")?,
                down_payment: record.down_payment.unwrap_or(Money::ZERO),
                term_months: require(record.term_months, "term_months")?,
                has_insurance: record.has_insurance.unwrap_or(false),
                trade_in_value: record.trade_in_value.unwrap_or(Money::ZERO),
            })),
            OpKind::TotalCost => Ok(EngineRequest::TotalCost(TotalCostRequest {
                car_id: require(record.car_id, "car_id")?,
                term_months: require(record.term_months, "term_months")?,
                yearly_mileage: require(record.yearly_mileage, "yearly_mileage")?,
            })),
        }
    }
}
