use crate::domain::audit::CalculationRecord;
use crate::domain::catalog::BrandTier;
use crate::domain::import::{ImportCalculator, ImportInputs, ImportQuote};
use crate::domain::loan::{LoanCalculator, LoanInputs, LoanQuote};
use crate::domain::money::Money;
use crate::domain::ownership::{OwnershipCalculator, OwnershipInputs, OwnershipProjection};
use crate::domain::ports::{CalculationLogBox, FinanceOptionStoreBox, VehicleStoreBox};
use crate::domain::rates::RateBook;
use crate::error::{CalculatorError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A loan payment request carrying references to be resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentRequest {
    pub car_id: u32,
    pub customer_id: u32,
    pub finance_option_id: u32,
    pub down_payment: Money,
    pub term_months: u32,
    pub has_insurance: bool,
    pub trade_in_value: Money,
}

/// An ownership projection request for a catalog vehicle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCostRequest {
    pub car_id: u32,
    pub term_months: u32,
    pub yearly_mileage: u32,
}

/// A loan quote plus persistence metadata.
///
/// `calculation_id` is the identifier of the appended audit record, or
/// `None` when the append failed; the quote itself is unaffected and the
/// append may be retried separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPaymentOutcome {
    #[serde(flatten)]
    pub quote: LoanQuote,
    pub calculation_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineRequest {
    Import(ImportInputs),
    MonthlyPayment(MonthlyPaymentRequest),
    TotalCost(TotalCostRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op")]
pub enum EngineResponse {
    #[serde(rename = "import")]
    Import(ImportQuote),
    #[serde(rename = "monthly-payment")]
    MonthlyPayment(MonthlyPaymentOutcome),
    #[serde(rename = "total-cost")]
    TotalCost(OwnershipProjection),
}

/// The main entry point for cost calculations.
///
/// `CalculatorEngine` owns the store ports and the three pure calculators.
/// Each operation assembles calculator inputs from the request and any
/// referenced records, so the calculators themselves never perform I/O.
pub struct CalculatorEngine {
    vehicles: VehicleStoreBox,
    finance_options: FinanceOptionStoreBox,
    audit_log: CalculationLogBox,
    import: ImportCalculator,
    loan: LoanCalculator,
    ownership: OwnershipCalculator,
}

impl CalculatorEngine {
    /// Creates a new engine over the given stores and rate configuration.
    ///
    /// `reference_year` anchors vehicle age derivation; callers supply it
    /// so computations stay deterministic.
    pub fn new(
        vehicles: VehicleStoreBox,
        finance_options: FinanceOptionStoreBox,
        audit_log: CalculationLogBox,
        rates: RateBook,
        reference_year: i32,
    ) -> Self {
        Self {
            vehicles,
            finance_options,
            audit_log,
            import: ImportCalculator::new(rates.import, reference_year),
            loan: LoanCalculator::new(rates.loan),
            ownership: OwnershipCalculator::new(rates.ownership),
        }
    }

    /// Dispatches a request to the matching operation.
    pub async fn process(&self, request: EngineRequest) -> Result<EngineResponse> {
        match request {
            EngineRequest::Import(inputs) => Ok(EngineResponse::Import(self.import_cost(inputs)?)),
            EngineRequest::MonthlyPayment(request) => Ok(EngineResponse::MonthlyPayment(
                self.monthly_payment(request).await?,
            )),
            EngineRequest::TotalCost(request) => {
                Ok(EngineResponse::TotalCost(self.ownership_cost(request).await?))
            }
        }
    }

    /// Computes the landed cost of importing a vehicle.
    pub fn import_cost(&self, inputs: ImportInputs) -> Result<ImportQuote> {
        if inputs.car_price <= Money::ZERO {
            return Err(CalculatorError::ValidationError(
                "car price must be positive".to_string(),
            ));
        }
        if inputs.engine_volume <= Decimal::ZERO {
            return Err(CalculatorError::ValidationError(
                "engine volume must be positive".to_string(),
            ));
        }
        if inputs.engine_power == 0 {
            return Err(CalculatorError::ValidationError(
                "engine power must be positive".to_string(),
            ));
        }
        Ok(self.import.quote(&inputs))
    }

    /// Computes the monthly payment for a catalog vehicle under a finance
    /// option, then appends the audit record.
    pub async fn monthly_payment(
        &self,
        request: MonthlyPaymentRequest,
    ) -> Result<MonthlyPaymentOutcome> {
        if request.term_months == 0 {
            return Err(CalculatorError::ValidationError(
                "loan term must be at least one month".to_string(),
            ));
        }

        let vehicle = self
            .vehicles
            .get(request.car_id)
            .await?
            .ok_or(CalculatorError::NotFound {
                entity: "vehicle",
                id: request.car_id,
            })?;
        let option = self
            .finance_options
            .get(request.finance_option_id)
            .await?
            .ok_or(CalculatorError::NotFound {
                entity: "finance option",
                id: request.finance_option_id,
            })?;

        let inputs = LoanInputs {
            principal: vehicle.price - request.down_payment - request.trade_in_value,
            annual_rate_percent: option.interest_rate,
            term_months: request.term_months,
            has_insurance: request.has_insurance,
            vehicle_price: vehicle.price,
        };
        let quote = self.loan.quote(&inputs);

        let record = CalculationRecord {
            vehicle_id: request.car_id,
            customer_id: request.customer_id,
            finance_option_id: request.finance_option_id,
            down_payment: request.down_payment,
            term_months: request.term_months,
            trade_in_value: request.trade_in_value,
            insurance_cost: quote.insurance_over_term(request.term_months),
            created_at: Utc::now(),
        };
        // The quote is already final here. An append failure is reported
        // through the metadata, never as an operation failure.
        let calculation_id = match self.audit_log.append(record).await {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(%error, car_id = request.car_id, "failed to append calculation record");
                None
            }
        };

        Ok(MonthlyPaymentOutcome {
            quote,
            calculation_id,
        })
    }

    /// Projects the total cost of owning a catalog vehicle.
    pub async fn ownership_cost(&self, request: TotalCostRequest) -> Result<OwnershipProjection> {
        let vehicle = self
            .vehicles
            .get(request.car_id)
            .await?
            .ok_or(CalculatorError::NotFound {
                entity: "vehicle",
                id: request.car_id,
            })?;

        let inputs = OwnershipInputs {
            vehicle_price: vehicle.price,
            engine_power: vehicle.engine_power,
            brand_tier: BrandTier::from_brand_id(
                vehicle.brand_id,
                self.ownership.rates.brand_id_cutoff,
            ),
            term_months: request.term_months,
            yearly_mileage: request.yearly_mileage,
        };
        Ok(self.ownership.project(&inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{FinanceOption, Vehicle};
    use crate::domain::ports::{CalculationLog, FinanceOptionStore, VehicleStore};
    use crate::domain::rates::Country;
    use crate::infrastructure::in_memory::{
        InMemoryCalculationLog, InMemoryFinanceOptionStore, InMemoryVehicleStore,
    };
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    const YEAR: i32 = 2026;

    async fn engine_with_catalog() -> (CalculatorEngine, InMemoryCalculationLog) {
        let vehicles = InMemoryVehicleStore::new();
        vehicles
            .store(Vehicle {
                id: 1,
                brand_id: 3,
                year: 2022,
                engine_power: 150,
                price: Money::new(dec!(20000)),
            })
            .await
            .unwrap();
        let options = InMemoryFinanceOptionStore::new();
        options
            .store(FinanceOption {
                id: 1,
                name: "standard".to_string(),
                interest_rate: dec!(12),
            })
            .await
            .unwrap();
        let log = InMemoryCalculationLog::new();
        let engine = CalculatorEngine::new(
            Box::new(vehicles),
            Box::new(options),
            Box::new(log.clone()),
            RateBook::default(),
            YEAR,
        );
        (engine, log)
    }

    fn payment_request() -> MonthlyPaymentRequest {
        MonthlyPaymentRequest {
            car_id: 1,
            customer_id: 7,
            finance_option_id: 1,
            down_payment: Money::new(dec!(3000)),
            term_months: 36,
            has_insurance: true,
            trade_in_value: Money::new(dec!(2000)),
        }
    }

    #[tokio::test]
    async fn test_monthly_payment_resolves_references_and_audits() {
        let (engine, log) = engine_with_catalog().await;

        let outcome = engine.monthly_payment(payment_request()).await.unwrap();

        // principal 20000 - 3000 - 2000 = 15000 at 12% over 36 months
        let diff = (outcome.quote.monthly_payment.value() - dec!(498.2146)).abs();
        assert!(diff < dec!(0.001), "monthly payment {}", outcome.quote.monthly_payment);
        assert_eq!(outcome.calculation_id, Some(1));

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].vehicle_id, 1);
        assert_eq!(entries[0].customer_id, 7);
        assert_eq!(
            entries[0].insurance_cost,
            outcome.quote.insurance_over_term(36)
        );
    }

    #[tokio::test]
    async fn test_monthly_payment_rejects_zero_term() {
        let (engine, log) = engine_with_catalog().await;
        let mut request = payment_request();
        request.term_months = 0;

        let result = engine.monthly_payment(request).await;
        assert!(matches!(result, Err(CalculatorError::ValidationError(_))));
        assert!(log.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_monthly_payment_unknown_vehicle() {
        let (engine, _) = engine_with_catalog().await;
        let mut request = payment_request();
        request.car_id = 99;

        let result = engine.monthly_payment(request).await;
        assert!(matches!(
            result,
            Err(CalculatorError::NotFound { entity: "vehicle", id: 99 })
        ));
    }

    #[tokio::test]
    async fn test_monthly_payment_unknown_finance_option() {
        let (engine, _) = engine_with_catalog().await;
        let mut request = payment_request();
        request.finance_option_id = 42;

        let result = engine.monthly_payment(request).await;
        assert!(matches!(
            result,
            Err(CalculatorError::NotFound { entity: "finance option", id: 42 })
        ));
    }

    struct FailingLog;

    #[async_trait]
    impl CalculationLog for FailingLog {
        async fn append(&self, _record: CalculationRecord) -> crate::error::Result<u32> {
            Err(CalculatorError::IoError(std::io::Error::other("log down")))
        }

        async fn entries(&self) -> crate::error::Result<Vec<CalculationRecord>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_invalidate_quote() {
        let vehicles = InMemoryVehicleStore::new();
        vehicles
            .store(Vehicle {
                id: 1,
                brand_id: 3,
                year: 2022,
                engine_power: 150,
                price: Money::new(dec!(20000)),
            })
            .await
            .unwrap();
        let options = InMemoryFinanceOptionStore::new();
        options
            .store(FinanceOption {
                id: 1,
                name: "standard".to_string(),
                interest_rate: dec!(12),
            })
            .await
            .unwrap();
        let engine = CalculatorEngine::new(
            Box::new(vehicles),
            Box::new(options),
            Box::new(FailingLog),
            RateBook::default(),
            YEAR,
        );

        let outcome = engine.monthly_payment(payment_request()).await.unwrap();
        assert_eq!(outcome.calculation_id, None);
        assert!(outcome.quote.monthly_payment > Money::ZERO);
    }

    #[tokio::test]
    async fn test_ownership_cost_derives_brand_tier() {
        let (engine, _) = engine_with_catalog().await;

        // brand_id 3 is inside the low-index cutoff
        let projection = engine
            .ownership_cost(TotalCostRequest {
                car_id: 1,
                term_months: 24,
                yearly_mileage: 15000,
            })
            .await
            .unwrap();

        // 20000 * 0.05 * 2 years
        assert_eq!(projection.service_cost, Money::new(dec!(2000)));
        assert_eq!(projection.years_of_ownership, dec!(2));
    }

    #[tokio::test]
    async fn test_import_cost_validation() {
        let (engine, _) = engine_with_catalog().await;
        let result = engine.import_cost(ImportInputs {
            car_price: Money::ZERO,
            car_year: 2024,
            engine_volume: dec!(1.8),
            engine_power: 120,
            country: Country::Eu,
        });
        assert!(matches!(result, Err(CalculatorError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_process_dispatches_import() {
        let (engine, _) = engine_with_catalog().await;
        let response = engine
            .process(EngineRequest::Import(ImportInputs {
                car_price: Money::new(dec!(20000)),
                car_year: 2024,
                engine_volume: dec!(1.8),
                engine_power: 120,
                country: Country::Eu,
            }))
            .await
            .unwrap();

        match response {
            EngineResponse::Import(quote) => {
                assert_eq!(quote.total_cost, Money::new(dec!(42000)));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
