use super::audit::CalculationRecord;
use super::catalog::{FinanceOption, Vehicle};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn store(&self, vehicle: Vehicle) -> Result<()>;
    async fn get(&self, vehicle_id: u32) -> Result<Option<Vehicle>>;
}

#[async_trait]
pub trait FinanceOptionStore: Send + Sync {
    async fn store(&self, option: FinanceOption) -> Result<()>;
    async fn get(&self, option_id: u32) -> Result<Option<FinanceOption>>;
}

/// Append-only log of loan computations.
///
/// Appends are independently retryable; a failed append must never undo an
/// already-computed quote.
#[async_trait]
pub trait CalculationLog: Send + Sync {
    /// Appends a record and returns its generated identifier.
    async fn append(&self, record: CalculationRecord) -> Result<u32>;
    async fn entries(&self) -> Result<Vec<CalculationRecord>>;
}

pub type VehicleStoreBox = Box<dyn VehicleStore>;
pub type FinanceOptionStoreBox = Box<dyn FinanceOptionStore>;
pub type CalculationLogBox = Box<dyn CalculationLog>;
