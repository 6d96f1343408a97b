use crate::domain::audit::CalculationRecord;
use crate::domain::catalog::{FinanceOption, Vehicle};
use crate::domain::ports::{CalculationLog, FinanceOptionStore, VehicleStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory vehicle store.
///
/// Uses `Arc<RwLock<HashMap>>` to allow shared concurrent access. Stands in
/// for the external persistence collaborator in the CLI and in tests.
#[derive(Default, Clone)]
pub struct InMemoryVehicleStore {
    vehicles: Arc<RwLock<HashMap<u32, Vehicle>>>,
}

impl InMemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for InMemoryVehicleStore {
    async fn store(&self, vehicle: Vehicle) -> Result<()> {
        let mut vehicles = self.vehicles.write().await;
        vehicles.insert(vehicle.id, vehicle);
        Ok(())
    }

    async fn get(&self, vehicle_id: u32) -> Result<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.get(&vehicle_id).cloned())
    }
}

/// A thread-safe in-memory finance option store.
#[derive(Default, Clone)]
pub struct InMemoryFinanceOptionStore {
    options: Arc<RwLock<HashMap<u32, FinanceOption>>>,
}

impl InMemoryFinanceOptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FinanceOptionStore for InMemoryFinanceOptionStore {
    async fn store(&self, option: FinanceOption) -> Result<()> {
        let mut options = self.options.write().await;
        options.insert(option.id, option);
        Ok(())
    }

    async fn get(&self, option_id: u32) -> Result<Option<FinanceOption>> {
        let options = self.options.read().await;
        Ok(options.get(&option_id).cloned())
    }
}

/// An in-memory append-only calculation log with sequential identifiers.
#[derive(Default, Clone)]
pub struct InMemoryCalculationLog {
    records: Arc<RwLock<Vec<CalculationRecord>>>,
}

impl InMemoryCalculationLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationLog for InMemoryCalculationLog {
    async fn append(&self, record: CalculationRecord) -> Result<u32> {
        let mut records = self.records.write().await;
        records.push(record);
        let id = records.len() as u32;
        tracing::debug!(id, "calculation record appended");
        Ok(id)
    }

    async fn entries(&self) -> Result<Vec<CalculationRecord>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }
}
