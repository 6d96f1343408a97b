use crate::domain::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit entry appended after a successful loan computation.
///
/// Captures the request inputs and the insurance cost accrued over the
/// full term. Durable persistence of these entries is the storage
/// collaborator's concern; the engine only produces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub vehicle_id: u32,
    pub customer_id: u32,
    pub finance_option_id: u32,
    pub down_payment: Money,
    pub term_months: u32,
    pub trade_in_value: Money,
    /// Insurance over the whole term, zero when no insurance was requested.
    pub insurance_cost: Money,
    pub created_at: DateTime<Utc>,
}
