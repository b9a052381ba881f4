use soroban_sdk::{contracttype, Address, String};

/// A user's fee-threshold subscription.
///
/// Conditions are stored as the canonical lower-case strings "above" and
/// "below"; anything else is rejected at the boundary with
/// `InvalidAlertType`. Case normalization is the REST facade's job.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Alert {
    /// Globally unique, monotonically assigned. Never reused, even after
    /// the alert is deleted.
    pub id: u64,
    pub owner: Address,
    /// Threshold in the chain's smallest fee unit; minimum 100.
    pub target_fee: u64,
    /// "above" or "below".
    pub condition: String,
    /// Transaction type the subscription watches, e.g. "stx-transfer".
    pub tx_type: String,
    pub is_active: bool,
    pub created_at: u32,
    /// Block of the most recent trigger; 0 if never triggered.
    pub last_triggered: u32,
    pub trigger_count: u32,
}

/// Registry-wide counters.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct AlertStats {
    pub total_created: u64,
    pub total_triggered: u64,
    /// Next id to assign; shared across all users, never decremented.
    pub next_id: u64,
}

/// One item of `create_alerts_batch`.
#[derive(Clone)]
#[contracttype]
pub struct NewAlert {
    pub target_fee: u64,
    pub condition: String,
    pub tx_type: String,
}

/// One item of `batch_check_alerts`.
#[derive(Clone)]
#[contracttype]
pub struct AlertRef {
    pub owner: Address,
    pub id: u64,
}

/// Append-only record of one successful trigger mark, keyed by
/// `(alert id, trigger sequence number)`.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct TriggerRecord {
    pub fee_at_trigger: u64,
    pub block_height: u32,
    pub timestamp: u64,
}
