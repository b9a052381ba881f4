use soroban_sdk::{contracttype, Address, String};

/// Coarse classification of network load recorded with each fee snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[contracttype]
pub enum Congestion {
    Low,
    Medium,
    High,
}

/// Immutable fee snapshot, one per block height at time of write.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct FeeRateRecord {
    /// Cost per byte in the chain's smallest fee unit.
    pub fee_rate: u64,
    /// Ledger timestamp when the snapshot was recorded.
    pub timestamp: u64,
    pub congestion: Congestion,
    pub recorded_by: Address,
}

/// Cumulative mean over observed absolute fees for one transaction type.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct TxAverage {
    pub average: u64,
    pub sample_count: u64,
}

/// Aggregate view returned by `get_fee_summary`.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct FeeSummary {
    pub current_fee: u64,
    pub last_update_block: u32,
    pub total_updates: u64,
    pub is_initialized: bool,
}

/// One item of `batch_update_averages`.
#[derive(Clone)]
#[contracttype]
pub struct AverageUpdate {
    pub tx_type: String,
    pub observed_fee: u64,
}
