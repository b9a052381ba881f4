use soroban_sdk::{contracttype, String};

/// Named profile of average transaction size and execution cost, used to
/// estimate fees without simulating the transaction.
///
/// `avg_size_bytes` and `avg_gas_units` are cumulative integer means over
/// every observation folded in so far; `sample_count` starts at 1 with the
/// creation values counting as the first sample.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Template {
    pub avg_size_bytes: u64,
    pub avg_gas_units: u64,
    pub description: String,
    pub category: String,
    pub last_updated: u32,
    pub sample_count: u64,
}

/// One item of `batch_update_templates`.
#[derive(Clone)]
#[contracttype]
pub struct TemplateUpdate {
    pub template_id: String,
    pub size_bytes: u64,
    pub gas_units: u64,
}

/// Expanded view of one template for planning purposes.
///
/// `estimated_fee_micro` uses a fixed 2 micro-unit/byte planning multiplier
/// rather than the live oracle rate, so quotes are stable across rate swings.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct FullEstimate {
    pub template_id: String,
    pub size_bytes: u64,
    pub gas_units: u64,
    pub description: String,
    pub category: String,
    pub estimated_fee_micro: u64,
}

/// Side-by-side view of two templates. `cheaper` is the id of the one with
/// the smaller average size, the first argument winning ties.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct TemplateComparison {
    pub template_a: String,
    pub size_a: u64,
    pub gas_a: u64,
    pub template_b: String,
    pub size_b: u64,
    pub gas_b: u64,
    pub cheaper: String,
}

/// The three sBTC bridge operations, bundled for wallet UIs.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct SbtcOperations {
    pub peg_in: Option<Template>,
    pub peg_out: Option<Template>,
    pub transfer: Option<Template>,
}

/// The core lending trio, bundled for wallet UIs.
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct LendingOperations {
    pub lend: Option<Template>,
    pub borrow: Option<Template>,
    pub repay: Option<Template>,
}
