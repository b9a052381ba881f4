use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::Congestion;

// Typed payloads published to the Soroban event log. Indexers subscribe via
// the ("ORACLE", symbol_short!("…")) topic pattern.

#[derive(Clone)]
#[contracttype]
pub struct OracleInitEvent {
    pub owner: Address,
    pub initial_rate: u64,
    pub block: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct FeeRateUpdatedEvent {
    pub fee_rate: u64,
    /// Congestion repr value.
    pub congestion: u32,
    pub block: u32,
    pub recorded_by: Address,
}

#[derive(Clone)]
#[contracttype]
pub struct AverageUpdatedEvent {
    pub tx_type: String,
    pub observed_fee: u64,
    pub new_average: u64,
    pub sample_count: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct WriterAuthEvent {
    pub writer: Address,
    pub owner: Address,
    /// true = authorized, false = revoked.
    pub authorized: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct OwnershipEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

pub fn emit_initialized(env: &Env, owner: Address, initial_rate: u64) {
    env.events().publish(
        ("ORACLE", symbol_short!("INIT")),
        OracleInitEvent {
            owner,
            initial_rate,
            block: env.ledger().sequence(),
        },
    );
}

pub fn emit_rate_updated(env: &Env, fee_rate: u64, congestion: Congestion, recorded_by: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("RATE_UPD")),
        FeeRateUpdatedEvent {
            fee_rate,
            congestion: congestion as u32,
            block: env.ledger().sequence(),
            recorded_by,
        },
    );
}

pub fn emit_average_updated(
    env: &Env,
    tx_type: String,
    observed_fee: u64,
    new_average: u64,
    sample_count: u64,
) {
    env.events().publish(
        ("ORACLE", symbol_short!("AVG_UPD")),
        AverageUpdatedEvent {
            tx_type,
            observed_fee,
            new_average,
            sample_count,
        },
    );
}

pub fn emit_writer_authorized(env: &Env, writer: Address, owner: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("WRTR_ADD")),
        WriterAuthEvent {
            writer,
            owner,
            authorized: true,
        },
    );
}

pub fn emit_writer_revoked(env: &Env, writer: Address, owner: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("WRTR_RMV")),
        WriterAuthEvent {
            writer,
            owner,
            authorized: false,
        },
    );
}

pub fn emit_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        ("ORACLE", symbol_short!("OWN_XFER")),
        OwnershipEvent {
            previous_owner,
            new_owner,
        },
    );
}
