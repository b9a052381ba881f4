use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

// Typed payloads for the ("ALERTS", symbol_short!("…")) topic pattern.

#[derive(Clone)]
#[contracttype]
pub struct AlertCreatedEvent {
    pub alert_id: u64,
    pub owner: Address,
    pub target_fee: u64,
    pub condition: String,
    pub tx_type: String,
    pub block: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct AlertStateEvent {
    pub alert_id: u64,
    pub owner: Address,
    pub is_active: bool,
}

#[derive(Clone)]
#[contracttype]
pub struct AlertDeletedEvent {
    pub alert_id: u64,
    pub owner: Address,
}

#[derive(Clone)]
#[contracttype]
pub struct AlertTriggeredEvent {
    pub alert_id: u64,
    pub owner: Address,
    pub fee_at_trigger: u64,
    pub trigger_count: u32,
    pub block: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct PauseEvent {
    pub paused: bool,
    pub by: Address,
}

pub fn emit_alert_created(
    env: &Env,
    alert_id: u64,
    owner: Address,
    target_fee: u64,
    condition: String,
    tx_type: String,
) {
    env.events().publish(
        ("ALERTS", symbol_short!("NEW")),
        AlertCreatedEvent {
            alert_id,
            owner,
            target_fee,
            condition,
            tx_type,
            block: env.ledger().sequence(),
        },
    );
}

pub fn emit_alert_state_changed(env: &Env, alert_id: u64, owner: Address, is_active: bool) {
    env.events().publish(
        ("ALERTS", symbol_short!("STATE")),
        AlertStateEvent {
            alert_id,
            owner,
            is_active,
        },
    );
}

pub fn emit_alert_deleted(env: &Env, alert_id: u64, owner: Address) {
    env.events().publish(
        ("ALERTS", symbol_short!("DELETE")),
        AlertDeletedEvent { alert_id, owner },
    );
}

pub fn emit_alert_triggered(
    env: &Env,
    alert_id: u64,
    owner: Address,
    fee_at_trigger: u64,
    trigger_count: u32,
) {
    env.events().publish(
        ("ALERTS", symbol_short!("TRIGGER")),
        AlertTriggeredEvent {
            alert_id,
            owner,
            fee_at_trigger,
            trigger_count,
            block: env.ledger().sequence(),
        },
    );
}

pub fn emit_pause_changed(env: &Env, paused: bool, by: Address) {
    env.events().publish(
        ("ALERTS", symbol_short!("PAUSE")),
        PauseEvent { paused, by },
    );
}
