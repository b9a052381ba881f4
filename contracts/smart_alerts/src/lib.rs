#![no_std]
#![allow(clippy::too_many_arguments)]


mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{Alert, AlertRef, AlertStats, NewAlert, TriggerRecord};

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};

// ==================== Storage Keys ====================

#[contracttype]
pub enum DataKey {
    // Singleton / lifecycle — instance storage.
    Initialized,
    Paused,
    /// Configuration pointer to the fee-oracle identity. Stored for
    /// off-chain consumers; the registry never calls the oracle itself.
    FeeOracle,

    // Global counters — instance storage.
    TotalCreated,   // u64
    TotalTriggered, // u64
    NextId,         // u64

    // Alert records — persistent, composite key (owner, id).
    Alert(Address, u64),
    UserAlertCount(Address), // u32

    // Append-only trigger log — persistent, keyed (alert id, sequence).
    TriggerHistory(u64, u32), // TriggerRecord
}

// ==================== Constants ====================

/// Simultaneous alerts allowed per user. Deleting an alert frees a slot.
const MAX_ALERTS_PER_USER: u32 = 10;
/// Minimum accepted threshold, in the chain's smallest fee unit.
const MIN_TARGET_FEE: u64 = 100;
/// Flat cost quoted by `estimate_creation_cost`.
const ALERT_CREATION_COST: u64 = 2000;

// ==================== Contract ====================

#[contract]
pub struct SmartAlerts;

#[contractimpl]
impl SmartAlerts {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Seed the registry operator. The operator (and any writer it
    /// authorizes) is the only identity allowed to mark triggers and run
    /// batch checks.
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        access_control::set_owner(&env, &admin).map_err(|_| Error::AlreadyInitialized)?;
        env.storage().instance().set(&DataKey::Initialized, &true);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Alert creation
    // ------------------------------------------------------------------

    /// Create an alert owned by the caller. Returns the assigned id.
    pub fn create_alert(
        env: Env,
        caller: Address,
        target_fee: u64,
        condition: String,
        tx_type: String,
    ) -> Result<u64, Error> {
        caller.require_auth();
        Self::require_not_paused(&env)?;
        Self::validate_threshold(target_fee)?;
        Self::validate_condition(&env, &condition)?;

        let count = Self::read_user_count(&env, &caller);
        if count >= MAX_ALERTS_PER_USER {
            return Err(Error::AlertLimitReached);
        }

        let id = Self::store_alert(&env, &caller, target_fee, &condition, &tx_type);
        env.storage()
            .persistent()
            .set(&DataKey::UserAlertCount(caller.clone()), &(count + 1));

        events::emit_alert_created(&env, id, caller, target_fee, condition, tx_type);
        Ok(id)
    }

    /// Create several alerts atomically. The whole batch is validated
    /// against the per-user cap and the per-item rules before anything is
    /// stored; any rejection fails the entire call with no side effects.
    /// Ids are assigned in input order.
    pub fn create_alerts_batch(
        env: Env,
        caller: Address,
        alerts: Vec<NewAlert>,
    ) -> Result<Vec<u64>, Error> {
        caller.require_auth();
        Self::require_not_paused(&env)?;

        let count = Self::read_user_count(&env, &caller);
        if count + alerts.len() > MAX_ALERTS_PER_USER {
            return Err(Error::AlertLimitReached);
        }
        for item in alerts.iter() {
            Self::validate_threshold(item.target_fee)?;
            Self::validate_condition(&env, &item.condition)?;
        }

        let mut ids = Vec::new(&env);
        for item in alerts.iter() {
            let id = Self::store_alert(&env, &caller, item.target_fee, &item.condition, &item.tx_type);
            events::emit_alert_created(
                &env,
                id,
                caller.clone(),
                item.target_fee,
                item.condition.clone(),
                item.tx_type.clone(),
            );
            ids.push_back(id);
        }
        env.storage().persistent().set(
            &DataKey::UserAlertCount(caller),
            &(count + alerts.len()),
        );
        Ok(ids)
    }

    // ------------------------------------------------------------------
    // Alert management (owner of the alert)
    // ------------------------------------------------------------------

    pub fn deactivate_alert(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut alert = Self::load_owned(&env, &caller, id)?;
        alert.is_active = false;
        Self::save_alert(&env, &alert);
        events::emit_alert_state_changed(&env, id, caller, false);
        Ok(())
    }

    pub fn reactivate_alert(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut alert = Self::load_owned(&env, &caller, id)?;
        alert.is_active = true;
        Self::save_alert(&env, &alert);
        events::emit_alert_state_changed(&env, id, caller, true);
        Ok(())
    }

    /// Remove the alert permanently. Frees one slot for the user; the id
    /// is never reassigned.
    pub fn delete_alert(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        caller.require_auth();
        Self::load_owned(&env, &caller, id)?;
        env.storage()
            .persistent()
            .remove(&DataKey::Alert(caller.clone(), id));

        let count = Self::read_user_count(&env, &caller);
        env.storage().persistent().set(
            &DataKey::UserAlertCount(caller.clone()),
            &count.saturating_sub(1),
        );
        events::emit_alert_deleted(&env, id, caller);
        Ok(())
    }

    pub fn update_alert_threshold(
        env: Env,
        caller: Address,
        id: u64,
        new_target: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::validate_threshold(new_target)?;
        let mut alert = Self::load_owned(&env, &caller, id)?;
        alert.target_fee = new_target;
        Self::save_alert(&env, &alert);
        Ok(())
    }

    pub fn update_alert_type(
        env: Env,
        caller: Address,
        id: u64,
        new_condition: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::validate_condition(&env, &new_condition)?;
        let mut alert = Self::load_owned(&env, &caller, id)?;
        alert.condition = new_condition;
        Self::save_alert(&env, &alert);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Trigger evaluation
    // ------------------------------------------------------------------

    /// Whether the alert fires at `current_fee`. "below" fires at or under
    /// the target, "above" at or over it. Inactive alerts are an error,
    /// not a silent false, so pollers can tell the states apart.
    pub fn should_alert_trigger(
        env: Env,
        owner: Address,
        id: u64,
        current_fee: u64,
    ) -> Result<bool, Error> {
        let alert = Self::load_owned(&env, &owner, id)?;
        if !alert.is_active {
            return Err(Error::AlertInactive);
        }
        Ok(Self::evaluate(&env, &alert, current_fee))
    }

    /// Record a trigger. Registry operator only — the alert's own user
    /// cannot mark triggers. Appends to the trigger history and bumps the
    /// counters; the condition itself is NOT re-checked here, callers are
    /// expected to evaluate `should_alert_trigger` first.
    pub fn mark_triggered(
        env: Env,
        caller: Address,
        owner: Address,
        id: u64,
        current_fee: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_authorized(&env, &caller)?;

        let mut alert = Self::load_owned(&env, &owner, id)?;
        let sequence = alert.trigger_count + 1;
        let record = TriggerRecord {
            fee_at_trigger: current_fee,
            block_height: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::TriggerHistory(id, sequence), &record);

        alert.trigger_count = sequence;
        alert.last_triggered = env.ledger().sequence();
        Self::save_alert(&env, &alert);

        let total: u64 = env
            .storage()
            .instance()
            .get(&DataKey::TotalTriggered)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage()
            .instance()
            .set(&DataKey::TotalTriggered, &total);

        events::emit_alert_triggered(&env, id, owner, current_fee, sequence);
        Ok(())
    }

    /// Evaluate many alerts against one fee under a single operator
    /// authorization check. Missing or inactive alerts yield `false` in
    /// their result slot rather than failing the batch.
    pub fn batch_check_alerts(
        env: Env,
        caller: Address,
        alerts: Vec<AlertRef>,
        current_fee: u64,
    ) -> Result<Vec<bool>, Error> {
        caller.require_auth();
        access_control::require_authorized(&env, &caller)?;

        let mut results = Vec::new(&env);
        for item in alerts.iter() {
            let fired = match Self::load_alert(&env, &item.owner, item.id) {
                Some(alert) if alert.is_active => Self::evaluate(&env, &alert, current_fee),
                _ => false,
            };
            results.push_back(fired);
        }
        Ok(results)
    }

    // ------------------------------------------------------------------
    // Administration (registry operator)
    // ------------------------------------------------------------------

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::transfer_ownership(&env, &caller, &new_owner)?;
        Ok(())
    }

    /// Authorize an additional trigger-marking identity (e.g. the poller).
    pub fn authorize_checker(env: Env, caller: Address, checker: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::authorize(&env, &caller, &checker)?;
        Ok(())
    }

    pub fn revoke_checker(env: Env, caller: Address, checker: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::revoke(&env, &caller, &checker)?;
        Ok(())
    }

    pub fn set_fee_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::FeeOracle, &oracle);
        Ok(())
    }

    /// Stop new alert creation. Existing alerts stay evaluable so pollers
    /// keep working during an incident.
    pub fn emergency_pause(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::Paused, &true);
        events::emit_pause_changed(&env, true, caller);
        Ok(())
    }

    pub fn resume(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::Paused, &false);
        events::emit_pause_changed(&env, false, caller);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn get_alert(env: Env, owner: Address, id: u64) -> Option<Alert> {
        Self::load_alert(&env, &owner, id)
    }

    pub fn get_user_alert_count(env: Env, owner: Address) -> u32 {
        Self::read_user_count(&env, &owner)
    }

    pub fn get_alert_stats(env: Env) -> AlertStats {
        AlertStats {
            total_created: env
                .storage()
                .instance()
                .get(&DataKey::TotalCreated)
                .unwrap_or(0),
            total_triggered: env
                .storage()
                .instance()
                .get(&DataKey::TotalTriggered)
                .unwrap_or(0),
            next_id: env.storage().instance().get(&DataKey::NextId).unwrap_or(1),
        }
    }

    pub fn can_create_alert(env: Env, owner: Address) -> bool {
        Self::read_user_count(&env, &owner) < MAX_ALERTS_PER_USER
    }

    /// Flat quote for creating one alert, in the chain's smallest fee unit.
    pub fn estimate_creation_cost(_env: Env) -> u64 {
        ALERT_CREATION_COST
    }

    pub fn get_trigger_history(env: Env, id: u64, sequence: u32) -> Option<TriggerRecord> {
        env.storage()
            .persistent()
            .get(&DataKey::TriggerHistory(id, sequence))
    }

    pub fn get_fee_oracle(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::FeeOracle)
    }

    pub fn is_paused(env: Env) -> bool {
        env.storage().instance().get(&DataKey::Paused).unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    fn require_not_paused(env: &Env) -> Result<(), Error> {
        if Self::is_paused(env.clone()) {
            return Err(Error::RegistryPaused);
        }
        Ok(())
    }

    fn validate_threshold(target_fee: u64) -> Result<(), Error> {
        if target_fee < MIN_TARGET_FEE {
            return Err(Error::InvalidThreshold);
        }
        Ok(())
    }

    fn validate_condition(env: &Env, condition: &String) -> Result<(), Error> {
        if *condition == String::from_str(env, "above")
            || *condition == String::from_str(env, "below")
        {
            return Ok(());
        }
        Err(Error::InvalidAlertType)
    }

    fn evaluate(env: &Env, alert: &Alert, current_fee: u64) -> bool {
        if alert.condition == String::from_str(env, "below") {
            current_fee <= alert.target_fee
        } else {
            current_fee >= alert.target_fee
        }
    }

    /// Allocates the next global id, writes the record, and bumps the
    /// created counter. User count is the caller's responsibility so batch
    /// creation can write it once.
    fn store_alert(
        env: &Env,
        owner: &Address,
        target_fee: u64,
        condition: &String,
        tx_type: &String,
    ) -> u64 {
        let id: u64 = env.storage().instance().get(&DataKey::NextId).unwrap_or(1);
        env.storage().instance().set(&DataKey::NextId, &(id + 1));

        let alert = Alert {
            id,
            owner: owner.clone(),
            target_fee,
            condition: condition.clone(),
            tx_type: tx_type.clone(),
            is_active: true,
            created_at: env.ledger().sequence(),
            last_triggered: 0,
            trigger_count: 0,
        };
        Self::save_alert(env, &alert);

        let total: u64 = env
            .storage()
            .instance()
            .get(&DataKey::TotalCreated)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&DataKey::TotalCreated, &total);
        id
    }

    fn save_alert(env: &Env, alert: &Alert) {
        env.storage()
            .persistent()
            .set(&DataKey::Alert(alert.owner.clone(), alert.id), alert);
    }

    fn load_alert(env: &Env, owner: &Address, id: u64) -> Option<Alert> {
        env.storage()
            .persistent()
            .get(&DataKey::Alert(owner.clone(), id))
    }

    /// Existence and ownership collapse into one `AlertNotFound`: probing
    /// another user's ids reveals nothing.
    fn load_owned(env: &Env, owner: &Address, id: u64) -> Result<Alert, Error> {
        Self::load_alert(env, owner, id).ok_or(Error::AlertNotFound)
    }

    fn read_user_count(env: &Env, owner: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::UserAlertCount(owner.clone()))
            .unwrap_or(0)
    }
}
