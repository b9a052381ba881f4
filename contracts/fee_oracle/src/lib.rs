#![no_std]
#![allow(clippy::too_many_arguments)]


mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{AverageUpdate, Congestion, FeeRateRecord, FeeSummary, TxAverage};

use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env, String, Vec};

// ==================== Storage Keys ====================

#[contracttype]
pub enum DataKey {
    // Singleton / lifecycle — instance storage.
    // (Owner and writer set live under access_control's own keys.)
    Initialized,
    CurrentFeeRate,  // u64
    LastUpdateBlock, // u32
    TotalUpdates,    // u64
    FeeToken,        // Address — balance source for check_sufficient_balance

    // Append-only snapshot log — persistent, keyed by block height.
    FeeHistory(u32), // FeeRateRecord

    // Rolling averages — persistent, keyed by transaction type.
    TxAverage(String), // TxAverage
}

// ==================== Constants ====================

/// Serialized size of a plain transfer, in bytes.
const TRANSFER_SIZE_BYTES: u64 = 180;
/// Base size of a contract call before complexity scaling.
const CONTRACT_CALL_BASE_BYTES: u64 = 250;
/// Additional bytes charged per unit of call complexity.
const CONTRACT_CALL_BYTES_PER_UNIT: u64 = 50;
/// Fallback NFT-mint size when no observed average exists.
const NFT_MINT_FALLBACK_BYTES: u64 = 450;
/// Fallback DEX-swap size when no observed average exists.
const SWAP_FALLBACK_BYTES: u64 = 500;
/// Recommended fee buffer multiplier.
const BUFFER_MULTIPLIER: u64 = 2;

// ==================== Contract ====================

#[contract]
pub struct FeeOracle;

#[contractimpl]
impl FeeOracle {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Initialise the oracle with its first fee rate. Must be called exactly
    /// once; the caller becomes the owner and is implicitly authorized to
    /// write. Records the first snapshot at the current block.
    pub fn initialize(env: Env, caller: Address, initial_rate: u64) -> Result<(), Error> {
        caller.require_auth();
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        if initial_rate == 0 {
            return Err(Error::InvalidFee);
        }
        access_control::set_owner(&env, &caller).map_err(|_| Error::AlreadyInitialized)?;
        env.storage().instance().set(&DataKey::Initialized, &true);

        Self::record_snapshot(&env, initial_rate, Congestion::Medium, &caller);
        env.storage().instance().set(&DataKey::TotalUpdates, &1u64);

        events::emit_initialized(&env, caller, initial_rate);
        Ok(())
    }

    pub fn is_oracle_initialized(env: Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    // ------------------------------------------------------------------
    // Rate updates
    // ------------------------------------------------------------------

    /// Record a new network fee rate. Authorized writers only.
    /// A snapshot at the current block overwrites any prior snapshot at
    /// that exact height; the history is otherwise append-only.
    pub fn update_fee_rate(
        env: Env,
        caller: Address,
        new_rate: u64,
        congestion: Congestion,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_authorized(&env, &caller)?;
        if new_rate == 0 {
            return Err(Error::InvalidFee);
        }

        Self::record_snapshot(&env, new_rate, congestion, &caller);
        let total: u64 = env
            .storage()
            .instance()
            .get(&DataKey::TotalUpdates)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&DataKey::TotalUpdates, &total);

        events::emit_rate_updated(&env, new_rate, congestion, caller);
        Ok(())
    }

    /// Fold one observed absolute fee into the rolling average for `tx_type`.
    /// The first sample seeds the average.
    pub fn update_transaction_average(
        env: Env,
        caller: Address,
        tx_type: String,
        observed_fee: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_authorized(&env, &caller)?;
        Self::apply_average(&env, &tx_type, observed_fee)
    }

    /// Fold many observations in one call under a single authorization
    /// check. Per-item tolerant: a rejected item (zero fee) yields `false`
    /// in its result slot while the remaining items still apply.
    pub fn batch_update_averages(
        env: Env,
        caller: Address,
        updates: Vec<AverageUpdate>,
    ) -> Result<Vec<bool>, Error> {
        caller.require_auth();
        access_control::require_authorized(&env, &caller)?;

        let mut results = Vec::new(&env);
        for update in updates.iter() {
            let applied = Self::apply_average(&env, &update.tx_type, update.observed_fee).is_ok();
            results.push_back(applied);
        }
        Ok(results)
    }

    // ------------------------------------------------------------------
    // Administration
    // ------------------------------------------------------------------

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::transfer_ownership(&env, &caller, &new_owner)?;
        events::emit_ownership_transferred(&env, caller, new_owner);
        Ok(())
    }

    /// Grant `writer` the right to post rate and average updates.
    pub fn authorize_oracle(env: Env, caller: Address, writer: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::authorize(&env, &caller, &writer)?;
        events::emit_writer_authorized(&env, writer, caller);
        Ok(())
    }

    pub fn revoke_oracle(env: Env, caller: Address, writer: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::revoke(&env, &caller, &writer)?;
        events::emit_writer_revoked(&env, writer, caller);
        Ok(())
    }

    /// Configure the token consulted by `check_sufficient_balance`.
    pub fn set_fee_token(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::FeeToken, &token);
        Ok(())
    }

    pub fn is_authorized_oracle(env: Env, addr: Address) -> bool {
        access_control::is_authorized(&env, &addr)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn get_current_fee_rate(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::CurrentFeeRate)
            .unwrap_or(0)
    }

    pub fn get_last_update_block(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&DataKey::LastUpdateBlock)
            .unwrap_or(0)
    }

    pub fn get_total_updates(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalUpdates)
            .unwrap_or(0)
    }

    /// Snapshot recorded at `block`, or `InvalidBlock` if none was written
    /// at that exact height.
    pub fn get_fee_at_block(env: Env, block: u32) -> Result<FeeRateRecord, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::FeeHistory(block))
            .ok_or(Error::InvalidBlock)
    }

    /// Rolling average for `tx_type`; 0 when no sample has been observed.
    pub fn get_transaction_average(env: Env, tx_type: String) -> u64 {
        env.storage()
            .persistent()
            .get::<DataKey, TxAverage>(&DataKey::TxAverage(tx_type))
            .map(|entry| entry.average)
            .unwrap_or(0)
    }

    pub fn get_fee_summary(env: Env) -> FeeSummary {
        FeeSummary {
            current_fee: Self::get_current_fee_rate(env.clone()),
            last_update_block: Self::get_last_update_block(env.clone()),
            total_updates: Self::get_total_updates(env.clone()),
            is_initialized: env.storage().instance().has(&DataKey::Initialized),
        }
    }

    /// Suggested fee ceiling for callers that want headroom over the
    /// current rate.
    pub fn get_recommended_buffer(env: Env) -> u64 {
        Self::get_current_fee_rate(env) * BUFFER_MULTIPLIER
    }

    // ------------------------------------------------------------------
    // Estimation
    // ------------------------------------------------------------------

    /// Fee for a plain transfer: fixed byte size times the current rate.
    pub fn estimate_transfer_fee(env: Env) -> u64 {
        TRANSFER_SIZE_BYTES * Self::get_current_fee_rate(env)
    }

    /// Fee for a contract call whose size scales linearly with `complexity`.
    pub fn estimate_contract_call_fee(env: Env, complexity: u64) -> u64 {
        (CONTRACT_CALL_BASE_BYTES + complexity * CONTRACT_CALL_BYTES_PER_UNIT)
            * Self::get_current_fee_rate(env)
    }

    /// NFT mint estimate. An observed rolling average is already an
    /// absolute fee and is returned unchanged; only the byte-size fallback
    /// is multiplied by the current rate.
    pub fn estimate_nft_mint_fee(env: Env) -> u64 {
        let avg = Self::get_transaction_average(env.clone(), String::from_str(&env, "nft-mint"));
        if avg > 0 {
            return avg;
        }
        NFT_MINT_FALLBACK_BYTES * Self::get_current_fee_rate(env)
    }

    /// Swap estimate for a specific DEX, same absolute-average-first rule
    /// as `estimate_nft_mint_fee`.
    pub fn estimate_swap_fee(env: Env, dex_id: String) -> u64 {
        let avg = Self::get_transaction_average(env.clone(), dex_id);
        if avg > 0 {
            return avg;
        }
        SWAP_FALLBACK_BYTES * Self::get_current_fee_rate(env)
    }

    /// Whether `account` holds at least `required_fee` of the configured
    /// fee token. An unconfigured token behaves as a zero balance.
    pub fn check_sufficient_balance(env: Env, account: Address, required_fee: u64) -> bool {
        let token_addr: Option<Address> = env.storage().instance().get(&DataKey::FeeToken);
        match token_addr {
            Some(addr) => {
                let balance = token::Client::new(&env, &addr).balance(&account);
                balance >= required_fee as i128
            }
            None => required_fee == 0,
        }
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    fn record_snapshot(env: &Env, fee_rate: u64, congestion: Congestion, recorded_by: &Address) {
        let block = env.ledger().sequence();
        let record = FeeRateRecord {
            fee_rate,
            timestamp: env.ledger().timestamp(),
            congestion,
            recorded_by: recorded_by.clone(),
        };
        env.storage()
            .persistent()
            .set(&DataKey::FeeHistory(block), &record);
        env.storage()
            .instance()
            .set(&DataKey::CurrentFeeRate, &fee_rate);
        env.storage()
            .instance()
            .set(&DataKey::LastUpdateBlock, &block);
    }

    /// Cumulative integer mean with truncating division. The read of
    /// `(average, sample_count)` and the write of the new pair happen
    /// within one invocation, so the update is atomic.
    fn apply_average(env: &Env, tx_type: &String, observed_fee: u64) -> Result<(), Error> {
        if observed_fee == 0 {
            return Err(Error::InvalidFee);
        }
        let key = DataKey::TxAverage(tx_type.clone());
        let entry: TxAverage = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(TxAverage {
                average: 0,
                sample_count: 0,
            });

        let total = entry.average as u128 * entry.sample_count as u128 + observed_fee as u128;
        let count = entry.sample_count + 1;
        let updated = TxAverage {
            average: (total / count as u128) as u64,
            sample_count: count,
        };
        env.storage().persistent().set(&key, &updated);

        events::emit_average_updated(
            env,
            tx_type.clone(),
            observed_fee,
            updated.average,
            updated.sample_count,
        );
        Ok(())
    }
}
