#![no_std]

#[cfg(test)]
mod test;

mod errors;
mod events;
mod types;

pub use errors::Error;
pub use types::{
    FullEstimate, LendingOperations, SbtcOperations, Template, TemplateComparison, TemplateUpdate,
};

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Vec};

// ==================== Storage Keys ====================

#[contracttype]
pub enum DataKey {
    Initialized,
    /// Configuration pointer to the fee-oracle identity, for off-chain
    /// consumers that combine template sizes with the live rate.
    FeeOracle,
    TotalTemplates, // u64

    // Persistent maps.
    Template(String),
    CategoryCount(String), // u64
}

// ==================== Constants ====================

/// Fixed planning multiplier for `get_full_estimate`, in micro-units per
/// byte. Deliberately independent of the oracle's live rate.
const PLANNING_FEE_PER_BYTE: u64 = 2;

/// Curated seed set: (id, avg size bytes, avg gas units, description,
/// category). Sizes and costs are calibrated against observed mainnet
/// transactions.
const SEED_TEMPLATES: [(&str, u64, u64, &str, &str); 31] = [
    // Plain transfers
    ("stx-transfer", 180, 1000, "Simple STX transfer", "transfer"),
    ("stx-transfer-memo", 200, 1200, "STX transfer with memo", "transfer"),
    // Fungible tokens
    ("ft-transfer", 300, 2500, "Transfer fungible token", "token"),
    ("ft-mint", 350, 3000, "Mint fungible token", "token"),
    ("ft-burn", 280, 2400, "Burn fungible token", "token"),
    // NFTs
    ("nft-mint", 450, 5500, "Mint NFT", "nft"),
    ("nft-transfer", 400, 4000, "Transfer NFT", "nft"),
    ("nft-mint-metadata", 520, 6200, "Mint NFT with metadata", "nft"),
    ("nft-list-marketplace", 480, 5000, "List NFT on marketplace", "nft"),
    // DEX
    ("dex-swap-alex", 500, 3950, "Token swap on ALEX", "dex"),
    ("dex-swap-bitflow", 550, 4200, "Token swap on Bitflow", "dex"),
    ("dex-swap-velar", 530, 4100, "Token swap on Velar", "dex"),
    ("dex-add-liquidity", 620, 5500, "Add liquidity to pool", "dex"),
    ("dex-remove-liquidity", 600, 5200, "Remove liquidity from pool", "dex"),
    // sBTC bridge
    ("sbtc-peg-in", 700, 8000, "sBTC peg-in (BTC->sBTC)", "sbtc"),
    ("sbtc-peg-out", 750, 8500, "sBTC peg-out (sBTC->BTC)", "sbtc"),
    ("sbtc-transfer", 300, 2800, "Transfer sBTC", "sbtc"),
    // DeFi
    ("defi-lend", 600, 7000, "Lend assets", "defi"),
    ("defi-borrow", 650, 7500, "Borrow assets", "defi"),
    ("defi-repay", 550, 6500, "Repay loan", "defi"),
    ("defi-stake", 500, 6000, "Stake assets", "defi"),
    ("defi-unstake", 480, 5800, "Unstake assets", "defi"),
    // Multisig
    ("multisig-submit", 400, 4500, "Submit multisig transaction", "multisig"),
    ("multisig-confirm", 250, 2200, "Confirm multisig transaction", "multisig"),
    ("multisig-revoke", 240, 2000, "Revoke multisig confirmation", "multisig"),
    // Contract deployment and calls
    ("contract-deploy-small", 10000, 25000, "Deploy small contract", "contract"),
    ("contract-deploy-medium", 50000, 60000, "Deploy medium contract", "contract"),
    ("contract-deploy-large", 100000, 120000, "Deploy large contract", "contract"),
    ("contract-call-simple", 250, 2000, "Simple contract call", "contract"),
    ("contract-call-complex", 500, 5000, "Complex contract call", "contract"),
    // Stacking
    ("stacking-stack-stx", 420, 4800, "Stack STX", "stacking"),
];

/// Ids scanned by `get_cheapest_dex_swap`.
const DEX_SWAP_IDS: [&str; 3] = ["dex-swap-alex", "dex-swap-bitflow", "dex-swap-velar"];

// ==================== Contract ====================

#[contract]
pub struct TxTemplates;

#[contractimpl]
impl TxTemplates {
    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }
        access_control::set_owner(&env, &admin).map_err(|_| Error::AlreadyInitialized)?;
        env.storage().instance().set(&DataKey::Initialized, &true);
        Ok(())
    }

    /// Populate the curated seed set. Idempotent per id: entries already
    /// present keep their accumulated averages, only missing ids are
    /// written. The call itself always succeeds for the owner.
    pub fn initialize_templates(env: Env, caller: Address) -> Result<u32, Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;

        let mut seeded = 0u32;
        let mut skipped = 0u32;
        for (id, size, gas, description, category) in SEED_TEMPLATES.iter() {
            let key = String::from_str(&env, id);
            if env.storage().persistent().has(&DataKey::Template(key.clone())) {
                skipped += 1;
                continue;
            }
            Self::write_new_template(
                &env,
                &key,
                *size,
                *gas,
                &String::from_str(&env, description),
                &String::from_str(&env, category),
            );
            seeded += 1;
        }
        events::emit_templates_seeded(&env, seeded, skipped, caller);
        Ok(seeded)
    }

    // ------------------------------------------------------------------
    // Registry writes (owner only)
    // ------------------------------------------------------------------

    pub fn create_template(
        env: Env,
        caller: Address,
        id: String,
        size_bytes: u64,
        gas_units: u64,
        description: String,
        category: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        Self::validate_positive(size_bytes, gas_units)?;
        if env.storage().persistent().has(&DataKey::Template(id.clone())) {
            return Err(Error::TemplateExists);
        }
        Self::write_new_template(&env, &id, size_bytes, gas_units, &description, &category);
        Ok(())
    }

    /// Fold one observed (size, gas) pair into the template's running
    /// averages. The means are tracked independently with truncating
    /// integer division.
    pub fn update_template(
        env: Env,
        caller: Address,
        id: String,
        size_bytes: u64,
        gas_units: u64,
    ) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        Self::apply_update(&env, &id, size_bytes, gas_units)
    }

    /// Apply many observations under one authorization check. Per-item
    /// tolerant: an unknown id or zero value yields `false` in its result
    /// slot while the remaining items still apply.
    pub fn batch_update_templates(
        env: Env,
        caller: Address,
        updates: Vec<TemplateUpdate>,
    ) -> Result<Vec<bool>, Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;

        let mut results = Vec::new(&env);
        for item in updates.iter() {
            let ok = Self::apply_update(&env, &item.template_id, item.size_bytes, item.gas_units)
                .is_ok();
            results.push_back(ok);
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

    pub fn set_fee_oracle(env: Env, caller: Address, oracle: Address) -> Result<(), Error> {
        caller.require_auth();
        access_control::require_owner(&env, &caller)?;
        env.storage().instance().set(&DataKey::FeeOracle, &oracle);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn get_template(env: Env, id: String) -> Option<Template> {
        env.storage().persistent().get(&DataKey::Template(id))
    }

    pub fn get_template_size(env: Env, id: String) -> Result<u64, Error> {
        Ok(Self::load(&env, &id)?.avg_size_bytes)
    }

    pub fn get_template_gas(env: Env, id: String) -> Result<u64, Error> {
        Ok(Self::load(&env, &id)?.avg_gas_units)
    }

    /// Planning quote: the fee field uses the fixed multiplier, not the
    /// live oracle rate.
    pub fn get_full_estimate(env: Env, id: String) -> Result<FullEstimate, Error> {
        let t = Self::load(&env, &id)?;
        Ok(FullEstimate {
            template_id: id,
            size_bytes: t.avg_size_bytes,
            gas_units: t.avg_gas_units,
            description: t.description,
            category: t.category,
            estimated_fee_micro: t.avg_size_bytes * PLANNING_FEE_PER_BYTE,
        })
    }

    /// Side-by-side comparison. `cheaper` is decided by average size, the
    /// first template winning ties.
    pub fn compare_templates(
        env: Env,
        id_a: String,
        id_b: String,
    ) -> Result<TemplateComparison, Error> {
        let a = Self::load(&env, &id_a)?;
        let b = Self::load(&env, &id_b)?;
        let cheaper = if a.avg_size_bytes <= b.avg_size_bytes {
            id_a.clone()
        } else {
            id_b.clone()
        };
        Ok(TemplateComparison {
            template_a: id_a,
            size_a: a.avg_size_bytes,
            gas_a: a.avg_gas_units,
            template_b: id_b,
            size_b: b.avg_size_bytes,
            gas_b: b.avg_gas_units,
            cheaper,
        })
    }

    /// Fee estimate for one template at a caller-supplied per-byte rate.
    pub fn estimate_fee_for_template(
        env: Env,
        id: String,
        fee_rate_per_byte: u64,
    ) -> Result<u64, Error> {
        Ok(Self::load(&env, &id)?.avg_size_bytes * fee_rate_per_byte)
    }

    /// Smallest-size swap among the curated DEX swap templates. Errors
    /// only if none of them are registered.
    pub fn get_cheapest_dex_swap(env: Env) -> Result<String, Error> {
        let mut best: Option<(String, u64)> = None;
        for id in DEX_SWAP_IDS.iter() {
            let key = String::from_str(&env, id);
            if let Some(t) = Self::get_template(env.clone(), key.clone()) {
                match &best {
                    Some((_, size)) if *size <= t.avg_size_bytes => {}
                    _ => best = Some((key, t.avg_size_bytes)),
                }
            }
        }
        best.map(|(id, _)| id).ok_or(Error::TemplateNotFound)
    }

    pub fn get_category_count(env: Env, category: String) -> u64 {
        env.storage()
            .persistent()
            .get(&DataKey::CategoryCount(category))
            .unwrap_or(0)
    }

    pub fn get_total_templates(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TotalTemplates)
            .unwrap_or(0)
    }

    pub fn get_sbtc_operations(env: Env) -> SbtcOperations {
        SbtcOperations {
            peg_in: Self::get_template(env.clone(), String::from_str(&env, "sbtc-peg-in")),
            peg_out: Self::get_template(env.clone(), String::from_str(&env, "sbtc-peg-out")),
            transfer: Self::get_template(env.clone(), String::from_str(&env, "sbtc-transfer")),
        }
    }

    pub fn get_defi_lending_operations(env: Env) -> LendingOperations {
        LendingOperations {
            lend: Self::get_template(env.clone(), String::from_str(&env, "defi-lend")),
            borrow: Self::get_template(env.clone(), String::from_str(&env, "defi-borrow")),
            repay: Self::get_template(env.clone(), String::from_str(&env, "defi-repay")),
        }
    }

    pub fn get_fee_oracle(env: Env) -> Option<Address> {
        env.storage().instance().get(&DataKey::FeeOracle)
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    fn validate_positive(size_bytes: u64, gas_units: u64) -> Result<(), Error> {
        if size_bytes == 0 || gas_units == 0 {
            return Err(Error::InvalidGas);
        }
        Ok(())
    }

    fn load(env: &Env, id: &String) -> Result<Template, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Template(id.clone()))
            .ok_or(Error::TemplateNotFound)
    }

    /// Stores a fresh template with the creation values as sample #1 and
    /// bumps the total and category counters.
    fn write_new_template(
        env: &Env,
        id: &String,
        size_bytes: u64,
        gas_units: u64,
        description: &String,
        category: &String,
    ) {
        let template = Template {
            avg_size_bytes: size_bytes,
            avg_gas_units: gas_units,
            description: description.clone(),
            category: category.clone(),
            last_updated: env.ledger().sequence(),
            sample_count: 1,
        };
        env.storage()
            .persistent()
            .set(&DataKey::Template(id.clone()), &template);

        let total = Self::get_total_templates(env.clone()) + 1;
        env.storage().instance().set(&DataKey::TotalTemplates, &total);

        let count: u64 = env
            .storage()
            .persistent()
            .get(&DataKey::CategoryCount(category.clone()))
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&DataKey::CategoryCount(category.clone()), &(count + 1));

        events::emit_template_created(
            env,
            id.clone(),
            category.clone(),
            size_bytes,
            gas_units,
        );
    }

    fn apply_update(env: &Env, id: &String, size_bytes: u64, gas_units: u64) -> Result<(), Error> {
        Self::validate_positive(size_bytes, gas_units)?;
        let mut t = Self::load(env, id)?;

        // u128 intermediates so accumulated sums cannot overflow.
        let n = t.sample_count as u128;
        t.avg_size_bytes =
            ((t.avg_size_bytes as u128 * n + size_bytes as u128) / (n + 1)) as u64;
        t.avg_gas_units =
            ((t.avg_gas_units as u128 * n + gas_units as u128) / (n + 1)) as u64;
        t.sample_count += 1;
        t.last_updated = env.ledger().sequence();

        env.storage()
            .persistent()
            .set(&DataKey::Template(id.clone()), &t);
        events::emit_template_updated(
            env,
            id.clone(),
            t.avg_size_bytes,
            t.avg_gas_units,
            t.sample_count,
        );
        Ok(())
    }
}
