#![no_std]

//! Owner + authorized-writer gate shared by the feewatch stores.
//!
//! Each contract that links this crate gets its own independent instance:
//! the keys below are written into the *calling* contract's instance
//! storage, so the oracle, the alert registry, and the template registry
//! each keep a separate owner and writer set.
//!
//! Callers map [`AccessError`] onto their own `#[contracterror]` enum so
//! every store keeps its wire-compatible numeric `Unauthorized` code.

use soroban_sdk::{contracttype, Address, Env};

#[contracttype]
pub enum AccessKey {
    Owner,
    /// Boolean flag per authorized writer.
    Writer(Address),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessError {
    /// The store already has an owner.
    AlreadySet,
    /// Caller is not the owner.
    NotOwner,
    /// Caller is neither the owner nor an authorized writer.
    Unauthorized,
}

/// One-time owner seed. Fails if an owner was already recorded.
pub fn set_owner(env: &Env, owner: &Address) -> Result<(), AccessError> {
    if env.storage().instance().has(&AccessKey::Owner) {
        return Err(AccessError::AlreadySet);
    }
    env.storage().instance().set(&AccessKey::Owner, owner);
    Ok(())
}

pub fn owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&AccessKey::Owner)
}

/// Owner-only. Hands the store to `new_owner`; the writer set is untouched.
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    new_owner: &Address,
) -> Result<(), AccessError> {
    require_owner(env, caller)?;
    env.storage().instance().set(&AccessKey::Owner, new_owner);
    Ok(())
}

/// Owner-only. Idempotent for an already-authorized writer.
pub fn authorize(env: &Env, caller: &Address, writer: &Address) -> Result<(), AccessError> {
    require_owner(env, caller)?;
    env.storage()
        .instance()
        .set(&AccessKey::Writer(writer.clone()), &true);
    Ok(())
}

/// Owner-only. Revoking an unknown writer is a no-op.
pub fn revoke(env: &Env, caller: &Address, writer: &Address) -> Result<(), AccessError> {
    require_owner(env, caller)?;
    env.storage()
        .instance()
        .remove(&AccessKey::Writer(writer.clone()));
    Ok(())
}

/// Owner or writer. With no owner recorded this is always false.
pub fn is_authorized(env: &Env, addr: &Address) -> bool {
    match owner(env) {
        Some(o) if o == *addr => true,
        Some(_) => env
            .storage()
            .instance()
            .get(&AccessKey::Writer(addr.clone()))
            .unwrap_or(false),
        None => false,
    }
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), AccessError> {
    match owner(env) {
        Some(o) if o == *caller => Ok(()),
        _ => Err(AccessError::NotOwner),
    }
}

pub fn require_authorized(env: &Env, caller: &Address) -> Result<(), AccessError> {
    if is_authorized(env, caller) {
        return Ok(());
    }
    Err(AccessError::Unauthorized)
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::{contract, testutils::Address as _};

    #[contract]
    struct Host;

    fn in_contract<T>(f: impl FnOnce(&Env) -> T) -> T {
        let env = Env::default();
        let id = env.register_contract(None, Host);
        env.as_contract(&id, || f(&env))
    }

    #[test]
    fn owner_is_seeded_once() {
        in_contract(|env| {
            let a = Address::generate(env);
            let b = Address::generate(env);
            assert_eq!(set_owner(env, &a), Ok(()));
            assert_eq!(set_owner(env, &b), Err(AccessError::AlreadySet));
            assert_eq!(owner(env), Some(a));
        });
    }

    #[test]
    fn no_owner_fails_closed() {
        in_contract(|env| {
            let a = Address::generate(env);
            assert!(!is_authorized(env, &a));
            assert_eq!(require_owner(env, &a), Err(AccessError::NotOwner));
            assert_eq!(require_authorized(env, &a), Err(AccessError::Unauthorized));
        });
    }

    #[test]
    fn writers_can_be_authorized_and_revoked() {
        in_contract(|env| {
            let owner = Address::generate(env);
            let writer = Address::generate(env);
            set_owner(env, &owner).unwrap();

            assert!(!is_authorized(env, &writer));
            authorize(env, &owner, &writer).unwrap();
            assert!(is_authorized(env, &writer));
            assert_eq!(require_authorized(env, &writer), Ok(()));

            revoke(env, &owner, &writer).unwrap();
            assert!(!is_authorized(env, &writer));
        });
    }

    #[test]
    fn only_owner_manages_writers() {
        in_contract(|env| {
            let owner = Address::generate(env);
            let other = Address::generate(env);
            set_owner(env, &owner).unwrap();

            assert_eq!(
                authorize(env, &other, &other),
                Err(AccessError::NotOwner)
            );
            assert_eq!(revoke(env, &other, &owner), Err(AccessError::NotOwner));
        });
    }

    #[test]
    fn ownership_transfer_moves_the_gate() {
        in_contract(|env| {
            let owner = Address::generate(env);
            let next = Address::generate(env);
            set_owner(env, &owner).unwrap();

            assert_eq!(
                transfer_ownership(env, &next, &next),
                Err(AccessError::NotOwner)
            );
            transfer_ownership(env, &owner, &next).unwrap();
            assert!(is_authorized(env, &next));
            assert!(!is_authorized(env, &owner));
        });
    }
}
