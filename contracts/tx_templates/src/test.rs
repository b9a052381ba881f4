#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, vec, Address, Env, String};

fn setup() -> (Env, TxTemplatesClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register_contract(None, TxTemplates);
    let client = TxTemplatesClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);
    (env, client, admin)
}

fn seeded() -> (Env, TxTemplatesClient<'static>, Address) {
    let (env, client, admin) = setup();
    client.initialize_templates(&admin);
    (env, client, admin)
}

fn s(env: &Env, text: &str) -> String {
    String::from_str(env, text)
}

// ==================== Lifecycle and seeding ====================

#[test]
fn initialize_twice_rejected() {
    let (env, client, _) = setup();
    let other = Address::generate(&env);
    assert_eq!(
        client.try_initialize(&other),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn seed_populates_thirty_one_templates() {
    let (_env, client, _) = seeded();
    assert_eq!(client.get_total_templates(), 31);
}

#[test]
fn seed_category_counts() {
    let (env, client, _) = seeded();
    assert_eq!(client.get_category_count(&s(&env, "transfer")), 2);
    assert_eq!(client.get_category_count(&s(&env, "token")), 3);
    assert_eq!(client.get_category_count(&s(&env, "nft")), 4);
    assert_eq!(client.get_category_count(&s(&env, "dex")), 5);
    assert_eq!(client.get_category_count(&s(&env, "sbtc")), 3);
    assert_eq!(client.get_category_count(&s(&env, "defi")), 5);
    assert_eq!(client.get_category_count(&s(&env, "multisig")), 3);
    assert_eq!(client.get_category_count(&s(&env, "contract")), 5);
    assert_eq!(client.get_category_count(&s(&env, "stacking")), 1);
    assert_eq!(client.get_category_count(&s(&env, "unknown")), 0);
}

#[test]
fn seed_values_pinned() {
    let (env, client, _) = seeded();

    let stx = client.get_template(&s(&env, "stx-transfer")).unwrap();
    assert_eq!(stx.avg_size_bytes, 180);
    assert_eq!(stx.avg_gas_units, 1000);
    assert_eq!(stx.description, s(&env, "Simple STX transfer"));
    assert_eq!(stx.category, s(&env, "transfer"));
    assert_eq!(stx.sample_count, 1);

    let mint = client.get_template(&s(&env, "nft-mint")).unwrap();
    assert_eq!(mint.avg_size_bytes, 450);
    assert_eq!(mint.avg_gas_units, 5500);
    assert_eq!(mint.description, s(&env, "Mint NFT"));

    let deploy = client.get_template(&s(&env, "contract-deploy-medium")).unwrap();
    assert_eq!(deploy.avg_size_bytes, 50000);
}

#[test]
fn reseed_is_idempotent_per_id() {
    let (env, client, admin) = seeded();

    // Accumulate observations on one seeded entry, then re-seed.
    client.update_template(&admin, &s(&env, "stx-transfer"), &190, &1100);
    client.initialize_templates(&admin);

    assert_eq!(client.get_total_templates(), 31);
    let stx = client.get_template(&s(&env, "stx-transfer")).unwrap();
    assert_eq!(stx.sample_count, 2);
    assert_eq!(stx.avg_size_bytes, 185);
}

#[test]
fn seed_is_owner_only() {
    let (env, client, _) = setup();
    let random = Address::generate(&env);
    assert_eq!(
        client.try_initialize_templates(&random),
        Err(Ok(Error::Unauthorized))
    );
}

// ==================== Creation and validation ====================

#[test]
fn create_template_then_read_back() {
    let (env, client, admin) = setup();

    client.create_template(
        &admin,
        &s(&env, "custom-op"),
        &800,
        &9000,
        &s(&env, "Custom operation"),
        &s(&env, "custom"),
    );
    let t = client.get_template(&s(&env, "custom-op")).unwrap();
    assert_eq!(t.avg_size_bytes, 800);
    assert_eq!(t.avg_gas_units, 9000);
    assert_eq!(t.sample_count, 1);
    assert_eq!(client.get_total_templates(), 1);
    assert_eq!(client.get_category_count(&s(&env, "custom")), 1);
}

#[test]
fn duplicate_id_rejected() {
    let (env, client, admin) = seeded();
    assert_eq!(
        client.try_create_template(
            &admin,
            &s(&env, "stx-transfer"),
            &180,
            &1000,
            &s(&env, "Simple STX transfer"),
            &s(&env, "transfer"),
        ),
        Err(Ok(Error::TemplateExists))
    );
    assert_eq!(client.get_total_templates(), 31);
}

#[test]
fn zero_size_or_gas_rejected() {
    let (env, client, admin) = setup();
    assert_eq!(
        client.try_create_template(
            &admin,
            &s(&env, "bad"),
            &0,
            &1000,
            &s(&env, "Bad"),
            &s(&env, "misc"),
        ),
        Err(Ok(Error::InvalidGas))
    );
    assert_eq!(
        client.try_create_template(
            &admin,
            &s(&env, "bad"),
            &100,
            &0,
            &s(&env, "Bad"),
            &s(&env, "misc"),
        ),
        Err(Ok(Error::InvalidGas))
    );
}

#[test]
fn create_is_owner_only() {
    let (env, client, _) = setup();
    let random = Address::generate(&env);
    assert_eq!(
        client.try_create_template(
            &random,
            &s(&env, "custom-op"),
            &800,
            &9000,
            &s(&env, "Custom operation"),
            &s(&env, "custom"),
        ),
        Err(Ok(Error::Unauthorized))
    );
}

// ==================== Rolling averages ====================

#[test]
fn update_folds_observations_into_means() {
    let (env, client, admin) = seeded();
    let id = s(&env, "stx-transfer");

    client.update_template(&admin, &id, &190, &1100);
    let t = client.get_template(&id).unwrap();
    assert_eq!(t.avg_size_bytes, 185); // (180 + 190) / 2
    assert_eq!(t.avg_gas_units, 1050); // (1000 + 1100) / 2
    assert_eq!(t.sample_count, 2);

    // Cumulative form: (185*2 + 210) / 3 truncates to 193.
    client.update_template(&admin, &id, &210, &1100);
    let t = client.get_template(&id).unwrap();
    assert_eq!(t.avg_size_bytes, 193);
    assert_eq!(t.sample_count, 3);
}

#[test]
fn three_sample_mean_truncates() {
    let (env, client, admin) = setup();
    let id = s(&env, "probe");
    client.create_template(&admin, &id, &180, &1000, &s(&env, "Probe"), &s(&env, "misc"));

    client.update_template(&admin, &id, &200, &1000);
    client.update_template(&admin, &id, &210, &1000);
    // (180 + 200 + 210) / 3 = 196 with integer truncation. The cumulative
    // form hits the same value because the intermediate mean of 190 is
    // exact.
    assert_eq!(client.get_template_size(&id), 196);
}

#[test]
fn update_unknown_or_zero_rejected() {
    let (env, client, admin) = seeded();
    assert_eq!(
        client.try_update_template(&admin, &s(&env, "no-such"), &100, &1000),
        Err(Ok(Error::TemplateNotFound))
    );
    assert_eq!(
        client.try_update_template(&admin, &s(&env, "stx-transfer"), &0, &1000),
        Err(Ok(Error::InvalidGas))
    );
}

#[test]
fn batch_update_is_per_item_tolerant() {
    let (env, client, admin) = seeded();

    let results = client.batch_update_templates(
        &admin,
        &vec![
            &env,
            TemplateUpdate {
                template_id: s(&env, "stx-transfer"),
                size_bytes: 190,
                gas_units: 1100,
            },
            TemplateUpdate {
                template_id: s(&env, "no-such-template"),
                size_bytes: 100,
                gas_units: 1000,
            },
        ],
    );
    assert_eq!(results, vec![&env, true, false]);

    // The valid item landed despite the failing one.
    let t = client.get_template(&s(&env, "stx-transfer")).unwrap();
    assert_eq!(t.avg_size_bytes, 185);
    assert_eq!(t.sample_count, 2);
}

#[test]
fn batch_update_is_owner_only() {
    let (env, client, _) = seeded();
    let random = Address::generate(&env);
    assert_eq!(
        client.try_batch_update_templates(
            &random,
            &vec![
                &env,
                TemplateUpdate {
                    template_id: s(&env, "stx-transfer"),
                    size_bytes: 190,
                    gas_units: 1100,
                },
            ],
        ),
        Err(Ok(Error::Unauthorized))
    );
}

// ==================== Estimation queries ====================

#[test]
fn full_estimate_uses_planning_multiplier() {
    let (env, client, _) = seeded();
    let est = client.get_full_estimate(&s(&env, "stx-transfer"));
    assert_eq!(est.size_bytes, 180);
    assert_eq!(est.gas_units, 1000);
    assert_eq!(est.estimated_fee_micro, 360); // size * 2
    assert_eq!(est.category, s(&env, "transfer"));

    assert_eq!(
        client.try_get_full_estimate(&s(&env, "no-such")),
        Err(Ok(Error::TemplateNotFound))
    );
}

#[test]
fn compare_prefers_smaller_size_first_on_tie() {
    let (env, client, _) = seeded();

    let cmp = client.compare_templates(&s(&env, "stx-transfer"), &s(&env, "nft-mint"));
    assert_eq!(cmp.cheaper, s(&env, "stx-transfer"));
    assert_eq!(cmp.size_a, 180);
    assert_eq!(cmp.size_b, 450);

    let cmp = client.compare_templates(&s(&env, "nft-mint"), &s(&env, "stx-transfer"));
    assert_eq!(cmp.cheaper, s(&env, "stx-transfer"));

    // ft-transfer and sbtc-transfer both average 300 bytes; the first
    // argument wins the tie.
    let cmp = client.compare_templates(&s(&env, "sbtc-transfer"), &s(&env, "ft-transfer"));
    assert_eq!(cmp.cheaper, s(&env, "sbtc-transfer"));
}

#[test]
fn cheapest_dex_swap_is_alex() {
    let (env, client, _) = seeded();
    assert_eq!(client.get_cheapest_dex_swap(), s(&env, "dex-swap-alex"));
}

#[test]
fn cheapest_dex_swap_without_seed_errors() {
    let (_env, client, _) = setup();
    assert_eq!(
        client.try_get_cheapest_dex_swap(),
        Err(Ok(Error::TemplateNotFound))
    );
}

#[test]
fn estimate_fee_scales_size_by_rate() {
    let (env, client, _) = seeded();
    assert_eq!(
        client.estimate_fee_for_template(&s(&env, "stx-transfer"), &10),
        1800
    );
    assert_eq!(
        client.try_estimate_fee_for_template(&s(&env, "no-such"), &10),
        Err(Ok(Error::TemplateNotFound))
    );
}

#[test]
fn size_and_gas_lookups() {
    let (env, client, _) = seeded();
    assert_eq!(client.get_template_size(&s(&env, "dex-swap-alex")), 500);
    assert_eq!(client.get_template_gas(&s(&env, "dex-swap-alex")), 3950);
    assert_eq!(
        client.try_get_template_size(&s(&env, "no-such")),
        Err(Ok(Error::TemplateNotFound))
    );
}

// ==================== Bundled views ====================

#[test]
fn sbtc_operations_bundle() {
    let (env, client, _) = seeded();
    let ops = client.get_sbtc_operations();
    assert_eq!(ops.peg_in.unwrap().avg_size_bytes, 700);
    assert_eq!(ops.peg_out.unwrap().avg_gas_units, 8500);
    assert_eq!(
        ops.transfer.unwrap().description,
        s(&env, "Transfer sBTC")
    );
}

#[test]
fn lending_operations_bundle() {
    let (env, client, _) = seeded();
    let ops = client.get_defi_lending_operations();
    assert_eq!(ops.lend.unwrap().description, s(&env, "Lend assets"));
    assert_eq!(ops.borrow.unwrap().description, s(&env, "Borrow assets"));
    assert_eq!(ops.repay.unwrap().description, s(&env, "Repay loan"));
}

#[test]
fn bundles_tolerate_missing_entries() {
    let (_env, client, _) = setup();
    let ops = client.get_sbtc_operations();
    assert_eq!(ops.peg_in, None);
    assert_eq!(ops.peg_out, None);
    assert_eq!(ops.transfer, None);
}

// ==================== Administration ====================

#[test]
fn ownership_transfer_moves_write_rights() {
    let (env, client, admin) = setup();
    let new_owner = Address::generate(&env);

    client.transfer_ownership(&admin, &new_owner);
    client.initialize_templates(&new_owner);
    assert_eq!(
        client.try_initialize_templates(&admin),
        Err(Ok(Error::Unauthorized))
    );
}

#[test]
fn fee_oracle_pointer_is_owner_gated() {
    let (env, client, admin) = setup();
    let oracle = Address::generate(&env);
    let random = Address::generate(&env);

    assert_eq!(client.get_fee_oracle(), None);
    assert_eq!(
        client.try_set_fee_oracle(&random, &oracle),
        Err(Ok(Error::Unauthorized))
    );
    client.set_fee_oracle(&admin, &oracle);
    assert_eq!(client.get_fee_oracle(), Some(oracle));
}
