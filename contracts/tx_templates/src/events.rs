use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

#[derive(Clone)]
#[contracttype]
pub struct TemplateCreatedEvent {
    pub template_id: String,
    pub category: String,
    pub size_bytes: u64,
    pub gas_units: u64,
    pub block: u32,
}

#[derive(Clone)]
#[contracttype]
pub struct TemplateUpdatedEvent {
    pub template_id: String,
    pub avg_size_bytes: u64,
    pub avg_gas_units: u64,
    pub sample_count: u64,
}

#[derive(Clone)]
#[contracttype]
pub struct TemplatesSeededEvent {
    pub seeded: u32,
    pub skipped: u32,
    pub by: Address,
}

#[derive(Clone)]
#[contracttype]
pub struct OwnershipEvent {
    pub previous: Address,
    pub current: Address,
}

pub fn emit_template_created(
    env: &Env,
    template_id: String,
    category: String,
    size_bytes: u64,
    gas_units: u64,
) {
    env.events().publish(
        ("TMPL", symbol_short!("NEW")),
        TemplateCreatedEvent {
            template_id,
            category,
            size_bytes,
            gas_units,
            block: env.ledger().sequence(),
        },
    );
}

pub fn emit_template_updated(
    env: &Env,
    template_id: String,
    avg_size_bytes: u64,
    avg_gas_units: u64,
    sample_count: u64,
) {
    env.events().publish(
        ("TMPL", symbol_short!("UPDATE")),
        TemplateUpdatedEvent {
            template_id,
            avg_size_bytes,
            avg_gas_units,
            sample_count,
        },
    );
}

pub fn emit_templates_seeded(env: &Env, seeded: u32, skipped: u32, by: Address) {
    env.events().publish(
        ("TMPL", symbol_short!("SEED")),
        TemplatesSeededEvent { seeded, skipped, by },
    );
}

pub fn emit_ownership_transferred(env: &Env, previous: Address, current: Address) {
    env.events().publish(
        ("TMPL", symbol_short!("OWNER")),
        OwnershipEvent { previous, current },
    );
}
