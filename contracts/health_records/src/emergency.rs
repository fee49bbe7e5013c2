use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

use crate::{ContractError, HealthRecord};

// ── Storage keys ──────────────────────────────────────────────
const EMRG_CONTACT: Symbol = symbol_short!("EMRG_CON");
const EMRG_LOG: Symbol = symbol_short!("EMRG_LOG");
const EMRG_COUNTER: Symbol = symbol_short!("EMRG_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

fn extend_ttl_contact_key(env: &Env, key: &(Symbol, Address, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_log_key(env: &Env, key: &(Symbol, u64, Address, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Types ─────────────────────────────────────────────────────

/// A break-glass contact registered by a record owner.
///
/// Removal soft-deletes: the entry survives with `is_active = false` so the
/// audit trail keeps its history, and the (owner, contact) key can never be
/// reused for a fresh registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyContact {
    pub contact_type: String,
    pub relationship: String,
    /// Blanket access to every record of the owner. The break-glass path
    /// only honors contacts with this flag; there is no per-record-type scope.
    pub can_access_all: bool,
    pub added_at: u64,
    pub is_active: bool,
}

/// Audit entry for one successful break-glass access. Written once, never
/// deleted.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyAccessLogEntry {
    pub record_owner: Address,
    pub access_reason: String,
    pub accessed_at: u64,
    /// Guard state at write time. Entries are only written on success, so
    /// this is always true today; kept explicit for audit readers.
    pub is_valid: bool,
}

// ── Storage functions ─────────────────────────────────────────

/// Raw contact lookup, active or not
pub fn get_contact(env: &Env, owner: &Address, contact: &Address) -> Option<EmergencyContact> {
    let key = (EMRG_CONTACT, owner.clone(), contact.clone());
    env.storage().persistent().get(&key)
}

/// Insert or overwrite the contact entry for (owner, contact)
pub fn set_contact(env: &Env, owner: &Address, contact: &Address, entry: &EmergencyContact) {
    let key = (EMRG_CONTACT, owner.clone(), contact.clone());
    env.storage().persistent().set(&key, entry);
    extend_ttl_contact_key(env, &key);
}

/// Number of log entries written for (record, contact) so far
pub fn access_count(env: &Env, record_id: u64, contact: &Address) -> u64 {
    let key = (EMRG_COUNTER, record_id, contact.clone());
    env.storage().persistent().get(&key).unwrap_or(0)
}

/// Advance the per-(record, contact) sequence counter and return the new
/// value. Sequences start at 1 and are dense: each call hands out the next
/// integer under the ledger's per-transaction atomicity.
pub fn next_sequence(env: &Env, record_id: u64, contact: &Address) -> u64 {
    let key = (EMRG_COUNTER, record_id, contact.clone());
    let sequence: u64 = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().persistent().set(&key, &sequence);
    sequence
}

/// Append a log entry at (record, contact, sequence)
pub fn set_log_entry(
    env: &Env,
    record_id: u64,
    contact: &Address,
    sequence: u64,
    entry: &EmergencyAccessLogEntry,
) {
    let key = (EMRG_LOG, record_id, contact.clone(), sequence);
    env.storage().persistent().set(&key, entry);
    extend_ttl_log_key(env, &key);
}

/// Indexed log lookup
pub fn get_log_entry(
    env: &Env,
    record_id: u64,
    contact: &Address,
    sequence: u64,
) -> Option<EmergencyAccessLogEntry> {
    let key = (EMRG_LOG, record_id, contact.clone(), sequence);
    env.storage().persistent().get(&key)
}

// ── Break-glass guard ─────────────────────────────────────────

/// The break-glass decision, evaluated over explicit inputs so it stays pure.
///
/// Guard order is part of the contract's observable behavior: the system
/// toggle is checked first, then record existence, then the contact's
/// standing. A contact qualifies only while active and holding
/// `can_access_all`.
pub fn evaluate_break_glass(
    enabled: bool,
    record: Option<&HealthRecord>,
    contact: Option<&EmergencyContact>,
) -> Result<(), ContractError> {
    if !enabled {
        return Err(ContractError::Unauthorized);
    }

    if record.is_none() {
        return Err(ContractError::RecordNotFound);
    }

    match contact {
        Some(entry) if entry.is_active && entry.can_access_all => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}
