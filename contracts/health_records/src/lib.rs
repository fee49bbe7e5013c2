#![no_std]

pub mod emergency;
pub mod events;
pub mod validation;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Env, String,
    Symbol,
};

pub use emergency::{EmergencyAccessLogEntry, EmergencyContact};

/// Storage keys for the contract
const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const EMERGENCY_ENABLED: Symbol = symbol_short!("EMRG_ENAB");
const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) for a record storage key.
fn extend_ttl_record_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for a permission storage key.
fn extend_ttl_permission_key(env: &Env, key: &(Symbol, u64, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// A registered health record. The payload itself lives off-chain; only the
/// opaque `storage_pointer` into the external content store is kept here.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HealthRecord {
    pub id: u64,
    pub owner: Address,
    pub title: String,
    pub record_type: String,
    pub storage_pointer: String,
    pub created_at: u64,
}

/// An owner-granted permission for one (record, grantee) pair.
/// Overwritten wholesale on re-grant; never expires on its own.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Permission {
    pub can_read: bool,
    pub can_write: bool,
    pub granted_at: u64,
}

/// Contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    // Codes 100..=103 are wire-stable; deployed clients match on them.
    NotContractOwner = 100,
    Unauthorized = 101,
    RecordNotFound = 102,
    DuplicateContact = 103,
}

#[contract]
pub struct HealthRecordsContract;

#[contractimpl]
impl HealthRecordsContract {
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Initialize the contract with the contract owner.
    /// The owner is fixed for the lifetime of the deployment and is the only
    /// identity allowed to toggle the emergency access system.
    pub fn initialize(env: Env, owner: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&EMERGENCY_ENABLED, &true);

        events::publish_initialized(&env, owner);

        Ok(())
    }

    /// Get the contract owner address
    pub fn get_contract_owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Register a new health record and return its id.
    ///
    /// Any authenticated caller may create records; the caller becomes the
    /// record owner. Ids are allocated from a strictly increasing counter and
    /// are never reused.
    pub fn create_record(
        env: Env,
        caller: Address,
        title: String,
        record_type: String,
        storage_pointer: String,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        validation::validate_title(&title)?;
        validation::validate_record_type(&record_type)?;
        validation::validate_storage_pointer(&storage_pointer)?;

        let record_id: u64 = env
            .storage()
            .instance()
            .get(&RECORD_COUNTER)
            .unwrap_or(0u64)
            .saturating_add(1);
        env.storage().instance().set(&RECORD_COUNTER, &record_id);

        let record = HealthRecord {
            id: record_id,
            owner: caller.clone(),
            title: title.clone(),
            record_type: record_type.clone(),
            storage_pointer,
            created_at: env.ledger().timestamp(),
        };

        let key = (symbol_short!("RECORD"), record_id);
        env.storage().persistent().set(&key, &record);
        extend_ttl_record_key(&env, &key);

        events::publish_record_created(&env, caller, record_id, title, record_type);

        Ok(record_id)
    }

    /// Get a health record by id.
    ///
    /// Record metadata is public; the storage pointer alone grants nothing
    /// without the external store's own access control.
    pub fn get_record(env: Env, record_id: u64) -> Option<HealthRecord> {
        let key = (symbol_short!("RECORD"), record_id);
        env.storage().persistent().get(&key)
    }

    /// Get the total number of records created so far
    pub fn get_record_count(env: Env) -> u64 {
        env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
    }

    /// Grant (or replace) a grantee's permission on a record.
    ///
    /// Only the record owner may grant. A second grant for the same grantee
    /// overwrites the previous flags rather than merging them.
    pub fn grant_access(
        env: Env,
        caller: Address,
        record_id: u64,
        grantee: Address,
        can_read: bool,
        can_write: bool,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let record =
            Self::get_record(env.clone(), record_id).ok_or(ContractError::RecordNotFound)?;
        if caller != record.owner {
            return Err(ContractError::Unauthorized);
        }

        let permission = Permission {
            can_read,
            can_write,
            granted_at: env.ledger().timestamp(),
        };

        let key = (symbol_short!("PERM"), record_id, grantee.clone());
        env.storage().persistent().set(&key, &permission);
        extend_ttl_permission_key(&env, &key);

        events::publish_access_granted(&env, record.owner, grantee, record_id, can_read, can_write);

        Ok(true)
    }

    /// Check whether a principal may read a record.
    /// True for the record owner and for any grantee with `can_read`.
    /// A missing record resolves to false, never an error.
    pub fn can_access_record(env: Env, record_id: u64, principal: Address) -> bool {
        let record = match Self::get_record(env.clone(), record_id) {
            Some(record) => record,
            None => return false,
        };

        if record.owner == principal {
            return true;
        }

        match Self::get_permission(env, record_id, principal) {
            Some(permission) => permission.can_read,
            None => false,
        }
    }

    /// Raw permission lookup for a (record, grantee) pair
    pub fn get_permission(env: Env, record_id: u64, grantee: Address) -> Option<Permission> {
        let key = (symbol_short!("PERM"), record_id, grantee);
        env.storage().persistent().get(&key)
    }

    /// Register an emergency contact for the caller.
    ///
    /// At most one entry may ever exist per (owner, contact) pair: re-adding
    /// a previously removed contact fails with `DuplicateContact` because the
    /// soft-deleted entry is retained for audit continuity.
    pub fn add_emergency_contact(
        env: Env,
        caller: Address,
        contact: Address,
        contact_type: String,
        relationship: String,
        can_access_all: bool,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        validation::validate_contact_label(&contact_type)?;
        validation::validate_contact_label(&relationship)?;

        if emergency::get_contact(&env, &caller, &contact).is_some() {
            return Err(ContractError::DuplicateContact);
        }

        let entry = EmergencyContact {
            contact_type: contact_type.clone(),
            relationship: relationship.clone(),
            can_access_all,
            added_at: env.ledger().timestamp(),
            is_active: true,
        };
        emergency::set_contact(&env, &caller, &contact, &entry);

        events::publish_contact_added(
            &env,
            caller,
            contact,
            contact_type,
            relationship,
            can_access_all,
        );

        Ok(true)
    }

    /// Deactivate an emergency contact of the caller.
    ///
    /// Soft delete: the entry is kept with `is_active = false` and ceases to
    /// confer access. Removing an absent or already-inactive contact is
    /// harmless and still returns true.
    pub fn remove_emergency_contact(
        env: Env,
        caller: Address,
        contact: Address,
    ) -> Result<bool, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if let Some(mut entry) = emergency::get_contact(&env, &caller, &contact) {
            if entry.is_active {
                entry.is_active = false;
                emergency::set_contact(&env, &caller, &contact, &entry);
                events::publish_contact_removed(&env, caller, contact);
            }
        }

        Ok(true)
    }

    /// Check whether `contact` is an active emergency contact of `owner`
    pub fn is_emergency_contact(env: Env, owner: Address, contact: Address) -> bool {
        match emergency::get_contact(&env, &owner, &contact) {
            Some(entry) => entry.is_active,
            None => false,
        }
    }

    /// Raw contact lookup regardless of the active flag
    pub fn get_emergency_contact(
        env: Env,
        owner: Address,
        contact: Address,
    ) -> Option<EmergencyContact> {
        emergency::get_contact(&env, &owner, &contact)
    }

    /// Break-glass read of a record's storage pointer.
    ///
    /// Guards run in a fixed order: the system toggle, then record existence,
    /// then the caller's standing as an active all-records emergency contact
    /// of the record owner. Every successful access appends one immutable
    /// audit entry with the next sequence number for (record, caller).
    pub fn emergency_access_record(
        env: Env,
        caller: Address,
        record_id: u64,
        access_reason: String,
    ) -> Result<String, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        validation::validate_access_reason(&access_reason)?;

        let enabled = Self::is_emergency_access_enabled(env.clone());
        let record = Self::get_record(env.clone(), record_id);
        let contact = record
            .as_ref()
            .and_then(|r| emergency::get_contact(&env, &r.owner, &caller));

        emergency::evaluate_break_glass(enabled, record.as_ref(), contact.as_ref())?;
        let record = record.ok_or(ContractError::RecordNotFound)?;

        let sequence = emergency::next_sequence(&env, record_id, &caller);
        let entry = EmergencyAccessLogEntry {
            record_owner: record.owner.clone(),
            access_reason: access_reason.clone(),
            accessed_at: env.ledger().timestamp(),
            is_valid: true,
        };
        emergency::set_log_entry(&env, record_id, &caller, sequence, &entry);

        events::publish_emergency_access(
            &env,
            caller,
            record.owner,
            record_id,
            sequence,
            access_reason,
        );

        Ok(record.storage_pointer)
    }

    /// Read-only preflight of the break-glass guards.
    /// Answers whether `contact` could emergency-access the record right now,
    /// without authenticating, logging, or mutating anything.
    pub fn can_emergency_access(env: Env, record_id: u64, contact: Address) -> bool {
        let enabled = Self::is_emergency_access_enabled(env.clone());
        let record = Self::get_record(env.clone(), record_id);
        let entry = record
            .as_ref()
            .and_then(|r| emergency::get_contact(&env, &r.owner, &contact));

        emergency::evaluate_break_glass(enabled, record.as_ref(), entry.as_ref()).is_ok()
    }

    /// Raw audit log lookup by (record, contact, sequence)
    pub fn get_emergency_access_log(
        env: Env,
        record_id: u64,
        contact: Address,
        sequence: u64,
    ) -> Option<EmergencyAccessLogEntry> {
        emergency::get_log_entry(&env, record_id, &contact, sequence)
    }

    /// Number of logged emergency accesses for a (record, contact) pair.
    /// Sequences run 1..=count with no gaps.
    pub fn get_emergency_access_count(env: Env, record_id: u64, contact: Address) -> u64 {
        emergency::access_count(&env, record_id, &contact)
    }

    /// Flip the global emergency access system and return the new state.
    /// Restricted to the contract owner. While disabled, the break-glass path
    /// is closed entirely; owner-granted permissions are unaffected.
    pub fn toggle_emergency_access_system(
        env: Env,
        caller: Address,
    ) -> Result<bool, ContractError> {
        caller.require_auth();

        let owner = Self::get_contract_owner(env.clone())?;
        if caller != owner {
            return Err(ContractError::NotContractOwner);
        }

        let enabled = !Self::is_emergency_access_enabled(env.clone());
        env.storage().instance().set(&EMERGENCY_ENABLED, &enabled);

        events::publish_system_toggled(&env, caller, enabled);

        Ok(enabled)
    }

    /// Current state of the emergency access system
    pub fn is_emergency_access_enabled(env: Env) -> bool {
        env.storage()
            .instance()
            .get(&EMERGENCY_ENABLED)
            .unwrap_or(true)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}



#[cfg(test)]
mod test_toggle;
