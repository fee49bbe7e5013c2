use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

/// Event published when a new health record is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub record_id: u64,
    pub owner: Address,
    pub title: String,
    pub record_type: String,
    pub timestamp: u64,
}

/// Event published when a record owner grants (or replaces) a permission.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub record_id: u64,
    pub owner: Address,
    pub grantee: Address,
    pub can_read: bool,
    pub can_write: bool,
    pub timestamp: u64,
}

/// Event published when an emergency contact is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContactAddedEvent {
    pub owner: Address,
    pub contact: Address,
    pub contact_type: String,
    pub relationship: String,
    pub can_access_all: bool,
    pub timestamp: u64,
}

/// Event published when an emergency contact is deactivated.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContactRemovedEvent {
    pub owner: Address,
    pub contact: Address,
    pub timestamp: u64,
}

/// Event published on every successful break-glass access.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyAccessEvent {
    pub record_id: u64,
    pub record_owner: Address,
    pub contact: Address,
    pub sequence: u64,
    pub access_reason: String,
    pub timestamp: u64,
}

/// Event published when the emergency access system is toggled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SystemToggledEvent {
    pub owner: Address,
    pub enabled: bool,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, owner: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        owner,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new record is registered.
pub fn publish_record_created(
    env: &Env,
    owner: Address,
    record_id: u64,
    title: String,
    record_type: String,
) {
    let topics = (symbol_short!("REC_ADD"), owner.clone());
    let data = RecordCreatedEvent {
        record_id,
        owner,
        title,
        record_type,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a permission is granted or replaced.
pub fn publish_access_granted(
    env: &Env,
    owner: Address,
    grantee: Address,
    record_id: u64,
    can_read: bool,
    can_write: bool,
) {
    let topics = (symbol_short!("ACC_GRT"), owner.clone(), grantee.clone());
    let data = AccessGrantedEvent {
        record_id,
        owner,
        grantee,
        can_read,
        can_write,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when an emergency contact is registered.
pub fn publish_contact_added(
    env: &Env,
    owner: Address,
    contact: Address,
    contact_type: String,
    relationship: String,
    can_access_all: bool,
) {
    let topics = (symbol_short!("CON_ADD"), owner.clone(), contact.clone());
    let data = ContactAddedEvent {
        owner,
        contact,
        contact_type,
        relationship,
        can_access_all,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when an emergency contact is deactivated.
pub fn publish_contact_removed(env: &Env, owner: Address, contact: Address) {
    let topics = (symbol_short!("CON_REM"), owner.clone(), contact.clone());
    let data = ContactRemovedEvent {
        owner,
        contact,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event for every successful break-glass access.
/// The payload mirrors the audit log entry so off-chain indexers can follow
/// the trail without replaying storage.
pub fn publish_emergency_access(
    env: &Env,
    contact: Address,
    record_owner: Address,
    record_id: u64,
    sequence: u64,
    access_reason: String,
) {
    let topics = (
        symbol_short!("EMRG_ACC"),
        contact.clone(),
        record_owner.clone(),
    );
    let data = EmergencyAccessEvent {
        record_id,
        record_owner,
        contact,
        sequence,
        access_reason,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when the emergency access system is toggled.
pub fn publish_system_toggled(env: &Env, owner: Address, enabled: bool) {
    let topics = (symbol_short!("SYS_TGL"), owner.clone());
    let data = SystemToggledEvent {
        owner,
        enabled,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
