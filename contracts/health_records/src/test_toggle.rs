#![cfg(test)]

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::*;

fn setup() -> (Env, HealthRecordsContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(HealthRecordsContract, ());
    let client = HealthRecordsContractClient::new(&env, &contract_id);

    let contract_owner = Address::generate(&env);
    client.initialize(&contract_owner);

    (env, client, contract_owner)
}

#[test]
fn test_toggle_flips_and_returns_new_state() {
    let (_env, client, contract_owner) = setup();

    assert!(client.is_emergency_access_enabled());

    assert!(!client.toggle_emergency_access_system(&contract_owner));
    assert!(!client.is_emergency_access_enabled());

    assert!(client.toggle_emergency_access_system(&contract_owner));
    assert!(client.is_emergency_access_enabled());
}

#[test]
fn test_only_contract_owner_may_toggle() {
    let (env, client, _contract_owner) = setup();

    let intruder = Address::generate(&env);
    let res = client.try_toggle_emergency_access_system(&intruder);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::NotContractOwner);

    assert!(client.is_emergency_access_enabled());
}

#[test]
fn test_disabled_system_closes_break_glass_path() {
    let (env, client, contract_owner) = setup();

    let patient = Address::generate(&env);
    let record_id = client.create_record(
        &patient,
        &String::from_str(&env, "Annual Checkup"),
        &String::from_str(&env, "general"),
        &String::from_str(&env, "gaia://hub/1234"),
    );

    let contact = Address::generate(&env);
    client.add_emergency_contact(
        &patient,
        &contact,
        &String::from_str(&env, "family"),
        &String::from_str(&env, "spouse"),
        &true,
    );

    client.toggle_emergency_access_system(&contract_owner);

    // Kill switch wins over an otherwise fully valid contact
    let reason = String::from_str(&env, "Unconscious in ER");
    let res = client.try_emergency_access_record(&contact, &record_id, &reason);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(!client.can_emergency_access(&record_id, &contact));
    assert_eq!(client.get_emergency_access_count(&record_id, &contact), 0);

    // It even precedes the missing-record check
    let res = client.try_emergency_access_record(&contact, &999, &reason);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);

    // Re-enable: the same contact gets through and the log starts at 1
    client.toggle_emergency_access_system(&contract_owner);
    let pointer = client.emergency_access_record(&contact, &record_id, &reason);
    assert_eq!(pointer, String::from_str(&env, "gaia://hub/1234"));

    let entry = client
        .get_emergency_access_log(&record_id, &contact, &1)
        .unwrap();
    assert!(entry.is_valid);
}

#[test]
fn test_toggle_leaves_granted_permissions_alone() {
    let (env, client, contract_owner) = setup();

    let patient = Address::generate(&env);
    let record_id = client.create_record(
        &patient,
        &String::from_str(&env, "Blood Test"),
        &String::from_str(&env, "lab-results"),
        &String::from_str(&env, "gaia://hub/5678"),
    );

    let grantee = Address::generate(&env);
    client.grant_access(&patient, &record_id, &grantee, &true, &false);

    client.toggle_emergency_access_system(&contract_owner);

    // Ordinary permissions are independent of the emergency toggle
    assert!(client.can_access_record(&record_id, &grantee));
    assert!(client.can_access_record(&record_id, &patient));
    client.grant_access(&patient, &record_id, &Address::generate(&env), &true, &true);
}

#[test]
fn test_toggle_before_initialize_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(HealthRecordsContract, ());
    let client = HealthRecordsContractClient::new(&env, &contract_id);

    let caller = Address::generate(&env);
    let res = client.try_toggle_emergency_access_system(&caller);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::NotInitialized);
}
