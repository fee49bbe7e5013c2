use soroban_sdk::String;

use crate::ContractError;

const MAX_TITLE_LEN: u32 = 100;
const MAX_RECORD_TYPE_LEN: u32 = 50;
const MAX_POINTER_LEN: u32 = 200;
const MAX_LABEL_LEN: u32 = 50;
const MAX_REASON_LEN: u32 = 200;

// Large enough for the widest field above.
const CHECK_BUF_LEN: usize = 200;

/// Shared bound check: non-empty, within `max_len` bytes, printable ASCII
/// (space through tilde). Caller-supplied strings are descriptive metadata,
/// not a controlled vocabulary, so nothing beyond shape is enforced.
fn validate_bounded_ascii(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; CHECK_BUF_LEN];
    value.copy_into_slice(&mut buf[..len as usize]);

    for &b in &buf[..len as usize] {
        if !(32..=126).contains(&b) {
            return Err(ContractError::InvalidInput);
        }
    }

    Ok(())
}

/// Validate a record title.
pub fn validate_title(title: &String) -> Result<(), ContractError> {
    validate_bounded_ascii(title, MAX_TITLE_LEN)
}

/// Validate a record type tag.
pub fn validate_record_type(record_type: &String) -> Result<(), ContractError> {
    validate_bounded_ascii(record_type, MAX_RECORD_TYPE_LEN)
}

/// Validate a storage pointer. The pointer is opaque to this contract; only
/// its shape is bounded, its contents are never interpreted.
pub fn validate_storage_pointer(pointer: &String) -> Result<(), ContractError> {
    validate_bounded_ascii(pointer, MAX_POINTER_LEN)
}

/// Validate a contact descriptor (contact type or relationship).
pub fn validate_contact_label(label: &String) -> Result<(), ContractError> {
    validate_bounded_ascii(label, MAX_LABEL_LEN)
}

/// Validate a break-glass access reason.
pub fn validate_access_reason(reason: &String) -> Result<(), ContractError> {
    validate_bounded_ascii(reason, MAX_REASON_LEN)
}
