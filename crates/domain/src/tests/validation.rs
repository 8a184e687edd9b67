// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, MAX_NAME_LENGTH, validate_name, validate_owner_id};

#[test]
fn test_validate_name_accepts_regular_name() {
    assert!(validate_name("Sharks").is_ok());
}

#[test]
fn test_validate_name_rejects_empty() {
    let result: Result<(), DomainError> = validate_name("");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_name_rejects_whitespace_only() {
    let result: Result<(), DomainError> = validate_name("   ");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_name_length_boundary() {
    let at_limit: String = "a".repeat(MAX_NAME_LENGTH);
    assert!(validate_name(&at_limit).is_ok());

    let over_limit: String = "a".repeat(MAX_NAME_LENGTH + 1);
    assert!(matches!(
        validate_name(&over_limit),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_owner_id() {
    assert!(validate_owner_id("owner-1").is_ok());
    assert!(matches!(
        validate_owner_id(""),
        Err(DomainError::InvalidOwner(_))
    ));
    assert!(matches!(
        validate_owner_id("owner 1"),
        Err(DomainError::InvalidOwner(_))
    ));
}
