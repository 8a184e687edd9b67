// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of any display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validates a display name (club, player, team or matchday label).
///
/// # Errors
///
/// Returns an error if the name is blank or longer than `MAX_NAME_LENGTH`.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates a team owner identifier.
///
/// # Errors
///
/// Returns an error if the identifier is blank or contains whitespace.
pub fn validate_owner_id(owner_id: &str) -> Result<(), DomainError> {
    if owner_id.is_empty() {
        return Err(DomainError::InvalidOwner(String::from(
            "Owner id cannot be empty",
        )));
    }
    if owner_id.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidOwner(format!(
            "Owner id '{owner_id}' cannot contain whitespace"
        )));
    }
    Ok(())
}
