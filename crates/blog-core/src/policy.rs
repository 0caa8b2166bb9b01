//! Authorization policy.
//!
//! Role rights are a fixed table; the post rules compare the requester
//! against the owner recorded on the post.

use crate::domain::{Requester, Right, Role};
use crate::error::DomainError;

/// Rights granted to each role.
pub fn role_rights(role: Role) -> &'static [Right] {
    match role {
        Role::User => &[Right::GetUsers],
        Role::Admin => &[Right::GetUsers, Right::ManageUsers],
    }
}

fn has_right(role: Role, right: Right) -> bool {
    role_rights(role).contains(&right)
}

/// A role is elevated when it may manage other users.
pub fn is_elevated(role: Role) -> bool {
    has_right(role, Right::ManageUsers)
}

/// Only the owner may read a post by id.
pub fn authorize_read(requester: &Requester, owner_id: Option<i32>) -> Result<(), DomainError> {
    if owner_id != Some(requester.id) {
        return Err(DomainError::Unauthorized);
    }
    Ok(())
}

/// Updating requires ownership *and* an elevated role. An ordinary owner is
/// refused.
pub fn authorize_update(requester: &Requester, owner_id: Option<i32>) -> Result<(), DomainError> {
    if owner_id != Some(requester.id) || !is_elevated(requester.role) {
        return Err(DomainError::Unauthorized);
    }
    Ok(())
}

/// Any authenticated requester may delete any post.
pub fn authorize_delete(_requester: &Requester, _owner_id: Option<i32>) -> Result<(), DomainError> {
    Ok(())
}
