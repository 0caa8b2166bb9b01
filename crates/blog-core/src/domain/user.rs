use serde::{Deserialize, Serialize};

/// Role of a user. Users live outside this service; the role arrives with
/// the bearer token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// A permission granted to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Right {
    GetUsers,
    ManageUsers,
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester {
    pub id: i32,
    pub role: Role,
}

impl Requester {
    pub fn new(id: i32, role: Role) -> Self {
        Self { id, role }
    }
}
