use chat_core::{Role, User};

use uuid::Uuid;

/// The authenticated caller, resolved from a validated token plus the
/// user store.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub display_name: String,
    pub role: Role,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            display_name: user.name,
            role: user.role,
        }
    }
}
