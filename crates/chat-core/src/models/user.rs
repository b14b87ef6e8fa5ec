use crate::Role;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            role,
            created_at: Utc::now(),
        }
    }
}
