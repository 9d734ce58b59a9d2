//! Explicit session context handed to every component that talks to the remote API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::workflows::booking::OwnerId;

/// Capability the signed-in user acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    BuildingOwner,
    Personnel,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BuildingOwner => "Building Owner",
            Self::Personnel => "Personnel",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected building owner or personnel)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "building owner" | "owner" => Ok(Self::BuildingOwner),
            "personnel" | "inspector" => Ok(Self::Personnel),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    user: Option<UserProfile>,
    role: Role,
}

impl SessionContext {
    pub fn anonymous(role: Role) -> Self {
        Self {
            token: None,
            user: None,
            role,
        }
    }

    pub fn new(token: Option<String>, user: Option<UserProfile>, role: Role) -> Self {
        let token = token.filter(|value| !value.trim().is_empty());
        Self { token, user, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value, absent for anonymous sessions.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }

    /// User id used to scope remote listings; `0` when nobody is signed in.
    pub fn scope_user_id(&self) -> u64 {
        self.user.as_ref().map(|user| user.id).unwrap_or(0)
    }

    pub fn owner_id(&self) -> OwnerId {
        OwnerId(self.scope_user_id())
    }

    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.name.as_str())
            .unwrap_or("")
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("user", &self.user)
            .field("role", &self.role)
            .finish()
    }
}
