/// Consolidated session context: identity, role and bearer token are read
/// from storage once and passed explicitly to the components that need them.
// region:    --- Imports
use crate::error::Result;
use crate::storage::{self, LocalStore, KEY_TOKEN, KEY_USER, KEY_USER_EMAIL, KEY_USER_TYPE};
use serde::{Deserialize, Serialize};

// endregion: --- Imports

// region:    --- Model

/// Account role of the signed-in person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Private,
    Professional,
    Admin,
}

/// Current-session identity blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    pub role: UserRole,
}

// endregion: --- Model

// region:    --- SessionContext

/// Snapshot of the session at load time.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub identity: Option<SessionIdentity>,
    pub token: Option<String>,
    /// Legacy hints kept for sessions written by older clients.
    pub legacy_user_type: Option<String>,
    pub legacy_email: Option<String>,
}

impl SessionContext {
    /// Load the session from storage.
    pub fn load(store: &dyn LocalStore) -> Result<Self> {
        let identity: Option<SessionIdentity> = storage::read_json(store, KEY_USER)?;
        let token: Option<String> = storage::read_json(store, KEY_TOKEN)?;
        let legacy_user_type: Option<String> = storage::read_json(store, KEY_USER_TYPE)?;
        let legacy_email: Option<String> = storage::read_json(store, KEY_USER_EMAIL)?;
        Ok(Self {
            identity,
            token,
            legacy_user_type,
            legacy_email,
        })
    }

    /// A session counts as authenticated only with both a token and an identity.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.identity.is_some()
    }

    /// Role check for bidding controls. Legacy `userType` hints are honored
    /// when the identity blob is missing its role.
    pub fn is_professional(&self) -> bool {
        if let Some(identity) = &self.identity {
            return identity.role == UserRole::Professional;
        }
        matches!(self.legacy_user_type.as_deref(), Some("PROFESSIONAL"))
    }

    /// Id of the signed-in person, when present.
    pub fn person_id(&self) -> Option<i64> {
        self.identity.as_ref().map(|i| i.id)
    }
}

// endregion: --- SessionContext
