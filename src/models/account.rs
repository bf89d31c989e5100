use serde::{Deserialize, Serialize};

use super::enums::Role;

/// A login identity: patient, doctor, or admin.
///
/// The credential hash is the PBKDF2 encoding from `crate::auth` and is
/// never serialized out to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub handle: String,
    #[serde(skip_serializing)]
    pub credential_hash: String,
    pub display_name: Option<String>,
    pub role: Role,
}

/// Authenticated caller identity, passed explicitly into every core
/// operation. The variant carries what the authorization rules need:
/// a doctor's provider id equals its account id, but the lifecycle
/// checks only ever compare against `provider_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Patient { account_id: i64 },
    Doctor { account_id: i64, provider_id: i64 },
    Admin { account_id: i64 },
}

impl Caller {
    /// Build a caller from a freshly loaded account row.
    pub fn from_account(account: &Account) -> Self {
        match account.role {
            Role::Patient => Caller::Patient {
                account_id: account.id,
            },
            Role::Doctor => Caller::Doctor {
                account_id: account.id,
                provider_id: account.id,
            },
            Role::Admin => Caller::Admin {
                account_id: account.id,
            },
        }
    }

    pub fn account_id(&self) -> i64 {
        match *self {
            Caller::Patient { account_id }
            | Caller::Doctor { account_id, .. }
            | Caller::Admin { account_id } => account_id,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Caller::Patient { .. } => Role::Patient,
            Caller::Doctor { .. } => Role::Doctor,
            Caller::Admin { .. } => Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role) -> Account {
        Account {
            id: 7,
            handle: "someone".into(),
            credential_hash: "x".into(),
            display_name: None,
            role,
        }
    }

    #[test]
    fn doctor_caller_carries_provider_id() {
        let caller = Caller::from_account(&account(Role::Doctor));
        assert_eq!(
            caller,
            Caller::Doctor {
                account_id: 7,
                provider_id: 7
            }
        );
        assert_eq!(caller.role(), Role::Doctor);
    }

    #[test]
    fn patient_and_admin_callers() {
        assert_eq!(
            Caller::from_account(&account(Role::Patient)),
            Caller::Patient { account_id: 7 }
        );
        assert_eq!(
            Caller::from_account(&account(Role::Admin)),
            Caller::Admin { account_id: 7 }
        );
    }

    #[test]
    fn credential_hash_not_serialized() {
        let json = serde_json::to_value(account(Role::Patient)).unwrap();
        assert!(json.get("credential_hash").is_none());
        assert_eq!(json["handle"], "someone");
    }
}
