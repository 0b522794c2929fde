//! Session-scoped credential store.
//!
//! One whole-record JSON document per mode namespace. Records are written
//! atomically (temp file + rename) so a concurrent reader never observes a
//! partially written record; this substitutes for locking. Malformed stored
//! JSON is logged and treated as absent — corruption never propagates as
//! authentication success.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mbx_core::{Role, RoleSet};

use crate::broker::BrokerAccount;
use crate::error::AuthError;
use crate::mode::AuthMode;

/// The record persisted for a dev-bypass session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevBypassCredential {
    /// Fixed sentinel value, never a real token.
    pub access_token: String,
    /// Synthetic expiry, 24 hours from login.
    pub expires_at: DateTime<Utc>,
    pub account: DevAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevAccount {
    pub principal_id: String,
    pub email: String,
    pub name: String,
    pub roles: RoleSet,
}

/// The record persisted after a local email/password login. Holds the
/// backend's token pair plus the user object verbatim, so resolution never
/// needs another backend call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalCredential {
    pub access_token: String,
    pub refresh_token: String,
    pub user: LocalUser,
}

/// The user object returned by `POST /auth/login/local`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Mirror of the identity broker's cached credential. The broker owns this
/// record; the store only holds it so `clear_all` can wipe every namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedCredential {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub account: BrokerAccount,
}

/// A whole credential record, tagged by mode. At most one record per mode
/// namespace exists at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum CredentialRecord {
    #[serde(rename = "devBypass")]
    DevBypass(DevBypassCredential),
    #[serde(rename = "local")]
    Local(LocalCredential),
    #[serde(rename = "federated")]
    Federated(FederatedCredential),
}

impl CredentialRecord {
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        match self {
            Self::DevBypass(_) => AuthMode::DevBypass,
            Self::Local(_) => AuthMode::Local,
            Self::Federated(_) => AuthMode::Federated,
        }
    }
}

/// Injected persistence seam for credentials. Implementations are
/// session-scoped: nothing outlives the browsing/session context.
pub trait CredentialStore: Send + Sync {
    /// Persist a whole record under its mode's namespace.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreError` when the record cannot be written.
    fn put(&self, record: &CredentialRecord) -> Result<(), AuthError>;

    /// Read the record for a mode. Absent, unreadable, and corrupt records
    /// all yield `None` — the read path never errors.
    fn get(&self, mode: AuthMode) -> Option<CredentialRecord>;

    /// Remove one mode's record. Removing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreError` when an existing record cannot be removed.
    fn clear(&self, mode: AuthMode) -> Result<(), AuthError>;

    /// Remove every namespace unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreError` when any existing record cannot be removed.
    fn clear_all(&self) -> Result<(), AuthError> {
        for mode in AuthMode::PRECEDENCE {
            self.clear(mode)?;
        }
        Ok(())
    }
}

/// File-backed store rooted at a session directory.
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Create the store, creating the session directory if needed
    /// (0700 on Unix).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::StoreError` when the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AuthError::StoreError(format!("mkdir {}: {e}", dir.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", dir.display());
            }
        }
        Ok(Self { dir })
    }

    fn record_path(&self, mode: AuthMode) -> PathBuf {
        self.dir.join(format!("{}.json", mode.namespace()))
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), AuthError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .map_err(|e| AuthError::StoreError(format!("write {}: {e}", tmp.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::StoreError(format!("chmod {}: {e}", tmp.display())))?;
        }
        fs::rename(&tmp, path)
            .map_err(|e| AuthError::StoreError(format!("rename {}: {e}", path.display())))
    }
}

impl CredentialStore for FileCredentialStore {
    fn put(&self, record: &CredentialRecord) -> Result<(), AuthError> {
        let path = self.record_path(record.mode());
        let contents = serde_json::to_vec(record)
            .map_err(|e| AuthError::StoreError(format!("serialize record: {e}")))?;
        self.write_atomic(&path, &contents)
    }

    fn get(&self, mode: AuthMode) -> Option<CredentialRecord> {
        let path = self.record_path(mode);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "credential record unreadable; treating as absent");
                return None;
            }
        };

        match serde_json::from_str::<CredentialRecord>(&contents) {
            Ok(record) if record.mode() == mode => Some(record),
            Ok(record) => {
                tracing::warn!(
                    expected = mode.namespace(),
                    found = record.mode().namespace(),
                    "credential record mode mismatch; treating as absent"
                );
                None
            }
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "malformed credential record; treating as absent");
                None
            }
        }
    }

    fn clear(&self, mode: AuthMode) -> Result<(), AuthError> {
        let path = self.record_path(mode);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::StoreError(format!(
                "remove {}: {e}",
                path.display()
            ))),
        }
    }
}

/// In-memory store for tests and embedded use.
#[derive(Default)]
pub struct MemoryCredentialStore {
    records: Mutex<HashMap<AuthMode, CredentialRecord>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn put(&self, record: &CredentialRecord) -> Result<(), AuthError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AuthError::StoreError("store mutex poisoned".into()))?;
        records.insert(record.mode(), record.clone());
        Ok(())
    }

    fn get(&self, mode: AuthMode) -> Option<CredentialRecord> {
        self.records.lock().ok()?.get(&mode).cloned()
    }

    fn clear(&self, mode: AuthMode) -> Result<(), AuthError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| AuthError::StoreError("store mutex poisoned".into()))?;
        records.remove(&mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn local_record() -> CredentialRecord {
        CredentialRecord::Local(LocalCredential {
            access_token: "T".into(),
            refresh_token: "R".into(),
            user: LocalUser {
                id: 1,
                email: "a@b.com".into(),
                name: "A".into(),
                role: Role::ClientUser,
            },
        })
    }

    #[test]
    fn file_store_round_trips_whole_record() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileCredentialStore::new(tmp.path().join("session")).expect("store");

        store.put(&local_record()).expect("put");
        let loaded = store.get(AuthMode::Local).expect("record present");
        assert_eq!(loaded, local_record());
        assert_eq!(store.get(AuthMode::DevBypass), None);
    }

    #[test]
    fn malformed_record_is_absent_not_an_error() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileCredentialStore::new(tmp.path()).expect("store");

        fs::write(tmp.path().join("local.json"), "{not json").expect("write");
        assert_eq!(store.get(AuthMode::Local), None);
    }

    #[test]
    fn record_under_wrong_namespace_is_absent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileCredentialStore::new(tmp.path()).expect("store");

        let contents = serde_json::to_vec(&local_record()).expect("serialize");
        fs::write(tmp.path().join("devBypass.json"), contents).expect("write");
        assert_eq!(store.get(AuthMode::DevBypass), None);
    }

    #[test]
    fn clear_all_empties_every_namespace() {
        let store = MemoryCredentialStore::new();
        store.put(&local_record()).expect("put");
        store
            .put(&CredentialRecord::DevBypass(DevBypassCredential {
                access_token: "DEV_TOKEN_BYPASS".into(),
                expires_at: Utc::now(),
                account: DevAccount {
                    principal_id: "dev-user-id".into(),
                    email: "dev@localhost".into(),
                    name: "Developer".into(),
                    roles: mbx_core::role_set(&[Role::SystemAdmin]),
                },
            }))
            .expect("put");

        store.clear_all().expect("clear");
        for mode in AuthMode::PRECEDENCE {
            assert_eq!(store.get(mode), None, "{} should be empty", mode.namespace());
        }
    }

    #[test]
    fn clear_missing_record_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileCredentialStore::new(tmp.path()).expect("store");
        store.clear(AuthMode::Federated).expect("clear absent");
    }

    #[test]
    fn atomic_write_leaves_no_temp_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileCredentialStore::new(tmp.path()).expect("store");
        store.put(&local_record()).expect("put");

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
