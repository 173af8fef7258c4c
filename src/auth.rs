//! Authentication provider and sessions
//!
//! The auth collaborator issues identities at sign-up and resolves the
//! current identity between invocations. A [`Session`] is an explicit value
//! passed into each handler; there is no ambient current-user singleton.

use crate::core::{Role, User, UserId};
use crate::error::{HelpdeskError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// The authenticated actor for the duration of one action
///
/// Acquired at view/handler start and dropped at teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl Session {
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }

    #[must_use]
    pub const fn is_technician(&self) -> bool {
        self.role.is_technician()
    }
}

/// Sign-up / sign-in / sign-out surface of the auth collaborator
pub trait AuthProvider {
    /// Register credentials for a freshly created user
    fn sign_up(&self, user: &User, password: &str) -> Result<()>;

    /// Verify credentials and make the identity current
    fn sign_in(&self, email: &str, password: &str) -> Result<UserId>;

    /// Clear the current identity
    fn sign_out(&self) -> Result<()>;

    /// The signed-in identity, if any
    fn current_identity(&self) -> Result<Option<UserId>>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialRecord {
    user_id: UserId,
    salt: String,
    digest: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialFile {
    /// Keyed by email
    accounts: BTreeMap<String, CredentialRecord>,
}

/// File-backed auth provider
///
/// Salted SHA-256 credential digests in `credentials.yaml`; the current
/// identity in a plain `session` file next to it.
pub struct FileAuth {
    root: PathBuf,
}

impl FileAuth {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn credentials_path(&self) -> PathBuf {
        self.root.join("credentials.yaml")
    }

    fn session_path(&self) -> PathBuf {
        self.root.join("session")
    }

    fn load_credentials(&self) -> Result<CredentialFile> {
        let path = self.credentials_path();
        if !path.exists() {
            return Ok(CredentialFile::default());
        }
        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| HelpdeskError::Serialization(format!("credentials file: {e}")))
    }

    fn save_credentials(&self, credentials: &CredentialFile) -> Result<()> {
        let content = serde_yaml::to_string(credentials)
            .map_err(|e| HelpdeskError::Serialization(format!("credentials file: {e}")))?;
        fs::write(self.credentials_path(), content)?;
        Ok(())
    }

    fn digest(salt: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl AuthProvider for FileAuth {
    fn sign_up(&self, user: &User, password: &str) -> Result<()> {
        if password.trim().is_empty() {
            return Err(HelpdeskError::Validation {
                field: "password".to_string(),
            });
        }

        let mut credentials = self.load_credentials()?;
        if credentials.accounts.contains_key(&user.email) {
            return Err(HelpdeskError::DuplicateAccount {
                email: user.email.clone(),
            });
        }

        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest(&salt, password);
        credentials.accounts.insert(
            user.email.clone(),
            CredentialRecord {
                user_id: user.id,
                salt,
                digest,
            },
        );
        self.save_credentials(&credentials)?;

        // Signing up signs the new identity in
        fs::write(self.session_path(), user.id.to_string())?;
        Ok(())
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<UserId> {
        let credentials = self.load_credentials()?;
        let record = credentials
            .accounts
            .get(email)
            .ok_or(HelpdeskError::InvalidCredentials)?;

        if Self::digest(&record.salt, password) != record.digest {
            return Err(HelpdeskError::InvalidCredentials);
        }

        fs::write(self.session_path(), record.user_id.to_string())?;
        Ok(record.user_id)
    }

    fn sign_out(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn current_identity(&self) -> Result<Option<UserId>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let id = UserId::parse_str(content.trim())
            .map_err(|_| HelpdeskError::custom("session file is corrupt; sign in again"))?;
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_auth() -> (TempDir, FileAuth) {
        let temp_dir = TempDir::new().unwrap();
        let auth = FileAuth::new(temp_dir.path());
        (temp_dir, auth)
    }

    fn sample_user(email: &str) -> User {
        User::new("Jo", "Soap", email, Role::Regular)
    }

    #[test]
    fn test_sign_up_then_sign_in_round_trip() {
        let (_dir, auth) = open_auth();
        let user = sample_user("jo@example.com");

        auth.sign_up(&user, "hunter2").unwrap();
        assert_eq!(auth.current_identity().unwrap(), Some(user.id));

        auth.sign_out().unwrap();
        assert_eq!(auth.current_identity().unwrap(), None);

        let signed_in = auth.sign_in("jo@example.com", "hunter2").unwrap();
        assert_eq!(signed_in, user.id);
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let (_dir, auth) = open_auth();
        auth.sign_up(&sample_user("jo@example.com"), "hunter2").unwrap();

        let err = auth.sign_in("jo@example.com", "wrong").unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidCredentials));

        let err = auth.sign_in("nobody@example.com", "hunter2").unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidCredentials));
    }

    #[test]
    fn test_duplicate_email_is_rejected() {
        let (_dir, auth) = open_auth();
        auth.sign_up(&sample_user("jo@example.com"), "hunter2").unwrap();

        let err = auth
            .sign_up(&sample_user("jo@example.com"), "other")
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::DuplicateAccount { .. }));
    }

    #[test]
    fn test_empty_password_is_a_validation_error() {
        let (_dir, auth) = open_auth();
        let err = auth
            .sign_up(&sample_user("jo@example.com"), "  ")
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::Validation { .. }));
    }

    #[test]
    fn test_session_survives_reopen() {
        let (dir, auth) = open_auth();
        let user = sample_user("jo@example.com");
        auth.sign_up(&user, "hunter2").unwrap();

        let reopened = FileAuth::new(dir.path());
        assert_eq!(reopened.current_identity().unwrap(), Some(user.id));
    }
}
