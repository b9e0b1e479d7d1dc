use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Account, ProfileUpdate, SessionUser};
use crate::storage::{CURRENT_USER_KEY, Storage, StorageError, USERS_KEY};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Single source of truth for "who is logged in".
///
/// Backed by two storage keys: the account registry (`users`) and the
/// current session (`currentUser`). Expected misuse — duplicate email on
/// register, wrong credentials on login, profile update while anonymous —
/// comes back as a value, never an error. Only the storage substrate and
/// the password hasher can actually fail.
pub struct SessionStore<'a, S: Storage> {
    storage: &'a S,
    session: Option<SessionUser>,
}

impl<'a, S: Storage> SessionStore<'a, S> {
    /// Create the store, restoring any persisted session from a prior run
    pub fn new(storage: &'a S) -> Result<Self, AuthError> {
        let session = storage.get_json::<SessionUser>(CURRENT_USER_KEY)?;
        if let Some(user) = &session {
            debug!(email = %user.email, "restored persisted session");
        }
        Ok(Self { storage, session })
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Create an account and log it in. Returns `None` when the email is
    /// already registered; the registry is left untouched in that case.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Option<SessionUser>, AuthError> {
        let mut accounts = self.load_accounts()?;

        if accounts.iter().any(|a| a.email == email) {
            debug!(email, "registration rejected: email already registered");
            return Ok(None);
        }

        let password_hash = hash_password(password)?;
        let account = Account::new(email.to_string(), password_hash, name.to_string());
        accounts.push(account.clone());
        self.storage.set_json(USERS_KEY, &accounts)?;

        let user = account.to_session_user();
        self.establish(user.clone())?;
        Ok(Some(user))
    }

    /// Verify credentials against the registry and establish a session.
    /// Unknown email and wrong password are the same failure; an existing
    /// session survives a failed attempt unchanged.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Option<SessionUser>, AuthError> {
        let accounts = self.load_accounts()?;

        let Some(account) = accounts.iter().find(|a| a.email == email) else {
            warn!(email, "login failed: unknown email");
            return Ok(None);
        };

        if !verify_password(password, &account.password_hash)? {
            warn!(email, "login failed: bad password");
            return Ok(None);
        }

        let user = account.to_session_user();
        self.establish(user.clone())?;
        Ok(Some(user))
    }

    /// Clear the session. Calling this while anonymous is a no-op.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.session = None;
        self.storage.remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    /// Merge the given fields into the session copy and the matching
    /// registry record. Returns `false` (and changes nothing) when no
    /// session is active.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<bool, AuthError> {
        let Some(user) = self.session.as_mut() else {
            return Ok(false);
        };

        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(picture) = &update.profile_picture {
            user.profile_picture = Some(picture.clone());
        }
        let user = user.clone();
        self.storage.set_json(CURRENT_USER_KEY, &user)?;

        let mut accounts = self.load_accounts()?;
        if let Some(account) = accounts.iter_mut().find(|a| a.id == user.id) {
            if let Some(name) = &update.name {
                account.name = name.clone();
            }
            if let Some(picture) = &update.profile_picture {
                account.profile_picture = Some(picture.clone());
            }
            self.storage.set_json(USERS_KEY, &accounts)?;
        }

        Ok(true)
    }

    /// Number of accounts in the persisted registry
    pub fn account_count(&self) -> Result<usize, AuthError> {
        Ok(self.load_accounts()?.len())
    }

    fn load_accounts(&self) -> Result<Vec<Account>, AuthError> {
        Ok(self.storage.get_json(USERS_KEY)?.unwrap_or_default())
    }

    fn establish(&mut self, user: SessionUser) -> Result<(), AuthError> {
        self.storage.set_json(CURRENT_USER_KEY, &user)?;
        self.session = Some(user);
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn register_establishes_a_session() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");

        let user = store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");

        assert_eq!(user.email, "a@x.com");
        assert!(store.is_authenticated());
        assert_eq!(store.account_count().expect("count works"), 1);
    }

    #[test]
    fn duplicate_email_is_rejected_without_touching_the_registry() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");

        store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("first registration succeeds");
        let second = store
            .register("a@x.com", "other", "Bob")
            .expect("storage works");

        assert!(second.is_none());
        assert_eq!(store.account_count().expect("count works"), 1);
        // Session still belongs to Ann
        assert_eq!(store.current_user().expect("session active").name, "Ann");
    }

    #[test]
    fn login_checks_the_password_against_the_stored_hash() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");
        let registered = store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");
        store.logout().expect("logout works");

        assert!(
            store
                .login("a@x.com", "wrong-password")
                .expect("storage works")
                .is_none()
        );
        assert!(!store.is_authenticated());

        let user = store
            .login("a@x.com", "pw123456")
            .expect("storage works")
            .expect("login succeeds");
        assert_eq!(user.id, registered.id);
    }

    #[test]
    fn failed_login_leaves_the_current_session_alone() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");
        store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");

        let attempt = store.login("a@x.com", "nope").expect("storage works");
        assert!(attempt.is_none());
        assert_eq!(store.current_user().expect("session active").name, "Ann");
    }

    #[test]
    fn registry_never_stores_the_plaintext_password() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");
        store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");

        let raw = storage
            .get(USERS_KEY)
            .expect("get works")
            .expect("registry exists");
        assert!(!raw.contains("pw123456"));
        assert!(raw.contains("$argon2"));
    }

    #[test]
    fn logout_removes_the_persisted_session() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");
        store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");

        store.logout().expect("logout works");
        assert!(storage.get(CURRENT_USER_KEY).expect("get works").is_none());

        // A fresh process sees no session
        let restored = SessionStore::new(&storage).expect("store opens");
        assert!(!restored.is_authenticated());

        // Logging out again is fine
        let mut restored = restored;
        restored.logout().expect("logout is idempotent");
    }

    #[test]
    fn session_survives_restart() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");
        store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");

        let restored = SessionStore::new(&storage).expect("store opens");
        assert_eq!(restored.current_user().expect("session restored").name, "Ann");
    }

    #[test]
    fn update_profile_without_a_session_is_a_no_op() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");

        let update = ProfileUpdate {
            name: Some("Nobody".to_string()),
            profile_picture: None,
        };
        assert!(!store.update_profile(&update).expect("storage works"));
        assert!(storage.get(CURRENT_USER_KEY).expect("get works").is_none());
    }

    #[test]
    fn update_profile_reaches_both_session_and_registry() {
        let storage = MemoryStorage::new();
        let mut store = SessionStore::new(&storage).expect("store opens");
        store
            .register("a@x.com", "pw123456", "Ann")
            .expect("storage works")
            .expect("registration succeeds");

        let update = ProfileUpdate {
            name: Some("Ann Smith".to_string()),
            profile_picture: Some("avatar.png".to_string()),
        };
        assert!(store.update_profile(&update).expect("storage works"));

        assert_eq!(store.current_user().expect("session active").name, "Ann Smith");

        // Registry record was updated too, and login still works afterwards
        let mut fresh = SessionStore::new(&storage).expect("store opens");
        fresh.logout().expect("logout works");
        let user = fresh
            .login("a@x.com", "pw123456")
            .expect("storage works")
            .expect("login still succeeds");
        assert_eq!(user.name, "Ann Smith");
        assert_eq!(user.profile_picture.as_deref(), Some("avatar.png"));
    }
}
