//! Session token persistence for the CLI: OS keychain by default, or a
//! plain-text file when one is configured.

#[cfg(test)]
use std::collections::HashMap;
use std::path::PathBuf;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

use eduadmin_core::{ApiError, ApiResult, FileTokenStore, TokenStore};
#[cfg(not(test))]
use keyring::Entry;

use crate::config_profiles::{CliProfile, TOKEN_FILE_ENV};

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "eduadmin-cli";

/// Raw secret storage keyed by account name.
pub trait SecretBackend: Clone + Send + Sync + 'static {
    fn read(&self, username: &str) -> ApiResult<Option<String>>;
    fn write(&self, username: &str, secret: &str) -> ApiResult<()>;
    fn remove(&self, username: &str) -> ApiResult<()>;
}

/// The platform credential store (Keychain, Credential Manager, kernel keyring).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsKeychain;

impl OsKeychain {
    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(username: &str) -> ApiResult<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, username)
            .map_err(|error| ApiError::TokenStorage(error.to_string()))
    }
}

impl SecretBackend for OsKeychain {
    #[cfg(not(test))]
    fn read(&self, username: &str) -> ApiResult<Option<String>> {
        match Self::entry(username)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(ApiError::TokenStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn read(&self, username: &str) -> ApiResult<Option<String>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| ApiError::TokenStorage(error.to_string()))?;
        Ok(guard.get(username).cloned())
    }

    #[cfg(not(test))]
    fn write(&self, username: &str, secret: &str) -> ApiResult<()> {
        Self::entry(username)?
            .set_password(secret)
            .map_err(|error| ApiError::TokenStorage(error.to_string()))
    }

    #[cfg(test)]
    fn write(&self, username: &str, secret: &str) -> ApiResult<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| ApiError::TokenStorage(error.to_string()))?;
        guard.insert(username.to_string(), secret.to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn remove(&self, username: &str) -> ApiResult<()> {
        match Self::entry(username)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(ApiError::TokenStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn remove(&self, username: &str) -> ApiResult<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| ApiError::TokenStorage(error.to_string()))?;
        guard.remove(username);
        Ok(())
    }
}

/// Default location of a profile's token when the keychain cannot keep it.
pub fn fallback_token_path(profile_name: &str) -> Option<PathBuf> {
    let file_name = profile_name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect::<String>();
    dirs::config_dir().map(|dir| {
        dir.join("eduadmin")
            .join("tokens")
            .join(format!("{file_name}.token"))
    })
}

/// One keychain entry per profile.
///
/// Every save is read back through a fresh lookup. When the keychain does not
/// return the token (no platform backend, locked store, headless session) the
/// token goes to the fallback file instead, so the next process still finds it.
#[derive(Clone)]
pub struct KeyringTokenStore<B: SecretBackend = OsKeychain> {
    backend: B,
    username: String,
    fallback: Option<FileTokenStore>,
}

impl KeyringTokenStore {
    pub fn new(profile_name: &str) -> Self {
        Self::with_backend(
            OsKeychain,
            profile_name,
            fallback_token_path(profile_name).map(FileTokenStore::new),
        )
    }
}

impl<B: SecretBackend> KeyringTokenStore<B> {
    pub fn with_backend(backend: B, profile_name: &str, fallback: Option<FileTokenStore>) -> Self {
        Self {
            backend,
            username: format!("session_token:{profile_name}"),
            fallback,
        }
    }

    pub const fn fallback(&self) -> Option<&FileTokenStore> {
        self.fallback.as_ref()
    }

    fn retained(&self, token: &str) -> ApiResult<bool> {
        self.backend.write(&self.username, token)?;
        let stored = self.backend.read(&self.username)?;
        Ok(stored.as_deref() == Some(token))
    }
}

impl<B: SecretBackend> TokenStore for KeyringTokenStore<B> {
    fn load_token(&self) -> ApiResult<Option<String>> {
        let from_keychain = self.backend.read(&self.username);
        match (from_keychain, &self.fallback) {
            (Ok(Some(token)), _) => Ok(Some(token)),
            (Ok(None), Some(fallback)) => fallback.load_token(),
            (Ok(None), None) => Ok(None),
            (Err(error), Some(fallback)) => {
                tracing::warn!("OS keychain unavailable, reading token file: {}", error);
                fallback.load_token()
            }
            (Err(error), None) => Err(error),
        }
    }

    fn save_token(&self, token: &str) -> ApiResult<()> {
        match (self.retained(token), &self.fallback) {
            (Ok(true), fallback) => {
                if let Some(fallback) = fallback {
                    if let Err(error) = fallback.clear_token() {
                        tracing::warn!("Failed to remove stale token file: {}", error);
                    }
                }
                Ok(())
            }
            (Ok(false), Some(fallback)) => {
                tracing::warn!(
                    "OS keychain did not retain the session token; storing it in {}",
                    fallback.path().display()
                );
                fallback.save_token(token)
            }
            (Err(error), Some(fallback)) => {
                tracing::warn!(
                    "OS keychain unavailable ({}); storing the session token in {}",
                    error,
                    fallback.path().display()
                );
                fallback.save_token(token)
            }
            (Ok(false), None) => Err(ApiError::TokenStorage(
                "OS keychain did not retain the session token".to_string(),
            )),
            (Err(error), None) => Err(error),
        }
    }

    fn clear_token(&self) -> ApiResult<()> {
        let keychain = self.backend.remove(&self.username);
        if let Some(fallback) = &self.fallback {
            fallback.clear_token()?;
        }
        keychain
    }
}

/// Token storage selected for a profile.
#[derive(Clone)]
pub enum ProfileTokenStore {
    Keyring(KeyringTokenStore),
    File(FileTokenStore),
}

impl ProfileTokenStore {
    /// `--token-file`, then `EDUADMIN_TOKEN_FILE`, then the profile's
    /// `token_file`; the keychain when none is set.
    pub fn resolve(profile_name: &str, explicit: Option<PathBuf>, profile: &CliProfile) -> Self {
        let env_path = std::env::var_os(TOKEN_FILE_ENV)
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty());
        explicit
            .or(env_path)
            .or_else(|| profile.token_file.clone())
            .map_or_else(
                || Self::Keyring(KeyringTokenStore::new(profile_name)),
                |path| Self::File(FileTokenStore::new(path)),
            )
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Keyring(store) => store.fallback().map_or_else(
                || "OS keychain".to_string(),
                |fallback| {
                    format!(
                        "OS keychain (fallback file {})",
                        fallback.path().display()
                    )
                },
            ),
            Self::File(store) => format!("file {}", store.path().display()),
        }
    }
}

impl TokenStore for ProfileTokenStore {
    fn load_token(&self) -> ApiResult<Option<String>> {
        match self {
            Self::Keyring(store) => store.load_token(),
            Self::File(store) => store.load_token(),
        }
    }

    fn save_token(&self, token: &str) -> ApiResult<()> {
        match self {
            Self::Keyring(store) => store.save_token(token),
            Self::File(store) => store.save_token(token),
        }
    }

    fn clear_token(&self) -> ApiResult<()> {
        match self {
            Self::Keyring(store) => store.clear_token(),
            Self::File(store) => store.clear_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Accepts writes but never returns them, like a keychain with no
    /// platform backend behind it.
    #[derive(Clone, Copy, Default)]
    struct ForgetfulKeychain;

    impl SecretBackend for ForgetfulKeychain {
        fn read(&self, _username: &str) -> ApiResult<Option<String>> {
            Ok(None)
        }

        fn write(&self, _username: &str, _secret: &str) -> ApiResult<()> {
            Ok(())
        }

        fn remove(&self, _username: &str) -> ApiResult<()> {
            Ok(())
        }
    }

    #[derive(Clone, Copy, Default)]
    struct LockedKeychain;

    impl SecretBackend for LockedKeychain {
        fn read(&self, _username: &str) -> ApiResult<Option<String>> {
            Err(ApiError::TokenStorage("keychain locked".to_string()))
        }

        fn write(&self, _username: &str, _secret: &str) -> ApiResult<()> {
            Err(ApiError::TokenStorage("keychain locked".to_string()))
        }

        fn remove(&self, _username: &str) -> ApiResult<()> {
            Ok(())
        }
    }

    #[test]
    fn keyring_store_is_scoped_per_profile() {
        let school = KeyringTokenStore::with_backend(OsKeychain, "auth-test-school", None);
        let district = KeyringTokenStore::with_backend(OsKeychain, "auth-test-district", None);

        school.save_token("school-token").unwrap();
        assert_eq!(school.load_token().unwrap().as_deref(), Some("school-token"));
        assert_eq!(district.load_token().unwrap(), None);

        school.clear_token().unwrap();
        assert_eq!(school.load_token().unwrap(), None);
        school.clear_token().unwrap();
    }

    #[test]
    fn token_saved_by_one_store_loads_in_a_fresh_one() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("fresh.token");

        KeyringTokenStore::with_backend(
            OsKeychain,
            "auth-test-fresh",
            Some(FileTokenStore::new(&fallback)),
        )
        .save_token("kept-token")
        .unwrap();

        let reopened = KeyringTokenStore::with_backend(
            OsKeychain,
            "auth-test-fresh",
            Some(FileTokenStore::new(&fallback)),
        );
        assert_eq!(reopened.load_token().unwrap().as_deref(), Some("kept-token"));
        assert!(!fallback.exists());
        reopened.clear_token().unwrap();
    }

    #[test]
    fn forgetful_keychain_falls_back_to_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("tokens").join("default.token");

        KeyringTokenStore::with_backend(
            ForgetfulKeychain,
            "default",
            Some(FileTokenStore::new(&fallback)),
        )
        .save_token("survives-exit")
        .unwrap();
        assert_eq!(std::fs::read_to_string(&fallback).unwrap(), "survives-exit");

        let next_process = KeyringTokenStore::with_backend(
            ForgetfulKeychain,
            "default",
            Some(FileTokenStore::new(&fallback)),
        );
        assert_eq!(
            next_process.load_token().unwrap().as_deref(),
            Some("survives-exit")
        );

        next_process.clear_token().unwrap();
        assert_eq!(next_process.load_token().unwrap(), None);
        assert!(!fallback.exists());
    }

    #[test]
    fn forgetful_keychain_without_fallback_refuses_to_save() {
        let store = KeyringTokenStore::with_backend(ForgetfulKeychain, "default", None);
        assert!(matches!(
            store.save_token("lost"),
            Err(ApiError::TokenStorage(_))
        ));
    }

    #[test]
    fn locked_keychain_uses_token_file_for_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("locked.token");
        let store = KeyringTokenStore::with_backend(
            LockedKeychain,
            "default",
            Some(FileTokenStore::new(&fallback)),
        );

        store.save_token("file-only").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("file-only"));
    }

    #[test]
    fn retained_keychain_token_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join("stale.token");
        std::fs::write(&fallback, "old-token").unwrap();

        let store = KeyringTokenStore::with_backend(
            OsKeychain,
            "auth-test-stale",
            Some(FileTokenStore::new(&fallback)),
        );
        store.save_token("new-token").unwrap();

        assert!(!fallback.exists());
        assert_eq!(store.load_token().unwrap().as_deref(), Some("new-token"));
        store.clear_token().unwrap();
    }

    #[test]
    fn fallback_path_sanitizes_profile_name() {
        if let Some(path) = fallback_token_path("school/../x") {
            assert_eq!(
                path.file_name().and_then(|name| name.to_str()),
                Some("school____x.token")
            );
            assert!(path.ends_with("eduadmin/tokens/school____x.token"));
        }
    }

    #[test]
    fn explicit_token_file_selects_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let store =
            ProfileTokenStore::resolve("default", Some(path.clone()), &CliProfile::default());

        assert!(matches!(store, ProfileTokenStore::File(_)));
        store.save_token("file-token").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "file-token");
        assert_eq!(store.describe(), format!("file {}", path.display()));
    }

    #[test]
    fn profile_token_file_is_used_without_override() {
        if std::env::var_os(TOKEN_FILE_ENV).is_some() {
            return;
        }
        let profile = CliProfile {
            api_base_url: None,
            token_file: Some(PathBuf::from("/tmp/eduadmin-profile-token")),
        };
        let store = ProfileTokenStore::resolve("default", None, &profile);
        assert!(matches!(store, ProfileTokenStore::File(_)));
    }
}
