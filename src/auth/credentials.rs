//! Credential management for CellarTracker authentication
//!
//! Credentials are kept in the platform secret store (macOS Keychain, Windows
//! Credential Manager, the Secret Service on Linux) through the `keyring`
//! crate, so they persist across reboots.
//! Two secrets are stored per service identifier, under the keys `username`
//! and `password`.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use keyring::Entry;
use tracing::{debug, info};

use crate::constants::auth;
use crate::errors::{AuthError, AuthResult};

/// Backend holding named secrets per service
pub trait SecretStore {
    /// Read a secret, `None` when absent
    fn get_secret(&self, service: &str, key: &str) -> AuthResult<Option<String>>;

    /// Write a secret, overwriting any prior value
    fn set_secret(&self, service: &str, key: &str, value: &str) -> AuthResult<()>;

    /// Delete a secret; deleting an absent secret succeeds
    fn delete_secret(&self, service: &str, key: &str) -> AuthResult<()>;
}

/// OS keychain backend
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl SecretStore for KeyringStore {
    fn get_secret(&self, service: &str, key: &str) -> AuthResult<Option<String>> {
        let entry = Entry::new(service, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AuthError::SecretStore(e)),
        }
    }

    fn set_secret(&self, service: &str, key: &str, value: &str) -> AuthResult<()> {
        let entry = Entry::new(service, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    fn delete_secret(&self, service: &str, key: &str) -> AuthResult<()> {
        let entry = Entry::new(service, key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::SecretStore(e)),
        }
    }
}

/// In-process backend, used when no platform store should be touched
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn secrets(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), String>> {
        // A panic while holding the lock cannot leave the map half-written
        self.secrets.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SecretStore for MemoryStore {
    fn get_secret(&self, service: &str, key: &str) -> AuthResult<Option<String>> {
        Ok(self
            .secrets()
            .get(&(service.to_string(), key.to_string()))
            .cloned())
    }

    fn set_secret(&self, service: &str, key: &str, value: &str) -> AuthResult<()> {
        self.secrets()
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn delete_secret(&self, service: &str, key: &str) -> AuthResult<()> {
        self.secrets()
            .remove(&(service.to_string(), key.to_string()));
        Ok(())
    }
}

/// Username/password pair bound to one service identifier
#[derive(Debug)]
pub struct CredentialStore<S = KeyringStore> {
    service: String,
    backend: S,
}

impl CredentialStore<KeyringStore> {
    /// Store backed by the OS keychain
    pub fn keyring(service: impl Into<String>) -> Self {
        Self::new(service, KeyringStore)
    }
}

impl<S: SecretStore> CredentialStore<S> {
    pub fn new(service: impl Into<String>, backend: S) -> Self {
        Self {
            service: service.into(),
            backend,
        }
    }

    /// Service identifier the secrets are stored under
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Load the stored username and password
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either secret is absent or empty,
    /// or `AuthError::SecretStore` if the backend fails.
    pub fn get(&self) -> AuthResult<(String, String)> {
        let username = self.backend.get_secret(&self.service, auth::USERNAME_KEY)?;
        let password = self.backend.get_secret(&self.service, auth::PASSWORD_KEY)?;

        match (username, password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                debug!("Loaded credentials for service {}", self.service);
                Ok((username, password))
            }
            _ => Err(AuthError::MissingCredentials),
        }
    }

    /// Store both secrets, replacing any previous pair
    pub fn set(&self, username: &str, password: &str) -> AuthResult<()> {
        self.backend
            .set_secret(&self.service, auth::USERNAME_KEY, username)?;
        self.backend
            .set_secret(&self.service, auth::PASSWORD_KEY, password)?;
        info!("Stored credentials for service {}", self.service);
        Ok(())
    }

    /// Remove both secrets
    pub fn clear(&self) -> AuthResult<()> {
        self.backend
            .delete_secret(&self.service, auth::USERNAME_KEY)?;
        self.backend
            .delete_secret(&self.service, auth::PASSWORD_KEY)?;
        info!("Cleared credentials for service {}", self.service);
        Ok(())
    }

    /// Check if a complete credential pair is stored
    pub fn has_credentials(&self) -> bool {
        self.get().is_ok()
    }
}

/// Prompt user for credentials interactively
///
/// The username is echoed, the password is read without echo.
pub fn prompt_credentials() -> AuthResult<(String, String)> {
    let stdin = io::stdin();
    read_credentials(&mut stdin.lock(), &mut io::stdout(), || {
        rpassword::prompt_password("password: ")
    })
}

/// Read a username line from `input` and a password from `read_password`
///
/// The `username: ` prompt goes to `output`. Trailing line endings are
/// stripped from the username.
///
/// # Errors
///
/// Returns `AuthError::InvalidInput` if either value is empty and
/// `AuthError::Io` if the terminal cannot be read.
pub fn read_credentials<R, W, P>(
    input: &mut R,
    output: &mut W,
    read_password: P,
) -> AuthResult<(String, String)>
where
    R: BufRead,
    W: Write,
    P: FnOnce() -> io::Result<String>,
{
    write!(output, "username: ")?;
    output.flush()?;

    let mut username = String::new();
    input.read_line(&mut username)?;
    let username = non_empty(username.trim_end_matches(['\r', '\n']), "Username")?;

    let password = read_password()?;
    let password = non_empty(&password, "Password")?;

    Ok((username, password))
}

fn non_empty(value: &str, field: &str) -> AuthResult<String> {
    if value.is_empty() {
        return Err(AuthError::InvalidInput {
            reason: format!("{} cannot be empty", field),
        });
    }
    Ok(value.to_string())
}

/// Interactive login workflow: prompt, then store
///
/// `prompt` supplies the pair, normally [`prompt_credentials`].
pub fn setup_credentials<S, F>(store: &CredentialStore<S>, prompt: F) -> AuthResult<()>
where
    S: SecretStore,
    F: FnOnce() -> AuthResult<(String, String)>,
{
    if store.has_credentials() {
        println!("Replacing the credentials stored for {}", store.service());
    }

    let (username, password) = prompt()?;
    store.set(&username, &password)?;

    println!("Credentials saved for {}", username);
    Ok(())
}
