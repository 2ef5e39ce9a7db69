// src/device/session.rs

use super::{Device, DeviceTarget};
use crate::core::QcardsError;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

const TOKEN_VAR: &str = "QCARDS_DEVICE_TOKEN";

/// Account credentials for a device provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wraps an API token. Empty tokens are rejected.
    pub fn new(token: impl Into<String>) -> Result<Self, QcardsError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(QcardsError::CredentialError { message: "API token is empty".to_string() });
        }
        Ok(Self { token })
    }

    /// Reads the token from `QCARDS_DEVICE_TOKEN`.
    pub fn from_env() -> Result<Self, QcardsError> {
        let token = std::env::var(TOKEN_VAR).map_err(|_| QcardsError::CredentialError {
            message: format!("{} is not set", TOKEN_VAR),
        })?;
        Self::new(token)
    }

    /// The raw API token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

// Never print the token.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("token", &"<redacted>").finish()
    }
}

/// Opens a connection to a device. Implemented by the caller's hardware client.
pub trait DeviceProvider: Send + Sync {
    /// Authenticates with `credentials` and returns a handle to `target`'s backend.
    fn connect(&self, credentials: &Credentials, target: &DeviceTarget) -> Result<Arc<dyn Device>, QcardsError>;
}

type CredentialLoader = Box<dyn Fn() -> Result<Credentials, QcardsError> + Send + Sync>;

/// A lazily initialized connection to a remote device.
///
/// Credentials are loaded and the provider is contacted on the first
/// [`ensure_initialized`](Self::ensure_initialized) call only. A failed attempt
/// leaves the session uninitialized so a later call may retry.
pub struct DeviceSession {
    provider: Arc<dyn DeviceProvider>,
    load_credentials: CredentialLoader,
    target: DeviceTarget,
    device: Mutex<Option<Arc<dyn Device>>>,
}

impl DeviceSession {
    /// Creates a session that reads credentials from the environment on first use.
    pub fn new(provider: Arc<dyn DeviceProvider>) -> Self {
        Self {
            provider,
            load_credentials: Box::new(Credentials::from_env),
            target: DeviceTarget::from_env(),
            device: Mutex::new(None),
        }
    }

    /// Uses fixed credentials instead of the environment.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.load_credentials = Box::new(move || Ok(credentials.clone()));
        self
    }

    /// Uses a custom credential loader, called at most once per successful initialization.
    pub fn with_credential_loader<F>(mut self, loader: F) -> Self
    where
        F: Fn() -> Result<Credentials, QcardsError> + Send + Sync + 'static,
    {
        self.load_credentials = Box::new(loader);
        self
    }

    /// Connects to `target` instead of the default backend.
    pub fn with_target(mut self, target: DeviceTarget) -> Self {
        self.target = target;
        self
    }

    /// The backend this session connects to.
    pub fn target(&self) -> &DeviceTarget {
        &self.target
    }

    /// `true` once a device handle has been obtained.
    pub fn is_initialized(&self) -> bool {
        self.device.lock().is_some()
    }

    /// Returns the device, loading credentials and connecting on first use.
    ///
    /// Idempotent: every call after the first successful one returns the same handle.
    pub fn ensure_initialized(&self) -> Result<Arc<dyn Device>, QcardsError> {
        let mut guard = self.device.lock();
        if let Some(device) = guard.as_ref() {
            debug!(target_backend = %self.target, "reusing device session");
            return Ok(Arc::clone(device));
        }

        let credentials = (self.load_credentials)()?;
        let device = self.provider.connect(&credentials, &self.target)?;
        info!(target_backend = %self.target, device = device.name(), "device session initialized");
        *guard = Some(Arc::clone(&device));
        Ok(device)
    }
}

impl fmt::Debug for DeviceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceSession")
            .field("target", &self.target)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, OutcomeFrequencies};
    use crate::circuits::Circuit;
    use crate::device::DeviceProperties;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullDevice;

    impl Backend for NullDevice {
        fn name(&self) -> &str {
            "null"
        }

        fn run(&self, _circuit: &Circuit, _shots: u32) -> Result<OutcomeFrequencies, QcardsError> {
            Ok(OutcomeFrequencies::new())
        }
    }

    impl Device for NullDevice {
        fn properties(&self) -> Result<DeviceProperties, QcardsError> {
            Ok(DeviceProperties::default())
        }
    }

    #[derive(Default)]
    struct CountingProvider {
        connects: AtomicUsize,
    }

    impl DeviceProvider for CountingProvider {
        fn connect(&self, credentials: &Credentials, _target: &DeviceTarget) -> Result<Arc<dyn Device>, QcardsError> {
            assert_eq!(credentials.token(), "secret");
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(NullDevice))
        }
    }

    #[test]
    fn test_ensure_initialized_connects_once() -> Result<(), QcardsError> {
        let provider = Arc::new(CountingProvider::default());
        let loads = Arc::new(AtomicUsize::new(0));
        let loads_in_loader = Arc::clone(&loads);
        let session = DeviceSession::new(provider.clone()).with_credential_loader(move || {
            loads_in_loader.fetch_add(1, Ordering::SeqCst);
            Credentials::new("secret")
        });

        assert!(!session.is_initialized());
        let first = session.ensure_initialized()?;
        let second = session.ensure_initialized()?;

        assert!(session.is_initialized());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.connects.load(Ordering::SeqCst), 1);
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn test_credential_failure_leaves_session_uninitialized() {
        let session = DeviceSession::new(Arc::new(CountingProvider::default()))
            .with_credential_loader(|| Err(QcardsError::CredentialError { message: "no account".to_string() }));

        assert!(matches!(session.ensure_initialized(), Err(QcardsError::CredentialError { .. })));
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_empty_token_rejected_and_debug_redacts() {
        assert!(Credentials::new("  ").is_err());
        let credentials = Credentials::new("hunter2").expect("non-empty token");
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
