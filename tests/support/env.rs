use std::{
    path::Path,
    sync::{Mutex, MutexGuard, OnceLock},
};

use opinion_rater::{app_dirs::CONFIG_HOME_ENV, config::ENDPOINT_ENV};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app at a scratch config root and restores the environment on drop.
pub struct AppEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl AppEnvGuard {
    pub fn set_config_home(path: &Path) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut guard = Self {
            previous: Vec::new(),
            _lock: lock,
        };
        guard.set(CONFIG_HOME_ENV, Some(path.to_string_lossy().as_ref()));
        guard.set(ENDPOINT_ENV, None);
        guard
    }

    pub fn set_endpoint(&mut self, endpoint: &str) {
        self.set(ENDPOINT_ENV, Some(endpoint));
    }

    fn set(&mut self, key: &'static str, value: Option<&str>) {
        if !self.previous.iter().any(|(saved, _)| *saved == key) {
            self.previous.push((key, std::env::var(key).ok()));
        }
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

impl Drop for AppEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
