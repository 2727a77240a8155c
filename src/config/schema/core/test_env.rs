use std::sync::{LazyLock, Mutex, MutexGuard};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Serializes env-var mutation across tests and restores every touched
/// variable when dropped.
pub(super) struct EnvScope {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    pub(super) fn new() -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    fn remember(&mut self, key: &'static str) {
        if !self.saved.iter().any(|(saved, _)| *saved == key) {
            self.saved.push((key, std::env::var(key).ok()));
        }
    }

    pub(super) fn set(&mut self, key: &'static str, value: &str) -> &mut Self {
        self.remember(key);
        // SAFETY: the scope holds ENV_LOCK, so no other test mutates the
        // environment concurrently.
        unsafe {
            std::env::set_var(key, value);
        }
        self
    }

    pub(super) fn unset(&mut self, key: &'static str) -> &mut Self {
        self.remember(key);
        // SAFETY: see `set`.
        unsafe {
            std::env::remove_var(key);
        }
        self
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for (key, previous) in self.saved.drain(..).rev() {
            // SAFETY: ENV_LOCK is still held until `_lock` drops after this.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
