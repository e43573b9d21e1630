use std::sync::Mutex;
use std::sync::OnceLock;

/// Write-once process-wide slot for host metadata.
///
/// The first successful [`Cache::install`] wins. Later calls are no-ops that
/// hand back the value already cached, so a second static init can never
/// clobber handles that live decisions are using.
#[derive(Debug)]
pub struct Cache<T> {
    slot: OnceLock<T>,
    lock: Mutex<()>,
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cache<T> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            lock: Mutex::new(()),
        }
    }

    pub fn get(&self) -> anyhow::Result<&T> {
        self.slot
            .get()
            .ok_or_else(|| anyhow::anyhow!("host metadata used before static init"))
    }

    /// A failed `resolve` leaves the slot empty so a later call may retry.
    pub fn install<F>(&self, resolve: F) -> anyhow::Result<&T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("static init poisoned by an earlier panic"))?;
        if self.slot.get().is_none() {
            let _ = self.slot.set(resolve()?);
        }
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_installed() {
        let cache = Cache::<u32>::new();
        assert!(cache.get().is_err());
        assert!(*cache.install(|| Ok(7)).unwrap() == 7);
        assert!(*cache.get().unwrap() == 7);
    }

    #[test]
    fn second_install_keeps_first() {
        let cache = Cache::<u32>::new();
        cache.install(|| Ok(1)).unwrap();
        let mut called = false;
        let value = cache
            .install(|| {
                called = true;
                Ok(2)
            })
            .unwrap();
        assert!(*value == 1);
        assert!(!called);
    }

    #[test]
    fn failed_install_can_retry() {
        let cache = Cache::<u32>::new();
        assert!(cache.install(|| Err(anyhow::anyhow!("no class"))).is_err());
        assert!(cache.get().is_err());
        assert!(*cache.install(|| Ok(3)).unwrap() == 3);
    }

    #[test]
    fn concurrent_installs_agree() {
        static CACHE: Cache<usize> = Cache::new();
        let values = (0..8)
            .map(|i| std::thread::spawn(move || *CACHE.install(|| Ok(i)).unwrap()))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>();
        assert!(values.iter().all(|v| *v == values[0]));
    }
}
