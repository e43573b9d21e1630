use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

/// Opaque key the host keeps on its side of the boundary.
pub type Handle = i64;
/// Handle of a host object with no live agent behind it.
pub const UNBOUND: Handle = 0;

/// Process-wide table of live adapter instances.
///
/// The host keeps only a [`Handle`]; each entry is locked on its own, so
/// games played in parallel by different instances never contend beyond the
/// brief table lookup.
#[derive(Debug)]
pub struct Registry<T> {
    next: AtomicI64,
    slots: Mutex<BTreeMap<Handle, Arc<Mutex<T>>>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub const fn new() -> Self {
        Self {
            next: AtomicI64::new(1),
            slots: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn insert(&self, value: T) -> anyhow::Result<Handle> {
        let handle = self.next.fetch_add(1, Ordering::Relaxed);
        self.slots()?.insert(handle, Arc::new(Mutex::new(value)));
        Ok(handle)
    }

    pub fn get(&self, handle: Handle) -> anyhow::Result<Arc<Mutex<T>>> {
        self.slots()?
            .get(&handle)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no live agent behind handle {}", handle))
    }

    /// Drops the entry once any in-flight user releases it.
    pub fn remove(&self, handle: Handle) -> anyhow::Result<bool> {
        Ok(self.slots()?.remove(&handle).is_some())
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|slots| slots.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slots(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BTreeMap<Handle, Arc<Mutex<T>>>>> {
        self.slots
            .lock()
            .map_err(|_| anyhow::anyhow!("agent registry poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_distinct_and_bound() {
        let registry = Registry::new();
        let a = registry.insert("a").unwrap();
        let b = registry.insert("b").unwrap();
        assert!(a != b);
        assert!(a != UNBOUND);
        assert!(*registry.get(a).unwrap().lock().unwrap() == "a");
        assert!(*registry.get(b).unwrap().lock().unwrap() == "b");
        assert!(registry.len() == 2);
    }

    #[test]
    fn removed_handles_are_dead() {
        let registry = Registry::new();
        let a = registry.insert(1).unwrap();
        assert!(registry.remove(a).unwrap());
        assert!(!registry.remove(a).unwrap());
        assert!(registry.get(a).is_err());
        assert!(registry.get(UNBOUND).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn stale_release_keeps_live_entries() {
        let registry = Registry::new();
        let closed = registry.insert("closed").unwrap();
        let live = registry.insert("live").unwrap();
        assert!(registry.remove(closed).unwrap());
        assert!(!registry.remove(closed).unwrap());
        assert!(!registry.remove(UNBOUND).unwrap());
        assert!(registry.len() == 1);
        assert!(*registry.get(live).unwrap().lock().unwrap() == "live");
    }

    #[test]
    fn entries_are_independent() {
        let registry = Registry::new();
        let a = registry.insert(0).unwrap();
        let b = registry.insert(0).unwrap();
        let first = registry.get(a).unwrap();
        let _held = first.lock().unwrap();
        *registry.get(b).unwrap().lock().unwrap() += 1;
        assert!(*registry.get(b).unwrap().lock().unwrap() == 1);
    }
}
