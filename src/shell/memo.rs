//! Single-slot memoization keyed by the inputs of a pure function.

/// Caches the last computed value together with the key it was computed
/// from. Recomputes only when a different key comes in.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, computing it with `compute` if the
    /// key differs from the last one.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> &V {
        let entry = self
            .slot
            .take()
            .filter(|(cached, _)| *cached == key)
            .unwrap_or_else(|| {
                let value = compute(&key);
                (key, value)
            });
        &self.slot.insert(entry).1
    }

    #[cfg(test)]
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
