//! Slot storage for mesh elements.
//!
//! Elements live in a `Vec<Option<T>>`. Removing an element leaves a tombstone
//! behind and slots are never handed out again, so an index into the store
//! either names the element it was created for or nothing at all.

#[derive(Debug, Clone)]
pub(crate) struct ElementStore<T> {
    slots: Vec<Option<T>>,
    live: usize,
}

impl<T> ElementStore<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            live: 0,
        }
    }

    /// Store `value` and return its slot index.
    pub(crate) fn push(&mut self, value: T) -> usize {
        self.slots.push(Some(value));
        self.live += 1;
        self.slots.len() - 1
    }

    /// Take the element out of its slot, leaving a tombstone.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        let removed = self.slots.get_mut(index).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    #[inline]
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of live elements.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Number of slots ever handed out, tombstones included.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|value| (i, value)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|value| (i, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_remove() {
        let mut store = ElementStore::with_capacity(4);
        let a = store.push("a");
        let b = store.push("b");
        assert_eq!(store.len(), 2);

        assert_eq!(store.remove(a), Some("a"));
        assert_eq!(store.len(), 1);
        assert!(!store.contains(a));
        assert_eq!(store.get(b), Some(&"b"));

        // Removing twice is a no-op
        assert_eq!(store.remove(a), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_slots_are_not_reused() {
        let mut store = ElementStore::with_capacity(4);
        let a = store.push(1);
        store.remove(a);
        let b = store.push(2);
        assert_ne!(a, b);
        assert_eq!(store.slot_count(), 2);
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![(b, &2)]);
    }
}
