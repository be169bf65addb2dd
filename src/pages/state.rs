//! Local state that resets with the session next to state that persists.

use crate::storage::{PersistentValueStore, StoredValue};

/// Key of the persisted name field.
pub const USER_NAME_KEY: &str = "user-name";

/// Plain per-session counter. Lost whenever the page is reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counter {
    count: u32,
}

impl Counter {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn increase(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn decrease(&mut self) {
        if self.can_decrease() {
            self.count -= 1;
        }
    }

    /// Decrease is disabled at zero.
    pub fn can_decrease(&self) -> bool {
        self.count > 0
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

/// The State page: an ephemeral counter and a persisted, controlled name
/// input.
pub struct StatePage {
    counter: Counter,
    name: StoredValue<String>,
}

impl StatePage {
    pub fn open(store: &PersistentValueStore) -> Self {
        Self {
            counter: Counter::default(),
            name: store.open(USER_NAME_KEY, String::new()),
        }
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn counter_mut(&mut self) -> &mut Counter {
        &mut self.counter
    }

    pub fn name(&self) -> &str {
        self.name.get()
    }

    /// The input's change handler. The field always shows [`Self::name`].
    pub fn on_name_change(&mut self, value: impl Into<String>) {
        self.name.set(value.into());
    }

    /// Forget the stored name entirely.
    pub fn clear_name(&mut self) {
        self.name.clear(String::new());
    }

    pub fn name_display(&self) -> &str {
        if self.name().is_empty() {
            "(empty)"
        } else {
            self.name()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryMedium;
    use std::sync::Arc;

    #[test]
    fn counter_never_goes_negative() {
        let mut counter = Counter::default();
        assert!(!counter.can_decrease());
        counter.decrease();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn counter_increase_and_reset() {
        let mut counter = Counter::default();
        counter.increase();
        counter.increase();
        assert_eq!(counter.count(), 2);
        counter.decrease();
        assert_eq!(counter.count(), 1);
        counter.reset();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn name_persists_but_counter_resets() {
        let medium = MemoryMedium::new();
        let store = PersistentValueStore::new(Arc::new(medium.clone()));

        let mut page = StatePage::open(&store);
        assert_eq!(page.name_display(), "(empty)");
        page.counter_mut().increase();
        page.on_name_change("Grace");
        assert_eq!(medium.raw(USER_NAME_KEY).as_deref(), Some("\"Grace\""));

        let reloaded = StatePage::open(&PersistentValueStore::new(Arc::new(medium)));
        assert_eq!(reloaded.name(), "Grace");
        assert_eq!(reloaded.counter().count(), 0);
    }

    #[test]
    fn clear_name_removes_the_stored_entry() {
        let medium = MemoryMedium::new();
        let store = PersistentValueStore::new(Arc::new(medium.clone()));
        let mut page = StatePage::open(&store);
        page.on_name_change("Grace");

        page.clear_name();

        assert_eq!(page.name_display(), "(empty)");
        assert_eq!(medium.raw(USER_NAME_KEY), None);
    }
}
