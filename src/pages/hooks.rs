//! Reducer counter, memoized filtering, and a pure child.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::memo::{Callback, Memo, PureChild};
use crate::mvi::{Intent, Reducer, UiState};

pub const FRUITS: [&str; 7] = [
    "Apple",
    "Banana",
    "Cherry",
    "Date",
    "Elderberry",
    "Fig",
    "Grape",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterState {
    pub count: i64,
}

impl UiState for CounterState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    Increment,
    Decrement,
    Reset,
}

impl Intent for CounterIntent {}

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CounterIntent::Increment => CounterState {
                count: state.count + 1,
            },
            CounterIntent::Decrement => CounterState {
                count: state.count - 1,
            },
            CounterIntent::Reset => CounterState::default(),
        }
    }
}

/// Case-insensitive substring filter.
pub fn filter_items(items: &[String], filter: &str) -> Vec<String> {
    let needle = filter.to_lowercase();
    items
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn filter_statistics(count: usize) -> String {
    format!("Matches found: {count}")
}

pub struct HooksPage {
    counter: CounterState,
    items: Vec<String>,
    filter: Arc<Mutex<String>>,
    filtered: Memo<(Vec<String>, String), Vec<String>>,
    clear: Callback,
    statistics: PureChild<usize, String>,
}

impl HooksPage {
    pub fn new() -> Self {
        let filter = Arc::new(Mutex::new(String::new()));
        let clear = {
            let filter = Arc::clone(&filter);
            Callback::new(move || filter.lock().clear())
        };
        Self {
            counter: CounterState::default(),
            items: FRUITS.iter().map(|s| s.to_string()).collect(),
            filter,
            filtered: Memo::new(),
            clear,
            statistics: PureChild::new(),
        }
    }

    pub fn dispatch(&mut self, intent: CounterIntent) {
        self.counter = CounterReducer::reduce(self.counter, intent);
    }

    pub fn count(&self) -> i64 {
        self.counter.count
    }

    pub fn set_filter(&self, value: impl Into<String>) {
        *self.filter.lock() = value.into();
    }

    pub fn filter(&self) -> String {
        self.filter.lock().clone()
    }

    /// The same handle on every render.
    pub fn clear_filter(&self) -> Callback {
        self.clear.clone()
    }

    /// One render pass: the filtered list and the statistics line.
    pub fn render(&mut self) -> (Vec<String>, String) {
        let deps = (self.items.clone(), self.filter());
        let visible = self
            .filtered
            .get(&deps, |(items, filter)| {
                tracing::debug!(%filter, "filtering items");
                filter_items(items, filter)
            })
            .clone();
        let stats = self
            .statistics
            .render(&visible.len(), |count| filter_statistics(*count))
            .clone();
        (visible, stats)
    }

    pub fn filter_computations(&self) -> usize {
        self.filtered.computations()
    }

    pub fn statistics_renders(&self) -> usize {
        self.statistics.renders()
    }
}

impl Default for HooksPage {
    fn default() -> Self {
        Self::new()
    }
}
