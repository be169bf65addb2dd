//! View models of the course pages.

pub mod api;
pub mod basics;
pub mod context;
pub mod effects;
pub mod forms;
pub mod hooks;
pub mod state;

pub use api::{ApiPage, UserRecord};
pub use basics::{sample_cards, Seniority, UserCard};
pub use context::{theme_slot, CardStyle, ContextPage, Theme, ThemedCard};
pub use effects::{EffectsModel, EffectsPage};
pub use forms::{Field, FormErrors, FormIntent, FormReducer, FormState};
pub use hooks::{CounterIntent, CounterReducer, CounterState, HooksPage, FRUITS};
pub use state::{Counter, StatePage, USER_NAME_KEY};
