//! View lifetime: cancellation scopes and effect hooks.

mod effects;
mod scope;

pub use effects::{Cleanup, EffectHost, EffectId};
pub use scope::CancelScope;
