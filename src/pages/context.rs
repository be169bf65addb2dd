//! Theme shared through a [`ContextSlot`] instead of threaded props.

use crate::context::{Capability, ContextSlot, ProviderGuard};

pub const THEME_PROVIDER: &str = "ThemeProvider";
pub const THEMED_CARD: &str = "ThemedCard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub dark_mode: bool,
}

impl Theme {
    pub fn toggle(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub background: &'static str,
    pub color: &'static str,
}

impl CardStyle {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.dark_mode {
            Self {
                background: "#424242",
                color: "#fff",
            }
        } else {
            Self {
                background: "#fff",
                color: "#000",
            }
        }
    }
}

pub fn theme_slot() -> ContextSlot<Theme> {
    ContextSlot::new(THEME_PROVIDER)
}

/// Reads the theme from the nearest provider.
pub struct ThemedCard {
    theme: Capability<Theme>,
}

impl ThemedCard {
    /// # Panics
    ///
    /// When mounted outside a theme provider.
    pub fn mount(slot: &ContextSlot<Theme>) -> Self {
        Self {
            theme: slot.consume(THEMED_CARD),
        }
    }

    pub fn style(&self) -> CardStyle {
        CardStyle::for_theme(self.theme.current())
    }
}

/// The Context page: owns the provider, toggles the theme, hosts a card.
pub struct ContextPage<'a> {
    provider: ProviderGuard<'a, Theme>,
    card: ThemedCard,
}

impl<'a> ContextPage<'a> {
    pub fn mount(slot: &'a ContextSlot<Theme>) -> Self {
        let provider = slot.provide(Theme::default());
        let card = ThemedCard::mount(slot);
        Self { provider, card }
    }

    pub fn dark_mode(&self) -> bool {
        self.provider.capability().current().dark_mode
    }

    pub fn toggle_theme(&self) {
        self.provider.capability().update(Theme::toggle);
    }

    pub fn card(&self) -> &ThemedCard {
        &self.card
    }
}
