//! Shared types for the Local Market workspace: catalog domain types,
//! filter selections, and the messages/effects exchanged between the TUI
//! components and the runtime.

pub mod filter;
pub mod market;

pub use filter::{FEATURES_KEY, FilterAction, FilterState, FilterValue, PanelState, START_TIME_KEY};
pub use market::{Category, Facet, FacetDescriptor, Listing, ParseCategoryError, format_price};

/// Inert call-to-action buttons rendered on every result card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    BookNow,
    Details,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::BookNow => "Book Now",
            Self::Details => "Details",
        }
    }
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Periodic UI tick
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// A filter state transition
    Filter(FilterAction),
    /// A card button was activated
    CardAction { listing_id: u32, action: CardAction },
}

impl From<FilterAction> for Msg {
    fn from(action: FilterAction) -> Self {
        Msg::Filter(action)
    }
}

/// Side effects that can be triggered by state changes and are executed by
/// the runtime rather than by components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Leave the event loop and restore the terminal
    Quit,
    /// Move focus into the filter panel
    FocusPanel,
    /// Move focus back to the main view (nav bar / results)
    RestoreFocus,
    /// Remember the chosen category as the default for the next launch
    PersistCategory(Category),
}
