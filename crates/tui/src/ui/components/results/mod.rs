//! Results grid: one card per visible listing.

mod results_component;
mod state;

pub use results_component::{EMPTY_RESULTS_TEXT, ResultsComponent};
pub use state::{CARD_HEIGHT, CardHitArea, ResultsState, card_columns};
