//! Utility helpers shared by the Local Market crates: time-of-day parsing,
//! display text helpers, and user preferences.

pub mod path_processing;
pub mod preferences;
pub mod text_processing;
pub mod time_of_day;

pub use path_processing::{default_data_file, expand_tilde};
pub use preferences::{PreferencesError, UserPreferences};
pub use text_processing::{facet_title, range_upper_bound, truncate_to_width, wrap_to_width};
pub use time_of_day::{LAST_MINUTE, MINUTES_PER_DAY, format_minutes, format_minutes_12h, parse_minutes};
