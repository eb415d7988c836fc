//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors. Nothing here talks
//! to a host.

pub mod error;
pub mod layout_config;
pub mod saved_state;
pub mod types;

pub use error::{
    AppError, InvalidConfig, LayoutError, LayoutImpossible, MarginAxis, SavedStateError,
};
pub use layout_config::{validate_column_counts, AdaptiveParams, LayoutConfig, Margins};
pub use saved_state::{SavedState, SAVED_STATE_LEN};
pub use types::{Padding, Rect, Viewport};
