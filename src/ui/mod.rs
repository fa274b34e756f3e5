//! Marker presentation: time-of-day styling, tooltips and popups

pub mod popup;
pub mod style;

pub use popup::{Popup, Tooltip};
pub use style::{MarkerStyle, MarkerStyleTable, StylePredicate, TimeIcon};
