//! Style side of the CSS engine as seen by layout.
//!
//! The cascade and property parsing live upstream; layout only consumes the
//! computed values re-exported here.

pub mod style_model;

pub use style_model::ComputedStyle;
