//! Showcase page model and app state
//!
//! Split from the binary so the reducer and page loading can be tested.

pub mod page;
pub mod state;
