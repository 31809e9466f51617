//! # Availability
//!
//! Turns a studio's weekly opening hours and the times already booked for an
//! artist into the list of hour slots a customer can still request.
//!
//! - [`slots`]: the pure slot generator
//! - [`calendar`]: which calendar dates can be picked at all
//! - [`taken`]: fetching already-booked times and the failure policy
//! - [`generation`]: discarding stale results when the selection changes

pub mod calendar;
pub mod generation;
pub mod slots;
pub mod taken;
