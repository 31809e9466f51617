//! # Where2Tattoo Core
//!
//! Domain types and the booking availability logic shared by the database
//! and API crates. Nothing in here performs I/O directly; remote lookups go
//! through the [`availability::taken::TakenSlotsSource`] trait.

pub mod availability;
pub mod errors;
pub mod models;
pub mod search;
pub mod slug;
