//! Native Kriegspiel agent for the Ludii general game system.
//!
//! The host engine owns the board, the rules, and the referee. This crate
//! only chooses among the pseudo-legal tries the host offers, given the
//! referee's feedback, and hands one back.
//!
//! ## Layout
//!
//! - [`agent`]: Seat binding and per-turn selection
//! - [`policy`]: Decision rules over a [`turn::Turn`]
//! - [`feedback`]: Referee messages parsed into typed announcements
//! - [`host`]: Traits for everything the adapter may ask of the host
//! - [`bridge`]: JNI implementation of those traits and the `native` exports
pub mod agent;
pub mod bridge;
pub mod cache;
pub mod config;
pub mod feedback;
pub mod host;
pub mod policy;
pub mod registry;
pub mod session;
pub mod turn;

#[cfg(test)]
mod testing;

pub use agent::*;
pub use feedback::*;
pub use host::*;
pub use policy::*;
pub use session::*;
pub use turn::*;
