//! Roster state machine: who holds each staff position.

pub mod events;
pub mod position;
pub mod service;

pub use events::{RosterEvent, RosterObserver, SubscriptionId};
pub use position::Position;
pub use service::{RosterService, TeamBonus};
