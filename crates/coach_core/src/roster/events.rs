use super::position::Position;
use crate::coach::CoachRecord;
use std::fmt;
use std::sync::Arc;

/// Committed roster transition.
#[derive(Debug, Clone)]
pub enum RosterEvent {
    Hired { coach: Arc<CoachRecord>, position: Position },
    Fired { coach: Arc<CoachRecord>, position: Position },
}

impl RosterEvent {
    pub fn position(&self) -> Position {
        match self {
            RosterEvent::Hired { position, .. } | RosterEvent::Fired { position, .. } => *position,
        }
    }

    pub fn coach(&self) -> &Arc<CoachRecord> {
        match self {
            RosterEvent::Hired { coach, .. } | RosterEvent::Fired { coach, .. } => coach,
        }
    }
}

impl fmt::Display for RosterEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RosterEvent::Hired { coach, position } => {
                write!(f, "Hired {} as {} coach", coach.name(), position)
            }
            RosterEvent::Fired { coach, position } => {
                write!(f, "Fired {} from {} coach", coach.name(), position)
            }
        }
    }
}

/// Receives roster events. Observers only read; they never mutate the roster
/// from inside a callback.
pub trait RosterObserver: Send + Sync {
    fn on_event(&self, event: &RosterEvent);
}

impl<F> RosterObserver for F
where
    F: Fn(&RosterEvent) + Send + Sync,
{
    fn on_event(&self, event: &RosterEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);
