//! Roster state machine.
//!
//! Both slots sit behind one mutex: hiring into one slot can only interact
//! with the other through the shared employment flag, so slot-level locks
//! would not serialize transitions. Events are queued while the slot lock is
//! held, so the queue is in commit order, and delivered after it is released.
//! Only the outermost caller drains the queue; a transition started from an
//! observer (or another thread) mid-delivery is delivered after the batch in
//! progress.

use super::events::{RosterEvent, RosterObserver, SubscriptionId};
use super::position::Position;
use crate::catalog::CoachCatalog;
use crate::coach::{Category, CoachRecord};
use crate::error::{CoachingError, Result};
use crate::market::MarketFilter;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct RosterSlots {
    offense: Option<Arc<CoachRecord>>,
    defense: Option<Arc<CoachRecord>>,
}

impl RosterSlots {
    fn slot(&self, position: Position) -> &Option<Arc<CoachRecord>> {
        match position {
            Position::Offense => &self.offense,
            Position::Defense => &self.defense,
        }
    }

    fn slot_mut(&mut self, position: Position) -> &mut Option<Arc<CoachRecord>> {
        match position {
            Position::Offense => &mut self.offense,
            Position::Defense => &mut self.defense,
        }
    }
}

/// Summed effective bonuses of the current staff, per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBonus {
    pub offense_bonus: i32,
    pub defense_bonus: i32,
    pub special_teams_bonus: i32,
}

impl TeamBonus {
    pub fn total(&self) -> i32 {
        self.offense_bonus + self.defense_bonus + self.special_teams_bonus
    }

    fn add(&mut self, category: Category, bonus: i32) {
        match category {
            Category::Offense => self.offense_bonus += bonus,
            Category::Defense => self.defense_bonus += bonus,
            Category::SpecialTeams => self.special_teams_bonus += bonus,
        }
    }
}

type ObserverList = Vec<(SubscriptionId, Arc<dyn RosterObserver>)>;

#[derive(Debug, Default)]
struct Dispatch {
    pending: VecDeque<RosterEvent>,
    draining: bool,
}

/// Clears `draining` if an observer panics mid-delivery.
struct DrainGuard<'a> {
    dispatch: &'a Mutex<Dispatch>,
    finished: bool,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.dispatch.lock().unwrap_or_else(PoisonError::into_inner).draining = false;
        }
    }
}

/// One coaching staff. Constructed by the host and shared by reference.
#[derive(Default)]
pub struct RosterService {
    slots: Mutex<RosterSlots>,
    observers: Mutex<ObserverList>,
    dispatch: Mutex<Dispatch>,
    next_subscription: AtomicU64,
}

impl std::fmt::Debug for RosterService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterService")
            .field("slots", &*self.lock_slots())
            .field("observers", &self.lock_observers().len())
            .finish()
    }
}

impl RosterService {
    pub fn new() -> Self {
        Self::default()
    }

    // Every transition completes before unlocking, so a poisoned guard still
    // holds consistent slots.
    fn lock_slots(&self) -> MutexGuard<'_, RosterSlots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, ObserverList> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, Dispatch> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self, observer: impl RosterObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.lock_observers().push((id, Arc::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.lock_observers();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    /// Queue a committed batch. Call with the slot lock held.
    fn enqueue(&self, events: impl IntoIterator<Item = RosterEvent>) {
        self.lock_dispatch().pending.extend(events);
    }

    /// Deliver queued events in order unless an outer call is already doing so.
    fn drain(&self) {
        {
            let mut dispatch = self.lock_dispatch();
            if dispatch.draining {
                return;
            }
            dispatch.draining = true;
        }
        let mut guard = DrainGuard { dispatch: &self.dispatch, finished: false };

        loop {
            let event = {
                let mut dispatch = self.lock_dispatch();
                match dispatch.pending.pop_front() {
                    Some(event) => event,
                    None => {
                        dispatch.draining = false;
                        guard.finished = true;
                        return;
                    }
                }
            };
            let observers: Vec<Arc<dyn RosterObserver>> =
                self.lock_observers().iter().map(|(_, o)| Arc::clone(o)).collect();
            for observer in &observers {
                observer.on_event(&event);
            }
        }
    }

    /// Hire `coach` into the slot for its category, firing any incumbent first.
    pub fn hire(&self, coach: &Arc<CoachRecord>) -> Result<Position> {
        if coach.is_placeholder() {
            return Err(CoachingError::PlaceholderNotHireable);
        }

        let position = {
            let mut slots = self.lock_slots();
            if coach.is_employed() {
                return Err(CoachingError::AlreadyEmployed { name: coach.name().to_string() });
            }
            let position = Position::try_from(coach.category())?;

            let mut events = Vec::with_capacity(2);
            if let Some(incumbent) = slots.slot_mut(position).take() {
                incumbent.set_employed(false);
                log::info!("Replacing {} coach {}", position, incumbent.name());
                events.push(RosterEvent::Fired { coach: incumbent, position });
            }
            coach.set_employed(true);
            *slots.slot_mut(position) = Some(Arc::clone(coach));
            events.push(RosterEvent::Hired { coach: Arc::clone(coach), position });
            self.enqueue(events);
            position
        };

        log::info!("Hired {} as {} coach", coach.name(), position);
        self.drain();
        Ok(position)
    }

    /// Empty `position`, returning the coach who held it.
    pub fn fire(&self, position: Position) -> Result<Arc<CoachRecord>> {
        let coach = {
            let mut slots = self.lock_slots();
            let coach = slots.slot_mut(position).take().ok_or(CoachingError::SlotEmpty { position })?;
            coach.set_employed(false);
            self.enqueue([RosterEvent::Fired { coach: Arc::clone(&coach), position }]);
            coach
        };

        log::info!("Fired {} coach {}", position, coach.name());
        self.drain();
        Ok(coach)
    }

    pub fn occupant(&self, position: Position) -> Option<Arc<CoachRecord>> {
        self.lock_slots().slot(position).clone()
    }

    pub fn has_coach_for(&self, position: Position) -> bool {
        self.lock_slots().slot(position).is_some()
    }

    /// Current staff in position order.
    pub fn staff(&self) -> Vec<Arc<CoachRecord>> {
        let slots = self.lock_slots();
        Position::ALL.iter().filter_map(|p| slots.slot(*p).clone()).collect()
    }

    /// Catalog coaches that could be hired right now.
    pub fn available_coaches(
        &self,
        catalog: &CoachCatalog,
        filter: MarketFilter,
    ) -> Vec<Arc<CoachRecord>> {
        let _slots = self.lock_slots();
        catalog
            .iter()
            .filter(|c| filter.matches(c))
            .filter(|c| !c.is_employed() && !c.is_placeholder())
            .filter(|c| Position::try_from(c.category()).is_ok())
            .cloned()
            .collect()
    }

    pub fn team_bonus(&self) -> TeamBonus {
        self.staff().iter().fold(TeamBonus::default(), |mut bonus, coach| {
            bonus.add(coach.category(), coach.effective_bonus());
            bonus
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coach(name: &str, category: Category) -> Arc<CoachRecord> {
        Arc::new(CoachRecord::builder(name, category).bonus(10).build())
    }

    fn recorder(service: &RosterService) -> Arc<Mutex<Vec<String>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        service.subscribe(move |event: &RosterEvent| {
            sink.lock().unwrap().push(event.to_string());
        });
        log
    }

    #[test]
    fn hire_fills_slot_and_sets_flag() {
        let roster = RosterService::new();
        let ava = coach("Ava", Category::Offense);

        assert_eq!(roster.hire(&ava).unwrap(), Position::Offense);
        assert!(ava.is_employed());
        assert!(roster.has_coach_for(Position::Offense));
        assert!(!roster.has_coach_for(Position::Defense));
        assert!(Arc::ptr_eq(&roster.occupant(Position::Offense).unwrap(), &ava));
    }

    #[test]
    fn hire_into_occupied_slot_fires_incumbent_first() {
        let roster = RosterService::new();
        let events = recorder(&roster);
        let ava = coach("Ava", Category::Offense);
        let bo = coach("Bo", Category::Offense);

        roster.hire(&ava).unwrap();
        roster.hire(&bo).unwrap();

        assert!(!ava.is_employed());
        assert!(bo.is_employed());
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "Hired Ava as Offense coach",
                "Fired Ava from Offense coach",
                "Hired Bo as Offense coach",
            ]
        );
    }

    #[test]
    fn employed_coach_cannot_be_hired_again() {
        let roster = RosterService::new();
        let ava = coach("Ava", Category::Offense);
        roster.hire(&ava).unwrap();

        let err = roster.hire(&ava).unwrap_err();
        assert!(matches!(err, CoachingError::AlreadyEmployed { ref name } if name == "Ava"));
        assert!(err.is_recoverable());
        assert!(ava.is_employed());
    }

    #[test]
    fn special_teams_and_placeholders_are_rejected() {
        let roster = RosterService::new();
        let events = recorder(&roster);

        let kicker = coach("Kay", Category::SpecialTeams);
        assert!(matches!(roster.hire(&kicker), Err(CoachingError::UnsupportedPosition { .. })));
        assert!(!kicker.is_employed());

        let open = Arc::new(CoachRecord::placeholder());
        assert!(matches!(roster.hire(&open), Err(CoachingError::PlaceholderNotHireable)));
        assert!(!open.is_employed());

        assert!(events.lock().unwrap().is_empty());
        assert!(roster.staff().is_empty());
    }

    #[test]
    fn fire_empty_slot_fails() {
        let roster = RosterService::new();
        assert!(matches!(
            roster.fire(Position::Defense),
            Err(CoachingError::SlotEmpty { position: Position::Defense })
        ));
    }

    #[test]
    fn fire_clears_flag_and_notifies() {
        let roster = RosterService::new();
        let dee = coach("Dee", Category::Defense);
        roster.hire(&dee).unwrap();
        let events = recorder(&roster);

        let fired = roster.fire(Position::Defense).unwrap();
        assert!(Arc::ptr_eq(&fired, &dee));
        assert!(!dee.is_employed());
        assert!(roster.occupant(Position::Defense).is_none());
        assert_eq!(*events.lock().unwrap(), vec!["Fired Dee from Defense coach"]);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let roster = RosterService::new();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let id = roster.subscribe(move |_: &RosterEvent| *sink.lock().unwrap() += 1);

        roster.hire(&coach("Ava", Category::Offense)).unwrap();
        assert!(roster.unsubscribe(id));
        assert!(!roster.unsubscribe(id));
        roster.fire(Position::Offense).unwrap();

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn observers_see_committed_state() {
        let roster = Arc::new(RosterService::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (probe, sink) = (Arc::clone(&roster), Arc::clone(&seen));
        roster.subscribe(move |event: &RosterEvent| {
            // Querying from inside a callback must not deadlock.
            let occupied = probe.has_coach_for(event.position());
            sink.lock().unwrap().push(occupied);
        });

        roster.hire(&coach("Ava", Category::Offense)).unwrap();
        roster.fire(Position::Offense).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn hire_from_observer_is_delivered_after_current_batch() {
        let roster = Arc::new(RosterService::new());
        let ava = coach("Ava", Category::Offense);
        let bo = coach("Bo", Category::Offense);
        let cy = coach("Cy", Category::Offense);
        roster.hire(&ava).unwrap();

        let events = recorder(&roster);
        let (inner, cy_hire) = (Arc::clone(&roster), Arc::clone(&cy));
        let triggered = Arc::new(Mutex::new(false));
        roster.subscribe(move |event: &RosterEvent| {
            let mut triggered = triggered.lock().unwrap();
            if !*triggered && matches!(event, RosterEvent::Fired { .. }) {
                *triggered = true;
                inner.hire(&cy_hire).unwrap();
            }
        });

        roster.hire(&bo).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "Fired Ava from Offense coach",
                "Hired Bo as Offense coach",
                "Fired Bo from Offense coach",
                "Hired Cy as Offense coach",
            ]
        );
        assert!(Arc::ptr_eq(&roster.occupant(Position::Offense).unwrap(), &cy));
        assert!(cy.is_employed() && !bo.is_employed() && !ava.is_employed());
    }

    #[test]
    fn panicking_observer_does_not_stall_later_events() {
        let roster = RosterService::new();
        let id = roster.subscribe(|_: &RosterEvent| panic!("observer failure"));
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            roster.hire(&coach("Ava", Category::Offense))
        }));
        assert!(outcome.is_err());
        assert!(roster.unsubscribe(id));

        let events = recorder(&roster);
        roster.fire(Position::Offense).unwrap();
        assert_eq!(*events.lock().unwrap(), vec!["Fired Ava from Offense coach"]);
    }

    #[test]
    fn team_bonus_sums_effective_bonuses() {
        let roster = RosterService::new();
        let ava = coach("Ava", Category::Offense);
        let dee = coach("Dee", Category::Defense);
        dee.set_performance(1.5);
        roster.hire(&ava).unwrap();
        roster.hire(&dee).unwrap();

        let bonus = roster.team_bonus();
        assert_eq!(bonus.offense_bonus, 10);
        assert_eq!(bonus.defense_bonus, 15);
        assert_eq!(bonus.special_teams_bonus, 0);
        assert_eq!(bonus.total(), 25);
    }

    #[test]
    fn available_coaches_excludes_employed_and_special_teams() {
        let catalog = CoachCatalog::from_records(vec![
            CoachRecord::builder("Ava", Category::Offense).build(),
            CoachRecord::builder("Bo", Category::Offense).build(),
            CoachRecord::builder("Dee", Category::Defense).build(),
            CoachRecord::builder("Kay", Category::SpecialTeams).build(),
        ]);
        let roster = RosterService::new();
        roster.hire(catalog.by_name("ava").unwrap()).unwrap();

        let names = |filter| -> Vec<String> {
            roster
                .available_coaches(&catalog, filter)
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        };
        assert_eq!(names(MarketFilter::All), vec!["Bo", "Dee"]);
        assert_eq!(names(MarketFilter::Only(Category::Offense)), vec!["Bo"]);
        assert!(names(MarketFilter::Only(Category::SpecialTeams)).is_empty());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Hire(usize),
            Fire(bool),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![(0usize..6).prop_map(Op::Hire), any::<bool>().prop_map(Op::Fire)]
        }

        proptest! {
            #[test]
            fn at_most_one_employed_per_position(ops in prop::collection::vec(op(), 0..40)) {
                let pool: Vec<_> = [
                    ("O1", Category::Offense),
                    ("O2", Category::Offense),
                    ("O3", Category::Offense),
                    ("D1", Category::Defense),
                    ("D2", Category::Defense),
                    ("S1", Category::SpecialTeams),
                ]
                .iter()
                .map(|(n, c)| coach(n, *c))
                .collect();
                let roster = RosterService::new();

                for op in ops {
                    match op {
                        Op::Hire(i) => { let _ = roster.hire(&pool[i]); }
                        Op::Fire(offense) => {
                            let position = if offense { Position::Offense } else { Position::Defense };
                            let _ = roster.fire(position);
                        }
                    }

                    for position in Position::ALL {
                        let employed: Vec<_> = pool
                            .iter()
                            .filter(|c| c.category() == position.category() && c.is_employed())
                            .collect();
                        match roster.occupant(position) {
                            Some(occupant) => {
                                prop_assert_eq!(employed.len(), 1);
                                prop_assert!(Arc::ptr_eq(employed[0], &occupant));
                            }
                            None => prop_assert!(employed.is_empty()),
                        }
                    }
                    prop_assert!(!pool[5].is_employed());
                }
            }
        }
    }
}
