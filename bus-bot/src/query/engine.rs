//! Trip selection and ordering.
//!
//! Branches, in order of precedence:
//!
//! 1. Line filter: every trip of a matching line (optionally one direction),
//!    ascending by departure. No time window applies.
//! 2. Direction plus "now": the next departures, ascending by departure,
//!    capped at the configured window unless a count or full listing is asked.
//! 3. Direction plus a literal time: arrivals around, before or after that
//!    time, depending on the relation.
//!
//! Branches 2 and 3 only ever consider trips that have not departed yet.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{
    Direction, Intent, TimeOfDay, TimeRelation, TripRecord, on_day, parse_hhmm,
};
use crate::schedule::ScheduleStore;

use super::config::QueryConfig;
use super::outcome::{EmptyReason, QueryOutcome};

/// Query engine over a schedule store.
///
/// Holds only shared references, so any number of engines may query the
/// same store concurrently.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a ScheduleStore,
    config: &'a QueryConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a ScheduleStore, config: &'a QueryConfig) -> Self {
        Self { store, config }
    }

    /// Select and order the trips answering `intent`, as seen at `now`.
    ///
    /// "Today" is the date of `now`; schedule times and the requested time
    /// are placed on that date before being compared.
    pub fn run(&self, intent: &Intent, now: NaiveDateTime) -> QueryOutcome<'a> {
        if self.store.is_empty() {
            return QueryOutcome::Empty(EmptyReason::EmptySchedule);
        }

        if let Some(filter) = &intent.line_filter {
            return self.by_line(filter, intent.direction);
        }

        let Some(direction) = intent.direction else {
            return QueryOutcome::Empty(EmptyReason::MissingDirection);
        };

        let today = now.date();
        let upcoming = self.upcoming(direction, now);

        match &intent.time_of_day {
            Some(TimeOfDay::Now) => self.next_departures(upcoming, today, intent),
            Some(TimeOfDay::At(raw)) => {
                let target = match parse_hhmm(raw) {
                    Ok(time) => on_day(today, time),
                    Err(e) => return QueryOutcome::Empty(EmptyReason::InvalidTime(e)),
                };
                match intent.time_relation {
                    Some(TimeRelation::Near) => closest_around(upcoming, today, target),
                    Some(TimeRelation::Before) => {
                        let arriving = upcoming
                            .into_iter()
                            .filter(|t| on_day(today, t.arrival) < target)
                            .collect();
                        ranked_by_gap(arriving, today, target, intent)
                    }
                    Some(TimeRelation::After) => {
                        let arriving = upcoming
                            .into_iter()
                            .filter(|t| on_day(today, t.arrival) >= target)
                            .collect();
                        ranked_by_gap(arriving, today, target, intent)
                    }
                    None => QueryOutcome::Empty(EmptyReason::UnsupportedRelation),
                }
            }
            None => QueryOutcome::Empty(EmptyReason::MissingTime),
        }
    }

    /// All trips of lines containing `filter`, ascending by departure.
    fn by_line(&self, filter: &str, direction: Option<Direction>) -> QueryOutcome<'a> {
        let needle = filter.to_lowercase();
        let mut trips: Vec<&'a TripRecord> = self
            .store
            .trips()
            .iter()
            .filter(|t| t.line_contains(&needle))
            .filter(|t| direction.is_none_or(|d| t.direction == d))
            .collect();
        trips.sort_by_key(|t| t.departure);
        QueryOutcome::from_trips(trips)
    }

    /// Trips in `direction` departing strictly after `now`, in store order.
    fn upcoming(&self, direction: Direction, now: NaiveDateTime) -> Vec<&'a TripRecord> {
        let today = now.date();
        self.store
            .trips()
            .iter()
            .filter(|t| t.direction == direction)
            .filter(|t| on_day(today, t.departure) > now)
            .collect()
    }

    fn next_departures(
        &self,
        mut trips: Vec<&'a TripRecord>,
        today: NaiveDate,
        intent: &Intent,
    ) -> QueryOutcome<'a> {
        trips.sort_by_key(|t| on_day(today, t.departure));
        QueryOutcome::from_trips(cap(trips, intent, Some(self.config.now_window)))
    }
}

/// The latest arrival at-or-before `target` and the earliest arrival after it.
///
/// At most two trips, ascending by arrival. Among equal arrivals the earlier
/// trip in store order wins.
fn closest_around<'a>(
    trips: Vec<&'a TripRecord>,
    today: NaiveDate,
    target: NaiveDateTime,
) -> QueryOutcome<'a> {
    let mut below: Option<&'a TripRecord> = None;
    let mut above: Option<&'a TripRecord> = None;

    for trip in trips {
        let arrival = on_day(today, trip.arrival);
        if arrival <= target {
            if below.is_none_or(|b| arrival > on_day(today, b.arrival)) {
                below = Some(trip);
            }
        } else if above.is_none_or(|a| arrival < on_day(today, a.arrival)) {
            above = Some(trip);
        }
    }

    QueryOutcome::from_trips(below.into_iter().chain(above).collect())
}

/// Order by distance between arrival and `target`, closest first.
///
/// Without a count or full listing every trip is returned.
fn ranked_by_gap<'a>(
    mut trips: Vec<&'a TripRecord>,
    today: NaiveDate,
    target: NaiveDateTime,
    intent: &Intent,
) -> QueryOutcome<'a> {
    trips.sort_by_key(|t| (on_day(today, t.arrival) - target).abs());
    QueryOutcome::from_trips(cap(trips, intent, None))
}

/// Apply the count policy: full listing beats a requested count, which beats
/// the branch default.
fn cap<'a>(
    mut trips: Vec<&'a TripRecord>,
    intent: &Intent,
    default: Option<usize>,
) -> Vec<&'a TripRecord> {
    if intent.full_listing {
        return trips;
    }
    if let Some(limit) = intent.requested_count.or(default) {
        trips.truncate(limit);
    }
    trips
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{NaiveTime, TimeDelta};
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn arb_time() -> impl Strategy<Value = NaiveTime> {
        (0u32..24, 0u32..60).prop_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    fn arb_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Outbound), Just(Direction::Return)]
    }

    /// Trips that never cross midnight: arrival is 5..=120 minutes after
    /// departure, clamped to the end of the day.
    fn arb_trip() -> impl Strategy<Value = TripRecord> {
        (
            prop_oneof![Just("Ruta 60"), Just("Ruta 12"), Just("Expreso")],
            arb_direction(),
            arb_time(),
            5i64..=120,
        )
            .prop_map(|(line, direction, departure, ride)| {
                let latest = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
                let (arrival, wrapped) = departure.overflowing_add_signed(TimeDelta::minutes(ride));
                let arrival = if wrapped != 0 { latest } else { arrival };
                TripRecord::new(line, direction, departure, arrival)
            })
    }

    fn arb_store() -> impl Strategy<Value = ScheduleStore> {
        prop::collection::vec(arb_trip(), 0..40).prop_map(ScheduleStore::new)
    }

    fn arb_relation() -> impl Strategy<Value = TimeRelation> {
        prop_oneof![
            Just(TimeRelation::Near),
            Just(TimeRelation::Before),
            Just(TimeRelation::After)
        ]
    }

    proptest! {
        /// "now" never shows a trip that has already left
        #[test]
        fn now_excludes_departed(
            store in arb_store(),
            direction in arb_direction(),
            now in arb_time(),
            full in any::<bool>(),
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let mut intent = Intent::toward(direction).now();
            intent.full_listing = full;
            let now = on_day(date(), now);

            for trip in engine.run(&intent, now).trips() {
                prop_assert!(on_day(date(), trip.departure) > now);
                prop_assert_eq!(trip.direction, direction);
            }
        }

        /// "now" is ascending by departure and capped at the default window
        #[test]
        fn now_sorted_and_capped(
            store in arb_store(),
            direction in arb_direction(),
            now in arb_time(),
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let outcome = engine.run(&Intent::toward(direction).now(), on_day(date(), now));
            let trips = outcome.trips();

            prop_assert!(trips.len() <= 3);
            prop_assert!(trips.windows(2).all(|w| w[0].departure <= w[1].departure));

            let available = store
                .trips()
                .iter()
                .filter(|t| t.direction == direction && t.departure > now)
                .count();
            prop_assert_eq!(trips.len(), available.min(3));
        }

        /// A full listing overrides any requested count
        #[test]
        fn full_listing_overrides_count(
            store in arb_store(),
            direction in arb_direction(),
            now in arb_time(),
            count in 1usize..5,
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let now = on_day(date(), now);

            let full = engine.run(&Intent::toward(direction).now().with_count(count).with_full_listing(), now);
            let uncapped = engine.run(&Intent::toward(direction).now().with_full_listing(), now);
            prop_assert_eq!(full, uncapped);
        }

        /// Before/after results are ordered by distance to the target
        #[test]
        fn gap_ordering(
            store in arb_store(),
            direction in arb_direction(),
            now in arb_time(),
            target in arb_time(),
            relation in prop_oneof![Just(TimeRelation::Before), Just(TimeRelation::After)],
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let target_str = format!("{}", target.format("%H:%M"));
            let intent = Intent::toward(direction).at(target_str, relation);
            let outcome = engine.run(&intent, on_day(date(), now));
            let target = on_day(date(), target);

            let gaps: Vec<TimeDelta> = outcome
                .trips()
                .iter()
                .map(|t| (on_day(date(), t.arrival) - target).abs())
                .collect();
            prop_assert!(gaps.windows(2).all(|w| w[0] <= w[1]));

            for trip in outcome.trips() {
                let arrival = on_day(date(), trip.arrival);
                match relation {
                    TimeRelation::Before => prop_assert!(arrival < target),
                    _ => prop_assert!(arrival >= target),
                }
            }
        }

        /// Before/after without a cap return every qualifying trip
        #[test]
        fn gap_branches_are_uncapped(
            store in arb_store(),
            direction in arb_direction(),
            now in arb_time(),
            target in arb_time(),
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let target_str = format!("{}", target.format("%H:%M"));
            let outcome = engine.run(
                &Intent::toward(direction).at(target_str, TimeRelation::After),
                on_day(date(), now),
            );

            let expected = store
                .trips()
                .iter()
                .filter(|t| t.direction == direction && t.departure > now && t.arrival >= target)
                .count();
            prop_assert_eq!(outcome.trips().len(), expected);
        }

        /// "near" returns at most one trip on each side of the target
        #[test]
        fn near_brackets_target(
            store in arb_store(),
            direction in arb_direction(),
            now in arb_time(),
            target in arb_time(),
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let target_str = format!("{}", target.format("%H:%M"));
            let outcome = engine.run(
                &Intent::toward(direction).at(target_str, TimeRelation::Near),
                on_day(date(), now),
            );
            let trips = outcome.trips();

            prop_assert!(trips.len() <= 2);
            prop_assert!(trips.windows(2).all(|w| w[0].arrival <= w[1].arrival));
            if trips.len() == 2 {
                prop_assert!(trips[0].arrival <= target);
                prop_assert!(trips[1].arrival > target);
            }
        }

        /// An empty store answers nothing, whatever the intent
        #[test]
        fn empty_store_answers_nothing(
            direction in arb_direction(),
            now in arb_time(),
            target in arb_time(),
            relation in arb_relation(),
        ) {
            let store = ScheduleStore::empty();
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let now = on_day(date(), now);
            let target_str = format!("{}", target.format("%H:%M"));

            let intents = [
                Intent::toward(direction).now(),
                Intent::toward(direction).at(target_str, relation),
                Intent::for_line("60"),
            ];
            for intent in &intents {
                prop_assert_eq!(
                    engine.run(intent, now),
                    QueryOutcome::Empty(EmptyReason::EmptySchedule)
                );
            }
        }

        /// Line queries are ascending by departure and ignore the clock
        #[test]
        fn line_filter_ignores_clock(
            store in arb_store(),
            a in arb_time(),
            b in arb_time(),
        ) {
            let config = QueryConfig::default();
            let engine = QueryEngine::new(&store, &config);
            let intent = Intent::for_line("ruta");

            let first = engine.run(&intent, on_day(date(), a));
            let second = engine.run(&intent, on_day(date(), b));
            prop_assert_eq!(&first, &second);
            prop_assert!(first.trips().windows(2).all(|w| w[0].departure <= w[1].departure));
            prop_assert!(first.trips().iter().all(|t| t.line.starts_with("Ruta")));
        }
    }
}
