/* The progress model behind the overlay bar. A tracker owns at most one
journey at a time and turns every location fix into a `ProgressState`.

   IDLE --start--> TRACKING --(>= 90%)--> ARRIVED
     ^                 |   ^                  |
     |                 |   +--destination-----+
     +------stop-------+------------stop------+

Nothing here does I/O or locking; callers must serialize calls (see
`session::TrackingSession`).
*/
use chrono::{DateTime, Utc};
use strum_macros::Display;
use uuid::Uuid;

use crate::coordinate::{Coordinate, Distance, Haversine};
use crate::error::TrackerError;
use crate::progress::{self, PercentPolicy, ProgressState, ARRIVAL_THRESHOLD};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerState {
    Idle,
    Tracking,
    Arrived,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Journey {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub start: Coordinate,
    pub destination: Coordinate,
    // Only refreshed on location updates, so it can lag behind a destination
    // change until the next fix arrives.
    pub total_distance: f64,
}

/// The one-shot signal emitted when a journey first crosses the arrival
/// threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrival {
    pub journey_id: Uuid,
    pub destination: Coordinate,
    pub percent_complete: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LocationUpdate {
    pub progress: ProgressState,
    pub distance_remaining: f64,
    pub arrival: Option<Arrival>,
}

pub struct JourneyTracker<D = Haversine> {
    distance: D,
    policy: PercentPolicy,
    journey: Option<Journey>,
    arrived: bool,
}

impl JourneyTracker<Haversine> {
    pub fn new() -> Self {
        Self::with_distance(Haversine, PercentPolicy::default())
    }
}

impl<D: Distance> JourneyTracker<D> {
    pub fn with_distance(distance: D, policy: PercentPolicy) -> Self {
        JourneyTracker {
            distance,
            policy,
            journey: None,
            arrived: false,
        }
    }

    pub fn state(&self) -> TrackerState {
        match (&self.journey, self.arrived) {
            (None, _) => TrackerState::Idle,
            (Some(_), false) => TrackerState::Tracking,
            (Some(_), true) => TrackerState::Arrived,
        }
    }

    // An arrived journey still counts: its resources are held until `stop`.
    pub fn is_tracking(&self) -> bool {
        self.journey.is_some()
    }

    pub fn journey(&self) -> Option<&Journey> {
        self.journey.as_ref()
    }

    pub fn policy(&self) -> PercentPolicy {
        self.policy
    }

    pub fn start(
        &mut self,
        start: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> Result<&Journey, TrackerError> {
        self.ensure_state("start", |state| state == TrackerState::Idle)?;
        let start = start.ok_or(TrackerError::MissingInput("starting point"))?;
        let destination = destination.ok_or(TrackerError::MissingInput("destination"))?;

        let journey = Journey {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            start,
            destination,
            total_distance: self.distance.distance(&start, &destination),
        };
        info!(
            "[journey_tracker] started journey {}: {} -> {}, total distance {:.1}m",
            journey.id, journey.start, journey.destination, journey.total_distance
        );
        self.arrived = false;
        Ok(self.journey.insert(journey))
    }

    pub fn on_location_changed(
        &mut self,
        current: Coordinate,
    ) -> Result<LocationUpdate, TrackerError> {
        self.ensure_state("on_location_changed", |state| state != TrackerState::Idle)?;
        let Some(journey) = self.journey.as_mut() else {
            return Err(TrackerError::InvalidState {
                operation: "on_location_changed",
                state: TrackerState::Idle,
            });
        };

        journey.total_distance = self.distance.distance(&journey.start, &journey.destination);
        let distance_remaining = self.distance.distance(&current, &journey.destination);
        let fraction = progress::completion_fraction(distance_remaining, journey.total_distance);
        let percent_complete = progress::percent_complete(fraction, self.policy);

        let arrival = if !self.arrived && percent_complete >= ARRIVAL_THRESHOLD {
            self.arrived = true;
            info!(
                "[journey_tracker] journey {} arrived at {}% ({:.1}m remaining)",
                journey.id, percent_complete, distance_remaining
            );
            Some(Arrival {
                journey_id: journey.id,
                destination: journey.destination,
                percent_complete,
            })
        } else {
            None
        };

        debug!(
            "[journey_tracker] current={} total={:.1}m remaining={:.1}m complete={}%",
            current, journey.total_distance, distance_remaining, percent_complete
        );

        Ok(LocationUpdate {
            progress: ProgressState::new(percent_complete, self.arrived),
            distance_remaining,
            arrival,
        })
    }

    /// Replaces the destination. The total distance is recomputed on the next
    /// fix. A journey that already arrived goes back to tracking and may signal
    /// arrival again for the new destination.
    pub fn on_destination_changed(
        &mut self,
        new_destination: Coordinate,
    ) -> Result<(), TrackerError> {
        self.ensure_state("on_destination_changed", |state| state != TrackerState::Idle)?;
        if let Some(journey) = self.journey.as_mut() {
            info!(
                "[journey_tracker] destination of {} changed: {} -> {}",
                journey.id, journey.destination, new_destination
            );
            journey.destination = new_destination;
        }
        self.arrived = false;
        Ok(())
    }

    pub fn stop(&mut self) -> Option<Journey> {
        self.arrived = false;
        let journey = self.journey.take();
        if let Some(journey) = &journey {
            info!("[journey_tracker] stopped journey {}", journey.id);
        }
        journey
    }

    fn ensure_state(
        &self,
        operation: &'static str,
        allowed: impl FnOnce(TrackerState) -> bool,
    ) -> Result<(), TrackerError> {
        let state = self.state();
        if allowed(state) {
            Ok(())
        } else {
            warn!("[journey_tracker] rejected `{operation}` while {state}");
            Err(TrackerError::InvalidState { operation, state })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Band;

    fn flat(a: &Coordinate, b: &Coordinate) -> f64 {
        ((a.latitude - b.latitude).powi(2) + (a.longitude - b.longitude).powi(2)).sqrt()
    }

    fn tracker() -> JourneyTracker<fn(&Coordinate, &Coordinate) -> f64> {
        JourneyTracker::with_distance(
            flat as fn(&Coordinate, &Coordinate) -> f64,
            PercentPolicy::Clamped,
        )
    }

    #[test]
    fn idle_by_default() {
        let tracker = JourneyTracker::new();
        assert_eq!(tracker.state(), TrackerState::Idle);
        assert!(!tracker.is_tracking());
        assert!(tracker.journey().is_none());
    }

    #[test]
    fn start_twice() {
        let mut tracker = tracker();
        tracker
            .start(Some(Coordinate::new(0., 0.)), Some(Coordinate::new(0., 1.)))
            .unwrap();
        let error = tracker
            .start(Some(Coordinate::new(1., 1.)), Some(Coordinate::new(2., 2.)))
            .unwrap_err();
        assert_eq!(
            error,
            TrackerError::InvalidState {
                operation: "start",
                state: TrackerState::Tracking
            }
        );
        // the first journey is untouched
        assert_eq!(tracker.journey().unwrap().start, Coordinate::new(0., 0.));
    }

    #[test]
    fn missing_input_leaves_tracker_idle() {
        let mut tracker = tracker();
        assert_eq!(
            tracker.start(None, Some(Coordinate::new(0., 1.))).unwrap_err(),
            TrackerError::MissingInput("starting point")
        );
        assert_eq!(
            tracker.start(Some(Coordinate::new(0., 1.)), None).unwrap_err(),
            TrackerError::MissingInput("destination")
        );
        assert_eq!(tracker.state(), TrackerState::Idle);
    }

    #[test]
    fn idle_rejects_updates() {
        let mut tracker = tracker();
        assert!(matches!(
            tracker.on_location_changed(Coordinate::new(0., 0.)),
            Err(TrackerError::InvalidState {
                state: TrackerState::Idle,
                ..
            })
        ));
        assert!(tracker.on_destination_changed(Coordinate::new(0., 0.)).is_err());
    }

    #[test]
    fn total_distance_follows_destination_lazily() {
        let mut tracker = tracker();
        tracker
            .start(Some(Coordinate::new(0., 0.)), Some(Coordinate::new(0., 4.)))
            .unwrap();
        assert_eq!(tracker.journey().unwrap().total_distance, 4.0);

        tracker.on_destination_changed(Coordinate::new(0., 2.)).unwrap();
        assert_eq!(tracker.journey().unwrap().total_distance, 4.0);

        let update = tracker.on_location_changed(Coordinate::new(0., 1.)).unwrap();
        assert_eq!(tracker.journey().unwrap().total_distance, 2.0);
        assert_eq!(update.distance_remaining, 1.0);
        assert_eq!(update.progress.percent_complete, 50);
    }

    #[test]
    fn arrived_state_keeps_updating() {
        let mut tracker = tracker();
        tracker
            .start(Some(Coordinate::new(0., 0.)), Some(Coordinate::new(0., 10.)))
            .unwrap();
        let update = tracker.on_location_changed(Coordinate::new(0., 9.5)).unwrap();
        assert!(update.arrival.is_some());
        assert_eq!(tracker.state(), TrackerState::Arrived);

        // walking back out of the arrival zone does not leave ARRIVED
        let update = tracker.on_location_changed(Coordinate::new(0., 7.)).unwrap();
        assert_eq!(update.progress.percent_complete, 70);
        assert_eq!(update.progress.band, Band::Warning);
        assert!(update.progress.arrived);
        assert!(update.arrival.is_none());
        assert_eq!(tracker.state(), TrackerState::Arrived);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut tracker = tracker();
        assert!(tracker.stop().is_none());
        tracker
            .start(Some(Coordinate::new(0., 0.)), Some(Coordinate::new(0., 1.)))
            .unwrap();
        assert!(tracker.stop().is_some());
        assert!(tracker.stop().is_none());
        assert_eq!(tracker.state(), TrackerState::Idle);
    }
}
