/* A `TrackingSession` is the single owner of a `JourneyTracker`. Location
fixes and destination changes can come from different threads on the host, so
they are all posted as `TrackerEvent`s onto one queue and applied in order by
a worker thread. Results are pushed into the registered sinks.
*/
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::Result;

use crate::config::TrackerConfig;
use crate::coordinate::{Coordinate, Distance, Haversine};
use crate::error::TrackerError;
use crate::gps_processor::{GpsProcessor, ProcessResult, RawData};
use crate::journey_tracker::{JourneyTracker, LocationUpdate};
use crate::notification::{self, Notice};
use crate::sinks::Sinks;

#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    Start {
        start: Option<Coordinate>,
        destination: Option<Coordinate>,
    },
    Fix(RawData),
    DestinationChanged(Coordinate),
    Stop,
}

pub struct TrackingSession<D = Haversine> {
    config: TrackerConfig,
    tracker: JourneyTracker<D>,
    gps_processor: GpsProcessor,
    sinks: Sinks,
    tracking: Arc<AtomicBool>,
}

impl TrackingSession<Haversine> {
    pub fn new(config: TrackerConfig, sinks: Sinks) -> Self {
        Self::with_distance(config, Haversine, sinks)
    }
}

impl<D: Distance> TrackingSession<D> {
    pub fn with_distance(config: TrackerConfig, distance: D, sinks: Sinks) -> Self {
        TrackingSession {
            tracker: JourneyTracker::with_distance(distance, config.percent_policy),
            gps_processor: GpsProcessor::with_accuracy_threshold(config.accuracy_threshold_m),
            config,
            sinks,
            tracking: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn tracker(&self) -> &JourneyTracker<D> {
        &self.tracker
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    pub fn handle(&mut self, event: TrackerEvent) -> Result<(), TrackerError> {
        match event {
            TrackerEvent::Start { start, destination } => {
                self.tracker.start(start, destination)?;
                self.gps_processor.reset();
                self.sinks.notice.on_notice(&notification::initialising());
            }
            TrackerEvent::Fix(raw_data) => {
                if !self.tracker.is_tracking() {
                    // same error the tracker would give, without touching the
                    // processor's last fix
                    return self
                        .tracker
                        .on_location_changed(raw_data.coordinate())
                        .map(|_| ());
                }
                if self.gps_processor.preprocess(&raw_data) == ProcessResult::Accept {
                    let update = self.tracker.on_location_changed(raw_data.coordinate())?;
                    self.publish(&update);
                }
            }
            TrackerEvent::DestinationChanged(destination) => {
                self.tracker.on_destination_changed(destination)?;
            }
            TrackerEvent::Stop => self.stop(),
        }
        self.tracking.store(self.tracker.is_tracking(), Ordering::Release);
        Ok(())
    }

    fn publish(&mut self, update: &LocationUpdate) {
        self.sinks.progress.on_progress(&update.progress);
        if let Some(notice) = notification::plan(update, self.config.min_visible_progress) {
            self.sinks.notice.on_notice(&notice);
        }
        if let Some(arrival) = &update.arrival {
            self.sinks.arrival.on_arrived(arrival);
            if self.config.stop_on_arrival {
                info!("[session] stopping after arrival");
                self.tracker.stop();
            }
        }
    }

    fn stop(&mut self) {
        let journey = self.tracker.stop();
        self.gps_processor.reset();
        self.tracking.store(false, Ordering::Release);
        if journey.is_some() {
            self.sinks.notice.on_notice(&Notice::Cleared);
        }
    }

    /// Drains `receiver` until every sender is gone. Rejected events are
    /// logged and the loop carries on.
    pub fn run(mut self, receiver: Receiver<TrackerEvent>) {
        while let Ok(event) = receiver.recv() {
            if let Err(error) = self.handle(event) {
                warn!("[session] event rejected: {error}");
            }
        }
        self.stop();
        info!("[session] event queue closed");
    }
}

impl<D: Distance + Send + 'static> TrackingSession<D> {
    pub fn spawn(self) -> Result<SessionHandle> {
        let (sender, receiver) = mpsc::channel();
        let tracking = self.tracking.clone();
        let thread = thread::Builder::new()
            .name("travelbar-session".to_string())
            .spawn(move || self.run(receiver))?;
        Ok(SessionHandle {
            sender,
            tracking,
            thread,
        })
    }
}

/// The host side of a spawned session.
pub struct SessionHandle {
    sender: Sender<TrackerEvent>,
    tracking: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl SessionHandle {
    pub fn send(&self, event: TrackerEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| anyhow!("tracking session is gone"))
    }

    pub fn start_tracking(
        &self,
        start: Option<Coordinate>,
        destination: Option<Coordinate>,
    ) -> Result<()> {
        self.send(TrackerEvent::Start { start, destination })
    }

    // NOTE: Android may deliver a batch of fixes that are not in time order.
    pub fn on_location_update(&self, mut raw_data_list: Vec<RawData>) -> Result<()> {
        raw_data_list.sort_by_key(|raw_data| raw_data.timestamp_ms);
        for raw_data in raw_data_list {
            self.send(TrackerEvent::Fix(raw_data))?;
        }
        Ok(())
    }

    pub fn change_destination(&self, destination: Coordinate) -> Result<()> {
        self.send(TrackerEvent::DestinationChanged(destination))
    }

    pub fn stop_tracking(&self) -> Result<()> {
        self.send(TrackerEvent::Stop)
    }

    /// Reflects the worker's state as of the last event it finished handling.
    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    pub fn shutdown(self) -> Result<()> {
        drop(self.sender);
        self.thread
            .join()
            .map_err(|_| anyhow!("tracking session panicked"))
    }
}
