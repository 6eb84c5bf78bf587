use std::sync::mpsc::Sender;

use crate::journey_tracker::Arrival;
use crate::notification::Notice;
use crate::progress::ProgressState;

// Sinks are fire-and-forget: a consumer that went away is not the tracker's
// problem.

pub trait ProgressSink {
    fn on_progress(&mut self, progress: &ProgressState);
}

pub trait ArrivalSink {
    fn on_arrived(&mut self, arrival: &Arrival);
}

pub trait NoticeSink {
    fn on_notice(&mut self, notice: &Notice);
}

impl<F: FnMut(&ProgressState)> ProgressSink for F {
    fn on_progress(&mut self, progress: &ProgressState) {
        self(progress)
    }
}

impl<F: FnMut(&Arrival)> ArrivalSink for F {
    fn on_arrived(&mut self, arrival: &Arrival) {
        self(arrival)
    }
}

impl<F: FnMut(&Notice)> NoticeSink for F {
    fn on_notice(&mut self, notice: &Notice) {
        self(notice)
    }
}

impl ProgressSink for Sender<ProgressState> {
    fn on_progress(&mut self, progress: &ProgressState) {
        let _ = self.send(*progress);
    }
}

impl ArrivalSink for Sender<Arrival> {
    fn on_arrived(&mut self, arrival: &Arrival) {
        let _ = self.send(arrival.clone());
    }
}

impl NoticeSink for Sender<Notice> {
    fn on_notice(&mut self, notice: &Notice) {
        let _ = self.send(notice.clone());
    }
}

pub struct Sinks {
    pub progress: Box<dyn ProgressSink + Send>,
    pub arrival: Box<dyn ArrivalSink + Send>,
    pub notice: Box<dyn NoticeSink + Send>,
}

impl Sinks {
    pub fn new(
        progress: impl ProgressSink + Send + 'static,
        arrival: impl ArrivalSink + Send + 'static,
    ) -> Self {
        Sinks {
            progress: Box::new(progress),
            arrival: Box::new(arrival),
            notice: Box::new(|_: &Notice| {}),
        }
    }

    pub fn with_notices(mut self, notice: impl NoticeSink + Send + 'static) -> Self {
        self.notice = Box::new(notice);
        self
    }
}
