use crate::journey_tracker::LocationUpdate;
use crate::progress::ARRIVAL_THRESHOLD;

pub const APP_NAME: &str = "TravelBar";

/// What the host should show in its ongoing notification slot. There is only
/// one slot, each notice replaces the previous one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Running { title: String },
    Arrival { ticker: String, title: String },
    Cleared,
}

pub fn initialising() -> Notice {
    Notice::Running {
        title: format!("Initialising {APP_NAME}"),
    }
}

pub fn arrival() -> Notice {
    Notice::Arrival {
        ticker: "Yeehaw!".to_string(),
        title: "You are arriving at your destination!".to_string(),
    }
}

pub fn display_level(percent_complete: u8, min_visible: u8) -> u8 {
    percent_complete.max(min_visible).min(100)
}

pub fn plan(update: &LocationUpdate, min_visible: u8) -> Option<Notice> {
    if update.arrival.is_some() {
        return Some(arrival());
    }
    let percent_complete = update.progress.percent_complete;
    if percent_complete < ARRIVAL_THRESHOLD {
        Some(Notice::Running {
            title: format!(
                "{}% journey completed",
                display_level(percent_complete, min_visible)
            ),
        })
    } else {
        // keep the arrival notice on screen
        None
    }
}
