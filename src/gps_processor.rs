use crate::coordinate::Coordinate;
use chrono::{DateTime, Utc};

/// A single fix as reported by the platform location provider.
#[derive(Clone, Debug, PartialEq)]
pub struct RawData {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp_ms: Option<i64>,
    pub accuracy: Option<f32>,
}

impl RawData {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_ms.and_then(DateTime::from_timestamp_millis)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum ProcessResult {
    Accept = 0,
    // negative values are for fixes that never reach the tracker.
    Ignore = -1,
}

impl TryFrom<i8> for ProcessResult {
    type Error = anyhow::Error;

    fn try_from(i: i8) -> Result<Self, Self::Error> {
        match i {
            0 => Ok(ProcessResult::Accept),
            -1 => Ok(ProcessResult::Ignore),
            _ => Err(anyhow!("invalid `ProcessResult`: {i}")),
        }
    }
}

impl ProcessResult {
    pub fn to_int(&self) -> i8 {
        *self as i8
    }
}

pub const DEFAULT_ACCURACY_THRESHOLD: f32 = 50.0;

pub struct GpsProcessor {
    accuracy_threshold: f32,
    last_data: Option<RawData>,
}

impl GpsProcessor {
    pub fn new() -> Self {
        Self::with_accuracy_threshold(DEFAULT_ACCURACY_THRESHOLD)
    }

    pub fn with_accuracy_threshold(accuracy_threshold: f32) -> Self {
        GpsProcessor {
            accuracy_threshold,
            last_data: None,
        }
    }

    pub fn last_data(&self) -> Option<&RawData> {
        self.last_data.as_ref()
    }

    pub fn reset(&mut self) {
        self.last_data = None;
    }

    pub fn preprocess(&mut self, curr_data: &RawData) -> ProcessResult {
        let too_inaccurate = match curr_data.accuracy {
            Some(accuracy) => accuracy > self.accuracy_threshold,
            None => false,
        };
        // NOTE: Providers sometimes hand out a cached fix from a while ago
        // after a fresher one. Feeding it to the tracker would make the bar jump
        // backwards, so we drop it.
        let out_of_order = match (&self.last_data, curr_data.timestamp_ms) {
            (Some(last_data), Some(now)) => last_data.timestamp_ms.is_some_and(|prev| now < prev),
            _ => false,
        };
        let non_finite = !curr_data.coordinate().is_finite();

        if too_inaccurate || out_of_order || non_finite {
            debug!(
                "[gps_processor] ignored fix {:?} (inaccurate={too_inaccurate}, out_of_order={out_of_order}, non_finite={non_finite})",
                curr_data
            );
            ProcessResult::Ignore
        } else {
            self.last_data = Some(curr_data.clone());
            ProcessResult::Accept
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gps_processor::ProcessResult;

    #[test]
    fn to_int() {
        assert_eq!(ProcessResult::Accept.to_int(), 0);
        assert_eq!(ProcessResult::Ignore.to_int(), -1);
        assert_eq!(ProcessResult::try_from(-1).unwrap(), ProcessResult::Ignore);
        assert!(ProcessResult::try_from(3).is_err());
    }
}
