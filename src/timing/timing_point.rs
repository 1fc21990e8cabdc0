use crate::prelude::*;

/// beat length to fall back to when a map has no timing points at all (120bpm)
const DEFAULT_BEAT_LENGTH: f32 = 500.0;

/// an uninherited timing point
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    /// time this point takes effect (ms)
    pub time: f32,
    /// ms per beat. the provider guarantees this is positive
    pub beat_length: f32,
}
impl TimingPoint {
    pub fn new(time: f32, beat_length: f32) -> Self {
        Self { time, beat_length }
    }
}

/// where the timing info for an object comes from
pub trait TimingProvider {
    /// beat length (ms per beat) in effect at the given time
    fn beat_length_at(&self, time: f32) -> f32;
}

#[derive(Clone, Debug, Default)]
pub struct TimingPointList {
    timing_points: Vec<TimingPoint>,
}
impl TimingPointList {
    pub fn new(mut timing_points: Vec<TimingPoint>) -> Self {
        // make sure timing_points are sorted
        timing_points.sort_by(|t, t2| t.time.partial_cmp(&t2.time).unwrap_or(core::cmp::Ordering::Equal));
        Self { timing_points }
    }

    pub fn timing_points(&self) -> &[TimingPoint] { &self.timing_points }
}

impl TimingProvider for TimingPointList {
    fn beat_length_at(&self, time: f32) -> f32 {
        let Some(first) = self.timing_points.first() else {
            warn!("beat_length_at with no timing points, assuming {DEFAULT_BEAT_LENGTH}ms");
            return DEFAULT_BEAT_LENGTH;
        };

        let mut beat_length = first.beat_length;
        for tp in self.timing_points.iter() {
            if tp.time > time { break }
            beat_length = tp.beat_length;
        }
        beat_length
    }
}


#[cfg(test)]
mod timing_tests {
    use crate::prelude::*;

    #[test]
    fn beat_length_lookup() {
        let list = TimingPointList::new(vec![
            TimingPoint::new(1000.0, 400.0),
            TimingPoint::new(0.0, 500.0),
        ]);

        // list sorts itself
        assert_eq!(list.timing_points()[0].time, 0.0);

        assert_eq!(list.beat_length_at(-50.0), 500.0);
        assert_eq!(list.beat_length_at(0.0), 500.0);
        assert_eq!(list.beat_length_at(999.0), 500.0);
        assert_eq!(list.beat_length_at(1000.0), 400.0);
        assert_eq!(list.beat_length_at(5000.0), 400.0);
    }
}
