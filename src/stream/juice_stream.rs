use crate::prelude::*;

/// scoring distance for a slider multiplier of 1, per beat
const BASE_SCORING_DISTANCE: f32 = 100.0;

/// gaps between nested objects longer than this get tiny droplet filler
const TINY_DROPLET_GAP: f32 = 80.0;
/// filler interval is the gap length halved until it fits under this
const MAX_TINY_DROPLET_INTERVAL: f32 = 100.0;

/// a time-extended object whose nested fruits, droplets and tiny droplets are
/// materialized from its path and the map's timing.
///
/// nested objects are regenerated wholesale by [`apply_defaults`], never
/// patched in place
///
/// [`apply_defaults`]: JuiceStream::apply_defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JuiceStream {
    /// start time (ms)
    pub time: f32,
    /// effective horizontal position
    pub x: f32,
    /// how many times the path is retraced after the first pass
    pub repeat_count: usize,
    pub path: SliderPath,
    /// samples for the object itself, also the fallback for boundary fruits
    pub samples: Vec<HitSampleInfo>,
    /// per-boundary samples, indexed head, then each repeat, then tail
    pub node_samples: Vec<Vec<HitSampleInfo>>,
    /// legacy maps shift the tail's time by this much
    pub legacy_last_tick_offset: Option<f32>,

    slider_velocity: f32,

    #[serde(skip)]
    velocity_factor: f32,
    #[serde(skip)]
    tick_distance_factor: f32,
    #[serde(skip)]
    nested: Vec<NestedObject>,
}

impl JuiceStream {
    pub fn new(time: f32, x: f32) -> Self {
        Self {
            time,
            x,
            repeat_count: 0,
            path: SliderPath::default(),
            samples: vec![HitSampleInfo::default()],
            node_samples: Vec::new(),
            legacy_last_tick_offset: None,

            slider_velocity: 1.0,

            velocity_factor: 0.0,
            tick_distance_factor: 0.0,
            nested: Vec::new(),
        }
    }

    pub fn slider_velocity(&self) -> f32 { self.slider_velocity }

    /// set the per-object velocity multiplier, clamped to [0.1, 10] at 0.01
    /// precision
    pub fn set_slider_velocity(&mut self, slider_velocity: f32) {
        self.slider_velocity = (slider_velocity.clamp(0.1, 10.0) * 100.0).round() / 100.0;
    }

    /// effective movement speed (distance per ms)
    pub fn velocity(&self) -> f32 {
        self.velocity_factor * self.slider_velocity
    }

    /// distance between adjacent ticks
    pub fn tick_distance(&self) -> f32 {
        self.tick_distance_factor * self.slider_velocity
    }

    pub fn span_count(&self) -> usize { self.repeat_count + 1 }

    pub fn span_duration(&self) -> f32 {
        let velocity = self.velocity();
        if velocity <= 0.0 { return 0.0 }
        self.path.distance() / velocity
    }

    pub fn duration(&self) -> f32 {
        self.span_count() as f32 * self.span_duration()
    }

    pub fn end_time(&self) -> f32 {
        self.time + self.duration()
    }

    pub fn end_x(&self) -> f32 {
        clamp_to_playfield(self.x + self.path.position_at((self.span_count() % 2) as f32).x)
    }

    /// the duration is derived from the path and velocity and cannot be set
    /// directly
    pub fn set_duration(&mut self, _duration: f32) -> StreamResult {
        Err(StreamError::UnsupportedOperation("duration is derived, change repeat_count or slider_velocity instead"))
    }

    pub fn nested(&self) -> &[NestedObject] { &self.nested }

    /// resolve the movement speed from the map's timing and difficulty, then
    /// regenerate the nested objects
    pub fn apply_defaults(&mut self, timing: &impl TimingProvider, difficulty: &DifficultyInfo, token: &CancellationToken) -> StreamResult {
        let beat_length = timing.beat_length_at(self.time);
        self.velocity_factor = BASE_SCORING_DISTANCE * difficulty.slider_multiplier / beat_length;
        self.tick_distance_factor = BASE_SCORING_DISTANCE * difficulty.slider_multiplier / difficulty.slider_tick_rate;

        self.create_nested_objects(token)
    }

    fn create_nested_objects(&mut self, token: &CancellationToken) -> StreamResult {
        self.nested.clear();

        let velocity = self.velocity();
        let distance = self.path.distance();
        if velocity <= 0.0 {
            warn!("juice stream at {} has no velocity, emitting boundaries only", self.time);
        }
        if distance <= 0.0 {
            warn!("juice stream at {} has a degenerate path", self.time);
        }

        let droplet_samples = self.samples.iter()
            .map(|s| s.with_name(SLIDER_TICK))
            .collect::<Vec<_>>();

        let events = SliderEventGenerator::new(
            self.time,
            self.span_duration(),
            velocity,
            self.tick_distance(),
            distance,
            self.span_count(),
            self.legacy_last_tick_offset,
        );

        let mut node_index = 0;
        let mut last_event: Option<SliderEvent> = None;

        for event in events {
            // fill stretches where nothing would be collected for too long
            if let Some(last) = last_event {
                let since_last_tick = event.time - last.time;
                if since_last_tick > TINY_DROPLET_GAP {
                    let mut time_between_tiny = since_last_tick;
                    while time_between_tiny > MAX_TINY_DROPLET_INTERVAL {
                        time_between_tiny /= 2.0;
                    }

                    let mut t = time_between_tiny;
                    while t < since_last_tick {
                        let progress = last.path_progress
                            + (t / since_last_tick) * (event.path_progress - last.path_progress);
                        self.push_nested(token, last.time + t, progress, NestedKind::TinyDroplet, Vec::new())?;
                        t += time_between_tiny;
                    }
                }
            }
            last_event = Some(event);

            match event.event_type {
                SliderEventType::Tick => {
                    self.push_nested(token, event.time, event.path_progress, NestedKind::Droplet, droplet_samples.clone())?;
                }
                SliderEventType::Head | SliderEventType::Repeat | SliderEventType::Tail => {
                    let samples = self.node_samples.get(node_index)
                        .cloned()
                        .unwrap_or_else(|| self.samples.clone());
                    node_index += 1;

                    self.push_nested(token, event.time, event.path_progress, NestedKind::Fruit, samples)?;
                }
            }
        }

        // tiny droplets of a gap are pushed before the event closing it,
        // keep the list time-ordered regardless
        self.nested.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));

        Ok(())
    }

    fn push_nested(&mut self, token: &CancellationToken, time: f32, progress: f32, kind: NestedKind, samples: Vec<HitSampleInfo>) -> StreamResult {
        if token.is_cancelled() {
            debug!("nested object generation for juice stream at {} cancelled", self.time);
            return Err(StreamError::Cancelled);
        }

        let x = clamp_to_playfield(self.x + self.path.position_at(progress).x);

        #[cfg(feature = "debug_sliders")]
        trace!("nested {kind:?} at t={time} x={x} progress={progress}");

        self.nested.push(NestedObject { time, x, kind, samples });
        Ok(())
    }
}

/// clamp a horizontal position into the playfield
pub fn clamp_to_playfield(x: f32) -> f32 {
    x.clamp(0.0, PLAYFIELD_WIDTH)
}


#[cfg(test)]
mod juice_stream_tests {
    use crate::prelude::*;

    fn straight_path(distance: f32) -> SliderPath {
        SliderPath::new(vec![
            PathControlPoint::new(Vector2::ZERO, Some(PathType::Linear)),
            PathControlPoint::inherited(Vector2::new(distance, 0.0)),
        ], None)
    }

    fn timing(beat_length: f32) -> TimingPointList {
        TimingPointList::new(vec![TimingPoint::new(0.0, beat_length)])
    }

    fn count(stream: &JuiceStream, kind: NestedKind) -> usize {
        stream.nested().iter().filter(|n| n.kind == kind).count()
    }

    #[test]
    fn speed_resolution() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(280.0);

        let difficulty = DifficultyInfo { slider_multiplier: 1.4, slider_tick_rate: 2.0 };
        stream.apply_defaults(&timing(500.0), &difficulty, &CancellationToken::new()).unwrap();

        // velocity = 100 * 1.4 / 500, tick distance = 100 * 1.4 / 2
        assert!((stream.velocity() - 0.28).abs() < 0.0001);
        assert!((stream.tick_distance() - 70.0).abs() < 0.0001);
        assert!((stream.duration() - 1000.0).abs() < 0.01);
    }

    #[test]
    fn slider_velocity_is_clamped_and_rounded() {
        let mut stream = JuiceStream::new(0.0, 0.0);

        stream.set_slider_velocity(0.123);
        assert_eq!(stream.slider_velocity(), 0.12);

        stream.set_slider_velocity(50.0);
        assert_eq!(stream.slider_velocity(), 10.0);

        stream.set_slider_velocity(0.01);
        assert_eq!(stream.slider_velocity(), 0.1);
    }

    #[test]
    fn droplets_sit_at_tick_positions() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(280.0);

        let difficulty = DifficultyInfo { slider_multiplier: 1.4, slider_tick_rate: 2.0 };
        stream.apply_defaults(&timing(500.0), &difficulty, &CancellationToken::new()).unwrap();

        // tick distance 70 over a 280 path -> ticks at x 70, 140, 210
        let droplets = stream.nested().iter()
            .filter(|n| n.kind == NestedKind::Droplet)
            .collect::<Vec<_>>();
        assert_eq!(droplets.len(), 3);
        for (droplet, x) in droplets.iter().zip([70.0, 140.0, 210.0]) {
            assert!((droplet.x - x).abs() < 0.01);
            assert_eq!(droplet.samples[0].name, SLIDER_TICK);
        }
    }

    #[test]
    fn tiny_droplets_fill_long_gaps() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(300.0);

        // velocity 0.2, tick distance 100 -> ticks 500ms apart,
        // each 500ms gap halves to 62.5ms -> 7 tinies per gap, 3 gaps
        let difficulty = DifficultyInfo { slider_multiplier: 1.0, slider_tick_rate: 1.0 };
        stream.apply_defaults(&timing(500.0), &difficulty, &CancellationToken::new()).unwrap();

        assert_eq!(count(&stream, NestedKind::Fruit), 2);
        assert_eq!(count(&stream, NestedKind::Droplet), 2);
        assert_eq!(count(&stream, NestedKind::TinyDroplet), 21);

        // tiny droplets carry no samples
        assert!(stream.nested().iter()
            .filter(|n| n.kind == NestedKind::TinyDroplet)
            .all(|n| n.samples.is_empty()));

        for pair in stream.nested().windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
    }

    #[test]
    fn exact_gap_threshold_gets_no_filler() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(100.0);

        // velocity 0.25, tick distance 20 -> every gap is exactly 80ms
        let difficulty = DifficultyInfo { slider_multiplier: 1.0, slider_tick_rate: 5.0 };
        stream.apply_defaults(&timing(400.0), &difficulty, &CancellationToken::new()).unwrap();

        assert_eq!(count(&stream, NestedKind::Droplet), 4);
        assert_eq!(count(&stream, NestedKind::TinyDroplet), 0);
    }

    #[test]
    fn filler_halves_the_gap_once() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(120.0);

        // velocity 0.2, tick distance 30 -> 150ms gaps, halved once to 75ms,
        // so one tiny droplet sits in the middle of every gap
        let difficulty = DifficultyInfo { slider_multiplier: 1.0, slider_tick_rate: 10.0 / 3.0 };
        stream.apply_defaults(&timing(500.0), &difficulty, &CancellationToken::new()).unwrap();

        assert_eq!(count(&stream, NestedKind::Droplet), 3);
        assert_eq!(count(&stream, NestedKind::TinyDroplet), 4);

        for pair in stream.nested().windows(2) {
            assert!((pair[1].time - pair[0].time - 75.0).abs() < 0.01, "uneven spacing: {pair:?}");
        }
    }

    #[test]
    fn node_samples_index_across_boundaries() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(280.0);
        stream.repeat_count = 1;
        stream.samples = vec![HitSampleInfo::new(HIT_NORMAL, 40)];
        stream.node_samples = vec![
            vec![HitSampleInfo::new("hitwhistle", 70)],
            vec![HitSampleInfo::new("hitclap", 80)],
        ];

        let difficulty = DifficultyInfo { slider_multiplier: 1.4, slider_tick_rate: 2.0 };
        stream.apply_defaults(&timing(500.0), &difficulty, &CancellationToken::new()).unwrap();

        let fruits = stream.nested().iter()
            .filter(|n| n.kind == NestedKind::Fruit)
            .collect::<Vec<_>>();
        assert_eq!(fruits.len(), 3);

        assert_eq!(fruits[0].samples[0].name, "hitwhistle");
        assert_eq!(fruits[1].samples[0].name, "hitclap");
        // no node samples left for the tail, falls back to the object's own
        assert_eq!(fruits[2].samples[0].name, HIT_NORMAL);
        assert_eq!(fruits[2].samples[0].volume, 40);
    }

    #[test]
    fn positions_clamp_to_the_playfield() {
        let mut stream = JuiceStream::new(0.0, 500.0);
        stream.path = straight_path(100.0);

        let difficulty = DifficultyInfo { slider_multiplier: 1.4, slider_tick_rate: 2.0 };
        stream.apply_defaults(&timing(500.0), &difficulty, &CancellationToken::new()).unwrap();

        assert!(stream.nested().iter().all(|n| n.x >= 0.0 && n.x <= PLAYFIELD_WIDTH));
        assert_eq!(stream.nested().last().unwrap().x, PLAYFIELD_WIDTH);
        assert_eq!(stream.end_x(), PLAYFIELD_WIDTH);
    }

    #[test]
    fn regeneration_is_reproducible() {
        let mut stream = JuiceStream::new(250.0, 100.0);
        stream.path = straight_path(300.0);
        stream.repeat_count = 2;
        stream.legacy_last_tick_offset = Some(-36.0);

        let difficulty = DifficultyInfo::default();
        stream.apply_defaults(&timing(420.0), &difficulty, &CancellationToken::new()).unwrap();
        let first = stream.nested().to_vec();

        stream.apply_defaults(&timing(420.0), &difficulty, &CancellationToken::new()).unwrap();
        assert_eq!(stream.nested(), first);
    }

    #[test]
    fn cancellation_aborts_generation() {
        let mut stream = JuiceStream::new(0.0, 0.0);
        stream.path = straight_path(300.0);

        let token = CancellationToken::new();
        token.cancel();

        let result = stream.apply_defaults(&timing(500.0), &DifficultyInfo::default(), &token);
        assert!(matches!(result, Err(StreamError::Cancelled)));
        assert!(stream.nested().is_empty());
    }

    #[test]
    fn duration_cannot_be_set_directly() {
        let mut stream = JuiceStream::new(0.0, 0.0);

        let Err(StreamError::UnsupportedOperation(message)) = stream.set_duration(1000.0) else {
            panic!("expected an unsupported operation error");
        };
        assert!(message.contains("repeat_count"));
        assert!(message.contains("slider_velocity"));
    }

    #[test]
    fn degenerate_path_still_has_boundaries() {
        let mut stream = JuiceStream::new(100.0, 50.0);

        stream.apply_defaults(&timing(500.0), &DifficultyInfo::default(), &CancellationToken::new()).unwrap();

        assert_eq!(stream.nested().len(), 2);
        assert!(stream.nested().iter().all(|n| n.kind == NestedKind::Fruit));
        assert!(stream.nested().iter().all(|n| n.time == 100.0));
        assert_eq!(stream.duration(), 0.0);
    }
}
