use crate::prelude::*;

/// how close a tick may sit to a span boundary before it is dropped,
/// as a fraction of the tick distance
const TICK_SUPPRESSION_FACTOR: f32 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderEventType {
    Head,
    Tick,
    Repeat,
    Tail,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliderEvent {
    /// time of the event (ms)
    pub time: f32,
    /// position along the path in [0, 1], always in forward path terms,
    /// even on backwards spans
    pub path_progress: f32,
    pub event_type: SliderEventType,
}

/// lazily walks a slider's timeline, span by span.
///
/// each span first yields its boundary event (`Head` for the first span,
/// `Repeat` for every later one), then the ticks inside it, with the walk
/// direction flipping on odd spans. one `Tail` closes the sequence, with the
/// legacy offset applied to its time only.
///
/// the generator is pure and restartable from scratch, a consumer cancels
/// simply by not pulling further
pub struct SliderEventGenerator {
    start_time: f32,
    span_duration: f32,
    velocity: f32,
    tick_distance: f32,
    path_distance: f32,
    span_count: usize,
    legacy_last_tick_offset: Option<f32>,

    span: usize,
    next_tick: u32,
    state: GeneratorState,
}

enum GeneratorState {
    SpanStart,
    Ticks,
    Tail,
    Done,
}

impl SliderEventGenerator {
    pub fn new(
        start_time: f32,
        span_duration: f32,
        velocity: f32,
        tick_distance: f32,
        path_distance: f32,
        span_count: usize,
        legacy_last_tick_offset: Option<f32>,
    ) -> Self {
        Self {
            start_time,
            span_duration,
            velocity,
            tick_distance,
            path_distance,
            span_count,
            legacy_last_tick_offset,

            span: 0,
            next_tick: 1,
            state: GeneratorState::SpanStart,
        }
    }

    // degenerate spacing or geometry produces boundary events only,
    // never a NaN time or an endless tick walk
    fn ticks_enabled(&self) -> bool {
        self.tick_distance > 0.0 && self.path_distance > 0.0 && self.velocity > 0.0
    }

    fn span_start_time(&self) -> f32 {
        self.start_time + self.span as f32 * self.span_duration
    }

    fn advance_span(&mut self) {
        self.span += 1;
        self.next_tick = 1;
        self.state = if self.span >= self.span_count { GeneratorState::Tail } else { GeneratorState::SpanStart };
    }
}

impl Iterator for SliderEventGenerator {
    type Item = SliderEvent;

    fn next(&mut self) -> Option<SliderEvent> {
        loop {
            match self.state {
                GeneratorState::SpanStart => {
                    let event = SliderEvent {
                        time: self.span_start_time(),
                        // spans start where the previous one ended
                        path_progress: (self.span % 2) as f32,
                        event_type: if self.span == 0 { SliderEventType::Head } else { SliderEventType::Repeat },
                    };
                    self.state = GeneratorState::Ticks;
                    return Some(event);
                }

                GeneratorState::Ticks => {
                    if !self.ticks_enabled() {
                        self.advance_span();
                        continue;
                    }

                    let distance = self.next_tick as f32 * self.tick_distance;
                    if distance >= self.path_distance - self.tick_distance * TICK_SUPPRESSION_FACTOR {
                        self.advance_span();
                        continue;
                    }
                    self.next_tick += 1;

                    let progress = distance / self.path_distance;
                    let event = SliderEvent {
                        time: self.span_start_time() + distance / self.velocity,
                        path_progress: if self.span % 2 == 0 { progress } else { 1.0 - progress },
                        event_type: SliderEventType::Tick,
                    };
                    return Some(event);
                }

                GeneratorState::Tail => {
                    self.state = GeneratorState::Done;
                    return Some(SliderEvent {
                        time: self.start_time
                            + self.span_count as f32 * self.span_duration
                            + self.legacy_last_tick_offset.unwrap_or(0.0),
                        path_progress: (self.span_count % 2) as f32,
                        event_type: SliderEventType::Tail,
                    });
                }

                GeneratorState::Done => return None,
            }
        }
    }
}
