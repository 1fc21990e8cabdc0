use crate::prelude::*;

/// captured control point state of a [`SliderPath`], used to undo edits.
/// plain values, no object identity involved
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathSnapshot {
    control_points: Vec<PathControlPoint>,
    expected_distance: Option<f32>,
}
impl PathSnapshot {
    pub fn capture(path: &SliderPath) -> Self {
        Self {
            control_points: path.control_points().to_vec(),
            expected_distance: path.expected_distance(),
        }
    }

    pub fn restore(&self, path: &mut SliderPath) {
        path.set_expected_distance(self.expected_distance);
        path.update(|points| {
            points.clear();
            points.extend_from_slice(&self.control_points);
        });
    }
}

/// an applied, undoable path reversal
pub struct ReverseCommand {
    before: PathSnapshot,
    positional_offset: Vector2,
}
impl ReverseCommand {
    /// reverses the path, capturing its state first
    pub fn apply(path: &mut SliderPath) -> Self {
        let before = PathSnapshot::capture(path);
        let positional_offset = path.reverse();
        Self { before, positional_offset }
    }

    /// offset to add to the owning object's start position
    pub fn positional_offset(&self) -> Vector2 { self.positional_offset }

    pub fn undo(&self, path: &mut SliderPath) {
        self.before.restore(path);
    }
}
