use crate::prelude::*;

/// a multi-segment slider path, flattened into a length-annotated polyline.
///
/// a control point with an explicit type ends the previous segment and starts
/// its own, the last point always ends the final segment. the flattened
/// polyline is rebuilt eagerly whenever the control points change, so queries
/// never see a stale cache
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "SliderPathDef", into = "SliderPathDef")]
pub struct SliderPath {
    control_points: Vec<PathControlPoint>,
    /// distance the object wants the path to have. when set, anything past it
    /// is beyond the visible end of the curve
    expected_distance: Option<f32>,

    calculated_path: Vec<Vector2>,
    cumulative_length: Vec<f32>,
    segment_end_lengths: Vec<f32>,
}

/// the persisted shape of a [`SliderPath`], control points + expected distance only
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SliderPathDef {
    pub control_points: Vec<PathControlPoint>,
    pub expected_distance: Option<f32>,
}

impl SliderPath {
    pub fn new(control_points: Vec<PathControlPoint>, expected_distance: Option<f32>) -> Self {
        let mut path = Self {
            control_points,
            expected_distance,
            calculated_path: Vec::new(),
            cumulative_length: Vec::new(),
            segment_end_lengths: Vec::new(),
        };
        path.calculate();
        path
    }

    pub fn control_points(&self) -> &[PathControlPoint] { &self.control_points }
    pub fn expected_distance(&self) -> Option<f32> { self.expected_distance }

    pub fn set_expected_distance(&mut self, expected_distance: Option<f32>) {
        self.expected_distance = expected_distance;
        self.calculate();
    }

    /// edit the control points, rebuilding the flattened path afterwards
    pub fn update<F: FnOnce(&mut Vec<PathControlPoint>)>(&mut self, edit: F) {
        edit(&mut self.control_points);
        self.calculate();
    }

    /// arc length of the flattened polyline, ignoring the expected distance
    pub fn calculated_distance(&self) -> f32 {
        self.cumulative_length.last().copied().unwrap_or(0.0)
    }

    /// total distance of the path. the expected distance when one is set
    pub fn distance(&self) -> f32 {
        self.expected_distance.unwrap_or_else(|| self.calculated_distance())
    }

    /// position at the given progress in [0, 1] along the path
    pub fn position_at(&self, progress: f32) -> Vector2 {
        self.position_at_length(progress.clamp(0.0, 1.0) * self.distance())
    }

    /// cumulative progress values at which a segment ends.
    /// values past 1 mark segments beyond the visible end of the curve
    pub fn segment_ends(&self) -> Vec<f32> {
        let distance = self.distance();
        self.segment_end_lengths.iter()
            .map(|d| if distance > 0.0 { d / distance } else { 0.0 })
            .collect()
    }

    /// index of the first control point of the segment containing `index`
    pub fn segment_head(&self, index: usize) -> usize {
        if self.control_points.is_empty() { return 0 }

        (0..=index.min(self.control_points.len() - 1))
            .rev()
            .find(|&i| self.control_points[i].path_type.is_some())
            .unwrap_or(0)
    }

    /// polyline between two progress values, interpolated endpoints included
    pub fn path_between(&self, from: f32, to: f32) -> Vec<Vector2> {
        let mut path = Vec::new();
        if self.calculated_path.is_empty() { return path }

        let d0 = from.clamp(0.0, 1.0) * self.distance();
        let d1 = to.clamp(0.0, 1.0) * self.distance();

        let mut i = 0;
        while i < self.calculated_path.len() && self.cumulative_length[i] < d0 { i += 1 }
        path.push(self.position_at_length(d0));

        while i < self.calculated_path.len() && self.cumulative_length[i] <= d1 {
            path.push(self.calculated_path[i]);
            i += 1;
        }
        path.push(self.position_at_length(d1));

        path
    }

    fn position_at_length(&self, length: f32) -> Vector2 {
        if self.calculated_path.is_empty() { return Vector2::ZERO }
        if length <= 0.0 { return self.calculated_path[0] }

        let end = self.calculated_distance();
        if length >= end { return *self.calculated_path.last().unwrap() }

        let i = match self.cumulative_length.binary_search_by(|f| f.partial_cmp(&length).unwrap_or(std::cmp::Ordering::Greater)) {
            Ok(n) => n,
            Err(n) => n.min(self.cumulative_length.len() - 1),
        };
        if i == 0 { return self.calculated_path[0] }

        let length_previous = self.cumulative_length[i - 1];
        let length_next = self.cumulative_length[i];

        let mut res = self.calculated_path[i - 1];
        if length_next != length_previous {
            res = res + (self.calculated_path[i] - self.calculated_path[i - 1])
                * ((length - length_previous) / (length_next - length_previous));
        }
        res
    }

    fn calculate(&mut self) {
        self.calculated_path.clear();
        self.cumulative_length.clear();
        self.segment_end_lengths.clear();

        let n = self.control_points.len();
        if n == 0 { return }

        let vertices = self.control_points.iter().map(|p| p.position).collect::<Vec<_>>();

        if n == 1 {
            self.calculated_path.push(vertices[0]);
            self.cumulative_length.push(0.0);
            return;
        }

        let mut segment_end_indices = Vec::new();
        let mut start = 0;
        for i in 1..n {
            // an explicitly typed point ends the previous segment, the last point always does
            if self.control_points[i].path_type.is_none() && i < n - 1 { continue }

            let segment_type = self.control_points[start].path_type.unwrap_or(PathType::Linear);
            for v in Self::calculate_sub_path(&vertices[start..=i], segment_type) {
                if self.calculated_path.last() != Some(&v) {
                    self.calculated_path.push(v);
                }
            }
            segment_end_indices.push(self.calculated_path.len().saturating_sub(1));

            start = i;
        }

        let mut total = 0.0;
        self.cumulative_length.push(0.0);
        for i in 1..self.calculated_path.len() {
            let mut length = self.calculated_path[i].distance(self.calculated_path[i - 1]);
            if length.is_nan() { length = 0.0 }
            total += length;
            self.cumulative_length.push(total);
        }

        self.segment_end_lengths = segment_end_indices.into_iter()
            .map(|i| self.cumulative_length[i])
            .collect();
    }

    fn calculate_sub_path(vertices: &[Vector2], path_type: PathType) -> Vec<Vector2> {
        match path_type {
            PathType::Linear => vertices.to_vec(),

            PathType::PerfectCurve => {
                // we need exactly 3 points to build the circle
                if vertices.len() < 3 { return vertices.to_vec() }
                if vertices.len() > 3 { return create_bezier(vertices) }

                match create_perfect_curve(vertices[0], vertices[1], vertices[2]) {
                    Some(curve) => curve,
                    None => vertices.to_vec(),
                }
            }

            PathType::Bezier => create_bezier(vertices),
            PathType::Catmull => create_catmull(vertices),
        }
    }
}

impl Default for SliderPath {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl From<SliderPathDef> for SliderPath {
    fn from(def: SliderPathDef) -> Self {
        Self::new(def.control_points, def.expected_distance)
    }
}
impl From<SliderPath> for SliderPathDef {
    fn from(path: SliderPath) -> Self {
        Self {
            control_points: path.control_points,
            expected_distance: path.expected_distance,
        }
    }
}
