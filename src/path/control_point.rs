use crate::prelude::*;

/// how a path segment is interpolated between its control points
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    Linear,
    PerfectCurve,
    Bezier,
    Catmull,
}

/// a single point defining a slider path
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathControlPoint {
    pub position: Vector2,

    /// interpolation type of the segment starting at this point.
    /// `None` continues the previous segment's type.
    /// the first point of a path is treated as `Linear` when `None`
    pub path_type: Option<PathType>,
}
impl PathControlPoint {
    pub fn new(position: Vector2, path_type: Option<PathType>) -> Self {
        Self { position, path_type }
    }

    /// a point continuing the previous segment
    pub fn inherited(position: Vector2) -> Self {
        Self::new(position, None)
    }
}
