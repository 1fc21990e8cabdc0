use crate::prelude::*;

impl SliderPath {
    /// reverses the traversal order of this path in place.
    ///
    /// returns the positional offset of the resulting path. it should be
    /// added to the start position of the object owning this path.
    /// a path with fewer than 2 points is left untouched
    pub fn reverse(&mut self) -> Vector2 {
        if self.control_points().len() < 2 { return Vector2::ZERO }

        // inherited points after a linear point, as well as the first control point if it
        // inherited, behave as linear points but arent marked as such yet. force their
        // type so segment boundary detection below sees them
        let inherited_linear_points = (0..self.control_points().len())
            .filter(|&i| {
                let point = &self.control_points()[i];
                if point.path_type.is_some() { return false }

                let head = self.segment_head(i);
                let head_type = self.control_points()[head].path_type
                    .or(if head == 0 { Some(PathType::Linear) } else { None });
                head_type == Some(PathType::Linear)
            })
            .collect::<Vec<_>>();

        self.update(|points| {
            for &i in &inherited_linear_points {
                points[i].path_type = Some(PathType::Linear);
            }
        });

        // remove segments after the end of the slider. only explicitly typed points
        // count as segment boundaries here
        let mut segment_ends = self.segment_ends();
        let mut segments_to_remove = segment_ends.iter().filter(|se| **se >= 1.0).count() as i32 - 1;
        self.update(|points| {
            while segments_to_remove > 0 && !points.is_empty() {
                if points.last().is_some_and(|p| p.path_type.is_some()) {
                    segments_to_remove -= 1;
                    segment_ends.pop();
                }
                points.pop();
            }
        });

        // restore the types forced above, the temporary change must not leak out
        self.update(|points| {
            for &i in &inherited_linear_points {
                if i < points.len() {
                    points[i].path_type = None;
                }
            }
        });

        // a trailing 3 point perfect arc had its shape defined by trimmed content,
        // move the middle point back onto the arc so the segment stays valid
        let n = self.control_points().len();
        if n >= 3
            && self.control_points()[n - 3].path_type == Some(PathType::PerfectCurve)
            && self.control_points()[n - 2].path_type.is_none()
            && !segment_ends.is_empty()
        {
            let last_segment_end = segment_ends[segment_ends.len() - 1];
            let last_segment_start = if segment_ends.len() > 1 { segment_ends[segment_ends.len() - 2] } else { 0.0 };

            if last_segment_end > 0.0 {
                let circle_arc = self.path_between(last_segment_start / last_segment_end, 1.0);
                let mid = circle_arc[circle_arc.len() / 2];
                self.update(|points| {
                    let n = points.len();
                    points[n - 2].position = mid;
                });
            }
        }

        self.reverse_control_points()
    }

    // reverses the control point order, rebasing every position onto the new start.
    // a type describes how you got to a point rather than the point itself, so
    // explicit types shift forward by one position under reversal
    fn reverse_control_points(&mut self) -> Vector2 {
        let positional_offset = self.position_at(1.0);

        self.update(|points| {
            let old = std::mem::take(points);
            let count = old.len();

            let mut last_type = None;
            for (i, mut p) in old.into_iter().enumerate() {
                p.position -= positional_offset;

                if i == count - 1 {
                    p.path_type = last_type;
                    p.position = Vector2::ZERO;
                } else if p.path_type.is_some() {
                    std::mem::swap(&mut p.path_type, &mut last_type);
                }

                points.insert(0, p);
            }
        });

        positional_offset
    }
}
