use cgmath::prelude::*;

use super::grid::pixel_index;
use crate::sph::error::{InterpolationError, Result};
use crate::units::*;

/// Straight cross-section line from `start` to `end`, sampled at `pixcount` equally spaced pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrossSectionLine {
    pub start: Point,
    pub end: Point,
    pub pixcount: usize,
}

impl Default for CrossSectionLine {
    fn default() -> CrossSectionLine {
        CrossSectionLine::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Self::DEFAULT_PIXCOUNT)
    }
}

// Same tolerances as numpy's isclose.
fn is_close(a: Real, b: Real) -> bool {
    const RELATIVE_TOLERANCE: Real = 1.0e-5;
    const ABSOLUTE_TOLERANCE: Real = 1.0e-8;
    (a - b).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * b.abs()
}

impl CrossSectionLine {
    pub const DEFAULT_PIXCOUNT: usize = 500;

    pub fn new(start: Point, end: Point, pixcount: usize) -> CrossSectionLine {
        CrossSectionLine { start, end, pixcount }
    }

    pub fn from_coords(x1: Real, y1: Real, x2: Real, y2: Real, pixcount: usize) -> CrossSectionLine {
        Self::new(Point::new(x1, y1), Point::new(x2, y2), pixcount)
    }

    pub fn validate(&self) -> Result<()> {
        let coords = [self.start.x, self.start.y, self.end.x, self.end.y];
        if let Some(&bad) = coords.iter().find(|c| !c.is_finite()) {
            return Err(InterpolationError::invalid_parameter("line endpoint", bad));
        }
        if is_close(self.end.x, self.start.x) && is_close(self.end.y, self.start.y) {
            return Err(InterpolationError::DegenerateGeometry);
        }
        if self.pixcount == 0 {
            return Err(InterpolationError::invalid_parameter("pixcount", self.pixcount));
        }
        Ok(())
    }

    pub fn length(&self) -> Real {
        self.start.distance(self.end)
    }

    /// Length of the line covered by a single pixel.
    pub fn pixel_width(&self) -> Real {
        self.length() / self.pixcount as Real
    }

    pub fn pixel_center(&self, k: usize) -> Point {
        self.start + (self.end - self.start) * ((k as Real + 0.5) / self.pixcount as Real)
    }

    /// Pixels whose centers lie inside a circle of radius `support` around `center`, or `None` if the line misses the circle.
    pub(super) fn pixels_in_support(&self, center: Point, support: Real) -> Option<std::ops::Range<usize>> {
        let (near, far) = self.support_span(center, support)?;
        let pixel_width = self.pixel_width();
        Some(pixel_index(near / pixel_width, self.pixcount)..pixel_index(far / pixel_width, self.pixcount))
    }

    /// Distances from `start`, ordered, between which the line runs inside the circle.
    ///
    /// The circle is intersected with the infinite line and the intersections are clamped to the segment.
    /// A circle that only touches the infinite line outside of the segment yields an empty span.
    /// Solved along the line direction, so vertical lines need no special case.
    fn support_span(&self, center: Point, support: Real) -> Option<(Real, Real)> {
        let length = self.length();
        let direction = (self.end - self.start) / length;
        let to_center = center - self.start;

        // Foot of the perpendicular from the center, measured from `start`.
        let along = to_center.dot(direction);
        let perpendicular_sq = to_center.magnitude2() - along * along;
        let det = support * support - perpendicular_sq;
        if !(det >= 0.0) {
            return None;
        }
        let half_chord = det.sqrt();
        Some(((along - half_chord).clamp(0.0, length), (along + half_chord).clamp(0.0, length)))
    }
}
