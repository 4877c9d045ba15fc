use std::ops::Range;

use crate::sph::error::{InterpolationError, Result};
use crate::units::Real;

/// Regular pixel grid in particle space.
///
/// Pixel `(i, j)` is centered at `(xmin + (i + 0.5) * pixwidthx, ymin + (j + 0.5) * pixwidthy)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelGrid {
    pub xmin: Real,
    pub ymin: Real,
    pub pixwidthx: Real,
    pub pixwidthy: Real,
    pub pixcountx: usize,
    pub pixcounty: usize,
}

impl PixelGrid {
    pub const DEFAULT_PIXCOUNT: usize = 480;

    pub fn new(xmin: Real, ymin: Real, pixwidthx: Real, pixwidthy: Real, pixcountx: usize, pixcounty: usize) -> PixelGrid {
        PixelGrid {
            xmin,
            ymin,
            pixwidthx,
            pixwidthy,
            pixcountx,
            pixcounty,
        }
    }

    /// Grid with origin at zero and the default 480x480 pixels.
    pub fn with_pixel_width(pixwidthx: Real, pixwidthy: Real) -> PixelGrid {
        Self::new(0.0, 0.0, pixwidthx, pixwidthy, Self::DEFAULT_PIXCOUNT, Self::DEFAULT_PIXCOUNT)
    }

    /// Grid with `pixcountx` x `pixcounty` pixels exactly spanning `[xmin, xmax] x [ymin, ymax]`.
    pub fn covering(xmin: Real, xmax: Real, ymin: Real, ymax: Real, pixcountx: usize, pixcounty: usize) -> PixelGrid {
        Self::new(
            xmin,
            ymin,
            (xmax - xmin) / pixcountx as Real,
            (ymax - ymin) / pixcounty as Real,
            pixcountx,
            pixcounty,
        )
    }

    pub fn validate(&self) -> Result<()> {
        // Negated comparisons so that NaN widths are rejected as well.
        if !(self.pixwidthx > 0.0) {
            return Err(InterpolationError::invalid_parameter("pixwidthx", self.pixwidthx));
        }
        if !(self.pixwidthy > 0.0) {
            return Err(InterpolationError::invalid_parameter("pixwidthy", self.pixwidthy));
        }
        if self.pixcountx == 0 {
            return Err(InterpolationError::invalid_parameter("pixcountx", self.pixcountx));
        }
        if self.pixcounty == 0 {
            return Err(InterpolationError::invalid_parameter("pixcounty", self.pixcounty));
        }
        Ok(())
    }

    pub fn num_pixels(&self) -> usize {
        self.pixcountx * self.pixcounty
    }

    #[inline]
    pub fn pixel_center_x(&self, i: usize) -> Real {
        self.xmin + (i as Real + 0.5) * self.pixwidthx
    }

    #[inline]
    pub fn pixel_center_y(&self, j: usize) -> Real {
        self.ymin + (j as Real + 0.5) * self.pixwidthy
    }

    /// Columns whose centers can lie within `extent` of `x`.
    #[inline]
    pub(super) fn pixel_range_x(&self, x: Real, extent: Real) -> Range<usize> {
        pixel_index((x - extent - self.xmin) / self.pixwidthx, self.pixcountx)..pixel_index((x + extent - self.xmin) / self.pixwidthx, self.pixcountx)
    }

    /// Rows whose centers can lie within `extent` of `y`.
    #[inline]
    pub(super) fn pixel_range_y(&self, y: Real, extent: Real) -> Range<usize> {
        pixel_index((y - extent - self.ymin) / self.pixwidthy, self.pixcounty)..pixel_index((y + extent - self.ymin) / self.pixwidthy, self.pixcounty)
    }

    /// Calls `f(pixel, r_sq)` for every pixel in the bounding box of a circle of radius `extent` around `(x, y)`.
    /// `pixel` is the row-major index into an image of this grid, `r_sq` the squared distance from `(x, y)` to the pixel center.
    #[inline(always)]
    pub(super) fn foreach_pixel_in_support(&self, x: Real, y: Real, extent: Real, mut f: impl FnMut(usize, Real)) {
        let columns = self.pixel_range_x(x, extent);
        for j in self.pixel_range_y(y, extent) {
            let dy = self.pixel_center_y(j) - y;
            let dy_sq = dy * dy;
            let row_start = j * self.pixcountx;
            for i in columns.clone() {
                let dx = self.pixel_center_x(i) - x;
                f(row_start + i, dx * dx + dy_sq);
            }
        }
    }
}

/// Rounds a position measured in pixels to the nearest pixel boundary (ties to even) and clamps it to `[0, count]`.
/// NaN positions map to 0.
#[inline]
pub(super) fn pixel_index(position: Real, count: usize) -> usize {
    position.round_ties_even().clamp(0.0, count as Real) as usize
}
