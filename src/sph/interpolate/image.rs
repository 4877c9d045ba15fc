use std::ops::Index;

use crate::units::Real;

/// Dense row-major pixel image. Rows run along y, columns along x, so `image[(j, i)]` is pixel `(i, j)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Real>,
}

impl Image {
    pub fn zeros(width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            pixels: vec![0.0; width * height],
        }
    }

    pub(super) fn from_pixels(width: usize, height: usize, pixels: Vec<Real>) -> Image {
        assert_eq!(pixels.len(), width * height);
        Image { width, height, pixels }
    }

    /// Number of pixels along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of pixels along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(rows, columns)`, i.e. `(pixcounty, pixcountx)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Real> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> &[Real] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Real]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.pixels
    }

    pub fn into_vec(self) -> Vec<Real> {
        self.pixels
    }

    pub fn sum(&self) -> Real {
        self.pixels.iter().sum()
    }

    pub fn max(&self) -> Real {
        self.pixels.iter().copied().fold(Real::NEG_INFINITY, Real::max)
    }
}

impl Index<(usize, usize)> for Image {
    type Output = Real;

    /// Indexed as `(row, column)`.
    fn index(&self, (y, x): (usize, usize)) -> &Real {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) outside of {}x{} image", x, y, self.width, self.height);
        &self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_layout() {
        let image = Image::from_pixels(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(image.shape(), (2, 3));
        assert_eq!(image[(1, 0)], 3.0);
        assert_eq!(image.get(2, 1), Some(5.0));
        assert_eq!(image.get(3, 0), None);
        assert_eq!(image.row(1), &[3.0, 4.0, 5.0]);
        assert_eq!(image.rows().count(), 2);
        assert_eq!(image.sum(), 15.0);
        assert_eq!(image.max(), 5.0);
    }
}
