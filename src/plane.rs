//! Mapping from pixel space to a window of the complex plane.

use crate::error::Error;

/// A rectangular region of the complex plane.
///
/// `imaginary_top` is not fixed independently: it is derived from the
/// horizontal extent and the output aspect ratio, so the mapping never
/// distorts regardless of resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneWindow {
    pub real_left: f64,
    pub real_right: f64,
    pub imaginary_bottom: f64,
}

impl PlaneWindow {
    /// The derived top edge for a `width x height` output.
    pub fn imaginary_top(&self, width: u32, height: u32) -> f64 {
        self.imaginary_bottom
            + (self.real_right - self.real_left) * f64::from(height) / f64::from(width)
    }
}

/// Precomputed per-pixel mapping for one render call.
///
/// Row 0 maps to the top of the window: the vertical axis is inverted
/// relative to array row order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneMapping {
    pub real_left: f64,
    pub imaginary_top: f64,
    pub real_factor: f64,
    pub imaginary_factor: f64,
}

impl PlaneMapping {
    /// Compute the translation factors for a window and output size.
    ///
    /// Fails with [`Error::InvalidDimension`] when either dimension is
    /// below 2 (the factors divide by `width - 1` and `height - 1`).
    pub fn new(window: PlaneWindow, width: u32, height: u32) -> Result<Self, Error> {
        if width < 2 || height < 2 {
            return Err(Error::InvalidDimension { width, height });
        }

        let imaginary_top = window.imaginary_top(width, height);
        let real_factor = (window.real_right - window.real_left) / f64::from(width - 1);
        let imaginary_factor =
            (imaginary_top - window.imaginary_bottom) / f64::from(height - 1);

        Ok(Self {
            real_left: window.real_left,
            imaginary_top,
            real_factor,
            imaginary_factor,
        })
    }

    /// The complex coordinate under pixel `(x, y)`.
    pub fn map(&self, x: u32, y: u32) -> (f64, f64) {
        (
            self.real_left + f64::from(x) * self.real_factor,
            self.imaginary_top - f64::from(y) * self.imaginary_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: PlaneWindow = PlaneWindow {
        real_left: -2.0,
        real_right: 1.0,
        imaginary_bottom: -1.2,
    };

    #[test]
    fn corners_map_to_window_edges() {
        let mapping = PlaneMapping::new(WINDOW, 301, 241).unwrap();

        let (re, im) = mapping.map(0, 0);
        assert_eq!(re, -2.0);
        assert_eq!(im, mapping.imaginary_top);

        let (re, im) = mapping.map(300, 240);
        assert!((re - 1.0).abs() < 1e-12);
        assert!((im - (-1.2)).abs() < 1e-12);
    }

    #[test]
    fn vertical_extent_follows_aspect_ratio() {
        // Doubling the height doubles the vertical extent.
        let tall = WINDOW.imaginary_top(100, 200);
        let square = WINDOW.imaginary_top(100, 100);
        let horizontal = WINDOW.real_right - WINDOW.real_left;
        assert!((square - WINDOW.imaginary_bottom - horizontal).abs() < 1e-12);
        assert!((tall - WINDOW.imaginary_bottom - 2.0 * horizontal).abs() < 1e-12);
    }

    #[test]
    fn row_zero_is_top_of_window() {
        let mapping = PlaneMapping::new(WINDOW, 100, 100).unwrap();
        let (_, top) = mapping.map(0, 0);
        let (_, bottom) = mapping.map(0, 99);
        assert!(top > bottom);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert_eq!(
            PlaneMapping::new(WINDOW, 1, 100),
            Err(Error::InvalidDimension {
                width: 1,
                height: 100
            })
        );
        assert!(PlaneMapping::new(WINDOW, 100, 0).is_err());
    }
}
