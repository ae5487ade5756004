//! Single-threaded renderer, the correctness baseline.

use crate::colour::colour_for;
use crate::engine::FractalKind;
use crate::error::Error;
use crate::pixel::PixelBuffer;
use crate::plane::PlaneMapping;

/// Render on the calling thread, rows top to bottom, columns left to
/// right. The other backends must match this output (the GPU within its
/// single-precision tolerance).
pub fn render(kind: FractalKind, width: u32, height: u32) -> Result<PixelBuffer, Error> {
    let mapping = PlaneMapping::new(kind.window(), width, height)?;
    let max_iterations = kind.max_iterations();
    let mut buffer = PixelBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let (re, im) = mapping.map(x, y);
            let result = kind.evaluate_at(re, im);
            buffer.set_pixel(x, y, colour_for(result, max_iterations));
        }
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgb;

    #[test]
    fn origin_pixel_is_black() {
        // 301 columns put a pixel on re = 0; the nearest row to im = 0 is
        // deep inside the main cardioid either way.
        let buffer = render(FractalKind::Mandelbrot, 301, 241).unwrap();
        assert_eq!(buffer.pixel(200, 120), Rgb::BLACK);
    }

    #[test]
    fn points_just_outside_the_set_are_coloured() {
        // Middle of the top edge: |c| < 2, so the orbit takes at least
        // one step before escaping and the ramp gives a visible colour.
        let buffer = render(FractalKind::Mandelbrot, 320, 240).unwrap();
        assert_ne!(buffer.pixel(160, 0), Rgb::BLACK);
    }
}
