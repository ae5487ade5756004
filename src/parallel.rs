//! Data-parallel CPU renderer.
//!
//! Rows are distributed across the rayon worker pool as disjoint mutable
//! chunks of the shared buffer. Each worker writes only its own rows and
//! no pixel reads another, so the pixel data needs no lock or atomics;
//! the parallel iterator's implicit join is the only barrier. Output is
//! bit-identical to the sequential backend.

use log::debug;
use rayon::prelude::*;

use crate::colour::colour_for;
use crate::engine::FractalKind;
use crate::error::Error;
use crate::pixel::PixelBuffer;
use crate::plane::PlaneMapping;

pub fn render(kind: FractalKind, width: u32, height: u32) -> Result<PixelBuffer, Error> {
    let mapping = PlaneMapping::new(kind.window(), width, height)?;
    let max_iterations = kind.max_iterations();
    let mut buffer = PixelBuffer::new(width, height);

    debug!(
        "distributing {} rows across {} cores",
        height,
        num_cpus::get()
    );

    buffer
        .pixels_mut()
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as u32;
            for (x, out) in row.iter_mut().enumerate() {
                let (re, im) = mapping.map(x as u32, y);
                let result = kind.evaluate_at(re, im);
                *out = colour_for(result, max_iterations);
            }
        });

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequential;

    #[test]
    fn matches_sequential_bit_for_bit() {
        for kind in [FractalKind::Mandelbrot, FractalKind::Julia] {
            let parallel = render(kind, 160, 120).unwrap();
            let sequential = sequential::render(kind, 160, 120).unwrap();
            assert_eq!(parallel, sequential);
        }
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(render(FractalKind::Julia, 100, 1).is_err());
    }
}
