/*!
Escape-time fractal rendering over three interchangeable backends.

The engine computes Mandelbrot and Julia images into a dense RGB
[`PixelBuffer`], selecting the execution substrate per call:

- [`ConcurrencyMode::Sequential`] — one thread, the correctness baseline.
- [`ConcurrencyMode::ParallelCpu`] — rows spread over the rayon pool as
  disjoint mutable chunks; bit-identical to the sequential output.
- [`ConcurrencyMode::Gpu`] — a wgpu compute kernel, one invocation per
  pixel, with a single blocking readback. Single-precision arithmetic, so
  channels may differ from the CPU paths by a small amount near set
  boundaries.

```no_run
use fractal_engine::{ConcurrencyMode, FractalEngine, FractalKind};

let engine = FractalEngine::new();
let image = engine.render(320, 240, FractalKind::Mandelbrot, ConcurrencyMode::ParallelCpu)?;
assert_eq!((image.width(), image.height()), (320, 240));
# Ok::<(), fractal_engine::Error>(())
```

Timing, metric records, and any report or chart built from them are the
caller's concern; [`FractalKind`] and [`ConcurrencyMode`] print the
labels such a report needs.
*/

pub mod colour;
pub mod engine;
pub mod error;
pub mod escape;
pub mod gpu;
pub mod parallel;
pub mod pixel;
pub mod plane;
pub mod sequential;
mod typed_buffer;

pub use colour::colour_for;
pub use engine::{ConcurrencyMode, FractalEngine, FractalKind, JULIA_CONSTANT};
pub use error::Error;
pub use escape::{evaluate, IterationResult};
pub use pixel::{PixelBuffer, Rgb};
pub use plane::{PlaneMapping, PlaneWindow};
