//! The public facade: fractal kinds, backend selection, and dispatch.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::debug;

use crate::error::Error;
use crate::escape::{self, IterationResult};
use crate::pixel::PixelBuffer;
use crate::plane::PlaneWindow;
use crate::{gpu, parallel, sequential};

/// The fixed Julia constant `c = (-0.4, 0.6)`.
pub const JULIA_CONSTANT: (f64, f64) = (-0.4, 0.6);

/// Which fractal to render. The kind fixes the plane window, the
/// iteration cap, and how the pixel coordinate seeds the recurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FractalKind {
    Mandelbrot,
    Julia,
}

impl FractalKind {
    pub fn window(self) -> PlaneWindow {
        match self {
            FractalKind::Mandelbrot => PlaneWindow {
                real_left: -2.0,
                real_right: 1.0,
                imaginary_bottom: -1.2,
            },
            FractalKind::Julia => PlaneWindow {
                real_left: -1.5,
                real_right: 1.5,
                imaginary_bottom: -1.2,
            },
        }
    }

    /// Iteration caps chosen for visual contrast, per kind.
    pub fn max_iterations(self) -> u32 {
        match self {
            FractalKind::Mandelbrot => 30,
            FractalKind::Julia => 100,
        }
    }

    /// Evaluate the orbit under the pixel's complex coordinate.
    ///
    /// Mandelbrot seeds `z0 = c =` pixel; Julia seeds `z0 =` pixel with
    /// the fixed constant as `c`.
    pub fn evaluate_at(self, re: f64, im: f64) -> IterationResult {
        match self {
            FractalKind::Mandelbrot => escape::evaluate(re, im, re, im, self.max_iterations()),
            FractalKind::Julia => {
                let (c_re, c_im) = JULIA_CONSTANT;
                escape::evaluate(c_re, c_im, re, im, self.max_iterations())
            }
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FractalKind::Mandelbrot => "Mandelbrot",
            FractalKind::Julia => "Julia",
        })
    }
}

impl FromStr for FractalKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "Mandelbrot" => Ok(FractalKind::Mandelbrot),
            "Julia" => Ok(FractalKind::Julia),
            other => Err(Error::UnsupportedMode(other.to_owned())),
        }
    }
}

/// Which execution substrate populates the buffer. The mode never
/// changes what is drawn, only how the work is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConcurrencyMode {
    Sequential,
    ParallelCpu,
    Gpu,
}

impl fmt::Display for ConcurrencyMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ConcurrencyMode::Sequential => "Sequential",
            ConcurrencyMode::ParallelCpu => "ParallelCpu",
            ConcurrencyMode::Gpu => "Gpu",
        })
    }
}

impl FromStr for ConcurrencyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "Sequential" => Ok(ConcurrencyMode::Sequential),
            "ParallelCpu" => Ok(ConcurrencyMode::ParallelCpu),
            "Gpu" => Ok(ConcurrencyMode::Gpu),
            other => Err(Error::UnsupportedMode(other.to_owned())),
        }
    }
}

/// Strategy-dispatching entry point.
///
/// Stateless itself; the GPU backend's device and pipeline live in
/// process-scoped state shared by every engine value.
#[derive(Clone, Copy, Debug, Default)]
pub struct FractalEngine;

impl FractalEngine {
    pub fn new() -> Self {
        FractalEngine
    }

    /// Render `kind` at `width x height` on the backend selected by
    /// `mode`.
    ///
    /// Fails with [`Error::InvalidDimension`] for dimensions below 2 and
    /// surfaces the GPU backend's errors unchanged; there is no implicit
    /// fallback to another mode. Wall-clock timing and metric recording
    /// are left to the caller.
    pub fn render(
        &self,
        width: u32,
        height: u32,
        kind: FractalKind,
        mode: ConcurrencyMode,
    ) -> Result<PixelBuffer, Error> {
        if width < 2 || height < 2 {
            return Err(Error::InvalidDimension { width, height });
        }

        let started = Instant::now();
        let buffer = match mode {
            ConcurrencyMode::Sequential => sequential::render(kind, width, height)?,
            ConcurrencyMode::ParallelCpu => parallel::render(kind, width, height)?,
            ConcurrencyMode::Gpu => gpu::render(kind, width, height)?,
        };
        debug!(
            "rendered {} {}x{} via {} in {:?}",
            kind,
            width,
            height,
            mode,
            started.elapsed()
        );

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for kind in [FractalKind::Mandelbrot, FractalKind::Julia] {
            assert_eq!(kind.to_string().parse::<FractalKind>(), Ok(kind));
        }
        for mode in [
            ConcurrencyMode::Sequential,
            ConcurrencyMode::ParallelCpu,
            ConcurrencyMode::Gpu,
        ] {
            assert_eq!(mode.to_string().parse::<ConcurrencyMode>(), Ok(mode));
        }
    }

    #[test]
    fn unknown_mode_is_unsupported() {
        assert_eq!(
            "Quantum".parse::<ConcurrencyMode>(),
            Err(Error::UnsupportedMode("Quantum".to_owned()))
        );
    }

    #[test]
    fn julia_window_is_symmetric() {
        let window = FractalKind::Julia.window();
        assert_eq!(window.real_left, -window.real_right);
    }

    #[test]
    fn degenerate_dimensions_fail_before_dispatch() {
        let engine = FractalEngine::new();
        let result = engine.render(1, 100, FractalKind::Mandelbrot, ConcurrencyMode::Gpu);
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidDimension {
                width: 1,
                height: 100
            }
        );
    }
}
