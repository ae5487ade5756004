//! The escape-time iteration at the heart of every backend.

/// Outcome of iterating one pixel's orbit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IterationResult {
    pub count: u32,
    pub escaped: bool,
}

/// Iterate `Z_{n+1} = Z_n^2 + c` from `(z0_re, z0_im)` until the squared
/// modulus exceeds 4.0 or `max_iterations` steps have run.
///
/// The escape test runs before each step, so a seed already outside the
/// radius escapes with `count == 0`. The comparison is strictly greater
/// than: an orbit sitting exactly on the boundary has not escaped yet.
///
/// Pure function over its arguments; every pixel is independent, which is
/// what lets the parallel and GPU backends run without synchronisation.
pub fn evaluate(
    c_re: f64,
    c_im: f64,
    z0_re: f64,
    z0_im: f64,
    max_iterations: u32,
) -> IterationResult {
    let mut z_re = z0_re;
    let mut z_im = z0_im;

    for n in 0..max_iterations {
        let z_re2 = z_re * z_re;
        let z_im2 = z_im * z_im;

        if z_re2 + z_im2 > 4.0 {
            return IterationResult {
                count: n,
                escaped: true,
            };
        }

        z_im = 2.0 * z_re * z_im + c_im;
        z_re = z_re2 - z_im2 + c_re;
    }

    IterationResult {
        count: max_iterations,
        escaped: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        let result = evaluate(0.0, 0.0, 0.0, 0.0, 30);
        assert_eq!(
            result,
            IterationResult {
                count: 30,
                escaped: false
            }
        );
    }

    #[test]
    fn far_point_escapes_immediately() {
        let result = evaluate(2.0, 2.0, 2.0, 2.0, 30);
        assert_eq!(
            result,
            IterationResult {
                count: 0,
                escaped: true
            }
        );
    }

    #[test]
    fn boundary_modulus_counts_as_inside() {
        // |z|^2 == 4.0 exactly: the strict comparison lets it take one
        // more step before escaping.
        let result = evaluate(2.0, 0.0, 2.0, 0.0, 10);
        assert!(result.escaped);
        assert_eq!(result.count, 1);
    }

    #[test]
    fn known_escape_count() {
        // Mandelbrot seeding for c = 1: orbit 1, 2, 5, ...
        // |2|^2 == 4 is not > 4, |5|^2 is.
        let result = evaluate(1.0, 0.0, 1.0, 0.0, 30);
        assert!(result.escaped);
        assert_eq!(result.count, 2);
    }
}
