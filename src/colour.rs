//! Colouring of iteration counts.

use crate::escape::IterationResult;
use crate::pixel::Rgb;

/// Map an iteration result to the two-band blue ramp.
///
/// Points that never escaped are black. Escaped points ramp
/// `v = count / max * 256`: dark blue `(0, 0, v)` for low counts, light
/// blue `(v, v, 255)` from the band split at `max / 2 - 1` upwards. `v`
/// can exceed 255 for counts near the cap, so channels saturate rather
/// than wrap.
pub fn colour_for(result: IterationResult, max_iterations: u32) -> Rgb {
    if !result.escaped {
        return Rgb::BLACK;
    }

    let value = f64::from(result.count) / f64::from(max_iterations) * 256.0;
    let channel = value.min(255.0) as u8;

    if result.count < (max_iterations / 2).saturating_sub(1) {
        Rgb {
            red: 0,
            green: 0,
            blue: channel,
        }
    } else {
        Rgb {
            red: channel,
            green: channel,
            blue: 255,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(count: u32) -> IterationResult {
        IterationResult {
            count,
            escaped: true,
        }
    }

    #[test]
    fn non_escaped_is_black() {
        let result = IterationResult {
            count: 30,
            escaped: false,
        };
        assert_eq!(colour_for(result, 30), Rgb::BLACK);
    }

    #[test]
    fn low_counts_ramp_dark_blue() {
        let colour = colour_for(escaped(3), 30);
        assert_eq!(colour.red, 0);
        assert_eq!(colour.green, 0);
        assert_eq!(colour.blue, 25); // 3 / 30 * 256, truncated
    }

    #[test]
    fn high_counts_ramp_light_blue() {
        // Band split for max 30 is at count 14.
        let colour = colour_for(escaped(14), 30);
        assert_eq!(colour.blue, 255);
        assert_eq!(colour.red, colour.green);
        assert_eq!(colour.red, 119); // 14 / 30 * 256, truncated
    }

    #[test]
    fn channel_saturates_at_the_cap() {
        // count == max gives v == 256.0 exactly; it must clamp, not wrap.
        let colour = colour_for(escaped(30), 30);
        assert_eq!(colour.red, 255);
        assert_eq!(colour.green, 255);
        assert_eq!(colour.blue, 255);
    }
}
