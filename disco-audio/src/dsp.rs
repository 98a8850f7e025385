//! Sample conversion helpers shared by the effect implementations.

use crate::constants::FULL_SCALE;

/// Convert a float sample to `i16`, saturating at the rails.
///
/// Overflow is not an error in this domain; out-of-range intermediate
/// values clip silently.
#[inline(always)]
pub fn to_sample(x: f32) -> i16 {
    if x >= i16::MAX as f32 {
        i16::MAX
    } else if x <= i16::MIN as f32 {
        i16::MIN
    } else {
        x as i16
    }
}

/// Normalize an `i16` sample to the `[-1.0, 1.0)` range.
#[inline(always)]
pub fn normalize(s: i16) -> f32 {
    s as f32 / FULL_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_sample_passes_in_range_values() {
        assert_eq!(to_sample(0.0), 0);
        assert_eq!(to_sample(1000.4), 1000);
        assert_eq!(to_sample(-1000.4), -1000);
        assert_eq!(to_sample(32766.9), 32766);
    }

    #[test]
    fn to_sample_saturates_at_rails() {
        assert_eq!(to_sample(32767.0), 32767);
        assert_eq!(to_sample(40000.0), 32767);
        assert_eq!(to_sample(-32768.0), -32768);
        assert_eq!(to_sample(-1.0e9), -32768);
    }

    #[test]
    fn normalize_range() {
        assert_eq!(normalize(0), 0.0);
        assert!((normalize(32767) - 0.99997).abs() < 1e-4);
        assert_eq!(normalize(-32768), -1.0);
    }
}
