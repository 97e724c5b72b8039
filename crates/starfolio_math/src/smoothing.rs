//! Exponential smoothing factors
//!
//! A follower that closes a fraction `blend` of the remaining gap each
//! reference frame closes `1 - (1 - blend)^n` of it after `n` frames. The
//! helpers here convert a per-frame blend to the factor for a frame that
//! lasted `scale` reference frames.

/// Blend factor for a step that spans `scale` reference frames
///
/// A scale of exactly 1.0 returns `per_frame` unchanged.
pub fn blend_for_scale(per_frame: f32, scale: f32) -> f32 {
    let per_frame = per_frame.clamp(0.0, 1.0);
    if scale == 1.0 {
        return per_frame;
    }
    if scale <= 0.0 {
        return 0.0;
    }
    1.0 - (1.0 - per_frame).powf(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.00001;

    #[test]
    fn test_unit_scale_is_exact() {
        assert_eq!(blend_for_scale(0.1, 1.0), 0.1);
    }

    #[test]
    fn test_zero_scale_does_not_move() {
        assert_eq!(blend_for_scale(0.1, 0.0), 0.0);
        assert_eq!(blend_for_scale(0.1, -2.0), 0.0);
    }

    #[test]
    fn test_two_half_steps_match_one_full_step() {
        let half = blend_for_scale(0.1, 0.5);
        let remaining = (1.0 - half) * (1.0 - half);
        assert!((remaining - 0.9).abs() < EPSILON);
    }

    #[test]
    fn test_double_scale() {
        let b = blend_for_scale(0.1, 2.0);
        assert!((b - 0.19).abs() < EPSILON);
    }

    #[test]
    fn test_blend_is_clamped() {
        assert_eq!(blend_for_scale(2.0, 1.0), 1.0);
        assert_eq!(blend_for_scale(-1.0, 3.0), 0.0);
    }
}
