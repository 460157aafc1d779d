//! Sample-size penalty applied to raw model confidence.

/// Below this many posts the penalty is at its maximum.
const MIN_POSTS_FOR_SCALING: usize = 5;
/// From this many posts on, confidence is left untouched.
const FULL_CONFIDENCE_POSTS: usize = 20;
/// Multiplier used for very small samples.
const MIN_MULTIPLIER: f64 = 0.5;

/// Scale a confidence down when it rests on few posts.
///
/// | posts     | multiplier                          |
/// |-----------|-------------------------------------|
/// | `< 5`     | `0.5`                               |
/// | `5..20`   | `0.5 + 0.5 * (posts - 5) / 15`      |
/// | `>= 20`   | `1.0`                               |
///
/// The product is rounded to two decimals.
#[must_use]
pub fn apply_data_confidence_penalty(confidence: f64, post_count: usize) -> f64 {
    let multiplier = if post_count < MIN_POSTS_FOR_SCALING {
        MIN_MULTIPLIER
    } else if post_count < FULL_CONFIDENCE_POSTS {
        #[allow(clippy::cast_precision_loss)]
        let progress = (post_count - MIN_POSTS_FOR_SCALING) as f64
            / (FULL_CONFIDENCE_POSTS - MIN_POSTS_FOR_SCALING) as f64;
        MIN_MULTIPLIER + (1.0 - MIN_MULTIPLIER) * progress
    } else {
        1.0
    };

    (confidence * multiplier * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn few_posts_halve_confidence() {
        assert!(approx(apply_data_confidence_penalty(0.8, 3), 0.4));
        assert!(approx(apply_data_confidence_penalty(0.8, 0), 0.4));
        assert!(approx(apply_data_confidence_penalty(0.8, 4), 0.4));
    }

    #[test]
    fn enough_posts_leave_confidence_unchanged() {
        assert!(approx(apply_data_confidence_penalty(0.8, 20), 0.8));
        assert!(approx(apply_data_confidence_penalty(0.8, 500), 0.8));
    }

    #[test]
    fn middle_range_scales_linearly() {
        assert!(approx(apply_data_confidence_penalty(0.8, 5), 0.4));
        // 0.5 + 0.5 * 5 / 15 = 0.6667 -> 0.8 * 0.6667 = 0.5333
        assert!(approx(apply_data_confidence_penalty(0.8, 10), 0.53));
        // 0.5 + 0.5 * 10 / 15 = 0.8333 -> 0.6667
        assert!(approx(apply_data_confidence_penalty(0.8, 15), 0.67));
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let v = apply_data_confidence_penalty(0.347, 3);
        assert!(approx(v, 0.17));
    }

    #[test]
    fn output_stays_in_unit_interval() {
        for posts in 0..30 {
            for conf in [0.0, 0.3, 0.5, 1.0] {
                let v = apply_data_confidence_penalty(conf, posts);
                assert!((0.0..=1.0).contains(&v));
                assert!(v <= conf + 1e-9);
            }
        }
    }
}
