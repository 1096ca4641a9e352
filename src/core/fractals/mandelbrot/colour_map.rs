use crate::core::data::colour::Colour;

/// Maps an escape count to the three-segment black → red → yellow → white ramp.
///
/// The ramp position is `c = 3 * ln(iterations) / ln(max_iterations - 1)`;
/// each unit of `c` drives one channel from 0 to 255. Counts above
/// `max_iterations` are black. A count of zero gives `c = -inf`, which sits
/// below the first segment and saturates to black as well.
#[must_use]
pub fn colour_for(iterations: u32, max_iterations: u32) -> Colour {
    if iterations > max_iterations {
        return Colour::BLACK;
    }

    let c = 3.0 * f64::from(iterations).ln() / (f64::from(max_iterations) - 1.0).ln();

    if c < 1.0 {
        Colour::opaque(channel(255.0 * c), 0, 0)
    } else if c < 2.0 {
        Colour::opaque(255, channel(255.0 * (c - 1.0)), 0)
    } else {
        Colour::opaque(255, 255, channel(255.0 * (c - 2.0)))
    }
}

/// Rounds half to even and saturates into a byte; NaN becomes 0.
#[inline]
fn channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_above_bound_are_black() {
        for (iterations, max_iterations) in [(11, 10), (1001, 1000), (u32::MAX, 0)] {
            assert_eq!(
                colour_for(iterations, max_iterations),
                Colour::opaque(0, 0, 0)
            );
        }
    }

    #[test]
    fn test_zero_count_saturates_to_black() {
        assert_eq!(colour_for(0, 1000), Colour::BLACK);
        assert_eq!(colour_for(0, 10), Colour::BLACK);
    }

    #[test]
    fn test_single_iteration_starts_red_ramp_at_black() {
        assert_eq!(colour_for(1, 10), Colour::BLACK);
    }

    #[test]
    fn test_red_segment() {
        assert_eq!(colour_for(2, 10), Colour::opaque(241, 0, 0));
        assert_eq!(colour_for(4, 101), Colour::opaque(230, 0, 0));
    }

    #[test]
    fn test_yellow_segment() {
        assert_eq!(colour_for(20, 101), Colour::opaque(255, 243, 0));
    }

    #[test]
    fn test_white_segment() {
        assert_eq!(colour_for(50, 101), Colour::opaque(255, 255, 140));
        assert_eq!(colour_for(100, 101), Colour::opaque(255, 255, 255));
    }

    #[test]
    fn test_count_at_bound_clamps_blue_channel() {
        // c is slightly above 3 here
        assert_eq!(colour_for(101, 101), Colour::opaque(255, 255, 255));
    }

    #[test]
    fn test_degenerate_bounds_stay_in_range() {
        // ln(1) = 0 in the denominator: c is NaN or infinite
        assert_eq!(colour_for(1, 2), Colour::opaque(255, 255, 0));
        assert_eq!(colour_for(2, 2), Colour::opaque(255, 255, 255));
        assert_eq!(colour_for(0, 0).a, 255);
        assert_eq!(colour_for(1, 1).a, 255);
    }

    #[test]
    fn test_alpha_is_always_opaque() {
        for iterations in 0..=64 {
            assert_eq!(colour_for(iterations, 50).a, 255);
        }
    }
}
