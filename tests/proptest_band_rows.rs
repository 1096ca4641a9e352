//! Property tests for splitting a frame into horizontal bands.
//!
//! 1. Every row in `[0, height)` belongs to exactly one band.
//! 2. Bands are contiguous and in order.
//! 3. The final band ends exactly at `height`.
//! 4. All bands but the last have `height / n` rows.

use std::num::NonZeroU32;

use mandelbrot_explorer::calculate_band_rows;
use proptest::prelude::*;

fn band_count() -> impl Strategy<Value = NonZeroU32> {
    (1u32..=64).prop_map(|n| NonZeroU32::new(n).unwrap())
}

proptest! {
    #[test]
    fn every_row_covered_once(height in 1u32..=2000, bands in band_count()) {
        let ranges = calculate_band_rows(height, bands);
        let mut hits = vec![0u8; height as usize];

        for range in &ranges {
            for row in range.start_row..range.end_row {
                hits[row as usize] += 1;
            }
        }

        prop_assert!(hits.iter().all(|&h| h == 1), "coverage {:?} for {:?}", hits, ranges);
    }
}

proptest! {
    #[test]
    fn bands_are_contiguous(height in 1u32..=2000, bands in band_count()) {
        let ranges = calculate_band_rows(height, bands);

        prop_assert_eq!(ranges.len(), bands.get() as usize);
        prop_assert_eq!(ranges[0].start_row, 0);
        for pair in ranges.windows(2) {
            prop_assert_eq!(pair[0].end_row, pair[1].start_row);
        }
    }
}

proptest! {
    #[test]
    fn last_band_ends_at_height(height in 1u32..=2000, bands in band_count()) {
        let ranges = calculate_band_rows(height, bands);

        prop_assert_eq!(ranges.last().map(|r| r.end_row), Some(height));
    }
}

proptest! {
    #[test]
    fn last_band_absorbs_remainder(height in 1u32..=2000, bands in band_count()) {
        let ranges = calculate_band_rows(height, bands);
        let base = height / bands.get();
        let (last, rest) = ranges.split_last().unwrap();

        prop_assert!(rest.iter().all(|r| r.len() == base));
        prop_assert_eq!(last.len(), base + height % bands.get());
    }
}
