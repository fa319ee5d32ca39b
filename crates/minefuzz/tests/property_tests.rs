//! Property-based tests for the generators, the reference chunker and the
//! chunk checker.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p minefuzz --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p minefuzz --test property_tests
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use fastrand::Rng;
use proptest::prelude::*;

use minefuzz::checks::check_chunks;
use minefuzz::generators::{
    PRINTABLE, random_datetime, random_int_list, random_malformed, random_text,
};
use minefuzz::{DateArg, MiningTargets, ReferenceMining};

// =============================================================================
// Test Strategies
// =============================================================================

/// Integer lists shaped like the chunker campaign's inputs.
fn int_list() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000i64..=1000, 0..120)
}

fn chunk_size() -> impl Strategy<Value = usize> {
    1usize..=25
}

fn span_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn span_end(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap()
}

// =============================================================================
// Chunker Properties
// =============================================================================

mod chunker_tests {
    use super::*;

    proptest! {
        /// Concatenating the chunks reproduces the list.
        #[test]
        fn concatenation_reproduces_list(items in int_list(), size in chunk_size()) {
            let chunks = ReferenceMining::new().make_chunks(&items, size).unwrap();
            let flattened: Vec<i64> = chunks.concat();
            prop_assert_eq!(flattened, items);
        }

        /// Every chunk but the last is full; the last holds the remainder.
        #[test]
        fn chunk_lengths(items in int_list(), size in chunk_size()) {
            let chunks = ReferenceMining::new().make_chunks(&items, size).unwrap();

            if items.is_empty() {
                prop_assert!(chunks.is_empty());
            } else {
                let (last, full) = chunks.split_last().unwrap();
                for chunk in full {
                    prop_assert_eq!(chunk.len(), size);
                }
                let remainder = items.len() % size;
                let expected = if remainder == 0 { size } else { remainder };
                prop_assert_eq!(last.len(), expected);
            }
        }

        /// A size larger than the list yields the list as a single chunk.
        #[test]
        fn oversized_chunk_is_whole_list(
            items in prop::collection::vec(-1000i64..=1000, 1..30),
            extra in 1usize..10,
        ) {
            let size = items.len() + extra;
            let chunks = ReferenceMining::new().make_chunks(&items, size).unwrap();
            prop_assert_eq!(chunks, vec![items]);
        }

        /// The checker accepts whatever the reference chunker produces.
        #[test]
        fn checker_accepts_reference_output(items in int_list(), size in chunk_size()) {
            let chunks = ReferenceMining::new().make_chunks(&items, size).unwrap();
            prop_assert!(check_chunks(&items, size, &chunks).is_sane());
        }

        /// The checker rejects any dropped element.
        #[test]
        fn checker_rejects_dropped_element(
            items in prop::collection::vec(-1000i64..=1000, 1..60),
            size in chunk_size(),
        ) {
            let mut chunks = ReferenceMining::new().make_chunks(&items, size).unwrap();
            if let Some(last) = chunks.last_mut() {
                last.pop();
            }
            prop_assert!(!check_chunks(&items, size, &chunks).is_sane());
        }
    }
}

// =============================================================================
// Generator Properties
// =============================================================================

mod generator_tests {
    use super::*;

    proptest! {
        /// A fixed length request yields exactly that many printable chars.
        #[test]
        fn text_has_requested_length(seed in any::<u64>(), n in 0usize..300) {
            let mut rng = Rng::with_seed(seed);
            let text = random_text(&mut rng, n, n);
            prop_assert_eq!(text.chars().count(), n);
            prop_assert!(text.bytes().all(|b| PRINTABLE.contains(&b)));
        }

        /// Lengths stay within the requested bounds.
        #[test]
        fn text_length_in_bounds(seed in any::<u64>(), min in 0usize..50, extra in 0usize..50) {
            let mut rng = Rng::with_seed(seed);
            let len = random_text(&mut rng, min, min + extra).len();
            prop_assert!(len >= min && len <= min + extra);
        }

        /// Datetimes fall inside the requested span.
        #[test]
        fn datetime_within_span(seed in any::<u64>(), start in 1900i32..2100, years in 0i32..80) {
            let mut rng = Rng::with_seed(seed);
            let end = start + years;
            let dt = random_datetime(&mut rng, start, end).unwrap();
            prop_assert!(dt >= span_start(start));
            prop_assert!(dt <= span_end(end));
        }

        /// Lists stay within their length and value bounds.
        #[test]
        fn int_list_in_bounds(seed in any::<u64>(), max_len in 0usize..200) {
            let mut rng = Rng::with_seed(seed);
            let list = random_int_list(&mut rng, max_len);
            prop_assert!(list.len() <= max_len);
            prop_assert!(list.iter().all(|v| (-1000..=1000).contains(v)));
        }

        /// Malformed text operands stay short.
        #[test]
        fn malformed_text_is_short(seed in any::<u64>()) {
            let mut rng = Rng::with_seed(seed);
            if let DateArg::Text(s) = random_malformed(&mut rng) {
                prop_assert!(s.len() <= 20);
            }
        }
    }

    #[test]
    fn empty_text_request_is_empty() {
        let mut rng = Rng::new();
        for _ in 0..100 {
            assert_eq!(random_text(&mut rng, 0, 0), "");
        }
    }
}

// =============================================================================
// Date Difference Properties
// =============================================================================

mod days_tests {
    use super::*;

    proptest! {
        /// A date is zero days from itself.
        #[test]
        fn same_date_is_zero(seed in any::<u64>()) {
            let mut rng = Rng::with_seed(seed);
            let d = DateArg::DateTime(random_datetime(&mut rng, 1970, 2030).unwrap());
            prop_assert_eq!(ReferenceMining::new().days_between(&d, &d).unwrap(), 0);
        }

        /// The lenient reference never fails and never goes negative.
        #[test]
        fn lenient_never_negative(seed in any::<u64>()) {
            let mut rng = Rng::with_seed(seed);
            let a = random_malformed(&mut rng);
            let b = random_malformed(&mut rng);
            let days = ReferenceMining::new().days_between(&a, &b).unwrap();
            prop_assert!(days >= 0);
        }
    }
}
