//! Random input generators.
//!
//! Every generator draws from an explicitly passed [`fastrand::Rng`], so a
//! run seeded with the same value produces the same inputs.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use fastrand::Rng;

use crate::error::{HarnessError, Result};
use crate::targets::DateArg;

/// Printable ASCII: digits, letters, punctuation, then whitespace.
pub const PRINTABLE: &[u8] = b"0123456789\
abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~ \t\n\r\x0b\x0c";

/// Default first year for random datetimes.
pub const START_YEAR: i32 = 1970;
/// Default last year (inclusive) for random datetimes.
pub const END_YEAR: i32 = 2030;

/// Longest content string handed to the content writer.
pub const MAX_CONTENT_LEN: usize = 500;
/// Longest integer list handed to the chunker.
pub const MAX_LIST_LEN: usize = 100;
/// Largest chunk size drawn for the chunker.
pub const MAX_CHUNK_SIZE: usize = 20;
/// Largest offset, in days, between the two dates of a well-formed pair.
pub const MAX_DAY_OFFSET: i64 = 1000;
/// Probability that a date pair is well-formed.
pub const VALID_DATE_RATIO: f64 = 0.8;

const SECONDS_PER_DAY: u32 = 86_400;
const LIST_ELEMENT_BOUND: i64 = 1000;
const MALFORMED_TEXT_MAX: usize = 20;
const MALFORMED_INT_BOUND: i64 = 1_000_000;
const LABEL_MAX: usize = 10;

/// Random string of printable characters with length in `[min_len, max_len]`.
///
/// When `max_len < min_len` the length is exactly `min_len`.
pub fn random_text(rng: &mut Rng, min_len: usize, max_len: usize) -> String {
    let len = rng.usize(min_len..=max_len.max(min_len));
    (0..len)
        .map(|_| PRINTABLE[rng.usize(..PRINTABLE.len())] as char)
        .collect()
}

/// Random datetime between Jan 1 `start_year` 00:00:00 and Dec 31
/// `end_year` 23:59:59 inclusive, at one-second resolution.
pub fn random_datetime(rng: &mut Rng, start_year: i32, end_year: i32) -> Result<NaiveDateTime> {
    if start_year > end_year {
        return Err(HarnessError::InvalidRange(format!(
            "start year {} is after end year {}",
            start_year, end_year
        )));
    }

    let start = NaiveDate::from_ymd_opt(start_year, 1, 1);
    let end = NaiveDate::from_ymd_opt(end_year, 12, 31);
    let (Some(start), Some(end)) = (start, end) else {
        return Err(HarnessError::InvalidRange(format!(
            "years {}..={} are outside the calendar range",
            start_year, end_year
        )));
    };

    let span_days = (end - start).num_days();
    let day_offset = rng.i64(0..=span_days);
    let second_offset = rng.u32(0..SECONDS_PER_DAY);

    Ok(start.and_time(NaiveTime::MIN)
        + Duration::days(day_offset)
        + Duration::seconds(i64::from(second_offset)))
}

/// Random integer list of length `[0, max_len]`, elements in `[-1000, 1000]`.
pub fn random_int_list(rng: &mut Rng, max_len: usize) -> Vec<i64> {
    let len = rng.usize(0..=max_len);
    (0..len)
        .map(|_| rng.i64(-LIST_ELEMENT_BOUND..=LIST_ELEMENT_BOUND))
        .collect()
}

/// One adversarial date operand, chosen uniformly from the fixed set.
pub fn random_malformed(rng: &mut Rng) -> DateArg {
    match rng.u8(0..5) {
        0 => DateArg::Text(random_text(rng, 0, MALFORMED_TEXT_MAX)),
        1 => DateArg::Null,
        2 => DateArg::Integer(rng.i64(-MALFORMED_INT_BOUND..=MALFORMED_INT_BOUND)),
        3 => DateArg::DateTime(Local::now().naive_local()),
        _ => DateArg::IsoText(Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
    }
}

/// Free-form label for the directory deleter.
pub fn random_label(rng: &mut Rng) -> String {
    match rng.u8(0..4) {
        0 => "FUZZ".to_string(),
        1 => "TEST".to_string(),
        2 => String::new(),
        _ => random_text(rng, 0, LABEL_MAX),
    }
}

/// Operand pair for the date-difference function.
///
/// Mostly well-formed datetimes at most [`MAX_DAY_OFFSET`] days apart;
/// otherwise two independently drawn malformed operands.
pub fn random_date_pair(rng: &mut Rng) -> Result<(DateArg, DateArg)> {
    if rng.f64() < VALID_DATE_RATIO {
        let first = random_datetime(rng, START_YEAR, END_YEAR)?;
        let second = first + Duration::days(rng.i64(-MAX_DAY_OFFSET..=MAX_DAY_OFFSET));
        Ok((DateArg::DateTime(first), DateArg::DateTime(second)))
    } else {
        Ok((random_malformed(rng), random_malformed(rng)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_printable_alphabet() {
        assert_eq!(PRINTABLE.len(), 100);
        assert!(PRINTABLE.is_ascii());
    }

    #[test]
    fn test_random_text_empty() {
        let mut rng = Rng::with_seed(1);
        for _ in 0..20 {
            assert!(random_text(&mut rng, 0, 0).is_empty());
        }
    }

    #[test]
    fn test_random_text_reversed_bounds() {
        let mut rng = Rng::with_seed(2);
        assert_eq!(random_text(&mut rng, 7, 3).len(), 7);
    }

    #[test]
    fn test_random_datetime_single_year() {
        let mut rng = Rng::with_seed(3);
        for _ in 0..200 {
            let dt = random_datetime(&mut rng, 2000, 2000).unwrap();
            assert_eq!(dt.year(), 2000);
            assert!(dt.second() < 60);
        }
    }

    #[test]
    fn test_random_datetime_rejects_reversed_years() {
        let mut rng = Rng::with_seed(4);
        let err = random_datetime(&mut rng, 2030, 1970).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidRange(_)));
    }

    #[test]
    fn test_random_datetime_rejects_out_of_calendar() {
        let mut rng = Rng::with_seed(5);
        assert!(random_datetime(&mut rng, 1970, i32::MAX).is_err());
    }

    #[test]
    fn test_random_malformed_covers_every_kind() {
        use crate::targets::DateArgKind;
        use std::collections::HashSet;

        let mut rng = Rng::with_seed(6);
        let kinds: HashSet<DateArgKind> =
            (0..500).map(|_| random_malformed(&mut rng).kind()).collect();

        assert_eq!(kinds.len(), 5);
    }

    #[test]
    fn test_valid_date_pair_offset_bounded() {
        let mut rng = Rng::with_seed(7);
        for _ in 0..200 {
            let (a, b) = random_date_pair(&mut rng).unwrap();
            if let (Some(a), Some(b)) = (a.as_datetime(), b.as_datetime()) {
                assert!((b - a).num_days().abs() <= MAX_DAY_OFFSET);
            }
        }
    }

    #[test]
    fn test_same_seed_same_inputs() {
        let mut a = Rng::with_seed(42);
        let mut b = Rng::with_seed(42);

        assert_eq!(random_int_list(&mut a, 50), random_int_list(&mut b, 50));
        assert_eq!(random_text(&mut a, 0, 80), random_text(&mut b, 0, 80));
        assert_eq!(
            random_datetime(&mut a, START_YEAR, END_YEAR).unwrap(),
            random_datetime(&mut b, START_YEAR, END_YEAR).unwrap()
        );
    }
}
