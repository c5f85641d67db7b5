//! Daily motivational quote.
//!
//! The quote rotates once per calendar day in the server's local time zone:
//! every request on the same day sees the same quote, and the index advances
//! by one (mod the pool size) at local midnight.

use chrono::{Datelike, Local, NaiveDate};

pub const QUOTES: [&str; 10] = [
    "Another day of deep work. Let's go!",
    "The exam is closer than it looks; so is passing it.",
    "Data never lies. Neither does consistent effort.",
    "One line of study today is one point on the board tomorrow.",
    "The moment you refuse to quit, you've already passed.",
    "Consistency is the strongest algorithm there is.",
    "Errors are growth signals. Go debug one.",
    "This year's certification has your name on it.",
    "Just do the next task.",
    "Trust the you that is smarter than yesterday.",
];

/// Deterministic index for a given calendar day: day-of-year mod pool size.
pub fn quote_index(date: NaiveDate) -> usize {
    date.ordinal() as usize % QUOTES.len()
}

pub fn quote_for(date: NaiveDate) -> &'static str {
    QUOTES[quote_index(date)]
}

/// Today's quote in local time.
pub fn daily_quote() -> &'static str {
    quote_for(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_index_is_stable_within_a_day() {
        let day = date(2026, 3, 10);
        assert_eq!(quote_index(day), quote_index(day));
        assert_eq!(quote_for(day), quote_for(day));
    }

    #[test]
    fn test_index_advances_by_one_each_day() {
        let today = date(2026, 3, 10);
        let tomorrow = date(2026, 3, 11);
        assert_eq!(
            quote_index(tomorrow),
            (quote_index(today) + 1) % QUOTES.len()
        );
    }

    #[test]
    fn test_index_wraps_at_pool_size() {
        // Jan 10 is ordinal 10, which wraps to index 0 with a pool of 10.
        assert_eq!(quote_index(date(2026, 1, 10)), 0);
        assert_eq!(quote_index(date(2026, 1, 11)), 1);
    }

    #[test]
    fn test_every_day_maps_to_a_quote() {
        let mut day = date(2026, 1, 1);
        for _ in 0..366 {
            assert!(quote_index(day) < QUOTES.len());
            day = day.succ_opt().unwrap();
        }
    }
}
