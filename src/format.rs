//! Token-based date formatting and parsing.
//!
//! Supported tokens: `YYYY`, `MMMM`, `MMM`, `MM`, `M`, `DD`, `D`, `dddd`,
//! `ddd`. Anything else in a pattern is a literal. `parse_date` is the
//! exact inverse of `format_date` for any pattern carrying a year, month,
//! and day token; two-digit years are deliberately unsupported because
//! they cannot round-trip.

use crate::date::{CalendarDate, ParseError};
use crate::types::{Day, Month, Year};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const WEEKDAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month and weekday names used by named format tokens.
///
/// Defaults to English; replace the name tables to localize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    /// BCP 47-ish language tag, informational only
    pub lang: String,
    /// Full month names, January first
    pub months: Vec<String>,
    /// Abbreviated month names
    pub months_short: Vec<String>,
    /// Full weekday names, Sunday first
    pub weekdays: Vec<String>,
    /// Abbreviated weekday names
    pub weekdays_short: Vec<String>,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            lang: "en-US".to_owned(),
            months: MONTHS.iter().map(|s| (*s).to_owned()).collect(),
            months_short: MONTHS_SHORT.iter().map(|s| (*s).to_owned()).collect(),
            weekdays: WEEKDAYS.iter().map(|s| (*s).to_owned()).collect(),
            weekdays_short: WEEKDAYS_SHORT.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl Locale {
    fn month_name(&self, month: Month) -> &str {
        self.months
            .get(month.index())
            .map_or("", |s| s.as_str())
    }

    fn month_abbr(&self, month: Month) -> &str {
        self.months_short
            .get(month.index())
            .map_or("", |s| s.as_str())
    }

    fn weekday_name(&self, weekday: u8) -> &str {
        self.weekdays
            .get(weekday as usize)
            .map_or("", |s| s.as_str())
    }

    fn weekday_abbr(&self, weekday: u8) -> &str {
        self.weekdays_short
            .get(weekday as usize)
            .map_or("", |s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Year4,
    MonthFull,
    MonthAbbr,
    Month2,
    Month1,
    Day2,
    Day1,
    WeekdayFull,
    WeekdayAbbr,
    Literal(String),
}

/// Splits a pattern into tokens, longest token name first.
fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let bytes = pattern.as_bytes();
    let mut i = 0;

    // (text, token) pairs ordered so longer names win
    const TABLE: [(&str, Token); 9] = [
        ("YYYY", Token::Year4),
        ("MMMM", Token::MonthFull),
        ("MMM", Token::MonthAbbr),
        ("MM", Token::Month2),
        ("M", Token::Month1),
        ("dddd", Token::WeekdayFull),
        ("ddd", Token::WeekdayAbbr),
        ("DD", Token::Day2),
        ("D", Token::Day1),
    ];

    'outer: while i < bytes.len() {
        for (text, token) in &TABLE {
            if pattern[i..].starts_with(text) {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(token.clone());
                i += text.len();
                continue 'outer;
            }
        }
        let ch = pattern[i..].chars().next().unwrap_or('\0');
        literal.push(ch);
        i += ch.len_utf8();
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

pub(crate) fn format_date(date: CalendarDate, pattern: &str, locale: &Locale) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    for token in tokenize(pattern) {
        match token {
            Token::Year4 => out.push_str(&format!("{:04}", date.year())),
            Token::MonthFull => out.push_str(locale.month_name(date.month_typed())),
            Token::MonthAbbr => out.push_str(locale.month_abbr(date.month_typed())),
            Token::Month2 => out.push_str(&format!("{:02}", date.month())),
            Token::Month1 => out.push_str(&date.month().to_string()),
            Token::Day2 => out.push_str(&format!("{:02}", date.day())),
            Token::Day1 => out.push_str(&date.day().to_string()),
            Token::WeekdayFull => out.push_str(locale.weekday_name(date.weekday())),
            Token::WeekdayAbbr => out.push_str(locale.weekday_abbr(date.weekday())),
            Token::Literal(text) => out.push_str(&text),
        }
    }
    out
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Consumes between `min` and `max` ASCII digits.
    fn digits(&mut self, min: usize, max: usize) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest
            .bytes()
            .take(max)
            .take_while(u8::is_ascii_digit)
            .count();
        if len < min {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    fn literal(&mut self, text: &str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            false
        }
    }

    /// Case-insensitive match against a name table; longest name wins.
    /// Returns the zero-based table index.
    fn name(&mut self, table: &[String]) -> Option<usize> {
        let rest = self.rest();
        let mut best: Option<(usize, usize)> = None;
        for (idx, candidate) in table.iter().enumerate() {
            let len = candidate.len();
            // get() rejects a slice ending inside a multibyte character,
            // turning it into a plain mismatch
            if rest
                .get(..len)
                .is_some_and(|head| head.eq_ignore_ascii_case(candidate))
                && best.is_none_or(|(_, l)| len > l)
            {
                best = Some((idx, len));
            }
        }
        let (idx, len) = best?;
        self.pos += len;
        Some(idx)
    }
}

pub(crate) fn parse_date(
    input: &str,
    pattern: &str,
    locale: &Locale,
) -> Result<CalendarDate, ParseError> {
    let mismatch = || ParseError::FormatMismatch {
        input: input.to_owned(),
        pattern: pattern.to_owned(),
    };

    let mut scanner = Scanner { input, pos: 0 };
    let mut year: Option<u16> = None;
    let mut month: Option<u8> = None;
    let mut day: Option<u8> = None;

    for token in tokenize(pattern) {
        match token {
            Token::Year4 => {
                let text = scanner.digits(4, 4).ok_or_else(mismatch)?;
                year = Some(text.parse().map_err(|_| mismatch())?);
            }
            Token::Month2 => {
                let text = scanner.digits(2, 2).ok_or_else(mismatch)?;
                month = Some(text.parse().map_err(|_| mismatch())?);
            }
            Token::Month1 => {
                let text = scanner.digits(1, 2).ok_or_else(mismatch)?;
                month = Some(text.parse().map_err(|_| mismatch())?);
            }
            Token::MonthFull => {
                let idx = scanner.name(&locale.months).ok_or_else(mismatch)?;
                month = Some(idx as u8 + 1);
            }
            Token::MonthAbbr => {
                let idx = scanner.name(&locale.months_short).ok_or_else(mismatch)?;
                month = Some(idx as u8 + 1);
            }
            Token::Day2 => {
                let text = scanner.digits(2, 2).ok_or_else(mismatch)?;
                day = Some(text.parse().map_err(|_| mismatch())?);
            }
            Token::Day1 => {
                let text = scanner.digits(1, 2).ok_or_else(mismatch)?;
                day = Some(text.parse().map_err(|_| mismatch())?);
            }
            // weekday names are matched but carry no information the
            // year/month/day tokens don't already provide
            Token::WeekdayFull => {
                scanner.name(&locale.weekdays).ok_or_else(mismatch)?;
            }
            Token::WeekdayAbbr => {
                scanner.name(&locale.weekdays_short).ok_or_else(mismatch)?;
            }
            Token::Literal(text) => {
                if !scanner.literal(&text) {
                    return Err(mismatch());
                }
            }
        }
    }

    if !scanner.rest().is_empty() {
        return Err(mismatch());
    }

    let (Some(year), Some(month), Some(day)) = (year, month, day) else {
        return Err(ParseError::IncompletePattern(pattern.to_owned()));
    };

    let y = Year::new(year)?;
    let m = Month::new(month)?;
    let d = Day::new(day, year, month)?;
    Ok(CalendarDate::new(y, m, d))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_format_patterns() {
        let d = date(2024, 3, 5);
        let locale = Locale::default();

        struct TestCase {
            pattern: &'static str,
            expected: &'static str,
        }

        let cases = [
            TestCase {
                pattern: "YYYY-MM-DD",
                expected: "2024-03-05",
            },
            TestCase {
                pattern: "D/M/YYYY",
                expected: "5/3/2024",
            },
            TestCase {
                pattern: "MMM D, YYYY",
                expected: "Mar 5, 2024",
            },
            TestCase {
                pattern: "MMMM DD, YYYY",
                expected: "March 05, 2024",
            },
            TestCase {
                pattern: "dddd, D MMMM YYYY",
                expected: "Tuesday, 5 March 2024",
            },
            TestCase {
                pattern: "ddd DD.MM.YYYY",
                expected: "Tue 05.03.2024",
            },
        ];

        for case in &cases {
            assert_eq!(
                format_date(d, case.pattern, &locale),
                case.expected,
                "pattern {}",
                case.pattern
            );
        }
    }

    #[test]
    fn test_parse_format_round_trip() {
        let locale = Locale::default();
        let patterns = [
            "YYYY-MM-DD",
            "D/M/YYYY",
            "DD.MM.YYYY",
            "MMM D, YYYY",
            "MMMM DD, YYYY",
            "dddd, D MMMM YYYY",
            "ddd DD-MM-YYYY",
        ];
        let dates = [date(2024, 3, 5), date(1999, 12, 31), date(2024, 2, 29)];

        for pattern in patterns {
            for d in dates {
                let text = format_date(d, pattern, &locale);
                let parsed = parse_date(&text, pattern, &locale);
                assert_eq!(parsed, Ok(d), "pattern {pattern}, text {text:?}");
            }
        }
    }

    #[test]
    fn test_parse_named_months_case_insensitive() {
        let locale = Locale::default();
        assert_eq!(
            parse_date("march 5, 2024", "MMMM D, YYYY", &locale),
            Ok(date(2024, 3, 5))
        );
        assert_eq!(
            parse_date("MAR 5, 2024", "MMM D, YYYY", &locale),
            Ok(date(2024, 3, 5))
        );
    }

    #[test]
    fn test_parse_mismatch() {
        let locale = Locale::default();
        assert!(matches!(
            parse_date("2024/03/05", "YYYY-MM-DD", &locale),
            Err(ParseError::FormatMismatch { .. })
        ));
        // trailing garbage is a mismatch, not silently ignored
        assert!(matches!(
            parse_date("2024-03-05x", "YYYY-MM-DD", &locale),
            Err(ParseError::FormatMismatch { .. })
        ));
        // weekday token must still match a real name
        assert!(matches!(
            parse_date("Blursday 2024-03-05", "dddd YYYY-MM-DD", &locale),
            Err(ParseError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_multibyte_input_is_mismatch_not_panic() {
        let locale = Locale::default();
        // a char-boundary-breaking slice against a name table must fail
        // as a mismatch
        assert!(matches!(
            parse_date("J€ 5, 2024", "MMM D, YYYY", &locale),
            Err(ParseError::FormatMismatch { .. })
        ));
        assert!(matches!(
            parse_date("€€€€-03-05", "YYYY-MM-DD", &locale),
            Err(ParseError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_multibyte_locale_names() {
        let mut months = Locale::default().months;
        months[1] = "février".to_owned();
        let locale = Locale {
            months,
            ..Locale::default()
        };

        assert_eq!(
            parse_date("5 février 2024", "D MMMM YYYY", &locale),
            Ok(date(2024, 2, 5))
        );
        assert!(matches!(
            parse_date("5 f€vrier 2024", "D MMMM YYYY", &locale),
            Err(ParseError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_parse_validates_components() {
        let locale = Locale::default();
        assert!(matches!(
            parse_date("2023-02-29", "YYYY-MM-DD", &locale),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            parse_date("2024-13-01", "YYYY-MM-DD", &locale),
            Err(ParseError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_incomplete_pattern() {
        let locale = Locale::default();
        assert!(matches!(
            parse_date("2024-03", "YYYY-MM", &locale),
            Err(ParseError::IncompletePattern(_))
        ));
    }

    #[test]
    fn test_custom_locale_names() {
        let locale = Locale {
            lang: "it-IT".to_owned(),
            months: [
                "gennaio",
                "febbraio",
                "marzo",
                "aprile",
                "maggio",
                "giugno",
                "luglio",
                "agosto",
                "settembre",
                "ottobre",
                "novembre",
                "dicembre",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            ..Locale::default()
        };

        let d = date(2024, 3, 5);
        let text = format_date(d, "D MMMM YYYY", &locale);
        assert_eq!(text, "5 marzo 2024");
        assert_eq!(parse_date(&text, "D MMMM YYYY", &locale), Ok(d));
    }
}
