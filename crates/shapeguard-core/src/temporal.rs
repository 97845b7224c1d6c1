//! # Temporal Parsing — Format-Driven Date Recognition
//!
//! Backs the string validator's `dateFormat` constraint. [`parse_date`]
//! never fails: unparseable input yields [`ParsedDate::Invalid`] so the
//! caller can test validity after the call.
//!
//! ## Formats
//!
//! Two dialects are accepted:
//!
//! - chrono strftime formats (any format containing `%`), e.g. `%Y-%m-%d`.
//! - Token formats, e.g. `YYYY-MM-DD HH:mm`, translated to strftime by
//!   [`translate_format`]. Text inside `[...]` is literal.
//!
//! Parsing is strict: the entire text must be consumed by the format.

use std::borrow::Cow;

use chrono::format::{Fixed, Item, ParseErrorKind, Parsed, StrftimeItems};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Outcome of a date parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// The text parsed to this instant. Offsets are normalized to UTC,
    /// date-only formats resolve to midnight, time-only formats to
    /// 1970-01-01.
    Valid(NaiveDateTime),
    /// The text does not describe a date in the given format.
    Invalid,
}

impl ParsedDate {
    /// Returns true if the parse produced a date.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The parsed instant, if any.
    pub fn value(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid => None,
        }
    }
}

/// Token table, longest tokens first so greedy matching picks `YYYY` over `YY`.
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("SSS", "%3f"),
    ("MMM", "%b"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ZZ", "%z"),
    ("M", "%m"),
    ("D", "%d"),
    ("H", "%H"),
    ("h", "%I"),
    ("m", "%M"),
    ("s", "%S"),
    ("A", "%p"),
    ("a", "%p"),
    ("Z", "%:z"),
];

/// Translate a token format (`YYYY-MM-DD`) into a chrono strftime format.
///
/// Characters that are not tokens are copied through; `%` is escaped.
pub fn translate_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;

    'scan: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut out, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }
        for (token, strftime) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(strftime);
                rest = tail;
                continue 'scan;
            }
        }
        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, literal: &str) {
    for c in literal.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

/// Parse `text` as a date using `format`.
///
/// Fields the format does not mention default to the epoch: a year-only
/// format resolves to January 1st, a date-only format to midnight, and a
/// time-only format to 1970-01-01. In token formats, `Z` and `ZZ` also
/// accept a literal `Z` designator for UTC.
pub fn parse_date(text: &str, format: &str) -> ParsedDate {
    let (pattern, zulu): (Cow<'_, str>, bool) = if format.contains('%') {
        (Cow::Borrowed(format), false)
    } else {
        (Cow::Owned(translate_format(format)), true)
    };

    let items = StrftimeItems::new(&pattern).map(|item| match item {
        Item::Fixed(Fixed::TimezoneOffset | Fixed::TimezoneOffsetColon) if zulu => {
            Item::Fixed(Fixed::TimezoneOffsetZ)
        }
        other => other,
    });

    let mut parsed = Parsed::new();
    if chrono::format::parse(&mut parsed, text, items).is_err() {
        return ParsedDate::Invalid;
    }

    resolve(&parsed).map_or(ParsedDate::Invalid, ParsedDate::Valid)
}

fn resolve(parsed: &Parsed) -> Option<NaiveDateTime> {
    let local = resolve_date(parsed)?.and_time(resolve_time(parsed)?);
    match parsed.to_fixed_offset() {
        Ok(offset) => {
            local.checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        }
        Err(e) if e.kind() == ParseErrorKind::NotEnough => Some(local),
        Err(_) => None,
    }
}

fn resolve_date(parsed: &Parsed) -> Option<NaiveDate> {
    match parsed.to_naive_date() {
        Ok(date) => return Some(date),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {}
        Err(_) => return None,
    }

    // Setters fail on fields the text already fixed; those keep their value.
    let mut filled = parsed.clone();
    let _ = filled.set_month(1);
    let _ = filled.set_day(1);
    match filled.to_naive_date() {
        Ok(date) => return Some(date),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {}
        Err(_) => return None,
    }

    let _ = filled.set_year(1970);
    filled.to_naive_date().ok()
}

fn resolve_time(parsed: &Parsed) -> Option<NaiveTime> {
    match parsed.to_naive_time() {
        Ok(time) => return Some(time),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {}
        Err(_) => return None,
    }

    let mut filled = parsed.clone();
    let _ = filled.set_hour(0);
    let _ = filled.set_minute(0);
    filled.to_naive_time().ok()
}
