//! Roman numeral validation and conversion functions
//!
//! Pure functions for classifying raw textual input and converting a
//! validated integer into its canonical Roman numeral representation.
//! Validation runs an ordered chain of classifiers whose precedence is
//! part of the contract: an input such as "3.14" is reported as
//! `InvalidCharacters` only because the range check runs on its
//! truncated parse first.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Roman numeral mapping, ordered from largest to smallest value.
///
/// Covers the 13 canonical additive and subtractive units. The greedy
/// descending walk in [`to_roman`] relies on this ordering.
pub const NUMERAL_TABLE: [(u16, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Categorical reason a raw input fails to yield a convertible integer.
///
/// `Display` renders the fixed human-readable message for each kind.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    #[error("Input is required")]
    MissingInput,

    #[error("Input must be a valid integer")]
    InvalidNumber,

    #[error("Input must be between 1 and 3999")]
    OutOfRange,

    #[error("Input must be a valid integer")]
    InvalidCharacters,
}

impl ValidationErrorKind {
    /// Stable identifier for this kind, used as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingInput => "MISSING_INPUT",
            ValidationErrorKind::InvalidNumber => "INVALID_NUMBER",
            ValidationErrorKind::OutOfRange => "OUT_OF_RANGE",
            ValidationErrorKind::InvalidCharacters => "INVALID_CHARACTERS",
        }
    }
}

/// Range violation on direct misuse of [`to_roman`].
///
/// Distinct from [`ValidationErrorKind::OutOfRange`], which is reserved
/// for textual input that failed validation.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Number must be between 1 and 3999")]
pub struct RangeError;

/// Outcome of a successful conversion.
///
/// `input` is the trimmed original text; `output` contains only
/// characters from {I,V,X,L,C,D,M}. `value` is the integer `input`
/// parsed to; it is not part of the wire format, but callers recording
/// the converted magnitude read it instead of re-parsing `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub input: String,
    pub output: String,
    #[serde(skip)]
    pub value: u16,
}

fn digits_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // [0-9] rather than \d: the pattern must reject non-ASCII decimal
    // digits such as U+0664 ARABIC-INDIC FOUR.
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("digit pattern is valid"))
}

/// Parse a leading integer from text, tolerating a sign and trailing
/// garbage ("3.14" -> 3, "42abc" -> 42, "-5" -> -5).
///
/// Returns `None` when the text has no leading number at all. A digit
/// run too long for `i64` saturates, so it still classifies as out of
/// range downstream.
fn parse_leading_int(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return None;
    }

    // The prefix is all ASCII digits, so the only parse failure is overflow.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    })
}

/// Classify raw textual input for Roman numeral conversion.
///
/// Returns `None` only when the trimmed text is a pure digit string
/// whose value lies in [1,3999]. Checks run strictly in order; the
/// order determines precedence for inputs that could match several
/// kinds.
pub fn validate(raw: &str) -> Option<ValidationErrorKind> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Some(ValidationErrorKind::MissingInput);
    }

    let Some(value) = parse_leading_int(trimmed) else {
        return Some(ValidationErrorKind::InvalidNumber);
    };

    if !(1..=3999).contains(&value) {
        return Some(ValidationErrorKind::OutOfRange);
    }

    if !digits_only().is_match(trimmed) {
        return Some(ValidationErrorKind::InvalidCharacters);
    }

    None
}

/// Convert an integer in [1,3999] to its canonical Roman numeral.
///
/// Walks the numeral table from largest to smallest value, appending
/// each symbol while the remainder covers it. The table is complete for
/// every base-10 digit position, so the remainder always reaches zero.
pub fn to_roman(n: u16) -> Result<String, RangeError> {
    if !(1..=3999).contains(&n) {
        return Err(RangeError);
    }

    let mut output = String::new();
    let mut remaining = n;

    for &(value, numeral) in NUMERAL_TABLE.iter() {
        while remaining >= value {
            output.push_str(numeral);
            remaining -= value;
        }
    }

    Ok(output)
}

/// Validate raw input and convert it to a Roman numeral.
///
/// On validation failure the first matching kind is returned verbatim
/// and the converter is never invoked.
pub fn convert_input(raw: &str) -> Result<ConversionResult, ValidationErrorKind> {
    if let Some(kind) = validate(raw) {
        return Err(kind);
    }

    let trimmed = raw.trim();

    // Validation guarantees a pure digit string in [1,3999].
    let value = trimmed
        .parse::<u16>()
        .map_err(|_| ValidationErrorKind::InvalidNumber)?;
    let output = to_roman(value).map_err(|_| ValidationErrorKind::OutOfRange)?;

    Ok(ConversionResult {
        input: trimmed.to_string(),
        output,
        value,
    })
}
