//! Locale-aware number parsing
//!
//! The two source pages publish prices in different regional formats, so every
//! call names the locale it expects rather than relying on a process default.

use super::error::LookupError;
use rust_decimal::Decimal;
use std::str::FromStr;

const ASCII_DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// Regional number formatting conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    tag: &'static str,
    digits: [char; 10],
    decimal: char,
    grouping: char,
}

const LOCALES: [Locale; 6] = [
    Locale {
        tag: "en-US",
        digits: ASCII_DIGITS,
        decimal: '.',
        grouping: ',',
    },
    Locale {
        tag: "en-GB",
        digits: ASCII_DIGITS,
        decimal: '.',
        grouping: ',',
    },
    Locale {
        tag: "hu-HU",
        digits: ASCII_DIGITS,
        decimal: ',',
        grouping: '\u{a0}',
    },
    Locale {
        tag: "de-DE",
        digits: ASCII_DIGITS,
        decimal: ',',
        grouping: '.',
    },
    Locale {
        tag: "fr-FR",
        digits: ASCII_DIGITS,
        decimal: ',',
        grouping: '\u{202f}',
    },
    Locale {
        tag: "ar-EG",
        digits: ARABIC_INDIC_DIGITS,
        decimal: '٫',
        grouping: '٬',
    },
];

impl Locale {
    /// Looks up a locale by its BCP 47 tag. `hu_HU` and `HU-hu` are accepted too.
    pub fn from_tag(tag: &str) -> Result<Self, LookupError> {
        let wanted = tag.trim().replace('_', "-");
        LOCALES
            .iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&wanted))
            .copied()
            .ok_or_else(|| LookupError::UnknownLocale(tag.to_string()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Renders a value with this locale's digits, grouping and decimal mark.
    pub fn format(&self, value: Decimal) -> String {
        let plain = value.abs().to_string();
        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (plain.as_str(), None),
        };

        let mut out = String::new();
        if value.is_sign_negative() && !value.is_zero() {
            out.push('-');
        }
        let len = integer.len();
        for (i, c) in integer.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.grouping);
            }
            out.push(self.digit(c));
        }
        if let Some(fraction) = fraction {
            out.push(self.decimal);
            out.extend(fraction.chars().map(|c| self.digit(c)));
        }
        out
    }

    fn digit(&self, c: char) -> char {
        c.to_digit(10).map_or(c, |d| self.digits[d as usize])
    }
}

/// Finds the decimal separator by rendering 0.1 and reading the character
/// between the `0` and the `1`.
pub fn decimal_separator(locale: &Locale) -> Result<char, LookupError> {
    let rendered = locale.format(Decimal::new(1, 1));
    let mut chars = rendered.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some('0'), Some(separator), Some('1'), None) if !separator.is_ascii_digit() => {
            Ok(separator)
        }
        _ => Err(LookupError::LocaleFormat {
            locale: locale.tag().to_string(),
            rendered,
        }),
    }
}

/// Parses a price as published on a page formatted for `locale`.
///
/// Everything except ASCII digits and the locale's decimal separator is
/// dropped first, which takes care of grouping marks, currency symbols and
/// (non-breaking) spaces. Text that holds no digits at all yields zero.
pub fn normalize(raw: &str, locale: &Locale) -> Result<Decimal, LookupError> {
    let separator = decimal_separator(locale)?;
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == separator)
        .map(|c| if c == separator { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(&cleaned).map_err(|_| LookupError::NumberFormat {
        raw: raw.to_string(),
    })
}
