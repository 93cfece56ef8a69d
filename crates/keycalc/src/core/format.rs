//! Number <-> text conversions shared by the state machine and every renderer
//!
//! Two layouts exist. [`number_to_string`] is the canonical literal stored in
//! the operand (shortest round-trip digits, exponent only for very large or
//! very small magnitudes). [`format_number`] is what the display shows:
//! scientific notation outside `[1e-6, 999 999 999 999]`, otherwise a plain
//! decimal collapsed to 12 significant digits.

/// Largest magnitude rendered without an exponent
const PLAIN_MAX: f64 = 999_999_999_999.0;

/// Smallest nonzero magnitude rendered without an exponent
const PLAIN_MIN: f64 = 0.000_001;

/// Fraction digits in scientific display
const SCIENTIFIC_FRACTION_DIGITS: usize = 6;

/// Significant digits in plain display
const DISPLAY_SIGNIFICANT: usize = 12;

/// Canonical literals switch to exponent form at 10^21
const LITERAL_EXPONENT_MAX: i32 = 21;

/// Canonical literals switch to exponent form below 10^-6
const LITERAL_EXPONENT_MIN: i32 = -6;

/// Digits printed before rounding by hand
const EXACT_DIGITS: usize = 40;

/// Converts a value to its canonical operand literal.
///
/// Zero (either sign) is `"0"`; integers print without a fraction; values at
/// or above 1e21 or below 1e-6 use `d.ddde+N` form.
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let (digits, exponent) = shortest_digits(value);
    let sign = if value < 0.0 { "-" } else { "" };
    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= LITERAL_EXPONENT_MAX {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= LITERAL_EXPONENT_MAX {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if LITERAL_EXPONENT_MIN < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        format!("{}{}", mantissa(&digits), exponent_suffix(n - 1))
    };

    format!("{sign}{body}")
}

/// Formats a value for the display and the history line.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }

    let magnitude = value.abs();
    if magnitude > PLAIN_MAX || (magnitude < PLAIN_MIN && value != 0.0) {
        return to_exponential(value, SCIENTIFIC_FRACTION_DIGITS);
    }

    let plain = number_to_string(value);
    if plain.len() <= DISPLAY_SIGNIFICANT {
        return plain;
    }

    // Round to 12 significant digits, then re-parse to drop trailing zeros
    let (digits, exponent) = rounded_digits(value, DISPLAY_SIGNIFICANT);
    let sign = if value < 0.0 { "-" } else { "" };
    let shift = exponent - (DISPLAY_SIGNIFICANT as i32 - 1);
    let rounded = format!("{sign}{digits}e{shift}")
        .parse::<f64>()
        .unwrap_or(value);
    number_to_string(rounded)
}

/// Formats `value` as `d.dddddde±N` with `fraction_digits` after the point.
///
/// Ties round away from zero.
#[must_use]
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return number_to_string(value);
    }
    if value == 0.0 {
        let zeros = "0".repeat(fraction_digits);
        let point = if fraction_digits > 0 { "." } else { "" };
        return format!("0{point}{zeros}e+0");
    }

    let (digits, exponent) = rounded_digits(value, fraction_digits + 1);
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}{}", mantissa(&digits), exponent_suffix(exponent))
}

/// Parses an operand literal the way a lenient float reader does.
///
/// Trailing characters that leave an incomplete literal (`.`, `e`, `+`, `-`)
/// are ignored; anything unreadable is zero.
#[must_use]
pub fn parse_operand(literal: &str) -> f64 {
    let mut candidate = literal.trim();
    loop {
        if let Ok(value) = candidate.parse::<f64>() {
            return value;
        }
        match candidate.char_indices().last() {
            Some((idx, c)) if matches!(c, '.' | 'e' | 'E' | '+' | '-') => {
                candidate = &candidate[..idx];
            }
            _ => return 0.0,
        }
    }
}

/// Counts every decimal digit of a literal, exponent digits included.
///
/// Signs, the point and the `e` marker are skipped: `1e+21` has 3.
#[must_use]
pub fn digit_count(literal: &str) -> usize {
    literal.chars().filter(char::is_ascii_digit).count()
}

/// Shortest round-trip digits of `|value|` and the decimal exponent of the first digit
fn shortest_digits(value: f64) -> (String, i32) {
    let repr = format!("{:e}", value.abs());
    split_scientific(&repr)
}

/// Digits of `|value|` rounded half up to `significant` places, with the
/// decimal exponent of the first digit.
fn rounded_digits(value: f64, significant: usize) -> (String, i32) {
    let repr = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (all_digits, mut exponent) = split_scientific(&repr);
    let mut digits: Vec<u8> = all_digits.bytes().map(|b| b - b'0').collect();

    let round_up = digits.get(significant).is_some_and(|&d| d >= 5);
    digits.truncate(significant);

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            digits.truncate(significant);
            exponent += 1;
        }
    }

    let text = digits.iter().map(|d| char::from(b'0' + d)).collect();
    (text, exponent)
}

fn split_scientific(repr: &str) -> (String, i32) {
    let (mantissa, exponent) = repr.split_once('e').unwrap_or((repr, "0"));
    let digits = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or(0))
}

fn mantissa(digits: &str) -> String {
    match digits.split_at_checked(1) {
        Some((first, rest)) if !rest.is_empty() => format!("{first}.{rest}"),
        _ => digits.to_string(),
    }
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{}", exponent.abs())
}
