use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// For EUR/USD, 1 unit = 100 cents, so €50.00 = 5000 cents.
pub type Cents = i64;

/// Largest accepted magnitude for a single amount (one trillion units).
/// Keeps aggregate sums far away from `i64` overflow.
pub const MAX_AMOUNT_CENTS: Cents = 100_000_000_000_000;

/// Format cents as a human-readable currency string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Parse a signed decimal string into cents.
/// Example: "50.00" -> 5000, "-4.5" -> -450, "+100" -> 10000
///
/// Unlike a lenient parser this never truncates: more than two fractional
/// digits is an error, as is anything that is not plain decimal notation.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseCentsError::Empty);
    }

    let (negative, digits) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    let (units_str, decimal_str) = match digits.split_once('.') {
        Some((units, decimal)) => (units, decimal),
        None => (digits, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(units_str) || !all_digits(decimal_str) {
        return Err(ParseCentsError::InvalidFormat);
    }
    if decimal_str.len() > 2 {
        return Err(ParseCentsError::TooPrecise);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::OutOfRange)?
    };

    // Single digit like "5" means 50 cents
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().map_err(|_| ParseCentsError::InvalidFormat)? * 10,
        _ => decimal_str.parse().map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::OutOfRange)?;
    if cents > MAX_AMOUNT_CENTS {
        return Err(ParseCentsError::OutOfRange);
    }

    Ok(if negative { -cents } else { cents })
}

/// Convert a numeric amount in units into cents.
/// The value must be finite and land on a whole cent.
pub fn cents_from_units(value: f64) -> Result<Cents, ParseCentsError> {
    if !value.is_finite() {
        return Err(ParseCentsError::NotFinite);
    }

    let scaled = value * 100.0;
    let rounded = scaled.round();
    if (scaled - rounded).abs() > 1e-6 {
        return Err(ParseCentsError::TooPrecise);
    }
    if rounded.abs() > MAX_AMOUNT_CENTS as f64 {
        return Err(ParseCentsError::OutOfRange);
    }

    Ok(rounded as Cents)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseCentsError {
    Empty,
    InvalidFormat,
    TooPrecise,
    NotFinite,
    OutOfRange,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::Empty => write!(f, "amount is required"),
            ParseCentsError::InvalidFormat => {
                write!(f, "invalid money format, use '50.00', '-4.5' or '100'")
            }
            ParseCentsError::TooPrecise => write!(f, "amount has more than two decimal places"),
            ParseCentsError::NotFinite => write!(f, "amount must be a finite number"),
            ParseCentsError::OutOfRange => write!(f, "amount is out of range"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
