//! Numeric literal scanning shared by the JSON and expression parsers.

/// A classified numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParsedNumber {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberError {
    /// No digits where a number was expected.
    NoDigits,
    /// Classified as an integer but outside the 64-bit range.
    Overflow,
}

/// Parse the numeric literal at the start of `s`.
///
/// The same text is scanned twice: once with integer syntax (sign and
/// digits) and once with float syntax (adding an optional fraction and an
/// optional exponent). Equal consumed lengths mean no fraction or exponent
/// was present and the literal is an `Int`; otherwise it is a `Float`. The
/// length comparison is the classification rule — not the presence of `.`
/// or `e`, and not the value.
///
/// Returns the value and the number of bytes consumed.
pub(crate) fn parse_number(s: &str) -> Result<(ParsedNumber, usize), NumberError> {
    let bytes = s.as_bytes();

    let mut int_len = 0;
    if bytes.first() == Some(&b'-') {
        int_len = 1;
    }
    let digits_start = int_len;
    while int_len < bytes.len() && bytes[int_len].is_ascii_digit() {
        int_len += 1;
    }
    if int_len == digits_start {
        return Err(NumberError::NoDigits);
    }

    let mut float_len = int_len;
    if float_len < bytes.len() && bytes[float_len] == b'.' {
        float_len += 1;
        while float_len < bytes.len() && bytes[float_len].is_ascii_digit() {
            float_len += 1;
        }
    }
    if float_len < bytes.len() && (bytes[float_len] == b'e' || bytes[float_len] == b'E') {
        // The exponent marker only counts when at least one digit follows.
        let mut exp = float_len + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            float_len = exp;
        }
    }

    if int_len == float_len {
        let value = s[..int_len].parse::<i64>().map_err(|_| NumberError::Overflow)?;
        Ok((ParsedNumber::Int(value), int_len))
    } else {
        let value = s[..float_len].parse::<f64>().map_err(|_| NumberError::NoDigits)?;
        Ok((ParsedNumber::Float(value), float_len))
    }
}
