use crate::domain::errors::ValidationError;

/// A Kubernetes resource quantity such as `5Gi`, `500M` or `1.5e3`.
///
/// Only the integral value is kept alongside the original text: fractional
/// results are rounded up, and values beyond `i64` saturate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantity {
    text: String,
    value: i64,
}

impl Quantity {
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        if text.is_empty() {
            return Err(ValidationError::EmptyQuantity);
        }
        let invalid = || ValidationError::InvalidQuantity(text.to_string());

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let number_end = unsigned
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(unsigned.len());
        let (number, suffix) = unsigned.split_at(number_end);

        let (integral, fractional) = number.split_once('.').unwrap_or((number, ""));
        if (integral.is_empty() && fractional.is_empty()) || fractional.contains('.') {
            return Err(invalid());
        }

        let mut mantissa: u128 = 0;
        for digit in integral.bytes().chain(fractional.bytes()) {
            mantissa = mantissa
                .saturating_mul(10)
                .saturating_add(u128::from(digit - b'0'));
        }

        let (exp10, binary) = parse_suffix(suffix).ok_or_else(invalid)?;
        let magnitude = scale(mantissa, fractional.len() as i32, exp10, binary);
        let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);

        Ok(Self {
            text: text.to_string(),
            value: if negative { -magnitude } else { magnitude },
        })
    }

    /// The quantity as a whole number, e.g. bytes for storage.
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Returns the decimal exponent and binary multiplier a suffix stands for.
fn parse_suffix(suffix: &str) -> Option<(i32, u128)> {
    let known = match suffix {
        "" => Some((0, 1)),
        "Ki" => Some((0, 1 << 10)),
        "Mi" => Some((0, 1 << 20)),
        "Gi" => Some((0, 1 << 30)),
        "Ti" => Some((0, 1 << 40)),
        "Pi" => Some((0, 1 << 50)),
        "Ei" => Some((0, 1 << 60)),
        "n" => Some((-9, 1)),
        "u" => Some((-6, 1)),
        "m" => Some((-3, 1)),
        "k" => Some((3, 1)),
        "M" => Some((6, 1)),
        "G" => Some((9, 1)),
        "T" => Some((12, 1)),
        "P" => Some((15, 1)),
        "E" => Some((18, 1)),
        _ => None,
    };
    if known.is_some() {
        return known;
    }

    // Scientific notation, `1e3` or `5E-2`
    let exponent = suffix.strip_prefix(['e', 'E'])?;
    let digits = exponent.trim_start_matches(['+', '-']);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    exponent.parse::<i32>().ok().map(|exp| (exp, 1))
}

fn scale(mantissa: u128, frac_digits: i32, exp10: i32, binary: u128) -> u128 {
    let base = mantissa.saturating_mul(binary);
    let exp = exp10.saturating_sub(frac_digits);
    if exp >= 0 {
        return base.saturating_mul(10u128.saturating_pow(exp as u32));
    }
    match 10u128.checked_pow(exp.unsigned_abs()) {
        Some(divisor) => base.div_ceil(divisor),
        None => u128::from(base > 0),
    }
}
