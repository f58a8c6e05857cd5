use std::fmt;

/// Amounts are plain floating-point currency values, shown with two decimals.
pub type Amount = f64;

/// Format an amount as a human-readable currency string.
/// Example: 15.0 -> "15.00", -1234.5 -> "-1234.50"
pub fn format_amount(amount: Amount) -> String {
    // Avoid printing "-0.00" for tiny negative residues.
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Parse a decimal string into an amount.
/// Accepts "15", "15.5", "15.50" and a leading currency sign ("¥ 15.50").
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    let input = input
        .strip_prefix('¥')
        .or_else(|| input.strip_prefix('$'))
        .or_else(|| input.strip_prefix('€'))
        .unwrap_or(input)
        .trim();

    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let value: Amount = input.parse().map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
