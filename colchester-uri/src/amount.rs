//! Exact conversion between decimal coin amounts and smallest units.
//!
//! No floating point is involved anywhere: the decimal text is split at the
//! point and both halves are handled as integers.

use colchester_params::UNITS_PER_COIN;

use crate::error::AmountError;

/// Digits allowed after the decimal point (1 unit = 10^-8 coin)
pub const MAX_DECIMAL_PLACES: usize = 8;

/// Convert a decimal amount such as `"12.34"` to smallest units.
///
/// Accepts `digits`, `digits.digits` or `.digits`. The result must be
/// strictly below `max_units`.
pub fn decimal_to_units(text: &str, max_units: u64) -> Result<u64, AmountError> {
    if text.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole_part, frac_part) = match text.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (text, None),
    };

    if !whole_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidFormat(text.to_string()));
    }

    let frac_part = match frac_part {
        Some(frac) if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) => {
            return Err(AmountError::InvalidFormat(text.to_string()));
        }
        Some(frac) => frac,
        None => "",
    };

    if frac_part.len() > MAX_DECIMAL_PLACES {
        return Err(AmountError::TooManyDecimalPlaces(text.to_string()));
    }

    let exceeds = || AmountError::ExceedsMaxSupply(text.to_string());

    // Only digits remain, so the sole way `parse` can fail is overflow
    let whole: u64 = if whole_part.is_empty() {
        0
    } else {
        whole_part.parse().map_err(|_| exceeds())?
    };

    let frac: u64 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = MAX_DECIMAL_PLACES);
        padded.parse().map_err(|_| exceeds())?
    };

    let units = whole
        .checked_mul(UNITS_PER_COIN)
        .and_then(|units| units.checked_add(frac))
        .ok_or_else(exceeds)?;

    if units >= max_units {
        return Err(exceeds());
    }

    Ok(units)
}

/// Check an amount already in smallest units against the supply cap
pub fn ensure_below_supply(units: u64, max_units: u64) -> Result<u64, AmountError> {
    if units >= max_units {
        return Err(AmountError::ExceedsMaxSupply(units_to_decimal(units)));
    }
    Ok(units)
}

/// Render smallest units as a decimal amount with no trailing zeros.
///
/// Whole amounts have no fractional part at all (`1000`), others carry only
/// the digits they need (`0.1`, `12.34`).
pub fn units_to_decimal(units: u64) -> String {
    let whole = units / UNITS_PER_COIN;
    let frac = units % UNITS_PER_COIN;

    if frac == 0 {
        whole.to_string()
    } else {
        let frac_str = format!("{:0width$}", frac, width = MAX_DECIMAL_PLACES);
        format!("{}.{}", whole, frac_str.trim_end_matches('0'))
    }
}
