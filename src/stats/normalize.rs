use crate::Country;

/// Smallest depth scale for a marker whose value is present; keeps low
/// values visible as a sliver instead of vanishing.
pub const MIN_VISIBLE_SCALE: f64 = 1.0 / 9.0;

/// Parse result for one raw statistic field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Magnitude {
    Numeric(f64),
    /// Field is empty or absent from the record.
    Missing,
    /// Field has text that is not numeric once `,`, `$` and `%` are removed.
    Unparsable,
}

impl Magnitude {
    pub fn value(self) -> Option<f64> {
        match self {
            Magnitude::Numeric(v) => Some(v),
            Magnitude::Missing | Magnitude::Unparsable => None,
        }
    }
}

/// Parses a raw statistic string into a magnitude.
///
/// Dataset values carry thousands separators and currency/percent symbols;
/// those are stripped before parsing. Anything non-numeric after stripping,
/// including non-finite spellings, is `Unparsable`.
pub fn parse_magnitude(raw: &str) -> Magnitude {
    if raw.is_empty() {
        return Magnitude::Missing;
    }
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | '%'))
        .collect();
    match cleaned.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Magnitude::Numeric(v),
        _ => Magnitude::Unparsable,
    }
}

/// Largest numeric magnitude of `key` across all countries.
///
/// Missing and unparsable values are excluded, and the result is never
/// below zero: an empty list or an all-missing column yields 0.
pub fn max_magnitude(countries: &[Country], key: &str) -> f64 {
    let mut highest = 0.0_f64;
    for country in countries {
        let raw = country.stat(key).unwrap_or("");
        if let Magnitude::Numeric(v) = parse_magnitude(raw) {
            if v > highest {
                highest = v;
            }
        }
    }
    highest
}

/// Depth scale for one marker given the raw value and the column maximum.
///
/// Missing or unparsable values collapse to 0. A zero maximum also yields 0
/// rather than dividing. Present numeric values are floored at
/// `MIN_VISIBLE_SCALE`.
pub fn scale_factor(raw: &str, max: f64) -> f64 {
    let value = match parse_magnitude(raw) {
        Magnitude::Numeric(v) => v,
        Magnitude::Missing | Magnitude::Unparsable => return 0.0,
    };
    if max <= 0.0 {
        return 0.0;
    }
    (value / max).max(MIN_VISIBLE_SCALE)
}
