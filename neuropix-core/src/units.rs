//! Splitting of composite "<number><unit>" configuration strings.

/// Splits a composite value-with-unit string into its numeric magnitude
/// and unit name, e.g. `"50keV"` into `(50.0, "keV")`.
///
/// The magnitude is reconstructed from the decimal-digit characters only:
/// any decimal point is discarded, so `"3.5MeV"` yields `35.0`. This
/// digit-only contract matches the upstream metadata convention and is
/// deliberately kept; see the crate tests before changing it. The unit is
/// the concatenation of all alphabetic characters.
///
/// A string without digits yields a magnitude of `0.0`; a string without
/// letters yields an empty unit.
#[must_use]
pub fn split_value_unit(raw: &str) -> (f64, String) {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let unit: String = raw.chars().filter(|c| c.is_ascii_alphabetic()).collect();

    // A string of decimal digits always parses; empty means no digits.
    let value = digits.parse::<f64>().unwrap_or(0.0);
    (value, unit)
}
