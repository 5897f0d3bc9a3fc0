//! Brazilian postal code (CEP) validation and normalization

use std::fmt;

use crate::{CepWeatherError, Result};

/// Number of digits in a normalized CEP
pub const CEP_DIGITS: usize = 8;

/// Strip every character that is not an ASCII decimal digit
#[must_use]
pub fn normalize_cep(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Check the CEP format: exactly eight digits once separators are discarded.
///
/// No range or checksum validation is done, `99999999` is a valid format.
#[must_use]
pub fn is_valid_cep(input: &str) -> bool {
    input.chars().filter(char::is_ascii_digit).count() == CEP_DIGITS
}

/// A validated, digit-only postal code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate and normalize a raw postal code
    pub fn parse(input: &str) -> Result<Self> {
        if !is_valid_cep(input) {
            return Err(CepWeatherError::validation(format!(
                "'{input}' is not an {CEP_DIGITS}-digit postal code"
            )));
        }
        Ok(Self(normalize_cep(input)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
