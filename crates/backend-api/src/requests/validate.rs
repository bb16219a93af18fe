//! Request-construction guards. Each returns the caller-facing message of the
//! first rule a parameter breaks; nothing here touches the network.

use common::error::{Error, Result};

pub fn require_present<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::validation(format!(
            "{field} value is expected but is missing"
        )));
    }
    Ok(value)
}

/// `.` and `..` would be resolved away even when percent-encoded.
pub fn require_path_segment(field: &str, value: &str) -> Result<()> {
    if value == "." || value == ".." {
        return Err(Error::validation(format!(
            "{field} should not be a relative path"
        )));
    }
    Ok(())
}

pub fn require_comma_separated_numbers(field: &str, value: &str) -> Result<()> {
    let valid = value
        .split(',')
        .all(|item| !item.is_empty() && item.bytes().all(|b| b.is_ascii_digit()));
    if !valid {
        return Err(Error::validation(format!(
            "{field} should be comma separated numbers"
        )));
    }
    Ok(())
}

pub fn parse_number(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::validation(format!("{field} has to be a number")))
}

pub fn require_positive(field: &str, value: i64) -> Result<u64> {
    if value <= 0 {
        return Err(Error::validation(format!("{field} has to be positive")));
    }
    Ok(value as u64)
}
