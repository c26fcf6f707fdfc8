//! Record identifiers of the form `<domain>:<name>:<type>`.

use crate::error::{Error, Result};

const SEPARATOR: char = ':';

pub fn encode(domain: &str, name: &str, record_type: &str) -> String {
    format!("{domain}{SEPARATOR}{name}{SEPARATOR}{record_type}")
}

/// Splits a composite identifier back into `(domain, name, type)`.
///
/// An id without any `:` is an opaque id handed over by the host and is
/// returned as `Ok(None)`. Otherwise it must have exactly three non-empty parts.
pub fn decode(id: &str) -> Result<Option<(String, String, String)>> {
    if !id.contains(SEPARATOR) {
        return Ok(None);
    }

    let parts: Vec<&str> = id.split(SEPARATOR).collect();
    match parts.as_slice() {
        [domain, name, record_type]
            if !domain.is_empty() && !name.is_empty() && !record_type.is_empty() =>
        {
            Ok(Some((
                domain.to_string(),
                name.to_string(),
                record_type.to_string(),
            )))
        }
        _ => Err(Error::InvalidIdentifier(id.to_string())),
    }
}

pub fn is_composite(id: &str) -> bool {
    id.contains(SEPARATOR)
}
