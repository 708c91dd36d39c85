//! Decode strategies for [`Cache::get_with`](crate::cache::Cache::get_with).
//!
//! Each strategy turns the raw stored bytes into a typed value. Malformed
//! input is an error; nothing here falls back to a default.

use crate::error::{CacheError, Result};

/// Returns the bytes unchanged.
pub fn raw(bytes: Vec<u8>) -> Result<Vec<u8>> {
    Ok(bytes)
}

/// Decodes UTF-8 text.
pub fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| CacheError::Decode(e.to_string()))
}

/// Decodes a decimal integer.
pub fn integer(bytes: Vec<u8>) -> Result<i64> {
    parse(&bytes)
}

/// Decodes a floating-point number.
pub fn float(bytes: Vec<u8>) -> Result<f64> {
    parse(&bytes)
}

fn parse<T>(bytes: &[u8]) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let text = std::str::from_utf8(bytes).map_err(|e| CacheError::Decode(e.to_string()))?;
    text.trim()
        .parse()
        .map_err(|e| CacheError::Decode(format!("{:?}: {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8() {
        assert_eq!(utf8(b"foo".to_vec()).unwrap(), "foo");
        assert!(matches!(utf8(vec![0xff, 0xfe]), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(b"123".to_vec()).unwrap(), 123);
        assert_eq!(integer(b"-4".to_vec()).unwrap(), -4);
        assert!(matches!(integer(b"12a".to_vec()), Err(CacheError::Decode(_))));
        assert!(matches!(integer(b"1.5".to_vec()), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_float() {
        assert_eq!(float(b"1.5".to_vec()).unwrap(), 1.5);
        assert_eq!(float(b"3".to_vec()).unwrap(), 3.0);
        assert!(matches!(float(b"pi".to_vec()), Err(CacheError::Decode(_))));
    }

    #[test]
    fn test_raw() {
        assert_eq!(raw(vec![0, 1, 2]).unwrap(), vec![0, 1, 2]);
    }
}
