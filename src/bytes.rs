//! Byte predicates shared by the JSON, path and arithmetic tokenizers.

use crate::options::KeyCharset;

pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// JSON insignificant whitespace (RFC 8259 `ws`).
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Whether `b` may appear in an unescaped path key.
///
/// `[` and `]` are never key bytes because they delimit array indices.
pub fn is_key_byte(b: u8, charset: KeyCharset) -> bool {
    if b == b'[' || b == b']' {
        return false;
    }
    match charset {
        // Any byte of a multi-byte UTF-8 sequence is accepted so that
        // non-ASCII keys can be addressed without escaping.
        KeyCharset::Alphanumeric => b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80,
        KeyCharset::Legacy => (b'A'..=b'z').contains(&b) || is_digit(b),
    }
}

/// Whether `b` continues an identifier in an arithmetic expression.
///
/// Identifiers are whole path expressions, so dots and index brackets are
/// part of them.
pub fn is_identifier_byte(b: u8, charset: KeyCharset) -> bool {
    is_key_byte(b, charset) || is_digit(b) || matches!(b, b'.' | b'[' | b']')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_key_bytes() {
        for b in [b'a', b'Z', b'0', b'_', 0xC3] {
            assert!(is_key_byte(b, KeyCharset::Alphanumeric), "{:?}", b as char);
        }
        for b in [b'.', b'[', b']', b'\\', b'^', b'`', b' ', b'-'] {
            assert!(!is_key_byte(b, KeyCharset::Alphanumeric), "{:?}", b as char);
        }
    }

    #[test]
    fn test_legacy_range_includes_punctuation_between_cases() {
        for b in [b'\\', b'^', b'_', b'`'] {
            assert!(is_key_byte(b, KeyCharset::Legacy), "{:?}", b as char);
        }
        assert!(!is_key_byte(b'[', KeyCharset::Legacy));
        assert!(!is_key_byte(b']', KeyCharset::Legacy));
        assert!(!is_key_byte(b'{', KeyCharset::Legacy));
    }

    #[test]
    fn test_identifier_bytes_cover_paths() {
        for b in "list2.obj2[0]".bytes() {
            assert!(is_identifier_byte(b, KeyCharset::Alphanumeric));
        }
        for b in "+-*/() ;{}=!".bytes() {
            assert!(!is_identifier_byte(b, KeyCharset::Alphanumeric));
        }
    }
}
