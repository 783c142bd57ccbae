//! Strict encoding of strings into raw bytes under a target [`Encoding`].
//!
//! A character the target codec cannot represent is always an error, never a
//! replacement or numeric character reference, so a conversion aborts rather
//! than writing altered text.

use crate::enums::Encoding;
use crate::error::{Error, Result};

/// Encodes `text` into the byte representation of `encoding`.
///
/// UTF-16 and UTF-32 output is little-endian and starts with a byte order
/// mark; every other encoding is written without one.
///
/// # Errors
/// Returns [`Error::Encode`] if `text` contains a character that `encoding`
/// cannot represent.
pub fn encode(encoding: Encoding, text: &str) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Utf16 => Ok(encode_utf16(text)),
        Encoding::Utf32 => Ok(encode_utf32(text)),
        Encoding::Ascii => encode_ascii(text),
        Encoding::Latin1 => encode_latin1(text),
        Encoding::Windows1252 => encode_with(encoding, encoding_rs::WINDOWS_1252, text),
        Encoding::Big5 => encode_with(encoding, encoding_rs::BIG5, text),
        Encoding::Gb2312 => encode_with(encoding, encoding_rs::GBK, text),
        Encoding::ShiftJis => encode_with(encoding, encoding_rs::SHIFT_JIS, text),
    }
}

fn encode_utf16(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&[0xFF, 0xFE]);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

fn encode_utf32(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + text.len() * 4);
    out.extend_from_slice(&[0xFF, 0xFE, 0x00, 0x00]);
    for ch in text.chars() {
        out.extend_from_slice(&u32::from(ch).to_le_bytes());
    }
    out
}

fn encode_ascii(text: &str) -> Result<Vec<u8>> {
    if let Some(ch) = text.chars().find(|ch| !ch.is_ascii()) {
        return Err(unrepresentable(Encoding::Ascii, ch));
    }
    Ok(text.as_bytes().to_vec())
}

fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let value = u32::from(ch);
        if value > 0xFF {
            return Err(unrepresentable(Encoding::Latin1, ch));
        }
        out.push(value as u8);
    }
    Ok(out)
}

fn encode_with(
    encoding: Encoding,
    codec: &'static encoding_rs::Encoding,
    text: &str,
) -> Result<Vec<u8>> {
    let (bytes, _, had_errors) = codec.encode(text);
    if had_errors {
        return Err(Error::encode(format!(
            "text contains characters not representable in {encoding}"
        )));
    }
    Ok(bytes.into_owned())
}

fn unrepresentable(encoding: Encoding, ch: char) -> Error {
    Error::encode(format!(
        "'{ch}' (U+{:04X}) is not representable in {encoding}",
        u32::from(ch)
    ))
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[test]
    fn test_utf8_is_passthrough_without_bom() {
        assert_eq!(encode(Encoding::Utf8, "héllo").unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_utf16_little_endian_with_bom() {
        let exp = [
            0xFF, 0xFE, // BOM
            b'H', 0x00, b'i', 0x00,
        ];
        assert_eq!(encode(Encoding::Utf16, "Hi").unwrap(), exp);
    }

    #[test]
    fn test_utf16_surrogate_pair() {
        // U+1F30D is encoded as the surrogate pair D83C DF0D
        let exp = [0xFF, 0xFE, 0x3C, 0xD8, 0x0D, 0xDF];
        assert_eq!(encode(Encoding::Utf16, "\u{1F30D}").unwrap(), exp);
    }

    #[test]
    fn test_utf32_little_endian_with_bom() {
        let exp = [
            0xFF, 0xFE, 0x00, 0x00, // BOM
            b'A', 0x00, 0x00, 0x00,
            0x09, 0x66, 0x01, 0x00, // U+16609
        ];
        assert_eq!(encode(Encoding::Utf32, "A\u{16609}").unwrap(), exp);
    }

    #[test]
    fn test_ascii_rejects_non_ascii() {
        assert_eq!(encode(Encoding::Ascii, "plain").unwrap(), b"plain");
        assert!(matches!(
            encode(Encoding::Ascii, "café"),
            Err(Error::Encode(msg)) if msg.contains('é') && msg.contains("U+00E9")
        ));
    }

    #[test]
    fn test_latin1_range() {
        assert_eq!(encode(Encoding::Latin1, "café").unwrap(), [b'c', b'a', b'f', 0xE9]);
        // the euro sign postdates latin-1
        assert!(matches!(
            encode(Encoding::Latin1, "€"),
            Err(Error::Encode(msg)) if msg.contains("U+20AC")
        ));
    }

    #[test]
    fn test_windows1252_has_euro_sign() {
        assert_eq!(encode(Encoding::Windows1252, "€").unwrap(), [0x80]);
    }

    #[test]
    fn test_shift_jis() {
        let exp = [0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD];
        assert_eq!(encode(Encoding::ShiftJis, "こんにちは").unwrap(), exp);
    }

    #[rstest]
    #[case(Encoding::Big5)]
    #[case(Encoding::Gb2312)]
    #[case(Encoding::ShiftJis)]
    fn test_unmappable_character_is_an_error(#[case] encoding: Encoding) {
        // no astral characters in the East Asian code pages
        assert!(matches!(
            encode(encoding, "look: \u{1F30D}"),
            Err(Error::Encode(msg)) if msg.contains(encoding.as_str())
        ));
    }

    #[rstest]
    #[case(Encoding::Utf8)]
    #[case(Encoding::Utf16)]
    #[case(Encoding::Utf32)]
    #[case(Encoding::Ascii)]
    #[case(Encoding::Latin1)]
    #[case(Encoding::Windows1252)]
    #[case(Encoding::Big5)]
    #[case(Encoding::Gb2312)]
    #[case(Encoding::ShiftJis)]
    fn test_ascii_text_round_trips(#[case] encoding: Encoding) {
        let text = "The quick brown fox jumps over the lazy dog. 0123456789";
        let bytes = encode(encoding, text).unwrap();
        assert_eq!(crate::decode::decode(encoding, &bytes).unwrap(), text);
    }
}
