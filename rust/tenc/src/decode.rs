//! Strict decoding of raw bytes into strings. The source encoding is either
//! one of the supported [`Encoding`]s or a label produced by a
//! [`Sniffer`](crate::detect::Sniffer).
//!
//! Malformed input is always an error, never a U+FFFD substitution, so a
//! conversion aborts rather than silently corrupting text.

use crate::enums::Encoding;
use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Byte order of a UTF-16 or UTF-32 stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

/// Decodes `bytes` as `encoding` into a string.
///
/// A byte order mark matching `encoding` is stripped. UTF-16 and UTF-32
/// input without a byte order mark is decoded as little-endian.
///
/// # Errors
/// Returns [`Error::Decode`] if `bytes` is not valid under `encoding`.
pub fn decode(encoding: Encoding, bytes: &[u8]) -> Result<String> {
    match encoding {
        Encoding::Utf8 => decode_utf8(bytes),
        Encoding::Utf16 => decode_utf16(bytes, None),
        Encoding::Utf32 => decode_utf32(bytes, None),
        Encoding::Ascii => decode_ascii(bytes),
        Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        Encoding::Windows1252 => decode_with(encoding_rs::WINDOWS_1252, bytes),
        Encoding::Big5 => decode_with(encoding_rs::BIG5, bytes),
        Encoding::Gb2312 => decode_with(encoding_rs::GBK, bytes),
        Encoding::ShiftJis => decode_with(encoding_rs::SHIFT_JIS, bytes),
    }
}

/// Decodes `bytes` under any encoding label a sniffer can produce.
///
/// Labels naming a supported [`Encoding`] take the codepaths of [`decode`].
/// Endianness-qualified Unicode labels (`utf-16le`, `utf-16be`, `utf-32le`,
/// `utf-32be`) and `utf-8-sig` are handled directly; any other label is
/// resolved through the WHATWG registry of `encoding_rs`, so a successfully
/// sniffed file outside the supported set still decodes.
///
/// # Errors
/// Returns [`Error::UnsupportedEncoding`] when no codec is known for
/// `label` and [`Error::Decode`] when `bytes` is invalid under it.
pub fn decode_label(label: &str, bytes: &[u8]) -> Result<String> {
    if let Ok(encoding) = label.parse::<Encoding>() {
        return decode(encoding, bytes);
    }
    match label.to_ascii_lowercase().as_str() {
        "utf-8-sig" => decode_utf8(bytes),
        "utf-16le" => decode_utf16(bytes, Some(ByteOrder::Little)),
        "utf-16be" => decode_utf16(bytes, Some(ByteOrder::Big)),
        "utf-32le" => decode_utf32(bytes, Some(ByteOrder::Little)),
        "utf-32be" => decode_utf32(bytes, Some(ByteOrder::Big)),
        _ => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(codec) => {
                let text = decode_with(codec, bytes)?;
                Ok(match text.strip_prefix('\u{feff}') {
                    Some(stripped) => stripped.to_owned(),
                    None => text,
                })
            }
            None => Err(Error::unsupported_encoding(label)),
        },
    }
}

fn decode_with(codec: &'static encoding_rs::Encoding, bytes: &[u8]) -> Result<String> {
    match codec.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text.into_owned()),
        None => Err(Error::decode(format!(
            "input is not valid {}",
            codec.name()
        ))),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => Ok(text.to_owned()),
        Err(e) => Err(Error::decode(format!(
            "input is not valid UTF-8: invalid byte at offset {}",
            e.valid_up_to()
        ))),
    }
}

fn decode_ascii(bytes: &[u8]) -> Result<String> {
    if let Some(pos) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(Error::decode(format!(
            "byte 0x{:02X} at offset {pos} is outside ASCII",
            bytes[pos]
        )));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn decode_utf16(bytes: &[u8], order: Option<ByteOrder>) -> Result<String> {
    let (order, body) = match order {
        // Explicit byte order: strip a matching BOM if one is present.
        Some(ByteOrder::Little) => (
            ByteOrder::Little,
            bytes.strip_prefix(&[0xFF, 0xFE][..]).unwrap_or(bytes),
        ),
        Some(ByteOrder::Big) => (
            ByteOrder::Big,
            bytes.strip_prefix(&[0xFE, 0xFF][..]).unwrap_or(bytes),
        ),
        // No byte order given: sniff the BOM, default to little-endian.
        None => match bytes {
            [0xFF, 0xFE, rest @ ..] => (ByteOrder::Little, rest),
            [0xFE, 0xFF, rest @ ..] => (ByteOrder::Big, rest),
            _ => (ByteOrder::Little, bytes),
        },
    };
    if body.len() % 2 != 0 {
        return Err(Error::decode(format!(
            "UTF-16 input has an odd length of {} bytes",
            body.len()
        )));
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| match order {
            ByteOrder::Little => u16::from_le_bytes([pair[0], pair[1]]),
            ByteOrder::Big => u16::from_be_bytes([pair[0], pair[1]]),
        })
        .collect();
    String::from_utf16(&units)
        .map_err(|_| Error::decode("UTF-16 input contains an unpaired surrogate"))
}

fn decode_utf32(bytes: &[u8], order: Option<ByteOrder>) -> Result<String> {
    let (order, body) = match order {
        Some(ByteOrder::Little) => (
            ByteOrder::Little,
            bytes
                .strip_prefix(&[0xFF, 0xFE, 0x00, 0x00][..])
                .unwrap_or(bytes),
        ),
        Some(ByteOrder::Big) => (
            ByteOrder::Big,
            bytes
                .strip_prefix(&[0x00, 0x00, 0xFE, 0xFF][..])
                .unwrap_or(bytes),
        ),
        None => match bytes {
            [0xFF, 0xFE, 0x00, 0x00, rest @ ..] => (ByteOrder::Little, rest),
            [0x00, 0x00, 0xFE, 0xFF, rest @ ..] => (ByteOrder::Big, rest),
            _ => (ByteOrder::Little, bytes),
        },
    };
    if body.len() % 4 != 0 {
        return Err(Error::decode(format!(
            "UTF-32 input has a length of {} bytes, not a multiple of 4",
            body.len()
        )));
    }
    body.chunks_exact(4)
        .map(|quad| {
            let value = match order {
                ByteOrder::Little => u32::from_le_bytes([quad[0], quad[1], quad[2], quad[3]]),
                ByteOrder::Big => u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]),
            };
            char::from_u32(value).ok_or_else(|| {
                Error::decode(format!("0x{value:08X} is not a valid Unicode scalar value"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[test]
    fn test_utf8_plain() {
        assert_eq!(decode(Encoding::Utf8, "héllo".as_bytes()).unwrap(), "héllo");
    }

    #[test]
    fn test_utf8_strips_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"hello");
        assert_eq!(decode(Encoding::Utf8, &bytes).unwrap(), "hello");
    }

    #[test]
    fn test_utf8_invalid_byte() {
        assert!(matches!(
            decode(Encoding::Utf8, &[b'a', 0xFF, b'b']),
            Err(Error::Decode(msg)) if msg.contains("offset 1")
        ));
    }

    #[rstest]
    #[case(&[0xFF, 0xFE, b'H', 0x00, b'i', 0x00], "Hi")] // LE with BOM
    #[case(&[0xFE, 0xFF, 0x00, b'H', 0x00, b'i'], "Hi")] // BE with BOM
    #[case(&[b'H', 0x00, b'i', 0x00], "Hi")] // no BOM defaults to LE
    fn test_utf16(#[case] bytes: &[u8], #[case] exp: &str) {
        assert_eq!(decode(Encoding::Utf16, bytes).unwrap(), exp);
    }

    #[test]
    fn test_utf16_odd_length() {
        assert!(matches!(
            decode(Encoding::Utf16, &[0x41, 0x00, 0x42]),
            Err(Error::Decode(msg)) if msg.contains("odd")
        ));
    }

    #[test]
    fn test_utf16_unpaired_surrogate() {
        // 0xD800 is a lone high surrogate
        assert!(matches!(
            decode(Encoding::Utf16, &[0x00, 0xD8]),
            Err(Error::Decode(msg)) if msg.contains("surrogate")
        ));
    }

    #[rstest]
    #[case(&[0xFF, 0xFE, 0x00, 0x00, b'A', 0x00, 0x00, 0x00], "A")]
    #[case(&[0x00, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x00, b'A'], "A")]
    #[case(&[0x09, 0x66, 0x01, 0x00], "\u{16609}")] // no BOM defaults to LE
    fn test_utf32(#[case] bytes: &[u8], #[case] exp: &str) {
        assert_eq!(decode(Encoding::Utf32, bytes).unwrap(), exp);
    }

    #[test]
    fn test_utf32_invalid_scalar() {
        // 0x00110000 is beyond the last Unicode scalar value
        assert!(matches!(
            decode(Encoding::Utf32, &[0x00, 0x00, 0x11, 0x00]),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_utf32_bad_length() {
        assert!(matches!(
            decode(Encoding::Utf32, &[0x41, 0x00, 0x00]),
            Err(Error::Decode(msg)) if msg.contains("multiple of 4")
        ));
    }

    #[test]
    fn test_ascii() {
        assert_eq!(decode(Encoding::Ascii, b"plain text").unwrap(), "plain text");
        assert!(matches!(
            decode(Encoding::Ascii, &[b'c', b'a', b'f', 0xE9]),
            Err(Error::Decode(msg)) if msg.contains("0xE9") && msg.contains("offset 3")
        ));
    }

    #[test]
    fn test_latin1_maps_every_byte() {
        assert_eq!(decode(Encoding::Latin1, &[b'c', b'a', b'f', 0xE9]).unwrap(), "café");
        assert_eq!(decode(Encoding::Latin1, &[0x80]).unwrap(), "\u{80}");
    }

    #[test]
    fn test_windows1252_c1_range() {
        // 0x80 is the euro sign in windows-1252, unlike latin-1
        assert_eq!(decode(Encoding::Windows1252, &[0x80]).unwrap(), "€");
    }

    #[test]
    fn test_shift_jis() {
        // "こんにちは" in Shift JIS
        let bytes = [0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD];
        assert_eq!(decode(Encoding::ShiftJis, &bytes).unwrap(), "こんにちは");
    }

    #[test]
    fn test_shift_jis_malformed() {
        // 0x82 starts a two-byte sequence; 0xFF can't complete it
        assert!(matches!(
            decode(Encoding::ShiftJis, &[0x82, 0xFF, 0x82]),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_gb2312_uses_gbk_codec() {
        // "中文" in GB 2312
        let bytes = [0xD6, 0xD0, 0xCE, 0xC4];
        assert_eq!(decode(Encoding::Gb2312, &bytes).unwrap(), "中文");
    }

    #[rstest]
    #[case("utf-16le", &[0xFF, 0xFE, b'H', 0x00, b'i', 0x00], "Hi")]
    #[case("utf-16le", &[b'H', 0x00, b'i', 0x00], "Hi")]
    #[case("utf-16be", &[0x00, b'H', 0x00, b'i'], "Hi")]
    #[case("utf-32le", &[b'A', 0x00, 0x00, 0x00], "A")]
    #[case("UTF-8-SIG", &[0xEF, 0xBB, 0xBF, b'h', b'i'], "hi")]
    fn test_decode_label_unicode_variants(
        #[case] label: &str,
        #[case] bytes: &[u8],
        #[case] exp: &str,
    ) {
        assert_eq!(decode_label(label, bytes).unwrap(), exp);
    }

    #[test]
    fn test_decode_label_foreign_encoding() {
        // "Привет" in windows-1251, outside the supported target set but
        // still decodable as a sniffed source
        let bytes = [0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        assert_eq!(decode_label("windows-1251", &bytes).unwrap(), "Привет");
    }

    #[test]
    fn test_decode_label_unknown() {
        assert!(matches!(
            decode_label("not-a-codec", b"abc"),
            Err(Error::UnsupportedEncoding(l)) if l == "not-a-codec"
        ));
    }
}
