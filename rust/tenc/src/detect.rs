//! Heuristic detection of a byte buffer's character encoding.
//!
//! Detection is a pluggable capability: [`Sniffer`] has a single method, so
//! the heuristic library can be swapped without touching the service logic
//! in [`convert`](crate::convert).

/// A best-guess source encoding produced by a [`Sniffer`].
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedEncoding {
    /// Lowercase label of the guessed encoding, e.g. `"utf-8"`.
    pub name: String,
    /// Heuristic confidence in the guess, from 0.0 to 1.0.
    pub confidence: f32,
}

#[cfg(feature = "serde")]
impl serde::Serialize for DetectedEncoding {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("DetectedEncoding", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("confidence", &self.confidence)?;
        state.end()
    }
}

/// Trait for heuristics that guess the encoding of a byte buffer.
pub trait Sniffer {
    /// Guesses the encoding of `bytes`, or returns `None` when the
    /// heuristic cannot produce any candidate.
    fn sniff(&self, bytes: &[u8]) -> Option<DetectedEncoding>;
}

/// The default [`Sniffer`], backed by the statistical detector of the
/// `chardet` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChardetSniffer;

impl Sniffer for ChardetSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<DetectedEncoding> {
        // A byte order mark is unambiguous; statistical detectors handle
        // UTF-16/32 poorly, so don't leave it to them.
        if let Some(name) = bom_label(bytes) {
            return Some(DetectedEncoding {
                name: name.to_owned(),
                confidence: 1.0,
            });
        }
        let (charset, confidence, _language) = chardet::detect(bytes);
        if charset.is_empty() {
            return None;
        }
        // The detector reports charset names; convert to a WHATWG-style
        // label where it knows one.
        let label = chardet::charset2encoding(&charset).to_owned();
        let name = if label.is_empty() { charset } else { label }.to_ascii_lowercase();
        Some(DetectedEncoding { name, confidence })
    }
}

/// The label implied by a leading byte order mark, if any.
///
/// The UTF-32 marks begin with the UTF-16 ones, so they are checked first.
fn bom_label(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xFE, 0x00, 0x00]) {
        Some("utf-32le")
    } else if bytes.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) {
        Some("utf-32be")
    } else if bytes.starts_with(&[0xFF, 0xFE]) {
        Some("utf-16le")
    } else if bytes.starts_with(&[0xFE, 0xFF]) {
        Some("utf-16be")
    } else if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        Some("utf-8-sig")
    } else {
        None
    }
}
