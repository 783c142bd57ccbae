//! File-level re-encoding: the service tying together detection, decoding,
//! and encoding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::decode;
use crate::detect::{ChardetSniffer, DetectedEncoding, Sniffer};
use crate::encode;
use crate::enums::Encoding;
use crate::error::{Error, Result};

/// Re-encodes text files, detecting the source encoding when it isn't
/// supplied.
///
/// Each operation is synchronous and self-contained: the whole input is
/// read, converted in memory, and written with a single call, so no failure
/// path leaves partial output at the destination.
pub struct Recoder {
    sniffer: Box<dyn Sniffer>,
}

impl Recoder {
    /// Creates a new `Recoder` using the default [`ChardetSniffer`]
    /// detection heuristic.
    pub fn new() -> Self {
        Self::with_sniffer(Box::new(ChardetSniffer))
    }

    /// Creates a new `Recoder` with a custom detection heuristic.
    pub fn with_sniffer(sniffer: Box<dyn Sniffer>) -> Self {
        Self { sniffer }
    }

    /// Detects the encoding of the file at `path`.
    ///
    /// An empty file is reported as UTF-8 with confidence 1.0: there are no
    /// bytes to contradict that guess.
    ///
    /// # Errors
    /// Returns [`Error::FileNotFound`] if `path` does not exist,
    /// [`Error::DetectionFailed`] if the heuristic produces no candidate,
    /// and [`Error::Io`] on any other filesystem failure.
    pub fn detect(&self, path: impl AsRef<Path>) -> Result<DetectedEncoding> {
        let path = path.as_ref();
        let bytes = read_input(path)?;
        self.detect_bytes(&bytes)
            .ok_or_else(|| Error::detection_failed(path))
    }

    /// Re-encodes the file at `input` into `encoding` and returns the path
    /// of the written file.
    ///
    /// The source encoding is detected from the file's bytes. The output is
    /// written to `output`, or to [`default_output_path`] next to the input
    /// when `output` is `None`, overwriting any existing file there.
    ///
    /// # Errors
    /// Returns [`Error::FileNotFound`] if `input` does not exist,
    /// [`Error::DetectionFailed`] if no source encoding can be guessed,
    /// [`Error::Decode`] if the input is invalid under the detected source
    /// encoding, [`Error::Encode`] if the text cannot be represented in
    /// `encoding`, and [`Error::Io`] on filesystem failures. No output file
    /// is created on any error.
    pub fn encode_file(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
        encoding: Encoding,
    ) -> Result<PathBuf> {
        self.encode_file_from(input, output, encoding, None)
    }

    /// Re-encodes like [`encode_file`](Self::encode_file), but takes the
    /// source encoding instead of detecting it when `source` is `Some`.
    ///
    /// # Errors
    /// As [`encode_file`](Self::encode_file), except that a supplied source
    /// never produces [`Error::DetectionFailed`].
    pub fn encode_file_from(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
        encoding: Encoding,
        source: Option<Encoding>,
    ) -> Result<PathBuf> {
        let input = input.as_ref();
        let bytes = read_input(input)?;
        log::debug!("read {} bytes from '{}'", bytes.len(), input.display());

        let text = match source {
            Some(source) => decode::decode(source, &bytes)?,
            None => {
                let detected = self
                    .detect_bytes(&bytes)
                    .ok_or_else(|| Error::detection_failed(input))?;
                log::debug!(
                    "detected source encoding {} (confidence {:.2})",
                    detected.name,
                    detected.confidence
                );
                decode::decode_label(&detected.name, &bytes)?
            }
        };
        let encoded = encode::encode(encoding, &text)?;

        let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);
        fs::write(&output, &encoded)
            .map_err(|e| Error::io(e, format!("writing output file '{}'", output.display())))?;
        log::debug!("wrote {} bytes to '{}'", encoded.len(), output.display());
        Ok(output)
    }

    fn detect_bytes(&self, bytes: &[u8]) -> Option<DetectedEncoding> {
        if bytes.is_empty() {
            return Some(DetectedEncoding {
                name: Encoding::Utf8.as_str().to_owned(),
                confidence: 1.0,
            });
        }
        self.sniffer.sniff(bytes)
    }
}

impl Default for Recoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Re-encodes the file at `input` into `encoding` with a default
/// [`Recoder`] and returns the path of the written file.
///
/// # Errors
/// See [`Recoder::encode_file`].
pub fn encode_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    encoding: Encoding,
) -> Result<PathBuf> {
    Recoder::new().encode_file(input, output, encoding)
}

/// Detects the encoding of the file at `path` with a default [`Recoder`]
/// and returns its label.
///
/// # Errors
/// See [`Recoder::detect`].
pub fn get_file_encoding(path: impl AsRef<Path>) -> Result<String> {
    Ok(Recoder::new().detect(path)?.name)
}

/// The output path used when none is supplied: `<stem>_encoded<ext>` next
/// to the input, or `<stem>_encoded` when the input has no extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("_encoded");
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::io(e, format!("reading input file '{}'", path.display())),
    })
}
