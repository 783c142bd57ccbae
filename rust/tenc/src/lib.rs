//! A crate for reading text files and re-writing them in another
//! [`Encoding`](enums::Encoding), detecting the source encoding when it
//! isn't supplied.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(clippy::missing_errors_doc)]

pub mod convert;
pub mod decode;
pub mod detect;
pub mod encode;
pub mod enums;
pub mod error;

pub use crate::convert::{default_output_path, encode_file, get_file_encoding, Recoder};
pub use crate::detect::{ChardetSniffer, DetectedEncoding, Sniffer};
pub use crate::enums::Encoding;
pub use crate::error::{Error, Result};

/// The target encoding assumed when none is specified.
pub const DEFAULT_ENCODING: Encoding = Encoding::Utf8;
