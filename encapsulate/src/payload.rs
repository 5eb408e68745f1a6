//! Payload kinds and sources.
use crate::error::{OpenPayloadSnafu, Result};
use dicomize_dictionary_std::uids;
use snafu::ResultExt;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The kind of compressed payload to encapsulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    /// A PDF document, written as an Encapsulated PDF object
    Document,
    /// A baseline JPEG image
    Jpeg {
        /// Whether to remove the application segments (APP0 to APP15)
        /// from the JPEG stream
        strip_app_segments: bool,
    },
    /// An MPEG2 Main Profile / Main Level video stream
    Mpeg2,
}

impl PayloadKind {
    /// The transfer syntax UID of files holding this kind of payload.
    pub fn transfer_syntax(self) -> &'static str {
        match self {
            PayloadKind::Document => uids::EXPLICIT_VR_LITTLE_ENDIAN,
            PayloadKind::Jpeg { .. } => uids::JPEG_BASELINE8_BIT,
            PayloadKind::Mpeg2 => uids::MPEG2MPML,
        }
    }

    /// Whether the payload is written as encapsulated pixel data.
    pub fn is_image(self) -> bool {
        !matches!(self, PayloadKind::Document)
    }

    /// Guess the payload kind from a file's extension.
    ///
    /// JPEG application segments are kept.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "jpe" => Some(PayloadKind::Jpeg {
                strip_app_segments: false,
            }),
            "mpg" | "mpeg" | "m2v" | "mpv" => Some(PayloadKind::Mpeg2),
            "pdf" => Some(PayloadKind::Document),
            _ => None,
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PayloadKind::Document => "PDF",
            PayloadKind::Jpeg { .. } => "JPEG",
            PayloadKind::Mpeg2 => "MPEG2",
        })
    }
}

/// The error returned when a payload kind name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePayloadKindError(String);

impl fmt::Display for ParsePayloadKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown payload kind `{}` (expected jpeg, mpeg2 or pdf)",
            self.0
        )
    }
}

impl std::error::Error for ParsePayloadKindError {}

impl FromStr for PayloadKind {
    type Err = ParsePayloadKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(PayloadKind::Jpeg {
                strip_app_segments: false,
            }),
            "mpeg2" | "mpeg" | "mpg" => Ok(PayloadKind::Mpeg2),
            "pdf" | "document" => Ok(PayloadKind::Document),
            _ => Err(ParsePayloadKindError(s.to_string())),
        }
    }
}

/// A payload source: a reader of the compressed stream,
/// its length in bytes,
/// and optionally the file which it comes from.
///
/// Documents must be backed by a file,
/// since they are streamed from it when the data set is written.
#[derive(Debug)]
pub struct Payload<R> {
    pub(crate) reader: R,
    pub(crate) length: u64,
    pub(crate) path: Option<PathBuf>,
}

impl<R> Payload<R>
where
    R: Read,
{
    /// Create a payload from a reader and the exact number of bytes
    /// which it will provide.
    pub fn new(reader: R, length: u64) -> Self {
        Payload {
            reader,
            length,
            path: None,
        }
    }

    /// Declare the file which the payload comes from.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The length of the payload in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    /// Whether the payload has no bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The file which the payload comes from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Payload<BufReader<File>> {
    /// Open a payload file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).context(OpenPayloadSnafu { path })?;
        let length = file
            .metadata()
            .context(OpenPayloadSnafu { path })?
            .len();
        Ok(Payload {
            reader: BufReader::new(file),
            length,
            path: Some(path.to_path_buf()),
        })
    }
}
