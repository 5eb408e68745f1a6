//! Error types of the encapsulation process.
use crate::jpeg;
use dicomize_object::{WithMetaError, WriteError};
use snafu::{Backtrace, Snafu};
use std::path::PathBuf;

/// The broad category of an encapsulation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The payload is not a well-formed stream of its kind:
    /// a JPEG stream not starting with a start of image marker,
    /// without a start of scan marker,
    /// or ending in the middle of a segment.
    StreamFormat,
    /// The JPEG stream has no start of frame segment
    /// before the start of scan.
    MissingFrameHeader,
    /// Reading the payload or writing the destination failed.
    Io,
    /// The inputs do not fulfill the contract of the operation,
    /// such as a document payload which does not come from a file,
    /// or a data set from which no file meta group can be built.
    InvalidState,
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Could not inspect the JPEG header
    InspectJpeg {
        #[snafu(backtrace)]
        source: jpeg::Error,
    },

    #[snafu(display("Could not open payload file '{}'", path.display()))]
    OpenPayload {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Document payloads must be backed by a file
    DocumentWithoutFile { backtrace: Backtrace },

    /// Could not create the file meta group
    BuildMeta {
        #[snafu(backtrace)]
        source: WithMetaError,
    },

    #[snafu(display("Payload of {} bytes cannot be encapsulated in a single fragment", length))]
    PayloadTooLong { length: u64, backtrace: Backtrace },

    #[snafu(display("Could not create file '{}'", path.display()))]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Could not write the file header
    WriteHeader {
        #[snafu(backtrace)]
        source: WriteError,
    },

    /// Could not write the data set
    WriteDataSet {
        #[snafu(backtrace)]
        source: WriteError,
    },

    /// Could not write the encapsulated pixel data
    WritePixelData {
        #[snafu(backtrace)]
        source: dicomize_encoding::stateful::Error,
    },

    #[snafu(display(
        "Payload length mismatch: {} bytes were announced, but the source {}",
        announced,
        if *longer { "has more data" } else { "ended early" }
    ))]
    PayloadLengthMismatch {
        announced: u64,
        longer: bool,
        backtrace: Backtrace,
    },

    /// Could not read the payload
    ReadPayload {
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Could not flush the destination
    Flush {
        #[snafu(backtrace)]
        source: dicomize_encoding::stateful::Error,
    },
}

impl Error {
    /// Obtain the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InspectJpeg { source } => match source {
                jpeg::Error::MissingFrameHeader { .. } => ErrorKind::MissingFrameHeader,
                jpeg::Error::ReadSegment { .. } if !source.is_truncated() => ErrorKind::Io,
                _ => ErrorKind::StreamFormat,
            },
            Error::DocumentWithoutFile { .. }
            | Error::BuildMeta { .. }
            | Error::PayloadTooLong { .. } => ErrorKind::InvalidState,
            Error::WriteHeader { source } | Error::WriteDataSet { source } => {
                if source.is_io() {
                    ErrorKind::Io
                } else {
                    ErrorKind::InvalidState
                }
            }
            Error::WritePixelData { source } => match source {
                dicomize_encoding::stateful::Error::ValueTooLong { .. } => ErrorKind::InvalidState,
                _ => ErrorKind::Io,
            },
            Error::OpenPayload { .. }
            | Error::CreateFile { .. }
            | Error::PayloadLengthMismatch { .. }
            | Error::ReadPayload { .. }
            | Error::Flush { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
