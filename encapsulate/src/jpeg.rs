//! Inspection of JPEG marker segments.
//!
//! [`read_frame_info`] walks the marker segments of a JPEG stream
//! up to the start of scan,
//! retrieving the image geometry from the first start of frame segment.
//! The entropy-coded data after the start of scan marker is never read.
use byteordered::ByteOrdered;
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::io::{ErrorKind, Read};
use tracing::debug;

/// Marker code prefix
const MARKER_PREFIX: u8 = 0xFF;
/// Start of image
const SOI: u8 = 0xD8;
/// Start of scan
const SOS: u8 = 0xDA;
/// Define Huffman table(s), which shares its code space with SOFn
const DHT: u8 = 0xC4;
/// Define arithmetic coding conditioning(s), also in the SOFn code space
const DAC: u8 = 0xCC;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// JPEG stream does not start with SOI FF
    NotJpeg { backtrace: Backtrace },

    /// Missing SOS segment in JPEG stream
    #[snafu(display(
        "Missing SOS segment in JPEG stream: found byte {:#04X} at position {} instead of a marker",
        found,
        position
    ))]
    MissingStartOfScan {
        position: u64,
        found: u8,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Invalid length {} of segment with marker {:#04X} at position {}",
        length,
        marker,
        position
    ))]
    InvalidSegmentLength {
        marker: u8,
        length: u16,
        position: u64,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Start of frame segment {:#04X} is too short ({} bytes)",
        marker,
        length
    ))]
    ShortFrameHeader {
        marker: u8,
        length: u16,
        backtrace: Backtrace,
    },

    /// Missing SOF segment in JPEG stream
    MissingFrameHeader { backtrace: Backtrace },

    #[snafu(display("Could not read JPEG segment at position {}", position))]
    ReadSegment {
        position: u64,
        source: std::io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// Whether this error was caused by a stream which ended early,
    /// inside of a segment.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::ReadSegment { source, .. } if source.kind() == ErrorKind::UnexpectedEof)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Image properties retrieved from the marker segments of a JPEG stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JpegFrameInfo {
    /// Number of lines
    pub rows: u16,
    /// Number of samples per line
    pub columns: u16,
    /// Sample precision, in bits
    pub precision: u8,
    /// Number of image components in the frame
    pub samples_per_pixel: u8,
    /// The bytes consumed from the stream,
    /// from the start of image marker
    /// up to and including the start of scan marker.
    /// Application segments are not included if they were stripped.
    pub header: Vec<u8>,
    /// The number of bytes of application segments left out of `header`.
    pub bytes_removed: u64,
}

impl JpegFrameInfo {
    /// The photometric interpretation of the decoded image.
    pub fn photometric_interpretation(&self) -> &'static str {
        if self.samples_per_pixel == 3 {
            "YBR_FULL_422"
        } else {
            "MONOCHROME2"
        }
    }

    /// The planar configuration,
    /// only defined for images of 3 components.
    pub fn planar_configuration(&self) -> Option<u16> {
        if self.samples_per_pixel == 3 {
            Some(0)
        } else {
            None
        }
    }

    pub fn bits_allocated(&self) -> u16 {
        if self.precision > 8 {
            16
        } else {
            8
        }
    }

    pub fn bits_stored(&self) -> u16 {
        u16::from(self.precision)
    }

    pub fn high_bit(&self) -> u16 {
        self.bits_stored().saturating_sub(1)
    }

    /// Always unsigned.
    pub fn pixel_representation(&self) -> u16 {
        0
    }

    /// The length of the JPEG stream in its encapsulated form,
    /// given the length of the original stream.
    pub fn effective_length(&self, total_length: u64) -> u64 {
        total_length.saturating_sub(self.bytes_removed)
    }
}

/// Retrieve the frame information of a JPEG stream,
/// reading marker segments until the start of scan marker (inclusive).
///
/// When `strip_app_segments` is true,
/// APPn segments are left out of the returned header
/// and their total size is recorded in `bytes_removed`.
///
/// On success, the reader is positioned
/// at the first byte of entropy-coded data.
pub fn read_frame_info<R>(reader: R, strip_app_segments: bool) -> Result<JpegFrameInfo>
where
    R: Read,
{
    let mut reader = SegmentReader {
        inner: reader,
        position: 0,
    };

    let mut start = [0u8; 3];
    match reader.inner.read_exact(&mut start) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return NotJpegSnafu.fail(),
        Err(e) => return Err(e).context(ReadSegmentSnafu { position: 0_u64 }),
    }
    reader.position = 3;
    ensure!(start == [MARKER_PREFIX, SOI, MARKER_PREFIX], NotJpegSnafu);

    let mut header = Vec::with_capacity(8192);
    header.extend_from_slice(&[MARKER_PREFIX, SOI]);
    let mut bytes_removed = 0_u64;
    let mut frame: Option<(u8, u16, u16, u8)> = None;

    let mut marker = reader.read_u8()?;
    loop {
        // fill bytes
        while marker == MARKER_PREFIX {
            header.push(MARKER_PREFIX);
            marker = reader.read_u8()?;
        }
        if marker == SOS {
            header.extend_from_slice(&[MARKER_PREFIX, SOS]);
            break;
        }

        let segment_position = reader.position - 2;
        let length = reader.read_u16()?;
        ensure!(
            length >= 2,
            InvalidSegmentLengthSnafu {
                marker,
                length,
                position: segment_position,
            }
        );
        let mut payload = vec![0; usize::from(length - 2)];
        reader.read_exact(&mut payload)?;

        if is_start_of_frame(marker) && frame.is_none() {
            ensure!(payload.len() >= 6, ShortFrameHeaderSnafu { marker, length });
            let precision = payload[0];
            let rows = u16::from_be_bytes([payload[1], payload[2]]);
            let columns = u16::from_be_bytes([payload[3], payload[4]]);
            let components = payload[5];
            debug!(
                "JPEG SOF{} frame: {}x{}, {} bits, {} components",
                marker & 0x0F,
                columns,
                rows,
                precision,
                components
            );
            frame = Some((precision, rows, columns, components));
        }

        if strip_app_segments && is_app_segment(marker) {
            debug!(
                "Stripping APP{} segment of {} bytes at position {}",
                marker & 0x0F,
                u64::from(length) + 2,
                segment_position
            );
            bytes_removed += u64::from(length) + 2;
        } else {
            header.extend_from_slice(&[MARKER_PREFIX, marker]);
            header.extend_from_slice(&length.to_be_bytes());
            header.extend_from_slice(&payload);
        }

        let prefix = reader.read_u8()?;
        ensure!(
            prefix == MARKER_PREFIX,
            MissingStartOfScanSnafu {
                position: reader.position - 1,
                found: prefix,
            }
        );
        marker = reader.read_u8()?;
    }

    let (precision, rows, columns, samples_per_pixel) =
        frame.context(MissingFrameHeaderSnafu)?;

    Ok(JpegFrameInfo {
        rows,
        columns,
        precision,
        samples_per_pixel,
        header,
        bytes_removed,
    })
}

/// Whether the marker is one of SOF0 to SOF15
/// (excluding DHT and DAC, which share the same code space).
fn is_start_of_frame(marker: u8) -> bool {
    marker & 0xF0 == 0xC0 && marker != DHT && marker != DAC
}

/// Whether the marker is one of APP0 to APP15.
fn is_app_segment(marker: u8) -> bool {
    marker & 0xF0 == 0xE0
}

/// A reader which keeps track of its position, for error reporting.
struct SegmentReader<R> {
    inner: R,
    position: u64,
}

impl<R: Read> SegmentReader<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let v = ByteOrdered::be(&mut self.inner)
            .read_u8()
            .context(ReadSegmentSnafu {
                position: self.position,
            })?;
        self.position += 1;
        Ok(v)
    }

    fn read_u16(&mut self) -> Result<u16> {
        let v = ByteOrdered::be(&mut self.inner)
            .read_u16()
            .context(ReadSegmentSnafu {
                position: self.position,
            })?;
        self.position += 2;
        Ok(v)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).context(ReadSegmentSnafu {
            position: self.position,
        })?;
        self.position += buf.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rstest::rstest;

    /// Build a segment with the given marker and payload.
    pub(crate) fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0xFF, marker];
        out.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
        out.extend_from_slice(payload);
        out
    }

    /// Build a start of frame payload.
    pub(crate) fn sof_payload(precision: u8, rows: u16, columns: u16, components: u8) -> Vec<u8> {
        let mut out = vec![precision];
        out.extend_from_slice(&rows.to_be_bytes());
        out.extend_from_slice(&columns.to_be_bytes());
        out.push(components);
        for i in 0..components {
            out.extend_from_slice(&[i + 1, 0x11, 0]);
        }
        out
    }

    /// Build a small baseline JPEG stream:
    /// SOI, APP0, DQT, SOF0, SOS + some entropy-coded bytes, EOI.
    pub(crate) fn sample_jpeg(precision: u8, rows: u16, columns: u16, components: u8) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        out.extend(segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0"));
        out.extend(segment(0xDB, &[0; 65]));
        out.extend(segment(0xC0, &sof_payload(precision, rows, columns, components)));
        out.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
        out.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0x56, 0xFF, 0xD9]);
        out
    }

    #[rstest]
    #[case(8, 480, 640, 3, "YBR_FULL_422", Some(0), 8, 7)]
    #[case(12, 512, 256, 1, "MONOCHROME2", None, 16, 11)]
    #[case(8, 1, 1, 1, "MONOCHROME2", None, 8, 7)]
    #[allow(clippy::too_many_arguments)]
    fn frame_derived_values(
        #[case] precision: u8,
        #[case] rows: u16,
        #[case] columns: u16,
        #[case] components: u8,
        #[case] photometric: &str,
        #[case] planar: Option<u16>,
        #[case] bits_allocated: u16,
        #[case] high_bit: u16,
    ) {
        let data = sample_jpeg(precision, rows, columns, components);
        let info = read_frame_info(&data[..], false).unwrap();
        assert_eq!(info.rows, rows);
        assert_eq!(info.columns, columns);
        assert_eq!(info.samples_per_pixel, components);
        assert_eq!(info.photometric_interpretation(), photometric);
        assert_eq!(info.planar_configuration(), planar);
        assert_eq!(info.bits_allocated(), bits_allocated);
        assert_eq!(info.bits_stored(), u16::from(precision));
        assert_eq!(info.high_bit(), high_bit);
        assert_eq!(info.pixel_representation(), 0);
    }

    #[test]
    fn header_ends_right_after_start_of_scan_marker() {
        let data = sample_jpeg(8, 16, 16, 3);
        let mut reader = &data[..];
        let info = read_frame_info(&mut reader, false).unwrap();
        assert_eq!(info.bytes_removed, 0);
        assert_eq!(&info.header[info.header.len() - 2..], &[0xFF, 0xDA]);
        // header and the remaining bytes make up the whole stream
        let mut rebuilt = info.header.clone();
        rebuilt.extend_from_slice(reader);
        assert_eq!(rebuilt, data);
    }

    #[test]
    fn strip_app_segments() {
        let app0 = segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0");
        let app1 = segment(0xE1, &[0xAB; 40]);
        let dqt = segment(0xDB, &[0; 65]);
        let sof = segment(0xC0, &sof_payload(8, 8, 8, 1));
        let mut data = vec![0xFF, 0xD8];
        data.extend(&app0);
        data.extend(&dqt);
        data.extend(&app1);
        data.extend(&sof);
        data.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
        data.extend_from_slice(&[0x01, 0x02, 0x03]);

        let mut reader = &data[..];
        let info = read_frame_info(&mut reader, true).unwrap();
        assert_eq!(info.bytes_removed, (app0.len() + app1.len()) as u64);
        assert_eq!(
            info.effective_length(data.len() as u64),
            (data.len() - app0.len() - app1.len()) as u64
        );

        let mut expected = vec![0xFF, 0xD8];
        expected.extend(&dqt);
        expected.extend(&sof);
        expected.extend_from_slice(&[0xFF, 0xDA]);
        assert_eq!(info.header, expected);
        // positioned right after the SOS marker:
        // SOS length and payload, then the entropy-coded data
        assert_eq!(reader.len(), 2 + 6 + 3);
    }

    #[test]
    fn app_segments_kept_without_stripping() {
        let data = sample_jpeg(8, 8, 8, 1);
        let info = read_frame_info(&data[..], false).unwrap();
        assert_eq!(info.bytes_removed, 0);
        assert_eq!(&info.header[2..4], &[0xFF, 0xE0]);
    }

    #[test]
    fn huffman_table_is_not_a_frame_header() {
        let mut data = vec![0xFF, 0xD8];
        // DHT with 6+ bytes of payload
        data.extend(segment(0xC4, &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]));
        data.extend(segment(0xC2, &sof_payload(8, 20, 30, 1)));
        data.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
        let info = read_frame_info(&data[..], false).unwrap();
        assert_eq!((info.rows, info.columns), (20, 30));
    }

    #[test]
    fn first_frame_header_wins() {
        let mut data = vec![0xFF, 0xD8];
        data.extend(segment(0xC0, &sof_payload(8, 10, 10, 1)));
        data.extend(segment(0xC1, &sof_payload(12, 99, 99, 3)));
        data.extend(segment(0xDA, &[]));
        let info = read_frame_info(&data[..], false).unwrap();
        assert_eq!((info.rows, info.precision), (10, 8));
    }

    #[test]
    fn not_jpeg() {
        let err = read_frame_info(&b"\x89PNG\r\n\x1a\n"[..], false).unwrap_err();
        assert!(matches!(err, Error::NotJpeg { .. }));
        assert_eq!(err.to_string(), "JPEG stream does not start with SOI FF");

        // SOI not followed by another marker
        let err = read_frame_info(&[0xFF, 0xD8, 0x00, 0x10][..], false).unwrap_err();
        assert!(matches!(err, Error::NotJpeg { .. }));

        let err = read_frame_info(&[0xFF][..], false).unwrap_err();
        assert!(matches!(err, Error::NotJpeg { .. }));
    }

    #[test]
    fn missing_frame_header() {
        let mut data = vec![0xFF, 0xD8];
        data.extend(segment(0xE0, b"JFIF\0"));
        data.extend(segment(0xDA, &[]));
        let err = read_frame_info(&data[..], false).unwrap_err();
        assert!(matches!(err, Error::MissingFrameHeader { .. }));
    }

    #[test]
    fn missing_start_of_scan() {
        let mut data = vec![0xFF, 0xD8];
        data.extend(segment(0xC0, &sof_payload(8, 10, 10, 1)));
        data.push(0x00);
        let err = read_frame_info(&data[..], false).unwrap_err();
        assert!(matches!(err, Error::MissingStartOfScan { found: 0x00, .. }));
    }

    #[test]
    fn truncated_segment() {
        let mut data = vec![0xFF, 0xD8];
        data.extend(segment(0xC0, &sof_payload(8, 10, 10, 1)));
        data.truncate(data.len() - 3);
        let err = read_frame_info(&data[..], false).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn invalid_segment_length() {
        let data = [0xFF, 0xD8, 0xFF, 0xDB, 0x00, 0x01, 0x00];
        let err = read_frame_info(&data[..], false).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSegmentLength {
                marker: 0xDB,
                length: 1,
                position: 2,
                ..
            }
        ));
    }

    #[test]
    fn short_frame_header() {
        let mut data = vec![0xFF, 0xD8];
        data.extend(segment(0xC0, &[8, 0, 1]));
        data.extend(segment(0xDA, &[]));
        let err = read_frame_info(&data[..], false).unwrap_err();
        assert!(matches!(err, Error::ShortFrameHeader { length: 5, .. }));
    }
}
