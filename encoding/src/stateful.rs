//! Module holding a stateful DICOM data encoding abstraction.
//!
//! The [`StatefulEncoder`] supports encoding of binary data and text
//! while applying the necessary padding to conform to DICOM encoding rules.
//! It can also copy value data from another byte source,
//! such as a payload file, without holding it in memory.

use crate::encode::Encode;
use dicomize_core::{value::PrimitiveValue, DataElementHeader, Length, VR};
use snafu::{ensure, Backtrace, ResultExt, Snafu};
use std::io::{Read, Write};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to encode a data piece at position {}", position))]
    EncodeData {
        position: u64,
        source: crate::encode::Error,
    },

    #[snafu(display("Could not write value data at position {}", position))]
    WriteValueData {
        position: u64,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read value data to write at position {}", position))]
    ReadValueData {
        position: u64,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Value data source ended early at position {}: expected {} bytes, got {}",
        position,
        expected,
        got
    ))]
    UnexpectedEndOfValueData {
        position: u64,
        expected: u64,
        got: u64,
        backtrace: Backtrace,
    },

    #[snafu(display("Value of {} bytes is too long for its element header", len))]
    ValueTooLong { len: usize, backtrace: Backtrace },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Also called a printer, this encoder type provides a stateful mid-level
/// abstraction for writing DICOM content. Unlike `Encode`,
/// the stateful encoder knows how to pad values to an even length
/// and keeps track of how many bytes were written.
/// `W` is the write target and `E` is the encoder.
#[derive(Debug)]
pub struct StatefulEncoder<W, E> {
    to: W,
    encoder: E,
    bytes_written: u64,
    buffer: Vec<u8>,
}

impl<W, E> StatefulEncoder<W, E> {
    pub fn new(to: W, encoder: E) -> Self {
        StatefulEncoder {
            to,
            encoder,
            bytes_written: 0,
            buffer: Vec::with_capacity(128),
        }
    }

    /// Retrieve the number of bytes written so far by this printer.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Retrieve the inner writer, discarding the encoder.
    pub fn into_inner(self) -> W {
        self.to
    }
}

impl<W, E> StatefulEncoder<W, E>
where
    W: Write,
    E: Encode,
{
    /// Encode and write a data element header.
    ///
    /// A defined length is rounded up to the next even number.
    pub fn encode_element_header(&mut self, mut de: DataElementHeader) -> Result<()> {
        if let Some(len) = de.len.get() {
            de.len = Length(even_len(len))
        }
        let bytes = self
            .encoder
            .encode_element_header(&mut self.to, de)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += bytes as u64;
        Ok(())
    }

    /// Encode and write an item header,
    /// where `len` is the specified length of the item
    /// (can be `0xFFFF_FFFF` for undefined length).
    pub fn encode_item_header(&mut self, len: u32) -> Result<()> {
        let len = if len == 0xFFFF_FFFF {
            len
        } else {
            even_len(len)
        };
        self.encoder
            .encode_item_header(&mut self.to, len)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write a sequence delimiter.
    pub fn encode_sequence_delimiter(&mut self) -> Result<()> {
        self.encoder
            .encode_sequence_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Write the given bytes directly to the inner writer.
    ///
    /// Note that this method
    /// (unlike [`write_bytes`](StatefulEncoder::write_bytes))
    /// does not perform any additional padding.
    pub fn write_raw_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.to.write_all(bytes).context(WriteValueDataSnafu {
            position: self.bytes_written,
        })?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Write a primitive DICOM value as a bunch of bytes
    /// directly to the inner writer.
    ///
    /// This method will perform the necessary padding
    /// (always with zeros)
    /// to ensure that the encoded value has an even number of bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_raw_bytes(bytes)?;
        self.write_padding(bytes.len() as u64)
    }

    /// Write a single zero byte if `value_len` is odd,
    /// so that a value of that length ends on an even boundary.
    pub fn write_padding(&mut self, value_len: u64) -> Result<()> {
        if value_len % 2 != 0 {
            self.write_raw_bytes(&[0])?;
        }
        Ok(())
    }

    /// Copy exactly `len` bytes from the given source to the inner writer,
    /// without any padding.
    ///
    /// Failures to read from the source are distinguished
    /// from failures to write,
    /// and a source which ends before `len` bytes were copied
    /// is an error.
    pub fn copy_raw_bytes<R>(&mut self, mut from: R, len: u64) -> Result<()>
    where
        R: Read,
    {
        let mut buf = [0u8; 8192];
        let mut remaining = len;
        while remaining > 0 {
            let chunk = remaining.min(buf.len() as u64) as usize;
            let n = match from.read(&mut buf[..chunk]) {
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(e).context(ReadValueDataSnafu {
                        position: self.bytes_written,
                    })
                }
            };
            ensure!(
                n > 0,
                UnexpectedEndOfValueDataSnafu {
                    position: self.bytes_written,
                    expected: len,
                    got: len - remaining,
                }
            );
            self.write_raw_bytes(&buf[..n])?;
            remaining -= n as u64;
        }
        Ok(())
    }

    /// Encode and write a data element with a primitive value.
    ///
    /// This method will perform the necessary padding to ensure that the
    /// encoded value is an even number of bytes:
    /// with a null character for UIDs,
    /// a space for other textual values,
    /// and a zero for binary values.
    /// The length property of the header is ignored,
    /// the true byte length of the value in its encoded form is used instead.
    pub fn encode_primitive_element(
        &mut self,
        de: &DataElementHeader,
        value: &PrimitiveValue,
    ) -> Result<()> {
        // encode it in memory first so that we know the real length
        self.buffer.clear();
        self.encoder
            .encode_primitive(&mut self.buffer, value)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        // pad to even length
        if self.buffer.len() % 2 == 1 {
            self.buffer.push(padding_for(de.vr));
        }
        let max_len = if de.vr.has_short_length() {
            u16::MAX as usize
        } else {
            0xFFFF_FFFE
        };
        ensure!(
            self.buffer.len() <= max_len,
            ValueTooLongSnafu {
                len: self.buffer.len()
            }
        );

        // now we can write the header with the correct length
        self.encode_element_header(DataElementHeader {
            tag: de.tag,
            vr: de.vr,
            len: Length(self.buffer.len() as u32),
        })?;
        self.to.write_all(&self.buffer).context(WriteValueDataSnafu {
            position: self.bytes_written,
        })?;
        self.bytes_written += self.buffer.len() as u64;
        Ok(())
    }

    /// Flush the inner writer.
    pub fn flush(&mut self) -> Result<()> {
        self.to.flush().context(WriteValueDataSnafu {
            position: self.bytes_written,
        })
    }
}

fn padding_for(vr: VR) -> u8 {
    match vr {
        VR::UI => b'\0',
        vr if vr.is_textual() => b' ',
        _ => 0,
    }
}

#[inline]
fn even_len(l: u32) -> u32 {
    (l + 1) & !1
}

#[cfg(test)]
mod tests {
    use dicomize_core::chrono::{NaiveDate, NaiveTime};
    use dicomize_core::{
        dicom_value, DataElement, DataElementHeader, Length, PrimitiveValue, Tag, VR,
    };

    use super::{Error, StatefulEncoder};
    use crate::encode::explicit_le::ExplicitVRLittleEndianEncoder;

    fn encode_element(element: &DataElement) -> Vec<u8> {
        let mut out: Vec<_> = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, ExplicitVRLittleEndianEncoder::default());
        encoder
            .encode_primitive_element(element.header(), element.value().primitive().unwrap())
            .unwrap();
        out
    }

    /// Odd lengthed values convert to tokens with even padding (PN)
    #[test]
    fn encode_odd_length_element_pn() {
        let element = DataElement::new(
            Tag(0x0010, 0x0010),
            VR::PN,
            dicom_value!(Strs, ["Dall^John".to_string()]),
        );

        assert_eq!(
            encode_element(&element),
            &[
                0x10, 0x00, 0x10, 0x00, // tag
                b'P', b'N', // VR
                0x0A, 0x00, // length
                // ---------- value ----------
                b'D', b'a', b'l', b'l', b'^', b'J', b'o', b'h', b'n', b' ',
            ],
        )
    }

    /// Odd lengthed values are encoded with even padding (bytes)
    #[test]
    fn encode_odd_length_element_bytes() {
        let element = DataElement::new(Tag(0x0009, 0x0010), VR::OB, PrimitiveValue::from(vec![1u8; 9]));

        assert_eq!(
            encode_element(&element),
            &[
                0x09, 0x00, 0x10, 0x00, // tag
                b'O', b'B', // VR
                0x00, 0x00, // reserved
                0x0A, 0x00, 0x00, 0x00, // length
                // ---------- value ----------
                1, 1, 1, 1, 1, 1, 1, 1, 1, 0,
            ],
        )
    }

    /// Odd lengthed values are encoded with even padding (UIDs)
    #[test]
    fn encode_odd_length_element_uid() {
        let element = DataElement::new(
            Tag(0x0008, 0x0016),
            VR::UI,
            dicom_value!(Strs, ["1.2.840.10008.1.1".to_string()]),
        );

        assert_eq!(
            encode_element(&element),
            &[
                0x08, 0x00, 0x16, 0x00, // tag
                b'U', b'I', // VR
                0x12, 0x00, // length
                // ---------- value ----------
                b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1', b'0', b'0', b'0', b'8', b'.',
                b'1', b'.', b'1', b'\0',
            ],
        )
    }

    #[test]
    fn encode_date_and_time_elements() {
        let date = DataElement::new(
            Tag(0x0008, 0x0012),
            VR::DA,
            PrimitiveValue::from(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()),
        );
        assert_eq!(
            encode_element(&date),
            b"\x08\x00\x12\x00DA\x08\x0020240307".to_vec()
        );

        let time = DataElement::new(
            Tag(0x0008, 0x0013),
            VR::TM,
            PrimitiveValue::from(NaiveTime::from_hms_opt(16, 4, 59).unwrap()),
        );
        assert_eq!(
            encode_element(&time),
            b"\x08\x00\x13\x00TM\x06\x00160459".to_vec()
        );
    }

    #[test]
    fn encode_binary_numbers() {
        let element = DataElement::new(Tag(0x0028, 0x0010), VR::US, dicom_value!(U16, 480));
        assert_eq!(
            encode_element(&element),
            &[0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00, 0xE0, 0x01]
        );
    }

    /// Odd lengthed item values are encoded with even padding
    #[test]
    fn encode_odd_length_item_bytes() {
        let mut out: Vec<_> = Vec::new();

        {
            let mut encoder =
                StatefulEncoder::new(&mut out, ExplicitVRLittleEndianEncoder::default());

            encoder.encode_item_header(9).unwrap();
            encoder.write_bytes(&[5; 9]).unwrap();
            assert_eq!(encoder.bytes_written(), 18);
        }

        assert_eq!(
            &out,
            &[
                0xFE, 0xFF, 0x00, 0xE0, // tag (0xFFFE, 0xE000)
                0x0A, 0x00, 0x00, 0x00, // length
                // ---------- value ----------
                5, 5, 5, 5, 5, 5, 5, 5, 5, 0,
            ],
        )
    }

    #[test]
    fn undefined_length_header_is_kept() {
        let mut out: Vec<_> = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, ExplicitVRLittleEndianEncoder::default());
        encoder
            .encode_element_header(DataElementHeader::new(
                Tag(0x7FE0, 0x0010),
                VR::OB,
                Length::UNDEFINED,
            ))
            .unwrap();
        encoder.encode_item_header(0xFFFF_FFFF).unwrap();
        assert_eq!(&out[8..12], &[0xFF; 4]);
        assert_eq!(&out[16..20], &[0xFF; 4]);
    }

    #[test]
    fn copy_exact_byte_count() {
        let source: Vec<u8> = (0..20_000u32).map(|i| i as u8).collect();
        let mut out: Vec<_> = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, ExplicitVRLittleEndianEncoder::default());
        encoder.copy_raw_bytes(&source[..], 19_999).unwrap();
        assert_eq!(encoder.bytes_written(), 19_999);
        encoder.write_padding(19_999).unwrap();
        assert_eq!(encoder.bytes_written(), 20_000);
        assert_eq!(&out[..19_999], &source[..19_999]);
        assert_eq!(out[19_999], 0);
    }

    #[test]
    fn copy_from_short_source_fails() {
        let source = [1u8; 10];
        let mut out: Vec<_> = Vec::new();
        let mut encoder = StatefulEncoder::new(&mut out, ExplicitVRLittleEndianEncoder::default());
        let err = encoder.copy_raw_bytes(&source[..], 12).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEndOfValueData {
                expected: 12,
                got: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_even_len() {
        use super::even_len;

        assert_eq!(even_len(0), 0);
        assert_eq!(even_len(1), 2);
        assert_eq!(even_len(2), 2);
        assert_eq!(even_len(3), 4);
        assert_eq!(even_len(0xFFFF_FFFD), 0xFFFF_FFFE);
    }
}
