//! This module provides the implementation of a basic little endian encoder.

use super::BasicEncode;
use byteordered::{ByteOrdered, Endianness};
use std::io::Write;

type Result<T> = std::io::Result<T>;

/// A basic encoder of primitive elements in little endian.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LittleEndianBasicEncoder;

impl BasicEncode for LittleEndianBasicEncoder {
    fn endianness(&self) -> Endianness {
        Endianness::Little
    }

    fn encode_us<S>(&self, to: S, value: u16) -> Result<()>
    where
        S: Write,
    {
        ByteOrdered::le(to).write_u16(value)
    }

    fn encode_ul<S>(&self, to: S, value: u32) -> Result<()>
    where
        S: Write,
    {
        ByteOrdered::le(to).write_u32(value)
    }

    fn encode_ss<S>(&self, to: S, value: i16) -> Result<()>
    where
        S: Write,
    {
        ByteOrdered::le(to).write_i16(value)
    }

    fn encode_sl<S>(&self, to: S, value: i32) -> Result<()>
    where
        S: Write,
    {
        ByteOrdered::le(to).write_i32(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicomize_core::dicom_value;

    #[test]
    fn encode_integers_le() {
        let enc = LittleEndianBasicEncoder;
        let mut out = vec![];
        enc.encode_us(&mut out, 0x0102).unwrap();
        enc.encode_ul(&mut out, 0x0304_0506).unwrap();
        enc.encode_ss(&mut out, -2).unwrap();
        enc.encode_sl(&mut out, -1).unwrap();
        assert_eq!(
            out,
            vec![0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn encode_primitive_values() {
        let enc = LittleEndianBasicEncoder;
        let mut out = vec![];
        let written = enc
            .encode_primitive(&mut out, &dicom_value!(U16, [8, 512]))
            .unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, vec![8, 0, 0, 2]);

        let mut out = vec![];
        let written = enc
            .encode_primitive(
                &mut out,
                &dicom_value!(Strs, ["ORIGINAL".to_string(), "PRIMARY".to_string()]),
            )
            .unwrap();
        assert_eq!(written, 16);
        assert_eq!(&out, b"ORIGINAL\\PRIMARY");
    }
}
