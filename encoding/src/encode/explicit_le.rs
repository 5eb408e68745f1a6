//! Explicit VR Little Endian syntax transfer implementation

use crate::encode::basic::LittleEndianBasicEncoder;
use crate::encode::{
    BasicEncode, Encode, Result, WriteHeaderSnafu, WriteItemHeaderSnafu,
    WriteSequenceDelimiterSnafu, WriteTagSnafu,
};
use byteordered::byteorder::{ByteOrder, LittleEndian};
use dicomize_core::header::{DataElementHeader, HasLength, Header};
use dicomize_core::{PrimitiveValue, Tag};
use snafu::ResultExt;
use std::io::Write;

/// A concrete encoder for the transfer syntax ExplicitVRLittleEndian
#[derive(Debug, Default, Clone)]
pub struct ExplicitVRLittleEndianEncoder {
    basic: LittleEndianBasicEncoder,
}

impl Encode for ExplicitVRLittleEndianEncoder {
    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 4];
        LittleEndian::write_u16(&mut buf[..], tag.group());
        LittleEndian::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, mut to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        let vr_bytes = de.vr().to_bytes();
        if de.vr().has_short_length() {
            // PS3.5 7.1.2:
            // for VRs of AE, AS, AT, CS, DA, DS, DT, FL, FD, IS, LO, LT, PN,
            // SH, SL, SS, ST, TM, UI, UL and US the Value Length Field is the
            // 16-bit unsigned integer following the two byte VR Field (Table
            // 7.1-2). The value of the Value Length Field shall equal the
            // length of the Value Field.
            let mut buf = [0u8; 8];
            LittleEndian::write_u16(&mut buf[0..], de.tag().group());
            LittleEndian::write_u16(&mut buf[2..], de.tag().element());
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            LittleEndian::write_u16(&mut buf[6..], de.length().0 as u16);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(8)
        } else {
            // PS3.5 7.1.2:
            // for all other VRs the 16 bits following the two byte VR Field
            // are reserved for use by later versions of the DICOM Standard.
            // These reserved bytes shall be set to 0000H and shall not be
            // used or decoded (Table 7.1-1). The Value Length Field is a
            // 32-bit unsigned integer.
            let mut buf = [0u8; 12];
            LittleEndian::write_u16(&mut buf[0..], de.tag().group());
            LittleEndian::write_u16(&mut buf[2..], de.tag().element());
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            // buf[6..8] is kept zero'd
            LittleEndian::write_u32(&mut buf[8..], de.length().0);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(12)
        }
    }

    fn encode_item_header<W>(&self, mut to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf, 0xFFFE);
        LittleEndian::write_u16(&mut buf[2..], 0xE000);
        LittleEndian::write_u32(&mut buf[4..], len);
        to.write_all(&buf).context(WriteItemHeaderSnafu)
    }

    fn encode_sequence_delimiter<W>(&self, mut to: W) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        LittleEndian::write_u16(&mut buf, 0xFFFE);
        LittleEndian::write_u16(&mut buf[2..], 0xE0DD);
        to.write_all(&buf).context(WriteSequenceDelimiterSnafu)
    }

    fn encode_primitive<W>(&self, to: W, value: &PrimitiveValue) -> Result<usize>
    where
        W: Write,
    {
        self.basic.encode_primitive(to, value)
    }
}

#[cfg(test)]
mod tests {
    use super::ExplicitVRLittleEndianEncoder;
    use crate::encode::Encode;
    use dicomize_core::header::{DataElementHeader, Length};
    use dicomize_core::{Tag, VR};

    type Result = std::result::Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn encode_tag() -> Result {
        let enc = ExplicitVRLittleEndianEncoder::default();
        let mut out = vec![];
        enc.encode_tag(&mut out, Tag(0x7FE0, 0x0010))?;
        assert_eq!(out, vec![0xE0, 0x7F, 0x10, 0x00]);
        Ok(())
    }

    #[test]
    fn encode_data_element_headers() -> Result {
        let enc = ExplicitVRLittleEndianEncoder::default();
        let mut out = vec![];

        // short length form
        let de = DataElementHeader::new(Tag(0x0002, 0x0010), VR::UI, Length(20));
        let n = enc.encode_element_header(&mut out, de)?;
        assert_eq!(n, 8);
        #[rustfmt::skip]
        assert_eq!(&out[..], &[
            0x02, 0x00, 0x10, 0x00, // (0002,0010)
            b'U', b'I',             // VR: UI
            0x14, 0x00,             // Length: 20 bytes
        ]);

        // long length form with undefined length
        out.clear();
        let de = DataElementHeader::new(Tag(0x7FE0, 0x0010), VR::OB, Length::UNDEFINED);
        let n = enc.encode_element_header(&mut out, de)?;
        assert_eq!(n, 12);
        #[rustfmt::skip]
        assert_eq!(&out[..], &[
            0xE0, 0x7F, 0x10, 0x00, // (7FE0,0010)
            b'O', b'B',             // VR: OB
            0x00, 0x00,             // reserved
            0xFF, 0xFF, 0xFF, 0xFF, // undefined length
        ]);

        // UT also has the long form
        out.clear();
        let de = DataElementHeader::new(Tag(0x0042, 0x0011), VR::UT, Length(2));
        assert_eq!(enc.encode_element_header(&mut out, de)?, 12);
        Ok(())
    }

    #[test]
    fn encode_items_and_delimiters() -> Result {
        let enc = ExplicitVRLittleEndianEncoder::default();
        let mut out = vec![];
        enc.encode_item_header(&mut out, 0)?;
        enc.encode_item_header(&mut out, 12)?;
        enc.encode_sequence_delimiter(&mut out)?;
        #[rustfmt::skip]
        assert_eq!(&out[..], &[
            0xFE, 0xFF, 0x00, 0xE0, 0x00, 0x00, 0x00, 0x00, // empty item
            0xFE, 0xFF, 0x00, 0xE0, 0x0C, 0x00, 0x00, 0x00, // item, 12 bytes
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00, // sequence delimitation item
        ]);
        Ok(())
    }
}
