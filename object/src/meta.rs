//! Module containing data structures, readers and writers
//! of DICOM file meta information tables.
use byteordered::ByteOrdered;
use dicomize_core::dicom_value;
use dicomize_core::header::DataElement;
use dicomize_core::value::PrimitiveValue;
use dicomize_core::{Length, Tag, VR};
use dicomize_encoding::{ExplicitVRLittleEndianEncoder, StatefulEncoder};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::io::{Read, Write};

use crate::{DICM_MAGIC_CODE, IMPLEMENTATION_CLASS_UID, IMPLEMENTATION_VERSION_NAME};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// The file meta group parser could not read
    /// the magic code `DICM` from its source.
    #[snafu(display("Could not start reading DICOM data"))]
    ReadMagicCode {
        backtrace: Backtrace,
        source: std::io::Error,
    },

    /// The file meta group parser could not read
    /// the header of the next data element.
    #[snafu(display("Could not read data element header"))]
    ReadHeader {
        backtrace: Backtrace,
        source: std::io::Error,
    },

    /// The file meta group parser could not fetch
    /// the value of a data element from its source.
    #[snafu(display("Could not read data value"))]
    ReadValueData {
        backtrace: Backtrace,
        source: std::io::Error,
    },

    /// The file meta group parser could not decode
    /// the text in one of its data elements.
    #[snafu(display("Could not decode text in {}", tag))]
    DecodeText {
        tag: Tag,
        backtrace: Backtrace,
        source: std::string::FromUtf8Error,
    },

    /// Invalid DICOM data, detected from checking the `DICM` code.
    #[snafu(display("Invalid DICOM data"))]
    NotDicom { backtrace: Backtrace },

    /// The value representation of a data element is not known.
    #[snafu(display("Unknown value representation {:?} in {}", vr, tag))]
    UnknownVr {
        tag: Tag,
        vr: [u8; 2],
        backtrace: Backtrace,
    },

    /// A data element with an unexpected tag was retrieved:
    /// the parser was expecting another tag first,
    /// or at least one that is part of the the file meta group.
    #[snafu(display("Unexpected data element tagged {}", tag))]
    UnexpectedTag { tag: Tag, backtrace: Backtrace },

    /// A required file meta data element is missing.
    #[snafu(display("Missing data element `{}`", alias))]
    MissingElement {
        alias: &'static str,
        backtrace: Backtrace,
    },

    /// The value length of a data elements in the file meta group
    /// was unexpected.
    #[snafu(display("Unexpected length {} for data element tagged {}", length, tag))]
    UnexpectedDataValueLength {
        tag: Tag,
        length: Length,
        backtrace: Backtrace,
    },

    /// The value length of a data element is undefined,
    /// but knowing the length is required in its context.
    #[snafu(display("Undefined value length for data element tagged {}", tag))]
    UndefinedValueLength { tag: Tag, backtrace: Backtrace },

    /// The file meta group data set could not be written.
    #[snafu(display("Could not write file meta group data set"))]
    WriteSet {
        #[snafu(backtrace)]
        source: dicomize_encoding::stateful::Error,
    },
}

type Result<T, E = Error> = std::result::Result<T, E>;

/// DICOM File Meta Information Table.
///
/// This data type contains the parts of the file meta information table
/// which are written by this crate, as specified in [1].
/// Text values are kept with their padding.
///
/// [1]: http://dicom.nema.org/medical/dicom/current/output/chtml/part10/chapter_7.html
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetaTable {
    /// File Meta Information Group Length
    pub information_group_length: u32,
    /// File Meta Information Version
    pub information_version: [u8; 2],
    /// Media Storage SOP Class UID
    pub media_storage_sop_class_uid: String,
    /// Media Storage SOP Instance UID
    pub media_storage_sop_instance_uid: String,
    /// Transfer Syntax UID
    pub transfer_syntax: String,
    /// Implementation Class UID
    pub implementation_class_uid: String,

    /// Implementation Version Name
    pub implementation_version_name: Option<String>,
    /// Source Application Entity Title
    pub source_application_entity_title: Option<String>,
}

/// Read the header of an explicit VR little endian data element.
fn read_header<S: Read>(source: &mut S) -> Result<(Tag, VR, Length)> {
    let mut source = ByteOrdered::le(source);
    let group = source.read_u16().context(ReadHeaderSnafu)?;
    let element = source.read_u16().context(ReadHeaderSnafu)?;
    let tag = Tag(group, element);
    let mut vr_bytes = [0u8; 2];
    source.read_exact(&mut vr_bytes).context(ReadHeaderSnafu)?;
    let vr = VR::from_binary(vr_bytes).context(UnknownVrSnafu { tag, vr: vr_bytes })?;
    let len = if vr.has_short_length() {
        u32::from(source.read_u16().context(ReadHeaderSnafu)?)
    } else {
        // 2 reserved bytes, then the length
        source.read_u16().context(ReadHeaderSnafu)?;
        source.read_u32().context(ReadHeaderSnafu)?
    };
    Ok((tag, vr, Length(len)))
}

/// Utility function for reading the body of the DICOM element as text.
fn read_str_body<S: Read>(source: &mut S, tag: Tag, len: u32) -> Result<String> {
    let mut v = vec![0; len as usize];
    source.read_exact(&mut v).context(ReadValueDataSnafu)?;
    String::from_utf8(v).context(DecodeTextSnafu { tag })
}

impl FileMetaTable {
    /// Read a file meta table from the given source,
    /// starting at the magic code `DICM` (after the preamble).
    pub fn from_reader<R: Read>(file: R) -> Result<Self> {
        FileMetaTable::read_from(file)
    }

    fn read_from<S: Read>(mut file: S) -> Result<Self> {
        let mut buff: [u8; 4] = [0; 4];
        // check magic code
        file.read_exact(&mut buff).context(ReadMagicCodeSnafu)?;
        ensure!(buff == DICM_MAGIC_CODE, NotDicomSnafu);

        let group_length: u32 = {
            let (tag, _vr, len) = read_header(&mut file)?;
            ensure!(tag == Tag(0x0002, 0x0000), UnexpectedTagSnafu { tag });
            ensure!(
                len == Length(4),
                UnexpectedDataValueLengthSnafu { tag, length: len }
            );
            ByteOrdered::le(&mut file)
                .read_u32()
                .context(ReadValueDataSnafu)?
        };

        let mut group_length_remaining = group_length;
        let mut builder = FileMetaTableBuilder::new().group_length(group_length);

        while group_length_remaining > 0 {
            let (tag, vr, len) = read_header(&mut file)?;
            let elem_len = len.get().context(UndefinedValueLengthSnafu { tag })?;
            let header_len = if vr.has_short_length() { 8 } else { 12 };
            group_length_remaining = group_length_remaining.saturating_sub(header_len + elem_len);

            builder = match tag {
                Tag(0x0002, 0x0001) => {
                    // File Meta Information Version
                    ensure!(
                        elem_len == 2,
                        UnexpectedDataValueLengthSnafu { tag, length: len }
                    );
                    let mut hbuf = [0u8; 2];
                    file.read_exact(&mut hbuf[..])
                        .context(ReadValueDataSnafu)?;
                    builder.information_version(hbuf)
                }
                Tag(0x0002, 0x0002) => {
                    builder.media_storage_sop_class_uid(read_str_body(&mut file, tag, elem_len)?)
                }
                Tag(0x0002, 0x0003) => builder
                    .media_storage_sop_instance_uid(read_str_body(&mut file, tag, elem_len)?),
                Tag(0x0002, 0x0010) => {
                    builder.transfer_syntax(read_str_body(&mut file, tag, elem_len)?)
                }
                Tag(0x0002, 0x0012) => {
                    builder.implementation_class_uid(read_str_body(&mut file, tag, elem_len)?)
                }
                Tag(0x0002, 0x0013) => {
                    builder.implementation_version_name(read_str_body(&mut file, tag, elem_len)?)
                }
                Tag(0x0002, 0x0016) => builder
                    .source_application_entity_title(read_str_body(&mut file, tag, elem_len)?),
                Tag(0x0002, _) => {
                    // other attributes of the group are skipped
                    std::io::copy(
                        &mut (&mut file).take(u64::from(elem_len)),
                        &mut std::io::sink(),
                    )
                    .context(ReadValueDataSnafu)?;
                    builder
                }
                _ => return UnexpectedTagSnafu { tag }.fail(),
            }
        }

        builder.build()
    }

    /// Media Storage SOP Class UID, without trailing padding.
    pub fn media_storage_sop_class_uid(&self) -> &str {
        self.media_storage_sop_class_uid.trim_end_matches('\0')
    }

    /// Media Storage SOP Instance UID, without trailing padding.
    pub fn media_storage_sop_instance_uid(&self) -> &str {
        self.media_storage_sop_instance_uid.trim_end_matches('\0')
    }

    /// Transfer Syntax UID, without trailing padding.
    pub fn transfer_syntax(&self) -> &str {
        self.transfer_syntax.trim_end_matches('\0')
    }

    /// Implementation Class UID, without trailing padding.
    pub fn implementation_class_uid(&self) -> &str {
        self.implementation_class_uid.trim_end_matches('\0')
    }

    /// Convert the table into the data elements of the file meta group,
    /// in ascending tag order.
    pub fn into_element_iter(self) -> impl Iterator<Item = DataElement> {
        let mut elems = vec![
            // file information group length
            DataElement::new(
                Tag(0x0002, 0x0000),
                VR::UL,
                dicom_value!(U32, self.information_group_length),
            ),
            DataElement::new(
                Tag(0x0002, 0x0001),
                VR::OB,
                dicom_value!(
                    U8,
                    [self.information_version[0], self.information_version[1]]
                ),
            ),
            DataElement::new(
                Tag(0x0002, 0x0002),
                VR::UI,
                PrimitiveValue::from(self.media_storage_sop_class_uid),
            ),
            DataElement::new(
                Tag(0x0002, 0x0003),
                VR::UI,
                PrimitiveValue::from(self.media_storage_sop_instance_uid),
            ),
            DataElement::new(
                Tag(0x0002, 0x0010),
                VR::UI,
                PrimitiveValue::from(self.transfer_syntax),
            ),
            DataElement::new(
                Tag(0x0002, 0x0012),
                VR::UI,
                PrimitiveValue::from(self.implementation_class_uid),
            ),
        ];
        if let Some(v) = self.implementation_version_name {
            elems.push(DataElement::new(
                Tag(0x0002, 0x0013),
                VR::SH,
                PrimitiveValue::from(v),
            ));
        }
        if let Some(v) = self.source_application_entity_title {
            elems.push(DataElement::new(
                Tag(0x0002, 0x0016),
                VR::AE,
                PrimitiveValue::from(v),
            ));
        }

        elems.into_iter()
    }

    /// Write the file meta group data set to the given writer,
    /// in Explicit VR Little Endian.
    ///
    /// The magic code is not included.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut printer = StatefulEncoder::new(writer, ExplicitVRLittleEndianEncoder::default());
        for elem in self.clone().into_element_iter() {
            if let Some(value) = elem.value().primitive() {
                printer
                    .encode_primitive_element(elem.header(), value)
                    .context(WriteSetSnafu)?;
            }
        }
        printer.flush().context(WriteSetSnafu)
    }
}

/// A builder for DICOM meta information tables.
///
/// The implementation class UID and implementation version name
/// default to the ones of this crate.
#[derive(Debug, Default, Clone)]
pub struct FileMetaTableBuilder {
    /// File Meta Information Group Length (UL)
    information_group_length: Option<u32>,
    /// File Meta Information Version (OB)
    information_version: Option<[u8; 2]>,
    /// Media Storage SOP Class UID (UI)
    media_storage_sop_class_uid: Option<String>,
    /// Media Storage SOP Instance UID (UI)
    media_storage_sop_instance_uid: Option<String>,
    /// Transfer Syntax UID (UI)
    transfer_syntax: Option<String>,
    /// Implementation Class UID (UI)
    implementation_class_uid: Option<String>,

    /// Implementation Version Name (SH)
    implementation_version_name: Option<String>,
    /// Source Application Entity Title (AE)
    source_application_entity_title: Option<String>,
}

/// Ensure that the string is even lengthed, by adding a trailing character
/// if not.
#[inline]
fn padded<T>(s: T, pad: char) -> String
where
    T: Into<String>,
{
    let mut s = s.into();
    if s.len() % 2 == 1 {
        s.push(pad);
    }
    s
}

/// Ensure that the string is even lengthed with trailing '\0's.
fn ui_padded<T>(s: T) -> String
where
    T: Into<String>,
{
    padded(s, '\0')
}

/// Ensure that the string is even lengthed with trailing spaces.
fn txt_padded<T>(s: T) -> String
where
    T: Into<String>,
{
    padded(s, ' ')
}

impl FileMetaTableBuilder {
    /// Create a new, empty builder.
    pub fn new() -> FileMetaTableBuilder {
        FileMetaTableBuilder::default()
    }

    /// Define the meta information group length.
    pub fn group_length(mut self, value: u32) -> FileMetaTableBuilder {
        self.information_group_length = Some(value);
        self
    }

    /// Define the meta information version.
    pub fn information_version(mut self, value: [u8; 2]) -> FileMetaTableBuilder {
        self.information_version = Some(value);
        self
    }

    /// Define the media storage SOP class UID.
    pub fn media_storage_sop_class_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_class_uid = Some(ui_padded(value));
        self
    }

    /// Define the media storage SOP instance UID.
    pub fn media_storage_sop_instance_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.media_storage_sop_instance_uid = Some(ui_padded(value));
        self
    }

    /// Define the transfer syntax UID.
    pub fn transfer_syntax<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.transfer_syntax = Some(ui_padded(value));
        self
    }

    /// Define the implementation class UID.
    pub fn implementation_class_uid<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.implementation_class_uid = Some(ui_padded(value));
        self
    }

    /// Define the implementation version name.
    pub fn implementation_version_name<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.implementation_version_name = Some(txt_padded(value));
        self
    }

    /// Define the source application entity title.
    pub fn source_application_entity_title<T>(mut self, value: T) -> FileMetaTableBuilder
    where
        T: Into<String>,
    {
        self.source_application_entity_title = Some(txt_padded(value));
        self
    }

    /// Build the table.
    pub fn build(self) -> Result<FileMetaTable> {
        let information_version = self.information_version.unwrap_or([0, 1]);
        let media_storage_sop_class_uid =
            self.media_storage_sop_class_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPClassUID",
                })?;
        let media_storage_sop_instance_uid =
            self.media_storage_sop_instance_uid
                .context(MissingElementSnafu {
                    alias: "MediaStorageSOPInstanceUID",
                })?;
        let transfer_syntax = self.transfer_syntax.context(MissingElementSnafu {
            alias: "TransferSyntax",
        })?;
        let implementation_class_uid = self
            .implementation_class_uid
            .unwrap_or_else(|| ui_padded(IMPLEMENTATION_CLASS_UID));
        let implementation_version_name = self
            .implementation_version_name
            .or_else(|| Some(txt_padded(IMPLEMENTATION_VERSION_NAME)));

        fn dicom_len<T: AsRef<str>>(x: T) -> u32 {
            let o = x.as_ref().len() as u32;
            if o % 2 == 1 {
                o + 1
            } else {
                o
            }
        }

        let information_group_length = match self.information_group_length {
            Some(e) => e,
            None => {
                // determine the expected meta group size based on the given fields.
                // FileMetaInformationGroupLength is not included here

                14 + 8
                    + dicom_len(&media_storage_sop_class_uid)
                    + 8
                    + dicom_len(&media_storage_sop_instance_uid)
                    + 8
                    + dicom_len(&transfer_syntax)
                    + 8
                    + dicom_len(&implementation_class_uid)
                    + implementation_version_name
                        .as_ref()
                        .map(|s| 8 + dicom_len(s))
                        .unwrap_or(0)
                    + self
                        .source_application_entity_title
                        .as_ref()
                        .map(|s| 8 + dicom_len(s))
                        .unwrap_or(0)
            }
        };

        Ok(FileMetaTable {
            information_group_length,
            information_version,
            media_storage_sop_class_uid,
            media_storage_sop_instance_uid,
            transfer_syntax,
            implementation_class_uid,
            implementation_version_name,
            source_application_entity_title: self.source_application_entity_title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, FileMetaTable, FileMetaTableBuilder};
    use dicomize_core::header::Header;
    use dicomize_core::{dicom_value, DataElement, PrimitiveValue, Tag, VR};

    #[rustfmt::skip]
    const TEST_META_1: &[u8] = &[
        // magic code
        b'D', b'I', b'C', b'M',
        // File Meta Information Group Length: (0000,0002) ; UL ; 4 ; 200
        0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00, 0xc8, 0x00, 0x00, 0x00,
        // File Meta Information Version: (0002, 0001) ; OB ; 2 ; [0x00, 0x01]
        0x02, 0x00, 0x01, 0x00, b'O', b'B', 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01,
        // Media Storage SOP Class UID (0002, 0002) ; UI ; 26 ; "1.2.840.10008.5.1.4.1.1.1\0" (ComputedRadiographyImageStorage)
        0x02, 0x00, 0x02, 0x00, b'U', b'I', 0x1a, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x38, 0x34, 0x30,
        0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x35, 0x2e, 0x31, 0x2e, 0x34, 0x2e, 0x31, 0x2e,
        0x31, 0x2e, 0x31, 0x00,
        // Media Storage SOP Instance UID (0002, 0003) ; UI ; 56 ; "1.2.3.4.5.12345678.1234567890.1234567.123456789.1234567\0"
        0x02, 0x00, 0x03, 0x00, b'U', b'I', 0x38, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x33, 0x2e, 0x34,
        0x2e, 0x35, 0x2e, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x2e, 0x31, 0x32, 0x33,
        0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x30, 0x2e, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37,
        0x2e, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x2e, 0x31, 0x32, 0x33, 0x34,
        0x35, 0x36, 0x37, 0x00,
        // Transfer Syntax UID (0002, 0010) ; UI ; 20 ; "1.2.840.10008.1.2.1\0" (LittleEndianExplicit)
        0x02, 0x00, 0x10, 0x00, b'U', b'I', 0x14, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x38, 0x34, 0x30,
        0x2e, 0x31, 0x30, 0x30, 0x30, 0x38, 0x2e, 0x31, 0x2e, 0x32, 0x2e, 0x31, 0x00,
        // Implementation Class UID (0002, 0012) ; UI ; 20 ; "1.2.345.6.7890.1.234"
        0x02, 0x00, 0x12, 0x00, b'U', b'I', 0x14, 0x00, 0x31, 0x2e, 0x32, 0x2e, 0x33, 0x34, 0x35,
        0x2e, 0x36, 0x2e, 0x37, 0x38, 0x39, 0x30, 0x2e, 0x31, 0x2e, 0x32, 0x33, 0x34,
        // optional elements:

        // Implementation Version Name (0002,0013) ; SH ; "DICOMIZE_TEST_1"
        0x02, 0x00, 0x13, 0x00, b'S', b'H', 0x10, 0x00, b'D', b'I', b'C', b'O', b'M', b'I', b'Z',
        b'E', b'_', b'T', b'E', b'S', b'T', b'_', b'1', 0x20,
        // Source Application Entity Title (0002, 0016) ; AE ; 0 (no data)
        0x02, 0x00, 0x16, 0x00, b'A', b'E', 0x00, 0x00,
    ];

    fn ground_truth() -> FileMetaTable {
        FileMetaTable {
            information_group_length: 200,
            information_version: [0u8, 1u8],
            media_storage_sop_class_uid: "1.2.840.10008.5.1.4.1.1.1\0".to_owned(),
            media_storage_sop_instance_uid:
                "1.2.3.4.5.12345678.1234567890.1234567.123456789.1234567\0".to_owned(),
            transfer_syntax: "1.2.840.10008.1.2.1\0".to_owned(),
            implementation_class_uid: "1.2.345.6.7890.1.234".to_owned(),
            implementation_version_name: Some("DICOMIZE_TEST_1 ".to_owned()),
            source_application_entity_title: Some("".to_owned()),
        }
    }

    #[test]
    fn read_meta_table_from_reader() {
        let mut source = TEST_META_1;
        let table = FileMetaTable::from_reader(&mut source).unwrap();

        assert_eq!(table.media_storage_sop_class_uid(), "1.2.840.10008.5.1.4.1.1.1");
        assert_eq!(table.transfer_syntax(), "1.2.840.10008.1.2.1");
        assert_eq!(table, ground_truth());
        // the whole group was consumed
        assert!(source.is_empty());
    }

    #[test]
    fn create_meta_table_with_builder() {
        let table = FileMetaTableBuilder::new()
            .information_version([0, 1])
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.1")
            .media_storage_sop_instance_uid(
                "1.2.3.4.5.12345678.1234567890.1234567.123456789.1234567",
            )
            .transfer_syntax("1.2.840.10008.1.2.1")
            .implementation_class_uid("1.2.345.6.7890.1.234")
            .implementation_version_name("DICOMIZE_TEST_1")
            .source_application_entity_title("")
            .build()
            .unwrap();

        assert_eq!(table.information_group_length, 200);
        assert_eq!(table, ground_truth());
    }

    #[test]
    fn builder_defaults_implementation_identity() {
        let table = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.104.1")
            .media_storage_sop_instance_uid("2.25.1")
            .transfer_syntax("1.2.840.10008.1.2.1")
            .build()
            .unwrap();
        assert_eq!(table.information_version, [0, 1]);
        assert_eq!(table.implementation_class_uid(), crate::IMPLEMENTATION_CLASS_UID);
        assert_eq!(
            table.implementation_version_name.as_deref().map(str::trim_end),
            Some(crate::IMPLEMENTATION_VERSION_NAME)
        );
        assert_eq!(table.source_application_entity_title, None);
    }

    #[test]
    fn builder_requires_transfer_syntax() {
        let err = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.104.1")
            .media_storage_sop_instance_uid("2.25.1")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingElement {
                alias: "TransferSyntax",
                ..
            }
        ));
    }

    #[test]
    fn write_meta_table_matches_bytes() {
        let mut out = b"DICM".to_vec();
        ground_truth().write(&mut out).unwrap();
        assert_eq!(&out[..], TEST_META_1);
    }

    #[test]
    fn written_group_length_is_consistent() {
        let table = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.77.1.4")
            .media_storage_sop_instance_uid("2.25.98765432109876543210")
            .transfer_syntax("1.2.840.10008.1.2.4.50")
            .source_application_entity_title("DICOMIZE")
            .build()
            .unwrap();
        let mut out = b"DICM".to_vec();
        table.write(&mut out).unwrap();
        assert_eq!(out.len(), 4 + 12 + table.information_group_length as usize);
        assert_eq!(FileMetaTable::from_reader(&out[..]).unwrap(), table);
    }

    #[test]
    fn not_dicom() {
        let source: &[u8] = b"DICN\x02\x00\x00\x00";
        assert!(matches!(
            FileMetaTable::from_reader(source),
            Err(Error::NotDicom { .. })
        ));
    }

    #[test]
    fn read_meta_table_into_iter() {
        let gt = vec![
            // Information Group Length
            DataElement::new(Tag(0x0002, 0x0000), VR::UL, dicom_value!(U32, 200)),
            // Information Version
            DataElement::new(Tag(0x0002, 0x0001), VR::OB, dicom_value!(U8, [0, 1])),
            // Media Storage SOP Class UID
            DataElement::new(
                Tag(0x0002, 0x0002),
                VR::UI,
                PrimitiveValue::from("1.2.840.10008.5.1.4.1.1.1\0"),
            ),
            // Media Storage SOP Instance UID
            DataElement::new(
                Tag(0x0002, 0x0003),
                VR::UI,
                PrimitiveValue::from("1.2.3.4.5.12345678.1234567890.1234567.123456789.1234567\0"),
            ),
            // Transfer Syntax
            DataElement::new(
                Tag(0x0002, 0x0010),
                VR::UI,
                PrimitiveValue::from("1.2.840.10008.1.2.1\0"),
            ),
            // Implementation Class UID
            DataElement::new(
                Tag(0x0002, 0x0012),
                VR::UI,
                PrimitiveValue::from("1.2.345.6.7890.1.234"),
            ),
            // Implementation Version Name
            DataElement::new(
                Tag(0x0002, 0x0013),
                VR::SH,
                PrimitiveValue::from("DICOMIZE_TEST_1 "),
            ),
            // Source Application Entity Title
            DataElement::new(Tag(0x0002, 0x0016), VR::AE, PrimitiveValue::from("")),
        ];

        let elems: Vec<_> = ground_truth().into_element_iter().collect();
        assert_eq!(elems, gt);
        assert!(elems.windows(2).all(|w| w[0].tag() < w[1].tag()));
    }
}
