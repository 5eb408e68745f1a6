#![allow(clippy::derive_partial_eq_without_eq)]
//! This crate contains a high-level abstraction for building DICOM objects
//! and writing them to DICOM files.
//! At this level, objects are comparable to a dictionary of elements
//! kept in ascending tag order.
//!
//! New DICOM instances are built from scratch using [`InMemDicomObject`]
//! (see the [`mem`] module for more details),
//! and attached a file meta group through [`InMemDicomObject::with_meta`].
//!
//! # Examples
//!
//! Build an object and write it to a file:
//!
//! ```no_run
//! use dicomize_core::VR;
//! use dicomize_dictionary_std::{tags, uids};
//! use dicomize_object::{FileMetaTableBuilder, InMemDicomObject};
//! # fn foo() -> Result<(), Box<dyn std::error::Error>> {
//! let mut obj = InMemDicomObject::new_empty();
//! obj.put_str(tags::SOP_CLASS_UID, VR::UI, uids::SECONDARY_CAPTURE_IMAGE_STORAGE);
//! obj.put_str(tags::SOP_INSTANCE_UID, VR::UI, "2.25.1234");
//! obj.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John");
//!
//! let file_obj = obj.with_meta(
//!     FileMetaTableBuilder::new().transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN),
//! )?;
//! file_obj.write_to_file("0001.dcm")?;
//! # Ok(())
//! # }
//! ```
//!
//! Regardless of the transfer syntax declared in the file meta group,
//! the main data set is always encoded in Explicit VR Little Endian,
//! which is also the encoding of the data sets
//! of all encapsulated transfer syntaxes.
pub mod mem;
pub mod meta;

pub use dicomize_core::{DataElement, Tag, VR};
pub use dicomize_dictionary_std::StandardDataDictionary;
pub use mem::InMemDicomObject;
pub use meta::{FileMetaTable, FileMetaTableBuilder};

use dicomize_core::value::CastValueError;
use dicomize_encoding::{ExplicitVRLittleEndianEncoder, StatefulEncoder};
use snafu::{Backtrace, ResultExt, Snafu};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// The default implementation class UID of files written by this crate.
///
/// This is a UID in the `2.25` arc, derived from a fixed UUID.
pub const IMPLEMENTATION_CLASS_UID: &str = "2.25.305828488182831875890203105390285383139";

/// The default implementation version name of files written by this crate.
pub const IMPLEMENTATION_VERSION_NAME: &str = "dicomize 0.1";

/// The length of the file preamble, in bytes.
pub const PREAMBLE_LENGTH: usize = 128;

/// The magic code which follows the preamble.
pub const DICM_MAGIC_CODE: [u8; 4] = *b"DICM";

/// A DICOM data set printer for the main data set of a file.
pub type DataSetPrinter<W> = StatefulEncoder<W, ExplicitVRLittleEndianEncoder>;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WriteError {
    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write object preamble"))]
    WritePreamble {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not write magic code"))]
    WriteMagicCode {
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not print meta group data set"))]
    PrintMetaDataSet {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    #[snafu(display("Could not print element {}", tag))]
    PrintElement {
        tag: Tag,
        #[snafu(backtrace)]
        source: dicomize_encoding::stateful::Error,
    },
    #[snafu(display("Could not print data set"))]
    PrintDataSet {
        #[snafu(backtrace)]
        source: dicomize_encoding::stateful::Error,
    },
    #[snafu(display("Could not open bulk data file '{}'", path.display()))]
    OpenBulkData {
        path: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Could not seek in bulk data file '{}'", path.display()))]
    SeekBulkData {
        path: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
    #[snafu(display("Bulk data of {} bytes is too long for element {}", length, tag))]
    BulkDataTooLong {
        tag: Tag,
        length: u64,
        backtrace: Backtrace,
    },
}

impl WriteError {
    /// Whether this error was caused by an I/O failure
    /// (as opposed to content which cannot be encoded).
    pub fn is_io(&self) -> bool {
        !matches!(self, WriteError::BulkDataTooLong { .. })
    }
}

/// An error which may occur when looking up a DICOM object's attributes.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum AccessError {
    #[snafu(display("No such data element with tag {}", tag))]
    NoSuchDataElementTag { tag: Tag, backtrace: Backtrace },
}

/// An error which may occur when looking up a DICOM object's attributes
/// by a keyword (or alias) instead of by tag.
///
/// These accesses incur a look-up at the data element dictionary,
/// which may fail if no such entry exists.
#[derive(Debug, Snafu)]
pub enum AccessByNameError {
    #[snafu(display("No such data element {} (with tag {})", alias, tag))]
    NoSuchDataElementAlias {
        tag: Tag,
        alias: String,
        backtrace: Backtrace,
    },

    /// Could not resolve attribute name from the data dictionary
    #[snafu(display("Unknown data attribute named `{}`", name))]
    NoSuchAttributeName { name: String, backtrace: Backtrace },
}

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WithMetaError {
    /// Could not build file meta table
    BuildMetaTable {
        #[snafu(backtrace)]
        source: crate::meta::Error,
    },
    /// Could not prepare file meta table
    PrepareMetaTable {
        source: CastValueError,
        backtrace: Backtrace,
    },
}

/// A root DICOM object to be written as a standard DICOM file,
/// containing additional information for the file meta group
/// in a separate table value.
#[derive(Debug, Clone, PartialEq)]
pub struct FileDicomObject<O> {
    meta: FileMetaTable,
    obj: O,
}

impl<O> FileDicomObject<O> {
    /// Retrieve the file meta header table.
    pub fn meta(&self) -> &FileMetaTable {
        &self.meta
    }

    /// Retrieve the inner DICOM object structure, discarding the meta table.
    pub fn into_inner(self) -> O {
        self.obj
    }

    /// Write the preamble, the magic code and the file meta group
    /// into the given writer.
    /// The main data set is expected to follow.
    pub fn write_header<W: Write>(&self, mut to: W) -> Result<(), WriteError> {
        // write preamble
        to.write_all(&[0_u8; PREAMBLE_LENGTH][..])
            .context(WritePreambleSnafu)?;

        // write magic sequence
        to.write_all(&DICM_MAGIC_CODE).context(WriteMagicCodeSnafu)?;

        // write meta group
        self.meta.write(&mut to).context(PrintMetaDataSetSnafu)
    }

    /// Write the file meta group set into the given writer.
    ///
    /// This is equivalent to `self.meta().write(to)`.
    pub fn write_meta<W: Write>(&self, to: W) -> Result<(), WriteError> {
        self.meta.write(to).context(PrintMetaDataSetSnafu)
    }
}

impl FileDicomObject<InMemDicomObject> {
    /// Write the entire object as a DICOM file
    /// into the given file path.
    /// Preamble, magic code, and file meta group will be included
    /// before the inner object.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WriteError> {
        let path = path.as_ref();
        let file = File::create(path).context(WriteFileSnafu { filename: path })?;
        let mut to = BufWriter::new(file);
        self.write_all(&mut to)?;
        to.flush().context(WriteFileSnafu { filename: path })
    }

    /// Write the entire object as a DICOM file
    /// into the given writer.
    /// Preamble, magic code, and file meta group will be included
    /// before the inner object.
    pub fn write_all<W: Write>(&self, mut to: W) -> Result<(), WriteError> {
        self.write_header(&mut to)?;
        let mut printer = StatefulEncoder::new(to, ExplicitVRLittleEndianEncoder::default());
        self.obj.write_dataset(&mut printer)?;
        printer.flush().context(PrintDataSetSnafu)
    }
}

impl<O> ::std::ops::Deref for FileDicomObject<O> {
    type Target = O;

    fn deref(&self) -> &Self::Target {
        &self.obj
    }
}

impl<O> ::std::ops::DerefMut for FileDicomObject<O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicomize_dictionary_std::{tags, uids};

    fn sample_object() -> FileDicomObject<InMemDicomObject> {
        let mut obj = InMemDicomObject::new_empty();
        obj.put_str(tags::SOP_CLASS_UID, VR::UI, uids::SECONDARY_CAPTURE_IMAGE_STORAGE);
        obj.put_str(tags::SOP_INSTANCE_UID, VR::UI, "2.25.12345");
        obj.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John");
        obj.with_meta(FileMetaTableBuilder::new().transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN))
            .unwrap()
    }

    #[test]
    fn with_meta_takes_identifiers_from_object() {
        let obj = sample_object();
        assert_eq!(
            obj.meta().media_storage_sop_class_uid(),
            uids::SECONDARY_CAPTURE_IMAGE_STORAGE
        );
        assert_eq!(obj.meta().media_storage_sop_instance_uid(), "2.25.12345");
        assert_eq!(obj.meta().transfer_syntax(), uids::EXPLICIT_VR_LITTLE_ENDIAN);
        // deref into the inner object
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn with_meta_without_identifiers_fails() {
        let obj = InMemDicomObject::new_empty();
        let err = obj
            .with_meta(FileMetaTableBuilder::new().transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN))
            .unwrap_err();
        assert!(matches!(err, WithMetaError::BuildMetaTable { .. }));
    }

    #[test]
    fn write_all_starts_with_preamble_and_magic_code() {
        let obj = sample_object();
        let mut out = Vec::new();
        obj.write_all(&mut out).unwrap();

        assert!(out[..128].iter().all(|b| *b == 0));
        assert_eq!(&out[128..132], b"DICM");

        // the meta group can be read back
        let meta = FileMetaTable::from_reader(&out[128..]).unwrap();
        assert_eq!(&meta, obj.meta());

        // the data set starts right after the meta group,
        // with (0008,0016) SOP Class UID
        let dataset_start = 132 + 12 + meta.information_group_length as usize;
        assert_eq!(&out[dataset_start..dataset_start + 6], b"\x08\x00\x16\x00UI");
    }

    #[test]
    fn write_to_file_matches_write_all() {
        let obj = sample_object();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.dcm");
        obj.write_to_file(&path).unwrap();

        let mut expected = Vec::new();
        obj.write_all(&mut expected).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), expected);
    }
}
