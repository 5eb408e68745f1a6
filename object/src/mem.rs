//! This module contains the implementation for an in-memory DICOM object.
//!
//! Use [`InMemDicomObject`] for your DICOM data set construction needs.
//! Values of this type keep all elements in memory,
//! except for bulk data, which stays in its file
//! until the object is written.
//!
//! Elements are kept in ascending tag order,
//! which is the order in which they are encoded.
//!
//! ```
//! # use dicomize_core::{DataElement, PrimitiveValue, VR};
//! # use dicomize_dictionary_std::tags;
//! # use dicomize_object::InMemDicomObject;
//! let mut obj = InMemDicomObject::new_empty();
//! obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(480_u16)));
//! obj.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John");
//! assert_eq!(obj.element(tags::ROWS)?.uint16()?, 480);
//! # Result::<(), Box<dyn std::error::Error>>::Ok(())
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::ops::RangeBounds;

use dicomize_core::dictionary::DataDictionary;
use dicomize_core::header::Header;
use dicomize_core::value::{BulkData, Value};
use dicomize_core::{DataElement, DataElementHeader, Length, PrimitiveValue, Tag, VR};
use dicomize_dictionary_std::{tags, StandardDataDictionary};
use dicomize_encoding::encode::Encode;
use dicomize_encoding::StatefulEncoder;
use snafu::{ensure, OptionExt, ResultExt};
use tracing::debug;

use crate::meta::FileMetaTableBuilder;
use crate::{
    AccessByNameError, AccessError, BuildMetaTableSnafu, BulkDataTooLongSnafu, FileDicomObject,
    NoSuchAttributeNameSnafu, NoSuchDataElementAliasSnafu, NoSuchDataElementTagSnafu,
    OpenBulkDataSnafu, PrepareMetaTableSnafu, PrintElementSnafu, SeekBulkDataSnafu, WithMetaError,
    WriteError,
};

/// The greatest even length of an element value of defined length.
const MAX_VALUE_LENGTH: u64 = 0xFFFF_FFFE;

/// A DICOM object that is fully contained in memory.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InMemDicomObject {
    /// the element map
    entries: BTreeMap<Tag, DataElement>,
}

impl InMemDicomObject {
    /// Create a new empty DICOM object.
    pub fn new_empty() -> Self {
        InMemDicomObject {
            entries: BTreeMap::new(),
        }
    }

    /// Construct a DICOM object from an iterator of elements.
    ///
    /// When two elements have the same tag, the last one is kept.
    pub fn from_element_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = DataElement>,
    {
        InMemDicomObject {
            entries: iter.into_iter().map(|e| (e.tag(), e)).collect(),
        }
    }

    /// Retrieve a particular DICOM element by its tag.
    pub fn element(&self, tag: Tag) -> Result<&DataElement, AccessError> {
        self.entries
            .get(&tag)
            .context(NoSuchDataElementTagSnafu { tag })
    }

    /// Retrieve a particular DICOM element by its tag,
    /// or `None` if it is not present.
    pub fn element_opt(&self, tag: Tag) -> Option<&DataElement> {
        self.entries.get(&tag)
    }

    /// Retrieve a particular DICOM element by its keyword.
    pub fn element_by_name(&self, name: &str) -> Result<&DataElement, AccessByNameError> {
        let tag = self.lookup_name(name)?;
        self.entries
            .get(&tag)
            .with_context(|| NoSuchDataElementAliasSnafu {
                tag,
                alias: name.to_string(),
            })
    }

    /// Check whether an element with the given tag is present.
    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Insert a data element to the object, replacing (and returning) any
    /// previous element of the same attribute.
    pub fn put(&mut self, elt: DataElement) -> Option<DataElement> {
        self.entries.insert(elt.tag(), elt)
    }

    /// Insert a single string value
    /// (a UID, a code string, a name, and so on)
    /// with the given tag and value representation,
    /// replacing any previous element of the same attribute.
    pub fn put_str(&mut self, tag: Tag, vr: VR, value: impl Into<String>) -> Option<DataElement> {
        self.put(DataElement::new(tag, vr, PrimitiveValue::new_str(value)))
    }

    /// Insert a single unsigned 16-bit integer with the VR `US`,
    /// replacing any previous element of the same attribute.
    pub fn put_u16(&mut self, tag: Tag, value: u16) -> Option<DataElement> {
        self.put(DataElement::new(tag, VR::US, PrimitiveValue::new_u16(value)))
    }

    /// Removes a DICOM element by its tag,
    /// reporting whether it was present.
    pub fn remove_element(&mut self, tag: Tag) -> bool {
        self.entries.remove(&tag).is_some()
    }

    /// Obtain an iterator over the elements of this object,
    /// in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = &DataElement> + '_ {
        self.entries.values()
    }

    /// Obtain an iterator over the tags of the object's elements,
    /// in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.entries.keys().copied()
    }

    /// The number of elements in the object.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the object has no elements.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encapsulate this object to contain a file meta group,
    /// created through the given file meta table builder.
    ///
    /// The attributes _Media Storage SOP Class UID_
    /// and _Media Storage SOP Instance UID_
    /// are filled in with the contents of the object,
    /// if _SOP Class UID_ and _SOP Instance UID_ are present.
    /// A complete file meta group should still provide
    /// the transfer syntax.
    pub fn with_meta(
        self,
        mut meta: FileMetaTableBuilder,
    ) -> Result<FileDicomObject<Self>, WithMetaError> {
        if let Some(elem) = self.element_opt(tags::SOP_CLASS_UID) {
            meta = meta.media_storage_sop_class_uid(
                elem.value().to_str().context(PrepareMetaTableSnafu)?,
            );
        }
        if let Some(elem) = self.element_opt(tags::SOP_INSTANCE_UID) {
            meta = meta.media_storage_sop_instance_uid(
                elem.value().to_str().context(PrepareMetaTableSnafu)?,
            );
        }
        Ok(FileDicomObject {
            meta: meta.build().context(BuildMetaTableSnafu)?,
            obj: self,
        })
    }

    /// Write this object's data set through the given encoder,
    /// without preamble, magic code, nor file meta group.
    pub fn write_dataset<W, E>(&self, to: &mut StatefulEncoder<W, E>) -> Result<(), WriteError>
    where
        W: Write,
        E: Encode,
    {
        self.write_range(to, ..)
    }

    /// Write the elements of this object whose tags are within the given range,
    /// in ascending tag order.
    ///
    /// Writing a data set in two ranges split by a tag
    /// allows other content to be written in between,
    /// such as encapsulated pixel data streamed from elsewhere.
    pub fn write_range<W, E, R>(
        &self,
        to: &mut StatefulEncoder<W, E>,
        range: R,
    ) -> Result<(), WriteError>
    where
        W: Write,
        E: Encode,
        R: RangeBounds<Tag>,
    {
        for elem in self.entries.range(range).map(|(_, e)| e) {
            write_element(to, elem)?;
        }
        Ok(())
    }

    // private methods

    fn lookup_name(&self, name: &str) -> Result<Tag, AccessByNameError> {
        StandardDataDictionary
            .by_name(name)
            .context(NoSuchAttributeNameSnafu { name })
            .map(|e| e.tag)
    }
}

impl<'a> IntoIterator for &'a InMemDicomObject {
    type Item = &'a DataElement;
    type IntoIter = std::collections::btree_map::Values<'a, Tag, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

fn write_element<W, E>(to: &mut StatefulEncoder<W, E>, elem: &DataElement) -> Result<(), WriteError>
where
    W: Write,
    E: Encode,
{
    let tag = elem.tag();
    match elem.value() {
        Value::Primitive(value) => to
            .encode_primitive_element(elem.header(), value)
            .context(PrintElementSnafu { tag }),
        Value::BulkData(bulk) => write_bulk_data(to, tag, elem.vr(), bulk),
    }
}

/// Stream the referenced bytes of a file into an element of defined length,
/// padded to an even length with a zero byte.
fn write_bulk_data<W, E>(
    to: &mut StatefulEncoder<W, E>,
    tag: Tag,
    vr: VR,
    bulk: &BulkData,
) -> Result<(), WriteError>
where
    W: Write,
    E: Encode,
{
    ensure!(
        bulk.length + bulk.length % 2 <= MAX_VALUE_LENGTH,
        BulkDataTooLongSnafu {
            tag,
            length: bulk.length
        }
    );
    let mut file = File::open(&bulk.path).context(OpenBulkDataSnafu { path: &bulk.path })?;
    if bulk.offset > 0 {
        file.seek(SeekFrom::Start(bulk.offset))
            .context(SeekBulkDataSnafu { path: &bulk.path })?;
    }
    debug!(
        "Streaming {} bytes from {} into {}",
        bulk.length,
        bulk.path.display(),
        tag
    );

    to.encode_element_header(DataElementHeader::new(
        tag,
        vr,
        Length(bulk.length as u32),
    ))
    .context(PrintElementSnafu { tag })?;
    to.copy_raw_bytes(file, bulk.length)
        .context(PrintElementSnafu { tag })?;
    to.write_padding(bulk.length)
        .context(PrintElementSnafu { tag })
}
