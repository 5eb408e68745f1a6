//! Writing of encapsulated DICOM files.
use crate::attributes::ensure_attributes;
use crate::error::{
    BuildMetaSnafu, CreateFileSnafu, DocumentWithoutFileSnafu, Error, FlushSnafu,
    InspectJpegSnafu, PayloadLengthMismatchSnafu, PayloadTooLongSnafu, ReadPayloadSnafu, Result,
    WriteDataSetSnafu, WriteHeaderSnafu,
};
use crate::jpeg::read_frame_info;
use crate::payload::{Payload, PayloadKind};
use dicomize_core::header::HasLength;
use dicomize_core::value::BulkData;
use dicomize_core::{DataElementHeader, Length, Tag, VR};
use dicomize_dictionary_std::tags;
use dicomize_encoding::{stateful, ExplicitVRLittleEndianEncoder, StatefulEncoder};
use dicomize_object::mem::InMemDicomObject;
use dicomize_object::meta::{FileMetaTable, FileMetaTableBuilder};
use dicomize_object::{DataSetPrinter, FileDicomObject};
use snafu::{ensure, OptionExt, ResultExt};
use std::fs::File;
use std::io::{BufWriter, ErrorKind as IoErrorKind, Read, Write};
use std::ops::Bound;
use std::path::Path;
use tracing::{debug, warn};

/// The greatest even value length of a single item.
const MAX_FRAGMENT_LENGTH: u64 = 0xFFFF_FFFE;

/// The attributes which must be present
/// for the JPEG header to be copied without inspection.
const IMAGE_PIXEL_TAGS: [Tag; 4] = [
    tags::ROWS,
    tags::COLUMNS,
    tags::SAMPLES_PER_PIXEL,
    tags::PHOTOMETRIC_INTERPRETATION,
];

/// A payload ready to be encapsulated into a DICOM file.
///
/// Creating an encapsulation inspects the payload when necessary
/// and fills in the missing attributes of the data set.
/// Nothing is written until [`write`](Encapsulation::write)
/// or [`write_to_file`](Encapsulation::write_to_file) is called,
/// so a payload which cannot be encapsulated
/// never leaves a partial output behind.
#[derive(Debug)]
pub struct Encapsulation<R> {
    kind: PayloadKind,
    file: FileDicomObject<InMemDicomObject>,
    fragment: Option<Fragment<R>>,
}

/// The single pixel data fragment of an image payload.
#[derive(Debug)]
struct Fragment<R> {
    /// the header bytes already consumed from the reader
    header: Vec<u8>,
    reader: R,
    /// bytes to copy from the reader after the header
    remaining: u64,
    /// the fragment length before padding
    length: u64,
    /// the length of the payload source
    announced: u64,
}

impl<R> Encapsulation<R>
where
    R: Read,
{
    /// Prepare the encapsulation of a payload
    /// with the default file meta group settings.
    pub fn new(kind: PayloadKind, dataset: InMemDicomObject, payload: Payload<R>) -> Result<Self> {
        Self::with_meta(kind, dataset, payload, FileMetaTableBuilder::new())
    }

    /// Prepare the encapsulation of a payload,
    /// building the file meta group from the given builder.
    ///
    /// The media storage SOP class and instance UIDs
    /// and the transfer syntax of the builder are always replaced.
    /// File meta group elements (group 0002) found in the data set
    /// are discarded.
    pub fn with_meta(
        kind: PayloadKind,
        mut dataset: InMemDicomObject,
        payload: Payload<R>,
        meta: FileMetaTableBuilder,
    ) -> Result<Self> {
        let Payload {
            mut reader,
            length,
            path,
        } = payload;

        // the file meta group is only built from `meta`
        let meta_group: Vec<Tag> = dataset
            .tags()
            .filter(|tag| tag.group() == 0x0002)
            .collect();
        for tag in meta_group {
            warn!("Discarding file meta group element {} from the data set", tag);
            dataset.remove_element(tag);
        }

        let fragment = match kind {
            PayloadKind::Document => {
                let path = path.context(DocumentWithoutFileSnafu)?;
                ensure!(
                    length + length % 2 <= MAX_FRAGMENT_LENGTH,
                    PayloadTooLongSnafu { length }
                );
                if dataset.remove_element(tags::ENCAPSULATED_DOCUMENT) {
                    warn!("Replacing existing Encapsulated Document element");
                }
                ensure_attributes(
                    &mut dataset,
                    kind,
                    None,
                    Some(BulkData::new(path, 0, length)),
                );
                None
            }
            PayloadKind::Jpeg { strip_app_segments } => {
                if dataset.remove_element(tags::PIXEL_DATA) {
                    warn!("Replacing existing Pixel Data element");
                }
                let fast_path = !strip_app_segments
                    && IMAGE_PIXEL_TAGS
                        .iter()
                        .all(|tag| dataset.element_opt(*tag).map_or(false, |e| !e.is_empty()));

                if fast_path {
                    debug!("Image pixel attributes present, copying JPEG stream as is");
                    ensure_attributes(&mut dataset, kind, None, None);
                    Some(Fragment::new(Vec::new(), reader, length, length)?)
                } else {
                    let frame =
                        read_frame_info(&mut reader, strip_app_segments).context(InspectJpegSnafu)?;
                    debug!(
                        "JPEG header of {} bytes inspected, {} bytes removed",
                        frame.header.len(),
                        frame.bytes_removed
                    );
                    ensure_attributes(&mut dataset, kind, Some(&frame), None);
                    let effective = frame.effective_length(length);
                    Some(Fragment::new(frame.header, reader, length, effective)?)
                }
            }
            PayloadKind::Mpeg2 => {
                if dataset.remove_element(tags::PIXEL_DATA) {
                    warn!("Replacing existing Pixel Data element");
                }
                ensure_attributes(&mut dataset, kind, None, None);
                Some(Fragment::new(Vec::new(), reader, length, length)?)
            }
        };

        let file = dataset
            .with_meta(meta.transfer_syntax(kind.transfer_syntax()))
            .context(BuildMetaSnafu)?;

        Ok(Encapsulation {
            kind,
            file,
            fragment,
        })
    }

    /// The kind of payload being encapsulated.
    pub fn kind(&self) -> PayloadKind {
        self.kind
    }

    /// The SOP Instance UID of the DICOM file to be written.
    pub fn sop_instance_uid(&self) -> &str {
        self.file.meta().media_storage_sop_instance_uid()
    }

    /// The file meta group to be written.
    pub fn meta(&self) -> &FileMetaTable {
        self.file.meta()
    }

    /// The data set to be written, with all attributes filled in.
    ///
    /// For image payloads, the pixel data is not part of it.
    pub fn dataset(&self) -> &InMemDicomObject {
        &self.file
    }

    /// Write the DICOM file into the given writer.
    ///
    /// The writer is flushed on success.
    pub fn write<W>(self, to: W) -> Result<()>
    where
        W: Write,
    {
        let Encapsulation { file, fragment, .. } = self;

        let mut to = BufWriter::new(to);
        file.write_header(&mut to).context(WriteHeaderSnafu)?;

        let mut printer: DataSetPrinter<_> =
            StatefulEncoder::new(to, ExplicitVRLittleEndianEncoder::default());
        match fragment {
            None => file
                .write_dataset(&mut printer)
                .context(WriteDataSetSnafu)?,
            Some(fragment) => {
                file.write_range(&mut printer, ..tags::PIXEL_DATA)
                    .context(WriteDataSetSnafu)?;
                fragment.write(&mut printer)?;
                file.write_range(
                    &mut printer,
                    (Bound::Excluded(tags::PIXEL_DATA), Bound::Unbounded),
                )
                .context(WriteDataSetSnafu)?;
            }
        }
        printer.flush().context(FlushSnafu)
    }

    /// Write the DICOM file into a new file at the given path.
    ///
    /// If writing fails, the partially written file is removed.
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).context(CreateFileSnafu { path })?;
        self.write(file).map_err(|e| {
            if let Err(remove_error) = std::fs::remove_file(path) {
                warn!(
                    "Could not remove incomplete file {}: {}",
                    path.display(),
                    remove_error
                );
            }
            e
        })
    }
}

impl<R> Fragment<R>
where
    R: Read,
{
    fn new(header: Vec<u8>, reader: R, announced: u64, length: u64) -> Result<Self> {
        let remaining = length
            .checked_sub(header.len() as u64)
            .context(PayloadLengthMismatchSnafu {
                announced,
                longer: false,
            })?;
        ensure!(
            length + length % 2 <= MAX_FRAGMENT_LENGTH,
            PayloadTooLongSnafu { length }
        );
        Ok(Fragment {
            header,
            reader,
            remaining,
            length,
            announced,
        })
    }

    /// The declared length of the fragment item, evened out.
    fn item_length(&self) -> u32 {
        (self.length + self.length % 2) as u32
    }

    /// Write the encapsulated pixel data element:
    /// an empty basic offset table, the fragment and the sequence delimiter.
    fn write<W>(mut self, printer: &mut DataSetPrinter<W>) -> Result<()>
    where
        W: Write,
    {
        debug!(
            "Writing pixel data fragment of {} bytes ({} from header)",
            self.length,
            self.header.len()
        );
        printer
            .encode_element_header(DataElementHeader::new(
                tags::PIXEL_DATA,
                VR::OB,
                Length::UNDEFINED,
            ))
            .map_err(pixel_data_error)?;
        // basic offset table
        printer.encode_item_header(0).map_err(pixel_data_error)?;
        printer
            .encode_item_header(self.item_length())
            .map_err(pixel_data_error)?;
        printer
            .write_raw_bytes(&self.header)
            .map_err(pixel_data_error)?;
        printer
            .copy_raw_bytes(&mut self.reader, self.remaining)
            .map_err(|e| match e {
                stateful::Error::UnexpectedEndOfValueData { .. } => {
                    PayloadLengthMismatchSnafu {
                        announced: self.announced,
                        longer: false,
                    }
                    .build()
                }
                e => pixel_data_error(e),
            })?;
        printer
            .write_padding(self.length)
            .map_err(pixel_data_error)?;

        let mut probe = [0u8; 1];
        let extra = loop {
            match self.reader.read(&mut probe) {
                Ok(n) => break n,
                Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
                Err(e) => return Err(e).context(ReadPayloadSnafu),
            }
        };
        ensure!(
            extra == 0,
            PayloadLengthMismatchSnafu {
                announced: self.announced,
                longer: true,
            }
        );

        printer
            .encode_sequence_delimiter()
            .map_err(pixel_data_error)
    }
}

fn pixel_data_error(source: stateful::Error) -> Error {
    Error::WritePixelData { source }
}

/// Encapsulate a payload into a DICOM file written to the given writer.
///
/// The data set is completed with the attributes
/// which the payload kind requires.
/// See [`Encapsulation`] for finer control.
pub fn encapsulate<R, W>(
    kind: PayloadKind,
    dataset: InMemDicomObject,
    payload: Payload<R>,
    to: W,
) -> Result<()>
where
    R: Read,
    W: Write,
{
    Encapsulation::new(kind, dataset, payload)?.write(to)
}

/// Encapsulate a payload into a new DICOM file at the given path.
///
/// The file is only created once the payload was inspected
/// and the data set completed,
/// and it is removed if writing fails.
pub fn encapsulate_to_file<R>(
    kind: PayloadKind,
    dataset: InMemDicomObject,
    payload: Payload<R>,
    path: impl AsRef<Path>,
) -> Result<()>
where
    R: Read,
{
    Encapsulation::new(kind, dataset, payload)?.write_to_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::tests::sample_jpeg;
    use crate::ErrorKind;

    fn dataset() -> InMemDicomObject {
        let mut obj = InMemDicomObject::new_empty();
        obj.put_str(tags::PATIENT_NAME, VR::PN, "Doe^Jane");
        obj
    }

    const JPEG: PayloadKind = PayloadKind::Jpeg {
        strip_app_segments: false,
    };

    #[test]
    fn short_source_is_a_length_mismatch() {
        let jpeg = sample_jpeg(8, 16, 16, 1);
        let payload = Payload::new(&jpeg[..], jpeg.len() as u64 + 10);
        let mut out = Vec::new();
        let err = encapsulate(JPEG, dataset(), payload, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::PayloadLengthMismatch { longer: false, .. }
        ));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn long_source_is_a_length_mismatch() {
        let mut data = vec![0u8; 16];
        let payload = Payload::new(&data[..], 10);
        let err = encapsulate(PayloadKind::Mpeg2, mpeg2_dataset(), payload, Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::PayloadLengthMismatch { longer: true, .. }));
        data.truncate(10);
        let payload = Payload::new(&data[..], 10);
        encapsulate(PayloadKind::Mpeg2, mpeg2_dataset(), payload, Vec::new()).unwrap();
    }

    #[test]
    fn header_longer_than_announced_length() {
        let jpeg = sample_jpeg(8, 16, 16, 3);
        let payload = Payload::new(&jpeg[..], 4);
        let err = Encapsulation::new(JPEG, dataset(), payload).unwrap_err();
        assert!(matches!(err, Error::PayloadLengthMismatch { .. }));
    }

    #[test]
    fn document_requires_file() {
        let payload = Payload::new(&b"%PDF-1.4"[..], 8);
        let err = Encapsulation::new(PayloadKind::Document, dataset(), payload).unwrap_err();
        assert!(matches!(err, Error::DocumentWithoutFile { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn mpeg2_requires_sop_class() {
        let payload = Payload::new(&[0u8; 4][..], 4);
        let err = Encapsulation::new(PayloadKind::Mpeg2, dataset(), payload).unwrap_err();
        assert!(matches!(err, Error::BuildMeta { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn existing_pixel_data_is_replaced() {
        let mut obj = mpeg2_dataset();
        obj.put(dicomize_core::DataElement::new(
            tags::PIXEL_DATA,
            VR::OB,
            dicomize_core::PrimitiveValue::from(vec![1_u8, 2, 3, 4]),
        ));
        let payload = Payload::new(&[9u8; 6][..], 6);
        let encapsulation = Encapsulation::new(PayloadKind::Mpeg2, obj, payload).unwrap();
        assert!(!encapsulation.dataset().contains(tags::PIXEL_DATA));
    }

    #[test]
    fn meta_group_settings_are_kept() {
        let jpeg = sample_jpeg(8, 16, 16, 1);
        let payload = Payload::new(&jpeg[..], jpeg.len() as u64);
        let encapsulation = Encapsulation::with_meta(
            JPEG,
            dataset(),
            payload,
            FileMetaTableBuilder::new().source_application_entity_title("DICOMIZER"),
        )
        .unwrap();
        let meta = encapsulation.meta();
        assert_eq!(meta.transfer_syntax(), "1.2.840.10008.1.2.4.50");
        assert_eq!(
            meta.source_application_entity_title.as_deref().map(str::trim_end),
            Some("DICOMIZER")
        );
        assert_eq!(
            encapsulation.sop_instance_uid(),
            encapsulation
                .dataset()
                .element(tags::SOP_INSTANCE_UID)
                .unwrap()
                .to_str()
                .unwrap()
        );
    }

    fn mpeg2_dataset() -> InMemDicomObject {
        let mut obj = dataset();
        obj.put_str(
            tags::SOP_CLASS_UID,
            VR::UI,
            dicomize_dictionary_std::uids::VIDEO_PHOTOGRAPHIC_IMAGE_STORAGE,
        );
        obj
    }
}
