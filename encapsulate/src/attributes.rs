//! Defaulting of the attributes required by encapsulated objects.
//!
//! Attributes are only filled in when absent or empty,
//! with the exception of the SOP Class UID,
//! which is dictated by the payload kind for documents and JPEG images.
use crate::jpeg::JpegFrameInfo;
use crate::payload::PayloadKind;
use dicomize_core::chrono::{Local, Timelike};
use dicomize_core::header::HasLength;
use dicomize_core::uid::generate_uid;
use dicomize_core::value::BulkData;
use dicomize_core::{DataElement, PrimitiveValue, Tag, VR};
use dicomize_dictionary_std::{tags, uids};
use dicomize_object::InMemDicomObject;
use tracing::debug;

/// The character set declared in encapsulated objects (UTF-8).
pub const SPECIFIC_CHARACTER_SET: &str = "ISO_IR 192";

/// The MIME type of encapsulated documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Fill in the attributes which the object needs
/// for encapsulating a payload of the given kind.
///
/// - For JPEG images, `frame` provides the image pixel module attributes.
///   Without it, only the bit depth attributes are given
///   a default (8 bits, unsigned).
/// - For documents, `document` is the reference to the document bytes,
///   which becomes the Encapsulated Document attribute if absent.
pub fn ensure_attributes(
    obj: &mut InMemDicomObject,
    kind: PayloadKind,
    frame: Option<&JpegFrameInfo>,
    document: Option<BulkData>,
) {
    ensure_str(obj, tags::SPECIFIC_CHARACTER_SET, VR::CS, || {
        SPECIFIC_CHARACTER_SET.to_string()
    });

    match kind {
        PayloadKind::Document => {
            obj.put_str(tags::SOP_CLASS_UID, VR::UI, uids::ENCAPSULATED_PDF_STORAGE);
        }
        PayloadKind::Jpeg { .. } => {
            obj.put_str(
                tags::SOP_CLASS_UID,
                VR::UI,
                uids::VL_PHOTOGRAPHIC_IMAGE_STORAGE,
            );
        }
        // left to the caller
        PayloadKind::Mpeg2 => {}
    }

    ensure_str(obj, tags::STUDY_INSTANCE_UID, VR::UI, generate_uid);
    ensure_str(obj, tags::SERIES_INSTANCE_UID, VR::UI, generate_uid);
    ensure_str(obj, tags::SOP_INSTANCE_UID, VR::UI, generate_uid);

    let now = Local::now();
    let time = now.time();
    ensure_value(obj, tags::INSTANCE_CREATION_DATE, VR::DA, || {
        PrimitiveValue::from(now.date_naive())
    });
    ensure_value(obj, tags::INSTANCE_CREATION_TIME, VR::TM, || {
        PrimitiveValue::from(time.with_nanosecond(0).unwrap_or(time))
    });

    if let Some(frame) = frame {
        ensure_image_pixel_attributes(obj, frame);
    }

    if kind.is_image() {
        ensure_u16(obj, tags::BITS_ALLOCATED, 8);
        let bits_allocated = existing_u16(obj, tags::BITS_ALLOCATED).unwrap_or(8);
        ensure_u16(obj, tags::BITS_STORED, bits_allocated);
        let bits_stored = existing_u16(obj, tags::BITS_STORED).unwrap_or(bits_allocated);
        ensure_u16(obj, tags::HIGH_BIT, bits_stored.saturating_sub(1));
        ensure_u16(obj, tags::PIXEL_REPRESENTATION, 0);
    } else {
        ensure_str(obj, tags::MIME_TYPE_OF_ENCAPSULATED_DOCUMENT, VR::LO, || {
            PDF_MIME_TYPE.to_string()
        });
        if let Some(document) = document {
            if !has_value(obj, tags::ENCAPSULATED_DOCUMENT) {
                obj.put(DataElement::new(tags::ENCAPSULATED_DOCUMENT, VR::OB, document));
            }
        }
    }
}

fn ensure_image_pixel_attributes(obj: &mut InMemDicomObject, frame: &JpegFrameInfo) {
    ensure_u16(obj, tags::SAMPLES_PER_PIXEL, u16::from(frame.samples_per_pixel));
    ensure_str(obj, tags::PHOTOMETRIC_INTERPRETATION, VR::CS, || {
        frame.photometric_interpretation().to_string()
    });
    if let Some(planar_configuration) = frame.planar_configuration() {
        ensure_u16(obj, tags::PLANAR_CONFIGURATION, planar_configuration);
    }
    ensure_u16(obj, tags::ROWS, frame.rows);
    ensure_u16(obj, tags::COLUMNS, frame.columns);
    ensure_u16(obj, tags::BITS_ALLOCATED, frame.bits_allocated());
    ensure_u16(obj, tags::BITS_STORED, frame.bits_stored());
    ensure_u16(obj, tags::HIGH_BIT, frame.high_bit());
    ensure_u16(obj, tags::PIXEL_REPRESENTATION, frame.pixel_representation());
}

/// Whether the object has a non-empty element with the given tag.
fn has_value(obj: &InMemDicomObject, tag: Tag) -> bool {
    obj.element_opt(tag).map_or(false, |e| !e.is_empty())
}

fn existing_u16(obj: &InMemDicomObject, tag: Tag) -> Option<u16> {
    obj.element_opt(tag).and_then(|e| e.uint16().ok())
}

fn ensure_value<F>(obj: &mut InMemDicomObject, tag: Tag, vr: VR, value: F)
where
    F: FnOnce() -> PrimitiveValue,
{
    if !has_value(obj, tag) {
        let value = value();
        debug!("Setting default {} {} = {:?}", tag, vr, value);
        obj.put(DataElement::new(tag, vr, value));
    }
}

fn ensure_str<F>(obj: &mut InMemDicomObject, tag: Tag, vr: VR, value: F)
where
    F: FnOnce() -> String,
{
    ensure_value(obj, tag, vr, || PrimitiveValue::new_str(value()))
}

fn ensure_u16(obj: &mut InMemDicomObject, tag: Tag, value: u16) {
    ensure_value(obj, tag, VR::US, || PrimitiveValue::new_u16(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicomize_core::uid::is_valid_uid;

    fn frame(precision: u8, rows: u16, columns: u16, samples_per_pixel: u8) -> JpegFrameInfo {
        JpegFrameInfo {
            rows,
            columns,
            precision,
            samples_per_pixel,
            header: vec![],
            bytes_removed: 0,
        }
    }

    fn str_of(obj: &InMemDicomObject, tag: Tag) -> String {
        obj.element(tag).unwrap().to_str().unwrap().into_owned()
    }

    fn u16_of(obj: &InMemDicomObject, tag: Tag) -> u16 {
        obj.element(tag).unwrap().uint16().unwrap()
    }

    const JPEG: PayloadKind = PayloadKind::Jpeg {
        strip_app_segments: false,
    };

    #[test]
    fn identifiers_are_generated() {
        let mut obj = InMemDicomObject::new_empty();
        ensure_attributes(&mut obj, JPEG, None, None);

        let study = str_of(&obj, tags::STUDY_INSTANCE_UID);
        let series = str_of(&obj, tags::SERIES_INSTANCE_UID);
        let instance = str_of(&obj, tags::SOP_INSTANCE_UID);
        for uid in [&study, &series, &instance] {
            assert!(is_valid_uid(uid), "{} is not a UID", uid);
            assert!(uid.starts_with("2.25."));
        }
        assert_ne!(study, series);
        assert_ne!(series, instance);

        assert_eq!(str_of(&obj, tags::SPECIFIC_CHARACTER_SET), "ISO_IR 192");
        assert!(obj.contains(tags::INSTANCE_CREATION_DATE));
        assert!(obj.contains(tags::INSTANCE_CREATION_TIME));
    }

    #[test]
    fn complete_objects_are_left_unchanged() {
        let mut obj = InMemDicomObject::new_empty();
        ensure_attributes(&mut obj, JPEG, Some(&frame(8, 480, 640, 3)), None);
        let before = obj.clone();
        ensure_attributes(&mut obj, JPEG, Some(&frame(12, 1, 1, 1)), None);
        assert_eq!(obj, before);
    }

    #[test]
    fn caller_values_are_kept() {
        let mut obj = InMemDicomObject::new_empty();
        obj.put_str(tags::STUDY_INSTANCE_UID, VR::UI, "1.2.3");
        obj.put_str(tags::SPECIFIC_CHARACTER_SET, VR::CS, "ISO_IR 100");
        obj.put_u16(tags::ROWS, 100);
        ensure_attributes(&mut obj, JPEG, Some(&frame(8, 480, 640, 3)), None);
        assert_eq!(str_of(&obj, tags::STUDY_INSTANCE_UID), "1.2.3");
        assert_eq!(str_of(&obj, tags::SPECIFIC_CHARACTER_SET), "ISO_IR 100");
        assert_eq!(u16_of(&obj, tags::ROWS), 100);
        assert_eq!(u16_of(&obj, tags::COLUMNS), 640);
    }

    #[test]
    fn empty_elements_count_as_absent() {
        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::empty(tags::SOP_INSTANCE_UID, VR::UI));
        ensure_attributes(&mut obj, PayloadKind::Mpeg2, None, None);
        assert!(is_valid_uid(&str_of(&obj, tags::SOP_INSTANCE_UID)));
    }

    #[test]
    fn color_jpeg_frame_defaults() {
        let mut obj = InMemDicomObject::new_empty();
        ensure_attributes(&mut obj, JPEG, Some(&frame(8, 480, 640, 3)), None);
        assert_eq!(u16_of(&obj, tags::ROWS), 480);
        assert_eq!(u16_of(&obj, tags::COLUMNS), 640);
        assert_eq!(u16_of(&obj, tags::SAMPLES_PER_PIXEL), 3);
        assert_eq!(str_of(&obj, tags::PHOTOMETRIC_INTERPRETATION), "YBR_FULL_422");
        assert_eq!(u16_of(&obj, tags::PLANAR_CONFIGURATION), 0);
        assert_eq!(u16_of(&obj, tags::BITS_ALLOCATED), 8);
        assert_eq!(u16_of(&obj, tags::BITS_STORED), 8);
        assert_eq!(u16_of(&obj, tags::HIGH_BIT), 7);
        assert_eq!(u16_of(&obj, tags::PIXEL_REPRESENTATION), 0);
        assert_eq!(
            str_of(&obj, tags::SOP_CLASS_UID),
            uids::VL_PHOTOGRAPHIC_IMAGE_STORAGE
        );
    }

    #[test]
    fn monochrome_12_bit_frame_defaults() {
        let mut obj = InMemDicomObject::new_empty();
        ensure_attributes(&mut obj, JPEG, Some(&frame(12, 512, 256, 1)), None);
        assert_eq!(u16_of(&obj, tags::SAMPLES_PER_PIXEL), 1);
        assert_eq!(str_of(&obj, tags::PHOTOMETRIC_INTERPRETATION), "MONOCHROME2");
        assert!(!obj.contains(tags::PLANAR_CONFIGURATION));
        assert_eq!(u16_of(&obj, tags::BITS_ALLOCATED), 16);
        assert_eq!(u16_of(&obj, tags::BITS_STORED), 12);
        assert_eq!(u16_of(&obj, tags::HIGH_BIT), 11);
    }

    #[test]
    fn bit_depth_fallbacks_follow_existing_values() {
        let mut obj = InMemDicomObject::new_empty();
        obj.put_u16(tags::BITS_ALLOCATED, 16);
        ensure_attributes(&mut obj, PayloadKind::Mpeg2, None, None);
        assert_eq!(u16_of(&obj, tags::BITS_STORED), 16);
        assert_eq!(u16_of(&obj, tags::HIGH_BIT), 15);
        assert_eq!(u16_of(&obj, tags::PIXEL_REPRESENTATION), 0);
        // MPEG2 does not impose a SOP class
        assert!(!obj.contains(tags::SOP_CLASS_UID));
        assert!(!obj.contains(tags::ROWS));
    }

    #[test]
    fn sop_class_is_forced_for_documents() {
        let mut obj = InMemDicomObject::new_empty();
        obj.put_str(tags::SOP_CLASS_UID, VR::UI, uids::SECONDARY_CAPTURE_IMAGE_STORAGE);
        let document = BulkData::new("report.pdf", 0, 1234);
        ensure_attributes(
            &mut obj,
            PayloadKind::Document,
            None,
            Some(document.clone()),
        );
        assert_eq!(str_of(&obj, tags::SOP_CLASS_UID), uids::ENCAPSULATED_PDF_STORAGE);
        assert_eq!(
            str_of(&obj, tags::MIME_TYPE_OF_ENCAPSULATED_DOCUMENT),
            "application/pdf"
        );
        let elem = obj.element(tags::ENCAPSULATED_DOCUMENT).unwrap();
        assert_eq!(elem.vr(), VR::OB);
        assert_eq!(elem.value().bulk_data(), Some(&document));
        // no pixel attributes for documents
        assert!(!obj.contains(tags::BITS_ALLOCATED));
    }
}
