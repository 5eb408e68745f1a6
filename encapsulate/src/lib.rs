//! Encapsulation of compressed payloads into DICOM files.
//!
//! This crate wraps a baseline JPEG image, an MPEG2 video stream
//! or a PDF document into a DICOM file,
//! without decoding or re-encoding the payload:
//!
//! - JPEG and MPEG2 streams become the single fragment
//!   of an encapsulated _Pixel Data_ element;
//! - PDF documents become the _Encapsulated Document_ element
//!   of an Encapsulated PDF object.
//!
//! The caller provides a partial data set
//! (patient and study information, for instance),
//! which is completed with the identifiers and
//! image pixel attributes required by the payload kind.
//! When the data set does not describe the JPEG image already,
//! the JPEG header is inspected to retrieve its geometry
//! (see [`jpeg`]).
//!
//! # Example
//!
//! ```no_run
//! use dicomize_core::VR;
//! use dicomize_dictionary_std::tags;
//! use dicomize_encapsulate::{encapsulate_to_file, Payload, PayloadKind};
//! use dicomize_object::InMemDicomObject;
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut dataset = InMemDicomObject::new_empty();
//! dataset.put_str(tags::PATIENT_NAME, VR::PN, "Doe^John");
//! dataset.put_str(tags::PATIENT_ID, VR::LO, "12345");
//!
//! let payload = Payload::open("photo.jpg")?;
//! let kind = PayloadKind::Jpeg { strip_app_segments: true };
//! encapsulate_to_file(kind, dataset, payload, "photo.dcm")?;
//! # Ok(())
//! # }
//! ```
pub mod attributes;
pub mod error;
pub mod jpeg;
pub mod payload;
mod writer;

pub use attributes::ensure_attributes;
pub use error::{Error, ErrorKind, Result};
pub use jpeg::{read_frame_info, JpegFrameInfo};
pub use payload::{Payload, PayloadKind};
pub use writer::{encapsulate, encapsulate_to_file, Encapsulation};
