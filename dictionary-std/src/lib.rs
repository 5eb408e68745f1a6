//! This crate implements the DICOM dictionaries and constants
//! needed to encapsulate documents, still images and video in DICOM files.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: information about the DICOM attributes
//!   which an encapsulated object may carry,
//!   as specified in [DICOM PS3.6].
//!   The dictionary is provided as a singleton
//!   behind the unit type [`StandardDataDictionary`].
//!
//! [DICOM PS3.6]: https://dicom.nema.org/medical/dicom/current/output/chtml/part06/ps3.6.html
//!
//! ## Constants
//!
//! The following modules contain constant declarations,
//! which perform an equivalent mapping at compile time,
//! thus without incurring a look-up cost:
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for the normative DICOM unique identifiers in use
pub mod data_element;

pub mod tags;
pub mod uids;

pub use data_element::{StandardDataDictionary, StandardDataDictionaryRegistry};
