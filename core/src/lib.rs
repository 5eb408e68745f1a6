#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of dicomize containing the basic concepts
//! and data structures needed to describe DICOM content before it is written.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises various data types for DICOM element headers,
//!   including common definitions for DICOM tags and value representations.
//! - [`value`] holds definitions for values in standard DICOM elements,
//!   with the awareness of multiplicity and of values
//!   which are kept outside of memory ([`BulkData`](value::BulkData)).
//! - [`dictionary`] describes the concept of a DICOM attribute dictionary,
//!   which maps attribute keywords to tags and value representations.
//! - [`uid`] creates and checks DICOM unique identifiers.
//!
//! [`dictionary`]: ./dictionary/index.html
//! [`header`]: ./header/index.html
//! [`uid`]: ./uid/index.html
//! [`value`]: ./value/index.html

pub mod dictionary;
pub mod header;
pub mod uid;
pub mod value;

pub use dictionary::{DataDictionary, DataDictionaryEntryRef};
pub use header::{DataElement, DataElementHeader, Length, Tag, VR};
pub use value::{BulkData, PrimitiveValue, Value as DicomValue};

// re-export crates that are part of the public API
pub use chrono;
pub use smallvec;
