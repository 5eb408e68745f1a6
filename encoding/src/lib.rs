//! DICOM encoding primitives.
//!
//! This crate provides interfaces and data structures for writing
//! data in accordance to the DICOM standard,
//! in the Explicit VR Little Endian encoding
//! used by file meta groups and by encapsulated data sets.
//!
//! - [`encode`] holds the low level encoders of element headers,
//!   item headers, delimiters and primitive values.
//! - [`stateful`] holds a mid-level encoder which
//!   keeps track of the bytes written,
//!   pads values to an even length,
//!   and copies value data from other byte sources.
//!
//! For the time being, all APIs are based on synchronous I/O.

pub mod encode;
pub mod stateful;

pub use encode::explicit_le::ExplicitVRLittleEndianEncoder;
pub use encode::Encode;
pub use stateful::StatefulEncoder;
