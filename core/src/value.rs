//! This module includes a high level abstraction over a DICOM data element's value.
//!
//! A [`Value`] is either held in memory as a [`PrimitiveValue`],
//! or it refers to a byte range in a file ([`BulkData`])
//! which is only read when the value is written out.

use crate::header::{HasLength, Length};
use chrono::Timelike;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

// Re-exported from chrono
pub use chrono::{NaiveDate, NaiveTime};

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// An error type for an attempt of accessing a value
/// in one internal representation as another.
#[derive(Debug, Clone, PartialEq)]
pub struct CastValueError {
    /// The value format requested
    pub requested: &'static str,
    /// The value's actual representation
    pub got: ValueType,
}

impl fmt::Display for CastValueError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "bad value cast: requested {} but value is {:?}",
            self.requested, self.got
        )
    }
}

impl std::error::Error for CastValueError {}

/// An enum representing an abstraction of a DICOM element's data value type.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueType {
    /// No data. Used for any value of length 0.
    Empty,
    /// A sequence of strings.
    Strs,
    /// A single string.
    Str,
    /// A sequence of unsigned 8-bit integers.
    U8,
    /// A sequence of signed 16-bit integers.
    I16,
    /// A sequence of unsigned 16-bit integers.
    U16,
    /// A sequence of signed 32-bit integers.
    I32,
    /// A sequence of unsigned 32-bit integers.
    U32,
    /// A sequence of dates.
    Date,
    /// A sequence of times.
    Time,
    /// Data kept outside of memory.
    BulkData,
}

/// An enum representing a primitive value from a DICOM element.
///
/// Multiple elements are contained in a [`smallvec`] vector,
/// conveniently aliased to the type [`C`].
///
/// See the macro [`dicom_value!`](crate::dicom_value)
/// for a more intuitive means of constructing these values.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    /// No data. Usually employed for zero-length values.
    Empty,

    /// A sequence of strings.
    /// Used for AE, AS, PN, SH, CS, LO, UI and UC.
    /// They are joined with a backslash when encoded.
    Strs(C<String>),

    /// A single string.
    /// Used for ST, LT, UT and UR, which are never multi-valued.
    Str(String),

    /// A sequence of unsigned 8-bit integers.
    /// Used for OB and UN.
    U8(C<u8>),

    /// A sequence of signed 16-bit integers.
    /// Used for SS.
    I16(C<i16>),

    /// A sequence of unsigned 16-bit integers.
    /// Used for US and OW.
    U16(C<u16>),

    /// A sequence of signed 32-bit integers.
    /// Used for SL.
    I32(C<i32>),

    /// A sequence of unsigned 32-bit integers.
    /// Used for UL and OL.
    U32(C<u32>),

    /// A sequence of dates.
    /// Used for the DA representation.
    Date(C<NaiveDate>),

    /// A sequence of times.
    /// Used for the TM representation.
    Time(C<NaiveTime>),
}

/// Construct a DICOM primitive value.
///
/// ```
/// # use dicomize_core::{dicom_value, PrimitiveValue};
/// let rows = dicom_value!(U16, 480);
/// assert_eq!(rows, PrimitiveValue::U16([480].as_ref().into()));
/// let uids = dicom_value!(Strs, ["1.2.3".to_string(), "4.5.6".to_string()]);
/// assert_eq!(uids.multiplicity(), 2);
/// ```
#[macro_export]
macro_rules! dicom_value {
    ($typ: ident, [ $($elem: expr),* ]) => {
        {
            use $crate::smallvec::smallvec; // import smallvec macro
            $crate::value::PrimitiveValue :: $typ (smallvec![$($elem,)*])
        }
    };
    ($typ: ident, $elem: expr) => {
        $crate::value::PrimitiveValue :: $typ ($crate::value::C::from_elem($elem, 1))
    };
}

macro_rules! impl_from_for_primitive {
    ($typ: ty, $variant: ident) => {
        impl From<$typ> for PrimitiveValue {
            fn from(value: $typ) -> Self {
                PrimitiveValue::$variant(C::from_elem(value, 1))
            }
        }
    };
}

impl_from_for_primitive!(u8, U8);
impl_from_for_primitive!(u16, U16);
impl_from_for_primitive!(i16, I16);
impl_from_for_primitive!(u32, U32);
impl_from_for_primitive!(i32, I32);
impl_from_for_primitive!(NaiveDate, Date);
impl_from_for_primitive!(NaiveTime, Time);

impl From<String> for PrimitiveValue {
    fn from(value: String) -> Self {
        PrimitiveValue::Str(value)
    }
}

impl From<&str> for PrimitiveValue {
    fn from(value: &str) -> Self {
        PrimitiveValue::Str(value.to_owned())
    }
}

impl From<Vec<u8>> for PrimitiveValue {
    fn from(value: Vec<u8>) -> Self {
        PrimitiveValue::U8(C::from_vec(value))
    }
}

macro_rules! impl_primitive_getters {
    ($name_single: ident, $name_multi: ident, $variant: ident, $ret: ty) => {
        /// Get a single value of the requested type.
        ///
        /// If it contains multiple values,
        /// only the first one is returned.
        /// An error is returned if the variant is not compatible.
        pub fn $name_single(&self) -> Result<$ret, CastValueError> {
            match self {
                PrimitiveValue::$variant(c) if c.is_empty() => Err(CastValueError {
                    requested: stringify!($name_single),
                    got: ValueType::Empty,
                }),
                PrimitiveValue::$variant(c) => Ok(c[0]),
                value => Err(CastValueError {
                    requested: stringify!($name_single),
                    got: value.value_type(),
                }),
            }
        }

        /// Get a sequence of values of the requested type without copying.
        /// An error is returned if the variant is not compatible.
        pub fn $name_multi(&self) -> Result<&[$ret], CastValueError> {
            match self {
                PrimitiveValue::$variant(c) => Ok(&c),
                value => Err(CastValueError {
                    requested: stringify!($name_multi),
                    got: value.value_type(),
                }),
            }
        }
    };
}

impl PrimitiveValue {
    /// Create a single unsigned 16-bit value.
    pub fn new_u16(value: u16) -> Self {
        PrimitiveValue::U16(C::from_elem(value, 1))
    }

    /// Create a single unique identifier or code string value.
    pub fn new_str(value: impl Into<String>) -> Self {
        PrimitiveValue::Strs(C::from_elem(value.into(), 1))
    }

    /// Obtain the number of individual elements. This number may not
    /// match the DICOM value multiplicity in some value representations.
    pub fn multiplicity(&self) -> u32 {
        use self::PrimitiveValue::*;
        match self {
            Empty => 0,
            Str(_) => 1,
            Strs(c) => c.len() as u32,
            U8(c) => c.len() as u32,
            I16(c) => c.len() as u32,
            U16(c) => c.len() as u32,
            I32(c) => c.len() as u32,
            U32(c) => c.len() as u32,
            Date(c) => c.len() as u32,
            Time(c) => c.len() as u32,
        }
    }

    /// Determine the value's type.
    pub fn value_type(&self) -> ValueType {
        use self::PrimitiveValue::*;
        match self {
            Empty => ValueType::Empty,
            Str(_) => ValueType::Str,
            Strs(_) => ValueType::Strs,
            U8(_) => ValueType::U8,
            I16(_) => ValueType::I16,
            U16(_) => ValueType::U16,
            I32(_) => ValueType::I32,
            U32(_) => ValueType::U32,
            Date(_) => ValueType::Date,
            Time(_) => ValueType::Time,
        }
    }

    /// Determine the length of the encoded value in bytes,
    /// before even padding.
    pub fn calculate_byte_len(&self) -> usize {
        use self::PrimitiveValue::*;
        match self {
            Empty => 0,
            U8(c) => c.len(),
            I16(c) => c.len() * 2,
            U16(c) => c.len() * 2,
            I32(c) => c.len() * 4,
            U32(c) => c.len() * 4,
            Date(c) => (c.len() * 9).saturating_sub(1),
            Str(s) => s.len(),
            Strs(c) if c.is_empty() => 0,
            Strs(c) => c.iter().map(|s| s.len() + 1).sum::<usize>() - 1,
            Time(c) if c.is_empty() => 0,
            Time(c) => {
                c.iter()
                    .map(|t| PrimitiveValue::tm_byte_len(*t) + 1)
                    .sum::<usize>()
                    - 1
            }
        }
    }

    fn tm_byte_len(time: NaiveTime) -> usize {
        // HHMMSS, plus a dot and six fraction digits when not whole seconds
        if time.nanosecond() / 1_000 == 0 {
            6
        } else {
            13
        }
    }

    /// Convert the primitive value into a string representation.
    ///
    /// String values already encoded with the `Str` and `Strs` variants
    /// are provided as is, with trailing whitespace and null padding removed.
    /// Other variants are not converted.
    pub fn to_str(&self) -> Result<Cow<str>, CastValueError> {
        match self {
            PrimitiveValue::Str(s) => Ok(Cow::Borrowed(trim_padding(s))),
            PrimitiveValue::Strs(c) if c.len() == 1 => Ok(Cow::Borrowed(trim_padding(&c[0]))),
            PrimitiveValue::Strs(c) => Ok(Cow::Owned(
                c.iter()
                    .map(|s| trim_padding(s))
                    .collect::<Vec<_>>()
                    .join("\\"),
            )),
            value => Err(CastValueError {
                requested: "string",
                got: value.value_type(),
            }),
        }
    }

    impl_primitive_getters!(uint8, uint8_slice, U8, u8);
    impl_primitive_getters!(uint16, uint16_slice, U16, u16);
    impl_primitive_getters!(uint32, uint32_slice, U32, u32);
    impl_primitive_getters!(date, date_slice, Date, NaiveDate);
    impl_primitive_getters!(time, time_slice, Time, NaiveTime);
}

fn trim_padding(s: &str) -> &str {
    s.trim_end_matches(|c: char| c == ' ' || c == '\0')
}

impl HasLength for PrimitiveValue {
    fn length(&self) -> Length {
        Length::defined(self.calculate_byte_len() as u32)
    }
}

/// A reference to a byte range of a file,
/// to be copied verbatim into an element's value when it is written.
///
/// The bytes are never loaded into memory as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkData {
    /// The file holding the data
    pub path: PathBuf,
    /// Byte offset of the data from the start of the file
    pub offset: u64,
    /// Number of bytes, before any padding
    pub length: u64,
}

impl BulkData {
    /// Create a reference to the byte range `offset..offset + length`
    /// of the file at `path`.
    pub fn new(path: impl Into<PathBuf>, offset: u64, length: u64) -> Self {
        BulkData {
            path: path.into(),
            offset,
            length,
        }
    }
}

/// Representation of a full DICOM value,
/// either held in memory or kept in a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Primitive value
    Primitive(PrimitiveValue),
    /// Bytes referenced from a file
    BulkData(BulkData),
}

impl Value {
    /// Obtain the number of individual values.
    pub fn multiplicity(&self) -> u32 {
        match self {
            Value::Primitive(v) => v.multiplicity(),
            Value::BulkData(_) => 1,
        }
    }

    /// Determine the value's type.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Primitive(v) => v.value_type(),
            Value::BulkData(_) => ValueType::BulkData,
        }
    }

    /// Gets a reference to the primitive value.
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Gets a reference to the bulk data reference.
    pub fn bulk_data(&self) -> Option<&BulkData> {
        match self {
            Value::BulkData(v) => Some(v),
            _ => None,
        }
    }

    /// Retrieve the value as a single clean string.
    pub fn to_str(&self) -> Result<Cow<str>, CastValueError> {
        match self {
            Value::Primitive(v) => v.to_str(),
            _ => Err(CastValueError {
                requested: "string",
                got: ValueType::BulkData,
            }),
        }
    }

    /// Retrieve the first unsigned 16-bit integer of the value.
    pub fn uint16(&self) -> Result<u16, CastValueError> {
        match self {
            Value::Primitive(v) => v.uint16(),
            _ => Err(CastValueError {
                requested: "uint16",
                got: ValueType::BulkData,
            }),
        }
    }
}

impl HasLength for Value {
    fn length(&self) -> Length {
        match self {
            Value::Primitive(v) => v.length(),
            // values of 4 GiB or more cannot be expressed
            Value::BulkData(b) => Length(b.length.min(u64::from(u32::MAX - 1)) as u32),
        }
    }
}

impl From<PrimitiveValue> for Value {
    fn from(v: PrimitiveValue) -> Self {
        Value::Primitive(v)
    }
}

impl From<BulkData> for Value {
    fn from(v: BulkData) -> Self {
        Value::BulkData(v)
    }
}
