//! This module contains the concept of a DICOM data dictionary.
//!
//! A dictionary maps attribute keywords to tags and value representations,
//! so that attributes can be named by humans
//! (for instance in command line arguments)
//! and still be encoded with their proper VR.

use crate::header::{Tag, VR};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt::Debug;
use std::str::FromStr;

/// An error returned when parsing an invalid tag expression.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ParseTagError {
    #[snafu(display("Not enough tag components, expected tag (group, element)"))]
    MissingTag { backtrace: Backtrace },
    #[snafu(display("Not enough tag components, expected tag element"))]
    MissingTagElement { backtrace: Backtrace },
    #[snafu(display(
        "tag component `group` has an invalid length: got {} but must be 4",
        got
    ))]
    InvalidGroupLength { got: usize, backtrace: Backtrace },
    #[snafu(display(
        "tag component `element` has an invalid length: got {} but must be 4",
        got
    ))]
    InvalidElementLength { got: usize, backtrace: Backtrace },
    #[snafu(display("invalid tag component `group`"))]
    InvalidTagGroup {
        backtrace: Backtrace,
        source: std::num::ParseIntError,
    },
    #[snafu(display("invalid tag component `element`"))]
    InvalidTagElement {
        backtrace: Backtrace,
        source: std::num::ParseIntError,
    },
}

/// Parse a tag in one of the forms
/// `(gggg,eeee)`, `gggg,eeee` or `ggggeeee`,
/// where each component is hexadecimal.
impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(mut s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('(') && s.ends_with(')') {
            s = &s[1..s.len() - 1];
        }
        let (group, elem) = if s.len() == 8 && !s.contains(',') {
            s.split_at(4)
        } else {
            let mut parts = s.split(',');
            let group = parts.next().context(MissingTagSnafu)?;
            let elem = parts.next().context(MissingTagElementSnafu)?;
            (group, elem)
        };
        ensure!(
            group.len() == 4,
            InvalidGroupLengthSnafu { got: group.len() }
        );
        ensure!(
            elem.len() == 4,
            InvalidElementLengthSnafu { got: elem.len() }
        );
        let group = u16::from_str_radix(group, 16).context(InvalidTagGroupSnafu)?;
        let elem = u16::from_str_radix(elem, 16).context(InvalidTagElementSnafu)?;
        Ok(Tag(group, elem))
    }
}

/// A dictionary entry with borrowed string fields.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag
    pub tag: Tag,
    /// The alias of the attribute, with no spaces, usually in UpperCamelCase
    pub alias: &'a str,
    /// The _typical_ value representation of the attribute
    pub vr: VR,
}

/// Type trait for a dictionary of DICOM attributes.
pub trait DataDictionary: Debug {
    /// Fetch an entry by its usual alias (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases are usually case sensitive and not separated by spaces.
    fn by_name(&self, name: &str) -> Option<&DataDictionaryEntryRef<'static>>;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&DataDictionaryEntryRef<'static>>;

    /// Fetch an entry by its alias or by DICOM tag expression.
    ///
    /// This method accepts a tag descriptor in any of the following formats:
    ///
    /// - `(gggg,eeee)`:
    ///   a 4-digit hexadecimal group part
    ///   and a 4-digit hexadecimal element part
    ///   surrounded by parentheses
    /// - `gggg,eeee` or `ggggeeee`:
    ///   the same, not surrounded by parentheses
    /// - _`KeywordName`_:
    ///   an exact match (case sensitive) by DICOM tag keyword
    ///
    /// When failing to identify the intended syntax or the tag keyword,
    /// `None` is returned.
    fn by_expr(&self, tag: &str) -> Option<&DataDictionaryEntryRef<'static>> {
        match tag.parse() {
            Ok(tag) => self.by_tag(tag),
            Err(_) => self.by_name(tag),
        }
    }
}
