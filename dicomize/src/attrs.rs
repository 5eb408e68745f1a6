//! Parsing of attribute assignments given in the command line.
use std::str::FromStr;

use dicomize_core::value::C;
use dicomize_core::{DataDictionary, DataElement, PrimitiveValue, Tag, VR};
use dicomize_dictionary_std::StandardDataDictionary;
use dicomize_object::InMemDicomObject;
use snafu::{whatever, OptionExt, ResultExt, Whatever};

/// An assignment of a value to an attribute.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
struct Assignment {
    tag: Tag,
    vr: VR,
    value: String,
}

/// Assignments are parsed with the syntax `«tag»=«value»`,
/// where `«tag»` is either a DICOM tag group-element pair
/// or the respective tag keyword.
/// The value representation is the one in the standard dictionary,
/// or LO for unknown tags.
impl FromStr for Assignment {
    type Err = Whatever;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag_part, value) = s
            .split_once('=')
            .with_whatever_context(|| format!("expected KEYWORD=VALUE, got `{}`", s))?;

        let (tag, vr) = match tag_part.parse::<Tag>() {
            Ok(tag) => (
                tag,
                StandardDataDictionary
                    .by_tag(tag)
                    .map(|e| e.vr)
                    .unwrap_or(VR::LO),
            ),
            Err(_) => {
                let entry = StandardDataDictionary
                    .by_name(tag_part)
                    .with_whatever_context(|| format!("unknown attribute `{}`", tag_part))?;
                (entry.tag, entry.vr)
            }
        };

        Ok(Assignment {
            tag,
            vr,
            value: value.to_owned(),
        })
    }
}

/// Build a data set out of attribute assignments.
pub fn parse_attributes<T>(attrs: &[T]) -> Result<InMemDicomObject, Whatever>
where
    T: AsRef<str>,
{
    let mut obj = InMemDicomObject::new_empty();
    for attr in attrs {
        let assignment: Assignment = attr.as_ref().parse()?;
        obj.put(to_element(assignment)?);
    }
    Ok(obj)
}

fn to_element(assignment: Assignment) -> Result<DataElement, Whatever> {
    let Assignment { tag, vr, value } = assignment;
    let value = match vr {
        VR::LT | VR::ST | VR::UT | VR::UR => PrimitiveValue::from(value),
        VR::AE
        | VR::AS
        | VR::CS
        | VR::DA
        | VR::DS
        | VR::DT
        | VR::IS
        | VR::LO
        | VR::PN
        | VR::SH
        | VR::TM
        | VR::UC
        | VR::UI => PrimitiveValue::Strs(value.split('\\').map(str::to_owned).collect::<C<_>>()),
        VR::US => {
            let us: u16 = value
                .parse()
                .whatever_context("Failed to parse value as US")?;
            PrimitiveValue::from(us)
        }
        VR::SS => {
            let ss: i16 = value
                .parse()
                .whatever_context("Failed to parse value as SS")?;
            PrimitiveValue::from(ss)
        }
        VR::UL => {
            let ul: u32 = value
                .parse()
                .whatever_context("Failed to parse value as UL")?;
            PrimitiveValue::from(ul)
        }
        VR::SL => {
            let sl: i32 = value
                .parse()
                .whatever_context("Failed to parse value as SL")?;
            PrimitiveValue::from(sl)
        }
        VR::SQ => whatever!("Unsupported sequence attribute {}", tag),
        vr => whatever!("Unsupported VR {} for attribute {}", vr, tag),
    };
    Ok(DataElement::new(tag, vr, value))
}
