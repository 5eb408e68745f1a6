//! Data element tag declarations
//!
//! Each constant is named after the attribute's keyword
//! in screaming snake case.

use dicomize_core::dictionary::DataDictionaryEntryRef;
use dicomize_core::header::{Tag, VR};

/// FileMetaInformationGroupLength (0002,0000) UL
#[rustfmt::skip]
pub const FILE_META_INFORMATION_GROUP_LENGTH: Tag = Tag(0x0002, 0x0000);
/// FileMetaInformationVersion (0002,0001) OB
#[rustfmt::skip]
pub const FILE_META_INFORMATION_VERSION: Tag = Tag(0x0002, 0x0001);
/// MediaStorageSOPClassUID (0002,0002) UI
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_CLASS_UID: Tag = Tag(0x0002, 0x0002);
/// MediaStorageSOPInstanceUID (0002,0003) UI
#[rustfmt::skip]
pub const MEDIA_STORAGE_SOP_INSTANCE_UID: Tag = Tag(0x0002, 0x0003);
/// TransferSyntaxUID (0002,0010) UI
#[rustfmt::skip]
pub const TRANSFER_SYNTAX_UID: Tag = Tag(0x0002, 0x0010);
/// ImplementationClassUID (0002,0012) UI
#[rustfmt::skip]
pub const IMPLEMENTATION_CLASS_UID: Tag = Tag(0x0002, 0x0012);
/// ImplementationVersionName (0002,0013) SH
#[rustfmt::skip]
pub const IMPLEMENTATION_VERSION_NAME: Tag = Tag(0x0002, 0x0013);
/// SourceApplicationEntityTitle (0002,0016) AE
#[rustfmt::skip]
pub const SOURCE_APPLICATION_ENTITY_TITLE: Tag = Tag(0x0002, 0x0016);
/// SpecificCharacterSet (0008,0005) CS
#[rustfmt::skip]
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
/// ImageType (0008,0008) CS
#[rustfmt::skip]
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);
/// InstanceCreationDate (0008,0012) DA
#[rustfmt::skip]
pub const INSTANCE_CREATION_DATE: Tag = Tag(0x0008, 0x0012);
/// InstanceCreationTime (0008,0013) TM
#[rustfmt::skip]
pub const INSTANCE_CREATION_TIME: Tag = Tag(0x0008, 0x0013);
/// SOPClassUID (0008,0016) UI
#[rustfmt::skip]
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
/// SOPInstanceUID (0008,0018) UI
#[rustfmt::skip]
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
/// StudyDate (0008,0020) DA
#[rustfmt::skip]
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
/// SeriesDate (0008,0021) DA
#[rustfmt::skip]
pub const SERIES_DATE: Tag = Tag(0x0008, 0x0021);
/// AcquisitionDate (0008,0022) DA
#[rustfmt::skip]
pub const ACQUISITION_DATE: Tag = Tag(0x0008, 0x0022);
/// ContentDate (0008,0023) DA
#[rustfmt::skip]
pub const CONTENT_DATE: Tag = Tag(0x0008, 0x0023);
/// AcquisitionDateTime (0008,002A) DT
#[rustfmt::skip]
pub const ACQUISITION_DATE_TIME: Tag = Tag(0x0008, 0x002A);
/// StudyTime (0008,0030) TM
#[rustfmt::skip]
pub const STUDY_TIME: Tag = Tag(0x0008, 0x0030);
/// SeriesTime (0008,0031) TM
#[rustfmt::skip]
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);
/// AcquisitionTime (0008,0032) TM
#[rustfmt::skip]
pub const ACQUISITION_TIME: Tag = Tag(0x0008, 0x0032);
/// ContentTime (0008,0033) TM
#[rustfmt::skip]
pub const CONTENT_TIME: Tag = Tag(0x0008, 0x0033);
/// AccessionNumber (0008,0050) SH
#[rustfmt::skip]
pub const ACCESSION_NUMBER: Tag = Tag(0x0008, 0x0050);
/// Modality (0008,0060) CS
#[rustfmt::skip]
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
/// ConversionType (0008,0064) CS
#[rustfmt::skip]
pub const CONVERSION_TYPE: Tag = Tag(0x0008, 0x0064);
/// Manufacturer (0008,0070) LO
#[rustfmt::skip]
pub const MANUFACTURER: Tag = Tag(0x0008, 0x0070);
/// InstitutionName (0008,0080) LO
#[rustfmt::skip]
pub const INSTITUTION_NAME: Tag = Tag(0x0008, 0x0080);
/// ReferringPhysicianName (0008,0090) PN
#[rustfmt::skip]
pub const REFERRING_PHYSICIAN_NAME: Tag = Tag(0x0008, 0x0090);
/// StationName (0008,1010) SH
#[rustfmt::skip]
pub const STATION_NAME: Tag = Tag(0x0008, 0x1010);
/// StudyDescription (0008,1030) LO
#[rustfmt::skip]
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
/// SeriesDescription (0008,103E) LO
#[rustfmt::skip]
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);
/// InstitutionalDepartmentName (0008,1040) LO
#[rustfmt::skip]
pub const INSTITUTIONAL_DEPARTMENT_NAME: Tag = Tag(0x0008, 0x1040);
/// OperatorsName (0008,1070) PN
#[rustfmt::skip]
pub const OPERATORS_NAME: Tag = Tag(0x0008, 0x1070);
/// ManufacturerModelName (0008,1090) LO
#[rustfmt::skip]
pub const MANUFACTURER_MODEL_NAME: Tag = Tag(0x0008, 0x1090);
/// PatientName (0010,0010) PN
#[rustfmt::skip]
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
/// PatientID (0010,0020) LO
#[rustfmt::skip]
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
/// IssuerOfPatientID (0010,0021) LO
#[rustfmt::skip]
pub const ISSUER_OF_PATIENT_ID: Tag = Tag(0x0010, 0x0021);
/// PatientBirthDate (0010,0030) DA
#[rustfmt::skip]
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
/// PatientSex (0010,0040) CS
#[rustfmt::skip]
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);
/// PatientAge (0010,1010) AS
#[rustfmt::skip]
pub const PATIENT_AGE: Tag = Tag(0x0010, 0x1010);
/// PatientComments (0010,4000) LT
#[rustfmt::skip]
pub const PATIENT_COMMENTS: Tag = Tag(0x0010, 0x4000);
/// BodyPartExamined (0018,0015) CS
#[rustfmt::skip]
pub const BODY_PART_EXAMINED: Tag = Tag(0x0018, 0x0015);
/// DeviceSerialNumber (0018,1000) LO
#[rustfmt::skip]
pub const DEVICE_SERIAL_NUMBER: Tag = Tag(0x0018, 0x1000);
/// SoftwareVersions (0018,1020) LO
#[rustfmt::skip]
pub const SOFTWARE_VERSIONS: Tag = Tag(0x0018, 0x1020);
/// FrameTime (0018,1063) DS
#[rustfmt::skip]
pub const FRAME_TIME: Tag = Tag(0x0018, 0x1063);
/// ContentQualification (0018,9004) CS
#[rustfmt::skip]
pub const CONTENT_QUALIFICATION: Tag = Tag(0x0018, 0x9004);
/// StudyInstanceUID (0020,000D) UI
#[rustfmt::skip]
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
/// SeriesInstanceUID (0020,000E) UI
#[rustfmt::skip]
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
/// StudyID (0020,0010) SH
#[rustfmt::skip]
pub const STUDY_ID: Tag = Tag(0x0020, 0x0010);
/// SeriesNumber (0020,0011) IS
#[rustfmt::skip]
pub const SERIES_NUMBER: Tag = Tag(0x0020, 0x0011);
/// AcquisitionNumber (0020,0012) IS
#[rustfmt::skip]
pub const ACQUISITION_NUMBER: Tag = Tag(0x0020, 0x0012);
/// InstanceNumber (0020,0013) IS
#[rustfmt::skip]
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);
/// Laterality (0020,0060) CS
#[rustfmt::skip]
pub const LATERALITY: Tag = Tag(0x0020, 0x0060);
/// ImageLaterality (0020,0062) CS
#[rustfmt::skip]
pub const IMAGE_LATERALITY: Tag = Tag(0x0020, 0x0062);
/// ImageComments (0020,4000) LT
#[rustfmt::skip]
pub const IMAGE_COMMENTS: Tag = Tag(0x0020, 0x4000);
/// SamplesPerPixel (0028,0002) US
#[rustfmt::skip]
pub const SAMPLES_PER_PIXEL: Tag = Tag(0x0028, 0x0002);
/// PhotometricInterpretation (0028,0004) CS
#[rustfmt::skip]
pub const PHOTOMETRIC_INTERPRETATION: Tag = Tag(0x0028, 0x0004);
/// PlanarConfiguration (0028,0006) US
#[rustfmt::skip]
pub const PLANAR_CONFIGURATION: Tag = Tag(0x0028, 0x0006);
/// NumberOfFrames (0028,0008) IS
#[rustfmt::skip]
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
/// FrameIncrementPointer (0028,0009) AT
#[rustfmt::skip]
pub const FRAME_INCREMENT_POINTER: Tag = Tag(0x0028, 0x0009);
/// Rows (0028,0010) US
#[rustfmt::skip]
pub const ROWS: Tag = Tag(0x0028, 0x0010);
/// Columns (0028,0011) US
#[rustfmt::skip]
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);
/// BitsAllocated (0028,0100) US
#[rustfmt::skip]
pub const BITS_ALLOCATED: Tag = Tag(0x0028, 0x0100);
/// BitsStored (0028,0101) US
#[rustfmt::skip]
pub const BITS_STORED: Tag = Tag(0x0028, 0x0101);
/// HighBit (0028,0102) US
#[rustfmt::skip]
pub const HIGH_BIT: Tag = Tag(0x0028, 0x0102);
/// PixelRepresentation (0028,0103) US
#[rustfmt::skip]
pub const PIXEL_REPRESENTATION: Tag = Tag(0x0028, 0x0103);
/// BurnedInAnnotation (0028,0301) CS
#[rustfmt::skip]
pub const BURNED_IN_ANNOTATION: Tag = Tag(0x0028, 0x0301);
/// LossyImageCompression (0028,2110) CS
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION: Tag = Tag(0x0028, 0x2110);
/// LossyImageCompressionRatio (0028,2112) DS
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION_RATIO: Tag = Tag(0x0028, 0x2112);
/// LossyImageCompressionMethod (0028,2114) CS
#[rustfmt::skip]
pub const LOSSY_IMAGE_COMPRESSION_METHOD: Tag = Tag(0x0028, 0x2114);
/// DocumentTitle (0042,0010) ST
#[rustfmt::skip]
pub const DOCUMENT_TITLE: Tag = Tag(0x0042, 0x0010);
/// EncapsulatedDocument (0042,0011) OB
#[rustfmt::skip]
pub const ENCAPSULATED_DOCUMENT: Tag = Tag(0x0042, 0x0011);
/// MIMETypeOfEncapsulatedDocument (0042,0012) LO
#[rustfmt::skip]
pub const MIME_TYPE_OF_ENCAPSULATED_DOCUMENT: Tag = Tag(0x0042, 0x0012);
/// PixelData (7FE0,0010) OB
#[rustfmt::skip]
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

type E = DataDictionaryEntryRef<'static>;

#[rustfmt::skip]
pub(crate) const ENTRIES: &[E] = &[
    E { tag: FILE_META_INFORMATION_GROUP_LENGTH, alias: "FileMetaInformationGroupLength", vr: VR::UL },
    E { tag: FILE_META_INFORMATION_VERSION, alias: "FileMetaInformationVersion", vr: VR::OB },
    E { tag: MEDIA_STORAGE_SOP_CLASS_UID, alias: "MediaStorageSOPClassUID", vr: VR::UI },
    E { tag: MEDIA_STORAGE_SOP_INSTANCE_UID, alias: "MediaStorageSOPInstanceUID", vr: VR::UI },
    E { tag: TRANSFER_SYNTAX_UID, alias: "TransferSyntaxUID", vr: VR::UI },
    E { tag: IMPLEMENTATION_CLASS_UID, alias: "ImplementationClassUID", vr: VR::UI },
    E { tag: IMPLEMENTATION_VERSION_NAME, alias: "ImplementationVersionName", vr: VR::SH },
    E { tag: SOURCE_APPLICATION_ENTITY_TITLE, alias: "SourceApplicationEntityTitle", vr: VR::AE },
    E { tag: SPECIFIC_CHARACTER_SET, alias: "SpecificCharacterSet", vr: VR::CS },
    E { tag: IMAGE_TYPE, alias: "ImageType", vr: VR::CS },
    E { tag: INSTANCE_CREATION_DATE, alias: "InstanceCreationDate", vr: VR::DA },
    E { tag: INSTANCE_CREATION_TIME, alias: "InstanceCreationTime", vr: VR::TM },
    E { tag: SOP_CLASS_UID, alias: "SOPClassUID", vr: VR::UI },
    E { tag: SOP_INSTANCE_UID, alias: "SOPInstanceUID", vr: VR::UI },
    E { tag: STUDY_DATE, alias: "StudyDate", vr: VR::DA },
    E { tag: SERIES_DATE, alias: "SeriesDate", vr: VR::DA },
    E { tag: ACQUISITION_DATE, alias: "AcquisitionDate", vr: VR::DA },
    E { tag: CONTENT_DATE, alias: "ContentDate", vr: VR::DA },
    E { tag: ACQUISITION_DATE_TIME, alias: "AcquisitionDateTime", vr: VR::DT },
    E { tag: STUDY_TIME, alias: "StudyTime", vr: VR::TM },
    E { tag: SERIES_TIME, alias: "SeriesTime", vr: VR::TM },
    E { tag: ACQUISITION_TIME, alias: "AcquisitionTime", vr: VR::TM },
    E { tag: CONTENT_TIME, alias: "ContentTime", vr: VR::TM },
    E { tag: ACCESSION_NUMBER, alias: "AccessionNumber", vr: VR::SH },
    E { tag: MODALITY, alias: "Modality", vr: VR::CS },
    E { tag: CONVERSION_TYPE, alias: "ConversionType", vr: VR::CS },
    E { tag: MANUFACTURER, alias: "Manufacturer", vr: VR::LO },
    E { tag: INSTITUTION_NAME, alias: "InstitutionName", vr: VR::LO },
    E { tag: REFERRING_PHYSICIAN_NAME, alias: "ReferringPhysicianName", vr: VR::PN },
    E { tag: STATION_NAME, alias: "StationName", vr: VR::SH },
    E { tag: STUDY_DESCRIPTION, alias: "StudyDescription", vr: VR::LO },
    E { tag: SERIES_DESCRIPTION, alias: "SeriesDescription", vr: VR::LO },
    E { tag: INSTITUTIONAL_DEPARTMENT_NAME, alias: "InstitutionalDepartmentName", vr: VR::LO },
    E { tag: OPERATORS_NAME, alias: "OperatorsName", vr: VR::PN },
    E { tag: MANUFACTURER_MODEL_NAME, alias: "ManufacturerModelName", vr: VR::LO },
    E { tag: PATIENT_NAME, alias: "PatientName", vr: VR::PN },
    E { tag: PATIENT_ID, alias: "PatientID", vr: VR::LO },
    E { tag: ISSUER_OF_PATIENT_ID, alias: "IssuerOfPatientID", vr: VR::LO },
    E { tag: PATIENT_BIRTH_DATE, alias: "PatientBirthDate", vr: VR::DA },
    E { tag: PATIENT_SEX, alias: "PatientSex", vr: VR::CS },
    E { tag: PATIENT_AGE, alias: "PatientAge", vr: VR::AS },
    E { tag: PATIENT_COMMENTS, alias: "PatientComments", vr: VR::LT },
    E { tag: BODY_PART_EXAMINED, alias: "BodyPartExamined", vr: VR::CS },
    E { tag: DEVICE_SERIAL_NUMBER, alias: "DeviceSerialNumber", vr: VR::LO },
    E { tag: SOFTWARE_VERSIONS, alias: "SoftwareVersions", vr: VR::LO },
    E { tag: FRAME_TIME, alias: "FrameTime", vr: VR::DS },
    E { tag: CONTENT_QUALIFICATION, alias: "ContentQualification", vr: VR::CS },
    E { tag: STUDY_INSTANCE_UID, alias: "StudyInstanceUID", vr: VR::UI },
    E { tag: SERIES_INSTANCE_UID, alias: "SeriesInstanceUID", vr: VR::UI },
    E { tag: STUDY_ID, alias: "StudyID", vr: VR::SH },
    E { tag: SERIES_NUMBER, alias: "SeriesNumber", vr: VR::IS },
    E { tag: ACQUISITION_NUMBER, alias: "AcquisitionNumber", vr: VR::IS },
    E { tag: INSTANCE_NUMBER, alias: "InstanceNumber", vr: VR::IS },
    E { tag: LATERALITY, alias: "Laterality", vr: VR::CS },
    E { tag: IMAGE_LATERALITY, alias: "ImageLaterality", vr: VR::CS },
    E { tag: IMAGE_COMMENTS, alias: "ImageComments", vr: VR::LT },
    E { tag: SAMPLES_PER_PIXEL, alias: "SamplesPerPixel", vr: VR::US },
    E { tag: PHOTOMETRIC_INTERPRETATION, alias: "PhotometricInterpretation", vr: VR::CS },
    E { tag: PLANAR_CONFIGURATION, alias: "PlanarConfiguration", vr: VR::US },
    E { tag: NUMBER_OF_FRAMES, alias: "NumberOfFrames", vr: VR::IS },
    E { tag: FRAME_INCREMENT_POINTER, alias: "FrameIncrementPointer", vr: VR::AT },
    E { tag: ROWS, alias: "Rows", vr: VR::US },
    E { tag: COLUMNS, alias: "Columns", vr: VR::US },
    E { tag: BITS_ALLOCATED, alias: "BitsAllocated", vr: VR::US },
    E { tag: BITS_STORED, alias: "BitsStored", vr: VR::US },
    E { tag: HIGH_BIT, alias: "HighBit", vr: VR::US },
    E { tag: PIXEL_REPRESENTATION, alias: "PixelRepresentation", vr: VR::US },
    E { tag: BURNED_IN_ANNOTATION, alias: "BurnedInAnnotation", vr: VR::CS },
    E { tag: LOSSY_IMAGE_COMPRESSION, alias: "LossyImageCompression", vr: VR::CS },
    E { tag: LOSSY_IMAGE_COMPRESSION_RATIO, alias: "LossyImageCompressionRatio", vr: VR::DS },
    E { tag: LOSSY_IMAGE_COMPRESSION_METHOD, alias: "LossyImageCompressionMethod", vr: VR::CS },
    E { tag: DOCUMENT_TITLE, alias: "DocumentTitle", vr: VR::ST },
    E { tag: ENCAPSULATED_DOCUMENT, alias: "EncapsulatedDocument", vr: VR::OB },
    E { tag: MIME_TYPE_OF_ENCAPSULATED_DOCUMENT, alias: "MIMETypeOfEncapsulatedDocument", vr: VR::LO },
    E { tag: PIXEL_DATA, alias: "PixelData", vr: VR::OB },
];
