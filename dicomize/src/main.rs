//! A CLI tool for wrapping JPEG images, MPEG2 videos and PDF documents
//! into DICOM files.
//!
//! Each input file is encapsulated as is, without transcoding,
//! into a new DICOM file named after its SOP Instance UID.
//! All files of one invocation share the same study and series,
//! unless the respective UIDs are given as attributes.
//!
//! ```text
//! dicomize -o out/ -a PatientName=Doe^John -a PatientID=12345 photos/ report.pdf
//! ```
use clap::Parser;
use dicomize_core::uid::generate_uid;
use dicomize_core::VR;
use dicomize_dictionary_std::{tags, uids};
use dicomize_encapsulate::{Encapsulation, Payload, PayloadKind};
use dicomize_object::{FileMetaTableBuilder, InMemDicomObject};
use indicatif::{ProgressBar, ProgressStyle};
use snafu::prelude::*;
use snafu::{Report, Whatever};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

mod attrs;

/// Wrap JPEG, MPEG2 and PDF files into DICOM files
#[derive(Debug, Parser)]
#[command(version)]
struct App {
    /// the files to encapsulate
    /// (directories are searched recursively)
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// the directory of the output files
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    out_dir: PathBuf,
    /// the kind of payload: jpeg, mpeg2 or pdf
    /// [default: inferred from the file extension]
    #[arg(short = 'k', long = "kind")]
    kind: Option<PayloadKind>,
    /// remove application segments (APP0 to APP15) from JPEG images
    #[arg(long = "strip-app-segments")]
    strip_app_segments: bool,
    /// set an attribute of the output files
    /// (example: "PatientName=Doe^John" or "(0010,0020)=12345")
    #[arg(short = 'a', long = "attr", value_name = "KEYWORD=VALUE")]
    attributes: Vec<String>,
    /// the source application entity title in the file meta group
    #[arg(long = "aet")]
    source_ae_title: Option<String>,
    /// stop at the first file which cannot be encapsulated
    #[arg(long = "fail-first")]
    fail_first: bool,
    /// verbose mode
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    /// Could not parse the attributes
    ParseAttributes { source: Whatever },

    #[snafu(display("Could not create output directory '{}'", path.display()))]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not tell the kind of payload of '{}', use --kind", path.display()))]
    UnknownKind { path: PathBuf },

    #[snafu(display("Could not encapsulate '{}'", path.display()))]
    Encapsulate {
        path: PathBuf,
        source: dicomize_encapsulate::Error,
    },
}

/// The options applying to every file of a batch.
#[derive(Debug)]
struct Batch<'a> {
    kind: Option<PayloadKind>,
    strip_app_segments: bool,
    /// the attributes shared by all files
    dataset: InMemDicomObject,
    source_ae_title: Option<&'a str>,
    out_dir: &'a Path,
}

fn main() {
    run().unwrap_or_else(|e| {
        error!("{}", Report::from_error(e));
        std::process::exit(-2);
    });
}

fn run() -> Result<(), Error> {
    let App {
        files,
        out_dir,
        kind,
        strip_app_segments,
        attributes,
        source_ae_title,
        fail_first,
        verbose,
    } = App::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env().add_directive(if verbose {
                LevelFilter::DEBUG.into()
            } else {
                LevelFilter::INFO.into()
            }))
            .finish(),
    )
    .whatever_context("Could not set up global logging subscriber")
    .unwrap_or_else(|e: Whatever| {
        eprintln!("[ERROR] {}", Report::from_error(e));
    });

    let mut dataset = attrs::parse_attributes(&attributes).context(ParseAttributesSnafu)?;
    // one series per batch
    for tag in [tags::STUDY_INSTANCE_UID, tags::SERIES_INSTANCE_UID] {
        if !dataset.contains(tag) {
            dataset.put_str(tag, VR::UI, generate_uid());
        }
    }

    let files = collect_files(files, kind.is_some());
    if files.is_empty() {
        eprintln!("No files to encapsulate");
        std::process::exit(-1);
    }

    std::fs::create_dir_all(&out_dir).context(CreateOutputDirSnafu { path: &out_dir })?;

    let batch = Batch {
        kind,
        strip_app_segments,
        dataset,
        source_ae_title: source_ae_title.as_deref(),
        out_dir: &out_dir,
    };

    let progress_bar = if !verbose {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} {wide_msg}")
                .expect("Invalid progress bar template"),
        );
        pb.enable_steady_tick(Duration::new(0, 480_000_000));
        Some(pb)
    } else {
        None
    };

    let mut failed = 0_usize;
    for file in &files {
        if let Some(pb) = &progress_bar {
            pb.set_message(file.display().to_string());
        }
        match dicomize_file(&batch, file) {
            Ok(output) => {
                debug!("{} -> {}", file.display(), output.display());
            }
            Err(e) => {
                error!("{}", Report::from_error(e));
                failed += 1;
                if fail_first {
                    std::process::exit(-2);
                }
            }
        }
        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done")
    };

    info!(
        "{} of {} files encapsulated into '{}'",
        files.len() - failed,
        files.len(),
        out_dir.display()
    );

    if failed > 0 {
        std::process::exit(-2);
    }
    Ok(())
}

/// Gather the input files,
/// walking directories recursively.
///
/// Files found in directories are only taken
/// if the kind of payload is known
/// or can be inferred from their extension.
fn collect_files(files: Vec<PathBuf>, kind_given: bool) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for file in files {
        if file.is_dir() {
            for entry in WalkDir::new(file.as_path())
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|f| !f.file_type().is_dir())
            {
                if kind_given || PayloadKind::from_path(entry.path()).is_some() {
                    out.push(entry.into_path());
                } else {
                    debug!("Skipping '{}'", entry.path().display());
                }
            }
        } else {
            out.push(file);
        }
    }
    out
}

/// Encapsulate a single file,
/// returning the path of the new DICOM file.
fn dicomize_file(batch: &Batch, path: &Path) -> Result<PathBuf, Error> {
    let kind = batch
        .kind
        .or_else(|| PayloadKind::from_path(path))
        .context(UnknownKindSnafu { path })?;
    let kind = match kind {
        PayloadKind::Jpeg { .. } => PayloadKind::Jpeg {
            strip_app_segments: batch.strip_app_segments,
        },
        kind => kind,
    };

    let mut dataset = batch.dataset.clone();
    if kind == PayloadKind::Mpeg2 && !dataset.contains(tags::SOP_CLASS_UID) {
        dataset.put_str(
            tags::SOP_CLASS_UID,
            VR::UI,
            uids::VIDEO_PHOTOGRAPHIC_IMAGE_STORAGE,
        );
    }
    if batch.strip_app_segments && !matches!(kind, PayloadKind::Jpeg { .. }) {
        warn!(
            "Ignoring --strip-app-segments for {} payload '{}'",
            kind,
            path.display()
        );
    }

    let mut meta = FileMetaTableBuilder::new();
    if let Some(ae_title) = batch.source_ae_title {
        meta = meta.source_application_entity_title(ae_title);
    }

    let payload = Payload::open(path).context(EncapsulateSnafu { path })?;
    let encapsulation =
        Encapsulation::with_meta(kind, dataset, payload, meta).context(EncapsulateSnafu { path })?;
    let output = batch
        .out_dir
        .join(format!("{}.dcm", encapsulation.sop_instance_uid()));
    encapsulation
        .write_to_file(&output)
        .context(EncapsulateSnafu { path })?;
    Ok(output)
}
