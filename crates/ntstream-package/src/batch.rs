//! Directory-level pack and unpack.
//!
//! Both drivers are best effort: a texture that fails is reported and
//! skipped, and the rest of the batch carries on. Only a missing top-level
//! input aborts.

use std::fs;
use std::path::{Path, PathBuf};

use glob::MatchOptions;
use ntstream_common::FileKind;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::cache::{PackageCache, PACKAGE_EXTENSION};
use crate::split::{split_dds, SplitTexture};
use crate::{Error, InfoRecord, Package, Result};

/// Name of the directory pack writes into, inside the input directory.
pub const OUTPUT_DIR_NAME: &str = "Output";

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that were processed successfully.
    pub succeeded: Vec<PathBuf>,
    /// Files that failed, with the reason.
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    fn fail(&mut self, path: PathBuf, error: Error) {
        warn!(file = %file_name(&path), "{error}");
        self.failed.push((path, error));
    }
}

/// Result of packing a directory.
#[derive(Debug)]
pub struct PackOutput {
    /// The package file that was written.
    pub package_path: PathBuf,
    /// Per-texture results.
    pub report: BatchReport,
}

/// List the `*.dds` files directly inside `directory`, sorted by path.
pub fn dds_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&glob::Pattern::escape(&directory.to_string_lossy())).join("*.dds");
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let mut files = glob::glob_with(&pattern.to_string_lossy(), options)?
        .map(|entry| entry.map_err(|e| Error::Io(e.into_error())))
        .filter(|entry| entry.as_ref().map_or(true, |path| path.is_file()))
        .collect::<Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn split_file(path: &Path, package_name: &str) -> Result<SplitTexture> {
    let data = fs::read(path)?;
    split_dds(&data, &file_name(path), package_name)
}

/// Pack every DDS file in `input` into one package plus one info file each.
///
/// The package is named `name`, or after the directory when `name` is
/// `None` or blank. Outputs go to `input/Output/`. `progress` is called
/// once per input file, possibly from several threads.
pub fn pack_directory<F>(input: &Path, name: Option<&str>, progress: F) -> Result<PackOutput>
where
    F: Fn(&Path) + Sync,
{
    if !input.is_dir() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }

    let package_name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| file_name(&input.canonicalize().unwrap_or_else(|_| input.to_path_buf())));

    let files = dds_files(input)?;
    info!(
        package = %package_name,
        files = files.len(),
        "packing {}",
        input.display()
    );

    // Splitting is independent per texture; assembly below keeps file order
    let splits: Vec<(PathBuf, Result<SplitTexture>)> = files
        .into_par_iter()
        .map(|path| {
            let split = split_file(&path, &package_name);
            progress(&path);
            (path, split)
        })
        .collect();

    let mut report = BatchReport::default();
    let mut package = Package::new();
    let mut infos = Vec::with_capacity(splits.len());

    for (path, split) in splits {
        match split.and_then(|texture| package.add_texture(texture)) {
            Ok(info) => infos.push((path, info)),
            Err(error) => report.fail(path, error),
        }
    }

    let output_dir = input.join(OUTPUT_DIR_NAME);
    fs::create_dir_all(&output_dir)?;

    let package_path = output_dir.join(format!("{package_name}.{PACKAGE_EXTENSION}"));
    package.write(&package_path)?;
    info!(
        path = %package_path.display(),
        entries = package.entries.len(),
        blocks = package.blocks.len(),
        "wrote package"
    );

    for (path, info) in infos {
        match info.write(output_dir.join(&info.name)) {
            Ok(()) => report.succeeded.push(path),
            Err(error) => report.fail(path, error),
        }
    }

    Ok(PackOutput {
        package_path,
        report,
    })
}

/// Restore DDS files from info files.
///
/// `input` is a single info file or a directory whose `*.dds` files are
/// unpacked. Packages are looked up in `package_dir` (the current directory
/// when `None`). Restored files go to `output_dir` under their own name, or
/// replace the info file when `output_dir` is `None`.
pub fn unpack_path<F>(
    input: &Path,
    package_dir: Option<&Path>,
    output_dir: Option<&Path>,
    mut progress: F,
) -> Result<BatchReport>
where
    F: FnMut(&Path),
{
    let files = if input.is_file() {
        vec![input.to_path_buf()]
    } else if input.is_dir() {
        dds_files(input)?
    } else {
        return Err(Error::InputNotFound(input.to_path_buf()));
    };

    if let Some(output_dir) = output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let mut cache = PackageCache::new(package_dir.map(Path::to_path_buf));
    let mut report = BatchReport::default();

    for path in files {
        let result = unpack_file(&path, &mut cache, output_dir);
        progress(&path);

        match result {
            Ok(target) => {
                info!(file = %file_name(&path), target = %target.display(), "unpacked");
                report.succeeded.push(path);
            }
            Err(error) => report.fail(path, error),
        }
    }

    Ok(report)
}

fn unpack_file(path: &Path, cache: &mut PackageCache, output_dir: Option<&Path>) -> Result<PathBuf> {
    let data = fs::read(path)?;
    if FileKind::detect(&data) != Some(FileKind::Info) {
        return Err(Error::UnexpectedKind {
            expected: FileKind::Info,
        });
    }

    let info = InfoRecord::parse(file_name(path), &data)?;
    let package = cache.get(&info.package_name)?;
    let dds = info.unpack(package)?;

    let target = match output_dir {
        Some(directory) => directory.join(&info.name),
        None => path.to_path_buf(),
    };
    fs::write(&target, dds)?;
    Ok(target)
}
