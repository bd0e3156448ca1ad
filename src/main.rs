//! ntstream CLI - Command-line tool for streamed DDS textures.
//!
//! This is the main entry point for the ntstream command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ntstream::dds::{DdsHeader, DdsPixelFormat};
use ntstream::package::dds_files;
use ntstream::prelude::*;

/// ntstream - split DDS textures into streaming info files and packages
#[derive(Parser)]
#[command(name = "ntstream")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack every DDS file in a directory into one package
    Pack {
        /// Directory containing the DDS files
        input: PathBuf,

        /// Package name (defaults to the directory name)
        name: Option<String>,
    },

    /// Restore DDS files from info files and their package
    Unpack {
        /// Info file, or a directory of info files
        input: PathBuf,

        /// Directory containing the packages
        #[arg(env = "NTSTREAM_PACKAGE_DIR")]
        package_dir: Option<PathBuf>,

        /// Write restored files here instead of replacing the info files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the contents of an info file, package or DDS file
    Info {
        /// File to inspect
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Pack { input, name } => {
            cmd_pack(&input, name.as_deref())?;
        }
        Commands::Unpack {
            input,
            package_dir,
            output,
        } => {
            cmd_unpack(&input, package_dir.as_deref(), output.as_deref())?;
        }
        Commands::Info { file, json } => {
            cmd_info(&file, json)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn cmd_pack(input: &Path, name: Option<&str>) -> Result<()> {
    if !input.is_dir() {
        anyhow::bail!("Input directory {} does not exist", input.display());
    }

    let total = dds_files(input).context("Failed to list DDS files")?.len();
    let pb = progress_bar(total)?;

    let start = Instant::now();
    let output = pack_directory(input, name, |_| pb.inc(1)).context("Failed to pack directory")?;
    pb.finish_and_clear();

    println!(
        "Packed {} textures into {} in {:?} ({} failed)",
        output.report.succeeded.len(),
        output.package_path.display(),
        start.elapsed(),
        output.report.failed.len()
    );

    Ok(())
}

fn cmd_unpack(input: &Path, package_dir: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let total = if input.is_file() {
        1
    } else if input.is_dir() {
        dds_files(input).context("Failed to list info files")?.len()
    } else {
        anyhow::bail!("Info file or directory {} does not exist", input.display());
    };
    let pb = progress_bar(total)?;

    let start = Instant::now();
    let report = unpack_path(input, package_dir, output, |_| pb.inc(1)).context("Failed to unpack")?;
    pb.finish_and_clear();

    println!(
        "Unpacked {} textures in {:?} ({} failed)",
        report.succeeded.len(),
        start.elapsed(),
        report.failed.len()
    );

    Ok(())
}

fn cmd_info(path: &Path, as_json: bool) -> Result<()> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let kind = FileKind::detect(&data);
    debug!(path = %path.display(), ?kind, size = data.len(), "inspecting file");

    match kind {
        Some(FileKind::Package) => {
            let package = Package::parse(&data).context("Failed to parse package")?;
            if as_json {
                print_json(&package_json(&package))?;
            } else {
                print_package(&package);
            }
        }
        Some(FileKind::Info) => {
            let info = InfoRecord::parse(file_name, &data).context("Failed to parse info file")?;
            let dds = info.dds().context("Failed to parse embedded DDS header")?;
            if as_json {
                print_json(&json!({
                    "kind": "info",
                    "name": info.base_name(),
                    "package_name": info.package_name,
                    "mip4x4_index": info.mip4x4_index,
                    "mip4x4_size": info.mip4x4.len(),
                    "dds": dds_json(&dds),
                }))?;
            } else {
                println!("===== NTSI file =====");
                println!("Name: {}", info.base_name());
                println!("Package Name: {}", info.package_name);
                println!("Mip 4x4 index: {}", info.mip4x4_index);
                println!("Mip 4x4 data size: {}", info.mip4x4.len());
                println!();
                print_dds(&dds);
            }
        }
        Some(FileKind::Dds) => {
            let dds = Dds::parse(&data).context("Failed to parse DDS header")?;
            let mip_sizes = dds.mip_sizes();
            if as_json {
                let mut value = json!({ "kind": "dds", "dds": dds_json(&dds) });
                value["mip_sizes"] = match &mip_sizes {
                    Ok(sizes) => json!(sizes),
                    Err(e) => json!({ "error": e.to_string() }),
                };
                print_json(&value)?;
            } else {
                print_dds(&dds);
                println!();
                println!("===== Mip levels =====");
                match mip_sizes {
                    Ok(sizes) => {
                        let mut width = dds.width();
                        for (level, size) in sizes.iter().enumerate() {
                            println!("{level:>3}: {:>5}px {size:>10} bytes", width.max(1));
                            width >>= 1;
                        }
                        println!("Total: {} bytes", sizes.iter().sum::<u64>());
                    }
                    Err(e) => println!("Cannot size mip levels: {e}"),
                }
            }
        }
        None => {
            eprintln!("\"{file_name}\" is not an NTSI, NTSP or DDS file");
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a table with a leading index column; `right` selects right-aligned columns.
fn print_table(rows: &[Vec<String>], headers: &[&str], right: &[bool]) {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| rows.iter().map(|r| r[i].len()).fold(h.len(), usize::max))
        .collect();

    let mut line = String::from(" Index  ");
    for (header, width) in headers.iter().zip(&widths) {
        line.push_str(&format!(" {header:<width$}  "));
    }
    println!("{}", line.trim_end());

    for (index, row) in rows.iter().enumerate() {
        let mut line = format!("{index:>6}  ");
        for ((cell, width), right) in row.iter().zip(&widths).zip(right) {
            if *right {
                line.push_str(&format!("{cell:>w$}  ", w = width + 1));
            } else {
                line.push_str(&format!(" {cell:<width$}  "));
            }
        }
        println!("{}", line.trim_end());
    }
}

fn print_package(package: &Package) {
    println!("===== NTSP file =====");
    println!("Entries: {}", package.entries.len());
    println!("Blocks: {}", package.blocks.len());
    println!();
    println!("===== Entries =====");

    let entries: Vec<Vec<String>> = package
        .entries
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                e.block_index.to_string(),
                e.width.to_string(),
                e.height.to_string(),
                e.mip_levels.to_string(),
                format!("{:08X}", e.hash),
            ]
        })
        .collect();
    print_table(
        &entries,
        &["Name", "Blockindex", "Width", "Height", "Mipmap levels", "Hash"],
        &[false, true, true, true, true, true],
    );

    println!();
    println!("===== Blocks =====");

    let blocks: Vec<Vec<String>> = package
        .blocks
        .iter()
        .map(|b| vec![format!("{:X}", b.position), b.len().to_string()])
        .collect();
    print_table(&blocks, &["Position", "Length"], &[true, true]);
}

fn package_json(package: &Package) -> Value {
    let entries: Vec<Value> = package
        .entries
        .iter()
        .map(|e| {
            json!({
                "name": e.name,
                "block_index": e.block_index,
                "width": e.width,
                "height": e.height,
                "mip_levels": e.mip_levels,
                "hash": format!("{:08X}", e.hash),
            })
        })
        .collect();
    let blocks: Vec<Value> = package
        .blocks
        .iter()
        .map(|b| json!({ "position": b.position, "length": b.len() }))
        .collect();

    json!({ "kind": "package", "entries": entries, "blocks": blocks })
}

fn print_dds(dds: &Dds) {
    let DdsHeader {
        size,
        height,
        width,
        pitch_or_linear_size,
        depth,
        mipmap_count,
        pixel_format,
        caps3,
        caps4,
        ..
    } = *dds.header();
    let DdsPixelFormat {
        size: pf_size,
        four_cc,
        rgb_bit_count,
        r_bit_mask,
        g_bit_mask,
        b_bit_mask,
        a_bit_mask,
        ..
    } = pixel_format;

    println!("===== DDS file header =====");
    println!("Size: {size}");
    println!("Flags: {:?}", dds.header().flags());
    println!("Height: {height}");
    println!("Width: {width}");
    println!("Pitch/Linear Size: {pitch_or_linear_size}");
    println!("Depth: {depth}");
    println!("Mipmap Count: {mipmap_count}");
    println!();
    println!("    ===== Pixel format =====");
    println!("    Size: {pf_size}");
    println!("    Flags: {:?}", pixel_format.flags());
    println!("    FourCC: {four_cc} ({:08X})", four_cc.to_u32());
    println!("    RGBBitCount: {rgb_bit_count}");
    println!("    RBitMask: {r_bit_mask:08X}");
    println!("    GBitMask: {g_bit_mask:08X}");
    println!("    BBitMask: {b_bit_mask:08X}");
    println!("    ABitMask: {a_bit_mask:08X}");
    println!();
    println!("Caps: {:?}", dds.header().caps());
    println!("Caps2: {:?}", dds.header().caps2());
    println!("Caps3: {caps3:08X}");
    println!("Caps4: {caps4:08X}");

    if let Some(dxt10) = dds.dxt10() {
        let raw_format = dxt10.dxgi_format;
        let array_size = dxt10.array_size;
        println!();
        println!("===== DXT10 extension =====");
        match dxt10.format() {
            Some(format) => println!("Format: {format} ({raw_format})"),
            None => println!("Format: {raw_format}"),
        }
        println!("Resource Dimension: {:?}", dxt10.resource_dimension());
        println!("Misc Flag: {:?}", dxt10.misc_flags());
        println!("Array Size: {array_size}");
        println!("Alpha Mode: {:?}", dxt10.alpha_mode());
    }
}

fn dds_json(dds: &Dds) -> Value {
    let DdsHeader {
        size,
        flags,
        height,
        width,
        pitch_or_linear_size,
        depth,
        mipmap_count,
        pixel_format,
        caps,
        caps2,
        caps3,
        caps4,
        ..
    } = *dds.header();
    let DdsPixelFormat {
        size: pf_size,
        flags: pf_flags,
        four_cc,
        rgb_bit_count,
        r_bit_mask,
        g_bit_mask,
        b_bit_mask,
        a_bit_mask,
    } = pixel_format;

    let mut value = json!({
        "header": {
            "size": size,
            "flags": flags,
            "height": height,
            "width": width,
            "pitch_or_linear_size": pitch_or_linear_size,
            "depth": depth,
            "mipmap_count": mipmap_count,
            "caps": caps,
            "caps2": caps2,
            "caps3": caps3,
            "caps4": caps4,
        },
        "pixel_format": {
            "size": pf_size,
            "flags": pf_flags,
            "four_cc": four_cc.to_string(),
            "rgb_bit_count": rgb_bit_count,
            "r_bit_mask": r_bit_mask,
            "g_bit_mask": g_bit_mask,
            "b_bit_mask": b_bit_mask,
            "a_bit_mask": a_bit_mask,
        },
    });

    if let Some(dxt10) = dds.dxt10() {
        let raw_format = dxt10.dxgi_format;
        let resource_dimension = dxt10.resource_dimension;
        let misc_flag = dxt10.misc_flag;
        let array_size = dxt10.array_size;
        let alpha_mode = dxt10.alpha_mode;
        value["dxt10"] = json!({
            "format": dxt10.format().map(|f| f.to_string()),
            "dxgi_format": raw_format,
            "resource_dimension": resource_dimension,
            "misc_flag": misc_flag,
            "array_size": array_size,
            "alpha_mode": alpha_mode,
        });
    }

    value
}
