//! yaz0-cli - Command-line interface for Yaz0
//!
//! A command-line tool for compressing, decompressing and inspecting Yaz0
//! (`.szs`) files, and for extracting firmware avatar images.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use yaz0::archive::{scan_avatar_entries, ARCHIVE_EXTENSION};
use yaz0::{compress_with_stats, decompress_with_stats, CompressionLevel, Yaz0Error, Yaz0Header};

#[derive(Parser)]
#[command(name = "yaz0-cli")]
#[command(about = "A CLI tool for Yaz0 (SZS) compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a Yaz0 stream
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Compression level
        #[arg(short, long, value_enum, default_value_t = CliCompressionLevel::Default)]
        level: CliCompressionLevel,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a Yaz0 stream
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },

    /// Decode every .szs avatar image in a directory
    Avatars {
        /// Directory holding the extracted avatar entries
        dir: PathBuf,

        /// Write each decoded image as raw RGBA into this directory
        #[arg(short, long)]
        dump: Option<PathBuf>,

        /// Force overwrite of dumped images
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum CliCompressionLevel {
    /// Short match search
    Fast,
    /// Balanced search - Default
    Default,
    /// Exhaustive search with lazy matching
    Best,
}

impl From<CliCompressionLevel> for CompressionLevel {
    fn from(level: CliCompressionLevel) -> Self {
        match level {
            CliCompressionLevel::Fast => CompressionLevel::Fast,
            CliCompressionLevel::Default => CompressionLevel::Default,
            CliCompressionLevel::Best => CompressionLevel::Best,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            level,
            force,
        } => compress_file(&input, &output, level.into(), force, cli.verbose, cli.quiet),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
        Commands::Avatars { dir, dump, force } => {
            extract_avatars(&dir, dump.as_deref(), force, cli.verbose, cli.quiet)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn check_paths(input: &Path, output: &Path, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    Ok(())
}

fn progress_for(size: usize, quiet: bool, message: &'static str) -> Option<ProgressBar> {
    if quiet || size <= 1024 * 1024 {
        return None;
    }

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb.inc(1);
    Some(pb)
}

fn compress_file(
    input: &Path,
    output: &Path,
    level: CompressionLevel,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!("Level: {:?}", level);
    }

    let start_time = Instant::now();
    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = progress_for(input_size, quiet, "Compressing...");

    let (compressed_data, stats) = compress_with_stats(&input_data, level)
        .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", output_size);
        println!("  Ratio:  {:.1}%", stats.compression_ratio * 100.0);
        println!("  Time:   {:.2?}", compression_time);

        if verbose {
            println!("  Literals:        {}", stats.literal_count);
            println!("  Back-references: {}", stats.match_count);
            println!("  Longest match:   {}", stats.longest_match);
        }
    }

    Ok(())
}

fn decompress_file(
    input: &Path,
    output: &Path,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_paths(input, output, force)?;

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();
    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    if verbose {
        println!("Compressed size: {} bytes", input_size);
    }

    let progress = progress_for(input_size, quiet, "Decompressing...");

    let (decompressed_data, stats) = decompress_with_stats(&compressed_data)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &decompressed_data)?;

    let decompression_time = start_time.elapsed();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bytes", decompressed_data.len());
        println!("  Ratio:  {:.1}%", stats.compression_ratio * 100.0);
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let file_size = data.len();

    let header = match Yaz0Header::parse(&data) {
        Ok(header) => header,
        Err(Yaz0Error::NotThisFormat) => {
            return Err(format!("'{}' is not a Yaz0 file", input.display()).into())
        }
        Err(e) => return Err(e.into()),
    };

    println!("Yaz0 File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bytes", file_size);
    println!("  Decoded Length: {} bytes", header.decoded_length);
    if header.alignment() != 0 {
        println!("  Alignment: {:#x}", header.alignment());
    }

    if verbose {
        let reserved: Vec<String> = header.reserved.iter().map(|b| format!("{b:02x}")).collect();
        println!("  Reserved bytes: {}", reserved.join(" "));
    }

    match decompress_with_stats(&data) {
        Ok((_, stats)) => {
            println!("  Compression Ratio: {:.1}%", stats.compression_ratio * 100.0);
            println!("  Literals: {}", stats.literal_count);
            println!("  Back-references: {}", stats.match_count);
            println!("  Status: ✓ Valid Yaz0 file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted Yaz0 file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}

fn extract_avatars(
    dir: &Path,
    dump: Option<&Path>,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dir.is_dir() {
        return Err(format!("'{}' is not a directory", dir.display()).into());
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = if yaz0::archive::has_archive_extension(&name) {
            fs::read(&path)?
        } else {
            Vec::new()
        };
        entries.push((name, data));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let scan = scan_avatar_entries(entries);

    if scan.is_empty() {
        return Err(format!(
            "No avatar images were found in '{}' (looked for .{} files)",
            dir.display(),
            ARCHIVE_EXTENSION
        )
        .into());
    }

    if let Some(out_dir) = dump {
        fs::create_dir_all(out_dir)?;
        for image in &scan.images {
            let target = out_dir.join(Path::new(image.name()).with_extension("rgba"));
            if target.exists() && !force {
                return Err(format!(
                    "Output file '{}' already exists. Use --force to overwrite",
                    target.display()
                )
                .into());
            }
            fs::write(&target, image.pixels())?;
            if verbose {
                println!("  wrote {}", target.display());
            }
        }
    }

    if !quiet {
        println!("✓ Found {} avatar images", scan.images.len());
        if verbose {
            for image in &scan.images {
                println!("  {} ({}x{})", image.name(), image.width(), image.height());
            }
            for name in &scan.skipped {
                println!("  skipped {}", name);
            }
        }
        for (name, e) in &scan.failed {
            println!("  ✗ {} could not be decoded: {}", name, e);
        }
    }

    Ok(())
}
