extern crate libscf;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use image::RgbaImage;
use libscf::{RegionName, RegionSink, Scf, ScfError};
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "SCF CLI")]
#[command(about, author, version, long_about = None)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Unpack a compressed ".sc" file into a raw "SCF" stream
    #[command(arg_required_else_help = true)]
    Decompress {
        /// Compressed ".sc" file
        file: String,
        /// Outbound "SCF" file
        #[arg(short, long, value_name = "FILE")]
        out: String,
    },
    /// Check if the "SCF" file can be decoded and extracted
    Check {
        /// "SCF" file, or a compressed ".sc" file
        file: String,
    },
    /// Print the objects decoded from the "SCF" file
    #[command(arg_required_else_help = true)]
    Info {
        /// "SCF" file, or a compressed ".sc" file
        file: String,
    },
    /// Print the export table of the "SCF" file
    #[command(arg_required_else_help = true)]
    Exports {
        /// "SCF" file, or a compressed ".sc" file
        file: String,
    },
    /// Extract every texture region drawn by a shape
    #[command(arg_required_else_help = true)]
    Extract {
        /// "SCF" file, or a compressed ".sc" file
        file: String,
        /// Overwrite files
        #[arg(short, long, default_value_t = false, value_name = "TRUE|FALSE")]
        force: bool,
        /// Outbound directory
        #[arg(short, long, value_name = "DIR")]
        out: String,
    },
    /// Save every decoded texture sheet
    #[command(arg_required_else_help = true)]
    Textures {
        /// "SCF" file, or a compressed ".sc" file
        file: String,
        /// Outbound directory
        #[arg(short, long, value_name = "DIR")]
        out: String,
    },
}

/// Writes regions as PNG files into a directory.
struct DirectorySink {
    out: PathBuf,
    force: bool,
    bar: indicatif::ProgressBar,
}

impl RegionSink for DirectorySink {
    fn write_region(&mut self, name: &RegionName, image: RgbaImage) -> Result<bool, ScfError> {
        let path = self.out.join(name.file_name());
        self.bar.set_message(name.to_string());

        if !self.force && path.exists() {
            let message = format!("File \"{}\" exists. Overwrite it?", path.display());
            let confirmed = self
                .bar
                .suspend(|| dialoguer::Confirm::new().with_prompt(message).interact())
                .map_err(|error| std::io::Error::other(error.to_string()))?;

            if !confirmed {
                self.bar.inc(1);
                return Ok(false);
            }
        }

        image.save(&path)?;
        self.bar.inc(1);

        Ok(true)
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let stdout = console::Term::stdout();

    match cli.command {
        Commands::Decompress { file, out } => command_decompress(stdout, file, out)?,
        Commands::Check { file } => command_check(stdout, file)?,
        Commands::Info { file } => command_info(stdout, file)?,
        Commands::Exports { file } => command_exports(stdout, file)?,
        Commands::Extract { file, force, out } => command_extract(stdout, file, out, force)?,
        Commands::Textures { file, out } => command_textures(stdout, file, out)?,
    }

    Ok(())
}

fn command_decompress(stdout: console::Term, file: String, out: String) -> Result<()> {
    let data = std::fs::read(&file).into_diagnostic()?;
    let stream = libscf::decompress_sc(&data)?;
    std::fs::write(&out, &stream).into_diagnostic()?;

    stdout
        .write_line(&format!("{}: {} bytes unpacked into {}", file, stream.len(), out))
        .into_diagnostic()?;

    Ok(())
}

fn command_check(stdout: console::Term, file: String) -> Result<()> {
    let scf = load(&file)?;
    let tmp = tempdir::TempDir::new("scf").into_diagnostic()?;
    let written = extract_into(&scf, tmp.path(), true)?;

    let text = format!(
        "{}: {} textures, {} shapes, {} regions extracted",
        file,
        scf.textures().len(),
        scf.shapes().len(),
        written
    );
    stdout.write_line(&text).into_diagnostic()?;

    Ok(())
}

fn command_info(stdout: console::Term, file: String) -> Result<()> {
    let scf = load(&file)?;
    let counts = scf.counts();

    let text = format!(
        "Declared: shapes {}, movie clips {}, textures {}, text fields {}, matrices {}, color transforms {};",
        counts.shapes,
        counts.movie_clips,
        counts.textures,
        counts.text_fields,
        counts.matrices,
        counts.color_transforms
    );
    stdout.write_line(&text).into_diagnostic()?;

    let text = format!(
        "Decoded: shapes {}, movie clips {}, textures {}, text fields {}, matrices {}, color transforms {}, timeline offsets {};",
        scf.shapes().len(),
        scf.movie_clips().len(),
        scf.textures().len(),
        scf.text_fields().len(),
        scf.matrices().len(),
        scf.color_transforms().len(),
        scf.timeline_offsets().len()
    );
    stdout.write_line(&text).into_diagnostic()?;

    for (index, texture) in scf.textures().iter().enumerate() {
        let text = format!(
            "Texture: {}; Format: {} (raw {}); Size: {}x{};",
            index,
            texture.format,
            texture.raw_format,
            texture.width(),
            texture.height()
        );
        stdout.write_line(&text).into_diagnostic()?;
    }

    for shape in scf.shapes() {
        let text = format!(
            "Shape: {}; Draw commands: {}; Discarded commands: {};",
            shape.id,
            shape.commands.len(),
            shape.discarded
        );
        stdout.write_line(&text).into_diagnostic()?;
    }

    Ok(())
}

fn command_exports(stdout: console::Term, file: String) -> Result<()> {
    let scf = load(&file)?;

    for export in scf.exports().iter() {
        let text = format!("{} {}", export.id, export.name.as_deref().unwrap_or("-"));
        stdout.write_line(&text).into_diagnostic()?;
    }

    Ok(())
}

fn command_extract(stdout: console::Term, file: String, out: String, force: bool) -> Result<()> {
    let scf = load(&file)?;
    let written = extract_into(&scf, Path::new(&out), force)?;

    stdout
        .write_line(&format!("Regions extracted: {};", written))
        .into_diagnostic()?;

    Ok(())
}

fn command_textures(_stdout: console::Term, file: String, out: String) -> Result<()> {
    let scf = load(&file)?;
    let bar = indicatif::ProgressBar::new(scf.textures().len() as u64);

    bar.set_style(get_bar_style()?);

    for (index, texture) in scf.textures().iter().enumerate() {
        let name = format!("texture.{}.png", index);
        bar.set_message(name.clone());

        texture
            .image
            .save(Path::new(&out).join(name))
            .into_diagnostic()?;
        bar.inc(1);
    }

    bar.finish();

    Ok(())
}

fn extract_into(scf: &Scf, out: &Path, force: bool) -> Result<usize> {
    let total = libscf::plan_regions(scf).len();
    let bar = indicatif::ProgressBar::new(total as u64);

    bar.set_style(get_bar_style()?);

    let mut sink = DirectorySink {
        out: out.to_path_buf(),
        force,
        bar,
    };
    let written = libscf::extract_regions(scf, &mut sink)?;
    sink.bar.finish();

    Ok(written)
}

/// Library records arrive through the `log` bridge of the subscriber.
fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| miette::miette!("failed to set up logging: {error}"))
}

/// Files with the `.sc` extension are decompressed first.
fn load(file: &str) -> Result<Scf> {
    let data = std::fs::read(file).into_diagnostic()?;
    let compressed = Path::new(file)
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("sc"));

    if compressed {
        Ok(Scf::from_sc(&data)?)
    } else {
        Ok(Scf::parse(&data)?)
    }
}

fn get_bar_style() -> Result<indicatif::ProgressStyle> {
    Ok(
        indicatif::ProgressStyle::with_template("[{bar:32}] {pos:>7}/{len:7} {msg}")
            .into_diagnostic()?
            .progress_chars("=>-"),
    )
}
