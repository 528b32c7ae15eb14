//! `zenbmpio` command-line tool.
//!
//! `probe` reports what the codec sees in a file; `copy` decodes a file and
//! writes it back through the header-preserving encoder, which is the
//! skeleton of any filter that operates on the decoded buffer.

use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::{Level, error, info, warn};
use zenbmpio::{
    BitmapError, BitmapHeader, BmpOptions, PixelLayout, RowPadding, Unstoppable, parse_header,
    read_layout, write_buffer,
};

/// One decode/encode run, fully described by its arguments.
#[derive(Debug)]
struct Job {
    input: PathBuf,
    output: PathBuf,
    /// Header source for the output; the input unless overridden.
    reference: PathBuf,
    /// `None` picks the codec from the input's bit depth.
    layout: Option<PixelLayout>,
    options: BmpOptions,
}

impl Job {
    fn from_matches(matches: &ArgMatches) -> Job {
        let input = matches
            .get_one::<PathBuf>("input")
            .cloned()
            .unwrap_or_default();
        let output = matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or_default();
        let reference = matches
            .get_one::<PathBuf>("reference")
            .cloned()
            .unwrap_or_else(|| input.clone());
        let layout = match matches.get_one::<String>("mode").map(String::as_str) {
            Some("grey") => Some(PixelLayout::Gray8),
            Some("rgb") => Some(PixelLayout::Rgba8),
            _ => None,
        };
        let padding = match matches.get_one::<String>("padding").map(String::as_str) {
            Some("pixel-units") => RowPadding::PixelUnits,
            _ => RowPadding::Canonical,
        };
        Job {
            input,
            output,
            reference,
            layout,
            options: BmpOptions::default().with_padding(padding),
        }
    }

    fn run(&self) -> Result<(), BitmapError> {
        let layout = match self.layout {
            Some(layout) => layout,
            None => {
                let header = parse_header(&self.input)?;
                layout_for(&header).ok_or_else(|| {
                    BitmapError::UnsupportedVariant(format!(
                        "{}-bit BMP has no matching codec",
                        header.bits_per_pixel
                    ))
                })?
            }
        };
        info!("using {layout:?} codec");

        let buffer = read_layout(&self.input, layout, &self.options, Unstoppable)?;
        write_buffer(
            &buffer,
            &self.output,
            &self.reference,
            &self.options,
            Unstoppable,
        )
    }
}

fn layout_for(header: &BitmapHeader) -> Option<PixelLayout> {
    [PixelLayout::Gray8, PixelLayout::Rgba8]
        .into_iter()
        .find(|layout| layout.disk_bits_per_pixel() == header.bits_per_pixel)
}

fn probe(path: &Path) -> Result<(), BitmapError> {
    let header = parse_header(path)?;
    println!("file:        {}", path.display());
    println!(
        "signature:   {}",
        String::from_utf8_lossy(&header.signature)
    );
    println!("data offset: {}", header.data_offset);
    println!("width:       {}", header.width);
    println!("height:      {}", header.height);
    println!("bit count:   {}", header.bits_per_pixel);
    println!("compression: {}", header.compression);
    for (name, layout) in [("grey", PixelLayout::Gray8), ("rgb", PixelLayout::Rgba8)] {
        match header.validate(layout) {
            Ok(_) => println!("{name:<12} ok"),
            Err(e) => println!("{name:<12} {e}"),
        }
    }
    Ok(())
}

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    Command::new("zenbmpio")
        .about("Decode and re-encode 8-bit and 24-bit BMP files, preserving headers")
        .subcommand_required(true)
        .subcommand(Command::new("probe")
            .about("Print the header fields the codec reads")
            .arg(Arg::new("file")
                .help("BMP file to inspect")
                .value_parser(value_parser!(PathBuf))
                .required(true)))
        .subcommand(Command::new("copy")
            .about("Decode a BMP and write it back using a reference header")
            .arg(Arg::new("input")
                .short('i')
                .long("input")
                .help("Input file to read data from")
                .value_parser(value_parser!(PathBuf))
                .required(true))
            .arg(Arg::new("output")
                .short('o')
                .long("output")
                .help("Output to write the data to")
                .value_parser(value_parser!(PathBuf))
                .required(true))
            .arg(Arg::new("reference")
                .short('r')
                .long("reference")
                .help("File whose header bytes are copied to the output [default: input]")
                .value_parser(value_parser!(PathBuf)))
            .arg(Arg::new("mode")
                .long("mode")
                .help("Codec to use [default: from the input's bit depth]")
                .value_parser(["grey", "rgb"]))
            .arg(Arg::new("padding")
                .long("padding")
                .help("Row padding rule for 24-bit rows")
                .value_parser(["canonical", "pixel-units"])
                .default_value("canonical")))
        .arg(Arg::new("debug")
            .long("debug")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors only"))
        .arg(Arg::new("info")
            .long("info")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the files read and written [default]"))
}

fn log_level(options: &ArgMatches) -> Level {
    let flag = |name: &str| options.get_flag(name);

    if flag("trace") {
        Level::Trace
    } else if flag("debug") {
        Level::Debug
    } else if flag("info") {
        Level::Info
    } else if flag("warn") {
        Level::Warn
    } else {
        Level::Info
    }
}

fn setup_logger(options: &ArgMatches) {
    if let Err(e) = simple_logger::init_with_level(log_level(options)) {
        eprintln!("could not initialize logger: {e}");
    }
}

fn main() {
    let options = create_cmd_args().get_matches();
    setup_logger(&options);

    let result = match options.subcommand() {
        Some(("probe", sub)) => match sub.get_one::<PathBuf>("file") {
            Some(path) => probe(path),
            None => Ok(()),
        },
        Some(("copy", sub)) => {
            let job = Job::from_matches(sub);
            if job.reference != job.input {
                warn!(
                    "header bytes come from {}, not the input",
                    job.reference.display()
                );
            }
            job.run()
        }
        _ => Ok(()),
    };

    if let Err(e) = result {
        error!("could not complete job: {e}");
        exit(-1);
    }
}
