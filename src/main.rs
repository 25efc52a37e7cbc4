//! svgmerge CLI
//!
//! Usage:
//!   svgmerge [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>     Write the result to FILE instead of stdout
//!   -c, --code              Print the formatted code view
//!   --preview               Print the rendered preview markup
//!   --ids                   List path identifiers
//!   --original              Operate on the original pane instead of the merged one
//!   --highlight <ID>        Pin a path (repeatable, last one wins)
//!   --html                  Escape code for HTML and mark highlights with <mark>
//!   --colorize              Paint paths with palette colors
//!   -p, --palette <FILE>    Palette file (TOML format)
//!   --seed <N>              Seed for reproducible colors
//!   --zoom <N>              Zoom steps, negative zooms out
//!   -v, --verbose           More log output (repeatable)
//!   -h, --help              Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use svgmerge::{process_with_config, CodeSurface, Output, Palette, PaneKind, ProcessConfig};

#[derive(Parser)]
#[command(name = "svgmerge")]
#[command(about = "Merge the paths of an SVG into one and inspect the result")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the formatted code view
    #[arg(short, long, conflicts_with_all = ["preview", "ids"])]
    code: bool,

    /// Print the rendered preview markup
    #[arg(long, conflicts_with = "ids")]
    preview: bool,

    /// List path identifiers
    #[arg(long)]
    ids: bool,

    /// Operate on the original pane instead of the merged one
    #[arg(long)]
    original: bool,

    /// Pin a path by identifier (repeatable, the last one stays pinned)
    #[arg(long = "highlight", value_name = "ID")]
    highlight: Vec<String>,

    /// Escape code for HTML and mark highlights with <mark>
    #[arg(long)]
    html: bool,

    /// Paint paths with palette colors
    #[arg(long)]
    colorize: bool,

    /// Palette file (TOML format)
    #[arg(short, long)]
    palette: Option<PathBuf>,

    /// Seed for reproducible colors
    #[arg(long)]
    seed: Option<u64>,

    /// Zoom steps applied to the preview, negative zooms out
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    zoom: i32,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load palette
    let mut palette = match &cli.palette {
        Some(path) => match Palette::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading palette '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Palette::default(),
    };
    if let Some(seed) = cli.seed {
        palette = palette.with_seed(seed);
    }

    // Read input
    let (name, source) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (path.display().to_string(), content),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => ("<stdin>".to_string(), buffer),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let output = if cli.code {
        Output::Code
    } else if cli.preview {
        Output::Preview
    } else if cli.ids {
        Output::Identifiers
    } else {
        Output::Markup
    };

    let mut config = ProcessConfig::new()
        .with_pane(if cli.original {
            PaneKind::Original
        } else {
            PaneKind::Processed
        })
        .with_output(output)
        .with_surface(if cli.html {
            CodeSurface::Html
        } else {
            CodeSurface::PlainText
        })
        .with_palette(palette)
        .with_colorize(cli.colorize)
        .with_zoom_steps(cli.zoom);
    for id in cli.highlight {
        config = config.with_pin(id);
    }

    let processed = match process_with_config(&name, &source, config) {
        Ok(processed) => processed,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    for diagnostic in &processed.diagnostics {
        eprint!("{}", diagnostic.format(&source, &name));
    }

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", processed.output)) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => println!("{}", processed.output),
    }
}

fn print_intro() {
    println!(
        r#"svgmerge - merge the paths of an SVG into a single path

USAGE:
    svgmerge [OPTIONS] [FILE]
    cat drawing.svg | svgmerge

OPTIONS:
    -o, --output       Write the result to a file
    -c, --code         Print the formatted code view
    --preview          Print the rendered preview markup
    --ids              List path identifiers
    --original         Use the original document instead of the merged one
    --highlight ID     Pin a path in preview and code (repeatable)
    --html             HTML-escaped code with <mark> highlights
    --colorize         Paint paths with palette colors
    -p, --palette      Custom palette (TOML file)
    --seed N           Reproducible colors
    --zoom N           Zoom steps for the preview
    -v, --verbose      More log output
    -h, --help         Print help

QUICK START:
    svgmerge icon.svg > merged.svg
    svgmerge --original --ids icon.svg
    svgmerge --code --highlight path-1 icon.svg

Paths without an id are addressed as path-0, path-1, ... in document order."#
    );
}
