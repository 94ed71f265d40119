// Command-line front end for lmu-rotate.
//
// Subcommands rotate a map file, dump its contents with item labels, check
// that a file survives a decode/encode cycle unchanged, and print the build
// configuration.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::config::{DecodeOptions, ValidationPolicy};
use crate::dump;
use crate::io::{self as map_io, hex_digest};
use crate::lmu::map::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::rotate::Rotation;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Rotate RPG Maker 2000 map units (.lmu).
#[derive(Parser, Debug)]
#[command(
    name = "lmu-rotate",
    version,
    about = "Rotate RPG Maker 2000 map files",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,

    /// Log missing required items instead of rejecting the map.
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Rotate a map clockwise.
    Rotate(RotateArgs),
    /// Print the map's items with their labels.
    Dump(DumpArgs),
    /// Decode and re-encode a map, reporting whether the bytes are unchanged.
    Check(InputArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct RotateArgs {
    /// Clockwise angle: 0, 90, 180, 270, cw or ccw.
    #[arg(long, short = 'a', default_value_t = Rotation::Deg90)]
    angle: Rotation,

    /// Input map file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output map file.
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Also dump every event and event page.
    #[arg(long)]
    events: bool,

    /// Input map file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input map file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Rotate,
    Dump,
    Check,
    Config,
}

struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    rotation: Rotation,
    dump_events: bool,
    decode: DecodeOptions,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        rotation: Rotation::Deg0,
        dump_events: false,
        decode: DecodeOptions {
            policy: if cli.lenient {
                ValidationPolicy::Lenient
            } else {
                ValidationPolicy::Strict
            },
        },
        input_file: None,
        output_file: None,
    };

    match cli.command {
        Cmd::Rotate(args) => {
            opts.command = Command::Rotate;
            opts.rotation = args.angle;
            opts.input_file = Some(args.input);
            opts.output_file = Some(args.output);
        }
        Cmd::Dump(args) => {
            opts.command = Command::Dump;
            opts.dump_events = args.events;
            opts.input_file = Some(args.input);
        }
        Cmd::Check(args) => {
            opts.command = Command::Check;
            opts.input_file = Some(args.input);
        }
        Cmd::Config => {}
    }
    opts
}

/// Log filter implied by `-q` / `-v`.
fn log_filter(opts: &Options) -> &'static str {
    match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("lmu-rotate".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

fn print_json(json: &serde_json::Value) {
    eprintln!("{}", serde_json::to_string_pretty(json).unwrap_or_default());
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("lmu-rotate version {version} (Rust), Copyright (C) lmu-rotate contributors");
    eprintln!("Licensed under the MIT License");

    let file_io = cfg!(feature = "file-io") as u8;
    let ptr_size = std::mem::size_of::<*const ()>();

    eprintln!("FILE_IO={file_io}");
    eprintln!("DEFAULT_WIDTH={DEFAULT_WIDTH}");
    eprintln!("DEFAULT_HEIGHT={DEFAULT_HEIGHT}");
    eprintln!("DEFAULT_POLICY={:?}", ValidationPolicy::default());
    eprintln!("sizeof(usize)={ptr_size}");

    0
}

// ---------------------------------------------------------------------------
// Rotate command
// ---------------------------------------------------------------------------

fn cmd_rotate(opts: &Options) -> i32 {
    let (Some(input), Some(output)) = (&opts.input_file, &opts.output_file) else {
        eprintln!("lmu-rotate: rotate needs an input and an output file");
        return 1;
    };

    if output.exists() && !opts.force {
        eprintln!(
            "lmu-rotate: output file exists, use -f to overwrite: {}",
            output.display()
        );
        return 1;
    }

    let stats = match map_io::rotate_file(input, output, opts.rotation, &opts.decode) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("lmu-rotate: {}: {e}", input.display());
            return 1;
        }
    };

    let (new_width, new_height) = if opts.rotation.swaps_dimensions() {
        (stats.height, stats.width)
    } else {
        (stats.width, stats.height)
    };

    if stats.unknown_tiles > 0 && !opts.quiet {
        eprintln!(
            "lmu-rotate: warning: {} tile(s) with unknown codes were moved but not rotated",
            stats.unknown_tiles
        );
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "lmu-rotate: rotated {}: {}x{} -> {new_width}x{new_height}, tiles: {}, \
             events: {}, pages: {}",
            stats.rotation, stats.width, stats.height, stats.tiles, stats.events, stats.pages
        );
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "rotate",
            "angle": stats.rotation.degrees(),
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "width": stats.width,
            "height": stats.height,
            "new_width": new_width,
            "new_height": new_height,
            "tiles": stats.tiles,
            "events": stats.events,
            "pages": stats.pages,
            "unknown_tiles": stats.unknown_tiles,
            "input_sha256": stats.input_sha256.as_ref().map(hex_digest),
            "output_sha256": stats.output_sha256.as_ref().map(hex_digest),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Dump command
// ---------------------------------------------------------------------------

fn cmd_dump(opts: &Options) -> i32 {
    let Some(input) = &opts.input_file else {
        eprintln!("lmu-rotate: dump needs an input file");
        return 1;
    };

    let map = match map_io::read_map(input, &opts.decode) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("lmu-rotate: {}: {e}", input.display());
            return 1;
        }
    };

    let text = dump::map_dump(&map, opts.dump_events);
    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        eprintln!("lmu-rotate: write error: {e}");
        return 1;
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "dump",
            "size": map.size(),
            "items": map.object().item_count(),
            "events": map.events().len(),
        }));
    }

    0
}

// ---------------------------------------------------------------------------
// Check command
// ---------------------------------------------------------------------------

fn cmd_check(opts: &Options) -> i32 {
    let Some(input) = &opts.input_file else {
        eprintln!("lmu-rotate: check needs an input file");
        return 1;
    };

    let stats = match map_io::check_file(input, &opts.decode) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("lmu-rotate: {}: {e}", input.display());
            return 1;
        }
    };

    if !opts.quiet {
        match stats.first_difference {
            None => eprintln!(
                "lmu-rotate: {}: ok ({}x{}, {} events, {} pages, {} bytes)",
                input.display(),
                stats.width,
                stats.height,
                stats.events,
                stats.pages,
                stats.size
            ),
            Some(offset) => eprintln!(
                "lmu-rotate: {}: re-encoded bytes differ from offset {offset}",
                input.display()
            ),
        }
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "check",
            "size": stats.size,
            "width": stats.width,
            "height": stats.height,
            "events": stats.events,
            "pages": stats.pages,
            "identical": stats.identical,
            "first_difference": stats.first_difference,
        }));
    }

    if stats.identical { 0 } else { 1 }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(&opts)))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let exit_code = match opts.command {
        Command::Rotate => cmd_rotate(&opts),
        Command::Dump => cmd_dump(&opts),
        Command::Check => cmd_check(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
