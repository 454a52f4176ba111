use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use ffi_adder::host::{self, LibrarySpec};
use ffi_adder::DEFAULT_LIBRARY;

#[derive(Parser)]
#[command(name = "ffi-adder")]
#[command(about = "Load a native library once and call its `add` function", long_about = None)]
#[command(version)]
struct Cli {
    /// First operand
    #[arg(default_value_t = 1, allow_negative_numbers = true)]
    a: i32,
    /// Second operand
    #[arg(default_value_t = 2, allow_negative_numbers = true)]
    b: i32,
    /// Bare name of the native library (no `lib` prefix or extension)
    #[arg(long, default_value = DEFAULT_LIBRARY)]
    library: String,
    /// Directory searched before the executable's own directory (repeatable)
    #[arg(long = "lib-dir", value_name = "DIR")]
    lib_dirs: Vec<PathBuf>,
    /// Report which library file was loaded
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> Result<i32> {
    let spec = cli
        .lib_dirs
        .into_iter()
        .fold(LibrarySpec::new(&cli.library), |spec, dir| spec.with_search_dir(dir))
        .beside_executable();

    let library = host::load(&spec)
        .with_context(|| format!("cannot start without native library '{}'", cli.library))?;
    if cli.verbose {
        eprintln!("{} {}", "loaded".green().bold(), library.path().display());
    }

    let bridge = host::bridge()?;
    Ok(bridge.add(cli.a, cli.b))
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(sum) => println!("{}", sum),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
