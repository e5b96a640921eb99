use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use storage::{LoadOptions, PhraseLengthReport, load};

/// Exit code for a dataset that fails to load, shared with the `drill` binary.
const EXIT_DATASET: u8 = 3;
const EXIT_USAGE: u8 = 2;

#[derive(Debug)]
enum ArgsError {
    UnknownArg(String),
    NoFiles,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::NoFiles => write!(f, "at least one word list is required"),
        }
    }
}

impl std::error::Error for ArgsError {}

struct Args {
    files: Vec<PathBuf>,
    strict: bool,
}

impl Args {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut files = Vec::new();
        let mut strict = true;

        for arg in args {
            match arg.as_str() {
                "--lenient" => strict = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if flag.starts_with('-') => return Err(ArgsError::UnknownArg(arg)),
                _ => files.push(PathBuf::from(arg)),
            }
        }

        if files.is_empty() {
            return Err(ArgsError::NoFiles);
        }
        Ok(Self { files, strict })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin dataset-report -- [--lenient] <file>...");
    eprintln!();
    eprintln!("Prints how many phrases of each length every word list holds.");
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let options = LoadOptions::default().with_strict(args.strict);
    for file in &args.files {
        let records = match load(file, &options) {
            Ok(records) => records,
            Err(err) => {
                eprintln!("ERROR: {}: {err}", file.display());
                return ExitCode::from(EXIT_DATASET);
            }
        };

        println!("Report for {}", file.display());
        print!("{}", PhraseLengthReport::from_records(&records));
        println!();
    }

    ExitCode::SUCCESS
}
