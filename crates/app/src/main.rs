use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use drill_core::model::{Record, SessionSettings};
use services::{
    CedictDictionary, Dictionary, Narrator, SayNarrator, SessionEngine, SilentNarrator,
    UnattendedIo,
};
use storage::LoadOptions;

mod cli;
mod console_io;
mod lookup;

use cli::{CheckArgs, Cli, Command, LookupArgs, PlayArgs};
use console_io::{ConsoleIo, write_instructions};
use lookup::FileCheck;

/// Why a command stopped early. Each maps to one process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    /// Terminal I/O failed or the dictionary could not be read.
    Runtime,
    /// Flag values or combinations were rejected.
    Usage,
    /// A word list failed to load.
    Dataset,
}

impl Failure {
    fn code(self) -> u8 {
        match self {
            Failure::Runtime => 1,
            Failure::Usage => 2,
            Failure::Dataset => 3,
        }
    }
}

fn exit_code(outcome: Result<(), Failure>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => ExitCode::from(failure.code()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    exit_code(match Cli::parse().into_command() {
        Command::Play(args) => play(&args),
        Command::Lookup(args) => lookup(&args),
        Command::Check(args) => check(&args),
    })
}

fn open_dictionary(path: &Path) -> Result<CedictDictionary, Failure> {
    CedictDictionary::open(path).map_err(|err| {
        eprintln!("ERROR: cannot read dictionary {}: {err}", path.display());
        Failure::Runtime
    })
}

//
// ─── PLAY ──────────────────────────────────────────────────────────────────────
//

/// Everything a session needs once the flags and files have been checked.
#[derive(Debug)]
struct PlaySetup {
    settings: SessionSettings,
    records: Vec<Record>,
    dictionary: Option<CedictDictionary>,
}

fn prepare_play(args: &PlayArgs, narration_available: bool) -> Result<PlaySetup, Failure> {
    let settings = SessionSettings::new(
        args.mode.into(),
        args.reveal(),
        !args.no_sound,
        args.rate,
        narration_available,
    )
    .map_err(|err| {
        eprintln!("ERROR: {err}");
        Failure::Usage
    })?;

    let options = LoadOptions::default().with_strict(!args.lenient);
    let records = storage::load(&args.infile, &options).map_err(|err| {
        eprintln!("ERROR: {}: {err}", args.infile.display());
        Failure::Dataset
    })?;

    let dictionary = args.dict.as_deref().map(open_dictionary).transpose()?;

    Ok(PlaySetup {
        settings,
        records,
        dictionary,
    })
}

fn play(args: &PlayArgs) -> Result<(), Failure> {
    let PlaySetup {
        settings,
        records,
        dictionary,
    } = prepare_play(args, SayNarrator::is_available())?;

    write_instructions(&mut io::stdout(), settings.mode()).map_err(|err| {
        log::error!("terminal write failed: {err}");
        Failure::Runtime
    })?;

    let say = SayNarrator::default();
    let silent = SilentNarrator;
    let narrator: &dyn Narrator = if settings.narrate() { &say } else { &silent };

    let mut engine = SessionEngine::new(settings, narrator);
    if let Some(dictionary) = &dictionary {
        engine = engine.with_dictionary(dictionary);
    }
    if let Some(seed) = args.seed {
        engine = engine.with_seed(seed);
    }

    let mut console = ConsoleIo::stdio();
    let result = match args.unattended {
        Some(seconds) => {
            let mut unattended = UnattendedIo::new(console, Duration::from_secs(seconds));
            engine.run(records, &mut unattended)
        }
        None => engine.run(records, &mut console),
    };

    let report = result.map_err(|err| {
        eprintln!("ERROR: {err}");
        Failure::Runtime
    })?;
    log::info!(
        "session ended ({:?}): {}/{} correct",
        report.reason,
        report.correct,
        report.asked
    );
    Ok(())
}

//
// ─── LOOKUP & CHECK ────────────────────────────────────────────────────────────
//

fn lookup(args: &LookupArgs) -> Result<(), Failure> {
    let dictionary = open_dictionary(&args.dict)?;
    log::info!("loaded {} dictionary headwords", dictionary.len());

    let stdin = io::stdin();
    lookup::run_lookup(&dictionary, &mut stdin.lock(), &mut io::stdout()).map_err(|err| {
        eprintln!("ERROR: {err}");
        Failure::Runtime
    })
}

fn check(args: &CheckArgs) -> Result<(), Failure> {
    let dictionary = args.dict.as_deref().map(open_dictionary).transpose()?;
    let dictionary = dictionary.as_ref().map(|d| d as &dyn Dictionary);
    let options = LoadOptions::default().with_strict(!args.lenient);

    let mut stdout = io::stdout().lock();
    let mut outcome = Ok(());
    for file in &args.files {
        let check = match lookup::check_file(file, &options, dictionary) {
            Ok(check) => check,
            Err(err) => {
                eprintln!("ERROR: {}: {err}", file.display());
                outcome = Err(Failure::Dataset);
                continue;
            }
        };

        write_check(&mut stdout, file, &check).map_err(|err| {
            log::error!("terminal write failed: {err}");
            Failure::Runtime
        })?;
    }
    outcome
}

fn write_check(out: &mut impl Write, file: &Path, check: &FileCheck) -> io::Result<()> {
    writeln!(out, "Report for {}\n{}", file.display(), check.lengths)?;
    for miss in &check.unknown {
        writeln!(out, "  no entry for {} in {}", miss.segment, miss.phrase)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn play_args(args: &[&str]) -> PlayArgs {
        let cli = Cli::try_parse_from(std::iter::once("drill").chain(args.iter().copied()))
            .expect("arguments parse");
        match cli.into_command() {
            Command::Play(play) => play,
            other => panic!("expected play, got {other:?}"),
        }
    }

    fn word_list(dir: &tempfile::TempDir, text: &str) -> String {
        let path = dir.path().join("words.csv");
        fs::write(&path, text).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn failures_map_to_distinct_exit_codes() {
        assert_eq!(Failure::Runtime.code(), 1);
        assert_eq!(Failure::Usage.code(), 2);
        assert_eq!(Failure::Dataset.code(), 3);
    }

    #[test]
    fn valid_flags_and_word_list_prepare_a_session() {
        let dir = tempfile::tempdir().unwrap();
        let infile = word_list(&dir, "你好,ni3 hao3,hello\n");

        let setup = prepare_play(&play_args(&["-i", &infile, "-s"]), false).unwrap();
        assert_eq!(setup.records.len(), 1);
        assert!(!setup.settings.narrate());
        assert!(setup.dictionary.is_none());
    }

    #[test]
    fn rejected_flags_are_usage_failures() {
        let dir = tempfile::tempdir().unwrap();
        let infile = word_list(&dir, "你好,ni3 hao3,hello\n");

        let rate = prepare_play(&play_args(&["-i", &infile, "-r", "50"]), true).unwrap_err();
        assert_eq!(rate, Failure::Usage);

        let silent = prepare_play(&play_args(&["-i", &infile, "-c", "-p", "-s"]), true);
        assert_eq!(silent.unwrap_err(), Failure::Usage);

        let no_narrator = prepare_play(&play_args(&["-i", &infile, "-c", "-p"]), false);
        assert_eq!(no_narrator.unwrap_err(), Failure::Usage);
    }

    #[test]
    fn flag_errors_win_over_dataset_errors() {
        let args = play_args(&["-i", "/nonexistent/words.csv", "-r", "400"]);
        assert_eq!(prepare_play(&args, true).unwrap_err(), Failure::Usage);
    }

    #[test]
    fn unloadable_word_lists_are_dataset_failures() {
        let missing = play_args(&["-i", "/nonexistent/words.csv", "-s"]);
        assert_eq!(prepare_play(&missing, false).unwrap_err(), Failure::Dataset);

        let dir = tempfile::tempdir().unwrap();
        let infile = word_list(&dir, "你好,ni3 hao3,hello\n你好,ni3 hao3,hi\n");
        let duplicate = play_args(&["-i", &infile, "-s"]);
        assert_eq!(
            prepare_play(&duplicate, false).unwrap_err(),
            Failure::Dataset
        );
    }

    #[test]
    fn unreadable_dictionary_is_a_runtime_failure() {
        let dir = tempfile::tempdir().unwrap();
        let infile = word_list(&dir, "你好,ni3 hao3,hello\n");
        let args = play_args(&["-i", &infile, "-s", "--dict", "/nonexistent/cedict.txt"]);
        assert_eq!(prepare_play(&args, false).unwrap_err(), Failure::Runtime);
    }

    #[test]
    fn check_reports_dataset_failure_after_checking_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = word_list(&dir, "你好,ni3 hao3,hello\n");
        let args = CheckArgs {
            files: vec!["/nonexistent/words.csv".into(), good.into()],
            dict: None,
            lenient: false,
        };
        assert_eq!(check(&args), Err(Failure::Dataset));
    }
}
