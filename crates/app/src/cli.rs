use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use drill_core::model::{DEFAULT_SPEECH_RATE, QuizMode, Reveal};

#[derive(Debug, Parser)]
#[command(
    name = "drill",
    version,
    about = "Chinese vocabulary drill: phrase in, pinyin and English out",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub play: PlayArgs,
}

impl Cli {
    /// The subcommand to run; a bare invocation plays a session.
    #[must_use]
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Play(self.play))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Quiz yourself on a word list (default).
    Play(PlayArgs),
    /// Look phrases up in a CC-CEDICT dictionary interactively.
    Lookup(LookupArgs),
    /// Validate word lists and check every phrase against a dictionary.
    Check(CheckArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Answer with the pinyin only.
    Phonetic,
    /// Answer with `pinyin,english`.
    #[default]
    Full,
}

impl From<ModeArg> for QuizMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Phonetic => QuizMode::Phonetic,
            ModeArg::Full => QuizMode::PhoneticAndMeaning,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PlayArgs {
    /// Mask the Chinese phrase (highlight the line to reveal it)
    #[arg(short = 'c', long)]
    pub hide_phrase: bool,

    /// Mask the pinyin (always masked in phonetic mode, where it is the answer)
    #[arg(short = 'p', long)]
    pub hide_phonetic: bool,

    /// Disable audio narration of phrases
    #[arg(short = 's', long)]
    pub no_sound: bool,

    /// Rate of speech in words per minute (90 to 300)
    #[arg(short = 'r', long, env = "DRILL_RATE", default_value_t = DEFAULT_SPEECH_RATE)]
    pub rate: u16,

    /// Word list, CSV (`chinese,pinyin,english`) or JSON
    #[arg(short = 'i', long, env = "DRILL_INFILE", default_value = "inputs/default.csv")]
    pub infile: PathBuf,

    /// What to type for each phrase
    #[arg(short = 'm', long, value_enum, default_value_t = ModeArg::Full)]
    pub mode: ModeArg,

    /// Allow pinyin syllable counts that differ from the phrase length
    #[arg(long)]
    pub lenient: bool,

    /// CC-CEDICT file used when `?` is entered
    #[arg(long, env = "DRILL_DICT")]
    pub dict: Option<PathBuf>,

    /// Play without input, skipping each phrase after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub unattended: Option<u64>,

    /// Seed for a reproducible question order
    #[arg(long)]
    pub seed: Option<u64>,
}

impl PlayArgs {
    /// Fields shown in clear text. Phonetic mode never shows the pinyin it asks for.
    #[must_use]
    pub fn reveal(&self) -> Reveal {
        Reveal {
            phrase: !self.hide_phrase,
            phonetic: !self.hide_phonetic && self.mode != ModeArg::Phonetic,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// CC-CEDICT file
    #[arg(long, env = "DRILL_DICT")]
    pub dict: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Word lists to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// CC-CEDICT file to check phrases against
    #[arg(long, env = "DRILL_DICT")]
    pub dict: Option<PathBuf>,

    /// Allow pinyin syllable counts that differ from the phrase length
    #[arg(long)]
    pub lenient: bool,
}
