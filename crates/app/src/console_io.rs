//! Terminal rendering of a quiz session.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use console::style;
use drill_core::model::{QuizMode, Record, SessionReport, TerminationReason, Verdict};
use services::{DictionaryMatch, Notice, Prompt, SessionIo};

const CONTROLS: [&str; 5] = [
    "MacOS users hear each phrase narrated unless sound is off.",
    "Press ENTER by itself (no input) to restate the phrase.",
    "Enter a question mark (?) to look the phrase up.",
    "Enter a comma (,) character to skip/forfeit a question.",
    "Enter a period (.) character to quit gracefully.",
];

/// Prints the how-to-play banner shown before the first question.
pub fn write_instructions(out: &mut dyn Write, mode: QuizMode) -> io::Result<()> {
    let answer = match mode {
        QuizMode::Phonetic => "the pinyin",
        QuizMode::PhoneticAndMeaning => "the pinyin and english, separated by a comma,",
    };
    writeln!(out, "HOW TO PLAY:")?;
    writeln!(out, "  Type {answer} for the chinese phrase shown.")?;
    for line in CONTROLS {
        writeln!(out, "  {line}")?;
    }
    Ok(())
}

/// Prints dictionary matches, one header line each followed by numbered glosses.
pub fn write_matches(out: &mut dyn Write, matches: &[DictionaryMatch]) -> io::Result<()> {
    for hit in matches {
        writeln!(out, "{}   ({})", hit.matched, hit.phonetic_or_unavailable())?;
        for (i, gloss) in hit.display_glosses().enumerate() {
            writeln!(out, "  {}. {gloss}", i + 1)?;
        }
    }
    Ok(())
}

fn masked(text: &str, visible: bool) -> String {
    if visible {
        text.to_owned()
    } else {
        // Black on black: highlight the line to read it.
        style(text)
            .black()
            .on_black()
            .force_styling(true)
            .to_string()
    }
}

fn graded(text: &str, correct: bool) -> String {
    if correct {
        style(text).green().to_string()
    } else {
        style(text).red().to_string()
    }
}

/// `SessionIo` over any line reader and writer; `stdio()` for the real terminal.
pub struct ConsoleIo<R, W> {
    input: R,
    output: W,
}

impl ConsoleIo<StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleIo<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> SessionIo for ConsoleIo<R, W> {
    fn present(&mut self, prompt: &Prompt<'_>) -> io::Result<()> {
        let record = prompt.record;
        writeln!(
            self.output,
            "\n{}/{}:   {} {}",
            prompt.position,
            prompt.total,
            masked(record.phrase(), prompt.reveal.phrase),
            masked(record.phonetic(), prompt.reveal.phonetic),
        )
    }

    fn read_answer(&mut self, prompt: &Prompt<'_>) -> io::Result<Option<String>> {
        let ask = match prompt.mode {
            QuizMode::Phonetic => "Type the pinyin: ",
            QuizMode::PhoneticAndMeaning => "Type the pinyin,english: ",
        };
        write!(self.output, "{ask}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    fn show_verdict(&mut self, record: &Record, verdict: Verdict) -> io::Result<()> {
        write!(
            self.output,
            "pinyin: {}",
            graded(record.phonetic(), verdict.phonetic)
        )?;
        match verdict.meaning {
            Some(correct) => writeln!(
                self.output,
                "    english: {}",
                graded(record.meaning(), correct)
            ),
            None => writeln!(self.output, "    english: {}", record.meaning()),
        }
    }

    fn show_lookup(&mut self, matches: &[DictionaryMatch]) -> io::Result<()> {
        write_matches(&mut self.output, matches)
    }

    fn notice(&mut self, notice: Notice<'_>) -> io::Result<()> {
        let text = match notice {
            Notice::MalformedInput(err) => format!("{err}, try again"),
            Notice::LookupUnavailable => {
                "no dictionary loaded, start with --dict to look up".to_owned()
            }
            Notice::LookupFailed(err) => format!("lookup failed: {err}"),
        };
        writeln!(self.output, "{}", style(text).yellow())
    }

    fn show_report(&mut self, report: &SessionReport) -> io::Result<()> {
        let ending = match report.reason {
            TerminationReason::Exhausted => "all phrases asked",
            TerminationReason::Quit => "quit early",
        };
        writeln!(self.output, "\n{} ({ending})", style("SESSION OVER").bold())?;
        writeln!(
            self.output,
            "  asked {}, correct {} ({:.2}%)",
            report.asked, report.correct, report.percentage
        )?;
        writeln!(
            self.output,
            "  pinyin correct {}, english correct {}",
            report.phonetic_correct, report.meaning_correct
        )?;
        if !report.missed.is_empty() {
            writeln!(self.output, "  review:")?;
            for record in &report.missed {
                writeln!(self.output, "    {record}")?;
            }
        }
        self.output.flush()
    }
}
