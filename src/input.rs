use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;

use crate::completer::ShellCompleter;
use crate::error::ShellError;

/// One read from the input source.
#[derive(Debug)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Where command lines come from: the line editor, or a batch file.
pub enum InputSource {
    Interactive(Box<Editor<ShellCompleter, FileHistory>>),
    Batch(io::Lines<BufReader<File>>),
}

impl InputSource {
    pub fn interactive() -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new()));
        editor.set_auto_add_history(true);

        if let Some(path) = history_file() {
            // Missing on first run, not worth a warning.
            let _ = editor.load_history(&path);
        }

        Ok(Self::Interactive(Box::new(editor)))
    }

    pub fn batch(path: &Path) -> Result<Self, ShellError> {
        let file = File::open(path)?;
        Ok(Self::Batch(BufReader::new(file).lines()))
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive(_))
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ShellError> {
        match self {
            Self::Interactive(editor) => match editor.readline(prompt) {
                Ok(line) => Ok(ReadOutcome::Line(line)),
                Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
                Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
                Err(e) => Err(e.into()),
            },
            Self::Batch(lines) => match lines.next() {
                Some(line) => Ok(ReadOutcome::Line(line?)),
                None => Ok(ReadOutcome::Eof),
            },
        }
    }

    /// Persists the interactive history; a no-op in batch mode.
    pub fn save_history(&mut self) {
        if let Self::Interactive(editor) = self {
            if let Some(path) = history_file() {
                if let Err(e) = editor.save_history(&path) {
                    eprintln!("Warning: couldn't save history: {}", e);
                }
            }
        }
    }
}

fn history_file() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".marrow_history"))
}
