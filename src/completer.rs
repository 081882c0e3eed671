use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::env;
use std::fs;

use crate::highlight::OutputStyler;
use crate::shell::builtins::BUILTIN_NAMES;

/// Completes builtin names and PATH executables for the first word of a
/// line, filesystem paths for everything after it.
#[derive(Clone)]
pub struct ShellCompleter {
    commands: BTreeSet<String>,
    styler: OutputStyler,
}

impl Default for ShellCompleter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellCompleter {
    pub fn new() -> Self {
        let mut completer = ShellCompleter {
            commands: BTreeSet::new(),
            styler: OutputStyler::new(),
        };
        completer.refresh_commands();
        completer
    }

    pub fn refresh_commands(&mut self) {
        self.commands.clear();

        for name in BUILTIN_NAMES {
            self.commands.insert((*name).to_string());
        }

        if let Some(path_var) = env::var_os("PATH") {
            for path in env::split_paths(&path_var) {
                if let Ok(entries) = fs::read_dir(path) {
                    for entry in entries.filter_map(Result::ok) {
                        if let Ok(file_type) = entry.file_type() {
                            if file_type.is_file() || file_type.is_symlink() {
                                if let Some(name) = entry.file_name().to_str() {
                                    self.commands.insert(name.to_string());
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect()
    }

    fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir, prefix) = match incomplete.rsplit_once('/') {
            Some(("", prefix)) => ("/".to_string(), prefix.to_string()),
            Some((dir, prefix)) => (dir.to_string(), prefix.to_string()),
            None => (".".to_string(), incomplete.to_string()),
        };

        let mut matches = Vec::new();
        if let Ok(entries) = fs::read_dir(&dir) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(&prefix) {
                        let rendered = match dir.as_str() {
                            "." => name.to_string(),
                            "/" => format!("/{}", name),
                            _ => format!("{}/{}", dir, name),
                        };
                        let replacement = if entry.path().is_dir() {
                            format!("{}/", rendered)
                        } else {
                            format!("{} ", rendered)
                        };
                        matches.push(Pair {
                            display: rendered,
                            replacement,
                        });
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.styler.command_line(line))
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(self.styler.prompt(prompt))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];

        let mut words: Vec<&str> = line_up_to_cursor.split_whitespace().collect();
        if line_up_to_cursor.ends_with(' ') {
            words.push("");
        }

        match words.len() {
            0 => Ok((0, self.complete_command(""))),
            1 => {
                let word = words[0];
                let start = line_up_to_cursor.rfind(word).unwrap_or(0);
                Ok((start, self.complete_command(word)))
            }
            _ => {
                let last_word = words.last().copied().unwrap_or("");
                let start = if last_word.is_empty() {
                    pos
                } else {
                    line_up_to_cursor.rfind(last_word).unwrap_or(pos)
                };
                Ok((start, self.complete_path(last_word)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_completed() {
        let completer = ShellCompleter::new();
        let matches = completer.complete_command("pau");
        assert!(matches.iter().any(|pair| pair.display == "pause"));
    }

    #[test]
    fn test_empty_prefix_offers_everything() {
        let completer = ShellCompleter::new();
        let matches = completer.complete_command("");
        assert!(matches.len() >= BUILTIN_NAMES.len());
    }

    #[test]
    fn test_path_completion_lists_directory_entries() {
        let dir = env::temp_dir().join("marrow_completer_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("target_file"), "").unwrap();

        let completer = ShellCompleter::new();
        let incomplete = format!("{}/target", dir.display());
        let matches = completer.complete_path(&incomplete);
        assert!(matches
            .iter()
            .any(|pair| pair.display.ends_with("target_file")));
    }
}
