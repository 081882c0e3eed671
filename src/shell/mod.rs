use std::env;
use std::path::Path;

pub mod builtins;

use crate::error::ShellError;
use crate::flags::Flags;
use crate::highlight::OutputStyler;
use crate::input::{InputSource, ReadOutcome};
use crate::process::{signal, JobControl, ParsedCommand, ProcessExecutor};
use crate::prompt::PromptFormatter;

pub struct Shell {
    input: InputSource,
    prompt: PromptFormatter,
    styler: OutputStyler,
    executor: ProcessExecutor,
    flags: Flags,
    current_dir: String,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let input = match flags.get_value("file") {
            Some(path) => InputSource::batch(Path::new(path))?,
            None => InputSource::interactive()?,
        };

        let executor = ProcessExecutor::new(&flags);
        signal::install_handlers(executor.quit_flag())?;

        let current_dir = env::current_dir()?.to_string_lossy().to_string();

        Ok(Shell {
            input,
            prompt: PromptFormatter::new(),
            styler: OutputStyler::new(),
            executor,
            flags,
            current_dir,
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if self.input.is_interactive() && !self.flags.is_set("quiet") {
            let banner = "Welcome to marrow. Type 'help' for the builtin list.";
            println!("{}", self.styler.banner(banner));
        }

        loop {
            // Safe point: an asynchronous quit request lands here, never
            // inside the handler itself.
            if self.executor.quit_requested() {
                self.input.save_history();
                self.executor.shutdown(0);
            }

            let prompt = self.prompt.render(&self.current_dir);
            match self.input.read_line(&prompt) {
                Ok(ReadOutcome::Line(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if let Err(e) = self.dispatch(&line) {
                        eprintln!("{}", self.styler.error(&e.to_string()));
                    }
                    // cd may have moved us.
                    self.current_dir = env::current_dir()?.to_string_lossy().to_string();
                }
                Ok(ReadOutcome::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("Type 'quit' or press ctrl-d to exit.");
                    }
                }
                Ok(ReadOutcome::Eof) => {
                    self.input.save_history();
                    self.executor.shutdown(0);
                }
                Err(e) => {
                    eprintln!("{}", self.styler.error(&e.to_string()));
                }
            }
        }
    }

    /// Builtins are matched case-insensitively on the first word; anything
    /// else goes to the launcher.
    fn dispatch(&mut self, line: &str) -> Result<(), ShellError> {
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "quit" | "exit" => {
                self.input.save_history();
                self.executor.shutdown(0)
            }
            "pwd" => builtins::pwd(),
            "cd" => builtins::cd(rest),
            "ls" | "dir" => builtins::list_dir(rest),
            "echo" => {
                builtins::echo(rest);
                Ok(())
            }
            "children" => {
                builtins::show_children(&self.executor);
                Ok(())
            }
            "pause" => {
                self.executor.pause()?;
                Ok(())
            }
            "help" => {
                builtins::help();
                Ok(())
            }
            "clear" | "cls" | "clr" => {
                builtins::clear_screen();
                Ok(())
            }
            _ => {
                let parsed = ParsedCommand::parse(line)?;
                self.executor.launch(&parsed)?;
                Ok(())
            }
        }
    }
}
