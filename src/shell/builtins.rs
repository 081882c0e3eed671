use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::ShellError;
use crate::process::ProcessExecutor;

/// Names the completer offers for the first word of a line.
pub const BUILTIN_NAMES: &[&str] = &[
    "cd", "children", "clear", "clr", "cls", "dir", "echo", "exit", "help", "ls", "pause", "pwd",
    "quit",
];

pub fn pwd() -> Result<(), ShellError> {
    println!("{}", env::current_dir()?.display());
    Ok(())
}

/// With no argument, reports where you are instead of changing anywhere.
pub fn cd(path: &str) -> Result<(), ShellError> {
    if path.is_empty() {
        println!("{}", env::current_dir()?.display());
        return Ok(());
    }

    let target = expand_home(path)?;
    env::set_current_dir(&target)?;
    Ok(())
}

fn expand_home(path: &str) -> Result<PathBuf, ShellError> {
    if path == "~" {
        return dirs::home_dir().ok_or(ShellError::HomeDirNotFound);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        let home = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(path))
}

pub fn list_dir(path: &str) -> Result<(), ShellError> {
    let dir = if path.is_empty() { "." } else { path };
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        println!("{}", entry.file_name().to_string_lossy());
    }
    Ok(())
}

pub fn echo(text: &str) {
    println!("{}", text);
}

pub fn show_children(executor: &ProcessExecutor) {
    let pids: Vec<String> = executor
        .tracked_pids()
        .iter()
        .map(i32::to_string)
        .collect();
    println!("Children currently executing: {}", pids.join(" "));
}

pub fn help() {
    println!("marrow {}", env!("CARGO_PKG_VERSION"));
    println!("Builtins:");
    println!("  cd [DIR]        change directory (no argument prints it)");
    println!("  pwd             print the current directory");
    println!("  ls [DIR]        list a directory (alias: dir)");
    println!("  echo [TEXT]     print TEXT");
    println!("  children        show tracked background processes");
    println!("  pause           suspend tracked processes until enter");
    println!("  clear           clear the screen (aliases: cls, clr)");
    println!("  help            this text");
    println!("  quit            leave the shell (alias: exit)");
    println!("Anything else runs as a program; a trailing & backgrounds it.");
}

pub fn clear_screen() {
    print!("\x1b[H\x1b[2J");
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cd_and_back() {
        let previous = env::current_dir().unwrap();
        let temp_dir = env::temp_dir();

        cd(temp_dir.to_str().unwrap()).unwrap();
        assert_eq!(
            env::current_dir().unwrap().canonicalize().unwrap(),
            temp_dir.canonicalize().unwrap()
        );

        cd(previous.to_str().unwrap()).unwrap();
    }

    #[test]
    fn test_cd_without_argument_keeps_directory() {
        let before = env::current_dir().unwrap();
        cd("").unwrap();
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_invalid_path_is_an_error() {
        assert!(cd("/no/such/marrow/dir").is_err());
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~").unwrap(), home);
        assert_eq!(expand_home("~/sub").unwrap(), home.join("sub"));
        assert_eq!(expand_home("/plain").unwrap(), PathBuf::from("/plain"));
    }

    #[test]
    fn test_list_dir_missing_path_is_an_error() {
        assert!(list_dir("/no/such/marrow/dir").is_err());
    }

    #[test]
    fn test_list_dir_current() {
        assert!(list_dir("").is_ok());
    }

    #[test]
    fn test_builtin_names_are_sorted() {
        let mut sorted = BUILTIN_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, BUILTIN_NAMES);
    }
}
