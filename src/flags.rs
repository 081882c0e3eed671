use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        flags.insert(
            "help".to_string(),
            Flag {
                short: "-h".to_string(),
                long: "--help".to_string(),
                description: "Print this help message".to_string(),
                value: None,
            },
        );

        flags.insert(
            "version".to_string(),
            Flag {
                short: "-v".to_string(),
                long: "--version".to_string(),
                description: "Show version information".to_string(),
                value: None,
            },
        );

        flags.insert(
            "quiet".to_string(),
            Flag {
                short: "-q".to_string(),
                long: "--quiet".to_string(),
                description: "Suppress the banner and warning output".to_string(),
                value: None,
            },
        );

        flags.insert(
            "file".to_string(),
            Flag {
                short: "-f".to_string(),
                long: "--file".to_string(),
                description: "Read commands from FILE instead of stdin".to_string(),
                value: None,
            },
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            for flag in self.flags.values_mut() {
                if arg == &flag.short || arg == &flag.long {
                    if arg == "-f" || arg == "--file" {
                        if i + 1 < args.len() {
                            flag.value = Some(args[i + 1].clone());
                            i += 1;
                        } else {
                            return Err(ShellError::Flag(format!(
                                "Flag {} requires a value",
                                arg
                            )));
                        }
                    } else {
                        flag.value = Some("true".to_string());
                    }
                }
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: marrow [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_sets_nothing() {
        let mut flags = Flags::new();
        flags.parse(&[]).unwrap();
        assert!(!flags.is_set("help"));
        assert!(!flags.is_set("quiet"));
        assert!(flags.get_value("file").is_none());
    }

    #[test]
    fn test_short_and_long_forms() {
        let mut flags = Flags::new();
        flags
            .parse(&["-q".to_string(), "--version".to_string()])
            .unwrap();
        assert!(flags.is_set("quiet"));
        assert!(flags.is_set("version"));
    }

    #[test]
    fn test_file_flag_captures_value() {
        let mut flags = Flags::new();
        flags
            .parse(&["-f".to_string(), "batch.txt".to_string()])
            .unwrap();
        assert_eq!(flags.get_value("file").map(String::as_str), Some("batch.txt"));
    }

    #[test]
    fn test_file_flag_without_value_is_an_error() {
        let mut flags = Flags::new();
        let result = flags.parse(&["--file".to_string()]);
        assert!(matches!(result, Err(ShellError::Flag(_))));
    }
}
