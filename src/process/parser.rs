use super::ProcessError;

/// A single input line broken into the pieces the launcher needs.
///
/// Built fresh for every line and dropped once the launcher has consumed
/// it. Only one argument token is ever captured: everything after the
/// first space travels to the child as a single argv entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub program: String,
    pub argument: Option<String>,
    pub background: bool,
}

impl ParsedCommand {
    /// Parses a trimmed input line. A trailing `&` marks background
    /// execution and is stripped before the program/argument split.
    pub fn parse(line: &str) -> Result<Self, ProcessError> {
        let mut rest = line.trim();
        let mut background = false;

        if let Some(stripped) = rest.strip_suffix('&') {
            background = true;
            rest = stripped.trim_end();
        }

        // A bare `&` is not a command.
        if rest.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }

        let (program, argument) = match rest.split_once(' ') {
            Some((program, arg)) => {
                let arg = arg.trim();
                (
                    program.to_string(),
                    (!arg.is_empty()).then(|| arg.to_string()),
                )
            }
            None => (rest.to_string(), None),
        };

        Ok(ParsedCommand {
            program,
            argument,
            background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_program() {
        let cmd = ParsedCommand::parse("myprog").unwrap();
        assert_eq!(cmd.program, "myprog");
        assert_eq!(cmd.argument, None);
        assert!(!cmd.background);
    }

    #[test]
    fn test_parse_program_with_argument() {
        let cmd = ParsedCommand::parse("myprog arg1").unwrap();
        assert_eq!(cmd.program, "myprog");
        assert_eq!(cmd.argument, Some("arg1".to_string()));
        assert!(!cmd.background);
    }

    #[test]
    fn test_parse_background() {
        let cmd = ParsedCommand::parse("myprog arg1 &").unwrap();
        assert_eq!(cmd.program, "myprog");
        assert_eq!(cmd.argument, Some("arg1".to_string()));
        assert!(cmd.background);
    }

    #[test]
    fn test_parse_background_without_space() {
        let cmd = ParsedCommand::parse("./tool&").unwrap();
        assert_eq!(cmd.program, "./tool");
        assert_eq!(cmd.argument, None);
        assert!(cmd.background);
    }

    #[test]
    fn test_parse_bare_ampersand_is_rejected() {
        assert!(matches!(
            ParsedCommand::parse("&"),
            Err(ProcessError::EmptyCommand)
        ));
        assert!(matches!(
            ParsedCommand::parse("   &"),
            Err(ProcessError::EmptyCommand)
        ));
    }

    #[test]
    fn test_parse_keeps_remainder_as_single_argument() {
        // No further tokenization: the tail is one argv entry.
        let cmd = ParsedCommand::parse("grep -r needle").unwrap();
        assert_eq!(cmd.program, "grep");
        assert_eq!(cmd.argument, Some("-r needle".to_string()));
    }

    #[test]
    fn test_parse_path_reference_is_preserved() {
        let cmd = ParsedCommand::parse("/usr/bin/env HOME").unwrap();
        assert_eq!(cmd.program, "/usr/bin/env");
        assert_eq!(cmd.argument, Some("HOME".to_string()));
    }

    #[test]
    fn test_parse_trailing_whitespace_around_argument() {
        let cmd = ParsedCommand::parse("myprog   arg1   ").unwrap();
        assert_eq!(cmd.argument, Some("arg1".to_string()));
    }

    #[test]
    fn test_parse_space_only_argument_is_none() {
        let cmd = ParsedCommand::parse("myprog  &").unwrap();
        assert_eq!(cmd.program, "myprog");
        assert_eq!(cmd.argument, None);
        assert!(cmd.background);
    }
}
