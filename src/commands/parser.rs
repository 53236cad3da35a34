//! Command parsing
//!
//! Splits a raw input line into a `Command`.

use crate::commands::Command;

/// Parse a raw line into a `Command`. Blank lines yield `None`.
///
/// Tokens are separated by whitespace and command names are case-sensitive.
pub fn parse_command(raw: &str) -> Option<Command> {
    let mut parts = raw.split_whitespace();
    let cmd = parts.next()?;
    let args: Vec<String> = parts.map(str::to_string).collect();
    let first = args.first().cloned();

    let command = match cmd {
        "ls" => Command::Ls(first),
        "cd" => Command::Cd(first),
        "cp" => Command::Cp(args),
        "head" => Command::Head(first),
        "clear" => Command::Clear,
        "exit" => Command::Exit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse_command("ls"), Some(Command::Ls(None)));
        assert_eq!(parse_command("cd"), Some(Command::Cd(None)));
        assert_eq!(parse_command("clear"), Some(Command::Clear));
        assert_eq!(parse_command("exit"), Some(Command::Exit));
    }

    #[test]
    fn test_parse_commands_with_args() {
        assert_eq!(
            parse_command("cd home/user"),
            Some(Command::Cd(Some("home/user".into())))
        );
        assert_eq!(
            parse_command("  head   /file1.txt  "),
            Some(Command::Head(Some("/file1.txt".into())))
        );
        assert_eq!(
            parse_command("cp /a /b"),
            Some(Command::Cp(vec!["/a".into(), "/b".into()]))
        );
        assert_eq!(
            parse_command("ls /home extra"),
            Some(Command::Ls(Some("/home".into())))
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   \t "), None);
    }

    #[test]
    fn test_parse_unknown_and_case_sensitive() {
        assert_eq!(parse_command("rm -rf /"), Some(Command::Unknown("rm".into())));
        assert_eq!(parse_command("LS"), Some(Command::Unknown("LS".into())));
    }
}
