//! Interactive command parsing.

use catalyst_server::domain::{Identity, IdentityError};
use thiserror::Error;

/// A line typed at the client prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Announce an identity on this connection
    Join(Identity),
    /// Withdraw the identity currently announced
    Leave,
    /// Poll the snapshot endpoint
    Who,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: join <identity>")]
    MissingIdentity,

    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),

    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
}

/// Parse one input line. A leading `/` is accepted and ignored.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let line = line.strip_prefix('/').unwrap_or(line);
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name.to_ascii_lowercase().as_str() {
        "join" => {
            if rest.is_empty() {
                return Err(CommandError::MissingIdentity);
            }
            Ok(Command::Join(Identity::parse(rest)?))
        }
        "leave" => Ok(Command::Leave),
        "who" => Ok(Command::Who),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_with_numeric_identity() {
        // テスト項目: 数値の identity で join コマンドが解釈される
        // given (前提条件):
        let line = "join 7";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Command::Join(Identity::Numeric(7))));
    }

    #[test]
    fn test_parse_join_with_token_and_slash_prefix() {
        // テスト項目: 先頭の / と前後の空白は無視される
        // given (前提条件):
        let line = "  /join   alice  ";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(Command::Join(Identity::Token("alice".to_string())))
        );
    }

    #[test]
    fn test_parse_join_without_identity() {
        // テスト項目: identity を省略した join はエラーになる
        // given (前提条件):
        let line = "join";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandError::MissingIdentity));
    }

    #[test]
    fn test_parse_join_with_too_long_identity() {
        // テスト項目: 長すぎる identity は IdentityError として返される
        // given (前提条件):
        let line = format!("join {}", "x".repeat(65));

        // when (操作):
        let result = parse_command(&line);

        // then (期待する結果):
        assert!(matches!(result, Err(CommandError::InvalidIdentity(_))));
    }

    #[test]
    fn test_parse_simple_commands() {
        // テスト項目: 引数なしのコマンドが解釈される
        // given (前提条件) / when (操作) / then (期待する結果):
        assert_eq!(parse_command("leave"), Ok(Command::Leave));
        assert_eq!(parse_command("WHO"), Ok(Command::Who));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert_eq!(parse_command("quit"), Ok(Command::Quit));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_unknown_command() {
        // テスト項目: 未知のコマンドはエラーになる
        // given (前提条件):
        let line = "dance now";

        // when (操作):
        let result = parse_command(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandError::Unknown("dance".to_string())));
    }
}
