//! UI utilities for the client.

use std::io::Write;

use catalyst_server::domain::Identity;

/// Prompt label for the given identity
pub fn prompt(identity: Option<&Identity>) -> String {
    match identity {
        Some(identity) => format!("{}> ", identity),
        None => "observer> ".to_string(),
    }
}

/// Redisplay the prompt after printing a message
pub fn redisplay_prompt(identity: Option<&Identity>) {
    print!("{}", prompt(identity));
    std::io::stdout().flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_labels() {
        // テスト項目: identity の有無でプロンプトが切り替わる
        // given (前提条件):
        let identity = Identity::Numeric(7);

        // when (操作) / then (期待する結果):
        assert_eq!(prompt(Some(&identity)), "7> ");
        assert_eq!(prompt(None), "observer> ");
    }
}
