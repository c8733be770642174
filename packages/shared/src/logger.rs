//! Logging setup for the Catalyst binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events are shown at the default level.
const WORKSPACE_CRATES: [&str; 3] = ["catalyst_shared", "catalyst_server", "catalyst_client"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every workspace crate and the binary itself are logged at `default_log_level`.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let mut directives: Vec<String> = WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, default_log_level))
        .collect();

    let binary_target = binary_name.replace('-', "_");
    if !WORKSPACE_CRATES.contains(&binary_target.as_str()) {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }

    directives.push(format!("tower_http={}", default_log_level));
    directives.join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The level can be overridden with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "catalyst-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use catalyst_shared::logger::setup_logger;
///
/// setup_logger("catalyst-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_workspace_crates() {
        // テスト項目: ワークスペースの全クレートにデフォルトレベルが設定される
        // given (前提条件):
        let binary_name = "catalyst-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.contains("catalyst_shared=debug"));
        assert!(filter.contains("catalyst_server=debug"));
        assert!(filter.contains("catalyst_client=debug"));
        assert!(filter.contains("tower_http=debug"));
        // バイナリ名はクレート名と同じなので重複しない
        assert_eq!(filter.matches("catalyst_server=").count(), 1);
    }

    #[test]
    fn test_default_filter_adds_unknown_binary() {
        // テスト項目: ワークスペース外のバイナリ名も対象に含まれる
        // given (前提条件):
        let binary_name = "presence-probe";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.contains("presence_probe=info"));
    }
}
