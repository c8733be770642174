//! Message formatting utilities for client display.

use catalyst_server::domain::Identity;
use chrono::{DateTime, Local};

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a live presence update
    ///
    /// # Arguments
    ///
    /// * `users` - Online identities carried by the update
    /// * `revision` - Revision of the snapshot
    /// * `me` - The identity this client announced, marked as "(me)"
    /// * `received_at` - Unix timestamp when the update arrived (milliseconds)
    pub fn format_presence_update(
        users: &[Identity],
        revision: u64,
        me: Option<&Identity>,
        received_at: i64,
    ) -> String {
        let header = format!(
            "Online users (revision {}, {}):",
            revision,
            local_time(received_at)
        );
        Self::format_user_list(&header, users, me)
    }

    /// Format a snapshot obtained from the HTTP endpoint
    pub fn format_polled_snapshot(users: &[Identity], me: Option<&Identity>) -> String {
        Self::format_user_list("Online users (polled, may be stale):", users, me)
    }

    fn format_user_list(header: &str, users: &[Identity], me: Option<&Identity>) -> String {
        let mut output = String::new();
        output.push_str("\n\n");
        output.push_str(RULE);
        output.push('\n');
        output.push_str(header);
        output.push('\n');

        if users.is_empty() {
            output.push_str("(Nobody online)\n");
        } else {
            for user in users {
                let me_suffix = if Some(user) == me { " (me)" } else { "" };
                output.push_str(&format!("  {}{}\n", user, me_suffix));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_help() -> String {
        "\nCommands:\n  join <identity>  announce an identity\n  leave            withdraw the current identity\n  who              fetch the online list over HTTP\n  quit             disconnect and exit\n".to_string()
    }

    pub fn format_notice(text: &str) -> String {
        format!("\n{}\n", text)
    }

    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\nReceived binary data: {} bytes\n", byte_count)
    }

    pub fn format_raw_message(text: &str) -> String {
        format!("\nReceived: {}\n", text)
    }
}

fn local_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}
