//! Long-polling loop.
//!
//! Updates are acknowledged by advancing the offset before they are handled;
//! each message then runs through the dispatcher on its own task.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::dispatch::Dispatcher;
use crate::telegram::{Message, TelegramClient};

/// Pause after a failed `getUpdates` call.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Telegram rejects messages longer than this (in UTF-16 units; counting
/// chars is a safe over-approximation for Cyrillic and Latin text).
const MAX_MESSAGE_CHARS: usize = 4096;

/// Poll forever.  Returns only if the task is cancelled.
pub async fn run(client: Arc<TelegramClient>, dispatcher: Arc<Dispatcher>, poll_timeout_secs: u64) {
    let mut offset = 0;

    loop {
        let updates = match client.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                error!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                debug!(update_id = update.update_id, "skipping non-message update");
                continue;
            };

            let client = client.clone();
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                handle_message(&client, &dispatcher, message).await;
            });
        }
    }
}

async fn handle_message(client: &TelegramClient, dispatcher: &Dispatcher, message: Message) {
    let Some(reply) = dispatcher.dispatch(&message.to_incoming()).await else {
        return;
    };

    for chunk in split_reply(&reply, MAX_MESSAGE_CHARS) {
        if let Err(e) = client.send_message(message.chat.id, &chunk).await {
            warn!(error = %e, chat = message.chat.id, "failed to send reply");
            return;
        }
    }
}

/// Split a reply on line boundaries into chunks of at most `limit` chars.
/// A single line longer than `limit` is cut hard.
fn split_reply(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    // `current` may hold only empty lines, so track whether a line was added.
    let mut started = false;

    for line in text.split('\n') {
        let mut line: Vec<char> = line.chars().collect();
        let was_cut = line.len() > limit;

        while line.len() > limit {
            if started {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
                started = false;
            }
            let rest = line.split_off(limit);
            chunks.push(line.into_iter().collect());
            line = rest;
        }
        if was_cut && line.is_empty() {
            continue;
        }

        if started && current_len + 1 + line.len() > limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
            started = false;
        }
        if started {
            current.push('\n');
            current_len += 1;
        }
        current_len += line.len();
        current.extend(line);
        started = true;
    }

    if started {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_reply_is_one_chunk() {
        assert_eq!(split_reply("Список доноров:\n1. Adams", 4096), ["Список доноров:\n1. Adams"]);
    }

    #[test]
    fn test_split_on_line_boundaries() {
        let text = "aaaa\nbbbb\ncccc";
        assert_eq!(split_reply(text, 9), ["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn test_overlong_line_is_cut() {
        assert_eq!(split_reply("абвгдеж", 3), ["абв", "где", "ж"]);
        assert_eq!(split_reply("абвгде", 3), ["абв", "где"]);
    }

    #[test]
    fn test_chunks_never_exceed_limit() {
        let text = (1..=500)
            .map(|i| format!("{i}. Фамилия{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let chunks = split_reply(&text, 100);

        assert!(chunks.iter().all(|c| c.chars().count() <= 100));
        assert_eq!(chunks.join("\n"), text);
    }
}
