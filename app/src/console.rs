use std::{
    collections::VecDeque,
    io::{self, Write},
    time::Duration,
};

use crossbeam::channel::Receiver;
use crossterm::{
    QueueableCommand,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use ember_engine::core::log::LogMessage;
use log::Level;

/// Drains engine log records, prints them coloured by level and keeps the most recent ones.
pub struct Console {
    receiver: Receiver<LogMessage>,
    history: VecDeque<LogMessage>,
    capacity: usize,
}

fn color(level: Level) -> Color {
    match level {
        Level::Error | Level::Warn => Color::Red,
        Level::Info => Color::Green,
        Level::Debug | Level::Trace => Color::Yellow,
    }
}

impl Console {
    pub fn new(receiver: Receiver<LogMessage>, capacity: usize) -> Self {
        Self {
            receiver,
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Move every pending record into the history, returning the records that arrived.
    pub fn drain(&mut self) -> Vec<LogMessage> {
        let messages: Vec<LogMessage> = self.receiver.try_iter().collect();
        for message in &messages {
            if self.capacity == 0 {
                break;
            }
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(message.clone());
        }
        messages
    }

    /// Drain pending records and write them to `out`, stamped with `elapsed` engine time.
    pub fn flush_to(&mut self, out: &mut impl Write, elapsed: Duration) -> io::Result<()> {
        let messages = self.drain();
        for message in &messages {
            out.queue(SetForegroundColor(color(message.level)))?
                .queue(Print(format!(
                    "[{:>8.3}s {:<5}] {}\n",
                    elapsed.as_secs_f64(),
                    message.level,
                    message.message
                )))?
                .queue(ResetColor)?;
        }
        out.flush()
    }

    /// Drain pending records to stdout.
    pub fn flush(&mut self, elapsed: Duration) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock(), elapsed)
    }

    /// The most recent records, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &LogMessage> {
        self.history.iter()
    }
}

#[cfg(test)]
mod tests {
    use crossbeam::channel::unbounded;

    use super::*;

    fn message(text: &str) -> LogMessage {
        LogMessage {
            level: Level::Info,
            target: "test".into(),
            message: text.into(),
        }
    }

    #[test]
    fn history_is_bounded() {
        // Given
        let (sender, receiver) = unbounded();
        let mut console = Console::new(receiver, 2);

        // When
        for text in ["a", "b", "c"] {
            sender.send(message(text)).unwrap();
        }
        let drained = console.drain();

        // Then
        assert_eq!(drained.len(), 3);
        let kept: Vec<&str> = console.history().map(|m| m.message.as_str()).collect();
        assert_eq!(kept, vec!["b", "c"]);
    }

    #[test]
    fn flush_writes_each_record() {
        // Given
        let (sender, receiver) = unbounded();
        let mut console = Console::new(receiver, 8);
        sender.send(message("entity 0 spawned")).unwrap();

        // When
        let mut out = Vec::new();
        console
            .flush_to(&mut out, Duration::from_millis(1500))
            .unwrap();

        // Then
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1.500s"));
        assert!(text.contains("entity 0 spawned"));
        assert_eq!(console.history().count(), 1);
    }
}
