use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{Level, LevelFilter, Metadata, Record};

/// A single record captured by the [`ChannelLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// A [`log::Log`] implementation that forwards every enabled record over a channel.
///
/// Sending never blocks. Records are dropped once the receiving side is gone.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.sender.try_send(LogMessage {
                level: record.level(),
                target: record.target().to_string(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(sender: Sender<LogMessage>, level: LevelFilter) -> Self {
        Self { sender, level }
    }

    /// Build a logger along with the receiving end of its channel.
    pub fn with_receiver(level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, level), receiver)
    }

    /// The most verbose level this logger forwards.
    #[inline]
    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Record};

    use super::*;

    #[test]
    fn forwards_enabled_records() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Info);

        // When
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("ember_engine::ecs")
                .args(format_args!("entity {} spawned", 3))
                .build(),
        );

        // Then
        let message = receiver.try_recv().unwrap();
        assert_eq!(message.level, Level::Info);
        assert_eq!(message.target, "ember_engine::ecs");
        assert_eq!(message.message, "entity 3 spawned");
    }

    #[test]
    fn filters_records_above_level() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Info);

        // When
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("noisy"))
                .build(),
        );

        // Then
        assert!(receiver.try_recv().is_err());
        assert_eq!(logger.level(), LevelFilter::Info);
    }

    #[test]
    fn survives_dropped_receiver() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Trace);
        drop(receiver);

        // When - Then (no panic)
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .args(format_args!("nobody listening"))
                .build(),
        );
    }
}
