//! Operator-facing messages raised by list screens.

use std::fmt::{Display, Formatter};

use tokio::sync::mpsc;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

/// Maps a notification level to the alert class used by the web console.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        Level::Info | Level::Debug => "info",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn alert_class(&self) -> &'static str {
        alert_level_to_str(&self.level)
    }
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Sink for notifications. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => log::error!("{}", notification.message),
            Level::Warning => log::warn!("{}", notification.message),
            Level::Debug => log::debug!("{}", notification.message),
            Level::Info | Level::Success => log::info!("{}", notification.message),
        }
    }
}

/// Forwards notifications to a receiver owned by the presentation layer.
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            log::debug!("Notification dropped: receiver is gone");
        }
    }
}
