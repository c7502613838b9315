//! Transient warnings shown over the canvas.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

use crate::stores::lock;

/// How long a notice stays visible.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(3200);

/// A message that disappears on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub expires_at: Instant,
    seq: u64,
}

impl Notice {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Holds at most one notice; a newer one replaces the current.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Mutex<Option<Notice>>,
    next_seq: AtomicU64,
    duration: Duration,
}

impl NoticeBoard {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: Mutex::new(None),
            next_seq: AtomicU64::new(1),
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `message`, returning the notice's sequence number.
    pub fn show(&self, message: impl Into<String>) -> u64 {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        *lock(&self.current) = Some(Notice {
            message: message.into(),
            expires_at: Instant::now() + self.duration,
            seq,
        });
        seq
    }

    /// The visible notice, if any has not yet expired.
    pub fn active(&self) -> Option<Notice> {
        let mut current = lock(&self.current);
        match current.as_ref() {
            Some(notice) if Instant::now() < notice.expires_at => Some(notice.clone()),
            Some(_) => {
                *current = None;
                None
            }
            None => None,
        }
    }

    /// Remove the notice if it is still the one identified by `seq`.
    pub fn dismiss(&self, seq: u64) -> bool {
        let mut current = lock(&self.current);
        if current.as_ref().is_some_and(|n| n.seq == seq) {
            *current = None;
            true
        } else {
            false
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_DURATION)
    }
}
