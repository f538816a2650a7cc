use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, TimeDelta, Utc};

use crate::UtcDateTime;

/// Source of "now" for a [`SessionStore`](super::SessionStore).
pub trait Clock: Send + Sync {
    fn now(&self) -> UtcDateTime;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcDateTime {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hand one clone to a store and
/// keep the other to move time forward.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<ArcSwap<UtcDateTime>>,
}

impl ManualClock {
    pub fn new(start: UtcDateTime) -> Self {
        Self {
            now: Arc::new(ArcSwap::from_pointee(start)),
        }
    }

    pub fn set(&self, time: UtcDateTime) {
        self.now.store(Arc::new(time));
    }

    pub fn advance(&self, secs: i64) {
        self.now.rcu(|now| Arc::new(offset(**now, secs)));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> UtcDateTime {
        **self.now.load()
    }
}

/// `time + secs`, clamped to the representable range.
pub(crate) fn offset(time: UtcDateTime, secs: i64) -> UtcDateTime {
    let clamped = if secs < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    };

    TimeDelta::try_seconds(secs)
        .and_then(|delta| time.checked_add_signed(delta))
        .unwrap_or(clamped)
}
