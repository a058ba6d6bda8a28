use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Process-wide source of time-ordered identifiers for object keys.
///
/// Identifiers are UUIDv7 values rendered in hyphenated lowercase form, so
/// string order matches generation order. When the clock yields a value that
/// is not strictly greater than the last one handed out (same millisecond
/// under contention, or the clock stepping back) the previous value is bumped
/// by one instead.
#[derive(Debug)]
pub struct MonotonicIdGenerator {
    last: Mutex<u128>,
}

impl MonotonicIdGenerator {
    pub fn new() -> Self {
        Self {
            last: Mutex::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let candidate = Uuid::now_v7().as_u128();

        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let next = if candidate > *last {
            candidate
        } else {
            *last + 1
        };
        *last = next;
        drop(last);

        Uuid::from_u128(next).hyphenated().to_string()
    }
}

impl Default for MonotonicIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
