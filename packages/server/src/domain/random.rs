//! Random index provider
//!
//! 役割の抽選・単語の選択・join code の生成はすべてこの trait を経由します。
//! 本番環境では `infrastructure::random::ThreadRandom` を、テストでは
//! `SequenceRandom` を注入して結果を固定します。

use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of uniformly distributed indices
pub trait RandomSource: Send + Sync {
    /// Returns an index in `[0, upper)`. Returns 0 when `upper` is 0.
    fn index(&self, upper: usize) -> usize;
}

/// Deterministic random source that replays a fixed sequence.
///
/// Each call consumes the next value (cycling when exhausted) and reduces it
/// modulo `upper`, so the result always stays in range.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self {
            values,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandom {
    fn index(&self, upper: usize) -> usize {
        if upper == 0 || self.values.is_empty() {
            return 0;
        }
        let position = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values[position] % upper
    }
}
