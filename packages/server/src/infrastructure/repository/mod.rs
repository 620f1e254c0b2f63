//! Repository 実装
//!
//! - `inmemory`: `Vec` をインメモリ DB として使う実装（JSON スナップショットに対応）

pub mod inmemory;

pub use inmemory::InMemoryGameRepository;
