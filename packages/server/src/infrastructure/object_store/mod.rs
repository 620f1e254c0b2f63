//! オブジェクトストレージの実装
//!
//! - `inmemory`: プロセス内の `HashMap` に保存し、`/objects/{key}` で配信する実装

pub mod inmemory;

pub use inmemory::InMemoryObjectStore;
