//! Domain layer
//!
//! ゲームのコアモデル（接続レジストリ、ラウンドの状態遷移、値オブジェクト）と、
//! ドメイン層が必要とする外部コラボレーターのインターフェースを定義します。

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod object_store;
pub mod random;
pub mod registry;
pub mod repository;
pub mod round;
pub mod value_object;
pub mod word;

pub use entity::{Connection, Game, Player, PlayerField, Role, STATUS_WAITING};
pub use error::{MessagePushError, RepositoryError, RoundError, StorageError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use object_store::{ObjectStore, StoredObject};
pub use random::{RandomSource, SequenceRandom};
pub use registry::ConnectionRegistry;
pub use repository::GameRepository;
pub use round::{Round, RoundPhase};
pub use value_object::{ConnectionId, JoinCode, PlayerName, Timestamp};
pub use word::{WORD_CATALOG, pick_word};
