//! Infrastructure layer
//!
//! ドメイン層が定義する trait の具体的な実装と、ワイヤープロトコルの DTO を提供します。

pub mod dto;
pub mod message_pusher;
pub mod object_store;
pub mod random;
pub mod repository;
