//! UseCase layer
//!
//! 1 ユースケース = 1 構造体。各ユースケースはドメイン層の trait（Repository,
//! MessagePusher, ObjectStore, RandomSource）と共有の ConnectionRegistry に依存し、
//! 送信するメッセージは WebSocket DTO で組み立てます。

mod broadcast;
mod connect_player;
mod create_room;
mod disconnect_player;
mod error;
mod get_object;
mod get_players;
mod get_rooms;
mod guess_word;
mod join_room;
mod leave_room;
mod start_game;
mod submission;
mod upload_images;

pub use broadcast::BroadcastRouter;
pub use connect_player::ConnectPlayerUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect_player::DisconnectPlayerUseCase;
pub use error::GameError;
pub use get_object::GetObjectUseCase;
pub use get_players::GetPlayersUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use guess_word::{GuessOutcome, GuessWordUseCase};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use start_game::{RoundStarted, StartGameUseCase};
pub use submission::{PhotoSubmission, SubmitPhotoUseCase, SubmitVoteUseCase};
pub use upload_images::{ImageUpload, UploadImagesUseCase};

#[cfg(test)]
pub(crate) mod test_support;
