//! Shared application state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionRegistry, GameRepository, MessagePusher, ObjectStore, RandomSource},
    usecase::{
        BroadcastRouter, ConnectPlayerUseCase, CreateRoomUseCase, DisconnectPlayerUseCase,
        GetObjectUseCase, GetPlayersUseCase, GetRoomsUseCase, GuessWordUseCase, JoinRoomUseCase,
        LeaveRoomUseCase, StartGameUseCase, SubmitPhotoUseCase, SubmitVoteUseCase,
        UploadImagesUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// BroadcastRouter（エラー通知など、ハンドラーから直接送信する場合に使用）
    pub router: Arc<BroadcastRouter>,

    // WebSocket
    pub connect_player_usecase: Arc<ConnectPlayerUseCase>,
    pub disconnect_player_usecase: Arc<DisconnectPlayerUseCase>,
    pub start_game_usecase: Arc<StartGameUseCase>,
    pub guess_word_usecase: Arc<GuessWordUseCase>,
    pub submit_photo_usecase: Arc<SubmitPhotoUseCase>,
    pub submit_vote_usecase: Arc<SubmitVoteUseCase>,

    // HTTP
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_players_usecase: Arc<GetPlayersUseCase>,
    pub upload_images_usecase: Arc<UploadImagesUseCase>,
    pub get_object_usecase: Arc<GetObjectUseCase>,
}

impl AppState {
    /// Wire every use case around one Connection Registry.
    pub fn new(
        repository: Arc<dyn GameRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        object_store: Arc<dyn ObjectStore>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        let registry = Arc::new(Mutex::new(ConnectionRegistry::new()));
        let router = Arc::new(BroadcastRouter::new(
            registry.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_player_usecase: Arc::new(ConnectPlayerUseCase::new(
                repository.clone(),
                registry.clone(),
                message_pusher.clone(),
            )),
            disconnect_player_usecase: Arc::new(DisconnectPlayerUseCase::new(
                registry.clone(),
                message_pusher,
            )),
            start_game_usecase: Arc::new(StartGameUseCase::new(
                registry.clone(),
                router.clone(),
                random.clone(),
            )),
            guess_word_usecase: Arc::new(GuessWordUseCase::new(registry.clone(), router.clone())),
            submit_photo_usecase: Arc::new(SubmitPhotoUseCase::new(
                repository.clone(),
                registry.clone(),
                router.clone(),
            )),
            submit_vote_usecase: Arc::new(SubmitVoteUseCase::new(
                repository.clone(),
                registry,
                router.clone(),
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(repository.clone(), random)),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(repository.clone())),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(repository.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            get_players_usecase: Arc::new(GetPlayersUseCase::new(repository.clone())),
            upload_images_usecase: Arc::new(UploadImagesUseCase::new(
                repository,
                object_store.clone(),
            )),
            get_object_usecase: Arc::new(GetObjectUseCase::new(object_store)),
            router,
        }
    }
}
