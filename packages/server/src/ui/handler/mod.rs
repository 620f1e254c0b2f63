//! HTTP and WebSocket handlers.

mod dispatcher;
mod http;
mod websocket;

pub use http::{
    create_room, get_object, get_players, get_rooms, health_check, index, join_room, leave_room,
    upload_images,
};
pub use websocket::websocket_handler;
