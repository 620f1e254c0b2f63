//! Domain entities.

use serde::{Deserialize, Serialize};

use super::{
    round::RoundPhase,
    value_object::{ConnectionId, JoinCode, PlayerName, Timestamp},
};

/// Status a game is created with
pub const STATUS_WAITING: &str = "waiting";

/// Role of a connection within a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Unknown,
    Crewmate,
    Imposter,
}

/// Player record stored in the Session Directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
    pub score: u32,
    /// Join code of the game this player belongs to
    pub game: JoinCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote: Option<String>,
}

impl Player {
    pub fn new(name: PlayerName, game: JoinCode) -> Self {
        Self {
            name,
            score: 0,
            game,
            photo: None,
            vote: None,
        }
    }

    /// The stored photo URL, if it is non-empty
    pub fn submitted_photo(&self) -> Option<&str> {
        self.photo.as_deref().filter(|photo| !photo.is_empty())
    }
}

/// Player attributes writable by the submission aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerField {
    Photo(String),
    Vote(String),
}

impl PlayerField {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerField::Photo(_) => "photo",
            PlayerField::Vote(_) => "vote",
        }
    }

    pub fn apply(self, player: &mut Player) {
        match self {
            PlayerField::Photo(url) => player.photo = Some(url),
            PlayerField::Vote(vote) => player.vote = Some(vote),
        }
    }
}

/// Game session stored in the Session Directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub join_code: JoinCode,
    pub host_name: PlayerName,
    pub room_name: String,
    pub status: String,
    pub players: Vec<Player>,
    pub created_at: Timestamp,
}

impl Game {
    /// Create a waiting game whose first player is the host.
    pub fn new(
        join_code: JoinCode,
        host_name: PlayerName,
        room_name: String,
        created_at: Timestamp,
    ) -> Self {
        let host = Player::new(host_name.clone(), join_code.clone());
        Self {
            join_code,
            host_name,
            room_name,
            status: STATUS_WAITING.to_string(),
            players: vec![host],
            created_at,
        }
    }

    pub fn find_player(&self, name: &PlayerName) -> Option<&Player> {
        self.players.iter().find(|p| &p.name == name)
    }

    /// Whether a player with this name is bound to this game's join code.
    pub fn is_member(&self, name: &PlayerName) -> bool {
        self.players
            .iter()
            .any(|p| &p.name == name && p.game == self.join_code)
    }

    /// `(name, photo)` for every player with a non-empty photo, in player order.
    pub fn submitted_photos(&self) -> Vec<(PlayerName, String)> {
        self.players
            .iter()
            .filter_map(|p| {
                p.submitted_photo()
                    .map(|photo| (p.name.clone(), photo.to_string()))
            })
            .collect()
    }

    pub fn all_photos_submitted(&self) -> bool {
        self.players.iter().all(|p| p.submitted_photo().is_some())
    }
}

/// Session metadata of one live socket, owned by the connection registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub player_name: PlayerName,
    pub game_id: JoinCode,
    pub role: Role,
    pub in_game: bool,
    /// Secret word of the current round; kept in memory only
    pub chosen_word: Option<String>,
    pub phase: RoundPhase,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(
        id: ConnectionId,
        player_name: PlayerName,
        game_id: JoinCode,
        connected_at: Timestamp,
    ) -> Self {
        Self {
            id,
            player_name,
            game_id,
            role: Role::Unknown,
            in_game: false,
            chosen_word: None,
            phase: RoundPhase::Waiting,
            connected_at,
        }
    }

    pub fn is_imposter(&self) -> bool {
        self.role == Role::Imposter
    }

    pub fn is_crewmate(&self) -> bool {
        self.role == Role::Crewmate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> PlayerName {
        PlayerName::new(value.to_string()).unwrap()
    }

    fn code(value: &str) -> JoinCode {
        JoinCode::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_new_game_contains_host() {
        // テスト項目: 新しいゲームにはホストが最初のプレイヤーとして含まれる
        // given (前提条件):
        let join_code = code("AB12");

        // when (操作):
        let game = Game::new(join_code.clone(), name("alice"), "room".into(), Timestamp::new(1));

        // then (期待する結果):
        assert_eq!(game.status, STATUS_WAITING);
        assert_eq!(game.players.len(), 1);
        assert_eq!(game.players[0].name, name("alice"));
        assert_eq!(game.players[0].game, join_code);
        assert_eq!(game.players[0].score, 0);
    }

    #[test]
    fn test_is_member_requires_matching_join_code() {
        // テスト項目: プレイヤー名と join code の両方が一致した場合のみメンバーとみなす
        // given (前提条件):
        let mut game = Game::new(code("AB12"), name("alice"), "room".into(), Timestamp::new(1));
        game.players.push(Player::new(name("mallory"), code("ZZ99")));

        // when (操作):
        let alice = game.is_member(&name("alice"));
        let mallory = game.is_member(&name("mallory"));
        let bob = game.is_member(&name("bob"));

        // then (期待する結果):
        assert!(alice);
        assert!(!mallory);
        assert!(!bob);
    }

    #[test]
    fn test_submitted_photos_skips_empty_photos() {
        // テスト項目: 空でない写真を持つプレイヤーだけが集計される
        // given (前提条件):
        let mut game = Game::new(code("AB12"), name("alice"), "room".into(), Timestamp::new(1));
        game.players.push(Player::new(name("bob"), code("AB12")));
        game.players.push(Player::new(name("carol"), code("AB12")));
        game.players[0].photo = Some("https://img/alice.png".into());
        game.players[1].photo = Some(String::new());

        // when (操作):
        let photos = game.submitted_photos();

        // then (期待する結果):
        assert_eq!(
            photos,
            vec![(name("alice"), "https://img/alice.png".to_string())]
        );
        assert!(!game.all_photos_submitted());
    }

    #[test]
    fn test_player_field_apply_overwrites() {
        // テスト項目: フィールドの書き込みは既存の値を上書きする
        // given (前提条件):
        let mut player = Player::new(name("bob"), code("AB12"));
        PlayerField::Photo("first".into()).apply(&mut player);

        // when (操作):
        PlayerField::Photo("second".into()).apply(&mut player);
        PlayerField::Vote("alice".into()).apply(&mut player);

        // then (期待する結果):
        assert_eq!(player.photo.as_deref(), Some("second"));
        assert_eq!(player.vote.as_deref(), Some("alice"));
    }

    #[test]
    fn test_game_serializes_in_camel_case() {
        // テスト項目: Game が camelCase の JSON にシリアライズされる
        // given (前提条件):
        let game = Game::new(code("AB12"), name("alice"), "room".into(), Timestamp::new(5));

        // when (操作):
        let json = serde_json::to_value(&game).unwrap();

        // then (期待する結果):
        assert_eq!(json["joinCode"], "AB12");
        assert_eq!(json["hostName"], "alice");
        assert_eq!(json["roomName"], "room");
        assert_eq!(json["createdAt"], 5);
        assert!(json["players"][0].get("photo").is_none());
    }
}
