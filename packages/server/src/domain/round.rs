//! Round state machine
//!
//! ラウンドは独立したストレージを持たず、同じ `gameId` を持つ接続の集合から
//! 都度再構成されます。状態遷移:
//!
//! ```text
//! Waiting ──startGame──▶ Started ──sendWord──▶ WordDistributed ──correct guess──▶ Resolved
//!    ▲                                                                              │
//!    └─────────────────── startGame (reshuffle, overwrites roles/word) ◀────────────┘
//! ```

use super::{
    entity::{Connection, Role},
    error::RoundError,
    value_object::JoinCode,
};

/// Lifecycle phase of a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum RoundPhase {
    #[default]
    Waiting,
    Started,
    WordDistributed,
    Resolved,
}

/// Snapshot of a game's round, derived from its registered connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub game_id: JoinCode,
    pub phase: RoundPhase,
    pub members: Vec<Connection>,
}

impl Round {
    pub fn from_members(game_id: JoinCode, members: Vec<Connection>) -> Self {
        let phase = members
            .iter()
            .filter(|c| c.in_game)
            .map(|c| c.phase)
            .max()
            .unwrap_or_default();
        Self {
            game_id,
            phase,
            members,
        }
    }

    pub fn imposter(&self) -> Option<&Connection> {
        self.members.iter().find(|c| c.is_imposter())
    }

    pub fn crewmates(&self) -> impl Iterator<Item = &Connection> {
        self.members.iter().filter(|c| c.is_crewmate())
    }

    /// The secret word, as held by the imposter's connection
    pub fn word(&self) -> Option<&str> {
        self.imposter().and_then(|c| c.chosen_word.as_deref())
    }
}

/// Enter `Started`: mark every roster member in-game and make exactly one of
/// them the imposter. Any previous role or word is discarded.
pub fn assign_roles(
    roster: &mut [&mut Connection],
    imposter_index: usize,
) -> Result<(), RoundError> {
    if roster.is_empty() {
        return Err(RoundError::EmptyRoster);
    }
    let imposter_index = imposter_index % roster.len();

    for (index, connection) in roster.iter_mut().enumerate() {
        connection.in_game = true;
        connection.role = if index == imposter_index {
            Role::Imposter
        } else {
            Role::Crewmate
        };
        connection.chosen_word = None;
        connection.phase = RoundPhase::Started;
    }
    Ok(())
}

/// Enter `WordDistributed`: every roster member remembers the word.
///
/// Only crewmates are told the word over the wire; the imposter's copy is
/// what guesses are checked against.
pub fn distribute_word(roster: &mut [&mut Connection], word: &str) {
    for connection in roster.iter_mut() {
        connection.chosen_word = Some(word.to_string());
        connection.phase = RoundPhase::WordDistributed;
    }
}

/// Enter `Resolved` for every member of the round.
pub fn resolve(roster: &mut [&mut Connection]) {
    for connection in roster.iter_mut() {
        connection.phase = RoundPhase::Resolved;
    }
}

pub fn ensure_imposter(connection: &Connection) -> Result<(), RoundError> {
    if connection.is_imposter() {
        Ok(())
    } else {
        Err(RoundError::NotImposter)
    }
}

/// Compare a guess with the imposter's stored word, ignoring case.
pub fn check_guess(connection: &Connection, guess: &str) -> Result<bool, RoundError> {
    ensure_imposter(connection)?;
    if connection.phase == RoundPhase::Resolved {
        return Err(RoundError::AlreadyResolved);
    }
    let word = connection
        .chosen_word
        .as_deref()
        .ok_or(RoundError::NoWordChosen)?;
    Ok(guess.to_lowercase() == word.to_lowercase())
}
