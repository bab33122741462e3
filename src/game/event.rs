use super::player::Player;
use crate::cards::Cards;

/// Everything that can happen in a game is one of two events.
///
/// - `Draw`: cards move from the deck into a player's hand
/// - `Action`: a player lays cards of one species on the field
///
/// The authoritative game and every search tree consume the same
/// stream of these, in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Event {
    Draw(Player, Cards),
    Action(Player, Cards),
}

impl Event {
    pub fn who(&self) -> Player {
        match self {
            Self::Draw(who, _) | Self::Action(who, _) => *who,
        }
    }
    pub fn cards(&self) -> Cards {
        match self {
            Self::Draw(_, cards) | Self::Action(_, cards) => *cards,
        }
    }
    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw(..))
    }
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action(..))
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Draw(who, cards) => write!(f, "{} draws {}", who, cards),
            Self::Action(who, cards) => write!(f, "{} plays {}", who, cards),
        }
    }
}
