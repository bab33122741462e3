use super::event::Event;
use super::game::Game;
use super::player::Player;
use crate::Error;
use crate::cards::Cards;

/// What one player can see of a game.
///
/// The observer knows its own hand exactly and the field (which is public).
/// Everything else, the deck and every opponent's hand, collapses into one
/// indistinguishable pool: the jungle. Two views are equivalent iff all
/// three multisets match, which is what search trees key their nodes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct View {
    hand: Cards,
    field: Cards,
    jungle: Cards,
}

impl View {
    pub fn hand(&self) -> &Cards {
        &self.hand
    }
    pub fn field(&self) -> &Cards {
        &self.field
    }
    pub fn jungle(&self) -> &Cards {
        &self.jungle
    }
    /// legal plays from the observer's own hand
    pub fn plays(&self) -> Vec<Cards> {
        self.hand.plays()
    }

    /// advance this view by one event, as seen by `owner`.
    ///
    /// only what the owner can observe is used: another player's draw
    /// moves cards within the jungle and so changes nothing, and another
    /// player's action takes its cards out of the jungle.
    pub fn witness(&self, owner: Player, event: &Event) -> anyhow::Result<Self> {
        let cards = event.cards();
        let mut next = *self;
        match event {
            Event::Draw(who, _) if *who == owner => {
                next.jungle = self.jungle.sub(&cards).ok_or_else(|| shortage(event))?;
                next.hand = self.hand + cards;
            }
            Event::Draw(..) => {}
            Event::Action(who, _) => {
                let (species, _) = cards.single().ok_or_else(|| mixed(event))?;
                match *who == owner {
                    true => next.hand = self.hand.sub(&cards).ok_or_else(|| shortage(event))?,
                    false => next.jungle = self.jungle.sub(&cards).ok_or_else(|| shortage(event))?,
                }
                next.field = self.field + cards;
                next.field.chase(species);
            }
        }
        Ok(next)
    }
}

fn shortage(event: &Event) -> Error {
    Error::InvalidEvent(format!("{} exceeds what is held", event))
}
fn mixed(event: &Event) -> Error {
    Error::InvalidEvent(format!("{} is not a single species", event))
}

/// project the full game onto one player's observation
impl From<(&Game, Player)> for View {
    fn from((game, observer): (&Game, Player)) -> Self {
        let jungle = Player::all(game.n())
            .filter(|p| *p != observer)
            .map(|p| *game.hand(p))
            .fold(*game.deck(), |jungle, hand| jungle + hand);
        Self {
            hand: *game.hand(observer),
            field: *game.field(),
            jungle,
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "hand {} field {} jungle {}",
            self.hand, self.field, self.jungle
        )
    }
}
