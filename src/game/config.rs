use super::game::Game;
use crate::COPIES;
use crate::Count;
use crate::Error;
use crate::HAND_SIZE;
use crate::MAX_SPECIES;
use crate::PLAYERS;
use crate::SPECIES;
use crate::cards::Cards;

/// Setup of a fresh game: how many seats, animals, copies, and
/// how many cards a hand refills to. Defaults are the full game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
    players: usize,
    species: usize,
    copies: Count,
    hand: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players: PLAYERS,
            species: SPECIES,
            copies: COPIES,
            hand: HAND_SIZE,
        }
    }
}

impl Config {
    pub fn players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }
    pub fn species(mut self, species: usize) -> Self {
        self.species = species;
        self
    }
    pub fn copies(mut self, copies: Count) -> Self {
        self.copies = copies;
        self
    }
    pub fn hand(mut self, hand: usize) -> Self {
        self.hand = hand;
        self
    }

    pub fn validate(self) -> anyhow::Result<Self> {
        if self.players == 0 {
            return Err(Error::InvalidConfig("at least one player".into()).into());
        }
        if !(2..=MAX_SPECIES).contains(&self.species) {
            return Err(Error::InvalidConfig(format!(
                "species must be within 2..={}, got {}",
                MAX_SPECIES, self.species
            ))
            .into());
        }
        if self.copies == 0 {
            return Err(Error::InvalidConfig("at least one copy per species".into()).into());
        }
        if self.hand == 0 {
            return Err(Error::InvalidConfig("hand size must be positive".into()).into());
        }
        Ok(self)
    }

    /// the starting position: full deck, empty field and hands,
    /// zero scores, first seat to move
    pub fn game(self) -> anyhow::Result<Game> {
        let this = self.validate()?;
        Ok(Game::from((
            Cards::full(this.species, this.copies),
            this.players,
            this.hand,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_game() {
        let game = Config::default().game().unwrap();
        assert_eq!(game.n(), PLAYERS);
        assert_eq!(game.species(), SPECIES);
        assert_eq!(game.deck().size(), SPECIES * COPIES as usize);
        assert_eq!(game.hand_size(), HAND_SIZE);
        assert!(game.field().is_empty());
    }

    #[test]
    fn rejects_out_of_range() {
        for config in [
            Config::default().players(0),
            Config::default().species(1),
            Config::default().species(MAX_SPECIES + 1),
            Config::default().copies(0),
            Config::default().hand(0),
        ] {
            let err = config.game().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<Error>(),
                Some(Error::InvalidConfig(_))
            ));
        }
    }
}
