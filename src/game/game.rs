use super::config::Config;
use super::event::Event;
use super::player::Player;
use crate::Error;
use crate::Points;
use crate::cards::Cards;
use crate::cards::Draws;
use rand::Rng;

/// The complete, fully observable state of one Kariba game.
///
/// Kariba is played with a deck of animal cards. On their turn a player
/// lays any number of cards of a single species on the field. Once three
/// or more of that species lie there, they chase away the nearest smaller
/// animal on the field (the smallest animal chases the largest), and the
/// player scores one point per chased card. Hands are refilled from the
/// deck. The game ends once the deck is exhausted and some hand is empty.
///
/// # Fields
///
/// - `deck`: undrawn cards
/// - `field`: played cards not yet chased away
/// - `hands`: per-seat hands (private information)
/// - `score`: per-seat points
/// - `turn`: seat to move
/// - `hand_size`: cards a hand refills to
///
/// Cards are conserved: deck + field + Σhands only shrinks by what has
/// been chased, and Σscore is exactly that amount.
#[derive(Debug, Clone, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Game {
    deck: Cards,
    field: Cards,
    hands: Vec<Cards>,
    score: Vec<Points>,
    turn: Player,
    hand_size: usize,
}

/// fresh game from (deck, players, hand size)
impl From<(Cards, usize, usize)> for Game {
    fn from((deck, players, hand_size): (Cards, usize, usize)) -> Self {
        Self {
            deck,
            field: Cards::empty(deck.n()),
            hands: vec![Cards::empty(deck.n()); players],
            score: vec![0; players],
            turn: Player::default(),
            hand_size,
        }
    }
}

/// Setup: overwrite zones to reconstruct a position.
impl Game {
    pub fn with_deck(mut self, deck: Cards) -> Self {
        self.deck = deck;
        self
    }
    pub fn with_field(mut self, field: Cards) -> Self {
        self.field = field;
        self
    }
    pub fn with_hand(mut self, player: Player, hand: Cards) -> Self {
        self.hands[player.index()] = hand;
        self
    }
    pub fn with_score(mut self, player: Player, points: Points) -> Self {
        self.score[player.index()] = points;
        self
    }
    pub fn with_turn(mut self, player: Player) -> Self {
        self.turn = player;
        self
    }
    /// opening deal: every seat refills in turn order, starting
    /// with the seat to move
    pub fn deal(mut self, rng: &mut impl Rng) -> anyhow::Result<Self> {
        let n = self.n();
        let mut seat = self.turn;
        for _ in 0..n {
            self.act(self.random_draw(seat, rng))?;
            seat = seat.next(n);
        }
        Ok(self)
    }
}

/// Public state accessors.
impl Game {
    /// number of seats
    pub fn n(&self) -> usize {
        self.hands.len()
    }
    /// number of species in play
    pub fn species(&self) -> usize {
        self.deck.n()
    }
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }
    pub fn deck(&self) -> &Cards {
        &self.deck
    }
    pub fn field(&self) -> &Cards {
        &self.field
    }
    pub fn hand(&self, player: Player) -> &Cards {
        &self.hands[player.index()]
    }
    pub fn score(&self, player: Player) -> Points {
        self.score[player.index()]
    }
    pub fn scores(&self) -> &[Points] {
        &self.score
    }
    pub fn turn(&self) -> Player {
        self.turn
    }
    /// deck + field + every hand
    pub fn total(&self) -> Cards {
        self.hands.iter().fold(self.deck + self.field, |t, h| t + *h)
    }
    /// over once the deck is gone and somebody has run out of cards
    pub fn is_final(&self) -> bool {
        self.deck.is_empty() && self.hands.iter().any(Cards::is_empty)
    }
    /// highest score, ties going to the earliest seat
    pub fn leading(&self) -> Player {
        self.score
            .iter()
            .enumerate()
            .fold((0, 0), |(best, top), (i, &s)| match s > top {
                true => (i, s),
                false => (best, top),
            })
            .0
            .into()
    }
    /// lead over the strongest opponent (negative when behind)
    pub fn points_ahead(&self, player: Player) -> i64 {
        let mine = self.score(player) as i64;
        let best = Player::all(self.n())
            .filter(|p| *p != player)
            .map(|p| self.score(p) as i64)
            .max()
            .unwrap_or(0);
        mine - best
    }
}

/// Legal actions and draws.
impl Game {
    /// one action per (species, count) the player could lay down
    pub fn allowed(&self, player: Player) -> Vec<Event> {
        self.hand(player)
            .plays()
            .into_iter()
            .map(|cards| Event::Action(player, cards))
            .collect()
    }
    /// cards needed to refill the player's hand, limited by the deck
    pub fn need(&self, player: Player) -> usize {
        self.hand_size
            .saturating_sub(self.hand(player).size())
            .min(self.deck.size())
    }
    /// every refill the player could receive, with its probability
    pub fn draws(&self, player: Player) -> Draws {
        Draws::from((self.deck, self.need(player)))
    }
    /// sample a refill for the player
    pub fn random_draw(&self, player: Player, rng: &mut impl Rng) -> Event {
        Event::Draw(player, self.draws(player).sample(rng))
    }
}

/// Event application.
impl Game {
    /// Returns a new game state with the event applied.
    pub fn apply(&self, event: Event) -> anyhow::Result<Self> {
        let mut child = self.clone();
        child.act(event)?;
        Ok(child)
    }
    /// Applies an event in place. The state is untouched on error.
    pub fn act(&mut self, event: Event) -> anyhow::Result<()> {
        let who = event.who();
        let cards = event.cards();
        let invalid = |why: &str| Error::InvalidEvent(format!("{}: {}", event, why));
        if who.index() >= self.n() {
            return Err(invalid("no such seat").into());
        }
        if cards.n() != self.species() {
            return Err(invalid("wrong number of species").into());
        }
        match event {
            Event::Draw(..) => {
                self.deck = self
                    .deck
                    .sub(&cards)
                    .ok_or_else(|| invalid("deck does not hold these cards"))?;
                self.hands[who.index()] += cards;
            }
            Event::Action(..) => {
                let (played, _) = cards
                    .single()
                    .ok_or_else(|| invalid("an action is exactly one species"))?;
                self.hands[who.index()] = self
                    .hand(who)
                    .sub(&cards)
                    .ok_or_else(|| invalid("hand does not hold these cards"))?;
                self.field += cards;
                if let Some((fear, count)) = self.field.chase(played) {
                    log::trace!("{} chases away {} of {}", played, count, fear);
                    self.score[who.index()] += count as Points;
                }
            }
        }
        Ok(())
    }
    /// pass the turn to the next seat
    pub fn next_turn(&mut self) {
        self.turn = self.turn.next(self.n());
    }
}

/// Information hiding.
impl Game {
    /// the game as `player` may know it: every other hand is folded back
    /// into the deck. this is all a search for `player` is allowed to see.
    pub fn mask(&self, player: Player) -> Self {
        let mut masked = self.clone();
        for other in Player::all(self.n()).filter(|p| *p != player) {
            let hand = std::mem::replace(
                &mut masked.hands[other.index()],
                Cards::empty(self.species()),
            );
            masked.deck += hand;
        }
        masked
    }
}

/// `new_game(players, species, hand_size)` with a full deck of the
/// default number of copies per species
pub fn new_game(players: usize, species: usize, hand: usize) -> anyhow::Result<Game> {
    Config::default()
        .players(players)
        .species(species)
        .hand(hand)
        .game()
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "turn  {}", self.turn)?;
        writeln!(f, "deck  {}", self.deck)?;
        writeln!(f, "field {}", self.field)?;
        for p in Player::all(self.n()) {
            writeln!(f, "{:<5} {} {:>3}", p.to_string(), self.hand(p), self.score(p))?;
        }
        Ok(())
    }
}
