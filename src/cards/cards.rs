use super::species::Species;
use crate::Arbitrary;
use crate::CHASE_THRESHOLD;
use crate::COPIES;
use crate::Count;
use crate::MAX_SPECIES;

/// Cards is a multiset of animals: one count per species.
///
/// Every zone of the game (deck, field, each hand, an observer's jungle)
/// and every event payload is one of these. Storage is a fixed array so
/// the whole thing is Copy and hashes in one pass; slots at or beyond
/// the active species count are always zero, which makes the derived
/// equality exactly multiset equality.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Cards {
    counts: [Count; MAX_SPECIES],
    n: u8,
}

impl Cards {
    pub fn empty(n: usize) -> Self {
        assert!(n <= MAX_SPECIES, "{} species exceeds capacity", n);
        Self {
            counts: [0; MAX_SPECIES],
            n: n as u8,
        }
    }
    /// a fresh deck holding `copies` of every species
    pub fn full(n: usize, copies: Count) -> Self {
        let mut cards = Self::empty(n);
        cards.counts[..n].fill(copies);
        cards
    }
    /// `count` copies of a single species
    pub fn one(n: usize, species: Species, count: Count) -> Self {
        let mut cards = Self::empty(n);
        cards.counts[usize::from(species)] = count;
        cards
    }

    /// number of species this multiset ranges over
    pub fn n(&self) -> usize {
        self.n as usize
    }
    /// total number of cards
    pub fn size(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
    pub fn count(&self, species: Species) -> Count {
        self.counts[usize::from(species)]
    }
    /// every species in range, present or not
    pub fn species(&self) -> impl DoubleEndedIterator<Item = Species> {
        Species::all(self.n())
    }
    /// (species, count) for every species present
    pub fn iter(&self) -> impl Iterator<Item = (Species, Count)> + '_ {
        self.species()
            .map(|s| (s, self.count(s)))
            .filter(|&(_, c)| c > 0)
    }

    /// true if every count here is at least the other's
    pub fn contains(&self, other: &Self) -> bool {
        self.n == other.n && self.counts.iter().zip(other.counts.iter()).all(|(a, b)| a >= b)
    }
    /// elementwise difference, None if any entry would go negative
    pub fn sub(&self, other: &Self) -> Option<Self> {
        if self.contains(other) {
            let mut cards = *self;
            cards
                .counts
                .iter_mut()
                .zip(other.counts.iter())
                .for_each(|(a, b)| *a -= b);
            Some(cards)
        } else {
            None
        }
    }
    /// the species and count of a single-species multiple,
    /// None if zero or several species are present
    pub fn single(&self) -> Option<(Species, Count)> {
        let mut present = self.iter();
        match (present.next(), present.next()) {
            (Some(one), None) => Some(one),
            _ => None,
        }
    }

    /// every single-species multiple held here: one per
    /// (species, count) with 1 <= count <= held, species then count
    pub fn plays(&self) -> Vec<Self> {
        self.iter()
            .flat_map(|(s, held)| (1..=held).map(move |c| Self::one(self.n(), s, c)))
            .collect()
    }

    /// resolve a chase on the field after `played` was laid down.
    ///
    /// once a species reaches the threshold it scares away the nearest
    /// smaller species present; the smallest species scares the largest.
    /// the scared cards leave the field for good. only one species is
    /// cleared per call. returns what was removed.
    pub fn chase(&mut self, played: Species) -> Option<(Species, Count)> {
        if self.count(played) < CHASE_THRESHOLD {
            return None;
        }
        let fear = match played {
            Species::MIN => Some(Species::largest(self.n())).filter(|&s| s != played),
            _ => self
                .species()
                .rev()
                .filter(|&s| s < played)
                .find(|&s| self.count(s) > 0),
        };
        let fear = fear?;
        match std::mem::take(&mut self.counts[usize::from(fear)]) {
            0 => None,
            n => Some((fear, n)),
        }
    }
}

impl std::ops::Add for Cards {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        assert!(self.n == rhs.n, "mismatched species counts");
        let mut cards = self;
        cards
            .counts
            .iter_mut()
            .zip(rhs.counts.iter())
            .for_each(|(a, b)| *a += b);
        cards
    }
}
impl std::ops::AddAssign for Cards {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Cards {
    /// panics on an empty iterator: the species count is unknown
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.reduce(|a, b| a + b).expect("non empty sum of cards")
    }
}

/// Vec<Count> isomorphism, truncated to the active species
impl From<Cards> for Vec<Count> {
    fn from(cards: Cards) -> Self {
        cards.counts[..cards.n()].to_vec()
    }
}
impl TryFrom<&[Count]> for Cards {
    type Error = anyhow::Error;
    fn try_from(counts: &[Count]) -> Result<Self, Self::Error> {
        if counts.is_empty() || counts.len() > MAX_SPECIES {
            return Err(anyhow::anyhow!(
                "expected 1 to {} species, got {}",
                MAX_SPECIES,
                counts.len()
            ));
        }
        let mut cards = Self::empty(counts.len());
        cards.counts[..counts.len()].copy_from_slice(counts);
        Ok(cards)
    }
}

/// str isomorphism: whitespace separated counts, smallest species first.
/// "0 2 0 1" is two of species 1 and one of species 3.
impl TryFrom<&str> for Cards {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let counts = s
            .split_whitespace()
            .map(|c| c.parse::<Count>())
            .collect::<Result<Vec<Count>, _>>()
            .map_err(|e| anyhow::anyhow!("invalid card count in {:?}: {}", s, e))?;
        Self::try_from(counts.as_slice())
    }
}

impl Arbitrary for Cards {
    fn random() -> Self {
        let n = rand::random_range(2..=MAX_SPECIES);
        let mut cards = Self::empty(n);
        cards.counts[..n]
            .iter_mut()
            .for_each(|c| *c = rand::random_range(0..=COPIES));
        cards
    }
}

impl std::fmt::Display for Cards {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.counts[..self.n()].iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]")
    }
}
