use super::cards::Cards;
use super::species::Species;
use crate::Error;
use crate::Probability;
use rand::Rng;

/// The exact distribution over what a refill can bring.
///
/// Enumerates every distinct multiset of `need` cards drawable from a deck
/// and its multivariate hypergeometric probability
///
///   P(k) = Π C(deck_i, k_i) / C(|deck|, need)
///
/// i.e. sampling without replacement, order ignored. Entries with zero
/// probability never appear, so the support is exactly the legal draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Draws {
    empty: Cards,
    support: Vec<(Cards, Probability)>,
}

impl Draws {
    pub fn len(&self) -> usize {
        self.support.len()
    }
    pub fn is_empty(&self) -> bool {
        self.support.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(Cards, Probability)> {
        self.support.iter()
    }
    /// total mass, 1 up to rounding
    pub fn mass(&self) -> Probability {
        self.support.iter().map(|(_, p)| p).sum()
    }
    /// sample one draw by inverting the cumulative distribution.
    /// an empty support yields the empty multiset.
    pub fn sample(&self, rng: &mut impl Rng) -> Cards {
        let ref mut x = rng.random::<Probability>() * self.mass();
        self.support
            .iter()
            .find(|(_, p)| {
                *x -= p;
                *x < 0.
            })
            .or(self.support.last())
            .map(|(cards, _)| *cards)
            .unwrap_or(self.empty)
    }

    /// depth-first over species: choose how many of each to take,
    /// the last species takes whatever is left
    fn enumerate(deck: &Cards, species: usize, left: usize, partial: Cards, out: &mut Vec<Cards>) {
        if species == deck.n() {
            if left == 0 {
                out.push(partial);
            }
            return;
        }
        let s = Species::from(species);
        let most = left.min(deck.count(s) as usize);
        for k in 0..=most {
            let take = partial + Cards::one(deck.n(), s, k as u8);
            Self::enumerate(deck, species + 1, left - k, take, out);
        }
    }
}

/// C(n, k) as a float, multiplicative form
fn choose(n: usize, k: usize) -> Probability {
    if k > n {
        0.
    } else {
        (0..k.min(n - k))
            .map(|i| (n - i) as Probability / (i + 1) as Probability)
            .product()
    }
}

/// distribution of drawing `need` cards from `deck`. requests beyond
/// the deck are clamped to what is there.
impl From<(Cards, usize)> for Draws {
    fn from((deck, need): (Cards, usize)) -> Self {
        let empty = Cards::empty(deck.n());
        let total = deck.size();
        if need > total {
            log::warn!(
                "{}",
                Error::MalformedDrawRequest {
                    requested: need,
                    available: total,
                }
            );
        }
        let need = need.min(total);
        if need == 0 {
            return Self {
                empty,
                support: vec![(empty, 1.)],
            };
        }
        let ref mut draws = Vec::new();
        Self::enumerate(&deck, 0, need, empty, draws);
        let denom = choose(total, need);
        let support = draws
            .drain(..)
            .map(|draw| {
                let p = draw
                    .species()
                    .map(|s| choose(deck.count(s) as usize, draw.count(s) as usize))
                    .product::<Probability>();
                (draw, p / denom)
            })
            .filter(|(_, p)| *p > 0.)
            .collect();
        Self { empty, support }
    }
}

impl IntoIterator for Draws {
    type Item = (Cards, Probability);
    type IntoIter = std::vec::IntoIter<Self::Item>;
    fn into_iter(self) -> Self::IntoIter {
        self.support.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn cards(s: &str) -> Cards {
        Cards::try_from(s).unwrap()
    }

    #[test]
    fn binomials() {
        assert_eq!(choose(5, 0), 1.);
        assert_eq!(choose(5, 5), 1.);
        assert_eq!(choose(5, 2), 10.);
        assert_eq!(choose(2, 3), 0.);
        assert!((choose(64, 5) - 7624512.).abs() < 1e-3);
    }

    #[test]
    fn nothing_needed() {
        let draws = Draws::from((cards("3 3"), 0));
        assert_eq!(draws.len(), 1);
        assert_eq!(draws.iter().next(), Some(&(cards("0 0"), 1.)));
    }

    #[test]
    fn exact_probabilities() {
        // two cards from [3 3]: C(6,2) = 15
        let draws = Draws::from((cards("3 3"), 2)).into_iter().collect::<Vec<_>>();
        assert_eq!(draws.len(), 3);
        let p = |s: &str| {
            draws
                .iter()
                .find(|(c, _)| *c == cards(s))
                .map(|(_, p)| *p)
                .unwrap()
        };
        assert!((p("2 0") - 3. / 15.).abs() < 1e-12);
        assert!((p("1 1") - 9. / 15.).abs() < 1e-12);
        assert!((p("0 2") - 3. / 15.).abs() < 1e-12);
    }

    #[test]
    fn respects_availability() {
        let draws = Draws::from((cards("1 0 4"), 3));
        assert!(draws.iter().all(|(d, _)| cards("1 0 4").contains(d)));
        assert!(draws.iter().all(|(d, _)| d.size() == 3));
        assert_eq!(draws.len(), 2); // [0 0 3] and [1 0 2]
    }

    #[test]
    fn clamps_oversized_requests() {
        let draws = Draws::from((cards("1 1 0"), 5));
        assert_eq!(draws.len(), 1);
        assert_eq!(draws.iter().next().map(|(d, _)| *d), Some(cards("1 1 0")));
        assert!((draws.mass() - 1.).abs() < 1e-9);
    }

    #[test]
    fn sums_to_one() {
        for _ in 0..64 {
            let deck = Cards::random();
            let need = rand::random_range(0..=6);
            let draws = Draws::from((deck, need));
            assert!(!draws.is_empty());
            assert!((draws.mass() - 1.).abs() < 1e-9, "{} from {}", need, deck);
        }
    }

    #[test]
    fn samples_from_support() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let deck = cards("2 0 3 1");
        let draws = Draws::from((deck, 3));
        for _ in 0..256 {
            let draw = draws.sample(rng);
            assert_eq!(draw.size(), 3);
            assert!(deck.contains(&draw));
            assert!(draws.iter().any(|(d, _)| *d == draw));
        }
    }

    #[test]
    fn sample_frequencies() {
        let ref mut rng = SmallRng::seed_from_u64(1);
        let draws = Draws::from((cards("3 3"), 2));
        let n = 30000;
        let mixed = (0..n)
            .map(|_| draws.sample(rng))
            .filter(|d| *d == cards("1 1"))
            .count();
        let freq = mixed as f64 / n as f64;
        assert!((freq - 0.6).abs() < 0.02, "{}", freq);
    }
}
