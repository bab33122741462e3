use crate::MAX_SPECIES;

/// One animal category. Species are ordered by strength:
/// index 0 is the smallest animal, the last index the largest.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Species(u8);

impl Species {
    pub const MIN: Self = Self(0);

    /// the largest species in a game with n species
    pub fn largest(n: usize) -> Self {
        Self::from(n - 1)
    }
    /// all species in a game with n species, smallest first
    pub fn all(n: usize) -> impl DoubleEndedIterator<Item = Self> {
        (0..n).map(Self::from)
    }
}

impl From<usize> for Species {
    fn from(n: usize) -> Self {
        assert!(n < MAX_SPECIES, "species {} out of range", n);
        Self(n as u8)
    }
}
impl From<Species> for usize {
    fn from(s: Species) -> Self {
        s.0 as usize
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
