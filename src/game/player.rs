/// A seat at the table, indexed from zero in turn order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Player(usize);

impl Player {
    pub fn index(&self) -> usize {
        self.0
    }
    /// the seat after this one in a game of n players
    pub fn next(&self, n: usize) -> Self {
        Self((self.0 + 1) % n)
    }
    /// every seat in a game of n players, in turn order
    pub fn all(n: usize) -> impl Iterator<Item = Self> {
        (0..n).map(Self)
    }
}

impl From<usize> for Player {
    fn from(seat: usize) -> Self {
        Self(seat)
    }
}
impl From<Player> for usize {
    fn from(player: Player) -> Self {
        player.0
    }
}

/// 1-indexed label, e.g. "P1", "P2"
impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation() {
        let p = Player::from(0);
        assert_eq!(p.next(3), Player::from(1));
        assert_eq!(p.next(3).next(3).next(3), p);
        assert_eq!(Player::all(3).count(), 3);
    }
}
