use crate::Utility;
use crate::cards::Cards;
use crate::game::Player;
use crate::game::View;
use rand::Rng;
use rand::seq::SliceRandom;

/// What a node stands for in its owner's tree.
///
/// - `Before`: a decision point of the owner. Holds the actions not yet
///   expanded from here, shuffled once when the node is created.
/// - `After`: the owner has just committed to `action`. Holds the number
///   of simulations through here that the owner went on to win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Before { untried: Vec<Cards> },
    After { action: Cards, wins: u32 },
}

/// A vertex in one player's search tree.
///
/// Nodes are keyed by the owner's `View`: two histories the owner cannot
/// tell apart share a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    owner: Player,
    view: View,
    kind: Kind,
    visits: u32,
}

impl Node {
    /// a decision point with every legal play queued in random order
    pub fn before(owner: Player, view: View, rng: &mut impl Rng) -> Self {
        let mut untried = view.plays();
        untried.shuffle(rng);
        Self {
            owner,
            view,
            kind: Kind::Before { untried },
            visits: 0,
        }
    }
    /// the result of the owner committing to `action`
    pub fn after(owner: Player, view: View, action: Cards) -> Self {
        Self {
            owner,
            view,
            kind: Kind::After { action, wins: 0 },
            visits: 0,
        }
    }

    pub fn owner(&self) -> Player {
        self.owner
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn kind(&self) -> &Kind {
        &self.kind
    }
    pub fn visits(&self) -> u32 {
        self.visits
    }
    pub fn wins(&self) -> u32 {
        match self.kind {
            Kind::After { wins, .. } => wins,
            Kind::Before { .. } => 0,
        }
    }
    pub fn action(&self) -> Option<Cards> {
        match self.kind {
            Kind::After { action, .. } => Some(action),
            Kind::Before { .. } => None,
        }
    }
    pub fn is_after(&self) -> bool {
        matches!(self.kind, Kind::After { .. })
    }

    /// take the next unexpanded action, if any remain
    pub fn untried(&mut self) -> Option<Cards> {
        match self.kind {
            Kind::Before { ref mut untried } => untried.pop(),
            Kind::After { .. } => None,
        }
    }

    /// upper confidence bound w/n + c·√(2 ln N / n).
    /// unvisited nodes are infinitely attractive.
    pub fn ucb(&self, parent: u32, exploration: Utility) -> Utility {
        if self.visits == 0 {
            return Utility::INFINITY;
        }
        let n = self.visits as Utility;
        let w = self.wins() as Utility;
        let ln = (parent.max(1) as Utility).ln();
        w / n + exploration * (2. * ln / n).sqrt()
    }

    /// record one finished simulation through this node
    pub fn visit(&mut self, winner: Player) {
        self.visits += 1;
        if let Kind::After { ref mut wins, .. } = self.kind {
            if self.owner == winner {
                *wins += 1;
            }
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            Kind::Before { untried } => write!(
                f,
                "{} n={} untried={} {}",
                self.owner,
                self.visits,
                untried.len(),
                self.view
            ),
            Kind::After { action, wins } => write!(
                f,
                "{} n={} w={} after {} {}",
                self.owner, self.visits, wins, action, self.view
            ),
        }
    }
}
