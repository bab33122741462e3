use super::mode::Mode;
use super::node::Node;
use crate::Error;
use crate::Utility;
use crate::cards::Cards;
use crate::game::Event;
use crate::game::Player;
use crate::game::View;
use petgraph::Direction::Incoming;
use petgraph::Direction::Outgoing;
use petgraph::graph::DiGraph;
use petgraph::graph::NodeIndex;
use rand::Rng;
use rand::seq::IndexedRandom;

/// One player's information-set tree.
///
/// The tree is a petgraph arena: nodes hold the owner's view and
/// statistics, edges hold the event that led there. It only ever sees
/// events through its owner's eyes, so nothing hidden from the owner can
/// leak into its shape. The cursor tracks where the current simulation is;
/// statistics accumulate across simulations.
#[derive(Debug)]
pub struct Tree {
    owner: Player,
    graph: DiGraph<Node, Event>,
    cursor: NodeIndex,
    mode: Mode,
    exploration: Utility,
}

/// seed a tree at the owner's current view
impl<R: Rng> From<(Player, View, Utility, &mut R)> for Tree {
    fn from((owner, view, exploration, rng): (Player, View, Utility, &mut R)) -> Self {
        let mut graph = DiGraph::default();
        let root = graph.add_node(Node::before(owner, view, rng));
        Self {
            owner,
            graph,
            cursor: root,
            mode: Mode::Select,
            exploration,
        }
    }
}

impl Tree {
    pub fn owner(&self) -> Player {
        self.owner
    }
    pub fn mode(&self) -> &Mode {
        &self.mode
    }
    pub fn size(&self) -> usize {
        self.graph.node_count()
    }
    pub fn root(&self) -> &Node {
        &self.graph[NodeIndex::new(0)]
    }
    pub fn cursor(&self) -> &Node {
        &self.graph[self.cursor]
    }
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// the owner's next action.
    ///
    /// in rollout a uniformly random legal play. in selection the next
    /// untried action if any remain, else the child with the best upper
    /// confidence bound, ties going to the child created first.
    pub fn select(&mut self, rng: &mut impl Rng) -> anyhow::Result<Event> {
        let owner = self.owner;
        let empty = || Error::EmptyActionSet(owner);
        match self.mode {
            Mode::Rollout(ref view) => view
                .plays()
                .choose(rng)
                .map(|cards| Event::Action(owner, *cards))
                .ok_or_else(|| empty().into()),
            Mode::Select => {
                if let Some(action) = self.graph[self.cursor].untried() {
                    return Ok(Event::Action(owner, action));
                }
                self.best()
                    .map(|action| Event::Action(owner, action))
                    .ok_or_else(|| empty().into())
            }
        }
    }

    /// advance the cursor along `event` as the owner observes it
    pub fn witness(&mut self, event: &Event, rng: &mut impl Rng) -> anyhow::Result<()> {
        if let Mode::Rollout(ref view) = self.mode {
            self.mode = Mode::Rollout(view.witness(self.owner, event)?);
            return Ok(());
        }
        let here = *self.graph[self.cursor].view();
        let next = here.witness(self.owner, event)?;
        if next == here {
            return Ok(());
        }
        self.cursor = match self.find(&next) {
            Some(child) => child,
            None => self.grow(next, event, rng),
        };
        if self.graph[self.cursor].is_after() {
            self.mode = Mode::Rollout(next);
        }
        Ok(())
    }

    /// credit the finished simulation to the cursor and every ancestor
    pub fn backpropagate(&mut self, winner: Player) {
        let mut index = Some(self.cursor);
        while let Some(i) = index {
            self.graph[i].visit(winner);
            index = self.parent(i);
        }
    }

    /// back to the root for the next simulation. statistics stay.
    pub fn reset(&mut self) {
        self.cursor = NodeIndex::new(0);
        self.mode = Mode::Select;
    }

    /// visits per action of the owner's first decision, in creation order.
    ///
    /// the first decision hangs either off the root, or off one of the
    /// root's children when the owner draws first. equal actions under
    /// different draws are summed.
    pub fn choices(&self) -> Vec<(Cards, u32)> {
        let root = NodeIndex::new(0);
        let draws = self
            .children(root)
            .into_iter()
            .filter(|&c| matches!(self.edge(c), Some(Event::Draw(who, _)) if *who == self.owner));
        let mut decisions = std::iter::once(root)
            .chain(draws)
            .flat_map(|d| self.children(d))
            .filter_map(|c| self.graph[c].action().map(|a| (c, a)))
            .collect::<Vec<_>>();
        decisions.sort_by_key(|(c, _)| *c);
        decisions
            .into_iter()
            .fold(Vec::<(Cards, u32)>::new(), |mut tally, (c, action)| {
                let visits = self.graph[c].visits();
                match tally.iter_mut().find(|(a, _)| *a == action) {
                    Some((_, n)) => *n += visits,
                    None => tally.push((action, visits)),
                }
                tally
            })
    }

    /// argmax UCB over the cursor's post-action children
    fn best(&self) -> Option<Cards> {
        let parent = self.graph[self.cursor].visits();
        self.children(self.cursor)
            .into_iter()
            .map(|c| &self.graph[c])
            .filter_map(|n| n.action().map(|a| (a, n.ucb(parent, self.exploration))))
            .fold(None, |best: Option<(Cards, Utility)>, (a, u)| match best {
                Some((_, top)) if top >= u => best,
                _ => Some((a, u)),
            })
            .map(|(a, _)| a)
    }

    /// the cursor's child equivalent to `view`
    fn find(&self, view: &View) -> Option<NodeIndex> {
        self.children(self.cursor)
            .into_iter()
            .find(|&c| self.graph[c].view() == view)
    }

    /// attach a new child under the cursor. only the owner's own action
    /// leads to a post-action node.
    fn grow(&mut self, view: View, event: &Event, rng: &mut impl Rng) -> NodeIndex {
        let node = match event {
            Event::Action(who, cards) if *who == self.owner => Node::after(self.owner, view, *cards),
            _ => Node::before(self.owner, view, rng),
        };
        let child = self.graph.add_node(node);
        self.graph.add_edge(self.cursor, child, *event);
        log::trace!("{} grows node {} after {}", self.owner, child.index(), event);
        child
    }

    /// children in creation order
    fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = self
            .graph
            .neighbors_directed(index, Outgoing)
            .collect::<Vec<_>>();
        children.sort();
        children
    }
    fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(index, Incoming).next()
    }
    fn edge(&self, child: NodeIndex) -> Option<&Event> {
        self.graph
            .edges_directed(child, Incoming)
            .next()
            .map(|e| e.weight())
    }

    /// display the tree in a human-readable format.
    /// gets big fast, so it only goes to trace logs.
    fn show(&self, f: &mut std::fmt::Formatter, x: NodeIndex, prefix: &str) -> std::fmt::Result {
        if x == NodeIndex::new(0) {
            writeln!(f, "ROOT   {}", self.graph[x])?;
        }
        let children = self.children(x);
        let n = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let last = i == n - 1;
            let gaps = if last { "    " } else { "│   " };
            let stem = if last { "└" } else { "├" };
            match self.edge(child) {
                Some(edge) => writeln!(f, "{}{}──{} → {}", prefix, stem, edge, self.graph[child])?,
                None => writeln!(f, "{}{}──{}", prefix, stem, self.graph[child])?,
            }
            self.show(f, child, &format!("{}{}", prefix, gaps))?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.show(f, NodeIndex::new(0), "")
    }
}
