use super::tree::Tree;
use crate::Utility;
use crate::game::Event;
use crate::game::Game;
use crate::game::Player;
use crate::game::View;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Drives one authoritative game and one tree per seat through the
/// same stream of events.
///
/// Each event reaches the game first, then every tree in seat order.
/// Trees only learn what their owner observes; the game alone holds the
/// truth and is restored from the root snapshot between simulations.
#[derive(Debug)]
pub struct Coordinator {
    root: Game,
    game: Game,
    trees: Vec<Tree>,
    rng: SmallRng,
}

impl Coordinator {
    pub fn new(root: Game, exploration: Utility, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let trees = Player::all(root.n())
            .map(|p| Tree::from((p, View::from((&root, p)), exploration, &mut rng)))
            .collect();
        Self {
            game: root.clone(),
            root,
            trees,
            rng,
        }
    }

    pub fn root(&self) -> &Game {
        &self.root
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn tree(&self, player: Player) -> &Tree {
        &self.trees[player.index()]
    }
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// restore the snapshot and rewind every tree
    pub fn reset(&mut self) {
        self.game.clone_from(&self.root);
        self.trees.iter_mut().for_each(Tree::reset);
    }

    /// play one game from the snapshot to the end and credit the winner
    /// in every tree
    pub fn simulate(&mut self) -> anyhow::Result<Player> {
        self.reset();
        while !self.game.is_final() {
            let turn = self.game.turn();
            let draw = self.game.random_draw(turn, &mut self.rng);
            self.apply(draw)?;
            let action = self.trees[turn.index()].select(&mut self.rng)?;
            self.apply(action)?;
            self.game.next_turn();
        }
        let winner = self.game.leading();
        self.trees
            .iter_mut()
            .for_each(|tree| tree.backpropagate(winner));
        Ok(winner)
    }

    fn apply(&mut self, event: Event) -> anyhow::Result<()> {
        self.game.act(event)?;
        for tree in self.trees.iter_mut() {
            tree.witness(&event, &mut self.rng)?;
        }
        Ok(())
    }
}
