use super::coordinator::Coordinator;
use crate::EXPLORATION;
use crate::Error;
use crate::LOG_INTERVAL;
use crate::SIMULATIONS;
use crate::Utility;
use crate::cards::Cards;
use crate::game::Event;
use crate::game::Game;
use crate::game::Player;
use std::time::Duration;
use std::time::Instant;

/// Multiple-observer information-set MCTS.
///
/// Every seat gets its own tree built only from what that seat observes.
/// All trees are driven through the same simulated games, and the player
/// to move picks the first-decision action its tree visited most.
///
/// # Parameters
///
/// - `simulations`: number of full games to simulate
/// - `exploration`: UCB constant c
/// - `seed`: fixes the random stream; entropy if unset
/// - `deadline`: stop early once this much time has passed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Search {
    simulations: usize,
    exploration: Utility,
    seed: Option<u64>,
    deadline: Option<Duration>,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            simulations: SIMULATIONS,
            exploration: EXPLORATION,
            seed: None,
            deadline: crate::deadline(),
        }
    }
}

impl Search {
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }
    pub fn exploration(mut self, exploration: Utility) -> Self {
        self.exploration = exploration;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.simulations == 0 {
            return Err(Error::InvalidConfig("at least one simulation".into()).into());
        }
        if !self.exploration.is_finite() || self.exploration < 0. {
            return Err(Error::InvalidConfig(format!(
                "exploration must be finite and non-negative, got {}",
                self.exploration
            ))
            .into());
        }
        Ok(())
    }

    /// the chosen action for the player to move
    pub fn run(&self, root: &Game) -> anyhow::Result<Event> {
        self.solve(root).map(|summary| summary.event())
    }

    /// search from `root` and report what was found
    pub fn solve(&self, root: &Game) -> anyhow::Result<Summary> {
        self.validate()?;
        let player = root.turn();
        let allowed = root.allowed(player);
        if allowed.is_empty() {
            return Err(Error::EmptyActionSet(player).into());
        }
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut coordinator = Coordinator::new(root.mask(player), self.exploration, seed);
        log::info!(
            "{} searching {} simulations from {}",
            player,
            self.simulations,
            coordinator.tree(player).root().view()
        );
        let start = Instant::now();
        let mut check = start;
        let mut wins = vec![0usize; root.n()];
        let mut runs = 0;
        while runs < self.simulations {
            if self.deadline.is_some_and(|d| start.elapsed() >= d) {
                log::debug!("deadline reached after {} simulations", runs);
                break;
            }
            let winner = coordinator.simulate()?;
            wins[winner.index()] += 1;
            runs += 1;
            if check.elapsed() >= LOG_INTERVAL {
                check = Instant::now();
                log::debug!("{:<16}{:?}", format!("sims {}", runs), wins);
            }
        }
        let tree = coordinator.tree(player);
        log::trace!("{}", tree);
        let choices = tree.choices();
        let event = Self::choose(player, &allowed, &choices);
        let summary = Summary {
            event,
            simulations: runs,
            elapsed: start.elapsed(),
            nodes: coordinator.trees().iter().map(|t| t.size()).collect(),
            choices,
        };
        log::info!("{}", summary.format());
        Ok(summary)
    }

    /// most visited first decision that is legal right now.
    /// ties go to the first one created.
    fn choose(player: Player, allowed: &[Event], choices: &[(Cards, u32)]) -> Event {
        choices
            .iter()
            .map(|&(cards, visits)| (Event::Action(player, cards), visits))
            .filter(|(event, _)| allowed.contains(event))
            .fold(None, |best: Option<(Event, u32)>, (event, visits)| match best {
                Some((_, top)) if top >= visits => best,
                _ => Some((event, visits)),
            })
            .map(|(event, _)| event)
            .unwrap_or_else(|| {
                log::warn!("{} has no visited legal action, playing the first", player);
                allowed[0]
            })
    }
}

/// What one search did and decided.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    event: Event,
    simulations: usize,
    elapsed: Duration,
    nodes: Vec<usize>,
    choices: Vec<(Cards, u32)>,
}

impl Summary {
    pub fn event(&self) -> Event {
        self.event
    }
    pub fn simulations(&self) -> usize {
        self.simulations
    }
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
    /// node count of each seat's tree
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }
    /// visits per first-decision action
    pub fn choices(&self) -> &[(Cards, u32)] {
        &self.choices
    }
    pub fn format(&self) -> String {
        let rate = self.simulations as f64 / self.elapsed.as_secs_f64().max(1e-3);
        format!(
            "{:<24}{:<16}{:<20}{:<16}",
            self.event.to_string(),
            format!("sims {}", self.simulations),
            format!("nodes {}", self.nodes.iter().sum::<usize>()),
            format!("S/sec {:.1}", rate),
        )
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.format())?;
        for (cards, visits) in self.choices.iter() {
            writeln!(f, "  {} {:>6}", cards, visits)?;
        }
        Ok(())
    }
}

/// Pick an action for the player to move in `root`, searching only
/// what that player can see.
pub fn run_search(root: &Game, simulations: usize, exploration: Utility) -> anyhow::Result<Event> {
    Search::default()
        .simulations(simulations)
        .exploration(exploration)
        .run(root)
}
