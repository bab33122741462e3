//! Kariba engine and multiple-observer information-set MCTS.
//!
//! The crate is split into three layers:
//!
//! - `cards`: species, card multisets, and draw distributions
//! - `game`: the authoritative game state, events, and observer views
//! - `search`: per-player search trees and the simulation driver
pub mod cards;
pub mod error;
pub mod game;
pub mod search;

pub use cards::*;
pub use error::*;
pub use game::*;
pub use search::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Number of cards of one species in a zone.
pub type Count = u8;
/// Points on the scoreboard (one per chased card).
pub type Points = u32;
/// Draw likelihoods. Kept at double precision so distributions sum to 1.
pub type Probability = f64;
/// Win rates and exploration bonuses.
pub type Utility = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Capacity of a card multiset. The full game has eight animals,
/// mouse through elephant.
pub const MAX_SPECIES: usize = 8;
/// Default number of species in play.
pub const SPECIES: usize = 8;
/// Default copies of each species in a fresh deck.
pub const COPIES: Count = 8;
/// Players refill their hands up to this many cards.
pub const HAND_SIZE: usize = 5;
/// Default number of seats.
pub const PLAYERS: usize = 2;
/// A species chases another once this many of it lie on the field.
pub const CHASE_THRESHOLD: Count = 3;

// ============================================================================
// SEARCH PARAMETERS
// ============================================================================
/// Default simulation budget per decision.
pub const SIMULATIONS: usize = 1000;
/// UCB exploration constant c = √2.
pub const EXPLORATION: Utility = std::f64::consts::SQRT_2;
/// Interval between progress log messages during a search.
pub const LOG_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);
/// Environment variable holding an optional per-search deadline.
pub const DURATION_VAR: &str = "SEARCH_DURATION";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Optional search deadline from the SEARCH_DURATION env var.
pub fn deadline() -> Option<std::time::Duration> {
    std::env::var(DURATION_VAR)
        .ok()
        .and_then(|s| parse_duration(&s))
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(std::time::Duration::from_secs(value)),
        "m" => Some(std::time::Duration::from_secs(value * 60)),
        "h" => Some(std::time::Duration::from_secs(value * 3600)),
        "d" => Some(std::time::Duration::from_secs(value * 86400)),
        _ => None,
    }
}
