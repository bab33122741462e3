//! Arena Binary
//!
//! AI-vs-AI self-play. Every seat searches only its own view of the table;
//! the game deals, applies the chosen play, refills the actor's hand, and
//! passes the turn.
//!
//! Options: --players, --species, --copies, --hand, --simulations,
//! --exploration, --games, --seed, --duration, --json

use clap::Parser;
use colored::Colorize;
use kariba::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Parser, Debug)]
#[command(author, version, about = "Kariba self-play with MO-ISMCTS", long_about = None)]
struct Args {
    #[arg(long, default_value_t = PLAYERS)]
    players: usize,
    #[arg(long, default_value_t = SPECIES)]
    species: usize,
    #[arg(long, default_value_t = COPIES)]
    copies: Count,
    #[arg(long, default_value_t = HAND_SIZE)]
    hand: usize,
    #[arg(long, default_value_t = SIMULATIONS)]
    simulations: usize,
    #[arg(long, default_value_t = EXPLORATION)]
    exploration: Utility,
    #[arg(long, default_value_t = 1)]
    games: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// per-decision time limit, e.g. "30s" or "2m"
    #[arg(long, value_parser = duration)]
    duration: Option<std::time::Duration>,
    /// one JSON record per game instead of the play-by-play
    #[arg(long)]
    json: bool,
}

fn duration(s: &str) -> Result<std::time::Duration, String> {
    parse_duration(s).ok_or_else(|| format!("invalid duration {:?}", s))
}

fn main() -> anyhow::Result<()> {
    log();
    let args = Args::parse();
    let config = Config::default()
        .players(args.players)
        .species(args.species)
        .copies(args.copies)
        .hand(args.hand)
        .validate()?;
    let mut search = Search::default()
        .simulations(args.simulations)
        .exploration(args.exploration);
    if let Some(limit) = args.duration {
        search = search.deadline(limit);
    }
    search.validate()?;
    let ref mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut wins = vec![0usize; args.players];
    for index in 0..args.games {
        let (game, turns) = play(config, search, !args.json, rng)?;
        let winner = game.leading();
        wins[winner.index()] += 1;
        if args.json {
            let record = serde_json::json!({
                "game": index,
                "turns": turns,
                "winner": winner,
                "scores": game.scores(),
            });
            println!("{}", record);
        } else {
            scoreboard(&game);
        }
    }
    log::info!("wins by seat {:?}", wins);
    Ok(())
}

/// play one game to the end, returning the final state and turns taken
fn play(
    config: Config,
    search: Search,
    verbose: bool,
    rng: &mut SmallRng,
) -> anyhow::Result<(Game, usize)> {
    let game = config.game()?;
    let first = Player::from(rng.random_range(0..game.n()));
    let mut game = game.with_turn(first).deal(rng)?;
    let mut turns = 0;
    while !game.is_final() {
        let turn = game.turn();
        let action = search.seed(rng.random()).run(&game)?;
        game.act(action)?;
        let draw = game.random_draw(turn, rng);
        game.act(draw)?;
        if verbose {
            println!("{}", show(&action));
            log::debug!("{}", draw);
        }
        game.next_turn();
        turns += 1;
    }
    Ok((game, turns))
}

fn show(event: &Event) -> String {
    match event {
        Event::Draw(who, cards) => format!("{} {}", who, format!("DRAW {}", cards).white()),
        Event::Action(who, cards) => format!("{} {}", who, format!("PLAY {}", cards).green()),
    }
}

fn scoreboard(game: &Game) {
    let winner = game.leading();
    for p in Player::all(game.n()) {
        let line = format!("{:<4}{:>4}", p.to_string(), game.score(p));
        match p == winner {
            true => println!("{}", line.yellow().bold()),
            false => println!("{}", line),
        }
    }
}
