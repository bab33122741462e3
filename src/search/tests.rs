use super::*;
use crate::EXPLORATION;
use crate::Error;
use crate::Utility;
use crate::cards::Cards;
use crate::game::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn cards(s: &str) -> Cards {
    Cards::try_from(s).unwrap()
}

fn p(i: usize) -> Player {
    Player::from(i)
}

/// two species, a thin deck, and a half-full hand
fn small(players: usize) -> Game {
    Config::default()
        .players(players)
        .species(2)
        .game()
        .unwrap()
        .with_deck(cards("3 3"))
        .with_hand(p(0), cards("1 1"))
}

/// P1 can chase two B for the win by playing its C, or lose by playing A
fn decisive() -> Game {
    Config::default()
        .species(3)
        .game()
        .unwrap()
        .with_deck(cards("0 0 0"))
        .with_field(cards("0 2 2"))
        .with_hand(p(0), cards("1 0 1"))
        .with_hand(p(1), cards("1 0 0"))
        .with_score(p(1), 1)
}

fn dealt(seed: u64) -> Game {
    let ref mut rng = SmallRng::seed_from_u64(seed);
    Config::default().game().unwrap().deal(rng).unwrap()
}

#[test]
fn zero_simulations_rejected() {
    let err = run_search(&small(1), 0, EXPLORATION).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidConfig(_))
    ));
}

#[test]
fn bad_exploration_rejected() {
    for c in [Utility::NAN, Utility::INFINITY, -1.] {
        let err = run_search(&small(1), 10, c).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidConfig(_))
        ));
    }
}

#[test]
fn empty_hand_rejected() {
    let game = small(2).with_turn(p(1));
    let err = run_search(&game, 10, EXPLORATION).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::EmptyActionSet(who)) if *who == p(1)
    ));
}

#[test]
fn chosen_action_is_legal() {
    for players in [1, 2] {
        let game = small(players);
        let allowed = game.allowed(p(0));
        for seed in 0..8 {
            let event = Search::default()
                .simulations(64)
                .seed(seed)
                .run(&game)
                .unwrap();
            assert!(allowed.contains(&event), "{} not in {:?}", event, allowed);
        }
        let event = run_search(&game, 64, EXPLORATION).unwrap();
        assert!(allowed.contains(&event));
    }
}

#[test]
fn seeded_search_is_reproducible() {
    let game = dealt(5);
    let search = Search::default().simulations(32).seed(99);
    let a = search.solve(&game).unwrap();
    let b = search.solve(&game).unwrap();
    assert_eq!(a.event(), b.event());
    assert_eq!(a.choices(), b.choices());
    assert_eq!(a.nodes(), b.nodes());
}

#[test]
fn finds_the_winning_chase() {
    let game = decisive();
    let summary = Search::default()
        .simulations(200)
        .seed(3)
        .solve(&game)
        .unwrap();
    assert_eq!(summary.event(), Event::Action(p(0), cards("0 0 1")));
    assert_eq!(summary.simulations(), 200);
}

#[test]
fn falls_back_when_nothing_was_visited() {
    // already over: the simulated games end before anyone decides
    let game = decisive().with_hand(p(1), cards("0 0 0"));
    assert!(game.is_final());
    let event = run_search(&game, 8, EXPLORATION).unwrap();
    assert_eq!(event, game.allowed(p(0))[0]);
}

#[test]
fn expired_deadline_stops_immediately() {
    let summary = Search::default()
        .simulations(1000)
        .deadline(std::time::Duration::ZERO)
        .seed(0)
        .solve(&dealt(1))
        .unwrap();
    assert_eq!(summary.simulations(), 0);
    assert!(dealt(1).allowed(p(0)).contains(&summary.event()));
}

#[test]
fn every_simulation_reaches_every_root() {
    let game = dealt(2);
    let mut coordinator = Coordinator::new(game.mask(p(0)), EXPLORATION, 2);
    let runs = 40;
    for _ in 0..runs {
        coordinator.simulate().unwrap();
        assert!(coordinator.game().is_final());
    }
    for tree in coordinator.trees() {
        assert_eq!(tree.root().visits(), runs);
        assert!(tree.nodes().all(|n| n.wins() <= n.visits()));
    }
    let first = coordinator.tree(p(0)).choices();
    assert_eq!(first.iter().map(|(_, n)| n).sum::<u32>(), runs);
}

#[test]
fn reset_restores_the_snapshot() {
    let game = dealt(3);
    let mut coordinator = Coordinator::new(game.clone(), EXPLORATION, 3);
    coordinator.simulate().unwrap();
    assert_ne!(coordinator.game(), &game);
    coordinator.reset();
    assert_eq!(coordinator.game(), &game);
    assert_eq!(coordinator.root(), &game);
    assert!(coordinator.trees().iter().all(|t| !t.mode().is_rollout()));
}

#[test]
fn trees_never_see_hidden_hands() {
    let game = dealt(4);
    let masked = game.mask(p(0));
    let total = masked.total();
    let mut coordinator = Coordinator::new(masked, EXPLORATION, 4);
    assert!(coordinator.tree(p(1)).root().view().hand().is_empty());
    for _ in 0..32 {
        coordinator.simulate().unwrap();
    }
    for tree in coordinator.trees() {
        for node in tree.nodes() {
            let view = node.view();
            assert_eq!(node.owner(), tree.owner());
            assert!(total.contains(&(*view.hand() + *view.field() + *view.jungle())));
        }
    }
    // the opponent's real cards never appear as the searcher's knowledge
    let root = coordinator.tree(p(0)).root().view();
    assert_eq!(root.hand(), game.hand(p(0)));
    assert_eq!(
        *root.jungle(),
        *game.deck() + *game.hand(p(1))
    );
}

#[test]
fn trees_reuse_equivalent_nodes() {
    let game = small(2);
    let ref mut rng = SmallRng::seed_from_u64(0);
    let mut tree = Tree::from((p(0), View::from((&game, p(0))), EXPLORATION, &mut *rng));
    let draw = Event::Draw(p(0), cards("1 0"));
    let other = Event::Draw(p(1), cards("0 2"));
    tree.witness(&other, rng).unwrap();
    assert_eq!(tree.size(), 1);
    tree.witness(&draw, rng).unwrap();
    assert_eq!(tree.size(), 2);
    tree.reset();
    tree.witness(&draw, rng).unwrap();
    assert_eq!(tree.size(), 2);
    assert_eq!(tree.cursor().view().hand(), &cards("2 1"));
}

#[test]
fn own_action_starts_rollout() {
    let game = small(2);
    let ref mut rng = SmallRng::seed_from_u64(1);
    let mut tree = Tree::from((p(0), View::from((&game, p(0))), EXPLORATION, &mut *rng));
    let action = tree.select(rng).unwrap();
    assert!(game.allowed(p(0)).contains(&action));
    tree.witness(&action, rng).unwrap();
    assert!(tree.mode().is_rollout());
    assert!(tree.cursor().is_after());
    let size = tree.size();
    tree.witness(&Event::Action(p(1), cards("1 0")), rng).unwrap();
    assert_eq!(tree.size(), size);
    match tree.mode() {
        Mode::Rollout(view) => assert_eq!(view.jungle(), &cards("2 3")),
        Mode::Select => unreachable!(),
    }
}

#[test]
fn untried_actions_come_before_statistics() {
    let game = small(1);
    let ref mut rng = SmallRng::seed_from_u64(2);
    let mut tree = Tree::from((p(0), View::from((&game, p(0))), EXPLORATION, &mut *rng));
    let mut tried = Vec::new();
    for _ in 0..game.allowed(p(0)).len() {
        let action = tree.select(rng).unwrap();
        tree.witness(&action, rng).unwrap();
        tree.backpropagate(p(0));
        tree.reset();
        tried.push(action);
    }
    tried.sort_by_key(|e| e.cards());
    let mut allowed = game.allowed(p(0));
    allowed.sort_by_key(|e| e.cards());
    assert_eq!(tried, allowed);
    assert_eq!(tree.choices().len(), allowed.len());
    assert!(tree.choices().iter().all(|(_, n)| *n == 1));
    // all even now, so the first created wins the tie
    let next = tree.select(rng).unwrap();
    assert_eq!(next.cards(), tree.choices()[0].0);
}

#[test]
fn empty_hand_cannot_select() {
    let game = small(2);
    let ref mut rng = SmallRng::seed_from_u64(0);
    let mut tree = Tree::from((p(1), View::from((&game, p(1))), EXPLORATION, &mut *rng));
    let err = tree.select(rng).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::EmptyActionSet(_))
    ));
}

#[test]
fn full_games_terminate() {
    let mut coordinator = Coordinator::new(Config::default().players(3).game().unwrap(), EXPLORATION, 6);
    for _ in 0..16 {
        let winner = coordinator.simulate().unwrap();
        assert_eq!(winner, coordinator.game().leading());
        assert!(coordinator.game().is_final());
    }
}
