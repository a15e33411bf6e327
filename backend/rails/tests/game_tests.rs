use rails::board::GameMap;
use rails::card::NUM_WAGON_CARDS;
use rails::config::GameConfig;
use rails::error::EngineError;
use rails::host::GameHandle;
use rails::phase::GamePhase;
use rails::snapshot::{Prompt, Snapshot};

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::mpsc;
use std::time::Duration;

// Far more than a game with 12 wagons per player ever needs.
const MAX_SNAPSHOTS: usize = 20_000;

fn config(seed: u64) -> GameConfig {
    GameConfig {
        wagons_per_player: 12,
        seed: Some(seed),
        ..GameConfig::default()
    }
}

fn names(n: usize) -> Vec<String> {
    ["Ada", "Bob", "Cy", "Dee", "Eve"][..n]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Passes whenever allowed, claims a route whenever one is on offer,
/// otherwise presses the first button, or picks the first item.
fn answer(prompt: &Prompt) -> String {
    if prompt.can_decline {
        return String::new();
    }

    prompt
        .items
        .iter()
        .find(|item| item.contains(" - "))
        .or_else(|| prompt.buttons.first())
        .or_else(|| prompt.items.first())
        .cloned()
        .unwrap_or_default()
}

/// Plays a whole game, and returns every snapshot published.
fn play(players: usize, seed: u64) -> (Result<Snapshot, EngineError>, Vec<Snapshot>) {
    let (tx, rx) = mpsc::channel();
    let game = GameHandle::spawn_with(names(players), config(seed), GameMap::europe(), tx).unwrap();

    let mut snapshots = Vec::new();
    while let Ok(snapshot) = rx.recv_timeout(Duration::from_secs(10)) {
        let token = snapshot.prompt.as_ref().map(answer);
        snapshots.push(snapshot);

        match token {
            Some(token) if snapshots.len() < MAX_SNAPSHOTS => game.submit(token).unwrap(),
            _ => break,
        }
    }

    (game.shutdown(), snapshots)
}

fn assert_cards_are_conserved(snapshot: &Snapshot) {
    let in_hands: usize = snapshot
        .players
        .iter()
        .map(|player| player.public_hand_size)
        .sum();
    let piles = &snapshot.piles;

    assert_eq!(
        piles.draw_count + piles.discard_pile.len() + piles.visible_pile.len() + in_hands,
        NUM_WAGON_CARDS
    );
}

fn assert_visible_pile_is_full(snapshot: &Snapshot) {
    let piles = &snapshot.piles;
    assert!(
        piles.visible_pile.len() == 5 || (piles.draw_count == 0 && piles.discard_pile.is_empty())
    );
}

#[test]
fn three_player_game_runs_to_completion() {
    let (result, snapshots) = play(3, 7);
    let last = result.unwrap();

    assert_eq!(last.phase, GamePhase::GameOver);
    assert_eq!(last.prompt, None);
    assert_eq!(snapshots.last(), Some(&last));

    for snapshot in &snapshots {
        assert_cards_are_conserved(snapshot);
        assert_visible_pile_is_full(snapshot);
    }

    // Every route claimed on the board is listed by its owner, and the other way around.
    for (position, player) in last.players.iter().enumerate() {
        let owned: HashSet<&str> = last
            .board
            .connections
            .iter()
            .filter(|route| route.owner == Some(position))
            .map(|route| route.name.as_str())
            .collect();
        let claimed: HashSet<&str> = player.claimed_routes.iter().map(String::as_str).collect();
        assert_eq!(owned, claimed);

        let length: u8 = last
            .board
            .connections
            .iter()
            .filter(|route| route.owner == Some(position))
            .map(|route| route.length)
            .sum();
        assert_eq!(player.wagons_remaining + length, 12);
        assert!(player.destinations_owned.len() >= 2);
    }
}

#[test]
fn final_round_gives_every_other_player_exactly_one_turn() {
    for (players, seed) in [(2, 1), (3, 2), (4, 3), (5, 4)] {
        let (result, snapshots) = play(players, seed);
        assert_eq!(result.map(|snapshot| snapshot.phase), Ok(GamePhase::GameOver));

        let first_final = snapshots
            .iter()
            .find(|snapshot| snapshot.phase == GamePhase::FinalRound)
            .unwrap();
        let triggers: Vec<usize> = first_final
            .players
            .iter()
            .filter(|player| player.wagons_remaining <= 2)
            .map(|player| player.position)
            .collect();
        assert_eq!(triggers.len(), 1);

        let mut final_turns: Vec<(usize, usize)> = snapshots
            .iter()
            .filter(|snapshot| snapshot.phase == GamePhase::FinalRound)
            .map(|snapshot| (snapshot.turn, snapshot.current_player))
            .collect();
        final_turns.dedup();

        let mut expected: Vec<usize> = (1..players)
            .map(|offset| (triggers[0] + offset) % players)
            .collect();
        let played: Vec<usize> = final_turns.iter().map(|(_, player)| *player).collect();
        assert_eq!(played, expected);

        expected.push(triggers[0]);
        assert_eq!(expected.len(), players);
    }
}

#[test]
fn seeded_games_are_reproducible() {
    let (first, _) = play(4, 99);
    let (second, _) = play(4, 99);

    assert_eq!(first, second);
}

#[test]
fn shutdown_stops_a_game_in_progress() {
    let (tx, rx) = mpsc::channel();
    let game = GameHandle::spawn_with(names(2), config(3), GameMap::europe(), tx).unwrap();

    let snapshot = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(snapshot.phase, GamePhase::SetupDestinationChoice);

    let sender = game.sender();
    assert_eq!(game.shutdown(), Err(EngineError::Interrupted));
    assert_eq!(sender.submit(""), Err(EngineError::GameClosed));
}
