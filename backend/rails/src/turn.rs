use crate::card::WagonColor;
use crate::engine::GameEngine;
use crate::error::EngineError;
use crate::player::Payment;

use std::collections::BTreeSet;

const DECK: &str = "deck";
const DESTINATIONS: &str = "destinations";

const NUM_DRAWN_DESTINATIONS: usize = 3;
// On a normal turn, at least one destination must be kept.
const MIN_DRAWN_DESTINATIONS: usize = 1;

/// The actions a player can take during a normal turn.
///
/// Each action returns `Ok(true)` once performed, and `Ok(false)` if the game refused it,
/// in which case nothing has changed and the player is asked again.
impl GameEngine {
    /// Plays one full turn of the current player.
    pub(crate) fn play_turn(&mut self) -> Result<(), EngineError> {
        loop {
            let mut items: Vec<String> = self
                .visible_colors(true)
                .iter()
                .map(ToString::to_string)
                .collect();
            items.extend(self.claimable_routes());

            let choice = self.choose(
                format!(
                    "{}, take a card, claim a route or draw destinations",
                    self.current_player().name()
                ),
                items,
                vec![DECK.to_string(), DESTINATIONS.to_string()],
                false,
            )?;

            let done = match choice.as_str() {
                DECK => self.draw_blind(true)?,
                DESTINATIONS => self.draw_destinations()?,
                _ => match choice.parse::<WagonColor>() {
                    Ok(color) => self.take_visible(color, true)?,
                    Err(_) => self.claim_route(&choice)?,
                },
            };

            if done {
                return Ok(());
            }
        }
    }

    /// Distinct colors of the visible pile, optionally including locomotives.
    fn visible_colors(&self, with_locomotives: bool) -> BTreeSet<WagonColor> {
        self.cards
            .visible_pile()
            .iter()
            .copied()
            .filter(|card| with_locomotives || card.is_not_locomotive())
            .collect()
    }

    /// Names of the routes the current player could claim right now, cards and wagons included.
    fn claimable_routes(&self) -> Vec<String> {
        let player = self.current_player();

        self.board
            .claimable_by(self.current, player.wagons())
            .filter(|route| !player.payment_options(route.color, route.length).is_empty())
            .map(|route| route.name.clone())
            .collect()
    }

    fn draw_blind(&mut self, first_draw: bool) -> Result<bool, EngineError> {
        match self.cards.draw() {
            Some(card) => {
                self.players[self.current].add_card(card);
                self.record(format!(
                    "{} draws a card from the deck.",
                    self.current_player().name()
                ));
            }
            None => {
                self.record(format!(
                    "{} finds no card left to draw.",
                    self.current_player().name()
                ));
            }
        }

        if first_draw {
            self.draw_second_card()?;
        }
        Ok(true)
    }

    fn take_visible(&mut self, color: WagonColor, first_draw: bool) -> Result<bool, EngineError> {
        let (card, redealt) = match self.cards.take_visible(color) {
            Ok(taken) => taken,
            Err(message) => {
                log::warn!("{}", message);
                return Ok(false);
            }
        };

        self.players[self.current].add_card(card);
        self.record(format!(
            "{} takes a visible {} card.",
            self.current_player().name(),
            card
        ));
        if redealt {
            self.record(String::from(
                "The visible cards showed too many locomotives and were redealt.",
            ));
        }

        // A visible locomotive is worth the whole turn.
        if first_draw && card.is_not_locomotive() {
            self.draw_second_card()?;
        }
        Ok(true)
    }

    /// Offers a second card after a first draw, if there is any left to take.
    fn draw_second_card(&mut self) -> Result<(), EngineError> {
        loop {
            let items: Vec<String> = self
                .visible_colors(false)
                .iter()
                .map(ToString::to_string)
                .collect();
            let buttons = if self.cards.can_draw() {
                vec![DECK.to_string()]
            } else {
                Vec::new()
            };

            if items.is_empty() && buttons.is_empty() {
                log::debug!("no second card can be drawn this turn");
                return Ok(());
            }

            let choice = self.choose(
                format!("{}, draw a second card", self.current_player().name()),
                items,
                buttons,
                false,
            )?;

            let done = match choice.parse::<WagonColor>() {
                Ok(color) => self.take_visible(color, false)?,
                Err(_) => self.draw_blind(false)?,
            };

            if done {
                return Ok(());
            }
        }
    }

    fn claim_route(&mut self, name: &str) -> Result<bool, EngineError> {
        let route = match self.board.can_claim(name, self.current) {
            Ok(route) => route.clone(),
            Err(message) => {
                log::warn!("{}", message);
                return Ok(false);
            }
        };

        let options = self
            .current_player()
            .payment_options(route.color, route.length);
        let payment: Payment = match options.as_slice() {
            [] => {
                log::warn!(
                    "{} cannot pay for {}",
                    self.current_player().name(),
                    route.name
                );
                return Ok(false);
            }
            [payment] => *payment,
            _ => {
                let buttons = options.iter().map(|p| p.color.to_string()).collect();
                let choice = self.choose(
                    format!(
                        "{}, pick the cards to claim {} with",
                        self.current_player().name(),
                        route.name
                    ),
                    Vec::new(),
                    buttons,
                    false,
                )?;

                match options.iter().find(|p| p.color.to_string() == choice) {
                    Some(payment) => *payment,
                    None => return Ok(false),
                }
            }
        };

        // Nothing changes unless both the player and the board accept the claim.
        let claimed = self.players[self.current]
            .can_pay(&route, payment)
            .and_then(|()| self.board.claim(name, self.current).map(|_| ()));
        if let Err(message) = claimed {
            log::warn!("{}", message);
            return Ok(false);
        }

        let cards = self.players[self.current].pay(&route, payment);
        for card in cards {
            self.cards.discard(card);
        }

        self.record(format!(
            "{} claims {} of length {} using {} {} card(s) and {} locomotive(s).",
            self.current_player().name(),
            route.name,
            route.length,
            payment.colored,
            payment.color,
            payment.locomotives
        ));

        Ok(true)
    }

    fn draw_destinations(&mut self) -> Result<bool, EngineError> {
        let mut drawn = Vec::with_capacity(NUM_DRAWN_DESTINATIONS);
        for _ in 0..NUM_DRAWN_DESTINATIONS {
            match self.destinations.draw_short() {
                Some(destination) => drawn.push(destination),
                None => break,
            }
        }

        if drawn.is_empty() {
            self.record(format!(
                "{} finds no destination left to draw.",
                self.current_player().name()
            ));
            return Ok(true);
        }

        self.record(format!(
            "{} draws {} destination(s).",
            self.current_player().name(),
            drawn.len()
        ));
        self.select_destinations(drawn, MIN_DRAWN_DESTINATIONS)?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::board::{Board, GameMap, Route};
    use crate::card::{CardSupply, WagonColor};
    use crate::channel::{action_channel, ActionSender};
    use crate::city::City;
    use crate::config::GameConfig;
    use crate::destination::{Destination, DestinationLength};
    use crate::engine::GameEngine;
    use crate::error::EngineError;
    use crate::snapshot::Snapshot;

    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    fn map(routes: Vec<Route>, short: Vec<(City, City, u8)>) -> GameMap {
        GameMap {
            board: Board::new(routes),
            short_destinations: short
                .into_iter()
                .map(|(start, end, points)| Destination {
                    destination: (start, end),
                    points,
                    length: DestinationLength::Short,
                })
                .collect(),
            long_destinations: Vec::new(),
        }
    }

    fn engine(map: GameMap) -> (GameEngine, ActionSender, mpsc::Receiver<Snapshot>) {
        let config = GameConfig {
            wagons_per_player: 45,
            initial_hand_size: 0,
            final_round_threshold: 2,
            seed: Some(5),
        };
        let names = vec![String::from("Ada"), String::from("Bob")];
        let (sender, inbox) = action_channel();
        let (tx, rx) = mpsc::channel();
        let engine = GameEngine::new(names, config, map, inbox, Box::new(tx)).unwrap();
        (engine, sender, rx)
    }

    /// Feeds the tokens to the engine until it runs out of them,
    /// and returns every snapshot published along the way.
    fn play(
        (engine, sender, rx): (GameEngine, ActionSender, mpsc::Receiver<Snapshot>),
        tokens: &[&str],
    ) -> Vec<Snapshot> {
        for token in tokens {
            sender.submit(*token).unwrap();
        }
        drop(sender);

        assert_eq!(engine.run(), Err(EngineError::Disconnected));
        rx.try_iter().collect()
    }

    fn cards(draw: Vec<WagonColor>, visible: &[WagonColor]) -> CardSupply {
        CardSupply::with_piles(draw, visible, Vec::new(), StdRng::seed_from_u64(0))
    }

    #[test]
    fn claim_with_payment_choice() {
        let mut game = engine(map(
            vec![Route::new((City::Paris, City::Wien), None, 2)],
            Vec::new(),
        ));
        game.0.cards = cards(vec![WagonColor::Black; 10], &[WagonColor::White; 5]);
        for card in [
            WagonColor::Red,
            WagonColor::Red,
            WagonColor::Blue,
            WagonColor::Blue,
            WagonColor::Blue,
        ] {
            game.0.players[0].add_card(card);
        }

        let snapshots = play(game, &["Paris - Wien", "blue"]);

        let payment_prompt = snapshots[1].prompt.clone().unwrap();
        assert_eq!(payment_prompt.buttons, vec!["blue", "red"]);
        assert!(payment_prompt.items.is_empty());

        let last = snapshots.last().unwrap();
        assert_eq!(last.players[0].public_hand_size, 3);
        assert_eq!(last.players[0].wagons_remaining, 43);
        assert_eq!(last.piles.discard_pile, vec![WagonColor::Blue; 2]);
        assert_eq!(last.board.connections[0].owner, Some(0));
        assert_eq!(last.current_player, 1);
    }

    #[test]
    fn claimed_route_is_no_longer_offered() {
        let mut game = engine(map(
            vec![
                Route::new((City::Paris, City::Wien), Some(WagonColor::Red), 1),
                Route::new((City::Paris, City::Wien), Some(WagonColor::Blue), 1),
            ],
            Vec::new(),
        ));
        game.0.cards = cards(vec![WagonColor::Black; 10], &[WagonColor::White; 5]);
        game.0.players[0].add_card(WagonColor::Red);
        game.0.players[1].add_card(WagonColor::Blue);

        let snapshots = play(game, &["Paris - Wien"]);

        assert_eq!(
            snapshots[0].prompt.as_ref().unwrap().items,
            vec!["white", "Paris - Wien"]
        );
        // With two players, the parallel route closes once its twin is claimed.
        assert_eq!(
            snapshots.last().unwrap().prompt.as_ref().unwrap().items,
            vec!["white"]
        );
    }

    #[test]
    fn refused_claim_changes_nothing() {
        let mut game = engine(map(
            vec![Route::new((City::Paris, City::Wien), Some(WagonColor::Red), 2)],
            Vec::new(),
        ));
        game.0.players[0].add_card(WagonColor::Red);
        game.0.players[0].add_card(WagonColor::Red);
        game.0.board.claim("Paris - Wien", 1).unwrap();

        assert_eq!(game.0.claim_route("Paris - Wien"), Ok(false));
        assert_eq!(game.0.players[0].count(WagonColor::Red), 2);
        assert_eq!(game.0.players[0].wagons(), 45);
        assert!(game.0.players[0].claimed_routes().is_empty());
        assert!(game.0.cards.discard_pile().is_empty());
        assert_eq!(
            game.0.board.route("Paris - Wien").and_then(|r| r.owner),
            Some(1)
        );
    }

    #[test]
    fn second_draw_excludes_locomotives() {
        let mut game = engine(map(Vec::new(), Vec::new()));
        game.0.cards = cards(
            vec![WagonColor::Locomotive; 3],
            &[
                WagonColor::Red,
                WagonColor::Locomotive,
                WagonColor::Pink,
                WagonColor::Pink,
                WagonColor::Black,
            ],
        );

        let snapshots = play(game, &["red"]);

        // The red card is replaced by a locomotive: two locomotives are still fine.
        let second = snapshots.last().unwrap().prompt.clone().unwrap();
        assert_eq!(second.player, "Ada");
        assert_eq!(second.items, vec!["black", "pink"]);
        assert_eq!(second.buttons, vec!["deck"]);
    }

    #[test]
    fn empty_supply_still_consumes_the_turn() {
        let mut game = engine(map(Vec::new(), Vec::new()));
        game.0.cards = cards(Vec::new(), &[]);

        let snapshots = play(game, &["deck", "destinations"]);

        let last = snapshots.last().unwrap();
        assert_eq!(last.current_player, 0);
        assert_eq!(last.turn, 2);
        assert!(last.players.iter().all(|p| p.public_hand_size == 0));
        assert!(last.log.iter().any(|e| e == "Ada finds no card left to draw."));
        assert!(last
            .log
            .iter()
            .any(|e| e == "Bob finds no destination left to draw."));
    }

    #[test]
    fn draw_destinations_keeps_at_least_one() {
        let shorts = vec![
            (City::Paris, City::Wien, 8),
            (City::Roma, City::Smyrna, 8),
            (City::Kyiv, City::Sochi, 8),
            (City::Riga, City::Bucuresti, 10),
            (City::Zurich, City::Brindisi, 6),
            (City::Athina, City::Angora, 5),
            (City::Berlin, City::Roma, 9),
            (City::Sofia, City::Smyrna, 5),
            (City::Budapest, City::Sofia, 5),
        ];
        let labels: Vec<String> = map(Vec::new(), shorts.clone())
            .short_destinations
            .iter()
            .map(ToString::to_string)
            .collect();

        // Both players keep all three setup destinations, then Ada draws three more and tries to
        // discard every destination there is. Labels not on offer are rejected.
        let mut tokens = vec!["", "", "destinations"];
        tokens.extend(labels.iter().map(String::as_str));

        let snapshots = play(engine(map(Vec::new(), shorts)), &tokens);

        let last = snapshots.last().unwrap();
        assert_eq!(last.players[0].destinations_owned.len(), 4);
        assert_eq!(last.players[1].destinations_owned.len(), 3);
        assert_eq!(last.piles.destination_count, 2);
        assert!(last
            .log
            .iter()
            .any(|e| e == "Ada keeps 1 destination(s) and returns 2."));
        assert_eq!(last.prompt.as_ref().map(|p| p.player.as_str()), Some("Bob"));
    }
}
