use crate::board::Route;
use crate::card::WagonColor;
use crate::destination::Destination;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::iter::repeat;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Every player has their own color.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerColor {
    Black,
    Blue,
    Green,
    Red,
    Yellow,
}

/// One way of paying for a route with the cards in hand.
///
/// `color` is the plain color spent, topped up with `locomotives`.
/// A payment made of locomotives only has `color` set to [`WagonColor::Locomotive`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Payment {
    pub color: WagonColor,
    pub colored: u8,
    pub locomotives: u8,
}

impl Payment {
    #[inline]
    pub fn total(&self) -> u8 {
        self.colored + self.locomotives
    }

    /// The cards spent, one by one.
    pub fn cards(&self) -> impl Iterator<Item = WagonColor> {
        repeat(self.color)
            .take(self.colored as usize)
            .chain(repeat(WagonColor::Locomotive).take(self.locomotives as usize))
    }
}

/// Information about a player's state that is visible to all players.
/// The content of their hand is deliberately left out, only its size is shared.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlayerState {
    pub name: String,
    pub color: PlayerColor,
    pub position: usize,
    pub public_hand_size: usize,
    pub destinations_owned: Vec<Destination>,
    pub wagons_remaining: u8,
    pub claimed_routes: Vec<String>,
}

/// Encapsulates all the information about a player.
///
/// A [`PlayerState`] is not aware of other players nor of the board: validating turn order and
/// route availability is taken care of by the [`crate::engine::GameEngine`].
#[derive(Clone, Debug)]
pub struct PlayerState {
    name: String,
    color: PlayerColor,
    /// Position in turn order, starting at 0.
    position: usize,
    /// Maps how many cards of a color the player has.
    /// It is guaranteed that the map has at all times key-value pairs for all colors.
    hand: HashMap<WagonColor, u8>,
    destinations: Vec<Destination>,
    wagons: u8,
    claimed_routes: Vec<String>,
}

impl PlayerState {
    pub fn new(position: usize, name: String, color: PlayerColor, wagons: u8) -> Self {
        Self {
            name,
            color,
            position,
            hand: HashMap::from_iter(WagonColor::iter().map(|color| (color, 0))),
            destinations: Vec::new(),
            wagons,
            claimed_routes: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> PlayerColor {
        self.color
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// How many wagons the player has left.
    /// This is the currency used, alongside cards, to claim routes.
    pub fn wagons(&self) -> u8 {
        self.wagons
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn claimed_routes(&self) -> &[String] {
        &self.claimed_routes
    }

    /// How many cards of the given color are in the player's hand.
    pub fn count(&self, color: WagonColor) -> u8 {
        self.hand.get(&color).copied().unwrap_or(0)
    }

    pub fn hand_size(&self) -> usize {
        self.hand.values().map(|&count| count as usize).sum()
    }

    pub fn add_card(&mut self, card: WagonColor) {
        *self.hand.entry(card).or_insert(0) += 1;
    }

    pub fn add_destinations<I: IntoIterator<Item = Destination>>(&mut self, destinations: I) {
        self.destinations.extend(destinations);
    }

    /// All the ways the player can pay for a route of the given color and length,
    /// spending as many plain cards as possible before locomotives.
    ///
    /// For a route of any color (`None`), each plain color is considered on its own.
    ///
    /// # Example
    /// ```
    /// use rails::card::WagonColor;
    /// use rails::player::{PlayerColor, PlayerState};
    ///
    /// let mut player = PlayerState::new(0, String::from("Ada"), PlayerColor::Red, 45);
    /// player.add_card(WagonColor::Red);
    /// player.add_card(WagonColor::Locomotive);
    ///
    /// let options = player.payment_options(Some(WagonColor::Red), 2);
    /// assert_eq!(options.len(), 1);
    /// assert_eq!(options[0].colored, 1);
    /// assert_eq!(options[0].locomotives, 1);
    /// ```
    pub fn payment_options(&self, color: Option<WagonColor>, length: u8) -> SmallVec<[Payment; 9]> {
        let mut options = SmallVec::new();
        let locomotives = self.count(WagonColor::Locomotive);

        let candidates: SmallVec<[WagonColor; 8]> = match color {
            Some(color) if color.is_not_locomotive() => smallvec![color],
            Some(_) => SmallVec::new(),
            None => WagonColor::base_colors().collect(),
        };

        for candidate in candidates {
            let in_hand = self.count(candidate);
            if in_hand > 0 && in_hand as u16 + locomotives as u16 >= length as u16 {
                let colored = in_hand.min(length);
                options.push(Payment {
                    color: candidate,
                    colored,
                    locomotives: length - colored,
                });
            }
        }

        if length > 0 && locomotives >= length {
            options.push(Payment {
                color: WagonColor::Locomotive,
                colored: 0,
                locomotives: length,
            });
        }

        options
    }

    /// Claims the route using the given payment.
    ///
    /// Returns an `Err` if [`PlayerState::can_pay`] does, leaving the player untouched.
    /// Otherwise, removes the cards from the hand, spends the wagons,
    /// and returns the cards to be discarded.
    pub fn claim(&mut self, route: &Route, payment: Payment) -> Result<Vec<WagonColor>, String> {
        self.can_pay(route, payment)?;
        Ok(self.pay(route, payment))
    }

    /// Verifies whether the player can claim the route using the given payment.
    ///
    /// Returns an `Err` if either:
    ///   * The payment does not cover the route's length, or does not match its color.
    ///   * There are not enough wagons to claim this route.
    ///   * The player does not have the cards of the payment in their hand.
    pub fn can_pay(&self, route: &Route, payment: Payment) -> Result<(), String> {
        if payment.total() != route.length {
            return Err(format!(
                "Cannot claim {} of length {} with {} cards.",
                route.name,
                route.length,
                payment.total()
            ));
        }

        if payment.colored > 0 && payment.color.is_locomotive() {
            return Err(String::from(
                "Locomotives must be counted as such in a payment.",
            ));
        }

        if let Some(color) = route.color {
            if payment.colored > 0 && payment.color != color {
                return Err(format!(
                    "Cannot claim {} using {} cards, it requires {} cards.",
                    route.name, payment.color, color
                ));
            }
        }

        if route.length > self.wagons {
            return Err(format!(
                "Cannot claim {} of length {}, whilst having only {} wagons left.",
                route.name, route.length, self.wagons
            ));
        }

        if payment.locomotives > self.count(WagonColor::Locomotive) {
            return Err(format!(
                "Cannot claim a route using {} locomotives, whilst having only {} left.",
                payment.locomotives,
                self.count(WagonColor::Locomotive)
            ));
        }

        if payment.colored > 0 && payment.colored > self.count(payment.color) {
            return Err(format!(
                "Cannot claim a route using {} {} cards, whilst having only {} left.",
                payment.colored,
                payment.color,
                self.count(payment.color)
            ));
        }

        Ok(())
    }

    /// Spends a payment already checked by [`PlayerState::can_pay`].
    pub(crate) fn pay(&mut self, route: &Route, payment: Payment) -> Vec<WagonColor> {
        let cards: Vec<WagonColor> = payment.cards().collect();
        for card in &cards {
            self.hand.entry(*card).and_modify(|count| *count -= 1);
        }

        self.wagons -= route.length;
        self.claimed_routes.push(route.name.clone());

        cards
    }

    /// Everything about this player that every other player may see.
    pub fn public_state(&self) -> PublicPlayerState {
        PublicPlayerState {
            name: self.name.clone(),
            color: self.color,
            position: self.position,
            public_hand_size: self.hand_size(),
            destinations_owned: self.destinations.clone(),
            wagons_remaining: self.wagons,
            claimed_routes: self.claimed_routes.clone(),
        }
    }
}
