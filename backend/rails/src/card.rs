use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::iter::repeat;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

pub const NUM_VISIBLE_WAGON_CARDS: usize = 5;
pub const NUM_WAGON_CARDS: usize = 110;
const NUM_LOCOMOTIVE_CARDS: usize = 14;
const NUM_BASE_COLOR_CARDS: usize = 12;
const LOCOMOTIVE_LIMIT: usize = 3;
// Past this many plain cards left in the supply, the visible pile is never redealt.
const MAX_DILUTING_CARDS: usize = 2;

/// Represents the different variants of wagon cards.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WagonColor {
    Black,
    Blue,
    Green,
    Orange,
    Pink,
    Red,
    White,
    Yellow,
    /// The wildcard: matches with any color.
    Locomotive,
}

impl WagonColor {
    /// Whether the current color is the wildcard, i.e. matches with any color.
    ///
    /// # Examples:
    /// ```
    /// use rails::card::WagonColor;
    ///
    /// assert!(!WagonColor::Black.is_locomotive());
    /// assert!(WagonColor::Locomotive.is_locomotive());
    /// ```
    #[inline]
    pub fn is_locomotive(&self) -> bool {
        *self == WagonColor::Locomotive
    }

    /// The opposite of `is_locomotive`.
    #[inline]
    pub fn is_not_locomotive(&self) -> bool {
        !self.is_locomotive()
    }

    /// The eight plain colors, in declaration order.
    pub fn base_colors() -> impl Iterator<Item = WagonColor> {
        WagonColor::iter().filter(|color| color.is_not_locomotive())
    }
}

/// Owns every wagon card that is not in a player's hand: the hidden draw pile,
/// the visible pile (at most five face-up cards), and the discard pile.
///
/// Cards are never created nor destroyed once minted, they only move between
/// these piles and the players' hands.
#[derive(Debug)]
pub struct CardSupply {
    /// The top of the pile is the last element.
    draw_pile: Vec<WagonColor>,
    visible_pile: SmallVec<[WagonColor; NUM_VISIBLE_WAGON_CARDS]>,
    discard_pile: Vec<WagonColor>,
    rng: StdRng,
}

impl CardSupply {
    /// Mints the 110 wagon cards (12 of each base color, 14 locomotives) and shuffles them
    /// into the draw pile. The visible pile starts empty, see [`CardSupply::fill_visible`].
    ///
    /// # Example
    /// ```
    /// use rails::card::CardSupply;
    /// use rand::SeedableRng;
    ///
    /// let supply = CardSupply::new(rand::rngs::StdRng::seed_from_u64(1));
    /// assert_eq!(supply.draw_count(), 110);
    /// ```
    pub fn new(mut rng: StdRng) -> Self {
        let mut draw_pile = Vec::with_capacity(NUM_WAGON_CARDS);

        for color in WagonColor::iter() {
            let num_cards_per_color = if color.is_locomotive() {
                NUM_LOCOMOTIVE_CARDS
            } else {
                NUM_BASE_COLOR_CARDS
            };
            draw_pile.extend(repeat(color).take(num_cards_per_color));
        }

        draw_pile.shuffle(&mut rng);

        Self {
            draw_pile,
            visible_pile: SmallVec::new(),
            discard_pile: Vec::new(),
            rng,
        }
    }

    /// Builds a supply from explicit piles. The last card of `draw_pile` is its top.
    pub fn with_piles(
        draw_pile: Vec<WagonColor>,
        visible_pile: &[WagonColor],
        discard_pile: Vec<WagonColor>,
        rng: StdRng,
    ) -> Self {
        Self {
            draw_pile,
            visible_pile: SmallVec::from_slice(visible_pile),
            discard_pile,
            rng,
        }
    }

    /// Draws the top card of the draw pile.
    ///
    /// If the draw pile is empty, the whole discard pile is shuffled and becomes the new draw pile
    /// first. Returns `None` if both are empty: the caller must treat this as a normal game state.
    pub fn draw(&mut self) -> Option<WagonColor> {
        if self.draw_pile.is_empty() {
            if self.discard_pile.is_empty() {
                return None;
            }

            self.reshuffle_discard_pile();
        }

        self.draw_pile.pop()
    }

    fn reshuffle_discard_pile(&mut self) {
        log::debug!(
            "reshuffling {} discarded wagon cards into the draw pile",
            self.discard_pile.len()
        );

        std::mem::swap(&mut self.draw_pile, &mut self.discard_pile);
        self.draw_pile.shuffle(&mut self.rng);
    }

    /// Adds the given card to the discard pile.
    ///
    /// If there is nothing left to draw from (draw and discard piles are both empty) and the
    /// visible pile is not full, the card goes straight into the visible pile instead.
    pub fn discard(&mut self, card: WagonColor) {
        if self.draw_pile.is_empty()
            && self.discard_pile.is_empty()
            && self.visible_pile.len() < NUM_VISIBLE_WAGON_CARDS
        {
            self.visible_pile.push(card);
        } else {
            self.discard_pile.push(card);
        }
    }

    /// Takes one card of the given color from the visible pile, and replaces it with the top of
    /// the draw pile (if any).
    ///
    /// If the visible pile then shows three locomotives or more while the supply holds two plain
    /// cards or fewer, it is redealt, see [`CardSupply::fill_visible`].
    ///
    /// Returns the card taken as well as whether the visible pile had to be redealt.
    /// If no such card is visible, returns an `Err` and leaves the piles untouched.
    pub fn take_visible(&mut self, card: WagonColor) -> Result<(WagonColor, bool), String> {
        let index = self
            .visible_pile
            .iter()
            .position(|visible_card| *visible_card == card)
            .ok_or_else(|| format!("There is no {} wagon card in the visible pile.", card))?;

        let taken = self.visible_pile.remove(index);

        if let Some(replacement) = self.draw() {
            self.visible_pile.push(replacement);
        }

        Ok((taken, self.settle_visible_pile()))
    }

    /// Tops up the visible pile to five cards (or what is left), then redeals it for as long as it
    /// is saturated: three locomotives or more are visible, and the draw, discard and visible piles
    /// hold two plain cards or fewer between them.
    ///
    /// Returns whether a redeal happened.
    pub fn fill_visible(&mut self) -> bool {
        self.top_up_visible_pile();
        self.settle_visible_pile()
    }

    fn top_up_visible_pile(&mut self) {
        while self.visible_pile.len() < NUM_VISIBLE_WAGON_CARDS {
            match self.draw() {
                Some(card) => self.visible_pile.push(card),
                None => break,
            }
        }
    }

    fn settle_visible_pile(&mut self) -> bool {
        // A supply dominated by locomotives may never produce a clean visible pile.
        // Cycling through every card once is the most we try.
        let max_redeals = self.len().max(1);
        let mut num_redeals = 0;

        while self.is_saturated() && num_redeals < max_redeals {
            // Nothing outside the visible pile: a redeal would bring back the same cards.
            if self.draw_pile.is_empty() && self.discard_pile.is_empty() {
                break;
            }

            self.discard_pile.extend(self.visible_pile.drain(..));
            self.top_up_visible_pile();
            num_redeals += 1;
        }

        if num_redeals > 0 {
            log::debug!(
                "redealt the visible pile {} time(s), it now shows {:?}",
                num_redeals,
                self.visible_pile
            );
        }

        num_redeals > 0
    }

    /// Whether the visible pile has to be redealt.
    fn is_saturated(&self) -> bool {
        self.num_visible_locomotives() >= LOCOMOTIVE_LIMIT
            && self.len() - self.count(WagonColor::Locomotive) <= MAX_DILUTING_CARDS
    }

    #[inline]
    fn num_visible_locomotives(&self) -> usize {
        self.visible_pile
            .iter()
            .filter(|card| card.is_locomotive())
            .count()
    }

    /// Whether a blind draw can currently yield a card.
    #[inline]
    pub fn can_draw(&self) -> bool {
        !self.draw_pile.is_empty() || !self.discard_pile.is_empty()
    }

    /// Total number of cards held by the supply, across all three piles.
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.visible_pile.len() + self.discard_pile.len()
    }

    /// Whether all three piles are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many cards of the given color the supply holds, across all three piles.
    pub fn count(&self, color: WagonColor) -> usize {
        self.draw_pile
            .iter()
            .chain(self.visible_pile.iter())
            .chain(self.discard_pile.iter())
            .filter(|card| **card == color)
            .count()
    }

    #[inline]
    pub fn draw_count(&self) -> usize {
        self.draw_pile.len()
    }

    #[inline]
    pub fn draw_pile(&self) -> &[WagonColor] {
        &self.draw_pile
    }

    #[inline]
    pub fn visible_pile(&self) -> &[WagonColor] {
        &self.visible_pile
    }

    #[inline]
    pub fn discard_pile(&self) -> &[WagonColor] {
        &self.discard_pile
    }
}
