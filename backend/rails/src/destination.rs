use crate::city::CityToCity;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Short destinations circulate through the shared pile.
/// Long destinations are only dealt once, during setup.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationLength {
    Short,
    Long,
}

/// Encapsulates information about a destination card.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Destination {
    /// The two cities that must be connected to fulfill the destination.
    pub destination: CityToCity,
    /// How many points are granted once this card is fulfilled.
    pub points: u8,
    pub length: DestinationLength,
}

impl Destination {
    #[inline]
    pub fn is_long(&self) -> bool {
        self.length == DestinationLength::Long
    }
}

/// The label under which a destination is offered to players, e.g. `Paris - Wien (8)`.
impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.destination;
        write!(f, "{} - {} ({})", start, end, self.points)
    }
}

/// Entity in charge of dealing destination cards.
///
/// Short destinations live in a pile that players draw from and return unwanted cards to.
/// Long destinations are kept in a separate pool that is only dealt from during setup,
/// and nothing ever goes back into it.
#[derive(Debug)]
pub struct DestinationSupply {
    /// The top of the pile is the front.
    short_pile: VecDeque<Destination>,
    long_pool: Vec<Destination>,
}

impl DestinationSupply {
    /// Shuffles both piles.
    pub fn new<R: Rng + ?Sized>(
        mut short_pile: Vec<Destination>,
        mut long_pool: Vec<Destination>,
        rng: &mut R,
    ) -> Self {
        short_pile.shuffle(rng);
        long_pool.shuffle(rng);

        Self {
            short_pile: VecDeque::from(short_pile),
            long_pool,
        }
    }

    /// Draws the top short destination, or `None` if the pile is exhausted.
    pub fn draw_short(&mut self) -> Option<Destination> {
        self.short_pile.pop_front()
    }

    /// Removes up to `n` long destinations from the pool, for good.
    ///
    /// Only meant to be called while setting up the game.
    pub fn draw_long(&mut self, n: usize) -> Vec<Destination> {
        let n = n.min(self.long_pool.len());
        self.long_pool.drain(..n).collect()
    }

    /// Puts the declined short destinations at the bottom of the pile.
    ///
    /// Declined long destinations are taken out of the game instead.
    /// Returns how many destinations were taken out of the game.
    pub fn return_unwanted(&mut self, destinations: Vec<Destination>) -> usize {
        let (long, short): (Vec<_>, Vec<_>) = destinations
            .into_iter()
            .partition(|destination| destination.is_long());

        for destination in &long {
            log::debug!("long destination {} leaves the game", destination);
        }

        self.short_pile.extend(short);
        long.len()
    }

    /// How many short destinations are left to draw.
    #[inline]
    pub fn short_count(&self) -> usize {
        self.short_pile.len()
    }

    /// How many long destinations are left to deal.
    #[inline]
    pub fn long_count(&self) -> usize {
        self.long_pool.len()
    }

    /// Accessor to the short destination pile, top first.
    pub fn short_pile(&self) -> &VecDeque<Destination> {
        &self.short_pile
    }

    /// Accessor to the long destination pool, next to be dealt first.
    pub fn long_pool(&self) -> &[Destination] {
        &self.long_pool
    }
}
