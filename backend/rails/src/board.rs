use crate::card::WagonColor;
use crate::city::{City, CityToCity};
use crate::destination::Destination;
use crate::europe;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// A claimable connection between two adjacent cities.
///
/// There can be two "parallel" routes between the same cities, which are told apart by their name.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Unique on a board, e.g. `Paris - Bruxelles`, or `Paris - Bruxelles (2)` for its twin.
    pub name: String,
    pub cities: CityToCity,
    /// The color of cards needed to claim the route. `None` means any single color matches.
    pub color: Option<WagonColor>,
    /// How many cards and wagons are needed to claim the route.
    pub length: u8,
    /// Index of the player who claimed the route, if any. Set at most once.
    pub owner: Option<usize>,
}

impl Route {
    /// Returns an unclaimed route. It is named once added to a [`Board`].
    pub fn new(cities: CityToCity, color: Option<WagonColor>, length: u8) -> Self {
        Self {
            name: String::new(),
            cities,
            color,
            length,
            owner: None,
        }
    }

    /// Whether both routes connect the same two cities, in either direction.
    fn is_parallel_to(&self, other: &Route) -> bool {
        let (start, end) = self.cities;
        other.cities == (start, end) || other.cities == (end, start)
    }
}

/// The authoritative state of the board, per game.
/// Routes are claimed as the game goes on, and a claim is final.
#[derive(Clone, Debug)]
pub struct Board {
    routes: Vec<Route>,
    /// With few players, only one of two parallel routes may ever be claimed.
    /// In all cases, parallel routes cannot be claimed by the same player.
    parallel_routes_allowed: bool,
}

impl Board {
    /// Builds a board out of the given routes, naming each of them after its cities.
    ///
    /// # Example
    /// ```
    /// use rails::board::{Board, Route};
    /// use rails::city::City;
    ///
    /// let board = Board::new(vec![
    ///     Route::new((City::Paris, City::Bruxelles), None, 2),
    ///     Route::new((City::Paris, City::Bruxelles), None, 2),
    /// ]);
    /// assert!(board.route("Paris - Bruxelles").is_some());
    /// assert!(board.route("Paris - Bruxelles (2)").is_some());
    /// ```
    pub fn new(mut routes: Vec<Route>) -> Self {
        let mut occurrences: HashMap<String, usize> = HashMap::new();

        for route in &mut routes {
            let (start, end) = route.cities;
            let base_name = format!("{} - {}", start, end);
            let occurrence = occurrences.entry(base_name.clone()).or_insert(0);
            *occurrence += 1;

            route.name = if *occurrence == 1 {
                base_name
            } else {
                format!("{} ({})", base_name, occurrence)
            };
            route.owner = None;
        }

        Self {
            routes,
            parallel_routes_allowed: true,
        }
    }

    /// The board of the Europe map.
    pub fn europe() -> Self {
        Self::new(europe::routes())
    }

    /// Depending on the number of players, parallel routes may or may not be claimed simultaneously.
    pub fn set_parallel_routes_allowed(&mut self, allowed: bool) {
        self.parallel_routes_allowed = allowed;
    }

    /// Every city touched by at least one route, sorted.
    pub fn locations(&self) -> Vec<City> {
        self.routes
            .iter()
            .flat_map(|route| [route.cities.0, route.cities.1])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds a route by its unique name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }

    fn index_of(&self, name: &str) -> Result<usize, String> {
        self.routes
            .iter()
            .position(|route| route.name == name)
            .ok_or_else(|| format!("There is no route named {}.", name))
    }

    /// Verifies whether the player is allowed to claim the route on the board.
    /// This does not look at the player's cards nor wagons.
    pub fn can_claim(&self, name: &str, player: usize) -> Result<&Route, String> {
        let route = &self.routes[self.index_of(name)?];

        if let Some(owner) = route.owner {
            return Err(if owner == player {
                format!("You have already claimed {}.", route.name)
            } else {
                format!("{} has already been claimed by another player.", route.name)
            });
        }

        for twin in self
            .routes
            .iter()
            .filter(|other| other.name != route.name && route.is_parallel_to(other))
        {
            match twin.owner {
                Some(owner) if owner == player => {
                    return Err(format!(
                        "Cannot claim {}, since you already own its parallel route {}.",
                        route.name, twin.name
                    ));
                }
                Some(_) if !self.parallel_routes_allowed => {
                    return Err(format!(
                        "Cannot claim {}, since its parallel route {} is claimed and there are not enough players to open both.",
                        route.name, twin.name
                    ));
                }
                _ => {}
            }
        }

        Ok(route)
    }

    /// Claims the route for the player, if allowed by [`Board::can_claim`].
    pub fn claim(&mut self, name: &str, player: usize) -> Result<&Route, String> {
        self.can_claim(name, player)?;

        let index = self.index_of(name)?;
        let route = &mut self.routes[index];
        route.owner = Some(player);

        Ok(route)
    }

    /// Routes still open to the player, ignoring their cards, that fit within `wagons`.
    pub fn claimable_by(&self, player: usize, wagons: u8) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |route| {
            route.length <= wagons && self.can_claim(&route.name, player).is_ok()
        })
    }

    pub fn routes_owned_by(&self, player: usize) -> impl Iterator<Item = &Route> {
        self.routes
            .iter()
            .filter(move |route| route.owner == Some(player))
    }
}

/// Everything a game is played on: the board and the destinations to deal.
#[derive(Clone, Debug)]
pub struct GameMap {
    pub board: Board,
    pub short_destinations: Vec<Destination>,
    pub long_destinations: Vec<Destination>,
}

impl GameMap {
    /// The Europe map, with its 101 routes, 40 short and 6 long destinations.
    pub fn europe() -> Self {
        Self {
            board: Board::europe(),
            short_destinations: europe::short_destinations(),
            long_destinations: europe::long_destinations(),
        }
    }
}
