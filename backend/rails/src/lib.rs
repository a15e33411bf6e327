//! Authoritative game-state engine for a Ticket to Ride style game, played on the Europe map.
//!
//! A [`host::GameHandle`] runs one [`engine::GameEngine`] per game on its own thread. Players
//! submit free-form action tokens through an [`channel::ActionSender`], and the engine publishes
//! a full [`snapshot::Snapshot`] of the game whenever it waits for one of them.

#[macro_use]
extern crate smallvec;

pub mod board;
pub mod card;
pub mod channel;
pub mod city;
pub mod config;
pub mod destination;
pub mod engine;
pub mod error;
pub mod europe;
pub mod host;
pub mod phase;
pub mod player;
pub mod snapshot;
mod turn;
