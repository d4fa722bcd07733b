// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate pest_derive;

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod movegen;
pub mod moves;
mod perft;
pub mod piece;
pub mod player;
pub mod save;
pub mod session;
pub mod setup;
pub mod space;
pub mod types;

pub use board::Board;
pub use config::Config;
pub use engine::{all_legal_moves, legal_moves, Engine, Notification, Notifications};
pub use error::{
    BoardError, BuildError, DiagramError, LoadError, MoveError, SaveError, SelectionError,
    TurnError,
};
pub use moves::MoveRecord;
pub use perft::perft;
pub use piece::Piece;
pub use player::Player;
pub use session::Session;
pub use setup::{BoardBuilder, GameMode};
pub use space::{Space, Tiles};
pub use types::{Cardinal, Direction, PieceId, PieceKind, Reach, SpaceId, Team};
