#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod alliance;
pub mod board;
pub mod coord;
pub mod moves;
pub mod piece;
pub mod player;
pub mod square;
