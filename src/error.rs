use thiserror::Error;

use crate::puzzle::Move;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("illegal move {mv} with blank at position {blank}")]
    IllegalMove { mv: Move, blank: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
