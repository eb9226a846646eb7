use thiserror::Error;

use crate::catalog::Position;
use crate::plan::Chip;

/// Why a transfer could not be added or removed. Every rejection leaves the
/// input plan untouched; callers surface the message to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("gameweek {0} is not part of this plan")]
    UnknownGameweek(u32),

    #[error("player {player} is already transferred out in gameweek {gameweek}")]
    DuplicateOut { player: u32, gameweek: u32 },

    #[error("player {player} is already transferred in in gameweek {gameweek}")]
    DuplicateIn { player: u32, gameweek: u32 },

    #[error("player {player} is not in the squad going into gameweek {gameweek}")]
    NotInSquad { player: u32, gameweek: u32 },

    #[error("player {0} is not in the catalog")]
    UnknownPlayer(u32),

    #[error("insufficient funds: short by {shortfall} after the swap")]
    InsufficientFunds { shortfall: i32 },

    #[error("cannot replace a {out_pos} with a {in_pos}")]
    PositionMismatch { out_pos: Position, in_pos: Position },

    #[error("transfer would break squad rules: {0}")]
    InvalidSquad(String),

    #[error("no transfer at index {index} in gameweek {gameweek}")]
    IndexOutOfRange { gameweek: u32, index: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChipError {
    #[error("gameweek {0} is not part of this plan")]
    UnknownGameweek(u32),

    #[error("{0} has already been used this season")]
    AlreadyUsed(Chip),

    #[error("{chip} is already planned for gameweek {gameweek}")]
    AlreadyPlanned { chip: Chip, gameweek: u32 },
}

/// Session-level failures wrap the operation errors and add plan lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("no plan with id {0}")]
    PlanNotFound(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Chip(#[from] ChipError),
}
