/// Chess domain types.
pub mod chess;
/// Interactive game sessions.
pub mod game;
/// The rules of chess.
pub mod rules;
