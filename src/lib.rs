//! City economy rules for a turn-based strategy game
//!
//! Converts the tiles a city works into food, shields and trade, takes off
//! unit upkeep, waste and corruption, and decides which tiles a city works as
//! it grows and shrinks.

pub mod city;
pub mod core;
pub mod entity;
pub mod rules;
pub mod simulation;
pub mod world;
