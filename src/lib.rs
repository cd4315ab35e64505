//! # Connect Four
//!
//! A two-player Connect Four game for the terminal, built with Ratatui.
//! The game engine is a self-contained state machine with no I/O; the UI
//! layer renders its state and maps key presses to columns.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, engine state machine
//! - [`ui`] — Terminal UI: event loop and board rendering
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
