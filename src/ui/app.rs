use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info, warn};

use crate::config::UiConfig;
use crate::game::{GameEngine, GameState, MoveError, Player, COLS};

/// Wins and draws across the games of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub red: u32,
    pub yellow: u32,
    pub draws: u32,
}

impl Tally {
    fn record(&mut self, state: GameState) {
        match state {
            GameState::Won(Player::Red) => self.red += 1,
            GameState::Won(Player::Yellow) => self.yellow += 1,
            GameState::Draw => self.draws += 1,
            GameState::Playing => {}
        }
    }
}

pub struct App {
    engine: GameEngine,
    config: UiConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    tally: Tally,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        App {
            engine: GameEngine::new(),
            config,
            selected_column: COLS / 2,
            should_quit: false,
            message: None,
            tally: Tally::default(),
        }
    }

    /// Main application loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.config.tick_rate_ms))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column < COLS - 1 {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Dropping once the game has ended starts the next one, like
                // the click-to-play-again of a mouse-driven board.
                if self.engine.is_terminal() {
                    self.new_game();
                } else {
                    self.drop_marker();
                }
            }
            KeyCode::Char('r') => {
                self.new_game();
            }
            _ => {}
        }
    }

    fn new_game(&mut self) {
        self.engine.new_game();
        self.selected_column = COLS / 2;
        self.message = Some("New game started!".to_string());
        info!("new game started");
    }

    /// Drop a marker in the selected column. All feedback (status message,
    /// tally, bell) is derived from the returned state.
    fn drop_marker(&mut self) {
        let mover = self.engine.turn();
        match self.engine.apply_move(self.selected_column) {
            Ok(result) => {
                debug!(column = self.selected_column, row = result.row, %mover, "move applied");
                match result.state {
                    GameState::Playing => {}
                    GameState::Won(player) => {
                        self.message = Some(format!("{player} wins! Press Enter to play again."));
                        self.tally.record(result.state);
                        self.ring_bell();
                        info!(winner = %player, "game over");
                    }
                    GameState::Draw => {
                        self.message = Some("It's a draw! Press Enter to play again.".to_string());
                        self.tally.record(result.state);
                        self.ring_bell();
                        info!("game over: draw");
                    }
                }
            }
            Err(err @ MoveError::ColumnFull { .. }) => {
                self.message = Some("Column is full! Try another.".to_string());
                warn!(column = self.selected_column, %err, "move rejected");
            }
            Err(err) => {
                // InvalidColumn and GameOver are unreachable from this UI:
                // the selector is clamped and terminal states restart instead.
                self.message = Some(err.to_string());
                warn!(column = self.selected_column, %err, "move rejected");
            }
        }
    }

    fn ring_bell(&self) {
        if self.config.bell {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.engine,
            self.selected_column,
            self.message.as_deref(),
            self.tally,
            self.config.ascii,
        );
    }
}
