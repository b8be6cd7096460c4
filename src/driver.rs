use crate::game_state::{Color, GameState, Move};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::io::{self, BufRead, Write};
use tracing::{info, instrument, warn};

/// Settings of a terminal game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayConfig {
    /// Side played by the random computer player, if any.
    pub computer: Option<Color>,
    pub seed: u64,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self { computer: None, seed: 42 }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Terminal game loop: shows the board, reads moves in coordinate notation and
/// applies them to the game.
pub struct Driver<R, W> {
    state: GameState,
    config: PlayConfig,
    rng: Pcg64,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(state: GameState, config: PlayConfig, input: R, output: W) -> Self {
        Self {
            state,
            config,
            rng: Pcg64::seed_from_u64(config.seed),
            input,
            output,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Runs until `quit` or the end of the input.
    #[instrument(skip(self), fields(computer = ?self.config.computer))]
    pub fn run(&mut self) -> io::Result<()> {
        info!("starting game");
        self.play_computer_move()?;
        self.show_board()?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            if let Flow::Quit = self.handle_command(command)? {
                break;
            }
        }

        info!(moves = self.state.move_log().len(), "game loop finished");
        Ok(())
    }

    fn handle_command(&mut self, command: &str) -> io::Result<Flow> {
        match command {
            "quit" | "exit" => return Ok(Flow::Quit),
            "undo" | "u" => self.undo()?,
            "moves" => self.list_moves()?,
            "board" | "d" => self.show_board()?,
            "fen" => writeln!(self.output, "{}", self.state.to_fen())?,
            "help" => self.help()?,
            text => match self.state.find_algebraic_move(text) {
                Ok(mv) => {
                    self.apply(mv)?;
                    self.play_computer_move()?;
                    self.show_board()?;
                }
                Err(e) => {
                    warn!(input = text, error = %e, "rejected input");
                    writeln!(self.output, "{}", e)?;
                }
            },
        }
        Ok(Flow::Continue)
    }

    fn apply(&mut self, mv: Move) -> io::Result<()> {
        let color = self.state.active_color();
        if let Err(e) = self.state.make_move(mv) {
            // Generated moves always match the board
            warn!(error = %e, "generated move rejected");
            return writeln!(self.output, "{}", e);
        }
        info!(%color, mv = %mv, "move played");
        writeln!(self.output, "{} plays {}", color, mv)
    }

    fn play_computer_move(&mut self) -> io::Result<()> {
        if self.config.computer != Some(self.state.active_color()) {
            return Ok(());
        }
        let moves = self.state.valid_moves();
        match moves.choose(&mut self.rng) {
            Some(&mv) => self.apply(mv),
            None => writeln!(self.output, "No moves available for {}", self.state.active_color()),
        }
    }

    /// Takes back one move, and the computer's reply as well so the human is to move again.
    ///
    /// When only the computer's opening move was on the log, the computer plays a new one.
    fn undo(&mut self) -> io::Result<()> {
        match self.state.undo_move() {
            Some(mv) => {
                writeln!(self.output, "Took back {}", mv)?;
                if self.config.computer == Some(self.state.active_color()) {
                    if let Some(mv) = self.state.undo_move() {
                        writeln!(self.output, "Took back {}", mv)?;
                    }
                }
                self.play_computer_move()?;
                self.show_board()
            }
            None => writeln!(self.output, "Nothing to undo"),
        }
    }

    fn list_moves(&mut self) -> io::Result<()> {
        let moves: Vec<String> = self.state.valid_moves().iter().map(|m| m.as_algebraic()).collect();
        if moves.is_empty() {
            writeln!(self.output, "No moves available for {}", self.state.active_color())
        } else {
            writeln!(self.output, "{}", moves.join(" "))
        }
    }

    fn show_board(&mut self) -> io::Result<()> {
        write!(self.output, "{}", self.state.render_to_string())
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.output, "{} to move> ", self.state.active_color())?;
        self.output.flush()
    }

    fn help(&mut self) -> io::Result<()> {
        writeln!(self.output, "Enter a move like e2e4, or one of: undo, moves, board, fen, help, quit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(script: &str, config: PlayConfig) -> (GameState, String) {
        let mut output = Vec::new();
        let mut driver = Driver::new(GameState::new(), config, Cursor::new(script.as_bytes()), &mut output);
        driver.run().unwrap();
        let state = driver.into_state();
        (state, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_moves_and_undo() {
        let (state, output) = play("e2e4\ne7e5\nundo\nquit\n", PlayConfig::default());
        assert_eq!(state.move_log().len(), 1);
        assert_eq!(state.active_color(), Color::Black);
        assert!(output.contains("white plays e2e4"));
        assert!(output.contains("black plays e7e5"));
        assert!(output.contains("Took back e7e5"));
    }

    #[test]
    fn test_rejects_invalid_input() {
        let (state, output) = play("e2e5\nxyz\ne7e5\nhello\n", PlayConfig::default());
        assert_eq!(state, GameState::new());
        assert!(output.contains("invalid move e2e5"));
        assert!(output.contains("invalid move xyz"));
        assert!(output.contains("invalid move e7e5"));
    }

    #[test]
    fn test_undo_on_new_game() {
        let (state, output) = play("undo\n", PlayConfig::default());
        assert_eq!(state, GameState::new());
        assert!(output.contains("Nothing to undo"));
    }

    #[test]
    fn test_stops_at_end_of_input() {
        let (state, _) = play("d2d4\n\n", PlayConfig::default());
        assert_eq!(state.move_log().len(), 1);
    }

    #[test]
    fn test_lists_moves() {
        let (_, output) = play("moves\nquit\n", PlayConfig::default());
        assert!(output.contains("a2a3 a2a4 b2b3 b2b4"));
    }

    #[test]
    fn test_computer_replies() {
        let config = PlayConfig {
            computer: Some(Color::Black),
            seed: 7,
        };
        let (state, output) = play("e2e4\n", config);
        assert_eq!(state.move_log().len(), 2);
        assert_eq!(state.move_log()[1].piece_moved.color, Color::Black);
        assert!(state.white_to_move());
        assert!(output.contains("black plays"));
    }

    #[test]
    fn test_computer_opens_as_white() {
        let config = PlayConfig {
            computer: Some(Color::White),
            seed: 1,
        };
        let (state, _) = play("quit\n", config);
        assert_eq!(state.move_log().len(), 1);
        assert!(!state.white_to_move());
    }

    #[test]
    fn test_undo_against_computer_takes_back_both_moves() {
        let config = PlayConfig {
            computer: Some(Color::Black),
            seed: 3,
        };
        let (state, _) = play("g1f3\nundo\n", config);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_undo_of_computer_opening_keeps_computer_side() {
        let config = PlayConfig {
            computer: Some(Color::White),
            seed: 1,
        };
        let (state, output) = play("undo\ne2e4\nquit\n", config);
        assert!(output.contains("Took back"));
        assert!(output.contains("invalid move e2e4"));
        assert_eq!(state.move_log().len(), 1);
        assert_eq!(state.move_log()[0].piece_moved.color, Color::White);
        assert_eq!(state.active_color(), Color::Black);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = PlayConfig {
            computer: Some(Color::Black),
            seed: 11,
        };
        let (first, _) = play("e2e4\nd2d4\n", config);
        let (second, _) = play("e2e4\nd2d4\n", config);
        assert_eq!(first, second);
    }
}
