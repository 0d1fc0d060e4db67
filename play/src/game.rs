//! Interactive game loop: a human (Red) against the engine (Yellow).
//!
//! Input is read a line at a time so the session can be driven by a
//! terminal or by a scripted reader in tests.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use engine_core::{GameState, Player};
use games_connect4::Connect4;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::difficulty::Difficulty;

/// Why a single game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GameEnd {
    Exit,
    Restart,
    ChangeDifficulty,
}

/// Board dimensions for every game in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub rows: usize,
    pub cols: usize,
    pub connect_n: usize,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    board: BoardSize,
    difficulty: Difficulty,
    rng: ChaCha20Rng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        output: W,
        board: BoardSize,
        difficulty: Difficulty,
        rng: ChaCha20Rng,
    ) -> Self {
        Self {
            input,
            output,
            board,
            difficulty,
            rng,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Play games until the player exits or input runs out.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Welcome to Monte Carlo tree search Connect {}!",
            self.board.connect_n
        )?;

        loop {
            match self.play_one_game()? {
                GameEnd::Restart => continue,
                GameEnd::ChangeDifficulty => {
                    if !self.prompt_difficulty()? {
                        break;
                    }
                }
                GameEnd::Exit => break,
            }
        }

        writeln!(self.output, "Gameplay terminated.")?;
        self.output.flush()?;
        Ok(())
    }

    fn play_one_game(&mut self) -> Result<GameEnd> {
        let BoardSize {
            rows,
            cols,
            connect_n,
        } = self.board;
        let mut state = Connect4::with_dimensions(rows, cols, connect_n)?;
        let mut red_move = None;
        let mut yellow_move = None;
        let mut notice: Option<String> = None;

        info!(rows, cols, connect_n, difficulty = %self.difficulty, "New game");

        while !state.is_terminal() {
            self.display(&state, red_move, yellow_move)?;
            if let Some(message) = notice.take() {
                writeln!(self.output, "{message}")?;
            }
            write!(self.output, "\n\tMove: ")?;
            self.output.flush()?;

            let Some(key) = self.read_line()? else {
                return Ok(GameEnd::Exit);
            };

            let column = match key.as_str() {
                "x" => return Ok(GameEnd::Exit),
                "r" => return Ok(GameEnd::Restart),
                "d" => return Ok(GameEnd::ChangeDifficulty),
                "" => continue,
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 && state.is_playable(n - 1) => n - 1,
                    _ => {
                        notice = Some(format!("\t'{other}' is not a playable column."));
                        continue;
                    }
                },
            };

            state.drop_piece(column)?;
            red_move = Some(column + 1);
            debug!(column = column + 1, "Red moved");

            if state.is_terminal() {
                break;
            }

            let config = self.difficulty.to_mcts_config();
            let result = mcts::run_mcts(&state, &config, &mut self.rng)
                .context("engine search failed")?;
            info!(
                column = result.action.column() + 1,
                iterations = result.iterations,
                value = result.value,
                elapsed_ms = result.elapsed.as_millis() as u64,
                "Yellow moved"
            );

            state.drop_piece(result.action.column())?;
            yellow_move = Some(result.action.column() + 1);
        }

        self.display(&state, red_move, yellow_move)?;
        let verdict = match state.winner() {
            Some(Player::Red) => "Red wins!",
            Some(Player::Yellow) => "Yellow wins!",
            None => "Tie!",
        };
        info!(verdict, moves = state.moves_played(), "Game over");
        writeln!(self.output, "\n\t{verdict}")?;
        writeln!(self.output, "\n\tPress Enter to start a new game...")?;
        self.output.flush()?;

        match self.read_line()? {
            Some(_) => Ok(GameEnd::Restart),
            None => Ok(GameEnd::Exit),
        }
    }

    /// Ask for a new difficulty until a valid one is entered.
    ///
    /// Returns `false` if input ran out first.
    fn prompt_difficulty(&mut self) -> Result<bool> {
        writeln!(self.output, "\nAI DIFFICULTY:\n")?;
        writeln!(
            self.output,
            "Enter a positive integer number of iterations per move (e.g. 100),"
        )?;
        writeln!(
            self.output,
            "or a positive integer number of milliseconds the AI spends thinking per move (e.g. 5ms)."
        )?;

        loop {
            write!(self.output, "\nLimit: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            if line.is_empty() {
                continue;
            }

            match line.parse::<Difficulty>() {
                Ok(difficulty) => {
                    info!(%difficulty, "Difficulty changed");
                    self.difficulty = difficulty;
                    return Ok(true);
                }
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn display(
        &mut self,
        state: &Connect4,
        red_move: Option<usize>,
        yellow_move: Option<usize>,
    ) -> Result<()> {
        let out = &mut self.output;
        writeln!(out, "\nCONTROLS:\n")?;
        writeln!(out, "Press \"x\" to exit.")?;
        writeln!(out, "Press \"r\" to restart the game with the same settings.")?;
        writeln!(out, "Press \"d\" to adjust the difficulty of the AI.")?;
        writeln!(out, "Press the number of a playable column to make a move.")?;
        writeln!(out, "\nAI level: {}.\n", self.difficulty.describe())?;
        write!(out, "{state}")?;
        writeln!(
            out,
            "\tRed Move: {}\tYellow Move: {}",
            format_move(red_move),
            format_move(yellow_move)
        )?;
        Ok(())
    }

    /// Next trimmed input line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn format_move(column: Option<usize>) -> String {
    column.map_or_else(|| "-".to_string(), |c| c.to_string())
}
