use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use fox_hounds_ai::{board::CellState, manager::GameManager, strategy::Difficulty, BOARD_SIZE};

/// A line typed at the prompt
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Input {
    Move(i32, i32),
    New,
    Difficulty(Difficulty),
    Help,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["new"] => Ok(Input::New),
            ["quit"] | ["exit"] => Ok(Input::Quit),
            ["help"] | ["?"] => Ok(Input::Help),
            ["difficulty", level] => Ok(Input::Difficulty(level.parse()?)),
            [row, col] => {
                let row = row
                    .parse::<i32>()
                    .map_err(|_| anyhow!("Invalid row: {}", row))?;
                let col = col
                    .parse::<i32>()
                    .map_err(|_| anyhow!("Invalid column: {}", col))?;
                Ok(Input::Move(row, col))
            }
            [] => Err(anyhow!("Enter a move as 'row col', or 'help'")),
            _ => Err(anyhow!("Unknown command: {}", line.trim())),
        }
    }
}

pub const HELP: &str = "Commands:
  <row> <col>         move the fox to that cell
  new                 start a new game
  difficulty <level>  easy, medium or hard
  quit                leave the game";

/// Draws the board with the Fox's legal destinations highlighted
pub fn display(game: &GameManager) -> Result<()> {
    let mut stdout = stdout();
    let board = game.board();
    let highlights = game.fox_moves();

    let cols: String = (0..BOARD_SIZE).map(|col| format!("{:>2}", col)).collect();
    stdout.queue(PrintStyledContent(style(format!("  {}\n", cols))))?;

    for row in 0..BOARD_SIZE as i32 {
        stdout.queue(PrintStyledContent(style(format!("{:>2}", row))))?;
        for col in 0..BOARD_SIZE as i32 {
            let highlighted = highlights.contains(&(row, col));
            let (symbol, colour) = match board.cell_state(row, col) {
                CellState::Fox => (" F", Color::Red),
                CellState::Hound => (" H", Color::White),
                CellState::Empty if highlighted => (" *", Color::Black),
                CellState::Empty => ("  ", Color::Black),
            };
            let background = if highlighted {
                Color::DarkYellow
            } else if (row + col) % 2 == 1 {
                Color::DarkGrey
            } else {
                Color::Grey
            };

            stdout.queue(PrintStyledContent(
                style(symbol)
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(colour),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    stdout.queue(PrintStyledContent(
        style(format!(
            "[{}] {}\n",
            game.difficulty(),
            game.game_state().status_message()
        ))
        .attribute(Attribute::Bold),
    ))?;
    stdout.flush()?;
    Ok(())
}
