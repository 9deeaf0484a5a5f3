use std::{thread::sleep, time::Duration};

use crossterm::event::{KeyCode, KeyEvent};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::apples::Apples;
use crate::snake::{Cell, Direction, Snake};
use crate::term::TermManager;
use crate::{GridInt, MAX_COLUMNS, MAX_ROWS, WINDOW_WIDTH};

const CHANCE_TO_DROP: GridInt = 2;

const APPLE_CHAR: char = 'O';
const TAIL_CHAR: char = 'o';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Initialization,
    InProgress,
    Pause,
    GameOver,
}

/// What the system-level key handler decided, so the driver knows which
/// overlay or frame to render.
pub enum SystemEvent {
    None,
    Paused,
    Resumed,
    Restarted,
    Quit,
}

pub struct TickOutcome {
    pub grew: bool,
    pub game_over: bool,
    pub score: usize,
}

fn initial_cells() -> Vec<Cell> {
    vec![
        Cell::new(6, 5),
        Cell::new(5, 5),
        Cell::new(4, 5),
        Cell::new(4, 4),
    ]
}

/// The game state machine: snake, apples, lifecycle state and the current
/// tick period. Rendering and input live in the driver, so every transition
/// here is testable without a terminal.
pub struct Game {
    snake: Snake,
    apples: Apples,
    state: GameState,
    tick_period: Duration,
    rng: StdRng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let mut game = Game {
            snake: Snake::new(initial_cells(), Direction::Right),
            apples: Apples::new(CHANCE_TO_DROP),
            state: GameState::Initialization,
            tick_period: Duration::from_millis(0),
            rng,
        };
        game.restart();
        game
    }

    /// Rebuilds the board from the fixed initial layout and moves straight
    /// to IN_PROGRESS. Used at construction and again on every Enter press
    /// after a game over.
    fn restart(&mut self) {
        self.snake = Snake::new(initial_cells(), Direction::Right);
        self.apples = Apples::new(CHANCE_TO_DROP);
        self.tick_period = period_for_score(self.score());
        self.state = GameState::InProgress;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apples(&self) -> &Apples {
        &self.apples
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Score counts every segment, head included.
    pub fn score(&self) -> usize {
        self.snake.tail().len() + 1
    }

    /// Handles the lifecycle keys before the per-tick body runs, whatever
    /// state the game is in: Enter restarts/pauses/resumes depending on the
    /// current state, Escape quits.
    pub fn apply_system_key(&mut self, key: Option<&KeyEvent>) -> SystemEvent {
        let key = match key {
            Some(k) => k,
            None => return SystemEvent::None,
        };

        match key.code {
            KeyCode::Enter => match self.state {
                GameState::GameOver => {
                    self.restart();
                    info!("restarted after game over");
                    SystemEvent::Restarted
                }
                GameState::InProgress => {
                    self.state = GameState::Pause;
                    SystemEvent::Paused
                }
                GameState::Pause => {
                    self.state = GameState::InProgress;
                    SystemEvent::Resumed
                }
                GameState::Initialization => SystemEvent::None,
            },
            KeyCode::Esc => SystemEvent::Quit,
            _ => SystemEvent::None,
        }
    }

    /// One tick of the IN_PROGRESS body: turn, move, eat, maybe drop an
    /// apple, then check for collisions. The tick period is rebuilt from
    /// the score only when the snake grew this tick.
    pub fn advance(&mut self, key: Option<&KeyEvent>) -> TickOutcome {
        self.snake.turn(key.and_then(direction_for));
        self.snake.advance();
        let grew = self.snake.eat(&mut self.apples);
        self.apples.grow(&mut self.rng);

        let score = self.score();
        if grew {
            self.tick_period = period_for_score(score);
        }

        let game_over = is_collision(&self.snake);
        if game_over {
            self.state = GameState::GameOver;
            info!("game over, final score {}", score);
        }

        TickOutcome {
            grew,
            game_over,
            score,
        }
    }
}

fn direction_for(key: &KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// The game ends when the head lands on a tail segment or any part of the
/// body leaves the playable interior.
fn is_collision(snake: &Snake) -> bool {
    let head = snake.head();
    snake.tail().contains(&head)
        || snake
            .cells()
            .iter()
            .any(|c| c.x < 1 || c.x >= MAX_COLUMNS - 1 || c.y < 1 || c.y >= MAX_ROWS)
}

/// Tick period as a step function of score: the longer the snake, the
/// faster the game.
fn period_for_score(score: usize) -> Duration {
    let millis = match score {
        0..=5 => 200,
        6..=10 => 180,
        11..=15 => 160,
        16..=20 => 140,
        _ => 120,
    };
    Duration::from_millis(millis)
}

/// The tick driver: owns the terminal, sleeps for the current period, polls
/// one key, feeds the state machine and renders the result. Returns once
/// Escape is pressed, after restoring the terminal.
pub fn run() -> crossterm::Result<()> {
    let mut term = TermManager::new();
    term.setup()?;

    let mut game = Game::new();
    draw_frame(&mut term, &game)?;

    loop {
        sleep(game.tick_period());

        let key = term.poll_input()?;
        match game.apply_system_key(key.as_ref()) {
            SystemEvent::Quit => break,
            SystemEvent::Paused => draw_pause(&mut term)?,
            SystemEvent::Restarted => draw_frame(&mut term, &game)?,
            SystemEvent::Resumed | SystemEvent::None => {}
        }

        if game.state() != GameState::InProgress {
            continue;
        }

        let outcome = game.advance(key.as_ref());
        draw_frame(&mut term, &game)?;
        if outcome.game_over {
            draw_game_over(&mut term, outcome.score)?;
        }
    }

    term.restore()
}

fn draw_frame(term: &mut TermManager, game: &Game) -> crossterm::Result<()> {
    term.clear()?;

    for apple in game.apples().cells() {
        term.draw_char(apple.x, apple.y, APPLE_CHAR)?;
    }
    for segment in game.snake().tail() {
        term.draw_char(segment.x, segment.y, TAIL_CHAR)?;
    }
    let head = game.snake().head();
    term.draw_char(head.x, head.y, game.snake().head_char())?;

    draw_border(term)?;
    term.flush()
}

fn draw_border(term: &mut TermManager) -> crossterm::Result<()> {
    for x in 0..MAX_COLUMNS {
        term.draw_char(x, 0, '-')?;
        term.draw_char(x, MAX_ROWS - 1, '-')?;
    }
    for y in 0..MAX_ROWS {
        term.draw_char(0, y, '|')?;
        term.draw_char(MAX_COLUMNS - 1, y, '|')?;
    }
    Ok(())
}

fn draw_pause(term: &mut TermManager) -> crossterm::Result<()> {
    draw_centered(term, "Press enter to resume", MAX_ROWS + 2)?;
    term.flush()
}

fn draw_game_over(term: &mut TermManager, score: usize) -> crossterm::Result<()> {
    draw_centered(term, "Game Over!", MAX_ROWS + 1)?;
    draw_centered(term, &format!("Score: {}", score), MAX_ROWS + 2)?;
    draw_centered(term, "Press enter to start", MAX_ROWS + 3)?;
    term.flush()
}

fn draw_centered(term: &mut TermManager, text: &str, y: GridInt) -> crossterm::Result<()> {
    let x = (WINDOW_WIDTH - text.len() as GridInt) / 2;
    term.draw_str(x, y, text)
}
