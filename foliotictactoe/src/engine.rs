//! Tic-tac-toe rules, minimax search and the game state machine.
//!
//! `O` is the maximizing side. A terminal position scores `10 - depth` for
//! an `O` win, `depth - 10` for an `X` win and `0` for a draw, where depth
//! counts moves made since the decision point. Shallower wins and deeper
//! losses are therefore preferred.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opposite(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Mark),
    Draw,
    InProgress,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }
}

/// Row, column and diagonal triples, in this fixed order.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3×3 grid stored row-major.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board(pub [Option<Mark>; 9]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.0.get(index).copied().flatten()
    }

    /// Copy of the board with `mark` placed at `index`.
    pub fn with(mut self, index: usize, mark: Mark) -> Self {
        self.0[index] = Some(mark);
        self
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Empty cell indices in ascending order.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.0[i].is_none()).collect()
    }

    pub fn outcome(&self) -> Outcome {
        for [a, b, c] in WINNING_LINES {
            if let Some(mark) = self.0[a] {
                if self.0[b] == Some(mark) && self.0[c] == Some(mark) {
                    return Outcome::Winner(mark);
                }
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

/// Value of `board` with `O` maximizing, `maximizing` telling whose turn it is.
pub fn minimax(board: Board, depth: i32, maximizing: bool) -> i32 {
    match board.outcome() {
        Outcome::Winner(Mark::O) => return 10 - depth,
        Outcome::Winner(Mark::X) => return depth - 10,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let moves = board.available_moves();
    if maximizing {
        moves
            .into_iter()
            .map(|i| minimax(board.with(i, Mark::O), depth + 1, false))
            .max()
            .unwrap_or(0)
    } else {
        moves
            .into_iter()
            .map(|i| minimax(board.with(i, Mark::X), depth + 1, true))
            .min()
            .unwrap_or(0)
    }
}

/// Best cell for `O`. Ties go to the lowest index. `None` on a full board.
pub fn best_move(board: Board) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for index in board.available_moves() {
        let score = minimax(board.with(index, Mark::O), 0, false);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    TwoPlayer,
    VsAi,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
    pub draws: u32,
}

impl Scores {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Winner(Mark::X) => self.x += 1,
            Outcome::Winner(Mark::O) => self.o += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

/// One session: the board, whose turn it is, and the running tally.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: Mark,
    mode: Mode,
    outcome: Outcome,
    scores: Scores,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Mode::TwoPlayer)
    }
}

impl Game {
    pub fn new(mode: Mode) -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            mode,
            outcome: Outcome::InProgress,
            scores: Scores::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Mark {
        self.current
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<Mark> {
        match self.outcome {
            Outcome::Winner(mark) => Some(mark),
            _ => None,
        }
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// The computer owes a move.
    pub fn awaiting_ai(&self) -> bool {
        self.mode == Mode::VsAi && self.current == Mark::O && !self.outcome.is_over()
    }

    /// Whether a human click on `index` would be accepted.
    pub fn can_play(&self, index: usize) -> bool {
        index < 9 && self.board.get(index).is_none() && !self.outcome.is_over() && !self.awaiting_ai()
    }

    /// Place the current mark. Returns false when the click is ignored.
    pub fn play(&mut self, index: usize) -> bool {
        if !self.can_play(index) {
            return false;
        }
        self.place(index);
        true
    }

    /// Let the computer answer. Returns the chosen cell.
    pub fn ai_move(&mut self) -> Option<usize> {
        if !self.awaiting_ai() {
            return None;
        }
        let index = best_move(self.board)?;
        self.place(index);
        Some(index)
    }

    fn place(&mut self, index: usize) {
        self.board = self.board.with(index, self.current);
        self.outcome = self.board.outcome();
        if self.outcome.is_over() {
            self.scores.record(self.outcome);
            tracing::debug!(event = "tictactoe.game.finished", outcome = ?self.outcome);
        } else {
            self.current = self.current.opposite();
        }
    }

    /// Clear the board. Scores survive.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current = Mark::X;
        self.outcome = Outcome::InProgress;
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
    }

    /// Switching mode always starts a fresh board.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.reset();
    }

    pub fn status_text(&self) -> String {
        match self.outcome {
            Outcome::Draw => "It's a draw!".to_string(),
            Outcome::Winner(mark) => format!("Player {} wins!", mark.symbol()),
            Outcome::InProgress => match (self.mode, self.current) {
                (Mode::VsAi, Mark::X) => "Your turn (X)".to_string(),
                (Mode::VsAi, Mark::O) => "AI thinking...".to_string(),
                (Mode::TwoPlayer, mark) => format!("Player {}'s turn", mark.symbol()),
            },
        }
    }
}
