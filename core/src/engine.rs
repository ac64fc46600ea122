use alloc::string::ToString;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single-player game: the board, its random source and the status
/// display it reports to.
///
/// Everything runs on the caller's thread. Input arrives through
/// [`Minesweeper::on_click`], repaints through [`Minesweeper::render`].
#[derive(Clone, Debug)]
pub struct Minesweeper<S, G = RandomMineGenerator> {
    config: GameConfig,
    board: Board,
    state: EngineState,
    mines_left: CellCount,
    last_status: Status,
    generator: G,
    status: S,
}

impl<S: StatusSink> Minesweeper<S> {
    /// Engine with an OS-seeded mine generator. The first game is dealt
    /// immediately.
    pub fn new(config: GameConfig, status: S) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::from_entropy(), status)
    }

    pub fn with_seed(config: GameConfig, seed: u64, status: S) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(seed), status)
    }
}

impl<S, G> Minesweeper<S, G> {
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn in_game(&self) -> bool {
        self.state.is_playing()
    }

    pub fn mines_left(&self) -> CellCount {
        self.mines_left
    }

    pub fn last_status(&self) -> Status {
        self.last_status
    }

    pub fn status_sink(&self) -> &S {
        &self.status
    }

    pub fn status_sink_mut(&mut self) -> &mut S {
        &mut self.status
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            state: self.state,
            mines_left: self.mines_left,
            cell_size: self.config.cell_size,
        }
    }
}

impl<S: StatusSink, G: MineGenerator> Minesweeper<S, G> {
    pub fn with_generator(config: GameConfig, generator: G, status: S) -> Result<Self> {
        config.validate()?;

        let mut engine = Self {
            config,
            board: Board::new(config.rows, config.columns),
            state: EngineState::Playing,
            mines_left: config.mines,
            last_status: Status::MinesLeft(config.mines),
            generator,
            status,
        };
        engine.new_game();

        let actual = engine.board.mine_count();
        if actual != config.mines {
            return Err(GameError::MineCountMismatch {
                expected: config.mines,
                actual,
            });
        }
        Ok(engine)
    }

    /// Covers the whole board again and buries a fresh set of mines.
    pub fn new_game(&mut self) {
        self.board.reset();
        self.state = EngineState::Playing;
        self.mines_left = self.config.mines;
        self.publish(Status::MinesLeft(self.mines_left));
        self.generator.place_mines(&mut self.board, self.config.mines);

        log::debug!(
            "New game: {}x{} with {} mines",
            self.config.rows,
            self.config.columns,
            self.config.mines
        );
    }

    /// Handles a click at pixel `(x, y)` relative to the board's top-left
    /// corner.
    ///
    /// Once the game has ended the next click only deals a new board.
    pub fn on_click(&mut self, x: Pixel, y: Pixel, button: MouseButton) -> ClickOutcome {
        if !self.state.is_playing() {
            log::trace!("({}, {}) click after game end, dealing a new board", x, y);
            self.new_game();
            return ClickOutcome::Restarted;
        }

        let Some(index) = self.config.cell_at_pixel(x, y) else {
            return ClickOutcome::Ignored;
        };
        log::trace!(
            "({}, {}) {:?} click on cell {:?}",
            x,
            y,
            button,
            self.board.position(index)
        );

        match button {
            MouseButton::Left => self.reveal(index),
            MouseButton::Right => self.toggle_flag(index),
            MouseButton::Other => ClickOutcome::Ignored,
        }
    }

    /// Flags or unflags a covered cell, keeping the mine counter in step.
    pub fn toggle_flag(&mut self, index: CellIndex) -> ClickOutcome {
        use ClickOutcome::*;

        if !self.state.is_playing() {
            return Ignored;
        }
        let Some(cell) = self.board.cell(index) else {
            return Ignored;
        };
        if !cell.is_covered() {
            return Ignored;
        }

        let outcome = if cell.is_flagged() {
            self.board.unflag(index);
            self.mines_left += 1;
            Unflagged
        } else if self.mines_left > 0 {
            self.board.flag(index);
            self.mines_left -= 1;
            Flagged
        } else {
            self.publish(Status::NoMarksLeft);
            return NoMarksLeft;
        };

        log::trace!(
            "{:?} at {:?}, {} marks left",
            outcome,
            self.board.position(index),
            self.mines_left
        );
        self.publish(Status::MinesLeft(self.mines_left));
        outcome
    }

    /// Uncovers a covered, unflagged cell. Hitting a mine ends the game;
    /// an empty cell opens its surrounding region.
    pub fn reveal(&mut self, index: CellIndex) -> ClickOutcome {
        if !self.state.is_playing() {
            return ClickOutcome::Ignored;
        }
        match self.board.reveal(index) {
            Some(cell) if cell.is_mine() => {
                self.state = EngineState::Lost;
                log::debug!("Mine hit at {:?}, game lost", self.board.position(index));
                ClickOutcome::HitMine
            }
            Some(_) => ClickOutcome::Revealed,
            None => ClickOutcome::Ignored,
        }
    }

    /// Draws every cell through `renderer`, then settles and reports the
    /// end of the game.
    ///
    /// An uncovered mine turns the game into a loss before anything is drawn.
    /// A game still in play with no covered safe cell left after the walk is
    /// won.
    pub fn render<R: TileRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if self.state.is_playing() && self.board.has_exploded() {
            self.state = EngineState::Lost;
            log::debug!("Uncovered mine found while drawing, game lost");
        }

        let covered_safe = draw_board(
            &self.board,
            self.state.is_finished(),
            self.config.cell_size,
            renderer,
        );

        match self.state {
            EngineState::Playing if covered_safe == 0 => {
                self.state = EngineState::Won;
                log::debug!("All safe cells uncovered, game won");
                self.publish(Status::Won);
            }
            EngineState::Playing => {}
            EngineState::Won => self.publish(Status::Won),
            EngineState::Lost => self.publish(Status::Lost),
        }
    }

    fn publish(&mut self, status: Status) {
        self.last_status = status;
        self.status.set_text(&status.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    const CELL: Pixel = GameConfig::DEFAULT_CELL_SIZE;

    fn seeded(seed: u64) -> Minesweeper<String> {
        Minesweeper::with_seed(GameConfig::default(), seed, String::new()).unwrap()
    }

    /// 4 x 5 board with a wall of mines down column 2.
    fn walled() -> Minesweeper<Vec<String>, FixedMineGenerator> {
        let config = GameConfig::new(4, 5, 4).unwrap();
        let mines = FixedMineGenerator::new([2, 7, 12, 17]);
        Minesweeper::with_generator(config, mines, Vec::new()).unwrap()
    }

    fn pixel_of<S, G>(engine: &Minesweeper<S, G>, index: CellIndex) -> (Pixel, Pixel) {
        engine.config().tile_origin(engine.board().position(index))
    }

    fn click<S: StatusSink, G: MineGenerator>(
        engine: &mut Minesweeper<S, G>,
        index: CellIndex,
        button: MouseButton,
    ) -> ClickOutcome {
        let (x, y) = pixel_of(engine, index);
        engine.on_click(x, y, button)
    }

    fn tiles<S: StatusSink, G: MineGenerator>(engine: &mut Minesweeper<S, G>) -> Vec<Tile> {
        let mut drawn = Vec::new();
        engine.render(&mut |tile: Tile, _: Pixel, _: Pixel| drawn.push(tile));
        drawn
    }

    fn first_where(board: &Board, predicate: impl Fn(Cell) -> bool) -> CellIndex {
        board.iter().position(predicate).unwrap()
    }

    fn assert_invariants<S, G>(engine: &Minesweeper<S, G>) {
        let board = engine.board();
        assert_eq!(board.mine_count(), engine.config().mines);
        assert_eq!(
            engine.mines_left() + board.flagged_count(),
            engine.config().mines
        );
        for index in 0..board.len() {
            if let Some(count) = board[index].adjacent_mines() {
                assert_eq!(count, board.adjacent_mine_count(index), "cell {index}");
            }
        }
    }

    #[test]
    fn fresh_board_is_fully_covered() {
        let engine = seeded(1);
        let board = engine.board();

        assert_eq!(board.covered_count(), 256);
        assert_eq!(board.covered_safe_count(), 216);
        assert_eq!(
            board.iter().filter(|&cell| cell == Cell::COVERED_MINE).count(),
            40
        );
        assert_eq!(engine.mines_left(), 40);
        assert_eq!(engine.status_sink(), "40");
        assert!(engine.in_game());
        assert_invariants(&engine);
    }

    #[test]
    fn flag_then_unflag_restores_cell() {
        let mut engine = seeded(2);
        let before = engine.board()[0].code();

        assert_eq!(engine.on_click(3, 4, MouseButton::Right), ClickOutcome::Flagged);
        assert_eq!(engine.mines_left(), 39);
        assert_eq!(engine.status_sink(), "39");
        assert_eq!(engine.board()[0].code(), before + 10);
        assert_invariants(&engine);

        assert_eq!(engine.on_click(3, 4, MouseButton::Right), ClickOutcome::Unflagged);
        assert_eq!(engine.mines_left(), 40);
        assert_eq!(engine.status_sink(), "40");
        assert_eq!(engine.board()[0].code(), before);
    }

    #[test]
    fn flagging_stops_when_marks_run_out() {
        let mut engine = seeded(3);
        for index in 0..40 {
            assert_eq!(click(&mut engine, index, MouseButton::Right), ClickOutcome::Flagged);
        }
        assert_eq!(engine.status_sink(), "0");
        let before = engine.board()[40];

        let outcome = click(&mut engine, 40, MouseButton::Right);

        assert_eq!(outcome, ClickOutcome::NoMarksLeft);
        assert!(outcome.needs_repaint());
        assert_eq!(engine.status_sink(), "No marks left");
        assert_eq!(engine.last_status(), Status::NoMarksLeft);
        assert_eq!(engine.board()[40], before);
        assert_eq!(engine.mines_left(), 0);

        // unflagging frees a mark again
        assert_eq!(click(&mut engine, 0, MouseButton::Right), ClickOutcome::Unflagged);
        assert_eq!(engine.status_sink(), "1");
        assert_invariants(&engine);
    }

    #[test]
    fn hitting_a_mine_loses_and_exposes_the_board() {
        let mut engine = seeded(4);
        let wrong = first_where(engine.board(), |cell| cell.is_covered() && !cell.is_mine());
        click(&mut engine, wrong, MouseButton::Right);
        let flagged_mine = first_where(engine.board(), Cell::is_mine);
        click(&mut engine, flagged_mine, MouseButton::Right);
        let mine = first_where(engine.board(), |cell| cell == Cell::COVERED_MINE);

        assert_eq!(click(&mut engine, mine, MouseButton::Left), ClickOutcome::HitMine);
        assert_eq!(engine.board()[mine], Cell::MINE);
        assert!(!engine.in_game());
        assert_eq!(engine.state(), EngineState::Lost);

        let drawn = tiles(&mut engine);

        assert_eq!(engine.status_sink(), "Game lost");
        assert_eq!(drawn[mine], Tile::Mine);
        assert_eq!(drawn[wrong], Tile::WrongMark);
        assert_eq!(drawn[flagged_mine], Tile::Mark);
        for (index, cell) in engine.board().iter().enumerate() {
            if cell == Cell::COVERED_MINE {
                assert_eq!(drawn[index], Tile::Mine, "cell {index}");
            }
        }
        assert_invariants(&engine);
    }

    #[test]
    fn empty_cell_opens_region_up_to_numbered_border() {
        let mut engine = walled();

        assert_eq!(engine.on_click(0, 0, MouseButton::Left), ClickOutcome::Revealed);

        let board = engine.board();
        for row in 0..4 {
            let base = row * 5;
            assert_eq!(board[base], Cell::EMPTY);
            let border = if row % 3 == 0 { 2 } else { 3 };
            assert_eq!(board[base + 1].adjacent_mines(), Some(border));
            assert!(!board[base + 1].is_covered());
            assert_eq!(board[base + 2], Cell::COVERED_MINE);
            assert!(board[base + 3].is_covered());
            assert!(board[base + 4].is_covered());
        }
        assert!(engine.in_game());
    }

    #[test]
    fn uncovering_every_safe_cell_wins_on_next_render() {
        let mut engine = seeded(5);
        let safe: Vec<_> = (0..engine.board().len())
            .filter(|&index| !engine.board()[index].is_mine())
            .collect();
        let (last, rest) = safe.split_last().unwrap();

        for &index in rest {
            engine.reveal(index);
        }
        if engine.board()[*last].is_covered() {
            tiles(&mut engine);
            assert!(engine.in_game(), "one safe cell is still covered");
            engine.reveal(*last);
        }
        assert_eq!(engine.board().covered_count(), 40);
        assert!(engine.in_game());

        tiles(&mut engine);

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.status_sink(), "Game won");

        // later repaints keep the win
        tiles(&mut engine);
        assert_eq!(engine.status_sink(), "Game won");
    }

    #[test]
    fn walled_board_is_won_after_two_clicks() {
        let mut engine = walled();

        engine.on_click(0, 0, MouseButton::Left);
        tiles(&mut engine);
        assert!(engine.in_game());

        engine.on_click(4 * CELL, 0, MouseButton::Left);
        let drawn = tiles(&mut engine);

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.status_sink().last().map(String::as_str), Some("Game won"));
        assert!(drawn.iter().filter(|&&tile| tile == Tile::Cover).count() == 4);
    }

    #[test]
    fn click_after_game_end_only_restarts() {
        let mut engine = walled();
        assert_eq!(engine.on_click(2 * CELL, 0, MouseButton::Left), ClickOutcome::HitMine);

        let outcome = engine.on_click(0, 0, MouseButton::Left);

        assert_eq!(outcome, ClickOutcome::Restarted);
        assert!(outcome.needs_repaint());
        assert!(engine.in_game());
        assert_eq!(engine.board().covered_count(), 20);
        assert_eq!(engine.board().mine_count(), 4);
        assert_eq!(engine.status_sink().last().map(String::as_str), Some("4"));

        // the following click acts on the fresh board
        assert_eq!(engine.on_click(0, 0, MouseButton::Left), ClickOutcome::Revealed);
    }

    #[test]
    fn ignored_clicks_leave_board_untouched() {
        let mut engine = walled();
        let before = engine.board().clone();

        assert_eq!(engine.on_click(5 * CELL, 0, MouseButton::Left), ClickOutcome::Ignored);
        assert_eq!(engine.on_click(0, 4 * CELL, MouseButton::Right), ClickOutcome::Ignored);
        assert_eq!(engine.on_click(0, 0, MouseButton::Other), ClickOutcome::Ignored);
        assert_eq!(engine.board(), &before);

        engine.on_click(0, 0, MouseButton::Left);
        // uncovered cells take neither flags nor clicks
        assert_eq!(engine.on_click(0, 0, MouseButton::Right), ClickOutcome::Ignored);
        assert_eq!(engine.on_click(0, 0, MouseButton::Left), ClickOutcome::Ignored);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut engine = walled();
        let (x, y) = (2 * CELL, 0);
        engine.on_click(x, y, MouseButton::Right);

        assert_eq!(engine.on_click(x, y, MouseButton::Left), ClickOutcome::Ignored);
        assert!(engine.in_game());
        assert_eq!(engine.board()[2], Cell::FLAGGED_MINE);
    }

    #[test]
    fn render_draws_in_game_view() {
        let mut engine = walled();
        engine.on_click(CELL, 0, MouseButton::Right);
        let mut origins = Vec::new();

        engine.render(&mut |tile: Tile, x: Pixel, y: Pixel| origins.push((tile, x, y)));

        assert_eq!(origins.len(), 20);
        assert_eq!(origins[1], (Tile::Mark, CELL, 0));
        assert_eq!(origins[2], (Tile::Cover, 2 * CELL, 0));
        assert_eq!(origins[19], (Tile::Cover, 4 * CELL, 3 * CELL));
        assert!(engine.in_game());
        assert_eq!(engine.status_sink().last().map(String::as_str), Some("3"));
    }

    #[test]
    fn uncovered_mine_found_by_render_loses() {
        let board_codes = [9, 11, 10, 10];
        let mut engine = walled();
        engine.board = Board::from_codes(2, 2, &board_codes).unwrap();
        engine.config = GameConfig::new(2, 2, 1).unwrap();

        let drawn = tiles(&mut engine);

        assert_eq!(engine.state(), EngineState::Lost);
        assert_eq!(engine.last_status(), Status::Lost);
        assert_eq!(drawn[0], Tile::Mine);
    }

    #[test]
    fn snapshot_captures_current_state() {
        let mut engine = walled();
        engine.on_click(0, 0, MouseButton::Left);

        let snapshot = engine.snapshot();
        engine.on_click(4 * CELL, 0, MouseButton::Left);

        assert_eq!(snapshot.state, EngineState::Playing);
        assert_eq!(snapshot.mines_left, 4);
        assert_eq!(snapshot.board.covered_count(), 12);
        assert_ne!(&snapshot.board, engine.board());
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut engine = seeded(6);
        let mut uncovered = Vec::new();

        for step in 0..400u32 {
            let x = (step * 37 + 11) % (16 * CELL);
            let y = (step * 53 + 7) % (16 * CELL);
            let button = if step % 3 == 0 { MouseButton::Right } else { MouseButton::Left };
            let outcome = engine.on_click(x, y, button);
            tiles(&mut engine);

            if outcome == ClickOutcome::Restarted {
                uncovered.clear();
                continue;
            }
            // uncovered cells stay uncovered until the next deal
            for &index in &uncovered {
                assert!(!engine.board()[index].is_covered(), "cell {index} re-covered");
            }
            uncovered = engine
                .board()
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_covered())
                .map(|(index, _)| index)
                .collect();
            assert_invariants(&engine);
        }
    }

    #[test]
    fn rejects_layout_that_disagrees_with_mine_count() {
        let short = Minesweeper::with_generator(
            GameConfig::new(2, 2, 3).unwrap(),
            FixedMineGenerator::new([0]),
            String::new(),
        );
        assert_eq!(
            short.err(),
            Some(GameError::MineCountMismatch {
                expected: 3,
                actual: 1
            })
        );

        let full = Minesweeper::with_generator(
            GameConfig::new(2, 2, 1).unwrap(),
            FixedMineGenerator::new([0, 1, 2, 3]),
            String::new(),
        );
        assert_eq!(
            full.err(),
            Some(GameError::MineCountMismatch {
                expected: 1,
                actual: 4
            })
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked(4, 4, 16);
        let result = Minesweeper::with_seed(config, 0, String::new());

        assert_eq!(result.err(), Some(GameError::TooManyMines));
    }
}
