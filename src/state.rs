//! Game states, move generation and the search heuristic.
//!
//! A [`GameState`] is immutable once built. Poles are held behind `Rc` so a
//! move only allocates the two poles it touches and shares the rest with its
//! parent state.

use std::fmt;
use std::rc::Rc;

use crate::colors::{Color, ColorRegistry};
use crate::pole::Pole;

/// A snapshot of every pole in the puzzle.
#[derive(Clone, Debug)]
pub struct GameState {
    poles: Vec<Rc<Pole>>,
    max_height: usize,
    moves_taken: u32,
    colors: Rc<ColorRegistry>,
}

/// Order-independent identity of a state, used for deduplication.
///
/// Holds the state's poles sorted by content, so two states whose poles are
/// a permutation of each other produce equal keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[Rc<Pole>]>);

/// A legal transfer between two poles, without the state it produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// Source pole index.
    pub from: usize,
    /// Destination pole index.
    pub to: usize,
    /// Hoops transferred, at least one.
    pub count: usize,
    pub color: Color,
    /// Score of the resulting state.
    pub score: u32,
}

/// A legal transfer together with the state it leads to.
#[derive(Clone, Debug)]
pub struct Move {
    pub record: MoveRecord,
    pub state: GameState,
}

impl GameState {
    /// Builds a root state with no moves taken.
    pub fn new(poles: Vec<Pole>, max_height: usize, colors: Rc<ColorRegistry>) -> Self {
        debug_assert!(poles.iter().all(|pole| pole.len() <= max_height));
        Self {
            poles: poles.into_iter().map(Rc::new).collect(),
            max_height,
            moves_taken: 0,
            colors,
        }
    }

    #[inline]
    pub fn poles(&self) -> &[Rc<Pole>] {
        &self.poles
    }

    #[inline]
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Number of moves from the root to this state.
    #[inline]
    pub fn moves_taken(&self) -> u32 {
        self.moves_taken
    }

    /// The registry naming this state's colors.
    #[inline]
    pub fn colors(&self) -> &Rc<ColorRegistry> {
        &self.colors
    }

    /// Every pole is either empty or finished.
    pub fn is_win(&self) -> bool {
        self.poles
            .iter()
            .all(|pole| pole.is_empty() || pole.is_finished(self.max_height))
    }

    /// Search priority: moves taken plus the disorder penalty of every pole.
    ///
    /// Lower is better. Not an admissible estimate, so the search is
    /// best-first rather than optimal.
    pub fn score(&self) -> u32 {
        self.moves_taken + self.poles.iter().map(|pole| pole.penalty()).sum::<u32>()
    }

    /// Lists every legal move from this state.
    ///
    /// Each ordered pair of poles yields at most one move, which transfers the
    /// whole top run of the source or as much of it as the destination holds.
    pub fn list_available_moves(&self) -> Vec<Move> {
        // only one empty pole matters: moving between two empty poles is useless
        let mut empty_pole = None;
        let mut open_poles: Vec<(usize, Color)> = Vec::new();

        for (index, pole) in self.poles.iter().enumerate() {
            if pole.is_empty() {
                empty_pole = Some(index);
            } else if pole.len() != self.max_height {
                if let Some(color) = pole.top_color() {
                    open_poles.push((index, color));
                }
            }
        }

        let mut moves = Vec::new();
        for (from, pole) in self.poles.iter().enumerate() {
            if !pole.can_move(self.max_height) {
                continue;
            }
            let top = pole.top_color();

            if let Some(to) = empty_pole {
                moves.push(self.generate_move(from, to));
            }
            for &(to, color) in &open_poles {
                if to != from && Some(color) == top {
                    moves.push(self.generate_move(from, to));
                }
            }
        }
        moves
    }

    /// Builds the state reached by moving the top run of `from` onto `to`.
    fn generate_move(&self, from: usize, to: usize) -> Move {
        let source = &self.poles[from];
        let destination = &self.poles[to];
        let Some(color) = source.top_color() else {
            panic!("cannot generate a move from pole #{from}: it has no top color");
        };

        let free_slots = self.max_height - destination.len();
        let count = source.top_run_len().min(free_slots);
        debug_assert!(count >= 1, "move from #{from} to #{to} transfers nothing");

        let mut poles = self.poles.clone();
        poles[from] = Rc::new(source.without_top(count));
        poles[to] = Rc::new(destination.with_added(color, count));

        let state = GameState {
            poles,
            max_height: self.max_height,
            moves_taken: self.moves_taken + 1,
            colors: Rc::clone(&self.colors),
        };

        Move {
            record: MoveRecord {
                from,
                to,
                count,
                color,
                score: state.score(),
            },
            state,
        }
    }

    /// Computes the deduplication key for this state.
    pub fn canonical_key(&self) -> StateKey {
        let mut poles = self.poles.clone();
        poles.sort_unstable();
        StateKey(poles.into_boxed_slice())
    }

    /// Human-readable form of the canonical key.
    ///
    /// Each pole is rendered as `c1 > c2 > ...` or `Empty`; the lines are
    /// sorted so that permuted poles render identically.
    pub fn signature(&self) -> String {
        let mut lines: Vec<String> = self
            .poles
            .iter()
            .map(|pole| self.describe_pole(pole))
            .collect();
        lines.sort_unstable();
        lines.join("\n")
    }

    /// Renders one pole bottom to top, or `Empty`.
    pub fn describe_pole(&self, pole: &Pole) -> String {
        if pole.is_empty() {
            return "Empty".to_string();
        }
        pole.hoops()
            .iter()
            .map(|&color| self.colors.name(color))
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Counts the hoops of each color, indexed by [`Color::index`].
    pub fn color_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.colors.len()];
        for pole in &self.poles {
            for color in pole.hoops() {
                counts[color.index()] += 1;
            }
        }
        counts
    }
}

impl MoveRecord {
    /// Formats this move as `Move <n> <color> from #<i> to #<j>`.
    pub fn describe(&self, colors: &ColorRegistry) -> String {
        format!(
            "Move {} {} from #{} to #{}",
            self.count,
            colors.display(self.color),
            self.from,
            self.to
        )
    }
}

impl Move {
    pub fn describe(&self) -> String {
        self.record.describe(self.state.colors())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Builds a state from rows like `"Red, Blue"`; an empty row is an empty pole.
#[cfg(test)]
pub(crate) fn state_from_rows(rows: &[&str], max_height: usize) -> GameState {
    let mut registry = ColorRegistry::new();
    let poles: Vec<Pole> = rows
        .iter()
        .map(|row| {
            row.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| registry.intern(name))
                .collect()
        })
        .collect();
    GameState::new(poles, max_height, Rc::new(registry))
}
