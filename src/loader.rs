//! Reading puzzle definitions from text.
//!
//! Format, one pole per line from bottom to top:
//! - `empty` (any case): an empty pole
//! - `# ...`: a comment
//! - blank lines are skipped
//! - anything else: comma-separated color names, e.g. `Red, Blue, Red`
//!
//! A puzzle needs at least two empty poles, colored poles of equal height,
//! and exactly one colored pole per distinct color.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use tracing::debug;

use crate::colors::ColorRegistry;
use crate::error::LoadError;
use crate::pole::Pole;
use crate::state::GameState;

/// Minimum number of empty poles in a puzzle.
pub const REQUIRED_EMPTY_POLES: usize = 2;

/// Parses a puzzle definition into its initial state.
pub fn parse_puzzle(text: &str) -> Result<GameState, LoadError> {
    let mut registry = ColorRegistry::new();
    let mut poles = Vec::new();
    let mut max_height = 0;
    let mut empty_poles = 0;

    for (line_index, raw_line) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.eq_ignore_ascii_case("empty") {
            poles.push(Pole::empty());
            empty_poles += 1;
            continue;
        }

        let mut hoops = Vec::new();
        for name in line.split(',').map(str::trim) {
            if name.is_empty() {
                return Err(LoadError::EmptyColorName { line: line_number });
            }
            hoops.push(registry.intern(name));
        }

        // the first colored pole sets the height for the rest
        if max_height == 0 {
            max_height = hoops.len();
        } else if hoops.len() != max_height {
            return Err(LoadError::InconsistentHeight {
                line: line_number,
                found: hoops.len(),
                expected: max_height,
            });
        }
        poles.push(Pole::new(hoops));
    }

    if max_height == 0 {
        return Err(LoadError::NoHoops);
    }
    if empty_poles < REQUIRED_EMPTY_POLES {
        return Err(LoadError::TooFewEmptyPoles {
            required: REQUIRED_EMPTY_POLES,
            found: empty_poles,
        });
    }
    if registry.len() + empty_poles != poles.len() {
        return Err(LoadError::PoleCountMismatch {
            colors: registry.len(),
            empty: empty_poles,
            poles: poles.len(),
        });
    }

    debug!(
        poles = poles.len(),
        colors = registry.len(),
        max_height,
        "parsed puzzle"
    );
    Ok(GameState::new(poles, max_height, Rc::new(registry)))
}

/// Reads and parses a puzzle file.
pub fn load_puzzle(path: &Path) -> Result<GameState, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_puzzle(&text)
}
