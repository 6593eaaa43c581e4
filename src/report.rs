//! Text rendering of states and search outcomes.

use std::fmt::Write;

use crate::colors::ColorRegistry;
use crate::solver::Outcome;
use crate::state::{GameState, MoveRecord};

/// Formats a state as one line per pole.
///
/// ```text
/// Game:
///   Pole 0: Red > Blue
///   Pole 1: Empty
/// ```
pub fn format_state(state: &GameState) -> String {
    let mut output = String::from("Game:\n");
    for (index, pole) in state.poles().iter().enumerate() {
        // writing to a String cannot fail
        let _ = writeln!(output, "  Pole {}: {}", index, state.describe_pole(pole));
    }
    output
}

/// Formats a move list as ` - Move ...` lines.
pub fn format_moves(moves: &[MoveRecord], colors: &ColorRegistry) -> String {
    let mut output = String::new();
    for record in moves {
        let _ = writeln!(output, " - {}", record.describe(colors));
    }
    output
}

/// Formats the result of a search for the console.
pub fn format_outcome(outcome: &Outcome, colors: &ColorRegistry) -> String {
    match outcome {
        Outcome::Solved(solution) if solution.moves.is_empty() => {
            "The game is already solved.\n".to_string()
        }
        Outcome::Solved(solution) => {
            let mut output = format!(
                "Found a solution after examining {} possible moves.\nIt takes {} moves to win the game:\n",
                solution.examined,
                solution.moves.len()
            );
            output.push_str(&format_moves(&solution.moves, colors));
            let _ = writeln!(output, "Final score: {}", solution.score);
            output
        }
        Outcome::Unsolvable { examined } => {
            format!("This game cannot be solved (examined {examined} possible moves).\n")
        }
        Outcome::Cancelled { examined, reason } => {
            format!("Search stopped after it {reason} (examined {examined} possible moves).\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::loader::parse_puzzle;
    use crate::solver::{Solution, StopReason};

    #[test]
    fn test_format_state_snapshot() {
        let state = parse_puzzle(include_str!("../puzzles/three_colors.txt")).unwrap();
        insta::assert_snapshot!(format_state(&state), @r"
        Game:
          Pole 0: Red > Blue > Red
          Pole 1: Blue > Green > Blue
          Pole 2: Green > Red > Green
          Pole 3: Empty
          Pole 4: Empty
        ");
    }

    #[test]
    fn test_format_solved_outcome() {
        let state = parse_puzzle("Red, Blue\nBlue, Red\nempty\nempty").unwrap();
        let colors = state.colors();
        let red = colors.get("Red").unwrap();
        let blue = colors.get("Blue").unwrap();

        let outcome = Outcome::Solved(Solution {
            moves: vec![
                MoveRecord {
                    from: 0,
                    to: 3,
                    count: 1,
                    color: blue,
                    score: 6,
                },
                MoveRecord {
                    from: 1,
                    to: 0,
                    count: 1,
                    color: red,
                    score: 2,
                },
            ],
            score: 2,
            examined: 12,
        });

        insta::assert_snapshot!(format_outcome(&outcome, colors), @r"
        Found a solution after examining 12 possible moves.
        It takes 2 moves to win the game:
         - Move 1 Blue from #0 to #3
         - Move 1 Red from #1 to #0
        Final score: 2
        ");
    }

    #[test]
    fn test_format_already_solved_is_not_a_failure() {
        let colors = ColorRegistry::new();
        let outcome = Outcome::Solved(Solution {
            moves: Vec::new(),
            score: 0,
            examined: 0,
        });
        assert_eq!(format_outcome(&outcome, &colors), "The game is already solved.\n");
    }

    #[test]
    fn test_format_unsolvable_and_cancelled() {
        let colors = ColorRegistry::new();

        assert_eq!(
            format_outcome(&Outcome::Unsolvable { examined: 40 }, &colors),
            "This game cannot be solved (examined 40 possible moves).\n"
        );
        assert_eq!(
            format_outcome(
                &Outcome::Cancelled {
                    examined: 9,
                    reason: StopReason::TimeLimit(Duration::from_millis(1500)),
                },
                &colors
            ),
            "Search stopped after it ran for 1.5s (examined 9 possible moves).\n"
        );
    }
}
