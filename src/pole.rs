//! A single pole: a stack of hoops, bottom first.

use crate::colors::Color;

/// Penalty per hoop trapped beneath a pole's top run.
pub const BURIED_HOOP_PENALTY: u32 = 5;

/// An ordered stack of hoops. The last element is the top of the pole.
///
/// Poles are never mutated once a [`GameState`](crate::state::GameState)
/// holds them; a move builds fresh poles for its source and destination.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pole {
    hoops: Vec<Color>,
}

impl Pole {
    pub fn new(hoops: Vec<Color>) -> Self {
        Self { hoops }
    }

    /// A pole without hoops.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The hoops from bottom to top.
    #[inline]
    pub fn hoops(&self) -> &[Color] {
        &self.hoops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hoops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hoops.is_empty()
    }

    #[inline]
    pub fn top_color(&self) -> Option<Color> {
        self.hoops.last().copied()
    }

    /// Full height and a single color. Finished poles never move again.
    pub fn is_finished(&self, max_height: usize) -> bool {
        match self.hoops.first() {
            Some(&base) if self.hoops.len() == max_height => {
                self.hoops.iter().all(|&color| color == base)
            }
            _ => false,
        }
    }

    /// Whether this pole may be the source of a move.
    #[inline]
    pub fn can_move(&self, max_height: usize) -> bool {
        !self.is_empty() && !self.is_finished(max_height)
    }

    /// Length of the run of the top color that ends at the top.
    ///
    /// Returns 0 for an empty pole.
    pub fn top_run_len(&self) -> usize {
        let Some(top) = self.top_color() else {
            return 0;
        };
        self.hoops
            .iter()
            .rev()
            .take_while(|&&color| color == top)
            .count()
    }

    /// Disorder penalty used by the search heuristic.
    ///
    /// Walking down from the top, the first hoop of a different color at
    /// index `i` (counted from the bottom) costs `5 * (i + 1)`, i.e. five
    /// points for every hoop buried under the top run.
    pub fn penalty(&self) -> u32 {
        let Some(top) = self.top_color() else {
            return 0;
        };
        self.hoops
            .iter()
            .rposition(|&color| color != top)
            .map_or(0, |index| BURIED_HOOP_PENALTY * (index as u32 + 1))
    }

    /// Splits off the top `count` hoops, returning the remaining pole.
    pub(crate) fn without_top(&self, count: usize) -> Pole {
        debug_assert!(count <= self.hoops.len());
        Pole::new(self.hoops[..self.hoops.len() - count].to_vec())
    }

    /// Returns a copy of this pole with `count` hoops of `color` stacked on top.
    pub(crate) fn with_added(&self, color: Color, count: usize) -> Pole {
        let mut hoops = Vec::with_capacity(self.hoops.len() + count);
        hoops.extend_from_slice(&self.hoops);
        hoops.extend(std::iter::repeat(color).take(count));
        Pole::new(hoops)
    }
}

impl FromIterator<Color> for Pole {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::ColorRegistry;

    fn colors() -> (Color, Color, Color) {
        let mut registry = ColorRegistry::new();
        (
            registry.intern("A"),
            registry.intern("B"),
            registry.intern("C"),
        )
    }

    #[test]
    fn test_empty_pole_queries() {
        let pole = Pole::empty();
        assert!(pole.is_empty());
        assert_eq!(pole.top_color(), None);
        assert!(!pole.is_finished(3));
        assert!(!pole.can_move(3));
        assert_eq!(pole.top_run_len(), 0);
        assert_eq!(pole.penalty(), 0);
    }

    #[test]
    fn test_finished_requires_full_height() {
        let (a, b, _) = colors();

        assert!(Pole::new(vec![a, a, a]).is_finished(3));
        assert!(
            !Pole::new(vec![a, a]).is_finished(3),
            "A partial uniform pole is not finished"
        );
        assert!(!Pole::new(vec![a, b, a]).is_finished(3));
    }

    #[test]
    fn test_can_move_excludes_finished_poles() {
        let (a, b, _) = colors();

        assert!(!Pole::new(vec![a, a, a]).can_move(3));
        assert!(Pole::new(vec![a, a]).can_move(3));
        assert!(Pole::new(vec![b, a, a]).can_move(3));
    }

    #[test]
    fn test_top_run_len_counts_matching_hoops_from_top() {
        let (a, b, _) = colors();

        assert_eq!(Pole::new(vec![a, a, b, b]).top_run_len(), 2);
        assert_eq!(Pole::new(vec![a, b, a]).top_run_len(), 1);
        assert_eq!(Pole::new(vec![b, b, b]).top_run_len(), 3);
    }

    #[test]
    fn test_penalty_counts_only_nearest_boundary() {
        let (a, b, c) = colors();

        assert_eq!(Pole::new(vec![a, a, a]).penalty(), 0);
        // boundary at index 1: two hoops buried under the B run
        assert_eq!(Pole::new(vec![a, a, b, b]).penalty(), 10);
        // boundary at index 2, the C at the bottom does not add anything
        assert_eq!(Pole::new(vec![c, a, a, b]).penalty(), 15);
        assert_eq!(Pole::new(vec![a, b]).penalty(), 5);
    }

    #[test]
    fn test_without_top_and_with_added() {
        let (a, b, _) = colors();
        let source = Pole::new(vec![a, b, b]);

        assert_eq!(source.without_top(2), Pole::new(vec![a]));
        assert_eq!(Pole::new(vec![a]).with_added(b, 2), source);
        assert_eq!(Pole::empty().with_added(a, 1), Pole::new(vec![a]));
    }
}
