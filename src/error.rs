use std::path::PathBuf;

/// Errors that can occur while loading a puzzle definition.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read puzzle file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: empty color name")]
    EmptyColorName { line: usize },

    #[error("line {line}: incorrect height {found}, should be {expected}")]
    InconsistentHeight {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("needs at least {required} empty poles, found {found}")]
    TooFewEmptyPoles { required: usize, found: usize },

    #[error(
        "mismatch in colors: found {colors} colors and {empty} empty poles but {poles} total poles"
    )]
    PoleCountMismatch {
        colors: usize,
        empty: usize,
        poles: usize,
    },

    #[error("puzzle has no hoops")]
    NoHoops,
}
