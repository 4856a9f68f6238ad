//! Error types for L-System interpretation.

/// Fatal failures of an L-System run.
///
/// Unknown symbols are not represented here: they are reported as `tracing`
/// warnings and counted in the [`RunReport`](crate::engine::RunReport).
#[derive(Debug, thiserror::Error)]
pub enum LSystemError {
    /// `]` was encountered while the pose stack was empty.
    #[error(
        "unbalanced stack: '{symbol}' at position {index} of generation {generation} popped an empty pose stack (depth 0)"
    )]
    UnbalancedStack {
        symbol: char,
        generation: u32,
        index: usize,
    },

    /// The caller supplied parameters that can never produce a drawing.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The symbios interner rejected a symbol.
    #[error("symbol table error: {0}")]
    SymbolTable(String),

    /// A scene file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
