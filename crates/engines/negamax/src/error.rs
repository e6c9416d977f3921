use thiserror::Error;

/// Faults that end a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The rules engine reported no legal moves for a position that is
    /// neither checkmate nor a recognised draw.
    #[error("rules engine contract violated: no legal moves in position {identity:#018x}, which is neither checkmate nor a draw")]
    ContractViolation { identity: u64 },

    /// `choose_move` was called on a finished game.
    #[error("no legal moves to choose from")]
    NoLegalMoves,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("base_depth {base} exceeds max_depth {max}")]
    DepthRange { base: u8, max: u8 },

    #[error("cache_capacity must be at least 1")]
    ZeroCacheCapacity,
}
