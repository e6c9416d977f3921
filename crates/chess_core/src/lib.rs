pub mod board;
pub mod fen;
pub mod movegen;
pub mod perft;
pub mod status;
pub mod types;
pub mod uci;
pub mod zobrist;

// Re-export the rules engine consumed by the search crates
pub use board::*;
pub use fen::FenError;
pub use movegen::*;
pub use perft::perft;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;
