//! LLM provider implementations

pub mod minimax;

// Re-export for convenience
pub use minimax::Minimax;
