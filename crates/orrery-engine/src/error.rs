use thiserror::Error;

/// Errors surfaced by the engine to the game and the web bridge.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A viewport dimension was zero, negative or not finite.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// A frame section ran out of room for this frame.
    #[error("{section} capacity exceeded: needed {needed}, max {max}")]
    Capacity {
        section: &'static str,
        needed: usize,
        max: usize,
    },

    /// Runtime configuration was rejected by the game.
    #[error("configuration rejected: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
