//! Error types for games, scenes, and the host loop.

/// Result of one update step: either a [`Flow`](crate::Flow) or a failure.
pub type GameResult<T = crate::Flow> = Result<T, GameError>;

/// A failure raised by a scene or a transition while updating.
///
/// The sequencing core never wraps or rewrites these; whatever a scene returns
/// is handed to the host loop as-is.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("scene error: {0}")]
    Scene(String),

    #[error("transition error: {0}")]
    Transition(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GameError {
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    pub fn transition(msg: impl Into<String>) -> Self {
        Self::Transition(msg.into())
    }
}

/// Errors that stop [`run_game`](crate::run_game).
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[source] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[source] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error(transparent)]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(GameError::scene("x").to_string().contains("scene error:"));
        assert!(
            GameError::transition("x")
                .to_string()
                .contains("transition error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = GameError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn run_error_is_transparent_over_game_error() {
        let err = RunError::from(GameError::scene("level failed to load"));
        assert_eq!(err.to_string(), "scene error: level failed to load");
    }
}
