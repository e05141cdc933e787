//! Top-level game phase shared by both games

/// Current phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title / story screens, waiting for a key
    #[default]
    Intro,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended in failure
    GameOver,
    /// Level cleared
    Won,
}

impl GamePhase {
    /// Does the simulation advance in this phase
    pub fn is_running(&self) -> bool {
        matches!(self, GamePhase::Playing)
    }

    /// Is the run over (waiting for restart)
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }

    /// Pause toggle; only Playing and Paused respond
    pub fn toggled_pause(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_toggle() {
        assert_eq!(GamePhase::Playing.toggled_pause(), GamePhase::Paused);
        assert_eq!(GamePhase::Paused.toggled_pause(), GamePhase::Playing);
        assert_eq!(GamePhase::GameOver.toggled_pause(), GamePhase::GameOver);
        assert_eq!(GamePhase::Intro.toggled_pause(), GamePhase::Intro);
    }

    #[test]
    fn test_finished() {
        assert!(GamePhase::Won.is_finished());
        assert!(GamePhase::GameOver.is_finished());
        assert!(!GamePhase::Paused.is_finished());
        assert!(!GamePhase::Paused.is_running());
    }
}
