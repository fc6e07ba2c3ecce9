//! Crate-level error types.

use std::fmt;

use crate::render::RenderError;
use crate::viewport::LoopState;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// One or more required scene members could not be found by name.
    MissingSceneMember(Vec<String>),
    /// A member was found but is not the kind of node its role needs.
    UnexpectedMemberKind {
        /// Name of the offending member.
        name: String,
        /// The node kind the role requires.
        expected: &'static str,
    },
    /// Viewport width or height is zero.
    InvalidViewportDimensions {
        /// Viewport width in pixels.
        width: u32,
        /// Viewport height in pixels.
        height: u32,
    },
    /// A render-loop lifecycle call was made from a state that forbids it.
    InvalidTransition {
        /// State the loop was in.
        state: LoopState,
        /// The rejected call.
        action: &'static str,
    },
    /// Renderer attach or draw failure.
    Render(RenderError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSceneMember(names) => {
                write!(f, "missing scene member(s): {}", names.join(", "))
            }
            Self::UnexpectedMemberKind { name, expected } => {
                write!(f, "scene member '{name}' is not a {expected}")
            }
            Self::InvalidViewportDimensions { width, height } => {
                write!(f, "invalid viewport dimensions {width}x{height}")
            }
            Self::InvalidTransition { state, action } => {
                write!(f, "cannot {action} a render loop that is {state}")
            }
            Self::Render(e) => write!(f, "render error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderError> for VantageError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_members_are_listed_in_message() {
        let err = VantageError::MissingSceneMember(vec![
            "lightSource".to_owned(),
            "focalPoint".to_owned(),
        ]);
        assert_eq!(
            err.to_string(),
            "missing scene member(s): lightSource, focalPoint"
        );
    }

    #[test]
    fn transition_message_names_state() {
        let err = VantageError::InvalidTransition {
            state: LoopState::Stopped,
            action: "start",
        };
        assert_eq!(
            err.to_string(),
            "cannot start a render loop that is stopped"
        );
    }
}
