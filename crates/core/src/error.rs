//! Error kinds for configuration parsing, modifier application, and path
//! generation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("'{0}' is not a valid room size; use a name like 'small', one integer, or WxH")]
    BadSize(String),
    #[error("'{0}' is not a valid offset; use one integer or two separated by a comma")]
    BadOffset(String),
    #[error("'{0}' is not a valid inset list; use one to four non-negative integers")]
    BadInsets(String),
    #[error("'{0}' is not a valid placement name")]
    BadPlacement(String),
    #[error("'{0}' is not a valid closing specification")]
    BadClosing(String),
    #[error("'{0}' is not a valid fill mode")]
    BadFillMode(String),
    #[error("the {0} must be larger than zero")]
    BadDimension(&'static str),
    #[error("the canvas only fits a {nx}x{ny} room grid, but at least 3x3 is required")]
    CanvasTooSmall { nx: i64, ny: i64 },

    #[error("invalid merge: {0}")]
    InvalidMerge(String),
    #[error("the resolved area does not fit the grid: {0}")]
    Unplaceable(String),
    #[error("no conflict-free spot found for '{spec}' after {attempts} random draws")]
    ConflictAfterRetries { spec: String, attempts: u32 },

    #[error("{unvisited} rooms stayed unreachable and islands are not allowed")]
    IslandsForbidden { unvisited: usize },
    #[error("cannot join all path endpoints into one component: {0}")]
    CannotJoin(String),
    #[error("endpoint {0} has no reachable neighbor")]
    EndpointTrapped(String),
    #[error("no valid maze found after {attempts} attempts")]
    MaxAttemptsExceeded { attempts: u32 },
}

impl Error {
    /// Whether this error stems from invalid user input rather than a failed
    /// generation run. The distinction drives the process exit code.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::BadSize(_)
                | Error::BadOffset(_)
                | Error::BadInsets(_)
                | Error::BadPlacement(_)
                | Error::BadClosing(_)
                | Error::BadFillMode(_)
                | Error::BadDimension(_)
                | Error::CanvasTooSmall { .. }
        )
    }
}
