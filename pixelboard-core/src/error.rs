use std::fmt;

/// Reasons the board refuses an operation.
#[derive(Clone, Debug, PartialEq)]
pub enum BoardError {
    /// No selection, or a selection rectangle with zero area.
    EmptySelection,
    /// A placement was requested before an image was supplied.
    MissingImage,
    /// The supplied image reports a zero dimension.
    DegenerateImage { width: u32, height: u32 },
    InvalidConfig(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::EmptySelection => write!(f, "no cells are selected"),
            BoardError::MissingImage => write!(f, "no image has been chosen"),
            BoardError::DegenerateImage { width, height } => {
                write!(f, "image has unusable dimensions {width}x{height}")
            }
            BoardError::InvalidConfig(reason) => write!(f, "invalid board config: {reason}"),
        }
    }
}

impl std::error::Error for BoardError {}
