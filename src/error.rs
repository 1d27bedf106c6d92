use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Call-level failures of template decoding and batch transformation.
///
/// Points that fall outside the domain of a grid are never reported through
/// this type; they are replaced with the fill value and excluded from the
/// count of valid points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GdswzdError {
    MalformedTemplate(String),
    UnsupportedProjection(i64),
    InvalidDirection(i64),
    BufferTooShort {
        name: &'static str,
        len: usize,
        npts: usize,
    },
}

impl Error for GdswzdError {
    fn description(&self) -> &str {
        "gdswzd error"
    }
}

impl Display for GdswzdError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::MalformedTemplate(s) => write!(f, "Malformed grid definition template: {s}"),
            Self::UnsupportedProjection(num) => {
                write!(f, "Grid definition template {num} is not supported")
            }
            Self::InvalidDirection(iopt) => {
                write!(f, "Transform option must be 1 or -1: {iopt}")
            }
            Self::BufferTooShort { name, len, npts } => write!(
                f,
                "Buffer '{name}' has {len} elements but {npts} points were requested"
            ),
        }
    }
}
