#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// The primitive vectors of a lattice are linearly dependent (the lattice
    /// matrix has a zero determinant)
    DegenerateLattice(String),
    /// One of the energy cutoffs is not a strictly positive finite number
    InvalidCutoff(String),
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DegenerateLattice(e) => write!(f, "degenerate lattice: {}", e),
            Error::InvalidCutoff(e) => write!(f, "invalid cutoff: {}", e),
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::DegenerateLattice(_) |
            Error::InvalidCutoff(_) |
            Error::InvalidParameter(_) => None,
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}
