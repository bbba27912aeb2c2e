/// Classification of store failures, one variant per numeric code.
///
/// Matching on the kind replaces code comparisons at call sites; the
/// numeric values stay available for wire compatibility via [`Self::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Catch-all for conditions without a dedicated code.
    Unknown,
    /// The operation required a leaf but found a directory.
    NotFile,
    /// The operation required a directory but found a leaf.
    NotDir,
    /// The target path has no node.
    NotExists,
    /// The target path is already occupied.
    Exists,
    /// Non-recursive delete of a directory that still has children.
    DirNotEmpty,
}

impl ErrorKind {
    pub(crate) const ALL: [ErrorKind; 6] = [
        ErrorKind::Unknown,
        ErrorKind::NotFile,
        ErrorKind::NotDir,
        ErrorKind::NotExists,
        ErrorKind::Exists,
        ErrorKind::DirNotEmpty,
    ];

    /// The numeric code for this kind.
    pub const fn code(self) -> u32 {
        match self {
            ErrorKind::Unknown => 10_009_999,
            ErrorKind::NotFile => 10_000_001,
            ErrorKind::NotDir => 10_000_002,
            ErrorKind::NotExists => 10_000_003,
            ErrorKind::Exists => 10_000_004,
            ErrorKind::DirNotEmpty => 10_000_005,
        }
    }

    /// Maps a numeric code back to its kind, if the code is one of ours.
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            10_009_999 => Some(ErrorKind::Unknown),
            10_000_001 => Some(ErrorKind::NotFile),
            10_000_002 => Some(ErrorKind::NotDir),
            10_000_003 => Some(ErrorKind::NotExists),
            10_000_004 => Some(ErrorKind::Exists),
            10_000_005 => Some(ErrorKind::DirNotEmpty),
            _ => None,
        }
    }

    pub(crate) fn template(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "Unknown Error",
            ErrorKind::NotFile => "Target is Not File",
            ErrorKind::NotDir => "Target is Not Dir",
            ErrorKind::NotExists => "Target is not exists",
            ErrorKind::Exists => "Target is exists",
            ErrorKind::DirNotEmpty => "Directory is not empty",
        }
    }
}
