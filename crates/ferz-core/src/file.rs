//! Board files (columns a to h).

use std::fmt;

/// A file (column), FileA on the queenside edge to FileH on the kingside edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    FileA = 0,
    FileB = 1,
    FileC = 2,
    FileD = 3,
    FileE = 4,
    FileF = 5,
    FileG = 6,
    FileH = 7,
}

impl File {
    pub const COUNT: usize = 8;

    pub const ALL: [File; 8] = [
        File::FileA,
        File::FileB,
        File::FileC,
        File::FileD,
        File::FileE,
        File::FileF,
        File::FileG,
        File::FileH,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Zero-based index to file, `None` past FileH.
    #[inline]
    pub fn from_index(index: u8) -> Option<File> {
        File::ALL.get(usize::from(index)).copied()
    }

    /// Parse a file letter `a`..`h`.
    pub fn from_char(c: char) -> Option<File> {
        if c.is_ascii_lowercase() {
            File::from_index(c as u8 - b'a')
        } else {
            None
        }
    }

    /// The notation letter of this file.
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
