//! The binary cell state.

/// State of a single grid slot. There is no unset state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    /// An empty slot.
    #[default]
    Dead,
    /// A live slot.
    Alive,
}

impl Cell {
    /// Whether the cell is alive.
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Binary form used by grid views (`1` alive, `0` dead).
    pub const fn as_bit(self) -> u8 {
        match self {
            Self::Alive => 1,
            Self::Dead => 0,
        }
    }

    /// Character form used by the text codec and fingerprints.
    pub const fn as_char(self) -> char {
        match self {
            Self::Alive => '1',
            Self::Dead => '0',
        }
    }

    /// Parse a grid value, accepting exactly `0` or `1`.
    pub const fn from_bit(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Dead),
            1 => Some(Self::Alive),
            _ => None,
        }
    }

    /// Parse a codec character, accepting exactly `'0'` or `'1'`.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Dead),
            '1' => Some(Self::Alive),
            _ => None,
        }
    }
}
