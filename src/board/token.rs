use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Player {
    Computer,
    Human,
}

impl Player {
    pub fn invert(self: &Self) -> Player {
        if *self == Self::Computer {
            return Self::Human;
        }

        return Self::Computer;
    }

    pub fn to_byte(self: &Self) -> u8 {
        return match self {
            Self::Computer => 1,
            Self::Human => 2,
        };
    }

    pub fn from_byte(byte: u8) -> Option<Player> {
        return match byte {
            1 => Some(Self::Computer),
            2 => Some(Self::Human),
            _ => None,
        };
    }
}
