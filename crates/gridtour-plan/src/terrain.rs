//! Terrain kinds and their traversal costs.

use std::fmt;

/// The kind of ground a map cell is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Asphalt,
    Dirt,
    Grass,
    Cobblestone,
    /// Never enterable.
    Building,
}

impl Terrain {
    /// Every terrain kind, in map-legend order.
    pub const ALL: [Terrain; 5] = [
        Terrain::Asphalt,
        Terrain::Dirt,
        Terrain::Grass,
        Terrain::Cobblestone,
        Terrain::Building,
    ];

    /// Terrain for a map-file character, if it is one of `A T G P E`.
    pub fn from_rune(ch: char) -> Option<Self> {
        match ch {
            'A' => Some(Self::Asphalt),
            'T' => Some(Self::Dirt),
            'G' => Some(Self::Grass),
            'P' => Some(Self::Cobblestone),
            'E' => Some(Self::Building),
            _ => None,
        }
    }

    /// Map-file character for this terrain.
    pub fn rune(self) -> char {
        match self {
            Self::Asphalt => 'A',
            Self::Dirt => 'T',
            Self::Grass => 'G',
            Self::Cobblestone => 'P',
            Self::Building => 'E',
        }
    }

    /// Cost of stepping onto a cell of this terrain, `None` if impassable.
    pub fn cost(self) -> Option<i32> {
        match self {
            Self::Asphalt => Some(1),
            Self::Dirt => Some(3),
            Self::Grass => Some(5),
            Self::Cobblestone => Some(10),
            Self::Building => None,
        }
    }

    /// Whether a cell of this terrain can be entered.
    pub fn passable(self) -> bool {
        self.cost().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Asphalt => "asphalt",
            Self::Dirt => "dirt",
            Self::Grass => "grass",
            Self::Cobblestone => "cobblestone",
            Self::Building => "building",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
