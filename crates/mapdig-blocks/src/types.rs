use serde::{Deserialize, Serialize};

// Compact voxel representation: registry id plus packed property state
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

pub type BlockId = u16;
pub type BlockState = u16;

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct BiomeId(pub u16);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fluid {
    #[default]
    Empty,
    Water,
    Lava,
}

/// Fluid occupying one cell. `amount` is 8 for sources and falling columns,
/// 1..=7 for flowing fluid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct FluidState {
    pub fluid: Fluid,
    pub amount: u8,
    pub falling: bool,
}

impl FluidState {
    pub const EMPTY: FluidState = FluidState {
        fluid: Fluid::Empty,
        amount: 0,
        falling: false,
    };

    #[inline]
    pub fn source(fluid: Fluid) -> Self {
        match fluid {
            Fluid::Empty => Self::EMPTY,
            _ => FluidState {
                fluid,
                amount: 8,
                falling: false,
            },
        }
    }

    /// Maps a fluid block's `level` property to its fluid state:
    /// 0 is a source, 1..=7 flowing, 8 and above falling.
    pub fn from_block_level(fluid: Fluid, level: u8) -> Self {
        match (fluid, level) {
            (Fluid::Empty, _) => Self::EMPTY,
            (_, 0) => Self::source(fluid),
            (_, 1..=7) => FluidState {
                fluid,
                amount: 8 - level,
                falling: false,
            },
            _ => FluidState {
                fluid,
                amount: 8,
                falling: true,
            },
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fluid == Fluid::Empty
    }

    #[inline]
    pub fn is_source(&self) -> bool {
        !self.is_empty() && self.amount == 8 && !self.falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fluid_levels_follow_block_level_property() {
        assert!(FluidState::from_block_level(Fluid::Water, 0).is_source());
        let flowing = FluidState::from_block_level(Fluid::Water, 3);
        assert_eq!(flowing.amount, 5);
        assert!(!flowing.falling);
        let falling = FluidState::from_block_level(Fluid::Lava, 9);
        assert_eq!(falling.amount, 8);
        assert!(falling.falling);
        assert!(FluidState::from_block_level(Fluid::Empty, 0).is_empty());
    }
}
