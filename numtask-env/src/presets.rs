//! Named environment variants.
use crate::{
    config::{NumTaskCorridorConfig, NumTaskGridConfig},
    error::NumTaskError,
};
use std::{fmt, str::FromStr};

/// A named environment variant with fixed construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// `NumberTaskGrid9x9-v0`: the grid arena, size 9, layout redrawn every reset.
    Grid9x9,

    /// `NumberTasksTMaze5-v0`: a 5x5 T-maze with a stable layout.
    TMaze5,

    /// `NumberTasksNosePoke-v0`: a 3x1 corridor with a stable layout.
    NosePoke,
}

/// Configuration resolved from a [`Preset`].
#[derive(Debug, Clone, PartialEq)]
pub enum PresetConfig {
    /// Grid-arena variant.
    Grid(NumTaskGridConfig),

    /// Corridor variant.
    Corridor(NumTaskCorridorConfig),
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 3] = [Preset::Grid9x9, Preset::TMaze5, Preset::NosePoke];

    /// The registered name.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Grid9x9 => "NumberTaskGrid9x9-v0",
            Preset::TMaze5 => "NumberTasksTMaze5-v0",
            Preset::NosePoke => "NumberTasksNosePoke-v0",
        }
    }

    /// The configuration of the variant. Task, colors, rewards and seed stay at
    /// their defaults and can be changed with the builder setters.
    pub fn config(self) -> PresetConfig {
        match self {
            Preset::Grid9x9 => PresetConfig::Grid(
                NumTaskGridConfig::default()
                    .size(9)
                    .shuffle_task_locations(true),
            ),
            Preset::TMaze5 => PresetConfig::Corridor(
                NumTaskCorridorConfig::default()
                    .width(5)
                    .height(5)
                    .shuffle_task_locations(false),
            ),
            Preset::NosePoke => PresetConfig::Corridor(
                NumTaskCorridorConfig::default()
                    .width(3)
                    .height(1)
                    .shuffle_task_locations(false),
            ),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = NumTaskError;

    /// Accepts the registered names, with or without the `MiniGrid-` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("MiniGrid-").unwrap_or(s);
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == name)
            .ok_or_else(|| NumTaskError::UnknownPreset(s.to_string()))
    }
}
