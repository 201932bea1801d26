use bevy::prelude::*;

#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// meshes, materials and cell entities are being created
    #[default]
    Load,
    /// the board is on screen; pause/run is tracked by the grid itself
    Live,
}
