pub mod camera;
pub mod grid;
pub mod life;
pub mod state;

pub mod prelude {
    use bevy::{color::Color, math::Vec2};

    pub const WINDOW_TITLE: &str = "Conway's Game of Life";
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// time between generations while running
    pub const GEN_INTERVAL_MS: u64 = 60;
    pub const BG_COLOR: Color = Color::srgb(4.0 / 255.0, 0.0, 10.0 / 255.0);

    pub const BOARD_POS: Vec2 = Vec2::ZERO;
    pub const CELL_SIZE_PX: u32 = 10;
    pub const CELL_ALIVE_COLOR: Color = Color::srgb(250.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);
    pub const CELL_DEAD_COLOR: Color = BG_COLOR;
    pub const CELL_HOVERED_ALIVE_COLOR: Color =
        Color::srgb(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0);
    pub const CELL_HOVERED_DEAD_COLOR: Color =
        Color::srgb(54.0 / 255.0, 50.0 / 255.0, 60.0 / 255.0);
}
