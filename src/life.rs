use std::time::Duration;

use bevy::{
    math::{uvec2, vec2},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{grid::LifeGrid, prelude::*, state::GameState};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        let sim = Simulation::default();
        let board = Board::for_grid(&sim.grid, CELL_SIZE_PX as f32, BOARD_POS);

        app.insert_resource(sim)
            .insert_resource(board)
            .init_resource::<HoveredCell>()
            .add_systems(
                OnEnter(GameState::Load),
                (load_meshes_and_materials, load_cell_board).chain(),
            )
            .add_systems(
                Update,
                (
                    advance_generation,
                    handle_kbd,
                    track_pointer,
                    edit_cells,
                    paint_cells,
                    update_title,
                )
                    .chain()
                    .run_if(in_state(GameState::Live)),
            );
    }
}

// ——> SYSTEMS

/// initialize the cell mesh and the four cell materials in a resource
fn load_meshes_and_materials(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    board: Res<Board>,
) {
    let cell = meshes.add(Rectangle::from_size(Vec2::splat(board.cell_size)));
    let mut mat = |color: Color| materials.add(ColorMaterial::from_color(color));

    commands.insert_resource(MeshAndMats {
        cell,
        dead: mat(CELL_DEAD_COLOR),
        alive: mat(CELL_ALIVE_COLOR),
        hovered_dead: mat(CELL_HOVERED_DEAD_COLOR),
        hovered_alive: mat(CELL_HOVERED_ALIVE_COLOR),
    });
}

/// spawn one entity per grid cell
fn load_cell_board(
    mut commands: Commands,
    meshes_and_mats: Res<MeshAndMats>,
    board: Res<Board>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let coords_iter = (0..board.rows).flat_map(|y| (0..board.cols).map(move |x| uvec2(x, y)));
    let cells_to_spawn = coords_iter
        .map(|cell_coord| {
            (
                Cell(cell_coord),
                Mesh2d(meshes_and_mats.cell.clone()),
                MeshMaterial2d(meshes_and_mats.dead.clone()),
                Transform::from_translation(board.cell_coord_to_translation(cell_coord)),
            )
        })
        .collect::<Vec<_>>();
    commands.spawn_batch(cells_to_spawn);

    info!(
        "spawned a {}x{} board, space: run/pause, x: clear, r: random soup",
        board.cols, board.rows
    );
    game_state.set(GameState::Live);
}

fn advance_generation(time: Res<Time>, mut sim: ResMut<Simulation>) {
    if sim.tick(time.delta()) {
        debug!(
            "generation {} with {} live cells",
            sim.grid.generation(),
            sim.grid.population()
        );
    }
}

fn handle_kbd(keyboard_input: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    if keyboard_input.just_pressed(KeyCode::Space) {
        if sim.grid.toggle_pause() {
            info!("paused at generation {}", sim.grid.generation());
        } else {
            info!("running from generation {}", sim.grid.generation());
        }
    }
    if keyboard_input.just_pressed(KeyCode::KeyX) {
        sim.grid.reset();
        info!("board cleared");
    }
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        sim.grid.randomize(&mut fastrand::Rng::new());
        info!("random soup with {} live cells", sim.grid.population());
    }
}

/// map the cursor to the cell under it, if any
fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    board: Res<Board>,
    mut hovered: ResMut<HoveredCell>,
) {
    let cell = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .and_then(|cursor| {
            let (camera, cam_transform) = camera.get_single().ok()?;
            camera.viewport_to_world_2d(cam_transform, cursor).ok()
        })
        .and_then(|world_pos| board.world_to_cell(world_pos));

    // only touch the resource when the hovered cell changes
    if hovered.0 != cell {
        hovered.0 = cell;
    }
}

fn edit_cells(
    mouse_input: Res<ButtonInput<MouseButton>>,
    hovered: Res<HoveredCell>,
    mut sim: ResMut<Simulation>,
) {
    let Some(coord) = hovered.0 else {
        return;
    };
    let alive = if mouse_input.pressed(MouseButton::Left) {
        true
    } else if mouse_input.pressed(MouseButton::Right) {
        false
    } else {
        return;
    };

    let (col, row) = (coord.x as usize, coord.y as usize);
    if sim.grid.is_alive(col, row) != alive {
        sim.grid.set_cell(col, row, alive);
    }
}

fn paint_cells(
    mut cell_query: Query<(&Cell, &mut MeshMaterial2d<ColorMaterial>)>,
    sim: Res<Simulation>,
    hovered: Res<HoveredCell>,
    meshes_and_mats: Res<MeshAndMats>,
) {
    for (cell, mut material) in cell_query.iter_mut() {
        let look = CellLook::new(
            sim.grid.is_alive(cell.x as usize, cell.y as usize),
            hovered.0 == Some(**cell),
        );
        let wanted = meshes_and_mats.material(look);
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

fn update_title(sim: Res<Simulation>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };
    let title = format!(
        "{WINDOW_TITLE} | generation {} | {} alive{}",
        sim.grid.generation(),
        sim.grid.population(),
        if sim.grid.is_paused() { " | paused" } else { "" }
    );
    if window.title != title {
        window.title = title;
    }
}

// ——> COMPONENTS

/// grid coordinate of the cell an entity draws
#[derive(Component, Debug, Deref)]
#[require(Mesh2d)]
struct Cell(UVec2);

/// The four ways a cell can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLook {
    Dead,
    Alive,
    HoveredDead,
    HoveredAlive,
}

impl CellLook {
    pub fn new(alive: bool, hovered: bool) -> Self {
        match (alive, hovered) {
            (false, false) => Self::Dead,
            (true, false) => Self::Alive,
            (false, true) => Self::HoveredDead,
            (true, true) => Self::HoveredAlive,
        }
    }
}

// ——> RESOURCES

/// Everything the game loop owns: the grid (with its pause flag) and the generation clock.
#[derive(Resource, Debug)]
pub struct Simulation {
    pub grid: LifeGrid,
    clock: Timer,
}

impl Simulation {
    pub fn new(grid: LifeGrid, interval: Duration) -> Self {
        Self {
            grid,
            clock: Timer::new(interval, TimerMode::Repeating),
        }
    }

    /// Advances the clock by `delta` and computes at most one generation, only while running and
    /// once the interval has elapsed. Returns whether a generation was computed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.clock.tick(delta);
        if self.grid.is_paused() || !self.clock.just_finished() {
            return false;
        }
        self.grid.step();
        true
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(
            LifeGrid::from_pixel_area(SCREEN_WIDTH, SCREEN_HEIGHT, CELL_SIZE_PX),
            Duration::from_millis(GEN_INTERVAL_MS),
        )
    }
}

/// cell under the pointer, `None` when the pointer is off the board
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoveredCell(pub Option<UVec2>);

/// hold handles for the cell mesh and materials
#[derive(Resource, Clone)]
struct MeshAndMats {
    cell: Handle<Mesh>,
    dead: Handle<ColorMaterial>,
    alive: Handle<ColorMaterial>,
    hovered_dead: Handle<ColorMaterial>,
    hovered_alive: Handle<ColorMaterial>,
}

impl MeshAndMats {
    fn material(&self, look: CellLook) -> &Handle<ColorMaterial> {
        match look {
            CellLook::Dead => &self.dead,
            CellLook::Alive => &self.alive,
            CellLook::HoveredDead => &self.hovered_dead,
            CellLook::HoveredAlive => &self.hovered_alive,
        }
    }
}

/// Placement of the grid in world space. Row 0 is the top row.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Board {
    /// the center of the board
    pub center: Vec2,
    /// the amount of cells on each axis
    pub cols: u32,
    pub rows: u32,
    /// side length of each individual cell
    pub cell_size: f32,
}

impl Board {
    pub fn for_grid(grid: &LifeGrid, cell_size: f32, center: Vec2) -> Self {
        Self {
            center,
            cols: grid.cols() as u32,
            rows: grid.rows() as u32,
            cell_size,
        }
    }

    /// computes full size of the board in pixels
    #[inline]
    pub fn pixel_size(&self) -> Vec2 {
        vec2(
            self.cols as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        )
    }

    #[inline]
    fn top_left(&self) -> Vec2 {
        let half = self.pixel_size() * 0.5;
        vec2(self.center.x - half.x, self.center.y + half.y)
    }

    #[inline]
    pub fn cell_coord_to_translation(&self, cell_coord: UVec2) -> Vec3 {
        let offset = cell_coord.as_vec2() * self.cell_size + self.cell_size * 0.5;
        (self.top_left() + vec2(offset.x, -offset.y)).extend(10.0)
    }

    /// Floor-divides the offset from the board's top-left corner by the cell size. Positions
    /// off the board give `None`.
    pub fn world_to_cell(&self, world_pos: Vec2) -> Option<UVec2> {
        let top_left = self.top_left();
        let local = vec2(world_pos.x - top_left.x, top_left.y - world_pos.y);
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }

        let coord = (local / self.cell_size).floor().as_uvec2();
        (coord.x < self.cols && coord.y < self.rows).then_some(coord)
    }
}

#[cfg(test)]
mod test {
    use bevy::math::vec3;

    use super::*;

    fn small_board() -> Board {
        Board {
            center: Vec2::ZERO,
            cols: 8,
            rows: 4,
            cell_size: 10.0,
        }
    }

    #[test]
    fn board_works() {
        let board = small_board();
        assert_eq!(vec2(80., 40.), board.pixel_size());

        assert_eq!(
            vec3(-35.0, 15.0, 10.),
            board.cell_coord_to_translation(uvec2(0, 0))
        );
        assert_eq!(
            vec3(35.0, -15.0, 10.),
            board.cell_coord_to_translation(uvec2(7, 3))
        );
    }

    #[test]
    fn world_to_cell_floors_and_discards() {
        let board = small_board();

        assert_eq!(Some(uvec2(0, 0)), board.world_to_cell(vec2(-40.0, 20.0)));
        assert_eq!(Some(uvec2(0, 0)), board.world_to_cell(vec2(-30.5, 10.5)));
        assert_eq!(Some(uvec2(1, 1)), board.world_to_cell(vec2(-30.0, 10.0)));
        assert_eq!(Some(uvec2(7, 3)), board.world_to_cell(vec2(39.9, -19.9)));

        assert_eq!(None, board.world_to_cell(vec2(-40.1, 0.0)));
        assert_eq!(None, board.world_to_cell(vec2(0.0, 20.1)));
        assert_eq!(None, board.world_to_cell(vec2(40.0, 0.0)));
        assert_eq!(None, board.world_to_cell(vec2(0.0, -20.0)));
    }

    #[test]
    fn every_cell_center_maps_back() {
        let board = small_board();
        for y in 0..board.rows {
            for x in 0..board.cols {
                let center = board.cell_coord_to_translation(uvec2(x, y)).truncate();
                assert_eq!(Some(uvec2(x, y)), board.world_to_cell(center));
            }
        }
    }

    #[test]
    fn default_board_matches_window() {
        let sim = Simulation::default();
        let board = Board::for_grid(&sim.grid, CELL_SIZE_PX as f32, BOARD_POS);
        assert_eq!((80, 60), (board.cols, board.rows));
        assert_eq!(
            vec2(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32),
            board.pixel_size()
        );
    }

    #[test]
    fn cell_looks() {
        assert_eq!(CellLook::Dead, CellLook::new(false, false));
        assert_eq!(CellLook::Alive, CellLook::new(true, false));
        assert_eq!(CellLook::HoveredDead, CellLook::new(false, true));
        assert_eq!(CellLook::HoveredAlive, CellLook::new(true, true));
    }

    fn blinker_sim() -> Simulation {
        let mut grid = LifeGrid::new(5, 5);
        for col in 1..4 {
            grid.set_cell(col, 2, true);
        }
        Simulation::new(grid, Duration::from_millis(60))
    }

    #[test]
    fn paused_simulation_does_not_step() {
        let mut sim = blinker_sim();
        assert!(!sim.tick(Duration::from_millis(200)));
        assert_eq!(0, sim.grid.generation());
    }

    #[test]
    fn running_simulation_steps_once_per_interval() {
        let mut sim = blinker_sim();
        sim.grid.set_paused(false);

        assert!(!sim.tick(Duration::from_millis(30)));
        assert!(sim.tick(Duration::from_millis(30)));
        assert_eq!(1, sim.grid.generation());
        assert!(sim.grid.is_alive(2, 1) && sim.grid.is_alive(2, 3));

        // a long frame still computes a single generation
        assert!(sim.tick(Duration::from_millis(500)));
        assert_eq!(2, sim.grid.generation());
    }

    fn headless_app(sim: Simulation) -> App {
        let mut app = App::new();
        app.insert_resource(sim)
            .init_resource::<HoveredCell>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_systems(Update, (handle_kbd, edit_cells).chain());
        app
    }

    #[test]
    fn space_toggles_and_x_clears() {
        let mut app = headless_app(blinker_sim());

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::KeyX);
        app.update();

        let sim = app.world().resource::<Simulation>();
        assert!(!sim.grid.is_paused());
        assert_eq!(0, sim.grid.population());
    }

    #[test]
    fn mouse_buttons_edit_hovered_cell() {
        let mut app = headless_app(blinker_sim());

        app.world_mut().resource_mut::<HoveredCell>().0 = Some(uvec2(0, 4));
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.update();
        assert!(app.world().resource::<Simulation>().grid.is_alive(0, 4));

        let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
        mouse.release(MouseButton::Left);
        mouse.press(MouseButton::Right);
        app.update();
        assert!(!app.world().resource::<Simulation>().grid.is_alive(0, 4));
    }

    #[test]
    fn no_edit_off_the_board() {
        let mut app = headless_app(blinker_sim());

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Right);
        app.update();
        assert_eq!(3, app.world().resource::<Simulation>().grid.population());
    }
}
