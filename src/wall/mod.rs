//! Click-to-place wall generation docked to existing polygons.
mod dock;
mod generate;
mod tool;

pub use dock::{get_dock_edge, EdgeInfo};
pub use generate::{generate_wall, make_wall, wall_shape_to_append};
pub use tool::WallTool;

use serde::{Deserialize, Serialize};

/// Wall thickness used when the caller does not pick one.
pub const DEFAULT_WALL_THICKNESS: f64 = 500.0;

/// Size of the free-standing wall placed when there is nothing to dock to.
pub const DEFAULT_CLICK_WIDTH: f64 = 2000.0;
pub const DEFAULT_CLICK_HEIGHT: f64 = 500.0;

/// Tunables for [`WallTool`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WallToolConfig {
    pub thickness: f64,
    pub default_click_width: f64,
    pub default_click_height: f64,
    /// Press and release closer than this count as a click.
    pub click_epsilon: f64,
}

impl Default for WallToolConfig {
    fn default() -> Self {
        Self {
            thickness: DEFAULT_WALL_THICKNESS,
            default_click_width: DEFAULT_CLICK_WIDTH,
            default_click_height: DEFAULT_CLICK_HEIGHT,
            click_epsilon: 1e-3,
        }
    }
}
