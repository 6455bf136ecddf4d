//! Status screen layout
//!
//! ```text
//! +--------------------------------------------------------------+
//! | |#| |#| | | |#| | | | |         +----------------+ [touch]  |
//! | |#| |#| |#| |#| | | |#|         |                |          |
//! | |#| |#| |#| |#| |#| |#|         |      ##        |          |
//! +--------------------------------------------------------------+
//!   six analog bars                   touch grid, selected cell
//! ```

use xsynth_core::InputState;
use xsynth_drivers::display::HEIGHT;
use xsynth_drivers::Framebuffer;
use xsynth_protocol::NUM_POTENTIOMETERS;

/// Pixel intensity used for everything drawn
const ON: u8 = 0xFF;

const BAR_LEFT: usize = 2;
const BAR_WIDTH: usize = 8;
const BAR_PITCH: usize = 12;
const BAR_TOP: usize = 2;
const BAR_HEIGHT: usize = HEIGHT - 2 * BAR_TOP;

const GRID_LEFT: usize = 76;
const GRID_TOP: usize = 8;
const GRID_SPAN: usize = 48;

const TOUCH_LEFT: usize = 124;
const TOUCH_SIZE: usize = 4;

/// Redraw the whole status screen from `state`
pub fn render_status(fb: &mut Framebuffer, state: &InputState) {
    fb.clear();

    for (channel, value) in state.analog_values().iter().enumerate() {
        draw_bar(fb, channel, *value);
    }

    let grid = state.grid();
    let cell = cell_size(grid.size());
    let span = cell * grid.size() as usize;
    fb.draw_rect(GRID_LEFT - 1, GRID_TOP - 1, span + 2, span + 2, ON);

    let (x, y) = grid.selection();
    fb.fill_rect(
        GRID_LEFT + x as usize * cell,
        GRID_TOP + y as usize * cell,
        cell,
        cell,
        ON,
    );

    if grid.is_touched() {
        fb.fill_rect(TOUCH_LEFT, 0, TOUCH_SIZE, TOUCH_SIZE, ON);
    }
}

fn draw_bar(fb: &mut Framebuffer, channel: usize, value: f32) {
    debug_assert!(channel < NUM_POTENTIOMETERS);
    let left = BAR_LEFT + channel * BAR_PITCH;
    fb.draw_rect(left, BAR_TOP, BAR_WIDTH, BAR_HEIGHT, ON);

    let inner = BAR_HEIGHT - 2;
    let filled = bar_fill(value, inner);
    let bottom = BAR_TOP + BAR_HEIGHT - 1;
    fb.fill_rect(left + 1, bottom - filled, BAR_WIDTH - 2, filled, ON);
}

/// Filled rows of a bar with `inner` rows for a normalized value
fn bar_fill(value: f32, inner: usize) -> usize {
    let rows = (value.clamp(0.0, 1.0) * inner as f32 + 0.5) as usize;
    rows.min(inner)
}

/// Largest square cell that fits the grid in its area
fn cell_size(grid_size: u8) -> usize {
    (GRID_SPAN / grid_size.max(1) as usize).max(1)
}
