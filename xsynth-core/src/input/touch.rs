//! Touch grid tracking
//!
//! The MCU reports the touched cell of an N×N capacitive grid. Coordinates
//! outside the grid mean nothing is touched.

/// Grid cells per side on the production panel
pub const DEFAULT_GRID_SIZE: u8 = 11;

/// What changed after one touch sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchUpdate {
    /// New touch state, if it flipped
    pub touch_changed: Option<bool>,
    /// New selected cell, if it moved
    pub selected: Option<(u8, u8)>,
}

/// Touch grid selection state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchGrid {
    size: u8,
    selection: (u8, u8),
    touched: bool,
}

impl Default for TouchGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl TouchGrid {
    /// Create a grid with the center cell selected
    ///
    /// The grid starts out touched on that cell, so the first frame without
    /// a finger on the grid reports a release.
    pub fn new(size: u8) -> Self {
        let center = size / 2;
        Self {
            size,
            selection: (center, center),
            touched: true,
        }
    }

    /// Check if a cell lies on the grid
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size
    }

    /// Feed the touch bytes of one frame
    pub fn update(&mut self, touch: [u8; 2]) -> TouchUpdate {
        let [x, y] = touch;
        let touched = self.contains(x, y);
        let mut update = TouchUpdate::default();

        if touched != self.touched {
            self.touched = touched;
            update.touch_changed = Some(touched);
        }

        // Selection only follows the finger; lifting keeps the last cell
        if touched && self.selection != (x, y) {
            self.selection = (x, y);
            update.selected = Some((x, y));
        }

        update
    }

    /// Currently selected cell
    pub fn selection(&self) -> (u8, u8) {
        self.selection
    }

    /// Check if the grid is currently touched
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Cells per side
    pub fn size(&self) -> u8 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selection_is_center() {
        let grid = TouchGrid::default();
        assert_eq!(grid.selection(), (5, 5));
        assert!(grid.is_touched());
    }

    #[test]
    fn test_first_untouched_sample_reports_release() {
        let mut grid = TouchGrid::default();
        let update = grid.update([255, 255]);
        assert_eq!(update.touch_changed, Some(false));
        assert_eq!(update.selected, None);
        assert!(!grid.is_touched());
        assert_eq!(grid.selection(), (5, 5));
    }

    #[test]
    fn test_touch_at_current_selection() {
        let mut grid = TouchGrid::default();
        assert_eq!(grid.update([5, 5]), TouchUpdate::default());

        grid.update([255, 255]);
        let update = grid.update([5, 5]);
        assert_eq!(update.touch_changed, Some(true));
        assert_eq!(update.selected, None);
    }

    #[test]
    fn test_drag_and_release() {
        let mut grid = TouchGrid::default();
        grid.update([5, 5]);

        let update = grid.update([6, 5]);
        assert_eq!(update.touch_changed, None);
        assert_eq!(update.selected, Some((6, 5)));

        let update = grid.update([255, 255]);
        assert_eq!(update.touch_changed, Some(false));
        assert_eq!(update.selected, None);
        assert_eq!(grid.selection(), (6, 5));

        // Still released: nothing new
        assert_eq!(grid.update([11, 0]), TouchUpdate::default());
    }

    #[test]
    fn test_edge_cells() {
        let grid = TouchGrid::new(11);
        assert!(grid.contains(0, 0));
        assert!(grid.contains(10, 10));
        assert!(!grid.contains(11, 10));
        assert!(!grid.contains(10, 11));
    }
}
