//! Rolling history of training frames
//!
//! Two parallel newest-first sequences: compact positions and monochrome
//! rasters. Both always hold exactly `history_depth` entries, zero-filled
//! after a reset.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddles, Side};
use crate::settings::Config;

/// Ball and paddle positions for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub ball_x: i32,
    pub ball_y: i32,
    pub paddle_one_y: i32,
    pub paddle_two_y: i32,
}

impl PositionSnapshot {
    pub fn capture(ball: &Ball, paddles: &Paddles) -> Self {
        Self {
            ball_x: ball.pos.x,
            ball_y: ball.pos.y,
            paddle_one_y: paddles.get(Side::One).y,
            paddle_two_y: paddles.get(Side::Two).y,
        }
    }

    pub fn to_array(self) -> [i32; 4] {
        [self.ball_x, self.ball_y, self.paddle_one_y, self.paddle_two_y]
    }

    pub fn from_array([ball_x, ball_y, paddle_one_y, paddle_two_y]: [i32; 4]) -> Self {
        Self {
            ball_x,
            ball_y,
            paddle_one_y,
            paddle_two_y,
        }
    }
}

/// Row-major monochrome bitmap: 1 for ball or paddle cells, 0 elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
}

impl Raster {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Draw the ball cell and both paddle columns
    pub fn capture(ball: &Ball, paddles: &Paddles, config: &Config) -> Self {
        let mut raster = Self::blank(config.width as usize, config.height as usize);

        // A ball sitting exactly on the right edge line has no cell
        raster.set(ball.pos.x, ball.pos.y);

        for side in Side::BOTH {
            let column = match side {
                Side::One => 0,
                Side::Two => config.width - 1,
            };
            for row in paddles.get(side).raster_rows(config) {
                raster.set(column, row);
            }
        }

        raster
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        (x < self.width && y < self.height).then(|| self.width * y + x)
    }

    /// Set a cell; coordinates outside the bitmap are ignored
    pub fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = 1;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.index(x, y).map_or(0, |i| self.cells[i])
    }

    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Horizontal flip, so a policy trained on one side can play the other
    pub fn mirrored(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in self.cells.chunks(self.width.max(1)) {
            cells.extend(row.iter().rev());
        }
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

/// Mirror a raster frame left-to-right
pub fn mirror(raster: &Raster) -> Raster {
    raster.mirrored()
}

/// Newest-first rolling buffers of training frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameHistory {
    depth: usize,
    width: usize,
    height: usize,
    positions: Vec<PositionSnapshot>,
    rasters: Vec<Raster>,
}

impl FrameHistory {
    pub fn new(config: &Config) -> Self {
        let mut history = Self {
            depth: config.history_depth,
            width: config.width as usize,
            height: config.height as usize,
            positions: Vec::with_capacity(config.history_depth + 1),
            rasters: Vec::with_capacity(config.history_depth + 1),
        };
        history.clear();
        history
    }

    /// Refill both sequences with zeroed entries
    pub fn clear(&mut self) {
        self.positions.clear();
        self.positions
            .resize(self.depth, PositionSnapshot::default());
        self.rasters.clear();
        self.rasters
            .resize(self.depth, Raster::blank(self.width, self.height));
    }

    /// Capture the current tick at the front, dropping the oldest entry
    pub fn record(&mut self, ball: &Ball, paddles: &Paddles, config: &Config) {
        self.positions
            .insert(0, PositionSnapshot::capture(ball, paddles));
        self.rasters.insert(0, Raster::capture(ball, paddles, config));
        self.positions.truncate(self.depth);
        self.rasters.truncate(self.depth);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Positions, newest first
    pub fn positions(&self) -> &[PositionSnapshot] {
        &self.positions
    }

    /// Rasters, newest first
    pub fn rasters(&self) -> &[Raster] {
        &self.rasters
    }

    pub fn latest_position(&self) -> Option<&PositionSnapshot> {
        self.positions.first()
    }

    pub fn latest_raster(&self) -> Option<&Raster> {
        self.rasters.first()
    }

    /// Newest raster minus the one before it, cell by cell.
    ///
    /// This is the learner's input record: +1 where something arrived, -1
    /// where it left. `None` with fewer than two frames of depth.
    pub fn difference(&self) -> Option<Vec<i8>> {
        let [newest, previous, ..] = self.rasters.as_slice() else {
            return None;
        };
        Some(
            newest
                .cells
                .iter()
                .zip(&previous.cells)
                .map(|(&a, &b)| a as i8 - b as i8)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Paddle;

    fn small_config() -> Config {
        Config {
            width: 8,
            height: 6,
            paddle_height: 3,
            history_depth: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_history_is_zero_filled() {
        let history = FrameHistory::new(&small_config());
        assert_eq!(history.positions().len(), 2);
        assert_eq!(history.rasters().len(), 2);
        assert!(history.rasters().iter().all(|r| r.count_set() == 0));
        assert_eq!(history.positions()[1], PositionSnapshot::default());
    }

    #[test]
    fn test_raster_marks_ball_and_paddles() {
        let config = small_config();
        let ball = Ball::new(3, 2, 1, 1);
        let paddles = Paddles([Paddle { y: 1 }, Paddle { y: 4 }]);
        let raster = Raster::capture(&ball, &paddles, &config);

        assert_eq!(raster.get(3, 2), 1);
        // Paddle one: rows [0, 2) in column 0
        assert_eq!(raster.get(0, 0), 1);
        assert_eq!(raster.get(0, 1), 1);
        assert_eq!(raster.get(0, 2), 0);
        // Paddle two: rows [3, 5) in column 7
        assert_eq!(raster.get(7, 3), 1);
        assert_eq!(raster.get(7, 4), 1);
        assert_eq!(raster.get(7, 5), 0);
        assert_eq!(raster.count_set(), 5);
    }

    #[test]
    fn test_ball_on_edge_line_is_skipped() {
        let config = small_config();
        let ball = Ball::new(8, 5, 1, 1);
        let paddles = Paddles([Paddle { y: 1 }, Paddle { y: 1 }]);
        let raster = Raster::capture(&ball, &paddles, &config);
        assert_eq!(raster.count_set(), 4);
    }

    #[test]
    fn test_record_is_fifo() {
        let config = small_config();
        let mut history = FrameHistory::new(&config);
        let paddles = Paddles([Paddle { y: 3 }, Paddle { y: 3 }]);

        for x in 1..=3 {
            history.record(&Ball::new(x, 2, 1, 0), &paddles, &config);
        }

        assert_eq!(history.positions().len(), 2);
        assert_eq!(history.rasters().len(), 2);
        assert_eq!(history.positions()[0].ball_x, 3);
        assert_eq!(history.positions()[1].ball_x, 2);
        assert_eq!(history.latest_raster().unwrap().get(3, 2), 1);
        assert_eq!(history.rasters()[1].get(2, 2), 1);
    }

    #[test]
    fn test_difference_of_newest_frames() {
        let config = small_config();
        let mut history = FrameHistory::new(&config);
        let paddles = Paddles([Paddle { y: 1 }, Paddle { y: 4 }]);

        // Against the zero-filled entry only the new cells show up
        history.record(&Ball::new(3, 2, 1, 0), &paddles, &config);
        let diff = history.difference().unwrap();
        assert_eq!(diff.len(), 48);
        assert_eq!(diff.iter().filter(|&&c| c == 1).count(), 5);
        assert!(diff.iter().all(|&c| c >= 0));

        history.record(&Ball::new(4, 2, 1, 0), &paddles, &config);
        let diff = history.difference().unwrap();
        assert_eq!(diff[2 * 8 + 4], 1);
        assert_eq!(diff[2 * 8 + 3], -1);
        // Paddles did not move
        assert_eq!(diff.iter().filter(|&&c| c != 0).count(), 2);
    }

    #[test]
    fn test_difference_needs_two_frames() {
        let config = Config {
            history_depth: 1,
            ..small_config()
        };
        assert_eq!(FrameHistory::new(&config).difference(), None);
    }

    #[test]
    fn test_mirror_reverses_rows() {
        let mut raster = Raster::blank(4, 2);
        raster.set(0, 0);
        raster.set(1, 1);
        let flipped = mirror(&raster);
        assert_eq!(flipped.cells, vec![0, 0, 0, 1, 0, 0, 1, 0]);
        assert_eq!(flipped.mirrored(), raster);
    }

    #[test]
    fn test_position_array_roundtrip() {
        let snap = PositionSnapshot::from_array([1, 2, 3, 4]);
        assert_eq!(snap.paddle_two_y, 4);
        assert_eq!(snap.to_array(), [1, 2, 3, 4]);
    }
}
