//! Training-frame export
//!
//! One JSON object per recorded frame, newline separated. Write errors are
//! held until `finish` since observers cannot fail.

use std::io::{self, Write};

use serde::Serialize;

use crate::sim::{FrameHistory, MatchObserver, PositionSnapshot, Raster, Score, Side};

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    game: u32,
    positions: &'a [PositionSnapshot],
    #[serde(skip_serializing_if = "Option::is_none")]
    rasters: Option<&'a [Raster]>,
    /// Newest raster minus the previous one
    #[serde(skip_serializing_if = "Option::is_none")]
    difference: Option<Vec<i8>>,
}

/// Streams each recorded history as a JSON line
pub struct TrainingExporter<W: Write> {
    writer: W,
    include_rasters: bool,
    include_difference: bool,
    frames: u64,
    game: u32,
    error: Option<io::Error>,
}

impl<W: Write> TrainingExporter<W> {
    pub fn new(writer: W, include_rasters: bool) -> Self {
        Self {
            writer,
            include_rasters,
            include_difference: false,
            frames: 0,
            game: 0,
            error: None,
        }
    }

    /// Also write the difference frame with each record
    pub fn with_difference(mut self, include: bool) -> Self {
        self.include_difference = include;
        self
    }

    /// Frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn write_record(&mut self, history: &FrameHistory) -> io::Result<()> {
        let record = FrameRecord {
            frame: self.frames,
            game: self.game,
            positions: history.positions(),
            rasters: self.include_rasters.then(|| history.rasters()),
            difference: if self.include_difference {
                history.difference()
            } else {
                None
            },
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")
    }

    /// Flush and report the first write error, if any
    pub fn finish(mut self) -> io::Result<u64> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.frames)
    }
}

impl<W: Write> MatchObserver for TrainingExporter<W> {
    fn on_frame_recorded(&mut self, history: &FrameHistory) {
        if self.error.is_some() {
            return;
        }
        match self.write_record(history) {
            Ok(()) => self.frames += 1,
            Err(err) => {
                log::warn!("Training export failed: {}", err);
                self.error = Some(err);
            }
        }
    }

    fn on_game_over(&mut self, _scorer: Side, _score: &Score) {
        self.game += 1;
    }
}
