//! Saved-match text format
//!
//! ```text
//! # width height paddleHeight dataCount
//! ballX
//! ballY
//! paddle1Y
//! paddle2Y
//! ...
//! ```
//!
//! `dataCount` is the number of integers that follow, four per tick.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::MatchLogError;
use crate::settings::Config;
use crate::sim::{MatchObserver, PositionSnapshot};

/// Integers stored per tick
pub const VALUES_PER_FRAME: usize = 4;

/// Upper bound on buffer space reserved from an unverified header count
const MAX_PREALLOCATED_VALUES: usize = 1 << 16;

/// Every tick of one or more simulated matches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchLog {
    pub width: i32,
    pub height: i32,
    pub paddle_height: i32,
    frames: Vec<PositionSnapshot>,
}

impl MatchLog {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.width,
            height: config.height,
            paddle_height: config.paddle_height,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, positions: PositionSnapshot) {
        self.frames.push(positions);
    }

    pub fn frames(&self) -> &[PositionSnapshot] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of integers after the header
    pub fn data_count(&self) -> usize {
        self.frames.len() * VALUES_PER_FRAME
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(
            writer,
            "# {} {} {} {}",
            self.width,
            self.height,
            self.paddle_height,
            self.data_count()
        )?;
        for frame in &self.frames {
            for value in frame.to_array() {
                writeln!(writer, "{}", value)?;
            }
        }
        writer.flush()
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, MatchLogError> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, line)| line.map(|l| (i + 1, l)));

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let (_, text) = line?;
                    if !text.trim().is_empty() {
                        break text;
                    }
                }
                None => return Err(MatchLogError::MissingHeader),
            }
        };
        let (width, height, paddle_height, expected) = parse_header(&header)?;

        let mut values = Vec::with_capacity(expected.min(MAX_PREALLOCATED_VALUES));
        for line in lines {
            if values.len() == expected {
                break;
            }
            let (number, text) = line?;
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let value = text.parse::<i32>().map_err(|_| MatchLogError::InvalidValue {
                line: number,
                value: text.to_string(),
            })?;
            values.push(value);
        }

        if values.len() < expected {
            return Err(MatchLogError::Truncated {
                expected,
                found: values.len(),
            });
        }

        let frames = values
            .chunks_exact(VALUES_PER_FRAME)
            .map(|c| PositionSnapshot::from_array([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            width,
            height,
            paddle_height,
            frames,
        })
    }

    pub fn parse(text: &str) -> Result<Self, MatchLogError> {
        Self::read_from(text.as_bytes())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MatchLogError> {
        let path = path.as_ref();
        self.write_to(BufWriter::new(File::create(path)?))?;
        log::info!(
            "Saved {} frames to {}",
            self.frames.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MatchLogError> {
        let path = path.as_ref();
        let log = Self::read_from(BufReader::new(File::open(path)?))?;
        log::info!("Loaded {} frames from {}", log.frames.len(), path.display());
        Ok(log)
    }
}

fn parse_header(line: &str) -> Result<(i32, i32, i32, usize), MatchLogError> {
    let invalid = || MatchLogError::InvalidHeader(line.to_string());

    let body = line.trim().strip_prefix('#').ok_or(MatchLogError::MissingHeader)?;
    let fields: Vec<&str> = body.split_whitespace().collect();
    let &[width, height, paddle_height, count] = fields.as_slice() else {
        return Err(invalid());
    };

    let width = width.parse().map_err(|_| invalid())?;
    let height = height.parse().map_err(|_| invalid())?;
    let paddle_height = paddle_height.parse().map_err(|_| invalid())?;
    let count: usize = count.parse().map_err(|_| invalid())?;
    if count % VALUES_PER_FRAME != 0 {
        return Err(invalid());
    }

    Ok((width, height, paddle_height, count))
}

/// Records every tick, including warm-up ticks
impl MatchObserver for MatchLog {
    fn on_tick(&mut self, positions: PositionSnapshot) {
        self.push(positions);
    }
}
