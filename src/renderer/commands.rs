//! Draw lists for the board and for recorded raster frames

use serde::{Deserialize, Serialize};

use crate::settings::Config;
use crate::sim::{Raster, RenderView};

pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const FOREGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const TEXT: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

const SCORE_FONT_SIZE: i32 = 25;
const HINT_FONT_SIZE: i32 = 10;

/// A single drawing primitive in field coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        color: [f32; 4],
    },
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: [f32; 4],
    },
    Point {
        x: i32,
        y: i32,
        color: [f32; 4],
    },
    Text {
        x: i32,
        y: i32,
        size: i32,
        text: String,
        color: [f32; 4],
    },
}

fn fill_rect(x: i32, y: i32, width: i32, height: i32) -> DrawCommand {
    DrawCommand::FillRect {
        x,
        y,
        width,
        height,
        color: FOREGROUND,
    }
}

fn text(x: i32, y: i32, size: i32, text: impl Into<String>) -> DrawCommand {
    DrawCommand::Text {
        x,
        y,
        size,
        text: text.into(),
        color: TEXT,
    }
}

/// Board draw list: background, divider, paddles, ball, scores, key hints
pub fn scene_commands(view: &RenderView, config: &Config) -> Vec<DrawCommand> {
    let (w, h) = (config.width, config.height);
    let (pw, ph) = (config.paddle_width, config.paddle_height);
    let (bw, bh) = (config.ball_width, config.ball_height);

    let mut commands = vec![
        DrawCommand::Clear { color: BACKGROUND },
        fill_rect(w / 2 - config.divider_width / 2, 0, config.divider_width, h),
        fill_rect(0, view.paddle_one_y - ph / 2, pw, ph),
        fill_rect(w - pw, view.paddle_two_y - ph / 2, pw, ph),
        fill_rect(view.ball_x - bw / 2, view.ball_y - bh / 2, bw, bh),
        text(
            w / 2 - (SCORE_FONT_SIZE + 10),
            SCORE_FONT_SIZE + 5,
            SCORE_FONT_SIZE,
            view.score.one.to_string(),
        ),
        text(
            w / 2 + 20,
            SCORE_FONT_SIZE + 5,
            SCORE_FONT_SIZE,
            view.score.two.to_string(),
        ),
    ];

    // Key hints for keyboard-driven sides
    if view.human[0] {
        commands.push(text(5, h - HINT_FONT_SIZE * 3, HINT_FONT_SIZE, "A"));
        commands.push(text(5, h - HINT_FONT_SIZE * 2, HINT_FONT_SIZE, "Z"));
    }
    if view.human[1] {
        let x = w - HINT_FONT_SIZE * 2 - 5;
        commands.push(text(x, h - HINT_FONT_SIZE * 3, HINT_FONT_SIZE, "UP"));
        commands.push(text(x, h - HINT_FONT_SIZE * 2, HINT_FONT_SIZE, "DN"));
    }

    commands
}

/// One point per set cell, on a cleared background
pub fn raster_commands(raster: &Raster) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(raster.count_set() + 1);
    commands.push(DrawCommand::Clear { color: BACKGROUND });

    for (y, row) in raster.cells.chunks(raster.width.max(1)).enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell != 0 {
                commands.push(DrawCommand::Point {
                    x: x as i32,
                    y: y as i32,
                    color: FOREGROUND,
                });
            }
        }
    }

    commands
}
