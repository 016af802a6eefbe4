//! The paint side of rendering: where positioned text runs end up.

use crate::style::Rgb;
use serde::Serialize;
use std::fmt::Write;

/// Receives positioned text runs. Never feeds back into layout.
pub trait PaintSink {
    fn draw(&mut self, text: &str, x: f32, y: f32, scale: f32, color: Rgb);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub color: Rgb,
}

/// A sink that records every draw call in issue order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DisplayList {
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaintCommand> {
        self.commands.iter()
    }

    /// All painted text, one command per line.
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.text.as_str()).collect()
    }
}

impl PaintSink for DisplayList {
    fn draw(&mut self, text: &str, x: f32, y: f32, scale: f32, color: Rgb) {
        self.commands.push(PaintCommand {
            text: text.to_string(),
            x,
            y,
            scale,
            color,
        });
    }
}

/// Compact text form: `y x scale #rrggbb text`, one command per line.
pub fn to_compact_string(list: &DisplayList) -> String {
    let mut out = String::new();
    for cmd in &list.commands {
        let _ = writeln!(
            out,
            "{:.1} {:.1} {:.2} #{:02x}{:02x}{:02x} {}",
            cmd.y,
            cmd.x,
            cmd.scale,
            channel(cmd.color.r),
            channel(cmd.color.g),
            channel(cmd.color.b),
            cmd.text
        );
    }
    out
}

fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
