//! Cell buffer the scene is painted into before conversion to text.

use haneul_core::Rgb;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::color::to_color;

/// One terminal cell in linear scene colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        }
    }
}

/// Row-major grid of cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Resize and clear if the dimensions changed.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width != self.width || height != self.height {
            *self = Self::new(width, height);
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x as i32, y as i32).map(|i| &self.cells[i])
    }

    /// Overwrite a cell; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Draw a glyph over the existing background.
    pub fn put(&mut self, x: i32, y: i32, ch: char, fg: Rgb) {
        if let Some(i) = self.index(x, y) {
            let cell = &mut self.cells[i];
            cell.ch = ch;
            cell.fg = fg;
        }
    }

    /// Fill the background of a cell, clearing its glyph.
    pub fn fill(&mut self, x: i32, y: i32, bg: Rgb) {
        self.set(x, y, Cell { ch: ' ', fg: bg, bg });
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to styled lines with `exposure` applied to every color.
    pub fn to_lines(&self, exposure: f32) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .take(self.height as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| {
                        Span::styled(
                            cell.ch.to_string(),
                            Style::new()
                                .fg(to_color(cell.fg, exposure))
                                .bg(to_color(cell.bg, exposure)),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}
