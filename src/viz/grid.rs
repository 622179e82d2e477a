//! Step-grid widget for ratatui

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Widget},
};

/// Symbol for a step with `count` cues on it.
pub fn step_symbol(count: usize) -> char {
    match count {
        0 => '·',
        1 => 'x',
        2 => 'X',
        _ => '#',
    }
}

/// A widget that displays one bar as 16 step cells, grouped by beat,
/// with an optional playhead.
pub struct StepGrid<'a> {
    hits: &'a [usize],
    cursor: Option<usize>,
    style: Style,
    block: Option<Block<'a>>,
}

impl<'a> StepGrid<'a> {
    pub fn new(hits: &'a [usize]) -> Self {
        Self {
            hits,
            cursor: None,
            style: Style::default(),
            block: None,
        }
    }

    /// Highlight the step the transport is currently on.
    pub fn cursor(mut self, step: usize) -> Self {
        self.cursor = Some(step);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_grid(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let y = area.y;
        for (step, &count) in self.hits.iter().enumerate() {
            // Two columns per step plus a gap between beat groups of four.
            let x = area.x + (step * 2 + step / 4) as u16;
            if x >= area.x + area.width {
                break;
            }
            let style = if self.cursor == Some(step) {
                self.style.add_modifier(Modifier::REVERSED)
            } else {
                self.style
            };
            buf.set_string(x, y, step_symbol(count).to_string(), style);
        }
    }
}

impl Widget for StepGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_area = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        self.render_grid(inner_area, buf);
    }
}
