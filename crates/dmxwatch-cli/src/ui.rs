//! Terminal render surface (crossterm) and the interactive event loop.
//!
//! The painter owns all geometry: cells per row adapt to the terminal
//! width, the grid starts under a one-line header, and the timecode strip
//! sits below the grid. Incremental paints move the cursor straight to the
//! changed cells and touch nothing else, so the cost of a frame tracks the
//! diff size, not the grid size.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use dmxwatch_core::{
    DMX_CHANNELS, DisplayFilter, Monitor, RedrawBatch, RenderSurface, Snapshot, dmx_cell_style,
    format_dmx_value, format_timecode_field, frame_rate_label,
};

const CELL_WIDTH: u16 = 4;
const GUTTER_WIDTH: u16 = 5;
const GRID_TOP: u16 = 2;
const TIMECODE_CELL_STRIDE: u16 = 3;
const POLL_INTERVAL: Duration = Duration::from_millis(25);

pub fn run(monitor: &Monitor) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    if let Err(err) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(err).context("enter alternate screen");
    }

    let result = event_loop(monitor);

    // Restore the terminal even when the loop failed.
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
    result
}

fn event_loop(monitor: &Monitor) -> Result<()> {
    let (width, _) = crossterm::terminal::size().context("query terminal size")?;
    let mut painter = GridPainter::new(io::stdout(), width);

    let snapshot = monitor.snapshot();
    let mut received = snapshot.last_universe;
    let mut entry = String::new();
    painter.paint_all(&snapshot).context("initial paint")?;
    painter.draw_header(snapshot.filter, &entry, received)?;

    loop {
        if event::poll(POLL_INTERVAL).context("poll input")? {
            match event::read().context("read input")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(key, monitor, &mut entry) {
                        return Ok(());
                    }
                    painter.draw_header(monitor.filter(), &entry, received)?;
                }
                Event::Resize(width, _) => {
                    painter.resize(width);
                    let snapshot = monitor.snapshot();
                    received = snapshot.last_universe;
                    painter.paint_all(&snapshot).context("repaint after resize")?;
                    painter.draw_header(snapshot.filter, &entry, received)?;
                }
                _ => {}
            }
        }

        if let Some(batch) = monitor.take_redraw() {
            painter.paint_changed(&batch).context("incremental paint")?;
            if batch.last_universe != received {
                received = batch.last_universe;
                painter.draw_header(monitor.filter(), &entry, received)?;
            }
        }
    }
}

/// Apply one key press; returns whether the user asked to quit.
fn handle_key(key: KeyEvent, monitor: &Monitor, entry: &mut String) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('a' | 'A') => {
            entry.clear();
            monitor.set_filter(DisplayFilter::All);
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if entry.len() < 5 {
                entry.push(c);
            }
        }
        KeyCode::Backspace => {
            entry.pop();
        }
        KeyCode::Esc => entry.clear(),
        KeyCode::Enter => {
            // Anything unparsable (empty, overflow) keeps the current filter.
            if let Ok(universe) = entry.parse::<u16>() {
                monitor.set_filter(DisplayFilter::Only(universe));
            }
            entry.clear();
        }
        _ => {}
    }
    false
}

struct GridPainter {
    out: Stdout,
    values_per_row: usize,
}

impl GridPainter {
    fn new(out: Stdout, width: u16) -> Self {
        Self {
            out,
            values_per_row: Self::columns_for(width),
        }
    }

    fn columns_for(width: u16) -> usize {
        usize::from(width.saturating_sub(GUTTER_WIDTH) / CELL_WIDTH).clamp(8, 32)
    }

    fn resize(&mut self, width: u16) {
        self.values_per_row = Self::columns_for(width);
    }

    fn grid_rows(&self) -> u16 {
        DMX_CHANNELS.div_ceil(self.values_per_row) as u16
    }

    fn timecode_row(&self) -> u16 {
        GRID_TOP + self.grid_rows() + 1
    }

    fn cell_origin(&self, index: usize) -> (u16, u16) {
        let row = (index / self.values_per_row) as u16;
        let col = (index % self.values_per_row) as u16;
        (GUTTER_WIDTH + col * CELL_WIDTH, GRID_TOP + row)
    }

    fn draw_header(
        &mut self,
        filter: DisplayFilter,
        entry: &str,
        received: Option<u8>,
    ) -> Result<()> {
        let filter_text = match filter {
            DisplayFilter::All => "ALL".to_string(),
            DisplayFilter::Only(universe) => universe.to_string(),
        };
        let received_text = received.map_or_else(|| "-".to_string(), |u| u.to_string());

        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::CurrentLine),
            Print(format!(
                "Universe: {filter_text}   Received: {received_text}"
            )),
        )?;
        if !entry.is_empty() {
            queue!(self.out, Print(format!("   > {entry}_")))?;
        }
        queue!(
            self.out,
            SetForegroundColor(Color::DarkGrey),
            Print("   [a] all   [0-9]+enter universe   [q] quit"),
            ResetColor,
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn paint_dmx_cell(&mut self, index: usize, value: u8) -> io::Result<()> {
        let (x, y) = self.cell_origin(index);
        let style = dmx_cell_style(value);
        let fg = if style.dark_text {
            Color::Black
        } else {
            Color::White
        };
        let bg = Color::Rgb {
            r: style.gray,
            g: style.gray,
            b: style.gray,
        };
        queue!(
            self.out,
            MoveTo(x, y),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(format_dmx_value(value)),
            ResetColor,
        )
    }

    fn paint_timecode_cell(&mut self, index: usize, value: u8) -> io::Result<()> {
        let x = GUTTER_WIDTH + index as u16 * TIMECODE_CELL_STRIDE;
        let row = self.timecode_row();
        queue!(
            self.out,
            MoveTo(x, row),
            SetBackgroundColor(Color::Black),
            SetForegroundColor(Color::White),
            Print(format_timecode_field(value)),
            ResetColor,
        )
    }

    fn paint_rate_label(&mut self, code: u8) -> io::Result<()> {
        let x = GUTTER_WIDTH + 5 * TIMECODE_CELL_STRIDE + 1;
        let row = self.timecode_row();
        queue!(
            self.out,
            MoveTo(x, row),
            Clear(ClearType::UntilNewLine),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{} fps", frame_rate_label(code))),
            ResetColor,
        )
    }
}

impl RenderSurface for GridPainter {
    type Error = io::Error;

    fn paint_all(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;

        for row in 0..self.grid_rows() {
            let first_channel = usize::from(row) * self.values_per_row + 1;
            queue!(
                self.out,
                MoveTo(0, GRID_TOP + row),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("{first_channel:>4}")),
                ResetColor,
            )?;
        }
        for (index, value) in snapshot.dmx.iter().enumerate() {
            self.paint_dmx_cell(index, *value)?;
        }

        let tc_row = self.timecode_row();
        queue!(
            self.out,
            MoveTo(0, tc_row),
            SetForegroundColor(Color::DarkGrey),
            Print("  tc"),
            ResetColor,
        )?;
        for (index, value) in snapshot.timecode.iter().enumerate() {
            self.paint_timecode_cell(index, *value)?;
        }
        self.paint_rate_label(snapshot.timecode.get(4).copied().unwrap_or(0))?;

        self.out.flush()
    }

    fn paint_changed(&mut self, batch: &RedrawBatch) -> io::Result<()> {
        for change in &batch.dmx {
            self.paint_dmx_cell(change.index, change.value)?;
        }
        for change in &batch.timecode {
            self.paint_timecode_cell(change.index, change.value)?;
            if change.index == 4 {
                self.paint_rate_label(change.value)?;
            }
        }
        self.out.flush()
    }
}
