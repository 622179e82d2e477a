//! Terminal front-end for the engine
//!
//! A small TUI that walks the engine through the game's screens from the
//! keyboard: number keys change screens, letter keys fire one-shots. Shows
//! the active mood, tempo, and the bar as a step grid with a playhead.

mod grid;

pub use grid::{step_symbol, StepGrid};

use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::engine::Engine;
use crate::pattern::{self, Mood, Screen, STEPS_PER_BAR};

const SCREENS: [Screen; 7] = [
    Screen::Title,
    Screen::Login,
    Screen::Instructions,
    Screen::CharSelect,
    Screen::Map,
    Screen::Gameplay,
    Screen::Result,
];

/// Cue count per step of one bar of `mood`.
pub fn step_hits(mood: Mood) -> [usize; STEPS_PER_BAR] {
    let mut hits = [0; STEPS_PER_BAR];
    for (step, _) in pattern::bar_cues(mood) {
        hits[step] += 1;
    }
    hits
}

/// Run the interactive session. Takes the engine over until quit.
pub fn run_jam(mut engine: Engine) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut engine);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    engine.stop();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    engine: &mut Engine,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, engine))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => break,
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Char(digit @ '1'..='7'), _) => {
                        let index = digit as usize - '1' as usize;
                        engine.set_screen(SCREENS[index]);
                    }
                    (KeyCode::Char('c'), _) => engine.click(),
                    (KeyCode::Char('t'), _) => engine.keystroke(),
                    (KeyCode::Char('g'), _) => engine.gunshot(),
                    (KeyCode::Char('v'), _) => engine.victory_fanfare(),
                    (KeyCode::Char('m'), _) => {
                        engine.toggle_muted();
                    }
                    (KeyCode::Char('s'), _) => engine.stop(),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn draw_ui(f: &mut Frame, engine: &Engine) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status
            Constraint::Length(3), // Step grid
            Constraint::Min(3),    // Help
        ])
        .split(area);

    draw_status(f, chunks[0], engine);
    draw_grid(f, chunks[1], engine);
    draw_help(f, chunks[2]);
}

fn draw_status(f: &mut Frame, area: Rect, engine: &Engine) {
    let status = engine.status();

    let (mood_label, mood_color) = match status.mood {
        Some(mood) => (mood.name(), Color::Cyan),
        None => ("-", Color::DarkGray),
    };
    let playing = if status.playing { "PLAYING" } else { "STOPPED" };
    let playing_color = if status.playing {
        Color::Green
    } else {
        Color::Yellow
    };
    let sfx = if status.muted { "muted" } else { "on" };

    let text = Line::from(vec![
        Span::raw("  Mood: "),
        Span::styled(mood_label, Style::default().fg(mood_color)),
        Span::raw(format!("  |  {:.0} BPM  |  ", status.tempo_bpm)),
        Span::styled(playing, Style::default().fg(playing_color)),
        Span::raw(format!("  |  SFX: {}", sfx)),
    ]);

    let paragraph = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_grid(f: &mut Frame, area: Rect, engine: &Engine) {
    let status = engine.status();
    let hits = match status.mood {
        Some(mood) => step_hits(mood),
        None => [0; STEPS_PER_BAR],
    };

    let mut grid = StepGrid::new(&hits)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Bar "));
    if status.playing {
        grid = grid.cursor(status.step);
    }

    f.render_widget(grid, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("  1 title  2 login  3 instructions  4 select  5 map  6 gameplay  7 result"),
        Line::from("  c click  t type  g gunshot  v fanfare  |  m mute sfx  s stop  q quit"),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
