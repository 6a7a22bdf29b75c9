mod help;
mod state;

use crate::cli::{build_context, SelectorConfig};
use crate::orchestrator::{self, ChannelSurface, UiCommand, UiUpdate};
use anyhow::{Context, Result};
use auton_selector::{CellIndex, Element, SelectorSurface};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use state::UiState;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(cfg: SelectorConfig) -> Result<()> {
    // Unbounded channels keep the UI thread from ever blocking on the selector task.
    let (update_tx, update_rx) = mpsc::unbounded_channel::<UiUpdate>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let surface_tx = update_tx.clone();
    let ctx = build_context(&cfg, move || {
        Box::new(ChannelSurface::new(surface_tx.clone())) as Box<dyn SelectorSurface>
    });

    // TUI runs in a dedicated thread to keep terminal I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(update_rx, cmd_tx));

    let res = orchestrator::run_controller(ctx, update_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    mut update_rx: UnboundedReceiver<UiUpdate>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut state = UiState::default();
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        while let Ok(update) = update_rx.try_recv() {
            state.apply(update);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                state.rumble = None;
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => state.move_cursor(-1, 0),
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => state.move_cursor(1, 0),
                    (_, KeyCode::Left) | (_, KeyCode::Char('h')) => state.move_cursor(0, -1),
                    (_, KeyCode::Right) | (_, KeyCode::Char('l')) => state.move_cursor(0, 1),
                    (_, KeyCode::Enter) | (_, KeyCode::Char(' ')) => {
                        if state.is_visible(Element::Grid) {
                            let _ = cmd_tx.send(UiCommand::Choose(state.cursor));
                        }
                    }
                    (_, KeyCode::Char('t')) => {
                        if state.is_visible(Element::Trigger) {
                            let _ = cmd_tx.send(UiCommand::Trigger);
                        }
                    }
                    (_, KeyCode::Char('v')) => {
                        let _ = cmd_tx.send(UiCommand::ToggleVisibility);
                    }
                    (_, KeyCode::Char('R')) => {
                        let _ = cmd_tx.send(UiCommand::Reload);
                    }
                    (_, KeyCode::Char('?')) => state.show_help = !state.show_help,
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("auton-selector");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_header(chunks[0], f, state);
    if state.is_visible(Element::Grid) {
        draw_grid(chunks[1], f, state);
    }
    draw_footer(chunks[2], f, state);

    if state.show_help {
        let popup = centered(area, 48, 12);
        help::draw_help(popup, f);
    }
}

fn draw_header(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)])
        .split(area);

    if state.is_visible(Element::StatusLabel) {
        let status = Paragraph::new(Line::from(Span::styled(
            state.status.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::NONE))
        .alignment(Alignment::Left);
        f.render_widget(status, Rect { y: cols[0].y + 1, height: 1, ..cols[0] });
    }

    if state.is_visible(Element::Trigger) {
        let label = if state.is_visible(Element::TriggerLabel) {
            state.trigger.as_str()
        } else {
            ""
        };
        let button = Paragraph::new(Span::styled(label, Style::default().fg(Color::Cyan)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(button, cols[1]);
    }
}

fn draw_grid(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let (rows, cols) = (state.rows(), state.cols());
    if rows == 0 || cols == 0 {
        return;
    }
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows as usize])
        .split(area);

    for (r, row_area) in row_areas.iter().enumerate() {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols as usize])
            .split(*row_area);
        for (c, cell_area) in cell_areas.iter().enumerate() {
            let at = CellIndex::new(r as u16, c as u16);
            let label = state.label_at(at).unwrap_or_default();
            let mut border = Style::default().fg(Color::DarkGray);
            let mut text = Style::default();
            if state.selected_cell == Some(at) {
                text = text.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if at == state.cursor {
                border = Style::default().fg(Color::Yellow);
            }
            let cell = Paragraph::new(Span::styled(label, text))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            f.render_widget(cell, *cell_area);
        }
    }
}

fn draw_footer(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let mut spans = Vec::new();
    if let Some(pattern) = state.rumble.as_deref() {
        spans.push(Span::styled(
            format!("Rumble {pattern}  "),
            Style::default().fg(Color::Magenta),
        ));
    }
    if !state.info.is_empty() {
        spans.push(Span::raw(state.info.as_str()));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        "Keys: enter select | t test | v hide | R reload | ? help | q quit",
        Style::default().fg(Color::Gray),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
