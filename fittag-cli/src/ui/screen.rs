use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::app::OnboardingApp;
use super::widgets;
use crate::flows::{OnboardingPhase, Route};

/// Onboarding screen: owns the terminal while the app runs
pub struct OnboardingScreen {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: OnboardingApp,
}

impl OnboardingScreen {
    /// Take over the terminal for `app`
    pub fn new(app: OnboardingApp) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self { terminal, app })
    }

    /// Run the event loop until the user quits or the flow redirects
    pub async fn run(&mut self) -> Result<Option<Route>> {
        loop {
            self.app.poll_dismissals();

            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key.code).await?;
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        Ok(self.app.route)
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for OnboardingScreen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &OnboardingApp) {
    let size = f.area();
    let flow = app.flow();

    // Header, body, banner, status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    // Left column: routine (top) + actions (bottom)
    let left_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let art_url = app.art_url();

    widgets::render_header(main_chunks[0], f.buffer_mut());

    widgets::render_routine(left_panels[0], f.buffer_mut(), flow, art_url.as_deref());

    widgets::render_actions(left_panels[1], f.buffer_mut(), flow);

    widgets::render_days(
        columns[1],
        f.buffer_mut(),
        app.cursor,
        flow.selected_day(),
        flow.phase() == OnboardingPhase::TagLoop,
    );

    widgets::render_banner(main_chunks[2], f.buffer_mut(), app.banner());

    widgets::render_status_bar(main_chunks[3], f.buffer_mut(), flow.phase());

    // Render help overlay if active
    if app.show_help {
        let help_area = centered_rect(60, 80, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
