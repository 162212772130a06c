use anyhow::Result;
use crossterm::event::KeyCode;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::config::UiConfig;
use crate::flows::{OnboardingFlow, Route, UiStatus};
use crate::models::TrainingDay;
use crate::notification::{Notification, NotificationKind};

/// Application state for the onboarding screen
pub struct OnboardingApp {
    flow: OnboardingFlow,
    /// Should the application quit?
    pub should_quit: bool,
    /// Show help overlay
    pub show_help: bool,
    /// Highlighted day in the day list
    pub cursor: TrainingDay,
    /// Where the user should go once the screen closes
    pub route: Option<Route>,
    banner: Option<(u64, Notification)>,
    banner_seq: u64,
    banner_duration: Duration,
    dismiss_tx: UnboundedSender<u64>,
    dismiss_rx: UnboundedReceiver<u64>,
    asset_base_url: String,
}

impl OnboardingApp {
    pub fn new(flow: OnboardingFlow, ui: &UiConfig) -> Self {
        let (dismiss_tx, dismiss_rx) = unbounded_channel();

        Self {
            flow,
            should_quit: false,
            show_help: false,
            cursor: TrainingDay::Monday,
            route: None,
            banner: None,
            banner_seq: 0,
            banner_duration: ui.notification_duration(),
            dismiss_tx,
            dismiss_rx,
            asset_base_url: ui.asset_base_url.clone(),
        }
    }

    pub fn flow(&self) -> &OnboardingFlow {
        &self.flow
    }

    /// Notification currently on screen
    pub fn banner(&self) -> Option<&Notification> {
        self.banner.as_ref().map(|(_, notification)| notification)
    }

    /// URL of the illustration for the assigned routine
    pub fn art_url(&self) -> Option<String> {
        self.flow.art().map(|art| art.asset_url(&self.asset_base_url))
    }

    /// Run the entry guard. Returns the redirect, if any.
    pub async fn start(&mut self) -> Option<Route> {
        let route = self.flow.enter().await;
        self.after_action(route);
        route
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        // Help overlay takes precedence
        if self.show_help {
            match key {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return Ok(());
        }

        match key {
            // Quit
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }

            // Help
            KeyCode::Char('?') => {
                self.show_help = true;
            }

            KeyCode::Char('a') | KeyCode::Char('A') => {
                let route = self.flow.assign_routine().await;
                self.after_action(route);
            }

            // Day list
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.prev();
            }

            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = self.cursor.next();
            }

            KeyCode::Char(' ') => {
                self.select_day(self.cursor);
            }

            KeyCode::Char(c @ '1'..='7') => {
                let index = (c as u8 - b'1') as usize;
                if let Some(day) = TrainingDay::from_index(index) {
                    self.cursor = day;
                    self.select_day(day);
                }
            }

            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Enter => {
                let route = self.flow.create_tag().await;
                self.after_action(route);
            }

            KeyCode::Char('f') | KeyCode::Char('F') => {
                let route = self.flow.finish().await;
                self.after_action(route);
            }

            _ => {}
        }

        Ok(())
    }

    fn select_day(&mut self, day: TrainingDay) {
        self.flow.select_day(day);
        self.sync_banner();
    }

    /// Apply a flow result: follow redirects, refresh the banner
    fn after_action(&mut self, route: Option<Route>) {
        if let Some(route) = route {
            tracing::debug!("Leaving onboarding screen for {}", route.path());
            self.route = Some(route);
            self.should_quit = true;
        }

        self.sync_banner();
    }

    /// Show the flow's status as a fresh banner, or clear it
    fn sync_banner(&mut self) {
        let Some(status) = self.flow.status() else {
            self.banner = None;
            return;
        };

        let kind = match status {
            UiStatus::Error(_) => NotificationKind::Error,
            UiStatus::Success(_) => NotificationKind::Success,
        };

        self.banner_seq += 1;
        let seq = self.banner_seq;
        let tx = self.dismiss_tx.clone();

        // replacing the old banner drops it, cancelling its timer
        let notification =
            Notification::show_for(status.message(), kind, self.banner_duration, move || {
                let _ = tx.send(seq);
            });
        self.banner = Some((seq, notification));
    }

    /// Remove the banner if its timer fired
    pub fn poll_dismissals(&mut self) {
        while let Ok(seq) = self.dismiss_rx.try_recv() {
            if matches!(self.banner, Some((current, _)) if current == seq) {
                self.banner = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::session::Session;

    fn app(session: Option<Session>) -> OnboardingApp {
        let api = ApiClient::with_base_url("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        OnboardingApp::new(OnboardingFlow::new(api, session), &UiConfig::default())
    }

    #[tokio::test]
    async fn test_start_without_session_quits_to_login() {
        let mut app = app(None);

        assert_eq!(app.start().await, Some(Route::Login));
        assert!(app.should_quit);
        assert_eq!(app.route, Some(Route::Login));
        assert!(app.banner().is_none());
    }

    #[tokio::test]
    async fn test_number_keys_select_days() {
        let mut app = app(Session::new("tok", "1"));

        app.handle_key(KeyCode::Char('6')).await.unwrap();
        assert_eq!(app.flow().selected_day(), Some(TrainingDay::Saturday));
        assert_eq!(app.cursor, TrainingDay::Saturday);

        app.handle_key(KeyCode::Right).await.unwrap();
        app.handle_key(KeyCode::Char(' ')).await.unwrap();
        assert_eq!(app.flow().selected_day(), Some(TrainingDay::Sunday));
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_banner_auto_dismisses() {
        let mut app = app(Session::new("tok", "1"));

        // no routine yet: local validation error, no request
        app.handle_key(KeyCode::Char('c')).await.unwrap();
        assert_eq!(
            app.banner().map(|b| b.message().to_string()),
            Some(crate::flows::onboarding::ASSIGN_ROUTINE_FIRST.to_string())
        );

        tokio::time::sleep(Duration::from_millis(4001)).await;
        tokio::task::yield_now().await;
        app.poll_dismissals();
        assert!(app.banner().is_none());
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let mut app = app(Session::new("tok", "1"));

        app.handle_key(KeyCode::Char('?')).await.unwrap();
        app.handle_key(KeyCode::Char('q')).await.unwrap();
        assert!(!app.should_quit);

        app.handle_key(KeyCode::Esc).await.unwrap();
        assert!(!app.show_help);
    }
}
