// Terminal UI module using ratatui

mod app;
mod screen;
mod widgets;

pub use app::OnboardingApp;
pub use screen::OnboardingScreen;
