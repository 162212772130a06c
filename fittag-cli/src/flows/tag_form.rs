use crate::api::ApiClient;
use crate::models::{Routine, TrainingDay};
use crate::session::Session;

use super::{
    failure_message, UiStatus, CREATE_TAG_FAILED, ROUTINE_NOT_FOUND, SELECT_DAY_FIRST, TAG_CREATED,
};

pub const SEARCH_ROUTINE_FIRST: &str = "Search your routine first.";
pub const FETCH_ROUTINE_FAILED: &str = "Could not fetch your routine.";

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    RoutineFetched,
    DaySelected,
    Submitting,
    Succeeded,
    Failed,
}

type RefreshCallback = Box<dyn FnMut() + Send>;

/// Standalone "create a tag" form.
///
/// The user looks up their routine, picks one day and submits. After each
/// successful submission the caller's refresh callback runs so it can
/// reload its tag list.
pub struct TagForm {
    api: ApiClient,
    session: Session,
    phase: FormPhase,
    routine: Option<Routine>,
    selected_day: Option<TrainingDay>,
    status: Option<UiStatus>,
    on_created: Option<RefreshCallback>,
}

impl TagForm {
    pub fn new(api: ApiClient, session: Session) -> Self {
        Self {
            api,
            session,
            phase: FormPhase::Idle,
            routine: None,
            selected_day: None,
            status: None,
            on_created: None,
        }
    }

    /// Register the callback run after each created tag
    pub fn on_created<F>(mut self, callback: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_created = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn routine(&self) -> Option<&Routine> {
        self.routine.as_ref()
    }

    pub fn selected_day(&self) -> Option<TrainingDay> {
        self.selected_day
    }

    pub fn status(&self) -> Option<&UiStatus> {
        self.status.as_ref()
    }

    /// Look up the routine assigned to the user
    pub async fn fetch_routine(&mut self) {
        match self.api.fetch_user_routine(&self.session).await {
            Ok(Some(routine)) => {
                tracing::info!("Fetched routine '{}'", routine.name);
                self.routine = Some(routine);
                self.status = None;
                self.phase = if self.selected_day.is_some() {
                    FormPhase::DaySelected
                } else {
                    FormPhase::RoutineFetched
                };
            }
            Ok(None) => {
                tracing::warn!("Routine response had no routine name");
                self.fail(ROUTINE_NOT_FOUND);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch routine: {:#}", e);
                self.fail(FETCH_ROUTINE_FAILED);
            }
        }
    }

    /// Select `day`, replacing any previous choice
    pub fn select_day(&mut self, day: TrainingDay) {
        self.selected_day = Some(day);
        self.status = None;
        self.phase = FormPhase::DaySelected;
    }

    /// Create a tag for the selected day.
    ///
    /// Nothing is sent unless a routine was fetched and a day is selected.
    pub async fn submit(&mut self) {
        let Some(routine) = self.routine.clone() else {
            self.fail(SEARCH_ROUTINE_FIRST);
            return;
        };

        let Some(day) = self.selected_day else {
            self.fail(SELECT_DAY_FIRST);
            return;
        };

        self.phase = FormPhase::Submitting;

        match self.api.create_tag(&self.session, day, &routine).await {
            Ok(response) => {
                tracing::info!("Created tag for {}", day);
                self.selected_day = None;
                self.status = Some(UiStatus::success(
                    response.message().unwrap_or(TAG_CREATED),
                ));
                self.phase = FormPhase::Succeeded;

                if let Some(refresh) = self.on_created.as_mut() {
                    refresh();
                }
            }
            Err(e) => {
                tracing::warn!("Failed to create tag: {:#}", e);
                let message = failure_message(&e, CREATE_TAG_FAILED);
                self.fail(message);
            }
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.status = Some(UiStatus::error(message));
        self.phase = FormPhase::Failed;
    }
}
