use crate::api::ApiClient;
use crate::models::{Routine, RoutineArt, TrainingDay};
use crate::session::Session;

use super::{
    failure_message, Route, UiStatus, CREATE_TAG_FAILED, ROUTINE_NOT_FOUND, SELECT_DAY_FIRST,
    TAG_CREATED,
};

pub const STATUS_CHECK_FAILED: &str = "Could not verify the user status.";
pub const ASSIGN_ROUTINE_FAILED: &str = "Could not assign a routine automatically.";
pub const ASSIGN_ROUTINE_FIRST: &str = "Assign a routine first.";
pub const CREATE_TAGS_FIRST: &str = "Create your tags before finishing.";
pub const FINISH_FAILED: &str = "Could not update the onboarding status.";

/// Steps of the first-login onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingPhase {
    /// Entry guard has not run yet
    CheckingAuth,
    /// Waiting for the user to request a routine
    RoutineSelection,
    /// Routine assigned; creating one tag per training day
    TagLoop,
    /// Onboarding flag cleared
    Finished,
}

/// First-login onboarding: assign a routine, create tags, finish.
///
/// Every action returns the route to move to, if any. `None` means stay on
/// the onboarding screen and show [`status`](Self::status).
pub struct OnboardingFlow {
    api: ApiClient,
    session: Option<Session>,
    phase: OnboardingPhase,
    routine: Option<Routine>,
    art: Option<RoutineArt>,
    selected_day: Option<TrainingDay>,
    status: Option<UiStatus>,
    tags_created: usize,
}

impl OnboardingFlow {
    pub fn new(api: ApiClient, session: Option<Session>) -> Self {
        Self {
            api,
            session,
            phase: OnboardingPhase::CheckingAuth,
            routine: None,
            art: None,
            selected_day: None,
            status: None,
            tags_created: 0,
        }
    }

    pub fn phase(&self) -> OnboardingPhase {
        self.phase
    }

    pub fn routine(&self) -> Option<&Routine> {
        self.routine.as_ref()
    }

    /// Illustration matching the assigned routine
    pub fn art(&self) -> Option<RoutineArt> {
        self.art
    }

    pub fn selected_day(&self) -> Option<TrainingDay> {
        self.selected_day
    }

    pub fn status(&self) -> Option<&UiStatus> {
        self.status.as_ref()
    }

    /// Tags created through this flow so far
    pub fn tags_created(&self) -> usize {
        self.tags_created
    }

    /// Entry guard, run when the screen opens.
    ///
    /// Without a session the user goes back to login and the backend is not
    /// contacted. Users who already finished onboarding go to the dashboard.
    pub async fn enter(&mut self) -> Option<Route> {
        let Some(session) = self.session.as_ref() else {
            tracing::info!("No session stored, redirecting to login");
            return Some(Route::Login);
        };

        match self.api.check_user_status(session).await {
            Ok(status) if !status.first_login => {
                tracing::info!("Onboarding already completed, redirecting to dashboard");
                self.phase = OnboardingPhase::Finished;
                Some(Route::Dashboard)
            }
            Ok(_) => {
                self.phase = OnboardingPhase::RoutineSelection;
                None
            }
            Err(e) => {
                // stay on the screen; the user can still assign a routine
                tracing::warn!("Failed to check user status: {:#}", e);
                self.status = Some(UiStatus::error(STATUS_CHECK_FAILED));
                self.phase = OnboardingPhase::RoutineSelection;
                None
            }
        }
    }

    /// Let the backend pick a routine for the user
    pub async fn assign_routine(&mut self) -> Option<Route> {
        let Some(session) = self.session.as_ref() else {
            return Some(Route::Login);
        };

        match self.api.assign_routine(session).await {
            Ok(Some(routine)) => {
                tracing::info!("Assigned routine '{}'", routine.name);
                self.art = routine.art();
                self.routine = Some(routine);
                self.status = None;
                self.phase = OnboardingPhase::TagLoop;
            }
            Ok(None) => {
                tracing::warn!("Assign routine response had no routine name");
                self.status = Some(UiStatus::error(ROUTINE_NOT_FOUND));
            }
            Err(e) => {
                tracing::warn!("Failed to assign routine: {:#}", e);
                self.status = Some(UiStatus::error(ASSIGN_ROUTINE_FAILED));
            }
        }

        None
    }

    /// Select `day`, replacing any previous choice
    pub fn select_day(&mut self, day: TrainingDay) {
        self.selected_day = Some(day);
        self.status = None;
    }

    /// Create a tag for the selected day on the assigned routine
    pub async fn create_tag(&mut self) -> Option<Route> {
        let Some(session) = self.session.as_ref() else {
            return Some(Route::Login);
        };

        let Some(routine) = self.routine.as_ref() else {
            self.status = Some(UiStatus::error(ASSIGN_ROUTINE_FIRST));
            return None;
        };

        let Some(day) = self.selected_day else {
            self.status = Some(UiStatus::error(SELECT_DAY_FIRST));
            return None;
        };

        match self.api.create_tag(session, day, routine).await {
            Ok(response) => {
                tracing::info!("Created onboarding tag for {}", day);
                self.tags_created += 1;
                self.selected_day = None;
                self.status = Some(UiStatus::success(
                    response.message().unwrap_or(TAG_CREATED),
                ));
            }
            Err(e) => {
                tracing::warn!("Failed to create tag: {:#}", e);
                self.status = Some(UiStatus::error(failure_message(&e, CREATE_TAG_FAILED)));
            }
        }

        None
    }

    /// Finish onboarding once the user has at least one tag
    pub async fn finish(&mut self) -> Option<Route> {
        let Some(session) = self.session.as_ref() else {
            return Some(Route::Login);
        };

        let tag_count = match self.api.count_user_tags(session).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Failed to list tags: {:#}", e);
                0
            }
        };

        if tag_count == 0 {
            self.status = Some(UiStatus::error(CREATE_TAGS_FIRST));
            return None;
        }

        match self.api.clear_first_login(session).await {
            Ok(()) => {
                tracing::info!("Onboarding finished with {} tags", tag_count);
                self.status = None;
                self.phase = OnboardingPhase::Finished;
                Some(Route::Dashboard)
            }
            Err(e) => {
                tracing::warn!("Failed to clear first login flag: {:#}", e);
                self.status = Some(UiStatus::error(FINISH_FAILED));
                None
            }
        }
    }
}
