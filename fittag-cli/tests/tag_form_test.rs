use fittag_cli::api::ApiClient;
use fittag_cli::flows::tag_form::{FETCH_ROUTINE_FAILED, SEARCH_ROUTINE_FIRST};
use fittag_cli::flows::{
    FormPhase, TagForm, UiStatus, CREATE_TAG_FAILED, ROUTINE_NOT_FOUND, SELECT_DAY_FIRST,
    TAG_CREATED,
};
use fittag_cli::models::TrainingDay;
use fittag_cli::session::Session;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const ROUTINE: &str = "Cuerpo completo intermedio";

fn form(server: &ServerGuard) -> TagForm {
    let api = ApiClient::with_base_url(&server.url(), Duration::from_secs(5)).unwrap();
    TagForm::new(api, Session::new("tok-9", "7").unwrap())
}

async fn mock_routine(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/api/routines/user/7")
        .match_header("authorization", "Bearer tok-9")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "routine_name": ROUTINE }).to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_submit_without_routine_sends_nothing() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/tag/create")
        .expect(0)
        .create_async()
        .await;

    let mut form = form(&server);

    // with and without a day selected
    form.submit().await;
    assert_eq!(form.status(), Some(&UiStatus::error(SEARCH_ROUTINE_FIRST)));

    form.select_day(TrainingDay::Thursday);
    form.submit().await;
    assert_eq!(form.status(), Some(&UiStatus::error(SEARCH_ROUTINE_FIRST)));

    create.assert_async().await;
}

#[tokio::test]
async fn test_submit_without_day_sends_nothing() {
    let mut server = Server::new_async().await;
    let _routine = mock_routine(&mut server).await;
    let create = server
        .mock("POST", "/tag/create")
        .expect(0)
        .create_async()
        .await;

    let mut form = form(&server);
    form.fetch_routine().await;
    assert_eq!(form.phase(), FormPhase::RoutineFetched);

    form.submit().await;

    assert_eq!(form.status(), Some(&UiStatus::error(SELECT_DAY_FIRST)));
    assert_eq!(form.phase(), FormPhase::Failed);
    create.assert_async().await;
}

#[tokio::test]
async fn test_successful_submit_refreshes_caller() {
    let mut server = Server::new_async().await;
    let _routine = mock_routine(&mut server).await;
    let create = server
        .mock("POST", "/tag/create")
        .match_body(Matcher::Json(json!({
            "user_id": "7",
            "day": "Miercoles",
            "routine": ROUTINE
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Tarjeta creada"}"#)
        .expect(1)
        .create_async()
        .await;

    let refreshes = Arc::new(AtomicUsize::new(0));
    let refreshes_clone = refreshes.clone();
    let mut form = form(&server).on_created(move || {
        refreshes_clone.fetch_add(1, Ordering::SeqCst);
    });

    form.fetch_routine().await;
    assert_eq!(form.routine().map(|r| r.name.as_str()), Some(ROUTINE));

    form.select_day(TrainingDay::Wednesday);
    form.submit().await;

    create.assert_async().await;
    assert_eq!(form.phase(), FormPhase::Succeeded);
    assert_eq!(form.selected_day(), None);
    assert_eq!(form.status(), Some(&UiStatus::success("Tarjeta creada")));
    assert_eq!(refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_success_without_usable_message_uses_default() {
    let mut server = Server::new_async().await;
    let _routine = mock_routine(&mut server).await;

    // null message, empty body, plain text body
    let bodies = [r#"{"message": null}"#, "", "created"];
    let refreshes = Arc::new(AtomicUsize::new(0));
    let refreshes_clone = refreshes.clone();
    let mut form = form(&server).on_created(move || {
        refreshes_clone.fetch_add(1, Ordering::SeqCst);
    });
    form.fetch_routine().await;

    for (i, body) in bodies.iter().enumerate() {
        let create = server
            .mock("POST", "/tag/create")
            .with_status(201)
            .with_body(*body)
            .expect(1)
            .create_async()
            .await;

        form.select_day(TrainingDay::Monday);
        form.submit().await;

        create.assert_async().await;
        assert_eq!(form.status(), Some(&UiStatus::success(TAG_CREATED)));
        assert_eq!(form.phase(), FormPhase::Succeeded);
        assert_eq!(form.selected_day(), None);
        assert_eq!(refreshes.load(Ordering::SeqCst), i + 1);
    }
}

#[tokio::test]
async fn test_every_day_can_be_submitted() {
    let mut server = Server::new_async().await;
    let _routine = mock_routine(&mut server).await;

    let mut mocks = Vec::new();
    for day in TrainingDay::ALL {
        mocks.push(
            server
                .mock("POST", "/tag/create")
                .match_body(Matcher::PartialJson(json!({ "day": day.wire_name() })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "message": format!("ok {}", day) }).to_string())
                .expect(1)
                .create_async()
                .await,
        );
    }

    let mut form = form(&server);
    form.fetch_routine().await;

    for day in TrainingDay::ALL {
        form.select_day(day);
        assert_eq!(form.selected_day(), Some(day));

        form.submit().await;
        assert_eq!(form.selected_day(), None);
        assert_eq!(
            form.status(),
            Some(&UiStatus::success(format!("ok {}", day)))
        );
    }

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_failed_submit_shows_detail_or_fallback() {
    let mut server = Server::new_async().await;
    let _routine = mock_routine(&mut server).await;
    let _rejected = server
        .mock("POST", "/tag/create")
        .match_body(Matcher::PartialJson(json!({ "day": "Lunes" })))
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Ya existe una tarjeta para ese día"}"#)
        .create_async()
        .await;
    let _broken = server
        .mock("POST", "/tag/create")
        .match_body(Matcher::PartialJson(json!({ "day": "Martes" })))
        .with_status(502)
        .create_async()
        .await;

    let refreshes = Arc::new(AtomicUsize::new(0));
    let refreshes_clone = refreshes.clone();
    let mut form = form(&server).on_created(move || {
        refreshes_clone.fetch_add(1, Ordering::SeqCst);
    });
    form.fetch_routine().await;

    form.select_day(TrainingDay::Monday);
    form.submit().await;
    assert_eq!(
        form.status(),
        Some(&UiStatus::error("Ya existe una tarjeta para ese día"))
    );

    form.select_day(TrainingDay::Tuesday);
    form.submit().await;
    assert_eq!(form.status(), Some(&UiStatus::error(CREATE_TAG_FAILED)));
    assert_eq!(form.selected_day(), Some(TrainingDay::Tuesday));

    assert_eq!(refreshes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fetch_routine_failures() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/api/routines/user/7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"routine_name": ""}"#)
        .create_async()
        .await;

    let mut form = form(&server);
    form.fetch_routine().await;
    assert_eq!(form.status(), Some(&UiStatus::error(ROUTINE_NOT_FOUND)));
    assert!(form.routine().is_none());

    server.reset_async().await;
    let _down = server
        .mock("GET", "/api/routines/user/7")
        .with_status(500)
        .create_async()
        .await;

    form.fetch_routine().await;
    assert_eq!(form.status(), Some(&UiStatus::error(FETCH_ROUTINE_FAILED)));
    assert!(form.routine().is_none());
}
