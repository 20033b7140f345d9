//! End-to-end exchanges: controller + HTTP backend against a mock server.

use corpguide::core::action::{APOLOGY_MESSAGE, Action, Effect, RESET_WELCOME_MESSAGE, update};
use corpguide::core::history::Turn;
use corpguide::core::state::App;
use corpguide::render::{Element, MessageClass};
use corpguide::transport::{ChatBackend, HttpBackend};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Submits `text` and, if the controller asks for it, performs the send
/// against `backend` and feeds the result back.
async fn exchange(app: &mut App, backend: &HttpBackend, text: &str) -> bool {
    match update(app, Action::Submit(text.to_string())) {
        Effect::SendQuestion {
            exchange,
            question,
            history,
        } => {
            // Indicator is visible for the whole call
            assert!(app.chat.is_loading());
            let result = backend.send_question(&question, &history).await;
            update(app, Action::ResponseReceived { exchange, result });
            true
        }
        _ => false,
    }
}

fn bot_html(app: &App) -> Vec<String> {
    app.chat
        .elements()
        .iter()
        .filter_map(|e| match e {
            Element::Message {
                class: MessageClass::Bot,
                content,
            } => Some(corpguide::render::format::to_html(content)),
            _ => None,
        })
        .collect()
}

fn user_count(app: &App) -> usize {
    app.chat
        .elements()
        .iter()
        .filter(|e| {
            matches!(
                e,
                Element::Message {
                    class: MessageClass::User,
                    ..
                }
            )
        })
        .count()
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_successful_exchange_renders_emphasis_and_stores_raw_answer() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Hi **there**",
            "sources": ["doc1.pdf"]
        })))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let mut app = App::new("Welcome!", None);

    assert!(exchange(&mut app, &backend, "Hello").await);

    assert_eq!(user_count(&app), 1);
    assert!(!app.chat.is_loading());
    assert_eq!(
        bot_html(&app).last().map(String::as_str),
        Some("Hi <strong>there</strong>")
    );
    // No sources box
    assert!(!app.chat.to_html().contains("doc1.pdf"));
    assert_eq!(
        app.history.turns(),
        &[Turn::human("Hello"), Turn::ai("Hi **there**")]
    );
}

#[tokio::test]
async fn test_server_error_renders_apology_and_leaves_history_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let mut app = App::new("Welcome!", None);

    assert!(exchange(&mut app, &backend, "Hello").await);

    assert!(app.history.is_empty());
    assert!(!app.chat.is_loading());
    assert!(app.input_enabled);
    let apology_html = corpguide::render::format::to_html(&corpguide::render::format_text(
        APOLOGY_MESSAGE,
    ));
    assert_eq!(
        bot_html(&app).iter().filter(|h| **h == apology_html).count(),
        1
    );
}

#[tokio::test]
async fn test_failure_after_success_keeps_earlier_turns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "one", "sources": []})),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let mut app = App::new("Welcome!", None);

    exchange(&mut app, &backend, "first").await;
    exchange(&mut app, &backend, "second").await;

    assert_eq!(app.history.turns(), &[Turn::human("first"), Turn::ai("one")]);
    assert_eq!(user_count(&app), 2);
}

#[tokio::test]
async fn test_blank_input_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let mut app = App::new("Welcome!", None);

    assert!(!exchange(&mut app, &backend, "   ").await);
    assert_eq!(user_count(&app), 0);
    assert!(app.history.is_empty());
}

#[tokio::test]
async fn test_reset_after_conversation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "a", "sources": []})),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reset"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let mut app = App::new("Welcome!", None);
    exchange(&mut app, &backend, "q1").await;
    exchange(&mut app, &backend, "q2").await;
    assert_eq!(app.history.len(), 4);

    assert_eq!(update(&mut app, Action::Reset), Effect::ResetSession);
    backend.reset_session().await.unwrap();

    assert!(app.history.is_empty());
    assert_eq!(app.chat.elements().len(), 1);
    assert_eq!(
        bot_html(&app),
        vec!["Welcome back! 👋<br>Memory cleared, you can start a new topic.".to_string()]
    );
    assert!(RESET_WELCOME_MESSAGE.contains('\n'));
}

#[tokio::test]
async fn test_history_cap_limits_context_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "a", "sources": []})),
        )
        .mount(&mock_server)
        .await;

    let backend = HttpBackend::new(mock_server.uri());
    let mut app = App::new("Welcome!", Some(2));
    exchange(&mut app, &backend, "q1").await;
    exchange(&mut app, &backend, "q2").await;

    assert_eq!(app.history.turns(), &[Turn::human("q2"), Turn::ai("a")]);
}
