use super::*;
use crate::test_support::MockBackend;

fn submitted(conv: &mut Conversation, text: &str) -> ChatRequest {
    conv.set_input(text.into());
    conv.submit().expect("submission accepted")
}

// =========================================================================
// submit
// =========================================================================

#[test]
fn submit_appends_user_message_and_clears_input() {
    let mut conv = Conversation::new(ChatMode::Chat);
    let req = submitted(&mut conv, "Hello");

    assert_eq!(req.text, "Hello");
    assert_eq!(req.mode, ChatMode::Chat);
    assert_eq!(req.session_id, conv.session_id());
    assert!(conv.is_submitting());
    assert_eq!(conv.input(), "");
    assert_eq!(conv.messages().len(), 1);
    assert_eq!(conv.messages()[0].role, Role::User);
    assert_eq!(conv.messages()[0].content, "Hello");
    assert!(conv.messages()[0].grounding_sources.is_empty());
}

#[test]
fn blank_input_is_rejected() {
    let mut conv = Conversation::new(ChatMode::Chat);
    conv.set_input("   \n\t".into());
    assert!(conv.submit().is_none());
    assert!(!conv.is_submitting());
    assert!(conv.messages().is_empty());
    assert_eq!(conv.input(), "   \n\t");
}

#[test]
fn submit_while_busy_is_noop() {
    let mut conv = Conversation::new(ChatMode::Chat);
    submitted(&mut conv, "first");

    conv.set_input("second".into());
    assert!(conv.submit().is_none());
    assert_eq!(conv.messages().len(), 1);
    assert_eq!(conv.input(), "second");
    assert!(conv.is_submitting());
}

// =========================================================================
// complete
// =========================================================================

#[tokio::test]
async fn chat_scenario_hello_hi_there() {
    let backend = Arc::new(MockBackend::new().with_chat(Ok(ChatReply { text: "Hi there".into() })));
    let mut conv = Conversation::new(ChatMode::Chat);

    let req = submitted(&mut conv, "Hello");
    let completion = dispatch(backend.clone(), req).await;
    assert!(conv.complete(completion));

    let summary: Vec<_> = conv
        .messages()
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .collect();
    assert_eq!(summary, vec![(Role::User, "Hello"), (Role::Assistant, "Hi there")]);
    assert!(!conv.is_submitting());
    assert_eq!(backend.calls(), vec!["chat:Hello".to_string()]);
}

#[tokio::test]
async fn grounded_scenario_keeps_sources_in_order() {
    let sources = vec![
        Source { title: "X".into(), uri: "u1".into() },
        Source { title: "Untitled Source".into(), uri: "u2".into() },
    ];
    let backend = Arc::new(MockBackend::new().with_grounded(Ok(GroundedReply {
        text: "Here is what happened".into(),
        sources: sources.clone(),
    })));
    let mut conv = Conversation::new(ChatMode::Grounded);

    let req = submitted(&mut conv, "latest AI news");
    conv.complete(dispatch(backend.clone(), req).await);

    let reply = &conv.messages()[1];
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.grounding_sources, sources);
    assert_eq!(backend.calls(), vec!["grounded:latest AI news".to_string()]);
}

#[tokio::test]
async fn failure_keeps_user_message_and_sets_error() {
    let backend = Arc::new(MockBackend::new().with_chat(Err(StudioError::Generation {
        finish_reason: "SAFETY".into(),
    })));
    let mut conv = Conversation::new(ChatMode::Chat);

    let req = submitted(&mut conv, "Hello");
    conv.complete(dispatch(backend, req).await);

    assert_eq!(conv.messages().len(), 1);
    assert_eq!(conv.messages()[0].role, Role::User);
    assert!(!conv.is_submitting());
    assert_eq!(conv.error(), Some(&StudioError::Generation { finish_reason: "SAFETY".into() }));

    conv.dismiss_error();
    assert!(conv.error().is_none());
}

#[tokio::test]
async fn next_submit_clears_previous_error() {
    let backend = Arc::new(MockBackend::new().with_chat(Err(StudioError::NoImage)));
    let mut conv = Conversation::new(ChatMode::Chat);

    let req = submitted(&mut conv, "one");
    conv.complete(dispatch(backend, req).await);
    assert!(conv.error().is_some());

    submitted(&mut conv, "two");
    assert!(conv.error().is_none());
}

#[test]
fn completion_for_other_session_is_dropped() {
    let mut old = Conversation::new(ChatMode::Chat);
    let req = submitted(&mut old, "Hello");

    let mut fresh = Conversation::new(ChatMode::Chat);
    let applied = fresh.complete(ChatCompletion {
        session_id: req.session_id,
        result: Ok(AssistantReply { text: "late".into(), sources: Vec::new() }),
    });

    assert!(!applied);
    assert!(fresh.messages().is_empty());
    assert!(!fresh.is_submitting());
}

#[test]
fn message_ids_are_unique_and_lookup_works() {
    let mut conv = Conversation::new(ChatMode::Chat);
    for text in ["a", "b", "c"] {
        let req = submitted(&mut conv, text);
        conv.complete(ChatCompletion {
            session_id: req.session_id,
            result: Ok(AssistantReply { text: format!("re: {text}"), sources: Vec::new() }),
        });
    }

    let mut ids: Vec<_> = conv.messages().iter().map(|m| m.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 6);
    assert_eq!(conv.message(ids[5]).map(|m| m.content.as_str()), Some("re: c"));
}

#[test]
fn sessions_get_distinct_ids() {
    let a = Conversation::new(ChatMode::Chat);
    let b = Conversation::new(ChatMode::Chat);
    assert_ne!(a.session_id(), b.session_id());
}
