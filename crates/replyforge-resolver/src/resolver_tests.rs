use replyforge_protocols::{ExtractionError, InsertionError, SurfaceKind};

use super::*;
use crate::hints::StructuralHints;
use crate::testing::FakePage;
use crate::wait::WaitOptions;
use replyforge_protocols::NodeHandle;

const OVERLAY: &str = ".msg-overlay-conversation-bubble";
const OVERLAY_ACTIVE: &str = ".msg-overlay-conversation-bubble--is-active";
const PRIMARY: &str = ".msg-thread";
const LIST: &str = ".msg-s-message-list";
const ROW: &str = ".msg-s-event-listitem";
const BODY: &str = ".msg-s-event-listitem__body";
const SENT: &str = ".msg-s-event-listitem__message-bubble--is-sender";
const AVATAR: &str = ".msg-s-event-listitem__profile-picture";
const NAME: &str = ".msg-s-message-group__name";
const COMPOSE: &str = ".msg-form__contenteditable";

fn resolver() -> ContextResolver {
    ContextResolver::new().with_wait(WaitOptions::new(3000))
}

/// Build an overlay surface. Messages are `(text, sent_by_user)` pairs.
fn add_overlay(page: &FakePage, name: &str, messages: &[(&str, bool)]) -> NodeHandle {
    add_surface(page, OVERLAY, name, messages)
}

fn add_surface(
    page: &FakePage,
    container_selector: &str,
    name: &str,
    messages: &[(&str, bool)],
) -> NodeHandle {
    let container = page.add_node(None, &[container_selector], "");
    page.add_node(Some(container), &[NAME], name);
    let list = page.add_node(Some(container), &[LIST], "");
    for (text, sent_by_user) in messages {
        let row = page.add_node(Some(list), &[ROW], "");
        page.add_node(Some(row), &[BODY], text);
        if *sent_by_user {
            page.add_node(Some(row), &[SENT], "");
        } else {
            page.add_node(Some(row), &[AVATAR], "");
        }
    }
    container
}

#[tokio::test]
async fn test_discover_zero_surfaces_is_empty_not_error() {
    let page = FakePage::with_location("https://example.com/feed/");
    let found = resolver().discover_open_conversations(&page).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_discover_lists_overlays_before_primary() {
    let page = FakePage::with_location("https://example.com/messaging/thread/42/");
    add_overlay(&page, "Jane", &[]);
    add_surface(&page, PRIMARY, "Sam", &[]);

    let found = resolver().discover_open_conversations(&page).await.unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[0].surface, SurfaceKind::OverlaySurface);
    assert_eq!(found[0].display_name, "Jane");
    assert_eq!(found[1].surface, SurfaceKind::PrimarySurface);
    assert_eq!(found[1].display_name, "Sam");
}

#[tokio::test]
async fn test_resolve_active_prefers_marked_overlay() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_overlay(&page, "First", &[]);
    let active = page.add_node(None, &[OVERLAY, OVERLAY_ACTIVE], "");
    page.add_node(Some(active), &[NAME], "Second");

    let resolved = resolver()
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .expect("active surface");

    assert_eq!(resolved.display_name, "Second");
    assert_eq!(resolved.container, active);
}

#[tokio::test]
async fn test_resolve_active_falls_back_to_any_overlay() {
    let page = FakePage::with_location("https://example.com/feed/");
    let overlay = add_overlay(&page, "Jane", &[]);
    add_surface(&page, PRIMARY, "Sam", &[]);

    let resolved = resolver()
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .expect("overlay");

    assert_eq!(resolved.container, overlay);
}

#[tokio::test]
async fn test_resolve_active_primary_requires_conversation_url() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_surface(&page, PRIMARY, "Sam", &[]);

    let resolved = resolver().resolve_active_surface(&page).await.unwrap();
    assert!(resolved.is_none());

    page.set_location("https://example.com/messaging/thread/42/");
    let resolved = resolver()
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .expect("primary surface on conversation view");
    assert_eq!(resolved.surface, SurfaceKind::PrimarySurface);
}

#[tokio::test]
async fn test_extract_round_trip() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_overlay(&page, "Jane", &[("Hi", false), ("How are you?", true)]);

    let resolver = resolver();
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    let snapshot = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap();

    assert_eq!(snapshot.participant_name, "Jane");
    assert_eq!(snapshot.recent_messages.len(), 2);

    assert_eq!(snapshot.recent_messages[0].text, "Hi");
    assert!(snapshot.recent_messages[0].from_participant);
    assert_eq!(snapshot.recent_messages[0].index, 0);

    assert_eq!(snapshot.recent_messages[1].text, "How are you?");
    assert!(!snapshot.recent_messages[1].from_participant);
    assert_eq!(snapshot.recent_messages[1].index, 1);

    let latest = snapshot.latest_message.unwrap();
    assert_eq!(latest.text, "How are you?");
    assert!(!latest.from_participant);
}

#[tokio::test]
async fn test_extract_zero_messages_is_empty_snapshot() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_overlay(&page, "Jane", &[]);

    let resolver = resolver();
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    let snapshot = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap();

    assert!(snapshot.latest_message.is_none());
    assert!(snapshot.recent_messages.is_empty());
}

#[tokio::test]
async fn test_extract_keeps_last_window_in_order() {
    let page = FakePage::with_location("https://example.com/feed/");
    let texts: Vec<String> = (1..=7).map(|i| format!("message {}", i)).collect();
    let messages: Vec<(&str, bool)> = texts.iter().map(|t| (t.as_str(), false)).collect();
    add_overlay(&page, "Jane", &messages);

    let resolver = resolver();
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    let snapshot = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap();

    assert_eq!(snapshot.recent_messages.len(), 5);
    assert_eq!(snapshot.recent_messages[0].text, "message 3");
    assert_eq!(snapshot.recent_messages[4].text, "message 7");
    let indices: Vec<usize> = snapshot.recent_messages.iter().map(|m| m.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_direction_requires_both_signals() {
    let page = FakePage::with_location("https://example.com/feed/");
    let container = page.add_node(None, &[OVERLAY], "");
    page.add_node(Some(container), &[NAME], "Jane");
    let list = page.add_node(Some(container), &[LIST], "");

    // No sent marker and no avatar: not attributable to the participant.
    let bare_row = page.add_node(Some(list), &[ROW], "");
    page.add_node(Some(bare_row), &[BODY], "ambiguous");

    // Sent marker AND avatar: sent marker wins.
    let both_row = page.add_node(Some(list), &[ROW], "");
    page.add_node(Some(both_row), &[BODY], "mine");
    page.add_node(Some(both_row), &[SENT], "");
    page.add_node(Some(both_row), &[AVATAR], "");

    let resolver = resolver();
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    let snapshot = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap();

    assert!(!snapshot.recent_messages[0].from_participant);
    assert!(!snapshot.recent_messages[1].from_participant);
}

#[tokio::test]
async fn test_extract_unknown_participant_fallback() {
    let page = FakePage::with_location("https://example.com/feed/");
    let container = page.add_node(None, &[OVERLAY], "");
    page.add_node(Some(container), &[LIST], "");

    let resolver = resolver();
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    let snapshot = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap();

    assert_eq!(snapshot.participant_name, "Unknown");
}

#[tokio::test(start_paused = true)]
async fn test_extract_times_out_when_messages_never_render() {
    let page = FakePage::with_location("https://example.com/feed/");
    // Container present, but the message list never materializes.
    let container = page.add_node(None, &[OVERLAY], "");
    page.add_node(Some(container), &[NAME], "Jane");

    let resolver = ContextResolver::new().with_wait(WaitOptions::new(3000));
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    let err = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap_err();

    assert_eq!(err, ExtractionError::Timeout(3000));
}

#[tokio::test]
async fn test_extract_container_vanished() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_overlay(&page, "Jane", &[("Hi", false)]);

    let resolver = resolver();
    let conversation = resolver
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();
    page.remove_node(conversation.container);

    let err = resolver
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::ContainerNotFound(_)));
}

#[tokio::test]
async fn test_extract_unmapped_surface_kind() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_overlay(&page, "Jane", &[("Hi", false)]);

    let hints = StructuralHints {
        message_list: &[],
        ..StructuralHints::default()
    };
    let bare = ContextResolver::new().with_hints(hints);
    let conversation = resolver()
        .resolve_active_surface(&page)
        .await
        .unwrap()
        .unwrap();

    let err = bare
        .extract_snapshot(&page, &conversation)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractionError::NoMessagingContext(_)));
}

#[tokio::test]
async fn test_insert_text_scoped_to_descriptor() {
    let page = FakePage::with_location("https://example.com/feed/");
    let first = add_overlay(&page, "Jane", &[]);
    let second = add_overlay(&page, "Sam", &[]);
    let first_compose = page.add_node(Some(first), &[COMPOSE], "");
    let second_compose = page.add_node(Some(second), &[COMPOSE], "");

    let resolver = resolver();
    let conversations = resolver.discover_open_conversations(&page).await.unwrap();
    let target = conversations
        .iter()
        .find(|c| c.display_name == "Sam")
        .unwrap();

    resolver
        .insert_text(&page, "Sounds good!", Some(target))
        .await
        .unwrap();

    assert_eq!(
        page.compose_value(second_compose).as_deref(),
        Some("Sounds good!")
    );
    assert!(page.compose_value(first_compose).is_none());
}

#[tokio::test]
async fn test_insert_text_dispatches_change_notifications() {
    let page = FakePage::with_location("https://example.com/feed/");
    let overlay = add_overlay(&page, "Jane", &[]);
    let compose = page.add_node(Some(overlay), &[COMPOSE], "");

    resolver().insert_text(&page, "Hello", None).await.unwrap();

    assert_eq!(page.events_for(compose), vec!["input", "change"]);
}

#[tokio::test(start_paused = true)]
async fn test_insert_text_not_found_within_bound() {
    let page = FakePage::with_location("https://example.com/feed/");
    add_overlay(&page, "Jane", &[]);

    let err = resolver()
        .insert_text(&page, "Hello", None)
        .await
        .unwrap_err();
    assert_eq!(err, InsertionError::NotFound);
}

#[tokio::test]
async fn test_insert_text_unscoped_fallback() {
    let page = FakePage::with_location("https://example.com/messaging/thread/1/");
    let compose = page.add_node(None, &[COMPOSE], "");

    resolver().insert_text(&page, "Hi there", None).await.unwrap();

    assert_eq!(page.compose_value(compose).as_deref(), Some("Hi there"));
}
