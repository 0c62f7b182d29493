// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the event context.

use std::sync::Arc;

use gala_core::{
    Error, EventContext, EventPatch, Id, MemoryBackend, Principal, StaticAuth, Store,
};

use crate::common::{seed_event, test_event_draft};

fn context_with(store: &Store, user: Option<&str>) -> EventContext {
    let auth = match user {
        Some(user) => StaticAuth::new(Principal::new(user)),
        None => StaticAuth::anonymous(),
    };
    EventContext::new(store.clone(), Arc::new(auth))
}

fn memory_store() -> Store {
    Store::new(Arc::new(MemoryBackend::new()))
}

#[tokio::test]
async fn create_event_sets_current_and_owner() {
    let store = memory_store();
    let context = context_with(&store, Some("user-1"));

    let event = context
        .create_event(test_event_draft("Launch"))
        .await
        .unwrap();

    assert!(!event.id.is_empty());
    assert_eq!(event.title, "Launch");
    assert_eq!(event.user_id, Id::new("user-1"));
    assert_eq!(context.current_event(), Some(event.clone()));
    assert!(!context.loading());
    assert_eq!(store.get_event(&event.id).await.unwrap(), event);
}

#[tokio::test]
async fn create_event_without_principal_fails_and_keeps_current() {
    let store = memory_store();
    let existing = seed_event(&store, "Existing").await;
    let context = context_with(&store, None);
    context.set_current_event(Some(existing.clone()));

    let err = context
        .create_event(test_event_draft("Orphan"))
        .await
        .unwrap_err();

    assert_eq!(err, Error::Unauthenticated);
    assert_eq!(context.current_event(), Some(existing));
    assert_eq!(context.error().as_deref(), Some("No user logged in"));
    assert!(!context.loading());
}

#[tokio::test]
async fn update_event_unknown_id_fails_and_keeps_current() {
    let store = memory_store();
    let existing = seed_event(&store, "Existing").await;
    let context = context_with(&store, Some("user-1"));
    context.set_current_event(Some(existing.clone()));

    let patch = EventPatch {
        title: Some("Renamed".to_string()),
        ..Default::default()
    };
    let err = context
        .update_event(&Id::new("missing"), patch)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(context.current_event(), Some(existing));
    assert!(context.error().is_some());
}

#[tokio::test]
async fn update_event_replaces_current_even_for_another_event() {
    let store = memory_store();
    let first = seed_event(&store, "First").await;
    let second = seed_event(&store, "Second").await;
    let context = context_with(&store, Some("user-1"));
    context.set_current_event(Some(first));

    let patch = EventPatch {
        location: Some("Rooftop".to_string()),
        ..Default::default()
    };
    let updated = context.update_event(&second.id, patch).await.unwrap();

    assert_eq!(updated.id, second.id);
    assert_eq!(updated.location, "Rooftop");
    assert_eq!(context.current_event(), Some(updated));
}

#[tokio::test]
async fn error_is_kept_after_a_later_success() {
    let store = memory_store();
    let context = context_with(&store, Some("user-1"));

    context.select_event(&Id::new("missing")).await.unwrap_err();
    let error = context.error();
    assert!(error.is_some());

    context
        .create_event(test_event_draft("Recovered"))
        .await
        .unwrap();
    assert_eq!(context.error(), error);
}

#[tokio::test]
async fn select_event_makes_it_current() {
    let store = memory_store();
    let event = seed_event(&store, "Gala").await;
    let context = context_with(&store, Some("user-1"));

    let selected = context.select_event(&event.id).await.unwrap();
    assert_eq!(selected, event);
    assert_eq!(context.current_event(), Some(event));
}

#[tokio::test]
async fn list_events_returns_only_own_events() {
    let store = memory_store();
    let mine = seed_event(&store, "Mine").await;
    let other = context_with(&store, Some("user-2"));
    other
        .create_event(test_event_draft("Theirs"))
        .await
        .unwrap();

    let context = context_with(&store, Some("user-1"));
    let events = context.list_events().await.unwrap();
    assert_eq!(events, vec![mine]);

    let anonymous = context_with(&store, None);
    assert_eq!(
        anonymous.list_events().await.unwrap_err(),
        Error::Unauthenticated
    );
}

#[tokio::test]
async fn contexts_are_independent() {
    let store = memory_store();
    let a = context_with(&store, Some("user-1"));
    let b = context_with(&store, Some("user-1"));

    a.create_event(test_event_draft("Only A")).await.unwrap();
    assert!(a.current_event().is_some());
    assert!(b.current_event().is_none());

    let clone = a.clone();
    clone.set_current_event(None);
    assert!(a.current_event().is_none());
}
