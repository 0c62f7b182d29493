// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Tests for the hosted backend against a mock `PostgREST` server.

use gala_core::{
    Backend, BudgetItemDraft, BudgetItemPatch, Id, Money, PostgrestBackend, PostgrestConfig,
    TransactionType,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> PostgrestBackend {
    PostgrestBackend::new(PostgrestConfig::new(server.uri(), "anon-key"))
        .expect("Failed to create backend")
}

fn budget_row(id: &str, amount: Value, kind: &str, category: &str) -> Value {
    json!({
        "id": id,
        "event_id": "ev-1",
        "description": "Budget line",
        "amount": amount,
        "type": kind,
        "category": category,
        "status": "completed",
        "date": null,
        "created_at": "2026-10-19T12:00:00Z",
    })
}

#[tokio::test]
async fn budget_amounts_are_read_as_major_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/budget_items"))
        .and(query_param("event_id", "eq.ev-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            budget_row("b-1", json!(15000), "deposit", ""),
            budget_row("b-2", json!(49.95), "payment", "Catering"),
        ])))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let items = backend
        .list_budget_items(&Id::new("ev-1"))
        .await
        .expect("Failed to list budget items");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].amount, Money::from_major(15000));
    assert_eq!(items[1].amount, Money::from_minor(4995));
    assert_eq!(items[1].kind, TransactionType::Payment);
}

#[tokio::test]
async fn budget_amounts_are_written_as_major_units() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/budget_items"))
        .and(body_partial_json(json!({ "amount": 49.95, "type": "payment" })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(budget_row("b-1", json!(49.95), "payment", "Catering")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/budget_items"))
        .and(query_param("id", "eq.b-1"))
        .and(body_partial_json(json!({ "amount": 150.0 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(budget_row("b-1", json!(150), "payment", "Catering")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let mut draft = BudgetItemDraft::new(
        Id::new("ev-1"),
        TransactionType::Payment,
        "Canapés",
        "49.95".parse().unwrap(),
    );
    draft.category = "Catering".to_string();
    let item = backend
        .insert_budget_item(&draft)
        .await
        .expect("Failed to insert budget item");
    assert_eq!(item.amount, Money::from_minor(4995));

    let patch = BudgetItemPatch {
        amount: Some(Money::from_major(150)),
        ..Default::default()
    };
    let item = backend
        .update_budget_item(&item.id, &patch)
        .await
        .expect("Failed to update budget item");
    assert_eq!(item.amount, Money::from_major(150));
}
