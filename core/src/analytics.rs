// SPDX-FileCopyrightText: 2026 Gala Developers
//
// SPDX-License-Identifier: Apache-2.0

use crate::budget::BudgetSummary;
use crate::data::EventData;
use crate::guest::GuestSummary;
use crate::task::TaskBoard;
use crate::types::Money;
use crate::vendor;

/// Number of vendors listed in [`EventAnalytics::top_vendors`].
pub const TOP_VENDORS: usize = 3;

/// Derived figures over the data of one event.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EventAnalytics {
    /// Head counts.
    pub guests: GuestSummary,

    /// Share of guests that replied.
    pub rsvp_response_rate: f64,

    /// Share of guests that confirmed.
    pub confirmation_rate: f64,

    /// Number of tasks.
    pub tasks_total: usize,

    /// Number of completed tasks.
    pub tasks_completed: usize,

    /// Share of completed tasks.
    pub task_completion: f64,

    /// Budget totals.
    pub budget: BudgetSummary,

    /// Budget left; negative when overspent.
    pub budget_remaining: Money,

    /// Share of the budget spent.
    pub budget_utilization: f64,

    /// Best rated vendors as `(name, rating)`.
    pub top_vendors: Vec<(String, f64)>,
}

impl EventAnalytics {
    /// Computes the figures from a snapshot.
    pub fn compute(data: &EventData) -> Self {
        let guests = GuestSummary::from_guests(&data.guests);
        let board = TaskBoard::from_tasks(&data.tasks);
        let budget = BudgetSummary::from_items(&data.budget_items);
        let top_vendors = vendor::top_rated_vendors(&data.vendors, TOP_VENDORS)
            .into_iter()
            .map(|v| (v.name.clone(), v.rating))
            .collect();

        Self {
            rsvp_response_rate: guests.response_rate(),
            confirmation_rate: guests.confirmation_rate(),
            guests,
            tasks_total: board.total(),
            tasks_completed: board.completed.len(),
            task_completion: board.progress(),
            budget_remaining: budget.remaining(),
            budget_utilization: budget.utilization(),
            budget,
            top_vendors,
        }
    }
}
