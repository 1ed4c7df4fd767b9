//! Integration tests for billow-core
//!
//! These tests exercise the full login → CRUD → aggregate → budget workflow
//! against an in-memory Store implementation, the same way a UI drives the
//! client against the real REST backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use billow_core::{
    aggregate, evaluate, AuthProvider, BudgetStatus, Category, Client, Error, NewSubscription,
    Schedule, SessionGate, Subscription, SubscriptionStore, DEFAULT_CURRENCY,
};

const TOKEN: &str = "integration-token";

/// Minimal in-memory backend implementing both boundary traits
#[derive(Default)]
struct FakeBackend {
    records: Mutex<Vec<Subscription>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl AuthProvider for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<String, Error> {
        if email == "user@example.com" && password == "hunter2" {
            Ok(TOKEN.to_string())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<String, Error> {
        Ok(TOKEN.to_string())
    }
}

#[async_trait]
impl SubscriptionStore for FakeBackend {
    async fn get_all(&self, token: &str) -> Result<Vec<Subscription>, Error> {
        check(token)?;
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(
        &self,
        token: &str,
        fields: &NewSubscription,
    ) -> Result<Subscription, Error> {
        check(token)?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let record = Subscription {
            id: *next_id,
            name: fields.name.clone(),
            price: fields.price,
            currency: fields.currency.clone(),
            due_date: fields.due_date,
            category: fields.category.clone(),
            recurring_schedule: fields.recurring_schedule.clone(),
            notes: fields.notes.clone(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        fields: &NewSubscription,
    ) -> Result<Subscription, Error> {
        check(token)?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("subscription {}", id)))?;
        slot.name = fields.name.clone();
        slot.price = fields.price;
        slot.currency = fields.currency.clone();
        slot.due_date = fields.due_date;
        slot.category = fields.category.clone();
        slot.recurring_schedule = fields.recurring_schedule.clone();
        slot.notes = fields.notes.clone();
        Ok(slot.clone())
    }

    async fn delete(&self, token: &str, id: i64) -> Result<(), Error> {
        check(token)?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(Error::NotFound(format!("subscription {}", id)));
        }
        Ok(())
    }
}

fn check(token: &str) -> Result<(), Error> {
    if token == TOKEN {
        Ok(())
    } else {
        Err(Error::Unauthenticated)
    }
}

fn new_client() -> Client {
    let backend = Arc::new(FakeBackend::default());
    Client::new(backend.clone(), backend, SessionGate::new())
}

fn draft(name: &str, price: f64, schedule: Schedule, category: Category, due: &str) -> NewSubscription {
    NewSubscription {
        name: name.to_string(),
        price,
        currency: DEFAULT_CURRENCY.to_string(),
        due_date: due.parse().unwrap(),
        category,
        recurring_schedule: schedule,
        notes: None,
    }
}

#[tokio::test]
async fn full_workflow_login_crud_summary_budget() {
    let mut client = new_client();

    client.login("user@example.com", "hunter2").await.unwrap();

    client
        .create(&draft(
            "Netflix",
            10.0,
            Schedule::Monthly,
            Category::Entertainment,
            "2024-01-15",
        ))
        .await
        .unwrap();
    client
        .create(&draft(
            "Disney+",
            120.0,
            Schedule::Yearly,
            Category::Entertainment,
            "2024-03-01",
        ))
        .await
        .unwrap();
    client
        .create(&draft(
            "Gym",
            12.0,
            Schedule::Weekly,
            Category::Health,
            "2023-12-31",
        ))
        .await
        .unwrap();

    let records = client.list().await.unwrap();
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let summary = aggregate(&records, today);

    // 10 + 120/12 + 12*4 = 68 monthly
    assert_eq!(summary.total_monthly, 68.0);
    // Raw prices per category, independent of schedule
    assert_eq!(summary.per_category["entertainment"], 130.0);
    assert_eq!(summary.per_category["health"], 12.0);
    // Only the Jan 15 due date is inside [today, today + 30d]
    assert_eq!(summary.upcoming.len(), 1);
    assert_eq!(summary.upcoming[0].name, "Netflix");

    let report = evaluate(summary.total_monthly, 100.0);
    assert_eq!(report.status, BudgetStatus::WithinBudget);
    assert_eq!(report.remaining, 32.0);

    // Re-aggregating the same snapshot on the same day is bit-identical
    assert_eq!(aggregate(&records, today), summary);
}

#[tokio::test]
async fn logout_blocks_protected_calls_without_touching_the_store() {
    let mut client = new_client();
    client.login("user@example.com", "hunter2").await.unwrap();
    client.create(&draft(
        "Spotify",
        9.99,
        Schedule::Monthly,
        Category::Entertainment,
        "2024-02-01",
    ))
    .await
    .unwrap();

    client.logout();
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));

    // Logging back in shows the store was untouched by the blocked call
    client.login("user@example.com", "hunter2").await.unwrap();
    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn restored_session_is_trusted_until_the_store_says_otherwise() {
    let backend = Arc::new(FakeBackend::default());
    let mut client = Client::new(
        backend.clone(),
        backend,
        SessionGate::with_token(Some("expired-token".to_string())),
    );

    // Optimistically authenticated at startup
    assert!(client.is_authenticated());

    // First protected call surfaces the 401 and demotes the gate
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
    assert!(!client.is_authenticated());
}
