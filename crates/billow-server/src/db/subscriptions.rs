//! Subscription record operations
//!
//! All queries are scoped by owner; one user can never see or touch another
//! user's records.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use billow_core::models::{NewSubscription, Subscription};

use super::{Database, Result};

fn subscription_from_row(row: &Row<'_>) -> rusqlite::Result<Subscription> {
    let due_date_str: String = row.get(4)?;
    let category: String = row.get(5)?;
    let schedule: String = row.get(6)?;

    Ok(Subscription {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        currency: row.get(3)?,
        due_date: NaiveDate::parse_from_str(&due_date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        category: category.into(),
        recurring_schedule: schedule.into(),
        notes: row.get(7)?,
    })
}

const SUBSCRIPTION_COLUMNS: &str =
    "id, name, price, currency, due_date, category, schedule, notes";

impl Database {
    /// List all subscriptions belonging to a user, oldest first
    pub fn list_subscriptions(&self, user_id: i64) -> Result<Vec<Subscription>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM subscriptions WHERE user_id = ? ORDER BY id",
            SUBSCRIPTION_COLUMNS
        ))?;

        let subscriptions = stmt
            .query_map(params![user_id], subscription_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(subscriptions)
    }

    /// Fetch a single subscription if it exists and belongs to the user
    pub fn get_subscription(&self, user_id: i64, id: i64) -> Result<Option<Subscription>> {
        let conn = self.conn()?;
        let subscription = conn
            .query_row(
                &format!(
                    "SELECT {} FROM subscriptions WHERE id = ? AND user_id = ?",
                    SUBSCRIPTION_COLUMNS
                ),
                params![id, user_id],
                subscription_from_row,
            )
            .optional()?;
        Ok(subscription)
    }

    /// Insert a subscription for a user and return the stored record
    pub fn create_subscription(
        &self,
        user_id: i64,
        fields: &NewSubscription,
    ) -> Result<Subscription> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO subscriptions (user_id, name, price, currency, due_date, category, schedule, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                fields.name,
                fields.price,
                fields.currency,
                fields.due_date.to_string(),
                fields.category.as_str(),
                fields.recurring_schedule.as_str(),
                fields.notes,
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Subscription {
            id,
            name: fields.name.clone(),
            price: fields.price,
            currency: fields.currency.clone(),
            due_date: fields.due_date,
            category: fields.category.clone(),
            recurring_schedule: fields.recurring_schedule.clone(),
            notes: fields.notes.clone(),
        })
    }

    /// Full replace of a subscription's mutable fields
    ///
    /// Returns `None` when the record does not exist or belongs to someone
    /// else.
    pub fn update_subscription(
        &self,
        user_id: i64,
        id: i64,
        fields: &NewSubscription,
    ) -> Result<Option<Subscription>> {
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE subscriptions
            SET name = ?, price = ?, currency = ?, due_date = ?, category = ?, schedule = ?, notes = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                fields.name,
                fields.price,
                fields.currency,
                fields.due_date.to_string(),
                fields.category.as_str(),
                fields.recurring_schedule.as_str(),
                fields.notes,
                id,
                user_id,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(Subscription {
            id,
            name: fields.name.clone(),
            price: fields.price,
            currency: fields.currency.clone(),
            due_date: fields.due_date,
            category: fields.category.clone(),
            recurring_schedule: fields.recurring_schedule.clone(),
            notes: fields.notes.clone(),
        }))
    }

    /// Delete a subscription; returns whether a row was removed
    pub fn delete_subscription(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "DELETE FROM subscriptions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billow_core::models::{Category, Schedule, DEFAULT_CURRENCY};

    fn fields(name: &str, price: f64) -> NewSubscription {
        NewSubscription {
            name: name.to_string(),
            price,
            currency: DEFAULT_CURRENCY.to_string(),
            due_date: "2024-01-15".parse().unwrap(),
            category: Category::Entertainment,
            recurring_schedule: Schedule::Monthly,
            notes: None,
        }
    }

    fn user(db: &Database, email: &str) -> i64 {
        db.create_user(email, "hash").unwrap().unwrap()
    }

    #[test]
    fn crud_round_trip() {
        let db = Database::in_memory().unwrap();
        let uid = user(&db, "a@b.c");

        let created = db.create_subscription(uid, &fields("Netflix", 15.49)).unwrap();
        assert!(created.id > 0);

        let fetched = db.get_subscription(uid, created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = db
            .update_subscription(uid, created.id, &fields("Netflix 4K", 19.99))
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Netflix 4K");
        assert_eq!(updated.price, 19.99);

        assert!(db.delete_subscription(uid, created.id).unwrap());
        assert!(db.get_subscription(uid, created.id).unwrap().is_none());
    }

    #[test]
    fn records_are_scoped_per_user() {
        let db = Database::in_memory().unwrap();
        let alice = user(&db, "alice@example.com");
        let bob = user(&db, "bob@example.com");

        let record = db.create_subscription(alice, &fields("Spotify", 9.99)).unwrap();

        assert_eq!(db.list_subscriptions(alice).unwrap().len(), 1);
        assert!(db.list_subscriptions(bob).unwrap().is_empty());
        assert!(db.get_subscription(bob, record.id).unwrap().is_none());
        assert!(!db.delete_subscription(bob, record.id).unwrap());
        assert!(db
            .update_subscription(bob, record.id, &fields("Hijack", 1.0))
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicate_email_returns_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.create_user("a@b.c", "h1").unwrap().is_some());
        assert!(db.create_user("a@b.c", "h2").unwrap().is_none());
    }

    #[test]
    fn unrecognized_category_and_schedule_round_trip() {
        let db = Database::in_memory().unwrap();
        let uid = user(&db, "a@b.c");

        let mut draft = fields("Vet plan", 30.0);
        draft.category = Category::Custom("pet-care".to_string());
        draft.recurring_schedule = Schedule::Custom("biennial".to_string());
        let created = db.create_subscription(uid, &draft).unwrap();

        let fetched = db.get_subscription(uid, created.id).unwrap().unwrap();
        assert_eq!(fetched.category.as_str(), "pet-care");
        assert_eq!(fetched.recurring_schedule.as_str(), "biennial");
    }
}
