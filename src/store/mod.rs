//! The document store holding reminders, skin conditions and routines.

#[cfg(test)]
mod memory;

#[cfg(test)]
pub use memory::{BrokenStore, MemoryStore};

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use uuid::Uuid;

use crate::route::{
	reminder::model::{CreateReminder, Reminder},
	routine::model::{NewRoutine, Routine, UpdateRoutineInput},
	skin::model::{CreateSkinCondition, SkinCondition},
};

pub type Result<T> = std::result::Result<T, sqlx::Error>;

/// `seq` breaks ties between rows created in the same instant.
const LIST_SKIN_CONDITIONS: &str = "SELECT * FROM skin_condition ORDER BY created_at ASC, seq ASC";
const LIST_ROUTINES: &str = "SELECT * FROM routine ORDER BY date ASC, created_at ASC, seq ASC";

/// Persistence for every document the server owns.
///
/// Creation timestamps are assigned by the store.
#[async_trait]
pub trait Store: Send + Sync {
	async fn insert_reminder(&self, input: &CreateReminder) -> Result<Reminder>;
	/// Returns `false` if no reminder had the id.
	async fn delete_reminder(&self, id: Uuid) -> Result<bool>;

	async fn insert_skin_condition(&self, input: &CreateSkinCondition) -> Result<SkinCondition>;
	/// Every skin condition, oldest first.
	async fn list_skin_conditions(&self) -> Result<Vec<SkinCondition>>;

	async fn insert_routine(&self, input: &NewRoutine) -> Result<Routine>;
	/// Every routine, ordered by date and then creation.
	async fn list_routines(&self) -> Result<Vec<Routine>>;
	/// Returns `None` if no routine had the id.
	async fn update_routine(&self, id: Uuid, input: &UpdateRoutineInput)
		-> Result<Option<Routine>>;
	/// Returns `false` if no routine had the id.
	async fn delete_routine(&self, id: Uuid) -> Result<bool>;
}

/// A [`Store`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgStore {
	pool: PgPool,
}

impl PgStore {
	pub async fn connect(options: PgConnectOptions) -> Result<Self> {
		let pool = PgPoolOptions::new().connect_with(options).await?;

		Ok(Self { pool })
	}

	/// Applies any pending migrations.
	pub async fn migrate(&self) -> Result<()> {
		sqlx::migrate!().run(&self.pool).await?;

		Ok(())
	}
}

#[async_trait]
impl Store for PgStore {
	async fn insert_reminder(&self, input: &CreateReminder) -> Result<Reminder> {
		sqlx::query_as::<_, Reminder>(
			r#"
				INSERT INTO reminder (email, "time")
				VALUES ($1, $2)
				RETURNING *
			"#,
		)
		.bind(&input.email)
		.bind(&input.time)
		.fetch_one(&self.pool)
		.await
	}

	async fn delete_reminder(&self, id: Uuid) -> Result<bool> {
		let status = sqlx::query("DELETE FROM reminder WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(status.rows_affected() > 0)
	}

	async fn insert_skin_condition(&self, input: &CreateSkinCondition) -> Result<SkinCondition> {
		sqlx::query_as::<_, SkinCondition>(
			r#"
				INSERT INTO skin_condition (description, rating)
				VALUES ($1, $2)
				RETURNING *
			"#,
		)
		.bind(&input.description)
		.bind(&input.rating)
		.fetch_one(&self.pool)
		.await
	}

	async fn list_skin_conditions(&self) -> Result<Vec<SkinCondition>> {
		sqlx::query_as::<_, SkinCondition>(LIST_SKIN_CONDITIONS)
			.fetch_all(&self.pool)
			.await
	}

	async fn insert_routine(&self, input: &NewRoutine) -> Result<Routine> {
		sqlx::query_as::<_, Routine>(
			r#"
				INSERT INTO routine (date, routine, note)
				VALUES ($1, $2, $3)
				RETURNING *
			"#,
		)
		.bind(input.date)
		.bind(&input.routine)
		.bind(&input.note)
		.fetch_one(&self.pool)
		.await
	}

	async fn list_routines(&self) -> Result<Vec<Routine>> {
		sqlx::query_as::<_, Routine>(LIST_ROUTINES)
			.fetch_all(&self.pool)
			.await
	}

	async fn update_routine(
		&self,
		id: Uuid,
		input: &UpdateRoutineInput,
	) -> Result<Option<Routine>> {
		sqlx::query_as::<_, Routine>(
			r#"
				UPDATE routine
				SET routine = COALESCE($1, routine), note = COALESCE($2, note)
				WHERE id = $3
				RETURNING *
			"#,
		)
		.bind(&input.routine)
		.bind(&input.note)
		.bind(id)
		.fetch_optional(&self.pool)
		.await
	}

	async fn delete_routine(&self, id: Uuid) -> Result<bool> {
		let status = sqlx::query("DELETE FROM routine WHERE id = $1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		Ok(status.rows_affected() > 0)
	}
}
