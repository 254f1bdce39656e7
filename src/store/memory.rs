use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Result, Store};
use crate::route::{
	reminder::model::{CreateReminder, Reminder},
	routine::model::{NewRoutine, Routine, UpdateRoutineInput},
	skin::model::{CreateSkinCondition, SkinCondition},
};

/// An in-process [`Store`] used by tests.
#[derive(Default)]
pub struct MemoryStore {
	pub reminders: RwLock<Vec<Reminder>>,
	pub skin_conditions: RwLock<Vec<SkinCondition>>,
	pub routines: RwLock<Vec<Routine>>,
}

#[async_trait]
impl Store for MemoryStore {
	async fn insert_reminder(&self, input: &CreateReminder) -> Result<Reminder> {
		let reminder = Reminder {
			id: Uuid::new_v4(),
			email: input.email.clone(),
			time: input.time.clone(),
			created_at: Utc::now(),
		};

		self.reminders.write().await.push(reminder.clone());
		Ok(reminder)
	}

	async fn delete_reminder(&self, id: Uuid) -> Result<bool> {
		let mut reminders = self.reminders.write().await;
		let before = reminders.len();

		reminders.retain(|reminder| reminder.id != id);
		Ok(reminders.len() != before)
	}

	async fn insert_skin_condition(&self, input: &CreateSkinCondition) -> Result<SkinCondition> {
		let condition = SkinCondition {
			id: Uuid::new_v4(),
			description: input.description.clone(),
			rating: input.rating.clone(),
			created_at: Utc::now(),
		};

		self.skin_conditions.write().await.push(condition.clone());
		Ok(condition)
	}

	async fn list_skin_conditions(&self) -> Result<Vec<SkinCondition>> {
		Ok(self.skin_conditions.read().await.clone())
	}

	async fn insert_routine(&self, input: &NewRoutine) -> Result<Routine> {
		let routine = Routine {
			id: Uuid::new_v4(),
			date: input.date,
			routine: input.routine.clone(),
			note: input.note.clone(),
			created_at: Utc::now(),
		};

		self.routines.write().await.push(routine.clone());
		Ok(routine)
	}

	async fn list_routines(&self) -> Result<Vec<Routine>> {
		let mut routines = self.routines.read().await.clone();

		routines.sort_by_key(|routine| routine.date);
		Ok(routines)
	}

	async fn update_routine(
		&self,
		id: Uuid,
		input: &UpdateRoutineInput,
	) -> Result<Option<Routine>> {
		let mut routines = self.routines.write().await;
		let Some(routine) = routines.iter_mut().find(|routine| routine.id == id) else {
			return Ok(None);
		};

		if let Some(name) = &input.routine {
			routine.routine.clone_from(name);
		}

		if let Some(note) = &input.note {
			routine.note.clone_from(note);
		}

		Ok(Some(routine.clone()))
	}

	async fn delete_routine(&self, id: Uuid) -> Result<bool> {
		let mut routines = self.routines.write().await;
		let before = routines.len();

		routines.retain(|routine| routine.id != id);
		Ok(routines.len() != before)
	}
}

/// A [`Store`] whose every request fails, as if the database were unreachable.
pub struct BrokenStore;

#[async_trait]
impl Store for BrokenStore {
	async fn insert_reminder(&self, _: &CreateReminder) -> Result<Reminder> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn delete_reminder(&self, _: Uuid) -> Result<bool> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn insert_skin_condition(&self, _: &CreateSkinCondition) -> Result<SkinCondition> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn list_skin_conditions(&self) -> Result<Vec<SkinCondition>> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn insert_routine(&self, _: &NewRoutine) -> Result<Routine> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn list_routines(&self) -> Result<Vec<Routine>> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn update_routine(&self, _: Uuid, _: &UpdateRoutineInput) -> Result<Option<Routine>> {
		Err(sqlx::Error::PoolClosed)
	}

	async fn delete_routine(&self, _: Uuid) -> Result<bool> {
		Err(sqlx::Error::PoolClosed)
	}
}
