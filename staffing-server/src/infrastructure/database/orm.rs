use std::sync::Arc;

use anyhow::Context;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use typed_builder::TypedBuilder;

use super::model::prelude::*;

#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let connection = sea_orm::Database::connect(url)
            .await
            .with_context(|| format!("Could not connect to database: {url}"))?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Creates every missing table and index.
    pub async fn create_schema(&self) -> anyhow::Result<()> {
        self.create_table(ShiftEntity).await?;
        self.create_table(AssignedPersonnelEntity).await?;
        self.create_table(TimeEntryEntity).await?;
        self.create_table(TimesheetEntity).await?;
        self.create_table(UserEntity).await?;
        self.create_table(CrewChiefGrantEntity).await?;
        tracing::info!("Database schema is up to date.");
        Ok(())
    }

    async fn create_table<E: EntityTrait>(&self, entity: E) -> anyhow::Result<()> {
        let backend = self.connection.get_database_backend();
        let schema = Schema::new(backend);
        let mut table = schema.create_table_from_entity(entity);
        self.connection
            .execute(backend.build(table.if_not_exists()))
            .await
            .with_context(|| format!("Could not create table: {}", entity.table_name()))?;
        for mut index in schema.create_index_from_entity(entity) {
            self.connection
                .execute(backend.build(index.if_not_exists()))
                .await?;
        }
        Ok(())
    }
}

/// Postgres implementation of every timesheet repository.
#[derive(TypedBuilder)]
pub struct OrmRepo {
    pub db: Arc<Database>,
}
