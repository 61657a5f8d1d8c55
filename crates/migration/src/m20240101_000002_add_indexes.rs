//! Expression indexes over document fields, one per catalog entry.
//!
//! Unique indexes compare the text value (`->>`); the rest index the JSONB value (`->`) so they
//! serve the store's `ORDER BY doc -> 'field'` sorts.
use models::{IndexSpec, INDEXES};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn create_sql(ix: &IndexSpec) -> String {
    let table = ix.collection.name();
    let name = ix.name();
    if ix.unique {
        format!("CREATE UNIQUE INDEX IF NOT EXISTS {name} ON {table} ((doc ->> '{}'))", ix.field)
    } else {
        let dir = if ix.descending { " DESC" } else { "" };
        format!("CREATE INDEX IF NOT EXISTS {name} ON {table} ((doc -> '{}'){dir})", ix.field)
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for ix in INDEXES {
            db.execute_unprepared(&create_sql(ix)).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for ix in INDEXES {
            db.execute_unprepared(&format!("DROP INDEX IF EXISTS {}", ix.name())).await?;
        }
        Ok(())
    }
}
