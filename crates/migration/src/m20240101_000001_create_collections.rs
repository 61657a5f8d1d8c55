//! Create one `(id, doc)` table per collection.
//!
//! Documents live whole in a JSONB column; a GIN index backs containment filters.
use models::Collection;
use sea_orm_migration::sea_orm::ConnectionTrait;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for collection in Collection::ALL {
            let table = Alias::new(collection.name());
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(string(Doc::Id).primary_key())
                        .col(json_binary(Doc::Doc).not_null())
                        .to_owned(),
                )
                .await?;
            let sql = format!(
                "CREATE INDEX IF NOT EXISTS gin_{name}_doc ON {name} USING GIN (doc jsonb_path_ops)",
                name = collection.name()
            );
            manager.get_connection().execute_unprepared(&sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for collection in Collection::ALL.iter().rev() {
            manager
                .drop_table(Table::drop().table(Alias::new(collection.name())).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Doc { Id, Doc }
