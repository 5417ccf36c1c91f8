use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SearchHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(SearchHistory::Id))
                    .col(text(SearchHistory::Query))
                    .col(json(SearchHistory::Results).default("[]"))
                    .col(
                        timestamp_with_time_zone(SearchHistory::Timestamp)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // History is always read newest-first
        manager
            .create_index(
                Index::create()
                    .name("idx_search_history_timestamp")
                    .table(SearchHistory::Table)
                    .col(SearchHistory::Timestamp)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchHistory::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SearchHistory {
    Table,
    Id,
    Query,
    Results,
    Timestamp,
}
