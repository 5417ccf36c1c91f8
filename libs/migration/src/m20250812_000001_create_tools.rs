use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tools::Table)
                    .if_not_exists()
                    .col(pk_uuid(Tools::Id))
                    .col(string_len(Tools::Name, 200))
                    .col(text(Tools::Description))
                    .col(json(Tools::Tags).default("[]"))
                    .col(json(Tools::Metadata).default("{}"))
                    .col(
                        timestamp_with_time_zone(Tools::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tools::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tools_name")
                    .table(Tools::Table)
                    .col(Tools::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tools_created_at")
                    .table(Tools::Table)
                    .col(Tools::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tools::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tools {
    Table,
    Id,
    Name,
    Description,
    Tags,
    Metadata,
    CreatedAt,
    UpdatedAt,
}
