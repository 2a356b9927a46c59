use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Agents {
    Table,
    Id,
    Username,
    PasswordHash,
    CreatedAt,
}

#[derive(Iden)]
enum Packages {
    Table,
    Id,
    Recipient,
    Address,
    AgentId,
}

#[derive(Iden)]
enum Deliveries {
    Table,
    Id,
    PackageId,
    AgentId,
    PhotoPath,
    Lat,
    Lon,
    DeliveredAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Agents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Agents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Agents::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Agents::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Agents::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // agent_id is intentionally not a foreign key: packages may be
        // assigned to agents that do not exist.
        manager
            .create_table(
                Table::create()
                    .table(Packages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Packages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Packages::Recipient).string_len(100).null())
                    .col(ColumnDef::new(Packages::Address).string_len(255).not_null())
                    .col(ColumnDef::new(Packages::AgentId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_packages_agent_id")
                    .table(Packages::Table)
                    .col(Packages::AgentId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Deliveries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deliveries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Deliveries::PackageId).integer().not_null())
                    .col(ColumnDef::new(Deliveries::AgentId).integer().not_null())
                    .col(ColumnDef::new(Deliveries::PhotoPath).string_len(255).not_null())
                    .col(ColumnDef::new(Deliveries::Lat).double().not_null())
                    .col(ColumnDef::new(Deliveries::Lon).double().not_null())
                    .col(
                        ColumnDef::new(Deliveries::DeliveredAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_deliveries_package_id")
                    .table(Deliveries::Table)
                    .col(Deliveries::PackageId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Deliveries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Packages::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Agents::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
