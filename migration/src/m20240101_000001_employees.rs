use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string_len(255).not_null())
                    .col(ColumnDef::new(Employees::LastName).string_len(255).not_null())
                    .col(ColumnDef::new(Employees::Email).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        // Rejects duplicate emails even when two creates race past the service check.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_email")
                    .table(Employees::Table)
                    .col(Employees::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_name")
                    .table(Employees::Table)
                    .col(Employees::FirstName)
                    .col(Employees::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Employees::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
