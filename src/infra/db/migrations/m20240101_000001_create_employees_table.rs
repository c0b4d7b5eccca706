//! Migration: Create employees table with unique login and email.

use sea_orm_migration::prelude::*;

use crate::config::{EMAIL_UNIQUE_INDEX, LOGIN_UNIQUE_INDEX, MAX_LOGIN_LENGTH, MAX_NAME_LENGTH};

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
                    .col(
                        ColumnDef::new(Employees::FirstName)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::LastName)
                            .string_len(MAX_NAME_LENGTH)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::MiddleName)
                            .string_len(MAX_NAME_LENGTH)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Employees::Login)
                            .string_len(MAX_LOGIN_LENGTH)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(ColumnDef::new(Employees::PasswordHash).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Storage-level guarantee behind the directory's pre-checks
        manager
            .create_index(
                Index::create()
                    .name(LOGIN_UNIQUE_INDEX)
                    .table(Employees::Table)
                    .col(Employees::Login)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(EMAIL_UNIQUE_INDEX)
                    .table(Employees::Table)
                    .col(Employees::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dropping the table drops its indexes too
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    MiddleName,
    Login,
    Email,
    PasswordHash,
}
