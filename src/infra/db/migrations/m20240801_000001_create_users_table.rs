//! Migration: Create the users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::MobileNo).string().null())
                    .col(ColumnDef::new(Users::MaritalStatus).string().null())
                    .col(ColumnDef::new(Users::DateOfBirth).date().null())
                    .col(ColumnDef::new(Users::Gender).string().null())
                    .col(ColumnDef::new(Users::ApplyingFor).uuid().null())
                    .col(ColumnDef::new(Users::EducationalQualification).string().null())
                    .col(ColumnDef::new(Users::TheologicalQualification).string().null())
                    .col(ColumnDef::new(Users::PresentAddress).text().null())
                    .col(ColumnDef::new(Users::MinistryExperience).text().null())
                    .col(ColumnDef::new(Users::SalvationExperience).text().null())
                    .col(ColumnDef::new(Users::SignatureUrl).string().null())
                    .col(ColumnDef::new(Users::PhotoUrl).string().null())
                    .col(ColumnDef::new(Users::CertificateUrl).string().null())
                    .col(ColumnDef::new(Users::PurchasedDegrees).json_binary().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    MobileNo,
    MaritalStatus,
    DateOfBirth,
    Gender,
    ApplyingFor,
    EducationalQualification,
    TheologicalQualification,
    PresentAddress,
    MinistryExperience,
    SalvationExperience,
    SignatureUrl,
    PhotoUrl,
    CertificateUrl,
    PurchasedDegrees,
    CreatedAt,
    UpdatedAt,
}
