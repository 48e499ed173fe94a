use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Zone::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Zone::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Zone::Name).string().not_null())
                    .col(ColumnDef::new(Zone::AdminGroupId).string().not_null())
                    .col(
                        ColumnDef::new(Zone::AllowedGroupIds)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_zones_name")
                    .table(Zone::Table)
                    .col(Zone::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RecordSet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecordSet::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RecordSet::ZoneId).string().not_null())
                    .col(ColumnDef::new(RecordSet::Name).string().not_null())
                    .col(ColumnDef::new(RecordSet::RecordType).string().not_null())
                    .col(ColumnDef::new(RecordSet::Ttl).big_integer().not_null())
                    .col(
                        ColumnDef::new(RecordSet::Records)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_record_sets_zone_name")
                    .table(RecordSet::Table)
                    .col(RecordSet::ZoneId)
                    .col(RecordSet::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BatchChange::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatchChange::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BatchChange::UserId).string().not_null())
                    .col(ColumnDef::new(BatchChange::UserName).string().not_null())
                    .col(ColumnDef::new(BatchChange::Comments).string().null())
                    .col(ColumnDef::new(BatchChange::CreatedAt).string().not_null())
                    .col(ColumnDef::new(BatchChange::Status).string().not_null())
                    .col(
                        ColumnDef::new(BatchChange::ChangeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_batch_changes_user_created")
                    .table(BatchChange::Table)
                    .col(BatchChange::UserId)
                    .col(BatchChange::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SingleChange::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SingleChange::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SingleChange::BatchChangeId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SingleChange::Position).integer().not_null())
                    .col(ColumnDef::new(SingleChange::ChangeType).string().not_null())
                    .col(ColumnDef::new(SingleChange::InputName).string().not_null())
                    .col(ColumnDef::new(SingleChange::RecordType).string().not_null())
                    .col(ColumnDef::new(SingleChange::Ttl).big_integer().null())
                    .col(ColumnDef::new(SingleChange::RecordData).string().null())
                    .col(ColumnDef::new(SingleChange::ZoneId).string().not_null())
                    .col(ColumnDef::new(SingleChange::ZoneName).string().not_null())
                    .col(ColumnDef::new(SingleChange::RecordName).string().not_null())
                    .col(ColumnDef::new(SingleChange::Status).string().not_null())
                    .col(ColumnDef::new(SingleChange::SystemMessage).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_single_changes_batch_position")
                    .table(SingleChange::Table)
                    .col(SingleChange::BatchChangeId)
                    .col(SingleChange::Position)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SingleChange::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BatchChange::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RecordSet::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Zone {
    #[sea_orm(iden = "zones")]
    Table,
    Id,
    Name,
    AdminGroupId,
    AllowedGroupIds,
}

#[derive(DeriveIden)]
enum RecordSet {
    #[sea_orm(iden = "record_sets")]
    Table,
    Id,
    ZoneId,
    Name,
    RecordType,
    Ttl,
    Records,
}

#[derive(DeriveIden)]
enum BatchChange {
    #[sea_orm(iden = "batch_changes")]
    Table,
    Id,
    UserId,
    UserName,
    Comments,
    CreatedAt,
    Status,
    ChangeCount,
}

#[derive(DeriveIden)]
enum SingleChange {
    #[sea_orm(iden = "single_changes")]
    Table,
    Id,
    BatchChangeId,
    Position,
    ChangeType,
    InputName,
    RecordType,
    Ttl,
    RecordData,
    ZoneId,
    ZoneName,
    RecordName,
    Status,
    SystemMessage,
}
