use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModeratedReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ModeratedReviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ModeratedReviews::Content)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModeratedReviews::Rating)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModeratedReviews::DatePosted)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ModeratedReviews::AuthorId)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moderated_reviews_author_id")
                            .from(ModeratedReviews::Table, ModeratedReviews::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_moderated_reviews_date_posted")
                    .table(ModeratedReviews::Table)
                    .col(ModeratedReviews::DatePosted)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ModeratedReviews::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ModeratedReviews {
    Table,
    Id,
    Content,
    Rating,
    DatePosted,
    AuthorId,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
