use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_anime_title_key")
                    .table(Anime::Table)
                    .col(Anime::TitleKey)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_anime_release_date")
                    .table(Anime::Table)
                    .col(Anime::ReleaseDate)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Inverse side of the association: category -> anime.
        manager
            .create_index(
                Index::create()
                    .name("idx_anime_categories_category")
                    .table(AnimeCategories::Table)
                    .col(AnimeCategories::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_anime_categories_category")
                    .table(AnimeCategories::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_anime_release_date")
                    .table(Anime::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_anime_title_key")
                    .table(Anime::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Anime {
    Table,
    TitleKey,
    ReleaseDate,
}

#[derive(DeriveIden)]
enum AnimeCategories {
    Table,
    CategoryId,
}
