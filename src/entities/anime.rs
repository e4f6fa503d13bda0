use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    /// Lowercased title, matched with LIKE by the dedup guard and search.
    #[sea_orm(indexed)]
    pub title_key: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<String>,
    #[sea_orm(indexed)]
    pub release_date: Option<Date>,
    pub created_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_categories::Entity")]
    AnimeCategories,
}

impl Related<super::anime_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeCategories.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_categories::Relation::Category.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_categories::Relation::Anime.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
