use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Casing of the first insertion.
    pub name: String,
    #[sea_orm(unique)]
    pub name_key: String,
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

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_categories::Relation::Anime.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_categories::Relation::Category.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
