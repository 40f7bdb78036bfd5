//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::DomainError;
use blog_core::domain::{Post, PostId, UserId};

use crate::database::DomainEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub author_id: String,
    pub published: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DomainEntity for Entity {
    type Domain = Post;
    type Id = PostId;
}

impl TryFrom<Model> for Post {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Post::restore(
            PostId::new(model.id)?,
            model.title,
            model.content,
            UserId::new(model.author_id)?,
            model.published,
            model.created_at.into(),
            model.updated_at.into(),
        )
    }
}

impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            id: Set(post.id().to_string()),
            title: Set(post.title().to_string()),
            content: Set(post.content().to_string()),
            author_id: Set(post.author_id().to_string()),
            published: Set(post.published()),
            created_at: Set(post.created_at().into()),
            updated_at: Set(post.updated_at().into()),
        }
    }
}
