//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::DomainError;
use blog_core::domain::{Comment, CommentId, PostId, UserId};

use crate::database::DomainEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DomainEntity for Entity {
    type Domain = Comment;
    type Id = CommentId;
}

impl TryFrom<Model> for Comment {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Comment::restore(
            CommentId::new(model.id)?,
            PostId::new(model.post_id)?,
            UserId::new(model.author_id)?,
            model.content,
            model.created_at.into(),
        )
    }
}

impl From<Comment> for ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: Set(comment.id().to_string()),
            post_id: Set(comment.post_id().to_string()),
            author_id: Set(comment.author_id().to_string()),
            content: Set(comment.content().to_string()),
            created_at: Set(comment.created_at().into()),
        }
    }
}
