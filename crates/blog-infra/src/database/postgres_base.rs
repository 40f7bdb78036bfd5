use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, SqlErr,
};

use blog_core::DomainError;
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// A SeaORM entity whose rows rebuild exactly one domain entity.
pub trait DomainEntity: EntityTrait {
    type Domain: TryFrom<Self::Model, Error = DomainError>
        + Into<Self::ActiveModel>
        + Send
        + Sync
        + 'static;
    type Id: AsRef<str> + Send + Sync + 'static;
}

/// Classify a SeaORM error into a repository error.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
            DbErr::RecordNotUpdated => RepoError::NotFound,
            _ => RepoError::Query(err.to_string()),
        },
    }
}

/// Rebuild a domain entity from a stored row.
pub(crate) fn to_domain<M, T>(model: M) -> Result<T, RepoError>
where
    T: TryFrom<M, Error = DomainError>,
{
    T::try_from(model).map_err(|e| RepoError::Query(format!("invalid stored row: {e}")))
}

pub(crate) fn to_domain_all<M, T>(models: Vec<M>) -> Result<Vec<T>, RepoError>
where
    T: TryFrom<M, Error = DomainError>,
{
    models.into_iter().map(to_domain).collect()
}

#[async_trait]
impl<E> BaseRepository<E::Domain, E::Id> for PostgresBaseRepository<E>
where
    E: DomainEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = String>,
{
    async fn create(&self, entity: E::Domain) -> Result<E::Domain, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;
        to_domain(model)
    }

    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E::Domain>, RepoError> {
        let result = E::find_by_id(id.as_ref().to_string())
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(to_domain).transpose()
    }

    async fn update(&self, entity: E::Domain) -> Result<E::Domain, RepoError> {
        let active_model: E::ActiveModel = entity.into();
        let model = active_model.update(&self.db).await.map_err(map_db_err)?;
        to_domain(model)
    }

    async fn delete(&self, id: &E::Id) -> Result<(), RepoError> {
        E::delete_by_id(id.as_ref().to_string())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
