use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbConn, DbErr,
    EntityTrait, IntoActiveModel, Order, QueryFilter, QueryOrder, QueryResult, QuerySelect,
    QueryTrait, Select, SqlErr, prelude::DateTimeWithTimeZone,
};

use blog_core::domain::{Field, FieldSet, QueryOptions, Resource, SortOrder};
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

type FieldOf<E> = <<E as ProjectedEntity>::Resource as Resource>::Field;
type ViewOf<E> = <<E as ProjectedEntity>::Resource as Resource>::View;
type NewOf<E> = <<E as ProjectedEntity>::Resource as Resource>::New;
type PatchOf<E> = <<E as ProjectedEntity>::Resource as Resource>::Patch;

/// A SeaORM entity that backs a domain resource and can be read column by
/// column.
pub trait ProjectedEntity: EntityTrait {
    type Resource: Resource;

    /// Column storing `field`.
    fn column(field: FieldOf<Self>) -> Self::Column;

    /// Build a view from a row holding exactly the selected columns.
    fn view_from_row(row: &QueryResult, fields: &FieldSet<FieldOf<Self>>)
    -> Result<ViewOf<Self>, DbErr>;

    fn insert_model(new: NewOf<Self>, now: DateTimeWithTimeZone) -> Self::ActiveModel;

    fn patch_model(id: i32, patch: PatchOf<Self>, now: DateTimeWithTimeZone) -> Self::ActiveModel;
}

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

impl<E> PostgresBaseRepository<E>
where
    E: ProjectedEntity,
{
    fn select(fields: &FieldSet<FieldOf<E>>) -> Select<E> {
        E::find()
            .select_only()
            .columns(fields.iter().map(|field| E::column(field)))
    }

    fn by_id(id: i32) -> sea_orm::Condition {
        sea_orm::Condition::all().add(E::column(<FieldOf<E> as Field>::ID).eq(id))
    }
}

/// Map a SeaORM error onto the repository error kinds.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
            return RepoError::Constraint(msg);
        }
        _ => {}
    }

    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl<E> BaseRepository<E::Resource> for PostgresBaseRepository<E>
where
    E: ProjectedEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Into<E::Resource> + Send + Sync,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
{
    async fn create(&self, new: NewOf<E>) -> Result<E::Resource, RepoError> {
        let model = E::insert_model(new, Utc::now().into())
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_many(
        &self,
        options: &QueryOptions<FieldOf<E>>,
        fields: &FieldSet<FieldOf<E>>,
    ) -> Result<Vec<ViewOf<E>>, RepoError> {
        let order = match options.sort_type {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        let stmt = Self::select(fields)
            .order_by(E::column(options.order_field()), order)
            .build(self.db.get_database_backend());

        let rows = self.db.query_all(stmt).await.map_err(map_db_err)?;

        rows.iter()
            .map(|row| E::view_from_row(row, fields))
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_db_err)
    }

    async fn find_unique(
        &self,
        id: i32,
        fields: &FieldSet<FieldOf<E>>,
    ) -> Result<Option<ViewOf<E>>, RepoError> {
        let stmt = Self::select(fields)
            .filter(Self::by_id(id))
            .build(self.db.get_database_backend());

        let row = self.db.query_one(stmt).await.map_err(map_db_err)?;

        row.map(|row| E::view_from_row(&row, fields))
            .transpose()
            .map_err(map_db_err)
    }

    async fn update(
        &self,
        id: i32,
        patch: PatchOf<E>,
        fields: &FieldSet<FieldOf<E>>,
    ) -> Result<ViewOf<E>, RepoError> {
        // RETURNING yields no row when the id vanished since the existence
        // check; SeaORM reports that as RecordNotUpdated.
        let model = E::patch_model(id, patch, Utc::now().into())
            .update(&self.db)
            .await
            .map_err(map_db_err)?;

        let resource: E::Resource = model.into();
        Ok(resource.project(fields))
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = E::delete_many()
            .filter(Self::by_id(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
