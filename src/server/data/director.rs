//! Persistence of corporation directors.
//!
//! Every query that returns candidates for selection uses the same ordering: priority
//! ascending, least recently used first with never-used directors ahead, then id.
use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    sea_query::NullOrdering, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DbErr, DeleteResult, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Select, SqlErr,
};

use crate::server::model::director::DirectorHealth;

/// Priority assigned to directors registered without an explicit priority
pub const DEFAULT_PRIORITY: i32 = 100;

/// Repository for corporation directors and their health fields.
pub struct DirectorRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DirectorRepository<'a, C> {
    /// Creates a new instance of [`DirectorRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Registers a healthy director for the corporation
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The director was created
    /// - `Ok(None)`: The character is already a director of this corporation
    /// - `Err(DbErr)`: Any other database error
    pub async fn create(
        &self,
        corporation_id: i32,
        character_id: i64,
        character_name: String,
        priority: i32,
    ) -> Result<Option<entity::corporation_director::Model>, DbErr> {
        let now = Utc::now().naive_utc();

        let director = entity::corporation_director::ActiveModel {
            corporation_id: ActiveValue::Set(corporation_id),
            character_id: ActiveValue::Set(character_id),
            character_name: ActiveValue::Set(character_name),
            priority: ActiveValue::Set(priority),
            is_healthy: ActiveValue::Set(true),
            failure_count: ActiveValue::Set(0),
            last_failure_reason: ActiveValue::Set(None),
            last_health_check: ActiveValue::Set(None),
            last_used: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        match director.insert(self.db).await {
            Ok(director) => Ok(Some(director)),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Ok(None),
                _ => Err(err),
            },
        }
    }

    /// Finds a director by its internal ID
    pub async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::corporation_director::Model>, DbErr> {
        entity::prelude::CorporationDirector::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Fetches a director holding a row lock until the surrounding transaction ends
    ///
    /// Locking is a no-op on SQLite where writers are already serialized.
    pub async fn find_by_id_for_update(
        &self,
        id: i32,
    ) -> Result<Option<entity::corporation_director::Model>, DbErr> {
        entity::prelude::CorporationDirector::find_by_id(id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    /// Finds the director entry of a character within a corporation
    pub async fn find_by_character(
        &self,
        corporation_id: i32,
        character_id: i64,
    ) -> Result<Option<entity::corporation_director::Model>, DbErr> {
        entity::prelude::CorporationDirector::find()
            .filter(entity::corporation_director::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_director::Column::CharacterId.eq(character_id))
            .one(self.db)
            .await
    }

    /// Every director of the corporation regardless of health, in selection order
    pub async fn find_by_corporation(
        &self,
        corporation_id: i32,
    ) -> Result<Vec<entity::corporation_director::Model>, DbErr> {
        selection_order(
            entity::prelude::CorporationDirector::find()
                .filter(entity::corporation_director::Column::CorporationId.eq(corporation_id)),
        )
        .all(self.db)
        .await
    }

    /// Healthy directors of the corporation ordered by priority, then least recently used
    ///
    /// Directors which have never been used sort ahead of any used director with the same
    /// priority. Remaining ties are broken by id so the order is deterministic.
    pub async fn find_healthy_by_corporation(
        &self,
        corporation_id: i32,
    ) -> Result<Vec<entity::corporation_director::Model>, DbErr> {
        selection_order(
            entity::prelude::CorporationDirector::find()
                .filter(entity::corporation_director::Column::CorporationId.eq(corporation_id))
                .filter(entity::corporation_director::Column::IsHealthy.eq(true)),
        )
        .all(self.db)
        .await
    }

    /// Number of directors of the corporation, healthy or not
    pub async fn count_by_corporation(&self, corporation_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CorporationDirector::find()
            .filter(entity::corporation_director::Column::CorporationId.eq(corporation_id))
            .count(self.db)
            .await
    }

    /// Number of corporations the character is registered as director for
    pub async fn count_by_character(&self, character_id: i64) -> Result<u64, DbErr> {
        entity::prelude::CorporationDirector::find()
            .filter(entity::corporation_director::Column::CharacterId.eq(character_id))
            .count(self.db)
            .await
    }

    /// Number of directors of the corporation currently eligible for selection
    pub async fn count_healthy(&self, corporation_id: i32) -> Result<u64, DbErr> {
        entity::prelude::CorporationDirector::find()
            .filter(entity::corporation_director::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_director::Column::IsHealthy.eq(true))
            .count(self.db)
            .await
    }

    /// Internal IDs of every corporation with at least one director registered
    pub async fn get_corporation_ids_with_directors(&self) -> Result<Vec<i32>, DbErr> {
        entity::prelude::CorporationDirector::find()
            .select_only()
            .column(entity::corporation_director::Column::CorporationId)
            .distinct()
            .order_by_asc(entity::corporation_director::Column::CorporationId)
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Sets the selection priority of a director
    pub async fn update_priority(
        &self,
        id: i32,
        priority: i32,
    ) -> Result<entity::corporation_director::Model, DbErr> {
        let director = entity::corporation_director::ActiveModel {
            id: ActiveValue::Unchanged(id),
            priority: ActiveValue::Set(priority),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        director.update(self.db).await
    }

    /// Writes health fields of a director
    ///
    /// `last_used` and `last_health_check` are only written when provided, otherwise the
    /// stored timestamps are left untouched.
    pub async fn update_health(
        &self,
        id: i32,
        health: DirectorHealth,
        last_used: Option<NaiveDateTime>,
        last_health_check: Option<NaiveDateTime>,
    ) -> Result<entity::corporation_director::Model, DbErr> {
        let mut director = entity::corporation_director::ActiveModel {
            id: ActiveValue::Unchanged(id),
            is_healthy: ActiveValue::Set(health.is_healthy),
            failure_count: ActiveValue::Set(health.failure_count),
            last_failure_reason: ActiveValue::Set(health.last_failure_reason),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        if let Some(last_used) = last_used {
            director.last_used = ActiveValue::Set(Some(last_used));
        }
        if let Some(last_health_check) = last_health_check {
            director.last_health_check = ActiveValue::Set(Some(last_health_check));
        }

        director.update(self.db).await
    }

    /// Deletes the director entry of a character within a corporation
    pub async fn delete(
        &self,
        corporation_id: i32,
        character_id: i64,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::CorporationDirector::delete_many()
            .filter(entity::corporation_director::Column::CorporationId.eq(corporation_id))
            .filter(entity::corporation_director::Column::CharacterId.eq(character_id))
            .exec(self.db)
            .await
    }
}

fn selection_order(
    query: Select<entity::prelude::CorporationDirector>,
) -> Select<entity::prelude::CorporationDirector> {
    query
        .order_by_asc(entity::corporation_director::Column::Priority)
        .order_by_with_nulls(
            entity::corporation_director::Column::LastUsed,
            Order::Asc,
            NullOrdering::First,
        )
        .order_by_asc(entity::corporation_director::Column::Id)
}
