//! SurrealDB implementation of [`GroupRepository`] and the
//! actor → tenant lookup built on its membership table.

use messmate_core::error::{MessmateError, MessmateResult};
use messmate_core::models::ActorId;
use messmate_core::models::group::{CreateGroup, Group};
use messmate_core::repository::{GroupRepository, TenantResolver};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct GroupRow {
    name: String,
}

#[derive(Debug, SurrealValue)]
struct MembershipRow {
    tenant_id: String,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Group repository.
#[derive(Clone)]
pub struct SurrealGroupRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealGroupRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> GroupRepository for SurrealGroupRepository<C> {
    async fn create(&self, input: CreateGroup) -> MessmateResult<Group> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query("CREATE type::record('group', $id) SET name = $name")
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "group".into(),
            id: id_str,
        })?;

        Ok(Group { id, name: row.name })
    }

    async fn get_by_id(&self, id: Uuid) -> MessmateResult<Group> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('group', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<GroupRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "group".into(),
            id: id_str,
        })?;

        Ok(Group { id, name: row.name })
    }

    async fn add_member(&self, group_id: Uuid, actor: ActorId) -> MessmateResult<()> {
        let group_id_str = group_id.to_string();
        let actor_str = actor.to_string();

        let mut check = self
            .db
            .query(
                "SELECT count() AS total FROM group \
                 WHERE id = type::record('group', $group_id) GROUP ALL; \
                 SELECT count() AS total FROM membership \
                 WHERE actor_id = $actor_id GROUP ALL;",
            )
            .bind(("group_id", group_id_str.clone()))
            .bind(("actor_id", actor_str.clone()))
            .await
            .map_err(DbError::from)?;

        let group_count: Vec<CountRow> = check.take(0).map_err(DbError::from)?;
        if group_count.first().map(|r| r.total).unwrap_or(0) == 0 {
            return Err(DbError::NotFound {
                entity: "group".into(),
                id: group_id_str,
            }
            .into());
        }

        let membership_count: Vec<CountRow> = check.take(1).map_err(DbError::from)?;
        if membership_count.first().map(|r| r.total).unwrap_or(0) > 0 {
            return Err(MessmateError::AlreadyExists {
                entity: format!("membership for actor {actor_str}"),
            });
        }

        self.db
            .query(
                "CREATE membership SET \
                 actor_id = $actor_id, tenant_id = $tenant_id",
            )
            .bind(("actor_id", actor_str))
            .bind(("tenant_id", group_id_str))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        debug!(%group_id, %actor, "member added");
        Ok(())
    }

    async fn remove_member(&self, actor: ActorId) -> MessmateResult<()> {
        self.db
            .query("DELETE membership WHERE actor_id = $actor_id")
            .bind(("actor_id", actor.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        debug!(%actor, "member removed");
        Ok(())
    }
}

impl<C: Connection> TenantResolver for SurrealGroupRepository<C> {
    async fn resolve(&self, actor: ActorId) -> MessmateResult<Option<Uuid>> {
        let mut result = self
            .db
            .query("SELECT tenant_id FROM membership WHERE actor_id = $actor_id LIMIT 1")
            .bind(("actor_id", actor.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<MembershipRow> = result.take(0).map_err(DbError::from)?;
        let Some(row) = rows.into_iter().next() else {
            return Ok(None);
        };
        let tenant_id = Uuid::parse_str(&row.tenant_id)
            .map_err(|e| DbError::Decode(format!("invalid tenant UUID: {e}")))?;
        Ok(Some(tenant_id))
    }
}
