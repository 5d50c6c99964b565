use color_eyre::eyre::eyre;
use secrecy::ExposeSecret;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{
    aggregate_trip_rows, Email, Member, MemberChanges, Trip, TripDates, TripId,
    TripMemberRow, TripName, TripStore, TripStoreError, UserId,
};

const SELECT_TRIP_ROWS: &str = r#"
    SELECT t.trip_id, t.customer_id, t.trip_name, t.start_date, t.end_date,
           gm.member_id, gm.customer_id AS member_customer_id,
           gm.name AS member_name, gm.email AS member_email,
           gm.status AS member_status
    FROM trips t
    LEFT JOIN group_members gm ON gm.trip_id = t.trip_id
"#;

const ORDER_TRIP_ROWS: &str = r#"
    ORDER BY t.start_date DESC, t.created_at, t.trip_id, gm.seq
"#;

pub struct PostgresTripStore {
    pool: PgPool,
}

impl PostgresTripStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_trips(
        &self,
        filter: &str,
        bind: Uuid,
    ) -> Result<Vec<Trip>, TripStoreError> {
        let query = format!("{SELECT_TRIP_ROWS} {filter} {ORDER_TRIP_ROWS}");
        let rows = sqlx::query_as::<_, TripMemberRow>(&query)
            .bind(bind)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        aggregate_trip_rows(rows).map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))
    }
}

async fn insert_member(
    tx: &mut Transaction<'_, Postgres>,
    member: &Member,
) -> Result<(), TripStoreError> {
    sqlx::query(
        r#"
        INSERT INTO group_members (member_id, trip_id, customer_id, name, email, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(member.member_id.as_ref())
    .bind(member.trip_id.as_ref())
    .bind(member.customer_id.map(|id| *id.as_ref()))
    .bind(member.name.as_ref())
    .bind(member.email.as_ref().expose_secret())
    .bind(member.status.as_str())
    .execute(&mut **tx)
    .await
    .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;
    Ok(())
}

#[async_trait::async_trait]
impl TripStore for PostgresTripStore {
    #[tracing::instrument(name = "Adding trip to PostgreSQL", skip_all)]
    async fn add_trip(&mut self, trip: &Trip) -> Result<(), TripStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query(
            r#"
            INSERT INTO trips (trip_id, customer_id, trip_name, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(trip.trip_id.as_ref())
        .bind(trip.customer_id.as_ref())
        .bind(trip.trip_name.as_ref())
        .bind(trip.dates.start().value_of())
        .bind(trip.dates.end().value_of())
        .execute(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                TripStoreError::TripIDExists
            }
            err => TripStoreError::UnexpectedError(eyre!(err)),
        })?;

        for member in trip.group_members.iter() {
            insert_member(&mut tx, member).await?;
        }

        tx.commit()
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Getting trip from PostgreSQL", skip_all)]
    async fn get_trip(&self, trip_id: &TripId) -> Result<Trip, TripStoreError> {
        self.fetch_trips("WHERE t.trip_id = $1", *trip_id.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(TripStoreError::TripIDNotFound)
    }

    #[tracing::instrument(name = "Getting trips with members from PostgreSQL", skip_all)]
    async fn get_trips_with_members(
        &self,
        customer_id: &UserId,
    ) -> Result<Vec<Trip>, TripStoreError> {
        self.fetch_trips("WHERE t.customer_id = $1", *customer_id.as_ref())
            .await
    }

    #[tracing::instrument(name = "Getting invited trips from PostgreSQL", skip_all)]
    async fn get_invited_trips(
        &self,
        email: &Email,
    ) -> Result<Vec<Trip>, TripStoreError> {
        let rows = sqlx::query_as::<_, TripMemberRow>(&format!(
            "{SELECT_TRIP_ROWS}
             WHERE t.trip_id IN (
                 SELECT trip_id FROM group_members WHERE lower(email) = lower($1)
             )
             {ORDER_TRIP_ROWS}"
        ))
        .bind(email.as_ref().expose_secret())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        aggregate_trip_rows(rows).map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Getting members from PostgreSQL", skip_all)]
    async fn get_members(
        &self,
        trip_id: &TripId,
    ) -> Result<Vec<Member>, TripStoreError> {
        Ok(self
            .fetch_trips("WHERE t.trip_id = $1", *trip_id.as_ref())
            .await?
            .into_iter()
            .flat_map(|trip| trip.group_members)
            .collect())
    }

    #[tracing::instrument(name = "Updating trip in PostgreSQL", skip_all)]
    async fn update_trip(
        &mut self,
        trip_id: &TripId,
        trip_name: &TripName,
        dates: &TripDates,
        changes: &MemberChanges,
    ) -> Result<(), TripStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query(
            r#"
            UPDATE trips SET trip_name = $2, start_date = $3, end_date = $4
            WHERE trip_id = $1
            "#,
        )
        .bind(trip_id.as_ref())
        .bind(trip_name.as_ref())
        .bind(dates.start().value_of())
        .bind(dates.end().value_of())
        .execute(&mut *tx)
        .await
        .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(TripStoreError::TripIDNotFound);
        }

        if !changes.deletes.is_empty() {
            let member_ids: Vec<Uuid> =
                changes.deletes.iter().map(|id| *id.as_ref()).collect();
            sqlx::query(
                r#"
                DELETE FROM group_members WHERE trip_id = $1 AND member_id = ANY($2)
                "#,
            )
            .bind(trip_id.as_ref())
            .bind(&member_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;
        }

        for member in changes.updates.iter() {
            sqlx::query(
                r#"
                UPDATE group_members SET name = $3, email = $4
                WHERE trip_id = $1 AND member_id = $2
                "#,
            )
            .bind(trip_id.as_ref())
            .bind(member.member_id.as_ref())
            .bind(member.name.as_ref())
            .bind(member.email.as_ref().expose_secret())
            .execute(&mut *tx)
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;
        }

        for member in changes.inserts.iter() {
            insert_member(&mut tx, member).await?;
        }

        tx.commit()
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Deleting trip from PostgreSQL", skip_all)]
    async fn delete_trip(&mut self, trip_id: &TripId) -> Result<(), TripStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        sqlx::query("DELETE FROM group_members WHERE trip_id = $1")
            .bind(trip_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        let result = sqlx::query("DELETE FROM trips WHERE trip_id = $1")
            .bind(trip_id.as_ref())
            .execute(&mut *tx)
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(TripStoreError::TripIDNotFound);
        }

        tx.commit()
            .await
            .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))
    }

    #[tracing::instrument(name = "Linking invited members in PostgreSQL", skip_all)]
    async fn link_members(
        &mut self,
        email: &Email,
        customer_id: &UserId,
    ) -> Result<u64, TripStoreError> {
        let result = sqlx::query(
            r#"
            UPDATE group_members SET customer_id = $2, status = 'accepted'
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(customer_id.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| TripStoreError::UnexpectedError(eyre!(e)))?;

        Ok(result.rows_affected())
    }
}
