//! Seizure record repository

use crate::domain::{
    NewSeizureRecord, ReasonCount, SeizureFilter, SeizureRecord, SeizureType, SeizureTypeCount,
    Species, SpeciesCount, StringUuid,
};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::query::QueryAs;
use sqlx::{MySql, MySqlPool};

const SEIZURE_COLUMNS: &str = "id, seizure_datetime, species, seized_part, seizure_type, reason, quantity, unit, notes, photos, slaughterhouse_id, inspector_id, created_at, updated_at";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeizureRepository: Send + Sync {
    async fn create(&self, input: &NewSeizureRecord) -> Result<SeizureRecord>;
    async fn find_by_id(&self, id: StringUuid) -> Result<Option<SeizureRecord>>;
    /// Newest `seizure_datetime` first
    async fn list(
        &self,
        filter: &SeizureFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<SeizureRecord>>;
    async fn count(&self, filter: &SeizureFilter) -> Result<i64>;
    async fn count_by_slaughterhouse(&self, slaughterhouse_id: StringUuid) -> Result<i64>;
    async fn delete(&self, id: StringUuid) -> Result<()>;
    async fn count_by_species(&self, filter: &SeizureFilter) -> Result<Vec<SpeciesCount>>;
    async fn count_by_reason(&self, filter: &SeizureFilter) -> Result<Vec<ReasonCount>>;
    async fn count_by_seizure_type(&self, filter: &SeizureFilter)
        -> Result<Vec<SeizureTypeCount>>;
}

pub struct SeizureRepositoryImpl {
    pool: MySqlPool,
}

impl SeizureRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE conditions for `filter`; binds must follow the same order
fn push_filter_conditions(sql: &mut String, filter: &SeizureFilter) {
    sql.push_str(" WHERE 1=1");
    if filter.slaughterhouse_id.is_some() {
        sql.push_str(" AND slaughterhouse_id = ?");
    }
    if filter.start.is_some() {
        sql.push_str(" AND seizure_datetime >= ?");
    }
    if filter.end.is_some() {
        sql.push_str(" AND seizure_datetime <= ?");
    }
    if filter.species.is_some() {
        sql.push_str(" AND species = ?");
    }
    if filter.reason.is_some() {
        sql.push_str(" AND reason = ?");
    }
}

fn bind_filter<'q, O>(
    mut query: QueryAs<'q, MySql, O, <MySql as sqlx::Database>::Arguments<'q>>,
    filter: &SeizureFilter,
) -> QueryAs<'q, MySql, O, <MySql as sqlx::Database>::Arguments<'q>> {
    if let Some(slaughterhouse_id) = filter.slaughterhouse_id {
        query = query.bind(slaughterhouse_id);
    }
    if let Some(start) = filter.start {
        query = query.bind(start);
    }
    if let Some(end) = filter.end {
        query = query.bind(end);
    }
    if let Some(species) = filter.species {
        query = query.bind(species);
    }
    if let Some(ref reason) = filter.reason {
        query = query.bind(reason.clone());
    }
    query
}

fn grouped_count_sql(column: &str, filter: &SeizureFilter) -> String {
    let mut sql = format!("SELECT {column}, COUNT(*) AS cnt FROM seizure_records");
    push_filter_conditions(&mut sql, filter);
    sql.push_str(&format!(" GROUP BY {column} ORDER BY cnt DESC, {column} ASC"));
    sql
}

#[async_trait]
impl SeizureRepository for SeizureRepositoryImpl {
    async fn create(&self, input: &NewSeizureRecord) -> Result<SeizureRecord> {
        let id = StringUuid::new_v4();
        let photos =
            serde_json::to_string(&input.photos).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO seizure_records (
                id, seizure_datetime, species, seized_part, seizure_type, reason,
                quantity, unit, notes, photos, slaughterhouse_id, inspector_id,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(id)
        .bind(input.seizure_datetime)
        .bind(input.species)
        .bind(input.seized_part)
        .bind(input.seizure_type)
        .bind(&input.reason)
        .bind(input.quantity)
        .bind(input.unit)
        .bind(&input.notes)
        .bind(&photos)
        .bind(input.slaughterhouse_id)
        .bind(input.inspector_id)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("Failed to create seizure record"))
        })
    }

    async fn find_by_id(&self, id: StringUuid) -> Result<Option<SeizureRecord>> {
        let sql = format!("SELECT {SEIZURE_COLUMNS} FROM seizure_records WHERE id = ?");
        let record = sqlx::query_as::<_, SeizureRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(
        &self,
        filter: &SeizureFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<SeizureRecord>> {
        let mut sql = format!("SELECT {SEIZURE_COLUMNS} FROM seizure_records");
        push_filter_conditions(&mut sql, filter);
        sql.push_str(" ORDER BY seizure_datetime DESC, created_at DESC LIMIT ? OFFSET ?");

        let records = bind_filter(sqlx::query_as::<_, SeizureRecord>(&sql), filter)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn count(&self, filter: &SeizureFilter) -> Result<i64> {
        let mut sql = String::from("SELECT COUNT(*) FROM seizure_records");
        push_filter_conditions(&mut sql, filter);

        let (count,) = bind_filter(sqlx::query_as::<_, (i64,)>(&sql), filter)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn count_by_slaughterhouse(&self, slaughterhouse_id: StringUuid) -> Result<i64> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM seizure_records WHERE slaughterhouse_id = ?")
                .bind(slaughterhouse_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    async fn delete(&self, id: StringUuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM seizure_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Seizure record not found".to_string()));
        }

        Ok(())
    }

    async fn count_by_species(&self, filter: &SeizureFilter) -> Result<Vec<SpeciesCount>> {
        let sql = grouped_count_sql("species", filter);
        let rows = bind_filter(sqlx::query_as::<_, (Species, i64)>(&sql), filter)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(species, count)| SpeciesCount { species, count })
            .collect())
    }

    async fn count_by_reason(&self, filter: &SeizureFilter) -> Result<Vec<ReasonCount>> {
        let sql = grouped_count_sql("reason", filter);
        let rows = bind_filter(sqlx::query_as::<_, (String, i64)>(&sql), filter)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(reason, count)| ReasonCount { reason, count })
            .collect())
    }

    async fn count_by_seizure_type(
        &self,
        filter: &SeizureFilter,
    ) -> Result<Vec<SeizureTypeCount>> {
        let sql = grouped_count_sql("seizure_type", filter);
        let rows = bind_filter(sqlx::query_as::<_, (SeizureType, i64)>(&sql), filter)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(seizure_type, count)| SeizureTypeCount {
                seizure_type,
                count,
            })
            .collect())
    }
}
