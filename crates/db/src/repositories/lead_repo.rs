//! Repository for the `leads` table: ingestion, the contact transition,
//! filtered listing, and the aggregate queries behind the reporting API.

use sqlx::PgPool;

use leadspeed_core::types::{DbId, Timestamp};

use crate::models::lead::{
    CreateLead, Lead, LeadFilter, LeadStatsRow, LeadWithSetter, SetterStatsRow, TimeOfDayRow,
    TrendRow,
};

/// Column list for `leads` queries.
const COLUMNS: &str = "id, crm_lead_id, appointment_setter_id, status, created_at, \
     first_contacted_at, speed_to_lead_minutes, metadata, received_at";

/// Column list for `leads` joined with setter display fields.
const JOINED_COLUMNS: &str = "l.id, l.crm_lead_id, l.appointment_setter_id, l.status, \
     l.created_at, l.first_contacted_at, l.speed_to_lead_minutes, l.metadata, l.received_at, \
     s.name AS setter_name, s.email AS setter_email";

/// Aggregate expressions shared by the stats queries. Counts cover all
/// rows in the group; speed aggregates skip nulls.
const STATS_COLUMNS: &str = "COUNT(*) AS total_leads, \
     COUNT(first_contacted_at) AS contacted_leads, \
     AVG(speed_to_lead_minutes)::float8 AS avg_speed_minutes, \
     MIN(speed_to_lead_minutes) AS min_speed_minutes, \
     MAX(speed_to_lead_minutes) AS max_speed_minutes";

/// Provides read/write operations for leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a lead unless one with the same external id already
    /// exists.
    ///
    /// Returns `None` when another row holds the id. Ingestion is keyed
    /// on `crm_lead_id`, so a duplicate creation event (or a lost race)
    /// leaves the stored row untouched; callers then read it back.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads \
                (crm_lead_id, appointment_setter_id, status, created_at, metadata) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (crm_lead_id) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.crm_lead_id)
            .bind(input.appointment_setter_id)
            .bind(input.status.as_str())
            .bind(input.created_at)
            .bind(&input.metadata)
            .fetch_optional(pool)
            .await
    }

    /// Find a lead by its external CRM identifier.
    pub async fn find_by_crm_id(
        pool: &PgPool,
        crm_lead_id: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE crm_lead_id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(crm_lead_id)
            .fetch_optional(pool)
            .await
    }

    /// Record first contact for a lead.
    ///
    /// The `first_contacted_at IS NULL` guard makes the status flip and
    /// the minutes write a single atomic row-level transition; a second
    /// contact event matches zero rows. Returns `None` when the lead was
    /// already contacted or does not exist.
    pub async fn mark_contacted(
        pool: &PgPool,
        crm_lead_id: &str,
        contacted_at: Timestamp,
        speed_to_lead_minutes: Option<i64>,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads \
             SET first_contacted_at = $2, \
                 speed_to_lead_minutes = $3, \
                 status = 'contacted' \
             WHERE crm_lead_id = $1 AND first_contacted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(crm_lead_id)
            .bind(contacted_at)
            .bind(speed_to_lead_minutes)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest-first with optional filters, joined with setter
    /// display fields (null for unassigned leads).
    pub async fn list(
        pool: &PgPool,
        filter: &LeadFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LeadWithSetter>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM leads l \
             LEFT JOIN appointment_setters s ON s.id = l.appointment_setter_id \
             WHERE ($1::bigint IS NULL OR l.appointment_setter_id = $1) \
               AND ($2::text IS NULL OR l.status = $2) \
               AND ($3::timestamptz IS NULL OR l.created_at >= $3) \
               AND ($4::timestamptz IS NULL OR l.created_at <= $4) \
             ORDER BY l.created_at DESC, l.id DESC \
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, LeadWithSetter>(&query)
            .bind(filter.appointment_setter_id)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.created_from)
            .bind(filter.created_to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Overall aggregate stats across all leads.
    pub async fn stats_overall(pool: &PgPool) -> Result<LeadStatsRow, sqlx::Error> {
        let query = format!("SELECT {STATS_COLUMNS} FROM leads");
        sqlx::query_as::<_, LeadStatsRow>(&query).fetch_one(pool).await
    }

    /// Aggregate stats for a single setter's leads.
    pub async fn stats_for_setter(
        pool: &PgPool,
        setter_id: DbId,
    ) -> Result<LeadStatsRow, sqlx::Error> {
        let query =
            format!("SELECT {STATS_COLUMNS} FROM leads WHERE appointment_setter_id = $1");
        sqlx::query_as::<_, LeadStatsRow>(&query)
            .bind(setter_id)
            .fetch_one(pool)
            .await
    }

    /// Aggregate stats for every known setter in one pass.
    ///
    /// Setters with no leads appear with zero counts and null speed
    /// aggregates rather than being omitted. Ordered by setter name;
    /// ranking is applied by the caller.
    pub async fn stats_per_setter(pool: &PgPool) -> Result<Vec<SetterStatsRow>, sqlx::Error> {
        sqlx::query_as::<_, SetterStatsRow>(
            "SELECT s.id AS setter_id, \
                    s.email AS setter_email, \
                    s.name AS setter_name, \
                    s.created_at AS setter_created_at, \
                    s.updated_at AS setter_updated_at, \
                    COUNT(l.id) AS total_leads, \
                    COUNT(l.first_contacted_at) AS contacted_leads, \
                    AVG(l.speed_to_lead_minutes)::float8 AS avg_speed_minutes, \
                    MIN(l.speed_to_lead_minutes) AS min_speed_minutes, \
                    MAX(l.speed_to_lead_minutes) AS max_speed_minutes \
             FROM appointment_setters s \
             LEFT JOIN leads l ON l.appointment_setter_id = s.id \
             GROUP BY s.id \
             ORDER BY s.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// All recorded speeds in ascending order, for percentile
    /// interpolation.
    pub async fn speed_values(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT speed_to_lead_minutes FROM leads \
             WHERE speed_to_lead_minutes IS NOT NULL \
             ORDER BY speed_to_lead_minutes ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Roll leads up into calendar buckets over a trailing 30-day
    /// window anchored at query time.
    ///
    /// `date_format` is a `to_char` pattern (see
    /// `TrendPeriod::date_format`). Buckets with no leads are absent
    /// from the result, and keys sort ascending.
    pub async fn trends(pool: &PgPool, date_format: &str) -> Result<Vec<TrendRow>, sqlx::Error> {
        sqlx::query_as::<_, TrendRow>(
            "SELECT to_char(created_at, $1) AS period, \
                    COUNT(*) AS total_leads, \
                    COUNT(first_contacted_at) AS contacted_leads, \
                    AVG(speed_to_lead_minutes)::float8 AS avg_speed_minutes \
             FROM leads \
             WHERE created_at >= NOW() - INTERVAL '30 days' \
             GROUP BY 1 \
             ORDER BY 1 ASC",
        )
        .bind(date_format)
        .fetch_all(pool)
        .await
    }

    /// Independent arithmetic means of the hour and minute components of
    /// lead creation times, in UTC.
    pub async fn time_of_day(pool: &PgPool) -> Result<TimeOfDayRow, sqlx::Error> {
        sqlx::query_as::<_, TimeOfDayRow>(
            "SELECT AVG(EXTRACT(HOUR FROM created_at AT TIME ZONE 'UTC'))::float8 AS avg_hour, \
                    AVG(EXTRACT(MINUTE FROM created_at AT TIME ZONE 'UTC'))::float8 AS avg_minute, \
                    COUNT(*) AS total_leads \
             FROM leads",
        )
        .fetch_one(pool)
        .await
    }
}
