//! Integration tests for the aggregate queries behind the reporting
//! API: overall/per-setter stats, speed values, trends, time of day.

use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;

use leadspeed_core::lead_status::LeadStatus;
use leadspeed_core::types::Timestamp;
use leadspeed_db::models::lead::CreateLead;
use leadspeed_db::repositories::{LeadRepo, SetterRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn base_time() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
}

async fn seed_lead(
    pool: &PgPool,
    crm_id: &str,
    setter_id: Option<i64>,
    created_at: Timestamp,
    speed: Option<i64>,
) {
    let input = CreateLead {
        crm_lead_id: crm_id.to_string(),
        appointment_setter_id: setter_id,
        status: LeadStatus::initial(setter_id.is_some()),
        created_at,
        metadata: None,
    };
    LeadRepo::insert_if_absent(pool, &input).await.unwrap().unwrap();

    if let Some(minutes) = speed {
        LeadRepo::mark_contacted(
            pool,
            crm_id,
            created_at + Duration::minutes(minutes),
            Some(minutes),
        )
        .await
        .unwrap()
        .unwrap();
    }
}

// ---------------------------------------------------------------------------
// Overall stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stats_overall_on_empty_table(pool: PgPool) {
    let row = LeadRepo::stats_overall(&pool).await.unwrap();

    assert_eq!(row.total_leads, 0);
    assert_eq!(row.contacted_leads, 0);
    assert_eq!(row.avg_speed_minutes, None);
    assert_eq!(row.min_speed_minutes, None);
    assert_eq!(row.max_speed_minutes, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn stats_overall_counts_all_but_averages_contacted(pool: PgPool) {
    seed_lead(&pool, "lead_1", None, base_time(), Some(10)).await;
    seed_lead(&pool, "lead_2", None, base_time(), Some(20)).await;
    seed_lead(&pool, "lead_3", None, base_time(), None).await;

    let row = LeadRepo::stats_overall(&pool).await.unwrap();

    assert_eq!(row.total_leads, 3);
    assert_eq!(row.contacted_leads, 2);
    assert_eq!(row.avg_speed_minutes, Some(15.0));
    assert_eq!(row.min_speed_minutes, Some(10));
    assert_eq!(row.max_speed_minutes, Some(20));
}

// ---------------------------------------------------------------------------
// Per-setter stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn stats_per_setter_includes_setters_without_leads(pool: PgPool) {
    let busy = SetterRepo::find_or_create(&pool, "busy@example.com", "Busy")
        .await
        .unwrap();
    SetterRepo::find_or_create(&pool, "idle@example.com", "Idle")
        .await
        .unwrap();

    seed_lead(&pool, "lead_b1", Some(busy.id), base_time(), Some(6)).await;
    seed_lead(&pool, "lead_b2", Some(busy.id), base_time(), None).await;
    // Unassigned leads belong to no setter's group.
    seed_lead(&pool, "lead_nobody", None, base_time(), Some(99)).await;

    let rows = LeadRepo::stats_per_setter(&pool).await.unwrap();
    assert_eq!(rows.len(), 2);

    let busy_row = rows.iter().find(|r| r.setter_email == "busy@example.com").unwrap();
    assert_eq!(busy_row.total_leads, 2);
    assert_eq!(busy_row.contacted_leads, 1);
    assert_eq!(busy_row.avg_speed_minutes, Some(6.0));

    let idle_row = rows.iter().find(|r| r.setter_email == "idle@example.com").unwrap();
    assert_eq!(idle_row.total_leads, 0);
    assert_eq!(idle_row.contacted_leads, 0);
    assert_eq!(idle_row.avg_speed_minutes, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn stats_for_setter_scopes_to_that_setter(pool: PgPool) {
    let a = SetterRepo::find_or_create(&pool, "a@example.com", "A").await.unwrap();
    let b = SetterRepo::find_or_create(&pool, "b@example.com", "B").await.unwrap();

    seed_lead(&pool, "lead_a", Some(a.id), base_time(), Some(5)).await;
    seed_lead(&pool, "lead_b", Some(b.id), base_time(), Some(50)).await;

    let row = LeadRepo::stats_for_setter(&pool, a.id).await.unwrap();
    assert_eq!(row.total_leads, 1);
    assert_eq!(row.avg_speed_minutes, Some(5.0));
}

// ---------------------------------------------------------------------------
// Speed values
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn speed_values_are_sorted_and_skip_nulls(pool: PgPool) {
    seed_lead(&pool, "lead_30", None, base_time(), Some(30)).await;
    seed_lead(&pool, "lead_10", None, base_time(), Some(10)).await;
    seed_lead(&pool, "lead_open", None, base_time(), None).await;
    seed_lead(&pool, "lead_20", None, base_time(), Some(20)).await;

    let values = LeadRepo::speed_values(&pool).await.unwrap();
    assert_eq!(values, vec![10, 20, 30]);
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn trends_restrict_to_trailing_window_and_sort_ascending(pool: PgPool) {
    let now = Utc::now();
    seed_lead(&pool, "lead_today", None, now, Some(12)).await;
    seed_lead(&pool, "lead_lastweek", None, now - Duration::days(7), Some(8)).await;
    seed_lead(&pool, "lead_ancient", None, now - Duration::days(45), Some(2)).await;

    let rows = LeadRepo::trends(&pool, "YYYY-MM-DD").await.unwrap();
    assert_eq!(rows.len(), 2);
    // Period keys ascend; the 45-day-old lead is outside the window.
    assert!(rows[0].period < rows[1].period);
    assert_eq!(rows[1].period, now.format("%Y-%m-%d").to_string());
    assert_eq!(rows[1].total_leads, 1);
    assert_eq!(rows[1].avg_speed_minutes, Some(12.0));
}

#[sqlx::test(migrations = "../../migrations")]
async fn trends_group_by_iso_week_format(pool: PgPool) {
    let now = Utc::now();
    seed_lead(&pool, "lead_w1", None, now, Some(4)).await;
    seed_lead(&pool, "lead_w2", None, now, Some(6)).await;

    let rows = LeadRepo::trends(&pool, "IYYY-IW").await.unwrap();
    let this_week = now.format("%G-%V").to_string();
    let bucket = rows.iter().find(|r| r.period == this_week).unwrap();
    assert_eq!(bucket.total_leads, 2);
    assert_eq!(bucket.avg_speed_minutes, Some(5.0));
}

// ---------------------------------------------------------------------------
// Time of day
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn time_of_day_averages_components_in_utc(pool: PgPool) {
    seed_lead(
        &pool,
        "lead_am",
        None,
        Utc.with_ymd_and_hms(2024, 1, 15, 9, 10, 0).unwrap(),
        None,
    )
    .await;
    seed_lead(
        &pool,
        "lead_pm",
        None,
        Utc.with_ymd_and_hms(2024, 1, 16, 15, 50, 0).unwrap(),
        None,
    )
    .await;

    let row = LeadRepo::time_of_day(&pool).await.unwrap();
    assert_eq!(row.total_leads, 2);
    assert_eq!(row.avg_hour, Some(12.0));
    assert_eq!(row.avg_minute, Some(30.0));
}

#[sqlx::test(migrations = "../../migrations")]
async fn time_of_day_on_empty_table(pool: PgPool) {
    let row = LeadRepo::time_of_day(&pool).await.unwrap();
    assert_eq!(row.total_leads, 0);
    assert_eq!(row.avg_hour, None);
    assert_eq!(row.avg_minute, None);
}
