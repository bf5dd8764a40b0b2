//! Team and ballpark persistence
//!
//! Both tables are keyed by a natural key (`team_code`, `ballpark_name`)
//! with a UNIQUE constraint; creates never fail on a concurrent duplicate.

use alpb_common::db::models::{Ballpark, BallparkId, Team, TeamId};
use alpb_common::{uuid_utils, Error, Result};
use sqlx::{Row, SqlitePool};

/// Load team by its three-letter code
pub async fn find_team_by_code(pool: &SqlitePool, team_code: &str) -> Result<Option<TeamId>> {
    let team_id: Option<String> =
        sqlx::query_scalar("SELECT team_id FROM team WHERE team_code = ?")
            .bind(team_code)
            .fetch_optional(pool)
            .await?;

    team_id
        .map(|id| uuid_utils::parse(&id).map(TeamId))
        .transpose()
}

/// Insert team unless the code already exists; returns the stored id either way
pub async fn insert_team(pool: &SqlitePool, team_code: &str) -> Result<TeamId> {
    let candidate = TeamId::new();

    sqlx::query(
        r#"
        INSERT INTO team (team_id, team_code, created_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(team_code) DO NOTHING
        "#,
    )
    .bind(candidate.to_string())
    .bind(team_code)
    .execute(pool)
    .await?;

    find_team_by_code(pool, team_code)
        .await?
        .ok_or_else(|| Error::Internal(format!("Team '{}' missing after insert", team_code)))
}

/// All teams, ordered by code
pub async fn list_teams(pool: &SqlitePool) -> Result<Vec<Team>> {
    let rows = sqlx::query("SELECT team_id, team_code FROM team ORDER BY team_code")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let team_id: String = row.get("team_id");
            Ok(Team {
                team_id: TeamId(uuid_utils::parse(&team_id)?),
                team_code: row.get("team_code"),
            })
        })
        .collect()
}

/// Load ballpark by exact name
pub async fn find_ballpark_by_name(
    pool: &SqlitePool,
    ballpark_name: &str,
) -> Result<Option<BallparkId>> {
    let ballpark_id: Option<String> =
        sqlx::query_scalar("SELECT ballpark_id FROM ballpark WHERE ballpark_name = ?")
            .bind(ballpark_name)
            .fetch_optional(pool)
            .await?;

    ballpark_id
        .map(|id| uuid_utils::parse(&id).map(BallparkId))
        .transpose()
}

/// Seed a ballpark (administrative; resolvers never create ballparks)
pub async fn insert_ballpark(pool: &SqlitePool, ballpark_name: &str) -> Result<BallparkId> {
    let candidate = BallparkId::new();

    sqlx::query(
        r#"
        INSERT INTO ballpark (ballpark_id, ballpark_name, created_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        ON CONFLICT(ballpark_name) DO NOTHING
        "#,
    )
    .bind(candidate.to_string())
    .bind(ballpark_name)
    .execute(pool)
    .await?;

    find_ballpark_by_name(pool, ballpark_name)
        .await?
        .ok_or_else(|| Error::Internal(format!("Ballpark '{}' missing after insert", ballpark_name)))
}

pub async fn list_ballparks(pool: &SqlitePool) -> Result<Vec<Ballpark>> {
    let rows = sqlx::query("SELECT ballpark_id, ballpark_name FROM ballpark ORDER BY ballpark_name")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| {
            let ballpark_id: String = row.get("ballpark_id");
            Ok(Ballpark {
                ballpark_id: BallparkId(uuid_utils::parse(&ballpark_id)?),
                ballpark_name: row.get("ballpark_name"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpb_common::db::init::create_schema;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        create_schema(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_insert_team_twice_returns_first_id() {
        let pool = setup_test_db().await;

        let first = insert_team(&pool, "LAN").await.unwrap();
        let second = insert_team(&pool, "LAN").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(list_teams(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_team_missing() {
        let pool = setup_test_db().await;
        assert_eq!(find_team_by_code(&pool, "XXX").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ballpark_seed_and_lookup() {
        let pool = setup_test_db().await;

        let id = insert_ballpark(&pool, "ClipperMagazine").await.unwrap();
        assert_eq!(insert_ballpark(&pool, "ClipperMagazine").await.unwrap(), id);
        assert_eq!(
            find_ballpark_by_name(&pool, "ClipperMagazine").await.unwrap(),
            Some(id)
        );
        assert_eq!(find_ballpark_by_name(&pool, "clippermagazine").await.unwrap(), None);

        let all = list_ballparks(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].ballpark_name, "ClipperMagazine");
    }
}
