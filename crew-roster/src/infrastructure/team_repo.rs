use chrono::NaiveDate;
use sqlx::{
    SqlitePool,
    FromRow,
};

use crate::domain::models::{ShiftType, TeamRoster, TeamRosterStatus};
use crate::domain::team_roster_store::TeamRosterStore;

/// チームシフトストアのスナップショット永続化。
/// 形は個人側のリポジトリと同じです
pub struct TeamRosterRepository {
    pool: SqlitePool,
}

// DB読み込み用ヘルパー構造体
#[derive(FromRow)]
struct TeamRosterRow {
    id: i64,
    team_id: String,
    date: String,
    shift_type: String,
    status: String,
}

impl TeamRosterRow {
    fn into_row(self) -> Result<TeamRoster, String> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| format!("不正な日付がDBに保存されています: {}", self.date))?;
        let shift = ShiftType::parse(&self.shift_type)
            .ok_or_else(|| format!("未知のシフト種別: {}", self.shift_type))?;
        let status = TeamRosterStatus::parse(&self.status)
            .ok_or_else(|| format!("未知のステータス: {}", self.status))?;

        Ok(TeamRoster {
            id: self.id,
            team_id: self.team_id,
            date,
            shift,
            status,
        })
    }
}

impl TeamRosterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// ストア全体をスナップショットとして保存する（全削除 → 全挿入）
    pub async fn save_snapshot(&self, store: &TeamRosterStore) -> Result<(), String> {
        let mut tx = self.pool.begin().await.map_err(|e| e.to_string())?;

        sqlx::query("DELETE FROM team_rosters")
            .execute(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;

        for row in store.rows() {
            sqlx::query(
                "INSERT INTO team_rosters (
                    id,
                    team_id,
                    date,
                    shift_type,
                    status
                ) VALUES (?1, ?2, ?3, ?4, ?5)"
            )
            .bind(row.id)
            .bind(&row.team_id)
            .bind(row.date.format("%Y-%m-%d").to_string())
            .bind(row.shift.as_str())
            .bind(row.status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;
        }

        tx.commit().await.map_err(|e| e.to_string())?;

        Ok(())
    }

    /// スナップショットからストアを組み立て直す
    pub async fn load_all(&self) -> Result<TeamRosterStore, String> {
        let rows: Vec<TeamRosterRow> = sqlx::query_as::<sqlx::Sqlite, TeamRosterRow>(
            "SELECT id, team_id, date, shift_type, status FROM team_rosters ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| e.to_string())?;

        let restored: Result<Vec<TeamRoster>, String> = rows
            .into_iter()
            .map(|row| row.into_row())
            .collect();

        Ok(TeamRosterStore::restore(restored?))
    }
}
