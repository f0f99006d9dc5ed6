use chrono::NaiveDate;
use sqlx::{
    SqlitePool,
    FromRow,
};

use crate::domain::models::{
    DayAssignment,
    EntrySource,
    LeaveType,
    RosterEntry,
    ShiftType,
};
use crate::domain::roster_store::RosterEntryStore;

/// 個人ロスターストアのスナップショット永続化。
/// ホスト環境のストレージ（1ブロブ保存）と同じ感覚で、
/// 「全削除 → 全挿入」を1トランザクションで行います
pub struct RosterEntryRepository {
    pool: SqlitePool,
}

// =====================
// DB読み込み用ヘルパー構造体
// =====================

#[derive(FromRow)]
struct RosterEntryRow {
    id: i64,
    member_id: String,
    date: String,
    kind: String,
    shift_type: Option<String>,
    leave_type: Option<String>,
    team_id: Option<String>,
    source: String,
}

impl RosterEntryRow {
    /// DB行をドメインのエントリへ復元する
    fn into_entry(self) -> Result<RosterEntry, String> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| format!("不正な日付がDBに保存されています: {}", self.date))?;

        let assignment = match self.kind.as_str() {
            "Shift" => {
                let raw = self.shift_type
                    .ok_or_else(|| "Shift行に shift_type がありません".to_string())?;
                let shift = ShiftType::parse(&raw)
                    .ok_or_else(|| format!("未知のシフト種別: {}", raw))?;
                DayAssignment::Shift { shift, team_id: self.team_id }
            }
            "Leave" => {
                let raw = self.leave_type
                    .ok_or_else(|| "Leave行に leave_type がありません".to_string())?;
                let leave = LeaveType::parse(&raw)
                    .ok_or_else(|| format!("未知の休暇種別: {}", raw))?;
                DayAssignment::Leave { leave }
            }
            other => return Err(format!("未知のエントリ種別: {}", other)),
        };

        let source = EntrySource::parse(&self.source)
            .ok_or_else(|| format!("未知の出自タグ: {}", self.source))?;

        Ok(RosterEntry {
            id: self.id,
            member_id: self.member_id,
            date,
            assignment,
            source,
        })
    }
}

impl RosterEntryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// ストア全体をスナップショットとして保存する
    pub async fn save_snapshot(&self, store: &RosterEntryStore) -> Result<(), String> {
        // 1. トランザクション開始
        let mut tx = self.pool.begin().await.map_err(|e| e.to_string())?;

        // 2. 既存スナップショットを破棄
        sqlx::query("DELETE FROM roster_entries")
            .execute(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;

        // 3. 全エントリを挿入
        for entry in store.entries() {
            let (kind, shift_type, leave_type, team_id) = match &entry.assignment {
                DayAssignment::Shift { shift, team_id } => {
                    ("Shift", Some(shift.as_str()), None, team_id.clone())
                }
                DayAssignment::Leave { leave } => {
                    ("Leave", None, Some(leave.as_str()), None)
                }
            };

            sqlx::query(
                "INSERT INTO roster_entries (
                    id,
                    member_id,
                    date,
                    kind,
                    shift_type,
                    leave_type,
                    team_id,
                    source
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            )
            .bind(entry.id)
            .bind(&entry.member_id)
            .bind(entry.date.format("%Y-%m-%d").to_string())
            .bind(kind)
            .bind(shift_type)
            .bind(leave_type)
            .bind(team_id)
            .bind(entry.source.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| e.to_string())?;
        }

        // 4. トランザクションコミット
        tx.commit().await.map_err(|e| e.to_string())?;

        Ok(())
    }

    /// スナップショットからストアを組み立て直す
    pub async fn load_all(&self) -> Result<RosterEntryStore, String> {
        let rows: Vec<RosterEntryRow> = sqlx::query_as::<sqlx::Sqlite, RosterEntryRow>(
            "SELECT id, member_id, date, kind, shift_type, leave_type, team_id, source
             FROM roster_entries ORDER BY id ASC"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| e.to_string())?;

        let entries: Result<Vec<RosterEntry>, String> = rows
            .into_iter()
            .map(|row| row.into_entry())
            .collect();

        Ok(RosterEntryStore::restore(entries?))
    }
}

#[cfg(test)]
mod roster_repo_tests {
    use super::*;
    use crate::domain::models::EntrySource;
    use sqlx::sqlite::SqlitePoolOptions;

    // テスト用のDBセットアップ（メモリ上のDBを使用）
    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1) // メモリDBは接続ごとに別物になるため1本に固定
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create memory pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");

        pool
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        // 1. 準備 (Arrange)
        let pool = setup_test_db().await;
        let repository = RosterEntryRepository::new(pool);

        let mut store = RosterEntryStore::new();
        store.add_entry(
            "m1".to_string(),
            date("2024-06-10"),
            DayAssignment::Shift { shift: ShiftType::Early, team_id: Some("alpha".to_string()) },
            EntrySource::Team,
        ).unwrap();
        store.add_entry(
            "m2".to_string(),
            date("2024-06-11"),
            DayAssignment::Leave { leave: LeaveType::AnnualLeave },
            EntrySource::Leave,
        ).unwrap();

        // 2. 実行 (Act)
        repository.save_snapshot(&store).await.expect("Failed to save");
        let loaded = repository.load_all().await.expect("Failed to load");

        // 3. 検証 (Assert)
        assert_eq!(loaded.entries(), store.entries());

        // 復元後も採番が続けられる（IDの衝突が起きない）
        let mut loaded = loaded;
        let new_id = loaded.add_entry(
            "m3".to_string(),
            date("2024-06-12"),
            DayAssignment::Leave { leave: LeaveType::CompensationLeave },
            EntrySource::Leave,
        ).unwrap();
        assert!(loaded.entries().iter().filter(|e| e.id == new_id).count() == 1);
        assert!(new_id > 2);
    }

    #[tokio::test]
    async fn test_save_snapshot_replaces_previous() {
        let pool = setup_test_db().await;
        let repository = RosterEntryRepository::new(pool.clone());

        let mut store = RosterEntryStore::new();
        store.add_entry(
            "m1".to_string(),
            date("2024-06-10"),
            DayAssignment::Shift { shift: ShiftType::Normal, team_id: None },
            EntrySource::Individual,
        ).unwrap();
        repository.save_snapshot(&store).await.expect("Failed to save");

        // エントリを消して保存し直すと、DB側も空になる
        let id = store.entries()[0].id;
        store.remove_entry(id);
        repository.save_snapshot(&store).await.expect("Failed to save again");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roster_entries")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    /// スキーマ側の (member_id, date) 一意制約が効いているか？
    #[tokio::test]
    async fn test_unique_constraint_on_member_and_date() {
        let pool = setup_test_db().await;

        sqlx::query(
            "INSERT INTO roster_entries (id, member_id, date, kind, shift_type, source)
             VALUES (1, 'm1', '2024-06-10', 'Shift', 'Early', 'Individual')"
        )
        .execute(&pool)
        .await
        .unwrap();

        let duplicate = sqlx::query(
            "INSERT INTO roster_entries (id, member_id, date, kind, leave_type, source)
             VALUES (2, 'm1', '2024-06-10', 'Leave', 'AnnualLeave', 'Leave')"
        )
        .execute(&pool)
        .await;

        assert!(duplicate.is_err());
    }
}
