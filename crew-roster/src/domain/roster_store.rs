use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use crate::domain::models::{
    DayAssignment,
    EntryId,
    EntrySource,
    MemberId,
    RosterEntry,
};

/// 個人ロスターエントリのストア。
/// (メンバー, 日付) ごとに高々1件という不変条件をここで守ります。
/// IDは採番カウンタで発行し、削除しても再利用しません
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryStore {
    entries: Vec<RosterEntry>,
    next_id: EntryId,
}

#[derive(Debug, PartialEq)]
pub enum AddEntryErrorKind {
    /// 同一メンバー・同一日のエントリが既に存在する
    Conflict,
}

impl RosterEntryStore {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 1 }
    }

    /// 永続化スナップショットからの復元。
    /// 採番カウンタは既存IDの最大値の次から再開します
    pub fn restore(entries: Vec<RosterEntry>) -> Self {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self { entries, next_id }
    }

    fn issue_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// エントリを追加する。
    /// (メンバー, 日付) が埋まっている場合はエラーを返し、既存を上書きしません
    pub fn add_entry(
        &mut self,
        member_id: MemberId,
        date: NaiveDate,
        assignment: DayAssignment,
        source: EntrySource,
    ) -> Result<EntryId, AddEntryErrorKind> {
        if self.find_by_member_and_date(&member_id, date).is_some() {
            return Err(AddEntryErrorKind::Conflict);
        }

        let id = self.issue_id();
        self.entries.push(RosterEntry { id, member_id, date, assignment, source });
        Ok(id)
    }

    /// (メンバー, 日付) の既存エントリを明示的に置き換える。
    /// 通常の書き込み経路は add_entry で、こちらは競合解消（和解処理）
    /// 専用の入口です
    pub fn replace_entry(
        &mut self,
        member_id: MemberId,
        date: NaiveDate,
        assignment: DayAssignment,
        source: EntrySource,
    ) -> EntryId {
        self.entries.retain(|e| !(e.member_id == member_id && e.date == date));

        let id = self.issue_id();
        self.entries.push(RosterEntry { id, member_id, date, assignment, source });
        id
    }

    /// IDを指定して削除する。
    /// 存在しないIDを渡しても何もしません（冪等）
    pub fn remove_entry(&mut self, id: EntryId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// チーム展開で作られたエントリを (チームID, 日付, source=Team) の
    /// 厳密キーで一括削除し、消した件数を返す。
    /// (メンバー, 日付) だけで消すと出自の異なるエントリまで
    /// 巻き込む恐れがあるため、キーは緩めません
    pub fn remove_team_sourced(&mut self, team_id: &str, date: NaiveDate) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| {
            !(e.source == EntrySource::Team
                && e.date == date
                && e.assigned_team().map(|t| t.as_str()) == Some(team_id))
        });
        before - self.entries.len()
    }

    pub fn get(&self, id: EntryId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn find_by_member_and_date(&self, member_id: &str, date: NaiveDate) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.member_id == member_id && e.date == date)
    }

    /// メンバーの期間内エントリを日付順に返す（両端を含む）
    pub fn find_by_date_range(
        &self,
        member_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&RosterEntry> {
        let mut found: Vec<&RosterEntry> = self.entries
            .iter()
            .filter(|e| e.member_id == member_id && start <= e.date && e.date <= end)
            .collect();
        found.sort_by_key(|e| e.date);
        found
    }

    pub fn find_by_date(&self, date: NaiveDate) -> Vec<&RosterEntry> {
        self.entries.iter().filter(|e| e.date == date).collect()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RosterEntryStore {
    fn default() -> Self {
        Self::new()
    }
}
