use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use crate::domain::models::{
    EntryId,
    ShiftType,
    TeamId,
    TeamRoster,
    TeamRosterStatus,
};

/// チームシフト行のストア。
/// 形は個人側のストアと同じで、キーが (チーム, 日付) になります
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRosterStore {
    rows: Vec<TeamRoster>,
    next_id: EntryId,
}

#[derive(Debug, PartialEq)]
pub enum AddTeamRosterErrorKind {
    /// 同一チーム・同一日の行が既に存在する
    Conflict,
}

impl TeamRosterStore {
    pub fn new() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }

    /// 永続化スナップショットからの復元
    pub fn restore(rows: Vec<TeamRoster>) -> Self {
        let next_id = rows.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    fn issue_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// チームシフト行を追加する。
    /// (チーム, 日付) が埋まっている場合はエラーを返し、既存を上書きしません
    pub fn add_roster(
        &mut self,
        team_id: TeamId,
        date: NaiveDate,
        shift: ShiftType,
        status: TeamRosterStatus,
    ) -> Result<EntryId, AddTeamRosterErrorKind> {
        if self.find_by_team_and_date(&team_id, date).is_some() {
            return Err(AddTeamRosterErrorKind::Conflict);
        }

        let id = self.issue_id();
        self.rows.push(TeamRoster { id, team_id, date, shift, status });
        Ok(id)
    }

    /// IDを指定して削除する。存在しないIDは無視します（冪等）
    pub fn remove_roster(&mut self, id: EntryId) -> bool {
        match self.rows.iter().position(|r| r.id == id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&TeamRoster> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn find_by_team_and_date(&self, team_id: &str, date: NaiveDate) -> Option<&TeamRoster> {
        self.rows.iter().find(|r| r.team_id == team_id && r.date == date)
    }

    /// チームの期間内の行を日付順に返す（両端を含む）
    pub fn find_by_team_and_range(
        &self,
        team_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<&TeamRoster> {
        let mut found: Vec<&TeamRoster> = self.rows
            .iter()
            .filter(|r| r.team_id == team_id && start <= r.date && r.date <= end)
            .collect();
        found.sort_by_key(|r| r.date);
        found
    }

    pub fn rows(&self) -> &[TeamRoster] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for TeamRosterStore {
    fn default() -> Self {
        Self::new()
    }
}
