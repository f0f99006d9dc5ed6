use chrono::NaiveDate;
use tracing::debug;

use crate::domain::models::{
    DayAssignment,
    EntryId,
    EntrySource,
    LeaveType,
    MemberId,
    ShiftType,
    Team,
    TeamRosterStatus,
};
use crate::domain::roster_store::RosterEntryStore;
use crate::domain::team_roster_store::TeamRosterStore;

#[derive(Debug, PartialEq)]
pub enum AddLeaveErrorKind {
    /// その日に既にエントリがある（シフト・休暇を問わず）
    OccupiedDate,
}

/// チームにシフトを一括割当する。
///
/// 日付ごとの扱い:
/// 1. 既にチーム行がある日はスキップする（呼び出し側が選択可能日を
///    絞ってから呼ぶ想定ですが、ここでも上書きは許しません）
/// 2. 受理した日についてチーム行（Scheduled）を作る
/// 3. 呼び出し時点の編成（リーダー・ドライバー・ガード）へ展開し、
///    メンバーごとの個人エントリを作る。ただしそのメンバーの同日に
///    既存エントリ（個人割当・休暇）がある場合は触らない。
///    「後から来たチーム展開は既存に勝てない」方針です
///
/// 戻り値は実際に適用できた日付のリスト（要求より少なくなり得ます）
pub fn assign_team_shift(
    roster: &mut RosterEntryStore,
    team_roster: &mut TeamRosterStore,
    team: &Team,
    dates: &[NaiveDate],
    shift: ShiftType,
) -> Vec<NaiveDate> {
    let member_ids = team.member_ids();
    let mut applied = Vec::new();

    for &date in dates {
        if team_roster
            .add_roster(team.id.clone(), date, shift, TeamRosterStatus::Scheduled)
            .is_err()
        {
            debug!(team_id = %team.id, %date, "既存のチームシフトがあるためスキップ");
            continue;
        }

        for member_id in &member_ids {
            let result = roster.add_entry(
                member_id.clone(),
                date,
                DayAssignment::Shift { shift, team_id: Some(team.id.clone()) },
                EntrySource::Team,
            );
            if result.is_err() {
                debug!(member_id = %member_id, %date, "既存エントリがあるため展開しない");
            }
        }

        applied.push(date);
    }

    applied
}

/// チームシフト行を削除し、そこから展開された個人エントリを連鎖削除する。
/// 連鎖側は (チームID, 日付, source=Team) の厳密キーで消します。
/// 行が見つからない場合は何もしません（冪等）
pub fn remove_team_shift(
    roster: &mut RosterEntryStore,
    team_roster: &mut TeamRosterStore,
    team_roster_id: EntryId,
) -> bool {
    let row = match team_roster.get(team_roster_id) {
        Some(row) => row.clone(),
        None => return false,
    };

    team_roster.remove_roster(team_roster_id);
    let removed = roster.remove_team_sourced(&row.team_id, row.date);
    debug!(team_id = %row.team_id, date = %row.date, removed, "チームシフトと展開エントリを削除");
    true
}

/// 個人の休暇を登録する。
/// UI側が空き日を絞ってから呼ぶ想定ですが、不変条件を守るため
/// ここでも必ず再検証します（既存エントリの上には重ねられません）
pub fn add_individual_leave(
    roster: &mut RosterEntryStore,
    member_id: MemberId,
    date: NaiveDate,
    leave: LeaveType,
) -> Result<EntryId, AddLeaveErrorKind> {
    roster
        .add_entry(
            member_id,
            date,
            DayAssignment::Leave { leave },
            EntrySource::Leave,
        )
        .map_err(|_| AddLeaveErrorKind::OccupiedDate)
}

/// 休暇エントリを削除する。
/// 対象が存在しない、または休暇エントリでない場合は黙って何もしません
pub fn remove_leave(roster: &mut RosterEntryStore, entry_id: EntryId) -> bool {
    let is_leave = matches!(
        roster.get(entry_id),
        Some(entry) if entry.is_leave() && entry.source == EntrySource::Leave
    );
    if !is_leave {
        return false;
    }
    roster.remove_entry(entry_id)
}
