use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::domain::models::{DayAssignment, EntrySource, MemberId, Team};
use crate::domain::roster_store::RosterEntryStore;
use crate::domain::team_roster_store::TeamRosterStore;

/// 日単位のチーム編成修正の入力。Noneの欄は変更しません
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDayUpdates {
    pub leader_id: Option<MemberId>,
    pub driver_id: Option<MemberId>,
    pub guard_ids: Option<Vec<MemberId>>,
}

#[derive(Debug, PartialEq)]
pub enum UpdateTeamDayErrorKind {
    /// 対象日にチームシフト行が存在しない
    NotScheduled,
}

/// 指摘された競合の解消としてチーム編成を修正する。
///
/// 編成の変更はチーム定義そのもの（恒久的なリーダー・ドライバー・
/// ガード構成）に適用します。ロスター側の付け替えは指定日のみが対象で、
/// 他の日の展開履歴には触れません。
///
/// - 編成から外れたメンバー: 指定日の source=Team エントリ
///   （このチーム由来のものに限る）を削除
/// - 編成に入ったメンバー: 指定日のチームシフトを張る。ここだけは
///   既存エントリの明示的な置き換えを許します
///
/// 呼び出し側はこのあと競合検出を再実行して結果を画面に反映します。
/// 入れ替えられなかったメンバーの競合は残り続けますが、それを
/// 「確認済み」として扱うかどうかは表示側の記録です
pub fn update_team_for_day(
    roster: &mut RosterEntryStore,
    team_roster: &TeamRosterStore,
    team: &mut Team,
    date: NaiveDate,
    updates: &TeamDayUpdates,
) -> Result<(), UpdateTeamDayErrorKind> {
    let shift = team_roster
        .find_by_team_and_date(&team.id, date)
        .ok_or(UpdateTeamDayErrorKind::NotScheduled)?
        .shift;

    let before = team.member_ids();

    // 1. 編成の更新
    if let Some(leader_id) = &updates.leader_id {
        team.leader = Some(leader_id.clone());
    }
    if let Some(driver_id) = &updates.driver_id {
        team.driver = Some(driver_id.clone());
    }
    if let Some(guard_ids) = &updates.guard_ids {
        team.guards = guard_ids.clone();
    }

    let after = team.member_ids();

    // 2. 指定日の展開エントリの付け替え
    for member_id in &before {
        if after.contains(member_id) {
            continue;
        }
        let stale = roster
            .find_by_member_and_date(member_id, date)
            .filter(|e| e.source == EntrySource::Team && e.assigned_team() == Some(&team.id))
            .map(|e| e.id);
        if let Some(id) = stale {
            roster.remove_entry(id);
            debug!(member_id = %member_id, %date, "編成から外れたため展開エントリを削除");
        }
    }

    for member_id in &after {
        if before.contains(member_id) {
            continue;
        }
        roster.replace_entry(
            member_id.clone(),
            date,
            DayAssignment::Shift { shift, team_id: Some(team.id.clone()) },
            EntrySource::Team,
        );
        debug!(member_id = %member_id, %date, "編成に加わったため展開エントリを作成");
    }

    Ok(())
}
