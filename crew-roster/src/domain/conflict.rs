use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::{MemberId, Team};
use crate::domain::roster_store::RosterEntryStore;
use crate::domain::team_roster_store::TeamRosterStore;

/// 「チームはその日稼働予定だが、編成中のメンバーが休暇を入れている」
/// 状態を表す検出結果1件分
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveConflict {
    pub date: NaiveDate,
    pub member_id: MemberId,
}

/// 指定日に休暇を入れている編成メンバーを列挙する。
///
/// 編成は割当時点のスナップショットではなく、渡されたチーム定義
/// （＝呼び出し時点の編成）で解決します。チームは割当後にも編集される
/// ため、競合は常に「今の編成」に対して評価します
pub fn leave_members_on(
    roster: &RosterEntryStore,
    team: &Team,
    date: NaiveDate,
) -> Vec<MemberId> {
    team.member_ids()
        .into_iter()
        .filter(|member_id| {
            matches!(
                roster.find_by_member_and_date(member_id, date),
                Some(entry) if entry.is_leave()
            )
        })
        .collect()
}

/// 期間内の競合を検出する純粋関数。ストアは変更しません。
///
/// チーム行が存在する日だけが対象で、結果は日付順
/// （同日内は編成順: リーダー → ドライバー → ガード）に並びます。
/// 「解消済み」の記録は持ちません。人が競合に対処したかどうかの
/// 印付けは表示側の関心事で、ここでは毎回計算し直すだけです
pub fn find_conflicts(
    roster: &RosterEntryStore,
    team_roster: &TeamRosterStore,
    team: &Team,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<LeaveConflict> {
    let mut conflicts = Vec::new();

    for row in team_roster.find_by_team_and_range(&team.id, start, end) {
        for member_id in leave_members_on(roster, team, row.date) {
            conflicts.push(LeaveConflict { date: row.date, member_id });
        }
    }

    conflicts
}
