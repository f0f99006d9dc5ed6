use crate::RosterServices;
use crate::application::dto::{AppliedDatesResult, ConflictDto, ConflictReport};
use crate::application::time::{format_iso_date, parse_iso_date, parse_iso_dates};
use crate::domain::assignment;
use crate::domain::conflict;
use crate::domain::models::{
    CrewMember,
    EntryId,
    LeaveType,
    RosterEntry,
    ShiftType,
    Team,
    TeamRoster,
};
use crate::domain::reconcile::{self, TeamDayUpdates, UpdateTeamDayErrorKind};

// =====================
// コマンド（書き込み系）
// =====================
//
// 画面側との境界です。日付は "YYYY-MM-DD" 文字列で受け取り、
// ドメインのエラー種別は表示用メッセージに変換して返します。
// チーム・メンバーのカタログは読み取り専用スナップショットとして
// 呼び出しごとに渡されます（update_team_for_day のみ例外、下記）。

/// チームへのシフト一括割当。
/// 埋まっている日はスキップし、何日適用できたかを結果で報告します
pub fn assign_team_shift(
    services: &mut RosterServices,
    team: &Team,
    dates: &[String],
    shift: ShiftType,
) -> Result<AppliedDatesResult, String> {
    let parsed = parse_iso_dates(dates)?;

    let applied = assignment::assign_team_shift(
        &mut services.roster,
        &mut services.team_roster,
        team,
        &parsed,
        shift,
    );

    Ok(AppliedDatesResult {
        requested: parsed.len(),
        applied: applied.into_iter().map(format_iso_date).collect(),
    })
}

/// チームシフト行の削除（展開された個人エントリも連鎖削除）。
/// 行が見つからなくてもエラーにはしません
pub fn remove_team_shift(services: &mut RosterServices, team_roster_id: EntryId) -> Result<(), String> {
    assignment::remove_team_shift(&mut services.roster, &mut services.team_roster, team_roster_id);
    Ok(())
}

/// 個人の休暇登録。既に予定がある日は拒否します
pub fn add_individual_leave(
    services: &mut RosterServices,
    member_id: &str,
    date: &str,
    leave: LeaveType,
) -> Result<EntryId, String> {
    let parsed = parse_iso_date(date)?;

    assignment::add_individual_leave(&mut services.roster, member_id.to_string(), parsed, leave)
        .map_err(|_| format!("{} には既に予定が入っています", format_iso_date(parsed)))
}

/// 休暇エントリの削除。対象が休暇でない場合や見つからない場合は
/// 何もせず正常終了します
pub fn remove_leave(services: &mut RosterServices, entry_id: EntryId) -> Result<(), String> {
    assignment::remove_leave(&mut services.roster, entry_id);
    Ok(())
}

/// 競合解消のためのチーム編成修正。
/// カタログの読み取り専用ルールの唯一の例外で、呼び出し側が保持する
/// Team レコードを可変で受け取り、編成の変更をそのまま書き戻します
pub fn update_team_for_day(
    services: &mut RosterServices,
    team: &mut Team,
    date: &str,
    updates: &TeamDayUpdates,
) -> Result<(), String> {
    let parsed = parse_iso_date(date)?;

    reconcile::update_team_for_day(&mut services.roster, &services.team_roster, team, parsed, updates)
        .map_err(|e| match e {
            UpdateTeamDayErrorKind::NotScheduled => {
                format!("{} にはこのチームのシフトがありません", format_iso_date(parsed))
            }
        })
}

// =====================
// クエリ（読み取り系）
// =====================

/// メンバーの期間内ロスターを取得する
pub fn get_member_roster(
    services: &RosterServices,
    member_id: &str,
    start: &str,
    end: &str,
) -> Result<Vec<RosterEntry>, String> {
    let start = parse_iso_date(start)?;
    let end = parse_iso_date(end)?;

    Ok(services.roster
        .find_by_date_range(member_id, start, end)
        .into_iter()
        .cloned()
        .collect())
}

/// チームの期間内シフト行を取得する
pub fn get_team_roster(
    services: &RosterServices,
    team_id: &str,
    start: &str,
    end: &str,
) -> Result<Vec<TeamRoster>, String> {
    let start = parse_iso_date(start)?;
    let end = parse_iso_date(end)?;

    Ok(services.team_roster
        .find_by_team_and_range(team_id, start, end)
        .into_iter()
        .cloned()
        .collect())
}

/// チーム×期間の競合レポートを取得する。
/// 毎回計算し直す純粋な読み取りで、「解消済み」の状態は持ちません
pub fn get_conflicts(
    services: &RosterServices,
    team: &Team,
    members: &[CrewMember],
    start: &str,
    end: &str,
) -> Result<ConflictReport, String> {
    let start = parse_iso_date(start)?;
    let end = parse_iso_date(end)?;

    let conflicts = conflict::find_conflicts(&services.roster, &services.team_roster, team, start, end)
        .into_iter()
        .map(|hit| {
            let member_name = members
                .iter()
                .find(|m| m.id == hit.member_id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| hit.member_id.clone());
            ConflictDto {
                date: format_iso_date(hit.date),
                member_id: hit.member_id,
                member_name,
            }
        })
        .collect();

    Ok(ConflictReport { team_id: team.id.clone(), conflicts })
}
