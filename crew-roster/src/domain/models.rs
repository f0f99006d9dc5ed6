// =====================
// ドメインモデル定義
// =====================

use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

// IDの型エイリアス
// メンバー・チームのIDは外部（カタログ側）が発行する文字列、
// ストア内エントリのIDはDB行IDに合わせてi64にしています。
pub type EntryId = i64;
pub type MemberId = String;
pub type TeamId = String;

/// 隊員の職種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrewRole {
    SeniorCrewLeader,
    Leader,
    Driver,
    Guard,
}

/// 隊員の在籍状態。カタログ側で管理され、このコアは読むだけ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Active,
    OnLeave,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub id: MemberId,
    pub staff_id: String,
    pub name: String,
    pub role: CrewRole,
    pub status: MemberStatus,
}

/// チーム編成（メイン構造体）
/// メンバー欄はIDによる弱参照です。メンバーの実体やライフサイクルは
/// カタログ側が持つため、ここでは参照の解決を行いません。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub leader: Option<MemberId>,
    // 稼働中のチームはドライバー必須ですが、編集の途中はNoneになり得ます
    pub driver: Option<MemberId>,
    pub guards: Vec<MemberId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_truck_id: Option<String>,
}

impl Team {
    /// 呼び出し時点の編成メンバーを列挙する（リーダー → ドライバー → ガード順）。
    /// 同一メンバーが複数の枠に入っていても1回だけ返す
    pub fn member_ids(&self) -> Vec<MemberId> {
        let mut ids: Vec<MemberId> = Vec::new();
        for id in self.leader.iter()
            .chain(self.driver.iter())
            .chain(self.guards.iter())
        {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

/// シフト種別（固定セット。ユーザー定義は不可）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftType {
    Early,
    Normal,
    Night,
}

impl ShiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Early => "Early",
            ShiftType::Normal => "Normal",
            ShiftType::Night => "Night",
        }
    }

    pub fn parse(value: &str) -> Option<ShiftType> {
        match value {
            "Early" => Some(ShiftType::Early),
            "Normal" => Some(ShiftType::Normal),
            "Night" => Some(ShiftType::Night),
            _ => None,
        }
    }
}

/// 休暇種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    AnnualLeave,
    CompensationLeave,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::AnnualLeave => "AnnualLeave",
            LeaveType::CompensationLeave => "CompensationLeave",
        }
    }

    pub fn parse(value: &str) -> Option<LeaveType> {
        match value {
            "AnnualLeave" => Some(LeaveType::AnnualLeave),
            "CompensationLeave" => Some(LeaveType::CompensationLeave),
            _ => None,
        }
    }
}

/// 個人エントリの出自タグ。
/// Team: チームシフトからの展開 / Individual: 個人への直接割当 / Leave: 休暇
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntrySource {
    Team,
    Individual,
    Leave,
}

impl EntrySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntrySource::Team => "Team",
            EntrySource::Individual => "Individual",
            EntrySource::Leave => "Leave",
        }
    }

    pub fn parse(value: &str) -> Option<EntrySource> {
        match value {
            "Team" => Some(EntrySource::Team),
            "Individual" => Some(EntrySource::Individual),
            "Leave" => Some(EntrySource::Leave),
            _ => None,
        }
    }
}

/// 1日分の割当内容。シフトと休暇を同時に持つことはできないため
/// enumで片方だけを表現します
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum DayAssignment {
    Shift {
        shift: ShiftType,
        // チーム展開で作られた場合の出どころ（チームへの弱参照）
        #[serde(skip_serializing_if = "Option::is_none")]
        team_id: Option<TeamId>,
    },
    Leave {
        leave: LeaveType,
    },
}

/// 個人ロスターエントリ。
/// 不変条件: 同一 (メンバー, 日付) に対して高々1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: EntryId,
    pub member_id: MemberId,
    pub date: NaiveDate,
    pub assignment: DayAssignment,
    pub source: EntrySource,
}

impl RosterEntry {
    pub fn is_leave(&self) -> bool {
        matches!(self.assignment, DayAssignment::Leave { .. })
    }

    /// チーム展開エントリの場合、展開元のチームIDを返す
    pub fn assigned_team(&self) -> Option<&TeamId> {
        match &self.assignment {
            DayAssignment::Shift { team_id, .. } => team_id.as_ref(),
            DayAssignment::Leave { .. } => None,
        }
    }
}

/// チームシフト行の状態。
/// Scheduled → Completed | Cancelled の遷移はコアの外（運行側）が決めます。
/// コアはフィールドとして保持・公開するだけです
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamRosterStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl TeamRosterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRosterStatus::Scheduled => "Scheduled",
            TeamRosterStatus::Completed => "Completed",
            TeamRosterStatus::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<TeamRosterStatus> {
        match value {
            "Scheduled" => Some(TeamRosterStatus::Scheduled),
            "Completed" => Some(TeamRosterStatus::Completed),
            "Cancelled" => Some(TeamRosterStatus::Cancelled),
            _ => None,
        }
    }
}

/// チームシフト行。
/// 不変条件: 同一 (チーム, 日付) に対して高々1件。
/// この行が親となり、同じ (チーム, 日付) を持つ source=Team の
/// 個人エントリが論理的な子になります（強いポインタは持ちません）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRoster {
    pub id: EntryId,
    pub team_id: TeamId,
    pub date: NaiveDate,
    pub shift: ShiftType,
    pub status: TeamRosterStatus,
}
