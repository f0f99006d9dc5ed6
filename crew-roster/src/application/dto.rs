use serde::Serialize;

/// 一括割当の結果（フロントエンド表示用）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDatesResult {
    // 要求された日数
    pub requested: usize,
    // 実際に適用できた日付 "YYYY-MM-DD"（要求より少なくなり得る）
    pub applied: Vec<String>,
}

impl AppliedDatesResult {
    pub fn skipped(&self) -> usize {
        self.requested - self.applied.len()
    }
}

/// 競合1件分の表示用データ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDto {
    pub date: String,
    pub member_id: String,
    // カタログから解決した表示名。見つからない場合はIDをそのまま入れる
    pub member_name: String,
}

/// チーム×期間の競合レポート
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub team_id: String,
    pub conflicts: Vec<ConflictDto>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty()
    }
}
