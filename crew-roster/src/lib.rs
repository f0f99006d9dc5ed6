pub mod domain;
pub mod application;
pub mod infrastructure;

use domain::roster_store::RosterEntryStore;
use domain::team_roster_store::TeamRosterStore;

// 全てのストアを保持するコンテナ
// 画面側が生成して保持し、コマンド関数に注入して使います。
// モジュールレベルの隠れた状態は持ちません
pub struct RosterServices {
    pub roster: RosterEntryStore,
    pub team_roster: TeamRosterStore,
}

impl RosterServices {
    pub fn new() -> Self {
        Self {
            roster: RosterEntryStore::new(),
            team_roster: TeamRosterStore::new(),
        }
    }

    /// 永続化レイヤから読み戻したストアで組み立てる
    pub fn from_stores(roster: RosterEntryStore, team_roster: TeamRosterStore) -> Self {
        Self { roster, team_roster }
    }
}

impl Default for RosterServices {
    fn default() -> Self {
        Self::new()
    }
}
