use crew_roster_lib::application::dto::ConflictReport;
use crew_roster_lib::domain::models::RosterEntry;

pub fn show_conflict_report_debug_data(report: &ConflictReport) {
    println!("\n=======================================================");
    println!("⚠️ [DEBUG] 競合レポート (チーム: {})", report.team_id);
    println!("=======================================================");

    if report.conflicts.is_empty() {
        println!("   (競合なし)");
    }

    for conflict in &report.conflicts {
        println!(
            "   ┣ {} : {} ({}) が休暇中です",
            conflict.date, conflict.member_name, conflict.member_id
        );
    }
    println!("=======================================================\n");
}

pub fn show_roster_entries_debug_data(label: &str, entries: &[RosterEntry]) {
    println!("\n=======================================================");
    println!("📋 [DEBUG] ロスターエントリ ({} / 計 {} 件)", label, entries.len());
    println!("=======================================================");

    for entry in entries {
        println!(
            "   ┣ {} : member[{}] {:?} ({:?})",
            entry.date, entry.member_id, entry.assignment, entry.source
        );
    }
    println!("=======================================================\n");
}
