use clap::{Parser, Subcommand};
use serde::{Serialize, Deserialize};
use std::fs;
use std::path::PathBuf;

use crew_roster_lib::{
    application::commands::{
        add_individual_leave,
        assign_team_shift,
        get_conflicts,
    },
    application::dto::ConflictReport,
    application::time::{dates_in_range, format_iso_date, parse_iso_date},
    domain::models::{
        CrewMember,
        CrewRole,
        LeaveType,
        MemberStatus,
        ShiftType,
        Team,
    },
    domain::roster_store::RosterEntryStore,
    domain::team_roster_store::TeamRosterStore,
    RosterServices,
};

// 引数を構造体として定義します
#[derive(Parser)]
#[command(name = "roster_tools")]
#[command(version = "0.1.0")]
#[command(about = "クルーロスターのデータ操作と動作確認をします", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// サンプルデータで割当〜競合検出の一連の流れを実行します
    Demo {
        /// 実行後のスナップショットを書き出すファイル
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// スナップショットファイルから競合レポートを表示します
    Conflicts {
        /// スナップショットファイル (JSON)
        file: PathBuf,

        /// 対象チームID
        #[arg(short, long)]
        team: String,

        /// 期間の開始日 (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// 期間の終了日 (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
}

/// ファイル保存用のスナップショット形式。
/// カタログとストア2つをひとまとめにした単純なレコードです
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RosterSnapshot {
    members: Vec<CrewMember>,
    teams: Vec<Team>,
    roster: RosterEntryStore,
    team_roster: TeamRosterStore,
}

fn sample_members() -> Vec<CrewMember> {
    vec![
        CrewMember {
            id: "1".to_string(),
            staff_id: "CR001".to_string(),
            name: "John Doe".to_string(),
            role: CrewRole::Leader,
            status: MemberStatus::Active,
        },
        CrewMember {
            id: "2".to_string(),
            staff_id: "CR002".to_string(),
            name: "Jane Smith".to_string(),
            role: CrewRole::Driver,
            status: MemberStatus::Active,
        },
        CrewMember {
            id: "3".to_string(),
            staff_id: "CR003".to_string(),
            name: "Mike Johnson".to_string(),
            role: CrewRole::Guard,
            status: MemberStatus::OnLeave,
        },
    ]
}

fn sample_team() -> Team {
    Team {
        id: "team-alpha".to_string(),
        name: "Team Alpha".to_string(),
        leader: Some("1".to_string()),
        driver: Some("2".to_string()),
        guards: vec!["3".to_string()],
        default_truck_id: Some("TRK-001".to_string()),
    }
}

fn show_conflict_report(report: &ConflictReport) {
    println!("=======================================================");
    println!("⚠️ 競合レポート (チーム: {})", report.team_id);
    println!("=======================================================");
    if report.is_clear() {
        println!("   (競合なし)");
    }
    for conflict in &report.conflicts {
        println!(
            "   ┣ {} : {} ({}) が休暇中です",
            conflict.date, conflict.member_name, conflict.member_id
        );
    }
    println!("=======================================================");
}

fn run_demo(out: Option<PathBuf>) {
    let members = sample_members();
    let team = sample_team();
    let mut services = RosterServices::new();

    // 1. ガードが先に休暇を入れる
    println!("Mike Johnson の休暇を登録します (2024-06-11, AnnualLeave)");
    if let Err(e) = add_individual_leave(&mut services, "3", "2024-06-11", LeaveType::AnnualLeave) {
        eprintln!("休暇の登録に失敗しました: {}", e);
        return;
    }

    // 2. 同じ期間にチームシフトを一括割当する
    println!("Team Alpha に Normal シフトを割当します (2024-06-10 〜 2024-06-12)");
    let (start, end) = match (parse_iso_date("2024-06-10"), parse_iso_date("2024-06-12")) {
        (Ok(start), Ok(end)) => (start, end),
        _ => {
            eprintln!("デモ用の日付の組み立てに失敗しました");
            return;
        }
    };
    let dates: Vec<String> = dates_in_range(start, end)
        .into_iter()
        .map(format_iso_date)
        .collect();
    match assign_team_shift(&mut services, &team, &dates, ShiftType::Normal) {
        Ok(result) => {
            println!("  適用: {} 日 / スキップ: {} 日", result.applied.len(), result.skipped());
        }
        Err(e) => {
            eprintln!("割当に失敗しました: {}", e);
            return;
        }
    }

    // 3. 競合レポートを表示する
    match get_conflicts(&services, &team, &members, "2024-06-10", "2024-06-12") {
        Ok(report) => show_conflict_report(&report),
        Err(e) => {
            eprintln!("競合検出に失敗しました: {}", e);
            return;
        }
    }

    // 4. 指定があればスナップショットを書き出す
    if let Some(path) = out {
        let snapshot = RosterSnapshot {
            members,
            teams: vec![team],
            roster: services.roster,
            team_roster: services.team_roster,
        };
        match serde_json::to_string_pretty(&snapshot) {
            Ok(text) => {
                if let Err(_e) = fs::write(&path, text) {
                    eprintln!("ファイルの書き込みに失敗しました: {}", path.display());
                } else {
                    println!("スナップショットを書き出しました: {}", path.display());
                }
            }
            Err(e) => eprintln!("スナップショットの変換に失敗しました: {}", e),
        }
    }
}

fn run_conflicts(file: PathBuf, team_id: String, start: String, end: String) {
    match fs::read_to_string(&file) {
        Ok(text) => {
            if let Ok(snapshot) = serde_json::from_str::<RosterSnapshot>(&text) {
                let team = match snapshot.teams.iter().find(|t| t.id == team_id) {
                    Some(team) => team,
                    None => {
                        eprintln!("チーム '{}' がスナップショットに見つかりません", team_id);
                        return;
                    }
                };

                let services = RosterServices::from_stores(snapshot.roster, snapshot.team_roster);

                match get_conflicts(&services, team, &snapshot.members, &start, &end) {
                    Ok(report) => show_conflict_report(&report),
                    Err(e) => eprintln!("競合検出に失敗しました: {}", e),
                }
            } else {
                eprintln!("ファイルが形式に沿っていません");
            }
        }
        Err(e) => {
            eprintln!("エラー: ファイル '{}' を読めませんでした: {}", file.display(), e);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Cli::parse();

    match args.command {
        Commands::Demo { out } => {
            run_demo(out);
        }
        Commands::Conflicts { file, team, start, end } => {
            run_conflicts(file, team, start, end);
        }
    }
}
