mod tools;

#[cfg(test)]
mod roster_flow_tests {
    use crew_roster_lib::{
        application::commands::*,
        domain::models::{
            CrewMember,
            CrewRole,
            LeaveType,
            MemberStatus,
            ShiftType,
            Team,
        },
        domain::reconcile::TeamDayUpdates,
        RosterServices,
    };

    use crate::tools;

    // 画面側のサンプルカタログに相当するデータ
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

    #[test]
    fn test_full_scenario_from_ui() {
        // 1. サービスとカタログの準備
        let mut services = RosterServices::new();
        let members = sample_members();
        let team = sample_team();

        // 2. [コマンド実行] 6/10〜6/12 にNormalシフトを一括割当
        let result = assign_team_shift(
            &mut services,
            &team,
            &[
                "2024-06-10".to_string(),
                "2024-06-11".to_string(),
                "2024-06-12".to_string(),
            ],
            ShiftType::Normal,
        ).unwrap();

        assert_eq!(result.requested, 3);
        assert_eq!(result.applied.len(), 3);
        assert_eq!(result.skipped(), 0);

        // 3. 展開結果の確認: 3人 x 3日
        let roster = get_member_roster(&services, "3", "2024-06-10", "2024-06-12").unwrap();
        assert_eq!(roster.len(), 3);
        tools::show_output::show_roster_entries_debug_data("Mike Johnson", &roster);

        // 4. [コマンド実行] 同じ期間への再割当はすべてスキップされる
        let again = assign_team_shift(
            &mut services,
            &team,
            &["2024-06-10".to_string(), "2024-06-11".to_string()],
            ShiftType::Early,
        ).unwrap();
        assert_eq!(again.applied.len(), 0);
        assert_eq!(again.skipped(), 2);

        // 5. [コマンド実行] シフトの入っている日への休暇は拒否される
        let rejected = add_individual_leave(&mut services, "3", "2024-06-10", LeaveType::AnnualLeave);
        assert!(rejected.is_err());
        assert!(rejected.unwrap_err().contains("2024-06-10"));

        // 6. [コマンド実行] 空いている日への休暇は通る
        let leave_id = add_individual_leave(&mut services, "3", "2024-06-13", LeaveType::AnnualLeave).unwrap();

        // 7. 6/13 にもチームシフトを広げると、ガードだけ展開されない
        let extended = assign_team_shift(
            &mut services,
            &team,
            &["2024-06-13".to_string()],
            ShiftType::Normal,
        ).unwrap();
        assert_eq!(extended.applied, vec!["2024-06-13".to_string()]);

        // 8. [クエリ実行] 競合レポート: 6/13 のガードが報告される
        let report = get_conflicts(&services, &team, &members, "2024-06-10", "2024-06-13").unwrap();
        tools::show_output::show_conflict_report_debug_data(&report);

        assert_eq!(report.conflicts.len(), 1);
        assert_eq!(report.conflicts[0].date, "2024-06-13");
        assert_eq!(report.conflicts[0].member_id, "3");
        assert_eq!(report.conflicts[0].member_name, "Mike Johnson");

        // 9. [コマンド実行] 休暇を取り下げると競合は消える
        remove_leave(&mut services, leave_id).unwrap();
        // 2回呼んでも何も起こらない（冪等）
        remove_leave(&mut services, leave_id).unwrap();

        let report = get_conflicts(&services, &team, &members, "2024-06-10", "2024-06-13").unwrap();
        assert!(report.is_clear());
    }

    #[test]
    fn test_cascade_remove_and_requery() {
        let mut services = RosterServices::new();
        let team = sample_team();

        assign_team_shift(
            &mut services,
            &team,
            &["2024-06-10".to_string(), "2024-06-11".to_string()],
            ShiftType::Early,
        ).unwrap();

        // 6/10 のチーム行を削除すると、その日の展開エントリも消える
        let rows = get_team_roster(&services, "team-alpha", "2024-06-10", "2024-06-10").unwrap();
        assert_eq!(rows.len(), 1);
        remove_team_shift(&mut services, rows[0].id).unwrap();

        let rows = get_team_roster(&services, "team-alpha", "2024-06-10", "2024-06-11").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.to_string(), "2024-06-11");

        for member_id in ["1", "2", "3"] {
            let entries = get_member_roster(&services, member_id, "2024-06-10", "2024-06-10").unwrap();
            assert!(entries.is_empty(), "member {} のエントリが残っています", member_id);
        }

        // 存在しないIDでもエラーにならない
        remove_team_shift(&mut services, 9999).unwrap();
    }

    #[test]
    fn test_reconcile_flow_from_ui() {
        let mut services = RosterServices::new();
        let members = sample_members();
        let mut team = sample_team();

        // ガードが6/11に休暇 → チームシフトで競合が発生する
        add_individual_leave(&mut services, "3", "2024-06-11", LeaveType::CompensationLeave).unwrap();
        assign_team_shift(&mut services, &team, &["2024-06-11".to_string()], ShiftType::Night).unwrap();

        let report = get_conflicts(&services, &team, &members, "2024-06-11", "2024-06-11").unwrap();
        assert_eq!(report.conflicts.len(), 1);

        // [コマンド実行] ガードを交代して競合を解消
        let updates = TeamDayUpdates {
            guard_ids: Some(vec!["4".to_string()]),
            ..TeamDayUpdates::default()
        };
        update_team_for_day(&mut services, &mut team, "2024-06-11", &updates).unwrap();

        // チーム定義が書き換わっている（参照実装と同じ恒久変更）
        assert_eq!(team.guards, vec!["4".to_string()]);

        // 競合は解消され、交代要員に6/11のシフトが張られている
        let report = get_conflicts(&services, &team, &members, "2024-06-11", "2024-06-11").unwrap();
        assert!(report.is_clear());

        let entries = get_member_roster(&services, "4", "2024-06-11", "2024-06-11").unwrap();
        assert_eq!(entries.len(), 1);

        // チーム行の無い日を指定するとエラーメッセージが返る
        let missing = update_team_for_day(&mut services, &mut team, "2024-06-20", &updates);
        assert!(missing.is_err());
    }

    /// 日付形式の検証が境界で効いているか？
    #[test]
    fn test_invalid_date_strings_are_rejected() {
        let mut services = RosterServices::new();
        let team = sample_team();

        let result = assign_team_shift(
            &mut services,
            &team,
            &["2024-06-10".to_string(), "06/11/2024".to_string()],
            ShiftType::Normal,
        );
        assert!(result.is_err());
        // 不正な日付が混ざっていた場合は何も適用されない
        assert!(get_team_roster(&services, "team-alpha", "2024-06-01", "2024-06-30").unwrap().is_empty());

        assert!(add_individual_leave(&mut services, "1", "someday", LeaveType::AnnualLeave).is_err());
        assert!(get_member_roster(&services, "1", "2024-06-01", "bad").is_err());
    }
}
