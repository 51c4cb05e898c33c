mod helpers;

use helpers::{ANA, CARLA, ELENA, fixture_rollcall};
use rollcall::{
    AttendanceTier, Rollcall, RollcallError, Selection, StudentFilter, StudentId, TimeRange,
};
use rollcall_mock::Fixture;

async fn loaded() -> Rollcall {
    let rollcall = fixture_rollcall(Fixture::Roster);
    rollcall.refresh().await.unwrap();
    rollcall
}

#[tokio::test]
async fn team_stats_cover_every_canonical_team() {
    let rollcall = loaded().await;
    let rows = rollcall.team_stats(&Selection::new(TimeRange::Monthly));
    let summary: Vec<(&str, usize, u32, f64)> = rows
        .iter()
        .map(|r| (r.team.as_str(), r.headcount, r.avg_attendance_pct, r.hours))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("FRC", 2, 87, 15.0),
            ("Aztech 1", 2, 87, 32.0),
            ("Aztech 2", 1, 68, 10.0),
            ("Aztech 3", 0, 0, 0.0),
        ]
    );
    assert_eq!(rows[0].tier(), AttendanceTier::Medium);
}

#[tokio::test]
async fn team_hours_follow_the_range_multiplier() {
    let rollcall = loaded().await;
    let quarterly = rollcall.team_stats(&Selection::new(TimeRange::Quarterly));
    let annual = rollcall.team_stats(&Selection::new(TimeRange::Annual));
    let q: Vec<f64> = quarterly.iter().map(|r| r.hours).collect();
    let y: Vec<f64> = annual.iter().map(|r| r.hours).collect();
    assert_eq!(q, vec![45.0, 96.0, 30.0, 0.0]);
    assert_eq!(y, vec![150.0, 320.0, 100.0, 0.0]);
}

#[tokio::test]
async fn area_stats_are_sorted_by_total_hours() {
    let rollcall = loaded().await;
    let rows = rollcall.area_stats(&Selection::new(TimeRange::Monthly));
    let summary: Vec<(&str, usize, f64, u32)> = rows
        .iter()
        .map(|r| (r.area.as_str(), r.headcount, r.total_hours, r.avg_attendance_pct))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Programación", 2, 70.75, 94),
            ("Mecánica", 1, 24.5, 82),
            ("Diseño", 1, 10.0, 68),
            ("Electrónica", 1, 0.0, 77),
        ]
    );
}

#[tokio::test]
async fn monthly_series_defaults_to_the_last_stored_month() {
    let rollcall = loaded().await;
    let series = rollcall.series(ANA, &Selection::new(TimeRange::Monthly)).unwrap();
    assert_eq!(series.title, "Horas diarias (2024-01)");
    assert_eq!(series.values().collect::<Vec<_>>(), vec![2.0, 3.0, 4.5]);
    assert_eq!(series.reference_value, Some(8.0));

    let december = rollcall.series(ANA, &Selection::monthly("2024-12")).unwrap();
    let labels: Vec<&str> = december.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["2", "3", "5"]);
}

#[tokio::test]
async fn quarterly_and_annual_series() {
    let rollcall = loaded().await;
    let quarterly = rollcall.series(ANA, &Selection::new(TimeRange::Quarterly)).unwrap();
    assert_eq!(quarterly.values().collect::<Vec<_>>(), vec![16.0, 14.5, 12.0]);
    assert_eq!(quarterly.y_domain, (0.0, 18.0));

    let annual = rollcall.series(ANA, &Selection::new(TimeRange::Annual)).unwrap();
    assert_eq!(annual.points.len(), 12);
    assert_eq!(annual.points[0].raw_label.as_deref(), Some("30:30"));

    let carla = rollcall.series(CARLA, &Selection::new(TimeRange::Quarterly)).unwrap();
    assert_eq!(carla.points.len(), 1);
}

#[tokio::test]
async fn custom_daily_target_moves_the_reference_line() {
    let rollcall = Rollcall::builder()
        .with_source(std::sync::Arc::new(rollcall_mock::MockSource::new()))
        .daily_target_hours(6.0)
        .build()
        .unwrap();
    rollcall.refresh().await.unwrap();
    let series = rollcall.series(ANA, &Selection::new(TimeRange::Monthly)).unwrap();
    assert_eq!(series.reference_value, Some(6.0));
}

#[tokio::test]
async fn series_errors() {
    let rollcall = loaded().await;
    let err = rollcall
        .series(StudentId(42), &Selection::new(TimeRange::Annual))
        .unwrap_err();
    assert_eq!(err, RollcallError::not_found("student 42"));

    let err = rollcall
        .series(ELENA, &Selection::new(TimeRange::Monthly))
        .unwrap_err();
    assert_eq!(err, RollcallError::missing_month("Elena Ruiz"));

    // Non-monthly ranges on a student without months are empty, not errors.
    let annual = rollcall.series(ELENA, &Selection::new(TimeRange::Annual)).unwrap();
    assert!(annual.points.is_empty());
}

#[tokio::test]
async fn student_lookup_and_filtering() {
    let rollcall = loaded().await;
    let ana = rollcall.student(ANA).unwrap();
    assert_eq!(ana.team, "FRC");
    assert_eq!(ana.group, "5A");
    assert_eq!(ana.total_hours_month().as_str(), "30:30");
    assert_eq!(ana.tier(), AttendanceTier::High);
    assert!(matches!(
        rollcall.student(StudentId(99)),
        Err(RollcallError::NotFound { .. })
    ));

    let names = |f: &StudentFilter| -> Vec<String> {
        rollcall.students(f).into_iter().map(|s| s.name).collect()
    };
    assert_eq!(names(&StudentFilter::new()).len(), 5);
    assert_eq!(names(&StudentFilter::new().team("Aztech 1")), ["Bruno Díaz", "Carla Méndez"]);
    assert_eq!(names(&StudentFilter::new().search("RUIZ")), ["Elena Ruiz"]);
    assert_eq!(
        names(&StudentFilter::new().area("Programación").team("FRC")),
        ["Ana López"]
    );
}

#[tokio::test]
async fn queries_on_an_empty_roster_are_total() {
    let rollcall = fixture_rollcall(Fixture::Empty);
    rollcall.refresh().await.unwrap();
    for range in TimeRange::ALL {
        let selection = Selection::new(range);
        assert_eq!(rollcall.team_stats(&selection).len(), 4);
        assert_eq!(rollcall.area_stats(&selection).len(), 4);
    }
    assert!(rollcall.students(&StudentFilter::new()).is_empty());
}
