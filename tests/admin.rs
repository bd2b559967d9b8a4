//! Integration tests for league administration: teams, CSV import.

use chrono::{DateTime, TimeZone, Utc};
use liga_typerow::{add_team, import_teams_csv, League, LeagueError};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

#[test]
fn team_names_are_unique_case_insensitive() {
    let mut l = League::new();
    add_team(&mut l, "Polska", "POL", None, t0()).unwrap();
    assert_eq!(
        add_team(&mut l, "  polska ", "POL", None, t0()),
        Err(LeagueError::DuplicateTeamName)
    );
}

#[test]
fn csv_import_adds_all_rows() {
    let mut l = League::new();
    let data = "name,short_name,flag_url\n\
                Polska,POL,https://example.com/pl.png\n\
                Francja,FRA,\n\
                Dania,DEN,https://example.com/dk.png\n";
    let added = import_teams_csv(&mut l, data, t0()).unwrap();
    assert_eq!(added, 3);
    assert_eq!(l.teams.len(), 3);

    let fra = l.teams.iter().find(|t| t.short_name == "FRA").unwrap();
    assert_eq!(fra.name, "Francja");
    assert_eq!(fra.flag_url, None); // empty cell, not Some("")
}

#[test]
fn csv_import_rejects_duplicates_against_existing_teams() {
    let mut l = League::new();
    add_team(&mut l, "Polska", "POL", None, t0()).unwrap();
    let data = "name,short_name,flag_url\nPolska,POL,\n";
    assert_eq!(
        import_teams_csv(&mut l, data, t0()),
        Err(LeagueError::DuplicateTeamName)
    );
}

#[test]
fn csv_import_surfaces_malformed_rows() {
    let mut l = League::new();
    let data = "name,short_name,flag_url\nonly-one-field\n";
    assert!(matches!(
        import_teams_csv(&mut l, data, t0()),
        Err(LeagueError::InvalidCsv(_))
    ));
}
