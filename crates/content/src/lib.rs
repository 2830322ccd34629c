//! Season content for the King of the Pundits site.
//!
//! Standings and the pundit roster ship embedded in the binary; there is no
//! backing service. Loading validates the data against the league rules so a
//! bad content edit fails at startup rather than rendering a wrong table.

pub mod error;
pub mod models;

pub use error::ContentError;
pub use models::{CLOSE_POINTS, EXACT_POINTS, Pundit, SiteContent, Standing};

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use kotp_types::Division;

    use super::*;

    #[test]
    fn embedded_content_loads_and_validates() {
        let content = SiteContent::from_embedded().expect("load embedded season content");
        assert!(!content.standings.is_empty(), "standings should not be empty");
        assert!(!content.pundits.is_empty(), "roster should not be empty");
        let names: HashSet<&str> = content.pundits.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), content.pundits.len(), "roster names must be unique");
    }

    #[test]
    fn every_division_has_a_table() {
        let content = SiteContent::from_embedded().expect("load embedded season content");
        for division in Division::ALL {
            let rows = content.standings_for(division);
            assert!(!rows.is_empty(), "{} table is empty", division.id());
            let positions: Vec<u8> = rows.iter().map(|r| r.position).collect();
            let expected: Vec<u8> = (1..=rows.len() as u8).collect();
            assert_eq!(positions, expected, "{} positions not contiguous", division.id());
        }
    }

    #[test]
    fn leader_is_position_one() {
        let content = SiteContent::from_embedded().expect("load embedded season content");
        let leader = content.leader(Division::Premier).expect("premier leader");
        assert_eq!(leader.position, 1);
    }

    #[test]
    fn division_filter_narrows_roster() {
        let content = SiteContent::from_embedded().expect("load embedded season content");
        let all = content.pundits_for(None).len();
        let sunday = content.pundits_for(Some(Division::Sunday));
        assert!(sunday.len() < all);
        assert!(sunday.iter().all(|p| p.division == Division::Sunday));
    }

    #[test]
    fn accuracy_is_computed_from_scoring_rounds() {
        let row = Standing {
            position: 1,
            pundit: "Test".into(),
            division: Division::Premier,
            played: 40,
            exact: 10,
            close: 10,
            points: 40,
            form: "EC-EC".into(),
            best_round: 1,
            streak: 2,
        };
        assert_eq!(row.accuracy_pct(), 50);
    }

}
