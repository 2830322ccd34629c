use chrono::NaiveDate;
use kotp_types::Division;
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Points awarded for an exact scoreline prediction.
pub const EXACT_POINTS: u16 = 3;
/// Points awarded for the right result with the wrong scoreline.
pub const CLOSE_POINTS: u16 = 1;

const SITE_JSON: &str = include_str!("../data/site.json");

/// One row of a division table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub position: u8,
    pub pundit: String,
    pub division: Division,
    /// Rounds the pundit submitted predictions for.
    pub played: u8,
    /// Exact scoreline hits.
    pub exact: u16,
    /// Correct result, wrong scoreline.
    pub close: u16,
    pub points: u16,
    /// Last five rounds, most recent first: E exact, C close, `-` miss.
    pub form: String,
    pub best_round: u8,
    /// Longest run of consecutive scoring rounds.
    pub streak: u8,
}

impl Standing {
    /// Percentage of played rounds that scored at all.
    pub fn accuracy_pct(&self) -> u16 {
        if self.played == 0 {
            return 0;
        }
        (self.exact + self.close) * 100 / u16::from(self.played)
    }
}

/// Roster entry for a registered pundit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pundit {
    pub name: String,
    pub division: Division,
    pub joined: NaiveDate,
    pub seasons: u8,
    pub catchphrase: String,
}

/// Everything the site knows about the current season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub season: String,
    /// Date the standings were last recalculated.
    pub updated: NaiveDate,
    pub standings: Vec<Standing>,
    pub pundits: Vec<Pundit>,
}

impl SiteContent {
    /// Load the content bundled into the binary at build time.
    pub fn from_embedded() -> Result<Self, ContentError> {
        let content: SiteContent = serde_json::from_str(SITE_JSON)?;
        content.validate()?;
        Ok(content)
    }

    /// Table rows for one division, ordered by position.
    pub fn standings_for(&self, division: Division) -> Vec<&Standing> {
        let mut rows: Vec<&Standing> = self
            .standings
            .iter()
            .filter(|s| s.division == division)
            .collect();
        rows.sort_by_key(|s| s.position);
        rows
    }

    /// Roster entries, optionally narrowed to one division.
    pub fn pundits_for(&self, division: Option<Division>) -> Vec<&Pundit> {
        self.pundits
            .iter()
            .filter(|p| division.is_none_or(|d| p.division == d))
            .collect()
    }

    /// The current king of a division, if the table has any rows.
    pub fn leader(&self, division: Division) -> Option<&Standing> {
        self.standings_for(division).first().copied()
    }

    /// League-rule checks on top of plain deserialization.
    ///
    /// Positions must run 1..=n inside each division, the points column must
    /// match the 3/1 scoring, and pundit names must be unique.
    fn validate(&self) -> Result<(), ContentError> {
        for division in Division::ALL {
            let rows = self.standings_for(division);
            for (idx, row) in rows.iter().enumerate() {
                let expected = idx as u8 + 1;
                if row.position != expected {
                    return Err(ContentError::Inconsistent(format!(
                        "{} table: expected position {expected}, found {} ({})",
                        division.id(),
                        row.position,
                        row.pundit
                    )));
                }
                let computed = row.exact * EXACT_POINTS + row.close * CLOSE_POINTS;
                if row.points != computed {
                    return Err(ContentError::Inconsistent(format!(
                        "{}: points {} do not match scoring ({computed})",
                        row.pundit, row.points
                    )));
                }
            }
        }

        let mut names: Vec<&str> = self.pundits.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        if let Some(pair) = names.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ContentError::Inconsistent(format!(
                "duplicate pundit `{}` in roster",
                pair[0]
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_rejects_points_that_break_scoring() {
        let mut content = SiteContent::from_embedded().expect("load embedded season content");
        content.standings[0].points += 1;
        let err = content.validate().expect_err("scoring mismatch must fail");
        assert!(matches!(err, ContentError::Inconsistent(_)));
    }

    #[test]
    fn validation_rejects_gapped_positions() {
        let mut content = SiteContent::from_embedded().expect("load embedded season content");
        let division = content.standings[0].division;
        content.standings.retain(|s| s.division != division || s.position != 1);
        let err = content.validate().expect_err("missing first place must fail");
        assert!(matches!(err, ContentError::Inconsistent(_)));
    }

    #[test]
    fn validation_rejects_duplicate_roster_names() {
        let mut content = SiteContent::from_embedded().expect("load embedded season content");
        let twin = content.pundits[0].clone();
        content.pundits.push(twin);
        let err = content.validate().expect_err("duplicate roster name must fail");
        assert!(matches!(err, ContentError::Inconsistent(_)));
    }

    #[test]
    fn accuracy_handles_unplayed_pundit() {
        let row = Standing {
            position: 1,
            pundit: "Bench".into(),
            division: Division::Sunday,
            played: 0,
            exact: 0,
            close: 0,
            points: 0,
            form: "-----".into(),
            best_round: 0,
            streak: 0,
        };
        assert_eq!(row.accuracy_pct(), 0);
    }
}
