use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::provider::ProviderError;

/// Event-type code the provider uses for a made basket.
pub const MADE_BASKET: i64 = 1;

pub const NO_SCORING_PLAYS_MESSAGE: &str = "No scoring plays found in the game.";

// ---------------------------------------------------------------------------
// Provider tabular schema
// ---------------------------------------------------------------------------

/// Envelope returned by every stats.nba.com endpoint.
///
/// Most endpoints send `resultSets` as a list; a few send a single `resultSet`
/// object instead. Both deserialize into the same shape.
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    #[serde(rename = "resultSets", alias = "resultSet")]
    result_sets: ResultSets,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultSets {
    Many(Vec<ResultSet>),
    One(ResultSet),
}

impl StatsResponse {
    /// Take the result set at a fixed position, checking it carries the expected name.
    pub fn into_result_set(self, index: usize, expected: &str) -> Result<ResultSet, ProviderError> {
        let set = match self.result_sets {
            ResultSets::Many(sets) => sets.into_iter().nth(index),
            ResultSets::One(set) if index == 0 => Some(set),
            ResultSets::One(_) => None,
        }
        .ok_or_else(|| ProviderError::MissingResultSet {
            index,
            name: expected.to_string(),
        })?;

        if set.name != expected {
            return Err(ProviderError::UnexpectedResultSet {
                index,
                expected: expected.to_string(),
                found: set.name,
            });
        }

        Ok(set)
    }
}

/// One table of a provider response: named, with ordered headers and positional rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    pub name: String,
    pub headers: Vec<String>,
    #[serde(rename = "rowSet")]
    pub row_set: Vec<Vec<Value>>,
}

impl ResultSet {
    fn column(&self, column: &str) -> Result<usize, ProviderError> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| ProviderError::MissingColumn {
                result_set: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.row_set.iter().map(move |values| Row { set: self, values })
    }

    pub fn first_row(&self) -> Result<Row<'_>, ProviderError> {
        self.rows().next().ok_or_else(|| ProviderError::EmptyResultSet {
            name: self.name.clone(),
        })
    }

    /// Every row as a header-keyed object, in provider order.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.row_set
            .iter()
            .map(|values| {
                self.headers
                    .iter()
                    .cloned()
                    .zip(values.iter().cloned().chain(std::iter::repeat(Value::Null)))
                    .collect()
            })
            .collect()
    }
}

/// A single row borrowed from a [`ResultSet`], addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    set: &'a ResultSet,
    values: &'a [Value],
}

impl<'a> Row<'a> {
    fn value(&self, column: &str) -> Result<&'a Value, ProviderError> {
        let idx = self.set.column(column)?;
        self.values.get(idx).ok_or_else(|| ProviderError::MissingColumn {
            result_set: self.set.name.clone(),
            column: column.to_string(),
        })
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, ProviderError> {
        let value = self.value(column)?;
        coerce_i64(value).ok_or_else(|| ProviderError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
    }

    pub fn get_str(&self, column: &str) -> Result<&'a str, ProviderError> {
        let value = self.value(column)?;
        value.as_str().ok_or_else(|| ProviderError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
    }
}

/// Coerce a provider cell to a plain integer.
///
/// Accepts integers, floats without a fractional part (pandas-style `1610612747.0`)
/// and decimal strings.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Home/visitor ids from the `GameSummary` table of boxscoresummaryv2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummaryRow {
    pub home_team_id: i64,
    pub visitor_team_id: i64,
}

impl GameSummaryRow {
    pub fn from_result_set(set: &ResultSet) -> Result<Self, ProviderError> {
        let row = set.first_row()?;
        Ok(Self {
            home_team_id: row.get_i64("HOME_TEAM_ID")?,
            visitor_team_id: row.get_i64("VISITOR_TEAM_ID")?,
        })
    }
}

/// Descriptive fields from the `TeamInfoCommon` table of teaminfocommon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInfoRow {
    pub team_city: String,
    pub team_name: String,
    pub team_abbreviation: String,
}

impl TeamInfoRow {
    pub fn from_result_set(set: &ResultSet) -> Result<Self, ProviderError> {
        let row = set.first_row()?;
        Ok(Self {
            team_city: row.get_str("TEAM_CITY")?.to_string(),
            team_name: row.get_str("TEAM_NAME")?.to_string(),
            team_abbreviation: row.get_str("TEAM_ABBREVIATION")?.to_string(),
        })
    }

    /// Convert provider row to API response format
    pub fn to_team_details(&self, team_id: i64) -> TeamDetails {
        TeamDetails {
            team_id,
            team_name: format!("{} {}", self.team_city, self.team_name),
            team_abbreviation: self.team_abbreviation.clone(),
        }
    }
}

/// One entry of the `PlayByPlay` table of playbyplayv2.
#[derive(Debug, Clone, Copy)]
pub struct PlayRow<'a> {
    /// Ordinal from the provider; informational only, order comes from the log itself.
    pub event_num: Option<i64>,
    pub event_msg_type: i64,
    row: Row<'a>,
}

impl<'a> PlayRow<'a> {
    pub fn from_result_set(set: &'a ResultSet) -> Result<Vec<Self>, ProviderError> {
        set.rows()
            .map(|row| -> Result<Self, ProviderError> {
                Ok(Self {
                    event_num: row.get_i64("EVENTNUM").ok(),
                    event_msg_type: row.get_i64("EVENTMSGTYPE")?,
                    row,
                })
            })
            .collect()
    }

    pub fn is_made_basket(&self) -> bool {
        self.event_msg_type == MADE_BASKET
    }

    /// Scoring player of this play. Only coerced on demand: non-scoring rows
    /// routinely carry nulls here.
    pub fn scorer_id(&self) -> Result<i64, ProviderError> {
        self.row.get_i64("PLAYER1_ID")
    }
}

/// The last made basket in the log's return order, which is chronological.
pub fn last_scoring_play<'a, 'b>(plays: &'b [PlayRow<'a>]) -> Option<&'b PlayRow<'a>> {
    plays.iter().rev().find(|play| play.is_made_basket())
}

// ---------------------------------------------------------------------------
// API responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamDetails {
    pub team_id: i64,
    pub team_name: String,
    pub team_abbreviation: String,
}

/// Response for `/getgameteams`
#[derive(Debug, Serialize, Deserialize)]
pub struct GameTeamsResponse {
    pub home_team: TeamDetails,
    pub visitor_team: TeamDetails,
}

/// Coaching-staff record, passed through with whatever columns the provider sends.
pub type CoachRecord = Map<String, Value>;

/// Response for `/getgamecoaches`
#[derive(Debug, Serialize, Deserialize)]
pub struct GameCoachesResponse {
    pub home_coaches: Vec<CoachRecord>,
    pub visitor_coaches: Vec<CoachRecord>,
}

/// Response for `/findlastscorer`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LastScorerResponse {
    Found { last_scorer_id: i64 },
    NoScoringPlays { message: String },
}

impl LastScorerResponse {
    pub fn no_scoring_plays() -> Self {
        LastScorerResponse::NoScoringPlays {
            message: NO_SCORING_PLAYS_MESSAGE.to_string(),
        }
    }
}
