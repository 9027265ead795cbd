use std::ops::RangeInclusive;

use crate::data::model::RawInputRecord;

// ---------------------------------------------------------------------------
// Game input form
// ---------------------------------------------------------------------------

pub const DAYS_REST_RANGE: RangeInclusive<i64> = 0..=10;
pub const START_DEPTH_RANGE: RangeInclusive<f64> = 0.0..=10.0;
pub const TEAM_ID_RANGE: RangeInclusive<i64> = 0..=29;

/// Prefix of the one-hot column synthesized from the pitcher identifier.
pub const PITCHER_PREFIX: &str = "pitcher_id_";

/// Values entered on the form.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInputs {
    pub days_rest: i64,
    pub start_depth: f64,
    pub team_id: i64,
    pub opp_id: i64,
    pub rolling_so: f64,
    pub rolling_bb: f64,
    pub rolling_ip: f64,
    pub pitcher_id: String,
}

impl Default for GameInputs {
    fn default() -> Self {
        Self {
            days_rest: 4,
            start_depth: 1.0,
            team_id: 2,
            opp_id: 5,
            rolling_so: 7.0,
            rolling_bb: 1.5,
            rolling_ip: 5.8,
            pitcher_id: "snellbl01".to_string(),
        }
    }
}

impl GameInputs {
    /// Build the raw record for one prediction round.
    ///
    /// Bounded fields are clamped; a blank pitcher id adds no indicator column.
    pub fn to_raw_record(&self) -> RawInputRecord {
        let mut raw = RawInputRecord::new()
            .with("DR", clamp_i(self.days_rest, &DAYS_REST_RANGE))
            .with("Start_Depth", clamp_f(self.start_depth, &START_DEPTH_RANGE))
            .with("Team_ID", clamp_i(self.team_id, &TEAM_ID_RANGE))
            .with("Opp_ID", clamp_i(self.opp_id, &TEAM_ID_RANGE))
            .with("Rolling_SO_5", self.rolling_so)
            .with("Rolling_BB_5", self.rolling_bb)
            .with("Rolling_IP_5", self.rolling_ip);

        if let Some(column) = pitcher_column(&self.pitcher_id) {
            raw.insert(column, 1i64);
        }
        raw
    }
}

/// `pitcher_id_<id>` for a non-blank identifier.
pub fn pitcher_column(pitcher_id: &str) -> Option<String> {
    let id = pitcher_id.trim();
    (!id.is_empty()).then(|| format!("{PITCHER_PREFIX}{id}"))
}

fn clamp_i(v: i64, range: &RangeInclusive<i64>) -> i64 {
    v.clamp(*range.start(), *range.end())
}

fn clamp_f(v: f64, range: &RangeInclusive<f64>) -> f64 {
    v.clamp(*range.start(), *range.end())
}
