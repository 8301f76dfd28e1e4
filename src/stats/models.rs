use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::taxonomy::{Outcome, ShotType};

/// Number of outcomes listed in a player's "top results".
pub const PLAYER_TOP_RESULTS: usize = 8;
/// Number of outcomes listed in a team's "top results".
pub const TEAM_TOP_RESULTS: usize = 10;

/// Percentage of `successes` in `total`, rounded half up. Zero when empty.
pub fn success_rate(successes: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (successes, total) = (u64::from(successes), u64::from(total));
    ((200 * successes + total) / (2 * total)) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u32,
    pub kills: u32,
    pub errors: u32,
    pub successes: u32,
    pub success_rate: u32,
}

impl Summary {
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        if outcome.is_kill() {
            self.kills += 1;
        }
        if outcome.is_error() {
            self.errors += 1;
        }
        if outcome.is_success() {
            self.successes += 1;
        }
        self.success_rate = success_rate(self.successes, self.total);
    }

    pub fn merge(&mut self, other: &Summary) {
        self.total += other.total;
        self.kills += other.kills;
        self.errors += other.errors;
        self.successes += other.successes;
        self.success_rate = success_rate(self.successes, self.total);
    }
}

/// A summary plus per-set, per-shot-type and per-outcome breakdowns.
///
/// Breakdown maps only contain keys that occurred in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedSummary {
    #[serde(flatten)]
    pub summary: Summary,
    pub by_set: BTreeMap<u32, Summary>,
    pub by_shot_type: BTreeMap<ShotType, Summary>,
    pub by_result: BTreeMap<Outcome, u32>,
}

impl DetailedSummary {
    pub fn merge(&mut self, other: &DetailedSummary) {
        self.summary.merge(&other.summary);
        for (set, summary) in &other.by_set {
            self.by_set.entry(*set).or_default().merge(summary);
        }
        for (shot_type, summary) in &other.by_shot_type {
            self.by_shot_type.entry(*shot_type).or_default().merge(summary);
        }
        for (outcome, count) in &other.by_result {
            *self.by_result.entry(outcome.clone()).or_default() += count;
        }
    }

    /// Most frequent outcomes first; equal counts keep taxonomy order.
    pub fn top_results(&self, limit: usize) -> Vec<(Outcome, u32)> {
        let mut results: Vec<(Outcome, u32)> = self
            .by_result
            .iter()
            .map(|(outcome, count)| (outcome.clone(), *count))
            .collect();
        results.sort_by(|a, b| b.1.cmp(&a.1));
        results.truncate(limit);
        results
    }
}

/// One row of the team player table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub name: String,
    pub number: u8,
    pub total: u32,
    pub kills: u32,
    pub errors: u32,
    pub success_rate: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub detail: DetailedSummary,
    /// Keyed by player id; players without shots are absent.
    pub by_player: BTreeMap<String, PlayerLine>,
}

impl TeamSummary {
    pub fn players_by_number(&self) -> Vec<(&str, &PlayerLine)> {
        let mut lines: Vec<(&str, &PlayerLine)> = self
            .by_player
            .iter()
            .map(|(id, line)| (id.as_str(), line))
            .collect();
        lines.sort_by_key(|(_, line)| line.number);
        lines
    }

    pub fn top_results(&self) -> Vec<(Outcome, u32)> {
        self.detail.top_results(TEAM_TOP_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(0, 0, 0)]
    #[case(1, 2, 50)]
    #[case(1, 8, 13)] // 12.5 rounds up
    #[case(5, 5, 100)]
    #[case(0, 7, 0)]
    fn test_success_rate_rounding(
        #[case] successes: u32,
        #[case] total: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(success_rate(successes, total), expected);
    }

    #[test]
    fn test_summary_record_classifies_outcomes() {
        let mut summary = Summary::default();
        for outcome in [Outcome::Kill, Outcome::SpikeError, Outcome::ServicePoint] {
            summary.record(&outcome);
        }

        assert_eq!(
            summary,
            Summary {
                total: 3,
                kills: 1,
                errors: 1,
                successes: 2,
                success_rate: 67,
            }
        );
    }

    #[test]
    fn test_top_results_orders_by_count() {
        let mut detail = DetailedSummary::default();
        detail.by_result.insert(Outcome::Ace, 1);
        detail.by_result.insert(Outcome::Kill, 3);
        detail.by_result.insert(Outcome::DigOut, 1);
        detail.by_result.insert(Outcome::SetAssist, 2);

        let top = detail.top_results(3);
        assert_eq!(
            top,
            vec![
                (Outcome::Kill, 3),
                (Outcome::SetAssist, 2),
                (Outcome::Ace, 1)
            ]
        );
    }

    #[test]
    fn test_team_players_by_number() {
        let mut team = TeamSummary::default();
        for (id, number) in [("b", 9), ("a", 2), ("c", 5)] {
            team.by_player.insert(
                id.to_string(),
                PlayerLine {
                    name: id.to_uppercase(),
                    number,
                    total: 1,
                    kills: 0,
                    errors: 0,
                    success_rate: 0,
                },
            );
        }

        let numbers: Vec<u8> = team
            .players_by_number()
            .iter()
            .map(|(_, line)| line.number)
            .collect();
        assert_eq!(numbers, vec![2, 5, 9]);
    }

    #[test]
    fn test_team_summary_json_round_trip() {
        let mut team = TeamSummary::default();
        for (set, outcome) in [(1, Outcome::Kill), (3, Outcome::SpikeError)] {
            team.detail.summary.record(&outcome);
            team.detail.by_set.entry(set).or_default().record(&outcome);
            team.detail
                .by_shot_type
                .entry(ShotType::Spike)
                .or_default()
                .record(&outcome);
            *team.detail.by_result.entry(outcome).or_default() += 1;
        }
        team.by_player.insert(
            "p1".to_string(),
            PlayerLine {
                name: "Ana".to_string(),
                number: 4,
                total: 2,
                kills: 1,
                errors: 1,
                success_rate: 50,
            },
        );

        let raw = serde_json::to_string(&team).unwrap();
        let parsed: TeamSummary = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed, team);
        assert_eq!(parsed.detail.by_set[&3].errors, 1);
    }
}
