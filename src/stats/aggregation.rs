use crate::tracker::{Player, Shot};

use super::models::{DetailedSummary, PlayerLine, Summary, TeamSummary};

pub fn summarize<'a, I>(shots: I) -> Summary
where
    I: IntoIterator<Item = &'a Shot>,
{
    let mut summary = Summary::default();
    for shot in shots {
        summary.record(&shot.outcome);
    }
    summary
}

pub fn detailed_summarize<'a, I>(shots: I) -> DetailedSummary
where
    I: IntoIterator<Item = &'a Shot>,
{
    let mut detail = DetailedSummary::default();
    for shot in shots {
        detail.summary.record(&shot.outcome);
        detail
            .by_set
            .entry(shot.set_number)
            .or_default()
            .record(&shot.outcome);
        detail
            .by_shot_type
            .entry(shot.shot_type)
            .or_default()
            .record(&shot.outcome);
        *detail.by_result.entry(shot.outcome.clone()).or_default() += 1;
    }
    detail
}

/// The numbers shown on a roster card.
pub fn quick_summary(player: &Player) -> Summary {
    summarize(&player.shots)
}

/// Rolls every player's detailed summary into one team summary.
///
/// Built by merging per-player results, which gives the same numbers as
/// summarizing all of the roster's shots in one pass.
pub fn aggregate_team(roster: &[Player]) -> TeamSummary {
    let mut team = TeamSummary::default();

    for player in roster.iter().filter(|p| p.has_shots()) {
        let detail = detailed_summarize(&player.shots);
        team.by_player.insert(
            player.id.clone(),
            PlayerLine {
                name: player.name.clone(),
                number: player.number,
                total: detail.summary.total,
                kills: detail.summary.kills,
                errors: detail.summary.errors,
                success_rate: detail.summary.success_rate,
            },
        );
        team.detail.merge(&detail);
    }

    team
}
