#![allow(dead_code)] // Test utilities may not all be used in every test

use volleytrack::{CommandOutcome, Shot, TrackerCommand, TrackerService};

// ============================================================================
// Recording Helpers
// ============================================================================

/// Records a sequence of shots for one player, mid-court
pub struct ShotScript {
    player_id: String,
    shots: Vec<(String, String, Option<u32>)>,
}

impl ShotScript {
    pub fn for_player(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            shots: vec![],
        }
    }

    pub fn shot(mut self, shot_type: &str, outcome: &str) -> Self {
        self.shots
            .push((shot_type.to_string(), outcome.to_string(), None));
        self
    }

    pub fn shot_in_set(mut self, shot_type: &str, outcome: &str, set_number: u32) -> Self {
        self.shots
            .push((shot_type.to_string(), outcome.to_string(), Some(set_number)));
        self
    }

    pub async fn run(self, tracker: &TrackerService) -> Vec<Shot> {
        let mut recorded = Vec::new();
        for (shot_type, outcome, set_number) in self.shots {
            let result = tracker
                .execute(TrackerCommand::RecordShot {
                    player_id: self.player_id.clone(),
                    shot_type,
                    outcome,
                    x: 100.0,
                    y: 150.0,
                    set_number,
                })
                .await
                .expect("recording a scripted shot should succeed");
            match result {
                CommandOutcome::ShotRecorded(shot) => recorded.push(shot),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        recorded
    }
}
