//! Obstacle lifecycle: spawn timer, scrolling, culling and the difficulty ramp

use rand::Rng;

use super::events::GameEvent;
use super::state::{Obstacle, ObstacleKind, RunnerState};
use crate::config::Tuning;

/// Pick an obstacle shape uniformly at random
pub fn random_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

/// Advance the spawn timer and append a new obstacle once it runs past the interval
pub fn advance_spawn_timer<R: Rng>(
    state: &mut RunnerState,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    state.spawn_timer += 1;
    if state.spawn_timer <= state.spawn_interval {
        return;
    }

    state.spawn_timer = 0;
    let kind = random_kind(rng);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::spawn(id, kind, &state.field));
    events.push(GameEvent::ObstacleSpawned { id, kind });
}

/// Scroll every obstacle, cull the ones past the left edge and test for impact.
///
/// Obstacles are visited in spawn order. Each cull pays out immediately and
/// the milestone check runs against the updated score, so two clears in one
/// tick that cross two milestones ramp twice. Returns true if any obstacle
/// overlaps the player after moving.
pub fn scroll_obstacles(
    state: &mut RunnerState,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> bool {
    let player_box = state.player.bounds();
    let speed = state.game_speed;
    let mut collided = false;

    let mut i = 0;
    while i < state.obstacles.len() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= speed;

        if obstacle.bounds().overlaps(&player_box) {
            collided = true;
        }

        if obstacle.is_off_screen() {
            let id = obstacle.id;
            state.obstacles.remove(i);
            award_clear(state, tuning, id, events);
            continue;
        }
        i += 1;
    }

    collided
}

/// Pay out a cleared obstacle and ramp difficulty on milestones
fn award_clear(state: &mut RunnerState, tuning: &Tuning, id: u32, events: &mut Vec<GameEvent>) {
    state.score += tuning.score_per_obstacle;
    events.push(GameEvent::ObstacleCleared {
        id,
        score: state.score,
    });

    if state.score % tuning.milestone == 0 {
        state.game_speed += tuning.speed_step;
        state.spawn_interval = state
            .spawn_interval
            .saturating_sub(tuning.spawn_interval_step)
            .max(tuning.min_spawn_interval);
        log::debug!(
            "Score {} reached: speed {:.1}, spawn interval {}",
            state.score,
            state.game_speed,
            state.spawn_interval
        );
        events.push(GameEvent::DifficultyIncreased {
            game_speed: state.game_speed,
            spawn_interval: state.spawn_interval,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Lifecycle, PlayField};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_state() -> RunnerState {
        let tuning = Tuning::default();
        let mut state = RunnerState::new(PlayField::default(), &tuning, 0);
        state.lifecycle = Lifecycle::Playing;
        state
    }

    fn obstacle_at(state: &mut RunnerState, x: f32) {
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::spawn(id, ObstacleKind::Box, &state.field);
        obstacle.pos.x = x;
        state.obstacles.push(obstacle);
    }

    #[test]
    fn test_spawn_after_interval_exceeded() {
        let mut state = playing_state();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut events = Vec::new();

        for _ in 0..state.spawn_interval {
            advance_spawn_timer(&mut state, &mut rng, &mut events);
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.spawn_timer, 100);

        advance_spawn_timer(&mut state, &mut rng, &mut events);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.spawn_timer, 0);
        assert_eq!(state.obstacles[0].pos.x, state.field.width);
        assert!(matches!(events[0], GameEvent::ObstacleSpawned { .. }));
    }

    #[test]
    fn test_random_kind_covers_all_shapes() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = [false; 3];
        for _ in 0..200 {
            match random_kind(&mut rng) {
                ObstacleKind::Box => seen[0] = true,
                ObstacleKind::Spike => seen[1] = true,
                ObstacleKind::Tall => seen[2] = true,
            }
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_cull_awards_score() {
        let mut state = playing_state();
        let tuning = Tuning::default();
        let mut events = Vec::new();
        obstacle_at(&mut state, -38.0);
        obstacle_at(&mut state, 500.0);

        let collided = scroll_obstacles(&mut state, &tuning, &mut events);
        assert!(!collided);
        assert_eq!(state.score, 10);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 495.0);
    }

    #[test]
    fn test_milestone_fires_once_per_crossing() {
        let mut state = playing_state();
        let tuning = Tuning::default();
        let mut events = Vec::new();
        state.score = 80;
        // Two clears in one tick: 90 then 100
        obstacle_at(&mut state, -40.0);
        obstacle_at(&mut state, -42.0);

        scroll_obstacles(&mut state, &tuning, &mut events);
        assert_eq!(state.score, 100);
        assert_eq!(state.game_speed, 5.5);
        assert_eq!(state.spawn_interval, 95);
        let ramps = events
            .iter()
            .filter(|e| matches!(e, GameEvent::DifficultyIncreased { .. }))
            .count();
        assert_eq!(ramps, 1);
    }

    #[test]
    fn test_two_milestones_in_one_tick() {
        let mut state = playing_state();
        let tuning = Tuning {
            score_per_obstacle: 100,
            ..Default::default()
        };
        let mut events = Vec::new();
        obstacle_at(&mut state, -40.0);
        obstacle_at(&mut state, -41.0);

        scroll_obstacles(&mut state, &tuning, &mut events);
        assert_eq!(state.score, 200);
        assert_eq!(state.game_speed, 6.0);
        assert_eq!(state.spawn_interval, 90);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut state = playing_state();
        let tuning = Tuning::default();
        let mut events = Vec::new();
        state.spawn_interval = 62;
        state.score = 90;
        obstacle_at(&mut state, -40.0);

        scroll_obstacles(&mut state, &tuning, &mut events);
        assert_eq!(state.spawn_interval, 60);

        state.score = 190;
        obstacle_at(&mut state, -40.0);
        scroll_obstacles(&mut state, &tuning, &mut events);
        assert_eq!(state.spawn_interval, 60);
        assert_eq!(state.game_speed, 6.0);
    }

    #[test]
    fn test_overlap_reports_collision() {
        let mut state = playing_state();
        let tuning = Tuning::default();
        let mut events = Vec::new();
        // Player spans x 100..140; box moves from 142 to 137
        obstacle_at(&mut state, 142.0);
        obstacle_at(&mut state, 139.0);

        assert!(scroll_obstacles(&mut state, &tuning, &mut events));
        assert_eq!(state.obstacles.len(), 2);
    }
}
