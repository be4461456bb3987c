//! Scene translation: runner state -> draw list
//!
//! Painter's order: sky, stars, ground, player, obstacles, particles, score.

use glam::Vec2;

use super::{DrawCommand, Paint, Rgba, Stroke, colors, with_alpha};
use crate::config::VisualSettings;
use crate::sim::{Aabb, Obstacle, ObstacleKind, ParticleColor, Player, RunnerState};

const STAR_COUNT: u32 = 50;
const STAR_SCROLL: f32 = 0.5;
const GRID_SPACING: f32 = 40.0;
const PLAYER_CORNER_RADIUS: f32 = 8.0;
const PARTICLE_RADIUS: f32 = 4.0;
const SCORE_FONT_PX: f32 = 32.0;

/// Build the full draw list for the current state
pub fn build(state: &RunnerState, visuals: &VisualSettings) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(
        96 + state.obstacles.len() * 3 + state.particles.len(),
    );
    // Reduced motion pins every decorative animation to its first frame
    let frame = if visuals.reduced_motion { 0 } else { state.frame };

    sky(&mut out, state);
    if visuals.stars {
        stars(&mut out, state, frame);
    }
    ground(&mut out, state, frame);
    player(&mut out, &state.player, state.field.ground_y);
    for obstacle in &state.obstacles {
        self::obstacle(&mut out, obstacle, state.field.ground_y);
    }
    if visuals.particles {
        particles(&mut out, state);
    }
    score(&mut out, state.score);

    out
}

fn sky(out: &mut Vec<DrawCommand>, state: &RunnerState) {
    let field = &state.field;
    out.push(DrawCommand::FillRect {
        rect: Aabb::new(0.0, 0.0, field.width, field.height),
        paint: Paint::Linear(super::Gradient {
            from: Vec2::ZERO,
            to: Vec2::new(0.0, field.height),
            stops: vec![
                (0.0, colors::SKY_TOP),
                (0.5, colors::SKY_MID),
                (1.0, colors::SKY_BOTTOM),
            ],
        }),
    });
}

/// Twinkling starfield drifting right at half a pixel per frame
fn stars(out: &mut Vec<DrawCommand>, state: &RunnerState, frame: u64) {
    let field = &state.field;
    let band = (field.height - crate::consts::GROUND_DEPTH).max(1.0);
    // Keep the f32 math small: the pattern repeats every `width` pixels anyway
    let drift = ((frame as f64 * STAR_SCROLL as f64) % field.width as f64) as f32;
    let twinkle_t = frame as f64 * 0.05;

    for i in 0..STAR_COUNT {
        let x = (i as f32 * 157.0 + drift) % field.width;
        let y = (i as f32 * 73.0) % band;
        let size = (i % 3 + 1) as f32;
        let alpha = (0.3 + (twinkle_t + i as f64).sin() * 0.3) as f32;
        out.push(DrawCommand::FillRect {
            rect: Aabb::new(x, y, size, size),
            paint: Paint::Solid(with_alpha(colors::STAR, alpha)),
        });
    }
}

fn ground(out: &mut Vec<DrawCommand>, state: &RunnerState, frame: u64) {
    let field = &state.field;
    let ground_y = field.ground_y;

    out.push(DrawCommand::FillRect {
        rect: Aabb::new(0.0, ground_y, field.width, field.height - ground_y),
        paint: Paint::Solid(colors::GROUND),
    });
    out.push(DrawCommand::Line {
        from: Vec2::new(0.0, ground_y),
        to: Vec2::new(field.width, ground_y),
        stroke: Stroke::new(colors::GROUND_LINE, 3.0),
    });

    // Grid lines scroll with the obstacles
    let offset = ((frame as f64 * state.game_speed as f64) % GRID_SPACING as f64) as f32;
    let mut x = 0.0;
    while x < field.width {
        out.push(DrawCommand::Line {
            from: Vec2::new(x - offset, ground_y),
            to: Vec2::new(x - offset, field.height),
            stroke: Stroke::new(colors::GROUND_GRID, 1.0),
        });
        x += GRID_SPACING;
    }
}

fn player(out: &mut Vec<DrawCommand>, player: &Player, ground_y: f32) {
    let w = player.size.x;
    let h = player.size.y;

    out.push(DrawCommand::Ellipse {
        center: Vec2::new(player.pos.x + w / 2.0, ground_y + 5.0),
        radii: Vec2::new(w / 2.0, 5.0),
        color: with_alpha(colors::SHADOW, 0.3),
    });

    // Body is drawn around its own center so it can spin
    out.push(DrawCommand::PushTransform {
        translate: player.center(),
        rotate: if player.is_jumping { player.rotation } else { 0.0 },
    });
    let body = Aabb::new(-w / 2.0, -h / 2.0, w, h);
    out.push(DrawCommand::FillRoundedRect {
        rect: body,
        radius: PLAYER_CORNER_RADIUS,
        paint: Paint::Linear(super::Gradient {
            from: body.min,
            to: body.max(),
            stops: vec![(0.0, colors::PLAYER_TOP), (1.0, colors::PLAYER_BOTTOM)],
        }),
    });
    out.push(DrawCommand::Circle {
        center: Vec2::new(w / 4.0 - 5.0, -5.0),
        radius: 6.0,
        color: colors::EYE,
    });
    out.push(DrawCommand::Circle {
        center: Vec2::new(w / 4.0 - 3.0, -5.0),
        radius: 3.0,
        color: colors::PUPIL,
    });
    out.push(DrawCommand::PopTransform);
}

fn obstacle(out: &mut Vec<DrawCommand>, obstacle: &Obstacle, ground_y: f32) {
    let rect = obstacle.bounds();
    out.push(DrawCommand::FillRect {
        rect: Aabb::new(rect.min.x + 5.0, ground_y + 5.0, rect.size.x, 10.0),
        paint: Paint::Solid(with_alpha(colors::SHADOW, 0.2)),
    });

    match obstacle.kind {
        ObstacleKind::Box => {
            out.push(DrawCommand::FillRect {
                rect,
                paint: Paint::vertical(&rect, colors::BOX_TOP, colors::BOX_BOTTOM),
            });
            out.push(DrawCommand::StrokeRect {
                rect,
                stroke: Stroke::new(colors::BOX_OUTLINE, 2.0),
            });
        }
        ObstacleKind::Spike => {
            let max = rect.max();
            out.push(DrawCommand::Polygon {
                points: vec![
                    Vec2::new(rect.min.x + rect.size.x / 2.0, rect.min.y),
                    Vec2::new(rect.min.x, max.y),
                    Vec2::new(max.x, max.y),
                ],
                fill: colors::SPIKE,
                outline: Some(Stroke::new(colors::SPIKE_OUTLINE, 2.0)),
            });
        }
        ObstacleKind::Tall => {
            out.push(DrawCommand::FillRect {
                rect,
                paint: Paint::vertical(&rect, colors::TALL_TOP, colors::TALL_BOTTOM),
            });
            out.push(DrawCommand::StrokeRect {
                rect,
                stroke: Stroke::new(colors::TALL_OUTLINE, 2.0),
            });
        }
    }
}

fn particle_color(color: ParticleColor) -> Rgba {
    match color {
        ParticleColor::Emerald => colors::EMERALD,
        ParticleColor::Amber => colors::AMBER,
        ParticleColor::Red => colors::RED,
        ParticleColor::Pink => colors::PINK,
        ParticleColor::Violet => colors::VIOLET,
    }
}

fn particles(out: &mut Vec<DrawCommand>, state: &RunnerState) {
    for particle in &state.particles {
        out.push(DrawCommand::Circle {
            center: particle.pos,
            radius: PARTICLE_RADIUS,
            color: with_alpha(particle_color(particle.color), particle.alpha()),
        });
    }
}

fn score(out: &mut Vec<DrawCommand>, score: u64) {
    out.push(DrawCommand::Text {
        text: score.to_string(),
        pos: Vec2::new(20.0, 50.0),
        font_px: SCORE_FONT_PX,
        fill: colors::SCORE_TEXT,
        outline: Some(Stroke::new(colors::SCORE_OUTLINE, 4.0)),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::sim::{Lifecycle, Particle, PlayField};

    fn state() -> RunnerState {
        RunnerState::new(PlayField::default(), &Tuning::default(), 0)
    }

    fn count(cmds: &[DrawCommand], pred: impl Fn(&DrawCommand) -> bool) -> usize {
        cmds.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_background_first_score_last() {
        let cmds = build(&state(), &VisualSettings::default());
        match &cmds[0] {
            DrawCommand::FillRect { rect, paint: Paint::Linear(g) } => {
                assert_eq!(rect.size, Vec2::new(800.0, 500.0));
                assert_eq!(g.stops.len(), 3);
            }
            other => panic!("unexpected first command {:?}", other),
        }
        match cmds.last() {
            Some(DrawCommand::Text { text, pos, .. }) => {
                assert_eq!(text, "0");
                assert_eq!(*pos, Vec2::new(20.0, 50.0));
            }
            other => panic!("unexpected last command {:?}", other),
        }
    }

    #[test]
    fn test_star_toggle() {
        let s = state();
        let with = build(&s, &VisualSettings::default());
        let without = build(
            &s,
            &VisualSettings {
                stars: false,
                ..Default::default()
            },
        );
        assert_eq!(with.len() - without.len(), STAR_COUNT as usize);
    }

    #[test]
    fn test_transforms_balanced() {
        let mut s = state();
        s.player.is_jumping = true;
        s.player.rotation = 1.2;
        let cmds = build(&s, &VisualSettings::default());
        let pushes = count(&cmds, |c| matches!(c, DrawCommand::PushTransform { .. }));
        let pops = count(&cmds, |c| matches!(c, DrawCommand::PopTransform));
        assert_eq!(pushes, 1);
        assert_eq!(pops, 1);
        assert!(cmds.iter().any(|c| matches!(
            c,
            DrawCommand::PushTransform { rotate, .. } if (*rotate - 1.2).abs() < 1e-6
        )));
    }

    #[test]
    fn test_obstacle_shapes() {
        let mut s = state();
        s.lifecycle = Lifecycle::Playing;
        for kind in ObstacleKind::ALL {
            let id = s.next_entity_id();
            s.obstacles.push(Obstacle::spawn(id, kind, &s.field));
        }
        let cmds = build(&s, &VisualSettings::default());
        assert_eq!(count(&cmds, |c| matches!(c, DrawCommand::Polygon { .. })), 1);
        assert_eq!(count(&cmds, |c| matches!(c, DrawCommand::StrokeRect { .. })), 2);
    }

    #[test]
    fn test_particles_fade() {
        let mut s = state();
        s.particles.push(Particle {
            pos: Vec2::new(50.0, 50.0),
            vel: Vec2::ZERO,
            life: 30,
            max_life: 60,
            color: ParticleColor::Pink,
        });
        let cmds = build(&s, &VisualSettings::default());
        let circle = cmds.iter().find_map(|c| match c {
            DrawCommand::Circle { center, color, radius } if *center == Vec2::new(50.0, 50.0) => {
                Some((*radius, *color))
            }
            _ => None,
        });
        let (radius, color) = circle.expect("particle drawn");
        assert_eq!(radius, PARTICLE_RADIUS);
        assert!((color[3] - 0.5).abs() < 1e-6);

        let hidden = build(
            &s,
            &VisualSettings {
                particles: false,
                ..Default::default()
            },
        );
        assert!(!hidden.iter().any(|c| matches!(
            c,
            DrawCommand::Circle { center, .. } if *center == Vec2::new(50.0, 50.0)
        )));
    }

    #[test]
    fn test_reduced_motion_freezes_background() {
        let mut a = state();
        let mut b = state();
        a.frame = 10;
        b.frame = 500;
        let visuals = VisualSettings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(build(&a, &visuals), build(&b, &visuals));
    }

    #[test]
    fn test_star_alpha_never_negative() {
        let mut s = state();
        for frame in 0..200 {
            s.frame = frame;
            for cmd in build(&s, &VisualSettings::default()) {
                if let DrawCommand::FillRect { paint: Paint::Solid(c), .. } = cmd {
                    assert!(c[3] >= 0.0);
                }
            }
        }
    }
}
