//! Ball dynamics: friction, gravity, bounces, goals, and player contact

use super::collision::{back_off_player, resolve_player_ball};
use super::config::PhysicsConfig;
use super::input::TickInput;
use super::state::{BallState, PlayerState, Team};

/// What happened to the ball during one step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallStep {
    /// Ball crossed an end line inside a goal mouth (ball already reset)
    pub goal: Option<Team>,
    /// Player touched the ball with this kick strength
    pub kick: Option<f32>,
}

/// Advance the ball by `dt` seconds
pub fn update_ball(
    ball: &mut BallState,
    player: &mut PlayerState,
    input: &TickInput,
    config: &PhysicsConfig,
    dt: f32,
) -> BallStep {
    let mut step = BallStep::default();
    let radius = config.ball_radius;

    if ball.position.y <= radius {
        // Rolling friction (per tick by default)
        ball.velocity *= config.friction_model.factor(config.friction, dt);
    } else {
        ball.velocity.y -= config.gravity * dt;
    }

    ball.position += ball.velocity * dt;

    // Ground contact
    if ball.position.y <= radius {
        ball.position.y = radius;
        if ball.velocity.y < 0.0 {
            ball.velocity.y = -ball.velocity.y * config.bounce;
            if ball.velocity.y < config.rest_speed {
                ball.velocity.y = 0.0;
            }
        }
    }

    // Side walls
    let max_x = config.ball_max_x();
    if ball.position.x.abs() > max_x {
        let side = ball.position.x.signum();
        ball.position.x = side * max_x;
        if ball.velocity.x * side > 0.0 {
            ball.velocity.x *= -config.bounce;
        }
    }

    // End lines: goal mouth or wall
    let max_z = config.ball_max_z();
    if ball.position.z.abs() > max_z {
        if in_goal_mouth(ball, config) {
            step.goal = Some(Team::scoring_at(ball.position.z));
            ball.reset(config.restart_point());
            return step;
        }

        let end = ball.position.z.signum();
        ball.position.z = end * max_z;
        if ball.velocity.z * end > 0.0 {
            ball.velocity.z *= -config.bounce;
        }
    }

    // Rolling rotation, about the horizontal axis perpendicular to travel
    ball.spin.x += ball.velocity.z / radius * dt;
    ball.spin.z -= ball.velocity.x / radius * dt;

    step.kick = resolve_player_ball(player, ball, input, config);
    if step.kick.is_some() && clamp_to_walls(ball, config) {
        // Ball is pinned; the player gives way instead
        back_off_player(player, ball.position, config);
    }
    step
}

/// Pull the ball back inside the walls without touching its velocity.
///
/// The goal mouth stays open. Returns true if the ball was moved.
fn clamp_to_walls(ball: &mut BallState, config: &PhysicsConfig) -> bool {
    let before = ball.position;
    let max_x = config.ball_max_x();
    ball.position.x = ball.position.x.clamp(-max_x, max_x);

    let max_z = config.ball_max_z();
    if !in_goal_mouth(ball, config) {
        ball.position.z = ball.position.z.clamp(-max_z, max_z);
    }
    ball.position != before
}

/// Ball is between the posts and under the crossbar
fn in_goal_mouth(ball: &BallState, config: &PhysicsConfig) -> bool {
    ball.position.x.abs() < config.goal_half_width() && ball.position.y < config.goal_height
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    /// Player parked well away from the action
    fn bystander(config: &PhysicsConfig) -> PlayerState {
        PlayerState::new(Vec3::new(-30.0, config.ground_level, -30.0))
    }

    /// Long pitch with a big lossy ball and no rolling friction
    fn scenario_config() -> PhysicsConfig {
        PhysicsConfig {
            field_length: 110.0,
            ball_radius: 1.0,
            bounce: 0.7,
            friction: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_friction_only_on_ground() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);

        let mut rolling = BallState::at(Vec3::new(0.0, config.ball_radius, 0.0));
        rolling.velocity = Vec3::new(10.0, 0.0, 0.0);
        update_ball(&mut rolling, &mut player, &TickInput::default(), &config, DT);
        assert!((rolling.velocity.x - 9.9).abs() < 1e-5);

        let mut flying = BallState::at(Vec3::new(0.0, 3.0, 0.0));
        flying.velocity = Vec3::new(10.0, 0.0, 0.0);
        update_ball(&mut flying, &mut player, &TickInput::default(), &config, DT);
        assert_eq!(flying.velocity.x, 10.0);
        assert!((flying.velocity.y - (-config.gravity * DT)).abs() < 1e-5);
    }

    #[test]
    fn test_ground_bounce_loses_energy() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let mut ball = BallState::at(Vec3::new(0.0, config.ball_radius + 0.01, 0.0));
        ball.velocity = Vec3::new(0.0, -10.0, 0.0);

        update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(ball.position.y, config.ball_radius);
        assert!(ball.velocity.y > 0.0);
        assert!(ball.velocity.y < 10.0 + config.gravity * DT);
    }

    #[test]
    fn test_small_bounce_comes_to_rest() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let mut ball = BallState::at(Vec3::new(0.0, config.ball_radius + 0.001, 0.0));
        ball.velocity = Vec3::new(0.0, -0.2, 0.0);

        update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(ball.velocity.y, 0.0);
        assert_eq!(ball.position.y, config.ball_radius);
    }

    #[test]
    fn test_zero_rest_speed_keeps_small_bounces() {
        let config = PhysicsConfig {
            rest_speed: 0.0,
            ..Default::default()
        };
        let mut player = bystander(&config);
        let mut ball = BallState::at(Vec3::new(0.0, config.ball_radius + 0.001, 0.0));
        ball.velocity = Vec3::new(0.0, -0.2, 0.0);

        update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        let incoming = 0.2 + config.gravity * DT;
        assert!((ball.velocity.y - incoming * config.bounce).abs() < 1e-5);
    }

    #[test]
    fn test_side_wall_bounce() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let mut ball = BallState::at(Vec3::new(config.ball_max_x() - 0.1, config.ball_radius, 0.0));
        ball.velocity = Vec3::new(30.0, 0.0, 0.0);

        update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(ball.position.x, config.ball_max_x());
        let before = 30.0 * config.friction;
        assert!((ball.velocity.x - (-before * config.bounce)).abs() < 1e-4);
    }

    #[test]
    fn test_end_wall_bounce_outside_goal() {
        let config = scenario_config();
        let mut player = bystander(&config);
        let x = config.goal_half_width() + 1.0;
        let mut ball = BallState::at(Vec3::new(x, 1.0, 53.9));
        ball.velocity = Vec3::new(0.0, 0.0, 20.0);

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(step.goal, None);
        assert_eq!(ball.position.z, 54.0);
        assert!((ball.velocity.z - (-14.0)).abs() < 1e-4);
    }

    #[test]
    fn test_long_roll_into_end_wall() {
        let config = scenario_config();
        let mut player = bystander(&config);
        let x = config.goal_half_width() + 1.0;
        let mut ball = BallState::at(Vec3::new(x, config.ball_radius, 0.0));
        ball.velocity = Vec3::new(0.0, 0.0, 20.0);

        let mut ticks = 0;
        while ball.velocity.z > 0.0 {
            let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);
            assert_eq!(step.goal, None);
            ticks += 1;
            assert!(ticks < 1000, "ball never reached the end wall");
        }

        assert_eq!(ball.position.z, 54.0);
        assert!((ball.velocity.z - (-14.0)).abs() < 1e-4);
    }

    #[test]
    fn test_goal_scored_and_reset() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let eps = 0.01;
        let half_length = config.field_length / 2.0;
        let mut ball = BallState::at(Vec3::new(0.0, config.goal_height - eps, half_length + eps));

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(step.goal, Some(Team::Blue));
        assert_eq!(ball.position, config.restart_point());
        assert_eq!(ball.velocity, Vec3::ZERO);
        assert_eq!(ball.spin, Vec3::ZERO);
    }

    #[test]
    fn test_goal_at_south_end_scores_for_red() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let mut ball = BallState::at(Vec3::new(1.0, config.ball_radius, -config.ball_max_z() + 0.1));
        ball.velocity = Vec3::new(0.0, 0.0, -30.0);

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);
        assert_eq!(step.goal, Some(Team::Red));
    }

    #[test]
    fn test_wide_of_post_bounces() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let eps = 0.01;
        let half_length = config.field_length / 2.0;
        let mut ball = BallState::at(Vec3::new(
            config.goal_half_width() + eps,
            1.0,
            half_length + eps,
        ));
        ball.velocity = Vec3::new(0.0, 0.0, 5.0);

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(step.goal, None);
        assert_eq!(ball.position.z, config.ball_max_z());
        assert!(ball.velocity.z < 0.0);
    }

    #[test]
    fn test_over_crossbar_bounces() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let half_length = config.field_length / 2.0;
        let mut ball = BallState::at(Vec3::new(0.0, config.goal_height + 0.5, half_length + 0.01));

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);
        assert_eq!(step.goal, None);
    }

    #[test]
    fn test_spin_follows_velocity() {
        let config = PhysicsConfig::default();
        let mut player = bystander(&config);
        let mut ball = BallState::at(Vec3::new(0.0, config.ball_radius, 0.0));
        ball.velocity = Vec3::new(0.0, 0.0, 10.0);

        update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert!(ball.spin.x > 0.0);
        assert_eq!(ball.spin.z, 0.0);
    }

    #[test]
    fn test_ball_pinned_against_side_wall_stays_inside() {
        let config = PhysicsConfig::default();
        let max_x = config.ball_max_x();
        let mut player = PlayerState::new(Vec3::new(max_x - 0.3, config.ground_level, 0.0));
        player.yaw = -std::f32::consts::FRAC_PI_2; // facing +X
        let mut ball = BallState::at(Vec3::new(max_x, config.ball_radius, 0.0));
        let input = TickInput {
            held: [crate::sim::input::Action::MoveForward].into_iter().collect(),
            ..Default::default()
        };

        let step = update_ball(&mut ball, &mut player, &input, &config, DT);

        assert!(step.kick.is_some());
        assert!(ball.position.x <= max_x);
        let distance = ball.position.distance(player.position);
        assert!(distance >= config.collision_distance() - 1e-4, "distance {distance}");
        assert!(player.position.x < max_x - 0.3);
    }

    #[test]
    fn test_ball_pinned_against_end_wall_stays_inside() {
        let config = PhysicsConfig::default();
        let max_z = config.ball_max_z();
        let x = config.goal_half_width() + 2.0;
        let mut player = PlayerState::new(Vec3::new(x, config.ground_level, max_z - 0.3));
        player.yaw = std::f32::consts::PI; // facing +Z
        let mut ball = BallState::at(Vec3::new(x, config.ball_radius, max_z));

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert!(step.kick.is_some());
        assert!(ball.position.z <= max_z);
        let distance = ball.position.distance(player.position);
        assert!(distance >= config.collision_distance() - 1e-4, "distance {distance}");
    }

    #[test]
    fn test_player_contact_reports_kick() {
        let config = PhysicsConfig::default();
        let mut player = PlayerState::new(Vec3::new(0.0, config.ground_level, 0.0));
        let mut ball = BallState::at(Vec3::new(0.0, config.ball_radius, -0.6));

        let step = update_ball(&mut ball, &mut player, &TickInput::default(), &config, DT);

        assert_eq!(step.kick, Some(config.kick_force));
        assert!(ball.velocity.z < 0.0);
    }
}
