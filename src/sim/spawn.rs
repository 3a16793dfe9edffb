//! Random population
//!
//! Balls are scattered uniformly over the arena with a random color and a
//! random launch velocity. Callers pass a seeded RNG for reproducible runs.

use glam::Vec2;
use rand::Rng;

use super::arena::Arena;
use super::body::Body;
use crate::consts::BALL_SPAWN_SPEED;
use crate::error::Result;
use crate::renderer::Color;
use crate::settings::SandboxSettings;

/// Random ball of the given radius somewhere inside `bounds`
pub fn random_ball<R: Rng>(
    rng: &mut R,
    bounds: Vec2,
    radius: f32,
    settings: &SandboxSettings,
) -> Result<Body> {
    let ball = Body::ball(radius, settings.elasticity, settings.density)?;
    let room = (bounds - ball.size).max(Vec2::ZERO);
    let position = room * Vec2::new(rng.random(), rng.random());

    let speed = rng.random_range(-BALL_SPAWN_SPEED..BALL_SPAWN_SPEED);
    let velocity = Vec2::new(speed * rng.random::<f32>(), speed * rng.random::<f32>());

    Ok(ball
        .at(position)
        .with_velocity(velocity)
        .with_priority(settings.ball_priority)
        .with_color(Color::random(rng)))
}

/// Whole-number radius in `[min, max]`
fn random_radius<R: Rng>(rng: &mut R, [min, max]: [f32; 2]) -> f32 {
    rng.random_range(min..=max).round().clamp(min, max)
}

/// Queue the configured balls (and gravity control) into `arena`. Returns
/// the number of bodies added.
pub fn populate<R: Rng>(
    arena: &mut Arena,
    settings: &SandboxSettings,
    rng: &mut R,
) -> Result<usize> {
    settings.validate()?;
    let bounds = arena.bounds();
    let mut added = 0;

    let groups = [
        (settings.small_balls, settings.small_radius),
        (settings.large_balls, settings.large_radius),
    ];
    for (count, range) in groups {
        for _ in 0..count {
            let radius = random_radius(rng, range);
            arena.add_body(random_ball(rng, bounds, radius, settings)?);
            added += 1;
        }
    }

    if settings.gravity_control {
        let control = Body::gravity_control(settings.control_position, settings.control_size)?;
        arena.add_body(control);
        added += 1;
    }

    log::info!("Populated arena with {} bodies", added);
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BodyKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_ball_fits_arena() {
        let mut rng = Pcg32::seed_from_u64(1);
        let settings = SandboxSettings::default();
        let bounds = Vec2::new(800.0, 600.0);
        for _ in 0..200 {
            let ball = random_ball(&mut rng, bounds, 20.0, &settings).unwrap();
            assert!(ball.position.x >= 0.0 && ball.position.y >= 0.0);
            assert!(ball.position.x + ball.size.x <= bounds.x);
            assert!(ball.position.y + ball.size.y <= bounds.y);
            assert!(ball.velocity.x.abs() <= BALL_SPAWN_SPEED);
            assert!(ball.velocity.y.abs() <= BALL_SPAWN_SPEED);
            assert_eq!(ball.elasticity(), settings.elasticity);
        }
    }

    #[test]
    fn test_random_radius_is_whole_and_in_range() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let r = random_radius(&mut rng, [5.0, 20.0]);
            assert!((5.0..=20.0).contains(&r));
            assert_eq!(r, r.round());
        }
    }

    #[test]
    fn test_populate_counts_and_is_deterministic() {
        let settings = SandboxSettings {
            small_balls: 12,
            large_balls: 3,
            ..Default::default()
        };
        let mut first = Arena::from_settings(&settings).unwrap();
        let mut second = Arena::from_settings(&settings).unwrap();
        let seeded = || Pcg32::seed_from_u64(settings.seed);
        assert_eq!(populate(&mut first, &settings, &mut seeded()).unwrap(), 16);
        populate(&mut second, &settings, &mut seeded()).unwrap();

        crate::sim::tick(&mut first, 0.0);
        crate::sim::tick(&mut second, 0.0);

        assert_eq!(first.bodies().len(), 16);
        // Control widget sorts first
        assert_eq!(first.bodies()[0].kind, BodyKind::GravityControl);
        let positions = |a: &Arena| a.bodies().iter().map(|b| b.position).collect::<Vec<_>>();
        assert_eq!(positions(&first), positions(&second));
    }

    #[test]
    fn test_populate_without_control() {
        let settings = SandboxSettings {
            small_balls: 2,
            large_balls: 0,
            gravity_control: false,
            ..Default::default()
        };
        let mut arena = Arena::from_settings(&settings).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(populate(&mut arena, &settings, &mut rng).unwrap(), 2);
    }
}
