//! Ball Sandbox entry point
//!
//! Runs the simulation headless: loads settings, populates the arena, replays
//! a scripted pointer flick, and logs frame summaries. A graphical host would
//! feed the same `Arena` from its own event loop and draw each `Frame`.
//!
//! Usage: `ball-sandbox [settings.json] [--seconds N] [--defaults]`

#[cfg(not(target_arch = "wasm32"))]
use ball_sandbox::{
    Result, SandboxSettings,
    consts::{FRAME_MS, TICK_HZ},
    renderer::Frame,
    sim::{Arena, BodyKind, InputSource, populate, tick},
};

#[cfg(not(target_arch = "wasm32"))]
struct Options {
    settings_path: Option<String>,
    seconds: f64,
    print_defaults: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Options {
    fn parse() -> Self {
        let mut options = Self {
            settings_path: None,
            seconds: 10.0,
            print_defaults: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--defaults" => options.print_defaults = true,
                "--seconds" => match args.next().map(|s| s.parse::<f64>()) {
                    Some(Ok(seconds)) if seconds > 0.0 => options.seconds = seconds,
                    _ => log::warn!(
                        "--seconds expects a positive number, keeping {}",
                        options.seconds
                    ),
                },
                _ => options.settings_path = Some(arg),
            }
        }
        options
    }
}

/// Pointer gesture replayed against the running arena: press on a ball,
/// drag it for a few frames, then let go.
#[cfg(not(target_arch = "wasm32"))]
struct Flick {
    grab_at_ms: f64,
    release_at_ms: f64,
    step: glam::Vec2,
}

#[cfg(not(target_arch = "wasm32"))]
impl Flick {
    fn drive(&self, arena: &mut Arena, now_ms: f64) {
        if now_ms < self.grab_at_ms || now_ms > self.release_at_ms + FRAME_MS {
            return;
        }
        let pointer = arena.pointer().position;

        if arena.dragging().is_none() && !arena.pointer().pressed {
            // Aim at the last painted ball so the press lands on it
            let Some(target) = arena
                .bodies()
                .iter()
                .rev()
                .find(|b| b.kind == BodyKind::Ball)
                .map(|b| b.center())
            else {
                return;
            };
            log::info!("Flick: grabbing ball at ({:.1}, {:.1})", target.x, target.y);
            arena.update_pointer(target.x, target.y, Some(true), InputSource::Pointer, now_ms);
        } else if now_ms < self.release_at_ms {
            let next = pointer + self.step;
            arena.update_pointer(next.x, next.y, None, InputSource::Pointer, now_ms);
        } else if arena.pointer().pressed {
            arena.update_pointer(pointer.x, pointer.y, Some(false), InputSource::Pointer, now_ms);
            log::info!(
                "Flick: released with velocity ({:.2}, {:.2})",
                arena.pointer().velocity.x,
                arena.pointer().velocity.y
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn summarize(frame: &Frame) {
    let colliding = frame.commands.iter().filter(|c| c.state.colliding).count();
    let dragging = frame.commands.iter().filter(|c| c.state.dragging).count();
    log::info!(
        "tick {}: {} bodies, {} colliding, {} dragged, gravity ({:.2}, {:.2}), {} ups",
        frame.tick,
        frame.len(),
        colliding,
        dragging,
        frame.gravity.x,
        frame.gravity.y,
        frame.updates_per_second
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    use rand::SeedableRng;

    env_logger::init();
    log::info!("Ball Sandbox (headless) starting...");

    let options = Options::parse();
    let settings = match &options.settings_path {
        Some(path) => SandboxSettings::load_or_default(path),
        None => SandboxSettings::default(),
    };
    if options.print_defaults {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    let mut arena = Arena::from_settings(&settings)?;
    let mut rng = rand_pcg::Pcg32::seed_from_u64(settings.seed);
    populate(&mut arena, &settings, &mut rng)?;
    // Device held upright: gravity points down the screen
    arena.apply_motion_sensor(0.0, -9.8);

    let flick = Flick {
        grab_at_ms: 1000.0,
        release_at_ms: 1000.0 + 6.0 * FRAME_MS,
        step: glam::Vec2::new(8.0, -6.0),
    };

    let total_ticks = (options.seconds * 1000.0 / FRAME_MS).ceil() as u64;
    let mut last_frame = Frame::default();
    for step in 0..total_ticks {
        let now_ms = step as f64 * FRAME_MS;
        flick.drive(&mut arena, now_ms);
        last_frame = tick(&mut arena, now_ms);
        if last_frame.tick % u64::from(TICK_HZ) == 0 {
            summarize(&last_frame);
        }
    }

    summarize(&last_frame);
    log::info!("Ball Sandbox finished after {} ticks", arena.tick_count());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Arena` directly; nothing to run here
}
