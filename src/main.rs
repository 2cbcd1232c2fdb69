use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

use terrawalk::locomotion::{LocomotionConfig, LocomotionController};
use terrawalk::session::Session;
use terrawalk::terrain::{self, sampler::REFERENCE_SPAN, GridMapping};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mapping {
    /// Span taken from the heightmap's own dimensions
    Fitted,
    /// Fixed span from --reference-span, regardless of heightmap size
    Reference,
}

#[derive(Parser, Debug)]
#[command(name = "terrawalk")]
#[command(about = "Headless first-person walk over a heightmap terrain")]
struct Args {
    /// Grayscale heightmap image
    #[arg(default_value = "resources/textures/heightmap.png")]
    heightmap: PathBuf,

    /// World height of a white pixel
    #[arg(long, default_value_t = terrain::DEFAULT_VERTICAL_SCALE)]
    vertical_scale: f32,

    /// World distance between adjacent grid cells
    #[arg(long, default_value = "1.0")]
    tile_size: f32,

    /// World-to-grid mapping used for height queries
    #[arg(long, value_enum, default_value = "fitted")]
    mapping: Mapping,

    /// Span used by the reference mapping
    #[arg(long, default_value_t = REFERENCE_SPAN)]
    reference_span: f32,

    /// Gravity (units/s², negative is down)
    #[arg(long, default_value = "-30.81", allow_negative_numbers = true)]
    gravity: f32,

    /// Vertical speed of a jump
    #[arg(long, default_value = "25.0")]
    jump_speed: f32,

    /// Eye height above the terrain
    #[arg(long, default_value = "0.5")]
    ground_offset: f32,

    /// Number of simulation steps
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Seconds per step
    #[arg(long, default_value = "0.016666668")]
    dt: f32,

    /// Jump every N steps (0 disables)
    #[arg(long, default_value = "90")]
    jump_every: u32,

    /// Horizontal mouse travel per step, in pixels
    #[arg(long, default_value = "4.0", allow_negative_numbers = true)]
    turn: f32,

    /// Hold sprint while walking
    #[arg(long)]
    sprint: bool,
}

impl Args {
    /// Reject values that would make grid lookups divide by zero or go NaN.
    fn validate(&self) -> Result<()> {
        ensure!(
            self.tile_size.is_finite() && self.tile_size > 0.0,
            "--tile-size must be positive, got {}",
            self.tile_size
        );
        ensure!(
            self.reference_span.is_finite() && self.reference_span > 0.0,
            "--reference-span must be positive, got {}",
            self.reference_span
        );
        ensure!(
            self.vertical_scale.is_finite(),
            "--vertical-scale must be finite, got {}",
            self.vertical_scale
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    args.validate()?;

    // Load terrain, falling back to a flat grid
    let field = terrain::load_or_default(&args.heightmap, args.vertical_scale);
    let (min_h, max_h) = field.height_bounds();
    println!(
        "Loaded terrain: {}x{}, height range: {:.2}..{:.2}",
        field.width(),
        field.height(),
        min_h * field.vertical_scale(),
        max_h * field.vertical_scale()
    );

    let mapping = match args.mapping {
        Mapping::Fitted => GridMapping::fitted(&field, args.tile_size),
        Mapping::Reference => {
            log::warn!(
                "Reference mapping assumes a {}-cell grid; heightmap is {}x{}",
                args.reference_span + 1.0,
                field.width(),
                field.height()
            );
            GridMapping::reference(args.reference_span, args.tile_size)
        }
    };
    let config = LocomotionConfig {
        gravity: args.gravity,
        jump_speed: args.jump_speed,
        ground_offset: args.ground_offset,
        ..LocomotionConfig::default()
    };
    let controller = LocomotionController::new(config, mapping);

    let mut session = Session::new(field, controller).context("Cannot build terrain mesh")?;
    println!(
        "Generated mesh: {} vertices, {} triangles",
        session.mesh.vertices.len(),
        session.mesh.triangle_count()
    );

    run_autopilot(&mut session, &args);

    let state = &session.state;
    println!(
        "Final position: ({:.2}, {:.2}, {:.2}), {:?}, clearance {:.2}",
        state.position.x,
        state.position.y,
        state.position.z,
        state.ground(),
        session.clearance()
    );
    println!(
        "Facing yaw {:.1}°, pitch {:.1}°",
        state.orientation.yaw(),
        state.orientation.pitch()
    );

    Ok(())
}

/// Walk forward, turning and jumping, by feeding synthetic input events.
fn run_autopilot(session: &mut Session, args: &Args) {
    session.input.handle_keyboard(KeyCode::KeyW, ElementState::Pressed);
    if args.sprint {
        session
            .input
            .handle_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
    }

    let mut cursor_x = 0.0;
    session.input.handle_mouse_move(cursor_x, 0.0);

    let mut landings = 0;
    for tick in 1..=args.ticks {
        let jump = args.jump_every > 0 && tick % args.jump_every == 0;
        let key_state = if jump {
            ElementState::Pressed
        } else {
            ElementState::Released
        };
        session.input.handle_keyboard(KeyCode::Space, key_state);

        cursor_x += args.turn;
        session.input.handle_mouse_move(cursor_x, 0.0);

        let was_grounded = session.state.is_grounded();
        let ground = session.tick(args.dt);
        if !was_grounded && session.state.is_grounded() {
            landings += 1;
        }

        let p = session.state.position;
        log::trace!(
            "tick {tick}: ({:.2}, {:.2}, {:.2}) {ground:?}",
            p.x,
            p.y,
            p.z
        );
    }

    log::info!("Autopilot ran {} ticks, {} landings", args.ticks, landings);
}
