use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use glsteps_core::{Stage, animation::RotationClock, settings::Settings};

use crate::{abs::App, error::Error, scenes::Frame, shaders::ShaderLibrary};

mod abs;
mod error;
mod logging;
mod scenes;
mod shaders;

/// Incremental OpenGL demos, from a cleared window to a lit, textured cube.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Stage to run, by number (1-7) or name.
    #[arg(default_value = "lit-cube")]
    stage: Stage,

    /// Settings file, defaults to `<config dir>/glsteps/settings.json` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read shader sources from this directory instead of the built-in copies.
    #[arg(long)]
    shader_dir: Option<PathBuf>,

    /// Image to map onto the textured stages.
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Exit after rendering this many frames.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// List the stages and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.list {
        for stage in Stage::ALL {
            println!("{:<18} {}", stage.to_string(), stage.summary());
        }
        return ExitCode::SUCCESS;
    }

    let settings = Settings::load_or_default(cli.config.as_deref());
    let level = logging::parse_level(
        cli.log_level
            .as_deref()
            .or_else(|| settings.as_ref().ok().and_then(|s| s.log_level.as_deref())),
    );
    if let Err(e) = logging::init(level) {
        eprintln!("{e}");
    }

    let result = settings
        .map_err(Error::from)
        .and_then(|settings| run(&cli, settings));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Logs the error and shows it in a message box, then the caller halts.
fn report(error: &Error) {
    log::error!("{error}");
    if let Err(e) = sdl2::messagebox::show_simple_message_box(
        sdl2::messagebox::MessageBoxFlag::ERROR,
        "glsteps",
        &error.to_string(),
        None::<&sdl2::video::Window>,
    ) {
        log::debug!("Could not show message box: {e:?}");
    }
}

fn run(cli: &Cli, mut settings: Settings) -> Result<(), Error> {
    if let Some(dir) = &cli.shader_dir {
        settings.shader_dir = Some(dir.clone());
    }
    if let Some(texture) = &cli.texture {
        settings.texture = Some(texture.clone());
    }
    settings.window.title = format!("{} - {}", settings.window.title, cli.stage);

    let mut app = App::new(&settings.window)?;
    let shaders = ShaderLibrary::new(settings.shader_dir.as_deref());
    let mut scene = scenes::build(&app.gl, cli.stage, &settings, &shaders)?;

    let mut aspect = app.fit_viewport().aspect();

    let mut clock = RotationClock::new(settings.rotation_speed);
    let start = Instant::now();
    let mut frames = 0u64;

    log::info!("Running stage {}", scene.stage());
    'running: loop {
        let mut resized = false;
        for event in app.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. }
                | sdl2::event::Event::KeyDown {
                    keycode: Some(sdl2::keyboard::Keycode::Escape),
                    ..
                } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::SizeChanged(..),
                    ..
                } => resized = true,
                _ => {}
            }
        }
        if resized {
            let viewport = app.fit_viewport();
            aspect = viewport.aspect();
            log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        }

        let rotation = if cli.stage.is_animated() {
            clock.tick(start.elapsed())
        } else {
            0.0
        };
        scene.render(&Frame { rotation, aspect });
        app.window.gl_swap_window();

        frames += 1;
        if cli.frames.is_some_and(|limit| frames >= limit) {
            break;
        }
    }

    log::info!(
        "Stopped stage {} after {frames} frames ({:.1}s)",
        scene.stage(),
        start.elapsed().as_secs_f32()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults_to_last_stage() {
        let cli = Cli::try_parse_from(["glsteps"]).unwrap();
        assert_eq!(cli.stage, Stage::LitCube);
        assert_eq!(cli.frames, None);
    }

    #[test]
    fn test_frame_limit_must_be_positive() {
        assert!(Cli::try_parse_from(["glsteps", "--frames", "0"]).is_err());
        let cli = Cli::try_parse_from(["glsteps", "2", "--frames", "1"]).unwrap();
        assert_eq!(cli.stage, Stage::Quad);
        assert_eq!(cli.frames, Some(1));
    }

    #[test]
    fn test_unknown_stage_is_rejected() {
        assert!(Cli::try_parse_from(["glsteps", "teapot"]).is_err());
    }
}
