//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context every stage renders into.

use std::sync::Arc;

use glow::HasContext;
use glsteps_core::{camera::Viewport, settings::WindowSettings};

use crate::error::Error;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a new [`App`] from the window settings.
    /// The width and height are ignored if `fullscreen` is set.
    pub fn new(settings: &WindowSettings) -> Result<Self, Error> {
        let sdl = sdl2::init().map_err(Error::Context)?;
        let video_subsystem = sdl.video().map_err(Error::Context)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);

        let (width, height) = if settings.fullscreen {
            let display_mode = video_subsystem
                .current_display_mode(0)
                .map_err(Error::Context)?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (settings.width, settings.height)
        };
        let mut window = video_subsystem
            .window(&settings.title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| Error::Context(e.to_string()))?;
        if settings.fullscreen {
            window
                .set_fullscreen(sdl2::video::FullscreenType::Desktop)
                .map_err(Error::Context)?;
        }

        let gl_context = window.gl_create_context().map_err(Error::Context)?;
        window.gl_make_current(&gl_context).map_err(Error::Context)?;
        let interval = if settings.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(Error::Context)?;

        log::info!(
            "Created {}x{} window with OpenGL {:?}",
            width,
            height,
            gl.version()
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Arc::new(gl),
            event_pump,
        })
    }

    /// Points the GL viewport at the whole drawable and returns its size.
    ///
    /// The drawable is measured in pixels, which differs from the window's
    /// logical size on HiDPI displays.
    pub fn fit_viewport(&self) -> Viewport {
        let viewport = Viewport::from(self.window.drawable_size());
        let (width, height) = viewport.gl_size();
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
        viewport
    }
}
