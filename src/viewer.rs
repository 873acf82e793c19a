//! Standalone point-cloud window backed by winit.
//!
//! ```no_run
//! # use pointsprite::Viewer;
//! Viewer::builder()
//!     .with_path("scans/room.pcd")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Right-drag orbits, the wheel zooms, and dropping a `.pcd`/`.xyz` file on
//! the window replaces the cloud.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::SpriteError, options::Options, points::PointCloud, InputEvent,
    MouseButton, SpriteEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    path: Option<PathBuf>,
    points: Option<PointCloud>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            path: None,
            points: None,
            options: None,
            title: "Point Sprites".into(),
        }
    }

    /// Load the cloud from a `.pcd`, `.xyz`, or `.txt` file on startup.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Show an in-memory cloud. Ignored when a path is also set.
    #[must_use]
    pub fn with_points(mut self, points: PointCloud) -> Self {
        self.points = Some(points);
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            path: self.path,
            points: self.points,
            options: self.options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a point cloud as sprites.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    path: Option<PathBuf>,
    points: Option<PointCloud>,
    options: Option<Options>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`SpriteError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), SpriteError> {
        let event_loop =
            EventLoop::new().map_err(|e| SpriteError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            path: self.path,
            points: self.points,
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SpriteError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SpriteEngine>,
    path: Option<PathBuf>,
    points: Option<PointCloud>,
    options: Option<Options>,
    title: String,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Load and normalize a cloud file, logging failures.
fn load_cloud(path: &Path) -> Option<PointCloud> {
    match PointCloud::load(path) {
        Ok(cloud) => Some(cloud.normalized()),
        Err(e) => {
            log::error!("failed to load {}: {e}", path.display());
            None
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let options = self.options.take().unwrap_or_default();
        let engine_result = pollster::block_on(SpriteEngine::new(
            window.clone(),
            viewport_size(window.inner_size()),
            options,
        ));

        let mut engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        let cloud = match self.path.as_deref() {
            Some(path) => load_cloud(path),
            None => self.points.take(),
        };
        if let Some(cloud) = cloud {
            engine.set_points(&cloud);
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                engine.resize(w, h);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let (w, h) = viewport_size(window.inner_size());
                engine.resize(w, h);
            }

            WindowEvent::RedrawRequested => {
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
                    ) => {
                        let (w, h) = viewport_size(window.inner_size());
                        engine.resize(w, h);
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }
                window.request_redraw();
            }

            WindowEvent::DroppedFile(path) => {
                if let Some(cloud) = load_cloud(&path) {
                    engine.set_points(&cloud);
                    window.set_title(&format!(
                        "{} - {}",
                        self.title,
                        path.file_name().map_or_else(
                            || path.display().to_string(),
                            |name| name.to_string_lossy().into_owned()
                        )
                    ));
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                let _ = engine.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical =
                    position.to_logical::<f32>(window.scale_factor());
                let _ = engine.handle_input(InputEvent::CursorMoved {
                    x: logical.x,
                    y: logical.y,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let _ = engine.handle_input(InputEvent::from_scroll(delta));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let _ = engine.handle_key(&format!("{code:?}"));
            }

            _ => (),
        }
    }
}
