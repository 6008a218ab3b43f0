#![deny(clippy::all)]
#![forbid(unsafe_code)]

mod error;
mod frame_loop;
mod pixels_surface;

pub use error::DisplayError;
pub use frame_loop::{DisplaySurface, FrameLoop, InputEvent, LoopState};
pub use pixels_surface::{
    FIELD_SCALE, PixelsSurface, WINDOW_TITLE, display_size_to_field_size, input_event,
};

use life_grid::{CellGrid, GridSize};
use log::info;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

/// Opens the full-screen surface, builds the grid to fit it, and runs frames
/// until the user quits. Returns the first fatal display error, if any.
pub fn animate<F>(build_grid: F) -> Result<(), DisplayError>
where
    F: FnMut(GridSize) -> CellGrid,
{
    let event_loop = EventLoop::new().map_err(DisplayError::EventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut handler = AppEventHandler::new(build_grid);
    event_loop
        .run_app(&mut handler)
        .map_err(DisplayError::EventLoop)?;
    handler.outcome
}

struct App {
    frame_loop: FrameLoop,
    surface: PixelsSurface,
}

impl App {
    fn new<F>(event_loop: &ActiveEventLoop, build_grid: &mut F) -> Result<Self, DisplayError>
    where
        F: FnMut(GridSize) -> CellGrid,
    {
        let surface = PixelsSurface::acquire(event_loop)?;
        let grid = build_grid(surface.field_size());
        info!(
            "Seeded {}x{} field with {} live cells",
            grid.width(),
            grid.height(),
            grid.population()
        );
        Ok(Self {
            frame_loop: FrameLoop::new(grid),
            surface,
        })
    }

    fn on_create(&self) {
        self.surface.window().set_visible(true);
        self.surface.window().request_redraw();
    }
}

struct AppEventHandler<F>
where
    F: FnMut(GridSize) -> CellGrid,
{
    build_grid: F,
    app: Option<App>,
    outcome: Result<(), DisplayError>,
}

impl<F> AppEventHandler<F>
where
    F: FnMut(GridSize) -> CellGrid,
{
    fn new(build_grid: F) -> Self {
        Self {
            build_grid,
            app: None,
            outcome: Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DisplayError) {
        self.app = None;
        self.outcome = Err(err);
        event_loop.exit();
    }
}

impl<F> ApplicationHandler for AppEventHandler<F>
where
    F: FnMut(GridSize) -> CellGrid,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() || self.outcome.is_err() {
            return;
        }
        match App::new(event_loop, &mut self.build_grid) {
            Ok(app) => {
                app.on_create();
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        if let Err(err) = app.surface.on_window_event(&event) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_mut() else {
            return;
        };
        match app.frame_loop.tick(&mut app.surface) {
            Ok(LoopState::Running) => (),
            Ok(_) => {
                app.frame_loop.terminate();
                info!("Stopping after {} ticks", app.frame_loop.ticks());
                event_loop.exit();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Releases texture, renderer, then window.
        self.app = None;
    }
}
