use crate::{DisplayError, DisplaySurface, InputEvent};
use life_grid::GridSize;
use log::{debug, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::collections::VecDeque;
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::monitor::MonitorHandle;
use winit::window::{Fullscreen, Window};

pub const WINDOW_TITLE: &str = "Life the game";
pub const FIELD_SCALE: u32 = 2;
const BACKGROUND_COLOR: Color = Color::BLACK;
const BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 0xff];

pub fn display_size_to_field_size(display_size: PhysicalSize<u32>, scale: u32) -> GridSize {
    GridSize::new(
        (display_size.width / scale).max(1),
        (display_size.height / scale).max(1),
    )
}

/// Full-screen `winit` window stretched over by a `pixels` streaming texture.
///
/// The three handles are acquired window first and released texture first. If
/// acquisition fails partway, whatever was already created is dropped in
/// reverse order on the way out of `acquire`.
pub struct PixelsSurface {
    // Declaration order is drop order.
    texture: TextureHandle,
    renderer: RendererHandle,
    window: WindowHandle,
    events: VecDeque<InputEvent>,
}

impl PixelsSurface {
    pub fn acquire(event_loop: &ActiveEventLoop) -> Result<Self, DisplayError> {
        let monitor = detect_display(event_loop)?;
        let display_size = monitor.size();
        let field_size = display_size_to_field_size(display_size, FIELD_SCALE);
        debug!(
            "Display is {}x{}, field is {}x{}",
            display_size.width, display_size.height, field_size.width, field_size.height
        );

        let window = WindowHandle::create(event_loop, monitor)?;
        let mut renderer = RendererHandle::create(&window, display_size)?;
        let texture = TextureHandle::create(&mut renderer, field_size)?;
        Ok(Self {
            texture,
            renderer,
            window,
            events: VecDeque::new(),
        })
    }

    pub fn field_size(&self) -> GridSize {
        self.texture.size
    }

    pub fn window(&self) -> &Window {
        &self.window.window
    }

    pub fn on_window_event(&mut self, event: &WindowEvent) -> Result<(), DisplayError> {
        if let WindowEvent::Resized(size) = event
            && size.width > 0
            && size.height > 0
        {
            self.renderer
                .pixels
                .resize_surface(size.width, size.height)
                .map_err(DisplayError::ResizeSurface)?;
        }
        self.events.push_back(input_event(event));
        Ok(())
    }
}

impl DisplaySurface for PixelsSurface {
    fn upload_and_present(
        &mut self,
        pixels: &[u32],
        row_stride_bytes: usize,
    ) -> Result<(), DisplayError> {
        let frame = self.renderer.pixels.frame_mut();
        debug_assert_eq!(frame.len(), 4 * pixels.len());
        debug_assert_eq!(row_stride_bytes, 4 * self.texture.size.width as usize);

        let row_pixels = row_stride_bytes / 4;
        for (frame_row, pixel_row) in frame
            .chunks_exact_mut(row_stride_bytes)
            .zip(pixels.chunks_exact(row_pixels))
        {
            for (rgba, &pixel) in frame_row.chunks_exact_mut(4).zip(pixel_row) {
                rgba.copy_from_slice(&argb_to_rgba(pixel));
            }
        }
        self.renderer.pixels.render().map_err(DisplayError::Present)
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

fn detect_display(event_loop: &ActiveEventLoop) -> Result<MonitorHandle, DisplayError> {
    // Some platforms (Wayland) never report a primary monitor.
    event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next())
        .ok_or(DisplayError::ResolutionUnavailable)
}

pub fn input_event(event: &WindowEvent) -> InputEvent {
    match event {
        WindowEvent::CloseRequested => InputEvent::Quit,
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } => InputEvent::KeyDown(*code),
        _ => InputEvent::Other,
    }
}

/// `0xAARRGGBB` to RGBA bytes, composited onto the opaque background.
fn argb_to_rgba(pixel: u32) -> [u8; 4] {
    let [alpha, red, green, blue] = pixel.to_be_bytes();
    alpha_blend_with_background([red, green, blue, alpha], BACKGROUND_RGBA)
}

// From https://en.wikipedia.org/wiki/Alpha_compositing, with below_alpha = 1
fn alpha_blend_with_background(above: [u8; 4], below: [u8; 4]) -> [u8; 4] {
    if above[3] == 0xff {
        return above;
    }
    if above[3] == 0x00 {
        return below;
    }

    let above_alpha = above[3] as u32;
    let mut result = below;
    for (channel, (&from_above, &from_below)) in
        result.iter_mut().zip(above.iter().zip(&below)).take(3)
    {
        *channel = ((from_above as u32 * above_alpha + from_below as u32 * (0xff - above_alpha))
            / 0xff) as u8;
    }
    result
}

struct WindowHandle {
    window: Arc<Window>,
}

impl WindowHandle {
    fn create(event_loop: &ActiveEventLoop, monitor: MonitorHandle) -> Result<Self, DisplayError> {
        let size = monitor.size();
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_fullscreen(Some(Fullscreen::Borderless(Some(monitor))))
            .with_visible(false);
        let window = event_loop
            .create_window(window_attributes)
            .map_err(DisplayError::CreateWindow)?;
        info!("Create window {}x{}", size.width, size.height);
        Ok(Self {
            window: Arc::new(window),
        })
    }
}

impl Drop for WindowHandle {
    fn drop(&mut self) {
        info!("Destroy window");
    }
}

struct RendererHandle {
    pixels: Pixels<'static>,
}

impl RendererHandle {
    fn create(window: &WindowHandle, display_size: PhysicalSize<u32>) -> Result<Self, DisplayError> {
        let surface_texture = SurfaceTexture::new(
            display_size.width,
            display_size.height,
            window.window.clone(),
        );
        // Placeholder buffer until the texture is sized to the field.
        let pixels = PixelsBuilder::new(1, 1, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .map_err(DisplayError::CreateRenderer)?;
        info!("Create renderer");
        Ok(Self { pixels })
    }
}

impl Drop for RendererHandle {
    fn drop(&mut self) {
        info!("Destroy renderer");
    }
}

struct TextureHandle {
    size: GridSize,
}

impl TextureHandle {
    fn create(renderer: &mut RendererHandle, size: GridSize) -> Result<Self, DisplayError> {
        renderer
            .pixels
            .resize_buffer(size.width, size.height)
            .map_err(DisplayError::CreateTexture)?;
        info!("Create texture {}x{}", size.width, size.height);
        Ok(Self { size })
    }
}

impl Drop for TextureHandle {
    fn drop(&mut self) {
        info!("Destroy texture");
    }
}
