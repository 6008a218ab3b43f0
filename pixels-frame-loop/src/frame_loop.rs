use crate::DisplayError;
use life_grid::{CellGrid, PixelBuffer, encode};
use log::trace;
use winit::keyboard::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(KeyCode),
    Other,
}

/// Where frames go and where input comes from.
pub trait DisplaySurface {
    fn upload_and_present(
        &mut self,
        pixels: &[u32],
        row_stride_bytes: usize,
    ) -> Result<(), DisplayError>;

    /// Next pending event, or `None` once the queue is empty.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
    Terminated,
}

#[derive(Debug)]
pub struct FrameLoop {
    grid: CellGrid,
    pixels: PixelBuffer,
    state: LoopState,
    ticks: u64,
}

impl FrameLoop {
    pub fn new(grid: CellGrid) -> Self {
        let pixels = PixelBuffer::new(grid.size());
        Self {
            grid,
            pixels,
            state: LoopState::Running,
            ticks: 0,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Shows the current generation, advances to the next, then drains input.
    /// The frame on screen always matches the grid as it was when the tick began.
    pub fn tick<S: DisplaySurface>(&mut self, surface: &mut S) -> Result<LoopState, DisplayError> {
        if self.state != LoopState::Running {
            return Ok(self.state);
        }

        encode(&self.grid, &mut self.pixels);
        self.grid.update();
        surface.upload_and_present(self.pixels.as_slice(), self.pixels.row_stride_bytes())?;
        while let Some(event) = surface.poll_event() {
            self.on_input(event);
        }

        self.ticks += 1;
        trace!("tick {} done, state {:?}", self.ticks, self.state);
        Ok(self.state)
    }

    pub fn run<S: DisplaySurface>(&mut self, surface: &mut S) -> Result<(), DisplayError> {
        while self.tick(surface)? == LoopState::Running {}
        self.terminate();
        Ok(())
    }

    pub fn terminate(&mut self) {
        if self.state == LoopState::Stopping {
            self.state = LoopState::Terminated;
        }
    }

    fn on_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(KeyCode::Escape) => {
                if self.state == LoopState::Running {
                    self.state = LoopState::Stopping;
                }
            }
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_grid::{GridSize, Loc};
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedSurface {
        frames: Vec<Vec<u32>>,
        strides: Vec<usize>,
        events_per_tick: VecDeque<Vec<InputEvent>>,
        pending: VecDeque<InputEvent>,
        fail_present: bool,
    }

    impl ScriptedSurface {
        fn with_events(events_per_tick: Vec<Vec<InputEvent>>) -> Self {
            Self {
                events_per_tick: events_per_tick.into(),
                ..Self::default()
            }
        }
    }

    impl DisplaySurface for ScriptedSurface {
        fn upload_and_present(
            &mut self,
            pixels: &[u32],
            row_stride_bytes: usize,
        ) -> Result<(), DisplayError> {
            if self.fail_present {
                return Err(DisplayError::ResolutionUnavailable);
            }
            self.frames.push(pixels.to_vec());
            self.strides.push(row_stride_bytes);
            // Once the script runs out, ask to quit so no test can spin forever.
            let events = self
                .events_per_tick
                .pop_front()
                .unwrap_or_else(|| vec![InputEvent::Quit]);
            self.pending.extend(events);
            Ok(())
        }

        fn poll_event(&mut self) -> Option<InputEvent> {
            self.pending.pop_front()
        }
    }

    fn block_grid() -> CellGrid {
        let mut grid = CellGrid::new_empty(GridSize::new(5, 5));
        for (row, col) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            grid.set(Loc::new(row, col), 1);
        }
        grid
    }

    #[test]
    fn presented_frame_is_the_grid_before_advancing() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface::with_events(vec![vec![], vec![]]);

        frame_loop.tick(&mut surface).unwrap();
        assert_eq!(frame_loop.grid()[Loc::new(2, 2)], 2);
        assert_eq!(surface.frames[0][2 * 5 + 2] >> 24, 1);

        frame_loop.tick(&mut surface).unwrap();
        assert_eq!(frame_loop.grid()[Loc::new(2, 2)], 3);
        assert_eq!(surface.frames[1][2 * 5 + 2] >> 24, 2);
        assert_eq!(surface.frames[1][0], 0);
        assert_eq!(surface.strides, vec![20, 20]);
    }

    #[test]
    fn escape_stops_after_current_tick() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface::with_events(vec![
            vec![],
            vec![InputEvent::KeyDown(KeyCode::Escape)],
            vec![],
        ]);

        frame_loop.run(&mut surface).unwrap();
        assert_eq!(frame_loop.ticks(), 2);
        assert_eq!(surface.frames.len(), 2);
        assert_eq!(frame_loop.state(), LoopState::Terminated);
    }

    #[test]
    fn quit_stops_loop() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface::with_events(vec![vec![InputEvent::Quit]]);

        assert_eq!(frame_loop.tick(&mut surface).unwrap(), LoopState::Stopping);
        frame_loop.terminate();
        assert_eq!(frame_loop.state(), LoopState::Terminated);
    }

    #[test]
    fn other_input_is_ignored() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface::with_events(vec![
            vec![InputEvent::Other, InputEvent::KeyDown(KeyCode::KeyQ)],
            vec![InputEvent::KeyDown(KeyCode::Space)],
            vec![InputEvent::Other, InputEvent::Other, InputEvent::Quit],
        ]);

        frame_loop.run(&mut surface).unwrap();
        assert_eq!(frame_loop.ticks(), 3);
    }

    #[test]
    fn every_pending_event_is_drained() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface::with_events(vec![vec![
            InputEvent::Other,
            InputEvent::Quit,
            InputEvent::Other,
        ]]);

        frame_loop.tick(&mut surface).unwrap();
        assert!(surface.pending.is_empty());
    }

    #[test]
    fn no_ticks_once_stopped() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface::with_events(vec![vec![InputEvent::Quit]]);

        frame_loop.run(&mut surface).unwrap();
        let grid_before = frame_loop.grid().clone();
        assert_eq!(frame_loop.tick(&mut surface).unwrap(), LoopState::Terminated);
        assert_eq!(surface.frames.len(), 1);
        assert!(frame_loop.grid().cells_iter().eq(grid_before.cells_iter()));
    }

    #[test]
    fn pixel_buffer_is_reused() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let buffer_start = frame_loop.pixels().as_slice().as_ptr();
        let mut surface = ScriptedSurface::with_events(vec![vec![]; 10]);

        frame_loop.run(&mut surface).unwrap();
        assert_eq!(frame_loop.ticks(), 11);
        assert_eq!(frame_loop.pixels().as_slice().as_ptr(), buffer_start);
        assert_eq!(frame_loop.pixels().len(), 25);
    }

    #[test]
    fn present_failure_is_returned() {
        let mut frame_loop = FrameLoop::new(block_grid());
        let mut surface = ScriptedSurface {
            fail_present: true,
            ..ScriptedSurface::default()
        };

        assert!(frame_loop.run(&mut surface).is_err());
        assert_eq!(frame_loop.state(), LoopState::Running);
    }
}
