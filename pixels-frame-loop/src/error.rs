use thiserror::Error;
use winit::error::{EventLoopError, OsError};

/// Fatal display failures. None of them are retried.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("display event loop failed")]
    EventLoop(#[source] EventLoopError),
    #[error("can't get display resolution")]
    ResolutionUnavailable,
    #[error("create window failed")]
    CreateWindow(#[source] OsError),
    #[error("create renderer failed")]
    CreateRenderer(#[source] pixels::Error),
    #[error("create texture failed")]
    CreateTexture(#[source] pixels::TextureError),
    #[error("resize surface failed")]
    ResizeSurface(#[source] pixels::TextureError),
    #[error("present failed")]
    Present(#[source] pixels::Error),
}
