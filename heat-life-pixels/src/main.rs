#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use life_grid::{Boundary, CellGrid, Random};
use log::error;
use pixels_frame_loop::animate;
use std::process::ExitCode;

#[cfg(not(feature = "dead-border"))]
const BOUNDARY: Boundary = Boundary::SkipLeadingEdges;
#[cfg(feature = "dead-border")]
const BOUNDARY: Boundary = Boundary::DeadBorder;

fn main() -> ExitCode {
    env_logger::init();
    let mut rand = Random::new();
    let result = animate(|field_size| {
        CellGrid::new_random(field_size, &mut rand).with_boundary(BOUNDARY)
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error("animate", err);
            ExitCode::FAILURE
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
