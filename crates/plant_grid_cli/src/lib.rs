#![forbid(unsafe_code)]
//! Output side of plant_grid: rendering, the text report, settings files and logging setup.

mod rendering;
mod report;
mod settings;

pub use rendering::{
    render_layout_image, render_layout_svg, render_layout_to_png, render_to_path, RenderConfig,
    MAX_DOT_RADIUS_PX, MAX_IMAGE_PIXELS, MAX_IMAGE_SIDE_PX,
};
pub use report::Report;
pub use settings::BedSettings;

/// Installs a compact `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise the level is INFO, or DEBUG when `verbose` is set.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
