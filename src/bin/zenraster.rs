use std::process::ExitCode;

use clap::Parser;
use zenraster::color::{self, Stretch};
use zenraster::{BitmapError, Interpolation, RowOrder, Unstoppable};

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Read a BMP, filter, zoom and rotate it, and write the result"
)]
pub struct App {
    /// Input base name; `.bmp` is appended.
    read: String,

    /// Output base name; `-out.bmp` is appended.
    save: String,

    /// Convert to grayscale.
    #[clap(long)]
    gray: bool,

    /// Threshold to black and white at this level.
    #[clap(long, value_name = "LEVEL")]
    binarize: Option<u8>,

    /// Photographic negative.
    #[clap(long)]
    invert: bool,

    /// Logarithmic tone curve `a + ln(f + 1) / (b ln c)`.
    #[clap(long, num_args = 3, value_names = ["A", "B", "C"], allow_negative_numbers = true)]
    log_stretch: Option<Vec<f64>>,

    /// Exponential tone curve `b^(c (f - a)) - 1`.
    #[clap(long, num_args = 3, value_names = ["A", "B", "C"], allow_negative_numbers = true)]
    exp_stretch: Option<Vec<f64>>,

    /// Resize to WIDTHxHEIGHT.
    #[clap(long, value_name = "WxH", value_parser = parse_size)]
    zoom: Option<(u32, u32)>,

    /// Rotate clockwise by this many degrees.
    #[clap(long, value_name = "DEG", allow_negative_numbers = true)]
    rotate: Option<f64>,

    /// Interpolation used by zoom and rotate.
    #[clap(long, value_enum, default_value_t = Interpolation::Nearest)]
    interp: Interpolation,

    /// Sample value painted where a rotation leaves the source.
    #[clap(long, default_value_t = 255)]
    fill: u8,

    /// Crop a rotation to the inscribed content instead of expanding.
    #[clap(long)]
    crop: bool,

    /// Store rows top-to-bottom (negative height).
    #[clap(long)]
    top_down: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w = w.trim().parse().map_err(|e| format!("bad width {w:?}: {e}"))?;
    let h = h.trim().parse().map_err(|e| format!("bad height {h:?}: {e}"))?;
    Ok((w, h))
}

fn stretch(values: &[f64]) -> Stretch {
    Stretch {
        a: values[0],
        b: values[1],
        c: values[2],
    }
}

fn run(app: App) -> Result<(), BitmapError> {
    let input = format!("{}.bmp", app.read);
    let output = format!("{}-out.bmp", app.save);

    let record = zenraster::read_bmp_file(&input, Unstoppable)?;
    let mut image = zenraster::canonicalize(&record);
    log::info!(
        "{input}: {}x{} {}",
        image.width(),
        image.height(),
        if image.is_grayscale() { "gray" } else { "color" }
    );

    if app.gray {
        color::to_grayscale(&mut image);
    }
    if let Some(level) = app.binarize {
        color::binarize(&mut image, level);
    }
    if app.invert {
        color::invert(&mut image);
    }
    if let Some(values) = &app.log_stretch {
        color::log_stretch(&mut image, stretch(values));
    }
    if let Some(values) = &app.exp_stretch {
        color::exp_stretch(&mut image, stretch(values));
    }
    if let Some((w, h)) = app.zoom {
        zenraster::zoom(&mut image, w, h, app.interp);
    }
    if let Some(degrees) = app.rotate {
        zenraster::rotate(&mut image, degrees, app.interp, app.fill, app.crop);
    }

    let order = if app.top_down {
        RowOrder::TopDown
    } else {
        RowOrder::BottomUp
    };
    zenraster::write_bmp_file(&output, &zenraster::reencode(image), order, Unstoppable)?;
    log::info!("wrote {output}");
    Ok(())
}

/// `error code: <decimal code> (<message>)`
fn error_line(err: BitmapError) -> String {
    format!("error code: {} ({err})", err.code())
}

fn main() -> ExitCode {
    env_logger::init();

    let app = App::parse();

    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_line(err));
            ExitCode::FAILURE
        }
    }
}
