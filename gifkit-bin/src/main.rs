// main.rs      gifkit command
//
// Copyright (c) 2026  gifkit developers
//
#![forbid(unsafe_code)]

use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use gifkit::block::DisposalMethod;
use gifkit::{Animation, DecodePool, Frame, Result as GifResult};
use log::debug;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Crate version
const VERSION: &str = std::env!("CARGO_PKG_VERSION");

/// Default number of decode workers
const WORKERS: usize = 4;

/// Main entry point
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder().format_timestamp(None).init();
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    if let ("show", Some(matches)) = create_app().get_matches().subcommand()
    {
        show(&mut out, matches)?;
    }
    out.reset()?;
    Ok(())
}

/// Create clap App
fn create_app() -> App<'static, 'static> {
    App::new("gifkit")
        .version(VERSION)
        .setting(AppSettings::GlobalVersion)
        .about("GIF animation utility")
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("show")
                .about("Decode GIF files and show a frame table")
                .arg(
                    Arg::with_name("strict")
                        .long("strict")
                        .short("s")
                        .help("reject malformed files"),
                )
                .arg(
                    Arg::with_name("workers")
                        .long("workers")
                        .short("w")
                        .takes_value(true)
                        .help("number of decode workers"),
                )
                .arg(
                    Arg::with_name("files")
                        .required(true)
                        .min_values(1)
                        .help("input file(s)"),
                ),
        )
}

/// Handle show subcommand
fn show(
    out: &mut StandardStream,
    matches: &ArgMatches,
) -> Result<(), Box<dyn Error>> {
    let workers = if matches.is_present("workers") {
        value_t!(matches, "workers", usize)?
    } else {
        WORKERS
    };
    let paths: Vec<PathBuf> = matches
        .values_of_os("files")
        .map(|v| v.map(PathBuf::from).collect())
        .unwrap_or_default();
    let results = decode_all(&paths, workers, matches.is_present("strict"))?;
    for (path, res) in paths.iter().zip(results) {
        show_file(out, path, res)?;
    }
    Ok(())
}

/// Decode files on a pool, returning results in path order
fn decode_all(
    paths: &[PathBuf],
    workers: usize,
    strict: bool,
) -> Result<Vec<GifResult<Animation>>, Box<dyn Error>> {
    let mut pool = DecodePool::new(workers.min(paths.len()))?.strict(strict);
    let (tx, rx) = crossbeam_channel::unbounded();
    for (i, path) in paths.iter().enumerate() {
        let tx = tx.clone();
        let handle = pool.submit(path.clone(), move |res| {
            // receiver outlives the pool
            let _ = tx.send((i, res));
        })?;
        debug!("{:?}: task {}", path, handle.id());
    }
    drop(tx);
    pool.shutdown();
    let mut results: Vec<Option<GifResult<Animation>>> =
        paths.iter().map(|_| None).collect();
    for (i, res) in rx.iter() {
        results[i] = Some(res);
    }
    Ok(results
        .into_iter()
        .map(|r| r.unwrap_or(Err(gifkit::Error::Cancelled)))
        .collect())
}

/// Show one GIF file
fn show_file(
    out: &mut StandardStream,
    path: &Path,
    res: GifResult<Animation>,
) -> Result<(), Box<dyn Error>> {
    let mut magenta = ColorSpec::new();
    magenta.set_fg(Some(Color::Magenta));
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    let mut yellow = ColorSpec::new();
    yellow.set_fg(Some(Color::Yellow)).set_intense(true);
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    out.set_color(&magenta)?;
    writeln!(out, "{:?}", path)?;
    let animation = match res {
        Ok(animation) => animation,
        Err(e) => {
            out.set_color(&red)?;
            writeln!(out, "  error: {}", e)?;
            return Ok(());
        }
    };
    let frame_digits = digits(animation.len()).max(3);
    let width = animation.width();
    let height = animation.height();
    let size_digits = 4.max(1 + digits(width) + digits(height));
    out.set_color(&bold)?;
    write!(out, "{}x{}, frames: {}", width, height, animation.len())?;
    write!(out, ", delay: {:?}", animation.time_per_frame())?;
    if let Some(c) = animation.loop_count() {
        write!(out, ", repeat: ")?;
        if c == 0 {
            write!(out, "∞")?;
        } else {
            write!(out, "{}", c)?;
        }
    }
    if animation.is_looping() {
        write!(out, ", looping")?;
    }
    writeln!(out)?;
    out.set_color(&yellow)?;
    write!(out, " {:>w$}", "Fr#", w = frame_digits)?;
    write!(out, "  Delay Disp")?;
    write!(out, " {:>w$}", "Size", w = size_digits)?;
    write!(out, " {:>w$}", "X,Y", w = size_digits)?;
    writeln!(out, " Clrs Trn")?;
    let dims = (width, height);
    for (n, f) in animation.frames().iter().enumerate() {
        show_frame(f, out, dims, n, frame_digits, size_digits)?;
    }
    Ok(())
}

/// Show one frame of a GIF file
fn show_frame(
    frame: &Frame,
    out: &mut StandardStream,
    (width, height): (u16, u16),
    number: usize,
    frame_digits: usize,
    size_digits: usize,
) -> Result<(), Box<dyn Error>> {
    let mut dflt = ColorSpec::new();
    dflt.set_fg(Some(Color::White));
    let mut bold = ColorSpec::new();
    bold.set_fg(Some(Color::White))
        .set_intense(true)
        .set_bold(true);
    let mut red = ColorSpec::new();
    red.set_fg(Some(Color::Red)).set_intense(true);
    let desc = frame.image_desc();
    out.set_color(&dflt)?;
    let interlaced = if desc.interlaced() { 'i' } else { ' ' };
    write!(out, "{}", interlaced)?;
    out.set_color(&bold)?;
    write!(out, "{:>w$}", number, w = frame_digits)?;
    let d = frame.delay_time_cs();
    if d == 0 {
        out.set_color(&dflt)?;
    }
    write!(out, " {:6.2}", d as f32 / 100f32)?;
    let d = if frame.graphic_control_ext().is_some() {
        match frame.disposal_method() {
            DisposalMethod::Unspecified => "none",
            DisposalMethod::NotDispose => "keep",
            DisposalMethod::RestoreToBackground => "bg",
            DisposalMethod::RestoreToPrevious => "prev",
            DisposalMethod::Reserved(_) => "res",
        }
    } else {
        "-"
    };
    out.set_color(match d {
        "none" | "-" => &dflt,
        "res" => &red,
        _ => &bold,
    })?;
    write!(out, " {:>4}", d)?;
    if width == desc.width() && height == desc.height() {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(
        out,
        " {:>w$}",
        &format!("{}x{}", desc.width(), desc.height()),
        w = size_digits
    )?;
    if desc.left() == 0 && desc.top() == 0 {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    write!(
        out,
        " {:>w$}",
        &format!("{},{}", desc.left(), desc.top()),
        w = size_digits
    )?;
    if desc.has_color_table() {
        out.set_color(&bold)?;
        write!(out, "  {:3}", desc.color_table_len())?;
    } else {
        out.set_color(&dflt)?;
        write!(out, "    g")?;
    }
    let tc = match frame.transparent_color() {
        Some(tc) => format!("{}", tc),
        None => "-".to_string(),
    };
    if tc == "-" {
        out.set_color(&dflt)?;
    } else {
        out.set_color(&bold)?;
    }
    writeln!(out, " {:>3}", tc)?;
    Ok(())
}

/// Calculate digits in a number
fn digits<T: Into<usize>>(v: T) -> usize {
    let v = v.into();
    match v {
        0..=9 => 1,
        10..=99 => 2,
        100..=999 => 3,
        1000..=9999 => 4,
        _ => 5,
    }
}
