// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate crossbeam;
extern crate ctrlc;
extern crate env_logger;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate nebulabrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use crossbeam::channel::bounded;
use env_logger::Env;
use failure::Error;
use nebulabrot::export::check_destination;
use nebulabrot::progress::comma;
use nebulabrot::{render, write_image, Palette, PlaneMapper, PoolConfig, Sampler, Stopped};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const COLOR: &str = "color";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const SAMPLES: &str = "samples";
const INTERVAL: &str = "interval";
const SNAPSHOT: &str = "snapshot";

fn args<'a>() -> ArgMatches<'a> {
    App::new("nebula")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Monte-Carlo Buddhabrot and Nebulabrot sampler")
        .after_help("Press control-c to stop sampling and write the image.")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.png, or .ppm/.pnm)"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("600")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        16_384,
                        "Could not parse image width",
                        "Image width must be between 1 and 16384",
                    )
                })
                .help("Width of the output image"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .short("t")
                .takes_value(true)
                .default_value("600")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        16_384,
                        "Could not parse image height",
                        "Image height must be between 1 and 16384",
                    )
                })
                .help("Height of the output image"),
        )
        .arg(
            Arg::with_name(COLOR)
                .long(COLOR)
                .short("c")
                .takes_value(true)
                .default_value("50,200,500")
                .validator(|s| Palette::from_str(&s).map(|_| ()).map_err(|e| e.to_string()))
                .help(
                    "Escape-time thresholds as red,green,blue; a single value \
                     (i.e.: '-c 40') renders a greyscale image",
                ),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-2.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the viewport"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2.0,2.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the viewport"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("j")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 1024",
                    )
                })
                .help("Number of sampling threads [default: one per CPU]"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        u64::max_value(),
                        "Could not parse sample count",
                        "Sample count must be positive",
                    )
                })
                .help("Stop by itself after tracing this many samples"),
        )
        .arg(
            Arg::with_name(INTERVAL)
                .long(INTERVAL)
                .short("i")
                .takes_value(true)
                .default_value("5")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        86_400,
                        "Could not parse report interval",
                        "Report interval must be between 1 and 86400 seconds",
                    )
                })
                .help("Seconds between progress reports"),
        )
        .arg(
            Arg::with_name(SNAPSHOT)
                .long(SNAPSHOT)
                .help("Also write the image at every progress report"),
        )
        .get_matches()
}

struct Settings {
    output: PathBuf,
    plane: PlaneMapper,
    palette: Palette,
    pool: PoolConfig,
    samples: Option<u64>,
    snapshot: bool,
}

// The validators have already run, so failures here are for values
// clap let through but we still cannot use.
fn settings(matches: &ArgMatches) -> Result<Settings, Error> {
    let value = |name: &str| matches.value_of(name).unwrap_or_default();
    let number = |name: &str| -> Result<u64, Error> {
        u64::from_str(value(name)).map_err(|_| format_err!("Could not parse {}", name))
    };
    let corner = |name: &str| {
        parse_complex(value(name)).ok_or_else(|| format_err!("Could not parse {}", name))
    };

    let plane = PlaneMapper::for_image(
        number(WIDTH)? as usize,
        number(HEIGHT)? as usize,
        corner(LEFTLOWER)?,
        corner(RIGHTUPPER)?,
    )?;

    Ok(Settings {
        output: PathBuf::from(value(OUTPUT)),
        plane,
        palette: Palette::from_str(value(COLOR))?,
        pool: PoolConfig {
            threads: match matches.value_of(THREADS) {
                Some(_) => number(THREADS)? as usize,
                None => num_cpus::get(),
            },
            interval: Duration::from_secs(number(INTERVAL)?),
        },
        samples: match matches.value_of(SAMPLES) {
            Some(_) => Some(number(SAMPLES)?),
            None => None,
        },
        snapshot: matches.is_present(SNAPSHOT),
    })
}

fn run(settings: Settings) -> Result<(), Error> {
    check_destination(&settings.output)?;

    let mut sampler = Sampler::new(settings.plane, settings.palette);
    if let Some(limit) = settings.samples {
        sampler = sampler.with_limit(limit);
    }

    let (stop, stopped) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = stop.try_send(());
    })?;

    info!(
        "Sampling {}x{} with palette {} ({} iterations)",
        sampler.density().plane().height(),
        sampler.density().plane().width(),
        settings.palette,
        settings.palette.max_iterations()
    );
    info!("Press control-c to terminate execution and render image.");

    let output = &settings.output;
    let snapshot = settings.snapshot;
    let reason = nebulabrot::pool::run(&sampler, settings.pool, &stopped, |sampler| {
        info!("{}", sampler.progress());
        if snapshot {
            write_image(output, &render(sampler.density()))?;
        }
        Ok(())
    })?;
    if reason == Stopped::Exhausted {
        info!("Sample limit reached");
    }

    info!("Total samples: {}", comma(sampler.samples()));
    info!("{}", sampler.progress());
    info!("Writing image file {}", output.display());
    write_image(output, &render(sampler.density()))?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let matches = args();
    let result = settings(&matches).and_then(run);
    if let Err(e) = result {
        error!("Render failure: {}", e);
        for cause in e.iter_causes() {
            error!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
