//! `pointsprite [PATH] [--options FILE]`
//!
//! Opens a window showing the cloud at `PATH` (`.pcd`, `.xyz`, or `.txt`),
//! or a random demo cloud when no path is given.

use std::path::PathBuf;

use pointsprite::{Options, PointCloud, Viewer};

/// Points in the demo cloud.
const DEMO_POINTS: usize = 20_000;
const DEMO_SEED: u64 = 0x5EED;

struct Args {
    path: Option<PathBuf>,
    options: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        path: None,
        options: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--options" => {
                let file = iter
                    .next()
                    .ok_or_else(|| "--options needs a file".to_owned())?;
                args.options = Some(PathBuf::from(file));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {flag}"));
            }
            _ if args.path.is_some() => {
                return Err(format!("unexpected argument {arg}"));
            }
            _ => args.path = Some(PathBuf::from(&arg)),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: pointsprite [PATH] [--options FILE]");
            std::process::exit(2);
        }
    };

    let options = match args.options.as_deref().map(Options::load) {
        Some(Ok(options)) => options,
        Some(Err(e)) => {
            log::error!("{e}");
            std::process::exit(1);
        }
        None => Options::default(),
    };

    let mut builder = Viewer::builder().with_options(options);
    builder = match args.path {
        Some(path) => builder.with_path(path),
        None => {
            log::info!("no cloud given, showing {DEMO_POINTS} random points");
            builder.with_points(PointCloud::random_cube(DEMO_POINTS, DEMO_SEED))
        }
    };

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
