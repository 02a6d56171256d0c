use std::path::PathBuf;
use std::process::exit;

use bgpkit_ixf::config::{ConfigOverrides, ShapeKind};
use bgpkit_ixf::io::to_json_pretty;
use bgpkit_ixf::{ConfigError, ExporterConfig, FileSource, IxfError, IxfExporter, StatusSource};
use clap::{Parser, ValueEnum};
use log::{error, info};

/// bgpkit-ixf exports BIRD BGP session state as an IX-F member list JSON document.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// TOML config file. Command line options override its values.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Directory the document is written to [default: /opt/bird_ixf]
    #[clap(short, long)]
    output_dir: Option<PathBuf>,

    /// File name of the document [default: ixf.json]
    #[clap(short, long)]
    filename: Option<String>,

    /// BIRD control socket, defaults to birdc's built-in path
    #[clap(short, long)]
    socket: Option<PathBuf>,

    /// Path to the birdc binary
    #[clap(long)]
    birdc: Option<PathBuf>,

    /// Seconds to wait for birdc, 0 waits forever [default: 30]
    #[clap(short, long)]
    timeout: Option<u64>,

    /// Output shape; nested requires an [exchange] section in the config file
    #[clap(long, value_enum)]
    shape: Option<Shape>,

    /// Read a captured `birdc show protocols all` dump instead of querying the daemon
    #[clap(long)]
    status_file: Option<PathBuf>,

    /// Print the document to stdout instead of writing it
    #[clap(long)]
    stdout: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Shape {
    Flat,
    Nested,
}

impl From<Shape> for ShapeKind {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Flat => ShapeKind::Flat,
            Shape::Nested => ShapeKind::Nested,
        }
    }
}

fn load_config(opts: &Opts) -> Result<ExporterConfig, ConfigError> {
    let mut config = match &opts.config {
        Some(path) => ExporterConfig::from_file(path)?,
        None => ExporterConfig::default(),
    };
    ConfigOverrides {
        output_dir: opts.output_dir.clone(),
        filename: opts.filename.clone(),
        socket: opts.socket.clone(),
        birdc: opts.birdc.clone(),
        timeout_secs: opts.timeout,
        shape: opts.shape.map(ShapeKind::from),
    }
    .apply(&mut config);
    Ok(config)
}

fn emit<S: StatusSource>(
    exporter: IxfExporter<S>,
    opts: &Opts,
    config: &ExporterConfig,
) -> Result<(), IxfError> {
    if opts.stdout {
        let snapshot = exporter.snapshot()?;
        println!("{}", to_json_pretty(&snapshot)?);
    } else {
        let path = config.output_path();
        exporter.export(&path)?;
        info!("IX-F JSON has been generated at {}", path.display());
    }
    Ok(())
}

fn run(opts: &Opts) -> Result<(), IxfError> {
    let config = load_config(opts)?;

    match &opts.status_file {
        Some(path) => {
            let exporter =
                IxfExporter::new(FileSource::new(path)).with_shape(config.output_shape()?);
            emit(exporter, opts, &config)
        }
        None => emit(IxfExporter::from_config(&config)?, opts, &config),
    }
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(&opts) {
        error!("{}", err);
        exit(err.exit_code());
    }
}
