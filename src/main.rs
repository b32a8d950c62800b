use clap::{Parser, Subcommand, ValueEnum};
use digipin_rs::{
    CsvDigipinConfig, DigipinCell, DigipinError, GeometryFormat, OutOfDomainPolicy, PrefixReport,
    csv_to_digipin_csv, default_regions, encode_digipin_to_level, load_regions,
    write_report_json,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "digipin", version, about = "Encode and decode DIGIPIN grid codes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a latitude/longitude pair
    Encode {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
        /// Number of symbols to produce (1-10)
        #[arg(long, default_value_t = 10)]
        level: u8,
    },
    /// Print the bounds and center of a full or partial code
    Decode { code: String },
    /// Compute the dominant leading prefix for each region
    Prefixes {
        /// JSON file of `{name, bbox}` regions; defaults to the built-in city table
        #[arg(long)]
        regions: Option<PathBuf>,
        #[arg(long, default_value = "green_prefixes.json")]
        output: PathBuf,
    },
    /// Add a DIGIPIN column to a CSV file with latitude/longitude columns
    Csv {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value = "latitude")]
        lat_column: String,
        #[arg(long, default_value = "longitude")]
        lon_column: String,
        /// Columns to leave out of the output
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
        /// Also write each cell's polygon
        #[arg(long, value_enum)]
        geometry: Option<GeometryArg>,
        /// Drop rows outside the domain instead of writing an empty code
        #[arg(long)]
        skip_out_of_domain: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GeometryArg {
    Wkt,
    Geojson,
}

impl From<GeometryArg> for GeometryFormat {
    fn from(arg: GeometryArg) -> Self {
        match arg {
            GeometryArg::Wkt => GeometryFormat::Wkt,
            GeometryArg::Geojson => GeometryFormat::GeoJson,
        }
    }
}

fn main() -> Result<(), DigipinError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Encode { lat, lon, level } => {
            println!("{}", encode_digipin_to_level(lat, lon, level)?);
        }
        Command::Decode { code } => {
            let cell = DigipinCell::from_code(&code)?;
            let center = cell.center();
            println!("Code: {}", cell.code);
            println!("Level: {}", cell.level);
            println!(
                "Bounds: lat {}..{}, lon {}..{}",
                cell.bounds.min_lat, cell.bounds.max_lat, cell.bounds.min_lon, cell.bounds.max_lon
            );
            println!("Center: ({}, {})", center.y(), center.x());
        }
        Command::Prefixes { regions, output } => {
            let regions = match regions {
                Some(path) => load_regions(path)?,
                None => default_regions(),
            };
            log::info!("Processing {} regions...", regions.len());

            let report = PrefixReport::build(&regions);
            write_report_json(&report, &output)?;
            log::info!("Saved to {}", output.display());
        }
        Command::Csv {
            input,
            output,
            lat_column,
            lon_column,
            exclude,
            geometry,
            skip_out_of_domain,
        } => {
            let mut config = CsvDigipinConfig::from_coords(lat_column, lon_column).exclude(exclude);
            if let Some(format) = geometry {
                config = config.with_cell_geometry(format.into());
            }
            if skip_out_of_domain {
                config = config.out_of_domain(OutOfDomainPolicy::Skip);
            }

            let summary = csv_to_digipin_csv(&input, &output, &config)?;
            log::info!(
                "Wrote {} rows to {} ({} of {} input rows out of domain)",
                summary.rows_written,
                output.display(),
                summary.rows_out_of_domain,
                summary.rows_read
            );
        }
    }

    Ok(())
}
