use clap::{ArgGroup, Parser};
use coordseek::{
    ConfigFile, SearchConfig, SearchConfigBuilder, SearchOutcome, SeekError, Searcher,
    decode_escapes, init_logging,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Search a coordinate lattice for the string behind a SHA-256 digest.
#[derive(Parser, Debug)]
#[command(name = "coordseek", version, about)]
#[command(group(
    ArgGroup::new("box_region")
        .args(["lat_min", "lat_max", "lon_min", "lon_max"])
        .multiple(true)
        .conflicts_with("circle_region")
))]
#[command(group(
    ArgGroup::new("circle_region")
        .args(["center_lat", "center_lon", "radius"])
        .multiple(true)
))]
struct Cli {
    /// JSON config file; flags given on the command line override it
    #[arg(short, long, value_name = "FILE", env = "COORDSEEK_CONFIG")]
    config: Option<PathBuf>,

    /// Target SHA-256 digest as 64 hex characters
    #[arg(short, long, value_name = "HEX")]
    target: Option<String>,

    /// Box edges; the four box flags go together
    #[arg(long, allow_hyphen_values = true, requires_all = ["lat_max", "lon_min", "lon_max"])]
    lat_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["lat_min", "lon_min", "lon_max"])]
    lat_max: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["lat_min", "lat_max", "lon_max"])]
    lon_min: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["lat_min", "lat_max", "lon_min"])]
    lon_max: Option<f64>,

    /// Circle center latitude (use with --center-lon and --radius)
    #[arg(long, allow_hyphen_values = true, requires_all = ["center_lon", "radius"])]
    center_lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires_all = ["center_lat", "radius"])]
    center_lon: Option<f64>,
    /// Circle radius in meters
    #[arg(long, requires_all = ["center_lat", "center_lon"])]
    radius: Option<f64>,

    /// Fractional digits per coordinate
    #[arg(short, long)]
    precision: Option<u32>,

    /// Integer field width of each coordinate, sign included
    #[arg(long)]
    integer_digits: Option<usize>,

    /// Separator to try between latitude and longitude; repeatable, `\n` style escapes allowed
    #[arg(short, long = "separator", value_name = "SEP", allow_hyphen_values = true)]
    separators: Vec<String>,

    /// Worker threads; 1 runs the sequential search
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Only count the candidates the region produces, without hashing
    #[arg(long)]
    count: bool,

    #[arg(long, default_value = coordseek::util::default_log_level())]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Result<SearchConfig, SeekError> {
        let mut builder = match &self.config {
            Some(path) => ConfigFile::load(path)?.apply(SearchConfigBuilder::new()),
            None => SearchConfigBuilder::new(),
        };

        if let Some(target) = self.target {
            builder = builder.target_hex(target);
        }
        if let (Some(lat_min), Some(lat_max), Some(lon_min), Some(lon_max)) =
            (self.lat_min, self.lat_max, self.lon_min, self.lon_max)
        {
            builder = builder.bounding_box(lat_min, lat_max, lon_min, lon_max);
        }
        if let (Some(lat), Some(lon), Some(radius)) = (self.center_lat, self.center_lon, self.radius)
        {
            builder = builder.circle(lat, lon, radius);
        }
        if let Some(precision) = self.precision {
            builder = builder.precision(precision);
        }
        if let Some(digits) = self.integer_digits {
            builder = builder.integer_digits(digits);
        }
        if !self.separators.is_empty() {
            builder = builder.separators(self.separators.iter().map(|s| decode_escapes(s)));
        }
        if let Some(threads) = self.threads {
            builder = builder.threads(threads);
        }
        builder.build()
    }
}

fn run(cli: Cli) -> Result<ExitCode, SeekError> {
    let count_only = cli.count;
    let config = cli.into_config()?;
    let searcher = Searcher::new(config)?;

    if count_only {
        println!("{}", searcher.count_candidates()?);
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = match searcher.config().threads() {
        Some(1) => searcher.run()?,
        _ => searcher.run_parallel()?,
    };
    println!("{}", outcome);

    Ok(match outcome {
        SearchOutcome::Matched(_) => ExitCode::SUCCESS,
        SearchOutcome::Exhausted { .. } => ExitCode::from(1),
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coordseek::Region;
    use std::fs;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("coordseek").chain(args.iter().copied()))
    }

    #[test]
    fn test_partial_box_is_rejected() {
        for args in [
            &["--lat-max", "60.00002"][..],
            &["--lat-min", "60.0", "--lat-max", "60.1", "--lon-min", "24.4"][..],
            &["--lon-min", "24.4", "--lon-max", "24.5"][..],
        ] {
            let err = parse(args).map(|_| ()).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn test_partial_circle_is_rejected() {
        for args in [
            &["--center-lon", "24.94", "--radius", "5"][..],
            &["--center-lat", "60.17"][..],
            &["--radius", "5"][..],
        ] {
            let err = parse(args).map(|_| ()).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn test_box_and_circle_conflict() {
        let err = parse(&[
            "--lat-min", "60.0", "--lat-max", "60.1", "--lon-min", "24.4", "--lon-max", "24.5",
            "--center-lat", "60.17", "--center-lon", "24.94", "--radius", "5",
        ])
        .map(|_| ())
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_complete_groups_build_regions() -> Result<(), SeekError> {
        let cli = parse(&["--center-lat", "60.17", "--center-lon", "24.94", "--radius", "5"])
            .map_err(|e| SeekError::ConfigError(e.to_string()))?;
        let config = cli.into_config()?;
        assert!(matches!(config.region(), Region::Circle(c) if c.radius_m == 5.0));

        let cli = parse(&[
            "--lat-min", "-60.1", "--lat-max", "-60.0", "--lon-min", "24.4", "--lon-max", "24.5",
        ])
        .map_err(|e| SeekError::ConfigError(e.to_string()))?;
        let config = cli.into_config()?;
        assert!(matches!(config.region(), Region::Box(b) if b.lat_min == -60.1));
        Ok(())
    }

    #[test]
    fn test_flags_override_config_file() -> Result<(), SeekError> {
        let dir = tempdir().map_err(|e| SeekError::IoError(e.to_string()))?;
        let path = dir.path().join("search.json");
        fs::write(
            &path,
            r#"{
                "region": {"circle": {"center_lat": 60.17, "center_lon": 24.94, "radius_m": 250.0}},
                "precision": 4,
                "threads": 2
            }"#,
        )
        .map_err(|e| SeekError::IoError(e.to_string()))?;
        let config_arg = path.to_string_lossy().into_owned();

        let config = parse(&["--config", &config_arg])
            .map_err(|e| SeekError::ConfigError(e.to_string()))?
            .into_config()?;
        assert!(matches!(config.region(), Region::Circle(c) if c.radius_m == 250.0));
        assert_eq!(config.resolution().precision(), 4);
        assert_eq!(config.threads(), Some(2));

        let config = parse(&[
            "--config", &config_arg,
            "--lat-min", "60.0", "--lat-max", "60.1", "--lon-min", "24.4", "--lon-max", "24.5",
            "--precision", "5",
        ])
        .map_err(|e| SeekError::ConfigError(e.to_string()))?
        .into_config()?;
        assert!(matches!(config.region(), Region::Box(_)));
        assert_eq!(config.resolution().precision(), 5);
        assert_eq!(config.threads(), Some(2));
        Ok(())
    }
}
