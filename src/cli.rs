use clap::{Args, Parser, Subcommand};
use croprisk::models::Language;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "croprisk",
    version,
    about = "Weather-driven crop disease risk assessment"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assess disease risk over the forecast window
    Assess {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        source: ForecastSource,

        /// Language for advisory text (en, si)
        #[arg(long, default_value = "en", value_parser = parse_language)]
        lang: Language,

        /// Print the full assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Continuous weather index with per-day scores
    Index {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        source: ForecastSource,

        /// Print the index as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate config, load the risk model and test the weather service
    Check,
    /// Run interactive setup
    Init,
    /// List supported districts
    Regions {
        #[arg(long, default_value = "en", value_parser = parse_language)]
        lang: Language,
    },
}

#[derive(Args)]
pub struct Target {
    /// Disease name (anthracnose, mosaic, mites, leaf_curl)
    #[arg(short, long)]
    pub disease: String,

    /// Current severity (mild, moderate, severe)
    #[arg(short, long, default_value = "moderate")]
    pub severity: String,
}

/// Where forecast days come from. Without any of these, the configured
/// default district is used.
#[derive(Args)]
pub struct ForecastSource {
    /// JSON file with an array of forecast days
    #[arg(short, long, conflicts_with_all = ["district", "lat", "lon"])]
    pub forecast: Option<PathBuf>,

    /// District name to fetch a forecast for
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub district: Option<String>,

    /// Latitude to fetch a forecast for
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to fetch a forecast for
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

fn parse_language(s: &str) -> Result<Language, String> {
    Language::from_str(s).ok_or_else(|| format!("unsupported language '{}' (use en or si)", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_assess_with_coordinates() {
        let cli = Cli::try_parse_from([
            "croprisk", "assess", "-d", "mites", "--lat", "6.05", "--lon", "80.22", "--lang", "si",
        ])
        .unwrap();
        match cli.command {
            Commands::Assess {
                target,
                source,
                lang,
                json,
            } => {
                assert_eq!(target.disease, "mites");
                assert_eq!(target.severity, "moderate");
                assert_eq!(source.lat, Some(6.05));
                assert_eq!(lang, Language::Si);
                assert!(!json);
            }
            _ => panic!("expected assess"),
        }
    }

    #[test]
    fn forecast_file_conflicts_with_district() {
        let result = Cli::try_parse_from([
            "croprisk", "index", "-d", "mosaic", "-f", "week.json", "--district", "galle",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn latitude_requires_longitude() {
        assert!(Cli::try_parse_from(["croprisk", "assess", "-d", "mites", "--lat", "6.0"]).is_err());
    }
}
