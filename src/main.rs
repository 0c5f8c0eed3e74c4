mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands, ForecastSource, Target};
use croprisk::config::Config;
use croprisk::datasources::{load_forecast, District, OpenMeteoClient};
use croprisk::logic::{RiskEngine, WeatherIndex};
use croprisk::model::ModelHandle;
use croprisk::models::{ForecastDay, Language, RiskAssessment};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init => {
            Config::setup_interactive(cli.config)?;
        }
        Commands::Regions { lang } => print_regions(lang),
        Commands::Check => run_check(Config::load(cli.config)?).await?,
        Commands::Assess {
            target,
            source,
            lang,
            json,
        } => {
            let config = Config::load(cli.config)?;
            let engine = RiskEngine::new(ModelHandle::load(config.model.artifact_path()));
            let days = resolve_forecast(&source, &config).await?;

            let assessment = engine.assess(&target.disease, &target.severity, &days);
            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print_assessment(&assessment, lang);
            }
        }
        Commands::Index {
            target,
            source,
            json,
        } => {
            let config = Config::load(cli.config)?;
            let days = resolve_forecast(&source, &config).await?;
            let index = RiskEngine::rules_only()
                .weather_index(&target.disease, &target.severity, &days)
                .with_context(|| format!("Cannot compute weather index for {}", target.disease))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&index)?);
            } else {
                print_index(&target, &index);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn resolve_forecast(
    source: &ForecastSource,
    config: &Config,
) -> anyhow::Result<Vec<ForecastDay>> {
    if let Some(path) = &source.forecast {
        return Ok(load_forecast(path)?);
    }

    let (lat, lon) = match (source.lat, source.lon, &source.district) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(name)) => District::resolve(name)?.centroid(),
        _ => match &config.location.default_district {
            Some(name) => District::resolve(name)?.centroid(),
            None => bail!(
                "No forecast source: pass --forecast, --district or --lat/--lon, \
                 or set location.default_district in config"
            ),
        },
    };

    let client = OpenMeteoClient::new(config.weather.clone())?;
    let days = client
        .fetch_forecast(lat, lon)
        .await
        .context("Failed to fetch weather forecast")?;
    Ok(days)
}

async fn run_check(config: Config) -> anyhow::Result<()> {
    println!("Config: OK");

    match config.model.artifact_path() {
        Some(path) => match ModelHandle::load(Some(path)) {
            ModelHandle::Available(model) => println!("Risk model: OK ({})", model.name()),
            ModelHandle::Unavailable { reason } => {
                println!("Risk model: UNAVAILABLE ({}) - rule-based scoring", reason)
            }
        },
        None => println!("Risk model: not configured - rule-based scoring"),
    }

    if !config.weather.enabled {
        println!("Open-Meteo: disabled");
        return Ok(());
    }
    let client = OpenMeteoClient::new(config.weather.clone())?;
    match client.test_connection().await {
        Ok(true) => println!("Open-Meteo: OK"),
        Ok(false) => println!("Open-Meteo: ERROR (unexpected response)"),
        Err(e) => println!("Open-Meteo: OFFLINE ({})", e),
    }

    Ok(())
}

fn print_regions(lang: Language) {
    for district in District::ALL {
        let (lat, lon) = district.centroid();
        println!(
            "{:<12} {:<12} {:>8.4} {:>9.4}  {} zone",
            district.key(),
            district.name().get(lang),
            lat,
            lon,
            district.zone()
        );
        println!("    {}", district.rainfall_note().get(lang));
        println!("    {}", district.extension_office().get(lang));
    }
}

fn print_assessment(a: &RiskAssessment, lang: Language) {
    let disease = a.disease.map(|d| d.as_str()).unwrap_or(a.disease_key.as_str());
    let severity = a.severity.map(|s| s.key()).unwrap_or("unspecified");

    println!("{} ({})", disease, severity);
    println!(
        "  Risk:       {} ({:.2}) - {}",
        a.risk_level,
        a.risk_score,
        a.risk_level.label().get(lang)
    );
    println!("  Alert:      {}", a.alert_color);
    println!("  Action:     {}", a.action.label().get(lang));
    println!("  Urgency:    {}", a.urgency.get(lang));
    println!("  Monitoring: {}", a.monitoring_frequency.get(lang));
    println!("  Scored by:  {}", a.model_used);

    if let Some(w) = &a.weather_summary {
        println!();
        println!(
            "  Weather ({} days): mean {:.1} °C ({:.1}–{:.1}), rain {:.1} mm, est. humidity {:.0}%",
            w.days,
            w.mean_temp_c,
            w.min_temp_c,
            w.max_temp_c,
            w.total_rain_mm,
            w.estimated_humidity_pct
        );
    }

    if !a.daily_risk.is_empty() {
        println!();
        for day in &a.daily_risk {
            println!(
                "  {}  {:>5.1} °C  {:>5.1} mm  {:>3.0}%  {:.3} {}",
                day.date,
                day.temp_mean_c,
                day.rain_mm,
                day.estimated_humidity_pct,
                day.day_risk,
                day.day_risk_level
            );
        }
    }

    println!();
    println!("  Why: {}", a.explanation.why_this_risk.get(lang));
    println!("  Outlook: {}", a.outlook.get(lang));
    let about = a.disease_explanation.get(lang);
    if !about.is_empty() {
        println!("  About: {}", about);
    }
}

fn print_index(target: &Target, index: &WeatherIndex) {
    println!(
        "{} ({}): {:.3} {}",
        target.disease, target.severity, index.risk_score, index.alert
    );
    println!("  {}", index.message.en);
    for day in &index.daily {
        println!(
            "  {}  temp {:.3}  rain {:.3}  risk {:.3}",
            day.date, day.temp_score, day.rain_score, day.risk
        );
    }
}
