use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use geocode_core::{
    Config, GeocodeRequest, OutputMode, ProviderId, lookup, provider::provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "geocode",
    version,
    about = "Geocode an Australian address with Bing Maps",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub lookup: LookupArgs,

    /// Log debug output to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider.
    Configure {
        /// Provider short name.
        #[arg(default_value = "bing")]
        provider: String,
    },
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Location to geocode; multiple words are joined with spaces.
    pub address: Vec<String>,

    /// Include the neighbourhood of the address.
    #[arg(short, long)]
    pub neighbourhood: bool,

    /// Maximum number of locations to return (1-20).
    #[arg(short, long, default_value_t = 5)]
    pub max: u32,

    /// Return an OpenStreetMap URL.
    #[arg(short, long)]
    pub url: bool,

    /// Return an OpenStreetMap URL.
    #[arg(short, long)]
    pub osm: bool,

    /// Return a Bing Maps URL.
    #[arg(short, long)]
    pub bing: bool,

    /// Return a Google Maps URL.
    #[arg(short, long)]
    pub google: bool,

    /// Bing Maps key; overrides the configured one.
    #[arg(long, env = "BING_MAPS_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl LookupArgs {
    /// OSM wins over Bing, which wins over Google, when several are given.
    pub fn output_mode(&self) -> OutputMode {
        if self.osm || self.url {
            OutputMode::OpenStreetMap
        } else if self.bing {
            OutputMode::Bing
        } else if self.google {
            OutputMode::Google
        } else {
            OutputMode::None
        }
    }

    pub fn request(&self) -> Result<GeocodeRequest, geocode_core::GeocodeError> {
        Ok(GeocodeRequest::new(self.address.join(" "))?
            .with_neighbourhood(self.neighbourhood)
            .with_max_results(self.max)
            .with_output_mode(self.output_mode()))
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure { provider }) => configure(&provider),
            None => show(self.lookup).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = inquire::Password::new(&format!("{id} API key:"))
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save()?;

    println!("Saved {id} key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(args: LookupArgs) -> anyhow::Result<()> {
    let request = args.request()?;

    let mut config = Config::load()?;
    if let Some(key) = &args.key {
        config.upsert_provider_api_key(ProviderId::Bing, key.clone());
    }

    let provider = provider_from_config(ProviderId::Bing, &config)?;
    let lines = lookup(provider.as_ref(), &request).await?;

    println!("{}", lines.join("\n"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("geocode").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn address_words_are_joined() {
        let cli = parse(&["Sydney", "Opera", "House"]);
        let req = cli.lookup.request().unwrap();
        assert_eq!(req.address, "Sydney Opera House");
        assert_eq!(req.max_results, 5);
        assert!(!req.include_neighbourhood);
        assert_eq!(req.output_mode, OutputMode::None);
    }

    #[test]
    fn short_flags() {
        let cli = parse(&["-n", "-m", "3", "-g", "Parliament", "House"]);
        let req = cli.lookup.request().unwrap();
        assert!(req.include_neighbourhood);
        assert_eq!(req.max_results, 3);
        assert_eq!(req.output_mode, OutputMode::Google);
    }

    #[test]
    fn osm_takes_precedence() {
        assert_eq!(parse(&["-u", "-g", "x"]).lookup.output_mode(), OutputMode::OpenStreetMap);
        assert_eq!(parse(&["-o", "-b", "x"]).lookup.output_mode(), OutputMode::OpenStreetMap);
        assert_eq!(parse(&["-b", "-g", "x"]).lookup.output_mode(), OutputMode::Bing);
    }

    #[test]
    fn missing_address_is_rejected() {
        let cli = parse(&["-g"]);
        assert!(cli.lookup.request().is_err());
    }

    #[test]
    fn configure_defaults_to_bing() {
        match parse(&["configure"]).command {
            Some(Command::Configure { provider }) => assert_eq!(provider, "bing"),
            other => panic!("expected configure, got {other:?}"),
        }
    }
}
