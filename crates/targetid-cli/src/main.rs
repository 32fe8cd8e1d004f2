//! Targeted identifier command-line driver.
//!
//! Runs the targeted identifier filter over one request described on the
//! command line (and optionally a TOML request file) and prints the result.
//!
//! # Usage
//!
//! ```bash
//! # Salt from the default environment variable, plain identifier
//! TARGETID_SECRET_SALT=... targetid --user-id user2@example.org
//!
//! # Qualified name identifier for a specific relying party
//! targetid --salt-file /etc/targetid/salt --config filter.toml \
//!     --attribute uid=student \
//!     --source-set saml20-idp-hosted --source-entity urn:example:idp \
//!     --destination-set saml20-sp-remote --destination-entity urn:example:sp
//! ```

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;
use targetid_filter::{
    EnvSalt, FileSalt, FilterConfig, PartyMetadata, Request, SaltSource, TargetedId,
    TargetedIdFilter, salt::DEFAULT_SALT_ENV,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Targeted identifier generator
#[derive(Parser, Debug)]
#[command(name = "targetid")]
#[command(about = "Derive pseudonymous per-relationship user identifiers")]
#[command(version)]
struct Args {
    /// Filter configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request description (TOML); command-line values override it
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Read the secret salt from this file
    #[arg(long, conflicts_with = "salt_env")]
    salt_file: Option<PathBuf>,

    /// Read the secret salt from this environment variable
    #[arg(long, default_value = DEFAULT_SALT_ENV)]
    salt_env: String,

    /// Authenticated user id (used when no identifying attribute is configured)
    #[arg(short, long)]
    user_id: Option<String>,

    /// User attribute as NAME=VALUE; repeat for more values
    #[arg(short, long = "attribute", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Metadata set of the issuing party
    #[arg(long)]
    source_set: Option<String>,

    /// Entity id of the issuing party
    #[arg(long)]
    source_entity: Option<String>,

    /// Metadata set of the relying party
    #[arg(long)]
    destination_set: Option<String>,

    /// Entity id of the relying party
    #[arg(long)]
    destination_entity: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{raw}'")),
    }
}

/// Merge command-line party fields over a party loaded from file.
fn merge_party(
    base: Option<PartyMetadata>,
    metadata_set: Option<String>,
    entity_id: Option<String>,
) -> Option<PartyMetadata> {
    if base.is_none() && metadata_set.is_none() && entity_id.is_none() {
        return None;
    }
    let mut party = base.unwrap_or_default();
    if metadata_set.is_some() {
        party.metadata_set = metadata_set;
    }
    if entity_id.is_some() {
        party.entity_id = entity_id;
    }
    Some(party)
}

fn build_request(args: &Args) -> Result<Request, Box<dyn std::error::Error>> {
    let mut request = match &args.request {
        Some(path) => Request::from_toml_str(&fs::read_to_string(path)?)?,
        None => Request::default(),
    };

    if let Some(user_id) = &args.user_id {
        request.user_id = Some(user_id.clone());
    }
    for (name, value) in &args.attributes {
        request.attributes.push(name.clone(), value.as_str());
    }
    request.source =
        merge_party(request.source, args.source_set.clone(), args.source_entity.clone());
    request.destination = merge_party(
        request.destination,
        args.destination_set.clone(),
        args.destination_entity.clone(),
    );

    Ok(request)
}

fn load_config(args: &Args) -> Result<FilterConfig, Box<dyn std::error::Error>> {
    match &args.config {
        Some(path) => Ok(FilterConfig::from_toml_str(&fs::read_to_string(path)?)?),
        None => Ok(FilterConfig::default()),
    }
}

fn salt_source(args: &Args) -> Box<dyn SaltSource> {
    match &args.salt_file {
        Some(path) => Box::new(FileSalt::new(path)),
        None => Box::new(EnvSalt::new(&args.salt_env)),
    }
}

fn write_result(out: &mut impl Write, result: &TargetedId) -> io::Result<()> {
    match result {
        TargetedId::Plain(id) => writeln!(out, "{id}"),
        TargetedId::Qualified(name_id) => {
            writeln!(out, "value: {}", name_id.value)?;
            writeln!(out, "format: {}", name_id.format)?;
            if let Some(qualifier) = &name_id.name_qualifier {
                writeln!(out, "name_qualifier: {qualifier}")?;
            }
            if let Some(qualifier) = &name_id.sp_name_qualifier {
                writeln!(out, "sp_name_qualifier: {qualifier}")?;
            }
            Ok(())
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let targeted_id = TargetedIdFilter::new(load_config(&args)?, salt_source(&args))?;
    let request = build_request(&args)?;
    tracing::info!(
        target_attribute = %targeted_id.config().target_attribute,
        name_id = targeted_id.config().name_id,
        "running targeted ID filter"
    );

    let result = targeted_id.compute(&request)?;

    write_result(&mut io::stdout().lock(), &result)?;

    Ok(())
}
