mod code;
mod config;
mod error;
mod fetch;
mod prompt;
mod render;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use config::CertificateTemplate;
use log::{error, info};
use rand::seq::IndexedRandom;
use render::Fonts;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_URL: &str =
    "https://raw.githubusercontent.com/certstamp/templates/main/config/config.json";
const LOCAL_CONFIG_PATH: &str = "config.json";
const HTTP_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("certstamp")
        .version("0.1.0")
        .about("Stamps recipient names and verification codes onto certificate templates")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Local configuration file, preferred over the remote config when present")
                .default_value(LOCAL_CONFIG_PATH),
        )
        .arg(
            Arg::new("config-url")
                .long("config-url")
                .value_name("URL")
                .help("Remote configuration URL, fetched when no local file exists")
                .default_value(DEFAULT_CONFIG_URL),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("verbose") {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config_path = matches.get_one::<String>("config").unwrap(); // Safe due to default
    let config_url = matches.get_one::<String>("config-url").unwrap();

    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")?;

    let config = config::load_config(Path::new(config_path), config_url, &client)
        .await
        .context("Failed to load configuration")?;

    if config.certificates.is_empty() {
        println!("The configuration lists no certificate templates.");
        return Ok(());
    }

    prompt::display_templates(&config);
    let template = prompt::select_template(&config)?;
    let names = prompt::read_names()?;

    if names.is_empty() {
        println!("No names to process.");
        return Ok(());
    }

    let fonts = render::load_fonts()?;

    // Batch mode skips a failed name and moves on; a single name aborts.
    let batch = names.len() > 1;
    for name in &names {
        match generate_one(&client, template, name, &fonts).await {
            Ok(output) => println!("✓ Certificate for {} saved as {}", name, output.display()),
            Err(e) if batch => error!("skipping {}: {:#}", name, e),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Produces one certificate: random template URL from the pool, fresh
/// download, fresh code, render. The temp template is removed when the fetch
/// guard drops, whether or not the render succeeded.
async fn generate_one(
    client: &Client,
    template: &CertificateTemplate,
    name: &str,
    fonts: &Fonts,
) -> Result<PathBuf> {
    let url = template
        .direct_links
        .choose(&mut rand::rng())
        .context("Template has no download links")?;
    info!("using template image {}", url);

    let temp = fetch::download_template(client, url).await?;
    let code = code::generate_code();
    let output = PathBuf::from(format!("{}.jpg", output_stem(name)));

    render::render_certificate(
        temp.path(),
        &output,
        name,
        &code,
        template.name_pos,
        template.code_pos,
        fonts,
    )?;

    Ok(output)
}

/// Output filename stem: the recipient name with spaces, periods and commas
/// stripped. Falls back to "out" when nothing is left.
fn output_stem(name: &str) -> String {
    let stem: String = name.chars().filter(|c| !matches!(c, ' ' | '.' | ',')).collect();
    if stem.is_empty() { "out".to_string() } else { stem }
}

// *************** Tests ***************
