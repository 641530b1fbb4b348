// ============================================
// File: crates/quicver-cli/src/main.rs
// ============================================
//! # quicver Entry Point
//!
//! ## Creation Reason
//! Command-line front end for inspecting QUIC version policy.
//!
//! ## Main Functionality
//! - CLI argument parsing with clap
//! - Logging initialization with tracing
//! - Configuration loading
//! - One handler per subcommand
//!
//! ## Usage
//! ```bash
//! quicver list --enabled --handshake tls
//! quicver parse "h3-29, Q050, 46"
//! quicver decode 0xff00001d
//! quicver caps T051
//! quicver negotiate --config /etc/quicver/quicver.toml
//! quicver validate --config /etc/quicver/quicver.toml
//! ```
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI implementation

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quicver_cli::{capabilities, exit_status, Inventory, MissingConfig, ToolConfig};
use quicver_common::CommonError;
use quicver_core::version::{
    format_label_list, label_to_handshake_protocol, label_to_transport_version,
    parse_version_label, parse_version_list, uses_4bit_connection_id_length, VersionLabel,
};
use quicver_core::{HandshakeProtocol, ParsedVersion};

const DEFAULT_CONFIG: &str = "/etc/quicver/quicver.toml";

// ============================================
// CLI Definition
// ============================================

/// QUIC version inspection tool
#[derive(Parser, Debug)]
#[command(name = "quicver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List supported versions
    List {
        /// Only versions whose toggle is on
        #[arg(long)]
        enabled: bool,

        /// Only versions using this handshake
        #[arg(long, value_enum)]
        handshake: Option<HandshakeArg>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Parse a comma-separated version list
    Parse {
        /// Text to parse, e.g. "h3-29,Q050"
        text: String,
    },

    /// Decode a wire label given in hex
    Decode {
        /// Label, e.g. 0xff00001d or 51303436
        label: String,
    },

    /// Show the capability table of one version
    Caps {
        /// Version in any accepted spelling
        version: String,
    },

    /// Show the label list of a Version Negotiation packet
    Negotiate,

    /// Validate configuration file
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HandshakeArg {
    Tls,
    QuicCrypto,
}

impl From<HandshakeArg> for HandshakeProtocol {
    fn from(arg: HandshakeArg) -> Self {
        match arg {
            HandshakeArg::Tls => Self::Tls13,
            HandshakeArg::QuicCrypto => Self::QuicCrypto,
        }
    }
}

// ============================================
// Main
// ============================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(exit_status(&e));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Validating a file that is not there must not report success
    let missing = if matches!(cli.command, Commands::Validate) {
        MissingConfig::Reject
    } else {
        MissingConfig::UseDefaults
    };

    let config = match ToolConfig::load_with(&cli.config, missing).await {
        Ok(config) => {
            init_logging(&config.logging.level);
            config
        }
        Err(e) => {
            init_logging("info");
            return Err(e.into());
        }
    };

    match cli.command {
        Commands::List { enabled, handshake, json } => {
            cmd_list(&config, enabled, handshake.map(Into::into), json)
        }
        Commands::Parse { text } => {
            cmd_parse(&text);
            Ok(())
        }
        Commands::Decode { label } => cmd_decode(&label),
        Commands::Caps { version } => cmd_caps(&version),
        Commands::Negotiate => {
            cmd_negotiate(&config);
            Ok(())
        }
        Commands::Validate => {
            cmd_validate(&config, &cli.config);
            Ok(())
        }
    }
}

// ============================================
// Commands
// ============================================

fn cmd_list(
    config: &ToolConfig,
    enabled_only: bool,
    handshake: Option<HandshakeProtocol>,
    json: bool,
) -> anyhow::Result<()> {
    let inventory = Inventory::from_config(config);
    let rows = inventory.summaries(enabled_only, handshake);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<8} {:<18} {:<28} {:<9} {:<8} {}",
        "NAME", "HANDSHAKE", "TRANSPORT", "LABEL", "ALPN", "ENABLED"
    );
    for row in rows {
        println!(
            "{:<8} {:<18} {:<28} {:<9} {:<8} {}",
            row.name,
            row.handshake,
            row.transport,
            row.label,
            row.alpn.as_deref().unwrap_or("-"),
            if row.enabled { "yes" } else { "no" },
        );
    }
    Ok(())
}

fn cmd_parse(text: &str) {
    let versions = parse_version_list(text);
    if versions.is_empty() {
        println!("⚠️  No supported version in input");
        return;
    }
    for version in versions {
        println!(
            "{:<8} {} / {}",
            version,
            version.handshake_protocol(),
            version.transport_version()
        );
    }
}

fn cmd_decode(text: &str) -> anyhow::Result<()> {
    let digits = text.trim().trim_start_matches("0x").trim_start_matches("0X");
    let bytes = hex::decode(digits).map_err(CommonError::from)?;
    let label = VersionLabel::from_wire_slice(&bytes)
        .with_context(|| format!("label must be 4 bytes, got {}", bytes.len()))?;

    let version = parse_version_label(label);
    println!("Label:       {label} ({:#010x})", label.value());
    println!("Version:     {version}");
    println!("Handshake:   {}", label_to_handshake_protocol(label));
    println!("Transport:   {}", label_to_transport_version(label));
    println!("Grease:      {}", label.is_grease());
    println!("4-bit CIDs:  {}", uses_4bit_connection_id_length(label));
    Ok(())
}

fn cmd_caps(text: &str) -> anyhow::Result<()> {
    let version: ParsedVersion = text.parse()?;
    println!("{version} ({} / {})", version.handshake_protocol(), version.transport_version());
    println!();
    for (name, value) in capabilities(version) {
        println!("   {name:<52} {value}");
    }
    Ok(())
}

fn cmd_negotiate(config: &ToolConfig) {
    let inventory = Inventory::from_config(config);
    let labels = inventory.negotiation_labels();
    let wire = inventory.negotiation_wire(&labels);

    println!("Labels:  {}", format_label_list(&labels, ", ", labels.len()));
    println!("Wire:    {}", hex::encode(&wire));
}

fn cmd_validate(config: &ToolConfig, path: &Path) {
    println!("✅ Configuration is valid ({})", path.display());
    println!();
    println!("Logging:");
    println!("   Level:      {}", config.logging.level);
    println!();

    let inventory = Inventory::from_config(config);
    println!("Versions:");
    for row in inventory.summaries(false, None) {
        println!("   {:<8} {}", row.name, if row.enabled { "enabled" } else { "disabled" });
    }
    let grease = if config.versions.grease_randomness { "random" } else { "fixed" };
    println!("   Grease:     {grease}");
    println!();

    let findings = inventory.sanity_check();
    if findings.is_empty() {
        println!("No problems found");
    } else {
        println!("⚠️  {} problem(s):", findings.len());
        for finding in findings {
            println!("   - {finding}");
        }
    }
}

// ============================================
// Helper Functions
// ============================================

/// Initializes the logging system.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .ok();
}
