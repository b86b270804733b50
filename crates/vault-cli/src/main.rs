//! keyvault - interactive shell for the API key vault
//!
//! Thin wrapper around vault-core: prompts for the master password once per
//! session, lets the user pick a backend, then loops over store/retrieve.
//! All messaging and re-prompting lives here; the core only returns typed
//! outcomes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dialoguer::{theme::ColorfulTheme, Input, Password, Select};
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

use vault_core::{BackendConfig, KdfParams, Vault, VaultError};

#[derive(Parser)]
#[command(name = "keyvault", about = "Encrypted API key storage", version)]
struct Cli {
    /// Storage backend; prompted interactively when omitted
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Override the data file / database path
    #[arg(long)]
    path: Option<PathBuf>,

    /// Key-derivation work factor. `fast` is for demos only.
    #[arg(long, value_enum, default_value_t = KdfPreset::Default)]
    kdf_preset: KdfPreset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    /// In-memory; data is lost on exit
    Memory,
    /// JSON file
    File,
    /// Embedded SQLite database
    Sqlite,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KdfPreset {
    Default,
    Fast,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let theme = ColorfulTheme::default();

    let backend = match cli.backend {
        Some(backend) => backend,
        None => prompt_backend(&theme)?,
    };
    let config = backend_config(backend, cli.path)?;

    let master_password: String = Password::with_theme(&theme)
        .with_prompt("Master password")
        .interact()?;

    let kdf = match cli.kdf_preset {
        KdfPreset::Default => KdfParams::default(),
        KdfPreset::Fast => KdfParams::fast(),
    };
    let mut vault = Vault::open(config)
        .context("failed to open storage backend")?
        .with_kdf_params(kdf);

    println!("Using {}.", vault.backend_name());
    if matches!(backend, BackendArg::Memory) {
        println!("Data will be lost on exit.");
    }

    loop {
        let action = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&["Store a new API key", "Retrieve an API key", "Quit"])
            .default(0)
            .interact()?;

        match action {
            0 => store(&theme, &mut vault, &master_password)?,
            1 => retrieve(&theme, &vault, &master_password)?,
            _ => break,
        }
    }

    Ok(())
}

fn prompt_backend(theme: &ColorfulTheme) -> Result<BackendArg> {
    let choice = Select::with_theme(theme)
        .with_prompt("Choose a storage method")
        .items(&[
            "In-Memory (data is lost on exit)",
            "File (data is saved to credentials.json)",
            "Database (data is saved to credentials.db)",
        ])
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => BackendArg::Memory,
        1 => BackendArg::File,
        _ => BackendArg::Sqlite,
    })
}

fn backend_config(backend: BackendArg, path: Option<PathBuf>) -> Result<BackendConfig> {
    Ok(match backend {
        BackendArg::Memory => BackendConfig::Memory,
        BackendArg::File => BackendConfig::JsonFile(resolve_path(path, "credentials.json")?),
        BackendArg::Sqlite => BackendConfig::Sqlite(resolve_path(path, "credentials.db")?),
    })
}

/// Explicit path wins; otherwise the platform data directory
fn resolve_path(path: Option<PathBuf>, filename: &str) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }

    let dirs = ProjectDirs::from("com", "symbia-labs", "keyvault")
        .context("could not determine data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("could not create {}", data_dir.display()))?;

    Ok(data_dir.join(filename))
}

fn store(theme: &ColorfulTheme, vault: &mut Vault, master_password: &str) -> Result<()> {
    let service: String = Input::with_theme(theme)
        .with_prompt("Service name (e.g. 'OpenAI')")
        .interact_text()?;
    let api_key: String = Password::with_theme(theme)
        .with_prompt(format!("API key for {}", service))
        .interact()?;

    match vault.store_secret(&service, &api_key, master_password) {
        Ok(()) => println!("Stored credentials for '{}'.", service),
        Err(e) => eprintln!("Could not store credentials: {}", e),
    }
    Ok(())
}

fn retrieve(theme: &ColorfulTheme, vault: &Vault, master_password: &str) -> Result<()> {
    let service: String = Input::with_theme(theme)
        .with_prompt("Service name to retrieve")
        .interact_text()?;

    match vault.retrieve_secret(&service, master_password) {
        Ok(Some(secret)) => println!("API key for '{}': {}", service, secret.expose()),
        Ok(None) => println!("No credentials found for '{}'.", service),
        Err(VaultError::AuthenticationFailure) => {
            eprintln!("Decryption failed: wrong master password or corrupted record.")
        }
        Err(e) => eprintln!("Could not retrieve credentials: {}", e),
    }
    Ok(())
}
