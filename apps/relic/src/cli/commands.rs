//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every mutating command follows the same shape: load the snapshot,
//! apply the operation through the registry, write the snapshot back.
//! A failed operation never reaches the write step, so the file on disk
//! always holds a state the registry itself produced.

use crate::api;
use relic_core::{
    AccountId, Clock, EvolutionStage, MetadataDocument, Registry, RegistryError, TokenId,
    power_boost, registry_from_bytes, registry_to_bytes, snapshot_checksum,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum snapshot file size (100 MB).
///
/// This prevents memory exhaustion from malicious or accidental large files.
const MAX_SNAPSHOT_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), RegistryError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RegistryError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(RegistryError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate file path for security.
///
/// This function:
/// 1. Canonicalizes the path to resolve symlinks and ".."
/// 2. Ensures the path exists
/// 3. Ensures the path is a file (not a directory)
fn validate_file_path(path: &Path) -> Result<PathBuf, RegistryError> {
    // Canonicalize resolves "..", symlinks, and validates existence
    let canonical = path.canonicalize().map_err(|e| {
        RegistryError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    // Ensure it's a file, not a directory
    if !canonical.is_file() {
        return Err(RegistryError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate output path for security.
///
/// For output files, we validate the parent directory exists and is writable.
fn validate_output_path(path: &Path) -> Result<PathBuf, RegistryError> {
    let parent = path.parent().unwrap_or(Path::new("."));

    // Canonicalize parent to resolve ".." and symlinks
    let canonical_parent = parent.canonicalize().map_err(|e| {
        RegistryError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(RegistryError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| RegistryError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Optional server settings loaded from a TOML file.
#[derive(Debug, Deserialize)]
struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

fn load_server_config(path: &Path) -> Result<ServerConfig, RegistryError> {
    let validated = validate_file_path(path)?;
    let contents = std::fs::read_to_string(&validated)
        .map_err(|e| RegistryError::IoError(format!("Read config: {}", e)))?;
    toml::from_str(&contents)
        .map_err(|e| RegistryError::SerializationError(format!("Parse config: {}", e)))
}

/// Start the HTTP server.
pub async fn cmd_server(
    db_path: &Path,
    host: &str,
    port: u16,
    config: Option<&Path>,
) -> Result<(), RegistryError> {
    let registry = load_registry(db_path)?;

    let (host, port) = match config {
        Some(path) => {
            let cfg = load_server_config(path)?;
            (
                cfg.host.unwrap_or_else(|| host.to_string()),
                cfg.port.unwrap_or(port),
            )
        }
        None => (host.to_string(), port),
    };

    println!("Relic Token Registry Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Snapshot: {:?}", db_path);
    println!("  Admin:    {}", registry.admin().0);
    println!();
    println!("Endpoints:");
    println!("  GET  /health     - Health check");
    println!("  GET  /status     - Registry status");
    println!("  GET  /token/{{id}} - Token state and metadata URI");
    println!("  POST /mint       - Mint tokens (admin)");
    println!("  POST /stake      - Stake a token (owner)");
    println!("  POST /unstake    - Unstake a token (owner)");
    println!("  POST /level-up   - Level up a staked token (owner)");
    println!("  POST /transfer   - Transfer an unstaked token");
    println!("  POST /base-uri   - Change the metadata base URI (admin)");
    println!("  POST /export     - Export the registry snapshot");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, registry).await
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new registry snapshot with the caller as admin.
pub fn cmd_init(db_path: &Path, admin: AccountId, force: bool) -> Result<(), RegistryError> {
    if db_path.exists() && !force {
        return Err(RegistryError::IoError(
            "Snapshot already exists. Use --force to overwrite.".to_string(),
        ));
    }

    let registry = Registry::new(admin);
    save_registry(&registry, db_path)?;

    println!(
        "Initialized new registry at {:?} (admin: account {})",
        db_path, admin.0
    );

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show registry status.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), RegistryError> {
    let registry = load_registry(db_path)?;
    let staked_count = registry
        .store()
        .iter()
        .filter(|(_, state)| state.staked)
        .count();

    if json_mode {
        let output = serde_json::json!({
            "snapshot": db_path.to_string_lossy(),
            "admin": registry.admin().0,
            "total_supply": registry.total_supply(),
            "staked_count": staked_count,
            "base_uri": registry.base_uri(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Relic Registry Status");
    println!("=====================");
    println!("Snapshot: {:?}", db_path);
    println!();
    println!("Admin:        {}", registry.admin().0);
    println!("Total Supply: {}", registry.total_supply());
    println!("Staked:       {}", staked_count);
    println!("Base URI:     {}", registry.base_uri());

    Ok(())
}

// =============================================================================
// MUTATION COMMANDS
// =============================================================================

/// Mint tokens to an account (admin only).
pub fn cmd_mint(
    db_path: &Path,
    caller: AccountId,
    to: AccountId,
    quantity: u64,
) -> Result<(), RegistryError> {
    let mut registry = load_registry(db_path)?;
    let ids = registry.mint(caller, to, quantity)?;
    save_registry(&registry, db_path)?;

    let id_list: Vec<u64> = ids.iter().map(|id| id.0).collect();
    println!("Minted {} token(s) to account {}: {:?}", ids.len(), to.0, id_list);

    Ok(())
}

/// Stake a token (owner only).
pub fn cmd_stake(db_path: &Path, caller: AccountId, token: TokenId) -> Result<(), RegistryError> {
    let mut registry = load_registry(db_path)?;
    registry.stake(caller, token)?;
    save_registry(&registry, db_path)?;

    let wait = registry.time_until_next_level_up(token)?;
    println!("Staked token {}. Level-up eligible in {} seconds.", token.0, wait);

    Ok(())
}

/// Unstake a token (owner only).
pub fn cmd_unstake(db_path: &Path, caller: AccountId, token: TokenId) -> Result<(), RegistryError> {
    let mut registry = load_registry(db_path)?;
    registry.unstake(caller, token)?;
    save_registry(&registry, db_path)?;

    println!("Unstaked token {}.", token.0);

    Ok(())
}

/// Level up a staked token (owner only).
pub fn cmd_level_up(
    db_path: &Path,
    caller: AccountId,
    token: TokenId,
) -> Result<(), RegistryError> {
    let mut registry = load_registry(db_path)?;
    registry.level_up(caller, token)?;
    save_registry(&registry, db_path)?;

    let level = registry.get_level(token)?;
    println!("Token {} is now level {}.", token.0, level);

    Ok(())
}

/// Change the metadata base URI (admin only).
pub fn cmd_set_base_uri(db_path: &Path, caller: AccountId, base: &str) -> Result<(), RegistryError> {
    let mut registry = load_registry(db_path)?;
    registry.set_base_uri(caller, base)?;
    save_registry(&registry, db_path)?;

    println!("Base URI set to {}", base);

    Ok(())
}

/// Transfer a token between accounts.
pub fn cmd_transfer(
    db_path: &Path,
    caller: AccountId,
    from: AccountId,
    to: AccountId,
    token: TokenId,
) -> Result<(), RegistryError> {
    let mut registry = load_registry(db_path)?;
    registry.transfer(caller, from, to, token)?;
    save_registry(&registry, db_path)?;

    println!("Transferred token {} from account {} to account {}.", token.0, from.0, to.0);

    Ok(())
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// Show full state of a token.
pub fn cmd_info(db_path: &Path, token: TokenId, json_mode: bool) -> Result<(), RegistryError> {
    let registry = load_registry(db_path)?;

    let level = registry.get_level(token)?;
    let staked = registry.is_staked(token)?;
    let owner = registry.owner_of(token)?;
    let wait = registry.time_until_next_level_up(token)?;
    let uri = registry.token_uri(token)?;
    let stage = EvolutionStage::from_level(level);

    if json_mode {
        let output = serde_json::json!({
            "token_id": token.0,
            "owner": owner.0,
            "level": level,
            "stage": stage.name(),
            "power_boost": power_boost(level),
            "staked": staked,
            "seconds_until_level_up": wait,
            "uri": uri,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Token {}", token.0);
    println!("========");
    println!("Owner:       {}", owner.0);
    println!("Level:       {}", level);
    println!("Stage:       {}", stage.name());
    println!("Power Boost: {}%", power_boost(level));
    println!("Staked:      {}", staked);
    println!("Next Level:  {} seconds", wait);
    println!("URI:         {}", uri);

    Ok(())
}

/// Print the metadata URI of a token.
pub fn cmd_uri(db_path: &Path, token: TokenId) -> Result<(), RegistryError> {
    let registry = load_registry(db_path)?;
    println!("{}", registry.token_uri(token)?);
    Ok(())
}

// =============================================================================
// METADATA GENERATION
// =============================================================================

/// Write metadata JSON documents for every token at every level.
///
/// The output directory gets one `{id}_{level}.json` per token per level,
/// so URIs resolve for any level a token can ever reach.
pub fn cmd_generate_metadata(
    db_path: &Path,
    output: &Path,
    image_base: &str,
) -> Result<(), RegistryError> {
    let registry = load_registry(db_path)?;

    std::fs::create_dir_all(output)
        .map_err(|e| RegistryError::IoError(format!("Create output directory: {}", e)))?;

    let mut written = 0usize;
    for (id, _) in registry.store().iter() {
        for (level, document) in MetadataDocument::all_levels(id, image_base) {
            let json = serde_json::to_string_pretty(&document)
                .map_err(|e| RegistryError::SerializationError(e.to_string()))?;
            let path = output.join(format!("{}_{}.json", id.0, level));
            std::fs::write(&path, json)
                .map_err(|e| RegistryError::IoError(format!("Write {:?}: {}", path, e)))?;
            written = written.saturating_add(1);
        }
    }

    println!(
        "Wrote {} metadata documents for {} token(s) to {:?}",
        written,
        registry.total_supply(),
        output
    );

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Export the registry snapshot to a file.
pub fn cmd_export(db_path: &Path, output: &Path) -> Result<(), RegistryError> {
    let validated_output = validate_output_path(output)?;

    let registry = load_registry(db_path)?;
    let data = registry_to_bytes(&registry)?;
    let checksum = snapshot_checksum(&data);

    std::fs::write(&validated_output, &data)
        .map_err(|e| RegistryError::IoError(format!("Write file: {}", e)))?;

    println!("Exported {} bytes to {:?}", data.len(), validated_output);
    println!("Checksum: {}", checksum);

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load a registry from a snapshot file.
pub fn load_registry(db_path: &Path) -> Result<Registry, RegistryError> {
    if !db_path.exists() {
        return Err(RegistryError::IoError(format!(
            "Snapshot {:?} not found. Run `relic init` first.",
            db_path
        )));
    }

    let validated = validate_file_path(db_path)?;
    validate_file_size(&validated, MAX_SNAPSHOT_FILE_SIZE)?;

    let data = std::fs::read(&validated)
        .map_err(|e| RegistryError::IoError(format!("Read snapshot: {}", e)))?;

    registry_from_bytes(&data, Clock::System)
}

/// Save a registry to a snapshot file.
pub fn save_registry(registry: &Registry, db_path: &Path) -> Result<(), RegistryError> {
    let data = registry_to_bytes(registry)?;
    std::fs::write(db_path, &data)
        .map_err(|e| RegistryError::IoError(format!("Write snapshot: {}", e)))?;
    Ok(())
}
