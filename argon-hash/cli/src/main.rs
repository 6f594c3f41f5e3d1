//! CLI for hashing passwords with Argon2.
//!
//! ## Usage
//!
//! ```bash
//! # Hash with an explicit salt (hex output)
//! ah "correct horse" --salt "battery staple 16B"
//!
//! # Fresh random salt, printed to stderr
//! ah "correct horse" --random-salt
//!
//! # Password from stdin, base64 output
//! echo "correct horse" | ah - --salt "battery staple 16B" --encoding base64
//!
//! # Generate shell completions
//! source <(COMPLETE=bash ah)
//! ```

use std::ffi::OsString;
use std::io::{self, Read, Write};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

use argon_hash::{
    CostDefaults, DEFAULT_SALT_LENGTH, Encoded, HashCandidate, Input, WipeFlags, generate_salt,
    hash, to_hex,
};

/// Hash a password with Argon2 (d, i or id)
#[derive(Parser)]
#[command(name = "ah", version, about, long_about = None)]
#[command(after_help = AFTER_HELP, allow_negative_numbers = true)]
struct Cli {
    /// Password to hash ("-" reads it from stdin)
    #[arg(value_name = "PASSWORD")]
    password: OsString,

    /// Salt to hash with (at least 8 bytes)
    #[arg(short, long, value_name = "SALT", required_unless_present = "random_salt")]
    salt: Option<OsString>,

    /// Generate a random 16 byte salt and print it to stderr in hex
    #[arg(long, conflicts_with = "salt")]
    random_salt: bool,

    /// Secret key (pepper) mixed into the hash
    #[arg(long, value_name = "SECRET")]
    pepper: Option<OsString>,

    /// Associated data bound into the hash (at most 32 bytes)
    #[arg(long, value_name = "DATA")]
    associated_data: Option<OsString>,

    /// Digest length in bytes
    #[arg(long, value_name = "BYTES")]
    hash_len: Option<i64>,

    /// Number of passes
    #[arg(short, long, value_name = "PASSES")]
    time_cost: Option<i64>,

    /// Memory cost in KiB
    #[arg(short, long, value_name = "KIB")]
    memory_cost: Option<i64>,

    /// Number of lanes
    #[arg(short, long, value_name = "LANES")]
    parallelism: Option<i64>,

    /// Argon2 variant: d, i or id
    #[arg(long, value_name = "VARIANT", default_value = "id")]
    variant: String,

    /// Argon2 version: 0x10 or 0x13 (decimal also accepted)
    #[arg(long, value_name = "VERSION", value_parser = parse_version)]
    argon_version: Option<u32>,

    /// Output encoding: hex, base64 or raw
    #[arg(short, long, value_name = "ENCODING", default_value = "hex")]
    encoding: String,

    /// Do not wipe the password buffer after hashing
    #[arg(long)]
    keep_password: bool,

    /// Do not wipe the secret buffer after hashing
    #[arg(long)]
    keep_secret: bool,

    /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

const AFTER_HELP: &str = "\
ENVIRONMENT:
  ARGON_HASH_HASH_LENGTH, ARGON_HASH_TIME_COST, ARGON_HASH_MEMORY_COST and
  ARGON_HASH_PARALLELISM override the built-in cost defaults. Flags win
  over the environment.

SHELL COMPLETIONS:
  Enable tab completions by adding one line to your shell config:

  Bash (~/.bashrc):
    source <(COMPLETE=bash ah)

  Zsh (~/.zshrc):
    source <(COMPLETE=zsh ah)

  Fish (~/.config/fish/config.fish):
    COMPLETE=fish ah | source

EXAMPLES:
  ah \"secret\" --salt \"somesalt\"              # Argon2id, hex digest
  ah \"secret\" --random-salt -e base64         # random salt, base64 digest
  ah \"secret\" -s \"somesalt\" --variant i -t 3  # Argon2i with 3 passes
  echo \"secret\" | ah - -s \"somesalt\"          # password from stdin
";

/// Parses a version given as `0x13` style hex or plain decimal.
fn parse_version(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid version '{s}': {e}"))
}

/// Initialize tracing subscriber based on verbosity level.
///
/// Verbosity levels:
/// - 0 (default): no subscriber
/// - 1 (-v): INFO
/// - 2 (-vv): DEBUG (validation, dispatch and wipe reports)
/// - 3 (-vvv): TRACE
/// - 4+ (-vvvv): TRACE with file/line numbers
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,ah=info,argon_hash=info".to_string(),
            2 => "warn,ah=debug,argon_hash=debug".to_string(),
            _ => "debug,ah=trace,argon_hash=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    // Check for shell completion generation before parsing args
    if let Ok(shell_name) = std::env::var("COMPLETE") {
        return generate_completions(&shell_name);
    }

    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let defaults = CostDefaults::from_env().wrap_err("invalid cost configuration")?;
    let candidate = build_candidate(&cli, defaults)?;

    info!(variant = %cli.variant, encoding = %cli.encoding, "hashing password");
    let encoded = hash(candidate).wrap_err("failed to hash password")?;

    let mut stdout = io::stdout().lock();
    match encoded {
        Encoded::Raw(bytes) => stdout.write_all(&bytes)?,
        Encoded::Hex(text) | Encoded::Base64(text) => writeln!(stdout, "{text}")?,
    }
    stdout.flush()?;

    Ok(())
}

/// Turns parsed arguments into a candidate. Flags override `defaults`.
fn build_candidate(cli: &Cli, defaults: CostDefaults) -> Result<HashCandidate> {
    let password = if cli.password == "-" {
        Input::Bytes(read_from_stdin()?)
    } else {
        Input::OsText(cli.password.clone())
    };

    let salt = match &cli.salt {
        Some(salt) => Input::OsText(salt.clone()),
        None => {
            let salt = generate_salt(DEFAULT_SALT_LENGTH);
            eprintln!("salt: {}", to_hex(&salt));
            Input::Bytes(salt)
        }
    };

    let mut candidate = defaults
        .apply(HashCandidate::new(password, salt))
        .with_variant(cli.variant.as_str())
        .with_encoding(cli.encoding.as_str());

    if let Some(pepper) = &cli.pepper {
        candidate = candidate.with_secret(pepper.clone());
    }
    if let Some(data) = &cli.associated_data {
        candidate = candidate.with_associated_data(data.clone());
    }
    if let Some(hash_len) = cli.hash_len {
        candidate = candidate.with_hash_length(hash_len);
    }
    if let Some(time_cost) = cli.time_cost {
        candidate = candidate.with_time_cost(time_cost);
    }
    if let Some(memory_cost) = cli.memory_cost {
        candidate = candidate.with_memory_cost(memory_cost);
    }
    if let Some(parallelism) = cli.parallelism {
        candidate = candidate.with_parallelism(parallelism);
    }
    if let Some(version) = cli.argon_version {
        candidate = candidate.with_version(version);
    }

    let mut wipe = WipeFlags::default();
    if cli.keep_password {
        wipe.remove(WipeFlags::CLEAR_PASSWORD);
    }
    if cli.keep_secret {
        wipe.remove(WipeFlags::CLEAR_SECRET);
    }

    Ok(candidate.with_wipe(wipe))
}

/// Longest password accepted on stdin, in bytes.
const MAX_STDIN_PASSWORD: usize = 4096;

/// Reads the password from stdin, dropping one trailing line ending.
fn read_from_stdin() -> Result<Vec<u8>> {
    read_password(io::stdin().lock())
}

/// Reads a password from `reader` into a buffer sized up front, so it never
/// reallocates and leaves copies behind. The buffer is zeroed on error.
fn read_password(reader: impl Read) -> Result<Vec<u8>> {
    let mut password = Zeroizing::new(Vec::with_capacity(MAX_STDIN_PASSWORD + 2));
    reader
        .take(MAX_STDIN_PASSWORD as u64 + 1)
        .read_to_end(&mut password)
        .wrap_err("failed to read password from stdin")?;

    if password.len() > MAX_STDIN_PASSWORD {
        return Err(eyre!("password on stdin is longer than {MAX_STDIN_PASSWORD} bytes"));
    }

    if password.ends_with(b"\n") {
        password.pop();
        if password.ends_with(b"\r") {
            password.pop();
        }
    }

    if password.is_empty() {
        return Err(eyre!("empty password on stdin"));
    }

    Ok(std::mem::take(&mut *password))
}

/// Writes completions for `shell_name` to stdout.
fn generate_completions(shell_name: &str) -> Result<()> {
    let shell = match shell_name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => {
            return Err(eyre!(
                "unknown shell: {shell_name}. Supported: bash, zsh, fish, powershell, elvish"
            ));
        }
    };

    clap_complete::generate(shell, &mut Cli::command(), "ah", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_hex_and_decimal_versions() {
        assert_eq!(parse_version("0x13"), Ok(0x13));
        assert_eq!(parse_version("0X10"), Ok(0x10));
        assert_eq!(parse_version("19"), Ok(0x13));
        assert!(parse_version("0xzz").is_err());
        assert!(parse_version("v13").is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["ah", "pw", "-s", "somesalt", "-t", "7", "--keep-secret"]);
        let candidate = build_candidate(&cli, CostDefaults::default()).unwrap();
        assert_eq!(candidate.time_cost(), 7);
        assert_eq!(candidate.memory_cost(), 512);
    }

    #[test]
    fn test_stdin_password_drops_one_line_ending() {
        assert_eq!(read_password(&b"hunter2\r\n"[..]).unwrap(), b"hunter2");
        assert_eq!(read_password(&b"hunter2\n\n"[..]).unwrap(), b"hunter2\n");
    }

    #[test]
    fn test_stdin_password_buffer_is_presized() {
        let input = vec![b'x'; MAX_STDIN_PASSWORD];
        let password = read_password(input.as_slice()).unwrap();
        assert_eq!(password.len(), MAX_STDIN_PASSWORD);
        assert!(password.capacity() >= MAX_STDIN_PASSWORD + 2);
    }

    #[test]
    fn test_oversized_stdin_password_is_rejected() {
        let input = vec![b'x'; MAX_STDIN_PASSWORD + 1];
        let err = read_password(input.as_slice()).unwrap_err();
        assert!(err.to_string().contains("longer than 4096 bytes"));
    }

    #[test]
    fn test_negative_costs_reach_the_validator() {
        let cli = Cli::parse_from(["ah", "pw", "-s", "somesalt", "-m", "-5"]);
        let candidate = build_candidate(&cli, CostDefaults::default()).unwrap();
        assert_eq!(candidate.memory_cost(), -5);
    }
}
