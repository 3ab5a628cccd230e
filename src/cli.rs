use anyhow::{anyhow, Context};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cache::{self, Cache};
use crate::config::Config;
use crate::error::StashError;
use crate::output::{self, OutputMode, ValidationReport};
use crate::sequence;
use crate::theme::Theme;
use crate::validators;

#[derive(Parser)]
#[command(name = "stash")]
#[command(version)]
#[command(about = "Keep user records in a JSON cache, with input validation")]
#[command(long_about = "Stash is a small CLI tool that keeps user records in a flat JSON \
    cache file and validates raw input strings.\n\n\
    Examples:\n  \
    stash set alice '{\"age\": 30}'   # Store a record\n  \
    stash get alice                 # Fetch it back\n  \
    stash validate --email a@b.com  # Check an input string\n  \
    stash max 3 1 4 1 5             # Largest of the given integers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one user record from the cache
    #[command(visible_alias = "g")]
    Get {
        /// User identifier to look up
        user_id: String,

        /// Cache file to read (default: config, then stash.json)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Output the record as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Insert or replace one user record and rewrite the cache
    #[command(visible_alias = "s")]
    Set {
        /// User identifier to store under
        user_id: String,

        /// New value; parsed as JSON, stored as a plain string otherwise
        value: String,

        /// Cache file to write (default: config, then stash.json)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Remove one user record and rewrite the cache
    #[command(visible_alias = "rm")]
    Remove {
        /// User identifier to remove
        user_id: String,

        /// Cache file to write (default: config, then stash.json)
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Validate raw input strings
    Validate {
        /// Email address to check
        #[arg(long, value_name = "EMAIL")]
        email: Option<String>,

        /// Age string to parse
        #[arg(long, value_name = "AGE")]
        age: Option<String>,

        /// Password to check
        #[arg(long, value_name = "PASSWORD")]
        password: Option<String>,

        /// HTML fragment to pass through the sanitizer
        #[arg(long, value_name = "HTML")]
        html: Option<String>,

        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the largest of the given integers
    Max {
        /// Values to scan
        #[arg(required = true, value_name = "VALUE", allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Check a username/password pair against the configured credentials
    Login {
        /// Username to check; the password is read from stdin
        username: String,
    },

    /// View or modify configuration
    Config {
        /// Show the current configuration (the default)
        #[arg(long)]
        show: bool,

        /// Reset the configuration to defaults
        #[arg(long)]
        reset: bool,

        /// Print the config file path
        #[arg(long)]
        path: bool,
    },
}

impl Cli {
    pub fn show_interactive_menu() {
        println!();
        println!("{}", Theme::header("Stash - User Records in a JSON Cache"));
        println!("{}", Theme::divider_bold(60));
        println!();
        println!("{}", Theme::primary("Available Commands:"));
        println!();
        println!("  {}  {}  {}", Theme::command("get"), Theme::muted("or"), Theme::command("g"));
        println!("     {} Fetch one user record from the cache", Theme::muted("→"));
        println!();
        println!("  {}  {}  {}", Theme::command("set"), Theme::muted("or"), Theme::command("s"));
        println!("     {} Insert or replace a record", Theme::muted("→"));
        println!();
        println!("  {}  {}  {}", Theme::command("remove"), Theme::muted("or"), Theme::command("rm"));
        println!("     {} Remove a record", Theme::muted("→"));
        println!();
        println!("  {}", Theme::command("validate"));
        println!("     {} Check email, age, password, and HTML inputs", Theme::muted("→"));
        println!();
        println!("  {}", Theme::command("max"));
        println!("     {} Largest of the given integers", Theme::muted("→"));
        println!();
        println!("  {}", Theme::command("config"));
        println!("     {} View or modify configuration", Theme::muted("→"));
        println!();
        println!("{}", Theme::divider(60));
        println!();
        println!("{}", Theme::primary("Quick Examples:"));
        println!();
        println!("  {} Store a record", Theme::command("stash set alice '{\"age\": 30}'"));
        println!("  {} Fetch it back", Theme::command("stash get alice"));
        println!("  {} Check an email", Theme::command("stash validate --email a@b.com"));
        println!("  {} Largest value", Theme::command("stash max 3 1 4 1 5"));
        println!();
        println!("{}", Theme::muted("Tip: Use --help with any command for detailed options"));
        println!();
    }

    pub fn run(self) -> anyhow::Result<()> {
        let config = Config::load();

        // CLI flags win over the configured default
        let output_mode = if self.quiet {
            OutputMode::Quiet
        } else if self.verbose >= 1 {
            OutputMode::Verbose
        } else {
            match config.ui.output_mode.as_str() {
                "quiet" => OutputMode::Quiet,
                "verbose" => OutputMode::Verbose,
                _ => OutputMode::Normal,
            }
        };

        match self.command {
            Commands::Get { user_id, file, json } => {
                let path = config.resolve_cache_file(file);
                if output_mode == OutputMode::Verbose {
                    eprintln!("{}", Theme::muted(&format!("cache file: {}", path.display())));
                }

                let cache = cache::load_cache(&path)?;
                let value = cache::get_user_data(&cache, &user_id)?;
                output::print_record(&user_id, value, output_mode, json)?;

                Ok(())
            }

            Commands::Set { user_id, value, file } => {
                let path = config.resolve_cache_file(file);

                // Start from the existing document when there is one; the
                // save below rewrites it wholesale either way
                let mut cache = if path.exists() {
                    cache::load_cache(&path)?
                } else {
                    Cache::new()
                };

                let parsed: Value =
                    serde_json::from_str(&value).unwrap_or(Value::String(value));
                cache.insert(user_id.clone(), parsed);
                cache::save_cache(&path, &cache)?;

                if output_mode != OutputMode::Quiet {
                    println!(
                        "{} Saved record for '{}' ({} record{} in {})",
                        Theme::success("OK"),
                        user_id,
                        cache.len(),
                        if cache.len() == 1 { "" } else { "s" },
                        path.display()
                    );
                }

                Ok(())
            }

            Commands::Remove { user_id, file } => {
                let path = config.resolve_cache_file(file);

                let mut cache = cache::load_cache(&path)?;
                if cache.remove(&user_id).is_none() {
                    return Err(StashError::UserNotFound { user_id }.into());
                }
                cache::save_cache(&path, &cache)?;

                if output_mode != OutputMode::Quiet {
                    println!(
                        "{} Removed '{}' ({} record{} left in {})",
                        Theme::success("OK"),
                        user_id,
                        cache.len(),
                        if cache.len() == 1 { "" } else { "s" },
                        path.display()
                    );
                }

                Ok(())
            }

            Commands::Validate { email, age, password, html, json } => {
                let mut report = ValidationReport::default();

                if let Some(email) = email {
                    let passed = validators::validate_email(&email);
                    report.add(
                        "email",
                        &email,
                        passed,
                        Some("only checks for an '@' character".to_string()),
                    );
                }

                if let Some(age) = age {
                    match validators::validate_age(&age) {
                        Ok(parsed) => {
                            report.add("age", &age, true, Some(format!("parsed as {parsed}")))
                        }
                        Err(err) => report.add("age", &age, false, Some(err.to_string())),
                    }
                }

                if let Some(password) = password {
                    let passed = validators::check_password(&password);
                    let masked = if password.is_empty() {
                        "(empty)".to_string()
                    } else {
                        "*".repeat(password.chars().count())
                    };
                    report.add(
                        "password",
                        &masked,
                        passed,
                        Some("only checks that the password is non-empty".to_string()),
                    );
                }

                if let Some(html) = html {
                    let _sanitized = validators::sanitize_html(&html);
                    report.add(
                        "html",
                        &html,
                        true,
                        Some("sanitizer is a passthrough; markup was NOT removed or escaped"
                            .to_string()),
                    );
                }

                if report.is_empty() {
                    eprintln!("No inputs given. Use --email, --age, --password, or --html.");
                    eprintln!("Run 'stash validate --help' for more information.");
                    return Ok(());
                }

                if json {
                    output::print_report_json(&report)?;
                } else {
                    output::print_report_human(&report, output_mode);
                }

                if !report.all_passed() {
                    std::process::exit(1);
                }

                Ok(())
            }

            Commands::Max { values } => {
                let max = sequence::find_max(&values)?;
                println!("{max}");
                Ok(())
            }

            Commands::Login { username } => {
                if config.credentials.is_empty() {
                    let hint = Config::config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "the config file".to_string());
                    return Err(anyhow!(
                        "No credentials configured. Add a [credentials.users] table to {hint}"
                    ));
                }

                eprint!("Password for {username}: ");
                io::stderr().flush()?;

                let mut password = String::new();
                io::stdin()
                    .read_line(&mut password)
                    .context("Failed to read password from stdin")?;
                let password = password.trim_end_matches(['\r', '\n']);

                if config.credentials.verify(&username, password) {
                    println!("{} Login accepted for '{username}'", Theme::success("OK"));
                    Ok(())
                } else {
                    println!("{} Login rejected for '{username}'", Theme::error("FAIL"));
                    std::process::exit(1);
                }
            }

            // --show is the default behavior, so the flag itself is not consulted
            Commands::Config { show: _, reset, path } => {
                if reset {
                    Config::default().save()?;
                    println!("{} Configuration reset to defaults.", Theme::success("OK"));
                } else if path {
                    println!("{}", Config::config_path()?.display());
                } else {
                    let config = Config::load_or_create();
                    println!("{}", Theme::header("Current Configuration"));
                    println!("{}", Theme::divider_bold(60));
                    println!();
                    println!("Cache:");
                    match config.cache.file {
                        Some(ref file) => println!("  File: {}", file.display()),
                        None => println!("  File: (stash.json in the current directory)"),
                    }
                    println!();
                    println!("UI Settings:");
                    println!("  Output mode: {}", config.ui.output_mode);
                    println!();
                    println!("Credentials:");
                    if config.credentials.is_empty() {
                        println!("  (no users configured)");
                    } else {
                        for user in config.credentials.users.keys() {
                            println!("  {user}");
                        }
                    }
                    println!();
                    if let Ok(path) = Config::config_path() {
                        println!("Config file: {}", path.display());
                    }
                }

                Ok(())
            }
        }
    }
}
