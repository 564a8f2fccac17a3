//! Tempnote CLI - encrypted, self-destructing text notes
//!
//! This is the command-line interface for Tempnote. It provides a
//! user-friendly surface over the core library; all lifecycle rules live
//! in `tempnote-core`.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use dialoguer::Password;

use tempnote_core::{
    Cipher, InspectOutcome, NewNote, NoteError, NoteService, SecretKey, SqliteNoteStore, VERSION,
};

/// Tempnote - send notes that self-destruct after being read
#[derive(Parser)]
#[command(name = "tempnote")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the note database
    #[arg(short, long, global = true, env = "TEMPNOTE_DB")]
    database: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new note database
    Init {
        /// Path where the database will be created
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Create a note and print its share link
    Create {
        /// Note body (overrides stdin)
        #[arg(long)]
        content: Option<String>,

        /// Hours until the note expires (0 = never expires by time)
        #[arg(long, value_name = "HOURS", default_value_t = 0)]
        expires_in: u32,

        /// Password required to read the note
        #[arg(long)]
        password: Option<String>,

        /// Prompt for the password without echoing
        #[arg(long, conflicts_with = "password")]
        prompt_password: bool,

        /// Keep the note readable until expiry instead of destroying it
        /// after the first read
        #[arg(long)]
        multi_read: bool,

        /// Base URL used to construct the share link
        #[arg(long, env = "TEMPNOTE_BASE_URL", default_value = "http://localhost:3000")]
        base_url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a note's status without reading it
    Inspect {
        /// Note shortlink
        #[arg(value_name = "SHORTLINK")]
        shortlink: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read a note, destroying it when its policy says so
    Read {
        /// Note shortlink
        #[arg(value_name = "SHORTLINK")]
        shortlink: String,

        /// Password for gated notes
        #[arg(long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path }) => {
            let target = path.or(cli.database).ok_or_else(|| {
                anyhow::anyhow!("No database path provided. Use --database or pass a path.")
            })?;

            // The key is validated up front even though init does not
            // encrypt anything: a misconfigured key must fail at setup,
            // not on the first create.
            load_cipher()?;

            SqliteNoteStore::create(Path::new(&target))?;

            if !cli.quiet {
                println!("Initialized note database at {}", target);
            }
        }
        Some(Commands::Create {
            content,
            expires_in,
            password,
            prompt_password,
            multi_read,
            base_url,
            json,
        }) => {
            let mut service = open_service(cli.database, base_url)?;

            let body = read_note_content(content)?;
            let password = if prompt_password {
                Some(prompt_new_password()?)
            } else {
                password
            };

            let mut note = NewNote::new(body)
                .expires_in_hours(expires_in)
                .with_read_once(!multi_read);
            if let Some(value) = password {
                note = note.with_password(value);
            }

            let created = match service.create(note) {
                Ok(created) => created,
                Err(err) => return Err(render_note_error(err)),
            };

            if json {
                let value = serde_json::json!({
                    "shortlink": created.shortlink,
                    "share_link": created.share_link,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else if cli.quiet {
                println!("{}", created.share_link);
            } else {
                println!("Created note {}", created.shortlink);
                println!("Share link: {}", created.share_link);
            }
        }
        Some(Commands::Inspect { shortlink, json }) => {
            let mut service = open_service(cli.database, default_base_url())?;

            let outcome = match service.inspect(&shortlink) {
                Ok(outcome) => outcome,
                Err(err) => return Err(render_note_error(err)),
            };

            if json {
                let value = match outcome {
                    InspectOutcome::NotFound => {
                        serde_json::json!({"exists": false, "reason": "not-found"})
                    }
                    InspectOutcome::Expired => {
                        serde_json::json!({"exists": false, "reason": "expired"})
                    }
                    InspectOutcome::AlreadyRead => {
                        serde_json::json!({"exists": false, "reason": "already-read"})
                    }
                    InspectOutcome::Exists { password_required } => {
                        serde_json::json!({"exists": true, "password_required": password_required})
                    }
                };
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                match outcome {
                    InspectOutcome::NotFound => return Err(render_note_error(NoteError::NotFound)),
                    InspectOutcome::Expired => return Err(render_note_error(NoteError::Expired)),
                    InspectOutcome::AlreadyRead => {
                        return Err(render_note_error(NoteError::AlreadyRead))
                    }
                    InspectOutcome::Exists { password_required } => {
                        println!("Note exists");
                        if password_required {
                            println!("A password is required to read it");
                        }
                    }
                }
            }
        }
        Some(Commands::Read {
            shortlink,
            password,
            json,
        }) => {
            let mut service = open_service(cli.database, default_base_url())?;

            // A gated note rejects a missing password without touching the
            // record, so prompting and retrying once is safe when a human
            // is on the other end.
            let supplied_none = password.is_none();
            let result = service.consume(&shortlink, password.as_deref());
            let result = match result {
                Err(NoteError::IncorrectPassword)
                    if supplied_none && io::stdin().is_terminal() =>
                {
                    let prompted = Password::new()
                        .with_prompt("Password")
                        .interact()
                        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))?;
                    service.consume(&shortlink, Some(&prompted))
                }
                other => other,
            };

            match result {
                Ok(plaintext) => {
                    if json {
                        let value = serde_json::json!({ "note": plaintext });
                        println!("{}", serde_json::to_string_pretty(&value)?);
                    } else {
                        println!("{}", plaintext);
                    }
                }
                Err(err) => return Err(render_note_error(err)),
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "tempnote", &mut std::io::stdout());
        }
        None => {
            println!("Tempnote v{}", VERSION);
            println!("\nRun `tempnote --help` for usage information.");
        }
    }

    Ok(())
}

fn default_base_url() -> String {
    std::env::var("TEMPNOTE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Load the process-wide encryption key from the environment.
///
/// The key must be exactly 32 bytes; anything else is a startup failure.
fn load_cipher() -> anyhow::Result<Cipher> {
    let material = std::env::var("TEMPNOTE_KEY").map_err(|_| {
        anyhow::anyhow!("TEMPNOTE_KEY is not set; it must hold the 32-byte encryption key")
    })?;
    let key = SecretKey::new(&material)?;
    Ok(Cipher::new(key))
}

fn open_service(
    database: Option<String>,
    base_url: String,
) -> anyhow::Result<NoteService<SqliteNoteStore>> {
    let cipher = load_cipher()?;
    let target = database.ok_or_else(|| {
        anyhow::anyhow!("No database path provided. Use --database or set TEMPNOTE_DB.")
    })?;
    let store = SqliteNoteStore::open(Path::new(&target))?;
    Ok(NoteService::new(store, cipher, base_url))
}

/// Render a core error as a short message plus a longer description,
/// with internal errors collapsed to an opaque server-error pair.
fn render_note_error(err: NoteError) -> anyhow::Error {
    eprintln!("{}", err.user_description());
    anyhow::anyhow!("{}", err.user_message())
}

fn read_note_content(content: Option<String>) -> anyhow::Result<String> {
    if let Some(value) = content {
        if value.trim().is_empty() {
            return Err(anyhow::anyhow!("--content cannot be empty"));
        }
        return Ok(value);
    }

    if !io::stdin().is_terminal() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
        let trimmed = buffer.trim_end().to_string();
        if trimmed.is_empty() {
            return Err(anyhow::anyhow!("No input provided on stdin"));
        }
        return Ok(trimmed);
    }

    Err(anyhow::anyhow!(
        "Provide the note body with --content or pipe it via stdin"
    ))
}

fn prompt_new_password() -> anyhow::Result<String> {
    Password::new()
        .with_prompt("Note password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
