//! CLI argument definitions for the prescription form checker.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default location of the session file.
pub const DEFAULT_SESSION_FILE: &str = "rxqa-session.json";

#[derive(Parser)]
#[command(
    name = "rxqa",
    version,
    about = "Prescription form rules engine - detect test patterns and validate input",
    long_about = "Evaluate medication prescription forms.\n\n\
                  Every submission is checked by field validators and by detectors that\n\
                  recognise the testing technique exercised (boundaries, nominal values,\n\
                  malformed input). Detections accumulate as badges in a session file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include raw field values in debug logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Detect and validate a form without touching the session.
    Check(FormArgs),

    /// Submit a form and record its detections in the session.
    Submit(SubmitArgs),

    /// Show the badges earned in the session.
    Badges(BadgesArgs),

    /// Clear the session.
    Reset(SessionArgs),

    /// Create and inspect access tokens.
    #[command(subcommand)]
    Token(TokenCommand),
}

/// Field values of one form snapshot. Omitted fields are empty.
#[derive(Args, Clone, Default)]
pub struct FormArgs {
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub medication: String,

    /// Date of birth as YYYY-MM-DD.
    #[arg(long = "dob", default_value = "", allow_hyphen_values = true)]
    pub date_of_birth: String,

    /// Body weight in kilograms.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub weight: String,

    /// Single dose in milligrams.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub dosage: String,

    /// Doses per day.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub frequency: String,

    /// Evaluate age rules as of this date instead of today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,
}

#[derive(Args, Clone)]
pub struct SessionArgs {
    /// Session file (a backup is kept next to it).
    #[arg(long = "session-file", value_name = "PATH", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,
}

#[derive(Args, Clone)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub form: FormArgs,

    #[command(flatten)]
    pub session: SessionArgs,

    /// The form was submitted by pressing Enter in a text field.
    #[arg(long)]
    pub enter: bool,
}

#[derive(Args, Clone)]
pub struct BadgesArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Print the flat `field_tag, ..., form_tag` export instead of a table.
    #[arg(long)]
    pub export: bool,
}

#[derive(Subcommand, Clone)]
pub enum TokenCommand {
    /// Encode an access token.
    Encode(TokenArgs),

    /// Decode and verify an access token.
    Decode {
        token: String,
    },

    /// Report whether a token's access window is open.
    Status {
        token: String,

        /// Evaluate at this local time (YYYY-MM-DDTHH:MM:SS) instead of now.
        #[arg(long, value_name = "DATETIME")]
        now: Option<NaiveDateTime>,
    },
}

#[derive(Args, Clone)]
pub struct TokenArgs {
    #[arg(long)]
    pub email: String,

    /// Window start date, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Window start time, HH:MM.
    #[arg(long)]
    pub time: String,

    /// Window length such as 3h.
    #[arg(long)]
    pub duration: String,

    /// Print a full access link on this base URL.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
