//! Prescription form rules engine CLI.

use clap::{ColorChoice, Parser};
use rxqa_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, TokenCommand};
use rxqa_cli::commands::{
    run_badges, run_check, run_reset, run_submit, run_token_decode, run_token_encode,
    run_token_status,
};
use rxqa_cli::logging::{LogConfig, LogFormat, init_logging};
use rxqa_guard::GuardError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod summary;

use crate::summary::{print_badges, print_check, print_export, print_submission, print_token};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Check(args) => run_check(args).map(|report| {
            print_check(&report);
            i32::from(report.has_errors())
        }),
        Command::Submit(args) => run_submit(args).map(|report| {
            print_submission(&report);
            i32::from(report.form.has_errors())
        }),
        Command::Badges(args) => run_badges(args).map(|report| {
            if args.export {
                print_export(&report);
            } else {
                print_badges(&report);
            }
            0
        }),
        Command::Reset(args) => run_reset(args).map(|()| {
            println!("Session cleared: {}", args.session_file.display());
            0
        }),
        Command::Token(TokenCommand::Encode(args)) => run_token_encode(args).map(|token| {
            println!("{token}");
            0
        }),
        Command::Token(TokenCommand::Decode { token }) => run_token_decode(token).map(|token| {
            print_token(&token, None);
            0
        }),
        Command::Token(TokenCommand::Status { token, now }) => {
            run_token_status(token, *now).map(|(token, status)| {
                print_token(&token, Some(status));
                i32::from(!status.is_open())
            })
        }
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            report_error(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<GuardError>() {
        Some(guard) => {
            eprintln!("error: {}", guard.user_message());
            if let Some(suggestion) = guard.suggestion() {
                eprintln!("hint: {suggestion}");
            }
        }
        None => eprintln!("error: {error:#}"),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level(cli.verbosity.tracing_level_filter())
        .with_log_data(cli.log_data);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config = config.with_level(match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        });
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
