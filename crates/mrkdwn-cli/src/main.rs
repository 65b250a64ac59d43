use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::process;

use log::{debug, info};
use mrkdwn_core::{
    RenderOptions, format_message, has_markup_tokens, highlight, render_sanitized,
    render_with_options, sanitize,
};
use mrkdwn_renderer::{Renderer, Theme};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[derive(Debug)]
struct Args {
    input: Option<String>,
    raw: bool,
    sanitized: bool,
    theme: Theme,
    options: RenderOptions,
    from_html: bool,
    lang: Option<String>,
    check: bool,
    verbose: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            raw: false,
            sanitized: false,
            theme: Theme::Auto,
            options: RenderOptions::default(),
            from_html: false,
            lang: None,
            check: false,
            verbose: 0,
        }
    }
}

fn main() {
    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return;
        }
        Err(err) => {
            eprintln!("{}", err);
            print_usage();
            process::exit(err.exit_code());
        }
    };

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init()
        .ok();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(err.exit_code());
        }
    }
}

/// Returns `Ok(None)` when help was requested.
fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>, CliError> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "--raw" => args.raw = true,
            "--sanitized" => args.sanitized = true,
            "--no-highlight" => args.options.highlight_code = false,
            "--no-label" => args.options.language_label = false,
            "--from-html" => args.from_html = true,
            "--check" => args.check = true,
            "-v" | "--verbose" => args.verbose = args.verbose.saturating_add(1),
            "--theme" => {
                args.theme = argv
                    .next()
                    .as_deref()
                    .and_then(Theme::from_name)
                    .ok_or_else(|| CliError::Usage("--theme expects: auto | light | dark".into()))?;
            }
            "--lang" => {
                let name = argv
                    .next()
                    .ok_or_else(|| CliError::Usage("--lang expects a language name".into()))?;
                args.lang = Some(name);
            }
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(CliError::Usage(format!("unknown option: {}", arg)));
            }
            _ => {
                if args.input.is_none() {
                    args.input = Some(arg);
                } else {
                    return Err(CliError::Usage(format!("unexpected argument: {}", arg)));
                }
            }
        }
    }
    if args.check && (args.lang.is_some() || args.from_html) {
        return Err(CliError::Usage(
            "--check cannot be combined with --lang or --from-html".into(),
        ));
    }
    Ok(Some(args))
}

fn print_usage() {
    eprintln!(
        "Usage: mrkdwn-cli [--raw] [--sanitized] [--theme auto|light|dark] [--no-highlight] \
         [--no-label] [--from-html] [--lang NAME] [--check] [-v] [input]"
    );
}

fn read_source(input: Option<&str>) -> Result<String, CliError> {
    match input {
        Some(path) if path != "-" => fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        }),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Stdin)?;
            Ok(buffer)
        }
    }
}

/// Runs one invocation. `Ok(false)` means a negative answer that should
/// exit with status 1 without an error message.
fn run(args: &Args) -> Result<bool, CliError> {
    let source = read_source(args.input.as_deref())?;
    debug!("read {} bytes", source.len());

    if args.check {
        let found = has_markup_tokens(&source);
        info!("markup tokens present: {}", found);
        return Ok(found);
    }

    if let Some(lang) = &args.lang {
        let html = highlight(&source, Some(lang.as_str()));
        write_output(&html)?;
        return Ok(true);
    }

    let fragment = if args.from_html {
        match format_message(&source) {
            Some(html) if args.sanitized => sanitize(&html),
            Some(html) => html,
            None => {
                eprintln!("nothing to format");
                return Ok(false);
            }
        }
    } else if args.sanitized {
        render_sanitized(&source, &args.options)
    } else {
        render_with_options(&source, &args.options)
    };

    if args.raw {
        write_output(&fragment)?;
    } else {
        let renderer = Renderer::new(args.theme);
        write_output(&renderer.embed_html(&fragment, true))?;
    }
    Ok(true)
}

fn write_output(text: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
