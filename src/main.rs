//! extconsole - print styled log lines and ask questions from the shell
//!
//! A thin command-line front end over the extconsole library, useful in
//! scripts and for previewing color shortcuts.
//!
//! # Quick Start
//!
//! ```text
//! extconsole -s build "&aok&r compiled 12 crates"
//! extconsole -l warning -s disk "only &c3%&r left"
//! extconsole --secret -s login "Password:"
//! extconsole --confirm -s deploy "Push to production?"
//! extconsole --palette
//! ```
//!
//! # Exit Status
//!
//! | Mode | Status |
//! |------|--------|
//! | log, pause, wait, palette | 0 |
//! | confirm | 0 for YES, 2 for NO |
//! | prompt, secret | 0, or 3 at end of input |

use std::env;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use extconsole::config::{self, Config};
use extconsole::input::reader::{DEFAULT_ENTER_MESSAGE, DEFAULT_PAUSE_MESSAGE};
use extconsole::style::escape::STYLE_RESET;
use extconsole::{Console, LogLevel, Terminal};

/// What the invocation does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Log,
    Prompt,
    Secret,
    Confirm,
    Pause,
    Wait,
    Palette,
}

/// Command line arguments
struct Args {
    mode: Mode,
    /// Source tag shown in the prefix
    source: String,
    level: LogLevel,
    /// Write to stderr instead of stdout
    stderr: bool,
    /// Omit the trailing newline
    no_newline: bool,
    /// Omit the prefix
    raw: bool,
    hide_blank: bool,
    message: Vec<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            mode: Mode::Log,
            source: "extconsole".to_string(),
            level: LogLevel::Info,
            stderr: false,
            no_newline: false,
            raw: false,
            hide_blank: false,
            message: Vec::new(),
        }
    }
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    eprintln!("extconsole {}", VERSION);
}

fn print_help() {
    eprintln!("extconsole {} - Styled log lines and prompts for ANSI terminals", VERSION);
    eprintln!();
    eprintln!("Usage: extconsole [OPTIONS] [MESSAGE...]");
    eprintln!();
    eprintln!("Message options:");
    eprintln!("  -s, --source <TAG>    Source tag in the prefix (default: extconsole)");
    eprintln!("  -l, --level <LEVEL>   critical, error, warning, info, debug,");
    eprintln!("                        success, fail or input (default: info)");
    eprintln!("  -e, --stderr          Write to stderr");
    eprintln!("  -n, --no-newline      Do not end the line");
    eprintln!("  -r, --raw             Do not print the prefix");
    eprintln!("  -b, --hide-blank      Print nothing for blank messages");
    eprintln!();
    eprintln!("Modes:");
    eprintln!("  (default)             Print MESSAGE as a log line");
    eprintln!("  --prompt              Print MESSAGE as a prompt and echo the answer");
    eprintln!("  --secret              Like --prompt, input is hidden");
    eprintln!("  --confirm             Ask MESSAGE, answer with Y or N");
    eprintln!("  --pause               Wait for any key");
    eprintln!("  --wait                Wait for Enter");
    eprintln!("  --palette             Show every color shortcut");
    eprintln!();
    eprintln!("Other options:");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Shortcuts: &0-&f colors, &l bold, &o italic, &n underline,");
    eprintln!("           &m strikethrough, &k blink, &r reset, &v value color,");
    eprintln!("           &- / &+ inverse on/off, ^& keeps a token literal");
    eprintln!();
    eprintln!("Configuration: ~/.extconsole/config.toml");
    eprintln!("Log file:      ~/.extconsole/extconsole.log (filter: EXTCONSOLE_LOG)");
}

fn parse_args() -> Result<Args, String> {
    let argv: Vec<String> = env::args().collect();
    let mut args = Args::default();
    let mut i = 1;

    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-s" | "--source" => {
                i += 1;
                if i >= argv.len() {
                    return Err("Missing source argument".to_string());
                }
                args.source = argv[i].clone();
            }
            "-l" | "--level" => {
                i += 1;
                if i >= argv.len() {
                    return Err("Missing level argument".to_string());
                }
                args.level = argv[i].parse().map_err(|e| format!("{}", e))?;
            }
            "-e" | "--stderr" => args.stderr = true,
            "-n" | "--no-newline" => args.no_newline = true,
            "-r" | "--raw" => args.raw = true,
            "-b" | "--hide-blank" => args.hide_blank = true,
            // Modes
            "--prompt" => args.mode = Mode::Prompt,
            "--secret" => args.mode = Mode::Secret,
            "--confirm" => args.mode = Mode::Confirm,
            "--pause" => args.mode = Mode::Pause,
            "--wait" => args.mode = Mode::Wait,
            "--palette" => args.mode = Mode::Palette,
            "--" => {
                args.message.extend(argv[i + 1..].iter().cloned());
                break;
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
            word => args.message.push(word.to_string()),
        }
        i += 1;
    }

    Ok(args)
}

/// Log to `~/.extconsole/extconsole.log`, never to the styled terminal
fn init_logging() {
    let log_path = config::config_dir()
        .map(|dir| dir.join("extconsole.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("extconsole.log"));

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_env("EXTCONSOLE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging();
    info!("extconsole {} starting, mode {:?}", VERSION, args.mode);

    let config = Config::load();
    let mut console = Console::setup(&config)?;

    let mut message_config = *console.message_config();
    if args.raw {
        message_config.add_prefix = false;
        message_config.add_prefix_to_new_lines = false;
    }
    if args.hide_blank {
        message_config.hide_blank_lines = true;
    }
    console.set_message_config(message_config);

    let status = run(&mut console, &args)?;
    info!("extconsole finished with status {}", status);
    if status != 0 {
        std::process::exit(status);
    }
    Ok(())
}

/// Execute the selected mode, returning the exit status
fn run(console: &mut Console, args: &Args) -> anyhow::Result<i32> {
    let message = args.message.join(" ");

    match args.mode {
        Mode::Log => {
            match (args.stderr, args.no_newline) {
                (false, false) => console.write_line(&args.source, &message, args.level)?,
                (false, true) => console.write(&args.source, &message, args.level)?,
                (true, false) => console.error_write_line(&args.source, &message, args.level)?,
                (true, true) => console.error_write(&args.source, &message, args.level)?,
            }
            Ok(0)
        }
        Mode::Prompt | Mode::Secret => {
            let hide = args.mode == Mode::Secret;
            let answer = console
                .reader()
                .prompt_read_line(&args.source, &message, hide)?;
            if hide {
                console.terminal_mut().write_line("")?;
            }
            match answer {
                Some(line) => {
                    // The answer goes to stdout for the calling script
                    println!("{}", line);
                    Ok(0)
                }
                None => Ok(3),
            }
        }
        Mode::Confirm => {
            let yes = console.reader().confirm(&args.source, &message)?;
            Ok(if yes { 0 } else { 2 })
        }
        Mode::Pause => {
            let text: &str = if message.is_empty() {
                DEFAULT_PAUSE_MESSAGE
            } else {
                &message
            };
            console.reader().pause(text, true)?;
            Ok(0)
        }
        Mode::Wait => {
            let text: &str = if message.is_empty() {
                DEFAULT_ENTER_MESSAGE
            } else {
                &message
            };
            console.reader().wait_for_enter(text)?;
            Ok(0)
        }
        Mode::Palette => {
            let lines: Vec<String> = console
                .registry()
                .iter()
                .map(|s| {
                    format!("  {:<4}{}The quick brown fox{}", s.token, s.escape, STYLE_RESET)
                })
                .collect();
            for line in lines {
                console.terminal_mut().write_line(&line)?;
            }
            Ok(0)
        }
    }
}
