// GKey Bridge CLI
// Console harness that plays the host client for the G-key bridge

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use gkey_core::settings::{default_settings_content, Settings};
use gkey_core::{
    decode, encode, Bridge, ConnectionId, DeviceEventCode, DeviceEventSink, PluginInfo,
};

mod console;

use console::{ConsoleHost, DemoLabels};

/// Identifier the console host hands out at registration
const CONSOLE_PLUGIN_ID: &str = "gkey_console";

/// G-key hotkey bridge console
#[derive(Parser, Debug)]
#[command(name = "gkey-bridge")]
#[command(author = "gkey-bridge contributors")]
#[command(version)]
#[command(about = "Hotkey identifiers and console commands for Logitech G-keys", long_about = None)]
struct Args {
    /// TOML settings file
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Simulate a host that is not connected to any server
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the identifier for a key
    Encode {
        /// Key is a mouse button instead of a keyboard G-key
        #[arg(long)]
        mouse: bool,
        key_index: u32,
        #[arg(default_value_t = 0)]
        modal_state: u32,
    },
    /// Print the fields recovered from an identifier
    Decode { identifier: String },
    /// Print the device family of an identifier
    Device { identifier: String },
    /// Print the friendly key label of an identifier
    Label { identifier: String },
    /// Run one console command, e.g. `command join 5 secret`
    Command {
        #[arg(long, default_value_t = 1)]
        connection: ConnectionId,
        #[arg(required = true, trailing_var_arg = true)]
        words: Vec<String>,
    },
    /// Read commands and simulated key events from stdin
    Repl {
        #[arg(long, default_value_t = 1)]
        connection: ConnectionId,
    },
    /// Show plugin metadata
    Info,
    /// Print a default settings file
    DefaultSettings,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load_default().context("loading default settings")?,
    };
    log::debug!("settings: {:?}", settings);

    let mut bridge = Bridge::with_config(
        ConsoleHost::new(!args.offline),
        DemoLabels,
        settings.to_bridge_config(),
    );
    bridge.register_plugin_id(CONSOLE_PLUGIN_ID)?;

    match args.command {
        Command::Encode {
            mouse,
            key_index,
            modal_state,
        } => {
            let code = DeviceEventCode::new(mouse, key_index, modal_state, false);
            println!("{}", encode(&code));
        }
        Command::Decode { identifier } => {
            let code = decode(&identifier);
            println!(
                "device={} key_index={} modal_state={}",
                code.device, code.key_index, code.modal_state
            );
        }
        Command::Device { identifier } => {
            println!("{}", bridge.key_device_name(&identifier));
        }
        Command::Label { identifier } => {
            println!("{}", bridge.display_key_text(&identifier));
        }
        Command::Command { connection, words } => {
            let line = words.join(" ");
            if !bridge.handle_command(connection, &line) {
                println!("Unknown command: {}", line);
            }
        }
        Command::Repl { connection } => repl(&mut bridge, connection)?,
        Command::Info => print_info(&PluginInfo::default()),
        Command::DefaultSettings => print!("{}", default_settings_content()),
    }

    bridge.release_plugin_id();
    Ok(())
}

fn print_info(info: &PluginInfo) {
    println!("{} {} (API {})", info.name, info.version, info.api_version);
    println!("Author: {}", info.author);
    println!("{}", info.description);
    println!("Hotkey prefix: {}", info.key_prefix);
}

/// Interactive loop.
///
/// `/<command>` runs a console command, `press <id>` / `release <id>` feed a
/// device event, `label <id>` and `device <id>` query display text.
fn repl(bridge: &mut Bridge<ConsoleHost, DemoLabels>, connection: ConnectionId) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(command) = line.strip_prefix('/') {
            if !bridge.handle_command(connection, command) {
                println!("Unknown command: {}", command);
            }
            continue;
        }

        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("press"), Some(id)) => {
                let code = decode(id).pressed();
                bridge.on_device_event(code, id);
            }
            (Some("release"), Some(id)) => bridge.on_device_event(decode(id), id),
            (Some("label"), Some(id)) => println!("{}", bridge.display_key_text(id)),
            (Some("device"), Some(id)) => println!("{}", bridge.key_device_name(id)),
            (Some("quit"), _) | (Some("exit"), _) => break,
            (None, _) => {}
            _ => println!("Usage: /<command> | press <id> | release <id> | label <id> | device <id> | quit"),
        }
    }

    Ok(())
}
