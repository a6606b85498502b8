// GKey Command API - Dispatcher
// Runs a resolved verb against the host's server command interface

use crate::host::{
    Bookmark, ChannelId, ClientId, ConnectionId, HostConsole, HostError, LogLevel,
    ServerCommands,
};
use crate::lenient::parse_lenient;

use super::tokenizer::tokenize;
use super::verb::{resolve, Action, Verb};

/// Whether a command line was consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// The verb was recognized, whether or not the host call succeeded
    Handled,
    /// Unknown verb, other handlers may process the line
    Unhandled,
}

impl DispatchOutcome {
    pub fn is_handled(self) -> bool {
        matches!(self, DispatchOutcome::Handled)
    }
}

/// Ambient state a command runs against
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub connection: ConnectionId,
    /// Identity token assigned by the host, if registered
    pub plugin_id: Option<&'a str>,
    pub console: &'a dyn HostConsole,
    pub server: &'a dyn ServerCommands,
}

/// A verb that could not complete
#[derive(Debug)]
struct Failure {
    level: LogLevel,
    message: &'static str,
    cause: Option<HostError>,
}

impl Failure {
    /// A host call the verb depends on failed
    fn precondition(message: &'static str, cause: HostError) -> Self {
        Self {
            level: LogLevel::Error,
            message,
            cause: Some(cause),
        }
    }

    /// The verb's own request failed
    fn request(message: &'static str, cause: HostError) -> Self {
        Self {
            level: LogLevel::Info,
            message,
            cause: Some(cause),
        }
    }
}

type VerbResult = Result<(), Failure>;

/// Console command dispatcher.
///
/// Stateless apart from the source tag it writes into the host log.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    log_source: String,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new("GKeyBridge")
    }
}

impl Dispatcher {
    pub fn new(log_source: impl Into<String>) -> Self {
        Self {
            log_source: log_source.into(),
        }
    }

    /// Source tag used for host log entries
    pub fn log_source(&self) -> &str {
        &self.log_source
    }

    /// Tokenize, resolve and dispatch one command line
    pub fn handle_line(&self, line: &str, ctx: &CommandContext<'_>) -> DispatchOutcome {
        let command = tokenize(line);
        self.dispatch(resolve(&command.verb), &command.args, ctx)
    }

    /// Run an action.
    ///
    /// Returns [`DispatchOutcome::Unhandled`] only for unrecognized verbs.
    /// Missing parameters are reported to the user and host failures are
    /// logged; both still count as handled.
    pub fn dispatch(
        &self,
        action: Action,
        args: &[String],
        ctx: &CommandContext<'_>,
    ) -> DispatchOutcome {
        let verb = match action {
            Action::Run(verb) => verb,
            Action::Unrecognized => return DispatchOutcome::Unhandled,
        };

        if args.len() < verb.required_args() {
            ctx.console.print_to_active_view(verb.missing_args_message());
            return DispatchOutcome::Handled;
        }

        log::debug!("dispatching '{}' on connection {}", verb, ctx.connection);
        let arg = |i: usize| args.get(i).map(String::as_str);

        let result = match verb {
            Verb::Join => join(ctx, arg(0).unwrap_or_default(), arg(1).unwrap_or_default()),
            Verb::Command => send_command(ctx, arg(0).unwrap_or_default()),
            Verb::ServerInfo => server_info(ctx),
            Verb::ChannelInfo => channel_info(ctx),
            Verb::Avatar => avatar(ctx, arg(0).unwrap_or_default()),
            Verb::EnableMenu => {
                enable_menu(ctx, arg(0).unwrap_or_default(), arg(1).unwrap_or_default())
            }
            Verb::Subscribe => {
                let channel = parse_lenient::<ChannelId>(arg(0).unwrap_or_default());
                ctx.server
                    .request_channel_subscribe(ctx.connection, &[channel])
                    .map_err(|e| Failure::request("Error subscribing channel", e))
            }
            Verb::Unsubscribe => {
                let channel = parse_lenient::<ChannelId>(arg(0).unwrap_or_default());
                ctx.server
                    .request_channel_unsubscribe(ctx.connection, &[channel])
                    .map_err(|e| Failure::request("Error unsubscribing channel", e))
            }
            Verb::SubscribeAll => ctx
                .server
                .request_channel_subscribe_all(ctx.connection)
                .map_err(|e| Failure::request("Error subscribing all channels", e)),
            Verb::UnsubscribeAll => ctx
                .server
                .request_channel_unsubscribe_all(ctx.connection)
                .map_err(|e| Failure::request("Error unsubscribing all channels", e)),
            Verb::BookmarksList => bookmarks_list(ctx),
        };

        if let Err(failure) = result {
            self.report(verb, &failure, ctx);
        }

        DispatchOutcome::Handled
    }

    fn report(&self, verb: Verb, failure: &Failure, ctx: &CommandContext<'_>) {
        ctx.console
            .log(failure.message, failure.level, &self.log_source);
        let level = log::Level::from(failure.level);
        match failure.cause {
            Some(cause) => log::log!(level, "{} failed: {} ({})", verb, failure.message, cause),
            None => log::log!(level, "{} failed: {}", verb, failure.message),
        }
    }
}

fn own_client_id(ctx: &CommandContext<'_>) -> Result<ClientId, Failure> {
    ctx.server
        .get_client_id(ctx.connection)
        .map_err(|e| Failure::precondition("Error querying client ID", e))
}

fn plugin_id<'a>(ctx: &CommandContext<'a>) -> Result<&'a str, Failure> {
    ctx.plugin_id.ok_or(Failure {
        level: LogLevel::Error,
        message: "Plugin identity not registered",
        cause: None,
    })
}

fn join(ctx: &CommandContext<'_>, channel: &str, password: &str) -> VerbResult {
    let client = own_client_id(ctx)?;
    ctx.server
        .request_client_move(ctx.connection, client, parse_lenient(channel), password)
        .map_err(|e| Failure::request("Error requesting client move", e))
}

fn send_command(ctx: &CommandContext<'_>, command: &str) -> VerbResult {
    let plugin_id = plugin_id(ctx)?;
    ctx.server
        .send_plugin_command(ctx.connection, plugin_id, command)
        .map_err(|e| Failure::request("Error sending plugin command", e))
}

fn server_info(ctx: &CommandContext<'_>) -> VerbResult {
    match ctx.server.get_server_connect_info(ctx.connection) {
        Ok(info) => {
            ctx.console
                .print_to_active_view(&format!("Server Connect Info: {}", info));
            Ok(())
        }
        Err(e) => {
            let message = "No server connect info available.";
            ctx.console.print_to_active_view(message);
            Err(Failure::request(message, e))
        }
    }
}

fn channel_info(ctx: &CommandContext<'_>) -> VerbResult {
    let client = own_client_id(ctx)?;
    let channel = ctx
        .server
        .get_channel_of_client(ctx.connection, client)
        .map_err(|e| Failure::precondition("Error querying own channel", e))?;

    match ctx.server.get_channel_connect_info(ctx.connection, channel) {
        Ok(info) => {
            ctx.console
                .print_to_active_view(&format!("Channel Connect Info: {}", info));
            Ok(())
        }
        Err(e) => {
            let message = "No channel connect info available.";
            ctx.console.print_to_active_view(message);
            Err(Failure::request(message, e))
        }
    }
}

fn avatar(ctx: &CommandContext<'_>, client: &str) -> VerbResult {
    let avatar = ctx
        .server
        .get_avatar(ctx.connection, parse_lenient(client))
        .map_err(|e| Failure::request("Error getting avatar", e))?;

    match avatar {
        Some(path) if !path.is_empty() => ctx
            .console
            .print_to_active_view(&format!("Avatar path: {}", path)),
        _ => ctx.console.print_to_active_view("Avatar not set"),
    }
    Ok(())
}

fn enable_menu(ctx: &CommandContext<'_>, menu: &str, state: &str) -> VerbResult {
    let plugin_id = plugin_id(ctx)?;
    let enabled = parse_lenient::<i32>(state) != 0;
    ctx.server
        .set_plugin_menu_enabled(plugin_id, parse_lenient(menu), enabled)
        .map_err(|e| Failure::request("Error toggling menu", e))
}

fn bookmarks_list(ctx: &CommandContext<'_>) -> VerbResult {
    let bookmarks = ctx.server.get_bookmark_list().map_err(|e| Failure {
        level: LogLevel::Error,
        message: "Error getting bookmarks list",
        cause: Some(e),
    })?;

    if bookmarks.is_empty() {
        ctx.console.print_to_active_view("No bookmarks.");
        return Ok(());
    }

    let mut lines = Vec::new();
    render_bookmarks(&bookmarks, 0, &mut lines);
    for line in &lines {
        ctx.console.print_to_active_view(line);
    }
    Ok(())
}

/// Flatten the bookmark tree into indented lines, folders marked with '/'
fn render_bookmarks(bookmarks: &[Bookmark], depth: usize, lines: &mut Vec<String>) {
    for bookmark in bookmarks {
        let indent = "  ".repeat(depth);
        if bookmark.is_folder {
            lines.push(format!("{}{}/", indent, bookmark.name));
            render_bookmarks(&bookmark.children, depth + 1, lines);
        } else {
            lines.push(format!("{}{}", indent, bookmark.name));
        }
    }
}
