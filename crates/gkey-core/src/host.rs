// GKey Core - Host Interfaces
//
// Capabilities the core consumes from the host client. Concrete bindings
// live in adapters outside this crate; tests use recording mocks.

use std::fmt;

/// Server connection handler id
pub type ConnectionId = u64;

/// Client id on a server
pub type ClientId = u16;

/// Channel id on a server
pub type ChannelId = u64;

/// Plugin menu item id
pub type MenuId = i32;

/// Error codes returned by host calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Not connected")]
    NotConnected,

    #[error("Invalid parameter")]
    InvalidParameter,

    #[error("Not found")]
    NotFound,

    #[error("Host error code {0:#06x}")]
    Code(u32),
}

/// Severity passed to the host log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Critical => write!(f, "CRITICAL"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Critical | LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

/// Address a client used to connect to the current server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConnectInfo {
    pub host: String,
    pub port: u16,
    /// Empty when the server has no password
    pub password: String,
}

impl fmt::Display for ServerConnectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)?;
        if !self.password.is_empty() {
            write!(f, ", {}", self.password)?;
        }
        Ok(())
    }
}

/// Path and password of a channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelConnectInfo {
    pub path: String,
    /// Empty when the channel has no password
    pub password: String,
}

impl fmt::Display for ChannelConnectInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if !self.password.is_empty() {
            write!(f, ", {}", self.password)?;
        }
        Ok(())
    }
}

/// One node of the host's bookmark tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
    pub is_folder: bool,
    pub children: Vec<Bookmark>,
}

impl Bookmark {
    pub fn entry(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_folder: false,
            children: Vec::new(),
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<Bookmark>) -> Self {
        Self {
            name: name.into(),
            is_folder: true,
            children,
        }
    }
}

/// Hotkey notification entry point of the host
pub trait HostNotifier {
    /// Report a key event for a hotkey identifier.
    ///
    /// `is_up` is true on key release.
    fn notify_key_event(&self, plugin_id: &str, identifier: &str, is_up: bool);
}

/// User-visible output of the host
pub trait HostConsole {
    /// Print a line into the active chat/console tab
    fn print_to_active_view(&self, text: &str);

    /// Write to the host client log
    fn log(&self, text: &str, severity: LogLevel, source: &str);
}

/// Per-connection queries and requests the command dispatcher issues
pub trait ServerCommands {
    fn get_client_id(&self, connection: ConnectionId) -> Result<ClientId, HostError>;

    fn request_client_move(
        &self,
        connection: ConnectionId,
        client: ClientId,
        channel: ChannelId,
        password: &str,
    ) -> Result<(), HostError>;

    fn send_plugin_command(
        &self,
        connection: ConnectionId,
        plugin_id: &str,
        command: &str,
    ) -> Result<(), HostError>;

    fn get_server_connect_info(
        &self,
        connection: ConnectionId,
    ) -> Result<ServerConnectInfo, HostError>;

    fn get_channel_of_client(
        &self,
        connection: ConnectionId,
        client: ClientId,
    ) -> Result<ChannelId, HostError>;

    fn get_channel_connect_info(
        &self,
        connection: ConnectionId,
        channel: ChannelId,
    ) -> Result<ChannelConnectInfo, HostError>;

    /// Local path of a client's avatar, `None` if the client has none
    fn get_avatar(
        &self,
        connection: ConnectionId,
        client: ClientId,
    ) -> Result<Option<String>, HostError>;

    fn set_plugin_menu_enabled(
        &self,
        plugin_id: &str,
        menu: MenuId,
        enabled: bool,
    ) -> Result<(), HostError>;

    fn request_channel_subscribe(
        &self,
        connection: ConnectionId,
        channels: &[ChannelId],
    ) -> Result<(), HostError>;

    fn request_channel_unsubscribe(
        &self,
        connection: ConnectionId,
        channels: &[ChannelId],
    ) -> Result<(), HostError>;

    fn request_channel_subscribe_all(&self, connection: ConnectionId) -> Result<(), HostError>;

    fn request_channel_unsubscribe_all(&self, connection: ConnectionId) -> Result<(), HostError>;

    fn get_bookmark_list(&self) -> Result<Vec<Bookmark>, HostError>;
}

/// Everything a bridge needs from its host
pub trait Host: HostNotifier + HostConsole + ServerCommands {}

impl<T: HostNotifier + HostConsole + ServerCommands> Host for T {}
