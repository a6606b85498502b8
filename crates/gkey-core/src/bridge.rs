// GKey Core - Bridge
// Owns the plugin state and exposes the entry points the host calls

use crate::code::DeviceEventCode;
use crate::command::{CommandContext, Dispatcher};
use crate::host::{ConnectionId, Host};
use crate::identifier::{device_name, encode, DeviceNames};
use crate::labels::{DeviceLabels, KeyLabeler};

/// Static plugin metadata reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Must equal the host's plugin API major version
    pub api_version: u32,
    pub author: &'static str,
    pub description: &'static str,
    /// Namespace for stored hotkeys, unique across plugins
    pub key_prefix: &'static str,
}

impl PluginInfo {
    pub const DEFAULT: PluginInfo = PluginInfo {
        name: "G-Key Plugin",
        version: "1.1",
        api_version: 26,
        author: "Jules Blok",
        description: "This plugin provides support for Logitech devices with G-Keys for hotkeys.",
        key_prefix: "gkey",
    };
}

impl Default for PluginInfo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors registering the plugin identity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Plugin identity already registered as '{0}'")]
    AlreadyRegistered(String),

    #[error("Plugin identity cannot be empty")]
    Empty,
}

/// Receiver for raw device events.
///
/// The device SDK adapter calls this once per G-key or button transition.
pub trait DeviceEventSink {
    fn on_device_event(&mut self, code: DeviceEventCode, raw_label: &str);
}

/// Runtime options for a bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub device_names: DeviceNames,
    /// Source tag for host log entries
    pub log_source: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            device_names: DeviceNames::default(),
            log_source: "GKeyBridge".to_string(),
        }
    }
}

/// The plugin instance.
///
/// Created once at startup and handed every host and device callback. All
/// mutable state lives here: the plugin identity token and the display
/// label buffer.
pub struct Bridge<H, D> {
    host: H,
    labels: D,
    plugin_id: Option<String>,
    labeler: KeyLabeler,
    dispatcher: Dispatcher,
    device_names: DeviceNames,
}

impl<H: Host, D: DeviceLabels> Bridge<H, D> {
    pub fn new(host: H, labels: D) -> Self {
        Self::with_config(host, labels, BridgeConfig::default())
    }

    pub fn with_config(host: H, labels: D, config: BridgeConfig) -> Self {
        Self {
            host,
            labels,
            plugin_id: None,
            labeler: KeyLabeler::new(),
            dispatcher: Dispatcher::new(config.log_source),
            device_names: config.device_names,
        }
    }

    /// Store the identity token the host assigned.
    ///
    /// The token can be set once; release it before registering again.
    pub fn register_plugin_id(&mut self, id: &str) -> Result<(), RegistrationError> {
        if id.is_empty() {
            return Err(RegistrationError::Empty);
        }
        if let Some(existing) = &self.plugin_id {
            return Err(RegistrationError::AlreadyRegistered(existing.clone()));
        }
        log::debug!("registered plugin id '{}'", id);
        self.plugin_id = Some(id.to_string());
        Ok(())
    }

    /// Drop the identity token. Returns false if none was held.
    pub fn release_plugin_id(&mut self) -> bool {
        self.plugin_id.take().is_some()
    }

    pub fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Friendly key text for a stored identifier, or the identifier itself
    pub fn display_key_text<'a>(&'a mut self, identifier: &'a str) -> &'a str {
        self.labeler.display_label(&self.labels, identifier)
    }

    /// Device family name for a stored identifier
    pub fn key_device_name(&self, identifier: &str) -> &str {
        device_name(identifier, &self.device_names)
    }

    /// Process a console command. Returns true if the command was handled.
    pub fn handle_command(&self, connection: ConnectionId, text: &str) -> bool {
        let ctx = CommandContext {
            connection,
            plugin_id: self.plugin_id.as_deref(),
            console: &self.host,
            server: &self.host,
        };
        self.dispatcher.handle_line(text, &ctx).is_handled()
    }
}

impl<H: Host, D: DeviceLabels> DeviceEventSink for Bridge<H, D> {
    fn on_device_event(&mut self, code: DeviceEventCode, raw_label: &str) {
        let identifier = encode(&code);
        log::trace!(
            "device event {} ({}) press={}",
            identifier,
            raw_label,
            code.is_press
        );

        match &self.plugin_id {
            Some(plugin_id) => {
                self.host
                    .notify_key_event(plugin_id, identifier.as_str(), !code.is_press)
            }
            None => log::warn!("dropping key event {}: plugin id not registered", identifier),
        }
    }
}
