// GKey Core Library
// Hotkey identifier codec and console command dispatch for G-key devices

pub mod bridge;
pub mod code;
pub mod command;
pub mod host;
pub mod identifier;
pub mod labels;
pub mod lenient;

#[cfg(feature = "settings")]
pub mod settings;

pub use bridge::{Bridge, BridgeConfig, DeviceEventSink, PluginInfo, RegistrationError};
pub use code::{DeviceClass, DeviceEventCode};
pub use command::{
    resolve, tokenize, Action, CommandContext, CommandLine, DispatchOutcome, Dispatcher, Verb,
};
pub use host::{
    Bookmark, ChannelConnectInfo, ChannelId, ClientId, ConnectionId, Host, HostConsole,
    HostError, HostNotifier, LogLevel, MenuId, ServerCommands, ServerConnectInfo,
};
pub use identifier::{
    decode, device_name, encode, DeviceNames, Identifier, KEYBOARD_TAG, MAX_IDENTIFIER_LEN,
    MOUSE_TAG,
};
pub use labels::{push_utf16_label, DeviceLabels, KeyLabeler, LabelError};
pub use lenient::parse_lenient;

#[cfg(feature = "settings")]
pub use settings::{Settings, SettingsError};
