// Recording host and device doubles shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;

use gkey_core::{
    push_utf16_label, Bookmark, ChannelConnectInfo, ChannelId, ClientId, ConnectionId,
    DeviceClass, DeviceLabels, HostConsole, HostError, HostNotifier, LabelError, LogLevel, MenuId,
    ServerCommands, ServerConnectInfo,
};

pub const OWN_CLIENT_ID: ClientId = 7;
pub const OWN_CHANNEL_ID: ChannelId = 42;

/// One observed host call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    NotifyKeyEvent {
        plugin_id: String,
        identifier: String,
        is_up: bool,
    },
    Print(String),
    Log {
        text: String,
        severity: LogLevel,
        source: String,
    },
    GetClientId(ConnectionId),
    RequestClientMove {
        connection: ConnectionId,
        client: ClientId,
        channel: ChannelId,
        password: String,
    },
    SendPluginCommand {
        plugin_id: String,
        command: String,
    },
    GetServerConnectInfo,
    GetChannelOfClient(ClientId),
    GetChannelConnectInfo(ChannelId),
    GetAvatar(ClientId),
    SetPluginMenuEnabled {
        plugin_id: String,
        menu: MenuId,
        enabled: bool,
    },
    Subscribe(Vec<ChannelId>),
    Unsubscribe(Vec<ChannelId>),
    SubscribeAll(ConnectionId),
    UnsubscribeAll(ConnectionId),
    GetBookmarkList,
}

impl Call {
    /// Calls that reach the server command interface
    pub fn is_server_call(&self) -> bool {
        !matches!(
            self,
            Call::NotifyKeyEvent { .. } | Call::Print(_) | Call::Log { .. }
        )
    }
}

/// Host double that records every call.
///
/// `fail_requests` makes every server request fail; `fail_client_id` and
/// `fail_channel_of_client` only break the own-client lookups.
#[derive(Debug, Default)]
pub struct MockHost {
    calls: RefCell<Vec<Call>>,
    fail_requests: bool,
    fail_client_id: bool,
    fail_channel_of_client: bool,
    avatar: Option<String>,
    bookmarks: Vec<Bookmark>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_requests: true,
            ..Self::default()
        }
    }

    pub fn with_failing_client_id(mut self) -> Self {
        self.fail_client_id = true;
        self
    }

    pub fn with_failing_channel_of_client(mut self) -> Self {
        self.fail_channel_of_client = true;
        self
    }

    pub fn with_avatar(mut self, path: impl Into<String>) -> Self {
        self.avatar = Some(path.into());
        self
    }

    pub fn with_bookmarks(mut self, bookmarks: Vec<Bookmark>) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn server_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.is_server_call())
            .cloned()
            .collect()
    }

    pub fn prints(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Print(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<(String, LogLevel)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Log { text, severity, .. } => Some((text.clone(), *severity)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn outcome(&self) -> Result<(), HostError> {
        if self.fail_requests {
            Err(HostError::NotConnected)
        } else {
            Ok(())
        }
    }
}

impl HostNotifier for MockHost {
    fn notify_key_event(&self, plugin_id: &str, identifier: &str, is_up: bool) {
        self.record(Call::NotifyKeyEvent {
            plugin_id: plugin_id.to_string(),
            identifier: identifier.to_string(),
            is_up,
        });
    }
}

impl HostConsole for MockHost {
    fn print_to_active_view(&self, text: &str) {
        self.record(Call::Print(text.to_string()));
    }

    fn log(&self, text: &str, severity: LogLevel, source: &str) {
        self.record(Call::Log {
            text: text.to_string(),
            severity,
            source: source.to_string(),
        });
    }
}

impl ServerCommands for MockHost {
    fn get_client_id(&self, connection: ConnectionId) -> Result<ClientId, HostError> {
        self.record(Call::GetClientId(connection));
        if self.fail_client_id {
            return Err(HostError::NotConnected);
        }
        Ok(OWN_CLIENT_ID)
    }

    fn request_client_move(
        &self,
        connection: ConnectionId,
        client: ClientId,
        channel: ChannelId,
        password: &str,
    ) -> Result<(), HostError> {
        self.record(Call::RequestClientMove {
            connection,
            client,
            channel,
            password: password.to_string(),
        });
        self.outcome()
    }

    fn send_plugin_command(
        &self,
        _connection: ConnectionId,
        plugin_id: &str,
        command: &str,
    ) -> Result<(), HostError> {
        self.record(Call::SendPluginCommand {
            plugin_id: plugin_id.to_string(),
            command: command.to_string(),
        });
        self.outcome()
    }

    fn get_server_connect_info(
        &self,
        _connection: ConnectionId,
    ) -> Result<ServerConnectInfo, HostError> {
        self.record(Call::GetServerConnectInfo);
        self.outcome().map(|_| ServerConnectInfo {
            host: "voice.example.org".to_string(),
            port: 9987,
            password: String::new(),
        })
    }

    fn get_channel_of_client(
        &self,
        _connection: ConnectionId,
        client: ClientId,
    ) -> Result<ChannelId, HostError> {
        self.record(Call::GetChannelOfClient(client));
        if self.fail_channel_of_client {
            return Err(HostError::NotFound);
        }
        Ok(OWN_CHANNEL_ID)
    }

    fn get_channel_connect_info(
        &self,
        _connection: ConnectionId,
        channel: ChannelId,
    ) -> Result<ChannelConnectInfo, HostError> {
        self.record(Call::GetChannelConnectInfo(channel));
        self.outcome().map(|_| ChannelConnectInfo {
            path: "Lobby/Raid".to_string(),
            password: "pw".to_string(),
        })
    }

    fn get_avatar(
        &self,
        _connection: ConnectionId,
        client: ClientId,
    ) -> Result<Option<String>, HostError> {
        self.record(Call::GetAvatar(client));
        self.outcome().map(|_| self.avatar.clone())
    }

    fn set_plugin_menu_enabled(
        &self,
        plugin_id: &str,
        menu: MenuId,
        enabled: bool,
    ) -> Result<(), HostError> {
        self.record(Call::SetPluginMenuEnabled {
            plugin_id: plugin_id.to_string(),
            menu,
            enabled,
        });
        self.outcome()
    }

    fn request_channel_subscribe(
        &self,
        _connection: ConnectionId,
        channels: &[ChannelId],
    ) -> Result<(), HostError> {
        self.record(Call::Subscribe(channels.to_vec()));
        self.outcome()
    }

    fn request_channel_unsubscribe(
        &self,
        _connection: ConnectionId,
        channels: &[ChannelId],
    ) -> Result<(), HostError> {
        self.record(Call::Unsubscribe(channels.to_vec()));
        self.outcome()
    }

    fn request_channel_subscribe_all(&self, connection: ConnectionId) -> Result<(), HostError> {
        self.record(Call::SubscribeAll(connection));
        self.outcome()
    }

    fn request_channel_unsubscribe_all(&self, connection: ConnectionId) -> Result<(), HostError> {
        self.record(Call::UnsubscribeAll(connection));
        self.outcome()
    }

    fn get_bookmark_list(&self) -> Result<Vec<Bookmark>, HostError> {
        self.record(Call::GetBookmarkList);
        self.outcome().map(|_| self.bookmarks.clone())
    }
}

/// Device double: mouse buttons 1-8 and G1-G18 in M1-M3 have labels,
/// G13 reports a broken wide string.
#[derive(Debug, Default)]
pub struct MockLabels;

impl DeviceLabels for MockLabels {
    fn get_button_label(&self, index: u32, out: &mut String) -> Result<(), LabelError> {
        if (1..=8).contains(&index) {
            out.push_str("Mouse Button ");
            out.push_str(&index.to_string());
            Ok(())
        } else {
            Err(LabelError::Unavailable {
                device: DeviceClass::Mouse,
                index,
            })
        }
    }

    fn get_key_label(
        &self,
        index: u32,
        modal_state: u32,
        out: &mut String,
    ) -> Result<(), LabelError> {
        if index == 13 {
            return push_utf16_label(&[0x0047, 0xDC00, 0x0047, 0], out);
        }
        if (1..=18).contains(&index) && (1..=3).contains(&modal_state) {
            let wide: Vec<u16> = format!("G{}/M{}", index, modal_state)
                .encode_utf16()
                .chain(std::iter::once(0))
                .collect();
            push_utf16_label(&wide, out)
        } else {
            Err(LabelError::Unavailable {
                device: DeviceClass::Keyboard,
                index,
            })
        }
    }
}
