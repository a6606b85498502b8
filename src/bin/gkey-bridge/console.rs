// GKey Bridge Console Host
// Terminal stand-ins for the host client and the G-key SDK

use std::cell::RefCell;
use std::collections::BTreeSet;

use gkey_core::{
    push_utf16_label, Bookmark, ChannelConnectInfo, ChannelId, ClientId, ConnectionId,
    DeviceClass, DeviceLabels, HostConsole, HostError, HostNotifier, LabelError, LogLevel, MenuId,
    ServerCommands, ServerConnectInfo,
};

const OWN_CLIENT_ID: ClientId = 1;
const DEFAULT_CHANNEL_ID: ChannelId = 1;

/// Host that prints notifications to stdout and serves a fake server.
///
/// With `online == false` every server request fails with `NotConnected`.
pub struct ConsoleHost {
    online: bool,
    channel: RefCell<ChannelId>,
    subscribed: RefCell<BTreeSet<ChannelId>>,
}

impl ConsoleHost {
    pub fn new(online: bool) -> Self {
        Self {
            online,
            channel: RefCell::new(DEFAULT_CHANNEL_ID),
            subscribed: RefCell::new(BTreeSet::new()),
        }
    }

    fn connected(&self, connection: ConnectionId) -> Result<(), HostError> {
        if !self.online {
            return Err(HostError::NotConnected);
        }
        if connection == 0 {
            return Err(HostError::InvalidParameter);
        }
        Ok(())
    }
}

impl HostNotifier for ConsoleHost {
    fn notify_key_event(&self, plugin_id: &str, identifier: &str, is_up: bool) {
        let state = if is_up { "up" } else { "down" };
        println!("[{}] hotkey {} {}", plugin_id, identifier, state);
    }
}

impl HostConsole for ConsoleHost {
    fn print_to_active_view(&self, text: &str) {
        println!("{}", text);
    }

    fn log(&self, text: &str, severity: LogLevel, source: &str) {
        log::log!(log::Level::from(severity), "[{}] {}", source, text);
    }
}

impl ServerCommands for ConsoleHost {
    fn get_client_id(&self, connection: ConnectionId) -> Result<ClientId, HostError> {
        self.connected(connection)?;
        Ok(OWN_CLIENT_ID)
    }

    fn request_client_move(
        &self,
        connection: ConnectionId,
        client: ClientId,
        channel: ChannelId,
        password: &str,
    ) -> Result<(), HostError> {
        self.connected(connection)?;
        if channel == 0 {
            return Err(HostError::NotFound);
        }
        log::info!(
            "moving client {} to channel {}{}",
            client,
            channel,
            if password.is_empty() { "" } else { " (with password)" }
        );
        *self.channel.borrow_mut() = channel;
        Ok(())
    }

    fn send_plugin_command(
        &self,
        connection: ConnectionId,
        plugin_id: &str,
        command: &str,
    ) -> Result<(), HostError> {
        self.connected(connection)?;
        log::info!("plugin command from {}: {}", plugin_id, command);
        Ok(())
    }

    fn get_server_connect_info(
        &self,
        connection: ConnectionId,
    ) -> Result<ServerConnectInfo, HostError> {
        self.connected(connection)?;
        Ok(ServerConnectInfo {
            host: "localhost".to_string(),
            port: 9987,
            password: String::new(),
        })
    }

    fn get_channel_of_client(
        &self,
        connection: ConnectionId,
        _client: ClientId,
    ) -> Result<ChannelId, HostError> {
        self.connected(connection)?;
        Ok(*self.channel.borrow())
    }

    fn get_channel_connect_info(
        &self,
        connection: ConnectionId,
        channel: ChannelId,
    ) -> Result<ChannelConnectInfo, HostError> {
        self.connected(connection)?;
        Ok(ChannelConnectInfo {
            path: format!("Default Channel/Sub {}", channel),
            password: String::new(),
        })
    }

    fn get_avatar(
        &self,
        connection: ConnectionId,
        client: ClientId,
    ) -> Result<Option<String>, HostError> {
        self.connected(connection)?;
        if client == OWN_CLIENT_ID {
            Ok(Some("cache/avatar_own".to_string()))
        } else {
            Ok(None)
        }
    }

    fn set_plugin_menu_enabled(
        &self,
        plugin_id: &str,
        menu: MenuId,
        enabled: bool,
    ) -> Result<(), HostError> {
        log::info!(
            "{} menu {} for {}",
            if enabled { "enabling" } else { "disabling" },
            menu,
            plugin_id
        );
        Ok(())
    }

    fn request_channel_subscribe(
        &self,
        connection: ConnectionId,
        channels: &[ChannelId],
    ) -> Result<(), HostError> {
        self.connected(connection)?;
        self.subscribed.borrow_mut().extend(channels.iter().copied());
        log::info!("subscribed: {:?}", self.subscribed.borrow());
        Ok(())
    }

    fn request_channel_unsubscribe(
        &self,
        connection: ConnectionId,
        channels: &[ChannelId],
    ) -> Result<(), HostError> {
        self.connected(connection)?;
        let mut subscribed = self.subscribed.borrow_mut();
        for channel in channels {
            subscribed.remove(channel);
        }
        log::info!("subscribed: {:?}", subscribed);
        Ok(())
    }

    fn request_channel_subscribe_all(&self, connection: ConnectionId) -> Result<(), HostError> {
        self.connected(connection)?;
        log::info!("subscribed to all channels");
        Ok(())
    }

    fn request_channel_unsubscribe_all(&self, connection: ConnectionId) -> Result<(), HostError> {
        self.connected(connection)?;
        self.subscribed.borrow_mut().clear();
        log::info!("unsubscribed from all channels");
        Ok(())
    }

    fn get_bookmark_list(&self) -> Result<Vec<Bookmark>, HostError> {
        Ok(vec![
            Bookmark::entry("Local Server"),
            Bookmark::folder(
                "Communities",
                vec![Bookmark::entry("Raid Night"), Bookmark::entry("Speedrun")],
            ),
        ])
    }
}

/// Label table shaped like a G-series keyboard (G1-G18, M1-M3) and mouse
/// (buttons 1-20). Labels are produced as wide strings, as the SDK does.
pub struct DemoLabels;

impl DeviceLabels for DemoLabels {
    fn get_button_label(&self, index: u32, out: &mut String) -> Result<(), LabelError> {
        if !(1..=20).contains(&index) {
            return Err(LabelError::Unavailable {
                device: DeviceClass::Mouse,
                index,
            });
        }
        push_utf16_label(&wide(&format!("Mouse Button {}", index)), out)
    }

    fn get_key_label(
        &self,
        index: u32,
        modal_state: u32,
        out: &mut String,
    ) -> Result<(), LabelError> {
        if !(1..=18).contains(&index) || !(1..=3).contains(&modal_state) {
            return Err(LabelError::Unavailable {
                device: DeviceClass::Keyboard,
                index,
            });
        }
        push_utf16_label(&wide(&format!("G{}/M{}", index, modal_state)), out)
    }
}

fn wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}
