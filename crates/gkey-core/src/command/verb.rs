// GKey Command API - Verb Table
// The closed set of console commands and their string names

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// A supported console command.
///
/// The serialized names form the verb table; lookup is exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Verb {
    /// Move own client to a channel: `join <channelID> [password]`
    #[strum(serialize = "join")]
    Join,
    /// Send a plugin command to the server: `command <text>`
    #[strum(serialize = "command")]
    Command,
    #[strum(serialize = "server_info")]
    ServerInfo,
    #[strum(serialize = "channel_info")]
    ChannelInfo,
    /// `avatar <clientID>`
    #[strum(serialize = "avatar")]
    Avatar,
    /// `enable_menu <menuID> <0|1>`
    #[strum(serialize = "enable_menu")]
    EnableMenu,
    /// `subscribe <channelID>`
    #[strum(serialize = "subscribe")]
    Subscribe,
    /// `unsubscribe <channelID>`
    #[strum(serialize = "unsubscribe")]
    Unsubscribe,
    #[strum(serialize = "subscribeall")]
    SubscribeAll,
    #[strum(serialize = "unsubscribeall")]
    UnsubscribeAll,
    #[strum(serialize = "bookmarkslist")]
    BookmarksList,
}

impl Verb {
    /// Number of parameters the verb cannot run without
    pub fn required_args(self) -> usize {
        match self {
            Verb::EnableMenu => 2,
            Verb::Join | Verb::Command | Verb::Avatar | Verb::Subscribe | Verb::Unsubscribe => 1,
            Verb::ServerInfo
            | Verb::ChannelInfo
            | Verb::SubscribeAll
            | Verb::UnsubscribeAll
            | Verb::BookmarksList => 0,
        }
    }

    /// Message shown when required parameters are missing
    pub fn missing_args_message(self) -> &'static str {
        match self {
            Verb::Join | Verb::Subscribe | Verb::Unsubscribe => "Missing channel ID parameter.",
            Verb::Command => "Missing command parameter.",
            Verb::Avatar => "Missing client ID parameter.",
            Verb::EnableMenu => "Usage is: enable_menu <menuID> <0|1>",
            Verb::ServerInfo
            | Verb::ChannelInfo
            | Verb::SubscribeAll
            | Verb::UnsubscribeAll
            | Verb::BookmarksList => "",
        }
    }

    /// Verb name as typed by the operator
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Result of looking up a verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Run(Verb),
    Unrecognized,
}

impl Action {
    pub fn verb(self) -> Option<Verb> {
        match self {
            Action::Run(verb) => Some(verb),
            Action::Unrecognized => None,
        }
    }
}

/// Resolve a verb name to an action
pub fn resolve(verb: &str) -> Action {
    verb.parse::<Verb>()
        .map(Action::Run)
        .unwrap_or(Action::Unrecognized)
}
