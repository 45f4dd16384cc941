//! Component and command name tables.
//!
//! Routing and diagnostics data only: a total, never-failing mapping from
//! the two-level numeric address to symbolic names. Unrecognized ids come
//! back as the [`UNKNOWN_NAME`] sentinel so diagnostics keep working on
//! yet-unseen protocol messages.

/// Sentinel name for unrecognized components/commands.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Component ids observed in the protocol.
pub mod components {
    pub const AUTHENTICATION: u16 = 0x0001;
    pub const GAME_MANAGER: u16 = 0x0004;
    pub const REDIRECTOR: u16 = 0x0005;
    pub const STATS: u16 = 0x0007;
    pub const UTIL: u16 = 0x0009;
    pub const MESSAGING: u16 = 0x000F;
    pub const ASSOCIATION_LISTS: u16 = 0x0019;
    pub const GAME_REPORTING: u16 = 0x001C;
    pub const USER_SESSIONS: u16 = 0x7802;
}

/// Command ids the built-in services answer.
pub mod commands {
    pub mod util {
        pub const FETCH_CLIENT_CONFIG: u16 = 0x01;
        pub const PING: u16 = 0x02;
        pub const PRE_AUTH: u16 = 0x07;
        pub const POST_AUTH: u16 = 0x08;
    }
    pub mod redirector {
        pub const GET_SERVER_INSTANCE: u16 = 0x01;
    }
}

/// Symbolic name of a component id, if known.
pub fn lookup_component(component: u16) -> Option<&'static str> {
    use components::*;
    Some(match component {
        AUTHENTICATION => "AUTHENTICATION",
        GAME_MANAGER => "GAME_MANAGER",
        REDIRECTOR => "REDIRECTOR",
        STATS => "STATS",
        UTIL => "UTIL",
        MESSAGING => "MESSAGING",
        ASSOCIATION_LISTS => "ASSOCIATION_LISTS",
        GAME_REPORTING => "GAME_REPORTING",
        USER_SESSIONS => "USER_SESSIONS",
        _ => return None,
    })
}

/// Symbolic name of a (component, command) pair, if known.
pub fn lookup_command(component: u16, command: u16) -> Option<&'static str> {
    use components::*;
    match component {
        AUTHENTICATION => authentication_command(command),
        GAME_MANAGER => game_manager_command(command),
        REDIRECTOR => redirector_command(command),
        STATS => stats_command(command),
        UTIL => util_command(command),
        MESSAGING => messaging_command(command),
        ASSOCIATION_LISTS => association_lists_command(command),
        GAME_REPORTING => game_reporting_command(command),
        USER_SESSIONS => user_sessions_command(command),
        _ => None,
    }
}

/// Total component name: falls back to [`UNKNOWN_NAME`].
pub fn component_name(component: u16) -> &'static str {
    lookup_component(component).unwrap_or(UNKNOWN_NAME)
}

/// Total command name: falls back to [`UNKNOWN_NAME`].
pub fn command_name(component: u16, command: u16) -> &'static str {
    lookup_command(component, command).unwrap_or(UNKNOWN_NAME)
}

fn authentication_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x0A => "CREATE_ACCOUNT",
        0x14 => "UPDATE_ACCOUNT",
        0x1C => "UPDATE_PARENTAL_EMAIL",
        0x1D => "LIST_USER_ENTITLEMENTS_2",
        0x1E => "GET_ACCOUNT",
        0x1F => "GRANT_ENTITLEMENT",
        0x20 => "LIST_ENTITLEMENTS",
        0x21 => "HAS_ENTITLEMENT",
        0x22 => "GET_USE_COUNT",
        0x23 => "DECREMENT_USE_COUNT",
        0x24 => "GET_AUTH_TOKEN",
        0x25 => "GET_HANDOFF_TOKEN",
        0x26 => "GET_PASSWORD_RULES",
        0x27 => "GRANT_ENTITLEMENT_2",
        0x28 => "LOGIN",
        0x29 => "ACCEPT_TOS",
        0x2A => "GET_TOS_INFO",
        0x2B => "MODIFY_ENTITLEMENT_2",
        0x2C => "CONSUME_CODE",
        0x2D => "PASSWORD_FORGOT",
        0x2E => "GET_TOS_CONTENT",
        0x2F => "GET_PRIVACY_POLICY_CONTENT",
        0x30 => "LIST_PERSONA_ENTITLEMENTS_2",
        0x32 => "SILENT_LOGIN",
        0x33 => "CHECK_AGE_REQUIREMENT",
        0x34 => "GET_OPT_IN",
        0x35 => "ENABLE_OPT_IN",
        0x36 => "DISABLE_OPT_IN",
        0x3C => "EXPRESS_LOGIN",
        0x46 => "LOGOUT",
        0x50 => "CREATE_PERSONA",
        0x5A => "GET_PERSONA",
        0x64 => "LIST_PERSONAS",
        0x6E => "LOGIN_PERSONA",
        0x78 => "LOGOUT_PERSONA",
        0x8C => "DELETE_PERSONA",
        0x8D => "DISABLE_PERSONA",
        0x8F => "LIST_DEVICE_ACCOUNTS",
        0x96 => "XBOX_CREATE_ACCOUNT",
        0x98 => "ORIGIN_LOGIN",
        0xA0 => "XBOX_ASSOCIATE_ACCOUNT",
        0xAA => "XBOX_LOGIN",
        0xB4 => "PS3_CREATE_ACCOUNT",
        0xBE => "PS3_ASSOCIATE_ACCOUNT",
        0xC8 => "PS3_LOGIN",
        0xD2 => "VALIDATE_SESSION_KEY",
        0xE6 => "CREATE_WAL_USER_SESSION",
        0xF1 => "ACCEPT_LEGAL_DOCS",
        0xF2 => "GET_LEGAL_DOCS_INFO",
        0xF6 => "GET_TERMS_OF_SERVICE_CONTENT",
        0x12C => "DEVICE_LOGIN_GUEST",
        _ => return None,
    })
}

fn game_manager_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "CREATE_GAME",
        0x02 => "DESTROY_GAME",
        0x03 => "ADVANCE_GAME_STATE",
        0x04 => "SET_GAME_SETTINGS",
        0x05 => "SET_PLAYER_CAPACITY",
        0x06 => "SET_PRESENCE_MODE",
        0x07 => "SET_GAME_ATTRIBUTES",
        0x08 => "SET_PLAYER_ATTRIBUTES",
        0x09 => "JOIN_GAME",
        0x0B => "REMOVE_PLAYER",
        0x0D => "START_MATCHMAKING",
        0x0E => "CANCEL_MATCHMAKING",
        0x0F => "FINALIZE_GAME_CREATION",
        0x11 => "LIST_GAMES",
        0x12 => "SET_PLAYER_CUSTOM_DATA",
        0x13 => "REPLAY_GAME",
        0x14 => "RETURN_DEDICATED_SERVER_TO_POOL",
        0x15 => "JOIN_GAME_BY_GROUP",
        0x16 => "LEAVE_GAME_BY_GROUP",
        0x17 => "MIGRATE_GAME",
        0x18 => "UPDATE_GAME_HOST_MIGRATION_STATUS",
        0x19 => "RESET_DEDICATED_SERVER",
        0x1A => "UPDATE_GAME_SESSION",
        0x1B => "BAN_PLAYER",
        0x1D => "UPDATE_MESH_CONNECTION",
        0x1F => "REMOVE_PLAYER_FROM_BANNED_LIST",
        0x20 => "CLEAR_BANNED_LIST",
        0x21 => "GET_BANNED_LIST",
        0x26 => "ADD_QUEUED_PLAYER_TO_GAME",
        0x27 => "UPDATE_GAME_NAME",
        0x28 => "EJECT_HOST",
        0x50 => "NOTIFY_GAME_UPDATED",
        0x64 => "GET_GAME_LIST_SNAPSHOT",
        0x65 => "GET_GAME_LIST_SUBSCRIPTION",
        0x66 => "DESTROY_GAME_LIST",
        0x67 => "GET_FULL_GAME_DATA",
        0x68 => "GET_MATCH_MAKING_CONFIG",
        0x69 => "GET_GAME_DATA_FROM_ID",
        0x6A => "ADD_ADMIN_PLAYER",
        0x6B => "REMOVE_ADMIN_PLAYER",
        0x6C => "SET_PLAYER_TEAM",
        0x6D => "CHANGE_GAME_TEAM_ID",
        0x6E => "MIGRATE_ADMIN_PLAYER",
        0x6F => "GET_USER_SET_GAME_LIST_SUBSCRIPTION",
        0x70 => "SWAP_PLAYERS_TEAM",
        0x96 => "REGISTER_DYNAMIC_DEDICATED_SERVER_CREATOR",
        0x97 => "UNREGISTER_DYNAMIC_DEDICATED_SERVER_CREATOR",
        _ => return None,
    })
}

fn redirector_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "GET_SERVER_INSTANCE",
        _ => return None,
    })
}

fn stats_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "GET_STAT_DESCS",
        0x02 => "GET_STATS",
        0x03 => "GET_STAT_GROUP_LIST",
        0x04 => "GET_STAT_GROUP",
        0x05 => "GET_STATS_BY_GROUP",
        0x06 => "GET_DATE_RANGE",
        0x07 => "GET_ENTITY_COUNT",
        0x0A => "GET_LEADERBOARD_GROUP",
        0x0B => "GET_LEADERBOARD_FOLDER_GROUP",
        0x0C => "GET_LEADERBOARD",
        0x0D => "GET_CENTERED_LEADERBOARD",
        0x0E => "GET_FILTERED_LEADERBOARD",
        0x0F => "GET_KEY_SCOPES_MAP",
        0x10 => "GET_STATS_BY_GROUP_ASYNC",
        0x11 => "GET_LEADERBOARD_TREE_ASYNC",
        0x12 => "GET_LEADERBOARD_ENTITY_COUNT",
        0x13 => "GET_STAT_CATEGORY_LIST",
        0x14 => "GET_PERIOD_IDS",
        0x15 => "GET_LEADERBOARD_RAW",
        0x16 => "GET_CENTERED_LEADERBOARD_RAW",
        0x17 => "GET_FILTERED_LEADERBOARD_RAW",
        0x18 => "CHANGE_KEY_SCOPE_VALUE",
        _ => return None,
    })
}

fn util_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "FETCH_CLIENT_CONFIG",
        0x02 => "PING",
        0x03 => "SET_CLIENT_DATA",
        0x04 => "LOCALIZE_STRINGS",
        0x05 => "GET_TELEMETRY_SERVER",
        0x06 => "GET_TICKER_SERVER",
        0x07 => "PRE_AUTH",
        0x08 => "POST_AUTH",
        0x0A => "USER_SETTINGS_LOAD",
        0x0B => "USER_SETTINGS_SAVE",
        0x0C => "USER_SETTINGS_LOAD_ALL",
        0x0E => "DELETE_USER_SETTINGS",
        0x14 => "FILTER_FOR_PROFANITY",
        0x15 => "FETCH_QOS_CONFIG",
        0x16 => "SET_CLIENT_METRICS",
        0x17 => "SET_CONNECTION_STATE",
        0x18 => "GET_PSS_CONFIG",
        0x19 => "GET_USER_OPTIONS",
        0x1A => "SET_USER_OPTIONS",
        0x1B => "SUSPEND_USER_PING",
        _ => return None,
    })
}

fn messaging_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "SEND_MESSAGE",
        0x02 => "FETCH_MESSAGES",
        0x03 => "PURGE_MESSAGES",
        0x04 => "TOUCH_MESSAGES",
        0x05 => "GET_MESSAGES",
        _ => return None,
    })
}

fn association_lists_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "ADD_USERS_TO_LIST",
        0x03 => "CLEAR_LISTS",
        0x04 => "SET_USERS_TO_LIST",
        0x05 => "GET_LIST_FOR_USER",
        0x06 => "GET_LISTS",
        0x07 => "SUBSCRIBE_TO_LISTS",
        0x08 => "UNSUBSCRIBE_FROM_LISTS",
        0x09 => "GET_CONFIG_LISTS_INFO",
        _ => return None,
    })
}

fn game_reporting_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "SUBMIT_GAME_REPORT",
        0x02 => "SUBMIT_OFFLINE_GAME_REPORT",
        0x03 => "SUBMIT_GAME_EVENTS",
        0x04 => "GET_GAME_REPORT_QUERY",
        0x05 => "GET_GAME_REPORT_QUERIES_LIST",
        0x06 => "GET_GAME_REPORTS",
        0x07 => "GET_GAME_REPORT_VIEW",
        0x08 => "GET_GAME_REPORT_VIEW_INFO",
        0x09 => "GET_GAME_REPORT_VIEW_INFO_LIST",
        0x0A => "GET_GAME_REPORT_TYPES",
        0x0B => "UPDATE_METRIC",
        0x0C => "GET_GAME_REPORT_COLUMN_INFO",
        0x0D => "GET_GAME_REPORT_COLUMN_VALUES",
        0x64 => "SUBMIT_TRUSTED_MID_GAME_REPORT",
        0x65 => "SUBMIT_TRUSTED_END_GAME_REPORT",
        _ => return None,
    })
}

fn user_sessions_command(command: u16) -> Option<&'static str> {
    Some(match command {
        0x01 => "START_SESSION",
        0x03 => "FETCH_EXTENDED_DATA",
        0x05 => "UPDATE_EXTENDED_DATA_ATTRIBUTE",
        0x08 => "UPDATE_HARDWARE_FLAGS",
        0x0C => "LOOKUP_USER",
        0x0D => "LOOKUP_USERS",
        0x0E => "LOOKUP_USERS_BY_PREFIX",
        0x14 => "UPDATE_NETWORK_INFO",
        0x17 => "LOOKUP_USER_GEO_IP_DATA",
        0x18 => "OVERRIDE_USER_GEO_IP_DATA",
        0x19 => "UPDATE_USER_SESSION_CLIENT_DATA",
        0x1A => "SET_USER_INFO_ATTRIBUTE",
        0x1B => "RESET_USER_GEO_IP_DATA",
        0x20 => "LOOKUP_USER_SESSION_ID",
        0x21 => "FETCH_LAST_LOCALE_USED_AND_AUTH_ERROR",
        0x22 => "FETCH_USER_FIRST_LAST_AUTH_TIME",
        0x23 => "RESUME_SESSION",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn known_pairs_resolve() {
        assert_eq!(
            lookup_command(components::AUTHENTICATION, 0x28),
            Some("LOGIN")
        );
        assert_eq!(
            lookup_command(components::UTIL, commands::util::PING),
            Some("PING")
        );
        assert_eq!(lookup_component(components::USER_SESSIONS), Some("USER_SESSIONS"));
    }

    #[test]
    fn unknown_pairs_fall_back_to_sentinel() {
        assert_eq!(component_name(0x1234), UNKNOWN_NAME);
        assert_eq!(command_name(components::UTIL, 0xFFFF), UNKNOWN_NAME);
        assert_eq!(command_name(0x1234, 0x01), UNKNOWN_NAME);
    }
}
