// Single source of truth for config field defaults.

pub const DEFAULT_ENABLED: bool = true;
pub const DEFAULT_DEBUG: bool = false;

pub fn default_server_id() -> uuid::Uuid {
    uuid::Uuid::new_v4()
}

pub fn default_enabled() -> bool {
    DEFAULT_ENABLED
}

pub fn default_debug() -> bool {
    DEFAULT_DEBUG
}
