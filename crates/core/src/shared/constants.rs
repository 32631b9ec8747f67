/// Storage key under which the dark mode flag is persisted.
pub const DARK_MODE_KEY: &str = "dark";

/// Directory created under the platform config dir.
pub const APP_DIR_NAME: &str = "Darkmode";

pub const STORE_FILE_NAME: &str = "preferences.json";
