use std::path::PathBuf;

const APP_DIR: &str = "radio-schedule";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/radio-schedule/ (XDG layout)
    // rather than Application Support, for consistency.
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

/// Terminal dark-background hint from `COLORFGBG` ("fg;bg" or "fg;x;bg").
/// Background indexes 0-6 and 8 are the dark ANSI colours.
pub fn os_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .map(|v| colorfgbg_is_dark(&v))
        .unwrap_or(false)
}

pub fn colorfgbg_is_dark(value: &str) -> bool {
    value
        .rsplit(';')
        .next()
        .and_then(|bg| bg.trim().parse::<u8>().ok())
        .map(|bg| bg <= 6 || bg == 8)
        .unwrap_or(false)
}
