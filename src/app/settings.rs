// Settings module: store (data & persistence) plus closure helpers for access.

pub mod store;

pub use store::{load_settings_from_disk, save_settings_to_disk, AppSettings, APP_SETTINGS};

/// Read settings through a closure without spelling out the lock each time.
pub fn with_settings<F, R>(f: F) -> R
where
    F: FnOnce(&AppSettings) -> R,
{
    let st = APP_SETTINGS.read().unwrap_or_else(|e| e.into_inner());
    f(&st)
}

/// Modify settings through a closure. Does not persist; call `save_settings_to_disk`.
pub fn with_settings_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppSettings) -> R,
{
    let mut st = APP_SETTINGS.write().unwrap_or_else(|e| e.into_inner());
    f(&mut st)
}
