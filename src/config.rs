use crate::settings::{CfgDefaultKeymaps, Keymap, Settings};
use eyre::Result;
use std::{fs, path::Path, path::PathBuf};

pub const CONFIG_FILE_NAME: &str = "configuration.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub keymap: Keymap,
    keymap_user_dict: CfgDefaultKeymaps, // Used for building help menu text
    filepath: PathBuf,
}

impl Config {
    /// Loads the configuration from the app data directory, writing a default
    /// file on first run.
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join(CONFIG_FILE_NAME);

        if filepath.exists() {
            return Self::load_from(filepath);
        }

        // Save initial config if it doesn't exist
        let config = Self::with_settings(Settings::default(), CfgDefaultKeymaps::default())
            .at_path(filepath);
        config.save()?;
        log::info!("Wrote default configuration to {}", config.filepath.display());
        Ok(config)
    }

    /// Get the configuration file path
    pub fn filepath(&self) -> &PathBuf {
        &self.filepath
    }

    /// Get the user-configured keymap dictionary (used for help menu text)
    pub fn keymap_user_dict(&self) -> &CfgDefaultKeymaps {
        &self.keymap_user_dict
    }

    /// Create a config that is not backed by a loaded file
    pub fn with_settings(settings: Settings, keymap_user_dict: CfgDefaultKeymaps) -> Self {
        let filepath = get_app_data_prefix()
            .map(|prefix| prefix.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE_NAME));
        let keymap = Keymap::from_user_dict(&keymap_user_dict);

        Self {
            settings,
            keymap,
            keymap_user_dict,
            filepath,
        }
    }

    fn at_path(mut self, filepath: PathBuf) -> Self {
        self.filepath = filepath;
        self
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_json = serde_json::json!({
            "Setting": self.settings,
            "Keymap": self.keymap_user_dict,
        });

        let config_str = serde_json::to_string_pretty(&config_json)?;

        // Ensure directory exists before writing
        if let Some(parent) = self.filepath.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.filepath, config_str)?;
        Ok(())
    }

    /// Load configuration from a custom path. Missing or unreadable sections
    /// fall back to defaults.
    pub fn load_from(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();
        let mut keymap_user_dict = CfgDefaultKeymaps::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            match serde_json::from_str::<serde_json::Value>(&config_str) {
                Ok(user_config) => {
                    if let Some(section) = user_config.get("Setting") {
                        match serde_json::from_value::<Settings>(section.clone()) {
                            Ok(user_settings) => settings.merge(user_settings),
                            Err(err) => log::warn!(
                                "Ignoring invalid \"Setting\" section in {}: {}",
                                filepath.display(),
                                err
                            ),
                        }
                    }
                    if let Some(section) = user_config.get("Keymap") {
                        match serde_json::from_value::<CfgDefaultKeymaps>(section.clone()) {
                            Ok(user_keymap) => keymap_user_dict.merge(user_keymap),
                            Err(err) => log::warn!(
                                "Ignoring invalid \"Keymap\" section in {}: {}",
                                filepath.display(),
                                err
                            ),
                        }
                    }
                }
                Err(err) => {
                    log::warn!(
                        "Could not parse {}, using defaults: {}",
                        filepath.display(),
                        err
                    );
                }
            }
        }

        Ok(Self::with_settings(settings, keymap_user_dict).at_path(filepath))
    }
}

/// Directory holding the configuration and log files.
pub fn get_app_data_prefix() -> Result<PathBuf> {
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        let path = PathBuf::from(config_home).join("popread");
        return Ok(path);
    } else if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home.clone()).join(".config").join("popread");
        if path.exists() || Path::new(&home).join(".config").exists() {
            return Ok(path);
        } else {
            return Ok(PathBuf::from(home).join(".popread"));
        }
    } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
        return Ok(PathBuf::from(user_profile).join(".popread"));
    }

    Err(eyre::eyre!(
        "Could not determine application data directory"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{CfgDefaultKeymaps, Settings};
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use tempfile::tempdir;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_test_environment(dir: &tempfile::TempDir) {
        unsafe {
            env::set_var("XDG_CONFIG_HOME", dir.path());
            env::remove_var("HOME");
            env::remove_var("USERPROFILE");
        }
    }

    fn restore_test_environment(
        original_home: Option<std::ffi::OsString>,
        original_xdg_config_home: Option<std::ffi::OsString>,
        original_userprofile: Option<std::ffi::OsString>,
    ) {
        unsafe {
            if let Some(home) = original_home {
                env::set_var("HOME", home);
            } else {
                env::remove_var("HOME");
            }
            if let Some(xdg) = original_xdg_config_home {
                env::set_var("XDG_CONFIG_HOME", xdg);
            } else {
                env::remove_var("XDG_CONFIG_HOME");
            }
            if let Some(profile) = original_userprofile {
                env::set_var("USERPROFILE", profile);
            } else {
                env::remove_var("USERPROFILE");
            }
        }
    }

    #[test]
    fn test_config_new_no_existing_file() -> Result<()> {
        let _env_lock = lock_env();
        let original_home = env::var_os("HOME");
        let original_xdg_config_home = env::var_os("XDG_CONFIG_HOME");
        let original_userprofile = env::var_os("USERPROFILE");

        let dir = tempdir()?;
        set_test_environment(&dir);

        let config = Config::new()?;
        let expected_filepath = dir.path().join("popread").join("configuration.json");

        assert_eq!(config.filepath, expected_filepath);
        assert!(expected_filepath.exists());

        let config_str = fs::read_to_string(&expected_filepath)?;
        let json_value: serde_json::Value = serde_json::from_str(&config_str)?;
        let loaded_settings: Settings = serde_json::from_value(json_value["Setting"].clone())?;
        assert_eq!(loaded_settings, Settings::default());
        let loaded_keymap: CfgDefaultKeymaps =
            serde_json::from_value(json_value["Keymap"].clone())?;
        assert_eq!(loaded_keymap, CfgDefaultKeymaps::default());

        restore_test_environment(
            original_home,
            original_xdg_config_home,
            original_userprofile,
        );
        Ok(())
    }

    #[test]
    fn test_config_new_with_existing_file() -> Result<()> {
        let _env_lock = lock_env();
        let original_home = env::var_os("HOME");
        let original_xdg_config_home = env::var_os("XDG_CONFIG_HOME");
        let original_userprofile = env::var_os("USERPROFILE");

        let dir = tempdir()?;
        set_test_environment(&dir);

        let config_path = dir.path().join("popread").join("configuration.json");
        fs::create_dir_all(config_path.parent().unwrap())?;
        let user_config = serde_json::json!({
            "Setting": { "font_size": 20, "start_in_dark_mode": true },
            "Keymap": { "quit": "x" }
        });
        fs::write(&config_path, serde_json::to_string(&user_config)?)?;

        let config = Config::new()?;
        assert_eq!(config.settings.font_size, 20);
        assert!(config.settings.start_in_dark_mode);
        assert_eq!(config.keymap.quit, 'x');
        assert_eq!(config.keymap_user_dict().quit, "x");

        restore_test_environment(
            original_home,
            original_xdg_config_home,
            original_userprofile,
        );
        Ok(())
    }

    #[test]
    fn test_get_app_data_prefix() {
        let _env_lock = lock_env();
        let original_home = env::var_os("HOME");
        let original_xdg_config_home = env::var_os("XDG_CONFIG_HOME");
        let original_userprofile = env::var_os("USERPROFILE");

        unsafe {
            env::set_var("XDG_CONFIG_HOME", "/tmp/xdg");
        }
        assert_eq!(get_app_data_prefix().unwrap(), PathBuf::from("/tmp/xdg/popread"));

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
            env::remove_var("HOME");
            env::set_var("USERPROFILE", "/tmp/profile");
        }
        assert_eq!(get_app_data_prefix().unwrap(), PathBuf::from("/tmp/profile/.popread"));

        unsafe {
            env::remove_var("USERPROFILE");
        }
        assert!(get_app_data_prefix().is_err());

        restore_test_environment(
            original_home,
            original_xdg_config_home,
            original_userprofile,
        );
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("custom.json");

        let mut settings = Settings::default();
        settings.font_size = 22;
        settings.auto_hide_controls = false;
        let mut keymap = CfgDefaultKeymaps::default();
        keymap.page_down = "n".to_string();

        let config = Config::with_settings(settings.clone(), keymap).at_path(path.clone());
        config.save()?;

        let loaded = Config::load_from(path)?;
        assert_eq!(loaded.settings, settings);
        assert_eq!(loaded.keymap.page_down, 'n');
        Ok(())
    }

    #[test]
    fn test_config_invalid_json() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("invalid_config.json");

        // Write invalid JSON
        fs::write(&config_path, "{ invalid json }")?;

        // Loading should fallback to defaults
        let config = Config::load_from(config_path)?;
        assert_eq!(config.settings, Settings::default());
        Ok(())
    }

    #[test]
    fn test_config_partial_settings() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("partial_config.json");

        let partial_config = serde_json::json!({
            "Setting": {
                "mouse_support": false,
                "dark_color_fg": 100
            },
            "Keymap": {
                "next_sentence": "J",
                "quit": "Q"
            }
        });
        fs::write(&config_path, serde_json::to_string(&partial_config)?)?;

        let config = Config::load_from(config_path)?;

        // Custom settings should be loaded
        assert!(!config.settings.mouse_support);
        assert_eq!(config.settings.dark_color_fg, 100);
        assert_eq!(config.keymap_user_dict().next_sentence, "J");
        assert_eq!(config.keymap.quit, 'Q');

        // Default settings should remain for unspecified values
        assert_eq!(config.settings.font_size, 16);
        assert_eq!(config.settings.light_color_bg, 255);
        assert_eq!(config.keymap.page_up, 'h');
        Ok(())
    }

    #[test]
    fn test_config_edge_cases() -> Result<()> {
        let dir = tempdir()?;

        // Empty config file
        let empty_config_path = dir.path().join("empty_config.json");
        fs::write(&empty_config_path, "")?;
        let config = Config::load_from(empty_config_path)?;
        assert_eq!(config.settings, Settings::default());

        // Wrong type inside a section falls back for that section only
        let mistyped_path = dir.path().join("mistyped.json");
        let mistyped = serde_json::json!({
            "Setting": { "font_size": "large" },
            "Keymap": { "help": "H" }
        });
        fs::write(&mistyped_path, serde_json::to_string(&mistyped)?)?;
        let config2 = Config::load_from(mistyped_path)?;
        assert_eq!(config2.settings, Settings::default());
        assert_eq!(config2.keymap.help, 'H');

        // Missing file gives defaults without creating it
        let missing = dir.path().join("missing.json");
        let config3 = Config::load_from(missing.clone())?;
        assert_eq!(config3.filepath(), &missing);
        assert!(!missing.exists());
        Ok(())
    }
}
