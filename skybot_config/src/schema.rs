use serde::{Deserialize, Serialize};
use skybot_core::TemperatureUnit;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub watson: WatsonConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WatsonConfig {
    pub username: String,
    pub password: String,
    pub workspace_id: String,
    #[serde(default = "WatsonConfig::default_url")]
    pub url: String,
    #[serde(default = "WatsonConfig::default_version")]
    pub version: String,
}

impl WatsonConfig {
    fn default_url() -> String {
        "https://gateway.watsonplatform.net/conversation/api".to_string()
    }

    fn default_version() -> String {
        "2017-05-26".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WeatherConfig {
    #[serde(default = "WeatherConfig::default_url")]
    pub url: String,
    #[serde(default)]
    pub units: TemperatureUnit,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            units: TemperatureUnit::default(),
        }
    }
}

impl WeatherConfig {
    fn default_url() -> String {
        "https://wttr.in".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
    #[serde(default = "ServerConfig::default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            public_dir: Self::default_public_dir(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    const fn default_port() -> u16 {
        3000
    }

    fn default_public_dir() -> PathBuf {
        PathBuf::from("public")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ConversationConfig {
    /// Minimum confidence for an entity to be considered. The default of
    /// 0.0 accepts every entity the dialogue service recognizes.
    #[serde(default)]
    pub entity_confidence_floor: f64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'skybot init' to create config.",
                config_path.display()
            );
        }

        debug!("Reading config from {}", config_path.display());
        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(".skybot");

        Ok(config_dir.join("config.json"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(".skybot");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "watson": {
    "username": "your-watson-username-here",
    "password": "your-watson-password-here",
    "workspace_id": "your-workspace-id-here"
  },
  "weather": {
    "url": "https://wttr.in",
    "units": "F"
  },
  "server": {
    "host": "127.0.0.1",
    "port": 3000,
    "public_dir": "public"
  },
  "conversation": {
    "entity_confidence_floor": 0.0
  }
}"#;

        std::fs::write(&config_path, config_template)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Watson Assistant credentials");
        println!("   2. Run 'skybot serve' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - weather.units: C or F for weather reports");
        println!("   - server.public_dir: directory of static assets to serve");
        println!(
            "   - conversation.entity_confidence_floor: raise above 0.0 to drop low-confidence entities"
        );
        println!();
        Ok(())
    }
}
