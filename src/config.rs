use serde::{Deserialize, Serialize};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory of the pre-built series index
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on the candidate set of one similarity query
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,

    /// Number of recommendations shown per view
    #[serde(default = "default_output_limit")]
    pub output_limit: usize,

    /// Upper bound on title search hits
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Probability of swapping a popularity slot for a female-creator pick
    #[serde(default = "default_gender_blend_factor")]
    pub gender_blend_factor: f64,

    /// Deadline for a single index request, in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Prefix prepended to `tmdb_poster_path`
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_primary_button")]
    pub primary_button: String,

    #[serde(default = "default_secondary_button")]
    pub secondary_button: String,

    #[serde(default = "default_chart_male_color")]
    pub chart_male_color: String,

    #[serde(default = "default_chart_female_color")]
    pub chart_female_color: String,

    #[serde(default = "default_chart_non_binary_color")]
    pub chart_non_binary_color: String,
}

/// Colours handed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Theme {
    pub primary_color: String,
    pub primary_button: String,
    pub secondary_button: String,
    /// Pie chart colours in male, female, non-binary order
    pub chart_colors: [String; 3],
}

fn default_index_path() -> String {
    "index".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_similar_limit() -> usize {
    25
}

fn default_output_limit() -> usize {
    5
}

fn default_search_limit() -> usize {
    20
}

fn default_gender_blend_factor() -> f64 {
    0.5
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w200".to_string()
}

fn default_primary_color() -> String {
    "#31356e".to_string()
}

fn default_primary_button() -> String {
    "#2d8bba".to_string()
}

fn default_secondary_button() -> String {
    "#31356e".to_string()
}

fn default_chart_male_color() -> String {
    "#31356e".to_string()
}

fn default_chart_female_color() -> String {
    "#2d8bba".to_string()
}

fn default_chart_non_binary_color() -> String {
    "#cb6ce6".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            host: default_host(),
            port: default_port(),
            similar_limit: default_similar_limit(),
            output_limit: default_output_limit(),
            search_limit: default_search_limit(),
            gender_blend_factor: default_gender_blend_factor(),
            query_timeout_ms: default_query_timeout_ms(),
            poster_base_url: default_poster_base_url(),
            primary_color: default_primary_color(),
            primary_button: default_primary_button(),
            secondary_button: default_secondary_button(),
            chart_male_color: default_chart_male_color(),
            chart_female_color: default_chart_female_color(),
            chart_non_binary_color: default_chart_non_binary_color(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the recommendation pipeline cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.gender_blend_factor) {
            anyhow::bail!(
                "gender_blend_factor must be within [0, 1], got {}",
                self.gender_blend_factor
            );
        }
        if self.similar_limit == 0 || self.output_limit == 0 || self.search_limit == 0 {
            anyhow::bail!("result limits must be greater than zero");
        }
        if self.query_timeout_ms == 0 {
            anyhow::bail!("query_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme {
            primary_color: self.primary_color.clone(),
            primary_button: self.primary_button.clone(),
            secondary_button: self.secondary_button.clone(),
            chart_colors: [
                self.chart_male_color.clone(),
                self.chart_female_color.clone(),
                self.chart_non_binary_color.clone(),
            ],
        }
    }

    pub fn query_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.query_timeout_ms)
    }
}
