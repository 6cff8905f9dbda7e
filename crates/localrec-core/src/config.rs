//! Layered configuration and path helpers.
//!
//! Figment merges built-in defaults, `config.toml`, `config.<env>.toml`
//! (env from `RUST_ENV`, default `dev`) and `APP_*` environment variables,
//! with `__` separating nested keys (`APP_RECOMMEND__DEFAULT_TOP_K=3`).

use std::env;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stop-word policy applied before the vocabulary is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StopWords {
    /// Keep every term.
    None,
    /// Built-in English list (a few hundred common words).
    #[default]
    English,
    /// Short list of the most frequent function words only.
    Minimal,
    Custom(Vec<String>),
}

/// What `recommend*` does when the engine has no current model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrainPolicy {
    /// Load and/or train on demand.
    #[default]
    Auto,
    /// Fail with `NotTrained`.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub catalog_path: String,
}

impl Default for DataSettings {
    fn default() -> Self { Self { catalog_path: "data/products.csv".to_string() } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerSettings {
    pub stop_words: StopWords,
    pub lowercase: bool,
    pub min_term_len: usize,
}

impl Default for VectorizerSettings {
    fn default() -> Self { Self { stop_words: StopWords::English, lowercase: true, min_term_len: 1 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendSettings {
    pub default_top_k: usize,
    pub train_policy: TrainPolicy,
    pub seed: Option<u64>,
}

impl Default for RecommendSettings {
    fn default() -> Self { Self { default_top_k: 5, train_policy: TrainPolicy::Auto, seed: None } }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub vectorizer: VectorizerSettings,
    pub recommend: RecommendSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.recommend.default_top_k == 0 {
            return Err(Error::InvalidConfig("recommend.default_top_k must be at least 1".to_string()));
        }
        if let StopWords::Custom(words) = &self.vectorizer.stop_words {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(Error::InvalidConfig("vectorizer.stop_words.custom contains an empty word".to_string()));
            }
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    /// Load from the current directory using `RUST_ENV`.
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| Error::InvalidConfig(format!("cannot resolve current directory: {e}")))?;
        Self::load_from(&cwd)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(dir, &env_name)
    }

    pub fn load_for_env(dir: &Path, env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        let config = Self::from_figment(figment, dir);
        config.settings()?.validate()?;
        Ok(config)
    }

    /// Wrap an already-assembled figment; relative paths resolve against `base_dir`.
    pub fn from_figment(figment: Figment, base_dir: &Path) -> Self {
        Self { figment, base_dir: base_dir.to_path_buf() }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("failed to get '{key}': {e}")))
    }

    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Catalog location after `~`/`$VAR` expansion, resolved against the base dir.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        let raw: String = self.get("data.catalog_path")?;
        Ok(resolve_with_base(&self.base_dir, raw))
    }

    pub fn base_dir(&self) -> &Path { &self.base_dir }
}

/// Expand leading `~` and `${VAR}` / `$VAR`; unknown variables are left as written.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let with_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    PathBuf::from(shellexpand::tilde(&with_env).as_ref())
}

/// Absolute paths pass through; relative ones are joined onto `base`.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
