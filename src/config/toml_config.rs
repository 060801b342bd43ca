use crate::config::Preset;
use crate::core::ConfigProvider;
use crate::domain::ports::DEFAULT_TIMEOUT_SECONDS;
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "http://Clinica.somee.com/api/Insert";
pub const DEFAULT_STORAGE_PATH: &str = "./reservations.json";
pub const DEFAULT_STORAGE_ENTRY: &str = "reservations";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub clinic: ClinicConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub phone: PhoneConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicConfig {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub start_hour: u32,
    pub end_hour: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneConfig {
    pub min_digits: usize,
    pub max_digits: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub entry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            name: "Clínica".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let (start_hour, end_hour) = Preset::default().hours();
        Self {
            start_hour,
            end_hour,
        }
    }
}

impl Default for PhoneConfig {
    fn default() -> Self {
        let (min_digits, max_digits) = Preset::default().phone_digits();
        Self {
            min_digits,
            max_digits,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORAGE_PATH.to_string(),
            entry: None,
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl TomlConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self {
            clinic: ClinicConfig::default(),
            schedule: ScheduleConfig::default(),
            phone: PhoneConfig::default(),
            storage: StorageConfig::default(),
            submission: SubmissionConfig::default(),
        };
        config.apply_preset(preset);
        config
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReservationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReservationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLINIC_API})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReservationError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 以預設方案覆蓋營業時間與電話長度
    pub fn apply_preset(&mut self, preset: Preset) {
        let (start_hour, end_hour) = preset.hours();
        let (min_digits, max_digits) = preset.phone_digits();
        self.schedule = ScheduleConfig {
            start_hour,
            end_hour,
        };
        self.phone = PhoneConfig {
            min_digits,
            max_digits,
        };
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_range("schedule.end_hour", self.schedule.end_hour, 1, 24)?;
        if self.schedule.start_hour >= self.schedule.end_hour {
            return Err(ReservationError::InvalidConfigValueError {
                field: "schedule.start_hour".to_string(),
                value: self.schedule.start_hour.to_string(),
                reason: format!(
                    "Must be before schedule.end_hour ({})",
                    self.schedule.end_hour
                ),
            });
        }

        validate_positive_number("phone.min_digits", self.phone.min_digits, 1)?;
        if self.phone.min_digits > self.phone.max_digits {
            return Err(ReservationError::InvalidConfigValueError {
                field: "phone.max_digits".to_string(),
                value: self.phone.max_digits.to_string(),
                reason: format!(
                    "Must not be smaller than phone.min_digits ({})",
                    self.phone.min_digits
                ),
            });
        }

        validate_path("storage.path", &self.storage.path)?;
        if let Some(entry) = &self.storage.entry {
            validate_non_empty_string("storage.entry", entry)?;
        }

        validate_url("submission.endpoint", &self.submission.endpoint)?;
        if let Some(timeout) = self.submission.timeout_seconds {
            validate_positive_number("submission.timeout_seconds", timeout as usize, 1)?;
        }

        Ok(())
    }

    pub fn storage_path(&self) -> &str {
        &self.storage.path
    }

    pub fn clinic_name(&self) -> &str {
        &self.clinic.name
    }
}

impl ConfigProvider for TomlConfig {
    fn start_hour(&self) -> u32 {
        self.schedule.start_hour
    }

    fn end_hour(&self) -> u32 {
        self.schedule.end_hour
    }

    fn phone_min_digits(&self) -> usize {
        self.phone.min_digits
    }

    fn phone_max_digits(&self) -> usize {
        self.phone.max_digits
    }

    fn submission_endpoint(&self) -> &str {
        &self.submission.endpoint
    }

    fn storage_entry(&self) -> &str {
        self.storage.entry.as_deref().unwrap_or(DEFAULT_STORAGE_ENTRY)
    }

    fn submission_timeout_seconds(&self) -> u64 {
        self.submission
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
