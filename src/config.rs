use crate::error::ConfigError;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const DEFAULT_MAX_FILES: usize = 1;

/// Error-message templates. Each holds a single placeholder token that is
/// filled in when the rule fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessages {
    pub required: String,
    /// `{min}`
    pub min: String,
    /// `{max}`
    pub max: String,
    /// `{minLength}`
    pub min_length: String,
    /// `{maxLength}`
    pub max_length: String,
    pub pattern: String,
    /// `{maxFileSize}`
    pub max_file_size: String,
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self {
            required: "This field is required".to_string(),
            min: "The minimum number of files allowed is {min}".to_string(),
            max: "The maximum number of files allowed is {max}".to_string(),
            min_length: "The value must be contain at least {minLength} characters".to_string(),
            max_length: "The value must be contain at most {maxLength} characters".to_string(),
            pattern: "The value does not match the pattern".to_string(),
            max_file_size: "Each file must be at most {maxFileSize}".to_string(),
        }
    }
}

/// Fill the first occurrence of `token` in `template`.
pub fn substitute(template: &str, token: &str, value: &str) -> String {
    template.replacen(token, value, 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    /// Form field name every file is submitted under.
    pub name: String,
    pub required: bool,
    /// Minimum number of files.
    pub min: Option<usize>,
    /// Maximum number of files.
    pub max: Option<usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    /// Upper bound for every single file, in bytes.
    pub max_file_size: u64,
    /// Comma-separated MIME types and `.extension` tokens.
    pub accept: Option<String>,
    pub multiple: bool,
    pub disabled: bool,
    pub label: Option<String>,
    pub hint: Option<String>,
    pub placeholder: Option<String>,
    pub messages: ErrorMessages,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            required: false,
            min: None,
            max: Some(DEFAULT_MAX_FILES),
            min_length: None,
            max_length: None,
            pattern: None,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            accept: None,
            multiple: false,
            disabled: false,
            label: None,
            hint: None,
            placeholder: None,
            messages: ErrorMessages::default(),
        }
    }
}

impl UploaderConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Build a configuration from element attributes, using the same names the
    /// markup uses (`max-file-size`, `error-message-min`, ...). Unknown
    /// attributes are ignored, boolean attributes count as set when present.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();

        for (key, value) in attributes {
            let key = key.as_ref();
            let value: String = value.into();
            match key {
                "name" => config.name = value,
                "required" => config.required = true,
                "multiple" => config.multiple = true,
                "disabled" => config.disabled = true,
                "min" => config.min = parse_count(key, &value)?,
                "max" => config.max = parse_count(key, &value)?,
                "minlength" => config.min_length = parse_count(key, &value)?,
                "maxlength" => config.max_length = parse_count(key, &value)?,
                "pattern" => config.pattern = non_empty(value),
                "accept" => config.accept = non_empty(value),
                "label" => config.label = non_empty(value),
                "hint" => config.hint = non_empty(value),
                "placeholder" => config.placeholder = non_empty(value),
                "max-file-size" => {
                    config.max_file_size = parse_number(key, &value)?;
                }
                "error-message-required" => config.messages.required = value,
                "error-message-min" => config.messages.min = value,
                "error-message-max" => config.messages.max = value,
                "error-message-minlength" => config.messages.min_length = value,
                "error-message-maxlength" => config.messages.max_length = value,
                "error-message-pattern" => config.messages.pattern = value,
                "error-message-max-file-size" => config.messages.max_file_size = value,
                _ => {}
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::MinExceedsMax { min, max });
            }
        }
        if self.max_file_size == 0 {
            return Err(ConfigError::ZeroMaxFileSize);
        }
        if self.name.is_empty() {
            log::warn!("uploader has no name, its files will not be submitted");
        }
        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// An empty count attribute switches the limit off.
fn parse_count(attribute: &str, value: &str) -> Result<Option<usize>, ConfigError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_number(attribute, value).map(Some)
}

fn parse_number<T: std::str::FromStr>(attribute: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            attribute: attribute.to_string(),
            value: value.to_string(),
        })
}
