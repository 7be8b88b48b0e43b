use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

impl OutputFormat {
    pub const SUPPORTED: &'static [&'static str] = &["json", "text"];
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(Error::InvalidFormat {
                value: s.to_string(),
                supported: Self::SUPPORTED,
            }),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    }

    #[test]
    fn test_invalid_format_lists_supported() {
        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r#"invalid format "yaml", supported formats are: json, text"#);
    }
}
