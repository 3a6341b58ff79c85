use crate::error::ParseError;
use crate::types::RequesterConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedConfig {
    pub config: RequesterConfig,
    pub format: DocumentFormat,
}

pub fn parse_config_str(input: &str, format: DocumentFormat) -> Result<ParsedConfig, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedConfig {
            config: serde_json::from_str::<RequesterConfig>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedConfig {
            config: serde_yaml::from_str::<RequesterConfig>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_config_auto(input),
    }
}

fn parse_config_auto(input: &str) -> Result<ParsedConfig, ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<RequesterConfig>(input) {
            Ok(config) => Ok(ParsedConfig {
                config,
                format: DocumentFormat::Json,
            }),
            Err(e) => match serde_yaml::from_str::<RequesterConfig>(input) {
                Ok(config) => Ok(ParsedConfig {
                    config,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str::<RequesterConfig>(input) {
        Ok(config) => Ok(ParsedConfig {
            config,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => {
            if let Ok(config) = serde_json::from_str::<RequesterConfig>(input) {
                return Ok(ParsedConfig {
                    config,
                    format: DocumentFormat::Json,
                });
            }
            Err(ParseError::Yaml(e))
        }
    }
}
