use serde::{Deserialize, Serialize};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// UI language of the widget and of the rendered performance table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    /// Case-insensitive; unknown tags fall back to English.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "zh" => Language::Zh,
            other => {
                log_warn!("unknown language tag '{}', falling back to en", other);
                Language::En
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn latency_label(&self) -> &'static str {
        match self {
            Language::En => "Latency",
            Language::Zh => "首包延迟",
        }
    }

    pub fn rtf_label(&self) -> &'static str {
        match self {
            Language::En => "Real-Time Factor",
            Language::Zh => "实时率",
        }
    }

    pub fn cost_label(&self) -> &'static str {
        match self {
            Language::En => "Cost time",
            Language::Zh => "耗时",
        }
    }

    pub fn seconds_unit(&self) -> &'static str {
        match self {
            Language::En => "s",
            Language::Zh => "秒",
        }
    }

    pub fn not_started_label(&self) -> &'static str {
        match self {
            Language::En => "Timer not started",
            Language::Zh => "计时器尚未开始",
        }
    }

    pub fn play_label(&self) -> &'static str {
        match self {
            Language::En => "Play",
            Language::Zh => "播放",
        }
    }

    pub fn pause_label(&self) -> &'static str {
        match self {
            Language::En => "Pause",
            Language::Zh => "暂停",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Language::parse("ZH"), Language::Zh);
        assert_eq!(Language::parse(" en "), Language::En);
    }

    #[test]
    fn unknown_tag_falls_back_to_english() {
        assert_eq!(Language::parse("fr"), Language::En);
    }
}
