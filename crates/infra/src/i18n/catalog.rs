//! Static message catalog
//!
//! Ships Simplified Chinese (the default) and English tables covering every
//! message key the core emits. Retry templates carry an `{attempts}`
//! placeholder.

use hoursguard_core::Localizer;
use hoursguard_domain::constants::message_keys as keys;
use tracing::debug;

/// Locale used when a requested locale has no table
pub const FALLBACK_LOCALE: &str = "en";

const ZH_CN: &[(&str, &str)] = &[
    (keys::NETWORK_ERROR, "网络连接失败，请检查网络后重试"),
    (keys::OPERATION_FAILED, "操作失败，请稍后重试"),
    (keys::RETRY_SUCCEEDED, "重试成功（共尝试 {attempts} 次）"),
    (keys::RETRY_EXHAUSTED, "重试 {attempts} 次后仍然失败"),
    (keys::STORAGE_FALLBACK, "本地存储不可用，数据暂存于内存中"),
    (keys::RECORDS_RESET, "打卡记录已损坏，已备份并重置"),
    (keys::ISSUE_LOW_STORAGE, "存储空间不足"),
    (keys::SUGGEST_CLEANUP, "清理旧记录或导出后删除历史数据"),
    (keys::ISSUE_ERROR_RATE, "最近 24 小时错误过多"),
    (keys::SUGGEST_RELOAD, "重新启动应用"),
    (keys::ISSUE_OUTDATED_RUNTIME, "运行环境缺少必要功能"),
    (keys::SUGGEST_UPGRADE, "升级到最新版本"),
];

const EN: &[(&str, &str)] = &[
    (keys::NETWORK_ERROR, "Network connection failed, check your connection and try again"),
    (keys::OPERATION_FAILED, "Operation failed, please try again later"),
    (keys::RETRY_SUCCEEDED, "Succeeded after {attempts} attempts"),
    (keys::RETRY_EXHAUSTED, "Still failing after {attempts} attempts"),
    (keys::STORAGE_FALLBACK, "Local storage is unavailable, data is kept in memory"),
    (keys::RECORDS_RESET, "Clock records were corrupted and have been backed up and reset"),
    (keys::ISSUE_LOW_STORAGE, "Storage space is running low"),
    (keys::SUGGEST_CLEANUP, "Clean up old records or export and delete history"),
    (keys::ISSUE_ERROR_RATE, "Too many errors in the last 24 hours"),
    (keys::SUGGEST_RELOAD, "Restart the application"),
    (keys::ISSUE_OUTDATED_RUNTIME, "The runtime is missing required capabilities"),
    (keys::SUGGEST_UPGRADE, "Upgrade to the latest version"),
];

/// Locale-bound message lookup
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: &'static str,
    table: &'static [(&'static str, &'static str)],
}

impl Catalog {
    /// Catalog for `locale`; unknown locales use English
    pub fn new(locale: &str) -> Self {
        match table_for(locale) {
            Some((locale, table)) => Self { locale, table },
            None => {
                debug!(locale, fallback = FALLBACK_LOCALE, "unknown locale");
                Self { locale: FALLBACK_LOCALE, table: EN }
            }
        }
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn supported_locales() -> &'static [&'static str] {
        &["zh-CN", "en"]
    }
}

fn table_for(locale: &str) -> Option<(&'static str, &'static [(&'static str, &'static str)])> {
    match locale {
        "zh-CN" | "zh" | "zh-Hans" => Some(("zh-CN", ZH_CN)),
        "en" | "en-US" | "en-GB" => Some(("en", EN)),
        _ => None,
    }
}

impl Localizer for Catalog {
    fn translate(&self, key: &str) -> String {
        self.table
            .iter()
            .find(|(k, _)| *k == key)
            .map_or_else(|| key.to_string(), |(_, text)| (*text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_is_translated_in_both_tables() {
        assert_eq!(ZH_CN.len(), EN.len());
        for (key, _) in ZH_CN {
            assert!(EN.iter().any(|(k, _)| k == key), "{key} missing from en");
        }
    }

    #[test]
    fn retry_templates_carry_placeholder() {
        for locale in Catalog::supported_locales() {
            let catalog = Catalog::new(locale);
            assert!(catalog.translate(keys::RETRY_SUCCEEDED).contains("{attempts}"));
            assert!(catalog.translate(keys::RETRY_EXHAUSTED).contains("{attempts}"));
        }
    }

    #[test]
    fn unknown_key_is_echoed() {
        assert_eq!(Catalog::new("en").translate("no.such.key"), "no.such.key");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let catalog = Catalog::new("fr");
        assert_eq!(catalog.locale(), "en");
        assert_eq!(catalog.translate(keys::SUGGEST_RELOAD), "Restart the application");
    }

    #[test]
    fn default_locale_is_chinese() {
        let catalog = Catalog::new("zh-CN");
        assert_eq!(catalog.translate(keys::ISSUE_LOW_STORAGE), "存储空间不足");
    }
}
