//! i18n - Internationalization Module
//!
//! Provides simple translation functions using HashMap-based lookups.

use std::collections::HashMap;
use std::sync::OnceLock;

use gpui::SharedString;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (US)
    #[default]
    EnUS,
    /// Chinese (Simplified)
    ZhCN,
}

impl Locale {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::EnUS => "English",
            Locale::ZhCN => "中文",
        }
    }

    /// Config-file locale code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::EnUS => "en-US",
            Locale::ZhCN => "zh-CN",
        }
    }

    /// Parse a config-file locale code
    pub fn from_code(code: &str) -> Self {
        match code {
            "zh-CN" => Locale::ZhCN,
            _ => Locale::EnUS,
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> =
    OnceLock::new();

/// Initialize translations (key -> (en, zh))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // App
    map.insert("app-title", ("CTR Admin", "临床报告管理端"));

    // Navigation
    map.insert("nav-protocols", ("Manage Protocols", "方案管理"));
    map.insert("nav-profiles", ("Manage Profiles", "报告配置管理"));
    map.insert("nav-capabilities", ("Manage Capabilities", "能力管理"));

    // Actions
    map.insert("action-apply", ("Apply Filters", "应用筛选"));
    map.insert("action-clear", ("Clear Filters", "清除筛选"));
    map.insert("action-refresh", ("Refresh", "刷新"));
    map.insert("action-save", ("Save", "保存"));
    map.insert("action-cancel", ("Cancel", "取消"));
    map.insert("action-confirm", ("Confirm", "确认"));
    map.insert("action-add-user", ("Add User", "添加用户"));
    map.insert("action-more", ("More Actions", "更多操作"));
    map.insert("action-add-profile", ("Add Profile", "新增配置"));
    map.insert("action-remove-profile", ("Remove Profile", "删除配置"));
    map.insert("action-remove-blind-hide", ("Remove Blind/Hide", "删除设盲/隐藏"));

    // User table columns
    map.insert("col-email", ("User Email", "用户邮箱"));
    map.insert("col-first-name", ("First Name", "名"));
    map.insert("col-last-name", ("Last Name", "姓"));
    map.insert("col-role", ("User Role", "用户角色"));
    map.insert("col-region", ("Region", "区域"));
    map.insert("col-country", ("Country", "国家"));
    map.insert("col-site", ("Site", "中心"));
    map.insert("col-status", ("User Status", "用户状态"));
    map.insert("col-action", ("Action", "操作"));

    // Profile table columns
    map.insert("col-tests", ("Tests", "检测项目"));
    map.insert("col-cohort", ("Cohort", "队列"));
    map.insert("col-visits", ("Visits", "访视"));
    map.insert("col-blind-hide", ("Blind/Hide", "设盲/隐藏"));

    // Capability table columns
    map.insert("col-capability-name", ("Capability Name", "能力名称"));
    map.insert("col-url", ("URL", "URL"));

    // Filter fields
    map.insert("field-protocol", ("Protocol", "方案"));
    map.insert("field-profile", ("Profile", "配置"));
    map.insert("field-tests", ("Tests", "检测项目"));
    map.insert("field-cohorts", ("Cohorts", "队列"));
    map.insert("field-visits", ("Visits", "访视"));
    map.insert("field-blind-hide", ("Blind/Hide", "设盲/隐藏"));
    map.insert("field-role", ("User Role", "用户角色"));
    map.insert("field-region", ("Region", "区域"));
    map.insert("field-country", ("Country", "国家"));
    map.insert("field-site", ("Site", "中心"));
    map.insert("field-status", ("User Status", "用户状态"));

    // "All ..." sentinels
    map.insert("all-protocols", ("All Protocols", "全部方案"));
    map.insert("all-tests", ("All Tests", "全部检测项目"));
    map.insert("all-cohorts", ("All Cohorts", "全部队列"));
    map.insert("all-visits", ("All Visits", "全部访视"));

    // Panels
    map.insert("label-protocols", ("Protocols", "方案列表"));
    map.insert("label-profiles", ("Profiles", "配置列表"));
    map.insert("users-title", ("Associated Users", "关联用户"));
    map.insert("log-title", ("Activity", "活动日志"));

    // Action menus
    map.insert("menu-add-manual", ("Add user manually", "手动添加用户"));
    map.insert("menu-add-copy", ("Copy from other protocol", "从其他方案复制"));
    map.insert(
        "menu-registration-email",
        ("Registration Email - Protocol", "注册邮件 - 方案"),
    );
    map.insert("menu-send-email", ("Send Email - Protocol", "发送邮件 - 方案"));
    map.insert("menu-resend-email", ("Resend Email - Protocol", "重发邮件 - 方案"));

    // Modals
    map.insert(
        "modal-send-email-title",
        ("Send Registration Email", "发送注册邮件"),
    );
    map.insert(
        "modal-resend-email-title",
        ("Resend Registration Email", "重发注册邮件"),
    );
    map.insert(
        "modal-send-email-body",
        (
            "Send the registration email to all users in this protocol?",
            "向该方案下的所有用户发送注册邮件？",
        ),
    );
    map.insert(
        "modal-copy-user-title",
        ("Copy Users From Protocol", "从方案复制用户"),
    );
    map.insert(
        "modal-protocol-required-title",
        ("Protocol Required", "请先选择方案"),
    );
    map.insert(
        "modal-protocol-required-body",
        (
            "Select a protocol before adding a profile.",
            "添加配置前请先选择一个方案。",
        ),
    );
    map.insert("modal-remove-profile-title", ("Remove Profile", "删除配置"));
    map.insert(
        "modal-remove-profile-body",
        (
            "Remove the selected profiles from this protocol?",
            "从该方案中删除所选配置？",
        ),
    );
    map.insert(
        "modal-remove-blind-hide-title",
        ("Remove Blind/Hide Configuration", "删除设盲/隐藏配置"),
    );
    map.insert(
        "modal-remove-blind-hide-body",
        (
            "Remove the Blind/Hide configuration for the checked rows?",
            "删除勾选行的设盲/隐藏配置？",
        ),
    );

    // Table states
    map.insert("table-no-data", ("No data", "无数据"));
    map.insert("table-loading", ("Loading...", "加载中..."));

    // Validation
    map.insert(
        "validation-cohort",
        (
            "Selected tests must belong to the same cohort",
            "所选检测项目必须属于同一队列",
        ),
    );

    // Misc
    map.insert("search-placeholder", ("Search...", "搜索..."));

    map
}

/// Get translations
fn translations() -> &'static HashMap<&'static str, (&'static str, &'static str)> {
    TRANSLATIONS.get_or_init(init_translations)
}

/// Translate a key
pub fn t(locale: Locale, key: &str) -> SharedString {
    if let Some(&(en, zh)) = translations().get(key) {
        match locale {
            Locale::EnUS => SharedString::from(en),
            Locale::ZhCN => SharedString::from(zh),
        }
    } else {
        // Fallback: return the key itself
        SharedString::from(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_translates_per_locale() {
        assert_eq!(t(Locale::EnUS, "nav-profiles").as_ref(), "Manage Profiles");
        assert_eq!(t(Locale::ZhCN, "nav-profiles").as_ref(), "报告配置管理");
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(t(Locale::EnUS, "does-not-exist").as_ref(), "does-not-exist");
    }

    #[test]
    fn test_locale_codes_round_trip() {
        assert_eq!(Locale::from_code(Locale::ZhCN.code()), Locale::ZhCN);
        assert_eq!(Locale::from_code("unknown"), Locale::EnUS);
    }
}
