use serde::Deserialize;
use ts_rs::TS;

/// 名册导出参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct RosterExportParams {
    /// csv（默认）或 xlsx
    #[serde(default = "default_format")]
    pub format: String,
    /// allotted（受众全集）或 remaining（未提交，默认）
    #[serde(default = "default_list")]
    pub list: String,
}

fn default_format() -> String {
    "csv".to_string()
}

fn default_list() -> String {
    "remaining".to_string()
}
