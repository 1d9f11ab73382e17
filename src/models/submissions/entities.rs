use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 批改结果
#[derive(Debug, Clone, Copy, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionOutcome {
    Unset,    // 未批改
    Accepted, // 通过
    Rejected, // 退回重做
}

impl SubmissionOutcome {
    pub const UNSET: &'static str = "unset";
    pub const ACCEPTED: &'static str = "accepted";
    pub const REJECTED: &'static str = "rejected";
}

impl<'de> Deserialize<'de> for SubmissionOutcome {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            SubmissionOutcome::UNSET => Ok(SubmissionOutcome::Unset),
            SubmissionOutcome::ACCEPTED => Ok(SubmissionOutcome::Accepted),
            SubmissionOutcome::REJECTED => Ok(SubmissionOutcome::Rejected),
            _ => Err(serde::de::Error::custom(format!(
                "无效的批改结果: '{s}'. 支持的值: unset, accepted, rejected"
            ))),
        }
    }
}

impl std::fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionOutcome::Unset => write!(f, "{}", SubmissionOutcome::UNSET),
            SubmissionOutcome::Accepted => write!(f, "{}", SubmissionOutcome::ACCEPTED),
            SubmissionOutcome::Rejected => write!(f, "{}", SubmissionOutcome::REJECTED),
        }
    }
}

impl std::str::FromStr for SubmissionOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(SubmissionOutcome::Unset),
            "accepted" => Ok(SubmissionOutcome::Accepted),
            "rejected" => Ok(SubmissionOutcome::Rejected),
            _ => Err(format!("Invalid submission outcome: {s}")),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_token: String,
    /// false = 未批改，true = 已批改
    pub corrected: bool,
    pub outcome: SubmissionOutcome,
    pub remark: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 通过的提交是终态，任何后续变更都要拒绝
    pub fn is_finalized(&self) -> bool {
        self.outcome == SubmissionOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_outcome_round_trip() {
        for outcome in [
            SubmissionOutcome::Unset,
            SubmissionOutcome::Accepted,
            SubmissionOutcome::Rejected,
        ] {
            let parsed = SubmissionOutcome::from_str(&outcome.to_string()).unwrap();
            assert_eq!(parsed, outcome);
        }
    }

    #[test]
    fn test_outcome_parse_rejects_unknown() {
        assert!(SubmissionOutcome::from_str("graded").is_err());
    }
}
