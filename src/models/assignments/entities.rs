use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub created_by: i64,
    pub name: String,
    pub course: String,
    pub year: String,
    /// 截止日期，只到天粒度
    pub due_date: NaiveDate,
    pub file_token: String,
    pub created_at: DateTime<Utc>,
}

impl Assignment {
    /// 今天（UTC 日期）是否已过截止日
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        today > self.due_date
    }
}

/// 将客户端提交的截止时间归一化为日历日期，时间部分丢弃
pub fn normalize_due_date(due: DateTime<Utc>) -> NaiveDate {
    due.date_naive()
}

/// 截止日期在数据库中的表示：当天 UTC 零点的时间戳
pub fn due_date_timestamp(due_date: NaiveDate) -> i64 {
    due_date
        .and_time(NaiveTime::MIN)
        .and_utc()
        .timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_discards_time_of_day() {
        let late_evening = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
        let early_morning = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 1).unwrap();
        assert_eq!(normalize_due_date(late_evening), normalize_due_date(early_morning));
    }

    #[test]
    fn test_due_date_timestamp_round_trip() {
        let due = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let ts = due_date_timestamp(due);
        let back = DateTime::<Utc>::from_timestamp(ts, 0).unwrap().date_naive();
        assert_eq!(back, due);
    }

    #[test]
    fn test_past_due_is_strict() {
        let assignment = Assignment {
            id: 1,
            created_by: 1,
            name: "HW1".to_string(),
            course: "BScIT".to_string(),
            year: "FY".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            file_token: "tok".to_string(),
            created_at: Utc::now(),
        };
        // 截止日当天仍可提交
        assert!(!assignment.is_past_due(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(assignment.is_past_due(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()));
        assert!(!assignment.is_past_due(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()));
    }
}
