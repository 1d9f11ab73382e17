pub mod export;
pub mod status;

use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::roster::requests::RosterExportParams;
use crate::models::roster::responses::RosterStudent;
use crate::models::users::entities::User;
use crate::storage::Storage;

/// 名册对比服务
///
/// 以作业受众 (course, year) 内已入驻的学生为全集（allotted），
/// 减去持有在册提交的学生得到未提交名单（remaining）。
pub struct RosterService {
    storage: Option<Arc<dyn Storage>>,
}

impl RosterService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 受众全集
    pub async fn allotted(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        status::handle_roster(self, request, assignment_id, true).await
    }

    // 未提交名单
    pub async fn remaining(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        status::handle_roster(self, request, assignment_id, false).await
    }

    // 名册导出
    pub async fn export(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        params: RosterExportParams,
    ) -> ActixResult<HttpResponse> {
        export::handle_export(self, request, assignment_id, params).await
    }
}

// 名册行投影
pub(crate) fn roster_entry(student: User) -> RosterStudent {
    RosterStudent {
        id: student.id,
        name: student.profile.name.unwrap_or_default(),
        roll_no: student.profile.roll_no.unwrap_or_default(),
        course: student.profile.course.unwrap_or_default(),
        year: student.profile.year.unwrap_or_default(),
    }
}

/// 纯切分函数：按已提交学生 ID 集合把受众名册一分为二
///
/// 返回 (已提交, 未提交)，两边都保持输入的学号排序。
pub(crate) fn split_roster(
    students: Vec<User>,
    submitted_ids: &HashSet<i64>,
) -> (Vec<RosterStudent>, Vec<RosterStudent>) {
    let mut submitted = Vec::new();
    let mut remaining = Vec::new();

    for student in students {
        let entry = roster_entry(student);
        if submitted_ids.contains(&entry.id) {
            submitted.push(entry);
        } else {
            remaining.push(entry);
        }
    }

    (submitted, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{StudentProfile, UserRole};
    use chrono::{TimeZone, Utc};

    fn student(id: i64, roll_no: &str) -> User {
        User {
            id,
            email: format!("s{id}@college.edu"),
            password_hash: String::new(),
            role: UserRole::Student,
            profile: StudentProfile {
                name: Some(format!("Student {id}")),
                roll_no: Some(roll_no.to_string()),
                course: Some("B.Tech CSE".to_string()),
                year: Some("3rd".to_string()),
            },
            onboarded: true,
            last_login: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_split_roster_partitions_by_submission() {
        let students = vec![student(1, "R-001"), student(2, "R-002"), student(3, "R-003")];
        let submitted_ids: HashSet<i64> = [2].into_iter().collect();

        let (submitted, remaining) = split_roster(students, &submitted_ids);

        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].id, 2);
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].id, 1);
        assert_eq!(remaining[1].id, 3);
    }

    #[test]
    fn test_split_roster_nobody_submitted() {
        let students = vec![student(1, "R-001"), student(2, "R-002")];
        let submitted_ids = HashSet::new();

        let (submitted, remaining) = split_roster(students, &submitted_ids);

        assert!(submitted.is_empty());
        assert_eq!(remaining.len(), 2);
    }

    #[test]
    fn test_split_roster_everyone_submitted() {
        let students = vec![student(1, "R-001"), student(2, "R-002")];
        let submitted_ids: HashSet<i64> = [1, 2].into_iter().collect();

        let (submitted, remaining) = split_roster(students, &submitted_ids);

        assert_eq!(submitted.len(), 2);
        assert!(remaining.is_empty());
    }

    #[test]
    fn test_split_roster_ignores_stray_submitter_ids() {
        // 受众之外的提交者（如已转课的学生）不会出现在任何一边
        let students = vec![student(1, "R-001")];
        let submitted_ids: HashSet<i64> = [99].into_iter().collect();

        let (submitted, remaining) = split_roster(students, &submitted_ids);

        assert!(submitted.is_empty());
        assert_eq!(remaining.len(), 1);
    }
}
