//! 学生提交作业
//!
//! 提交窗口为创建日起到截止日当天（含）。每个学生对每份作业
//! 至多一条在册提交：未批改时不允许重复提交，被退回后允许
//! 重新提交并覆盖，已接受的提交永久定稿。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::entities::Assignment,
    submissions::{
        entities::{Submission, SubmissionOutcome},
        requests::CreateSubmissionRequest,
    },
    users::entities::UserRole,
};

/// 提交门禁判定结果
#[derive(Debug, PartialEq)]
pub(crate) enum SubmitGate {
    Allowed,
    PastDue,
    AlreadySubmitted,
    AlreadyFinalized,
}

/// 纯判定函数：给定作业、在册提交与当前日期，决定本次提交是否放行
pub(crate) fn evaluate_submit_gate(
    assignment: &Assignment,
    existing: Option<&Submission>,
    today: NaiveDate,
) -> SubmitGate {
    if assignment.is_past_due(today) {
        return SubmitGate::PastDue;
    }

    match existing {
        None => SubmitGate::Allowed,
        Some(s) => match s.outcome {
            SubmissionOutcome::Accepted => SubmitGate::AlreadyFinalized,
            SubmissionOutcome::Rejected => SubmitGate::Allowed,
            SubmissionOutcome::Unset => SubmitGate::AlreadySubmitted,
        },
    }
}

pub async fn handle_submit(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    if user.role != UserRole::Student || !user.onboarded {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::UserNotOnboarded,
            "Complete onboarding before submitting",
        )));
    }

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission failed: {e}"),
                )),
            );
        }
    };

    // 受众校验：作业必须面向该学生的 (course, year)
    let in_audience = user.profile.course.as_deref() == Some(assignment.course.as_str())
        && user.profile.year.as_deref() == Some(assignment.year.as_str());
    if !in_audience {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::Forbidden,
            "This assignment is not addressed to you",
        )));
    }

    // 答卷文件必须已上传
    match storage.get_file_by_token(&req.file_token).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileNotFound,
                "Answer file not found, upload it first",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission failed: {e}"),
                )),
            );
        }
    }

    let existing = match storage
        .get_submission_by_assignment_and_student(assignment_id, user.id)
        .await
    {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Submission failed: {e}"),
                )),
            );
        }
    };

    let today = chrono::Utc::now().date_naive();
    match evaluate_submit_gate(&assignment, existing.as_ref(), today) {
        SubmitGate::Allowed => {}
        SubmitGate::PastDue => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::PastDueDate,
                "The due date has passed",
            )));
        }
        SubmitGate::AlreadySubmitted => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                ErrorCode::AlreadySubmitted,
                "Submission already recorded, wait for correction",
            )));
        }
        SubmitGate::AlreadyFinalized => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                ErrorCode::AlreadyFinalized,
                "Submission already accepted",
            )));
        }
    }

    match storage
        .upsert_submission(assignment_id, user.id, &req.file_token)
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Student {} submitted assignment {} (submission {})",
                user.id,
                assignment_id,
                submission.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "Submission recorded")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Submission failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn assignment(due: NaiveDate) -> Assignment {
        Assignment {
            id: 1,
            created_by: 10,
            name: "Worksheet 3".to_string(),
            course: "B.Tech CSE".to_string(),
            year: "3rd".to_string(),
            due_date: due,
            file_token: "tok-q".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    fn submission(outcome: SubmissionOutcome) -> Submission {
        Submission {
            id: 7,
            assignment_id: 1,
            student_id: 42,
            file_token: "tok-a".to_string(),
            corrected: outcome != SubmissionOutcome::Unset,
            outcome,
            remark: None,
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_submission_before_due_allowed() {
        let a = assignment(date(2026, 3, 10));
        assert_eq!(
            evaluate_submit_gate(&a, None, date(2026, 3, 5)),
            SubmitGate::Allowed
        );
    }

    #[test]
    fn test_due_day_itself_still_allowed() {
        let a = assignment(date(2026, 3, 10));
        assert_eq!(
            evaluate_submit_gate(&a, None, date(2026, 3, 10)),
            SubmitGate::Allowed
        );
    }

    #[test]
    fn test_past_due_rejected() {
        let a = assignment(date(2026, 3, 10));
        assert_eq!(
            evaluate_submit_gate(&a, None, date(2026, 3, 11)),
            SubmitGate::PastDue
        );
    }

    #[test]
    fn test_pending_submission_blocks_resubmit() {
        let a = assignment(date(2026, 3, 10));
        let s = submission(SubmissionOutcome::Unset);
        assert_eq!(
            evaluate_submit_gate(&a, Some(&s), date(2026, 3, 5)),
            SubmitGate::AlreadySubmitted
        );
    }

    #[test]
    fn test_rejected_submission_allows_resubmit() {
        let a = assignment(date(2026, 3, 10));
        let s = submission(SubmissionOutcome::Rejected);
        assert_eq!(
            evaluate_submit_gate(&a, Some(&s), date(2026, 3, 5)),
            SubmitGate::Allowed
        );
    }

    #[test]
    fn test_accepted_submission_is_final() {
        let a = assignment(date(2026, 3, 10));
        let s = submission(SubmissionOutcome::Accepted);
        assert_eq!(
            evaluate_submit_gate(&a, Some(&s), date(2026, 3, 5)),
            SubmitGate::AlreadyFinalized
        );
    }

    #[test]
    fn test_past_due_wins_over_resubmit() {
        // 截止后即使被退回也不能再交
        let a = assignment(date(2026, 3, 10));
        let s = submission(SubmissionOutcome::Rejected);
        assert_eq!(
            evaluate_submit_gate(&a, Some(&s), date(2026, 3, 12)),
            SubmitGate::PastDue
        );
    }
}
