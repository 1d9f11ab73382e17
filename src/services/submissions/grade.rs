//! 批改提交
//!
//! 结论只有接受与退回两种。任何一次批改都必须附评语，
//! 让学生知道结论的依据；已接受的提交定稿，不允许再次批改。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    submissions::{
        entities::{Submission, SubmissionOutcome},
        requests::GradeSubmissionRequest,
    },
    users::entities::UserRole,
};

/// 批改门禁判定结果
#[derive(Debug, PartialEq)]
pub(crate) enum GradeGate {
    Allowed,
    InvalidOutcome,
    RemarkRequired,
    AlreadyFinalized,
}

/// 纯判定函数：结论与评语是否构成一次合法批改
pub(crate) fn evaluate_grade_gate(
    existing: &Submission,
    outcome: &SubmissionOutcome,
    remark: &str,
) -> GradeGate {
    if existing.is_finalized() {
        return GradeGate::AlreadyFinalized;
    }

    match outcome {
        SubmissionOutcome::Unset => GradeGate::InvalidOutcome,
        _ if remark.trim().is_empty() => GradeGate::RemarkRequired,
        _ => GradeGate::Allowed,
    }
}

pub async fn handle_grade(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: GradeSubmissionRequest,
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

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Grading failed: {e}"),
                )),
            );
        }
    };

    // 权限检查：只有作业创建者可以批改，系主任不参与批改
    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
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
                    format!("Grading failed: {e}"),
                )),
            );
        }
    };

    match user.role {
        UserRole::Teacher if assignment.created_by == user.id => {}
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                ErrorCode::Forbidden,
                "Only the assignment creator can grade",
            )));
        }
    }

    match evaluate_grade_gate(&submission, &req.outcome, &req.remark) {
        GradeGate::Allowed => {}
        GradeGate::InvalidOutcome => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::InvalidInput,
                "Outcome must be accepted or rejected",
            )));
        }
        GradeGate::RemarkRequired => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::RemarkRequired,
                "A remark is required when grading",
            )));
        }
        GradeGate::AlreadyFinalized => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                ErrorCode::AlreadyFinalized,
                "Submission already accepted, grading is final",
            )));
        }
    }

    match storage
        .grade_submission(submission_id, req.outcome.clone(), req.remark.trim())
        .await
    {
        Ok(Some(graded)) => {
            tracing::info!(
                "Submission {} graded as {} by user {}",
                submission_id,
                req.outcome,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(graded, "Submission graded")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Grading failed: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

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

    #[test]
    fn test_accept_requires_remark() {
        let s = submission(SubmissionOutcome::Unset);
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Accepted, ""),
            GradeGate::RemarkRequired
        );
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Accepted, "Good work"),
            GradeGate::Allowed
        );
    }

    #[test]
    fn test_reject_requires_remark() {
        let s = submission(SubmissionOutcome::Unset);
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Rejected, "   "),
            GradeGate::RemarkRequired
        );
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Rejected, "Question 2 is missing"),
            GradeGate::Allowed
        );
    }

    #[test]
    fn test_unset_outcome_invalid() {
        let s = submission(SubmissionOutcome::Unset);
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Unset, "remark"),
            GradeGate::InvalidOutcome
        );
    }

    #[test]
    fn test_accepted_submission_cannot_be_regraded() {
        let s = submission(SubmissionOutcome::Accepted);
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Rejected, "changed my mind"),
            GradeGate::AlreadyFinalized
        );
    }

    #[test]
    fn test_rejected_submission_can_be_regraded() {
        // 学生未重交前，教师可以修正退回结论
        let s = submission(SubmissionOutcome::Rejected);
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Accepted, "Fine after review"),
            GradeGate::Allowed
        );
        // 修正结论同样必须附评语
        assert_eq!(
            evaluate_grade_gate(&s, &SubmissionOutcome::Accepted, ""),
            GradeGate::RemarkRequired
        );
    }
}
