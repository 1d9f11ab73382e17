//! 名册导出服务

use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use super::{RosterService, roster_entry, split_roster};
use crate::middlewares::RequireJWT;
use crate::models::roster::requests::RosterExportParams;
use crate::models::roster::responses::RosterStudent;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 导出名册（已提交或未提交名单）为 CSV 或 XLSX
pub async fn handle_export(
    service: &RosterService,
    request: &HttpRequest,
    assignment_id: i64,
    params: RosterExportParams,
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

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Failed to export roster: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to export roster: {e}"),
                )),
            );
        }
    };

    // 权限检查：只有作业创建者或系主任可以导出名册
    match user.role {
        UserRole::Hod => {}
        UserRole::Teacher if assignment.created_by == user.id => {}
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                ErrorCode::Forbidden,
                "Only the assignment creator or the HOD can export the roster",
            )));
        }
    }

    let students = match storage
        .list_students_by_audience(&assignment.course, &assignment.year)
        .await
    {
        Ok(students) => students,
        Err(e) => {
            error!("Failed to export roster: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to export roster: {e}"),
                )),
            );
        }
    };

    let (list_name, items) = if params.list == "allotted" {
        // 受众全集
        let entries = students.into_iter().map(roster_entry).collect::<Vec<_>>();
        ("allotted", entries)
    } else {
        let submitted_ids: HashSet<i64> =
            match storage.list_submitted_student_ids(assignment_id).await {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    error!("Failed to export roster: {}", e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to export roster: {e}"),
                        ),
                    ));
                }
            };
        let (_, remaining) = split_roster(students, &submitted_ids);
        ("remaining", remaining)
    };

    match params.format.as_str() {
        "xlsx" => export_xlsx(&items, list_name),
        _ => export_csv(&items, list_name),
    }
}

fn export_csv(students: &[RosterStudent], list_name: &str) -> ActixResult<HttpResponse> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // 写入表头
    wtr.write_record(["roll_no", "name", "course", "year"])
        .map_err(|e| {
            error!("CSV write failed: {}", e);
            actix_web::error::ErrorInternalServerError(format!("CSV write failed: {e}"))
        })?;

    // 写入数据
    for student in students {
        wtr.write_record([
            student.roll_no.clone(),
            student.name.clone(),
            student.course.clone(),
            student.year.clone(),
        ])
        .map_err(|e| {
            error!("CSV write failed: {}", e);
            actix_web::error::ErrorInternalServerError(format!("CSV write failed: {e}"))
        })?;
    }

    let data = wtr.into_inner().map_err(|e| {
        error!("CSV generation failed: {}", e);
        actix_web::error::ErrorInternalServerError(format!("CSV generation failed: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"roster_{list_name}.csv\""),
        ))
        .body(data))
}

fn export_xlsx(students: &[RosterStudent], list_name: &str) -> ActixResult<HttpResponse> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // 表头格式
    let header_format = Format::new().set_bold();

    // 写入表头
    let headers = ["学号", "姓名", "课程", "年级"];
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| {
                error!("XLSX write failed: {}", e);
                actix_web::error::ErrorInternalServerError(format!("XLSX write failed: {e}"))
            })?;
    }

    // 写入数据
    for (row, student) in students.iter().enumerate() {
        let row = (row + 1) as u32;
        worksheet.write_string(row, 0, &student.roll_no).ok();
        worksheet.write_string(row, 1, &student.name).ok();
        worksheet.write_string(row, 2, &student.course).ok();
        worksheet.write_string(row, 3, &student.year).ok();
    }

    // 生成二进制数据
    let buffer = workbook.save_to_buffer().map_err(|e| {
        error!("XLSX generation failed: {}", e);
        actix_web::error::ErrorInternalServerError(format!("XLSX generation failed: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"roster_{list_name}.xlsx\""),
        ))
        .body(buffer))
}
