//! API 错误码定义
//!
//! code 为 0 表示成功，4xxx 为调用方错误，5xxx 为服务端错误。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 4000,
    Unauthorized = 4010,
    AuthFailed = 4011,
    Forbidden = 4030,
    NotFound = 4040,

    // 用户
    UserNotFound = 4101,
    UserEmailAlreadyExists = 4102,
    UserEmailInvalid = 4103,
    RegisterFailed = 4104,
    UserNotOnboarded = 4105,
    RollNoAlreadyExists = 4106,

    // 教师注册表
    TeacherAlreadyExists = 4201,
    TeacherNotFound = 4202,

    // 作业
    AssignmentNotFound = 4301,
    DuplicateAssignmentName = 4302,
    InvalidInput = 4303,

    // 提交
    SubmissionNotFound = 4401,
    AlreadySubmitted = 4402,
    PastDueDate = 4403,
    AlreadyFinalized = 4404,
    RemarkRequired = 4405,

    // 文件
    FileNotFound = 4501,
    FileUploadFailed = 4502,
    FileTypeNotAllowed = 4503,
    FileSizeExceeded = 4504,
    MultifileUploadNotAllowed = 4505,

    // 服务端
    InternalServerError = 5000,
}
