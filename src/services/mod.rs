pub mod assignments;
pub mod auth;
pub mod files;
pub mod roster;
pub mod submissions;
pub mod teachers;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use files::FileService;
pub use roster::RosterService;
pub use submissions::SubmissionService;
pub use teachers::TeacherService;
