pub mod assignments;

pub mod auth;

pub mod files;

pub mod roster;

pub mod submissions;

pub mod teachers;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use files::configure_file_routes;
pub use roster::configure_roster_routes;
pub use submissions::configure_submission_routes;
pub use teachers::configure_teacher_routes;
