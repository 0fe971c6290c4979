pub mod admin;
pub mod class;
pub mod question;
pub mod student_attempt;
pub mod subject;
pub mod teacher;
