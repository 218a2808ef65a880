pub mod boards;
pub mod files;
pub mod health;
pub mod members;
pub mod projects;
pub mod tasks;
