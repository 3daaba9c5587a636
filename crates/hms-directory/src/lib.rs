pub mod client;
pub mod doctor;
pub mod filter;

// Re-export core types
pub use client::{DirectoryClient, DirectoryError};
pub use doctor::{department_description, Doctor};
pub use filter::{group_by_department, DoctorFilter};
