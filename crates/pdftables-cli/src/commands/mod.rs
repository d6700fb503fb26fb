pub mod doctor;
pub mod extract;
