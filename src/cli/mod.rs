pub mod clean;
pub mod doctor;
pub mod init;
pub mod installdeps;
pub mod output_format;
pub mod output_types;
