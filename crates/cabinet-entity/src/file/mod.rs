//! File domain entities.

pub mod model;
pub mod file_type;

pub use file_type::{DEFAULT_FILE_ICON, FileType, file_type_of};
pub use model::{File, FileDownload, FileUpload};
