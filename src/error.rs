use std::fmt::{Display, Formatter};

/// Result type used by upload form operations.
pub type Result<T> = std::result::Result<T, UploadError>;

/// Reasons a picked file is refused. Both leave the form untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    InvalidFileType { mime: String },
    FileTooLarge { size: u64, limit: u64 },
}

impl UploadError {
    /// Toast heading shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidFileType { .. } => "خطأ في نوع الملف",
            Self::FileTooLarge { .. } => "حجم الملف كبير جداً",
        }
    }

    /// Toast body shown to the user.
    pub fn description(&self) -> String {
        match self {
            Self::InvalidFileType { .. } => "يرجى رفع ملف بصيغة MP3 فقط".to_string(),
            Self::FileTooLarge { limit, .. } => format!(
                "يجب أن يكون حجم الملف أقل من {} ميجابايت",
                limit / (1024 * 1024)
            ),
        }
    }
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFileType { mime } => {
                if mime.is_empty() {
                    write!(f, "unsupported file type: <unknown>")
                } else {
                    write!(f, "unsupported file type: {mime}")
                }
            }
            Self::FileTooLarge { size, limit } => {
                write!(f, "file is {size} bytes, limit is {limit} bytes")
            }
        }
    }
}

impl std::error::Error for UploadError {}
