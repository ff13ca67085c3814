use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PlotResult<T> = Result<T, PlotError>;
pub type ParserResult<T> = PlotResult<T>;
pub type RenderResult<T> = PlotResult<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotErrorCategory {
    InvalidInputError,
    MalformedFileError,
    IoSystemError,
    RenderError,
    InternalError,
}

impl PlotErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InvalidInputError => 2,
            Self::MalformedFileError => 3,
            Self::IoSystemError => 4,
            Self::RenderError => 5,
            Self::InternalError => 6,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInputError => "InvalidInputError",
            Self::MalformedFileError => "MalformedFileError",
            Self::IoSystemError => "IoSystemError",
            Self::RenderError => "RenderError",
            Self::InternalError => "InternalError",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotError {
    category: PlotErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl PlotError {
    pub fn new(
        category: PlotErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn invalid_input(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PlotErrorCategory::InvalidInputError, placeholder, message)
    }

    pub fn malformed_file(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PlotErrorCategory::MalformedFileError, placeholder, message)
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PlotErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn render(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PlotErrorCategory::RenderError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(PlotErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> PlotErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

impl Display for PlotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for PlotError {}
