use std::error::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum MyError {
    AnError,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MyError::AnError => write!(f, "anError"),
        }
    }
}

impl Error for MyError {}

#[derive(Debug, PartialEq, Eq)]
pub enum FileReadError {
    FileNotFound,
    Unreadable,
    EncodingFailed,
}

impl std::fmt::Display for FileReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileReadError::FileNotFound => write!(f, "file not found"),
            FileReadError::Unreadable => write!(f, "file is unreadable"),
            FileReadError::EncodingFailed => write!(f, "file is not valid UTF-8"),
        }
    }
}

impl Error for FileReadError {}
