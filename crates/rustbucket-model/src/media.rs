//! MIME lookup seam and coarse media categories.

use serde::{Deserialize, Serialize};

/// Looks up the MIME type of a file name.
///
/// The lookup table itself is not part of rustbucket; the default
/// [`GuessMimeResolver`] delegates to `mime_guess`.
pub trait MimeResolver: Send + Sync {
    /// MIME type for `filename`, `application/octet-stream` when unknown.
    fn resolve(&self, filename: &str) -> mime::Mime;
}

/// [`MimeResolver`] backed by the `mime_guess` extension table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuessMimeResolver;

impl MimeResolver for GuessMimeResolver {
    fn resolve(&self, filename: &str) -> mime::Mime {
        mime_guess::from_path(filename).first_or_octet_stream()
    }
}

/// Coarse category of an object, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeCategory {
    /// Key ending in `/`.
    Folder,
    /// `image/*`.
    Image,
    /// `video/*`.
    Video,
    /// `audio/*`.
    Audio,
    /// `text/*`.
    Text,
    /// PDF and office documents.
    Document,
    /// Compressed archives.
    Archive,
    /// Anything else.
    #[default]
    Other,
}

impl MimeCategory {
    /// Returns the string value of this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Document => "document",
            Self::Archive => "archive",
            Self::Other => "other",
        }
    }

    /// Category of a MIME type.
    #[must_use]
    pub fn from_mime(mime: &mime::Mime) -> Self {
        match mime.type_() {
            mime::IMAGE => Self::Image,
            mime::VIDEO => Self::Video,
            mime::AUDIO => Self::Audio,
            mime::TEXT => Self::Text,
            mime::APPLICATION => Self::from_application_subtype(mime.subtype().as_str()),
            _ => Self::Other,
        }
    }

    fn from_application_subtype(subtype: &str) -> Self {
        match subtype {
            "pdf" | "msword" | "rtf" => Self::Document,
            s if s.starts_with("vnd.openxmlformats-officedocument")
                || s.starts_with("vnd.ms-")
                || s.starts_with("vnd.oasis.opendocument") =>
            {
                Self::Document
            }
            "zip" | "gzip" | "x-gzip" | "x-tar" | "x-bzip2" | "x-xz" | "x-7z-compressed"
            | "vnd.rar" | "x-rar-compressed" | "zstd" => Self::Archive,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for MimeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> MimeCategory {
        MimeCategory::from_mime(&GuessMimeResolver.resolve(name))
    }

    #[test]
    fn test_should_categorize_common_extensions() {
        assert_eq!(category("photo.JPG"), MimeCategory::Image);
        assert_eq!(category("clip.mp4"), MimeCategory::Video);
        assert_eq!(category("song.mp3"), MimeCategory::Audio);
        assert_eq!(category("notes.txt"), MimeCategory::Text);
        assert_eq!(category("report.pdf"), MimeCategory::Document);
        assert_eq!(category("sheet.xlsx"), MimeCategory::Document);
        assert_eq!(category("backup.zip"), MimeCategory::Archive);
    }

    #[test]
    fn test_should_fall_back_to_octet_stream() {
        let mime = GuessMimeResolver.resolve("no-extension");
        assert_eq!(mime, mime::APPLICATION_OCTET_STREAM);
        assert_eq!(MimeCategory::from_mime(&mime), MimeCategory::Other);
    }
}
