// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::types::photo_sizes::PhotoSize;
use crate::types::{FileLocation, LocationKind};

/// Size tag used to download a photo when none of its sizes can be used.
const DEFAULT_PHOTO_TYPE: &str = "w";

#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub dc_id: i32,
    pub sizes: Vec<PhotoSize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: i64,
    pub access_hash: i64,
    pub file_reference: Vec<u8>,
    pub dc_id: i32,
    /// Declared size in bytes, or `0` if unknown.
    pub size: i64,
    pub mime_type: String,
    pub attributes: Vec<DocumentAttribute>,
    pub thumbs: Vec<PhotoSize>,
}

#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum DocumentAttribute {
    Filename(String),
    Video { duration: f64, width: i32, height: i32 },
}

/// Downloadable media attached to a message.
#[derive(Clone, Debug, PartialEq)]
pub enum Media {
    Photo(Photo),
    Document(Document),
}

/// A message as returned by the [`crate::Remote`], reduced to what is needed to reach its media.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: i32,
    pub container_id: i64,
    pub media: Option<Media>,
}

impl Photo {
    /// The largest size that has to be downloaded, ignoring the ones carried inline
    /// (cached, stripped or vector outlines) which have no remote counterpart.
    fn largest_remote_size(&self) -> Option<&PhotoSize> {
        self.sizes
            .iter()
            .filter(|size| matches!(size, PhotoSize::Size(_) | PhotoSize::Progressive(_)))
            .max_by_key(|size| size.size())
    }

    /// The size of the photo.
    /// returns 0 if unable to get the size.
    pub fn size(&self) -> i64 {
        match self.largest_remote_size() {
            Some(thumb) => thumb.size() as i64,
            None => 0,
        }
    }

    /// Location of the photo in its largest available size.
    pub fn to_location(&self) -> FileLocation {
        FileLocation {
            kind: LocationKind::Photo,
            id: self.id,
            access_hash: self.access_hash,
            file_reference: self.file_reference.clone(),
            dc_id: self.dc_id,
            thumb_size: self
                .largest_remote_size()
                .map(|ps| ps.photo_type().to_string())
                .unwrap_or(String::from(DEFAULT_PHOTO_TYPE)),
        }
    }
}

impl Document {
    /// The file name of the document, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attr| match attr {
            DocumentAttribute::Filename(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// The file name of the document, or one made up from its identifier and mime type.
    pub fn file_name(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_string();
        }

        let ext = mime_guess::get_mime_extensions_str(&self.mime_type)
            .and_then(|exts| exts.first())
            .copied()
            .unwrap_or("bin");

        format!("{}.{}", self.id, ext)
    }

    /// Width and height of the document, if it is a video.
    pub fn resolution(&self) -> Option<(i32, i32)> {
        self.attributes.iter().find_map(|attr| match attr {
            DocumentAttribute::Video { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
    }

    /// Location of the complete document.
    pub fn to_location(&self) -> FileLocation {
        FileLocation {
            kind: LocationKind::Document,
            id: self.id,
            access_hash: self.access_hash,
            file_reference: self.file_reference.clone(),
            dc_id: self.dc_id,
            thumb_size: String::new(),
        }
    }
}

impl Media {
    /// Size of the complete file, in bytes, or 0 if unknown.
    pub fn size(&self) -> i64 {
        match self {
            Media::Photo(photo) => photo.size(),
            Media::Document(document) => document.size,
        }
    }

    /// Name to save the complete file as.
    ///
    /// Documents use their own file name if they have one. Everything else gets a name made
    /// up from its identifier and an extension for its mime type, such as `"5.jpg"` for photos.
    pub fn file_name(&self) -> String {
        match self {
            Media::Photo(photo) => format!("{}.jpg", photo.id),
            Media::Document(document) => document.file_name(),
        }
    }

    /// The mime type of the complete file.
    pub fn mime_type(&self) -> &str {
        match self {
            // Telegram re-encodes every photo as JPEG.
            Media::Photo(_) => "image/jpeg",
            Media::Document(document) => &document.mime_type,
        }
    }

    /// Previews available for this media.
    pub fn thumbs(&self) -> &[PhotoSize] {
        match self {
            Media::Photo(photo) => &photo.sizes,
            Media::Document(document) => &document.thumbs,
        }
    }

    /// Location of the complete file.
    pub fn to_location(&self) -> FileLocation {
        match self {
            Media::Photo(photo) => photo.to_location(),
            Media::Document(document) => document.to_location(),
        }
    }

    /// Location of one of the [`Media::thumbs`].
    pub fn to_thumb_location(&self, thumb: &PhotoSize) -> FileLocation {
        FileLocation {
            thumb_size: thumb.photo_type().to_string(),
            ..self.to_location()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::photo_sizes::{CachedSize, PathSize, ProgressiveSize, Size, StrippedSize};

    fn document(mime_type: &str, attributes: Vec<DocumentAttribute>) -> Document {
        Document {
            id: 77,
            access_hash: 1,
            file_reference: vec![1, 2, 3],
            dc_id: 2,
            size: 1024,
            mime_type: mime_type.to_string(),
            attributes,
            thumbs: Vec::new(),
        }
    }

    #[test]
    fn document_file_name() {
        let named = document(
            "application/pdf",
            vec![DocumentAttribute::Filename("report.pdf".into())],
        );
        assert_eq!(named.name(), Some("report.pdf"));
        assert_eq!(named.file_name(), "report.pdf");

        let unnamed = document("application/pdf", Vec::new());
        assert_eq!(unnamed.name(), None);
        assert_eq!(unnamed.file_name(), "77.pdf");

        let unknown = document("application/x-not-a-real-type", Vec::new());
        assert_eq!(unknown.file_name(), "77.bin");
    }

    #[test]
    fn document_resolution() {
        let video = document(
            "video/mp4",
            vec![
                DocumentAttribute::Filename("clip.mp4".into()),
                DocumentAttribute::Video {
                    duration: 3.5,
                    width: 1280,
                    height: 720,
                },
            ],
        );
        assert_eq!(video.resolution(), Some((1280, 720)));
        assert_eq!(document("video/mp4", Vec::new()).resolution(), None);
    }

    #[test]
    fn photo_location_uses_largest_size() {
        let photo = Photo {
            id: 5,
            access_hash: 6,
            file_reference: vec![7],
            dc_id: 4,
            sizes: vec![
                PhotoSize::Stripped(StrippedSize {
                    photo_type: "i".into(),
                    bytes: vec![1, 2, 3],
                }),
                PhotoSize::Size(Size {
                    photo_type: "x".into(),
                    width: 800,
                    height: 600,
                    size: 40_000,
                }),
                PhotoSize::Size(Size {
                    photo_type: "m".into(),
                    width: 320,
                    height: 240,
                    size: 9_000,
                }),
            ],
        };

        let location = photo.to_location();
        assert_eq!(location.kind, LocationKind::Photo);
        assert_eq!(location.thumb_size, "x");
        assert_eq!(location.dc_id, 4);
        assert_eq!(photo.size(), 40_000);

        let bare = Photo {
            sizes: Vec::new(),
            ..photo
        };
        assert_eq!(bare.to_location().thumb_size, "w");
        assert_eq!(bare.size(), 0);
    }

    #[test]
    fn document_locations() {
        let media = Media::Document(document("video/mp4", Vec::new()));
        let full = media.to_location();
        assert_eq!(full.kind, LocationKind::Document);
        assert!(full.thumb_size.is_empty());

        let thumb = PhotoSize::Size(Size {
            photo_type: "m".into(),
            width: 320,
            height: 180,
            size: 5_000,
        });
        let location = media.to_thumb_location(&thumb);
        assert_eq!(location.thumb_size, "m");
        assert_eq!(location.id, 77);
        assert_eq!(media.mime_type(), "video/mp4");
    }

    #[test]
    fn photo_location_skips_inline_sizes() {
        let photo = Photo {
            id: 5,
            access_hash: 6,
            file_reference: vec![7],
            dc_id: 4,
            sizes: vec![
                PhotoSize::Cached(CachedSize {
                    photo_type: "s".into(),
                    width: 90,
                    height: 90,
                    bytes: vec![0; 2_000],
                }),
                PhotoSize::Path(PathSize {
                    photo_type: "j".into(),
                    bytes: vec![0; 300],
                }),
            ],
        };
        assert_eq!(photo.to_location().thumb_size, "w");
        assert_eq!(photo.size(), 0);

        let progressive = Photo {
            sizes: vec![
                PhotoSize::Progressive(ProgressiveSize {
                    photo_type: "y".into(),
                    width: 1280,
                    height: 960,
                    sizes: vec![10_000, 80_000],
                }),
                PhotoSize::Stripped(StrippedSize {
                    photo_type: "i".into(),
                    bytes: vec![1; 100_000],
                }),
            ],
            ..photo
        };
        assert_eq!(progressive.to_location().thumb_size, "y");
        assert_eq!(progressive.size(), 80_000);
    }

    #[test]
    fn media_file_name() {
        let photo = Media::Photo(Photo {
            id: 5,
            access_hash: 6,
            file_reference: vec![7],
            dc_id: 4,
            sizes: Vec::new(),
        });
        assert_eq!(photo.file_name(), "5.jpg");

        let named = Media::Document(document(
            "video/mp4",
            vec![DocumentAttribute::Filename("clip.mp4".into())],
        ));
        assert_eq!(named.file_name(), "clip.mp4");
        assert_eq!(
            Media::Document(document("application/pdf", Vec::new())).file_name(),
            "77.pdf"
        );
    }
}
