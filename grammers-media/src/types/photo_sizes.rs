// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Image previews ("thumbs") attached to photos and documents.
//!
//! <https://core.telegram.org/api/files#image-thumbnail-types>

/// JPEG header shared by every stripped thumbnail: JFIF marker, quantization tables,
/// frame header, Huffman tables and scan header.
///
/// Based on <https://core.telegram.org/api/files#stripped-thumbnails>.
const STRIPPED_HEADER: [u8; 623] = [
    0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x49, 0x46, 0x00, 0x01,
    0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0xff, 0xdb, 0x00, 0x43,
    0x00, 0x28, 0x1c, 0x1e, 0x23, 0x1e, 0x19, 0x28, 0x23, 0x21, 0x23, 0x2d,
    0x2b, 0x28, 0x30, 0x3c, 0x64, 0x41, 0x3c, 0x37, 0x37, 0x3c, 0x7b, 0x58,
    0x5d, 0x49, 0x64, 0x91, 0x80, 0x99, 0x96, 0x8f, 0x80, 0x8c, 0x8a, 0xa0,
    0xb4, 0xe6, 0xc3, 0xa0, 0xaa, 0xda, 0xad, 0x8a, 0x8c, 0xc8, 0xff, 0xcb,
    0xda, 0xee, 0xf5, 0xff, 0xff, 0xff, 0x9b, 0xc1, 0xff, 0xff, 0xff, 0xfa,
    0xff, 0xe6, 0xfd, 0xff, 0xf8, 0xff, 0xdb, 0x00, 0x43, 0x01, 0x2b, 0x2d,
    0x2d, 0x3c, 0x35, 0x3c, 0x76, 0x41, 0x41, 0x76, 0xf8, 0xa5, 0x8c, 0xa5,
    0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8,
    0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8,
    0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8,
    0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8, 0xf8,
    0xf8, 0xf8, 0xff, 0xc0, 0x00, 0x11, 0x08, 0x00, 0x00, 0x00, 0x00, 0x03,
    0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xff, 0xc4, 0x00,
    0x1f, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05,
    0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0xff, 0xc4, 0x00, 0xb5, 0x10, 0x00,
    0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05, 0x04, 0x04, 0x00,
    0x00, 0x01, 0x7d, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
    0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81,
    0x91, 0xa1, 0x08, 0x23, 0x42, 0xb1, 0xc1, 0x15, 0x52, 0xd1, 0xf0, 0x24,
    0x33, 0x62, 0x72, 0x82, 0x09, 0x0a, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x25,
    0x26, 0x27, 0x28, 0x29, 0x2a, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a,
    0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4a, 0x53, 0x54, 0x55, 0x56,
    0x57, 0x58, 0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a,
    0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x83, 0x84, 0x85, 0x86,
    0x87, 0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99,
    0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3,
    0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6,
    0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9,
    0xda, 0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea, 0xf1,
    0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xff, 0xc4, 0x00,
    0x1f, 0x01, 0x00, 0x03, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05,
    0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0xff, 0xc4, 0x00, 0xb5, 0x11, 0x00,
    0x02, 0x01, 0x02, 0x04, 0x04, 0x03, 0x04, 0x07, 0x05, 0x04, 0x04, 0x00,
    0x01, 0x02, 0x77, 0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31,
    0x06, 0x12, 0x41, 0x51, 0x07, 0x61, 0x71, 0x13, 0x22, 0x32, 0x81, 0x08,
    0x14, 0x42, 0x91, 0xa1, 0xb1, 0xc1, 0x09, 0x23, 0x33, 0x52, 0xf0, 0x15,
    0x62, 0x72, 0xd1, 0x0a, 0x16, 0x24, 0x34, 0xe1, 0x25, 0xf1, 0x17, 0x18,
    0x19, 0x1a, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x35, 0x36, 0x37, 0x38, 0x39,
    0x3a, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4a, 0x53, 0x54, 0x55,
    0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69,
    0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x82, 0x83, 0x84,
    0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97,
    0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa,
    0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4,
    0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7,
    0xd8, 0xd9, 0xda, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8, 0xe9, 0xea,
    0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xff, 0xda, 0x00,
    0x0c, 0x03, 0x01, 0x00, 0x02, 0x11, 0x03, 0x11, 0x00, 0x3f, 0x00,
];

/// End-of-image marker appended to an expanded stripped thumbnail.
const STRIPPED_FOOTER: [u8; 2] = [0xff, 0xd9];

/// Length of the fixed header that [`expand_stripped`] prepends to the payload.
pub const STRIPPED_HEADER_LEN: usize = STRIPPED_HEADER.len();

/// Offset of the header byte replaced by the first dimension byte of a stripped payload.
const HEIGHT_OFFSET: usize = 164;
/// Offset of the header byte replaced by the second dimension byte of a stripped payload.
const WIDTH_OFFSET: usize = 166;

/// Expands the compact encoding of a [`StrippedSize`] into a complete JPEG image.
///
/// Returns an empty vector if the payload is not a supported stripped thumbnail (fewer than
/// three bytes, or a version byte other than `1`).
///
/// # Examples
///
/// ```
/// use grammers_media::types::photo_sizes::{STRIPPED_HEADER_LEN, expand_stripped};
///
/// let jpeg = expand_stripped(&[0x01, 0x05, 0x07, 0xaa, 0xbb, 0xcc]);
/// assert_eq!(jpeg.len(), STRIPPED_HEADER_LEN + 8);
/// assert!(jpeg.ends_with(&[0xff, 0xd9]));
///
/// assert!(expand_stripped(&[0x02, 0x05, 0x07]).is_empty());
/// ```
pub fn expand_stripped(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() < 3 || bytes[0] != 0x01 {
        return Vec::new();
    }

    let total = STRIPPED_HEADER.len() + bytes.len() + STRIPPED_FOOTER.len();
    let mut real = Vec::with_capacity(total);
    real.extend_from_slice(&STRIPPED_HEADER);
    real[HEIGHT_OFFSET] = bytes[1];
    real[WIDTH_OFFSET] = bytes[2];
    real.extend_from_slice(&bytes[3..]);
    // The scan data is followed by as many zero bytes as the payload header had.
    real.resize(total - STRIPPED_FOOTER.len(), 0);
    real.extend_from_slice(&STRIPPED_FOOTER);
    real
}

/// A single preview of a photo or document.
///
/// Some low-resolution variants already carry their content inline, while the rest
/// only describe a size that must be downloaded separately.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum PhotoSize {
    Empty(SizeEmpty),
    Size(Size),
    Cached(CachedSize),
    Stripped(StrippedSize),
    Progressive(ProgressiveSize),
    Video(VideoSize),
    Path(PathSize),
}

/// Empty thumbnail. Image with this thumbnail is unavailable.
#[derive(Clone, Debug, PartialEq)]
pub struct SizeEmpty {
    pub photo_type: String,
}

/// Image description. An additional request to Telegram should be perfomed to download the image
#[derive(Clone, Debug, PartialEq)]
pub struct Size {
    pub photo_type: String,
    pub width: i32,
    pub height: i32,
    pub size: i32,
}

/// Description of an image and its content.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedSize {
    pub photo_type: String,
    pub width: i32,
    pub height: i32,
    pub bytes: Vec<u8>,
}

/// A low-resolution compressed JPG payload, see [`expand_stripped`].
#[derive(Clone, Debug, PartialEq)]
pub struct StrippedSize {
    pub photo_type: String,
    pub bytes: Vec<u8>,
}

/// Progressively encoded photosize
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressiveSize {
    pub photo_type: String,
    pub width: i32,
    pub height: i32,
    pub sizes: Vec<i32>,
}

/// An animated preview, normally attached to videos and animated profile pictures.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSize {
    pub photo_type: String,
    pub width: i32,
    pub height: i32,
    pub size: i32,
}

/// Messages with animated stickers can have a compressed svg (< 300 bytes) to show the outline
/// of the sticker before fetching the actual lottie animation.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSize {
    pub photo_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoSize {
    /// Weight of the thumb, used to compare it against its siblings.
    ///
    /// This is the length of inline payloads, or the declared size of the ones that need to
    /// be downloaded. Variants without a meaningful size weigh zero.
    pub fn size(&self) -> usize {
        let declared = |size: i32| size.max(0) as usize;
        match self {
            PhotoSize::Empty(_) => 0,
            PhotoSize::Size(size) => declared(size.size),
            PhotoSize::Cached(size) => size.bytes.len(),
            PhotoSize::Stripped(size) => size.bytes.len(),
            PhotoSize::Progressive(size) => {
                size.sizes.iter().copied().max().map(declared).unwrap_or(0)
            }
            PhotoSize::Video(size) => declared(size.size),
            PhotoSize::Path(_) => 0,
        }
    }

    /// The size tag identifying this thumb in a file location (e.g. `"m"`, `"x"` or `"i"`).
    pub fn photo_type(&self) -> &str {
        match self {
            PhotoSize::Empty(size) => &size.photo_type,
            PhotoSize::Size(size) => &size.photo_type,
            PhotoSize::Cached(size) => &size.photo_type,
            PhotoSize::Stripped(size) => &size.photo_type,
            PhotoSize::Progressive(size) => &size.photo_type,
            PhotoSize::Video(size) => &size.photo_type,
            PhotoSize::Path(size) => &size.photo_type,
        }
    }

    /// The image contents, if they are carried inline and no download is needed.
    ///
    /// Stripped thumbs are expanded, which may produce an empty image if the payload is not
    /// supported.
    pub fn inline_bytes(&self) -> Option<Vec<u8>> {
        match self {
            PhotoSize::Cached(size) => Some(size.bytes.clone()),
            PhotoSize::Stripped(size) => Some(expand_stripped(&size.bytes)),
            PhotoSize::Empty(_)
            | PhotoSize::Size(_)
            | PhotoSize::Progressive(_)
            | PhotoSize::Video(_)
            | PhotoSize::Path(_) => None,
        }
    }
}

/// Returns the thumb with the largest [`PhotoSize::size`].
///
/// When several thumbs share the largest size, the one that comes last wins.
pub fn largest(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    // `max_by_key` returns the last of equally maximum elements.
    sizes.iter().max_by_key(|size| size.size())
}

pub trait VecExt {
    /// Helper method to get the largest photo thumb
    fn largest(&self) -> Option<&PhotoSize>;
}

impl VecExt for [PhotoSize] {
    fn largest(&self) -> Option<&PhotoSize> {
        largest(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(photo_type: &str, size: i32) -> PhotoSize {
        PhotoSize::Size(Size {
            photo_type: photo_type.to_string(),
            width: 90,
            height: 90,
            size,
        })
    }

    #[test]
    fn expand_stripped_example() {
        let payload = [0x01, 0x05, 0x07, 0xaa, 0xbb, 0xcc];
        let jpeg = expand_stripped(&payload);

        assert_eq!(jpeg.len(), STRIPPED_HEADER_LEN + 8);
        assert_eq!(jpeg[164], 0x05);
        assert_eq!(jpeg[166], 0x07);
        assert_eq!(
            &jpeg[STRIPPED_HEADER_LEN..STRIPPED_HEADER_LEN + 3],
            &[0xaa, 0xbb, 0xcc]
        );
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xff, 0xd9]);
    }

    #[test]
    fn expand_stripped_keeps_header() {
        let payload = (0..64).map(|i| if i == 0 { 1 } else { i as u8 }).collect::<Vec<_>>();
        let jpeg = expand_stripped(&payload);

        assert_eq!(jpeg.len(), STRIPPED_HEADER_LEN + payload.len() + 2);
        assert_eq!(&jpeg[..4], &[0xff, 0xd8, 0xff, 0xe0]);
        for (i, byte) in jpeg[..STRIPPED_HEADER_LEN].iter().enumerate() {
            match i {
                HEIGHT_OFFSET => assert_eq!(*byte, payload[1]),
                WIDTH_OFFSET => assert_eq!(*byte, payload[2]),
                _ => assert_eq!(*byte, STRIPPED_HEADER[i]),
            }
        }
        assert_eq!(
            &jpeg[STRIPPED_HEADER_LEN..STRIPPED_HEADER_LEN + payload.len() - 3],
            &payload[3..]
        );
        assert!(jpeg.ends_with(&STRIPPED_FOOTER));
    }

    #[test]
    fn expand_stripped_minimal_payload() {
        let jpeg = expand_stripped(&[0x01, 0x20, 0x28]);
        assert_eq!(jpeg.len(), STRIPPED_HEADER_LEN + 5);
        assert_eq!(jpeg[HEIGHT_OFFSET], 0x20);
        assert_eq!(jpeg[WIDTH_OFFSET], 0x28);
        assert!(jpeg.ends_with(&[0xff, 0xd9]));
    }

    #[test]
    fn expand_stripped_unsupported() {
        assert!(expand_stripped(&[]).is_empty());
        assert!(expand_stripped(&[0x01]).is_empty());
        assert!(expand_stripped(&[0x01, 0x05]).is_empty());
        assert!(expand_stripped(&[0x00, 0x05, 0x07, 0xaa]).is_empty());
        assert!(expand_stripped(&[0x02, 0x05, 0x07, 0xaa]).is_empty());
    }

    #[test]
    fn size_of_each_variant() {
        assert_eq!(sized("m", 320).size(), 320);
        assert_eq!(sized("m", -1).size(), 0);
        assert_eq!(
            PhotoSize::Stripped(StrippedSize {
                photo_type: "i".into(),
                bytes: vec![1, 2, 3, 4],
            })
            .size(),
            4
        );
        assert_eq!(
            PhotoSize::Cached(CachedSize {
                photo_type: "s".into(),
                width: 8,
                height: 8,
                bytes: vec![0; 7],
            })
            .size(),
            7
        );
        assert_eq!(
            PhotoSize::Progressive(ProgressiveSize {
                photo_type: "y".into(),
                width: 1280,
                height: 720,
                sizes: vec![1000, 5000, 3000],
            })
            .size(),
            5000
        );
        assert_eq!(
            PhotoSize::Video(VideoSize {
                photo_type: "u".into(),
                width: 640,
                height: 640,
                size: 900,
            })
            .size(),
            900
        );
        assert_eq!(
            PhotoSize::Path(PathSize {
                photo_type: "j".into(),
                bytes: vec![0; 100],
            })
            .size(),
            0
        );
        assert_eq!(
            PhotoSize::Empty(SizeEmpty {
                photo_type: "".into()
            })
            .size(),
            0
        );
    }

    #[test]
    fn largest_prefers_last_of_equals() {
        let sizes = vec![sized("a", 10), sized("b", 30), sized("c", 30), sized("d", 5)];
        assert_eq!(sizes.largest().map(PhotoSize::photo_type), Some("c"));
        assert_eq!(largest(&sizes), Some(&sizes[2]));
    }

    #[test]
    fn largest_of_nothing() {
        assert_eq!(largest(&[]), None);
    }

    #[test]
    fn inline_bytes_only_for_inline_variants() {
        let cached = PhotoSize::Cached(CachedSize {
            photo_type: "s".into(),
            width: 1,
            height: 1,
            bytes: vec![9, 9],
        });
        let stripped = PhotoSize::Stripped(StrippedSize {
            photo_type: "i".into(),
            bytes: vec![1, 2, 3, 4],
        });

        assert_eq!(cached.inline_bytes(), Some(vec![9, 9]));
        assert_eq!(
            stripped.inline_bytes().map(|b| b.len()),
            Some(STRIPPED_HEADER_LEN + 6)
        );
        assert_eq!(sized("m", 10).inline_bytes(), None);
    }
}
