// Copyright 2020 - developers of the `grammers` project.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Custom types extending those provided by Telegram.
mod location;
mod media;
mod message_ref;
pub mod photo_sizes;

pub use location::{FileLocation, GetFile, LocationKind};
pub use media::{Document, DocumentAttribute, Media, Message, Photo};
pub use message_ref::MessageRef;
pub use photo_sizes::PhotoSize;
