mod picker;

pub use picker::{ARCHIVE_SUFFIX, AssetPicker, PlatformAssetPicker};
