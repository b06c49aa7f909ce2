mod url;

pub use self::url::{SaveUrlRequest, VideoUrl};
