//! Configuration module

mod site;

pub use site::AboutCard;
pub use site::AboutConfig;
pub use site::FeedConfig;
pub use site::HttpConfig;
pub use site::MenuItem;
pub use site::ReaderConfig;
pub use site::ThemeConfig;
