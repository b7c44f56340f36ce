pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::http::DeliveryClient;
pub use config::{toml_config::TomlConfig, ContentConfig, DisplayConfig};
pub use core::adapter::ContentAdapter;
pub use domain::model::{
    Article, ArticleProfile, DropshippingSite, HomePageContent, Material, NavigationLink,
    Profile, Shape, ShapedNavigationLinks, SocialLink, Status,
};
pub use domain::ports::ContentStore;
pub use utils::error::{ContentError, Result};
