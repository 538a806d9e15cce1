//! Crawl orchestration
//!
//! Two entry points share the same resumable merge machinery:
//! [`CategoryCrawler`] walks the flat category index, [`MenuCrawler`] walks
//! the navigation menu and applies a variant merge to its "Listen" branch.

mod category;
mod menu;
pub mod merge;

pub use category::CategoryCrawler;
pub use menu::MenuCrawler;

use crate::config::Config;
use crate::model::{Category, MenuGroup};
use crate::Result;

/// Runs the flat category crawl described by `config`
pub async fn run_stations_crawl(config: &Config) -> Result<Vec<Category>> {
    let mut crawler = CategoryCrawler::from_config(config)?;
    crawler.all_categories().await
}

/// Runs the full menu crawl described by `config`
pub async fn run_menu_crawl(config: &Config) -> Result<Vec<MenuGroup>> {
    let mut crawler = MenuCrawler::from_config(config)?;
    crawler.all_categories().await
}

/// Crawls only the "Listen" branch of the menu
pub async fn run_listen_crawl(config: &Config) -> Result<MenuGroup> {
    let mut crawler = MenuCrawler::from_config(config)?;
    crawler.listen_group().await
}
