pub mod plugins;
pub mod site;

pub use self::plugins::{PluginsCommands, plugins_command};
pub use self::site::{SiteCommands, site_command};
