//! Built-in frontmatter handlers

mod toml;
mod yaml;

pub use self::toml::TomlHandler;
pub use self::yaml::YamlHandler;
