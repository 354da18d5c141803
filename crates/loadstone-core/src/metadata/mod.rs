//! Plugin metadata model: lists, per-plugin entries, and conditions.

mod condition;
mod list;
mod plugin;

pub use list::MetadataList;
pub use plugin::{
    CleanInfo, DirtyInfo, Message, MessageContent, MultilingualText, PluginMetadata,
    SimpleMessage, Tag,
};

pub(crate) use condition::{evaluate_condition, ConditionContext};
