//! Per-plugin metadata: tags, messages, and cleaning records.

use serde::{Deserialize, Serialize};

use crate::enums::MessageType;

fn default_language() -> String {
    "en".to_string()
}

/// One localisation of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(default = "default_language")]
    pub lang: String,
    pub text: String,
}

/// Message content as it appears in a metadata list: either a bare string
/// (implicitly English) or a list of localisations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultilingualText {
    Single(String),
    Localised(Vec<MessageContent>),
}

/// A diagnostic message attached to a plugin entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    pub content: MultilingualText,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub condition: String,
}

impl Message {
    /// Resolve this message to a single language.
    ///
    /// Selection order: exact language match, then English, then the first
    /// localisation present.
    pub fn to_simple(&self, language: &str) -> SimpleMessage {
        let (lang, text) = match &self.content {
            MultilingualText::Single(text) => (default_language(), text.clone()),
            MultilingualText::Localised(contents) => contents
                .iter()
                .find(|c| c.lang == language)
                .or_else(|| contents.iter().find(|c| c.lang == "en"))
                .or_else(|| contents.first())
                .map(|c| (c.lang.clone(), c.text.clone()))
                .unwrap_or_else(|| (language.to_string(), String::new())),
        };
        SimpleMessage {
            message_type: self.message_type,
            language: lang,
            text,
            condition: self.condition.clone(),
        }
    }
}

/// A displayable message resolved to one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleMessage {
    pub message_type: MessageType,
    pub language: String,
    pub text: String,
    pub condition: String,
}

/// A Bash Tag suggestion.
///
/// The string form is `Name` for an addition and `-Name` for a removal; the
/// map form adds a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Plain(String),
    Conditional { name: String, condition: String },
}

impl Tag {
    fn raw_name(&self) -> &str {
        match self {
            Tag::Plain(name) => name,
            Tag::Conditional { name, .. } => name,
        }
    }

    /// Tag name without the removal marker.
    pub fn name(&self) -> &str {
        self.raw_name().trim_start_matches('-')
    }

    /// Whether this tag is suggested for addition (as opposed to removal).
    pub fn is_addition(&self) -> bool {
        !self.raw_name().starts_with('-')
    }

    /// The tag's condition, empty for unconditional tags.
    pub fn condition(&self) -> &str {
        match self {
            Tag::Plain(_) => "",
            Tag::Conditional { condition, .. } => condition,
        }
    }
}

/// CRCs appear in lists as hex scalars (`0xDEADBEEF`). Parsers that resolve
/// those as integers and parsers that hand them over as strings both end up
/// here.
fn crc_from_yaml<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct CrcVisitor;

    impl<'de> serde::de::Visitor<'de> for CrcVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a CRC as an integer or hex string")
        }

        fn visit_u64<E: serde::de::Error>(self, value: u64) -> std::result::Result<u32, E> {
            u32::try_from(value).map_err(E::custom)
        }

        fn visit_i64<E: serde::de::Error>(self, value: i64) -> std::result::Result<u32, E> {
            u32::try_from(value).map_err(E::custom)
        }

        fn visit_str<E: serde::de::Error>(self, value: &str) -> std::result::Result<u32, E> {
            let digits = value
                .trim_start_matches("0x")
                .trim_start_matches("0X");
            u32::from_str_radix(digits, 16).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(CrcVisitor)
}

/// Record of a plugin revision known to contain dirty edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirtyInfo {
    #[serde(deserialize_with = "crc_from_yaml")]
    pub crc: u32,
    #[serde(default)]
    pub util: String,
    #[serde(default)]
    pub itm: u32,
    #[serde(default)]
    pub udr: u32,
    #[serde(default)]
    pub nav: u32,
}

/// Record of a plugin revision verified clean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanInfo {
    #[serde(deserialize_with = "crc_from_yaml")]
    pub crc: u32,
    #[serde(default)]
    pub util: String,
}

/// Full metadata for one plugin, as merged from masterlist and userlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(default, rename = "msg", skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default, rename = "dirty", skip_serializing_if = "Vec::is_empty")]
    pub dirty_info: Vec<DirtyInfo>,
    #[serde(default, rename = "clean", skip_serializing_if = "Vec::is_empty")]
    pub clean_info: Vec<CleanInfo>,
}

impl PluginMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        PluginMetadata {
            name: name.into(),
            ..PluginMetadata::default()
        }
    }

    /// Plugin filenames compare case-insensitively.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Append another entry's metadata to this one. Used to layer userlist
    /// entries over their masterlist counterparts.
    pub fn merge(&mut self, other: &PluginMetadata) {
        self.tags.extend(other.tags.iter().cloned());
        self.messages.extend(other.messages.iter().cloned());
        self.dirty_info.extend(other.dirty_info.iter().cloned());
        self.clean_info.extend(other.clean_info.iter().cloned());
    }

    /// All messages resolved to `language`.
    pub fn simple_messages(&self, language: &str) -> Vec<SimpleMessage> {
        self.messages.iter().map(|m| m.to_simple(language)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_string_form_round_trips() {
        let tag: Tag = serde_yaml::from_str("-Relev").unwrap();
        assert_eq!(tag.name(), "Relev");
        assert!(!tag.is_addition());
        assert_eq!(tag.condition(), "");
        assert_eq!(serde_yaml::to_string(&tag).unwrap().trim(), "-Relev");
    }

    #[test]
    fn tag_map_form_carries_condition() {
        let tag: Tag =
            serde_yaml::from_str(r#"{ name: Filter, condition: 'file("Bar.esp")' }"#).unwrap();
        assert_eq!(tag.name(), "Filter");
        assert!(tag.is_addition());
        assert_eq!(tag.condition(), r#"file("Bar.esp")"#);
    }

    #[test]
    fn message_resolves_exact_language_then_english() {
        let message: Message = serde_yaml::from_str(
            r#"
type: warn
content:
  - { lang: en, text: english }
  - { lang: de, text: deutsch }
"#,
        )
        .unwrap();

        assert_eq!(message.to_simple("de").text, "deutsch");
        assert_eq!(message.to_simple("fr").text, "english");
        assert_eq!(message.to_simple("fr").language, "en");
    }

    #[test]
    fn bare_string_content_is_english() {
        let message: Message =
            serde_yaml::from_str("{ type: say, content: 'Hello.' }").unwrap();
        let simple = message.to_simple("pl");
        assert_eq!(simple.language, "en");
        assert_eq!(simple.text, "Hello.");
        assert_eq!(simple.message_type, MessageType::Say);
    }

    #[test]
    fn crc_accepts_integer_and_hex_string_forms() {
        let dirty: DirtyInfo =
            serde_yaml::from_str("{ crc: 3735928559, util: Tool }").unwrap();
        assert_eq!(dirty.crc, 0xDEAD_BEEF);

        let dirty: DirtyInfo = serde_yaml::from_str(r#"{ crc: "0xDEADBEEF" }"#).unwrap();
        assert_eq!(dirty.crc, 0xDEAD_BEEF);

        let clean: CleanInfo = serde_yaml::from_str(r#"{ crc: "CAFEF00D" }"#).unwrap();
        assert_eq!(clean.crc, 0xCAFE_F00D);
    }

    #[test]
    fn merge_appends_every_metadata_kind() {
        let mut base = PluginMetadata::new("Foo.esp");
        base.tags.push(Tag::Plain("Delev".into()));

        let mut overlay = PluginMetadata::new("Foo.esp");
        overlay.tags.push(Tag::Plain("-Relev".into()));
        overlay.dirty_info.push(DirtyInfo {
            crc: 0xDEAD_BEEF,
            util: "CleanTool".into(),
            itm: 1,
            udr: 0,
            nav: 0,
        });

        base.merge(&overlay);
        assert_eq!(base.tags.len(), 2);
        assert_eq!(base.dirty_info.len(), 1);
    }

    #[test]
    fn name_matching_is_case_insensitive() {
        let meta = PluginMetadata::new("Unofficial Patch.esp");
        assert!(meta.name_matches("unofficial patch.esp"));
        assert!(!meta.name_matches("Unofficial Patch.esm"));
    }
}
