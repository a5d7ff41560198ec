//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 家庭角色（关系标识）与克隆音色的匹配
//! - 讲述语言的解析
//! - 预设家庭角色

mod errors;
mod presets;
mod value_objects;

pub use errors::VoiceError;
pub use presets::{find_preset, PresetRelationship, PRESET_RELATIONSHIPS};
pub use value_objects::{
    resolve_language, sample_file_name, ExternalVoiceId, LanguageTag, NarrationLanguage,
    RelationshipKey, VoiceName, CUSTOM_RELATIONSHIP, PUNJABI_LANGUAGE_CODE,
};
