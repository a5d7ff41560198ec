//! Voice Context - 预设家庭角色

/// 预设家庭角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetRelationship {
    /// 关系标识（小写）
    pub id: &'static str,
    /// 展示名称
    pub label: &'static str,
}

pub const PRESET_RELATIONSHIPS: [PresetRelationship; 6] = [
    PresetRelationship { id: "mummy", label: "Mummy" },
    PresetRelationship { id: "papa", label: "Papa" },
    PresetRelationship { id: "dadu", label: "Dadu" },
    PresetRelationship { id: "dadi", label: "Dadi" },
    PresetRelationship { id: "nanu", label: "Nanu" },
    PresetRelationship { id: "naani", label: "Naani" },
];

/// 按 id 查找预设角色（忽略大小写）
pub fn find_preset(id: &str) -> Option<PresetRelationship> {
    let id = id.trim().to_lowercase();
    PRESET_RELATIONSHIPS.iter().copied().find(|p| p.id == id)
}
