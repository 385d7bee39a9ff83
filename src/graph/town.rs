//! 城镇定义
//!
//! 城镇以名称作为唯一标识，邻接关系不在城镇上保存

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// 城镇名称（区分大小写，非空）
///
/// 直接作为映射键使用，可以用 `&str` 查询。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TownName(String);

impl TownName {
    /// 校验并创建城镇名称
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidTownName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TownName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TownName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TownName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TownName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for TownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 城镇
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Town {
    name: TownName,
}

impl Town {
    pub fn new(name: TownName) -> Self {
        Self { name }
    }

    /// 获取城镇名称
    pub fn name(&self) -> &TownName {
        &self.name
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_town_name_rejects_empty() {
        assert!(matches!(TownName::new(""), Err(Error::InvalidTownName(_))));
        assert_eq!(TownName::new("Rockville").unwrap().as_str(), "Rockville");
    }

    #[test]
    fn test_town_name_is_case_sensitive() {
        let a = TownName::new("Town").unwrap();
        let b = TownName::new("town").unwrap();
        assert_ne!(a, b);
        assert!(b < a || a < b);
    }

    #[test]
    fn test_town_name_borrowed_lookup() {
        let mut map = HashMap::new();
        map.insert(TownName::new("Bethesda").unwrap(), 1);
        assert_eq!(map.get("Bethesda"), Some(&1));
        assert_eq!(map.get("bethesda"), None);
    }
}
