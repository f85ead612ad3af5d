/// 学科大类（决定推荐主题时的提示方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectFamily {
    /// 自然科学（理、化、生）
    NaturalScience,
    /// 社会科学（史、地、公民）
    SocialStudies,
    /// 语文
    Literature,
    /// 其他（数学、英语、信息）
    Other,
}

/// 科目枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Subject {
    /// 数学
    Math,
    /// 物理
    Physics,
    /// 化学
    Chemistry,
    /// 生物
    Biology,
    /// 语文
    Literature,
    /// 历史
    History,
    /// 地理
    Geography,
    /// 公民教育
    Civics,
    /// 英语
    English,
    /// 信息技术
    Informatics,
}

impl Subject {
    /// 下拉框中的全部科目（固定 10 个）
    pub const ALL: [Subject; 10] = [
        Subject::Math,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::Literature,
        Subject::History,
        Subject::Geography,
        Subject::Civics,
        Subject::English,
        Subject::Informatics,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::Math => "Toán",
            Subject::Physics => "Vật lí",
            Subject::Chemistry => "Hóa học",
            Subject::Biology => "Sinh học",
            Subject::Literature => "Ngữ văn",
            Subject::History => "Lịch sử",
            Subject::Geography => "Địa lí",
            Subject::Civics => "GDCD",
            Subject::English => "Tiếng Anh",
            Subject::Informatics => "Tin học",
        }
    }

    /// 学科大类
    pub fn family(self) -> SubjectFamily {
        match self {
            Subject::Physics | Subject::Chemistry | Subject::Biology => {
                SubjectFamily::NaturalScience
            }
            Subject::History | Subject::Geography | Subject::Civics => {
                SubjectFamily::SocialStudies
            }
            Subject::Literature => SubjectFamily::Literature,
            Subject::Math | Subject::English | Subject::Informatics => SubjectFamily::Other,
        }
    }

    /// 尝试从字符串解析科目（精确匹配）
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.name() == s.trim())
    }

    /// 智能查找科目（忽略大小写，兼容常见写法）
    pub fn find(s: &str) -> Option<Self> {
        // 先尝试精确匹配
        if let Some(subject) = Self::from_name(s) {
            return Some(subject);
        }

        let s_lower = s.trim().to_lowercase();
        if let Some(subject) = Self::ALL
            .into_iter()
            .find(|subject| subject.name().to_lowercase() == s_lower)
        {
            return Some(subject);
        }

        // 常见别名
        match s_lower.as_str() {
            "vật lý" | "lý" | "lí" => Some(Subject::Physics),
            "hóa" | "hoá học" | "hoá" => Some(Subject::Chemistry),
            "sinh" => Some(Subject::Biology),
            "văn" => Some(Subject::Literature),
            "sử" => Some(Subject::History),
            "địa lý" | "địa" => Some(Subject::Geography),
            "giáo dục công dân" => Some(Subject::Civics),
            "anh" => Some(Subject::English),
            "tin" => Some(Subject::Informatics),
            _ => None,
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_exact_and_alias() {
        assert_eq!(Subject::find("Hóa học"), Some(Subject::Chemistry));
        assert_eq!(Subject::find("hoá học"), Some(Subject::Chemistry));
        assert_eq!(Subject::find("Vật lý"), Some(Subject::Physics));
        assert_eq!(Subject::find("gdcd"), Some(Subject::Civics));
        assert_eq!(Subject::find("Âm nhạc"), None);
    }

    #[test]
    fn test_family() {
        assert_eq!(Subject::Biology.family(), SubjectFamily::NaturalScience);
        assert_eq!(Subject::Geography.family(), SubjectFamily::SocialStudies);
        assert_eq!(Subject::Literature.family(), SubjectFamily::Literature);
        assert_eq!(Subject::Math.family(), SubjectFamily::Other);
    }
}
