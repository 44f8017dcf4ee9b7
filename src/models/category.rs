use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Food,
    Transport,
    DailyGoods,
    Leisure,
    Medical,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "食費",
            Self::Transport => "交通費",
            Self::DailyGoods => "日用品",
            Self::Leisure => "娯楽",
            Self::Medical => "医療",
            Self::Other => "その他",
        }
    }

    /// Lossy parse for stored data: unknown names collapse into その他
    /// so an old blob never fails to load.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "食費" => Self::Food,
            "交通費" => Self::Transport,
            "日用品" => Self::DailyGoods,
            "娯楽" => Self::Leisure,
            "医療" => Self::Medical,
            _ => Self::Other,
        }
    }

    /// Strict lookup for user input; `None` means the name is not a
    /// known category.
    pub fn find(name: &str) -> Option<Category> {
        let trimmed = name.trim();
        Self::all().iter().copied().find(|c| c.as_str() == trimmed)
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::DailyGoods,
            Self::Leisure,
            Self::Medical,
            Self::Other,
        ]
    }

    /// Fixed display color for chart consumers.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#4CAF50",
            Self::Transport => "#9C27B0",
            Self::DailyGoods => "#FF9800",
            Self::Leisure => "#2196F3",
            Self::Medical => "#F44336",
            Self::Other => "#95A5A6",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Category::parse(&s))
    }
}
