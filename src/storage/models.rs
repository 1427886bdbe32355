/// Các hạng mục tác phẩm trong gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectCategory {
    UiUx,
    Branding,
    ArtDirection,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [Self::UiUx, Self::Branding, Self::ArtDirection];

    /// Display name, also the value stored in the `category` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UiUx => "UI/UX",
            Self::Branding => "品牌设计",
            Self::ArtDirection => "艺术指导",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Portfolio entry shown in the gallery grid.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub category: ProjectCategory,
    pub year: String,
    pub image_url: String,
}

/// Built-in demo dataset, used to seed a fresh store and as the fallback
/// when the store is unreadable.
pub fn default_projects() -> Vec<Project> {
    [
        ("nebula", "Nebula 金融", ProjectCategory::UiUx, "2023"),
        ("kinetic", "Kinetic 品牌", ProjectCategory::Branding, "2024"),
        ("zenith", "Zenith 建筑", ProjectCategory::ArtDirection, "2023"),
        ("flow", "Flow 心流", ProjectCategory::UiUx, "2024"),
        ("echo", "Echo 系统", ProjectCategory::Branding, "2022"),
        ("mono", "Mono 杂志", ProjectCategory::ArtDirection, "2023"),
    ]
    .into_iter()
    .map(|(seed, title, category, year)| Project {
        id: seed.to_string(),
        title: title.to_string(),
        category,
        year: year.to_string(),
        image_url: format!("https://picsum.photos/seed/{seed}/800/600"),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_column_value() {
        for category in ProjectCategory::ALL {
            assert_eq!(ProjectCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(ProjectCategory::parse("雕塑"), None);
    }

    #[test]
    fn demo_dataset_has_unique_ids() {
        let projects = default_projects();
        assert_eq!(projects.len(), 6);
        let mut ids: Vec<_> = projects.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }
}
