use rusqlite::{Result as SqlResult, params};
use std::path::Path;

use super::database::Database;
use super::models::{Project, ProjectCategory, default_projects};

/// Gallery store: one `projects` table, read once at startup and rewritten
/// on every mutation. A fresh or emptied-out store is seeded from the demo
/// dataset.
pub struct GalleryDatabase {
    db: Database,
}

impl GalleryDatabase {
    /// Open (or create) the store at the given path
    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        Self::build(Database::new(path)?)
    }

    pub fn in_memory() -> SqlResult<Self> {
        Self::build(Database::in_memory()?)
    }

    fn build(db: Database) -> SqlResult<Self> {
        let gallery = Self { db };
        gallery.init_schema()?;
        gallery.seed_if_empty()?;
        Ok(gallery)
    }

    fn init_schema(&self) -> SqlResult<()> {
        self.db.connection().execute(
            "CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                year TEXT NOT NULL,
                image_url TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;
        Ok(())
    }

    fn seed_if_empty(&self) -> SqlResult<()> {
        if self.count()? == 0 {
            for project in default_projects() {
                self.insert_project(&project)?;
            }
        }
        Ok(())
    }

    /// Insert or replace a project; `id` stays unique.
    pub fn insert_project(&self, project: &Project) -> SqlResult<()> {
        self.db.connection().execute(
            "INSERT OR REPLACE INTO projects (id, title, category, year, image_url)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                project.id,
                project.title,
                project.category.as_str(),
                project.year,
                project.image_url
            ],
        )?;
        Ok(())
    }

    pub fn remove_project(&self, id: &str) -> SqlResult<()> {
        self.db
            .connection()
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// All projects, newest additions first; rows inserted in the same
    /// second keep their insertion order.
    pub fn all_projects(&self) -> SqlResult<Vec<Project>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, title, category, year, image_url
             FROM projects
             ORDER BY created_at DESC, rowid ASC",
        )?;

        let projects = stmt
            .query_map([], |row| {
                let category: String = row.get(2)?;
                Ok(Project {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    category: ProjectCategory::parse(&category)
                        .unwrap_or(ProjectCategory::UiUx),
                    year: row.get(3)?,
                    image_url: row.get(4)?,
                })
            })?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(projects)
    }

    /// Drop everything and restore the demo dataset.
    pub fn reset_to_defaults(&self) -> SqlResult<Vec<Project>> {
        self.db.connection().execute("DELETE FROM projects", [])?;
        for project in default_projects() {
            self.insert_project(&project)?;
        }
        self.all_projects()
    }

    pub fn count(&self) -> SqlResult<usize> {
        let count: i64 =
            self.db
                .connection()
                .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_project(id: &str, title: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            category: ProjectCategory::UiUx,
            year: "2025".to_string(),
            image_url: "https://example.com/cover.png".to_string(),
        }
    }

    #[test]
    fn fresh_store_is_seeded_with_demo_dataset() {
        let gallery = GalleryDatabase::in_memory().unwrap();
        assert_eq!(gallery.count().unwrap(), 6);

        let titles: Vec<_> = gallery
            .all_projects()
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert!(titles.contains(&"Nebula 金融".to_string()));
    }

    #[test]
    fn insert_with_same_id_replaces_instead_of_duplicating() {
        let gallery = GalleryDatabase::in_memory().unwrap();
        gallery.insert_project(&sample_project("p1", "旧标题")).unwrap();
        gallery.insert_project(&sample_project("p1", "新标题")).unwrap();

        assert_eq!(gallery.count().unwrap(), 7);
        let projects = gallery.all_projects().unwrap();
        let p1 = projects.iter().find(|p| p.id == "p1").unwrap();
        assert_eq!(p1.title, "新标题");
    }

    #[test]
    fn remove_deletes_only_the_matching_project() {
        let gallery = GalleryDatabase::in_memory().unwrap();
        gallery.remove_project("nebula").unwrap();
        assert_eq!(gallery.count().unwrap(), 5);
        assert!(
            gallery
                .all_projects()
                .unwrap()
                .iter()
                .all(|p| p.id != "nebula")
        );
    }

    #[test]
    fn reset_restores_demo_dataset() {
        let gallery = GalleryDatabase::in_memory().unwrap();
        gallery.insert_project(&sample_project("p1", "临时")).unwrap();
        gallery.remove_project("mono").unwrap();

        let projects = gallery.reset_to_defaults().unwrap();
        assert_eq!(projects.len(), 6);
        assert!(projects.iter().any(|p| p.id == "mono"));
        assert!(projects.iter().all(|p| p.id != "p1"));
    }

    #[test]
    fn category_column_round_trips() {
        let gallery = GalleryDatabase::in_memory().unwrap();
        let branding = gallery
            .all_projects()
            .unwrap()
            .into_iter()
            .find(|p| p.id == "kinetic")
            .unwrap();
        assert_eq!(branding.category, ProjectCategory::Branding);
    }
}
