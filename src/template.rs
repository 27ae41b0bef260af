use crate::{
    config::Config,
    error::{Error, Result},
    index::{tag_slug, IndexStats, ProblemIndex},
    problem::{self, Problem},
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tera::{Context, Tera, Value};

/// A link to a tag page, as seen from the document being rendered.
#[derive(Serialize)]
struct TagRef {
    name: String,
    link: String,
}

/// One problem line on a tag page.
#[derive(Serialize)]
struct TagPageRow<'a> {
    id: &'a str,
    title: &'a str,
    difficulty: &'a str,
    link: String,
}

/// One problem row in the dashboard table.
#[derive(Serialize)]
struct DashboardRow<'a> {
    id: &'a str,
    title: &'a str,
    difficulty: &'a str,
    link: String,
    tags: Vec<TagRef>,
}

/// Renders tag pages and the dashboard from embedded templates.
pub(crate) struct TemplateEngine {
    tera: Tera,
    title: String,
    root: PathBuf,
    tags_path: PathBuf,
    dashboard_dir: PathBuf,
}

impl TemplateEngine {
    /// Creates a new template engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if template registration fails.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("tag", include_str!("../templates/tag.tera"))
            .map_err(|e| Error::template("tag", e))?;
        tera.add_raw_template("dashboard", include_str!("../templates/dashboard.tera"))
            .map_err(|e| Error::template("dashboard", e))?;

        tera.register_filter("difficulty_icon", Self::difficulty_icon_filter);

        Ok(Self {
            tera,
            title: config.title.clone(),
            root: config.root.clone(),
            tags_path: config.tags_path(),
            dashboard_dir: config.dashboard_dir(),
        })
    }

    /// Difficulty icon filter implementation.
    fn difficulty_icon_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
        if let Some(s) = value.as_str() {
            Ok(Value::String(problem::difficulty_icon(s).to_string()))
        } else {
            Ok(value.clone())
        }
    }

    /// Renders the page for a single tag.
    ///
    /// Problems are expected pre-sorted ascending by numeric id.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub(crate) fn render_tag_page(&self, tag: &str, problems: &[&Problem]) -> Result<String> {
        let rows: Vec<TagPageRow<'_>> = problems
            .iter()
            .map(|p| TagPageRow {
                id: &p.id,
                title: &p.title,
                difficulty: &p.difficulty,
                link: self.problem_link(p, &self.tags_path),
            })
            .collect();

        let mut context = Context::new();
        context.insert("tag", tag);
        context.insert("problems", &rows);

        self.tera
            .render("tag", &context)
            .map_err(|e| Error::template("tag", e))
    }

    /// Renders the dashboard document.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub(crate) fn render_dashboard(&self, index: &ProblemIndex) -> Result<String> {
        let stats: IndexStats = index.stats();

        let tags: Vec<TagRef> = index
            .tag_names()
            .map(|name| self.tag_ref(name, &self.dashboard_dir))
            .collect();

        let problems: Vec<DashboardRow<'_>> = index
            .sorted_problems()
            .into_iter()
            .map(|p| DashboardRow {
                id: &p.id,
                title: &p.title,
                difficulty: &p.difficulty,
                link: self.problem_link(p, &self.dashboard_dir),
                tags: p
                    .tags
                    .iter()
                    .map(|t| self.tag_ref(t, &self.dashboard_dir))
                    .collect(),
            })
            .collect();

        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("stats", &stats);
        context.insert("tags", &tags);
        context.insert("problems", &problems);

        self.tera
            .render("dashboard", &context)
            .map_err(|e| Error::template("dashboard", e))
    }

    /// Returns the link from `from` to a problem's directory.
    fn problem_link(&self, problem: &Problem, from: &Path) -> String {
        rel_link(&self.root.join(&problem.relative_path), from)
    }

    /// Returns a named link from `from` to a tag's page.
    fn tag_ref(&self, tag: &str, from: &Path) -> TagRef {
        let target = self.tags_path.join(format!("{}.md", tag_slug(tag)));
        TagRef {
            name: tag.to_string(),
            link: rel_link(&target, from),
        }
    }
}

/// Computes the relative path from one directory to a target, forward-slash
/// normalized for markdown links.
fn rel_link(target: &Path, from: &Path) -> String {
    pathdiff::diff_paths(target, from)
        .unwrap_or_else(|| target.to_path_buf())
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config() -> (assert_fs::TempDir, Config) {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").create_dir_all().unwrap();
        let config = Config::builder().root(temp.path()).build().unwrap();
        (temp, config)
    }

    fn two_sum() -> Problem {
        Problem::new(
            "1".to_string(),
            1,
            "Two Sum".to_string(),
            "Easy".to_string(),
            "problems/two-sum".to_string(),
            vec!["array".to_string(), "hash-table".to_string()],
        )
    }

    #[test]
    fn test_render_tag_page() {
        let (_temp, config) = create_test_config();
        let engine = TemplateEngine::new(&config).unwrap();

        let problem = two_sum();
        let rendered = engine.render_tag_page("array", &[&problem]).unwrap();

        assert_eq!(
            rendered,
            "# 🚩 Tag: array\n\n- [1. Two Sum](../problems/two-sum) <kbd>Easy</kbd>\n"
        );
    }

    #[test]
    fn test_render_tag_page_one_line_per_problem() {
        let (_temp, config) = create_test_config();
        let engine = TemplateEngine::new(&config).unwrap();

        let first = two_sum();
        let second = Problem::new(
            "15".to_string(),
            15,
            "3Sum".to_string(),
            "Medium".to_string(),
            "problems/three-sum".to_string(),
            vec!["array".to_string()],
        );

        let rendered = engine.render_tag_page("array", &[&first, &second]).unwrap();

        assert_eq!(
            rendered,
            "# 🚩 Tag: array\n\n\
             - [1. Two Sum](../problems/two-sum) <kbd>Easy</kbd>\n\
             - [15. 3Sum](../problems/three-sum) <kbd>Medium</kbd>\n"
        );
    }

    #[test]
    fn test_render_dashboard_sections() {
        let (_temp, config) = create_test_config();
        let engine = TemplateEngine::new(&config).unwrap();

        let index = ProblemIndex::from_problems(vec![two_sum()]);
        let rendered = engine.render_dashboard(&index).unwrap();

        assert!(rendered.starts_with("# 🚀 Problem Index\n"));
        assert!(rendered.contains("| Total | 🟢 Easy | 🟡 Medium | 🔴 Hard |\n"));
        assert!(rendered.contains("| 1 | 1 | 0 | 0 |\n"));
        assert!(rendered.contains("[`array`](tags/array.md) [`hash-table`](tags/hash-table.md) \n"));
        assert!(rendered.contains(
            "| 1 | [Two Sum](problems/two-sum) | 🟢 Easy | [array](tags/array.md), [hash-table](tags/hash-table.md) |\n"
        ));
    }

    #[test]
    fn test_dashboard_rows_sorted_numerically() {
        let (_temp, config) = create_test_config();
        let engine = TemplateEngine::new(&config).unwrap();

        let p10 = Problem::new(
            "10".to_string(),
            10,
            "Ten".to_string(),
            "Hard".to_string(),
            "problems/ten".to_string(),
            vec![],
        );
        let p2 = Problem::new(
            "2".to_string(),
            2,
            "Two".to_string(),
            "Easy".to_string(),
            "problems/two".to_string(),
            vec![],
        );

        let index = ProblemIndex::from_problems(vec![p10, p2]);
        let rendered = engine.render_dashboard(&index).unwrap();

        let row_two = rendered.find("| 2 | [Two]").unwrap();
        let row_ten = rendered.find("| 10 | [Ten]").unwrap();
        assert!(row_two < row_ten);
    }

    #[test]
    fn test_dashboard_custom_title() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("problems").create_dir_all().unwrap();
        let config = Config::builder()
            .root(temp.path())
            .title("My Puzzles")
            .build()
            .unwrap();

        let engine = TemplateEngine::new(&config).unwrap();
        let rendered = engine.render_dashboard(&ProblemIndex::new()).unwrap();

        assert!(rendered.starts_with("# My Puzzles\n"));
    }

    #[test]
    fn test_unknown_difficulty_gets_white_icon() {
        let (_temp, config) = create_test_config();
        let engine = TemplateEngine::new(&config).unwrap();

        let problem = Problem::new(
            "3".to_string(),
            3,
            "Mystery".to_string(),
            "Legendary".to_string(),
            "problems/mystery".to_string(),
            vec![],
        );

        let index = ProblemIndex::from_problems(vec![problem]);
        let rendered = engine.render_dashboard(&index).unwrap();

        assert!(rendered.contains("| ⚪ Legendary |"));
    }

    #[test]
    fn test_tag_links_use_slug() {
        let (_temp, config) = create_test_config();
        let engine = TemplateEngine::new(&config).unwrap();

        let problem = Problem::new(
            "4".to_string(),
            4,
            "Split".to_string(),
            "Easy".to_string(),
            "problems/split".to_string(),
            vec!["divide/conquer".to_string()],
        );

        let index = ProblemIndex::from_problems(vec![problem]);
        let rendered = engine.render_dashboard(&index).unwrap();

        assert!(rendered.contains("[`divide/conquer`](tags/divide-conquer.md)"));
        assert!(rendered.contains("[divide/conquer](tags/divide-conquer.md)"));
    }

    #[test]
    fn test_difficulty_icon_filter() {
        let value = Value::String("hard".to_string());
        let result = TemplateEngine::difficulty_icon_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(result.as_str().unwrap(), "🔴");

        let non_string = Value::Number(1.into());
        let result = TemplateEngine::difficulty_icon_filter(&non_string, &HashMap::new()).unwrap();
        assert_eq!(result, non_string);
    }
}
