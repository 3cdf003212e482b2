//! `folio render` command implementation.

use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use folio_config::SiteConfig;
use folio_content::escape_html;
use folio_pages::{DocLayout, DocumentationPage, PageRegistry};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::site::load_registry;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page id, slug or permalink to render.
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    page: Option<String>,

    /// Render every page into the output directory.
    #[arg(long, requires = "out")]
    all: bool,

    /// Output file (or directory with --all). Default: stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    site: SiteArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the page is unknown, or it
    /// cannot be loaded, rendered or written.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config()?;
        let registry = load_registry(&config)?;
        let layout = DocLayout::new();
        let site = &config.site;

        if self.all {
            let out_dir = self
                .out
                .ok_or_else(|| CliError::Validation("--all requires --out DIR".to_owned()))?;
            let pages = registry.resolve_all().await?;
            for page in &pages {
                let html = html_document(page, site, &folio_pages::render(page, &layout)?);
                let path = page_output_path(&out_dir, page.id.as_str());
                write_file(&path, &html)?;
            }
            output.success(&format!(
                "Rendered {} pages to {}",
                pages.len(),
                out_dir.display()
            ));
            return Ok(());
        }

        let target = self
            .page
            .ok_or_else(|| CliError::Validation("Page id or path is required".to_owned()))?;
        let page = resolve_target(&registry, &target).await?;
        let html = html_document(&page, site, &folio_pages::render(&page, &layout)?);

        match self.out {
            Some(path) => {
                write_file(&path, &html)?;
                output.success(&format!("Rendered {} to {}", page.id, path.display()));
            }
            None => output.data(&html)?,
        }

        Ok(())
    }
}

/// Look a page up by id first, then by slug or permalink.
async fn resolve_target(
    registry: &PageRegistry,
    target: &str,
) -> Result<Arc<DocumentationPage>, CliError> {
    if registry.contains(target) {
        return Ok(registry.resolve(target).await?);
    }
    Ok(registry.resolve_route(target).await?)
}

/// Output file for a page id: `{out_dir}/{id}.html`.
fn page_output_path(out_dir: &Path, id: &str) -> PathBuf {
    out_dir.join(format!("{id}.html"))
}

fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "Wrote page");
    Ok(())
}

/// Wrap rendered page markup in a standalone HTML document.
fn html_document(page: &DocumentationPage, site: &SiteConfig, article: &str) -> String {
    let title = match site.title.as_deref() {
        Some(site) => format!("{} | {}", page.title, site),
        None => page.title.clone(),
    };

    let mut html = String::with_capacity(article.len() + 256);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(html, "<title>{}</title>", escape_html(&title)).unwrap();
    if let Some(description) = &page.description {
        writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        )
        .unwrap();
    }
    if let Some(canonical) = site.canonical_url(&page.permalink) {
        writeln!(
            html,
            "<link rel=\"canonical\" href=\"{}\">",
            escape_html(&canonical)
        )
        .unwrap();
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(article);
    html.push_str("\n</body>\n</html>");
    html
}

#[cfg(test)]
mod tests {
    use folio_content::MarkdownParser;
    use folio_pages::{PageBuilder, PageSettings};

    use super::*;

    fn page() -> DocumentationPage {
        PageBuilder::new(
            "intro",
            MarkdownParser::new().parse("# Getting Started\n\nAxis & friends."),
        )
        .build(&PageSettings::default())
    }

    #[test]
    fn test_page_output_path() {
        let out = Path::new("/site");
        assert_eq!(page_output_path(out, "intro"), PathBuf::from("/site/intro.html"));
        assert_eq!(
            page_output_path(out, "guides/providers"),
            PathBuf::from("/site/guides/providers.html")
        );
    }

    #[test]
    fn test_html_document() {
        let site = SiteConfig {
            title: Some("Axis".to_owned()),
            ..SiteConfig::default()
        };
        let html = html_document(&page(), &site, "<article></article>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Getting Started | Axis</title>"));
        assert!(html.contains(r#"<meta name="description" content="Axis &amp; friends.">"#));
        assert!(!html.contains("canonical"));
        assert!(html.contains("<body>\n<article></article>\n</body>"));
    }

    #[test]
    fn test_html_document_canonical_link() {
        let site = SiteConfig {
            url: Some("https://sleitnick.github.io".to_owned()),
            ..SiteConfig::default()
        };
        let html = html_document(&page(), &site, "<article></article>");
        assert!(html.contains("<title>Getting Started</title>"));
        assert!(html.contains(
            r#"<link rel="canonical" href="https://sleitnick.github.io/docs/intro">"#
        ));
    }

    #[tokio::test]
    async fn test_resolve_target_by_id_and_route() {
        let mut registry = PageRegistry::new();
        registry.register_page(page()).unwrap();

        let by_id = resolve_target(&registry, "intro").await.unwrap();
        let by_route = resolve_target(&registry, "/docs/intro").await.unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_route));

        let err = resolve_target(&registry, "/docs/missing").await.unwrap_err();
        assert_eq!(err.to_string(), "No page at route: /docs/missing");
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guides/providers.html");
        write_file(&path, "<p>hi</p>").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }
}
