//! Command-line interface for inspecting JATS articles.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::corpus::parse_articles;
use crate::error::{ArticleError, Result};
use crate::model::{Article, Content};
use crate::xml::collapse_whitespace;
use crate::yaml::{save_yaml, wrap_text_default};

/// JATS Article - Parse scientific-article XML and query its content.
#[derive(Parser)]
#[command(name = "jats-article")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show metadata and the section outline of each article.
    Show {
        /// JATS XML file with one or more articles
        file: PathBuf,
    },

    /// Print the body text of each article.
    Text {
        /// JATS XML file with one or more articles
        file: PathBuf,

        /// Only include these top-level sections (repeatable)
        #[arg(short, long)]
        section: Vec<String>,

        /// Group the text by section instead of printing one block
        #[arg(short, long)]
        nested: bool,

        /// With --nested, join each top-level section into one block
        #[arg(short, long)]
        main_sections: bool,
    },

    /// Print every table of each article as aligned text.
    Tables {
        /// JATS XML file with one or more articles
        file: PathBuf,
    },

    /// Write a YAML summary per article.
    Yaml {
        /// JATS XML file with one or more articles
        file: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute a parsed command line.
///
/// # Errors
/// Returns `Io` or `XmlParse` when the input cannot be read, and
/// `CorpusFailures` when at least one article failed to parse.
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Show { file } => show_command(&file),
        Commands::Text {
            file,
            section,
            nested,
            main_sections,
        } => text_command(&file, &section, nested, main_sections),
        Commands::Tables { file } => tables_command(&file),
        Commands::Yaml { file, output } => yaml_command(&file, output.as_deref()),
    }
}

/// Parse `file` and call `f` for every article that parsed.
///
/// Failed articles are reported on stderr; the remaining articles are
/// still processed.
fn for_each_article(file: &Path, mut f: impl FnMut(&Article) -> Result<()>) -> Result<()> {
    let xml = fs::read_to_string(file)?;
    let results = parse_articles(&xml)?;
    let total = results.len();
    let mut failed = 0;

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(article) => f(&article)?,
            Err(err) => {
                failed += 1;
                eprintln!(
                    "{} article {} of {}: {err}",
                    style("Failed").red().bold(),
                    index + 1,
                    total
                );
            }
        }
    }

    if failed > 0 {
        return Err(ArticleError::CorpusFailures { failed, total });
    }
    Ok(())
}

fn section_filter(sections: &[String]) -> Vec<&str> {
    sections.iter().map(String::as_str).collect()
}

fn show_command(file: &Path) -> Result<()> {
    for_each_article(file, |article| {
        let meta = &article.front.article_meta;

        println!("{}", style(&meta.title).green().bold());
        println!("  Journal: {}", article.front.journal_meta);
        if let Some(article_type) = &article.article_type {
            println!("  Type: {article_type}");
        }
        for (label, id) in [("PMID", &meta.pmid), ("PMCID", &meta.pmcid), ("DOI", &meta.doi)] {
            if let Some(id) = id {
                println!("  {label}: {}", style(id).cyan());
            }
        }

        let authors: Vec<String> = article
            .get_authors()
            .iter()
            .map(|author| author.name.to_string())
            .collect();
        println!("  Authors: {}", authors.join(", "));

        let countries = article.get_countries();
        if !countries.is_empty() {
            println!("  Countries: {}", countries.join(", "));
        }

        match article.get_body_structure(false) {
            Some(structure) => {
                println!("  Sections:");
                for outline in structure {
                    println!("    {}", outline.title);
                    for subsection in outline.subsections {
                        println!("      {}", style(subsection).dim());
                    }
                }
            }
            None => println!("  {}", style("(no body)").dim()),
        }

        println!("  Tables: {}", article.get_tables().len());
        println!("  Figures: {}", article.get_figures().len());
        if !article.warnings().is_empty() {
            println!(
                "  Warnings: {}",
                style(article.warnings().len()).yellow().bold()
            );
        }
        println!();
        Ok(())
    })
}

fn text_command(file: &Path, sections: &[String], nested: bool, main_sections: bool) -> Result<()> {
    let filter = section_filter(sections);
    let filter = (!filter.is_empty()).then_some(filter.as_slice());

    for_each_article(file, |article| {
        println!("{}", style(article.get_title()).green().bold());
        println!();

        if nested {
            let Some(entries) = article.get_nested_text(main_sections, filter) else {
                println!("{}", style("(no body)").dim());
                return Ok(());
            };
            for (title, content) in entries {
                println!("{}", style(title).bold());
                print_content(&content, 1);
                println!();
            }
        } else {
            let Some(texts) = article.get_flat_text(filter) else {
                println!("{}", style("(no body)").dim());
                return Ok(());
            };
            println!("{}", wrap_text_default(&collapse_whitespace(&texts.join(" "))));
            println!();
        }
        Ok(())
    })
}

/// Print nested text content, indenting each level.
fn print_content(content: &[Content<'_>], depth: usize) {
    let indent = "  ".repeat(depth);
    for item in content {
        match item {
            Content::Text(text) => {
                let text = collapse_whitespace(text);
                if text.is_empty() {
                    continue;
                }
                for line in wrap_text_default(&text).lines() {
                    println!("{indent}{line}");
                }
            }
            Content::Nested(title, children) => {
                println!("{indent}{}", style(title).dim());
                print_content(children, depth + 1);
            }
            Content::Node(node) => println!("{indent}{node}"),
        }
    }
}

fn tables_command(file: &Path) -> Result<()> {
    for_each_article(file, |article| {
        let tables = article.get_tables();
        println!(
            "{} ({} tables)",
            style(article.get_title()).green().bold(),
            tables.len()
        );
        for table in tables {
            println!();
            println!("{} {}", style(&table.title).bold(), style(table).dim());
            println!("{}", table.tabulate());
        }
        println!();
        Ok(())
    })
}

fn yaml_command(file: &Path, output: Option<&Path>) -> Result<()> {
    let output_dir = output.unwrap_or(Path::new("."));

    let xml = fs::read_to_string(file)?;
    let results = parse_articles(&xml)?;
    let total = results.len();

    println!(
        "{} {} article(s) from {}",
        style("Converting").bold(),
        total,
        style(file.display()).cyan()
    );

    let pb = ProgressBar::new(total as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut failed = 0;
    let mut saved = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(article) => {
                pb.set_message(article.front.article_meta.to_slug());
                match save_yaml(&article, output_dir) {
                    Ok(path) => saved.push(path),
                    Err(e) => {
                        pb.finish_and_clear();
                        return Err(e);
                    }
                }
            }
            Err(err) => {
                failed += 1;
                pb.suspend(|| {
                    eprintln!(
                        "{} article {} of {}: {err}",
                        style("Failed").red().bold(),
                        index + 1,
                        total
                    );
                });
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    for path in &saved {
        println!("{} {}", style("Saved to:").green().bold(), path.display());
    }

    if failed > 0 {
        return Err(ArticleError::CorpusFailures { failed, total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CORPUS: &str = r#"<pmc-articleset>
      <article><front><article-meta><article-id pub-id-type="pmid">101</article-id><title-group><article-title>First</article-title></title-group></article-meta></front><body><p>Hello.</p></body></article>
      <article><front><article-meta><title-group><article-title>Broken</article-title></title-group></article-meta></front><body><marquee/></body></article>
    </pmc-articleset>"#;

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["jats-article", "show", "article.xml"]);
        let Commands::Show { file } = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(file, PathBuf::from("article.xml"));
    }

    #[test]
    fn test_cli_parse_text_with_sections() {
        let cli = Cli::parse_from([
            "jats-article",
            "text",
            "article.xml",
            "--section",
            "Methods",
            "-s",
            "Results",
            "--nested",
        ]);
        let Commands::Text {
            section,
            nested,
            main_sections,
            ..
        } = cli.command
        else {
            panic!("expected text command");
        };
        assert_eq!(section, vec!["Methods", "Results"]);
        assert!(nested);
        assert!(!main_sections);
    }

    #[test]
    fn test_cli_parse_yaml_with_output() {
        let cli = Cli::parse_from(["jats-article", "yaml", "a.xml", "--output", "out"]);
        let Commands::Yaml { output, .. } = cli.command else {
            panic!("expected yaml command");
        };
        assert_eq!(output, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_yaml_command_reports_failures_and_saves_the_rest() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("corpus.xml");
        fs::write(&input, CORPUS).unwrap();
        let output = dir.path().join("out");

        let cli = Cli::parse_from([
            "jats-article",
            "yaml",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        let err = execute(cli).unwrap_err();

        assert!(matches!(
            err,
            ArticleError::CorpusFailures {
                failed: 1,
                total: 2
            }
        ));
        assert!(output.join("101.yaml").exists());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let cli = Cli::parse_from(["jats-article", "show", "/nonexistent/article.xml"]);
        assert!(matches!(execute(cli), Err(ArticleError::Io(_))));
    }
}
