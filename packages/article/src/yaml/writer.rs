//! YAML summary writer for parsed articles.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::model::{Article, Author, Table};

/// Regex matching a single-quoted YAML scalar value on a key line.
/// Captures: (1) prefix including key and colon-space, (2) the unquoted value.
#[allow(clippy::expect_used)]
static QUOTED_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:- )?[a-zA-Z_$][a-zA-Z_$0-9]*: )'([^']*)'$").expect("valid regex")
});

/// File stem used when an article has no identifier and no title.
const FALLBACK_FILE_STEM: &str = "article";

/// Author representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlAuthor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    affiliations: Vec<String>,
}

impl From<&Author> for YamlAuthor {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.to_string(),
            email: author.email.clone(),
            affiliations: author
                .affiliations
                .iter()
                .map(|aff| aff.institution.join(", "))
                .filter(|text| !text.is_empty())
                .collect(),
        }
    }
}

/// Top-level section outline for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlSection {
    title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    subsections: Vec<String>,
}

/// One grid row for YAML serialization.
///
/// Wrapping the cells in a mapping keeps every row a sequence of scalars
/// under a key, which `indent_yaml_sequences` handles.
#[derive(Debug, Serialize)]
struct YamlRow {
    cells: Vec<String>,
}

/// Table representation for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlTable {
    title: String,
    rows: Vec<YamlRow>,
}

impl From<&Table> for YamlTable {
    fn from(table: &Table) -> Self {
        Self {
            title: table.title.clone(),
            rows: table
                .rows
                .iter()
                .map(|row| YamlRow { cells: row.clone() })
                .collect(),
        }
    }
}

/// Full article summary for YAML serialization.
#[derive(Debug, Serialize)]
struct YamlArticle {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    article_type: Option<String>,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pmid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pmcid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    journal: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    authors: Vec<YamlAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    countries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sections: Vec<YamlSection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tables: Vec<YamlTable>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    figures: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Build the serializable summary of an article.
fn generate_yaml_struct(article: &Article) -> YamlArticle {
    let meta = &article.front.article_meta;
    let journal = &article.front.journal_meta;

    let sections = article
        .get_body_structure(false)
        .unwrap_or_default()
        .into_iter()
        .map(|outline| YamlSection {
            title: outline.title.to_string(),
            subsections: outline.subsections.into_iter().map(str::to_string).collect(),
        })
        .collect();

    YamlArticle {
        article_type: article.article_type.clone(),
        title: meta.title.clone(),
        pmid: meta.pmid.clone(),
        pmcid: meta.pmcid.clone(),
        doi: meta.doi.clone(),
        journal: journal.title.clone().or_else(|| journal.jid.clone()),
        authors: meta.authors.iter().map(YamlAuthor::from).collect(),
        countries: article.get_countries(),
        sections,
        tables: article.get_tables().into_iter().map(YamlTable::from).collect(),
        figures: article
            .get_figures()
            .into_iter()
            .map(|figure| figure.title.clone())
            .collect(),
        warnings: article.warnings().iter().map(ToString::to_string).collect(),
    }
}

/// Indent YAML sequences to comply with `indent-sequences: true`.
///
/// The serializer places sequence items (`- `) at the same indent as their
/// parent key. This adds 2 spaces so items are indented under their parent:
///
/// ```yaml
/// # Before:          # After:
/// authors:           authors:
/// - name: Jane Doe     - name: Jane Doe
///   email: j@x.org       email: j@x.org
/// ```
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut result: Vec<String> = Vec::new();
    // Stack of indent levels where sequences start
    let mut seq_indents: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            result.push(line.to_string());
            continue;
        }

        let indent = line.len() - trimmed.len();

        // Pop sequences we've left: a shallower indent, or the same indent
        // without a new item.
        while let Some(&seq_indent) = seq_indents.last() {
            if indent < seq_indent || (indent == seq_indent && !trimmed.starts_with("- ")) {
                seq_indents.pop();
            } else {
                break;
            }
        }

        if trimmed.starts_with("- ") {
            let is_continuation = seq_indents.last().is_some_and(|&si| si == indent);
            if !is_continuation {
                seq_indents.push(indent);
            }
        }

        let extra = seq_indents.len() * 2;
        if extra > 0 {
            result.push(format!("{}{}", " ".repeat(indent + extra), trimmed));
        } else {
            result.push(line.to_string());
        }
    }

    result.join("\n")
}

/// Check if a plain YAML scalar would be parsed as a non-string type.
///
/// Returns `true` if the value needs single quotes to remain a string
/// (integers, floats, dates, booleans, null, or values with special characters).
fn needs_yaml_quoting(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    match value.to_lowercase().as_str() {
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~" => return true,
        _ => {}
    }

    if let Some(&first) = value.as_bytes().first() {
        if b"{}[],&*#?|-<>=!%@:\"`' ".contains(&first) {
            return true;
        }
    }

    if value.contains(": ") || value.contains(" #") || value.ends_with(':') {
        return true;
    }

    let num_part = value.strip_prefix('-').unwrap_or(value);

    if !num_part.is_empty() && num_part.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }

    // digits.digits
    if let Some((before, after)) = num_part.split_once('.') {
        if !before.is_empty()
            && !after.is_empty()
            && before.bytes().all(|b| b.is_ascii_digit())
            && after.bytes().all(|b| b.is_ascii_digit())
        {
            return true;
        }
    }

    // YYYY-MM-DD
    let date_parts: Vec<&str> = value.split('-').collect();
    if let [year, month, day] = date_parts.as_slice() {
        if year.len() == 4
            && month.len() == 2
            && day.len() == 2
            && date_parts
                .iter()
                .all(|p| p.bytes().all(|b| b.is_ascii_digit()))
        {
            return true;
        }
    }

    false
}

/// Strip redundant single quotes from YAML scalar values.
///
/// Removes quotes from values that YAML would parse as strings anyway,
/// matching yamllint's `quoted-strings: {required: only-when-needed}` rule.
fn strip_redundant_quotes(yaml: &str) -> String {
    yaml.lines()
        .map(|line| {
            let Some(caps) = QUOTED_VALUE_RE.captures(line) else {
                return line.to_string();
            };
            let (Some(prefix), Some(value)) = (caps.get(1), caps.get(2)) else {
                return line.to_string();
            };
            let value = value.as_str();
            if needs_yaml_quoting(value) {
                line.to_string()
            } else {
                format!("{}{value}", prefix.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate the YAML summary of an article.
///
/// # Errors
/// Returns `YamlSerialization` if serialization fails.
pub fn generate_yaml(article: &Article) -> Result<String> {
    let yaml_struct = generate_yaml_struct(article);
    let yaml_string = serde_yaml_ng::to_string(&yaml_struct)?;

    let yaml_string = strip_redundant_quotes(&yaml_string);
    let yaml_string = indent_yaml_sequences(&yaml_string);

    let lines: Vec<&str> = yaml_string.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Save the YAML summary of an article into `output_dir`.
///
/// The file is named after [`Metadata::to_slug`](crate::model::Metadata::to_slug).
/// An existing file is never replaced: when `{slug}.yaml` is taken the
/// first free `{slug}_2.yaml`, `{slug}_3.yaml`, ... is used instead.
/// Writes to a temp file, syncs it, then renames it into place so a crash
/// never leaves a partial file behind.
///
/// # Errors
/// Returns `Io` if the directory or file cannot be written and
/// `YamlSerialization` if serialization fails.
pub fn save_yaml(article: &Article, output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let slug = article.front.article_meta.to_slug();
    let stem = if slug.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        slug.as_str()
    };
    let output_file = unique_output_file(output_dir, stem);
    let temp_file = output_dir.join(format!(".{stem}.yaml.tmp"));

    let content = generate_yaml(article)?;

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_file, &output_file)?;
    tracing::debug!(path = %output_file.display(), "Saved article summary");

    Ok(output_file)
}

/// First `{stem}.yaml` or `{stem}_N.yaml` (N from 2) not present in `dir`.
fn unique_output_file(dir: &Path, stem: &str) -> PathBuf {
    let first = dir.join(format!("{stem}.yaml"));
    if !first.exists() {
        return first;
    }

    let mut n = 2usize;
    loop {
        let candidate = dir.join(format!("{stem}_{n}.yaml"));
        if !candidate.exists() {
            tracing::warn!(
                taken = %first.display(),
                path = %candidate.display(),
                "Output file already exists, writing to a new name"
            );
            return candidate;
        }
        n += 1;
    }
}
