// ============================================================================
// EDITOR TEMPLATES - form text, formatting and parsing
// ============================================================================
//
// Forms are plain text: `Key: value` header lines, then a body section that
// starts at a `Description:` / `Comment:` marker line. Anything after
// "(options:" on a category line is a hint and ignored.

use crate::model::{Idea, IdeaDraft, IdeaPatch, TemplateDraft};
use crate::validate;

fn header_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim().strip_prefix(key).map(str::trim)
}

/// Header value with the trailing options hint cut off.
fn choice_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    header_value(line, key).map(|value| value.split("(options:").next().unwrap_or("").trim())
}

/// Splits form text into header lines and the body after `marker`.
fn split_body<'a>(input: &'a str, marker: &str) -> (Vec<&'a str>, String) {
    let mut headers = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in input.lines() {
        if in_body {
            body_lines.push(line);
        } else if line.trim() == marker {
            in_body = true;
        } else {
            headers.push(line);
        }
    }

    (headers, body_lines.join("\n").trim().to_string())
}

fn options_hint(categories: &[String]) -> String {
    if categories.is_empty() {
        "none yet, add some on the Categories page".to_string()
    } else {
        categories.join("|")
    }
}

// ----------------------------------------------------------------------------
// Ideas
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct IdeaForm {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
}

impl IdeaForm {
    pub fn into_draft(self) -> IdeaDraft {
        IdeaDraft {
            title: self.title,
            description: self.description,
            category: self.category,
            template_id: None,
        }
    }

    pub fn into_patch(self) -> IdeaPatch {
        IdeaPatch {
            title: Some(self.title),
            description: Some(self.description),
            category: Some(self.category),
            label: None,
        }
    }
}

pub fn new_idea_editor_template(categories: &[String]) -> String {
    format!(
        "Title: \nCategory: None (options: {})\n\nDescription:\n",
        options_hint(categories)
    )
}

pub fn format_idea_editor_content(idea: &Idea, categories: &[String]) -> String {
    format!(
        "Title: {}\nCategory: {} (options: {})\n\nDescription:\n{}",
        idea.title,
        idea.category.as_deref().unwrap_or("None"),
        options_hint(categories),
        idea.description
    )
}

pub fn parse_and_validate_idea(input: &str) -> Result<IdeaForm, String> {
    let (headers, description) = split_body(input, "Description:");

    let mut title: Option<String> = None;
    let mut category: Option<String> = None;
    for line in headers {
        if let Some(value) = header_value(line, "Title:") {
            title = Some(value.to_string());
        } else if let Some(value) = choice_value(line, "Category:") {
            category = validate::optional(value);
        }
    }

    let title = validate::required(title.as_deref().unwrap_or(""), "Title")?;
    Ok(IdeaForm {
        title,
        description,
        category,
    })
}

// ----------------------------------------------------------------------------
// Templates
// ----------------------------------------------------------------------------

pub fn new_template_editor_template(categories: &[String]) -> String {
    format!(
        "Name: \nDefault Category: None (options: {})\n\nDescription:\n## Goal\n- What problem does this solve?\n\n## Implementation\n- Key steps\n- Resources needed\n\n## Expected Outcomes\n- Success metrics",
        options_hint(categories)
    )
}

pub fn parse_and_validate_template(input: &str) -> Result<TemplateDraft, String> {
    let (headers, description) = split_body(input, "Description:");

    let mut name: Option<String> = None;
    let mut default_category: Option<String> = None;
    for line in headers {
        if let Some(value) = header_value(line, "Name:") {
            name = Some(value.to_string());
        } else if let Some(value) = choice_value(line, "Default Category:") {
            default_category = validate::optional(value);
        }
    }

    let name = validate::required(name.as_deref().unwrap_or(""), "Template name")?;
    Ok(TemplateDraft {
        name,
        description,
        default_category,
    })
}

// ----------------------------------------------------------------------------
// Comments, sharing, categories
// ----------------------------------------------------------------------------

pub fn new_comment_editor_template() -> String {
    "Author: (leave blank to post as Anonymous)\n\nComment:\n".to_string()
}

/// Returns `(author, content)`; the author may be blank.
pub fn parse_and_validate_comment(input: &str) -> Result<(String, String), String> {
    let (headers, content) = split_body(input, "Comment:");

    let mut author = String::new();
    for line in headers {
        if let Some(value) = header_value(line, "Author:") {
            author = value
                .split("(leave blank")
                .next()
                .unwrap_or("")
                .trim()
                .to_string();
        }
    }

    let content = validate::required(&content, "Comment")?;
    Ok((author, content))
}

/// Single value forms accept either `Key: value` or just the value.
pub fn parse_single_value(input: &str, key: &str) -> String {
    let first = input.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    header_value(first, key).unwrap_or(first.trim()).to_string()
}
