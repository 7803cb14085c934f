//! Email template rendering with Handlebars
//!
//! Templates are compiled into the binary and can be overridden from a
//! template directory. Supports:
//! - YAML frontmatter for metadata (subject, layout)
//! - Layout templates for consistent email structure
//! - Separate HTML and plain text variants (`<name>.html.hbs`, `<name>.txt.hbs`)

use crate::prelude::*;
use handlebars::Handlebars;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::PathBuf;

/// Metadata extracted from template frontmatter
#[derive(Debug, Default, Deserialize)]
pub struct TemplateMetadata {
	/// Layout template name (e.g., "default" -> layouts/default.html.hbs)
	#[serde(default)]
	pub layout: Option<String>,
	/// Email subject line
	#[serde(default)]
	pub subject: Option<String>,
}

/// Result of template rendering
#[derive(Debug)]
pub struct RenderResult {
	/// Subject extracted from template frontmatter
	pub subject: Option<String>,
	/// Rendered HTML body
	pub html_body: String,
	/// Rendered plain text body
	pub text_body: String,
}

/// Parameters for rendering a layout template
struct LayoutRenderParams<'a> {
	layout_name: &'a str,
	extension: &'a str,
	body: &'a str,
	title: Option<&'a str>,
	vars: &'a serde_json::Value,
}

fn builtin_template(path: &str) -> Option<&'static str> {
	match path {
		"welcome.html.hbs" => Some(include_str!("../templates/welcome.html.hbs")),
		"welcome.txt.hbs" => Some(include_str!("../templates/welcome.txt.hbs")),
		"layouts/default.html.hbs" => Some(include_str!("../templates/layouts/default.html.hbs")),
		"layouts/default.txt.hbs" => Some(include_str!("../templates/layouts/default.txt.hbs")),
		_ => None,
	}
}

/// Template engine for email rendering
pub struct TemplateEngine {
	html: Handlebars<'static>,
	text: Handlebars<'static>,
	template_dir: Option<PathBuf>,
}

impl TemplateEngine {
	/// Create new template engine, optionally reading templates from `template_dir` first
	pub fn new(template_dir: Option<PathBuf>) -> Self {
		let mut html = Handlebars::new();
		// Enable strict mode to catch undefined variables
		html.set_strict_mode(true);

		let mut text = Handlebars::new();
		text.set_strict_mode(true);
		text.register_escape_fn(handlebars::no_escape);

		Self { html, text, template_dir }
	}

	/// Parse YAML frontmatter from template content
	///
	/// Frontmatter is delimited by `---` at the start of the file:
	/// ```text
	/// ---
	/// layout: default
	/// subject: Email Subject
	/// ---
	/// Template content here...
	/// ```
	///
	/// Returns (metadata, content_without_frontmatter)
	fn parse_frontmatter(content: &str) -> (TemplateMetadata, &str) {
		let content = content.trim_start();

		let Some(after_first) = content.strip_prefix("---") else {
			return (TemplateMetadata::default(), content);
		};

		let Some(end_pos) = after_first.find("\n---") else {
			// No closing delimiter found
			return (TemplateMetadata::default(), content);
		};
		let yaml_content = &after_first[..end_pos];
		let template_content = &after_first[end_pos + 4..]; // Skip "\n---"

		match serde_yaml::from_str(yaml_content) {
			Ok(metadata) => (metadata, template_content.trim_start_matches(['\r', '\n'])),
			Err(e) => {
				warn!("Failed to parse frontmatter YAML: {}", e);
				(TemplateMetadata::default(), content)
			}
		}
	}

	/// Load a template, preferring the template directory over the built-in copy
	fn load_template(&self, path: &str) -> ClResult<Cow<'static, str>> {
		if let Some(dir) = &self.template_dir {
			let file = dir.join(path);
			if let Ok(content) = std::fs::read_to_string(&file) {
				debug!("Loaded template override: {}", file.display());
				return Ok(Cow::Owned(content));
			}
		}

		builtin_template(path)
			.map(Cow::Borrowed)
			.ok_or_else(|| Error::ConfigError(format!("Template not found: {}", path)))
	}

	fn engine(&self, extension: &str) -> &Handlebars<'static> {
		if extension.starts_with("txt") { &self.text } else { &self.html }
	}

	/// Load and render a layout template with the given body content
	fn render_layout(&self, params: &LayoutRenderParams<'_>) -> ClResult<String> {
		let layout_content =
			self.load_template(&format!("layouts/{}.{}", params.layout_name, params.extension))?;

		// Merge layout variables with provided vars
		let mut layout_vars = params.vars.clone();
		if let serde_json::Value::Object(ref mut map) = layout_vars {
			map.insert("body".to_string(), serde_json::Value::String(params.body.to_string()));
			if let Some(title) = params.title {
				map.insert("title".to_string(), serde_json::Value::String(title.to_string()));
			}
		}

		self.engine(params.extension).render_template(&layout_content, &layout_vars).map_err(
			|e| {
				Error::ValidationError(format!(
					"Failed to render layout '{}': {}",
					params.layout_name, e
				))
			},
		)
	}

	/// Render one variant (`html.hbs` or `txt.hbs`) of a template, applying its layout
	fn render_variant(
		&self,
		template_name: &str,
		extension: &str,
		vars: &serde_json::Value,
		fallback_layout: Option<&str>,
		title: Option<&str>,
	) -> ClResult<(TemplateMetadata, String)> {
		let path = format!("{}.{}", template_name, extension);
		let content = self.load_template(&path)?;
		let (metadata, template) = Self::parse_frontmatter(&content);

		let rendered = self.engine(extension).render_template(template, vars).map_err(|e| {
			Error::ValidationError(format!("Failed to render template '{}': {}", path, e))
		})?;

		let body = match metadata.layout.as_deref().or(fallback_layout) {
			Some(layout) => self.render_layout(&LayoutRenderParams {
				layout_name: layout,
				extension,
				body: &rendered,
				title,
				vars,
			})?,
			None => rendered,
		};
		Ok((metadata, body))
	}

	/// Render email template with variables
	///
	/// Returns RenderResult containing subject (if defined in the HTML
	/// frontmatter), HTML body, and plain text body. The text variant uses
	/// its own layout, falling back to the HTML one.
	pub fn render(&self, template_name: &str, vars: &serde_json::Value) -> ClResult<RenderResult> {
		// Subject first, so the layouts can use it as title
		let html_path = format!("{}.html.hbs", template_name);
		let html_content = self.load_template(&html_path)?;
		let (html_metadata, _) = Self::parse_frontmatter(&html_content);

		let subject = match html_metadata.subject.as_deref() {
			Some(subj) => Some(self.text.render_template(subj, vars).map_err(|e| {
				Error::ValidationError(format!("Failed to render email subject: {}", e))
			})?),
			None => None,
		};

		let (_, html_body) =
			self.render_variant(template_name, "html.hbs", vars, None, subject.as_deref())?;
		let (_, text_body) = self.render_variant(
			template_name,
			"txt.hbs",
			vars,
			html_metadata.layout.as_deref(),
			subject.as_deref(),
		)?;

		Ok(RenderResult { subject, html_body, text_body })
	}
}


// vim: ts=4
