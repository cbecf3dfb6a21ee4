//! Inline bracket-tag multilingual payload codec.
//!
//! Multilingual subsystems in the target ecosystem store every language of a
//! value inside the value itself, separated by tags:
//!
//! ```text
//! [:en]Hello world[:ru]Привет мир[:be]Прывітанне свет[:]
//! ```
//!
//! Each segment opens with `[:xx]` and the whole payload closes with the
//! empty tag `[:]`. A payload that does not open with a language tag is a
//! single untagged value with no per-language segments.
//!
//! [`TagCodec`] implements [`Translator`] over this format: extraction
//! returns the active language's segment, and merging replaces *only* the
//! active segment. Every other segment is carried over byte-for-byte, even
//! for languages this installation no longer configures.

use polyfield_core::{Payload, Translator};

/// One `[:lang]text` run inside a tagged payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
	pub language: &'a str,
	pub text: &'a str,
}

/// A payload split into its language segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segments<'a> {
	/// No leading language tag; the whole payload is one unlocalized value.
	Untagged(&'a str),
	/// Ordered `[:lang]text` segments, terminator excluded.
	Tagged(Vec<Segment<'a>>),
}

/// Splits a payload into its language segments.
///
/// Splitting is lossless for well-formed payloads: [`compose`] over the
/// returned segments reproduces every segment byte-for-byte. Tag-shaped text
/// with an implausible language code (spaces, brackets, overlong) is treated
/// as literal segment content, not as a tag.
pub fn split(payload: &str) -> Segments<'_> {
	let (mut lang, mut content_start) = match next_tag(payload, 0) {
		Some((0, content_start, lang)) => (lang, content_start),
		_ => return Segments::Untagged(payload),
	};

	let mut segments = Vec::new();
	loop {
		if lang.is_empty() {
			// Terminator tag.
			break;
		}
		match next_tag(payload, content_start) {
			Some((tag_start, next_content, next_lang)) => {
				segments.push(Segment {
					language: lang,
					text: &payload[content_start..tag_start],
				});
				lang = next_lang;
				content_start = next_content;
			}
			None => {
				// Unterminated payload: the last segment runs to the end.
				segments.push(Segment {
					language: lang,
					text: &payload[content_start..],
				});
				break;
			}
		}
	}
	Segments::Tagged(segments)
}

/// Composes `(language, text)` pairs back into a tagged payload, terminator
/// included.
pub fn compose<'a, I>(segments: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut out = String::new();
	for (language, text) in segments {
		out.push_str("[:");
		out.push_str(language);
		out.push(']');
		out.push_str(text);
	}
	out.push_str("[:]");
	out
}

/// Finds the next tag at or after `from`.
///
/// Returns `(tag_start, content_start, language)`; the terminator reports an
/// empty language.
fn next_tag(payload: &str, from: usize) -> Option<(usize, usize, &str)> {
	let mut search = from;
	while let Some(rel) = payload[search..].find("[:") {
		let tag_start = search + rel;
		let code_start = tag_start + 2;
		let code_len = payload[code_start..].find(']')?;
		let code = &payload[code_start..code_start + code_len];
		if is_language_code(code) {
			return Some((tag_start, code_start + code_len + 1, code));
		}
		// Not a tag; scan past the "[:" that tripped us.
		search = code_start;
	}
	None
}

/// Empty is the terminator. Real codes look like `en`, `pt-br`, `zh_CN`.
fn is_language_code(code: &str) -> bool {
	code.len() <= 8 && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// [`Translator`] over the bracket-tag format, fixed to one active language.
///
/// The active language is the one the current request edits and displays;
/// every other segment is payload cargo to be preserved, never rewritten.
#[derive(Debug, Clone)]
pub struct TagCodec {
	active: Box<str>,
}

impl TagCodec {
	pub fn new(active: impl Into<Box<str>>) -> Self {
		Self {
			active: active.into(),
		}
	}

	pub fn active(&self) -> &str {
		&self.active
	}
}

impl Translator for TagCodec {
	fn extract_current_language(&self, payload: &Payload) -> String {
		match split(payload.as_str()) {
			Segments::Untagged(text) => text.to_owned(),
			Segments::Tagged(segments) => segments
				.iter()
				.find(|segment| segment.language == self.active.as_ref())
				.map(|segment| segment.text.to_owned())
				.unwrap_or_default(),
		}
	}

	fn merge_language_value(&self, old: Option<&Payload>, new_text: &str) -> Payload {
		let old = old.map(Payload::as_str).unwrap_or_default();
		let merged = match split(old) {
			// First-ever save, or a lone unlocalized value being edited:
			// there is no other-language segment to preserve.
			Segments::Untagged(_) => compose([(self.active.as_ref(), new_text)]),
			Segments::Tagged(segments) => {
				let mut out: Vec<(&str, &str)> = Vec::with_capacity(segments.len() + 1);
				let mut replaced = false;
				for segment in &segments {
					if segment.language == self.active.as_ref() {
						out.push((segment.language, new_text));
						replaced = true;
					} else {
						out.push((segment.language, segment.text));
					}
				}
				if !replaced {
					out.push((self.active.as_ref(), new_text));
				}
				compose(out)
			}
		};
		Payload::new(merged)
	}
}
