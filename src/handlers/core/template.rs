//! Message templates.
//!
//! A template is plain text with `{name}` fields filled from a match's named
//! captures. `{{` and `}}` stand for literal braces. Text taken from chat must
//! pass through [`escape`] before it is embedded in a template.

use crate::error::TemplateError;
use std::collections::HashMap;

/// Escape braces so arbitrary text renders literally.
pub fn escape(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}

/// Fill `{name}` fields of `template` from `params`.
pub fn render(template: &str, params: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => return Err(TemplateError::UnbalancedBrace(pos)),
                        Some((_, c)) => name.push(c),
                    }
                }
                let value = params
                    .get(&name)
                    .ok_or_else(|| TemplateError::UnknownField(name.clone()))?;
                out.push_str(value);
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(TemplateError::UnbalancedBrace(pos));
                }
                out.push('}');
            }
            c => out.push(c),
        }
    }

    Ok(out)
}
