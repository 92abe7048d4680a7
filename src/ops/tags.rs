use super::validate::{ValidationError, validate_tag_name};

/// Tag changes parsed from a `+add -remove bare` edit line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagEdit {
    pub adds: Vec<String>,
    pub removes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagEditError {
    #[error("add tag '{tag}': {source}")]
    Add {
        tag: String,
        #[source]
        source: ValidationError,
    },
    #[error("remove tag '{tag}': {source}")]
    Remove {
        tag: String,
        #[source]
        source: ValidationError,
    },
}

impl TagEdit {
    pub fn is_empty(&self) -> bool {
        self.adds.is_empty() && self.removes.is_empty()
    }
}

/// Parse whitespace-separated tag tokens.
///
/// `-name` removes, `+name` or `name` adds. Lone signs are ignored. Every
/// name is validated before anything is returned, so a bad token rejects the
/// whole line.
pub fn parse_tag_edit(input: &str) -> Result<TagEdit, TagEditError> {
    let mut edit = TagEdit::default();
    for word in input.split_whitespace() {
        if let Some(name) = word.strip_prefix('-') {
            if name.is_empty() {
                continue;
            }
            validate_tag_name(name).map_err(|source| TagEditError::Remove {
                tag: name.to_string(),
                source,
            })?;
            edit.removes.push(name.to_string());
        } else {
            let name = word.strip_prefix('+').unwrap_or(word);
            if name.is_empty() {
                continue;
            }
            validate_tag_name(name).map_err(|source| TagEditError::Add {
                tag: name.to_string(),
                source,
            })?;
            edit.adds.push(name.to_string());
        }
    }
    Ok(edit)
}
