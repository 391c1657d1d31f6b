//! DTO → style model conversion with validation.

use super::dto::{CompositeRuleDto, RuleDto, StyleDto};
use super::model::{CompiledPattern, CompositeRule, StyleModel, StyleRule};
use super::StyleError;
use crate::category::{Category, VariableScope};
use crate::node::TypeClass;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Converts a raw style document into a validated [`StyleModel`].
///
/// Keys that are not category names are ignored with a warning.
///
/// # Errors
///
/// Returns the first malformed entry: an invalid regular expression, a
/// nested mapping on a simple category, an unknown prefix key, a
/// `VariableName` rule without its base `Pattern`, or a category given
/// twice under different spellings.
pub fn load(dto: StyleDto) -> Result<StyleModel, StyleError> {
    let mut rules = BTreeMap::new();

    for (key, rule) in dto {
        let Some(category) = Category::from_name(&key) else {
            match suggest_category(&key) {
                Some(close) => warn!(
                    "Ignoring unknown style category `{key}` (did you mean `{close}`?)"
                ),
                None => warn!("Ignoring unknown style category `{key}`"),
            }
            continue;
        };

        let converted = match (category, rule) {
            (Category::VariableName, RuleDto::Composite(c)) => convert_composite(c)?,
            (Category::VariableName, RuleDto::Pattern(p)) => {
                convert_composite(CompositeRuleDto {
                    pattern: Some(p),
                    ..CompositeRuleDto::default()
                })?
            }
            (category, RuleDto::Pattern(p)) => StyleRule::Simple(compile(category, p)?),
            (category, RuleDto::Composite(_)) => {
                return Err(StyleError::UnexpectedComposite { category })
            }
        };

        if rules.insert(category, converted).is_some() {
            return Err(StyleError::DuplicateCategory { category });
        }
        debug!("Loaded rule for {category}");
    }

    Ok(StyleModel::new(rules))
}

fn compile(category: Category, pattern: String) -> Result<CompiledPattern, StyleError> {
    CompiledPattern::new(pattern.clone()).map_err(|e| StyleError::PatternCompile {
        category,
        pattern,
        reason: e.to_string(),
    })
}

fn convert_composite(dto: CompositeRuleDto) -> Result<StyleRule, StyleError> {
    let base = dto.pattern.ok_or(StyleError::MissingBasePattern)?;

    let scope_prefix = dto
        .scope_prefix
        .into_iter()
        .map(|(key, fragment)| parse_scope(&key).map(|scope| (scope, fragment)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    let data_type_prefix = dto
        .data_type_prefix
        .into_iter()
        .map(|(key, fragment)| parse_type_class(&key).map(|tc| (tc, fragment)))
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    let rule = CompositeRule::new(scope_prefix, data_type_prefix, base).map_err(
        |(pattern, e)| StyleError::PatternCompile {
            category: Category::VariableName,
            pattern,
            reason: e.to_string(),
        },
    )?;

    Ok(StyleRule::Composite(rule))
}

/// Closest category name to a misspelled key, if any is near enough.
pub(crate) fn suggest_category(key: &str) -> Option<Category> {
    let key = key.to_ascii_lowercase();
    let limit = (key.len() / 4).max(2);
    Category::ALL
        .into_iter()
        .map(|c| (levenshtein(&key, &c.name().to_ascii_lowercase()), c))
        .filter(|(distance, _)| *distance <= limit)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, c)| c)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut row = Vec::with_capacity(b.len() + 1);
        row.push(i + 1);
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            let best = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
            row.push(best);
        }
        prev = row;
    }
    prev[b.len()]
}

fn parse_scope(key: &str) -> Result<VariableScope, StyleError> {
    match key {
        "Global" => Ok(VariableScope::Global),
        "Static" => Ok(VariableScope::Static),
        "ClassMember" => Ok(VariableScope::ClassMember),
        "Local" => Ok(VariableScope::Local),
        _ => Err(StyleError::UnknownScope {
            key: key.to_string(),
        }),
    }
}

fn parse_type_class(key: &str) -> Result<TypeClass, StyleError> {
    match key {
        "String" => Ok(TypeClass::String),
        "Pointer" => Ok(TypeClass::Pointer),
        "Integer" => Ok(TypeClass::Integer),
        "Bool" | "Boolean" => Ok(TypeClass::Bool),
        "Other" => Ok(TypeClass::Other),
        _ => Err(StyleError::UnknownDataType {
            key: key.to_string(),
        }),
    }
}
