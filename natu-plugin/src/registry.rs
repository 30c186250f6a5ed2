//! Function Registry

use crate::{FunctionMeta, FunctionPlugin};
use natu_core::{NatuError, Number};
use std::collections::HashMap;
use std::sync::Arc;

/// Name → scalar function table injected into the evaluator
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self { functions: HashMap::new() }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_string();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Call a function by name after checking its arity
    pub fn call(&self, name: &str, args: &[Number]) -> Result<Number, NatuError> {
        match self.get_function(name) {
            Some(f) => {
                f.meta().check_arity(args.len())?;
                tracing::trace!(function = name, argc = args.len(), "calling scalar function");
                f.call(args)
            }
            None => {
                // Find similar function names for better error message
                let similar = self.find_similar_functions(name);
                let mut err = NatuError::unknown_function(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use list_functions for full list.",
                        suggestions.join(", ")
                    ));
                }
                Err(err)
            }
        }
    }

    /// Metadata for one function
    pub fn help(&self, name: &str) -> Option<FunctionMeta> {
        self.get_function(name).map(|f| f.meta())
    }

    /// Metadata for all functions, optionally filtered by category, sorted by name
    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        let mut metas: Vec<FunctionMeta> = self.functions.values()
            .map(|f| f.meta())
            .filter(|m| category.map_or(true, |c| m.category == c))
            .collect();
        metas.sort_by(|a, b| a.name.cmp(b.name));
        metas
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self.functions.keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, &func_name.to_lowercase());
                if score > 0 {
                    Some((func_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Higher score first, then alphabetical for stable output
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Similarity score between two names; zero means unrelated
    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: std::collections::HashSet<char> = query.chars().collect();
        let candidate_chars: std::collections::HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        if common * 2 < query_chars.len() && score == 0 {
            // Less than half the letters in common
            return 0;
        }
        score += common * 2;

        // Penalize length difference
        let len_diff = query.len().abs_diff(candidate.len());
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry").field("functions", &names).finish()
    }
}
