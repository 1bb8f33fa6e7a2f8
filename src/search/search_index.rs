//! In-memory directory search index.
//!
//! Maps search terms to firms and companies and answers ranked
//! exact/prefix/substring queries. The index is rebuilt wholesale; there is no
//! incremental update path.

use super::terms::generate_search_terms;
use crate::models::entity::non_blank;
use crate::models::{Company, EntityKind, EntityRecord, Firm, IndexedEntity, IndexedEntityRef};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;

/// Number of results returned when the caller does not pick a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Score for a term equal to the query.
const EXACT_MATCH_SCORE: i32 = 100;

/// Base score for a term that starts with the query, minus one per extra char.
const PREFIX_MATCH_BASE: i32 = 80;

/// Score for a term that contains the query somewhere after its start.
const SUBSTRING_MATCH_SCORE: i32 = 60;

/// A ranked search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The matched entity
    pub entity: IndexedEntityRef,

    /// Relevance score, `None` for browse listings
    pub score: Option<i32>,
}

/// Inverted index over firms and companies.
#[derive(Debug, Default)]
pub struct SearchIndex {
    /// Entities in insertion order
    items: Vec<IndexedEntityRef>,

    /// Term -> positions in `items`, ordered so prefix matches are contiguous
    terms: BTreeMap<String, Vec<usize>>,

    /// Set by the first build and never cleared
    built: bool,
}

impl SearchIndex {
    /// Create a new, unbuilt index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the index from the given collections.
    ///
    /// Prior state is discarded. Records with a blank name are skipped.
    /// Firms sharing a provided id and companies sharing a dedup key
    /// (domain, else website, else name) keep only the first record seen.
    pub fn build(&mut self, firms: &[Firm], companies: &[Company]) {
        self.items.clear();
        self.terms.clear();

        let mut seen_firm_ids: HashSet<String> = HashSet::new();
        for firm in firms {
            let name = firm.name.trim();
            if name.is_empty() {
                continue;
            }

            let id = match non_blank(&firm.id) {
                Some(id) => {
                    if !seen_firm_ids.insert(id.to_string()) {
                        tracing::debug!("Skipping duplicate firm id {}", id);
                        continue;
                    }
                    id.to_string()
                }
                None => format!("firm-{}", self.items.len()),
            };

            self.register(
                id,
                name,
                &firm.city,
                &firm.state,
                EntityRecord::Firm(Arc::new(firm.clone())),
            );
        }

        let mut seen_company_keys: HashSet<String> = HashSet::new();
        for company in companies {
            let name = company.name.trim();
            if name.is_empty() {
                continue;
            }

            let key = company.dedup_key();
            if !seen_company_keys.insert(key) {
                continue;
            }

            let id = company
                .preferred_id()
                .unwrap_or_else(|| format!("company-{}", self.items.len()));

            self.register(
                id,
                name,
                &company.city,
                &company.state,
                EntityRecord::Company(Arc::new(company.clone())),
            );
        }

        self.built = true;

        tracing::debug!(
            "Search index built: {} entities, {} terms",
            self.items.len(),
            self.terms.len()
        );
    }

    fn register(
        &mut self,
        id: String,
        name: &str,
        city: &Option<String>,
        state: &Option<String>,
        source_ref: EntityRecord,
    ) {
        let city = non_blank(city).unwrap_or_default().to_string();
        let state = non_blank(state).unwrap_or_default().to_string();
        let search_terms = generate_search_terms(name, &city, &state);

        let position = self.items.len();
        for term in &search_terms {
            self.terms.entry(term.clone()).or_default().push(position);
        }

        self.items.push(Arc::new(IndexedEntity {
            id,
            name: name.to_string(),
            city,
            state,
            kind: source_ref.kind(),
            search_terms,
            source_ref,
        }));
    }

    /// Search the index.
    ///
    /// An unbuilt index or a blank query returns the first `limit` entities in
    /// insertion order. Otherwise results are ranked by:
    /// 1. exact term match: 100
    /// 2. prefix match: 100 if equal, else `80 - extra chars` (may go negative)
    /// 3. substring match, only consulted while fewer than `limit` entities
    ///    have matched: 60
    ///
    /// Each entity keeps its highest score; later phases never lower it.
    /// Scores are tracked per indexed entity, so a firm and a company that
    /// happen to share an id are ranked independently.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.search_kind(query, limit, None)
    }

    /// Search the index, keeping only entities of `kind` when given.
    ///
    /// The filter applies before ranking is truncated, so matches of the
    /// requested kind are never crowded out by the other kind.
    pub fn search_kind(
        &self,
        query: &str,
        limit: usize,
        kind: Option<EntityKind>,
    ) -> Vec<SearchHit> {
        let query = query.trim().to_lowercase();
        if !self.built || query.is_empty() {
            return self.browse(limit, kind);
        }

        let wanted =
            |position: usize| kind.map_or(true, |kind| self.items[position].kind == kind);
        let mut scores: HashMap<usize, i32> = HashMap::new();

        if let Some(positions) = self.terms.get(&query) {
            for &position in positions.iter().filter(|&&p| wanted(p)) {
                raise_score(&mut scores, position, EXACT_MATCH_SCORE);
            }
        }

        let query_len = query.chars().count();
        let prefix_matches = self
            .terms
            .range::<str, _>((Bound::Included(query.as_str()), Bound::Unbounded))
            .take_while(|(term, _)| term.starts_with(query.as_str()));
        for (term, positions) in prefix_matches {
            let score = prefix_score(term, query_len);
            for &position in positions.iter().filter(|&&p| wanted(p)) {
                raise_score(&mut scores, position, score);
            }
        }

        if scores.len() < limit {
            for (term, positions) in &self.terms {
                if term.starts_with(query.as_str()) || !term.contains(query.as_str()) {
                    continue;
                }
                for &position in positions.iter().filter(|&&p| wanted(p)) {
                    raise_score(&mut scores, position, SUBSTRING_MATCH_SCORE);
                }
            }
        }

        let mut ranked: Vec<(usize, i32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(position, score)| SearchHit {
                entity: self.items[position].clone(),
                score: Some(score),
            })
            .collect()
    }

    fn browse(&self, limit: usize, kind: Option<EntityKind>) -> Vec<SearchHit> {
        self.items
            .iter()
            .filter(|entity| kind.map_or(true, |kind| entity.kind == kind))
            .take(limit)
            .map(|entity| SearchHit {
                entity: entity.clone(),
                score: None,
            })
            .collect()
    }

    /// Whether `build` has run at least once.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the index holds no entities.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Count indexed entities of one kind.
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.items.iter().filter(|e| e.kind == kind).count()
    }
}

fn prefix_score(term: &str, query_len: usize) -> i32 {
    let extra = term.chars().count().saturating_sub(query_len);
    if extra == 0 {
        EXACT_MATCH_SCORE
    } else {
        PREFIX_MATCH_BASE.saturating_sub(i32::try_from(extra).unwrap_or(i32::MAX))
    }
}

fn raise_score(scores: &mut HashMap<usize, i32>, position: usize, score: i32) {
    scores
        .entry(position)
        .and_modify(|current| {
            if score > *current {
                *current = score;
            }
        })
        .or_insert(score);
}
