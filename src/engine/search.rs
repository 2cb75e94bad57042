// SPDX-License-Identifier: MPL-2.0

use crate::engine::{CacheEngine, EngineError};
use crate::mojang::IdentityService;
use crate::store::ProfileStore;

/// Minimum fragment length; shorter queries are refused outright to keep
/// table scans off the cheap-abuse path.
const MIN_FRAGMENT_LEN: usize = 3;

/// One fragment-search hit.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub display_name: String,
    pub id: String,
    pub head: Vec<u8>,
}

/// A page of search hits plus the total under the same filter.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub entries: Vec<SearchEntry>,
    pub total_count: u64,
    pub next_page: u32,
}

impl<S: ProfileStore, C: IdentityService> CacheEngine<S, C> {
    /// Fragment search over cached rows whose owners opted in. Read-only;
    /// empty results (and too-short fragments) are `NoContent`, which is a
    /// valid-query-nothing-there signal, not an error in the `NotFound`
    /// sense.
    pub fn search(
        &self,
        fragment: &str,
        take: u32,
        page: u32,
    ) -> Result<SearchPage, EngineError> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.chars().count() < MIN_FRAGMENT_LEN {
            return Err(EngineError::NoContent);
        }

        let total_count = self.store.count_matching(&fragment)?;
        if total_count == 0 {
            return Err(EngineError::NoContent);
        }

        let rows = self.store.find_page(&fragment, take, page)?;
        if rows.is_empty() {
            return Err(EngineError::NoContent);
        }

        Ok(SearchPage {
            entries: rows
                .into_iter()
                .map(|row| SearchEntry {
                    display_name: row.display_name,
                    id: row.id,
                    head: row.head,
                })
                .collect(),
            total_count,
            next_page: page + 1,
        })
    }
}
